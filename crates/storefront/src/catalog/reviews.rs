//! Review aggregation, sorting and submission.

use chrono::NaiveDate;
use febsin_core::{ProductId, ReviewId};
use serde::Deserialize;
use thiserror::Error;

use super::Review;

/// Validation errors for a submitted review.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error("Please select a rating")]
    MissingRating,
    #[error("Please fill in all fields")]
    MissingFields,
}

impl ReviewError {
    /// Notice code used in redirects.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingRating => "review_rating",
            Self::MissingFields => "review_fields",
        }
    }
}

/// One row of the star distribution chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingRow {
    pub stars: u8,
    pub count: usize,
    /// Share of all reviews, rounded to a whole percent.
    pub percentage: u32,
    /// Bar width in percent; non-empty rows get at least 5.
    pub bar_width: u32,
}

/// Aggregate view of a product's reviews.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingSummary {
    pub count: usize,
    pub average: f64,
    /// Rows for 5 down to 1 stars.
    pub rows: Vec<RatingRow>,
}

impl RatingSummary {
    /// Minimum bar width for a row that has any reviews.
    pub const MIN_BAR_WIDTH: u32 = 5;

    #[must_use]
    pub fn from_reviews(reviews: &[Review]) -> Self {
        let count = reviews.len();
        let average = if count == 0 {
            0.0
        } else {
            let total: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
            f64::from(total) / usize_to_f64(count)
        };

        let rows = (1..=5u8)
            .rev()
            .map(|stars| {
                let matching = reviews.iter().filter(|r| r.rating == stars).count();
                let percentage = if count == 0 {
                    0
                } else {
                    round_percent(usize_to_f64(matching) * 100.0 / usize_to_f64(count))
                };
                let bar_width = if matching > 0 {
                    percentage.max(Self::MIN_BAR_WIDTH)
                } else {
                    0
                };
                RatingRow {
                    stars,
                    count: matching,
                    percentage,
                    bar_width,
                }
            })
            .collect();

        Self {
            count,
            average,
            rows,
        }
    }
}

#[allow(clippy::cast_precision_loss)]
const fn usize_to_f64(value: usize) -> f64 {
    value as f64
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_percent(value: f64) -> u32 {
    value.round().clamp(0.0, 100.0) as u32
}

/// Number of filled stars for an average rating.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn filled_stars(average: f64) -> u8 {
    average.round().clamp(0.0, 5.0) as u8
}

/// Order of the review list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewSort {
    /// Newest first.
    #[default]
    Recent,
    /// Most helpful votes first.
    Helpful,
    /// Highest rating first.
    Highest,
    /// Lowest rating first.
    Lowest,
}

impl ReviewSort {
    pub const ALL: [Self; 4] = [Self::Recent, Self::Helpful, Self::Highest, Self::Lowest];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recent => "recent",
            Self::Helpful => "helpful",
            Self::Highest => "highest",
            Self::Lowest => "lowest",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Recent => "Most Recent",
            Self::Helpful => "Most Helpful",
            Self::Highest => "Highest Rating",
            Self::Lowest => "Lowest Rating",
        }
    }
}

/// Sort reviews in place. The sort is stable, so ties keep their order.
pub fn sort_reviews(reviews: &mut [Review], sort: ReviewSort) {
    match sort {
        ReviewSort::Recent => reviews.sort_by(|a, b| b.date.cmp(&a.date)),
        ReviewSort::Helpful => reviews.sort_by(|a, b| b.helpful.cmp(&a.helpful)),
        ReviewSort::Highest => reviews.sort_by(|a, b| b.rating.cmp(&a.rating)),
        ReviewSort::Lowest => reviews.sort_by(|a, b| a.rating.cmp(&b.rating)),
    }
}

/// Rating to show for a product: the catalog rating when the product has
/// one, otherwise the mean of the visible reviews, otherwise zero.
#[must_use]
pub fn display_rating(catalog_rating: Option<f64>, summary: &RatingSummary) -> f64 {
    catalog_rating.unwrap_or(summary.average)
}

/// Review form data.
#[derive(Debug, Clone, Deserialize)]
pub struct NewReview {
    /// 0 when no star was picked.
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub size: Option<String>,
}

impl NewReview {
    /// Check the form.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::MissingRating`] unless the rating is 1-5 and
    /// [`ReviewError::MissingFields`] when the title or comment is blank.
    pub fn validate(&self) -> Result<(), ReviewError> {
        if !(1..=5).contains(&self.rating) {
            return Err(ReviewError::MissingRating);
        }
        if self.title.trim().is_empty() || self.comment.trim().is_empty() {
            return Err(ReviewError::MissingFields);
        }
        Ok(())
    }

    /// Validate and turn the form into a review by `author`.
    ///
    /// # Errors
    ///
    /// See [`NewReview::validate`].
    pub fn into_review(
        self,
        product_id: ProductId,
        author: &str,
        avatar: &str,
        today: NaiveDate,
    ) -> Result<Review, ReviewError> {
        self.validate()?;
        Ok(Review {
            id: ReviewId::new(format!("rev-{}", uuid::Uuid::new_v4().simple())),
            product_id,
            author: author.to_string(),
            avatar: avatar.to_string(),
            rating: self.rating,
            title: self.title.trim().to_string(),
            comment: self.comment.trim().to_string(),
            date: today,
            size: self.size.filter(|s| !s.trim().is_empty()),
            verified: false,
            helpful: 0,
        })
    }
}
