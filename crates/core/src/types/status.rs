//! Catalog taxonomy and status enums.
//!
//! The string forms are the labels shown in the shop (and accepted in query
//! strings), so `as_str` and `FromStr` round-trip exactly.

use serde::{Deserialize, Serialize};

/// Error returned when a label does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Kaos,
    Kemeja,
    Hoodie,
    Aksesoris,
}

impl Category {
    /// Every category, in the order the shop lists them.
    pub const ALL: [Self; 4] = [Self::Kaos, Self::Kemeja, Self::Hoodie, Self::Aksesoris];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Kaos => "Kaos",
            Self::Kemeja => "Kemeja",
            Self::Hoodie => "Hoodie",
            Self::Aksesoris => "Aksesoris",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("category", s))
    }
}

/// Target gender of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Pria,
    Wanita,
    Unisex,
}

impl Gender {
    pub const ALL: [Self; 3] = [Self::Pria, Self::Wanita, Self::Unisex];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pria => "Pria",
            Self::Wanita => "Wanita",
            Self::Unisex => "Unisex",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Gender {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("gender", s))
    }
}

/// Order status of a (fixture) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Badge label shown on the dashboard.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Menunggu Pembayaran",
            Self::Processing => "Diproses",
            Self::Shipped => "Dikirim",
            Self::Delivered => "Selesai",
            Self::Cancelled => "Dibatalkan",
        }
    }

    /// Badge style variant.
    #[must_use]
    pub const fn badge_variant(&self) -> &'static str {
        match self {
            Self::Pending => "secondary",
            Self::Processing | Self::Shipped | Self::Delivered => "default",
            Self::Cancelled => "destructive",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Processing => write!(f, "processing"),
            Self::Shipped => write!(f, "shipped"),
            Self::Delivered => write!(f, "delivered"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Color theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Class applied to the `<html>` element.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trips_through_label() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
        assert!("kaos".parse::<Category>().is_err());
    }

    #[test]
    fn test_gender_parse_unknown() {
        let err = "Anak".parse::<Gender>().unwrap_err();
        assert_eq!(err.to_string(), "unknown gender: Anak");
    }

    #[test]
    fn test_order_status_labels() {
        assert_eq!(OrderStatus::Delivered.label(), "Selesai");
        assert_eq!(OrderStatus::Shipped.label(), "Dikirim");
        assert_eq!(OrderStatus::Cancelled.badge_variant(), "destructive");
        assert_eq!(OrderStatus::Pending.to_string(), "pending");
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::default(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
    }
}
