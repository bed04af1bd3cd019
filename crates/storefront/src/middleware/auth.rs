//! Authentication middleware and extractors.
//!
//! Provides extractors for requiring a logged-in member in route handlers.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{CurrentUser, session_keys};

/// Extractor that requires a logged-in member.
///
/// If the visitor is not logged in, redirects to the login page with a
/// `return_to` pointing back at the requested page.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("Halo, {}!", user.name)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

/// Error returned when authentication is required but the visitor is not logged in.
#[derive(Debug)]
pub enum AuthRejection {
    /// Redirect to the login page, then back to `return_to`.
    RedirectToLogin { return_to: String },
    /// Session layer missing.
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin { return_to } => {
                let target = format!(
                    "/auth/login?error=login_required&return_to={}",
                    urlencoding::encode(&return_to)
                );
                Redirect::to(&target).into_response()
            }
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

/// Page to come back to after logging in.
///
/// GET requests return to themselves. Form posts return to the page the
/// form was on when the browser sent a same-origin `Referer`, else home.
fn return_path(parts: &Parts) -> String {
    if parts.method == axum::http::Method::GET {
        return parts
            .uri
            .path_and_query()
            .map_or_else(|| "/".to_string(), |pq| pq.as_str().to_string());
    }

    parts
        .headers
        .get(axum::http::header::REFERER)
        .and_then(|v| v.to_str().ok())
        .and_then(|referer| url::Url::parse(referer).ok())
        .map(|url| match url.query() {
            Some(query) => format!("{}?{query}", url.path()),
            None => url.path().to_string(),
        })
        .filter(|path| is_local_path(path))
        .unwrap_or_else(|| "/".to_string())
}

/// Whether `path` is safe to redirect to: local, not protocol-relative.
#[must_use]
pub fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.starts_with("/\\")
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection::Unauthorized)?;

        let user: CurrentUser = session
            .get(session_keys::CURRENT_USER)
            .await
            .ok()
            .flatten()
            .ok_or_else(|| AuthRejection::RedirectToLogin {
                return_to: return_path(parts),
            })?;

        Ok(Self(user))
    }
}

/// Extractor that optionally gets the current member.
///
/// Unlike `RequireAuth`, this does not reject the request if the visitor is
/// not logged in.
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<CurrentUser>(session_keys::CURRENT_USER)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(user))
    }
}

/// Helper to set the current member in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Helper to clear the current member from the session (logout).
///
/// Cart, wishlist and theme stay with the visitor.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::{Method, Request, header};

    use super::*;

    fn parts(method: Method, uri: &str, referer: Option<&str>) -> Parts {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(referer) = referer {
            builder = builder.header(header::REFERER, referer);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_is_local_path() {
        assert!(is_local_path("/dashboard?tab=orders"));
        assert!(!is_local_path("//evil.example"));
        assert!(!is_local_path("https://evil.example"));
        assert!(!is_local_path("/\\evil.example"));
        assert!(!is_local_path(""));
    }

    #[test]
    fn test_return_path_for_get_is_the_request() {
        let parts = parts(Method::GET, "/dashboard?tab=wishlist", None);
        assert_eq!(return_path(&parts), "/dashboard?tab=wishlist");
    }

    #[test]
    fn test_return_path_for_post_uses_referer() {
        let parts = parts(
            Method::POST,
            "/wishlist/toggle",
            Some("http://localhost:3000/product/1?sort=helpful"),
        );
        assert_eq!(return_path(&parts), "/product/1?sort=helpful");

        let bare = parts_without_referer();
        assert_eq!(return_path(&bare), "/");
    }

    fn parts_without_referer() -> Parts {
        parts(Method::POST, "/lookbook/lb-1/like", None)
    }

    #[test]
    fn test_redirect_to_login_encodes_return_to() {
        let response = AuthRejection::RedirectToLogin {
            return_to: "/product/1?sort=helpful".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/auth/login?error=login_required&return_to=%2Fproduct%2F1%3Fsort%3Dhelpful"
        );
    }
}
