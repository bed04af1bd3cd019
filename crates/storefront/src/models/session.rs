//! Session-related types.
//!
//! Every piece of per-visitor state lives under its own session key and is
//! read, modified and written back within a single request.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tower_sessions::Session;

use febsin_core::{Email, UserId};

/// The logged-in (mock) member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub avatar: String,
    /// Display label such as `"Jan 2024"`.
    pub member_since: String,
    pub points: u32,
}

/// Session keys for visitor state.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the shopping cart.
    pub const CART: &str = "cart";

    /// Key for the wishlist.
    pub const WISHLIST: &str = "wishlist";

    /// Key for the light/dark theme preference.
    pub const THEME: &str = "theme";

    /// Key for review IDs the visitor marked helpful.
    pub const HELPFUL_VOTES: &str = "helpful_votes";

    /// Key for lookbook image IDs the visitor liked.
    pub const LOOKBOOK_LIKES: &str = "lookbook_likes";

    /// Key for reviews the visitor wrote.
    pub const SUBMITTED_REVIEWS: &str = "submitted_reviews";
}

/// Read a value from the session, falling back to its default.
///
/// # Errors
///
/// Returns an error if the session store fails or the stored value cannot be
/// deserialized.
pub async fn load<T>(session: &Session, key: &str) -> Result<T, tower_sessions::session::Error>
where
    T: DeserializeOwned + Default,
{
    Ok(session.get::<T>(key).await?.unwrap_or_default())
}

/// Write a value to the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn store<T>(
    session: &Session,
    key: &str,
    value: &T,
) -> Result<(), tower_sessions::session::Error>
where
    T: Serialize + Send + Sync,
{
    session.insert(key, value).await
}

/// Toggle membership of `id` in a set-like list stored under `key`.
///
/// Returns `true` when the id is now present.
///
/// # Errors
///
/// Returns an error if the session cannot be read or modified.
pub async fn toggle_in_set(
    session: &Session,
    key: &str,
    id: &str,
) -> Result<bool, tower_sessions::session::Error> {
    let mut ids: Vec<String> = load(session, key).await?;
    let present = if let Some(pos) = ids.iter().position(|i| i == id) {
        ids.remove(pos);
        false
    } else {
        ids.push(id.to_string());
        true
    };
    store(session, key, &ids).await?;
    Ok(present)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;
    use crate::models::Cart;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_load_defaults_when_missing() {
        let session = session();
        let cart: Cart = load(&session, keys::CART).await.unwrap();
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_toggle_in_set() {
        let session = session();
        assert!(toggle_in_set(&session, keys::HELPFUL_VOTES, "rev-1").await.unwrap());
        assert!(toggle_in_set(&session, keys::HELPFUL_VOTES, "rev-2").await.unwrap());
        assert!(!toggle_in_set(&session, keys::HELPFUL_VOTES, "rev-1").await.unwrap());

        let votes: Vec<String> = load(&session, keys::HELPFUL_VOTES).await.unwrap();
        assert_eq!(votes, ["rev-2"]);
    }
}
