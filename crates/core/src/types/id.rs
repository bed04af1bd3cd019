//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. Fixture data uses
//! short opaque strings ("1", "rev-3", "ORD-2025-001"), so the wrappers are
//! string-backed.

/// Macro to define a type-safe, string-backed ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`
/// - `Display`, `From<&str>`, `From<String>` and `AsRef<str>`
///
/// # Example
///
/// ```rust
/// # use febsin_core::define_id;
/// define_id!(ProductId);
/// define_id!(OrderId);
///
/// let product_id = ProductId::new("1");
/// let order_id = OrderId::new("1");
///
/// // These are different types, so this won't compile:
/// // let _: ProductId = order_id;
/// assert_eq!(product_id.as_str(), order_id.as_str());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from anything string-like.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(ReviewId);
define_id!(OrderId);
define_id!(UserId);
define_id!(LookbookImageId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_and_as_str() {
        let id = ProductId::new("7");
        assert_eq!(id.as_str(), "7");
        assert_eq!(id.to_string(), "7");
    }

    #[test]
    fn test_id_serde_is_transparent() {
        let id = ReviewId::from("rev-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"rev-1\"");

        let back: ReviewId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
