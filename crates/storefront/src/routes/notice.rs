//! Transient notices carried across redirects.
//!
//! Handlers redirect with `?error=<code>` or `?success=<code>`; the layout
//! turns the code back into a message. Unknown codes are dropped so query
//! strings can never inject text into the page.

use axum::response::Redirect;

use crate::middleware::is_local_path;

/// Kind of notice, used as a CSS modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// A message shown once at the top of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: &'static str,
}

impl Notice {
    /// Error notice for a known code.
    #[must_use]
    pub fn error(code: &str) -> Option<Self> {
        error_message(code).map(|message| Self {
            kind: NoticeKind::Error,
            message,
        })
    }

    /// Success notice for a known code.
    #[must_use]
    pub fn success(code: &str) -> Option<Self> {
        success_message(code).map(|message| Self {
            kind: NoticeKind::Success,
            message,
        })
    }

    /// Read the notice from a raw query string. Errors win over successes.
    #[must_use]
    pub fn from_query(query: Option<&str>) -> Option<Self> {
        let query = query?;
        let mut error = None;
        let mut success = None;
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "error" if error.is_none() => error = Self::error(&value),
                "success" if success.is_none() => success = Self::success(&value),
                _ => {}
            }
        }
        error.or(success)
    }
}

fn error_message(code: &str) -> Option<&'static str> {
    let message = match code {
        "size_required" => "Pilih ukuran terlebih dahulu",
        "invalid_size" => "Ukuran tidak tersedia",
        "sold_out" => "Produk habis terjual",
        "unknown_product" => "Produk tidak ditemukan",
        "cart_empty" => "Keranjang belanja kosong",
        "checkout_fields" => "Mohon lengkapi semua data yang wajib diisi",
        "login_required" => "Silakan login terlebih dahulu",
        "invalid_email" => "Email tidak valid",
        "missing_name" => "Nama wajib diisi",
        "missing_password" => "Password wajib diisi",
        "password_mismatch" => "Password tidak cocok!",
        "weak_password" => "Password minimal 6 karakter",
        "review_rating" => "Please select a rating",
        "review_fields" => "Please fill in all fields",
        "contact_fields" => "Mohon lengkapi semua field",
        _ => return None,
    };
    Some(message)
}

fn success_message(code: &str) -> Option<&'static str> {
    let message = match code {
        "cart_added" => "Ditambahkan ke keranjang",
        "cart_updated" => "Keranjang diperbarui",
        "cart_removed" => "Produk dihapus dari keranjang",
        "wishlist_added" => "Ditambahkan ke wishlist",
        "wishlist_removed" => "Dihapus dari wishlist",
        "login" => "Login berhasil! Selamat datang kembali 🎉",
        "register" => "Registrasi berhasil! Selamat datang di Febsin Club 🎉",
        "logout" => "Berhasil logout",
        "review_submitted" => "Review submitted successfully!",
        "liked" => "Liked!",
        "unliked" => "Unlike",
        "contact_sent" => "Pesan terkirim! Kami akan segera menghubungi kamu.",
        "newsletter" => "Terima kasih! Kamu sudah subscribe newsletter Febsin",
        _ => return None,
    };
    Some(message)
}

/// Resolve a `return_to` form field to a local path, else `fallback`.
#[must_use]
pub fn safe_return(return_to: Option<&str>, fallback: &str) -> String {
    return_to
        .map(str::trim)
        .filter(|path| is_local_path(path))
        .unwrap_or(fallback)
        .to_string()
}

/// Append a notice to `path`, replacing any notice already in its query.
///
/// A `#fragment` on `path` is kept at the end.
#[must_use]
pub fn with_notice(path: &str, kind: NoticeKind, code: &str) -> String {
    let (path, fragment) = match path.split_once('#') {
        Some((p, f)) => (p, Some(f)),
        None => (path, None),
    };
    let (base, query) = path.split_once('?').unwrap_or((path, ""));

    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        if key != "error" && key != "success" {
            serializer.append_pair(&key, &value);
        }
    }
    serializer.append_pair(kind.as_str(), code);

    let mut target = format!("{base}?{}", serializer.finish());
    if let Some(fragment) = fragment {
        target.push('#');
        target.push_str(fragment);
    }
    target
}

/// Redirect to `path` with a success notice.
#[must_use]
pub fn redirect_success(path: &str, code: &str) -> Redirect {
    Redirect::to(&with_notice(path, NoticeKind::Success, code))
}

/// Redirect to `path` with an error notice.
#[must_use]
pub fn redirect_error(path: &str, code: &str) -> Redirect {
    Redirect::to(&with_notice(path, NoticeKind::Error, code))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_query_known_codes_only() {
        let notice = Notice::from_query(Some("success=cart_added")).unwrap();
        assert_eq!(notice.kind, NoticeKind::Success);
        assert_eq!(notice.message, "Ditambahkan ke keranjang");

        assert_eq!(Notice::from_query(Some("error=<script>")), None);
        assert_eq!(Notice::from_query(None), None);
    }

    #[test]
    fn test_error_wins_over_success() {
        let notice = Notice::from_query(Some("success=login&error=weak_password"));
        assert_eq!(notice.map(|n| n.kind), Some(NoticeKind::Error));
    }

    #[test]
    fn test_with_notice_replaces_previous_notice() {
        assert_eq!(
            with_notice("/shop?category=Kaos&success=cart_added", NoticeKind::Error, "sold_out"),
            "/shop?category=Kaos&error=sold_out"
        );
        assert_eq!(
            with_notice("/product/1#reviews", NoticeKind::Success, "review_submitted"),
            "/product/1?success=review_submitted#reviews"
        );
    }

    #[test]
    fn test_safe_return_rejects_foreign_targets() {
        assert_eq!(safe_return(Some("/cart"), "/"), "/cart");
        assert_eq!(safe_return(Some("//evil.example"), "/"), "/");
        assert_eq!(safe_return(Some("https://evil.example"), "/shop"), "/shop");
        assert_eq!(safe_return(None, "/dashboard"), "/dashboard");
    }
}
