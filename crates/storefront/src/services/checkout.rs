//! WhatsApp checkout hand-off.
//!
//! Checkout does not take payment. The order is formatted as a text message
//! and the visitor is sent to a `wa.me` deep link with that message
//! pre-filled, addressed to the shop's admin number.

use serde::Deserialize;
use thiserror::Error;

use crate::models::{Cart, OrderSummary};

/// Checkout validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("Mohon lengkapi semua data yang wajib diisi")]
    MissingFields,
    #[error("Keranjang belanja kosong")]
    EmptyCart,
}

impl CheckoutError {
    /// Notice code used in redirects.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingFields => "checkout_fields",
            Self::EmptyCart => "cart_empty",
        }
    }
}

/// Courier options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShippingMethod {
    #[default]
    Jne,
    Sicepat,
    Jnt,
}

impl ShippingMethod {
    pub const ALL: [Self; 3] = [Self::Jne, Self::Sicepat, Self::Jnt];

    /// Form value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Jne => "jne",
            Self::Sicepat => "sicepat",
            Self::Jnt => "jnt",
        }
    }

    /// Name with delivery estimate, as printed in the order message.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Jne => "JNE Regular (2-3 hari)",
            Self::Sicepat => "SiCepat (2-3 hari)",
            Self::Jnt => "J&T Express (2-3 hari)",
        }
    }
}

/// Checkout form data.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CheckoutForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    pub notes: String,
    pub shipping_method: ShippingMethod,
}

impl CheckoutForm {
    /// Check required fields (name, phone, address, city).
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::MissingFields`] if any is blank.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        let required = [&self.name, &self.phone, &self.address, &self.city];
        if required.iter().any(|v| v.trim().is_empty()) {
            return Err(CheckoutError::MissingFields);
        }
        Ok(())
    }
}

/// Render the order message sent to the admin.
#[must_use]
pub fn build_order_message(
    form: &CheckoutForm,
    cart: &Cart,
    summary: &OrderSummary,
    member: bool,
) -> String {
    let or_dash = |v: &str| {
        let v = v.trim();
        if v.is_empty() { "-".to_string() } else { v.to_string() }
    };
    let shipping_fee = if summary.is_free_shipping() {
        "GRATIS".to_string()
    } else {
        summary.shipping.display()
    };

    let province = match form.province.trim() {
        "" => String::new(),
        province => format!("📌 Provinsi: {province}\n"),
    };
    let mut message = format!(
        "*PESANAN BARU FEBSIN* 🛍️\n\n\
         *DATA PELANGGAN:*\n\
         👤 Nama: {}\n\
         📧 Email: {}\n\
         📱 No. HP: {}\n\
         📍 Alamat: {}\n\
         🏙️ Kota: {}\n\
         {province}\
         📮 Kode Pos: {}\n\n\
         *DETAIL PESANAN:*\n",
        form.name.trim(),
        or_dash(&form.email),
        form.phone.trim(),
        form.address.trim(),
        form.city.trim(),
        or_dash(&form.postal_code),
    );

    for (index, line) in cart.lines().iter().enumerate() {
        message.push_str(&format!(
            "{}. {}\n   • Size: {}\n   • Qty: {}\n   • Harga: {}\n   • Subtotal: {}\n\n",
            index + 1,
            line.name,
            line.size,
            line.quantity,
            line.unit_price(member),
            line.line_total(member),
        ));
    }

    let shipping_line = if summary.is_free_shipping() {
        "GRATIS ✅"
    } else {
        shipping_fee.as_str()
    };
    message.push_str(&format!(
        "*PENGIRIMAN:*\n📦 Metode: {}\n💰 Ongkir: {shipping_line}\n\n",
        form.shipping_method.label(),
    ));

    if !form.notes.trim().is_empty() {
        message.push_str(&format!("*CATATAN:*\n📝 {}\n\n", form.notes.trim()));
    }

    message.push_str(&format!(
        "*RINGKASAN PEMBAYARAN:*\n\
         • Subtotal: {}\n\
         • Ongkir: {shipping_fee}\n\
         ━━━━━━━━━━━━━━━━\n\
         *TOTAL: {}*\n\n\
         _Mohon konfirmasi pesanan ini. Terima kasih! 🙏_",
        summary.subtotal, summary.total,
    ));

    message
}

/// `wa.me` deep link with a pre-filled message.
#[must_use]
pub fn whatsapp_url(number: &str, message: &str) -> String {
    format!("https://wa.me/{number}?text={}", urlencoding::encode(message))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::config::ShippingPolicy;
    use crate::models::CartLine;

    fn form() -> CheckoutForm {
        CheckoutForm {
            name: "Budi Santoso".to_string(),
            phone: "081234567890".to_string(),
            address: "Jl. Merdeka No. 10".to_string(),
            city: "Bandung".to_string(),
            ..CheckoutForm::default()
        }
    }

    fn cart(items: &[(&str, &str, u32)]) -> Cart {
        let catalog = Catalog::fixtures();
        let mut cart = Cart::default();
        for (id, size, qty) in items {
            let product = catalog.product(id).unwrap();
            cart.add(CartLine::for_product(product, size, *qty).unwrap());
        }
        cart
    }

    #[test]
    fn test_validate_requires_core_fields() {
        assert!(form().validate().is_ok());

        for blank in ["name", "phone", "address", "city"] {
            let mut f = form();
            match blank {
                "name" => f.name = "  ".to_string(),
                "phone" => f.phone.clear(),
                "address" => f.address.clear(),
                _ => f.city.clear(),
            }
            assert_eq!(f.validate(), Err(CheckoutError::MissingFields), "{blank}");
        }
    }

    #[test]
    fn test_shipping_method_parses_from_form_value() {
        let parsed: CheckoutForm =
            serde_json::from_str(r#"{"shipping_method":"sicepat"}"#).unwrap();
        assert_eq!(parsed.shipping_method, ShippingMethod::Sicepat);
        assert_eq!(CheckoutForm::default().shipping_method, ShippingMethod::Jne);
        assert_eq!(ShippingMethod::Jnt.label(), "J&T Express (2-3 hari)");
    }

    #[test]
    fn test_message_with_shipping_fee() {
        let cart = cart(&[("1", "L", 2)]);
        let summary = cart.summary(false, &ShippingPolicy::default());
        let message = build_order_message(&form(), &cart, &summary, false);

        assert!(message.starts_with("*PESANAN BARU FEBSIN* 🛍️\n\n*DATA PELANGGAN:*\n"));
        assert!(message.contains("👤 Nama: Budi Santoso\n"));
        assert!(message.contains("📧 Email: -\n"));
        assert!(!message.contains("Provinsi"));
        assert!(message.contains("📮 Kode Pos: -\n\n"));
        assert!(message.contains(
            "1. Febsin Classic Black Tee\n   • Size: L\n   • Qty: 2\n   • Harga: Rp 199.000\n   • Subtotal: Rp 398.000\n\n"
        ));
        assert!(message.contains("📦 Metode: JNE Regular (2-3 hari)\n💰 Ongkir: Rp 25.000\n\n"));
        assert!(!message.contains("*CATATAN:*"));
        assert!(message.contains("• Subtotal: Rp 398.000\n• Ongkir: Rp 25.000\n"));
        assert!(message.ends_with(
            "━━━━━━━━━━━━━━━━\n*TOTAL: Rp 423.000*\n\n_Mohon konfirmasi pesanan ini. Terima kasih! 🙏_"
        ));
    }

    #[test]
    fn test_message_free_shipping_member_prices_and_notes() {
        let cart = cart(&[("2", "XL", 1), ("4", "One Size", 2)]);
        let summary = cart.summary(true, &ShippingPolicy::default());
        let mut f = form();
        f.province = "Jawa Barat".to_string();
        f.notes = "Tolong dibungkus kado".to_string();
        f.shipping_method = ShippingMethod::Jnt;

        let message = build_order_message(&f, &cart, &summary, true);
        assert!(message.contains("📌 Provinsi: Jawa Barat\n"));
        assert!(message.contains("   • Harga: Rp 349.000\n"));
        assert!(message.contains("2. Febsin Cap Classic\n"));
        assert!(message.contains("   • Subtotal: Rp 198.000\n"));
        assert!(message.contains("💰 Ongkir: GRATIS ✅\n"));
        assert!(message.contains("*CATATAN:*\n📝 Tolong dibungkus kado\n\n"));
        assert!(message.contains("• Ongkir: GRATIS\n"));
        assert!(message.contains("*TOTAL: Rp 547.000*"));
    }

    #[test]
    fn test_whatsapp_url_encodes_message() {
        let url = whatsapp_url("6285291619898", "Halo & selamat pagi\n*TOTAL*");
        assert_eq!(
            url,
            "https://wa.me/6285291619898?text=Halo%20%26%20selamat%20pagi%0A%2ATOTAL%2A"
        );
    }
}
