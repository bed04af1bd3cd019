//! Built-in catalog data.

use chrono::NaiveDate;
use febsin_core::{
    Category, Gender, LookbookImageId, OrderId, OrderStatus, Price, ProductId, ReviewId,
};

use super::{LookbookImage, Order, OrderItem, Product, Review, StoreStats, Testimonial};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(d) => d,
        None => NaiveDate::MIN,
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| (*s).to_string()).collect()
}

fn unsplash(photo: &str) -> String {
    format!("https://images.unsplash.com/photo-{photo}?w=800")
}

fn avatar(seed: &str) -> String {
    format!("https://api.dicebear.com/7.x/avataaars/svg?seed={seed}")
}

struct ProductSeed {
    id: &'static str,
    name: &'static str,
    category: Category,
    price: i64,
    member_price: i64,
    photos: &'static [&'static str],
    description: &'static str,
    material: &'static str,
    sizes: &'static [&'static str],
    colors: &'static [&'static str],
    gender: Gender,
    stock: u32,
    featured: bool,
    rating: Option<(f64, u32)>,
}

impl From<ProductSeed> for Product {
    fn from(seed: ProductSeed) -> Self {
        let images: Vec<String> = seed.photos.iter().map(|p| unsplash(p)).collect();
        Self {
            id: ProductId::new(seed.id),
            name: seed.name.to_string(),
            category: seed.category,
            price: Price::idr(seed.price),
            member_price: Price::idr(seed.member_price),
            image: images.first().cloned().unwrap_or_default(),
            images,
            description: seed.description.to_string(),
            material: seed.material.to_string(),
            sizes: strings(seed.sizes),
            colors: strings(seed.colors),
            gender: seed.gender,
            stock: seed.stock,
            featured: seed.featured,
            rating: seed.rating.map(|(r, _)| r),
            review_count: seed.rating.map(|(_, n)| n),
        }
    }
}

#[must_use]
pub fn products() -> Vec<Product> {
    [
        ProductSeed {
            id: "1",
            name: "Febsin Classic Black Tee",
            category: Category::Kaos,
            price: 199_000,
            member_price: 179_000,
            photos: &[
                "1666358085449-a10a39f33942",
                "1576790807856-b9205fb5703f",
                "1503342217505-b0a15ec3261c",
            ],
            description: "Kaos premium dengan desain minimalis khas Febsin. Nyaman dipakai sehari-hari dengan bahan cotton combed 30s.",
            material: "Cotton Combed 30s, 100% Katun",
            sizes: &["S", "M", "L", "XL", "XXL"],
            colors: &["Black", "White", "Navy"],
            gender: Gender::Unisex,
            stock: 50,
            featured: true,
            rating: Some((4.8, 24)),
        },
        ProductSeed {
            id: "2",
            name: "Urban Hoodie Premium",
            category: Category::Hoodie,
            price: 399_000,
            member_price: 349_000,
            photos: &["1635715226585-004fef5a55a4", "1556821840-3a63f95609a7"],
            description: "Hoodie premium dengan bahan fleece tebal dan halus. Perfect untuk gaya streetwear kamu.",
            material: "Fleece Premium, 80% Cotton 20% Polyester",
            sizes: &["M", "L", "XL", "XXL"],
            colors: &["Black", "Grey", "Maroon"],
            gender: Gender::Unisex,
            stock: 30,
            featured: true,
            rating: Some((4.9, 18)),
        },
        ProductSeed {
            id: "3",
            name: "Kemeja Flanel Kotak",
            category: Category::Kemeja,
            price: 279_000,
            member_price: 249_000,
            photos: &["1596755094514-f87e34085b2c", "1602810318383-e386cc2a3ccf"],
            description: "Kemeja flanel dengan motif kotak-kotak klasik. Material lembut dan hangat.",
            material: "Flannel Premium",
            sizes: &["M", "L", "XL"],
            colors: &["Red-Black", "Blue-Black", "Grey-Black"],
            gender: Gender::Unisex,
            stock: 25,
            featured: false,
            rating: None,
        },
        ProductSeed {
            id: "4",
            name: "Febsin Cap Classic",
            category: Category::Aksesoris,
            price: 129_000,
            member_price: 99_000,
            photos: &["1588850561407-ed78c282e89b", "1575428652377-a2d80e2277fc"],
            description: "Topi baseball cap dengan logo Febsin. Material berkualitas tinggi.",
            material: "Cotton Twill",
            sizes: &["One Size"],
            colors: &["Black", "White", "Navy"],
            gender: Gender::Unisex,
            stock: 100,
            featured: false,
            rating: None,
        },
        ProductSeed {
            id: "5",
            name: "Oversized White Tee",
            category: Category::Kaos,
            price: 219_000,
            member_price: 189_000,
            photos: &["1521572163474-6864f9cf17ab", "1622445275576-721325763afe"],
            description: "Kaos oversized dengan cutting modern. Cocok untuk streetwear look.",
            material: "Cotton Combed 24s",
            sizes: &["M", "L", "XL", "XXL"],
            colors: &["White", "Cream", "Light Grey"],
            gender: Gender::Unisex,
            stock: 40,
            featured: true,
            rating: None,
        },
        ProductSeed {
            id: "6",
            name: "Bomber Jacket Limited",
            category: Category::Hoodie,
            price: 549_000,
            member_price: 499_000,
            photos: &["1551028719-00167b16eac5", "1591047139829-d91aecb6caea"],
            description: "Bomber jacket edisi terbatas dengan detail premium. Limited stock!",
            material: "Polyester Premium dengan Lining",
            sizes: &["L", "XL"],
            colors: &["Black", "Olive"],
            gender: Gender::Unisex,
            stock: 15,
            featured: true,
            rating: None,
        },
        ProductSeed {
            id: "7",
            name: "Kaos Polo Febsin",
            category: Category::Kemeja,
            price: 249_000,
            member_price: 219_000,
            photos: &["1586363104862-3a5e2ab60d99"],
            description: "Polo shirt casual dengan material breathable. Cocok untuk acara semi-formal.",
            material: "Lacoste Cotton",
            sizes: &["S", "M", "L", "XL"],
            colors: &["Black", "White", "Navy", "Maroon"],
            gender: Gender::Pria,
            stock: 35,
            featured: false,
            rating: None,
        },
        ProductSeed {
            id: "8",
            name: "Tote Bag Canvas",
            category: Category::Aksesoris,
            price: 149_000,
            member_price: 129_000,
            photos: &["1590874103328-eac38a683ce7"],
            description: "Tote bag canvas dengan logo Febsin. Praktis dan stylish.",
            material: "Canvas Premium",
            sizes: &["One Size"],
            colors: &["Natural", "Black"],
            gender: Gender::Unisex,
            stock: 60,
            featured: false,
            rating: None,
        },
    ]
    .into_iter()
    .map(Product::from)
    .collect()
}

#[allow(clippy::too_many_arguments)]
fn review(
    id: &str,
    product_id: &str,
    author: &str,
    seed: &str,
    rating: u8,
    title: &str,
    comment: &str,
    date: NaiveDate,
    size: &str,
    helpful: u32,
) -> Review {
    Review {
        id: ReviewId::new(id),
        product_id: ProductId::new(product_id),
        author: author.to_string(),
        avatar: avatar(seed),
        rating,
        title: title.to_string(),
        comment: comment.to_string(),
        date,
        size: Some(size.to_string()),
        verified: true,
        helpful,
    }
}

#[must_use]
pub fn reviews() -> Vec<Review> {
    vec![
        review(
            "rev-1",
            "1",
            "Dimas Prasetyo",
            "dimas",
            5,
            "Kualitas Premium, Harga Terjangkau!",
            "Kaosnya bener-bener premium! Bahan adem, jahitan rapi, dan cutting-nya pas di badan. Udah 3x cuci masih bagus, ga luntur sama sekali. Worth it banget dengan harganya. Recommended!",
            date(2025, 10, 28),
            "L",
            15,
        ),
        review(
            "rev-2",
            "1",
            "Sarah Amelia",
            "sarah",
            5,
            "Best Purchase!",
            "Ini kaos terbaik yang pernah aku beli! Bahannya super soft, ga panas, dan modelnya minimalis jadi gampang dipadupadankan. Ukurannya juga sesuai size chart. Bakal beli lagi warna lain!",
            date(2025, 10, 25),
            "M",
            12,
        ),
        review(
            "rev-3",
            "1",
            "Rian Firmansyah",
            "rian",
            4,
            "Bagus, Tapi Agak Kekecilan",
            "Kualitas bahan oke banget, ga nyangka brand lokal bisa sekualitas ini. Cuma untuk yang body agak besar disarankan ambil 1 size lebih besar. Aku biasa L, tapi ini pas banget, prefer lebih longgar.",
            date(2025, 10, 22),
            "L",
            8,
        ),
        review(
            "rev-4",
            "1",
            "Maya Putri",
            "maya",
            5,
            "Love it! Bakal Order Lagi",
            "Packaging rapi, pengiriman cepat, dan produknya exceed expectations! Bahannya tebel tapi breathable, jadi nyaman dipake seharian. Design minimalisnya juga timeless. 10/10!",
            date(2025, 10, 20),
            "S",
            10,
        ),
        review(
            "rev-5",
            "2",
            "Aldi Nugroho",
            "aldi",
            5,
            "Hoodie Terbaik yang Pernah Aku Punya!",
            "Serius ini hoodie paling worth it! Bahan fleece-nya tebel banget tapi ga bikin gerah. Hood-nya pas, tali serut berkualitas, dan zipper-nya smooth. Pokoknya premium dari ujung ke ujung. Harga segini dapet kualitas begini? Take my money!",
            date(2025, 10, 29),
            "L",
            20,
        ),
        review(
            "rev-6",
            "2",
            "Indah Sari",
            "indah",
            5,
            "Perfect for Street Style!",
            "Hoodie ini bener-bener cocok buat street style! Fit-nya oversized tapi ga kebesaran, warna hitamnya pekat ga pudar, dan yang paling penting hangat tapi ga gerah. Kantongnya juga luas. Love this!",
            date(2025, 10, 26),
            "M",
            14,
        ),
        review(
            "rev-7",
            "2",
            "Fahmi Rahman",
            "fahmi",
            4,
            "Kualitas Oke, Harga Agak Mahal",
            "Kualitas hoodie-nya memang ga diragukan lagi, tapi untuk harga 399k agak pricey menurut gue. Tapi ya gapapa sih karena emang kualitasnya premium banget. Material dan jahitan solid.",
            date(2025, 10, 23),
            "XL",
            6,
        ),
    ]
}

fn order_item(product_name: &str, price: i64, size: &str) -> OrderItem {
    OrderItem {
        product_name: product_name.to_string(),
        quantity: 1,
        price: Price::idr(price),
        size: size.to_string(),
    }
}

#[must_use]
pub fn orders() -> Vec<Order> {
    vec![
        Order {
            id: OrderId::new("ORD-2025-001"),
            date: date(2025, 10, 15),
            status: OrderStatus::Delivered,
            total: Price::idr(398_000),
            items: vec![
                order_item("Febsin Classic Black Tee", 179_000, "L"),
                order_item("Febsin Cap Classic", 99_000, "One Size"),
            ],
            tracking: Some("JP1234567890".to_string()),
        },
        Order {
            id: OrderId::new("ORD-2025-002"),
            date: date(2025, 10, 18),
            status: OrderStatus::Shipped,
            total: Price::idr(349_000),
            items: vec![order_item("Urban Hoodie Premium", 349_000, "XL")],
            tracking: Some("JP0987654321".to_string()),
        },
    ]
}

#[must_use]
pub fn testimonials() -> Vec<Testimonial> {
    let quote = |name: &str, seed: &str, rating: u8, comment: &str, product: &str, on| {
        Testimonial {
            name: name.to_string(),
            avatar: avatar(seed),
            rating,
            comment: comment.to_string(),
            product: product.to_string(),
            date: on,
        }
    };

    vec![
        quote(
            "Rizky Ananda",
            "rizky",
            5,
            "Kualitas produk mantap! Bahan kaosnya adem dan ga gampang luntur. Recommended banget buat yang cari brand lokal berkualitas.",
            "Febsin Classic Black Tee",
            date(2025, 10, 15),
        ),
        quote(
            "Dinda Permata",
            "dinda",
            5,
            "Hoodie-nya premium banget! Tebal tapi ga panas, fit-nya juga pas. Worth it dengan harganya!",
            "Urban Hoodie Premium",
            date(2025, 10, 12),
        ),
        quote(
            "Arief Budiman",
            "arief",
            4,
            "Desainnya simple tapi elegan. Pengiriman juga cepat. Bakal order lagi!",
            "Oversized White Tee",
            date(2025, 10, 8),
        ),
    ]
}

#[must_use]
pub fn lookbook() -> Vec<LookbookImage> {
    [
        ("1", "1576790807856-b9205fb5703f", "Urban Essentials", "Classic black tee dengan relaxed denim untuk daily look yang effortless", "Casual", 142),
        ("2", "1635715226585-004fef5a55a4", "Street Ready", "Oversized hoodie pairing dengan cargo pants - perfect for weekend vibes", "Streetwear", 198),
        ("3", "1617152623457-4c9b639926d7", "Minimalist Style", "Clean lines and neutral tones untuk sophisticated look", "Minimal", 156),
        ("4", "1718802323158-b32c0330ad4a", "Bold Statement", "Mix and match patterns dengan confidence", "Bold", 173),
        ("5", "1666358085449-a10a39f33942", "Monochrome Magic", "All black everything - timeless and powerful", "Monochrome", 201),
        ("6", "1551028719-00167b16eac5", "Layering Game", "Master the art of layering untuk transitional weather", "Layered", 187),
        ("7", "1503342217505-b0a15ec3261c", "Summer Vibes", "Light and breezy untuk sunny days", "Summer", 164),
        ("8", "1556821840-3a63f95609a7", "Athleisure", "Comfort meets style dalam sporty aesthetic", "Sports", 149),
    ]
    .into_iter()
    .map(|(id, photo, title, description, category, likes)| LookbookImage {
        id: LookbookImageId::new(id),
        url: unsplash(photo),
        title: title.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        likes,
    })
    .collect()
}

/// Headline numbers on the admin overview. The product count is taken from
/// the catalog itself.
#[must_use]
pub fn store_stats() -> StoreStats {
    StoreStats {
        revenue: Price::idr(15_750_000),
        orders: 42,
        customers: 128,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_product_has_an_image_and_size() {
        for product in products() {
            assert!(!product.image.is_empty(), "{} has no image", product.id);
            assert_eq!(product.images.first(), Some(&product.image));
            assert!(!product.sizes.is_empty(), "{} has no sizes", product.id);
            assert!(product.member_price <= product.price);
        }
    }

    #[test]
    fn test_reviews_reference_existing_products() {
        let products = products();
        for review in reviews() {
            assert!(products.iter().any(|p| p.id == review.product_id));
            assert!((1..=5).contains(&review.rating));
        }
    }

    #[test]
    fn test_lookbook_has_eight_images() {
        let images = lookbook();
        assert_eq!(images.len(), 8);
        assert_eq!(images[4].title, "Monochrome Magic");
        assert_eq!(images[4].likes, 201);
    }

    #[test]
    fn test_fixture_dates_are_valid() {
        assert_eq!(date(2025, 10, 15).to_string(), "2025-10-15");
        assert!(orders().iter().all(|o| o.date != NaiveDate::MIN));
    }
}
