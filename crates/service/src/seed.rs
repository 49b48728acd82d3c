//! Starter catalog. Seeding is idempotent: entries are keyed by slug and an
//! existing row is never overwritten.

use models::product::{self, NewProduct};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::errors::ServiceError;

#[allow(clippy::too_many_arguments)]
fn entry(
    name: &str,
    slug: &str,
    description: &str,
    cents: i64,
    image: &str,
    sizes: &[&str],
    colors: &[&str],
    stock: i32,
) -> NewProduct {
    NewProduct {
        name: name.into(),
        slug: slug.into(),
        description: description.into(),
        price: Decimal::new(cents, 2),
        images: vec![image.into()],
        sizes: sizes.iter().map(|s| s.to_string()).collect(),
        colors: colors.iter().map(|s| s.to_string()).collect(),
        stock,
        active: true,
    }
}

pub fn catalog() -> Vec<NewProduct> {
    vec![
        entry(
            "Syntax Classic Hoodie",
            "syntax-classic-hoodie",
            "A premium heavyweight hoodie featuring the SyntaxWear logo. Perfect for late-night coding sessions.",
            5999,
            "https://images.unsplash.com/photo-1556821840-3a63f95609a7?q=80&w=800",
            &["S", "M", "L", "XL", "XXL"],
            &["Black", "Navy", "Dark Gray"],
            50,
        ),
        entry(
            "Debug Mode T-Shirt",
            "debug-mode-tee",
            "Cotton t-shirt for when you are in the zone. Minimalist design with \"DEBUG\" in monospace.",
            2499,
            "https://images.unsplash.com/photo-1521572267360-ee0c2909d518?q=80&w=800",
            &["S", "M", "L", "XL"],
            &["White", "Black"],
            100,
        ),
        entry(
            "Binary Code Beanie",
            "binary-code-beanie",
            "Warm knit beanie with subtle binary pattern. 01010111 01100101 01100001 01110010.",
            1999,
            "https://images.unsplash.com/photo-1576871337632-b9aef4c17ab9?q=80&w=800",
            &["One Size"],
            &["Charcoal", "Black"],
            75,
        ),
        entry(
            "Git Commit Cap",
            "git-commit-cap",
            "Adjustable baseball cap with \"git commit -m 'fire'\" embroidery.",
            2250,
            "https://images.unsplash.com/photo-1588850561407-ed78c282e1c7?q=80&w=800",
            &["Adjustable"],
            &["Forest Green", "Black", "Beige"],
            40,
        ),
        entry(
            "Recursion Oversized Sweater",
            "recursion-sweater",
            "To understand recursion, you must first understand recursion. Comfy oversized fit.",
            6500,
            "https://images.unsplash.com/photo-1591047139829-d91aecb6caea?q=80&w=800",
            &["S/M", "L/XL"],
            &["Cream", "Sand"],
            30,
        ),
        entry(
            "Stack Overflow Socks",
            "stack-overflow-socks",
            "Bamboo fiber socks that never overflow. Great gift for developers.",
            1200,
            "https://images.unsplash.com/photo-1582966232435-b5415f624479?q=80&w=800",
            &["M", "L"],
            &["Orange", "White"],
            150,
        ),
        entry(
            "Null Pointer Joggers",
            "null-pointer-joggers",
            "Relaxed fit joggers for developers who prefer living in the console.",
            4599,
            "https://images.unsplash.com/photo-1552346154-21d32810aba3?q=80&w=800",
            &["S", "M", "L", "XL"],
            &["Black", "Heather Gray"],
            60,
        ),
        entry(
            "404 Not Found T-Shirt",
            "404-not-found-tee",
            "Classic tee for when you just want to disappear from the grid.",
            2499,
            "https://images.unsplash.com/photo-1503342217505-b0a15ec3261c?q=80&w=800",
            &["S", "M", "L", "XL", "XXL"],
            &["Black", "Blue"],
            90,
        ),
        entry(
            "Semantic HTML Hoodie",
            "semantic-html-hoodie",
            "Wear your structure on your sleeve. A clean, minimal design for web purists.",
            5999,
            "https://images.unsplash.com/photo-1578932750294-f5075e85f44a?q=80&w=800",
            &["S", "M", "L", "XL"],
            &["Slate", "Black"],
            45,
        ),
        entry(
            "Coffee to Code Bomber Jacket",
            "coffee-code-bomber",
            "Sleek bomber jacket that transitions from the coffee shop to the workstation.",
            8900,
            "https://images.unsplash.com/photo-1551028719-00167b16eac5?q=80&w=800",
            &["M", "L", "XL"],
            &["Olive", "Midnight Black"],
            25,
        ),
    ]
}

/// Insert every catalog entry that is not present yet.
pub async fn seed_products(db: &DatabaseConnection) -> Result<Vec<product::Model>, ServiceError> {
    let mut out = Vec::new();
    for entry in catalog() {
        let p = product::insert_if_absent(db, entry).await?;
        info!(id = %p.id, slug = %p.slug, name = %p.name, "product_seeded");
        out.push(p);
    }
    Ok(out)
}
