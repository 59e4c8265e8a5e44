//! The untyped-constraint product catalog shared by the path-parameter and
//! full-CRUD lessons.

use serde::{Deserialize, Serialize};

use crate::store::{Record, Table};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub brand: String,
    pub category: String,
    pub description: String,
}

impl Record for Product {
    fn id(&self) -> i64 { self.id }
}

pub type Products = Table<Product>;

fn product(id: i64, name: &str, price: f64, brand: &str, category: &str, description: &str) -> Product {
    Product {
        id,
        name: name.to_owned(),
        price,
        brand: brand.to_owned(),
        category: category.to_owned(),
        description: description.to_owned(),
    }
}

/// The fourteen-item catalog, in id order.
pub fn seed() -> Vec<Product> {
    vec![
        product(1, "iPhone", 999.99, "Apple", "Phones", "The iPhone is a smartphone made by Apple Inc."),
        product(2, "Galaxy", 899.99, "Samsung", "Phones", "The Galaxy is a smartphone made by Samsung."),
        product(3, "Pixel", 799.49, "Google", "Phones", "The Pixel is a smartphone made by Google."),
        product(4, "Dell XPS", 999.99, "Dell", "Laptops", "The Dell XPS is a laptop made by Dell Inc."),
        product(5, "MacBook Pro", 1999.99, "Apple", "Laptops", "The MacBook Pro is a laptop made by Apple Inc."),
        product(6, "ThinkPad", 999.99, "Lenovo", "Laptops", "The ThinkPad is a laptop made by Lenovo."),
        product(7, "iPad", 799.99, "Apple", "Tablets", "The iPad is a tablet made by Apple Inc."),
        product(8, "Galaxy Tab", 699.99, "Samsung", "Tablets", "The Galaxy Tab is a tablet made by Samsung."),
        product(9, "Fire HD", 499.99, "Amazon", "Tablets", "The Fire HD is a tablet made by Amazon."),
        product(10, "Apple Watch", 399.99, "Apple", "Wearables", "The Apple Watch is a wearable made by Apple Inc."),
        product(11, "Galaxy Watch", 299.99, "Samsung", "Wearables", "The Galaxy Watch is a wearable made by Samsung."),
        product(12, "Fitbit", 199.99, "Fitbit", "Wearables", "The Fitbit is a wearable made by Fitbit Inc."),
        product(13, "Motorola Razr", 1499.99, "Motorola", "Phones", "The Motorola Razr is a smartphone made by Motorola Inc."),
        product(14, "OnePlus", 699.99, "OnePlus", "Phones", "The OnePlus is a smartphone made by OnePlus Inc."),
    ]
}
