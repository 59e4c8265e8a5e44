//! Response models: reads go out as [`ProductResponse`], which leaves the
//! stored `id` and `category` off the wire.

use serde::Serialize;

use crate::lessons::request_models::{self, Product, Products};
use crate::{HttpError, Json, Raised, Request, Router};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProductResponse {
    pub name: String,
    pub price: f64,
    pub brand: String,
    pub description: String,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self { name: p.name, price: p.price, brand: p.brand, description: p.description }
    }
}

fn seed() -> Vec<Product> {
    vec![
        Product {
            id: 1,
            name: "iPhone".into(),
            price: 999.99,
            brand: "Apple".into(),
            category: "Electronics".into(),
            description: "A smart phone which is easy to use and intuitive from Apple (the leader in innovation).".into(),
        },
        Product {
            id: 2,
            name: "Google Pixel 10".into(),
            price: 599.99,
            brand: "Google".into(),
            category: "Electronics".into(),
            description: "A smart phone from one of the leaders in the AI space. These devices can easily help you navigate the world.".into(),
        },
    ]
}

pub fn router() -> Router {
    Router::new()
        .get("/products", list_products)
        .get("/products/{product_id}", get_product)
        .post("/products", request_models::create_product)
        .with_state(Products::with_rows(seed()))
}

async fn list_products(req: Request) -> Result<Json<Vec<ProductResponse>>, Raised> {
    let products: Products = req.state()?;
    let listed = products.list().await.into_iter().map(ProductResponse::from).collect();
    Ok(Json(listed))
}

async fn get_product(req: Request) -> Result<Json<ProductResponse>, Raised> {
    let product_id: i64 = req.path_param("product_id")?;
    let products: Products = req.state()?;
    let product = products
        .get(product_id)
        .await
        .ok_or_else(|| HttpError::not_found("Product not found"))?;
    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn seeded_products_satisfy_their_constraints() {
        for product in seed() {
            assert!(product.validate().is_ok(), "{}", product.name);
        }
    }
}
