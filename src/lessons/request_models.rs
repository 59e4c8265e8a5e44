//! Request models: the body of `POST /products` is a declared model whose
//! constraints are checked before the handler touches the store.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::store::Record;
use crate::{Json, Raised, Request, Router, Table};

/// A product as accepted on create. `id` is optional on input and always
/// assigned by the server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct Product {
    #[serde(default)]
    pub id: i64,
    #[validate(length(min = 3, max = 50))]
    pub name: String,
    /// Must be greater than or equal to 0.
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(length(min = 3, max = 50))]
    pub brand: String,
    #[validate(length(min = 3, max = 50))]
    pub category: String,
    #[validate(length(min = 50, max = 150))]
    pub description: String,
}

impl Record for Product {
    fn id(&self) -> i64 { self.id }
}

pub(crate) type Products = Table<Product>;

pub fn router() -> Router {
    Router::new()
        .get("/products", list_products)
        .get("/products/{product_id}", get_product)
        .post("/products", create_product)
        .with_state(Products::new())
}

async fn list_products(req: Request) -> Result<Json<Vec<Product>>, Raised> {
    let products: Products = req.state()?;
    Ok(Json(products.list().await))
}

async fn get_product(req: Request) -> Result<Json<Option<Product>>, Raised> {
    let product_id: i64 = req.path_param("product_id")?;
    let products: Products = req.state()?;
    Ok(Json(products.get(product_id).await))
}

pub(crate) async fn create_product(req: Request) -> Result<Json<Product>, Raised> {
    let input: Product = req.valid_json()?;
    let products: Products = req.state()?;
    let product = products.insert_with(|id| Product { id, ..input }).await;
    Ok(Json(product))
}
