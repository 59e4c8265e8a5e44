//! Path parameters: a typed `{product_id}` segment selects one product.
//!
//! An id that matches nothing answers `200` with `null`; an id that is not an
//! integer answers `422`.

use serde_json::{Value, json};

use crate::lessons::catalog::{self, Product, Products};
use crate::{Json, Raised, Request, Router, Table};

pub fn router() -> Router {
    Router::new()
        .get("/", home)
        .get("/products", list_products)
        .get("/products/{product_id}", get_product)
        .with_state(Table::with_rows(catalog::seed()))
}

async fn home(_req: Request) -> Json<Value> {
    Json(json!({ "message": "Hello, World" }))
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
