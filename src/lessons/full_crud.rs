//! Create, read, update (full and partial) and delete over a product table.

use serde::Deserialize;
use serde_json::json;

use crate::lessons::catalog::{self, Product, Products};
use crate::{IntoResponse, Json, Raised, Request, Response, Router, Table};

pub fn router() -> Router {
    let seeded: Vec<Product> = catalog::seed().into_iter().take(3).collect();
    Router::new()
        .get("/products", list_products)
        .get("/products/{product_id}", get_product)
        .post("/products", create_product)
        .put("/products/{product_id}", replace_product)
        .patch("/products/{product_id}", patch_product)
        .delete("/products/{product_id}", delete_product)
        .with_state(Table::with_rows(seeded))
}

/// Every field is required on create and on full replacement.
#[derive(Debug, Deserialize)]
struct ProductFields {
    name: String,
    price: f64,
    brand: String,
    category: String,
    description: String,
}

impl ProductFields {
    fn into_product(self, id: i64) -> Product {
        Product {
            id,
            name: self.name,
            price: self.price,
            brand: self.brand,
            category: self.category,
            description: self.description,
        }
    }
}

/// Only truthy values overwrite: an empty string or a zero price leaves the
/// stored field as it was.
#[derive(Debug, Default, Deserialize)]
struct ProductPatch {
    name: Option<String>,
    price: Option<f64>,
    brand: Option<String>,
    category: Option<String>,
    description: Option<String>,
}

impl ProductPatch {
    fn apply(self, product: &mut Product) {
        let non_empty = |s: &String| !s.is_empty();
        if let Some(name) = self.name.filter(non_empty) {
            product.name = name;
        }
        if let Some(price) = self.price.filter(|p| *p != 0.0) {
            product.price = price;
        }
        if let Some(brand) = self.brand.filter(non_empty) {
            product.brand = brand;
        }
        if let Some(category) = self.category.filter(non_empty) {
            product.category = category;
        }
        if let Some(description) = self.description.filter(non_empty) {
            product.description = description;
        }
    }
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

async fn create_product(req: Request) -> Result<Json<Product>, Raised> {
    let fields: ProductFields = req.json()?;
    let products: Products = req.state()?;
    let product = products.insert_with(|id| fields.into_product(id)).await;
    Ok(Json(product))
}

async fn replace_product(req: Request) -> Result<Json<Option<Product>>, Raised> {
    let product_id: i64 = req.path_param("product_id")?;
    let fields: ProductFields = req.json()?;
    let products: Products = req.state()?;
    let updated = products
        .update(product_id, |product| *product = fields.into_product(product_id))
        .await;
    Ok(Json(updated))
}

async fn patch_product(req: Request) -> Result<Json<Option<Product>>, Raised> {
    let product_id: i64 = req.path_param("product_id")?;
    let patch: ProductPatch = if req.has_body() { req.json()? } else { ProductPatch::default() };
    let products: Products = req.state()?;
    Ok(Json(products.update(product_id, |product| patch.apply(product)).await))
}

async fn delete_product(req: Request) -> Result<Response, Raised> {
    let product_id: i64 = req.path_param("product_id")?;
    let products: Products = req.state()?;
    let response = match products.remove(product_id).await {
        Some(product) => Json(product).into_response(),
        None => Json(json!({ "message": "Product not found" })).into_response(),
    };
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel() -> Product {
        catalog::seed().swap_remove(2)
    }

    #[test]
    fn patch_ignores_falsy_values() {
        let mut product = pixel();
        ProductPatch {
            name: Some(String::new()),
            price: Some(0.0),
            brand: Some("Alphabet".into()),
            ..ProductPatch::default()
        }
        .apply(&mut product);

        assert_eq!(product.name, "Pixel");
        assert_eq!(product.price, 799.49);
        assert_eq!(product.brand, "Alphabet");
    }
}
