use serde_json::{Value, json};
use showcase::Method;
use showcase::lessons::{full_crud, path_parameters};
use showcase::testing::TestClient;

#[tokio::test]
async fn path_parameters_home_and_listing() {
    let client = TestClient::new(path_parameters::router());

    let res = client.get("/").await;
    assert_eq!(res.json::<Value>().unwrap(), json!({ "message": "Hello, World" }));

    let products: Vec<Value> = client.get("/products").await.json().unwrap();
    assert_eq!(products.len(), 14);
    assert_eq!(products[12]["name"], "Motorola Razr");
}

#[tokio::test]
async fn path_parameter_selects_product() {
    let client = TestClient::new(path_parameters::router());

    let res = client.get("/products/5").await;
    assert_eq!(res.status(), 200);
    assert_eq!(res.json::<Value>().unwrap()["name"], "MacBook Pro");
}

#[tokio::test]
async fn unknown_product_falls_through_to_null() {
    let client = TestClient::new(path_parameters::router());

    let res = client.get("/products/99").await;
    assert_eq!(res.status(), 200);
    assert_eq!(res.text(), "null");
}

#[tokio::test]
async fn negative_product_id_falls_through_to_null() {
    let client = TestClient::new(path_parameters::router());

    let res = client.get("/products/-1").await;
    assert_eq!(res.status(), 200);
    assert_eq!(res.text(), "null");
}

#[tokio::test]
async fn non_integer_product_id_is_422() {
    let client = TestClient::new(path_parameters::router());

    let res = client.get("/products/abc").await;
    assert_eq!(res.status(), 422);
    let body: Value = res.json().unwrap();
    assert_eq!(body["detail"][0]["loc"], json!(["path", "product_id"]));
    assert_eq!(body["detail"][0]["type"], "int_parsing");
}

fn new_product() -> Value {
    json!({
        "name": "Surface",
        "price": 1299.0,
        "brand": "Microsoft",
        "category": "Laptops",
        "description": "The Surface is a laptop made by Microsoft.",
    })
}

#[tokio::test]
async fn crud_create_appends_with_next_id() {
    let client = TestClient::new(full_crud::router());

    let res = client.post_json("/products", &new_product()).await;
    assert_eq!(res.status(), 200);
    let created: Value = res.json().unwrap();
    assert_eq!(created["id"], 4);
    assert_eq!(created["brand"], "Microsoft");

    let listed: Vec<Value> = client.get("/products").await.json().unwrap();
    assert_eq!(listed.len(), 4);
}

#[tokio::test]
async fn crud_create_requires_every_field() {
    let client = TestClient::new(full_crud::router());

    let res = client.post_json("/products", &json!({ "name": "Surface" })).await;
    assert_eq!(res.status(), 422);
    let missing: Vec<Value> = res.json::<Value>().unwrap()["detail"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["loc"][1].clone())
        .collect();
    assert_eq!(missing, [json!("price"), json!("brand"), json!("category"), json!("description")]);

    let res = client.post_json("/products", &json!({})).await;
    assert_eq!(res.json::<Value>().unwrap()["detail"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn crud_put_replaces_every_field() {
    let client = TestClient::new(full_crud::router());

    let res = client.put_json("/products/2", &new_product()).await;
    assert_eq!(res.status(), 200);
    let updated: Value = res.json().unwrap();
    assert_eq!(updated["id"], 2);
    assert_eq!(updated["name"], "Surface");

    let res = client.put_json("/products/42", &new_product()).await;
    assert_eq!(res.text(), "null");
}

#[tokio::test]
async fn crud_patch_only_overwrites_truthy_fields() {
    let client = TestClient::new(full_crud::router());

    let res = client
        .patch_json("/products/1", &json!({ "price": 899.0, "name": "", "brand": null }))
        .await;
    assert_eq!(res.status(), 200);
    let patched: Value = res.json().unwrap();
    assert_eq!(patched["price"], 899.0);
    assert_eq!(patched["name"], "iPhone");
    assert_eq!(patched["brand"], "Apple");

    let fetched: Value = client.get("/products/1").await.json().unwrap();
    assert_eq!(fetched, patched);
}

#[tokio::test]
async fn crud_patch_without_a_body_changes_nothing() {
    let client = TestClient::new(full_crud::router());
    let before: Value = client.get("/products/2").await.json().unwrap();

    for body in [None, Some(b" \n ".to_vec())] {
        let res = client.request(Method::Patch, "/products/2", body).await;
        assert_eq!(res.status(), 200);
        assert_eq!(res.json::<Value>().unwrap(), before);
    }
}

#[tokio::test]
async fn crud_delete_returns_removed_product_or_message() {
    let client = TestClient::new(full_crud::router());

    let removed: Value = client.delete("/products/3").await.json().unwrap();
    assert_eq!(removed["name"], "Pixel");

    let res = client.delete("/products/3").await;
    assert_eq!(res.status(), 200);
    assert_eq!(res.json::<Value>().unwrap(), json!({ "message": "Product not found" }));
}

#[tokio::test]
async fn crud_ids_are_not_reused_after_delete() {
    let client = TestClient::new(full_crud::router());

    client.delete("/products/1").await;
    let created: Value = client.post_json("/products", &new_product()).await.json().unwrap();
    assert_eq!(created["id"], 4);
}
