use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub quantity: i64,
    pub price_per_unit: f64,
}

/// Body of create and update requests. A client-supplied `id` is ignored;
/// the path decides which record an update targets.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub quantity: i64,
    pub price_per_unit: f64,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Default)]
pub struct Inventory {
    last_id: i64,
    products: BTreeMap<i64, Product>,
}

pub type Db = Arc<RwLock<Inventory>>;

type ApiResult<T> = Result<T, (StatusCode, Json<ErrorBody>)>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Inventory::default()));
    let products = Router::new()
        .route("/products/", get(list_products).post(create_product))
        .route("/products", get(list_products).post(create_product))
        .route("/products/{id}", put(update_product).delete(delete_product))
        .with_state(db);
    Router::new()
        .nest("/api/v1", products)
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn not_found(id: i64) -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            message: format!("Product not found: {id}"),
        }),
    )
}

async fn list_products(State(db): State<Db>) -> Json<Vec<Product>> {
    let inventory = db.read().await;
    Json(inventory.products.values().cloned().collect())
}

async fn create_product(
    State(db): State<Db>,
    Json(input): Json<ProductInput>,
) -> (StatusCode, Json<Product>) {
    let mut inventory = db.write().await;
    inventory.last_id += 1;
    let product = Product {
        id: inventory.last_id,
        name: input.name,
        quantity: input.quantity,
        price_per_unit: input.price_per_unit,
    };
    inventory.products.insert(product.id, product.clone());
    tracing::debug!(id = product.id, "created product");
    (StatusCode::CREATED, Json(product))
}

async fn update_product(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<ProductInput>,
) -> ApiResult<Json<Product>> {
    let mut inventory = db.write().await;
    let product = inventory.products.get_mut(&id).ok_or_else(|| not_found(id))?;
    product.name = input.name;
    product.quantity = input.quantity;
    product.price_per_unit = input.price_per_unit;
    Ok(Json(product.clone()))
}

async fn delete_product(State(db): State<Db>, Path(id): Path<i64>) -> ApiResult<Json<bool>> {
    let mut inventory = db.write().await;
    inventory
        .products
        .remove(&id)
        .map(|_| Json(true))
        .ok_or_else(|| not_found(id))
}
