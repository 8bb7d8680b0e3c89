use axum::Router;

use crate::state::AppState;

pub mod doc;
pub mod health;
pub mod locations;
pub mod orders;
pub mod products;
pub mod stock;
pub mod suppliers;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/suppliers", suppliers::router())
        .nest("/orders", orders::router())
        .nest("/products", products::router())
        .nest("/locations", locations::router())
        .nest("/stock", stock::router())
}
