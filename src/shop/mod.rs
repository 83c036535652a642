//! Storefront CRUD resources, composed alongside the auth service. Each
//! module owns its table and routes; protected routes take identity from
//! the verified bearer token.

pub mod cart;
pub mod categories;
pub mod orders;
pub mod payments;
pub mod products;
pub mod shipping;
pub mod wishlist;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(products::routes())
        .merge(categories::routes())
        .merge(cart::routes())
        .merge(wishlist::routes())
        .merge(shipping::routes())
        .merge(orders::routes())
        .merge(payments::routes())
}
