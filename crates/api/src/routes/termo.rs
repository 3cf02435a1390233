//! Route definitions for the `/termos` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::termo;
use crate::state::AppState;

/// Routes mounted at `/termos`.
///
/// ```text
/// GET    /              -> list (?projeto_id=)
/// POST   /              -> create (gestor/admin)
/// GET    /{id}          -> get_by_id
/// PUT    /{id}          -> update (gestor/admin, pending only)
/// DELETE /{id}          -> delete (admin)
/// POST   /{id}/validar  -> validar (gestor)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(termo::list).post(termo::create))
        .route(
            "/{id}",
            get(termo::get_by_id)
                .put(termo::update)
                .delete(termo::delete),
        )
        .route("/{id}/validar", post(termo::validar))
}
