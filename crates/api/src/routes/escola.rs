//! Route definitions for the `/escolas` school registry.

use axum::routing::get;
use axum::Router;

use crate::handlers::escola;
use crate::state::AppState;

/// Routes mounted at `/escolas`.
///
/// ```text
/// GET    /       -> list (?search=)
/// POST   /       -> create (admin)
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update (admin)
/// DELETE /{id}   -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(escola::list).post(escola::create))
        .route(
            "/{id}",
            get(escola::get_by_id)
                .put(escola::update)
                .delete(escola::delete),
        )
}
