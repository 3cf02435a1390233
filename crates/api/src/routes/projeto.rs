//! Route definitions for the `/projetos` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::projeto;
use crate::state::AppState;

/// Routes mounted at `/projetos`.
///
/// ```text
/// GET    /              -> list (actor-scoped, ?status= ?tipo=)
/// POST   /              -> create (professor only)
/// GET    /{id}          -> get_by_id
/// PUT    /{id}          -> transition
/// DELETE /{id}          -> delete
/// GET    /{id}/acoes    -> acoes
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(projeto::list).post(projeto::create))
        .route(
            "/{id}",
            get(projeto::get_by_id)
                .put(projeto::transition)
                .delete(projeto::delete),
        )
        .route("/{id}/acoes", get(projeto::acoes))
}
