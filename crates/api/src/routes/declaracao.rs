//! Route definitions for the `/declaracoes` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::declaracao;
use crate::state::AppState;

/// Routes mounted at `/declaracoes`.
///
/// ```text
/// GET    /              -> list (?projeto_id=)
/// POST   /              -> create (articulador/admin)
/// GET    /{id}          -> get_by_id
/// PUT    /{id}          -> update (articulador/admin, pending only)
/// DELETE /{id}          -> delete (admin)
/// POST   /{id}/validar  -> validar (articulador)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(declaracao::list).post(declaracao::create))
        .route(
            "/{id}",
            get(declaracao::get_by_id)
                .put(declaracao::update)
                .delete(declaracao::delete),
        )
        .route("/{id}/validar", post(declaracao::validar))
}
