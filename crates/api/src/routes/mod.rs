pub mod declaracao;
pub mod escola;
pub mod health;
pub mod projeto;
pub mod termo;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projetos                      list (actor-scoped, ?status= ?tipo=), create
/// /projetos/{id}                 get, transition (PUT), delete
/// /projetos/{id}/acoes           available actions for the calling actor
///
/// /termos                        list (?projeto_id=), create
/// /termos/{id}                   get, update, delete
/// /termos/{id}/validar           sign + flip project status_gestor (POST)
///
/// /declaracoes                   list (?projeto_id=), create
/// /declaracoes/{id}              get, update, delete
/// /declaracoes/{id}/validar      sign + flip project status_cre (POST)
///
/// /escolas                       list (?search=), create (admin)
/// /escolas/{id}                  get, update (admin), delete (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Project workflow routes.
        .nest("/projetos", projeto::router())
        // Gestor commitment documents.
        .nest("/termos", termo::router())
        // CRE declarations.
        .nest("/declaracoes", declaracao::router())
        // School registry.
        .nest("/escolas", escola::router())
}
