//! Header-based actor extractor for Axum handlers.
//!
//! Session mechanics live outside this service; the gateway in front of it
//! authenticates the user and forwards their identity as plain headers.
//! Handlers receive them as a typed [`CurrentActor`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use arte_educa_core::error::CoreError;
use arte_educa_core::roles::Perfil;
use arte_educa_core::workflow::Actor;

use crate::error::AppError;
use crate::state::AppState;

/// The acting user, read from the `x-actor-role`, `x-actor-email`,
/// `x-actor-cre`, and `x-actor-inep` request headers.
///
/// Role and email are mandatory and reject with 401 when missing or
/// unparseable. `cre` and `inep` are optional; they only matter for
/// articulador and gestor actors, whose listing scope needs them.
///
/// ```ignore
/// async fn my_handler(CurrentActor(actor): CurrentActor) -> AppResult<Json<()>> {
///     tracing::info!(email = %actor.email, role = actor.perfil.as_str(), "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentActor(pub Actor);

fn header_str<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name).and_then(|v| v.to_str().ok())
}

impl FromRequestParts<AppState> for CurrentActor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let role = header_str(parts, "x-actor-role").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Missing x-actor-role header".into(),
            ))
        })?;
        let perfil = Perfil::from_str_db(role).map_err(|_| {
            AppError::Core(CoreError::Unauthorized(format!(
                "Unknown actor role '{role}'"
            )))
        })?;

        let email = header_str(parts, "x-actor-email")
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing x-actor-email header".into(),
                ))
            })?;

        let mut actor = Actor::new(perfil, email);
        actor.cre = header_str(parts, "x-actor-cre").map(str::to_string);
        actor.inep = header_str(parts, "x-actor-inep").map(str::to_string);

        Ok(CurrentActor(actor))
    }
}
