//! Role-gated extractors.
//!
//! [`RequireAdmin`] wraps [`CurrentActor`] and rejects requests whose
//! profile does not meet the requirement. Use it in route handlers to
//! enforce authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use arte_educa_core::error::CoreError;
use arte_educa_core::roles::Perfil;
use arte_educa_core::workflow::Actor;

use super::actor::CurrentActor;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` profile. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(actor): RequireAdmin) -> AppResult<Json<()>> {
///     // actor is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub Actor);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentActor(actor) = CurrentActor::from_request_parts(parts, state).await?;
        if actor.perfil != Perfil::Admin {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin profile required".into(),
            )));
        }
        Ok(RequireAdmin(actor))
    }
}
