//! Request handlers for the approval-workflow resources.
//!
//! Each submodule provides async handler functions for a single resource.
//! Handlers load state through the `arte_educa_db` repositories, run the
//! domain rules from `arte_educa_core`, and map errors via [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod declaracao;
pub mod escola;
pub mod projeto;
pub mod termo;
