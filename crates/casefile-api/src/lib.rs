//! JSON REST API for the casefile intake service.
//!
//! Exposes an axum [`Router`] backed by any
//! [`casefile_core::store::CaseStore`]. Transport concerns (static frontend,
//! CORS, TLS) are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", casefile_api::api_router(state))
//! ```

pub mod cases;
pub mod chat;
pub mod eligibility;
pub mod error;
pub mod staff;
pub mod upload;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use casefile_core::store::CaseStore;

pub use error::ApiError;

/// State threaded through all API handlers. The store handle is injected
/// here rather than reached through any process-wide global.
#[derive(Clone)]
pub struct ApiState<S> {
  pub store:      Arc<S>,
  /// Directory where uploaded evidence files are written.
  pub upload_dir: PathBuf,
}

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: ApiState<S>) -> Router<()>
where
  S: CaseStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Intake
    .route("/chat", post(chat::handler::<S>))
    .route("/eligibility", post(eligibility::handler::<S>))
    .route("/upload", post(upload::handler::<S>))
    // Cases
    .route("/cases", get(cases::list::<S>).post(cases::create::<S>))
    .route(
      "/cases/{id}",
      get(cases::get_one::<S>)
        .patch(cases::update_one::<S>)
        .delete(cases::delete_one::<S>),
    )
    .route("/cases/{id}/messages", get(cases::list_messages::<S>))
    .route("/cases/{id}/evidence", get(cases::list_evidence::<S>))
    // Staff
    .route("/staff", get(staff::list::<S>).post(staff::create::<S>))
    .with_state(state)
}
