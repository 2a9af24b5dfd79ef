//! Handlers for `/cases` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/cases` | All cases, oldest first |
//! | `POST`   | `/cases` | Body: [`NewCase`]; returns 201 + stored case |
//! | `GET`    | `/cases/:id` | 404 if not found |
//! | `PATCH`  | `/cases/:id` | Body: [`CaseUpdate`]; rejects an empty update |
//! | `DELETE` | `/cases/:id` | Cascades to messages and evidence |
//! | `GET`    | `/cases/:id/messages` | Conversation, oldest first |
//! | `GET`    | `/cases/:id/evidence` | Uploads, oldest first |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use casefile_core::{
  case::{Case, CaseUpdate, NewCase},
  evidence::Evidence,
  message::Message,
  store::CaseStore,
};
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

/// Fetch a case or produce the 404-shaped error.
async fn require_case<S>(state: &ApiState<S>, id: Uuid) -> Result<Case, ApiError>
where
  S: CaseStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  state
    .store
    .get_case(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("case {id} not found")))
}

/// `GET /cases`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Vec<Case>>, ApiError>
where
  S: CaseStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let cases = state
    .store
    .list_cases()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(cases))
}

/// `POST /cases` — body: `{"client_name":"...","client_email":"...",...}`,
/// all fields optional.
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<NewCase>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CaseStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let case = state
    .store
    .create_case(body)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(case)))
}

/// `GET /cases/:id`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Case>, ApiError>
where
  S: CaseStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Ok(Json(require_case(&state, id).await?))
}

/// `PATCH /cases/:id`
pub async fn update_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<CaseUpdate>,
) -> Result<Json<Case>, ApiError>
where
  S: CaseStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if body.is_empty() {
    return Err(ApiError::Validation("no fields to update".into()));
  }

  require_case(&state, id).await?;
  let case = state
    .store
    .update_case(id, body)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(case))
}

/// `DELETE /cases/:id` — removes the case and all of its messages and
/// evidence.
pub async fn delete_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: CaseStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  require_case(&state, id).await?;
  state
    .store
    .delete_case(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(StatusCode::NO_CONTENT)
}

/// `GET /cases/:id/messages`
pub async fn list_messages<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<Message>>, ApiError>
where
  S: CaseStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  require_case(&state, id).await?;
  let messages = state
    .store
    .list_messages(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(messages))
}

/// `GET /cases/:id/evidence`
pub async fn list_evidence<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<Evidence>>, ApiError>
where
  S: CaseStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  require_case(&state, id).await?;
  let evidence = state
    .store
    .list_evidence(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(evidence))
}
