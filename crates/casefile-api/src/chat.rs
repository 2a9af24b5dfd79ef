//! Handler for the `/chat` endpoint.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/chat` | Body: `{"message":"..."}`; optional `?case_id=` records the turn |

use axum::{
  Json,
  extract::{Query, State},
};
use casefile_core::{
  chat::{ChatReply, reply_to},
  message::{NewMessage, SenderRole},
  store::CaseStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct ChatBody {
  pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatParams {
  pub case_id: Option<Uuid>,
}

/// `POST /chat[?case_id=<id>]`
///
/// Returns the canned reply (plus any year extraction). With a `case_id`,
/// the client's message and the reply are both recorded on the case, in
/// that order.
pub async fn handler<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<ChatParams>,
  Json(body): Json<ChatBody>,
) -> Result<Json<ChatReply>, ApiError>
where
  S: CaseStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let text = body.message.trim();
  if text.is_empty() {
    return Err(ApiError::Validation("message must not be empty".into()));
  }

  let reply = reply_to(text);

  if let Some(case_id) = params.case_id {
    state
      .store
      .get_case(case_id)
      .await
      .map_err(|e| ApiError::Store(Box::new(e)))?
      .ok_or_else(|| ApiError::NotFound(format!("case {case_id} not found")))?;

    state
      .store
      .add_message(NewMessage {
        case_id,
        sender: SenderRole::User,
        body: text.to_string(),
      })
      .await
      .map_err(|e| ApiError::Store(Box::new(e)))?;

    state
      .store
      .add_message(NewMessage {
        case_id,
        sender: SenderRole::Assistant,
        body: reply.reply.clone(),
      })
      .await
      .map_err(|e| ApiError::Store(Box::new(e)))?;
  }

  Ok(Json(reply))
}
