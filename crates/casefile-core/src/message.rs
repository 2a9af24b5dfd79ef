//! Message — one turn in a case's conversation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// Who authored a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderRole {
  User,
  Assistant,
}

impl SenderRole {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::User => "user",
      Self::Assistant => "assistant",
    }
  }

  pub fn parse(s: &str) -> Result<Self> {
    match s {
      "user" => Ok(Self::User),
      "assistant" => Ok(Self::Assistant),
      other => Err(Error::UnknownSender(other.to_string())),
    }
  }
}

/// One turn in a conversation. Immutable once recorded; the store exposes no
/// update, and the row is removed only by the owning case's cascade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
  pub message_id: Uuid,
  pub case_id:    Uuid,
  pub sender:     SenderRole,
  pub body:       String,
  /// Server-assigned timestamp; never changes after creation.
  pub sent_at:    DateTime<Utc>,
}

/// Input to [`crate::store::CaseStore::add_message`].
#[derive(Debug, Clone)]
pub struct NewMessage {
  pub case_id: Uuid,
  pub sender:  SenderRole,
  pub body:    String,
}
