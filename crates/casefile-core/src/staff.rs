//! Staff — an operator account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// Operator privilege level.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
  Admin,
  #[default]
  Staff,
}

impl StaffRole {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Admin => "admin",
      Self::Staff => "staff",
    }
  }

  pub fn parse(s: &str) -> Result<Self> {
    match s {
      "admin" => Ok(Self::Admin),
      "staff" => Ok(Self::Staff),
      other => Err(Error::UnknownStaffRole(other.to_string())),
    }
  }
}

/// An operator account. `email` is globally unique; lifecycle is independent
/// of any case.
#[derive(Debug, Clone, Serialize)]
pub struct Staff {
  pub staff_id:      Uuid,
  pub email:         String,
  /// Argon2 PHC string. Never serialized.
  #[serde(skip_serializing)]
  pub password_hash: String,
  pub role:          StaffRole,
  pub created_at:    DateTime<Utc>,
}

/// Input to [`crate::store::CaseStore::create_staff`].
/// The caller supplies an already-hashed password, never the plaintext.
#[derive(Debug, Clone)]
pub struct NewStaff {
  pub email:         String,
  pub password_hash: String,
  pub role:          StaffRole,
}
