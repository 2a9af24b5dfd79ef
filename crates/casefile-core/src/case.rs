//! Case — one client's citizenship-eligibility inquiry.
//!
//! A case owns its conversation messages and its uploaded evidence; deleting
//! a case deletes both. Status, verdict, and confidence are closed
//! enumerations with stable storage discriminants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Enumerations ────────────────────────────────────────────────────────────

/// Lifecycle state of a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
  #[default]
  Open,
  AwaitingDocuments,
  UnderReview,
  Closed,
}

impl CaseStatus {
  /// The discriminant string stored in the `status` column.
  /// Must match the `rename_all = "snake_case"` serde tags above.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Open => "open",
      Self::AwaitingDocuments => "awaiting_documents",
      Self::UnderReview => "under_review",
      Self::Closed => "closed",
    }
  }

  /// Parse a storage discriminant, rejecting unknown values.
  pub fn parse(s: &str) -> Result<Self> {
    match s {
      "open" => Ok(Self::Open),
      "awaiting_documents" => Ok(Self::AwaitingDocuments),
      "under_review" => Ok(Self::UnderReview),
      "closed" => Ok(Self::Closed),
      other => Err(Error::UnknownStatus(other.to_string())),
    }
  }
}

/// Outcome of an eligibility assessment.
///
/// Serialized exactly as the wire strings the intake frontend displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
  #[serde(rename = "ELIGIBLE")]
  Eligible,
  #[serde(rename = "COMPLEX CASE")]
  ComplexCase,
  #[serde(rename = "NEED MORE INFO")]
  NeedMoreInfo,
}

impl Verdict {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Eligible => "ELIGIBLE",
      Self::ComplexCase => "COMPLEX CASE",
      Self::NeedMoreInfo => "NEED MORE INFO",
    }
  }

  pub fn parse(s: &str) -> Result<Self> {
    match s {
      "ELIGIBLE" => Ok(Self::Eligible),
      "COMPLEX CASE" => Ok(Self::ComplexCase),
      "NEED MORE INFO" => Ok(Self::NeedMoreInfo),
      other => Err(Error::UnknownVerdict(other.to_string())),
    }
  }
}

/// Categorical confidence label carried on a case alongside the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceBand {
  High,
  Medium,
  Low,
}

impl ConfidenceBand {
  /// Band for a numeric rule-table score.
  pub fn from_score(score: f64) -> Self {
    if score >= 0.8 {
      Self::High
    } else if score >= 0.5 {
      Self::Medium
    } else {
      Self::Low
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::High => "high",
      Self::Medium => "medium",
      Self::Low => "low",
    }
  }

  pub fn parse(s: &str) -> Result<Self> {
    match s {
      "high" => Ok(Self::High),
      "medium" => Ok(Self::Medium),
      "low" => Ok(Self::Low),
      other => Err(Error::UnknownConfidence(other.to_string())),
    }
  }
}

// ─── Case ────────────────────────────────────────────────────────────────────

/// A client's citizenship inquiry record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Case {
  pub case_id:      Uuid,
  pub status:       CaseStatus,
  pub verdict:      Option<Verdict>,
  pub confidence:   Option<ConfidenceBand>,
  pub client_name:  Option<String>,
  pub client_email: Option<String>,
  pub client_phone: Option<String>,
  /// Server-assigned timestamp; never changes after creation.
  pub created_at:   DateTime<Utc>,
}

/// Input to [`crate::store::CaseStore::create_case`].
/// `case_id`, `status`, and `created_at` are always set by the store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewCase {
  pub client_name:  Option<String>,
  pub client_email: Option<String>,
  pub client_phone: Option<String>,
}

/// Partial update for the mutable fields of a case. A `None` field is left
/// untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CaseUpdate {
  pub status:       Option<CaseStatus>,
  pub verdict:      Option<Verdict>,
  pub confidence:   Option<ConfidenceBand>,
  pub client_name:  Option<String>,
  pub client_email: Option<String>,
  pub client_phone: Option<String>,
}

impl CaseUpdate {
  pub fn is_empty(&self) -> bool {
    self.status.is_none()
      && self.verdict.is_none()
      && self.confidence.is_none()
      && self.client_name.is_none()
      && self.client_email.is_none()
      && self.client_phone.is_none()
  }
}
