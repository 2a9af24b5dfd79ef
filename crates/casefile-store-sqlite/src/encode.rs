//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings, UUIDs as hyphenated
//! lowercase strings. Enumerated columns use the discriminants owned by
//! `casefile-core`, so an unknown value in the database is rejected on
//! read instead of leaking upward as a free-form string.

use casefile_core::{
  case::{Case, CaseStatus, ConfidenceBand, Verdict},
  evidence::Evidence,
  message::{Message, SenderRole},
  staff::{Staff, StaffRole},
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::Result;

// ─── Scalar codecs ───────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| crate::Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `cases` row.
pub struct RawCase {
  pub case_id:      String,
  pub status:       String,
  pub verdict:      Option<String>,
  pub confidence:   Option<String>,
  pub client_name:  Option<String>,
  pub client_email: Option<String>,
  pub client_phone: Option<String>,
  pub created_at:   String,
}

impl RawCase {
  pub fn into_case(self) -> Result<Case> {
    Ok(Case {
      case_id:      decode_uuid(&self.case_id)?,
      status:       CaseStatus::parse(&self.status)?,
      verdict:      self.verdict.as_deref().map(Verdict::parse).transpose()?,
      confidence:   self
        .confidence
        .as_deref()
        .map(ConfidenceBand::parse)
        .transpose()?,
      client_name:  self.client_name,
      client_email: self.client_email,
      client_phone: self.client_phone,
      created_at:   decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `messages` row.
pub struct RawMessage {
  pub message_id: String,
  pub case_id:    String,
  pub sender:     String,
  pub body:       String,
  pub sent_at:    String,
}

impl RawMessage {
  pub fn into_message(self) -> Result<Message> {
    Ok(Message {
      message_id: decode_uuid(&self.message_id)?,
      case_id:    decode_uuid(&self.case_id)?,
      sender:     SenderRole::parse(&self.sender)?,
      body:       self.body,
      sent_at:    decode_dt(&self.sent_at)?,
    })
  }
}

/// Raw strings read directly from an `evidence` row.
pub struct RawEvidence {
  pub evidence_id:  String,
  pub case_id:      String,
  pub filename:     String,
  pub storage_path: String,
  pub method:       String,
  pub pages:        u32,
  pub text_excerpt: String,
  pub recorded_at:  String,
}

impl RawEvidence {
  pub fn into_evidence(self) -> Result<Evidence> {
    Ok(Evidence {
      evidence_id:  decode_uuid(&self.evidence_id)?,
      case_id:      decode_uuid(&self.case_id)?,
      filename:     self.filename,
      storage_path: self.storage_path,
      method:       self.method,
      pages:        self.pages,
      text_excerpt: self.text_excerpt,
      recorded_at:  decode_dt(&self.recorded_at)?,
    })
  }
}

/// Raw strings read directly from a `staff` row.
pub struct RawStaff {
  pub staff_id:      String,
  pub email:         String,
  pub password_hash: String,
  pub role:          String,
  pub created_at:    String,
}

impl RawStaff {
  pub fn into_staff(self) -> Result<Staff> {
    Ok(Staff {
      staff_id:      decode_uuid(&self.staff_id)?,
      email:         self.email,
      password_hash: self.password_hash,
      role:          StaffRole::parse(&self.role)?,
      created_at:    decode_dt(&self.created_at)?,
    })
  }
}
