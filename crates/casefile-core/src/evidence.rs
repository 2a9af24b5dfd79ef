//! Evidence — metadata and extracted excerpt for one uploaded document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata for one uploaded supporting document. The file itself lives on
/// disk at `storage_path`; no binary data is stored in the database.
/// Immutable once recorded; removed only by the owning case's cascade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evidence {
  pub evidence_id:  Uuid,
  pub case_id:      Uuid,
  /// Filename as supplied by the client, path components stripped.
  pub filename:     String,
  pub storage_path: String,
  /// Label for how `text_excerpt` was produced (e.g. "text-excerpt",
  /// "placeholder").
  pub method:       String,
  pub pages:        u32,
  pub text_excerpt: String,
  pub recorded_at:  DateTime<Utc>,
}

/// Input to [`crate::store::CaseStore::add_evidence`].
/// `evidence_id` and `recorded_at` are always set by the store.
#[derive(Debug, Clone)]
pub struct NewEvidence {
  pub case_id:      Uuid,
  pub filename:     String,
  pub storage_path: String,
  pub method:       String,
  pub pages:        u32,
  pub text_excerpt: String,
}
