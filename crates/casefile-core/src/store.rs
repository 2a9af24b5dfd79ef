//! The `CaseStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `casefile-store-sqlite`). Higher layers (`casefile-api`,
//! `casefile-server`) depend on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  case::{Case, CaseUpdate, NewCase},
  evidence::{Evidence, NewEvidence},
  message::{Message, NewMessage},
  staff::{NewStaff, Staff},
};

/// Abstraction over a casefile storage backend.
///
/// Messages and evidence are append-only once created: their rows are never
/// updated, and they are deleted only by the owning case's cascade. Cases
/// carry the mutable screening state (status, verdict, confidence, contact
/// details).
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait CaseStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Cases ─────────────────────────────────────────────────────────────

  /// Create and persist a new case. The surrogate key, default `open`
  /// status, and creation timestamp are assigned by the store.
  fn create_case(
    &self,
    input: NewCase,
  ) -> impl Future<Output = Result<Case, Self::Error>> + Send + '_;

  /// Retrieve a case by id. Returns `None` if not found.
  fn get_case(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Case>, Self::Error>> + Send + '_;

  /// List all cases, oldest first.
  fn list_cases(
    &self,
  ) -> impl Future<Output = Result<Vec<Case>, Self::Error>> + Send + '_;

  /// Apply `update` to the mutable fields of a case and return the updated
  /// record. Fails with the backend's not-found error if the id is absent.
  fn update_case(
    &self,
    id: Uuid,
    update: CaseUpdate,
  ) -> impl Future<Output = Result<Case, Self::Error>> + Send + '_;

  /// Delete a case and, atomically, all of its messages and evidence.
  /// Fails with the backend's not-found error if the id is absent.
  fn delete_case(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Messages ──────────────────────────────────────────────────────────

  /// Record a conversation turn. Fails with the backend's not-found error
  /// if the owning case does not exist.
  fn add_message(
    &self,
    input: NewMessage,
  ) -> impl Future<Output = Result<Message, Self::Error>> + Send + '_;

  /// Retrieve a message by id. Returns `None` if not found.
  fn get_message(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Message>, Self::Error>> + Send + '_;

  /// All messages for a case, oldest first.
  fn list_messages(
    &self,
    case_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Message>, Self::Error>> + Send + '_;

  // ── Evidence ──────────────────────────────────────────────────────────

  /// Record uploaded-document metadata. Fails with the backend's not-found
  /// error if the owning case does not exist.
  fn add_evidence(
    &self,
    input: NewEvidence,
  ) -> impl Future<Output = Result<Evidence, Self::Error>> + Send + '_;

  /// Retrieve an evidence record by id. Returns `None` if not found.
  fn get_evidence(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Evidence>, Self::Error>> + Send + '_;

  /// All evidence for a case, oldest first.
  fn list_evidence(
    &self,
    case_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Evidence>, Self::Error>> + Send + '_;

  // ── Staff ─────────────────────────────────────────────────────────────

  /// Create an operator account. Fails with the backend's duplicate-email
  /// error if the address is already registered.
  fn create_staff(
    &self,
    input: NewStaff,
  ) -> impl Future<Output = Result<Staff, Self::Error>> + Send + '_;

  /// Retrieve a staff account by id. Returns `None` if not found.
  fn get_staff(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Staff>, Self::Error>> + Send + '_;

  /// Retrieve a staff account by email. Returns `None` if not found.
  fn find_staff_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<Staff>, Self::Error>> + Send + 'a;

  /// List all staff accounts, oldest first.
  fn list_staff(
    &self,
  ) -> impl Future<Output = Result<Vec<Staff>, Self::Error>> + Send + '_;

  /// Delete a staff account. Fails with the backend's not-found error if
  /// the id is absent.
  fn delete_staff(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
