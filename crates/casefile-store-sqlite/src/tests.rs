//! Integration tests for `SqliteStore` against an in-memory database.

use casefile_core::{
  case::{CaseStatus, CaseUpdate, ConfidenceBand, NewCase, Verdict},
  evidence::NewEvidence,
  message::{NewMessage, SenderRole},
  staff::{NewStaff, StaffRole},
  store::CaseStore,
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_message(case_id: Uuid, sender: SenderRole, body: &str) -> NewMessage {
  NewMessage {
    case_id,
    sender,
    body: body.into(),
  }
}

fn new_evidence(case_id: Uuid, filename: &str) -> NewEvidence {
  NewEvidence {
    case_id,
    filename: filename.into(),
    storage_path: format!("uploads/{filename}"),
    method: "text-excerpt".into(),
    pages: 1,
    text_excerpt: "born in Krakow".into(),
  }
}

fn new_staff(email: &str, role: StaffRole) -> NewStaff {
  NewStaff {
    email: email.into(),
    password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
    role,
  }
}

// ─── Cases ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_case() {
  let s = store().await;

  let case = s
    .create_case(NewCase {
      client_name: Some("Alice Nowak".into()),
      client_email: Some("alice@example.com".into()),
      client_phone: None,
    })
    .await
    .unwrap();

  assert_eq!(case.status, CaseStatus::Open);
  assert!(case.verdict.is_none());
  assert!(case.confidence.is_none());

  let fetched = s.get_case(case.case_id).await.unwrap().unwrap();
  assert_eq!(fetched.case_id, case.case_id);
  assert_eq!(fetched.client_name.as_deref(), Some("Alice Nowak"));
  assert_eq!(fetched.client_email.as_deref(), Some("alice@example.com"));
  assert!(fetched.client_phone.is_none());
}

#[tokio::test]
async fn get_case_missing_returns_none() {
  let s = store().await;
  assert!(s.get_case(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn list_cases_all() {
  let s = store().await;
  s.create_case(NewCase::default()).await.unwrap();
  s.create_case(NewCase::default()).await.unwrap();
  s.create_case(NewCase::default()).await.unwrap();

  assert_eq!(s.list_cases().await.unwrap().len(), 3);
}

#[tokio::test]
async fn update_case_screening_fields() {
  let s = store().await;
  let case = s.create_case(NewCase::default()).await.unwrap();

  let updated = s
    .update_case(case.case_id, CaseUpdate {
      status: Some(CaseStatus::UnderReview),
      verdict: Some(Verdict::Eligible),
      confidence: Some(ConfidenceBand::High),
      ..Default::default()
    })
    .await
    .unwrap();

  assert_eq!(updated.status, CaseStatus::UnderReview);
  assert_eq!(updated.verdict, Some(Verdict::Eligible));
  assert_eq!(updated.confidence, Some(ConfidenceBand::High));
  // Untouched fields survive.
  assert!(updated.client_name.is_none());
  assert_eq!(updated.created_at, case.created_at);
}

#[tokio::test]
async fn update_case_leaves_unnamed_fields_alone() {
  let s = store().await;
  let case = s
    .create_case(NewCase {
      client_name: Some("Bob".into()),
      ..Default::default()
    })
    .await
    .unwrap();

  let updated = s
    .update_case(case.case_id, CaseUpdate {
      client_phone: Some("+48 600 000 000".into()),
      ..Default::default()
    })
    .await
    .unwrap();

  assert_eq!(updated.client_name.as_deref(), Some("Bob"));
  assert_eq!(updated.client_phone.as_deref(), Some("+48 600 000 000"));
  assert_eq!(updated.status, CaseStatus::Open);
}

#[tokio::test]
async fn update_missing_case_errors() {
  let s = store().await;
  let err = s
    .update_case(Uuid::new_v4(), CaseUpdate {
      status: Some(CaseStatus::Closed),
      ..Default::default()
    })
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::CaseNotFound(_)));
}

// ─── Cascade delete ──────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_case_cascades_to_messages_and_evidence() {
  let s = store().await;
  let case = s.create_case(NewCase::default()).await.unwrap();

  let m1 = s
    .add_message(new_message(case.case_id, SenderRole::User, "hello"))
    .await
    .unwrap();
  s.add_message(new_message(case.case_id, SenderRole::Assistant, "hi"))
    .await
    .unwrap();
  s.add_message(new_message(case.case_id, SenderRole::User, "documents?"))
    .await
    .unwrap();
  let e1 = s
    .add_evidence(new_evidence(case.case_id, "birth-certificate.pdf"))
    .await
    .unwrap();
  s.add_evidence(new_evidence(case.case_id, "passport.pdf"))
    .await
    .unwrap();

  s.delete_case(case.case_id).await.unwrap();

  assert!(s.get_case(case.case_id).await.unwrap().is_none());
  assert!(s.list_messages(case.case_id).await.unwrap().is_empty());
  assert!(s.list_evidence(case.case_id).await.unwrap().is_empty());
  assert!(s.get_message(m1.message_id).await.unwrap().is_none());
  assert!(s.get_evidence(e1.evidence_id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_case_with_no_dependents() {
  let s = store().await;
  let case = s.create_case(NewCase::default()).await.unwrap();
  s.delete_case(case.case_id).await.unwrap();
  assert!(s.get_case(case.case_id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_case_leaves_other_cases_intact() {
  let s = store().await;
  let doomed = s.create_case(NewCase::default()).await.unwrap();
  let kept = s.create_case(NewCase::default()).await.unwrap();
  s.add_message(new_message(kept.case_id, SenderRole::User, "still here"))
    .await
    .unwrap();

  s.delete_case(doomed.case_id).await.unwrap();

  assert!(s.get_case(kept.case_id).await.unwrap().is_some());
  assert_eq!(s.list_messages(kept.case_id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn delete_missing_case_errors() {
  let s = store().await;
  let err = s.delete_case(Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, crate::Error::CaseNotFound(_)));
}

// ─── Messages ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn messages_list_in_insertion_order() {
  let s = store().await;
  let case = s.create_case(NewCase::default()).await.unwrap();

  s.add_message(new_message(case.case_id, SenderRole::User, "first"))
    .await
    .unwrap();
  s.add_message(new_message(case.case_id, SenderRole::Assistant, "second"))
    .await
    .unwrap();

  let messages = s.list_messages(case.case_id).await.unwrap();
  assert_eq!(messages.len(), 2);
  assert_eq!(messages[0].body, "first");
  assert_eq!(messages[0].sender, SenderRole::User);
  assert_eq!(messages[1].sender, SenderRole::Assistant);
}

#[tokio::test]
async fn add_message_to_missing_case_errors() {
  let s = store().await;
  let err = s
    .add_message(new_message(Uuid::new_v4(), SenderRole::User, "orphan"))
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::CaseNotFound(_)));
}

// ─── Evidence ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn evidence_round_trip() {
  let s = store().await;
  let case = s.create_case(NewCase::default()).await.unwrap();

  let stored = s
    .add_evidence(new_evidence(case.case_id, "naturalization.pdf"))
    .await
    .unwrap();

  let fetched = s.get_evidence(stored.evidence_id).await.unwrap().unwrap();
  assert_eq!(fetched.filename, "naturalization.pdf");
  assert_eq!(fetched.method, "text-excerpt");
  assert_eq!(fetched.pages, 1);
  assert_eq!(fetched.text_excerpt, "born in Krakow");
}

#[tokio::test]
async fn add_evidence_to_missing_case_errors() {
  let s = store().await;
  let err = s
    .add_evidence(new_evidence(Uuid::new_v4(), "orphan.pdf"))
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::CaseNotFound(_)));
}

// ─── Staff ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn staff_email_is_unique() {
  let s = store().await;

  s.create_staff(new_staff("ops@example.com", StaffRole::Admin))
    .await
    .unwrap();

  let err = s
    .create_staff(new_staff("ops@example.com", StaffRole::Staff))
    .await
    .unwrap_err();
  assert!(
    matches!(err, crate::Error::DuplicateEmail(ref email) if email == "ops@example.com")
  );

  // A different address is fine.
  s.create_staff(new_staff("second@example.com", StaffRole::Staff))
    .await
    .unwrap();
  assert_eq!(s.list_staff().await.unwrap().len(), 2);
}

#[tokio::test]
async fn find_staff_by_email() {
  let s = store().await;
  let created = s
    .create_staff(new_staff("clerk@example.com", StaffRole::Staff))
    .await
    .unwrap();

  let found = s
    .find_staff_by_email("clerk@example.com")
    .await
    .unwrap()
    .unwrap();
  assert_eq!(found.staff_id, created.staff_id);
  assert_eq!(found.role, StaffRole::Staff);

  assert!(
    s.find_staff_by_email("nobody@example.com")
      .await
      .unwrap()
      .is_none()
  );
}

#[tokio::test]
async fn delete_staff_and_missing_staff_errors() {
  let s = store().await;
  let created = s
    .create_staff(new_staff("gone@example.com", StaffRole::Staff))
    .await
    .unwrap();

  s.delete_staff(created.staff_id).await.unwrap();
  assert!(s.get_staff(created.staff_id).await.unwrap().is_none());

  let err = s.delete_staff(created.staff_id).await.unwrap_err();
  assert!(matches!(err, crate::Error::StaffNotFound(_)));
}

// ─── Schema initialization ───────────────────────────────────────────────────

#[tokio::test]
async fn reopening_a_store_applies_no_further_migrations() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("casefile.db");

  let case_id = {
    let s = SqliteStore::open(&path).await.unwrap();
    let case = s
      .create_case(NewCase {
        client_name: Some("persisted".into()),
        ..Default::default()
      })
      .await
      .unwrap();
    case.case_id
  };

  // Second open re-runs the migration ledger; everything is already at the
  // current version, so the data must be untouched and no error raised.
  let s = SqliteStore::open(&path).await.unwrap();
  let case = s.get_case(case_id).await.unwrap().unwrap();
  assert_eq!(case.client_name.as_deref(), Some("persisted"));

  // And a third time, for good measure.
  drop(s);
  let s = SqliteStore::open(&path).await.unwrap();
  assert_eq!(s.list_cases().await.unwrap().len(), 1);
}
