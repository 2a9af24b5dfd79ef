//! [`SqliteStore`] — the SQLite implementation of [`CaseStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use casefile_core::{
  case::{Case, CaseStatus, CaseUpdate, NewCase},
  evidence::{Evidence, NewEvidence},
  message::{Message, NewMessage},
  staff::{NewStaff, Staff},
  store::CaseStore,
};

use crate::{
  Error, Result,
  encode::{RawCase, RawEvidence, RawMessage, RawStaff, encode_dt, encode_uuid},
  schema::MIGRATIONS,
};

// ─── Row mappers ─────────────────────────────────────────────────────────────

fn case_row(row: &rusqlite::Row) -> rusqlite::Result<RawCase> {
  Ok(RawCase {
    case_id:      row.get(0)?,
    status:       row.get(1)?,
    verdict:      row.get(2)?,
    confidence:   row.get(3)?,
    client_name:  row.get(4)?,
    client_email: row.get(5)?,
    client_phone: row.get(6)?,
    created_at:   row.get(7)?,
  })
}

fn message_row(row: &rusqlite::Row) -> rusqlite::Result<RawMessage> {
  Ok(RawMessage {
    message_id: row.get(0)?,
    case_id:    row.get(1)?,
    sender:     row.get(2)?,
    body:       row.get(3)?,
    sent_at:    row.get(4)?,
  })
}

fn evidence_row(row: &rusqlite::Row) -> rusqlite::Result<RawEvidence> {
  Ok(RawEvidence {
    evidence_id:  row.get(0)?,
    case_id:      row.get(1)?,
    filename:     row.get(2)?,
    storage_path: row.get(3)?,
    method:       row.get(4)?,
    pages:        row.get(5)?,
    text_excerpt: row.get(6)?,
    recorded_at:  row.get(7)?,
  })
}

fn staff_row(row: &rusqlite::Row) -> rusqlite::Result<RawStaff> {
  Ok(RawStaff {
    staff_id:      row.get(0)?,
    email:         row.get(1)?,
    password_hash: row.get(2)?,
    role:          row.get(3)?,
    created_at:    row.get(4)?,
  })
}

const CASE_COLUMNS: &str = "case_id, status, verdict, confidence, \
                            client_name, client_email, client_phone, \
                            created_at";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A casefile store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All calls
/// are serialized onto the connection's worker thread.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run any pending migrations.
  ///
  /// A migration failure here must abort startup; it is never recoverable
  /// at runtime.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Apply every migration newer than the recorded `user_version`, each in
  /// its own transaction. Safe to call repeatedly: an up-to-date store
  /// applies nothing.
  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        // Per-connection pragmas; foreign_keys is what makes the case
        // cascade fire.
        conn.execute_batch(
          "PRAGMA journal_mode = WAL;
           PRAGMA foreign_keys = ON;",
        )?;

        let mut version: i64 =
          conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

        for (idx, sql) in MIGRATIONS.iter().enumerate() {
          let target = (idx + 1) as i64;
          if version >= target {
            continue;
          }
          let tx = conn.transaction()?;
          tx.execute_batch(sql)?;
          tx.pragma_update(None, "user_version", target)?;
          tx.commit()?;
          version = target;
        }

        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Whether a case row exists; used before inserting dependents so a
  /// missing owner surfaces as a domain error, not a constraint failure.
  async fn case_exists(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);
    let exists = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM cases WHERE case_id = ?1",
              rusqlite::params![id_str],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;
    Ok(exists)
  }
}

// ─── CaseStore impl ──────────────────────────────────────────────────────────

impl CaseStore for SqliteStore {
  type Error = Error;

  // ── Cases ─────────────────────────────────────────────────────────────────

  async fn create_case(&self, input: NewCase) -> Result<Case> {
    let case = Case {
      case_id:      Uuid::new_v4(),
      status:       CaseStatus::default(),
      verdict:      None,
      confidence:   None,
      client_name:  input.client_name,
      client_email: input.client_email,
      client_phone: input.client_phone,
      created_at:   Utc::now(),
    };

    let id_str     = encode_uuid(case.case_id);
    let status_str = case.status.as_str().to_owned();
    let at_str     = encode_dt(case.created_at);
    let name       = case.client_name.clone();
    let email      = case.client_email.clone();
    let phone      = case.client_phone.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO cases (
             case_id, status, verdict, confidence,
             client_name, client_email, client_phone, created_at
           ) VALUES (?1, ?2, NULL, NULL, ?3, ?4, ?5, ?6)",
          rusqlite::params![id_str, status_str, name, email, phone, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(case)
  }

  async fn get_case(&self, id: Uuid) -> Result<Option<Case>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawCase> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {CASE_COLUMNS} FROM cases WHERE case_id = ?1"),
              rusqlite::params![id_str],
              case_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawCase::into_case).transpose()
  }

  async fn list_cases(&self) -> Result<Vec<Case>> {
    let raws: Vec<RawCase> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {CASE_COLUMNS} FROM cases ORDER BY created_at"
        ))?;
        let rows = stmt
          .query_map([], case_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCase::into_case).collect()
  }

  async fn update_case(&self, id: Uuid, update: CaseUpdate) -> Result<Case> {
    let id_str         = encode_uuid(id);
    let status_str     = update.status.map(|s| s.as_str().to_owned());
    let verdict_str    = update.verdict.map(|v| v.as_str().to_owned());
    let confidence_str = update.confidence.map(|c| c.as_str().to_owned());
    let name           = update.client_name;
    let email          = update.client_email;
    let phone          = update.client_phone;

    let raw: Option<RawCase> = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "UPDATE cases SET
             status       = COALESCE(?2, status),
             verdict      = COALESCE(?3, verdict),
             confidence   = COALESCE(?4, confidence),
             client_name  = COALESCE(?5, client_name),
             client_email = COALESCE(?6, client_email),
             client_phone = COALESCE(?7, client_phone)
           WHERE case_id = ?1",
          rusqlite::params![
            id_str,
            status_str,
            verdict_str,
            confidence_str,
            name,
            email,
            phone,
          ],
        )?;

        if changed == 0 {
          return Ok(None);
        }

        Ok(Some(conn.query_row(
          &format!("SELECT {CASE_COLUMNS} FROM cases WHERE case_id = ?1"),
          rusqlite::params![id_str],
          case_row,
        )?))
      })
      .await?;

    match raw {
      Some(raw) => raw.into_case(),
      None => Err(Error::CaseNotFound(id)),
    }
  }

  async fn delete_case(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);

    // The messages and evidence rows go with the case via ON DELETE
    // CASCADE, all inside this single statement.
    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM cases WHERE case_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    if deleted == 0 {
      return Err(Error::CaseNotFound(id));
    }
    Ok(())
  }

  // ── Messages ──────────────────────────────────────────────────────────────

  async fn add_message(&self, input: NewMessage) -> Result<Message> {
    if !self.case_exists(input.case_id).await? {
      return Err(Error::CaseNotFound(input.case_id));
    }

    let message = Message {
      message_id: Uuid::new_v4(),
      case_id:    input.case_id,
      sender:     input.sender,
      body:       input.body,
      sent_at:    Utc::now(),
    };

    let id_str      = encode_uuid(message.message_id);
    let case_id_str = encode_uuid(message.case_id);
    let sender_str  = message.sender.as_str().to_owned();
    let body        = message.body.clone();
    let at_str      = encode_dt(message.sent_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO messages (message_id, case_id, sender, body, sent_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, case_id_str, sender_str, body, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(message)
  }

  async fn get_message(&self, id: Uuid) -> Result<Option<Message>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawMessage> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT message_id, case_id, sender, body, sent_at
               FROM messages WHERE message_id = ?1",
              rusqlite::params![id_str],
              message_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawMessage::into_message).transpose()
  }

  async fn list_messages(&self, case_id: Uuid) -> Result<Vec<Message>> {
    let case_id_str = encode_uuid(case_id);

    let raws: Vec<RawMessage> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT message_id, case_id, sender, body, sent_at
           FROM messages WHERE case_id = ?1 ORDER BY sent_at",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![case_id_str], message_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawMessage::into_message).collect()
  }

  // ── Evidence ──────────────────────────────────────────────────────────────

  async fn add_evidence(&self, input: NewEvidence) -> Result<Evidence> {
    if !self.case_exists(input.case_id).await? {
      return Err(Error::CaseNotFound(input.case_id));
    }

    let evidence = Evidence {
      evidence_id:  Uuid::new_v4(),
      case_id:      input.case_id,
      filename:     input.filename,
      storage_path: input.storage_path,
      method:       input.method,
      pages:        input.pages,
      text_excerpt: input.text_excerpt,
      recorded_at:  Utc::now(),
    };

    let id_str      = encode_uuid(evidence.evidence_id);
    let case_id_str = encode_uuid(evidence.case_id);
    let filename    = evidence.filename.clone();
    let path        = evidence.storage_path.clone();
    let method      = evidence.method.clone();
    let pages       = evidence.pages;
    let excerpt     = evidence.text_excerpt.clone();
    let at_str      = encode_dt(evidence.recorded_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO evidence (
             evidence_id, case_id, filename, storage_path,
             method, pages, text_excerpt, recorded_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            id_str,
            case_id_str,
            filename,
            path,
            method,
            pages,
            excerpt,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(evidence)
  }

  async fn get_evidence(&self, id: Uuid) -> Result<Option<Evidence>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawEvidence> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT evidence_id, case_id, filename, storage_path,
                      method, pages, text_excerpt, recorded_at
               FROM evidence WHERE evidence_id = ?1",
              rusqlite::params![id_str],
              evidence_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawEvidence::into_evidence).transpose()
  }

  async fn list_evidence(&self, case_id: Uuid) -> Result<Vec<Evidence>> {
    let case_id_str = encode_uuid(case_id);

    let raws: Vec<RawEvidence> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT evidence_id, case_id, filename, storage_path,
                  method, pages, text_excerpt, recorded_at
           FROM evidence WHERE case_id = ?1 ORDER BY recorded_at",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![case_id_str], evidence_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEvidence::into_evidence).collect()
  }

  // ── Staff ─────────────────────────────────────────────────────────────────

  async fn create_staff(&self, input: NewStaff) -> Result<Staff> {
    let staff = Staff {
      staff_id:      Uuid::new_v4(),
      email:         input.email,
      password_hash: input.password_hash,
      role:          input.role,
      created_at:    Utc::now(),
    };

    let id_str   = encode_uuid(staff.staff_id);
    let email    = staff.email.clone();
    let hash     = staff.password_hash.clone();
    let role_str = staff.role.as_str().to_owned();
    let at_str   = encode_dt(staff.created_at);

    let inserted = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO staff (staff_id, email, password_hash, role, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, email, hash, role_str, at_str],
        )?;
        Ok(())
      })
      .await;

    // The only constraint that can fire on this insert is the UNIQUE email.
    if let Err(err) = inserted {
      return Err(match err {
        tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(f, _))
          if f.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
          Error::DuplicateEmail(staff.email)
        }
        other => Error::Database(other),
      });
    }

    Ok(staff)
  }

  async fn get_staff(&self, id: Uuid) -> Result<Option<Staff>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawStaff> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT staff_id, email, password_hash, role, created_at
               FROM staff WHERE staff_id = ?1",
              rusqlite::params![id_str],
              staff_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawStaff::into_staff).transpose()
  }

  async fn find_staff_by_email(&self, email: &str) -> Result<Option<Staff>> {
    let email = email.to_owned();

    let raw: Option<RawStaff> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT staff_id, email, password_hash, role, created_at
               FROM staff WHERE email = ?1",
              rusqlite::params![email],
              staff_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawStaff::into_staff).transpose()
  }

  async fn list_staff(&self) -> Result<Vec<Staff>> {
    let raws: Vec<RawStaff> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT staff_id, email, password_hash, role, created_at
           FROM staff ORDER BY created_at",
        )?;
        let rows = stmt
          .query_map([], staff_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawStaff::into_staff).collect()
  }

  async fn delete_staff(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);

    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM staff WHERE staff_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    if deleted == 0 {
      return Err(Error::StaffNotFound(id));
    }
    Ok(())
  }
}
