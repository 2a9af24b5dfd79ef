//! SQL schema and migration ledger for the casefile SQLite store.
//!
//! Migrations are an ordered list gated on `PRAGMA user_version`: entry `i`
//! brings the schema to version `i + 1`. Only entries newer than the
//! recorded version are applied, each inside its own transaction that bumps
//! the version on commit, so initialization is idempotent and a re-run
//! applies nothing.

/// v1 — the four entity tables.
///
/// Messages and evidence belong to a case; `ON DELETE CASCADE` makes case
/// deletion atomic over its dependents. `PRAGMA foreign_keys` is enabled
/// per-connection by the store, not here.
const V1_INITIAL: &str = "
CREATE TABLE IF NOT EXISTS cases (
    case_id    TEXT PRIMARY KEY,
    status     TEXT NOT NULL DEFAULT 'open',
    verdict    TEXT,             -- 'ELIGIBLE' | 'COMPLEX CASE' | 'NEED MORE INFO'
    confidence TEXT,             -- 'high' | 'medium' | 'low'
    created_at TEXT NOT NULL     -- ISO 8601 UTC; server-assigned
);

-- Conversation turns are append-only.
-- No UPDATE is ever issued against this table.
CREATE TABLE IF NOT EXISTS messages (
    message_id TEXT PRIMARY KEY,
    case_id    TEXT NOT NULL REFERENCES cases(case_id) ON DELETE CASCADE,
    sender     TEXT NOT NULL,    -- 'user' | 'assistant'
    body       TEXT NOT NULL,
    sent_at    TEXT NOT NULL
);

-- Uploaded-document metadata; the files themselves live on disk.
CREATE TABLE IF NOT EXISTS evidence (
    evidence_id  TEXT PRIMARY KEY,
    case_id      TEXT NOT NULL REFERENCES cases(case_id) ON DELETE CASCADE,
    filename     TEXT NOT NULL,
    storage_path TEXT NOT NULL,
    method       TEXT NOT NULL,
    pages        INTEGER NOT NULL DEFAULT 0,
    text_excerpt TEXT NOT NULL DEFAULT '',
    recorded_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS staff (
    staff_id      TEXT PRIMARY KEY,
    email         TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    role          TEXT NOT NULL,  -- 'admin' | 'staff'
    created_at    TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS messages_case_idx ON messages(case_id);
CREATE INDEX IF NOT EXISTS evidence_case_idx ON evidence(case_id);
";

/// v2 — client contact columns, added after launch. Additive only: rows
/// written under v1 read back with NULLs, no rewrite required.
const V2_CONTACT_COLUMNS: &str = "
ALTER TABLE cases ADD COLUMN client_name  TEXT;
ALTER TABLE cases ADD COLUMN client_email TEXT;
ALTER TABLE cases ADD COLUMN client_phone TEXT;
";

/// All migrations in order. Index `i` targets schema version `i + 1`.
pub const MIGRATIONS: &[&str] = &[V1_INITIAL, V2_CONTACT_COLUMNS];
