//! SQL schema for the kiosk SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS identities (
    identifier  TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    email       TEXT NOT NULL,
    secret_hash TEXT NOT NULL,      -- argon2 PHC string
    role        TEXT NOT NULL
                CHECK (role IN ('user', 'admin', 'root_admin')),
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

-- At most one root identity, enforced at write time.
CREATE UNIQUE INDEX IF NOT EXISTS identities_single_root
    ON identities(role) WHERE role = 'root_admin';

CREATE TABLE IF NOT EXISTS announcements (
    announcement_id TEXT PRIMARY KEY,
    source_language TEXT NOT NULL,
    created_at      TEXT NOT NULL,
    updated_at      TEXT NOT NULL
);

-- One row per language variant; the source variant is always present.
CREATE TABLE IF NOT EXISTS announcement_translations (
    announcement_id TEXT NOT NULL
                    REFERENCES announcements(announcement_id) ON DELETE CASCADE,
    language        TEXT NOT NULL,
    subject         TEXT NOT NULL,
    body            TEXT NOT NULL,
    PRIMARY KEY (announcement_id, language)
);

CREATE INDEX IF NOT EXISTS announcements_created_idx ON announcements(created_at);

PRAGMA user_version = 1;
";
