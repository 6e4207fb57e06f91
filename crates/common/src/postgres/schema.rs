//! SQL statements for creating the confhub database schema.

pub(crate) const CREATE_DEVICES: &str = "
CREATE TABLE IF NOT EXISTS devices (
    id               BIGSERIAL PRIMARY KEY,
    name             TEXT NOT NULL UNIQUE,
    ip_address       TEXT NOT NULL,
    config_file_path TEXT,
    created_at       TIMESTAMPTZ NOT NULL DEFAULT now()
)";

pub(crate) const CREATE_USERS: &str = "
CREATE TABLE IF NOT EXISTS users (
    id             TEXT PRIMARY KEY,
    email          TEXT NOT NULL UNIQUE,
    password_hash  TEXT NOT NULL,
    username       TEXT NOT NULL,
    putty_login    TEXT NOT NULL DEFAULT '',
    putty_password TEXT NOT NULL DEFAULT '',
    created_at     TIMESTAMPTZ NOT NULL DEFAULT now()
)";

pub(crate) const SCHEMA_STATEMENTS: &[&str] = &[CREATE_DEVICES, CREATE_USERS];
