//! Database module: record shapes and schema for the site content.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows, plus the `Record`/`NewRecord` traits
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: `ContentStore`, the generic insert/list/lookup surface

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{
    Client, Contact, NewClient, NewContact, NewProject, NewRecord, NewSubscriber, Project, Record,
    Subscriber,
};
pub use schema::SQLITE_INIT;
pub use sqlite::{ContentStore, SqlitePool, connect};
