use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteRow};

pub type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;

/// A stored row kind. `COLUMNS` is the full select list and also the set of
/// fields `find_by_field` accepts.
pub trait Record: for<'r> FromRow<'r, SqliteRow> + Send + Unpin {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];
}

/// Insert payload for a [`Record`]. `id` and `created_at` are filled by the store.
pub trait NewRecord: Sync {
    type Saved: Record;

    /// Columns written on insert, in bind order.
    const COLUMNS: &'static [&'static str];

    fn bind_values<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q>;
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub image_file: String,
    pub created_at: DateTime<Utc>,
}

impl Record for Project {
    const TABLE: &'static str = "projects";
    const COLUMNS: &'static [&'static str] =
        &["id", "name", "description", "image_file", "created_at"];
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub image_file: String,
}

impl NewRecord for NewProject {
    type Saved = Project;
    const COLUMNS: &'static [&'static str] = &["name", "description", "image_file"];

    fn bind_values<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.name.as_str())
            .bind(self.description.as_str())
            .bind(self.image_file.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub designation: String,
    pub description: String,
    pub image_file: String,
    pub created_at: DateTime<Utc>,
}

impl Record for Client {
    const TABLE: &'static str = "clients";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "designation",
        "description",
        "image_file",
        "created_at",
    ];
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewClient {
    pub name: String,
    pub designation: String,
    pub description: String,
    pub image_file: String,
}

impl NewRecord for NewClient {
    type Saved = Client;
    const COLUMNS: &'static [&'static str] =
        &["name", "designation", "description", "image_file"];

    fn bind_values<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.name.as_str())
            .bind(self.designation.as_str())
            .bind(self.description.as_str())
            .bind(self.image_file.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Contact {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub mobile: String,
    pub city: String,
    pub created_at: DateTime<Utc>,
}

impl Record for Contact {
    const TABLE: &'static str = "contacts";
    const COLUMNS: &'static [&'static str] =
        &["id", "full_name", "email", "mobile", "city", "created_at"];
}

/// Visitor contact form; every field is required.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NewContact {
    pub full_name: String,
    pub email: String,
    pub mobile: String,
    pub city: String,
}

impl NewRecord for NewContact {
    type Saved = Contact;
    const COLUMNS: &'static [&'static str] = &["full_name", "email", "mobile", "city"];

    fn bind_values<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.full_name.as_str())
            .bind(self.email.as_str())
            .bind(self.mobile.as_str())
            .bind(self.city.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Subscriber {
    pub id: i64,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl Record for Subscriber {
    const TABLE: &'static str = "subscribers";
    const COLUMNS: &'static [&'static str] = &["id", "email", "created_at"];
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSubscriber {
    pub email: String,
}

impl NewRecord for NewSubscriber {
    type Saved = Subscriber;
    const COLUMNS: &'static [&'static str] = &["email"];

    fn bind_values<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query.bind(self.email.as_str())
    }
}
