use crate::db::models::{NewRecord, Record};
use crate::db::schema::SQLITE_INIT;
use crate::error::VitrineError;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;

pub type SqlitePool = Pool<Sqlite>;

/// Open (creating if missing) the SQLite database at `database_url`.
pub async fn connect(database_url: &str) -> Result<SqlitePool, VitrineError> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
    Ok(pool)
}

/// Persistence boundary for projects, clients, contacts and subscribers.
///
/// Cheap to clone; every clone shares the same pool.
#[derive(Clone)]
pub struct ContentStore {
    pool: SqlitePool,
}

impl ContentStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), VitrineError> {
        // execute multiple statements safely (SQLite supports multi-commands but sqlx::query doesn't)
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Insert a record, stamping `created_at`. Returns the row id.
    ///
    /// A unique-constraint violation comes back as [`VitrineError::DuplicateKey`].
    pub async fn insert<N: NewRecord>(&self, record: &N) -> Result<i64, VitrineError> {
        let table = <N::Saved as Record>::TABLE;
        let sql = insert_sql(table, N::COLUMNS);

        let result = record
            .bind_values(sqlx::query(&sql))
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| VitrineError::from_insert(e, table))?;
        Ok(result.last_insert_rowid())
    }

    /// Every record of one kind, oldest first.
    pub async fn query_all<R: Record>(&self) -> Result<Vec<R>, VitrineError> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY id",
            R::COLUMNS.join(", "),
            R::TABLE
        );
        let rows = sqlx::query_as::<_, R>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    pub async fn get_by_id<R: Record>(&self, id: i64) -> Result<Option<R>, VitrineError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = ?",
            R::COLUMNS.join(", "),
            R::TABLE
        );
        let row = sqlx::query_as::<_, R>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// First record whose `field` equals `value`.
    ///
    /// `field` must be one of the kind's columns; anything else is rejected
    /// before it reaches SQL.
    pub async fn find_by_field<R: Record>(
        &self,
        field: &str,
        value: &str,
    ) -> Result<Option<R>, VitrineError> {
        let Some(column) = R::COLUMNS.iter().find(|c| **c == field) else {
            return Err(VitrineError::UnknownField {
                table: R::TABLE,
                field: field.to_string(),
            });
        };
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = ? ORDER BY id LIMIT 1",
            R::COLUMNS.join(", "),
            R::TABLE,
            column
        );
        let row = sqlx::query_as::<_, R>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}

fn insert_sql(table: &str, columns: &[&str]) -> String {
    let placeholders = vec!["?"; columns.len() + 1].join(", ");
    format!(
        "INSERT INTO {} ({}, created_at) VALUES ({})",
        table,
        columns.join(", "),
        placeholders
    )
}
