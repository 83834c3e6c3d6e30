//! On-device profile cache backed by SQLite.
//!
//! Timestamps are stored as Unix milliseconds; profiles are created with
//! millisecond precision so they round-trip unchanged.

use crate::{Result as StoreErrorResult, StoreError};

use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use tm_core::{Profile, Role};

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS tm_profile_cache (
        id TEXT PRIMARY KEY NOT NULL,
        email TEXT,
        display_name TEXT,
        avatar_ref TEXT,
        role TEXT NOT NULL,
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL
    )
"#;

pub struct SqliteProfileCache {
    pool: SqlitePool,
}

impl SqliteProfileCache {
    /// Open (or create) a cache file at `path`.
    pub async fn open(path: &Path) -> StoreErrorResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let cache = Self::with_pool(pool).await?;
        info!("Profile cache opened at {}", path.display());
        Ok(cache)
    }

    /// Cache that lives only as long as the process.
    pub async fn in_memory() -> StoreErrorResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(":memory:")
            .create_if_missing(true);

        // In-memory databases are per-connection
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        Self::with_pool(pool).await
    }

    pub async fn with_pool(pool: SqlitePool) -> StoreErrorResult<Self> {
        sqlx::query(CREATE_TABLE).execute(&pool).await?;
        Ok(Self { pool })
    }

    pub async fn get(&self, id: &str) -> StoreErrorResult<Option<Profile>> {
        let row = sqlx::query(
            r#"
                SELECT id, email, display_name, avatar_ref, role, created_at, updated_at
                FROM tm_profile_cache
                WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| Self::profile_from_row(&r)).transpose()
    }

    /// Insert or replace the cached copy of `profile`.
    pub async fn put(&self, profile: &Profile) -> StoreErrorResult<()> {
        sqlx::query(
            r#"
                INSERT INTO tm_profile_cache (
                    id, email, display_name, avatar_ref, role, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT(id) DO UPDATE SET
                    email = excluded.email,
                    display_name = excluded.display_name,
                    avatar_ref = excluded.avatar_ref,
                    role = excluded.role,
                    created_at = excluded.created_at,
                    updated_at = excluded.updated_at
            "#,
        )
        .bind(&profile.id)
        .bind(&profile.email)
        .bind(&profile.display_name)
        .bind(&profile.avatar_ref)
        .bind(profile.role.as_str())
        .bind(profile.created_at.timestamp_millis())
        .bind(profile.updated_at.timestamp_millis())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Returns whether a row was removed.
    pub async fn remove(&self, id: &str) -> StoreErrorResult<bool> {
        let result = sqlx::query("DELETE FROM tm_profile_cache WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    fn profile_from_row(row: &SqliteRow) -> StoreErrorResult<Profile> {
        let role: String = row.try_get("role")?;
        let created_at: i64 = row.try_get("created_at")?;
        let updated_at: i64 = row.try_get("updated_at")?;

        Ok(Profile {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            display_name: row.try_get("display_name")?,
            avatar_ref: row.try_get("avatar_ref")?,
            role: Role::from_str(&role).map_err(|e| {
                StoreError::invalid_record(format!("Invalid role in profile.role: {}", e))
            })?,
            created_at: Self::timestamp(created_at, "created_at")?,
            updated_at: Self::timestamp(updated_at, "updated_at")?,
        })
    }

    #[track_caller]
    fn timestamp(millis: i64, column: &str) -> StoreErrorResult<DateTime<Utc>> {
        DateTime::from_timestamp_millis(millis).ok_or_else(|| {
            StoreError::invalid_record(format!("Invalid timestamp in profile.{}", column))
        })
    }
}
