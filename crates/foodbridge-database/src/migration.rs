//! Schema migrations embedded from the workspace `migrations/` directory.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::{debug, info};

use foodbridge_core::error::{AppError, ErrorKind};
use foodbridge_core::result::AppResult;

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Summary of the embedded migration set after a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaVersion {
    /// Highest migration version in the set.
    pub latest: i64,
    /// Number of migrations in the set.
    pub count: usize,
}

/// Describe the embedded migration set without touching the database.
pub fn embedded_version() -> SchemaVersion {
    SchemaVersion {
        latest: MIGRATOR.iter().map(|m| m.version).max().unwrap_or_default(),
        count: MIGRATOR.iter().count(),
    }
}

/// Apply every pending migration and report the resulting schema version.
pub async fn run_migrations(pool: &PgPool) -> AppResult<SchemaVersion> {
    let version = embedded_version();
    info!(
        migrations = version.count,
        target_version = version.latest,
        "Applying FoodBridge schema migrations"
    );
    for migration in MIGRATOR.iter() {
        debug!(
            version = migration.version,
            description = %migration.description,
            "Migration in set"
        );
    }

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to migrate schema to version {}: {e}", version.latest),
            e,
        )
    })?;

    info!(schema_version = version.latest, "Schema is up to date");
    Ok(version)
}
