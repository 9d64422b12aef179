//! One-shot copy of case records between backends.
//!
//! Records keep their `id_caso`. A record already present in the target is
//! skipped, so running a migration again is harmless.

use serde::Serialize;
use tracing::{debug, info};

use crate::backends::file::{FileBackend, FileContents};
use crate::core::CaseStorage;
use crate::error::{MigrationError, StorageError, StorageResult};

/// Summary of a migration run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    /// Human-readable summary.
    pub message: String,
    /// Records inserted into the target.
    pub migrados: usize,
    /// Records considered.
    pub total: usize,
}

impl MigrationReport {
    fn nothing_to_migrate() -> Self {
        Self {
            message: "No hay datos para migrar".to_string(),
            migrados: 0,
            total: 0,
        }
    }

    fn completed(migrados: usize, total: usize) -> Self {
        Self {
            message: format!("Migración completada: {migrados} de {total} casos migrados"),
            migrados,
            total,
        }
    }
}

/// Copies every record of `source` into `target`.
///
/// Each record is checked against the target before insertion; a duplicate
/// rejected at insert time also counts as skipped. Records inserted before a
/// failure stay in the target.
///
/// # Errors
///
/// * `MigrationError::SourceUnreadable` - the source could not be listed
/// * `MigrationError::TargetUnavailable` - the target failed a check or write
pub async fn migrate(
    source: &dyn CaseStorage,
    target: &dyn CaseStorage,
) -> StorageResult<MigrationReport> {
    let cases = source
        .list_all()
        .await
        .map_err(|e| MigrationError::SourceUnreadable {
            message: e.to_string(),
        })?;

    let total = cases.len();
    let mut migrated = 0;

    for case in cases {
        let id_caso = case.id_caso().to_string();

        let present = target
            .exists(&id_caso)
            .await
            .map_err(|e| target_unavailable(migrated, e))?;
        if present {
            debug!(%id_caso, "Already in target, skipping");
            continue;
        }

        match target.insert(case).await {
            Ok(_) => migrated += 1,
            Err(e) if e.is_duplicate_id() => {
                debug!(%id_caso, "Inserted concurrently, skipping");
            }
            Err(e) => return Err(target_unavailable(migrated, e)),
        }
    }

    info!(
        source = source.backend_name(),
        target = target.backend_name(),
        migrated,
        total,
        "Migration finished"
    );
    Ok(MigrationReport::completed(migrated, total))
}

/// Migrates the file store into `target`.
///
/// A missing source file means there is nothing to migrate.
pub async fn migrate_file_to_store(
    source: &FileBackend,
    target: &dyn CaseStorage,
) -> StorageResult<MigrationReport> {
    let contents = source
        .load()
        .await
        .map_err(|e| MigrationError::SourceUnreadable {
            message: e.to_string(),
        })?;
    if matches!(contents, FileContents::Missing) {
        info!(path = %source.path().display(), "No case file, nothing to migrate");
        return Ok(MigrationReport::nothing_to_migrate());
    }

    migrate(source, target).await
}

fn target_unavailable(migrated: usize, err: StorageError) -> StorageError {
    MigrationError::TargetUnavailable {
        migrated,
        message: err.to_string(),
    }
    .into()
}
