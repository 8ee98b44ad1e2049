use energy_core::model::{ModuleId, ModuleProgress};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn parse_module_id(s: &str) -> Result<ModuleId, StorageError> {
    s.parse::<ModuleId>()
        .map_err(|_| StorageError::Serialization(format!("invalid module_id: {s}")))
}

pub(crate) fn score_from_i64(v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid score: {v}")))
}

pub(crate) fn sequence_to_i64(idx: usize) -> Result<i64, StorageError> {
    i64::try_from(idx).map_err(|_| StorageError::Serialization("completed_seq overflow".into()))
}

/// One `module_progress` row: the module, its progress and its completion slot.
pub(crate) fn map_module_row(
    row: &SqliteRow,
) -> Result<(ModuleId, ModuleProgress, Option<i64>), StorageError> {
    let module_id: String = row.try_get("module_id").map_err(ser)?;
    let id = parse_module_id(&module_id)?;

    let score = score_from_i64(row.try_get::<i64, _>("score").map_err(ser)?)?;
    let completed = row.try_get::<i64, _>("completed").map_err(ser)? != 0;
    let seq: Option<i64> = row.try_get("completed_seq").map_err(ser)?;

    Ok((id, ModuleProgress { score, completed }, seq))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_ids_parse_from_storage_form() {
        for id in ModuleId::ALL {
            assert_eq!(parse_module_id(id.as_str()).unwrap(), id);
        }
        assert!(matches!(
            parse_module_id("tidal"),
            Err(StorageError::Serialization(_))
        ));
    }

    #[test]
    fn negative_scores_are_rejected() {
        assert!(score_from_i64(-1).is_err());
        assert_eq!(score_from_i64(100).unwrap(), 100);
    }
}
