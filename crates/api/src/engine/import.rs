//! CSV import of wins.
//!
//! Rows are processed one at a time; every failure is recorded against its
//! row number and the batch continues. Per-row audit entries are skipped in
//! favor of a single summary entry.

use itam_core::audit::{actions, bulk_import_payload, entity_types, AuditActor};
use itam_core::csv_import::{CsvRows, ImportReport, WinCsvRow, WIN_MIN_COLUMNS};
use itam_core::error::CoreError;
use itam_db::models::win::CreateWin;
use itam_db::repositories::WinRepo;

use super::crud::CrudService;
use crate::error::{AppError, AppResult};

/// Message stored against a row whose insert failed.
fn row_error_message(err: &AppError) -> String {
    match err {
        AppError::Core(CoreError::Validation(msg)) | AppError::Core(CoreError::Conflict(msg)) => {
            msg.clone()
        }
        other => {
            tracing::warn!(error = %other, "Win import row failed to insert");
            "failed to save row".to_string()
        }
    }
}

/// Import semicolon-delimited wins from `data`.
///
/// Fails as a whole only when the file is empty or its header is too
/// narrow; nothing has been inserted at that point.
pub async fn import_wins(
    service: &CrudService<WinRepo>,
    data: &[u8],
    actor: &AuditActor,
) -> AppResult<ImportReport> {
    let rows = CsvRows::open(data, WIN_MIN_COLUMNS)?;
    let mut report = ImportReport::default();

    for (row, record) in rows {
        let record = match record {
            Ok(record) => record,
            Err(msg) => {
                report.record_skipped(row, msg);
                continue;
            }
        };
        let input: CreateWin = match WinCsvRow::from_record(&record) {
            Ok(parsed) => parsed.into(),
            Err(msg) => {
                report.record_skipped(row, msg);
                continue;
            }
        };
        match service.insert_without_audit(&input).await {
            Ok(_) => report.record_imported(),
            Err(e) => report.record_skipped(row, row_error_message(&e)),
        }
    }

    if report.imported > 0 {
        service
            .audit()
            .record(
                actor,
                actions::CREATE,
                entity_types::WIN,
                None,
                Some(bulk_import_payload(report.total, report.imported, report.skipped)),
            )
            .await;
        service.invalidate_cache().await;
    }

    tracing::info!(
        total = report.total,
        imported = report.imported,
        skipped = report.skipped,
        "Win import finished"
    );
    Ok(report)
}
