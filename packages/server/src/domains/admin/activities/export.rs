//! CSV export of assistant feedback.

use anyhow::{Context, Result};
use csv::{QuoteStyle, WriterBuilder};
use tracing::info;

use crate::common::ApiError;
use crate::domains::assistant::{FeedbackFilter, FeedbackRecord};
use crate::kernel::ServerDeps;

pub const NO_ROWS_MESSAGE: &str = "No feedback records match the current filter";

const HEADER: [&str; 9] = [
    "id",
    "session_id",
    "question",
    "sources_used",
    "answered",
    "useful",
    "comment",
    "created_at",
    "voted_at",
];

/// Every value quoted; nested fields as their JSON text
pub fn feedback_to_csv(records: &[FeedbackRecord]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;

    for record in records {
        let sources = serde_json::to_string(&record.sources_used.0)?;
        writer.write_record([
            record.id.to_string(),
            record.session_id.clone().unwrap_or_default(),
            record.question.clone(),
            sources,
            record.answered.to_string(),
            record.useful.map(|u| u.to_string()).unwrap_or_default(),
            record.comment.clone().unwrap_or_default(),
            record.created_at.to_rfc3339(),
            record.voted_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV: {}", e.error()))?;
    String::from_utf8(bytes).context("CSV is not valid UTF-8")
}

/// CSV for the export download; no rows is a 404 with a readable message
pub fn export_document(records: &[FeedbackRecord]) -> Result<String> {
    if records.is_empty() {
        return Err(ApiError::not_found(NO_ROWS_MESSAGE).into());
    }
    feedback_to_csv(records)
}

/// Unpaginated export under `filter`
pub async fn export_feedback_csv(filter: FeedbackFilter, deps: &ServerDeps) -> Result<String> {
    let records = FeedbackRecord::find_all(filter, &deps.db_pool).await?;
    let csv = export_document(&records)?;
    info!(filter = ?filter, rows = records.len(), "Exported feedback");
    Ok(csv)
}

/// `feedback_{filter}_{YYYYMMDD}.csv`
pub fn export_filename(filter: FeedbackFilter, date: chrono::NaiveDate) -> String {
    let label = match filter {
        FeedbackFilter::All => "all",
        FeedbackFilter::Useful => "useful",
        FeedbackFilter::NotUseful => "not_useful",
    };
    format!("feedback_{}_{}.csv", label, date.format("%Y%m%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::FeedbackId;
    use chrono::{TimeZone, Utc};
    use sqlx::types::Json;

    fn record(useful: Option<bool>, comment: Option<&str>) -> FeedbackRecord {
        FeedbackRecord {
            id: FeedbackId::new(),
            session_id: Some("sesion-1".into()),
            question: "¿Quién renta \"sillas\", mesas?".into(),
            sources_used: Json(vec!["a".into(), "b".into()]),
            answered: true,
            useful,
            comment: comment.map(str::to_string),
            created_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
            voted_at: None,
        }
    }

    #[test]
    fn test_every_value_quoted_and_sources_as_json() {
        let csv = feedback_to_csv(&[record(Some(true), None)]).unwrap();
        let mut lines = csv.lines();

        assert_eq!(
            lines.next().unwrap(),
            r#""id","session_id","question","sources_used","answered","useful","comment","created_at","voted_at""#
        );

        let row = lines.next().unwrap();
        assert!(row.contains(r#""¿Quién renta ""sillas"", mesas?""#));
        assert!(row.contains(r#""[""a"",""b""]""#));
        assert!(row.contains(r#","true","true","","2026-03-01T12:00:00+00:00","""#));
    }

    #[test]
    fn test_unvoted_is_blank_not_false() {
        let csv = feedback_to_csv(&[record(None, Some("ok"))]).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert!(row.contains(r#","true","","ok","#));
    }

    #[test]
    fn test_no_rows_is_not_found_without_a_file() {
        let err = export_document(&[]).unwrap_err();
        match err.downcast_ref::<ApiError>() {
            Some(ApiError::NotFound(message)) => assert_eq!(message, NO_ROWS_MESSAGE),
            other => panic!("unexpected error: {other:?}"),
        }

        let csv = export_document(&[record(Some(false), None)]).unwrap();
        assert_eq!(csv.lines().count(), 2);
    }

    #[test]
    fn test_filename() {
        let date = chrono::NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert_eq!(
            export_filename(FeedbackFilter::NotUseful, date),
            "feedback_not_useful_20261018.csv"
        );
    }
}
