use anyhow::Result;
use serde::Serialize;
use tracing::debug;

use crate::common::ApiError;
use crate::domains::admin::models::DiagnosticTable;
use crate::kernel::ServerDeps;

pub const DEFAULT_SAMPLE_ROWS: i64 = 10;
pub const MAX_SAMPLE_ROWS: i64 = 100;

#[derive(Debug, Clone, Serialize)]
pub struct TableCount {
    pub table: &'static str,
    pub rows: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableSample {
    pub table: &'static str,
    pub rows: i64,
    pub sample: Vec<serde_json::Value>,
}

/// Row count of every inspectable table
pub async fn table_counts(deps: &ServerDeps) -> Result<Vec<TableCount>> {
    let counts = futures::future::try_join_all(DiagnosticTable::ALL.into_iter().map(|table| {
        let pool = &deps.db_pool;
        async move {
            let rows = table.row_count(pool).await?;
            Ok::<_, anyhow::Error>(TableCount {
                table: table.table_name(),
                rows,
            })
        }
    }))
    .await?;

    debug!(tables = counts.len(), "Collected table counts");
    Ok(counts)
}

/// Count plus newest rows of one table
pub async fn table_sample(name: &str, limit: Option<i64>, deps: &ServerDeps) -> Result<TableSample> {
    let table = DiagnosticTable::parse(name)
        .ok_or_else(|| ApiError::not_found(format!("unknown table {}", name)))?;
    let limit = limit.unwrap_or(DEFAULT_SAMPLE_ROWS).clamp(1, MAX_SAMPLE_ROWS);

    let (rows, sample) = tokio::try_join!(
        table.row_count(&deps.db_pool),
        table.sample_rows(limit, &deps.db_pool),
    )?;

    Ok(TableSample {
        table: table.table_name(),
        rows,
        sample,
    })
}
