use anyhow::Result;
use serde::Serialize;
use sqlx::PgPool;

/// Tables the diagnostics screen may inspect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticTable {
    Providers,
    ProviderServices,
    ProviderPlans,
    BlogPosts,
    AiUsageTracking,
    Favorites,
}

impl DiagnosticTable {
    pub const ALL: [DiagnosticTable; 6] = [
        DiagnosticTable::Providers,
        DiagnosticTable::ProviderServices,
        DiagnosticTable::ProviderPlans,
        DiagnosticTable::BlogPosts,
        DiagnosticTable::AiUsageTracking,
        DiagnosticTable::Favorites,
    ];

    pub fn table_name(self) -> &'static str {
        match self {
            DiagnosticTable::Providers => "providers",
            DiagnosticTable::ProviderServices => "provider_services",
            DiagnosticTable::ProviderPlans => "provider_plans",
            DiagnosticTable::BlogPosts => "blog_posts",
            DiagnosticTable::AiUsageTracking => "ai_usage_tracking",
            DiagnosticTable::Favorites => "favorites",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.table_name() == name)
    }

    pub async fn row_count(self, pool: &PgPool) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", self.table_name()))
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Newest rows as JSON objects, secrets stripped
    pub async fn sample_rows(self, limit: i64, pool: &PgPool) -> Result<Vec<serde_json::Value>> {
        let rows: Vec<serde_json::Value> = sqlx::query_scalar(&format!(
            r#"
            SELECT to_jsonb(t) - 'edit_token_hash'
            FROM (SELECT * FROM {} ORDER BY created_at DESC LIMIT $1) t
            "#,
            self.table_name()
        ))
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_only_known_tables() {
        assert_eq!(
            DiagnosticTable::parse("ai_usage_tracking"),
            Some(DiagnosticTable::AiUsageTracking)
        );
        assert_eq!(DiagnosticTable::parse("pg_shadow"), None);
        assert_eq!(DiagnosticTable::parse("providers; DROP TABLE x"), None);
    }

    #[test]
    fn test_names_round_trip() {
        for table in DiagnosticTable::ALL {
            assert_eq!(DiagnosticTable::parse(table.table_name()), Some(table));
        }
    }
}
