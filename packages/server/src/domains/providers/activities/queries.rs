//! Provider read activities

use anyhow::Result;
use sqlx::PgPool;
use tracing::debug;

use crate::common::{ApiError, ProviderId};
use crate::domains::providers::data::ProviderListing;
use crate::domains::providers::models::{CategoryCount, Provider, ProviderService};
use crate::domains::providers::search::search;
use crate::kernel::ServerDeps;

/// Attach services to each provider, keeping the provider order
pub async fn with_services(providers: Vec<Provider>, pool: &PgPool) -> Result<Vec<ProviderListing>> {
    let ids: Vec<ProviderId> = providers.iter().map(|p| p.id).collect();
    let mut services = ProviderService::find_for_providers(&ids, pool).await?;

    Ok(providers
        .into_iter()
        .map(|provider| {
            let own = services.remove(&provider.id).unwrap_or_default();
            ProviderListing::new(provider, own)
        })
        .collect())
}

/// Active providers, optionally filtered by a search term
pub async fn list_providers(term: Option<&str>, deps: &ServerDeps) -> Result<Vec<ProviderListing>> {
    let providers = Provider::find_active(&deps.db_pool).await?;
    let listings = with_services(providers, &deps.db_pool).await?;
    let total = listings.len();

    let results = search(listings, term.unwrap_or_default());
    debug!(term = ?term, total, matched = results.len(), "Listed providers");
    Ok(results)
}

/// Active providers of one category, optionally filtered by a search term
pub async fn list_category_providers(
    category: &str,
    term: Option<&str>,
    deps: &ServerDeps,
) -> Result<Vec<ProviderListing>> {
    let providers = Provider::find_active_by_category(category, &deps.db_pool).await?;
    let listings = with_services(providers, &deps.db_pool).await?;

    let results = search(listings, term.unwrap_or_default());
    debug!(category, term = ?term, matched = results.len(), "Listed category providers");
    Ok(results)
}

pub async fn list_categories(deps: &ServerDeps) -> Result<Vec<CategoryCount>> {
    Provider::categories(&deps.db_pool).await
}

/// Public provider detail; inactive providers do not exist for visitors
pub async fn get_provider(id: ProviderId, deps: &ServerDeps) -> Result<ProviderListing> {
    let provider = Provider::find_by_id(id, &deps.db_pool)
        .await?
        .filter(|p| p.active)
        .ok_or_else(|| ApiError::not_found("provider not found"))?;

    let services = ProviderService::find_for_provider(provider.id, &deps.db_pool).await?;
    Ok(ProviderListing::new(provider, services))
}

/// Every provider with services, including inactive ones (admin)
pub async fn list_all_providers(deps: &ServerDeps) -> Result<Vec<ProviderListing>> {
    let providers = Provider::find_all(&deps.db_pool).await?;
    with_services(providers, &deps.db_pool).await
}
