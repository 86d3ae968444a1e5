use anyhow::Result;
use tracing::info;

use crate::common::{ApiError, ProviderId};
use crate::domains::favorites::models::Favorite;
use crate::domains::providers::activities::with_services;
use crate::domains::providers::{Provider, ProviderListing};
use crate::kernel::ServerDeps;

const MAX_SESSION_ID_LEN: usize = 128;

/// Visitor session ids are opaque strings minted by the browser
pub fn validate_session_id(session_id: &str) -> Result<&str, ApiError> {
    let session_id = session_id.trim();
    if session_id.is_empty() || session_id.len() > MAX_SESSION_ID_LEN {
        return Err(ApiError::bad_request("invalid session id"));
    }
    Ok(session_id)
}

pub async fn list_favorites(session_id: &str, deps: &ServerDeps) -> Result<Vec<ProviderListing>> {
    let session_id = validate_session_id(session_id)?;
    let providers = Favorite::find_providers(session_id, &deps.db_pool).await?;
    with_services(providers, &deps.db_pool).await
}

/// Save an active provider for the session
pub async fn add_favorite(
    session_id: &str,
    provider_id: ProviderId,
    deps: &ServerDeps,
) -> Result<Favorite> {
    let session_id = validate_session_id(session_id)?;

    Provider::find_by_id(provider_id, &deps.db_pool)
        .await?
        .filter(|p| p.active)
        .ok_or_else(|| ApiError::not_found("provider not found"))?;

    let favorite = Favorite::add(session_id, provider_id, &deps.db_pool).await?;
    info!(session_id, provider_id = %provider_id, "Favorite saved");
    Ok(favorite)
}

pub async fn remove_favorite(
    session_id: &str,
    provider_id: ProviderId,
    deps: &ServerDeps,
) -> Result<()> {
    let session_id = validate_session_id(session_id)?;
    if !Favorite::remove(session_id, provider_id, &deps.db_pool).await? {
        return Err(ApiError::not_found("favorite not found").into());
    }
    info!(session_id, provider_id = %provider_id, "Favorite removed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_validation() {
        assert_eq!(validate_session_id(" abc-123 ").unwrap(), "abc-123");
        assert!(validate_session_id("   ").is_err());
        assert!(validate_session_id(&"x".repeat(129)).is_err());
    }
}
