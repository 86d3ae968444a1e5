//! Provider write activities

use anyhow::{Context, Result};
use tracing::{info, warn};
use uuid::Uuid;

use crate::common::utils::{digests_match, sha256_hex};
use crate::common::{ApiError, ProviderId};
use crate::domains::providers::data::{
    ProviderListing, RegisterProviderInput, RegistrationData, UpdateProviderInput,
};
use crate::domains::providers::models::{Provider, ProviderFlag, ProviderService};
use crate::kernel::ServerDeps;

/// Register a new provider (inactive until an admin approves it)
///
/// The provider and its services are written in one transaction. The returned
/// id is the registration id later threaded through checkout metadata.
pub async fn register_provider(
    input: RegisterProviderInput,
    deps: &ServerDeps,
) -> Result<RegistrationData> {
    let (profile, services) = input.validate()?;
    info!(name = %profile.name, services = services.len(), "Registering provider");

    let id = ProviderId::new();
    let edit_token = Uuid::new_v4().simple().to_string();

    let mut tx = deps.db_pool.begin().await?;
    Provider::insert(id, &profile, &sha256_hex(&edit_token), &mut tx)
        .await
        .context("Failed to insert provider")?;
    ProviderService::replace_for_provider(id, &services, &mut tx)
        .await
        .context("Failed to insert provider services")?;
    tx.commit().await?;

    info!(provider_id = %id, "Provider registered, pending approval");

    Ok(RegistrationData {
        registration_id: id,
        edit_token,
    })
}

/// Provider self-edit, authorized by the token handed out at registration
pub async fn update_own_provider(
    id: ProviderId,
    edit_token: &str,
    input: UpdateProviderInput,
    deps: &ServerDeps,
) -> Result<ProviderListing> {
    let (profile, services) = input.validate()?;

    let provider = Provider::find_by_id(id, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("provider not found"))?;

    if !digests_match(&sha256_hex(edit_token.trim()), &provider.edit_token_hash) {
        warn!(provider_id = %id, "Rejected provider edit with wrong token");
        return Err(ApiError::Forbidden("invalid edit token".into()).into());
    }

    info!(provider_id = %id, services = services.len(), "Updating provider profile");

    let mut tx = deps.db_pool.begin().await?;
    let provider = Provider::update_profile(id, &profile, &mut tx).await?;
    let services = ProviderService::replace_for_provider(id, &services, &mut tx).await?;
    tx.commit().await?;

    Ok(ProviderListing::new(provider, services))
}

/// Set an admin-controlled flag (approve, deactivate, premium, featured)
pub async fn set_provider_flag(
    id: ProviderId,
    flag: ProviderFlag,
    value: bool,
    deps: &ServerDeps,
) -> Result<Provider> {
    info!(provider_id = %id, flag = ?flag, value, "Setting provider flag");

    Provider::set_flag(id, flag, value, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("provider not found").into())
}

pub async fn approve_provider(id: ProviderId, deps: &ServerDeps) -> Result<Provider> {
    set_provider_flag(id, ProviderFlag::Active, true, deps).await
}

/// Providers are deactivated, never deleted
pub async fn deactivate_provider(id: ProviderId, deps: &ServerDeps) -> Result<Provider> {
    set_provider_flag(id, ProviderFlag::Active, false, deps).await
}
