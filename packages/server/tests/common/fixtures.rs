//! Test fixtures built through the domain activities.

use anyhow::Result;
use rust_decimal::Decimal;

use eventos_core::common::ProviderId;
use eventos_core::domains::assistant::FeedbackRecord;
use eventos_core::domains::providers::activities::{approve_provider, register_provider};
use eventos_core::domains::providers::data::provider::ServiceInput;
use eventos_core::domains::providers::{RegisterProviderInput, RegistrationData};
use eventos_core::kernel::ServerDeps;
use sqlx::PgPool;

pub fn provider_input(name: &str, category: &str, services: &[(&str, &str)]) -> RegisterProviderInput {
    RegisterProviderInput {
        name: name.to_string(),
        description: Some(format!("{} en San Luis Potosí", name)),
        city: Some("San Luis Potosí".to_string()),
        category: Some(category.to_string()),
        image_url: None,
        phone: Some("4440000000".to_string()),
        email: None,
        website: None,
        services: services
            .iter()
            .map(|(name, description)| ServiceInput {
                name: name.to_string(),
                description: Some(description.to_string()),
                price: Decimal::new(150000, 2),
            })
            .collect(),
    }
}

/// Registered and approved provider
pub async fn active_provider(
    deps: &ServerDeps,
    name: &str,
    category: &str,
    services: &[(&str, &str)],
) -> Result<ProviderId> {
    let registration = register_provider(provider_input(name, category, services), deps).await?;
    approve_provider(registration.registration_id, deps).await?;
    Ok(registration.registration_id)
}

pub async fn pending_provider(deps: &ServerDeps, name: &str) -> Result<RegistrationData> {
    register_provider(provider_input(name, "Banquetes", &[]), deps).await
}

/// Logged assistant question, optionally already voted on
pub async fn feedback_row(pool: &PgPool, question: &str, vote: Option<bool>) -> Result<FeedbackRecord> {
    let record = FeedbackRecord::log(Some("sesion-test"), question, vec![], true, pool).await?;
    match vote {
        Some(useful) => {
            FeedbackRecord::record_vote(record.id, useful, None, pool).await?;
            Ok(FeedbackRecord::find_by_id(record.id, pool)
                .await?
                .expect("feedback row vanished"))
        }
        None => Ok(record),
    }
}
