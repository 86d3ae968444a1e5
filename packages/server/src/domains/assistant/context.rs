//! Directory context handed to the language model.

use std::collections::HashSet;

use anyhow::Result;

use crate::domains::providers::activities::with_services;
use crate::domains::providers::search::matches;
use crate::domains::providers::{Provider, ProviderListing};
use crate::kernel::ServerDeps;

/// Providers described to the model per question
pub const MAX_CONTEXT_PROVIDERS: usize = 8;

const MIN_KEYWORD_LEN: usize = 4;

const STOPWORDS: &[&str] = &[
    "para", "como", "cual", "cuál", "donde", "dónde", "quien", "quién", "este", "esta", "estos",
    "estas", "tiene", "tienen", "hay", "algun", "algún", "alguna", "busco", "necesito", "quiero",
    "puedo", "evento", "eventos", "que", "qué", "una", "unos", "unas", "con", "por", "del", "los",
    "las", "más", "mas", "muy", "cuanto", "cuánto", "cuesta", "precio", "precios",
];

/// Lower-cased words of the question worth searching for, each once, in
/// order of first appearance
pub fn keywords(question: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    question
        .split(|c: char| !c.is_alphanumeric())
        .map(str::to_lowercase)
        .filter(|w| w.chars().count() >= MIN_KEYWORD_LEN && !STOPWORDS.contains(&w.as_str()))
        .filter(|w| seen.insert(w.clone()))
        .collect()
}

/// Providers matching any keyword, in directory order, capped
pub fn select_matching(listings: Vec<ProviderListing>, keywords: &[String]) -> Vec<ProviderListing> {
    if keywords.is_empty() {
        return Vec::new();
    }
    listings
        .into_iter()
        .filter(|listing| keywords.iter().any(|k| matches(listing, k)))
        .take(MAX_CONTEXT_PROVIDERS)
        .collect()
}

/// Active providers relevant to `question`, falling back to featured ones
pub async fn load_context(question: &str, deps: &ServerDeps) -> Result<Vec<ProviderListing>> {
    let active = Provider::find_active(&deps.db_pool).await?;
    let listings = with_services(active, &deps.db_pool).await?;

    let selected = select_matching(listings, &keywords(question));
    if !selected.is_empty() {
        return Ok(selected);
    }

    let featured = Provider::find_featured(MAX_CONTEXT_PROVIDERS as i64, &deps.db_pool).await?;
    with_services(featured, &deps.db_pool).await
}
