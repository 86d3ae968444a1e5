//! In-memory provider search.
//!
//! A provider matches a term when its name, its description, or the name or
//! description of any of its services contains the term. Matching is plain
//! substring containment after lower-casing both sides. The filter is stable:
//! matching providers keep their relative order and nothing is re-ranked.

use crate::domains::providers::data::ProviderListing;

/// Filter `providers` by `term`.
///
/// A term that is empty or only whitespace returns the input unchanged. Any
/// other term is lower-cased and used as typed, surrounding spaces included.
pub fn search(providers: Vec<ProviderListing>, term: &str) -> Vec<ProviderListing> {
    if term.trim().is_empty() {
        return providers;
    }

    let needle = term.to_lowercase();
    providers
        .into_iter()
        .filter(|provider| matches(provider, &needle))
        .collect()
}

/// Whether `provider` contains `needle`, which must already be lower-case.
pub fn matches(provider: &ProviderListing, needle: &str) -> bool {
    contains(Some(&provider.name), needle)
        || contains(provider.description.as_ref(), needle)
        || provider.services.iter().any(|service| {
            contains(Some(&service.name), needle) || contains(service.description.as_ref(), needle)
        })
}

fn contains(field: Option<&String>, needle: &str) -> bool {
    field.is_some_and(|value| value.to_lowercase().contains(needle))
}
