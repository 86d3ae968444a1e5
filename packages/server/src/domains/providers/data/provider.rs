use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::common::{ApiError, ProviderId, ServiceId};
use crate::domains::providers::models::{NewService, Provider, ProviderProfile, ProviderService};

/// Service as shown nested under its provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceData {
    pub id: ServiceId,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
}

impl From<ProviderService> for ServiceData {
    fn from(service: ProviderService) -> Self {
        Self {
            id: service.id,
            name: service.name,
            description: service.description,
            price: service.price,
        }
    }
}

/// Provider with its services, the unit the search engine filters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderListing {
    pub id: ProviderId,
    pub name: String,
    pub description: Option<String>,
    pub city: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub active: bool,
    pub premium: bool,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub services: Vec<ServiceData>,
}

impl ProviderListing {
    pub fn new(provider: Provider, services: Vec<ProviderService>) -> Self {
        Self {
            id: provider.id,
            name: provider.name,
            description: provider.description,
            city: provider.city,
            category: provider.category,
            image_url: provider.image_url,
            phone: provider.phone,
            email: provider.email,
            website: provider.website,
            active: provider.active,
            premium: provider.premium,
            featured: provider.featured,
            created_at: provider.created_at,
            services: services.into_iter().map(ServiceData::from).collect(),
        }
    }
}

/// One service line of the registration or self-edit form
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceInput {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub price: Decimal,
}

/// Registration form
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterProviderInput {
    pub name: String,
    pub description: Option<String>,
    pub city: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    #[serde(default)]
    pub services: Vec<ServiceInput>,
}

/// Self-edit form; replaces the profile and the whole service list
pub type UpdateProviderInput = RegisterProviderInput;

/// Returned once at registration; the edit token is never shown again
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationData {
    pub registration_id: ProviderId,
    pub edit_token: String,
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ServiceInput {
    fn validate(self, index: usize) -> Result<NewService, ApiError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ApiError::bad_request(format!(
                "service {} requires a name",
                index + 1
            )));
        }
        if self.price < Decimal::ZERO {
            return Err(ApiError::bad_request(format!(
                "service \"{}\" has a negative price",
                name
            )));
        }
        Ok(NewService {
            name,
            description: clean(self.description),
            price: self.price,
        })
    }
}

impl RegisterProviderInput {
    /// Trim text, drop blank optionals and check the required fields
    pub fn validate(self) -> Result<(ProviderProfile, Vec<NewService>), ApiError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ApiError::bad_request("name is required"));
        }

        let services = self
            .services
            .into_iter()
            .enumerate()
            .map(|(i, s)| s.validate(i))
            .collect::<Result<Vec<_>, _>>()?;

        let profile = ProviderProfile {
            name,
            description: clean(self.description),
            city: clean(self.city),
            category: clean(self.category),
            image_url: clean(self.image_url),
            phone: clean(self.phone),
            email: clean(self.email),
            website: clean(self.website),
        };

        Ok((profile, services))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(value: serde_json::Value) -> RegisterProviderInput {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_validate_trims_and_drops_blanks() {
        let (profile, services) = input(json!({
            "name": "  Snacks Charlitron ",
            "description": "   ",
            "city": "Saltillo",
            "services": [{ "name": "Barra de elotes", "price": "1500.50" }]
        }))
        .validate()
        .unwrap();

        assert_eq!(profile.name, "Snacks Charlitron");
        assert!(profile.description.is_none());
        assert_eq!(profile.city.as_deref(), Some("Saltillo"));
        assert_eq!(services[0].price, Decimal::new(150050, 2));
    }

    #[test]
    fn test_missing_price_defaults_to_zero() {
        let (_, services) = input(json!({
            "name": "Charlie Production",
            "services": [{ "name": "Video" }]
        }))
        .validate()
        .unwrap();
        assert!(services[0].price.is_zero());
    }

    #[test]
    fn test_name_required() {
        let err = input(json!({ "name": " " })).validate().unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn test_service_name_required() {
        let err = input(json!({
            "name": "Charlie Production",
            "services": [{ "name": "", "price": 10 }]
        }))
        .validate()
        .unwrap_err();
        assert_eq!(err.to_string(), "service 1 requires a name");
    }

    #[test]
    fn test_negative_price_rejected() {
        let err = input(json!({
            "name": "Charlie Production",
            "services": [{ "name": "Video", "price": -1 }]
        }))
        .validate()
        .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
