//! Read-mostly endpoints behind the public site

use axum::{
    extract::{Extension, Path, Query},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::common::{ApiError, ApiResult, ProviderId};
use crate::config::SocialLinks;
use crate::domains::plans::{list_plans, PlanData};
use crate::domains::providers::activities::{
    get_provider, list_categories, list_category_providers, list_providers, register_provider,
    update_own_provider,
};
use crate::domains::providers::models::CategoryCount;
use crate::domains::providers::{ProviderListing, RegisterProviderInput, RegistrationData};
use crate::server::app::AxumAppState;

pub const EDIT_TOKEN_HEADER: &str = "x-edit-token";

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

pub async fn categories_handler(
    Extension(state): Extension<AxumAppState>,
) -> ApiResult<Json<Vec<CategoryCount>>> {
    Ok(Json(list_categories(&state.server_deps).await?))
}

pub async fn category_providers_handler(
    Extension(state): Extension<AxumAppState>,
    Path(category): Path<String>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<ProviderListing>>> {
    let providers =
        list_category_providers(&category, query.q.as_deref(), &state.server_deps).await?;
    Ok(Json(providers))
}

pub async fn providers_handler(
    Extension(state): Extension<AxumAppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<ProviderListing>>> {
    Ok(Json(list_providers(query.q.as_deref(), &state.server_deps).await?))
}

pub async fn provider_handler(
    Extension(state): Extension<AxumAppState>,
    Path(id): Path<ProviderId>,
) -> ApiResult<Json<ProviderListing>> {
    Ok(Json(get_provider(id, &state.server_deps).await?))
}

pub async fn register_provider_handler(
    Extension(state): Extension<AxumAppState>,
    Json(input): Json<RegisterProviderInput>,
) -> ApiResult<Json<RegistrationData>> {
    Ok(Json(register_provider(input, &state.server_deps).await?))
}

pub async fn update_provider_handler(
    Extension(state): Extension<AxumAppState>,
    Path(id): Path<ProviderId>,
    headers: HeaderMap,
    Json(input): Json<RegisterProviderInput>,
) -> ApiResult<Json<ProviderListing>> {
    let token = headers
        .get(EDIT_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("missing edit token".into()))?;

    Ok(Json(
        update_own_provider(id, token, input, &state.server_deps).await?,
    ))
}

pub async fn plans_handler(
    Extension(state): Extension<AxumAppState>,
) -> ApiResult<Json<Vec<PlanData>>> {
    Ok(Json(list_plans(&state.server_deps).await?))
}

#[derive(Debug, Serialize)]
pub struct LegalNotice {
    pub title: &'static str,
    pub sections: Vec<LegalSection>,
}

#[derive(Debug, Serialize)]
pub struct LegalSection {
    pub heading: &'static str,
    pub body: &'static str,
}

pub fn legal_notice() -> LegalNotice {
    LegalNotice {
        title: "Aviso legal y de privacidad",
        sections: vec![
            LegalSection {
                heading: "Responsable",
                body: "Charlitron Eventos 360 opera este directorio de proveedores de \
                       servicios para eventos en San Luis Potosí.",
            },
            LegalSection {
                heading: "Datos que recabamos",
                body: "Los datos que los proveedores publican al registrarse y las preguntas \
                       enviadas al asistente, que se guardan de forma anónima para mejorar \
                       el servicio.",
            },
            LegalSection {
                heading: "Pagos",
                body: "Los pagos de planes se procesan a través de un proveedor externo; \
                       este sitio no almacena datos de tarjetas.",
            },
            LegalSection {
                heading: "Contenido de terceros",
                body: "La información de cada proveedor es responsabilidad de quien la \
                       publica. Eventos 360 no garantiza precios ni disponibilidad.",
            },
        ],
    }
}

pub async fn legal_handler() -> Json<LegalNotice> {
    Json(legal_notice())
}

/// Public site settings and which optional features are live
#[derive(Debug, Serialize)]
pub struct SiteInfo {
    pub site_url: String,
    pub social_links: SocialLinks,
    pub assistant: bool,
    pub storage: bool,
    pub checkout: bool,
}

pub async fn site_handler(Extension(state): Extension<AxumAppState>) -> Json<SiteInfo> {
    let deps = &state.server_deps;
    Json(SiteInfo {
        site_url: deps.settings.site_url.clone(),
        social_links: deps.settings.social_links.clone(),
        assistant: deps.ai.is_some(),
        storage: deps.storage.is_some(),
        checkout: deps.payments.is_some(),
    })
}
