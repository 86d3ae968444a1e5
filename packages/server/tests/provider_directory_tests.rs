//! Provider registration, approval, self-edit, search and favorites.
//!
//! Needs Docker: `cargo test -- --ignored`

mod common;

use axum::http::{Method, StatusCode};
use eventos_core::common::ApiError;
use eventos_core::domains::favorites::activities::{add_favorite, list_favorites, remove_favorite};
use eventos_core::domains::providers::activities::{
    deactivate_provider, get_provider, list_categories, list_category_providers, list_providers,
    update_own_provider,
};
use eventos_core::kernel::TestDependencies;
use serde_json::json;
use test_context::test_context;

use crate::common::{active_provider, pending_provider, provider_input, TestHarness};

fn api_error(err: &anyhow::Error) -> Option<&ApiError> {
    err.downcast_ref::<ApiError>()
}

#[test_context(TestHarness)]
#[tokio::test]
#[ignore = "needs Docker"]
async fn search_scenario(ctx: &TestHarness) {
    let deps = ctx.deps(TestDependencies::new());
    active_provider(
        &deps,
        "Snacks Charlitron",
        "Snacks",
        &[("Carrito de elotes", "Elotes y esquites")],
    )
    .await
    .unwrap();
    active_provider(
        &deps,
        "Charlie Production",
        "Foto y video",
        &[("Cobertura", "Fotografía y video de bodas")],
    )
    .await
    .unwrap();

    let names = |listings: Vec<eventos_core::domains::providers::ProviderListing>| {
        listings.into_iter().map(|p| p.name).collect::<Vec<_>>()
    };

    assert_eq!(
        names(list_providers(Some("elotes"), &deps).await.unwrap()),
        vec!["Snacks Charlitron"]
    );
    assert_eq!(
        names(list_providers(Some("video"), &deps).await.unwrap()),
        vec!["Charlie Production"]
    );
    assert!(list_providers(Some("zzz"), &deps).await.unwrap().is_empty());
    assert_eq!(list_providers(None, &deps).await.unwrap().len(), 2);
}

#[test_context(TestHarness)]
#[tokio::test]
#[ignore = "needs Docker"]
async fn services_keep_submitted_order(ctx: &TestHarness) {
    let deps = ctx.deps(TestDependencies::new());
    let id = active_provider(
        &deps,
        "Eventos Zacatecas",
        "Banquetes",
        &[
            ("Taquiza", "Tacos al pastor"),
            ("Barra de café", "Café de olla"),
            ("Mesa de dulces", "Dulces típicos"),
        ],
    )
    .await
    .unwrap();

    let service_names = |services: &[eventos_core::domains::providers::ServiceData]| {
        services.iter().map(|s| s.name.clone()).collect::<Vec<_>>()
    };

    let detail = get_provider(id, &deps).await.unwrap();
    assert_eq!(
        service_names(&detail.services),
        vec!["Taquiza", "Barra de café", "Mesa de dulces"]
    );

    let listed = list_providers(None, &deps).await.unwrap();
    assert_eq!(
        service_names(&listed[0].services),
        vec!["Taquiza", "Barra de café", "Mesa de dulces"]
    );
}

#[test_context(TestHarness)]
#[tokio::test]
#[ignore = "needs Docker"]
async fn pending_providers_stay_hidden_until_approved(ctx: &TestHarness) {
    let deps = ctx.deps(TestDependencies::new());
    let registration = pending_provider(&deps, "Banquetes Doña Lupe").await.unwrap();
    let id = registration.registration_id;

    let err = get_provider(id, &deps).await.unwrap_err();
    assert!(matches!(api_error(&err), Some(ApiError::NotFound(_))));
    assert!(list_providers(None, &deps).await.unwrap().is_empty());

    let response = ctx
        .api(TestDependencies::new())
        .as_admin()
        .request(Method::POST, &format!("/api/admin/providers/{}/approve", id))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["active"], json!(true));

    assert_eq!(get_provider(id, &deps).await.unwrap().name, "Banquetes Doña Lupe");

    deactivate_provider(id, &deps).await.unwrap();
    assert!(get_provider(id, &deps).await.is_err());
}

#[test_context(TestHarness)]
#[tokio::test]
#[ignore = "needs Docker"]
async fn registration_over_http_validates_prices(ctx: &TestHarness) {
    let api = ctx.api(TestDependencies::new());

    let bad = api
        .post_json(
            "/api/providers/register",
            json!({
                "name": "Sillas SLP",
                "services": [{"name": "Silla Tiffany", "price": "-5"}]
            }),
        )
        .await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);

    let ok = api
        .post_json(
            "/api/providers/register",
            json!({
                "name": "Sillas SLP",
                "category": "Mobiliario",
                "services": [{"name": "Silla Tiffany", "price": "35.50"}]
            }),
        )
        .await;
    assert_eq!(ok.status, StatusCode::OK);
    let body = ok.json();
    assert!(body["registration_id"].is_string());
    assert_eq!(body["edit_token"].as_str().unwrap().len(), 32);
}

#[test_context(TestHarness)]
#[tokio::test]
#[ignore = "needs Docker"]
async fn self_edit_requires_the_registration_token(ctx: &TestHarness) {
    let deps = ctx.deps(TestDependencies::new());
    let registration = pending_provider(&deps, "Luz y Sonido Potosino").await.unwrap();
    let id = registration.registration_id;

    let err = update_own_provider(
        id,
        "not-the-token",
        provider_input("Intruso", "Audio", &[]),
        &deps,
    )
    .await
    .unwrap_err();
    assert!(matches!(api_error(&err), Some(ApiError::Forbidden(_))));

    let updated = update_own_provider(
        id,
        &registration.edit_token,
        provider_input(
            "Luz y Sonido Potosino",
            "Audio e iluminación",
            &[("DJ", "Cuatro horas"), ("Pista iluminada", "6x6 m")],
        ),
        &deps,
    )
    .await
    .unwrap();
    assert_eq!(updated.category.as_deref(), Some("Audio e iluminación"));
    assert_eq!(updated.services.len(), 2);

    let missing_header = ctx
        .api(TestDependencies::new())
        .json(
            Method::PUT,
            &format!("/api/providers/{}", id),
            json!({"name": "Sin token"}),
        )
        .await;
    assert_eq!(missing_header.status, StatusCode::UNAUTHORIZED);
}

#[test_context(TestHarness)]
#[tokio::test]
#[ignore = "needs Docker"]
async fn categories_group_active_providers(ctx: &TestHarness) {
    let deps = ctx.deps(TestDependencies::new());
    active_provider(&deps, "Pasteles Ana", "Repostería", &[]).await.unwrap();
    active_provider(&deps, "Cupcakes Bety", "Repostería", &[]).await.unwrap();
    active_provider(&deps, "Mariachi Real", "Música", &[]).await.unwrap();
    pending_provider(&deps, "Pendiente").await.unwrap();

    let categories = list_categories(&deps).await.unwrap();
    let reposteria = categories
        .iter()
        .find(|c| c.category == "Repostería")
        .unwrap();
    assert_eq!(reposteria.providers, 2);
    assert!(categories.iter().all(|c| c.category != "Banquetes"));

    let bakers = list_category_providers("repostería", Some("bety"), &deps)
        .await
        .unwrap();
    assert_eq!(bakers.len(), 1);
    assert_eq!(bakers[0].name, "Cupcakes Bety");
}

#[test_context(TestHarness)]
#[tokio::test]
#[ignore = "needs Docker"]
async fn favorites_per_session(ctx: &TestHarness) {
    let deps = ctx.deps(TestDependencies::new());
    let mariachi = active_provider(&deps, "Mariachi Real", "Música", &[]).await.unwrap();
    let pending = pending_provider(&deps, "Pendiente").await.unwrap();

    add_favorite("sesion-a", mariachi, &deps).await.unwrap();
    // Saving twice is harmless
    add_favorite("sesion-a", mariachi, &deps).await.unwrap();

    let err = add_favorite("sesion-a", pending.registration_id, &deps)
        .await
        .unwrap_err();
    assert!(matches!(api_error(&err), Some(ApiError::NotFound(_))));

    assert_eq!(list_favorites("sesion-a", &deps).await.unwrap().len(), 1);
    assert!(list_favorites("sesion-b", &deps).await.unwrap().is_empty());

    remove_favorite("sesion-a", mariachi, &deps).await.unwrap();
    let err = remove_favorite("sesion-a", mariachi, &deps).await.unwrap_err();
    assert!(matches!(api_error(&err), Some(ApiError::NotFound(_))));
}
