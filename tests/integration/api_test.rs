//! Integration tests for the HTTP surface.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use s2s_entity::case::Case;
use s2s_entity::person::Person;
use s2s_entity::share::{CaseShareDto, ShareOrigin};

use helpers::{request, sender, two_instances};

fn case_envelope(case: &Case, organization_id: &str) -> CaseShareDto {
    CaseShareDto {
        entity: case.clone(),
        associated_contacts: Vec::new(),
        samples: Vec::new(),
        origin: ShareOrigin {
            organization_id: organization_id.to_string(),
            sender_name: "Bert".to_string(),
            ..ShareOrigin::default()
        },
    }
}

#[tokio::test]
async fn test_health() {
    let (_network, a, _b) = two_instances().await;
    let res = request(&a.router(), "GET", "/api/health", None, None).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_organizations_lists_peers() {
    let (_network, a, _b) = two_instances().await;
    let res = request(&a.router(), "GET", "/api/s2s/organizations", None, None).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["own"]["id"], "health-a");
    let peers = res.body["data"]["peers"].as_array().expect("peers array");
    assert_eq!(peers.len(), 1);
    assert_eq!(peers[0]["id"], "health-b");
}

#[tokio::test]
async fn test_share_through_api() {
    let (network, a, b) = two_instances().await;
    let case = Case::new("COVID-19", Person::new("Jane", "Doe"));
    a.seed(std::slice::from_ref(&case)).await;
    let user = sender("Anna");

    let res = request(
        &a.router(),
        "POST",
        "/api/s2s/cases/share",
        Some(json!({
            "entity_uuids": [case.uuid],
            "options": { "organization_id": "health-b", "comment": "please follow up" }
        })),
        Some(&user),
    )
    .await;

    assert_eq!(res.status, StatusCode::NO_CONTENT);
    assert_eq!(network.deliveries(), 1);
    assert!(b.get::<Case>(case.uuid).await.is_some());

    let res = request(
        &a.router(),
        "GET",
        &format!("/api/s2s/cases/{}/shares", case.uuid),
        None,
        None,
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);
    let infos = res.body["data"].as_array().expect("share infos");
    assert_eq!(infos.len(), 1);
    assert_eq!(infos[0]["organization_id"], "health-b");
    assert_eq!(infos[0]["sender_name"], "Anna");
}

#[tokio::test]
async fn test_share_requires_user() {
    let (network, a, _b) = two_instances().await;
    let res = request(
        &a.router(),
        "POST",
        "/api/s2s/cases/share",
        Some(json!({
            "entity_uuids": [Uuid::new_v4()],
            "options": { "organization_id": "health-b" }
        })),
        None,
    )
    .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "VALIDATION_ERROR");
    assert_eq!(network.deliveries(), 0);
}

#[tokio::test]
async fn test_share_requires_entities() {
    let (_network, a, _b) = two_instances().await;
    let res = request(
        &a.router(),
        "POST",
        "/api/s2s/cases/share",
        Some(json!({
            "entity_uuids": [],
            "options": { "organization_id": "health-b" }
        })),
        Some(&sender("Anna")),
    )
    .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_entity_kind() {
    let (_network, a, _b) = two_instances().await;
    let res = request(
        &a.router(),
        "POST",
        "/api/s2s/immunizations/share",
        Some(json!({
            "entity_uuids": [Uuid::new_v4()],
            "options": { "organization_id": "health-b" }
        })),
        Some(&sender("Anna")),
    )
    .await;

    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_sync_without_share_is_rejected() {
    let (network, a, _b) = two_instances().await;
    let case = Case::new("COVID-19", Person::new("Jane", "Doe"));
    a.seed(std::slice::from_ref(&case)).await;

    let res = request(
        &a.router(),
        "POST",
        &format!("/api/s2s/cases/{}/sync", case.uuid),
        Some(json!({ "options": { "organization_id": "health-b" } })),
        Some(&sender("Anna")),
    )
    .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "SHARE_ERROR");
    assert_eq!(network.deliveries(), 0);
}

#[tokio::test]
async fn test_peer_delivery_is_stored() {
    let (_network, a, b) = two_instances().await;
    let case = Case::new("COVID-19", Person::new("Jane", "Doe"));
    let payload = b
        .services
        .exchange
        .encrypt(&[case_envelope(&case, "health-b")], "health-a")
        .expect("encrypt");

    let res = request(
        &a.router(),
        "POST",
        "/sormasToSormas/cases",
        Some(serde_json::to_value(&payload).expect("payload json")),
        None,
    )
    .await;

    assert_eq!(res.status, StatusCode::NO_CONTENT);
    let origin = a.origin_of::<Case>(case.uuid).await.expect("origin info");
    assert_eq!(origin.organization_id, "health-b");
}

#[tokio::test]
async fn test_peer_delivery_of_existing_entity_reports_details() {
    let (_network, a, b) = two_instances().await;
    let case = Case::new("COVID-19", Person::new("Jane", "Doe"));
    a.seed(std::slice::from_ref(&case)).await;
    let payload = b
        .services
        .exchange
        .encrypt(&[case_envelope(&case, "health-b")], "health-a")
        .expect("encrypt");

    let res = request(
        &a.router(),
        "POST",
        "/sormasToSormas/cases",
        Some(serde_json::to_value(&payload).expect("payload json")),
        None,
    )
    .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "VALIDATION_ERROR");
    let details = res.body["details"].as_object().expect("details map");
    assert_eq!(details.len(), 1);
    assert!(a.origin_of::<Case>(case.uuid).await.is_none());
}

#[tokio::test]
async fn test_peer_delivery_with_garbage_payload() {
    let (_network, a, _b) = two_instances().await;
    let res = request(
        &a.router(),
        "POST",
        "/sormasToSormas/cases",
        Some(json!({ "sender_id": "health-b", "data": "bm90IGVuY3J5cHRlZA==" })),
        None,
    )
    .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "SHARE_ERROR");
}

#[tokio::test]
async fn test_peer_delivery_with_malformed_body() {
    let (_network, a, _b) = two_instances().await;
    let res = request(
        &a.router(),
        "POST",
        "/sormasToSormas/cases",
        Some(json!({ "sender_id": 42 })),
        None,
    )
    .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "VALIDATION_ERROR");
    assert!(res.body["message"].is_string());
}
