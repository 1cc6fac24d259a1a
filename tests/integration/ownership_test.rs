//! Integration tests for ownership hand-over and return.

mod helpers;

use s2s_core::error::ShareError;
use s2s_entity::case::Case;
use s2s_entity::contact::Contact;
use s2s_entity::person::Person;
use s2s_entity::sample::Sample;
use s2s_entity::share::{CaseShareDto, ShareOptions};

use helpers::{Instance, sender, two_instances};

fn hand_over_to_b() -> ShareOptions {
    ShareOptions::for_organization("health-b").with_hand_over_ownership(true)
}

async fn hand_case_to_b(a: &Instance) -> Case {
    let case = Case::new("COVID-19", Person::new("Jane", "Doe"));
    a.seed(std::slice::from_ref(&case)).await;
    a.services
        .cases
        .share_entities(&sender("Anna"), &[case.uuid], hand_over_to_b())
        .await
        .expect("share succeeds");
    case
}

#[tokio::test]
async fn test_hand_over_moves_editability() {
    let (_network, a, b) = two_instances().await;
    let case = hand_case_to_b(&a).await;

    assert!(!a.is_editable::<Case>(case.uuid).await);
    assert!(b.is_editable::<Case>(case.uuid).await);
    let origin = b.origin_of::<Case>(case.uuid).await.expect("origin info");
    assert!(origin.ownership_handed_over);
}

#[tokio::test]
async fn test_ownership_round_trip() {
    let (network, a, b) = two_instances().await;
    let case = hand_case_to_b(&a).await;

    let mut updated: Case = b.get(case.uuid).await.expect("case on b");
    updated.additional_details = Some("recovered".to_string());
    b.seed(std::slice::from_ref(&updated)).await;

    b.services
        .cases
        .return_entity(
            &sender("Bert"),
            case.uuid,
            ShareOptions::for_organization("health-a"),
        )
        .await
        .expect("return succeeds");

    let origin = b.origin_of::<Case>(case.uuid).await.expect("origin info");
    assert!(!origin.ownership_handed_over);
    assert!(!b.is_editable::<Case>(case.uuid).await);

    assert!(a.is_editable::<Case>(case.uuid).await);
    let infos = a.share_infos_of(&case).await;
    assert_eq!(infos.len(), 1);
    assert!(!infos[0].ownership_handed_over);
    let returned: Case = a.get(case.uuid).await.expect("case on a");
    assert_eq!(returned.additional_details.as_deref(), Some("recovered"));
    assert!(returned.origin_info_id.is_none());
    assert_eq!(network.deliveries(), 2);
}

#[tokio::test]
async fn test_return_always_hands_over_ownership() {
    let (network, a, b) = two_instances().await;
    let case = hand_case_to_b(&a).await;

    let options = ShareOptions::for_organization("health-a").with_hand_over_ownership(false);
    b.services
        .cases
        .return_entity(&sender("Bert"), case.uuid, options)
        .await
        .expect("return succeeds");

    let payload = network.last_payload().expect("payload delivered");
    let envelopes: Vec<CaseShareDto> = a.services.exchange.decrypt(&payload).expect("decrypt");
    assert_eq!(envelopes.len(), 1);
    assert!(envelopes[0].origin.ownership_handed_over);
}

#[tokio::test]
async fn test_return_brings_new_samples_under_returning_origin() {
    let (_network, a, b) = two_instances().await;
    let case = hand_case_to_b(&a).await;
    let sample = Sample::for_case(case.uuid, "blood");
    b.seed(std::slice::from_ref(&sample)).await;
    let origins_before = a.store.origin_info_count().await;

    let options = ShareOptions {
        with_samples: true,
        ..ShareOptions::for_organization("health-a")
    };
    b.services
        .cases
        .return_entity(&sender("Bert"), case.uuid, options)
        .await
        .expect("return succeeds");

    let origin = a.origin_of::<Sample>(sample.uuid).await.expect("sample origin");
    assert_eq!(origin.organization_id, "health-b");
    assert!(origin.ownership_handed_over);
    assert!(a.is_editable::<Sample>(sample.uuid).await);
    assert_eq!(a.store.origin_info_count().await, origins_before + 1);

    assert_eq!(b.share_infos_of(&sample).await.len(), 1);
}

#[tokio::test]
async fn test_returned_contacts_clear_their_hand_over() {
    let (_network, a, b) = two_instances().await;
    let case = Case::new("COVID-19", Person::new("Jane", "Doe"));
    let contact = Contact::new("COVID-19", Person::new("John", "Roe"), Some(case.uuid));
    a.seed(std::slice::from_ref(&case)).await;
    a.seed(std::slice::from_ref(&contact)).await;
    let options = ShareOptions {
        with_associated_contacts: true,
        ..hand_over_to_b()
    };
    a.services
        .cases
        .share_entities(&sender("Anna"), &[case.uuid], options)
        .await
        .expect("share succeeds");
    assert!(!a.is_editable::<Contact>(contact.uuid).await);

    let options = ShareOptions {
        with_associated_contacts: true,
        ..ShareOptions::for_organization("health-a")
    };
    b.services
        .cases
        .return_entity(&sender("Bert"), case.uuid, options)
        .await
        .expect("return succeeds");

    assert!(a.is_editable::<Contact>(contact.uuid).await);
    assert!(a.is_editable::<Case>(case.uuid).await);
}

#[tokio::test]
async fn test_entity_without_ownership_cannot_be_returned() {
    let (network, a, b) = two_instances().await;
    let case = Case::new("COVID-19", Person::new("Jane", "Doe"));
    a.seed(std::slice::from_ref(&case)).await;
    a.services
        .cases
        .share_entities(
            &sender("Anna"),
            &[case.uuid],
            ShareOptions::for_organization("health-b"),
        )
        .await
        .expect("share succeeds");

    let err = b
        .services
        .cases
        .return_entity(
            &sender("Bert"),
            case.uuid,
            ShareOptions::for_organization("health-a"),
        )
        .await
        .expect_err("not owned by b");

    assert!(matches!(err, ShareError::Share { .. }));
    assert_eq!(network.deliveries(), 1);
}

#[tokio::test]
async fn test_local_entity_cannot_be_returned() {
    let (network, a, _b) = two_instances().await;
    let case = Case::new("COVID-19", Person::new("Jane", "Doe"));
    a.seed(std::slice::from_ref(&case)).await;

    let err = a
        .services
        .cases
        .return_entity(
            &sender("Anna"),
            case.uuid,
            ShareOptions::for_organization("health-b"),
        )
        .await
        .expect_err("nothing to return");

    assert!(matches!(err, ShareError::Share { .. }));
    assert_eq!(network.deliveries(), 0);
}

#[tokio::test]
async fn test_owner_can_sync_again_after_return() {
    let (_network, a, b) = two_instances().await;
    let mut case = hand_case_to_b(&a).await;
    b.services
        .cases
        .return_entity(
            &sender("Bert"),
            case.uuid,
            ShareOptions::for_organization("health-a"),
        )
        .await
        .expect("return succeeds");

    case.additional_details = Some("closed".to_string());
    a.seed(std::slice::from_ref(&case)).await;
    a.services
        .cases
        .sync_entity(
            &sender("Anna"),
            case.uuid,
            ShareOptions::for_organization("health-b"),
        )
        .await
        .expect("sync succeeds");

    let on_b: Case = b.get(case.uuid).await.expect("case on b");
    assert_eq!(on_b.additional_details.as_deref(), Some("closed"));
    assert!(!b.is_editable::<Case>(case.uuid).await);
}

#[tokio::test]
async fn test_unreachable_owner_keeps_return_unapplied() {
    let (network, a, b) = two_instances().await;
    let case = hand_case_to_b(&a).await;
    let sample = Sample::for_case(case.uuid, "blood");
    b.seed(std::slice::from_ref(&sample)).await;
    network.take_down("health-a");

    let options = ShareOptions {
        with_samples: true,
        ..ShareOptions::for_organization("health-a")
    };
    let err = b
        .services
        .cases
        .return_entity(&sender("Bert"), case.uuid, options)
        .await
        .expect_err("owner unreachable");

    assert!(matches!(err, ShareError::Share { .. }));
    let origin = b.origin_of::<Case>(case.uuid).await.expect("origin info");
    assert!(origin.ownership_handed_over);
    assert!(b.is_editable::<Case>(case.uuid).await);
    assert!(b.share_infos_of(&sample).await.is_empty());
    assert!(!a.is_editable::<Case>(case.uuid).await);
}
