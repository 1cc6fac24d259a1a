//! Integration tests for share, sync, and the inbound batch checks.

mod helpers;

use s2s_core::error::ShareError;
use s2s_core::types::EncryptedData;
use s2s_core::types::validation::validation_group_name;
use s2s_database::ChangeSet;
use s2s_database::ChangeSetWriter;
use s2s_entity::Record;
use s2s_entity::case::Case;
use s2s_entity::contact::Contact;
use s2s_entity::event::{Event, EventParticipant};
use s2s_entity::person::Person;
use s2s_entity::sample::Sample;
use s2s_entity::share::{CaseShareDto, ShareInfo, ShareOptions, ShareOrigin};

use helpers::{sender, two_instances};

fn to_b() -> ShareOptions {
    ShareOptions::for_organization("health-b")
}

fn case_envelope(case: &Case) -> CaseShareDto {
    CaseShareDto {
        entity: case.clone(),
        associated_contacts: Vec::new(),
        samples: Vec::new(),
        origin: ShareOrigin {
            organization_id: "health-a".to_string(),
            sender_name: "Anna".to_string(),
            ..ShareOrigin::default()
        },
    }
}

fn groups(err: &ShareError) -> Vec<String> {
    err.validation_report()
        .map(|r| r.iter().map(|(group, _)| group.clone()).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_share_case_with_contacts_and_samples() {
    let (network, a, b) = two_instances().await;
    let case = Case::new("COVID-19", Person::new("Jane", "Doe"));
    let contact = Contact::new("COVID-19", Person::new("John", "Roe"), Some(case.uuid));
    let case_sample = Sample::for_case(case.uuid, "blood");
    let contact_sample = Sample::for_contact(contact.uuid, "swab");
    a.seed(std::slice::from_ref(&case)).await;
    a.seed(std::slice::from_ref(&contact)).await;
    a.seed(&[case_sample.clone(), contact_sample.clone()]).await;

    let options = ShareOptions {
        with_associated_contacts: true,
        with_samples: true,
        comment: Some("please follow up".to_string()),
        ..to_b()
    };
    a.services
        .cases
        .share_entities(&sender("Anna"), &[case.uuid], options)
        .await
        .expect("share succeeds");

    assert_eq!(network.deliveries(), 1);

    let received: Case = b.get(case.uuid).await.expect("case received");
    let origin = b.origin_of::<Case>(case.uuid).await.expect("origin info");
    assert_eq!(origin.organization_id, "health-a");
    assert_eq!(origin.sender_name, "Anna");
    assert_eq!(origin.comment.as_deref(), Some("please follow up"));
    assert!(!origin.ownership_handed_over);

    let received_contact: Contact = b.get(contact.uuid).await.expect("contact received");
    assert_eq!(received_contact.case_uuid, Some(case.uuid));
    assert_eq!(received_contact.origin_info_id, received.origin_info_id);
    let received_sample: Sample = b.get(contact_sample.uuid).await.expect("sample received");
    assert_eq!(received_sample.origin_info_id, received.origin_info_id);
    assert!(b.get::<Sample>(case_sample.uuid).await.is_some());

    assert_eq!(a.share_infos_of(&case).await.len(), 1);
    assert_eq!(a.share_infos_of(&contact).await.len(), 1);
    assert_eq!(a.share_infos_of(&case_sample).await.len(), 1);
    assert_eq!(a.store.share_info_count().await, 4);
    assert_eq!(b.store.share_info_count().await, 0);
}

#[tokio::test]
async fn test_share_event_with_participants() {
    let (_network, a, b) = two_instances().await;
    let event = Event::new("Choir rehearsal");
    let participant = EventParticipant::new(event.uuid, Person::new("Ann", "Lee"));
    a.seed(std::slice::from_ref(&event)).await;
    a.seed(std::slice::from_ref(&participant)).await;

    let options = ShareOptions {
        with_event_participants: true,
        ..to_b()
    };
    a.services
        .events
        .share_entities(&sender("Anna"), &[event.uuid], options)
        .await
        .expect("share succeeds");

    let received: EventParticipant = b.get(participant.uuid).await.expect("participant received");
    assert_eq!(received.event_uuid, event.uuid);
    assert!(received.origin_info_id.is_some());
    assert_eq!(a.share_infos_of(&participant).await.len(), 1);
}

#[tokio::test]
async fn test_share_pseudonymizes_only_the_transmitted_copy() {
    let (_network, a, b) = two_instances().await;
    let mut contact = Contact::new("COVID-19", Person::new("John", "Roe"), None);
    contact.description = Some("met at the office".to_string());
    a.seed(std::slice::from_ref(&contact)).await;

    let options = ShareOptions {
        pseudonymize_personal_data: true,
        pseudonymize_sensitive_data: true,
        ..to_b()
    };
    a.services
        .contacts
        .share_entities(&sender("Anna"), &[contact.uuid], options)
        .await
        .expect("share succeeds");

    let received: Contact = b.get(contact.uuid).await.expect("contact received");
    assert!(received.person.is_pseudonymized());
    assert!(received.description.is_none());

    let local: Contact = a.get(contact.uuid).await.expect("local contact");
    assert_eq!(local.person.first_name, "John");
    assert!(a.share_infos_of(&contact).await[0].pseudonymized_personal_data);
}

#[tokio::test]
async fn test_rejected_batch_leaves_receiver_unchanged() {
    let (_network, a, b) = two_instances().await;
    let fresh = Case::new("COVID-19", Person::new("Jane", "Doe"));
    let known = Case::new("Measles", Person::new("Max", "Mustermann"));
    a.seed(&[fresh.clone(), known.clone()]).await;
    b.seed(std::slice::from_ref(&known)).await;

    let err = a
        .services
        .cases
        .share_entities(&sender("Anna"), &[fresh.uuid, known.uuid], to_b())
        .await
        .expect_err("batch is rejected");

    assert!(matches!(err, ShareError::Validation(_)));
    assert_eq!(groups(&err), vec![validation_group_name("Case", &known.uuid)]);
    assert!(b.get::<Case>(fresh.uuid).await.is_none());
    assert_eq!(b.store.record_count(Case::TABLE).await, 1);
    assert_eq!(b.store.origin_info_count().await, 0);
    assert_eq!(a.store.share_info_count().await, 0);
}

#[tokio::test]
async fn test_invalid_entity_stops_batch_before_sending() {
    let (network, a, b) = two_instances().await;
    let valid = Case::new("COVID-19", Person::new("Jane", "Doe"));
    let handed_away = Case::new("COVID-19", Person::new("Erika", "Muster"));
    a.seed(&[valid.clone(), handed_away.clone()]).await;

    let mut changes = ChangeSet::new();
    changes.upsert_share_info(ShareInfo::new(
        handed_away.association(),
        sender("Anna").user_id,
        "Anna",
        &ShareOptions::for_organization("health-c").with_hand_over_ownership(true),
    ));
    a.store.apply(changes).await.expect("seed share info");

    let err = a
        .services
        .cases
        .share_entities(&sender("Anna"), &[valid.uuid, handed_away.uuid], to_b())
        .await
        .expect_err("batch is rejected");

    assert!(matches!(err, ShareError::Share { .. }));
    assert_eq!(groups(&err), vec![validation_group_name("Case", &handed_away.uuid)]);
    assert_eq!(network.deliveries(), 0);
    assert!(a.share_infos_of(&valid).await.is_empty());
    assert!(b.get::<Case>(valid.uuid).await.is_none());
}

#[tokio::test]
async fn test_received_entity_without_ownership_cannot_be_forwarded() {
    let (network, a, b) = two_instances().await;
    let case = Case::new("COVID-19", Person::new("Jane", "Doe"));
    a.seed(std::slice::from_ref(&case)).await;
    a.services
        .cases
        .share_entities(&sender("Anna"), &[case.uuid], to_b())
        .await
        .expect("share succeeds");

    let err = b
        .services
        .cases
        .share_entities(
            &sender("Bert"),
            &[case.uuid],
            ShareOptions::for_organization("health-a"),
        )
        .await
        .expect_err("not editable on b");

    assert!(matches!(err, ShareError::Share { .. }));
    assert_eq!(network.deliveries(), 1);
}

#[tokio::test]
async fn test_repeated_sync_keeps_one_share_info() {
    let (network, a, b) = two_instances().await;
    let mut case = Case::new("COVID-19", Person::new("Jane", "Doe"));
    a.seed(std::slice::from_ref(&case)).await;
    a.services
        .cases
        .share_entities(&sender("Anna"), &[case.uuid], to_b())
        .await
        .expect("share succeeds");
    let origin_before = b.origin_of::<Case>(case.uuid).await.expect("origin info");

    case.additional_details = Some("hospitalized".to_string());
    a.seed(std::slice::from_ref(&case)).await;

    let options = ShareOptions {
        comment: Some("update".to_string()),
        ..to_b()
    };
    for _ in 0..2 {
        a.services
            .cases
            .sync_entity(&sender("Anna"), case.uuid, options.clone())
            .await
            .expect("sync succeeds");
    }

    assert_eq!(network.deliveries(), 3);
    let infos = a.share_infos_of(&case).await;
    assert_eq!(infos.len(), 1);
    assert_eq!(infos[0].comment.as_deref(), Some("update"));

    let received: Case = b.get(case.uuid).await.expect("case on b");
    assert_eq!(received.additional_details.as_deref(), Some("hospitalized"));
    let origin_after = b.origin_of::<Case>(case.uuid).await.expect("origin info");
    assert_eq!(origin_after.uuid, origin_before.uuid);
    assert_eq!(origin_after.comment.as_deref(), Some("update"));
    assert_eq!(b.store.origin_info_count().await, 1);
}

#[tokio::test]
async fn test_sync_adds_new_samples_under_existing_origin() {
    let (_network, a, b) = two_instances().await;
    let case = Case::new("COVID-19", Person::new("Jane", "Doe"));
    a.seed(std::slice::from_ref(&case)).await;
    a.services
        .cases
        .share_entities(&sender("Anna"), &[case.uuid], to_b())
        .await
        .expect("share succeeds");

    let sample = Sample::for_case(case.uuid, "blood");
    a.seed(std::slice::from_ref(&sample)).await;
    let options = ShareOptions {
        with_samples: true,
        ..to_b()
    };
    a.services
        .cases
        .sync_entity(&sender("Anna"), case.uuid, options)
        .await
        .expect("sync succeeds");

    let received_case: Case = b.get(case.uuid).await.expect("case on b");
    let received_sample: Sample = b.get(sample.uuid).await.expect("sample on b");
    assert_eq!(received_sample.origin_info_id, received_case.origin_info_id);
    assert_eq!(a.share_infos_of(&sample).await.len(), 1);
}

#[tokio::test]
async fn test_sync_without_prior_share_fails_before_sending() {
    let (network, a, _b) = two_instances().await;
    let case = Case::new("COVID-19", Person::new("Jane", "Doe"));
    a.seed(std::slice::from_ref(&case)).await;

    let err = a
        .services
        .cases
        .sync_entity(&sender("Anna"), case.uuid, to_b())
        .await
        .expect_err("sync requires a share");

    assert!(matches!(err, ShareError::Share { .. }));
    assert_eq!(network.deliveries(), 0);
    assert_eq!(a.store.share_info_count().await, 0);
}

#[tokio::test]
async fn test_share_to_unknown_organization() {
    let (network, a, _b) = two_instances().await;
    let case = Case::new("COVID-19", Person::new("Jane", "Doe"));
    a.seed(std::slice::from_ref(&case)).await;

    let err = a
        .services
        .cases
        .share_entities(
            &sender("Anna"),
            &[case.uuid],
            ShareOptions::for_organization("health-z"),
        )
        .await
        .expect_err("unknown organization");

    assert!(err.to_string().contains("Unknown organization"));
    assert_eq!(network.deliveries(), 0);
}

#[tokio::test]
async fn test_share_unknown_entity_is_not_found() {
    let (network, a, _b) = two_instances().await;

    let err = a
        .services
        .cases
        .share_entities(&sender("Anna"), &[uuid::Uuid::new_v4()], to_b())
        .await
        .expect_err("unknown entity");

    assert!(matches!(err, ShareError::App(_)));
    assert_eq!(network.deliveries(), 0);
}

#[tokio::test]
async fn test_updates_for_unknown_entities_are_rejected() {
    let (_network, a, b) = two_instances().await;
    let case = Case::new("COVID-19", Person::new("Jane", "Doe"));
    let payload = a
        .services
        .exchange
        .encrypt(&[case_envelope(&case)], "health-b")
        .expect("encrypt");

    let synced = b
        .services
        .cases
        .save_synced_entity(&payload)
        .await
        .expect_err("unknown case");
    assert_eq!(groups(&synced), vec![validation_group_name("Case", &case.uuid)]);

    let returned = b
        .services
        .cases
        .save_returned_entity(&payload)
        .await
        .expect_err("unknown case");
    assert!(matches!(returned, ShareError::Validation(_)));
    assert!(b.get::<Case>(case.uuid).await.is_none());
}

#[tokio::test]
async fn test_duplicate_entity_in_batch_is_rejected() {
    let (_network, a, b) = two_instances().await;
    let case = Case::new("COVID-19", Person::new("Jane", "Doe"));
    let envelope = case_envelope(&case);
    let payload = a
        .services
        .exchange
        .encrypt(&[envelope.clone(), envelope], "health-b")
        .expect("encrypt");

    let err = b
        .services
        .cases
        .save_shared_entities(&payload)
        .await
        .expect_err("duplicate");

    assert!(matches!(err, ShareError::Validation(_)));
    assert!(b.get::<Case>(case.uuid).await.is_none());
}

#[tokio::test]
async fn test_payload_from_unknown_sender_is_rejected() {
    let (_network, _a, b) = two_instances().await;
    let payload = EncryptedData::new("health-z", "AAAA");

    let err = b
        .services
        .cases
        .save_shared_entities(&payload)
        .await
        .expect_err("unknown sender");

    assert!(matches!(err, ShareError::Share { .. }));
    assert_eq!(b.store.record_count(Case::TABLE).await, 0);
}

#[tokio::test]
async fn test_unreachable_peer_keeps_sync_snapshot() {
    let (network, a, _b) = two_instances().await;
    let case = Case::new("COVID-19", Person::new("Jane", "Doe"));
    let sample = Sample::for_case(case.uuid, "blood");
    a.seed(std::slice::from_ref(&case)).await;
    a.seed(std::slice::from_ref(&sample)).await;
    let options = ShareOptions {
        comment: Some("first".to_string()),
        ..to_b()
    };
    a.services
        .cases
        .share_entities(&sender("Anna"), &[case.uuid], options)
        .await
        .expect("share succeeds");
    network.take_down("health-b");

    let options = ShareOptions {
        with_samples: true,
        comment: Some("second".to_string()),
        ..to_b()
    };
    let err = a
        .services
        .cases
        .sync_entity(&sender("Anna"), case.uuid, options)
        .await
        .expect_err("peer unreachable");

    assert!(matches!(err, ShareError::Share { .. }));
    let infos = a.share_infos_of(&case).await;
    assert_eq!(infos.len(), 1);
    assert_eq!(infos[0].comment.as_deref(), Some("first"));
    assert!(!infos[0].with_samples);
    assert!(a.share_infos_of(&sample).await.is_empty());
}
