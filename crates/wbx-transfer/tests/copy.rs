//! Copying entities between two fake Wikibases.

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use wbx_api::{ApiError, EditOptions, EditToken, Session, WikibaseClient, authenticate};
use wbx_config::HttpConfig;
use wbx_core::{EntityKind, IdMapping};
use wbx_testkit::FakeWikibase;
use wbx_transfer::{CopyRequest, FailurePolicy, TransferEngine, TransferError};

async fn login(target: &FakeWikibase) -> (Session, EditToken) {
    let client = WikibaseClient::new(&HttpConfig::default()).expect("client builds");
    authenticate(client, target.api_url(), "Admin@wbx", "secret")
        .await
        .expect("handshake succeeds")
}

fn item(id: &str, label: &str) -> Value {
    json!({
        "type": "item",
        "id": id,
        "labels": {
            "en": {"language": "en", "value": label},
            "de": {"language": "de", "value": format!("{label} (de)")}
        },
        "descriptions": {"en": {"language": "en", "value": format!("about {label}")}},
        "aliases": {"en": [{"language": "en", "value": format!("{label} alias")}]},
        "claims": {"P31": [{"mainsnak": {"snaktype": "value", "property": "P31"}}]},
        "sitelinks": {}
    })
}

fn property(id: &str, label: &str, datatype: &str) -> Value {
    json!({
        "type": "property",
        "id": id,
        "datatype": datatype,
        "labels": {"en": {"language": "en", "value": label}},
        "descriptions": [],
        "aliases": []
    })
}

fn request(source: &FakeWikibase, ids: &[&str], kind: EntityKind) -> CopyRequest {
    CopyRequest {
        source_url: source.api_url().to_string(),
        ids: ids.iter().map(ToString::to_string).collect(),
        languages: vec!["en".to_string()],
        kind,
        equiv_property: None,
    }
}

#[tokio::test]
async fn copies_single_item() {
    let source = FakeWikibase::builder().entity("Q1", item("Q1", "Universe")).start();
    let target = FakeWikibase::builder().first_new_id(101).start();
    let (session, token) = login(&target).await;

    let report = TransferEngine::new(&session, &token)
        .copy_entities(&request(&source, &["Q1"], EntityKind::Item))
        .await
        .expect("copy succeeds");

    assert_eq!(report.mapping, vec![IdMapping::new("Q1", "Q101")]);
    assert!(report.is_complete());

    let payloads = target.created_payloads();
    assert_eq!(payloads.len(), 1);
    assert_eq!(payloads[0]["labels"], json!({"en": {"language": "en", "value": "Universe"}}));
    assert_eq!(payloads[0]["aliases"]["en"][0]["value"], "Universe alias");
    assert!(payloads[0].get("datatype").is_none());
    assert!(payloads[0].get("claims").is_none());

    let edit = &target.requests_for("wbeditentity")[0];
    assert_eq!(edit.param("new"), Some("item"));
    assert_eq!(edit.param("summary"), Some("Bot edit!"));
    assert_eq!(edit.param("bot"), Some("1"));
}

#[tokio::test]
async fn mapping_follows_input_order() {
    let source = FakeWikibase::builder()
        .entity("Q1", item("Q1", "Universe"))
        .entity("Q2", item("Q2", "Earth"))
        .entity("Q5", item("Q5", "human"))
        .start();
    let target = FakeWikibase::builder().start();
    let (session, token) = login(&target).await;

    let report = TransferEngine::new(&session, &token)
        .copy_entities(&request(&source, &["Q5", "Q1", "Q2"], EntityKind::Item))
        .await
        .expect("copy succeeds");

    assert_eq!(
        report.mapping,
        vec![
            IdMapping::new("Q5", "Q100"),
            IdMapping::new("Q1", "Q101"),
            IdMapping::new("Q2", "Q102"),
        ]
    );
    assert_eq!(source.requests_for("wbgetentities").len(), 1);
    assert_eq!(
        source.requests_for("wbgetentities")[0].param("ids"),
        Some("Q5|Q1|Q2")
    );
    let created: Vec<String> = target.created_ids().into_values().collect();
    let mapped: Vec<String> = report.mapping.iter().map(|m| m.target_id.clone()).collect();
    assert_eq!(created, mapped);
}

#[tokio::test]
async fn copies_property_with_datatype() {
    let source = FakeWikibase::builder()
        .entity("P31", property("P31", "instance of", "wikibase-item"))
        .start();
    let target = FakeWikibase::builder().first_new_id(101).start();
    let (session, token) = login(&target).await;

    let report = TransferEngine::new(&session, &token)
        .copy_entities(&request(&source, &["P31"], EntityKind::Property))
        .await
        .expect("copy succeeds");

    assert_eq!(report.mapping, vec![IdMapping::new("P31", "P101")]);
    let payload = &target.created_payloads()[0];
    assert_eq!(payload["datatype"], "wikibase-item");
    assert_eq!(payload["descriptions"], json!({}));
    assert_eq!(
        target.requests_for("wbeditentity")[0].param("new"),
        Some("property")
    );
}

#[tokio::test]
async fn equivalence_property_adds_one_back_reference() {
    let source = FakeWikibase::builder().entity("Q1", item("Q1", "Universe")).start();
    let target = FakeWikibase::builder().start();
    let (session, token) = login(&target).await;

    let mut copy = request(&source, &["Q1"], EntityKind::Item);
    copy.equiv_property = Some("P1".to_string());
    TransferEngine::new(&session, &token)
        .copy_entities(&copy)
        .await
        .expect("copy succeeds");

    let claims = target.created_payloads()[0]["claims"].clone();
    assert_eq!(
        claims,
        json!([{
            "mainsnak": {
                "snaktype": "value",
                "property": "P1",
                "datavalue": {"value": "Q1", "type": "string"}
            },
            "type": "statement",
            "rank": "normal"
        }])
    );
}

#[tokio::test]
async fn missing_entity_fails_before_any_creation() {
    let source = FakeWikibase::builder().entity("Q1", item("Q1", "Universe")).start();
    let target = FakeWikibase::builder().start();
    let (session, token) = login(&target).await;

    let err = TransferEngine::new(&session, &token)
        .copy_entities(&request(&source, &["Q1", "Q404"], EntityKind::Item))
        .await
        .unwrap_err();

    assert!(matches!(err, TransferError::MissingEntity(ref id) if id == "Q404"));
    assert!(target.requests_for("wbeditentity").is_empty());
}

#[tokio::test]
async fn source_error_fails_before_any_creation() {
    let source = FakeWikibase::builder().error_on_unknown_entity().start();
    let target = FakeWikibase::builder().start();
    let (session, token) = login(&target).await;

    let err = TransferEngine::new(&session, &token)
        .copy_entities(&request(&source, &["Q404"], EntityKind::Item))
        .await
        .unwrap_err();

    assert_eq!(
        err.api_error().and_then(ApiError::service_code),
        Some("no-such-entity")
    );
    assert!(target.requests_for("wbeditentity").is_empty());
}

#[tokio::test]
async fn property_without_datatype_fails_before_any_creation() {
    let source = FakeWikibase::builder()
        .entity("Q1", item("Q1", "Universe"))
        .start();
    let target = FakeWikibase::builder().start();
    let (session, token) = login(&target).await;

    let err = TransferEngine::new(&session, &token)
        .copy_entities(&request(&source, &["Q1"], EntityKind::Property))
        .await
        .unwrap_err();

    assert!(matches!(err, TransferError::MissingDatatype(ref id) if id == "Q1"));
    assert!(target.requests_for("wbeditentity").is_empty());
}

#[tokio::test]
async fn empty_id_list_is_rejected_without_requests() {
    let source = FakeWikibase::builder().start();
    let target = FakeWikibase::builder().start();
    let (session, token) = login(&target).await;

    let err = TransferEngine::new(&session, &token)
        .copy_entities(&request(&source, &[], EntityKind::Item))
        .await
        .unwrap_err();

    assert!(matches!(err, TransferError::EmptyBatch));
    assert!(source.requests().is_empty());
}

#[tokio::test]
async fn failed_save_aborts_and_keeps_completed_mapping() {
    let source = FakeWikibase::builder()
        .entity("Q1", item("Q1", "Universe"))
        .entity("Q2", item("Q2", "Earth"))
        .entity("Q3", item("Q3", "Moon"))
        .start();
    let target = FakeWikibase::builder().fail_create_at(1).start();
    let (session, token) = login(&target).await;

    let err = TransferEngine::new(&session, &token)
        .copy_entities(&request(&source, &["Q1", "Q2", "Q3"], EntityKind::Item))
        .await
        .unwrap_err();

    let TransferError::Aborted { failed_id, completed, source: cause } = err else {
        panic!("expected an aborted transfer");
    };
    assert_eq!(failed_id, "Q2");
    assert_eq!(completed, vec![IdMapping::new("Q1", "Q100")]);
    assert_eq!(cause.service_code(), Some("failed-save"));
    assert_eq!(target.requests_for("wbeditentity").len(), 2);
    assert_eq!(target.created_ids().len(), 1);
}

#[tokio::test]
async fn continue_on_error_skips_failed_item() {
    let source = FakeWikibase::builder()
        .entity("Q1", item("Q1", "Universe"))
        .entity("Q2", item("Q2", "Earth"))
        .entity("Q3", item("Q3", "Moon"))
        .start();
    let target = FakeWikibase::builder().fail_create_at(1).start();
    let (session, token) = login(&target).await;

    let report = TransferEngine::new(&session, &token)
        .with_policy(FailurePolicy::ContinueOnError)
        .copy_entities(&request(&source, &["Q1", "Q2", "Q3"], EntityKind::Item))
        .await
        .expect("run completes");

    assert_eq!(
        report.mapping,
        vec![IdMapping::new("Q1", "Q100"), IdMapping::new("Q3", "Q101")]
    );
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].source_id, "Q2");
    assert_eq!(report.failures[0].code.as_deref(), Some("failed-save"));
    assert!(!report.is_complete());
}

#[tokio::test]
async fn edit_options_reach_the_target() {
    let source = FakeWikibase::builder().entity("Q1", item("Q1", "Universe")).start();
    let target = FakeWikibase::builder().start();
    let (session, token) = login(&target).await;

    TransferEngine::new(&session, &token)
        .with_options(EditOptions {
            summary: "import from source".to_string(),
            bot: false,
        })
        .copy_entities(&request(&source, &["Q1"], EntityKind::Item))
        .await
        .expect("copy succeeds");

    let edit = &target.requests_for("wbeditentity")[0];
    assert_eq!(edit.param("summary"), Some("import from source"));
    assert_eq!(edit.param("bot"), None);
}
