use cassette::{Config, Entity, MappingContext, Template};
use cassette_driver_memory::MemorySession;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use tests::*;

#[derive(Debug, PartialEq, Entity)]
#[table("account_@plan")]
struct Account {
    #[primary_key]
    id: i64,

    #[table_discriminator("free", "paid")]
    plan: String,

    email: String,
}

#[derive(Debug, PartialEq, Entity)]
#[table("audit_log")]
struct AuditEntry {
    #[primary_key]
    id: String,
}

#[derive(Debug, Entity)]
#[table("broken_@plan")]
struct Broken {
    #[primary_key]
    id: i64,
}

#[test]
fn entities_are_built_once() {
    let context = MappingContext::new();
    assert!(!context.contains::<Account>());

    let first = assert_ok!(context.persistent_entity::<Account>());
    let second = assert_ok!(context.persistent_entity::<Account>());
    assert!(Arc::ptr_eq(&first, &second));

    // Registering again keeps the cached build
    let third = assert_ok!(context.register::<Account>());
    assert!(Arc::ptr_eq(&first, &third));

    assert_ok!(context.persistent_entity::<AuditEntry>());
    assert!(context.contains::<AuditEntry>());
    assert_eq!(context.persistent_entities().len(), 2);
}

#[test]
fn table_names_from_templates() {
    let context = MappingContext::new();

    let entity = assert_ok!(context.persistent_entity::<Account>());
    let names: Vec<_> = entity.table_names().iter().map(|name| name.to_cql()).collect();
    assert_eq!(names, ["account_free", "account_paid"]);

    let entity = assert_ok!(context.persistent_entity::<AuditEntry>());
    assert_eq!(assert_some!(entity.table_name()), "audit_log");

    // `@plan` names no discriminator field of `Broken`
    let err = assert_err!(context.persistent_entity::<Broken>());
    assert!(err.is_mapping());
}

#[test]
fn invalid_entities_are_not_cached() {
    let context = MappingContext::new();

    assert_err!(context.persistent_entity::<Broken>());
    assert!(!context.contains::<Broken>());
    assert!(context.persistent_entities().is_empty());
}

#[tokio::test]
async fn template_from_config() {
    init_tracing();

    let config = Config {
        keyspace: "Orders".to_string(),
        table_name_prefix: Some("app_".to_string()),
        replication_factor: 3,
        ..Config::default()
    };

    let session = Arc::new(MemorySession::new());
    let template = assert_ok!(Template::from_config(session.clone(), &config));
    let keyspace = assert_some!(template.keyspace()).clone();
    assert_eq!(keyspace, "orders");

    assert_ok!(template.create_keyspace(config.replication_factor).await);
    assert_eq!(session.replication_factor(&keyspace), Some(3));

    assert_ok!(template.create_tables::<AuditEntry>().await);
    assert_ok!(template.create_tables::<Account>().await);

    let tables: Vec<_> = session
        .table_names(&keyspace)
        .iter()
        .map(|name| name.to_cql())
        .collect();
    assert_eq!(tables, ["app_account_free", "app_account_paid", "app_audit_log"]);

    let account = Account {
        id: 7,
        plan: "paid".to_string(),
        email: "a@example.com".to_string(),
    };
    assert_ok!(template.insert(&account).await);
    assert_eq!(
        assert_ok!(template.select_all::<Account>().await),
        [account]
    );
}

#[tokio::test]
async fn template_without_keyspace() {
    let session = Arc::new(MemorySession::new());
    let template = Template::new(
        session,
        cassette::MappingConverter::new(Arc::new(MappingContext::new())),
    );

    let err = assert_err!(template.create_keyspace(1).await);
    assert_eq!(err.to_string(), "no keyspace configured");

    let err = assert_err!(template.create_tables::<AuditEntry>().await);
    assert!(err.is_driver());
    assert_eq!(err.to_string(), "no keyspace has been specified");
}
