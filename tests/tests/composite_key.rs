use cassette::{cql::Statement, Entity, PrimaryKeyClass};
use pretty_assertions::assert_eq;
use tests::*;

#[derive(Debug, Clone, PartialEq, Entity)]
#[table("events_@region_@kind")]
struct Event {
    #[primary_key]
    key: EventKey,

    #[table_discriminator("east", "west")]
    region: String,

    payload: String,
}

#[derive(Debug, Clone, PartialEq, PrimaryKeyClass)]
struct EventKey {
    #[primary_key_column(partitioned, ordinal = 0)]
    stream: String,

    #[primary_key_column(partitioned, ordinal = 1)]
    #[column("shard_no")]
    shard: i32,

    #[primary_key_column(clustered, ordinal = 0, ordering = desc)]
    seq: i64,

    #[table_discriminator("audit", "metric")]
    kind: String,
}

fn event(region: &str, kind: &str, seq: i64) -> Event {
    Event {
        key: EventKey {
            stream: "s1".to_string(),
            shard: 3,
            seq,
            kind: kind.to_string(),
        },
        region: region.to_string(),
        payload: format!("event {seq}"),
    }
}

#[tokio::test]
async fn create_table_cql() {
    let mut test = TemplateTest::new().await;

    assert_ok!(test.template.create_tables::<Event>().await);

    assert_eq!(
        test.table_names(),
        [
            "events_east_audit",
            "events_east_metric",
            "events_west_audit",
            "events_west_metric",
        ]
    );

    let log = test.log();
    assert_eq!(log.count(|stmt| matches!(stmt, Statement::CreateTable(_))), 4);

    let cql = log.cql();
    assert_eq!(
        cql[0],
        "CREATE KEYSPACE IF NOT EXISTS test WITH replication = \
         {'class': 'SimpleStrategy', 'replication_factor': 1};"
    );
    assert!(cql.contains(
        &"CREATE TABLE IF NOT EXISTS test.events_west_metric (\
          stream text, shard_no int, seq bigint, payload text, \
          PRIMARY KEY ((stream, shard_no), seq)) \
          WITH CLUSTERING ORDER BY (seq DESC);"
            .to_string()
    ));
    assert!(!log.any(|stmt| matches!(stmt, Statement::Insert(_))));

    // Statements come off the log oldest first
    assert!(matches!(log.pop(), Some(Statement::CreateKeyspace(_))));
    assert!(matches!(log.pop(), Some(Statement::CreateTable(_))));
    assert_eq!(log.len(), 3);
}

#[tokio::test]
async fn rows_route_by_both_discriminators() {
    let mut test = TemplateTest::new().await;
    let template = &test.template;

    assert_ok!(template.create_tables::<Event>().await);

    assert_ok!(template.insert(&event("east", "audit", 1)).await);
    assert_ok!(template.insert(&event("WEST", "metric", 2)).await);
    assert_ok!(template.insert(&event("west", "metric", 3)).await);

    assert_eq!(test.row_count("events_east_audit"), Some(1));
    assert_eq!(test.row_count("events_west_metric"), Some(2));
    assert_eq!(test.row_count("events_west_audit"), Some(0));

    let mut all = assert_ok!(template.select_all::<Event>().await);
    all.sort_by_key(|event| event.key.seq);
    assert_eq!(
        all,
        [
            event("east", "audit", 1),
            event("west", "metric", 2),
            event("west", "metric", 3),
        ]
    );

    // `region` lives on the entity, so key lookups cannot pick a table
    let err = assert_err!(
        template
            .select_one_by_id::<Event>(&event("east", "audit", 1).key)
            .await
    );
    assert!(err.is_mapping());

    // Deleting through the instance resolves the table from every field
    test.log().clear();
    assert!(test.log().is_empty());
    assert_ok!(test.template.delete(&event("west", "metric", 2)).await);
    assert_eq!(test.row_count("events_west_metric"), Some(1));

    let log = test.log();
    assert_eq!(log.len(), 1);
    assert_eq!(
        log.cql(),
        ["DELETE FROM test.events_west_metric \
          WHERE stream = 's1' AND shard_no = 3 AND seq = 2;"]
    );
}
