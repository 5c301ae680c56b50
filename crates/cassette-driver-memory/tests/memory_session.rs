use cassette_core::cql::*;
use cassette_core::driver::Session;
use cassette_core::stmt::{Type, Value};
use cassette_core::CqlIdentifier;
use cassette_driver_memory::MemorySession;
use std_util::{assert_err, assert_ok};

fn ident(name: &str) -> CqlIdentifier {
    CqlIdentifier::unquoted(name).unwrap()
}

async fn session_with_table() -> MemorySession {
    let session = MemorySession::with_keyspace(ident("test"));

    assert_ok!(
        session
            .exec(
                CreateKeyspace {
                    name: ident("test"),
                    replication_factor: 1,
                    if_not_exists: true,
                }
                .into(),
            )
            .await
    );

    assert_ok!(
        session
            .exec(
                CreateTable {
                    keyspace: None,
                    name: ident("t_a"),
                    columns: vec![
                        ColumnDef {
                            name: ident("id"),
                            ty: Type::String,
                        },
                        ColumnDef {
                            name: ident("seq"),
                            ty: Type::I32,
                        },
                        ColumnDef {
                            name: ident("value"),
                            ty: Type::String,
                        },
                    ],
                    partition_key: vec![ident("id")],
                    clustering_key: vec![(ident("seq"), Ordering::Ascending)],
                    if_not_exists: false,
                }
                .into(),
            )
            .await
    );

    session
}

fn insert(id: &str, seq: i32, value: Option<&str>) -> Statement {
    Insert {
        keyspace: None,
        table: ident("t_a"),
        values: vec![
            (ident("id"), Value::from(id)),
            (ident("seq"), Value::from(seq)),
            (ident("value"), Value::from(value)),
        ],
    }
    .into()
}

fn select(filter: Vec<(CqlIdentifier, Value)>) -> Statement {
    Select {
        keyspace: None,
        table: ident("t_a"),
        columns: vec![],
        filter: Filter { eq: filter },
        limit: None,
    }
    .into()
}

#[tokio::test]
async fn insert_and_select() {
    let session = session_with_table().await;

    assert_ok!(session.exec(insert("k1", 1, Some("one"))).await);
    assert_ok!(session.exec(insert("k1", 2, Some("two"))).await);
    assert_ok!(session.exec(insert("k2", 1, None)).await);

    let rows = assert_ok!(session.exec(select(vec![])).await).into_rows();
    assert_eq!(rows.len(), 3);

    let rows = assert_ok!(
        session
            .exec(select(vec![(ident("id"), Value::from("k1"))]))
            .await
    )
    .into_rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].get(&ident("value")), Some(&Value::from("two")));

    assert_eq!(session.row_count(&ident("test"), &ident("t_a")), Some(3));
}

#[tokio::test]
async fn insert_upserts_by_primary_key() {
    let session = session_with_table().await;

    assert_ok!(session.exec(insert("k1", 1, Some("one"))).await);
    assert_ok!(session.exec(insert("k1", 1, Some("uno"))).await);

    let rows = assert_ok!(session.exec(select(vec![])).await).into_rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get(&ident("value")), Some(&Value::from("uno")));
}

#[tokio::test]
async fn projection_and_limit() {
    let session = session_with_table().await;

    assert_ok!(session.exec(insert("k1", 1, Some("one"))).await);
    assert_ok!(session.exec(insert("k1", 2, Some("two"))).await);

    let stmt = Select {
        keyspace: Some(ident("test")),
        table: ident("t_a"),
        columns: vec![ident("value")],
        filter: Filter::default(),
        limit: Some(1),
    };

    let rows = assert_ok!(session.exec(stmt.into()).await).into_rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].len(), 1);
    assert_eq!(rows[0].get(&ident("value")), Some(&Value::from("one")));
}

#[tokio::test]
async fn delete_matching_rows() {
    let session = session_with_table().await;

    assert_ok!(session.exec(insert("k1", 1, Some("one"))).await);
    assert_ok!(session.exec(insert("k2", 1, Some("two"))).await);

    let stmt = Delete {
        keyspace: None,
        table: ident("t_a"),
        filter: Filter {
            eq: vec![(ident("id"), Value::from("k1"))],
        },
    };

    let response = assert_ok!(session.exec(stmt.into()).await);
    assert!(matches!(
        response.rows,
        cassette_core::driver::Rows::Count(1)
    ));
    assert_eq!(session.row_count(&ident("test"), &ident("t_a")), Some(1));
}

#[tokio::test]
async fn missing_key_column() {
    let session = session_with_table().await;

    let stmt = Insert {
        keyspace: None,
        table: ident("t_a"),
        values: vec![(ident("id"), Value::from("k1"))],
    };

    let err = assert_err!(session.exec(stmt.into()).await);
    assert!(err.is_driver());
    assert_eq!(err.to_string(), "missing primary key column seq in table t_a");
}

#[tokio::test]
async fn unknown_table_and_column() {
    let session = session_with_table().await;

    let err = assert_err!(
        session
            .exec(
                DropTable {
                    keyspace: None,
                    name: ident("t_b"),
                    if_exists: false,
                }
                .into(),
            )
            .await
    );
    assert!(err.is_driver());
    assert_eq!(err.to_string(), "unconfigured table t_b");

    let err = assert_err!(
        session
            .exec(select(vec![(ident("nope"), Value::from(1))]))
            .await
    );
    assert!(err.is_driver());

    // Dropping a missing table is fine with IF EXISTS
    assert_ok!(
        session
            .exec(
                DropTable {
                    keyspace: None,
                    name: ident("t_b"),
                    if_exists: true,
                }
                .into(),
            )
            .await
    );
}

#[tokio::test]
async fn unknown_keyspace() {
    let session = MemorySession::new();

    let err = assert_err!(session.exec(select(vec![])).await);
    assert!(err.is_driver());
    assert_eq!(err.to_string(), "no keyspace has been specified");

    let stmt = Select {
        keyspace: Some(ident("other")),
        table: ident("t_a"),
        columns: vec![],
        filter: Filter::default(),
        limit: None,
    };
    let err = assert_err!(session.exec(stmt.into()).await);
    assert_eq!(err.to_string(), "keyspace other does not exist");
}

#[tokio::test]
async fn create_keyspace_twice() {
    let session = session_with_table().await;

    assert_eq!(session.replication_factor(&ident("test")), Some(1));
    assert_eq!(session.table_names(&ident("test")), [ident("t_a")]);

    let stmt = CreateKeyspace {
        name: ident("test"),
        replication_factor: 3,
        if_not_exists: false,
    };
    let err = assert_err!(session.exec(stmt.into()).await);
    assert!(err.is_driver());
}
