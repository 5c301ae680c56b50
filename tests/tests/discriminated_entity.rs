use cassette::schema::StringDiscriminatorConverter;
use cassette::{Entity, MappingContext, PrimaryKeyClass};
use pretty_assertions::assert_eq;
use tests::*;

#[derive(Debug, PartialEq, Entity)]
#[table("T_@discriminator")]
struct Complex {
    #[primary_key]
    key: ComplexKey,

    value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, PrimaryKeyClass)]
struct ComplexKey {
    #[table_discriminator(values = ["A", "B"], converter = StringDiscriminatorConverter)]
    discriminator: String,

    #[primary_key_column(partitioned, ordinal = 0)]
    key: String,
}

#[derive(Debug, PartialEq, Entity)]
#[table("T_@discriminator_magic")]
struct Complex2 {
    #[primary_key]
    id: String,

    #[table_discriminator("A", "B")]
    discriminator: String,
}

fn complex(discriminator: &str, key: &str) -> Complex {
    Complex {
        key: ComplexKey {
            discriminator: discriminator.to_string(),
            key: key.to_string(),
        },
        value: None,
    }
}

fn table_names(entity: &cassette::schema::PersistentEntity) -> Vec<String> {
    entity
        .table_names()
        .into_iter()
        .map(|name| name.to_cql())
        .collect()
}

#[test]
fn key_class_discriminator_tables() {
    let context = MappingContext::new();
    let entity = assert_ok!(context.persistent_entity::<Complex>());

    assert!(entity.is_discriminated());
    assert_eq!(table_names(&entity), ["t_a", "t_b"]);

    let discriminator = assert_some!(entity.discriminator());
    let a = assert_ok!(discriminator.parse_table_name("t_a"));
    let b = assert_ok!(discriminator.parse_table_name("t_b"));
    assert_eq!(a.single(), Some("a"));
    assert_eq!(b.single(), Some("b"));

    // The declared value is kept alongside the table segment
    assert_eq!(assert_some!(b.get("discriminator")).value, "B");
}

#[test]
fn resolve_table_from_instance_and_key() {
    let context = MappingContext::new();
    let entity = assert_ok!(context.persistent_entity::<Complex>());

    let instance = complex("B", "k1");
    assert_eq!(assert_ok!(entity.table_name_for(&instance)), "t_b");
    assert_eq!(assert_ok!(entity.table_name_for_id(&instance.key)), "t_b");

    // Values match without regard to case
    let lower = complex("a", "k1");
    assert_eq!(assert_ok!(entity.table_name_for(&lower)), "t_a");

    let unknown = complex("C", "k1");
    let err = assert_err!(entity.table_name_for(&unknown));
    assert!(err.is_mapping());
    assert_err!(entity.table_name_for_id(&unknown.key));
}

#[test]
fn entity_discriminator_with_suffix() {
    let context = MappingContext::new();
    let entity = assert_ok!(context.persistent_entity::<Complex2>());

    assert_eq!(table_names(&entity), ["t_a_magic", "t_b_magic"]);

    let discriminator = assert_some!(entity.discriminator());
    assert_eq!(
        assert_ok!(discriminator.parse_table_name("t_a_magic")).single(),
        Some("a")
    );
    assert_err!(discriminator.parse_table_name("t_c_magic"));

    let instance = Complex2 {
        id: "k1".to_string(),
        discriminator: "B".to_string(),
    };
    assert_eq!(assert_ok!(entity.table_name_for(&instance)), "t_b_magic");

    // The discriminator lives on the entity, so the key alone is not enough
    let err = assert_err!(entity.table_name_for_id(&instance.id));
    assert!(err.is_mapping());
}

#[test]
fn discriminator_fields_are_not_columns() {
    let context = MappingContext::new();

    let entity = assert_ok!(context.persistent_entity::<Complex>());
    let columns: Vec<_> = entity
        .properties
        .iter()
        .map(|property| property.column.to_cql())
        .collect();
    assert_eq!(columns, ["key", "value"]);

    let entity = assert_ok!(context.persistent_entity::<Complex2>());
    assert!(entity.property("discriminator").is_none());
    assert_eq!(entity.partition_key().len(), 1);
}

#[tokio::test]
async fn rows_land_in_their_discriminated_table() {
    let test = TemplateTest::new().await;
    let template = &test.template;

    assert_ok!(template.create_tables::<Complex>().await);
    assert_eq!(test.table_names(), ["t_a", "t_b"]);

    assert_ok!(template.insert(&complex("A", "k1")).await);
    assert_ok!(template.insert(&complex("B", "k1")).await);
    assert_ok!(template.insert(&complex("B", "k2")).await);

    assert_eq!(test.row_count("t_a"), Some(1));
    assert_eq!(test.row_count("t_b"), Some(2));

    // The same partition key exists once per table
    let key = ComplexKey {
        discriminator: "B".to_string(),
        key: "k1".to_string(),
    };
    let loaded = assert_some!(assert_ok!(template.select_one_by_id::<Complex>(&key).await));
    assert_eq!(loaded, complex("B", "k1"));

    let unknown = complex("C", "k1");
    let err = assert_err!(template.insert(&unknown).await);
    assert!(err.is_mapping());
}

#[tokio::test]
async fn discriminator_restored_from_table_name() {
    let test = TemplateTest::new().await;
    let template = &test.template;

    assert_ok!(template.create_tables::<Complex2>().await);

    // Written in lower case; read back as declared
    let instance = Complex2 {
        id: "k1".to_string(),
        discriminator: "b".to_string(),
    };
    assert_ok!(template.insert(&instance).await);

    let all = assert_ok!(template.select_all::<Complex2>().await);
    assert_eq!(
        all,
        [Complex2 {
            id: "k1".to_string(),
            discriminator: "B".to_string(),
        }]
    );
}
