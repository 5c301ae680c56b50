use cassette::{Entity, PrimaryKeyClass};
use pretty_assertions::assert_eq;
use tests::*;

#[derive(Debug, Clone, PartialEq, Entity)]
#[table("flags_@enabled")]
struct Flag {
    #[primary_key]
    id: i64,

    #[table_discriminator("TRUE", "FALSE")]
    enabled: bool,

    label: String,
}

#[derive(Debug, Clone, PartialEq, Entity)]
#[table("shards_@shard")]
struct Reading {
    #[primary_key]
    key: ReadingKey,

    value: i64,
}

#[derive(Debug, Clone, PartialEq, PrimaryKeyClass)]
struct ReadingKey {
    #[table_discriminator("01", "02")]
    shard: i32,

    #[primary_key_column(partitioned, ordinal = 0)]
    sensor: String,
}

fn reading(shard: i32, sensor: &str, value: i64) -> Reading {
    Reading {
        key: ReadingKey {
            shard,
            sensor: sensor.to_string(),
        },
        value,
    }
}

#[tokio::test]
async fn bool_discriminator_round_trip() {
    let test = TemplateTest::new().await;
    let template = &test.template;

    assert_ok!(template.create_tables::<Flag>().await);
    assert_eq!(test.table_names(), ["flags_false", "flags_true"]);

    let on = Flag {
        id: 1,
        enabled: true,
        label: "on".to_string(),
    };
    let off = Flag {
        id: 2,
        enabled: false,
        label: "off".to_string(),
    };
    assert_ok!(template.insert(&on).await);
    assert_ok!(template.insert(&off).await);

    assert_eq!(test.row_count("flags_true"), Some(1));
    assert_eq!(test.row_count("flags_false"), Some(1));

    let mut all = assert_ok!(template.select_all::<Flag>().await);
    all.sort_by_key(|flag| flag.id);
    assert_eq!(all, [on, off]);
}

#[tokio::test]
async fn i32_discriminator_round_trip() {
    let test = TemplateTest::new().await;
    let template = &test.template;

    assert_ok!(template.create_tables::<Reading>().await);
    assert_eq!(test.table_names(), ["shards_01", "shards_02"]);

    // `2` renders as "2" but is declared as "02"
    assert_ok!(template.insert(&reading(2, "s1", 10)).await);
    assert_ok!(template.insert(&reading(1, "s1", 20)).await);
    assert_eq!(test.row_count("shards_02"), Some(1));
    assert_eq!(test.row_count("shards_01"), Some(1));

    let key = ReadingKey {
        shard: 2,
        sensor: "s1".to_string(),
    };
    let loaded = assert_some!(assert_ok!(template.select_one_by_id::<Reading>(&key).await));
    assert_eq!(loaded, reading(2, "s1", 10));

    let mut all = assert_ok!(template.select_all::<Reading>().await);
    all.sort_by_key(|reading| reading.key.shard);
    assert_eq!(all, [reading(1, "s1", 20), reading(2, "s1", 10)]);

    let err = assert_err!(template.insert(&reading(3, "s1", 30)).await);
    assert!(err.is_mapping());
}
