use cassette::Entity;
use pretty_assertions::assert_eq;
use tests::*;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Entity)]
struct Person {
    #[primary_key]
    id: Uuid,

    name: String,

    #[column("years")]
    age: Option<i32>,

    #[transient]
    cached_greeting: Option<String>,
}

fn person(name: &str, age: Option<i32>) -> Person {
    Person {
        id: Uuid::new_v4(),
        name: name.to_string(),
        age,
        cached_greeting: None,
    }
}

#[tokio::test]
async fn crud_round_trip() {
    let test = TemplateTest::new().await;
    let template = &test.template;

    assert_ok!(template.create_tables::<Person>().await);
    assert_eq!(test.table_names(), ["person"]);

    let alice = person("Alice", Some(30));
    assert_ok!(template.insert(&alice).await);

    let loaded = assert_ok!(template.get_by_id::<Person>(&alice.id).await);
    assert_eq!(loaded, alice);
    assert!(assert_ok!(template.exists_by_id::<Person>(&alice.id).await));

    // Insert replaces the row with the same key
    let older = Person {
        age: Some(31),
        ..alice.clone()
    };
    assert_ok!(template.insert(&older).await);
    assert_eq!(test.row_count("person"), Some(1));
    assert_eq!(
        assert_ok!(template.get_by_id::<Person>(&alice.id).await).age,
        Some(31)
    );

    assert_ok!(template.delete(&older).await);
    assert!(!assert_ok!(template.exists_by_id::<Person>(&alice.id).await));
    assert_none!(assert_ok!(template.select_one_by_id::<Person>(&alice.id).await));
}

#[tokio::test]
async fn transient_fields_are_not_stored() {
    let test = TemplateTest::new().await;
    let template = &test.template;

    assert_ok!(template.create_tables::<Person>().await);

    let mut bob = person("Bob", None);
    bob.cached_greeting = Some("hi Bob".to_string());
    assert_ok!(template.insert(&bob).await);

    let loaded = assert_ok!(template.get_by_id::<Person>(&bob.id).await);
    assert_eq!(loaded.cached_greeting, None);
    assert_eq!(loaded.age, None);
    assert_eq!(loaded.name, "Bob");
}

#[tokio::test]
async fn select_all_and_delete_by_id() {
    let test = TemplateTest::new().await;
    let template = &test.template;

    assert_ok!(template.create_tables::<Person>().await);

    let people = [person("Ann", Some(1)), person("Ben", Some(2))];
    for p in &people {
        assert_ok!(template.insert(p).await);
    }

    let mut all = assert_ok!(template.select_all::<Person>().await);
    all.sort_by(|a, b| a.name.cmp(&b.name));
    assert_eq!(all, people);

    assert_ok!(template.delete_by_id::<Person>(&people[0].id).await);
    let all = assert_ok!(template.select_all::<Person>().await);
    assert_eq!(all, [people[1].clone()]);
}

#[tokio::test]
async fn get_by_id_not_found() {
    let test = TemplateTest::new().await;
    let template = &test.template;

    assert_ok!(template.create_tables::<Person>().await);

    let err = assert_err!(template.get_by_id::<Person>(&Uuid::new_v4()).await);
    assert!(err.is_record_not_found());
    assert!(err.to_string().contains("table=person"));
}

#[tokio::test]
async fn operations_on_missing_tables_fail() {
    let mut test = TemplateTest::new().await;

    let err = assert_err!(test.template.insert(&person("Cy", None)).await);
    assert!(err.is_driver());
    assert_eq!(err.to_string(), "unconfigured table person");

    // The insert reached the session and was rejected there
    let log = test.log();
    assert_eq!(log.len(), 2);
    assert_eq!(log.failures(), 1);
}

#[tokio::test]
async fn drop_tables_removes_every_table() {
    let test = TemplateTest::new().await;
    let template = &test.template;

    assert_ok!(template.create_tables::<Person>().await);
    assert_ok!(template.drop_tables::<Person>().await);
    assert!(test.table_names().is_empty());

    // Dropping again is a no-op
    assert_ok!(template.drop_tables::<Person>().await);
}
