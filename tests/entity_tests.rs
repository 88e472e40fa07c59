use serde_record::{
    from_slice, value, AnyRecordEntity, Error, ErrorCode, GenericRecordEntity, Item, Map,
    RecordEntity, Value,
};
use std::cell::Cell;
use std::error::Error as _;

fn object(value: Value) -> Map {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other:?}"),
    }
}

#[test]
fn test_create_and_read_back() {
    let data = object(value!({ "foo": "bar", "baz": { "0": 1, "1": 2 } }));
    let entity = RecordEntity::create(&data).unwrap();

    let record = entity.record().unwrap();
    assert_eq!(record.get("foo").and_then(Item::as_str), Some("bar"));
    assert_eq!(record.get("baz").and_then(Item::as_list).map(Vec::len), Some(2));
}

#[test]
fn test_create_rejects_invalid_data() {
    let err = RecordEntity::create(&object(value!({ "1two": "prohibited" }))).unwrap_err();
    assert!(err.is_invalid());
    assert_eq!(err.code(), ErrorCode::InvalidRecord);
}

#[test]
fn test_set_record_replaces_everything() {
    let mut entity = RecordEntity::create(&object(value!({ "old": 1 }))).unwrap();
    entity.set_record(&object(value!({ "new": 2 }))).unwrap();
    assert!(!entity.has_property("old"));
    assert_eq!(entity.property("new").unwrap().as_i64(), Some(2));

    assert!(entity.set_record(&object(value!({ "0": 3 }))).is_err());
    assert!(entity.has_property("new"));
}

#[test]
fn test_entity_from_parsed_record() {
    let record = from_slice("application/json", br#"{"user":{"name":"Bob"}}"#).unwrap();
    let mut entity = RecordEntity::from(record);
    entity.set_property("seen", true).unwrap();

    let user = entity.property("user").unwrap().as_record().unwrap();
    assert_eq!(user.get("name").and_then(Item::as_str), Some("Bob"));
    assert_eq!(entity.as_record().keys().collect::<Vec<_>>(), vec!["user", "seen"]);
}

#[test]
fn test_property_semantics() {
    let mut entity = RecordEntity::new();
    entity.set_property("name", "Alice").unwrap();
    entity.set_property("nickname", Value::Null).unwrap();

    assert!(entity.has_property("name"));
    assert!(!entity.has_property("nickname"));
    assert!(!entity.has_property("age"));
    assert!(!entity.has_property("umläutz"));

    assert_eq!(
        entity
            .property_or("nickname", Item::String("none".to_string()))
            .unwrap(),
        Item::String("none".to_string())
    );
    assert_eq!(
        entity.property_or("age", Item::Bool(false)).unwrap(),
        Item::Bool(false)
    );

    let err = entity.property("age").unwrap_err();
    assert!(err.is_invalid());
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[test]
fn test_generic_entity_normalizes_callback_output() {
    let entity = GenericRecordEntity::new(|| Ok(object(value!({ "list": { "0": "a" } }))));
    let record = entity.record().unwrap();
    assert_eq!(
        record.get("list"),
        Some(&Item::List(vec![Item::String("a".to_string())]))
    );
}

#[test]
fn test_generic_entity_calls_back_every_time() {
    let calls = Cell::new(0);
    let entity = GenericRecordEntity::new(|| {
        calls.set(calls.get() + 1);
        Ok(Map::new())
    });
    entity.record().unwrap();
    entity.record().unwrap();
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_generic_entity_wraps_invalid_output() {
    let entity = GenericRecordEntity::new(|| Ok(object(value!({ "1two": "prohibited" }))));
    let err = entity.record().unwrap_err();
    assert!(err.is_runtime());
    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(
        err.to_string(),
        "Failed to retrieve record: Invalid record key at /: \"1two\""
    );

    let source = err.source().unwrap();
    assert_eq!(source.to_string(), "Invalid record key at /: \"1two\"");
}

#[test]
fn test_generic_entity_wraps_callback_failure() {
    let entity = GenericRecordEntity::new(|| {
        Err(Error::runtime(ErrorCode::InternalError, "backend offline"))
    });
    let err = entity.record().unwrap_err();
    assert!(err.is_runtime());
    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.to_string(), "Failed to retrieve record: backend offline");
}

#[test]
fn test_entities_behind_trait_objects() {
    let stored = RecordEntity::create(&object(value!({ "a": 1 }))).unwrap();
    let computed = GenericRecordEntity::new(|| Ok(object(value!({ "a": 1 }))));
    let entities: Vec<Box<dyn AnyRecordEntity>> = vec![Box::new(stored), Box::new(computed)];

    let records: Vec<_> = entities.iter().map(|e| e.record().unwrap()).collect();
    assert_eq!(records[0], records[1]);
}
