// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! `.buff` schema parser integration tests.

mod common;

use bitpacker::{parse_schema, parse_schema_file, CodecError, FieldType};
use common::fixture_path;

fn reason(err: CodecError) -> String {
    match err {
        CodecError::InvalidSchema { reason, .. } => reason,
        CodecError::ParseError { message, .. } => message,
        other => panic!("unexpected error kind: {other:?}"),
    }
}

#[test]
fn test_parse_game_fixture() {
    let schema = parse_schema_file(fixture_path("game.buff")).unwrap();
    assert_eq!(schema.version, "1.0.0");

    let names: Vec<&str> = schema.messages().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["WorldState", "Guild", "Character", "Item", "Vec3"]);
    assert!(schema.messages().iter().all(|m| m.version_tag == "1.0.0"));

    let world = schema.root().unwrap();
    assert_eq!(
        world.field("guilds").unwrap().field_type,
        FieldType::Message("Guild".to_string()).repeated()
    );
    assert_eq!(
        world.field("loot_table").unwrap().field_type.to_string(),
        "Item[]"
    );
}

#[test]
fn test_nested_repeated_and_aliases() {
    let schema = parse_schema(
        "version = 3
         class Matrix {
             double[][] rows;
             int32 width;
             int64 stamp;
             float32 scale;
             float64 bias;
             boolean dense;
         }",
    )
    .unwrap();
    let matrix = schema.get("Matrix").unwrap();
    let types: Vec<String> = matrix
        .fields
        .iter()
        .map(|f| f.field_type.to_string())
        .collect();
    assert_eq!(types, ["double[][]", "int", "long", "float", "double", "bool"]);
}

#[test]
fn test_forward_reference_allowed() {
    let schema = parse_schema(
        "version = 1
         class Outer { Inner inner; }
         class Inner { int v; }",
    )
    .unwrap();
    assert_eq!(schema.root().unwrap().name, "Outer");
}

#[test]
fn test_comments_and_blank_lines() {
    let schema = parse_schema(
        "// header
         version = 0.9 // trailing

         // a class
         class A {
             // nothing here yet
             int x; // the only field
         }
        ",
    )
    .unwrap();
    assert_eq!(schema.version, "0.9");
    assert_eq!(schema.get("A").unwrap().fields.len(), 1);
}

#[test]
fn test_empty_class_allowed() {
    let schema = parse_schema("version = 1\nclass Marker {}").unwrap();
    assert!(schema.get("Marker").unwrap().fields.is_empty());
}

// ============================================================================
// Rejections
// ============================================================================

#[test]
fn test_missing_version() {
    let err = parse_schema("class A { int x; }").unwrap_err();
    assert!(reason(err).contains("missing version"));
}

#[test]
fn test_version_declared_twice() {
    let err = parse_schema("version = 1\nversion = 2\nclass A { int x; }").unwrap_err();
    assert!(reason(err).contains("version declared twice"));
}

#[test]
fn test_no_classes() {
    let err = parse_schema("version = 1").unwrap_err();
    assert!(reason(err).contains("no classes"));
}

#[test]
fn test_duplicate_class() {
    let err = parse_schema("version = 1\nclass A { int x; }\nclass A { int y; }").unwrap_err();
    assert!(reason(err).contains("duplicate message definition"));
}

#[test]
fn test_duplicate_field() {
    let err = parse_schema("version = 1\nclass A { int x; string x; }").unwrap_err();
    assert!(reason(err).contains("duplicate field 'x'"));
}

#[test]
fn test_unknown_reference() {
    let err = parse_schema("version = 1\nclass A { Missing[] m; }").unwrap_err();
    assert_eq!(reason(err), "unknown type 'Missing' for field 'm'");
}

#[test]
fn test_reference_cycle() {
    let err = parse_schema(
        "version = 1
         class A { B b; }
         class B { A[] back; }",
    )
    .unwrap_err();
    assert!(reason(err).contains("reference cycle: A -> B -> A"));
}

#[test]
fn test_self_reference() {
    let err = parse_schema("version = 1\nclass Node { Node[] children; }").unwrap_err();
    assert!(reason(err).contains("Node -> Node"));
}

#[test]
fn test_deeply_repeated_type_rejected() {
    let text = format!("version = 1\nclass A {{ int{} x; }}", "[]".repeat(200_000));
    let err = parse_schema(&text).unwrap_err();
    assert!(reason(err).contains("array dimensions"));
}

#[test]
fn test_syntax_error() {
    let err = parse_schema("version = 1\nclass A { int x }").unwrap_err();
    assert!(matches!(err, CodecError::ParseError { .. }));
}

#[test]
fn test_missing_file() {
    let err = parse_schema_file(fixture_path("does_not_exist.buff")).unwrap_err();
    assert!(matches!(err, CodecError::Io { .. }));
}
