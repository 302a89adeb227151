// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! `.buff` schema parser using Pest.
//!
//! The format supports:
//! - One `version = <tag>` declaration, shared by every class
//! - `class Name { <type> <field>; ... }` blocks
//! - Repeated types: `T[]`, nestable as `T[][]`
//! - References to other classes by name, declared before or after use
//! - Comments (`//` style)

use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

use crate::core::{CodecError, Result};
use crate::schema::ast::{
    split_dimensions, FieldDef, FieldType, MessageDef, Schema, MAX_ARRAY_DIMENSIONS,
};

/// Pest parser for `.buff` schema files.
#[derive(Parser)]
#[grammar = "schema/parser/buff_parser/buff.pest"] // Path relative to src/ directory
pub struct BuffParser;

const CONTEXT: &str = "buff schema";

/// Parse `.buff` text into a validated [`Schema`].
///
/// The first class declared becomes the root message.
pub fn parse(definition: &str) -> Result<Schema> {
    let pairs = BuffParser::parse(Rule::schema, definition)
        .map_err(|e| CodecError::parse(CONTEXT, format!("{e}")))?;

    let mut version: Option<String> = None;
    let mut classes: Vec<(String, Vec<FieldDef>)> = Vec::new();

    for pair in pairs {
        // schema = SOI ~ (version_decl | class_decl)* ~ EOI
        for item in pair.into_inner() {
            match item.as_rule() {
                Rule::version_decl => {
                    let tag = item
                        .into_inner()
                        .find(|p| p.as_rule() == Rule::version_tag)
                        .map(|p| p.as_str().to_string())
                        .ok_or_else(|| CodecError::parse(CONTEXT, "empty version declaration"))?;
                    if let Some(previous) = &version {
                        return Err(CodecError::parse(
                            CONTEXT,
                            format!("version declared twice ('{previous}' and '{tag}')"),
                        ));
                    }
                    version = Some(tag);
                }
                Rule::class_decl => classes.push(parse_class(item)?),
                _ => {}
            }
        }
    }

    let version = version.ok_or_else(|| CodecError::parse(CONTEXT, "missing version definition"))?;
    if classes.is_empty() {
        return Err(CodecError::parse(CONTEXT, "no classes defined"));
    }

    let defs = classes
        .into_iter()
        .map(|(name, fields)| MessageDef {
            name,
            version_tag: version.clone(),
            fields,
        })
        .collect();

    let schema = Schema::from_defs(version, defs)?;
    tracing::debug!(
        version = %schema.version,
        messages = schema.len(),
        "parsed buff schema"
    );
    Ok(schema)
}

fn parse_class(pair: Pair<Rule>) -> Result<(String, Vec<FieldDef>)> {
    // class_decl = keyword_class ~ ident ~ "{" ~ field_decl* ~ "}"
    let mut name = None;
    let mut fields = Vec::new();
    for item in pair.into_inner() {
        match item.as_rule() {
            Rule::ident => name = Some(item.as_str().to_string()),
            Rule::field_decl => fields.push(parse_field(item)?),
            _ => {}
        }
    }
    let name = name.ok_or_else(|| CodecError::parse(CONTEXT, "class without a name"))?;
    Ok((name, fields))
}

fn parse_field(pair: Pair<Rule>) -> Result<FieldDef> {
    // field_decl = type_ref ~ ident ~ ";"
    let line = pair.as_span().start_pos().line_col().0;
    let mut inner = pair.into_inner();
    let (Some(type_ref), Some(name)) = (inner.next(), inner.next()) else {
        return Err(CodecError::parse(
            CONTEXT,
            format!("line {line}: incomplete field declaration"),
        ));
    };
    let (_, dimensions) = split_dimensions(type_ref.as_str());
    if dimensions > MAX_ARRAY_DIMENSIONS {
        return Err(CodecError::parse(
            CONTEXT,
            format!(
                "line {line}: field '{}' has {dimensions} array dimensions (limit {MAX_ARRAY_DIMENSIONS})",
                name.as_str()
            ),
        ));
    }
    Ok(FieldDef::new(
        name.as_str(),
        FieldType::from_type_name(type_ref.as_str()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAME: &str = r#"
// Test schema
version = 1.0.0

class WorldState {
    int world_id;
    string seed;
    Guild[] guilds;
    Item[] loot_table;
}

class Guild {
    string name;
    string description;
    Character[] members;
}

class Character {
    string name;
    int level;
    int hp;
    int mp;
    bool is_alive;
    Vec3 position;
    int[] skills;
    Item[] inventory;
}

class Item {
    int id;
    string name;
    int value;
    float weight;
    string rarity;
}

class Vec3 {
    float x;
    float y;
    float z;
}
"#;

    #[test]
    fn test_parse_game_schema() {
        let schema = parse(GAME).unwrap();
        assert_eq!(schema.version, "1.0.0");
        assert_eq!(schema.len(), 5);
        assert_eq!(schema.root().unwrap().name, "WorldState");

        let character = schema.get("Character").unwrap();
        assert_eq!(character.version_tag, "1.0.0");
        let names: Vec<&str> = character.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            ["name", "level", "hp", "mp", "is_alive", "position", "skills", "inventory"]
        );
        assert_eq!(
            character.field("skills").unwrap().field_type,
            FieldType::Int32.repeated()
        );
        assert_eq!(
            character.field("position").unwrap().field_type,
            FieldType::Message("Vec3".to_string())
        );
    }

    #[test]
    fn test_parse_aliases_and_nested_arrays() {
        let schema = parse(
            "version = 2\nclass Grid { int64 id; float64[][] cells; boolean ok; long n; double d; }",
        )
        .unwrap();
        let grid = schema.root().unwrap();
        assert_eq!(grid.fields[0].field_type, FieldType::Int64);
        assert_eq!(
            grid.fields[1].field_type,
            FieldType::Float64.repeated().repeated()
        );
        assert_eq!(grid.fields[2].field_type, FieldType::Bool);
        assert_eq!(grid.fields[3].field_type, FieldType::Int64);
        assert_eq!(grid.fields[4].field_type, FieldType::Float64);
    }

    #[test]
    fn test_parse_version_after_classes() {
        let schema = parse("class A { int x; }\nversion = v1_beta.3").unwrap();
        assert_eq!(schema.version, "v1_beta.3");
        assert_eq!(schema.root().unwrap().version_tag, "v1_beta.3");
    }

    #[test]
    fn test_parse_empty_class() {
        let schema = parse("version = 1\nclass Empty {}").unwrap();
        assert!(schema.root().unwrap().fields.is_empty());
    }

    #[test]
    fn test_parse_missing_version() {
        let err = parse("class A { int x; }").unwrap_err();
        assert_eq!(err, CodecError::parse(CONTEXT, "missing version definition"));
    }

    #[test]
    fn test_parse_duplicate_version() {
        let err = parse("version = 1\nversion = 2\nclass A { int x; }").unwrap_err();
        assert!(matches!(err, CodecError::ParseError { .. }));
    }

    #[test]
    fn test_parse_no_classes() {
        let err = parse("version = 1.0.0\n// nothing else").unwrap_err();
        assert_eq!(err, CodecError::parse(CONTEXT, "no classes defined"));
    }

    #[test]
    fn test_parse_syntax_error() {
        let err = parse("version = 1\nclass A { int x }").unwrap_err();
        assert!(matches!(err, CodecError::ParseError { .. }));

        let err = parse("version = 1\nclass A { int x; ").unwrap_err();
        assert!(matches!(err, CodecError::ParseError { .. }));
    }

    #[test]
    fn test_parse_unknown_type() {
        let err = parse("version = 1\nclass A { Missing m; }").unwrap_err();
        assert!(matches!(err, CodecError::InvalidSchema { .. }));
    }

    #[test]
    fn test_parse_cycle_rejected() {
        let err = parse("version = 1\nclass A { B b; }\nclass B { A[] a; }").unwrap_err();
        assert!(matches!(err, CodecError::InvalidSchema { .. }));
    }

    #[test]
    fn test_keyword_needs_boundary() {
        assert!(parse("version = 1\nclassA { int x; }").is_err());
    }

    #[test]
    fn test_parse_rejects_deep_array_type() {
        let text = format!("version = 1\nclass A {{ int{} x; }}", "[]".repeat(200_000));
        let err = parse(&text).unwrap_err();
        match err {
            CodecError::ParseError { message, .. } => {
                assert!(message.contains("200000 array dimensions"), "{message}")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_accepts_dimension_limit() {
        let text = format!("version = 1\nclass A {{ int{} x; }}", "[]".repeat(64));
        let schema = parse(&text).unwrap();
        assert_eq!(schema.root().unwrap().fields[0].field_type.dimensions(), 64);
    }
}
