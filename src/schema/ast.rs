// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Message definition IR.
//!
//! A [`Schema`] is an ordered list of [`MessageDef`]s. Field order inside a
//! message is the wire order; nothing else identifies a field on the wire.

use std::collections::HashMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::core::{CodecError, Result};

/// Largest number of `[]` layers a field type may carry.
pub const MAX_ARRAY_DIMENSIONS: usize = 64;

/// Type of a single message field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Zigzag varint, 32-bit
    Int32,
    /// Zigzag varint, 64-bit
    Int64,
    /// Quantized `f32`
    Float32,
    /// Quantized `f64`
    Float64,
    /// Single byte
    Bool,
    /// Length-prefixed UTF-8
    String,
    /// Nested message, inlined without framing
    Message(String),
    /// Count-prefixed sequence of the inner type
    Repeated(Box<FieldType>),
}

impl FieldType {
    /// Build a field type from its text form.
    ///
    /// Trailing `[]` pairs wrap the base type in [`FieldType::Repeated`], and
    /// any name that is not a scalar keyword refers to a message.
    pub fn from_type_name(name: &str) -> Self {
        let (base, dimensions) = split_dimensions(name);
        let mut field_type =
            Self::scalar(base).unwrap_or_else(|| FieldType::Message(base.to_string()));
        for _ in 0..dimensions {
            field_type = field_type.repeated();
        }
        field_type
    }

    /// Look up a scalar keyword, including the width-suffixed aliases.
    pub fn scalar(name: &str) -> Option<Self> {
        match name {
            "int" | "int32" => Some(FieldType::Int32),
            "long" | "int64" => Some(FieldType::Int64),
            "float" | "float32" => Some(FieldType::Float32),
            "double" | "float64" => Some(FieldType::Float64),
            "bool" | "boolean" => Some(FieldType::Bool),
            "string" => Some(FieldType::String),
            _ => None,
        }
    }

    /// Wrap this type in one level of [`FieldType::Repeated`].
    pub fn repeated(self) -> Self {
        FieldType::Repeated(Box::new(self))
    }

    /// Whether this is a scalar (non-message, non-repeated) type.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, FieldType::Message(_) | FieldType::Repeated(_))
    }

    /// Whether values of this type are quantized floats.
    pub fn is_float(&self) -> bool {
        matches!(self, FieldType::Float32 | FieldType::Float64)
    }

    /// The type with every [`FieldType::Repeated`] layer removed.
    pub fn base_type(&self) -> &FieldType {
        let mut current = self;
        while let FieldType::Repeated(inner) = current {
            current = inner;
        }
        current
    }

    /// Number of [`FieldType::Repeated`] layers around the base type.
    pub fn dimensions(&self) -> usize {
        let mut count = 0;
        let mut current = self;
        while let FieldType::Repeated(inner) = current {
            count += 1;
            current = inner;
        }
        count
    }

    /// Name of the message this type refers to, looking through repetition.
    pub fn message_name(&self) -> Option<&str> {
        match self.base_type() {
            FieldType::Message(name) => Some(name),
            _ => None,
        }
    }
}

/// Split a type name into its base name and the count of trailing `[]` pairs.
pub fn split_dimensions(name: &str) -> (&str, usize) {
    let mut base = name;
    let mut dimensions = 0;
    while let Some(inner) = base.strip_suffix("[]") {
        base = inner;
        dimensions += 1;
    }
    (base, dimensions)
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.base_type() {
            FieldType::Int32 => f.write_str("int")?,
            FieldType::Int64 => f.write_str("long")?,
            FieldType::Float32 => f.write_str("float")?,
            FieldType::Float64 => f.write_str("double")?,
            FieldType::Bool => f.write_str("bool")?,
            FieldType::String => f.write_str("string")?,
            FieldType::Message(name) => f.write_str(name)?,
            FieldType::Repeated(_) => unreachable!("base_type strips every Repeated layer"),
        }
        for _ in 0..self.dimensions() {
            f.write_str("[]")?;
        }
        Ok(())
    }
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A named, typed field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDef {
    /// Field name
    pub name: String,
    /// Field type
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl FieldDef {
    /// Create a new field definition.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// A record type: name, version tag and ordered fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageDef {
    /// Message type name
    pub name: String,
    /// Opaque version tag, compared for exact equality on decode
    pub version_tag: String,
    /// Fields in wire order
    pub fields: Vec<FieldDef>,
}

impl MessageDef {
    /// Create a message definition with no fields.
    pub fn new(name: impl Into<String>, version_tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version_tag: version_tag.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field, builder style.
    pub fn with_field(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.fields.push(FieldDef::new(name, field_type));
        self
    }

    /// Find a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Names of the messages this one references directly, in field order.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().filter_map(|f| f.field_type.message_name())
    }
}

/// An ordered collection of message definitions sharing one version.
///
/// The first message added is the root, the type a bare payload decodes to.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Schema {
    /// File-level version tag
    pub version: String,
    /// Messages in declaration order
    messages: Vec<MessageDef>,
    /// Name -> position in `messages`
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version && self.messages == other.messages
    }
}

impl Schema {
    /// Create an empty schema.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            messages: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Build and validate a schema from message definitions.
    pub fn from_defs(version: impl Into<String>, defs: Vec<MessageDef>) -> Result<Self> {
        let mut schema = Self::new(version);
        for def in defs {
            schema.add(def)?;
        }
        schema.validate()?;
        Ok(schema)
    }

    /// Add a message definition, rejecting duplicate names.
    pub fn add(&mut self, def: MessageDef) -> Result<()> {
        if self.index.contains_key(&def.name) {
            return Err(CodecError::invalid_schema(
                &def.name,
                "duplicate message definition",
            ));
        }
        self.index.insert(def.name.clone(), self.messages.len());
        self.messages.push(def);
        Ok(())
    }

    /// Look up a message by name.
    pub fn get(&self, name: &str) -> Option<&MessageDef> {
        self.index.get(name).map(|&i| &self.messages[i])
    }

    /// Look up a message by name, failing with [`CodecError::TypeNotFound`].
    pub fn require(&self, name: &str) -> Result<&MessageDef> {
        self.get(name).ok_or_else(|| CodecError::type_not_found(name))
    }

    /// Whether a message with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// The root (first declared) message.
    pub fn root(&self) -> Option<&MessageDef> {
        self.messages.first()
    }

    /// All messages in declaration order.
    pub fn messages(&self) -> &[MessageDef] {
        &self.messages
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the schema has no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Check structural soundness.
    ///
    /// Rejects an empty schema, duplicate field names, fields with more than
    /// [`MAX_ARRAY_DIMENSIONS`] array layers, references to undefined
    /// messages and reference cycles. A cyclic definition cannot be
    /// encoded without framing, so it is refused rather than supported.
    pub fn validate(&self) -> Result<()> {
        if self.messages.is_empty() {
            return Err(CodecError::invalid_schema("schema", "no messages defined"));
        }

        for def in &self.messages {
            let mut seen = std::collections::HashSet::new();
            for field in &def.fields {
                if !seen.insert(field.name.as_str()) {
                    return Err(CodecError::invalid_schema(
                        &def.name,
                        format!("duplicate field '{}'", field.name),
                    ));
                }
                if field.field_type.dimensions() > MAX_ARRAY_DIMENSIONS {
                    return Err(CodecError::invalid_schema(
                        &def.name,
                        format!(
                            "field '{}' has more than {MAX_ARRAY_DIMENSIONS} array dimensions",
                            field.name
                        ),
                    ));
                }
                if let Some(target) = field.field_type.message_name() {
                    if !self.contains(target) {
                        return Err(CodecError::invalid_schema(
                            &def.name,
                            format!("unknown type '{}' for field '{}'", target, field.name),
                        ));
                    }
                }
            }
        }

        self.check_acyclic()
    }

    fn check_acyclic(&self) -> Result<()> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            InProgress,
            Done,
        }

        fn visit(schema: &Schema, at: usize, marks: &mut [Mark], path: &mut Vec<usize>) -> Result<()> {
            match marks[at] {
                Mark::Done => return Ok(()),
                Mark::InProgress => {
                    let start = path.iter().position(|&i| i == at).unwrap_or(0);
                    let mut names: Vec<&str> = path[start..]
                        .iter()
                        .map(|&i| schema.messages[i].name.as_str())
                        .collect();
                    names.push(&schema.messages[at].name);
                    return Err(CodecError::invalid_schema(
                        &schema.messages[at].name,
                        format!("reference cycle: {}", names.join(" -> ")),
                    ));
                }
                Mark::Unvisited => {}
            }

            marks[at] = Mark::InProgress;
            path.push(at);
            for target in schema.messages[at].references() {
                if let Some(&next) = schema.index.get(target) {
                    visit(schema, next, marks, path)?;
                }
            }
            path.pop();
            marks[at] = Mark::Done;
            Ok(())
        }

        let mut marks = vec![Mark::Unvisited; self.messages.len()];
        let mut path = Vec::new();
        for at in 0..self.messages.len() {
            visit(self, at, &mut marks, &mut path)?;
        }
        Ok(())
    }
}
