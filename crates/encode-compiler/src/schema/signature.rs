//! Structural type signatures of fields.
//!
//! Two fields are type-equal when their signatures are equal. The signature
//! captures the scalar kind or the referenced definition, the list/map
//! wrapping and presence tracking, so moving a scalar into a oneof or making
//! it `optional` changes its signature.

use std::fmt;

use serde::Serialize;

use super::graph::SchemaGraph;
use super::model::{FieldDef, FieldKind, ScalarKind, TypeName};
use crate::diagnostic::CompilerError;

/// A field type without any wrapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum BaseType {
    Scalar(ScalarKind),
    Record(TypeName),
    Enum(TypeName),
}

impl BaseType {
    /// Whether the type's own empty state doubles as presence.
    ///
    /// Record references are nullable and byte strings have an empty state,
    /// so neither is ever wrapped in [`FieldType::Optional`].
    pub fn carries_presence(&self) -> bool {
        matches!(self, BaseType::Record(_) | BaseType::Scalar(ScalarKind::Bytes))
    }
}

/// The structural signature of a field.
///
/// The variants encode the wrapping invariants: a field is at most one of
/// list, map or optional, and lists and maps never track presence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "wrap", rename_all = "snake_case")]
pub enum FieldType {
    Plain { base: BaseType },
    Optional { base: BaseType },
    List { element: BaseType },
    Map { key: BaseType, value: BaseType },
}

impl FieldType {
    /// Derives the signature of `field`.
    ///
    /// Map fields are recognised as repeated references to a map-entry record;
    /// the entry's first field is the key and its second the value.
    pub fn of(field: &FieldDef, graph: &SchemaGraph<'_>) -> Result<Self, CompilerError> {
        if field.repeated {
            if let FieldKind::Record(name) = &field.kind {
                let entry = graph.record(name).ok_or_else(|| CompilerError::UnknownTypeReference {
                    name: name.clone(),
                })?;
                if entry.map_entry {
                    let (key, value) = match entry.fields.as_slice() {
                        [key, value, ..] => (key, value),
                        _ => {
                            return Err(CompilerError::invalid_descriptor(
                                entry.full_name(),
                                "map entry must declare a key and a value field",
                            ))
                        }
                    };
                    return Ok(FieldType::Map {
                        key: base_type(&key.kind, graph)?,
                        value: base_type(&value.kind, graph)?,
                    });
                }
            }
            return Ok(FieldType::List {
                element: base_type(&field.kind, graph)?,
            });
        }

        let base = base_type(&field.kind, graph)?;
        if field.has_presence && !base.carries_presence() {
            Ok(FieldType::Optional { base })
        } else {
            Ok(FieldType::Plain { base })
        }
    }
}

/// Whether two fields have equal signatures.
pub fn type_equal(a: &FieldDef, b: &FieldDef, graph: &SchemaGraph<'_>) -> Result<bool, CompilerError> {
    Ok(FieldType::of(a, graph)? == FieldType::of(b, graph)?)
}

fn base_type(kind: &FieldKind, graph: &SchemaGraph<'_>) -> Result<BaseType, CompilerError> {
    match kind {
        FieldKind::Scalar(scalar) => Ok(BaseType::Scalar(*scalar)),
        FieldKind::Record(name) => graph
            .record(name)
            .map(|record| BaseType::Record(record.type_name.clone()))
            .ok_or_else(|| CompilerError::UnknownTypeReference { name: name.clone() }),
        FieldKind::Enum(name) => graph
            .enumeration(name)
            .map(|enumeration| BaseType::Enum(enumeration.type_name.clone()))
            .ok_or_else(|| CompilerError::UnknownTypeReference { name: name.clone() }),
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaseType::Scalar(scalar) => {
                let name = match scalar {
                    ScalarKind::Bool => "bool",
                    ScalarKind::Int32 => "int32",
                    ScalarKind::Int64 => "int64",
                    ScalarKind::Uint32 => "uint32",
                    ScalarKind::Uint64 => "uint64",
                    ScalarKind::Float => "float",
                    ScalarKind::Double => "double",
                    ScalarKind::String => "string",
                    ScalarKind::Bytes => "bytes",
                };
                f.write_str(name)
            }
            BaseType::Record(name) | BaseType::Enum(name) => write!(f, "{}", name),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Plain { base } => write!(f, "{}", base),
            FieldType::Optional { base } => write!(f, "optional {}", base),
            FieldType::List { element } => write!(f, "repeated {}", element),
            FieldType::Map { key, value } => write!(f, "map<{}, {}>", key, value),
        }
    }
}
