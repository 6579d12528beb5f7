//! Field and value classification between an input and an output definition.
//!
//! Output fields are matched to input fields by name and classified as:
//!
//! - **Common**: same name, equal signature - converted by identity
//! - **Changed**: same name, different signature - caller converts
//! - **Extra**: output only - caller produces from context
//! - **Missing**: input only - caller acknowledges the drop
//!
//! Enumerations are classified the same way by value name, without the
//! changed category.

use std::collections::HashMap;

use serde::Serialize;

use super::graph::SchemaGraph;
use super::model::{EnumDef, EnumValueDef, FieldDef, RecordDef};
use super::signature::FieldType;
use crate::diagnostic::CompilerError;

/// Classification category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Common,
    Changed,
    Extra,
    Missing,
}

/// How one output field is produced.
#[derive(Debug, Clone)]
pub enum FieldMapping<'a> {
    Common {
        input: &'a FieldDef,
        output: &'a FieldDef,
        typ: FieldType,
    },
    Changed {
        input: &'a FieldDef,
        output: &'a FieldDef,
        input_type: FieldType,
        output_type: FieldType,
    },
    Extra {
        output: &'a FieldDef,
        typ: FieldType,
    },
}

impl<'a> FieldMapping<'a> {
    pub fn category(&self) -> Category {
        match self {
            FieldMapping::Common { .. } => Category::Common,
            FieldMapping::Changed { .. } => Category::Changed,
            FieldMapping::Extra { .. } => Category::Extra,
        }
    }

    pub fn output(&self) -> &'a FieldDef {
        match self {
            FieldMapping::Common { output, .. }
            | FieldMapping::Changed { output, .. }
            | FieldMapping::Extra { output, .. } => output,
        }
    }

    /// The matching input field, absent for extra fields.
    pub fn input(&self) -> Option<&'a FieldDef> {
        match self {
            FieldMapping::Common { input, .. } | FieldMapping::Changed { input, .. } => Some(input),
            FieldMapping::Extra { .. } => None,
        }
    }

    pub fn input_type(&self) -> Option<&FieldType> {
        match self {
            FieldMapping::Common { typ, .. } => Some(typ),
            FieldMapping::Changed { input_type, .. } => Some(input_type),
            FieldMapping::Extra { .. } => None,
        }
    }

    pub fn output_type(&self) -> &FieldType {
        match self {
            FieldMapping::Common { typ, .. } | FieldMapping::Extra { typ, .. } => typ,
            FieldMapping::Changed { output_type, .. } => output_type,
        }
    }
}

/// An input field with no output counterpart.
#[derive(Debug, Clone)]
pub struct MissingField<'a> {
    pub input: &'a FieldDef,
    pub typ: FieldType,
}

/// Classification of an (input, output) record pair.
#[derive(Debug, Clone)]
pub struct MessageDiff<'a> {
    pub input: &'a RecordDef,
    pub output: &'a RecordDef,
    /// One entry per output field, in output declaration order.
    pub fields: Vec<FieldMapping<'a>>,
    /// Input-only fields, in input declaration order.
    pub missing: Vec<MissingField<'a>>,
}

impl<'a> MessageDiff<'a> {
    /// Output field names in `category`, in declaration order.
    pub fn names(&self, category: Category) -> Vec<&'a str> {
        match category {
            Category::Missing => self.missing.iter().map(|m| m.input.name.as_str()).collect(),
            _ => self
                .fields
                .iter()
                .filter(|m| m.category() == category)
                .map(|m| m.output().name.as_str())
                .collect(),
        }
    }

    pub fn summary(&self) -> Classification {
        Classification {
            kind: "message",
            input: self.input.full_name(),
            output: self.output.full_name(),
            common: to_owned(self.names(Category::Common)),
            changed: to_owned(self.names(Category::Changed)),
            extra: to_owned(self.names(Category::Extra)),
            missing: to_owned(self.names(Category::Missing)),
        }
    }

    /// Format the classification for display.
    pub fn format_changes(&self) -> String {
        let mut lines = Vec::new();

        for mapping in &self.fields {
            let line = match mapping {
                FieldMapping::Common { output, typ, .. } => {
                    format!("= Field '{}': {}", output.name, typ)
                }
                FieldMapping::Changed {
                    output,
                    input_type,
                    output_type,
                    ..
                } => format!(
                    "~ Field '{}' type changed: {} -> {}",
                    output.name, input_type, output_type
                ),
                FieldMapping::Extra { output, typ } => {
                    format!("+ Field '{}': {} (needs encoder)", output.name, typ)
                }
            };
            lines.push(format!("  {}", line));
        }

        for missing in &self.missing {
            lines.push(format!(
                "  - Field '{}' dropped (needs acknowledgment)",
                missing.input.name
            ));
        }

        lines.join("\n")
    }
}

/// Classification of an (input, output) enumeration pair.
#[derive(Debug, Clone)]
pub struct EnumDiff<'a> {
    pub input: &'a EnumDef,
    pub output: &'a EnumDef,
    /// Values present in both, as (input, output), in output declaration order.
    pub common: Vec<(&'a EnumValueDef, &'a EnumValueDef)>,
    /// Output-only values, in output declaration order.
    pub extra: Vec<&'a EnumValueDef>,
    /// Input-only values, in input declaration order.
    pub missing: Vec<&'a EnumValueDef>,
}

impl<'a> EnumDiff<'a> {
    pub fn summary(&self) -> Classification {
        Classification {
            kind: "enum",
            input: self.input.full_name(),
            output: self.output.full_name(),
            common: self.common.iter().map(|(_, out)| out.name.clone()).collect(),
            changed: Vec::new(),
            extra: self.extra.iter().map(|v| v.name.clone()).collect(),
            missing: self.missing.iter().map(|v| v.name.clone()).collect(),
        }
    }

    pub fn format_changes(&self) -> String {
        let mut lines = Vec::new();
        for (_, value) in &self.common {
            lines.push(format!("  = Value '{}'", value.name));
        }
        for value in &self.extra {
            lines.push(format!("  + Value '{}' (reachable through the extra encoder)", value.name));
        }
        for value in &self.missing {
            lines.push(format!("  - Value '{}' dropped (needs acknowledgment)", value.name));
        }
        lines.join("\n")
    }
}

/// Serializable, name-only view of a classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub kind: &'static str,
    pub input: String,
    pub output: String,
    pub common: Vec<String>,
    pub changed: Vec<String>,
    pub extra: Vec<String>,
    pub missing: Vec<String>,
}

/// Classify the fields of `output` against the fields of `input`.
pub fn diff_messages<'a>(
    input: &'a RecordDef,
    output: &'a RecordDef,
    graph: &SchemaGraph<'a>,
) -> Result<MessageDiff<'a>, CompilerError> {
    let input_fields: HashMap<&str, &FieldDef> =
        input.fields.iter().map(|f| (f.name.as_str(), f)).collect();

    let mut fields = Vec::with_capacity(output.fields.len());
    for field in &output.fields {
        let output_type = FieldType::of(field, graph)?;
        let mapping = match input_fields.get(field.name.as_str()) {
            None => FieldMapping::Extra {
                output: field,
                typ: output_type,
            },
            Some(input_field) => {
                let input_type = FieldType::of(input_field, graph)?;
                if input_type == output_type {
                    FieldMapping::Common {
                        input: input_field,
                        output: field,
                        typ: output_type,
                    }
                } else {
                    FieldMapping::Changed {
                        input: input_field,
                        output: field,
                        input_type,
                        output_type,
                    }
                }
            }
        };
        fields.push(mapping);
    }

    let mut missing = Vec::new();
    for field in &input.fields {
        if output.field(&field.name).is_none() {
            missing.push(MissingField {
                input: field,
                typ: FieldType::of(field, graph)?,
            });
        }
    }

    Ok(MessageDiff {
        input,
        output,
        fields,
        missing,
    })
}

/// Classify the values of `output` against the values of `input`.
pub fn diff_enums<'a>(input: &'a EnumDef, output: &'a EnumDef) -> EnumDiff<'a> {
    let input_values: HashMap<&str, &EnumValueDef> =
        input.values.iter().map(|v| (v.name.as_str(), v)).collect();

    let mut common = Vec::new();
    let mut extra = Vec::new();
    for value in &output.values {
        match input_values.get(value.name.as_str()) {
            Some(input_value) => common.push((*input_value, value)),
            None => extra.push(value),
        }
    }

    let missing = input
        .values
        .iter()
        .filter(|v| !output.values.iter().any(|o| o.name == v.name))
        .collect();

    EnumDiff {
        input,
        output,
        common,
        extra,
        missing,
    }
}

fn to_owned(names: Vec<&str>) -> Vec<String> {
    names.into_iter().map(str::to_string).collect()
}
