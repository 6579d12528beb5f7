//! Names of synthesized declarations.
//!
//! Every name is derived from the qualified names of the two definitions of a
//! directive, so the same directive always yields the same identifiers and
//! two directives never share one.
//!
//! | Declaration | Name |
//! |-------------|------|
//! | conversion type | `<Input>To<Output>Encoder` |
//! | changed/extra field function | `<Input>To<Output><Field>Encoder` |
//! | dropped field/value marker | `<Input>To<Output><Field>AckMissing` |
//! | enum override hook | `<Input>To<Output>ExtraEncoder` |

use super::rust_types::{to_upper_camel, upper_first};
use crate::schema::{EnumDiff, FieldMapping, MessageDiff, TypeName};

/// Flattens a qualified name into one identifier.
///
/// Each package segment has its first character upper-cased and is joined
/// directly to the rest, followed by the record path: `acme.v1.User`
/// becomes `AcmeV1User` and `acme.v1.Outer.Inner` becomes `AcmeV1OuterInner`.
pub fn unique_name(name: &TypeName) -> String {
    name.package
        .split('.')
        .filter(|s| !s.is_empty())
        .chain(name.path.iter().map(String::as_str))
        .map(upper_first)
        .collect()
}

/// Naming scope for one directive.
#[derive(Debug, Clone)]
pub struct EncoderNames {
    stem: String,
}

impl EncoderNames {
    pub fn new(input: &TypeName, output: &TypeName) -> Self {
        Self {
            stem: format!("{}To{}", unique_name(input), unique_name(output)),
        }
    }

    /// The generic conversion type.
    pub fn encoder(&self) -> String {
        format!("{}Encoder", self.stem)
    }

    /// Function type for a changed or extra field.
    pub fn field_encoder(&self, field: &str) -> String {
        format!("{}{}Encoder", self.stem, to_upper_camel(field))
    }

    /// Acknowledgment type for a dropped field or value.
    pub fn ack_missing(&self, name: &str) -> String {
        format!("{}{}AckMissing", self.stem, to_upper_camel(name))
    }

    /// Override hook type of an enum conversion.
    pub fn extra_encoder(&self) -> String {
        format!("{}ExtraEncoder", self.stem)
    }
}

/// Every type name the declarations of a record pair introduce.
pub fn message_declarations(diff: &MessageDiff<'_>) -> Vec<String> {
    let names = EncoderNames::new(&diff.input.type_name, &diff.output.type_name);
    let mut declared = vec![names.encoder()];
    for mapping in &diff.fields {
        if !matches!(mapping, FieldMapping::Common { .. }) {
            declared.push(names.field_encoder(&mapping.output().name));
        }
    }
    declared.extend(diff.missing.iter().map(|m| names.ack_missing(&m.input.name)));
    declared
}

/// Every type name the declarations of an enumeration pair introduce.
pub fn enum_declarations(diff: &EnumDiff<'_>) -> Vec<String> {
    let names = EncoderNames::new(&diff.input.type_name, &diff.output.type_name);
    let mut declared = vec![names.encoder(), names.extra_encoder()];
    declared.extend(diff.missing.iter().map(|v| names.ack_missing(&v.name)));
    declared
}
