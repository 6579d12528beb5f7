//! Message conversion synthesis.
//!
//! For a record pair the synthesizer emits, in order:
//!
//! 1. A function type per changed field and a marker per dropped field,
//!    following input declaration order
//! 2. A function type per extra field, following output declaration order
//! 3. The conversion type, holding one function per output field
//! 4. Its constructor and `encode` method
//!
//! Fields that sit in a oneof on either side are bridged: an input
//! alternative is extracted into a plain value when selected, and a present
//! output value becomes the selected alternative.

use super::naming::EncoderNames;
use super::rust_types::{field_ident, local_name, to_upper_camel, RustTypes};
use super::SourceBuilder;
use crate::schema::{BaseType, FieldDef, FieldMapping, FieldType, MessageDiff, ScalarKind};

/// Generates the declarations converting `diff.input` into `diff.output`.
pub fn generate_message(diff: &MessageDiff<'_>, types: &RustTypes) -> Vec<String> {
    let names = EncoderNames::new(&diff.input.type_name, &diff.output.type_name);
    let mut declarations = Vec::new();

    for field in &diff.input.fields {
        match mapping_of(diff, field) {
            Some(FieldMapping::Changed {
                input,
                output,
                input_type,
                output_type,
            }) => {
                let mut source = SourceBuilder::default();
                source.doc(format!(
                    "Converts `{}.{}` ({}) into `{}.{}` ({}).",
                    diff.input.full_name(),
                    input.name,
                    input_type,
                    diff.output.full_name(),
                    output.name,
                    output_type
                ));
                source.line(format!(
                    "pub type {}<C> = {};",
                    names.field_encoder(&output.name),
                    converter_type(&types.value_type(input, input_type), &types.value_type(output, output_type))
                ));
                declarations.push(source.finish());
            }
            Some(_) => {}
            None => {
                let mut source = SourceBuilder::default();
                source.doc(format!(
                    "Acknowledges that `{}.{}` is not carried into `{}`.",
                    diff.input.full_name(),
                    field.name,
                    diff.output.full_name()
                ));
                source.line(format!("pub struct {};", names.ack_missing(&field.name)));
                declarations.push(source.finish());
            }
        }
    }

    for mapping in &diff.fields {
        if let FieldMapping::Extra { output, typ } = mapping {
            let mut source = SourceBuilder::default();
            source.doc(format!(
                "Produces `{}.{}` ({}), which has no input counterpart.",
                diff.output.full_name(),
                output.name,
                typ
            ));
            source.line(format!(
                "pub type {}<C> = {};",
                names.field_encoder(&output.name),
                producer_type(&types.value_type(output, typ))
            ));
            declarations.push(source.finish());
        }
    }

    declarations.push(encoder_struct(diff, types, &names));
    declarations.push(encoder_impl(diff, types, &names));
    declarations
}

fn mapping_of<'d, 'a>(diff: &'d MessageDiff<'a>, field: &FieldDef) -> Option<&'d FieldMapping<'a>> {
    diff.fields.iter().find(|m| m.output().name == field.name)
}

fn converter_type(input: &str, output: &str) -> String {
    format!("Box<dyn Fn({}, &C) -> Result<{}, EncodeError>>", input, output)
}

fn producer_type(output: &str) -> String {
    format!("Box<dyn Fn(&C) -> Result<{}, EncodeError>>", output)
}

/// How the default function of a common field carries the value across.
///
/// Signatures ignore presence of byte strings, so a common field may still be
/// `Option<Vec<u8>>` on one side and `Vec<u8>` on the other.
enum Carry {
    Identity,
    EmptyAsAbsent,
    AbsentAsEmpty,
}

impl Carry {
    fn of(input: &str, output: &str) -> Self {
        if input == output {
            Carry::Identity
        } else if output == format!("Option<{}>", input) {
            Carry::EmptyAsAbsent
        } else {
            Carry::AbsentAsEmpty
        }
    }

    fn body(&self) -> &'static str {
        match self {
            Carry::Identity => "Ok(value)",
            Carry::EmptyAsAbsent => "Ok((!value.is_empty()).then_some(value))",
            Carry::AbsentAsEmpty => "Ok(value.unwrap_or_default())",
        }
    }
}

fn encoder_struct(diff: &MessageDiff<'_>, types: &RustTypes, names: &EncoderNames) -> String {
    let mut source = SourceBuilder::default();
    source.doc(format!(
        "Converts `{}` into `{}`.\n\nCommon fields are copied unchanged. Every other output field is produced\nby the function passed to [`{}::new`].",
        diff.input.full_name(),
        diff.output.full_name(),
        names.encoder()
    ));
    source.open(format!("pub struct {}<C> {{", names.encoder()));
    for mapping in &diff.fields {
        let output = mapping.output();
        let typ = match mapping {
            FieldMapping::Common { input, output, typ } => {
                converter_type(&types.value_type(input, typ), &types.value_type(output, typ))
            }
            FieldMapping::Changed { .. } | FieldMapping::Extra { .. } => format!("{}<C>", names.field_encoder(&output.name)),
        };
        source.line(format!("pub {}: {},", field_ident(&output.name), typ));
    }
    if diff.fields.is_empty() {
        source.line("_context: ::std::marker::PhantomData<fn(&C)>,");
    }
    source.close("}");
    source.finish()
}

fn encoder_impl(diff: &MessageDiff<'_>, types: &RustTypes, names: &EncoderNames) -> String {
    let mut source = SourceBuilder::default();
    constructor(&mut source, diff, types, names);
    source.blank();
    encode_method(&mut source, diff, types, names);
    source.finish()
}

/// Parameters follow input order for changed fields and acknowledgments, then
/// output order for extra fields.
fn constructor(source: &mut SourceBuilder, diff: &MessageDiff<'_>, types: &RustTypes, names: &EncoderNames) {
    let mut params = Vec::new();
    for field in &diff.input.fields {
        match mapping_of(diff, field) {
            Some(FieldMapping::Changed { output, .. }) => params.push(format!(
                "{}: {}<C>,",
                field_ident(&output.name),
                names.field_encoder(&output.name)
            )),
            Some(_) => {}
            None => params.push(format!("_{}: {},", local_name(&field.name), names.ack_missing(&field.name))),
        }
    }
    for mapping in &diff.fields {
        if let FieldMapping::Extra { output, .. } = mapping {
            params.push(format!(
                "{}: {}<C>,",
                field_ident(&output.name),
                names.field_encoder(&output.name)
            ));
        }
    }

    // Identity closures capture `C`, which boxing as `dyn Fn` requires to be 'static.
    let has_common = diff.fields.iter().any(|m| matches!(m, FieldMapping::Common { .. }));
    let bound = if has_common { "C: 'static" } else { "C" };

    source.open(format!("impl<{}> {}<C> {{", bound, names.encoder()));
    source.doc("Wires the caller's conversions. Common fields convert by identity.");
    for mapping in &diff.fields {
        if let FieldMapping::Common { input, output, typ } = mapping {
            match Carry::of(&types.value_type(input, typ), &types.value_type(output, typ)) {
                Carry::Identity => {}
                Carry::EmptyAsAbsent => {
                    source.doc(format!("\nAn empty `{}` becomes absent.", input.name));
                }
                Carry::AbsentAsEmpty => {
                    source.doc(format!("\nAn absent `{}` becomes empty.", input.name));
                }
            }
        }
    }
    if params.is_empty() {
        source.open("pub fn new() -> Self {");
    } else {
        source.open("pub fn new(");
        for param in &params {
            source.line(param);
        }
        source.close(") -> Self {").indent();
    }
    source.open("Self {");
    for mapping in &diff.fields {
        let ident = field_ident(&mapping.output().name);
        match mapping {
            FieldMapping::Common { input, output, typ } => {
                let input_rust = types.value_type(input, typ);
                let output_rust = types.value_type(output, typ);
                let carry = Carry::of(&input_rust, &output_rust);
                source.line(format!(
                    "{}: Box::new(|value: {}, _ctx: &C| -> Result<{}, EncodeError> {{ {} }}),",
                    ident,
                    input_rust,
                    output_rust,
                    carry.body()
                ));
            }
            _ => {
                source.line(format!("{},", ident));
            }
        }
    }
    if diff.fields.is_empty() {
        source.line("_context: ::std::marker::PhantomData,");
    }
    source.close("}");
    source.close("}");
    source.close("}");
}

fn encode_method(source: &mut SourceBuilder, diff: &MessageDiff<'_>, types: &RustTypes, names: &EncoderNames) {
    let input_path = types.path(&diff.input.type_name);
    let output_path = types.path(&diff.output.type_name);

    source.open(format!("impl<C> {}<C> {{", names.encoder()));
    source.doc("Converts `input`, stopping at the first failing field function.");
    for mapping in &diff.fields {
        let output = mapping.output();
        if let Some(group) = &output.oneof {
            if is_bytes(mapping.output_type()) {
                source.doc(format!("\nAn empty `{}` leaves `{}` unset.", output.name, group));
            }
        }
    }
    source.line("#[allow(clippy::field_reassign_with_default)]");
    source.open(format!(
        "pub fn encode(&self, input: {}, ctx: &C) -> Result<{}, EncodeError> {{",
        input_path, output_path
    ));

    let reads_input = diff.fields.iter().any(|m| m.input().is_some());
    let extracts_alternatives = diff
        .fields
        .iter()
        .any(|m| m.input().is_some_and(|f| f.oneof.is_some()));
    if !reads_input {
        source.line("let _ = input;");
    } else if extracts_alternatives {
        source.line("let mut input = input;");
    }
    if diff.fields.is_empty() {
        source.line("let _ = ctx;");
        source.line(format!("Ok({}::default())", output_path));
        source.close("}");
        source.close("}");
        return;
    }
    source.line(format!("let mut out = {}::default();", output_path));

    for mapping in &diff.fields {
        source.blank();
        convert_field(source, diff, types, mapping);
    }

    source.blank();
    source.line("Ok(out)");
    source.close("}");
    source.close("}");
}

fn convert_field(source: &mut SourceBuilder, diff: &MessageDiff<'_>, types: &RustTypes, mapping: &FieldMapping<'_>) {
    let output = mapping.output();
    let ident = field_ident(&output.name);
    let local = local_name(&output.name);

    match (mapping.input(), mapping.input_type()) {
        (Some(input), Some(input_type)) => {
            let argument = match &input.oneof {
                None => format!("input.{}", field_ident(&input.name)),
                Some(group) => {
                    let group_ident = field_ident(group);
                    let alternative = format!(
                        "{}::{}",
                        types.oneof_path(&diff.input.type_name, group),
                        to_upper_camel(&input.name)
                    );
                    let (selected, unselected) = if is_option(input_type) {
                        ("Some(value)", "None")
                    } else {
                        ("value", "Default::default()")
                    };
                    source.open(format!("let {}_in = match input.{}.take() {{", local, group_ident));
                    source.line(format!("Some({}(value)) => {},", alternative, selected));
                    source.open("other => {");
                    source.line(format!("input.{} = other;", group_ident));
                    source.line(unselected);
                    source.close("}");
                    source.close("};");
                    format!("{}_in", local)
                }
            };
            source.line(format!("let {}_out = (self.{})({}, ctx)?;", local, ident, argument));
        }
        _ => {
            source.line(format!("let {}_out = (self.{})(ctx)?;", local, ident));
        }
    }

    match &output.oneof {
        None => {
            source.line(format!("out.{} = {}_out;", ident, local));
        }
        Some(group) => {
            let group_ident = field_ident(group);
            let alternative = format!(
                "{}::{}",
                types.oneof_path(&diff.output.type_name, group),
                to_upper_camel(&output.name)
            );
            let typ = mapping.output_type();
            if is_option(typ) {
                source.open(format!("if let Some(value) = {}_out {{", local));
                source.line(format!("out.{} = Some({}(value));", group_ident, alternative));
                source.close("}");
            } else if is_bytes(typ) {
                source.open(format!("if !{}_out.is_empty() {{", local));
                source.line(format!("out.{} = Some({}({}_out));", group_ident, alternative, local));
                source.close("}");
            } else {
                source.line(format!("out.{} = Some({}({}_out));", group_ident, alternative, local));
            }
        }
    }
}

/// Whether the field's Rust type is an `Option`, so an unselected alternative
/// is `None`.
fn is_option(typ: &FieldType) -> bool {
    matches!(
        typ,
        FieldType::Optional { .. }
            | FieldType::Plain {
                base: BaseType::Record(_)
            }
    )
}

fn is_bytes(typ: &FieldType) -> bool {
    matches!(
        typ,
        FieldType::Plain {
            base: BaseType::Scalar(ScalarKind::Bytes)
        }
    )
}
