//! Enumeration conversion synthesis.

use super::naming::EncoderNames;
use super::rust_types::{enum_variant_ident, local_name, RustTypes};
use super::SourceBuilder;
use crate::schema::EnumDiff;

/// Generates the declarations converting `diff.input` values into
/// `diff.output` values.
///
/// Values are converted by name. Input values without an output counterpart
/// fall back to the output's default value, and the caller's override hook
/// may replace any result.
pub fn generate_enum(diff: &EnumDiff<'_>, types: &RustTypes) -> Vec<String> {
    let names = EncoderNames::new(&diff.input.type_name, &diff.output.type_name);
    let input_path = types.path(&diff.input.type_name);
    let output_path = types.path(&diff.output.type_name);
    let mut declarations = Vec::new();

    for value in &diff.missing {
        let mut source = SourceBuilder::default();
        source.doc(format!(
            "Acknowledges that `{}.{}` has no counterpart in `{}`.",
            diff.input.full_name(),
            value.name,
            diff.output.full_name()
        ));
        source.line(format!("pub struct {};", names.ack_missing(&value.name)));
        declarations.push(source.finish());
    }

    let mut source = SourceBuilder::default();
    source.doc("Overrides the converted value. Returning `None` keeps the value matched by name.");
    source.line(format!(
        "pub type {}<C> = Box<dyn Fn(&C) -> Result<Option<{}>, EncodeError>>;",
        names.extra_encoder(),
        output_path
    ));
    declarations.push(source.finish());

    let mut source = SourceBuilder::default();
    source.doc(format!(
        "Converts `{}` values into `{}` values.",
        diff.input.full_name(),
        diff.output.full_name()
    ));
    source.open(format!("pub struct {}<C> {{", names.encoder()));
    source.line(format!("pub extra_encoder: {}<C>,", names.extra_encoder()));
    source.close("}");
    declarations.push(source.finish());

    let mut source = SourceBuilder::default();
    source.open(format!("impl<C> {}<C> {{", names.encoder()));
    if diff.missing.is_empty() {
        source.line(format!(
            "pub fn new(extra_encoder: {}<C>) -> Self {{",
            names.extra_encoder()
        ));
    } else {
        source.open("pub fn new(");
        source.line(format!("extra_encoder: {}<C>,", names.extra_encoder()));
        for value in &diff.missing {
            source.line(format!("_{}: {},", local_name(&value.name), names.ack_missing(&value.name)));
        }
        source.close(") -> Self {");
    }
    source.indent();
    source.line("Self { extra_encoder }");
    source.close("}");
    source.blank();

    source.open(format!(
        "pub fn encode(&self, input: {}, ctx: &C) -> Result<{}, EncodeError> {{",
        input_path, output_path
    ));
    if diff.common.is_empty() {
        source.line("let _ = input;");
        source.line(format!("let out = {}::default();", output_path));
    } else {
        source.open("let out = match input {");
        for (input_value, output_value) in &diff.common {
            source.line(format!(
                "{}::{} => {}::{},",
                input_path,
                enum_variant_ident(diff.input.type_name.name(), &input_value.name),
                output_path,
                enum_variant_ident(diff.output.type_name.name(), &output_value.name)
            ));
        }
        if !diff.missing.is_empty() {
            source.line(format!("_ => {}::default(),", output_path));
        }
        source.close("};");
    }
    source.line("Ok((self.extra_encoder)(ctx)?.unwrap_or(out))");
    source.close("}");
    source.close("}");
    declarations.push(source.finish());

    declarations
}
