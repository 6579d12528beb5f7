//! Front end: protobuf descriptors to the schema model.
//!
//! protoc hands plugins a `CodeGeneratorRequest` holding a
//! `FileDescriptorProto` for every file in the compilation, dependencies
//! included. This module lowers those descriptors into [`FileDef`]s.

use prost::Message;
use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{
    DescriptorProto, EnumDescriptorProto, FieldDescriptorProto, FileDescriptorProto,
    FileDescriptorSet,
};

use super::model::{EnumDef, EnumValueDef, FieldDef, FieldKind, FileDef, RecordDef, ScalarKind, TypeName};
use crate::diagnostic::CompilerError;

/// Lowers every file of a descriptor set.
pub fn files_from_descriptors(files: &[FileDescriptorProto]) -> Result<Vec<FileDef>, CompilerError> {
    files.iter().map(file_from_descriptor).collect()
}

/// Decodes a serialized `FileDescriptorSet` (the output of
/// `protoc --descriptor_set_out`) and lowers it.
pub fn files_from_descriptor_set(bytes: &[u8]) -> Result<Vec<FileDef>, CompilerError> {
    let set = FileDescriptorSet::decode(bytes).map_err(|e| CompilerError::DescriptorDecode {
        what: "FileDescriptorSet".to_string(),
        message: e.to_string(),
    })?;
    files_from_descriptors(&set.file)
}

/// Lowers a single file.
pub fn file_from_descriptor(file: &FileDescriptorProto) -> Result<FileDef, CompilerError> {
    let package = file.package().to_string();
    // proto2 is the default when the syntax field is absent.
    let proto2 = matches!(file.syntax(), "" | "proto2");

    let mut def = FileDef::new(file.name(), package.clone());
    for message in &file.message_type {
        let name = TypeName::top_level(package.clone(), message.name());
        def.records.push(record_from_descriptor(message, name, proto2)?);
    }
    for enumeration in &file.enum_type {
        let name = TypeName::top_level(package.clone(), enumeration.name());
        def.enums.push(enum_from_descriptor(enumeration, name));
    }
    Ok(def)
}

fn record_from_descriptor(
    message: &DescriptorProto,
    type_name: TypeName,
    proto2: bool,
) -> Result<RecordDef, CompilerError> {
    let mut record = RecordDef::new(type_name.clone());
    record.map_entry = message
        .options
        .as_ref()
        .map(|options| options.map_entry())
        .unwrap_or(false);

    // proto3 `optional` fields sit in a synthetic oneof which is not a
    // variant group.
    let real_oneof = |field: &FieldDescriptorProto| -> Option<String> {
        if field.proto3_optional() {
            return None;
        }
        let index = usize::try_from(field.oneof_index?).ok()?;
        message.oneof_decl.get(index).map(|oneof| oneof.name().to_string())
    };

    for oneof in &message.oneof_decl {
        let synthetic = message.field.iter().any(|f| {
            f.proto3_optional()
                && f.oneof_index
                    .and_then(|i| usize::try_from(i).ok())
                    .and_then(|i| message.oneof_decl.get(i))
                    .is_some_and(|o| o.name() == oneof.name())
        });
        if !synthetic {
            record.oneofs.push(oneof.name().to_string());
        }
    }

    for field in &message.field {
        let element = format!("{}.{}", type_name.full_name(), field.name());
        let kind = field_kind(field, &element)?;
        let repeated = field.label() == Label::Repeated;
        let oneof = real_oneof(field);
        let has_presence = if repeated {
            false
        } else {
            oneof.is_some()
                || field.proto3_optional()
                || matches!(kind, FieldKind::Record(_))
                || (proto2 && field.label() == Label::Optional)
        };

        record.fields.push(FieldDef {
            name: field.name().to_string(),
            number: field.number(),
            kind,
            repeated,
            has_presence,
            oneof,
        });
    }

    for nested in &message.nested_type {
        let nested_name = type_name.child(nested.name());
        record.records.push(record_from_descriptor(nested, nested_name, proto2)?);
    }
    for enumeration in &message.enum_type {
        let nested_name = type_name.child(enumeration.name());
        record.enums.push(enum_from_descriptor(enumeration, nested_name));
    }

    Ok(record)
}

fn enum_from_descriptor(enumeration: &EnumDescriptorProto, type_name: TypeName) -> EnumDef {
    EnumDef {
        type_name,
        values: enumeration
            .value
            .iter()
            .map(|value| EnumValueDef {
                name: value.name().to_string(),
                number: value.number(),
            })
            .collect(),
    }
}

fn field_kind(field: &FieldDescriptorProto, element: &str) -> Result<FieldKind, CompilerError> {
    if field.r#type.is_none() {
        return Err(CompilerError::invalid_descriptor(element, "field has no type"));
    }

    let scalar = match field.r#type() {
        Type::Bool => ScalarKind::Bool,
        Type::Int32 | Type::Sint32 | Type::Sfixed32 => ScalarKind::Int32,
        Type::Uint32 | Type::Fixed32 => ScalarKind::Uint32,
        Type::Int64 | Type::Sint64 | Type::Sfixed64 => ScalarKind::Int64,
        Type::Uint64 | Type::Fixed64 => ScalarKind::Uint64,
        Type::Float => ScalarKind::Float,
        Type::Double => ScalarKind::Double,
        Type::String => ScalarKind::String,
        Type::Bytes => ScalarKind::Bytes,
        Type::Message | Type::Group => {
            return Ok(FieldKind::Record(reference_name(field, element)?));
        }
        Type::Enum => {
            return Ok(FieldKind::Enum(reference_name(field, element)?));
        }
    };
    Ok(FieldKind::Scalar(scalar))
}

fn reference_name(field: &FieldDescriptorProto, element: &str) -> Result<String, CompilerError> {
    let name = field.type_name().trim_start_matches('.');
    if name.is_empty() {
        return Err(CompilerError::invalid_descriptor(element, "reference has no type name"));
    }
    Ok(name.to_string())
}
