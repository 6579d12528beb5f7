//! Descriptor to generated source, end to end.

use std::collections::HashSet;

use prost::Message;
use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{
    DescriptorProto, EnumDescriptorProto, EnumValueDescriptorProto, FieldDescriptorProto, FileDescriptorProto,
    FileDescriptorSet, MessageOptions, OneofDescriptorProto,
};

use encode_compiler::schema::descriptor::{files_from_descriptor_set, files_from_descriptors};
use encode_compiler::{CompilerError, Generator, GeneratorConfig};

fn scalar(name: &str, number: i32, typ: Type) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_string()),
        number: Some(number),
        label: Some(Label::Optional as i32),
        r#type: Some(typ as i32),
        ..Default::default()
    }
}

fn reference(name: &str, number: i32, typ: Type, type_name: &str) -> FieldDescriptorProto {
    FieldDescriptorProto {
        type_name: Some(type_name.to_string()),
        ..scalar(name, number, typ)
    }
}

fn in_oneof(field: FieldDescriptorProto, index: i32) -> FieldDescriptorProto {
    FieldDescriptorProto {
        oneof_index: Some(index),
        ..field
    }
}

fn proto3_optional(field: FieldDescriptorProto, index: i32) -> FieldDescriptorProto {
    FieldDescriptorProto {
        proto3_optional: Some(true),
        oneof_index: Some(index),
        ..field
    }
}

fn oneof(name: &str) -> OneofDescriptorProto {
    OneofDescriptorProto {
        name: Some(name.to_string()),
        ..Default::default()
    }
}

fn status(values: &[(&str, i32)]) -> EnumDescriptorProto {
    enumeration("Status", values)
}

fn enumeration(name: &str, values: &[(&str, i32)]) -> EnumDescriptorProto {
    EnumDescriptorProto {
        name: Some(name.to_string()),
        value: values
            .iter()
            .map(|(name, number)| EnumValueDescriptorProto {
                name: Some(name.to_string()),
                number: Some(*number),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}

/// acme.v1 and acme.v2 `User`/`Status`, the schema behind
/// `fixtures/user_encoders.rs`.
fn acme_files() -> Vec<FileDescriptorProto> {
    let v1 = FileDescriptorProto {
        name: Some("acme/v1/user.proto".to_string()),
        package: Some("acme.v1".to_string()),
        syntax: Some("proto3".to_string()),
        message_type: vec![DescriptorProto {
            name: Some("User".to_string()),
            field: vec![
                scalar("id", 1, Type::Int64),
                scalar("name", 2, Type::String),
                reference("status", 3, Type::Enum, ".acme.v1.Status"),
                in_oneof(scalar("email", 4, Type::String), 0),
                in_oneof(scalar("phone", 5, Type::String), 0),
                scalar("legacy_code", 6, Type::Int32),
                scalar("avatar", 7, Type::Bytes),
            ],
            oneof_decl: vec![oneof("contact")],
            ..Default::default()
        }],
        enum_type: vec![status(&[("STATUS_UNKNOWN", 0), ("STATUS_ACTIVE", 1), ("STATUS_BANNED", 2)])],
        ..Default::default()
    };

    let v2 = FileDescriptorProto {
        name: Some("acme/v2/user.proto".to_string()),
        package: Some("acme.v2".to_string()),
        syntax: Some("proto3".to_string()),
        message_type: vec![DescriptorProto {
            name: Some("User".to_string()),
            field: vec![
                scalar("id", 1, Type::Int64),
                scalar("name", 2, Type::String),
                reference("status", 3, Type::Enum, ".acme.v2.Status"),
                proto3_optional(scalar("email", 4, Type::String), 1),
                scalar("phone", 5, Type::String),
                in_oneof(scalar("avatar", 6, Type::Bytes), 0),
                scalar("nickname", 7, Type::String),
            ],
            oneof_decl: vec![oneof("media"), oneof("_email")],
            ..Default::default()
        }],
        enum_type: vec![status(&[("STATUS_UNKNOWN", 0), ("STATUS_ACTIVE", 1), ("STATUS_SUSPENDED", 2)])],
        ..Default::default()
    };

    vec![v1, v2]
}

fn acme_config() -> GeneratorConfig {
    GeneratorConfig::from_parameter(
        "mapping=acme.v1.User:acme.v2.User,mapping=acme.v1.Status:acme.v2.Status,types_root=crate::pb",
    )
    .unwrap()
}

/// media.v1 and media.v2 `Asset`/`Layout`, the schema behind
/// `fixtures/asset_encoders.rs`. Byte strings gain or lose presence between
/// the versions.
fn media_files() -> Vec<FileDescriptorProto> {
    let v1 = FileDescriptorProto {
        name: Some("media/v1/asset.proto".to_string()),
        package: Some("media.v1".to_string()),
        syntax: Some("proto3".to_string()),
        message_type: vec![DescriptorProto {
            name: Some("Asset".to_string()),
            field: vec![
                proto3_optional(scalar("data", 1, Type::Bytes), 0),
                scalar("thumbnail", 2, Type::Bytes),
                proto3_optional(scalar("checksum", 3, Type::Bytes), 1),
                in_oneof(scalar("preview", 4, Type::Bytes), 2),
            ],
            oneof_decl: vec![oneof("_data"), oneof("_checksum"), oneof("source")],
            ..Default::default()
        }],
        enum_type: vec![enumeration(
            "Layout",
            &[("LAYOUT_UNKNOWN", 0), ("LAYOUT_2D", 1), ("LAYOUT_3D", 2)],
        )],
        ..Default::default()
    };

    let v2 = FileDescriptorProto {
        name: Some("media/v2/asset.proto".to_string()),
        package: Some("media.v2".to_string()),
        syntax: Some("proto3".to_string()),
        message_type: vec![DescriptorProto {
            name: Some("Asset".to_string()),
            field: vec![
                scalar("data", 1, Type::Bytes),
                proto3_optional(scalar("thumbnail", 2, Type::Bytes), 0),
                proto3_optional(scalar("checksum", 3, Type::Bytes), 1),
                proto3_optional(scalar("preview", 4, Type::Bytes), 2),
                proto3_optional(scalar("signature", 5, Type::Bytes), 3),
            ],
            oneof_decl: vec![oneof("_thumbnail"), oneof("_checksum"), oneof("_preview"), oneof("_signature")],
            ..Default::default()
        }],
        enum_type: vec![enumeration("Layout", &[("LAYOUT_UNKNOWN", 0), ("LAYOUT_2D", 1)])],
        ..Default::default()
    };

    vec![v1, v2]
}

fn code_lines(source: &str) -> Vec<&str> {
    source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("//"))
        .collect()
}

fn assert_contains_fixture(generated: &str, fixture: &str) {
    let generated_lines: HashSet<&str> = code_lines(generated).into_iter().collect();
    for line in code_lines(fixture) {
        assert!(
            generated_lines.contains(line),
            "missing line {:?} in generated unit:\n{}",
            line,
            generated
        );
    }
}

#[test]
fn test_generated_unit_matches_runtime_fixture() {
    let files = files_from_descriptors(&acme_files()).unwrap();
    let generated = Generator::new(acme_config()).generate(&files).unwrap();

    assert_contains_fixture(&generated.content, include_str!("fixtures/user_encoders.rs"));
}

#[test]
fn test_byte_presence_unit_matches_runtime_fixture() {
    let files = files_from_descriptors(&media_files()).unwrap();
    let config = GeneratorConfig::from_parameter(
        "mapping=media.v1.Asset:media.v2.Asset,mapping=media.v1.Layout:media.v2.Layout,types_root=crate::pb",
    )
    .unwrap();
    let generated = Generator::new(config).generate(&files).unwrap();

    assert_contains_fixture(&generated.content, include_str!("fixtures/asset_encoders.rs"));
    assert!(generated.content.contains("/// An empty `preview` becomes absent."));

    let report = Generator::new(GeneratorConfig::from_parameter("mapping=media.v1.Asset:media.v2.Asset").unwrap())
        .classify(&files)
        .unwrap();
    assert_eq!(report[0].common, vec!["data", "thumbnail", "checksum", "preview"]);
    assert_eq!(report[0].extra, vec!["signature"]);
}

#[test]
fn test_generated_unit_layout() {
    let files = files_from_descriptors(&acme_files()).unwrap();
    let generated = Generator::new(acme_config()).generate(&files).unwrap();
    let content = &generated.content;

    assert_eq!(generated.name, "encode.rs");
    assert!(content.starts_with("// Code generated by protoc-gen-encode. DO NOT EDIT.\n"));

    // Message declarations precede enum declarations, following directive order.
    let user = content.find("pub struct AcmeV1UserToAcmeV2UserEncoder<C>").unwrap();
    let status = content.find("pub struct AcmeV1StatusToAcmeV2StatusEncoder<C>").unwrap();
    assert!(user < status);

    // Changed and dropped fields appear in input order, extra fields after them.
    let status_fn = content.find("pub type AcmeV1UserToAcmeV2UserStatusEncoder<C>").unwrap();
    let phone_fn = content.find("pub type AcmeV1UserToAcmeV2UserPhoneEncoder<C>").unwrap();
    let legacy_ack = content.find("pub struct AcmeV1UserToAcmeV2UserLegacyCodeAckMissing;").unwrap();
    let nickname_fn = content.find("pub type AcmeV1UserToAcmeV2UserNicknameEncoder<C>").unwrap();
    assert!(status_fn < phone_fn && phone_fn < legacy_ack && legacy_ack < nickname_fn);
}

#[test]
fn test_descriptor_set_input() {
    let set = FileDescriptorSet { file: acme_files() };
    let files = files_from_descriptor_set(&set.encode_to_vec()).unwrap();

    let report = Generator::new(acme_config()).classify(&files).unwrap();
    assert_eq!(report[0].common, vec!["id", "name", "email", "avatar"]);
    assert_eq!(report[0].changed, vec!["status", "phone"]);
    assert_eq!(report[0].extra, vec!["nickname"]);
    assert_eq!(report[0].missing, vec!["legacy_code"]);

    assert_eq!(report[1].common, vec!["STATUS_UNKNOWN", "STATUS_ACTIVE"]);
    assert_eq!(report[1].extra, vec!["STATUS_SUSPENDED"]);
    assert_eq!(report[1].missing, vec!["STATUS_BANNED"]);
}

#[test]
fn test_map_and_nested_fields() {
    let entry = DescriptorProto {
        name: Some("LabelsEntry".to_string()),
        field: vec![scalar("key", 1, Type::String), scalar("value", 2, Type::Int32)],
        options: Some(MessageOptions {
            map_entry: Some(true),
            ..Default::default()
        }),
        ..Default::default()
    };
    let address = DescriptorProto {
        name: Some("Address".to_string()),
        field: vec![scalar("city", 1, Type::String)],
        ..Default::default()
    };
    let labels = FieldDescriptorProto {
        label: Some(Label::Repeated as i32),
        ..reference("labels", 1, Type::Message, ".shop.OrderV1.LabelsEntry")
    };
    let labels_v2 = FieldDescriptorProto {
        label: Some(Label::Repeated as i32),
        ..reference("labels", 1, Type::Message, ".shop.OrderV2.LabelsEntry")
    };

    let file = FileDescriptorProto {
        name: Some("shop.proto".to_string()),
        package: Some("shop".to_string()),
        syntax: Some("proto3".to_string()),
        message_type: vec![
            DescriptorProto {
                name: Some("OrderV1".to_string()),
                field: vec![labels, reference("ship_to", 2, Type::Message, ".shop.OrderV1.Address")],
                nested_type: vec![entry.clone(), address.clone()],
                ..Default::default()
            },
            DescriptorProto {
                name: Some("OrderV2".to_string()),
                field: vec![labels_v2, reference("ship_to", 2, Type::Message, ".shop.OrderV2.Address")],
                nested_type: vec![entry, address],
                ..Default::default()
            },
        ],
        ..Default::default()
    };

    let files = files_from_descriptors(&[file]).unwrap();
    let config = GeneratorConfig::from_parameter("mapping=shop.OrderV1:shop.OrderV2").unwrap();
    let content = Generator::new(config).generate(&files).unwrap().content;

    // Structurally equal maps are common even though the entry records differ.
    assert!(content.contains(
        "pub labels: Box<dyn Fn(::std::collections::HashMap<String, i32>, &C) -> Result<::std::collections::HashMap<String, i32>, EncodeError>>,"
    ));
    // Nested records are compared by identity, so `ship_to` changed.
    assert!(content.contains(
        "pub type ShopOrderV1ToShopOrderV2ShipToEncoder<C> = Box<dyn Fn(Option<crate::shop::order_v1::Address>, &C) -> Result<Option<crate::shop::order_v2::Address>, EncodeError>>;"
    ));
}

#[test]
fn test_one_sided_mapping_is_an_error() {
    let files = files_from_descriptors(&acme_files()).unwrap();
    let config = GeneratorConfig::from_parameter("mapping=acme.v1.Status:acme.v3.Status").unwrap();

    let err = Generator::new(config).generate(&files).unwrap_err();
    assert!(matches!(err, CompilerError::UnresolvedCounterpart { .. }));
    assert_eq!(err.to_string(), "output enum \"acme.v3.Status\" not found");
}

#[test]
fn test_record_to_enum_mapping_is_an_error() {
    let files = files_from_descriptors(&acme_files()).unwrap();
    let config = GeneratorConfig::from_parameter("mapping=acme.v1.User:acme.v2.Status").unwrap();

    let err = Generator::new(config).generate(&files).unwrap_err();
    assert_eq!(err.to_string(), "output message \"acme.v2.Status\" not found");
}

#[test]
fn test_unknown_reference_is_an_error() {
    let mut files = acme_files();
    files[1].message_type[0].field[2].type_name = Some(".acme.v2.Missing".to_string());
    let files = files_from_descriptors(&files).unwrap();

    let err = Generator::new(acme_config()).generate(&files).unwrap_err();
    assert!(matches!(err, CompilerError::UnknownTypeReference { name } if name == "acme.v2.Missing"));
}

#[test]
fn test_write_generated_unit() {
    let dir = tempfile::TempDir::new().unwrap();
    let files = files_from_descriptors(&acme_files()).unwrap();
    let mut config = acme_config();
    config.filename = "gen/acme_encode.rs".to_string();

    let generated = Generator::new(config).generate(&files).unwrap();
    let path = generated.write_to(dir.path()).unwrap();

    assert_eq!(path, dir.path().join("gen/acme_encode.rs"));
    assert_eq!(std::fs::read_to_string(path).unwrap(), generated.content);
}
