//! In-memory schema model.
//!
//! This is the shape of a compilation unit as the rest of the compiler sees it.
//! It is produced by a front end (see [`super::descriptor`]) and never mutated
//! afterwards.

use std::fmt;

use serde::Serialize;

/// A fully qualified definition name split into its package and its path
/// within the package.
///
/// `acme.v1.Outer.Inner` in package `acme.v1` is
/// `TypeName { package: "acme.v1", path: ["Outer", "Inner"] }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypeName {
    pub package: String,
    pub path: Vec<String>,
}

impl TypeName {
    pub fn new(package: impl Into<String>, path: Vec<String>) -> Self {
        Self {
            package: package.into(),
            path,
        }
    }

    /// A top-level definition in `package`.
    pub fn top_level(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(package, vec![name.into()])
    }

    /// A definition nested directly inside `self`.
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut path = self.path.clone();
        path.push(name.into());
        Self {
            package: self.package.clone(),
            path,
        }
    }

    /// The unqualified name of the definition.
    pub fn name(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or_default()
    }

    /// Names of the enclosing records, outermost first.
    pub fn parents(&self) -> &[String] {
        match self.path.split_last() {
            Some((_, parents)) => parents,
            None => &[],
        }
    }

    /// Dotted fully qualified name, without a leading dot.
    pub fn full_name(&self) -> String {
        let path = self.path.join(".");
        if self.package.is_empty() {
            path
        } else {
            format!("{}.{}", self.package, path)
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}

/// Scalar kinds, collapsed to what matters for the generated Rust type.
///
/// Wire encodings that share a Rust representation (`sint32`, `sfixed32` and
/// `int32`, for instance) share a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    Bool,
    Int32,
    Int64,
    Uint32,
    Uint64,
    Float,
    Double,
    String,
    Bytes,
}

/// What a field holds before any list/map/optional wrapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Scalar(ScalarKind),
    /// Fully qualified record name.
    Record(String),
    /// Fully qualified enumeration name.
    Enum(String),
}

/// A field of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub name: String,
    pub number: i32,
    pub kind: FieldKind,
    /// Declared `repeated`. Map fields are repeated references to a map-entry record.
    pub repeated: bool,
    /// The field tracks presence separately from its value.
    pub has_presence: bool,
    /// Variant group (oneof) this field belongs to, if any.
    pub oneof: Option<String>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, number: i32, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            number,
            kind,
            repeated: false,
            has_presence: false,
            oneof: None,
        }
    }

    pub fn scalar(name: impl Into<String>, number: i32, kind: ScalarKind) -> Self {
        Self::new(name, number, FieldKind::Scalar(kind))
    }

    pub fn record(name: impl Into<String>, number: i32, full_name: impl Into<String>) -> Self {
        Self::new(name, number, FieldKind::Record(full_name.into()))
    }

    pub fn enumeration(name: impl Into<String>, number: i32, full_name: impl Into<String>) -> Self {
        Self::new(name, number, FieldKind::Enum(full_name.into()))
    }

    pub fn repeated(mut self) -> Self {
        self.repeated = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.has_presence = true;
        self
    }

    /// Places the field in a variant group. Group members always track presence.
    pub fn in_oneof(mut self, group: impl Into<String>) -> Self {
        self.oneof = Some(group.into());
        self.has_presence = true;
        self
    }

    /// prost wraps the field's value in `Option`: it tracks presence and is
    /// not an alternative of a variant group.
    pub fn prost_optional(&self) -> bool {
        self.has_presence && self.oneof.is_none() && !self.repeated
    }
}

/// A record (message) definition.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDef {
    pub type_name: TypeName,
    pub fields: Vec<FieldDef>,
    /// Variant groups in declaration order.
    pub oneofs: Vec<String>,
    pub records: Vec<RecordDef>,
    pub enums: Vec<EnumDef>,
    /// Synthetic key/value record backing a map field.
    pub map_entry: bool,
}

impl RecordDef {
    pub fn new(type_name: TypeName) -> Self {
        Self {
            type_name,
            fields: Vec::new(),
            oneofs: Vec::new(),
            records: Vec::new(),
            enums: Vec::new(),
            map_entry: false,
        }
    }

    pub fn with_field(mut self, field: FieldDef) -> Self {
        if let Some(group) = &field.oneof {
            if !self.oneofs.contains(group) {
                self.oneofs.push(group.clone());
            }
        }
        self.fields.push(field);
        self
    }

    pub fn with_record(mut self, record: RecordDef) -> Self {
        self.records.push(record);
        self
    }

    pub fn with_enum(mut self, enumeration: EnumDef) -> Self {
        self.enums.push(enumeration);
        self
    }

    pub fn full_name(&self) -> String {
        self.type_name.full_name()
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A single enumeration value.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumValueDef {
    pub name: String,
    pub number: i32,
}

/// An enumeration definition.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDef {
    pub type_name: TypeName,
    pub values: Vec<EnumValueDef>,
}

impl EnumDef {
    pub fn new(type_name: TypeName) -> Self {
        Self {
            type_name,
            values: Vec::new(),
        }
    }

    pub fn with_value(mut self, name: impl Into<String>, number: i32) -> Self {
        self.values.push(EnumValueDef {
            name: name.into(),
            number,
        });
        self
    }

    pub fn full_name(&self) -> String {
        self.type_name.full_name()
    }
}

/// One source file of the compilation unit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FileDef {
    pub name: String,
    pub package: String,
    pub records: Vec<RecordDef>,
    pub enums: Vec<EnumDef>,
}

impl FileDef {
    pub fn new(name: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            records: Vec::new(),
            enums: Vec::new(),
        }
    }

    pub fn with_record(mut self, record: RecordDef) -> Self {
        self.records.push(record);
        self
    }

    pub fn with_enum(mut self, enumeration: EnumDef) -> Self {
        self.enums.push(enumeration);
        self
    }
}
