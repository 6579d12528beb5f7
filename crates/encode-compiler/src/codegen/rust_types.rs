//! Rust type rendering for prost-generated code.

use crate::schema::{BaseType, FieldDef, FieldType, ScalarKind, TypeName};

/// Renders schema types as the Rust types prost generates for them.
#[derive(Debug, Clone)]
pub struct RustTypes {
    root: String,
}

impl RustTypes {
    /// `root` is the path prost's package modules hang off, e.g. `crate`.
    pub fn new(root: impl Into<String>) -> Self {
        Self { root: root.into() }
    }

    /// Path of a record or enumeration: package segments become modules and
    /// enclosing records become snake_case modules.
    pub fn path(&self, name: &TypeName) -> String {
        let mut segments = self.module_segments(name);
        segments.push(name.name().to_string());
        segments.join("::")
    }

    fn module_segments(&self, name: &TypeName) -> Vec<String> {
        let mut segments = vec![self.root.clone()];
        segments.extend(
            name.package
                .split('.')
                .filter(|s| !s.is_empty())
                .map(escape_module),
        );
        segments.extend(name.parents().iter().map(|p| escape_module(&to_snake_case(p))));
        segments.retain(|s| !s.is_empty());
        segments
    }

    /// The Rust type of a field with this signature.
    pub fn field_type(&self, typ: &FieldType) -> String {
        match typ {
            FieldType::Plain { base } => match base {
                BaseType::Record(name) => format!("Option<{}>", self.path(name)),
                other => self.element(other),
            },
            FieldType::Optional { base } => format!("Option<{}>", self.element(base)),
            FieldType::List { element } => format!("Vec<{}>", self.element(element)),
            FieldType::Map { key, value } => format!(
                "::std::collections::HashMap<{}, {}>",
                self.element(key),
                self.element(value)
            ),
        }
    }

    /// The Rust type a conversion function sees for `field`.
    ///
    /// This is [`Self::field_type`] of the signature, except that prost keeps
    /// presence for byte strings outside a oneof, which the signature does not
    /// record. Alternatives of a oneof are seen unwrapped from the group.
    pub fn value_type(&self, field: &FieldDef, typ: &FieldType) -> String {
        match typ {
            FieldType::Plain {
                base: base @ (BaseType::Scalar(_) | BaseType::Enum(_)),
            } if field.prost_optional() => format!("Option<{}>", self.element(base)),
            _ => self.field_type(typ),
        }
    }

    /// The Rust type of a value inside a list, a map or a oneof alternative.
    pub fn element(&self, base: &BaseType) -> String {
        match base {
            BaseType::Scalar(scalar) => scalar_type(*scalar).to_string(),
            BaseType::Record(name) => self.path(name),
            // prost stores enum values as their wire representation.
            BaseType::Enum(_) => "i32".to_string(),
        }
    }

    /// Path of the enum prost generates for a oneof of `record`.
    pub fn oneof_path(&self, record: &TypeName, oneof: &str) -> String {
        let mut segments = self.module_segments(record);
        segments.push(escape_module(&to_snake_case(record.name())));
        segments.push(to_upper_camel(oneof));
        segments.join("::")
    }
}

fn scalar_type(scalar: ScalarKind) -> &'static str {
    match scalar {
        ScalarKind::Bool => "bool",
        ScalarKind::Int32 => "i32",
        ScalarKind::Int64 => "i64",
        ScalarKind::Uint32 => "u32",
        ScalarKind::Uint64 => "u64",
        ScalarKind::Float => "f32",
        ScalarKind::Double => "f64",
        ScalarKind::String => "String",
        ScalarKind::Bytes => "Vec<u8>",
    }
}

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Field identifier as prost emits it: snake_case, raw when it is a keyword.
pub fn field_ident(name: &str) -> String {
    let snake = to_snake_case(name);
    match snake.as_str() {
        "self" | "super" | "crate" => format!("{}_", snake),
        s if KEYWORDS.contains(&s) => format!("r#{}", snake),
        _ => snake,
    }
}

/// Plain snake_case name safe to use as a prefix for local bindings.
pub fn local_name(name: &str) -> String {
    to_snake_case(name)
}

fn escape_module(name: &str) -> String {
    field_ident(name)
}

/// Enum variant identifier as prost emits it: UpperCamelCase, with the
/// enum's own name stripped when it prefixes the value.
pub fn enum_variant_ident(enum_name: &str, value_name: &str) -> String {
    let enum_camel = to_upper_camel(enum_name);
    let value_camel = to_upper_camel(value_name);
    match value_camel.strip_prefix(&enum_camel) {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_uppercase()) => rest.to_string(),
        _ => value_camel,
    }
}

/// Converts a snake_case, SCREAMING_CASE or camelCase name to UpperCamelCase.
pub fn to_upper_camel(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
            }
        })
        .collect()
}

/// Converts a name to snake_case.
pub fn to_snake_case(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Upper-cases the first character.
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

#[derive(Clone, Copy, PartialEq)]
enum WordMode {
    Boundary,
    Lowercase,
    Uppercase,
}

/// Splits a name into words the way prost's case conversion does.
///
/// Non-alphanumeric characters separate words. Inside a run, a word ends
/// before an upper-case letter that follows a lower-case one, and before the
/// last capital of an acronym followed by a lower-case letter. Digits
/// continue the case of the character before them.
fn split_words(s: &str) -> Vec<String> {
    let mut words = Vec::new();
    for run in s.split(|c: char| !c.is_alphanumeric()) {
        let chars: Vec<char> = run.chars().collect();
        let mut start = 0;
        let mut mode = WordMode::Boundary;

        for (i, pair) in chars.windows(2).enumerate() {
            let (c, next) = (pair[0], pair[1]);
            let next_mode = if c.is_lowercase() {
                WordMode::Lowercase
            } else if c.is_uppercase() {
                WordMode::Uppercase
            } else {
                mode
            };

            if next_mode == WordMode::Lowercase && next.is_uppercase() {
                words.push(chars[start..=i].iter().collect());
                start = i + 1;
                mode = WordMode::Boundary;
            } else if mode == WordMode::Uppercase && c.is_uppercase() && next.is_lowercase() {
                words.push(chars[start..i].iter().collect());
                start = i;
                mode = WordMode::Boundary;
            } else {
                mode = next_mode;
            }
        }
        if start < chars.len() {
            words.push(chars[start..].iter().collect());
        }
    }
    words
}
