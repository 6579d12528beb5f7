//! Compiler error types.
#![allow(unused_assignments)]

use std::fmt;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Which side of a mapping directive a name came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Input,
    Output,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Input => f.write_str("input"),
            Side::Output => f.write_str("output"),
        }
    }
}

/// The namespace a name was resolved in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionKind {
    Message,
    Enum,
}

impl fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefinitionKind::Message => f.write_str("message"),
            DefinitionKind::Enum => f.write_str("enum"),
        }
    }
}

/// Errors that can occur while generating encoders.
#[allow(unused_assignments)]
#[derive(Error, Diagnostic, Debug)]
pub enum CompilerError {
    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("Failed to access '{path}': {message}")]
    #[diagnostic(code(encode::io::access_failed))]
    IoError {
        path: PathBuf,
        message: String,
    },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Invalid mapping {value:?}. Must be of the form input:output")]
    #[diagnostic(
        code(encode::config::malformed_mapping),
        help("Use fully qualified names, e.g. mapping=acme.v1.User:acme.v2.User")
    )]
    MalformedMapping {
        value: String,
    },

    #[error("Invalid parameter {parameter:?}. Must be of the form name=value")]
    #[diagnostic(code(encode::config::malformed_parameter))]
    MalformedParameter {
        parameter: String,
    },

    #[error("Unknown parameter {name:?}")]
    #[diagnostic(
        code(encode::config::unknown_parameter),
        help("Recognized parameters: mapping, filename, module_path, types_root")
    )]
    UnknownParameter {
        name: String,
    },

    // =========================================================================
    // Resolution Errors
    // =========================================================================
    #[error("{side} {kind} {name:?} not found")]
    #[diagnostic(
        code(encode::resolve::unresolved_counterpart),
        help("Both names of a mapping must be messages, or both must be enums")
    )]
    UnresolvedCounterpart {
        side: Side,
        kind: DefinitionKind,
        name: String,
    },

    #[error("Unknown type reference: {name}")]
    #[diagnostic(code(encode::resolve::unknown_reference))]
    UnknownTypeReference {
        name: String,
    },

    // =========================================================================
    // Generation Errors
    // =========================================================================
    #[error("Generated name {name} is declared by both {first} and {second}")]
    #[diagnostic(
        code(encode::codegen::name_collision),
        help("Names flatten packages and nesting, so acme.v1.User and acme.V1User collide. Rename one definition or split the mappings into separate runs")
    )]
    NameCollision {
        name: String,
        first: String,
        second: String,
    },

    // =========================================================================
    // Descriptor Errors
    // =========================================================================
    #[error("Invalid descriptor for '{element}': {message}")]
    #[diagnostic(code(encode::descriptor::invalid))]
    InvalidDescriptor {
        element: String,
        message: String,
    },

    #[error("Failed to decode {what}: {message}")]
    #[diagnostic(code(encode::descriptor::decode_failed))]
    DescriptorDecode {
        what: String,
        message: String,
    },
}

impl CompilerError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::IoError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn invalid_descriptor(element: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            element: element.into(),
            message: message.into(),
        }
    }
}
