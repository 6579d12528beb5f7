//! Generator configuration.

use std::fmt;
use std::str::FromStr;

use crate::diagnostic::CompilerError;

/// A request to synthesize a conversion from `input` to `output`.
///
/// Both names are fully qualified, without a leading dot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MappingDirective {
    pub input: String,
    pub output: String,
}

impl MappingDirective {
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }
}

impl FromStr for MappingDirective {
    type Err = CompilerError;

    /// Parses `input:output`. Exactly one separator is allowed.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = value.split(':').collect();
        match parts.as_slice() {
            [input, output] => Ok(Self::new(*input, *output)),
            _ => Err(CompilerError::MalformedMapping {
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for MappingDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.input, self.output)
    }
}

/// Configuration for the encoder generator.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Conversions to synthesize, in emission order.
    pub mappings: Vec<MappingDirective>,

    /// Name of the generated file.
    pub filename: String,

    /// Path of the module the generated code is declared in. Its last
    /// segment names the emitted `pub mod`.
    pub module_path: String,

    /// Rust path under which the prost-generated types live.
    pub types_root: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            mappings: Vec::new(),
            filename: "encode.rs".to_string(),
            module_path: "encode".to_string(),
            types_root: "crate".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Parses a protoc plugin parameter string: `name=value` pairs separated
    /// by commas.
    pub fn from_parameter(parameter: &str) -> Result<Self, CompilerError> {
        let mut config = Self::default();
        for entry in parameter.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (name, value) = entry.split_once('=').ok_or_else(|| CompilerError::MalformedParameter {
                parameter: entry.to_string(),
            })?;
            config.set(name, value)?;
        }
        Ok(config)
    }

    /// Applies one named parameter.
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), CompilerError> {
        match name {
            "mapping" => self.mappings.push(value.parse()?),
            "filename" => self.filename = value.to_string(),
            "module_path" => self.module_path = value.to_string(),
            "types_root" => self.types_root = value.to_string(),
            _ => {
                return Err(CompilerError::UnknownParameter {
                    name: name.to_string(),
                })
            }
        }
        Ok(())
    }

    /// Identifier of the emitted module: the final segment of `module_path`.
    pub fn module_name(&self) -> &str {
        self.module_path
            .rsplit(['/', ':'])
            .find(|segment| !segment.is_empty())
            .unwrap_or(&self.module_path)
    }
}
