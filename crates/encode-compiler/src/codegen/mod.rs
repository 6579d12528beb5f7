//! Rust code generation from classifications.
//!
//! Each synthesizer is a pure function from a classification to a list of
//! declarations. The driver collects the declarations of every directive and
//! hands them to [`render_unit`], which wraps them into the generated module:
//!
//! ```text
//! // Code generated by protoc-gen-encode. DO NOT EDIT.
//!
//! pub mod <module> {
//!     pub type EncodeError = ...;
//!     <declarations of directive 1>
//!     <declarations of directive 2>
//!     ...
//! }
//! ```

mod enumeration;
mod message;
pub mod naming;
pub mod rust_types;

use std::path::{Path, PathBuf};

use crate::diagnostic::CompilerError;

pub use enumeration::generate_enum;
pub use message::generate_message;
pub use rust_types::RustTypes;

/// First line of every generated file.
pub const HEADER: &str = "// Code generated by protoc-gen-encode. DO NOT EDIT.";

/// A generated source file.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFile {
    /// Path of the file, relative to the output directory.
    pub name: String,
    pub content: String,
}

impl GeneratedFile {
    /// Writes the file under `out_dir`, creating parent directories.
    pub fn write_to(&self, out_dir: &Path) -> Result<PathBuf, CompilerError> {
        let path = out_dir.join(&self.name);
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CompilerError::io(parent, e.to_string()))?;
        }
        std::fs::write(&path, &self.content).map_err(|e| CompilerError::io(&path, e.to_string()))?;
        Ok(path)
    }
}

/// Assembles the generated unit from the declarations of every directive.
pub fn render_unit(module: &str, declarations: &[String]) -> String {
    let mut source = SourceBuilder::default();
    source.line(HEADER);
    source.blank();
    source.line("#[allow(dead_code, non_camel_case_types, unused_mut, unused_variables, clippy::all)]");
    source.open(format!("pub mod {} {{", rust_types::field_ident(module)));
    source.doc("Error returned by every conversion function.");
    source.line("pub type EncodeError = Box<dyn ::std::error::Error + Send + Sync>;");
    for declaration in declarations {
        source.blank();
        source.block(declaration);
    }
    source.close("}");
    source.finish()
}

/// Line-oriented source text builder with indentation tracking.
#[derive(Debug, Default)]
pub(crate) struct SourceBuilder {
    out: String,
    depth: usize,
}

impl SourceBuilder {
    pub(crate) fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.out.push_str("    ");
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
        self
    }

    pub(crate) fn blank(&mut self) -> &mut Self {
        self.out.push('\n');
        self
    }

    /// Writes `text` and indents what follows.
    pub(crate) fn open(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.line(text);
        self.depth += 1;
        self
    }

    /// Dedents and writes `text`.
    pub(crate) fn close(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self.line(text)
    }

    pub(crate) fn indent(&mut self) -> &mut Self {
        self.depth += 1;
        self
    }

    pub(crate) fn doc(&mut self, text: impl AsRef<str>) -> &mut Self {
        for line in text.as_ref().lines() {
            if line.is_empty() {
                self.line("///");
            } else {
                self.line(format!("/// {}", line));
            }
        }
        self
    }

    /// Writes a pre-rendered fragment at the current indentation.
    pub(crate) fn block(&mut self, fragment: &str) -> &mut Self {
        for line in fragment.lines() {
            self.line(line);
        }
        self
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }
}
