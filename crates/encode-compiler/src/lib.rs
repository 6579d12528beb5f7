//! # Encode Compiler
//!
//! This crate synthesizes typed conversion code between pairs of protobuf
//! definitions. Given a set of mapping directives (`input:output`), it
//! classifies how the output differs from the input and emits Rust code over
//! prost-generated types that performs every conversion it can prove and asks
//! the caller for the rest.
//!
//! ## Architecture
//!
//! ```text
//! FileDescriptorProto
//!        │
//!        ▼
//! ┌──────────────┐
//! │  Descriptor  │  Lower descriptors into the schema model
//! │  (→ FileDef) │
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │    Graph     │  Flat name lookup, nested definitions hoisted
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │     Diff     │  common / changed / extra / missing
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Codegen    │  Conversion types, constructors, encode methods
//! │  (→ Rust)    │
//! └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use encode_compiler::{Generator, GeneratorConfig};
//!
//! let config = GeneratorConfig::from_parameter("mapping=acme.v1.User:acme.v2.User")?;
//! let files = encode_compiler::schema::descriptor::files_from_descriptor_set(&bytes)?;
//!
//! let generated = Generator::new(config).generate(&files)?;
//! generated.write_to(Path::new("src/generated"))?;
//! ```

pub mod codegen;
pub mod config;
pub mod diagnostic;
pub mod schema;

use std::collections::{HashMap, HashSet};

pub use codegen::GeneratedFile;
pub use config::{GeneratorConfig, MappingDirective};
pub use diagnostic::CompilerError;
pub use schema::{Classification, FileDef};

use codegen::{naming, RustTypes};
use schema::{diff_enums, diff_messages, EnumDiff, MessageDiff, ResolvedPair, SchemaGraph};

/// Orchestrates resolution, classification and synthesis for every
/// configured mapping directive.
pub struct Generator {
    config: GeneratorConfig,
}

/// Classification of one resolved directive.
#[derive(Debug)]
pub enum DirectiveDiff<'a> {
    Message(MessageDiff<'a>),
    Enum(EnumDiff<'a>),
}

impl DirectiveDiff<'_> {
    pub fn summary(&self) -> Classification {
        match self {
            DirectiveDiff::Message(diff) => diff.summary(),
            DirectiveDiff::Enum(diff) => diff.summary(),
        }
    }

    pub fn format_changes(&self) -> String {
        match self {
            DirectiveDiff::Message(diff) => diff.format_changes(),
            DirectiveDiff::Enum(diff) => diff.format_changes(),
        }
    }

    /// The directive as written, `input:output`.
    fn mapping(&self) -> String {
        match self {
            DirectiveDiff::Message(diff) => format!("{}:{}", diff.input.full_name(), diff.output.full_name()),
            DirectiveDiff::Enum(diff) => format!("{}:{}", diff.input.full_name(), diff.output.full_name()),
        }
    }

    fn declared_names(&self) -> Vec<String> {
        match self {
            DirectiveDiff::Message(diff) => naming::message_declarations(diff),
            DirectiveDiff::Enum(diff) => naming::enum_declarations(diff),
        }
    }
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Synthesizes the conversion unit for every directive.
    ///
    /// Declarations are emitted in directive order. Directives whose names
    /// are both unknown, and repeats of an earlier directive, are skipped.
    /// Two directives whose generated type names coincide are an error.
    pub fn generate(&self, files: &[FileDef]) -> Result<GeneratedFile, CompilerError> {
        let graph = SchemaGraph::build(files);
        let types = RustTypes::new(self.config.types_root.as_str());

        let mut declared: HashMap<String, String> = HashMap::new();
        let mut declarations = Vec::new();
        for diff in self.diffs(&graph)? {
            let mapping = diff.mapping();
            for name in diff.declared_names() {
                if let Some(first) = declared.insert(name.clone(), mapping.clone()) {
                    return Err(CompilerError::NameCollision {
                        name,
                        first,
                        second: mapping,
                    });
                }
            }

            match &diff {
                DirectiveDiff::Message(diff) => declarations.extend(codegen::generate_message(diff, &types)),
                DirectiveDiff::Enum(diff) => declarations.extend(codegen::generate_enum(diff, &types)),
            }
        }

        tracing::debug!(
            file = %self.config.filename,
            declarations = declarations.len(),
            "Generated encoder unit"
        );

        Ok(GeneratedFile {
            name: self.config.filename.clone(),
            content: codegen::render_unit(self.config.module_name(), &declarations),
        })
    }

    /// Classifies every directive without synthesizing code.
    pub fn classify(&self, files: &[FileDef]) -> Result<Vec<Classification>, CompilerError> {
        let graph = SchemaGraph::build(files);
        Ok(self.diffs(&graph)?.iter().map(DirectiveDiff::summary).collect())
    }

    /// Resolves and classifies every directive against `graph`, in directive
    /// order.
    pub fn diffs<'a>(&self, graph: &SchemaGraph<'a>) -> Result<Vec<DirectiveDiff<'a>>, CompilerError> {
        tracing::debug!(
            records = graph.record_count(),
            enums = graph.enum_count(),
            directives = self.config.mappings.len(),
            "Built schema graph"
        );

        let mut seen = HashSet::new();
        let mut diffs = Vec::new();
        for directive in &self.config.mappings {
            if !seen.insert(directive) {
                tracing::warn!(mapping = %directive, "Skipping duplicate mapping");
                continue;
            }

            let diff = match graph.resolve_pair(directive)? {
                ResolvedPair::Records { input, output } => DirectiveDiff::Message(diff_messages(input, output, graph)?),
                ResolvedPair::Enums { input, output } => DirectiveDiff::Enum(diff_enums(input, output)),
                ResolvedPair::Unresolved => {
                    tracing::warn!(mapping = %directive, "Skipping mapping: neither name is defined");
                    continue;
                }
            };

            let summary = diff.summary();
            tracing::debug!(
                mapping = %directive,
                kind = summary.kind,
                common = summary.common.len(),
                changed = summary.changed.len(),
                extra = summary.extra.len(),
                missing = summary.missing.len(),
                "Classified mapping"
            );
            diffs.push(diff);
        }
        Ok(diffs)
    }
}
