//! Schema model, lookup and classification.
//!
//! This module handles everything that happens before code is emitted:
//!
//! 1. Lowering protobuf descriptors into the schema model
//! 2. Building the flat name lookup (the schema graph)
//! 3. Deriving structural field signatures
//! 4. Classifying output fields/values against input fields/values

pub mod descriptor;
pub mod diff;
pub mod graph;
pub mod model;
pub mod signature;

pub use diff::{diff_enums, diff_messages, Category, Classification, EnumDiff, FieldMapping, MessageDiff, MissingField};
pub use graph::{Resolved, ResolvedPair, SchemaGraph};
pub use model::{EnumDef, EnumValueDef, FieldDef, FieldKind, FileDef, RecordDef, ScalarKind, TypeName};
pub use signature::{type_equal, BaseType, FieldType};
