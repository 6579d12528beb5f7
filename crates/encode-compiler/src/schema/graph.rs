//! Flat lookup over every record and enumeration of a compilation unit.

use std::collections::HashMap;

use super::model::{EnumDef, FileDef, RecordDef};
use crate::config::MappingDirective;
use crate::diagnostic::{CompilerError, DefinitionKind, Side};

/// Every record and enumeration reachable from the compilation unit, keyed by
/// fully qualified name.
///
/// Nested definitions are hoisted into the same lookup space as top-level ones.
/// Records and enumerations live in separate namespaces.
#[derive(Debug, Default)]
pub struct SchemaGraph<'a> {
    records: HashMap<String, &'a RecordDef>,
    enums: HashMap<String, &'a EnumDef>,
}

/// Result of looking a single name up in both namespaces.
#[derive(Debug, Clone, Copy)]
pub enum Resolved<'a> {
    Record(&'a RecordDef),
    Enum(&'a EnumDef),
    Unresolved,
}

/// A mapping directive resolved to a same-kind pair.
#[derive(Debug, Clone, Copy)]
pub enum ResolvedPair<'a> {
    Records {
        input: &'a RecordDef,
        output: &'a RecordDef,
    },
    Enums {
        input: &'a EnumDef,
        output: &'a EnumDef,
    },
    /// Neither name is known in either namespace.
    Unresolved,
}

impl<'a> SchemaGraph<'a> {
    /// Builds the graph from every file of the compilation unit.
    pub fn build(files: &'a [FileDef]) -> Self {
        let mut graph = Self::default();
        for file in files {
            for record in &file.records {
                graph.visit_record(record);
            }
            for enumeration in &file.enums {
                graph.enums.insert(enumeration.full_name(), enumeration);
            }
        }
        graph
    }

    fn visit_record(&mut self, record: &'a RecordDef) {
        self.records.insert(record.full_name(), record);
        for nested in &record.records {
            self.visit_record(nested);
        }
        for enumeration in &record.enums {
            self.enums.insert(enumeration.full_name(), enumeration);
        }
    }

    pub fn record(&self, full_name: &str) -> Option<&'a RecordDef> {
        self.records.get(full_name).copied()
    }

    pub fn enumeration(&self, full_name: &str) -> Option<&'a EnumDef> {
        self.enums.get(full_name).copied()
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn enum_count(&self) -> usize {
        self.enums.len()
    }

    /// Looks a name up, preferring the record namespace.
    pub fn resolve(&self, full_name: &str) -> Resolved<'a> {
        if let Some(record) = self.record(full_name) {
            Resolved::Record(record)
        } else if let Some(enumeration) = self.enumeration(full_name) {
            Resolved::Enum(enumeration)
        } else {
            Resolved::Unresolved
        }
    }

    /// Resolves both sides of a directive into a consistent same-kind pair.
    ///
    /// A side that resolves when its counterpart does not (or resolves to the
    /// other kind) is reported as an unresolved counterpart. Records are
    /// checked first, so a record facing an enum reports the missing record.
    pub fn resolve_pair(&self, directive: &MappingDirective) -> Result<ResolvedPair<'a>, CompilerError> {
        let input = &directive.input;
        let output = &directive.output;

        match (self.resolve(input), self.resolve(output)) {
            (Resolved::Record(input), Resolved::Record(output)) => Ok(ResolvedPair::Records { input, output }),
            (Resolved::Enum(input), Resolved::Enum(output)) => Ok(ResolvedPair::Enums { input, output }),
            (Resolved::Unresolved, Resolved::Unresolved) => Ok(ResolvedPair::Unresolved),
            (Resolved::Record(_), _) => Err(unresolved(Side::Output, DefinitionKind::Message, output)),
            (_, Resolved::Record(_)) => Err(unresolved(Side::Input, DefinitionKind::Message, input)),
            (Resolved::Enum(_), Resolved::Unresolved) => Err(unresolved(Side::Output, DefinitionKind::Enum, output)),
            (Resolved::Unresolved, Resolved::Enum(_)) => Err(unresolved(Side::Input, DefinitionKind::Enum, input)),
        }
    }
}

fn unresolved(side: Side, kind: DefinitionKind, name: &str) -> CompilerError {
    CompilerError::UnresolvedCounterpart {
        side,
        kind,
        name: name.to_string(),
    }
}
