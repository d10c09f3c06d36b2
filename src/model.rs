//! Data model for scanned documentation — format-agnostic.

use std::collections::BTreeMap;

/// Functions of one namespace, keyed by bare function name.
pub type FunctionMap = BTreeMap<String, FunctionEntry>;

/// All namespaces across every scanned file.
///
/// Ordered maps give the lexicographic order the rendered document uses.
pub type NamespaceTable = BTreeMap<String, FunctionMap>;

/// Result of scanning a single source file.
#[derive(Debug, Default, PartialEq)]
pub struct SourceUnit {
    /// First `namespace` declaration; `None` if the file never declares one.
    pub namespace: Option<String>,
    pub functions: FunctionMap,
}

/// A single documented callable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionEntry {
    /// Declaration text up to (not including) the body's opening brace.
    pub interface: String,
    /// Documentation lines, each terminated by `\n`.
    pub annotation: String,
}

/// Rendering settings shared by every output format.
#[derive(Debug)]
pub struct DocumentSettings {
    pub title: String,
    /// Copyright/license block printed verbatim under the title.
    pub license: Option<String>,
}
