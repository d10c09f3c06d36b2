//! Cross-file merge: combine scanned files into one table keyed by namespace.
//!
//! Several files may declare the same namespace. Their function maps are
//! merged in scan order, and a function seen again in a later file replaces
//! the earlier entry.

use crate::model::*;
use crate::toc::qualified_name;

/// Merge scanned files, in scan order, into a single [`NamespaceTable`].
///
/// Files without a namespace contribute nothing.
pub fn merge(units: impl IntoIterator<Item = SourceUnit>) -> NamespaceTable {
    let mut table = NamespaceTable::new();
    for unit in units {
        merge_unit(&mut table, unit);
    }
    table
}

/// Merge one scanned file into an existing table.
fn merge_unit(table: &mut NamespaceTable, unit: SourceUnit) {
    let Some(namespace) = unit.namespace else {
        return;
    };

    let functions = table.entry(namespace.clone()).or_default();
    for (name, entry) in unit.functions {
        if let Some(previous) = functions.insert(name.clone(), entry) {
            tracing::warn!(
                function = %qualified_name(&namespace, &name),
                previous_interface = %previous.interface,
                "function documented more than once; keeping the later file's entry"
            );
        }
    }
}
