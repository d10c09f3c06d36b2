//! GitHub-flavored markdown renderer.
//!
//! Layout, top to bottom: title, optional license block, table of contents,
//! then one `##` section per namespace with a `###` subsection per function.

use crate::model::*;
use crate::render::Renderer;
use crate::toc;
use anyhow::Result;

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, table: &NamespaceTable, settings: &DocumentSettings) -> Result<String> {
        let mut output = format!("# {}\n", settings.title);

        if let Some(ref license) = settings.license {
            output.push('\n');
            output.push_str(license.trim_end_matches('\n'));
            output.push('\n');
        }

        output.push_str(&render_toc(table));
        for (namespace, functions) in table {
            output.push_str(&render_namespace(namespace, functions));
        }

        Ok(output)
    }
}

fn render_toc(table: &NamespaceTable) -> String {
    let mut toc_block = String::from("\n## Table of Contents\n");
    for (namespace, functions) in table {
        toc_block.push_str(&toc::render_namespace_item(namespace));
        toc_block.push('\n');
        for function in functions.keys() {
            toc_block.push_str(&toc::render_function_item(namespace, function));
            toc_block.push('\n');
        }
    }
    toc_block
}

fn render_namespace(namespace: &str, functions: &FunctionMap) -> String {
    let mut section = format!("\n## {}\n", namespace);
    for (name, entry) in functions {
        section.push_str(&render_function(&toc::qualified_name(namespace, name), entry));
    }
    section
}

/// Heading, literal signature block, documentation, separator.
fn render_function(full_name: &str, entry: &FunctionEntry) -> String {
    format!(
        "\n### {}\n\n```\n{}\n```\n\n{}\n---\n",
        full_name, entry.interface, entry.annotation
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(license: Option<&str>) -> DocumentSettings {
        DocumentSettings {
            title: "API Documentation".to_string(),
            license: license.map(str::to_string),
        }
    }

    fn demo_table() -> NamespaceTable {
        let mut functions = FunctionMap::new();
        functions.insert(
            "Add".to_string(),
            FunctionEntry {
                interface: "function Add(x: Int, y: Int) : Int".to_string(),
                annotation: "Computes sum.\n".to_string(),
            },
        );
        let mut table = NamespaceTable::new();
        table.insert("Demo".to_string(), functions);
        table
    }

    #[test]
    fn render_demo_document() {
        let output = MarkdownRenderer
            .render(&demo_table(), &settings(None))
            .unwrap();
        let expected = "\
# API Documentation

## Table of Contents
- [Demo](#demo)
  - [Add](#demoadd)

## Demo

### Demo.Add

```
function Add(x: Int, y: Int) : Int
```

Computes sum.

---
";
        assert_eq!(output, expected);
    }

    #[test]
    fn license_block_under_title() {
        let output = MarkdownRenderer
            .render(&NamespaceTable::new(), &settings(Some("Copyright 2022 Someone\n\nLicensed under X.\n")))
            .unwrap();
        assert_eq!(
            output,
            "# API Documentation\n\nCopyright 2022 Someone\n\nLicensed under X.\n\n## Table of Contents\n"
        );
    }

    #[test]
    fn empty_table_has_title_and_empty_toc() {
        let output = MarkdownRenderer
            .render(&NamespaceTable::new(), &settings(None))
            .unwrap();
        assert_eq!(output, "# API Documentation\n\n## Table of Contents\n");
    }

    #[test]
    fn namespaces_and_functions_sorted() {
        let mut table = NamespaceTable::new();
        for ns in ["Zeta", "Alpha"] {
            let functions = table.entry(ns.to_string()).or_default();
            for f in ["b", "a"] {
                functions.insert(f.to_string(), FunctionEntry::default());
            }
        }
        let output = MarkdownRenderer.render(&table, &settings(None)).unwrap();
        let headings: Vec<&str> = output
            .lines()
            .filter(|l| l.starts_with("### "))
            .collect();
        assert_eq!(
            headings,
            vec!["### Alpha.a", "### Alpha.b", "### Zeta.a", "### Zeta.b"]
        );
    }

    #[test]
    fn every_toc_link_has_matching_heading_anchor() {
        let mut table = demo_table();
        table
            .entry("Foo<T>".to_string())
            .or_default()
            .insert("bar'baz".to_string(), FunctionEntry::default());
        let output = MarkdownRenderer.render(&table, &settings(None)).unwrap();

        let heading_anchors: Vec<String> = output
            .lines()
            .filter_map(|l| l.strip_prefix("## ").or_else(|| l.strip_prefix("### ")))
            .map(toc::anchor)
            .collect();
        for line in output.lines().filter(|l| l.trim_start().starts_with("- [")) {
            let link = line.rsplit_once("](#").unwrap().1.trim_end_matches(')');
            assert!(
                heading_anchors.iter().any(|a| a == link),
                "dangling link {link}"
            );
        }
        assert!(output.contains("  - [bar'baz](#footbarbaz)"));
    }
}
