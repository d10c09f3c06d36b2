//! JSON renderer — structured output for tooling integration.
//!
//! Carries the same content and ordering as the markdown document, with the
//! anchors precomputed so external renderers link the same way.

use crate::model::*;
use crate::render::Renderer;
use crate::toc;
use anyhow::{Context, Result};
use serde::Serialize;

pub struct JsonRenderer;

#[derive(Serialize)]
struct JsonDocument<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    license: Option<&'a str>,
    namespaces: Vec<JsonNamespace<'a>>,
}

#[derive(Serialize)]
struct JsonNamespace<'a> {
    name: &'a str,
    anchor: String,
    functions: Vec<JsonFunction<'a>>,
}

#[derive(Serialize)]
struct JsonFunction<'a> {
    name: &'a str,
    qualified_name: String,
    anchor: String,
    interface: &'a str,
    annotation: &'a str,
}

impl Renderer for JsonRenderer {
    fn render(&self, table: &NamespaceTable, settings: &DocumentSettings) -> Result<String> {
        let doc = JsonDocument {
            title: &settings.title,
            license: settings.license.as_deref(),
            namespaces: table
                .iter()
                .map(|(namespace, functions)| JsonNamespace {
                    name: namespace,
                    anchor: toc::anchor(namespace),
                    functions: functions
                        .iter()
                        .map(|(name, entry)| {
                            let qualified_name = toc::qualified_name(namespace, name);
                            JsonFunction {
                                name,
                                anchor: toc::anchor(&qualified_name),
                                qualified_name,
                                interface: &entry.interface,
                                annotation: &entry.annotation,
                            }
                        })
                        .collect(),
                })
                .collect(),
        };

        let mut out =
            serde_json::to_string_pretty(&doc).context("failed to serialize documentation")?;
        out.push('\n');
        Ok(out)
    }
}
