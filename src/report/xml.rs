//! Generic XML to object mapping
//!
//! Builds the loosely-shaped tree that report documents are first read into:
//! attributes are dropped, leaf elements become strings, and a child tag that
//! repeats becomes an array while a tag seen once is stored bare. That last
//! rule loses cardinality, which [`super::normalize`] puts back.

use log::trace;
use roxmltree::{Document, Node};
use serde_json::{Map, Value};

use crate::error::{Result, UsageError};

/// Key used for text that sits next to child elements
pub const TEXT_KEY: &str = "_";

/// A parsed element in its generic form (string, object or array)
pub type RawNode = Value;

/// Parse an XML document, returning the root tag name and its mapped value
pub fn parse_document(xml: &str) -> Result<(String, RawNode)> {
    let doc = Document::parse(xml)
        .map_err(|e| UsageError::malformed(format!("Failed to parse report XML: {}", e)))?;

    let root = doc.root_element();
    let name = root.tag_name().name().to_string();
    trace!("Mapping XML document with root <{}>", name);

    Ok((name, map_element(root)))
}

fn map_element(node: Node) -> RawNode {
    let mut children = node.children().filter(|c| c.is_element()).peekable();

    if children.peek().is_none() {
        return Value::String(collect_text(node));
    }

    let mut object = Map::new();
    for child in children {
        let key = child.tag_name().name().to_string();
        let value = map_element(child);

        match object.get_mut(&key) {
            None => {
                object.insert(key, value);
            }
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
        }
    }

    let text = collect_text(node);
    if !text.trim().is_empty() {
        object.insert(TEXT_KEY.to_string(), Value::String(text));
    }

    Value::Object(object)
}

fn collect_text(node: Node) -> String {
    node.children()
        .filter(|c| c.is_text())
        .filter_map(|c| c.text())
        .collect()
}
