//! Raw XML reading on top of quick-xml.
//!
//! Produces an untyped element tree; classification into directive tags
//! happens in [`crate::builder`].

use crate::error::{MarkupError, Result};
use quick_xml::Reader;
use quick_xml::escape::resolve_xml_entity;
use quick_xml::events::{BytesStart, Event};
use tracing::trace;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RawNode {
    Element(RawElement),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<RawNode>,
}

impl RawElement {
    /// Attribute lookup, case-insensitive on the attribute name.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, value)| value.as_str())
    }
}

/// Read `input` into a forest of top-level nodes. Several root elements are
/// accepted.
pub(crate) fn read_tree(input: &str) -> Result<Vec<RawNode>> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<RawElement> = Vec::new();
    let mut roots: Vec<RawNode> = Vec::new();

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(err) => {
                return Err(MarkupError::Syntax {
                    position: reader.error_position() as u64,
                    message: err.to_string(),
                });
            }
        };

        match event {
            Event::Start(start) => stack.push(open_element(&start)?),
            Event::Empty(start) => {
                let element = open_element(&start)?;
                append(&mut stack, &mut roots, RawNode::Element(element));
            }
            Event::End(_) => {
                let element = stack.pop().ok_or_else(|| MarkupError::Syntax {
                    position: reader.buffer_position() as u64,
                    message: "closing tag without a matching opening tag".to_string(),
                })?;
                append(&mut stack, &mut roots, RawNode::Element(element));
            }
            Event::Text(text) => {
                let decoded = text.decode().map_err(|e| MarkupError::Syntax {
                    position: reader.buffer_position() as u64,
                    message: e.to_string(),
                })?;
                append_text(&mut stack, &mut roots, &decoded);
            }
            Event::CData(data) => {
                let text = std::str::from_utf8(&data)?;
                append_text(&mut stack, &mut roots, text);
            }
            Event::GeneralRef(reference) => {
                let raw = reference.decode().map_err(|e| MarkupError::Syntax {
                    position: reader.buffer_position() as u64,
                    message: e.to_string(),
                })?;
                let resolved = resolve_entity(&raw)?;
                append_text(&mut stack, &mut roots, &resolved);
            }
            Event::Eof => break,
            // Comments, declarations, processing instructions and doctypes
            // carry nothing renderable.
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(MarkupError::UnclosedTag(open.name));
    }

    trace!(roots = roots.len(), "read markup tree");
    Ok(roots)
}

fn open_element(start: &BytesStart<'_>) -> Result<RawElement> {
    let name = std::str::from_utf8(start.name().as_ref())?.to_string();

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| MarkupError::Syntax {
            position: 0,
            message: format!("invalid attribute on <{name}>: {e}"),
        })?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
        let value = attr.unescape_value().map_err(|e| MarkupError::Syntax {
            position: 0,
            message: format!("invalid value for attribute '{key}' on <{name}>: {e}"),
        })?;
        attributes.push((key, value.into_owned()));
    }

    Ok(RawElement {
        name,
        attributes,
        children: Vec::new(),
    })
}

fn append(stack: &mut [RawElement], roots: &mut Vec<RawNode>, node: RawNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => roots.push(node),
    }
}

/// Adjacent text is merged so entity references do not split a run of text.
fn append_text(stack: &mut [RawElement], roots: &mut Vec<RawNode>, text: &str) {
    if text.is_empty() {
        return;
    }

    let siblings = match stack.last_mut() {
        Some(parent) => &mut parent.children,
        None => roots,
    };

    match siblings.last_mut() {
        Some(RawNode::Text(existing)) => existing.push_str(text),
        _ => siblings.push(RawNode::Text(text.to_string())),
    }
}

fn resolve_entity(raw: &str) -> Result<String> {
    if let Some(resolved) = resolve_xml_entity(raw) {
        return Ok(resolved.to_string());
    }

    if let Some(rest) = raw.strip_prefix('#') {
        let code = match rest.strip_prefix('x').or_else(|| rest.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => rest.parse::<u32>().ok(),
        };

        return code
            .and_then(char::from_u32)
            .map(|ch| ch.to_string())
            .ok_or_else(|| MarkupError::Syntax {
                position: 0,
                message: format!("invalid character reference &{raw};"),
            });
    }

    // Unknown named entities are kept as written.
    Ok(format!("&{raw};"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only_element(nodes: Vec<RawNode>) -> RawElement {
        match nodes.into_iter().next() {
            Some(RawNode::Element(element)) => element,
            other => panic!("expected an element, got {other:?}"),
        }
    }

    #[test]
    fn test_read_nested_elements_and_text() {
        let root = only_element(read_tree(r#"<select id="a">SELECT 1 <if test="x == 1">AND x</if></select>"#).unwrap());

        assert_eq!(root.name, "select");
        assert_eq!(root.attribute("ID"), Some("a"));
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0], RawNode::Text("SELECT 1 ".into()));
    }

    #[test]
    fn test_entities_are_resolved_and_merged() {
        let root = only_element(read_tree("<sql id=\"a\">age &lt; 10 &amp;&#65;</sql>").unwrap());

        assert_eq!(root.children, vec![RawNode::Text("age < 10 &A".into())]);
    }

    #[test]
    fn test_cdata_is_kept_verbatim() {
        let root = only_element(read_tree("<sql id=\"a\"><![CDATA[a < b]]></sql>").unwrap());

        assert_eq!(root.children, vec![RawNode::Text("a < b".into())]);
    }

    #[test]
    fn test_attribute_values_are_unescaped() {
        let root = only_element(read_tree(r#"<if test="name == &quot;x&quot;"/>"#).unwrap());

        assert_eq!(root.attribute("test"), Some(r#"name == "x""#));
    }

    #[test]
    fn test_unclosed_tag_is_reported() {
        let err = read_tree("<select id=\"a\">SELECT 1").unwrap_err();

        // quick-xml may report the missing end tag itself at EOF.
        assert!(matches!(
            err,
            MarkupError::UnclosedTag(_) | MarkupError::Syntax { .. }
        ));
    }

    #[test]
    fn test_mismatched_end_tag_is_a_syntax_error() {
        let err = read_tree("<select id=\"a\"><if test=\"a == 1\"></select>").unwrap_err();

        assert!(matches!(err, MarkupError::Syntax { .. }));
    }
}
