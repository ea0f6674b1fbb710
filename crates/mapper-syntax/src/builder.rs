use crate::{
    ast::{
        doc::{Document, Statement},
        node::{Branch, Choose, Node},
        tag::TagKind,
    },
    error::{MarkupError, Result},
    reader::{RawElement, RawNode, read_tree},
};
use tracing::{debug, warn};

/// Parse mapper markup into a typed document.
///
/// Every element carrying an `id` attribute is a statement; elements without
/// one (a `<mapper>` root, for instance) only group statements and are looked
/// through.
pub fn parse(input: &str) -> Result<Document> {
    let roots = read_tree(input)?;

    let mut statements = Vec::new();
    collect_statements(&roots, &mut statements);

    debug!(statements = statements.len(), "built mapper document");
    Ok(Document::new(statements))
}

fn collect_statements(nodes: &[RawNode], out: &mut Vec<Statement>) {
    for node in nodes {
        let RawNode::Element(element) = node else {
            continue;
        };

        let Some(id) = element.attribute("id") else {
            collect_statements(&element.children, out);
            continue;
        };

        if out.iter().any(|s| s.id == id) {
            warn!(id, "duplicate statement id, keeping the first definition");
            continue;
        }

        out.push(Statement {
            kind: element.name.clone(),
            id: id.to_string(),
            body: build_nodes(&element.children),
        });
    }
}

fn build_nodes(nodes: &[RawNode]) -> Vec<Node> {
    nodes
        .iter()
        .map(|node| match node {
            RawNode::Text(text) => Node::Text(text.clone()),
            RawNode::Element(element) => build_tag(element),
        })
        .collect()
}

/// A directive that cannot be built becomes [`Node::Invalid`]; the rest of
/// the document stays usable.
fn build_tag(element: &RawElement) -> Node {
    build_directive(element).unwrap_or_else(|error| {
        debug!(tag = %element.name, %error, "invalid directive");
        Node::Invalid {
            tag: element.name.clone(),
            error,
        }
    })
}

fn build_directive(element: &RawElement) -> Result<Node> {
    let node = match TagKind::from_name(&element.name) {
        Some(TagKind::If) => Node::If {
            test: required_attr(element, "test")?,
            children: build_nodes(&element.children),
        },
        Some(TagKind::Choose) => Node::Choose(build_choose(element)?),
        Some(TagKind::IsNotNull) => Node::IsNotNull {
            property: required_attr(element, "property")?,
            children: build_nodes(&element.children),
        },
        Some(TagKind::Include) => Node::Include {
            refid: required_attr(element, "refid")?,
        },
        Some(TagKind::Where) => Node::Where {
            children: build_nodes(&element.children),
        },
        // Branch tags are only meaningful directly under <choose>.
        Some(TagKind::When) | Some(TagKind::Otherwise) | None => Node::Unsupported {
            tag: element.name.clone(),
        },
    };

    Ok(node)
}

fn build_choose(element: &RawElement) -> Result<Choose> {
    let mut whens = Vec::new();
    let mut otherwise = None;

    for child in &element.children {
        match child {
            RawNode::Text(text) if text.trim().is_empty() => {}
            RawNode::Text(text) => {
                return Err(MarkupError::InvalidChoose(format!(
                    "text '{}' outside of <when>/<otherwise>",
                    text.trim()
                )));
            }
            RawNode::Element(branch) => match TagKind::from_name(&branch.name) {
                Some(TagKind::When) => whens.push(Branch {
                    test: required_attr(branch, "test")?,
                    children: build_nodes(&branch.children),
                }),
                Some(TagKind::Otherwise) if otherwise.is_some() => {
                    return Err(MarkupError::InvalidChoose(
                        "more than one <otherwise>".to_string(),
                    ));
                }
                Some(TagKind::Otherwise) => otherwise = Some(build_nodes(&branch.children)),
                _ => {
                    return Err(MarkupError::InvalidChoose(format!(
                        "unexpected <{}>",
                        branch.name
                    )));
                }
            },
        }
    }

    if whens.is_empty() {
        return Err(MarkupError::InvalidChoose(
            "at least one <when> is required".to_string(),
        ));
    }

    let otherwise = otherwise.ok_or_else(|| {
        MarkupError::InvalidChoose("exactly one <otherwise> is required".to_string())
    })?;

    Ok(Choose { whens, otherwise })
}

fn required_attr(element: &RawElement, attribute: &str) -> Result<String> {
    element
        .attribute(attribute)
        .map(str::to_string)
        .ok_or_else(|| MarkupError::MissingAttribute {
            tag: element.name.clone(),
            attribute: attribute.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statements_nested_in_a_mapper_root() {
        let doc = parse(
            r#"<mapper>
                <select id="findAll">SELECT * FROM users</select>
                <sql id="columns">id, name</sql>
            </mapper>"#,
        )
        .unwrap();

        assert_eq!(doc.ids().collect::<Vec<_>>(), vec!["findAll", "columns"]);
        assert_eq!(doc.statement("columns").unwrap().kind, "sql");
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let doc = parse(r#"<sql id="a">first</sql><sql id="a">second</sql>"#).unwrap();

        assert_eq!(doc.len(), 1);
        assert_eq!(doc.statement("a").unwrap().body, vec![Node::text("first")]);
    }

    #[test]
    fn test_unknown_and_stray_branch_tags_are_unsupported() {
        let doc = parse(r#"<sql id="a"><foreach/><when test="a == 1">x</when></sql>"#).unwrap();

        assert_eq!(
            doc.statement("a").unwrap().body,
            vec![
                Node::Unsupported {
                    tag: "foreach".into()
                },
                Node::Unsupported { tag: "when".into() },
            ]
        );
    }

    #[test]
    fn test_missing_test_attribute() {
        let doc = parse(r#"<sql id="a"><if>x</if></sql>"#).unwrap();

        assert_eq!(
            doc.statement("a").unwrap().body,
            vec![Node::Invalid {
                tag: "if".into(),
                error: MarkupError::MissingAttribute {
                    tag: "if".into(),
                    attribute: "test".into()
                },
            }]
        );
    }

    #[test]
    fn test_choose_requires_otherwise() {
        let doc = parse(r#"<sql id="a"><choose><when test="a == 1">x</when></choose></sql>"#)
            .unwrap();

        assert!(matches!(
            &doc.statement("a").unwrap().body[0],
            Node::Invalid {
                error: MarkupError::InvalidChoose(_),
                ..
            }
        ));
    }

    #[test]
    fn test_broken_directive_leaves_siblings_intact() {
        let doc = parse(
            r#"<mapper>
                <select id="ok">SELECT 1</select>
                <select id="bad">SELECT 2 <if>x</if></select>
            </mapper>"#,
        )
        .unwrap();

        assert_eq!(doc.statement("ok").unwrap().body, vec![Node::text("SELECT 1")]);
        assert_eq!(doc.invalid_directives().len(), 1);
        assert_eq!(doc.invalid_directives()[0].statement, "bad");
    }
}
