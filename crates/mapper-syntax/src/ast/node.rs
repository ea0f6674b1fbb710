use crate::error::MarkupError;
use serde::{Serialize, Serializer};

/// One piece of a statement body.
///
/// Directive tags are classified when the document is built; anything the
/// renderer does not understand is kept as [`Node::Unsupported`], and a
/// malformed directive as [`Node::Invalid`], so the error surfaces only if
/// rendering actually reaches it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    Text(String),
    If {
        test: String,
        children: Vec<Node>,
    },
    Choose(Choose),
    IsNotNull {
        property: String,
        children: Vec<Node>,
    },
    Include {
        refid: String,
    },
    Where {
        children: Vec<Node>,
    },
    Unsupported {
        tag: String,
    },
    /// A known directive that could not be built, e.g. an `<if>` without
    /// `test`.
    Invalid {
        tag: String,
        #[serde(serialize_with = "serialize_error")]
        error: MarkupError,
    },
}

pub(crate) fn serialize_error<S: Serializer>(
    error: &MarkupError,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// `<choose>` block: ordered `<when>` branches and a mandatory `<otherwise>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Choose {
    pub whens: Vec<Branch>,
    pub otherwise: Vec<Node>,
}

/// A `<when test="...">` branch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Branch {
    pub test: String,
    pub children: Vec<Node>,
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    /// Name of the tag this node was built from, `None` for plain text.
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Node::Text(_) => None,
            Node::If { .. } => Some("if"),
            Node::Choose(_) => Some("choose"),
            Node::IsNotNull { .. } => Some("isnotnull"),
            Node::Include { .. } => Some("include"),
            Node::Where { .. } => Some("where"),
            Node::Unsupported { tag } | Node::Invalid { tag, .. } => Some(tag),
        }
    }

    /// Depth-first, pre-order walk over this node and every nested node,
    /// including all `<choose>` branches.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        match self {
            Node::If { children, .. }
            | Node::IsNotNull { children, .. }
            | Node::Where { children } => {
                for child in children {
                    child.walk(visit);
                }
            }
            Node::Choose(choose) => {
                let branches = choose.whens.iter().map(|b| &b.children);
                for children in branches.chain(std::iter::once(&choose.otherwise)) {
                    for child in children {
                        child.walk(visit);
                    }
                }
            }
            Node::Text(_)
            | Node::Include { .. }
            | Node::Unsupported { .. }
            | Node::Invalid { .. } => {}
        }
    }
}
