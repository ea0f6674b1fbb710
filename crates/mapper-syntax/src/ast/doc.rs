use crate::{
    ast::node::{Node, serialize_error},
    error::MarkupError,
};
use serde::Serialize;

/// A named statement of a mapper file (`<select id="findAll">...</select>`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    /// Element name the statement was declared with, e.g. `select` or `sql`.
    pub kind: String,
    pub id: String,
    pub body: Vec<Node>,
}

/// An unsupported tag found while scanning a document eagerly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnsupportedTag {
    pub statement: String,
    pub tag: String,
}

/// A malformed directive found while scanning a document eagerly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvalidDirective {
    pub statement: String,
    pub tag: String,
    #[serde(serialize_with = "serialize_error")]
    pub error: MarkupError,
}

/// Parsed mapper file. Statement ids are unique; the builder keeps the first
/// definition of a repeated id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    statements: Vec<Statement>,
}

impl Document {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn statement(&self, id: &str) -> Option<&Statement> {
        self.statements.iter().find(|s| s.id == id)
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.statements.iter().map(|s| s.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Every unsupported tag in the document, whether or not a render would
    /// reach it.
    pub fn unsupported_tags(&self) -> Vec<UnsupportedTag> {
        self.collect_nodes(|statement, node| match node {
            Node::Unsupported { tag } => Some(UnsupportedTag {
                statement: statement.id.clone(),
                tag: tag.clone(),
            }),
            _ => None,
        })
    }

    /// Every directive that failed to build, whether or not a render would
    /// reach it.
    pub fn invalid_directives(&self) -> Vec<InvalidDirective> {
        self.collect_nodes(|statement, node| match node {
            Node::Invalid { tag, error } => Some(InvalidDirective {
                statement: statement.id.clone(),
                tag: tag.clone(),
                error: error.clone(),
            }),
            _ => None,
        })
    }

    fn collect_nodes<T>(&self, mut pick: impl FnMut(&Statement, &Node) -> Option<T>) -> Vec<T> {
        let mut found = Vec::new();
        for statement in &self.statements {
            for node in &statement.body {
                node.walk(&mut |n| found.extend(pick(statement, n)));
            }
        }
        found
    }
}
