//! Tag evaluation: turns a statement body into SQL text for one parameter bag.
//!
//! Rendering never mutates the parsed document. Pruned branches are simply
//! not written, so a document can be rendered any number of times.

use crate::error::{QueryError, Result};
use expression_engine::ParamSource;
use mapper_syntax::{Choose, Document, Node, Statement};
use tracing::trace;

/// Collapse every whitespace run to a single space and trim the ends.
pub fn flatten(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Build the text of a `<where>` block from its rendered content.
///
/// A leading `AND ` or `OR ` is dropped; `None` means the block rendered
/// nothing and no keyword is emitted.
pub fn where_clause(inner: &str) -> Option<String> {
    let text = flatten(inner);
    let text = strip_leading_connector(&text);

    if text.is_empty() {
        None
    } else {
        Some(format!("WHERE {text}"))
    }
}

fn strip_leading_connector(text: &str) -> &str {
    for connector in ["AND ", "OR "] {
        let matches = text
            .get(..connector.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(connector));
        if matches {
            return &text[connector.len()..];
        }
    }
    text
}

/// Depth-first evaluator for the directive tags of one document.
pub struct TagProcessor<'a> {
    document: &'a Document,
    /// Mapper file base name, used to qualify ids in errors.
    file: &'a str,
    params: &'a dyn ParamSource,
    /// Statements currently being rendered, outermost first.
    include_chain: Vec<String>,
}

impl<'a> TagProcessor<'a> {
    pub fn new(document: &'a Document, file: &'a str, params: &'a dyn ParamSource) -> Self {
        Self {
            document,
            file,
            params,
            include_chain: Vec::new(),
        }
    }

    /// Render a statement of the document to flattened text.
    pub fn render_statement(&mut self, statement: &Statement) -> Result<String> {
        self.include_chain.push(statement.id.clone());

        let mut sql = String::new();
        let rendered = self.render_nodes(&statement.body, &mut sql);

        self.include_chain.pop();
        rendered?;

        Ok(flatten(&sql))
    }

    fn render_nodes(&mut self, nodes: &[Node], out: &mut String) -> Result<()> {
        for node in nodes {
            self.render_node(node, out)?;
        }
        Ok(())
    }

    fn render_node(&mut self, node: &Node, out: &mut String) -> Result<()> {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::If { test, children } => {
                if self.test(test)? {
                    self.render_nodes(children, out)?;
                } else {
                    trace!(test = %test, "Pruned <if>");
                }
            }
            Node::Choose(choose) => self.render_choose(choose, out)?,
            Node::IsNotNull { property, children } => match self.params.lookup(property) {
                Some(value) if !value.is_empty() => self.render_nodes(children, out)?,
                _ => trace!(property = %property, "Pruned <isnotnull>"),
            },
            Node::Include { refid } => self.render_include(refid, out)?,
            Node::Where { children } => self.render_where(children, out)?,
            Node::Unsupported { tag } => return Err(QueryError::UnsupportedTag(tag.clone())),
            Node::Invalid { error, .. } => return Err(QueryError::Markup(error.clone())),
        }
        Ok(())
    }

    /// The first `<when>` that holds wins; later ones are never evaluated.
    fn render_choose(&mut self, choose: &Choose, out: &mut String) -> Result<()> {
        for branch in &choose.whens {
            if self.test(&branch.test)? {
                return self.render_nodes(&branch.children, out);
            }
        }
        self.render_nodes(&choose.otherwise, out)
    }

    fn render_include(&mut self, refid: &str, out: &mut String) -> Result<()> {
        if self.include_chain.iter().any(|id| id == refid) {
            let mut chain = self.include_chain.clone();
            chain.push(refid.to_string());
            return Err(QueryError::IncludeCycle { chain });
        }

        let document = self.document;
        let statement = document
            .statement(refid)
            .ok_or_else(|| QueryError::QueryNotFound(format!("{}.{}", self.file, refid)))?;

        let text = self.render_statement(statement)?;
        trace!(refid, "Included statement");
        out.push_str(&text);
        Ok(())
    }

    fn render_where(&mut self, children: &[Node], out: &mut String) -> Result<()> {
        let mut inner = String::new();
        self.render_nodes(children, &mut inner)?;

        // Padded so the keyword never fuses with neighbouring text.
        if let Some(clause) = where_clause(&inner) {
            out.push(' ');
            out.push_str(&clause);
            out.push(' ');
        }
        Ok(())
    }

    fn test(&self, expr: &str) -> Result<bool> {
        Ok(expression_engine::test(expr, self.params)?)
    }
}
