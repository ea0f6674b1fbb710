use crate::{
    error::{QueryError, Result},
    query_id::QueryId,
    render::TagProcessor,
    store::MapperStore,
};
use expression_engine::ParamSource;
use mapper_syntax::Document;
use serde::Serialize;
use tracing::debug;

/// Output of a render call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedQuery {
    pub id: QueryId,
    /// Element name the statement was declared with (`select`, `insert`, ...).
    pub kind: String,
    pub sql: String,
}

/// Turns `File.id` query ids into SQL text using the files of a
/// [`MapperStore`].
#[derive(Debug, Clone, Copy)]
pub struct QueryResolver<'s> {
    store: &'s MapperStore,
}

impl<'s> QueryResolver<'s> {
    pub fn new(store: &'s MapperStore) -> Self {
        Self { store }
    }

    pub fn resolve(query_id: &str) -> Result<QueryId> {
        QueryId::parse(query_id)
    }

    /// Render the statement named by `query_id` against `params`.
    pub fn render(&self, query_id: &str, params: &dyn ParamSource) -> Result<String> {
        self.render_statement(query_id, params).map(|rendered| rendered.sql)
    }

    pub fn render_statement(
        &self,
        query_id: &str,
        params: &dyn ParamSource,
    ) -> Result<RenderedQuery> {
        let id = Self::resolve(query_id)?;

        // Parsed fresh for every call; only the raw text is cached.
        let document = self.document(&id.file)?;
        let statement = document
            .statement(&id.local)
            .ok_or_else(|| QueryError::QueryNotFound(id.to_string()))?;

        let sql = TagProcessor::new(&document, &id.file, params).render_statement(statement)?;
        debug!(query = %id, len = sql.len(), "Rendered query");

        Ok(RenderedQuery {
            kind: statement.kind.clone(),
            id,
            sql,
        })
    }

    /// Parsed document of `<file_base_name>.xml`.
    pub fn document(&self, file_base_name: &str) -> Result<Document> {
        let text = self.store.load(file_base_name)?;
        Ok(mapper_syntax::parse(&text)?)
    }

    pub fn statement_ids(&self, file_base_name: &str) -> Result<Vec<String>> {
        let document = self.document(file_base_name)?;
        Ok(document.ids().map(str::to_string).collect())
    }
}
