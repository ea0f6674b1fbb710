//! SQL template rendering.
//!
//! Mapper files live in one root directory and are addressed by query ids of
//! the form `File.statement`. A [`MapperStore`] caches the raw files, a
//! [`QueryResolver`] parses them and renders one statement for a parameter
//! bag:
//!
//! ```no_run
//! use engine_core::{MapperStore, QueryResolver};
//! use expression_engine::params;
//!
//! let store = MapperStore::with_root("./maps");
//! let sql = QueryResolver::new(&store)
//!     .render("User.findAll", &params! { "name" => "Jane" })
//!     .unwrap();
//! ```
//!
//! [`configure`] and [`render`] do the same through a process-wide store.

use expression_engine::ParamSource;
use lazy_static::lazy_static;
use std::path::PathBuf;

pub mod error;
pub mod query_id;
pub mod render;
pub mod resolver;
pub mod settings;
pub mod store;

pub use error::{QueryError, Result};
pub use query_id::QueryId;
pub use render::TagProcessor;
pub use resolver::{QueryResolver, RenderedQuery};
pub use settings::EngineSettings;
pub use store::MapperStore;

lazy_static! {
    static ref GLOBAL_STORE: MapperStore = MapperStore::new();
}

/// The process-wide store used by [`configure`] and [`render`].
pub fn global_store() -> &'static MapperStore {
    &GLOBAL_STORE
}

/// Set the mapper root directory of the process-wide store.
pub fn configure(path: impl Into<PathBuf>) {
    GLOBAL_STORE.configure(path);
}

/// Render `query_id` with the process-wide store.
pub fn render(query_id: &str, params: &dyn ParamSource) -> Result<String> {
    QueryResolver::new(&GLOBAL_STORE).render(query_id, params)
}
