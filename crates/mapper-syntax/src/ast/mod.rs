pub mod doc;
pub mod node;
pub mod tag;
