pub(crate) mod table;
pub(crate) mod text;

pub use table::TableExtractor;
