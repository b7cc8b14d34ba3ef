mod renderer;
mod scrapers;
mod storage;

pub use renderer::{chrome::ChromeRenderer, FetchRequest, PageRenderer, RenderError};
pub use scrapers::TableExtractor;
pub use storage::fs_store::FileSystemStore;
