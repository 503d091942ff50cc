pub mod config;
pub mod run;
pub mod sections;

use std::path::Path;

use anyhow::{Context, Result};
use folio_core::Page;

/// The page at `path`, or the built-in page
pub fn load_page(path: Option<&Path>) -> Result<Page> {
    match path {
        Some(path) => Page::load(path)
            .with_context(|| format!("Failed to load page {}", path.display())),
        None => Ok(Page::builtin()),
    }
}
