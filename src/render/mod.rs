//! Renderer module — trait-based format dispatch.

pub mod declaration;
pub mod dts;
pub mod json;

use crate::model::Document;
use anyhow::{anyhow, Result};

/// Trait for rendering a resolved Document into a specific output format.
pub trait Renderer {
    fn render(&self, doc: &Document) -> Result<String>;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "dts" => Ok(Box::new(dts::DtsRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!("unknown format: {}. Use dts or json", format)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_listed_formats_are_accepted() {
        assert!(create_renderer("dts").is_ok());
        assert!(create_renderer("json").is_ok());
        for unknown in ["d.ts", "typescript", "markdown"] {
            let err = create_renderer(unknown).err().unwrap();
            assert!(err.to_string().contains("unknown format"));
        }
    }
}
