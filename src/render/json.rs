use crate::core::ast::Document;
use crate::render::Renderer;
use crate::Result;

/// Serialises the document model as JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRenderer {
    pub pretty: bool,
}

impl Renderer for JsonRenderer {
    fn render(&self, document: &Document) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(document)?
        } else {
            serde_json::to_string(document)?
        };
        Ok(json)
    }
}
