use anyhow::Result;

use super::{Block, Document, Span, Surface, Table};

/// Records the block sequence and dumps it as pretty JSON. Handy for
/// checking layout structure without a browser.
pub struct JsonSurface {
    document: Document,
}

impl JsonSurface {
    pub fn new() -> Self {
        Self {
            document: Document::default(),
        }
    }
}

impl Default for JsonSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for JsonSurface {
    fn title(&mut self, text: &str) {
        self.document.push(Block::Title {
            text: text.to_string(),
        });
    }

    fn heading(&mut self, level: u8, text: &str) {
        self.document.push(Block::Heading {
            level,
            text: text.to_string(),
        });
    }

    fn paragraph(&mut self, spans: &[Span]) {
        self.document.push(Block::Paragraph {
            spans: spans.to_vec(),
        });
    }

    fn spacer(&mut self, height: u32) {
        self.document.push(Block::Spacer { height });
    }

    fn table(&mut self, table: &Table) {
        self.document.push(Block::Table(table.clone()));
    }

    fn page_break(&mut self) {
        self.document.push(Block::PageBreak);
    }

    fn finish(&mut self) -> Result<Vec<u8>> {
        let document = std::mem::take(&mut self.document);
        Ok(serde_json::to_vec_pretty(&document)?)
    }
}
