//! The drawing surface the layout engine writes to.
//!
//! Layout code never deals with bytes directly. It produces a `Document`,
//! an ordered list of `Block`s (titles, headings, paragraphs of coloured
//! spans, styled tables and page breaks), which is then replayed onto a
//! `Surface` that knows how to turn those primitives into an output format.

mod html;
mod json;
mod text;

pub use html::HtmlSurface;
pub use json::JsonSurface;
pub use text::TextSurface;

use std::{fmt, str::FromStr};

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

/// A run of text with optional inline styling.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Span {
    pub text: String,
    pub color: Option<String>,
    pub bold: bool,
    pub size: Option<u8>,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
            bold: false,
            size: None,
        }
    }

    pub fn colored(text: impl Into<String>, color: &str) -> Self {
        Self {
            color: Some(color.to_string()),
            ..Self::plain(text)
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn sized(mut self, size: u8) -> Self {
        self.size = Some(size);
        self
    }
}

/// One table cell made of lines of spans.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub lines: Vec<Vec<Span>>,
    pub background: Option<String>,
    pub colspan: usize,
}

impl Cell {
    pub fn empty() -> Self {
        Self {
            lines: vec![],
            background: None,
            colspan: 1,
        }
    }

    /// A plain cell; embedded newlines become separate lines.
    pub fn text(text: &str) -> Self {
        let lines = if text.is_empty() {
            vec![]
        } else {
            text.split('\n').map(|l| vec![Span::plain(l)]).collect()
        };
        Self {
            lines,
            ..Self::empty()
        }
    }

    pub fn from_lines(lines: Vec<Vec<Span>>) -> Self {
        Self {
            lines,
            ..Self::empty()
        }
    }

    pub fn with_colspan(mut self, colspan: usize) -> Self {
        self.colspan = colspan.max(1);
        self
    }

    pub fn with_background(mut self, color: &str) -> Self {
        self.background = Some(color.to_string());
        self
    }

    /// The cell's text with styling dropped, lines joined by `\n`.
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.iter().map(|s| s.text.as_str()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalAlign {
    #[default]
    Top,
    Bottom,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TableStyle {
    pub grid_color: Option<String>,
    pub header_background: Option<String>,
    pub valign: VerticalAlign,
    pub font_size: u8,
    pub row_height: Option<u32>,
    pub col_widths: Option<Vec<u32>>,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            grid_color: Some(String::from("#000000")),
            header_background: Some(String::from("#d3d3d3")),
            valign: VerticalAlign::Top,
            font_size: 8,
            row_height: None,
            col_widths: None,
        }
    }
}

/// A grid of cells. The first `header_rows` rows repeat on every page the
/// table spills onto.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Table {
    pub header_rows: usize,
    pub rows: Vec<Vec<Cell>>,
    pub style: TableStyle,
}

impl Table {
    pub fn new(header: Vec<Cell>, style: TableStyle) -> Self {
        Self {
            header_rows: 1,
            rows: vec![header],
            style,
        }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    pub fn header(&self) -> &[Vec<Cell>] {
        &self.rows[..self.header_rows.min(self.rows.len())]
    }

    pub fn body(&self) -> &[Vec<Cell>] {
        &self.rows[self.header_rows.min(self.rows.len())..]
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Title { text: String },
    Heading { level: u8, text: String },
    Paragraph { spans: Vec<Span> },
    Spacer { height: u32 },
    Table(Table),
    PageBreak,
}

/// Output backend for a `Document`.
pub trait Surface {
    fn title(&mut self, text: &str);
    fn heading(&mut self, level: u8, text: &str);
    fn paragraph(&mut self, spans: &[Span]);
    fn spacer(&mut self, height: u32);
    fn table(&mut self, table: &Table);
    fn page_break(&mut self);
    /// Produce the finished output.
    fn finish(&mut self) -> Result<Vec<u8>>;
}

/// An ordered sequence of blocks ready to be drawn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn page_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b, Block::PageBreak))
            .count()
            + 1
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Table(table) => Some(table),
            _ => None,
        })
    }

    pub fn render(&self, surface: &mut dyn Surface) -> Result<Vec<u8>> {
        for block in &self.blocks {
            match block {
                Block::Title { text } => surface.title(text),
                Block::Heading { level, text } => surface.heading(*level, text),
                Block::Paragraph { spans } => surface.paragraph(spans),
                Block::Spacer { height } => surface.spacer(*height),
                Block::Table(table) => surface.table(table),
                Block::PageBreak => surface.page_break(),
            }
        }
        surface.finish()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Html,
    Text,
    Json,
}

impl Format {
    pub fn surface(&self) -> Box<dyn Surface> {
        match self {
            Format::Html => Box::new(HtmlSurface::new()),
            Format::Text => Box::new(TextSurface::new()),
            Format::Json => Box::new(JsonSurface::new()),
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Format::Html => "text/html; charset=utf-8",
            Format::Text => "text/plain; charset=utf-8",
            Format::Json => "application/json",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Format::Html => "html",
            Format::Text => "txt",
            Format::Json => "json",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for Format {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "html" => Ok(Format::Html),
            "text" | "txt" => Ok(Format::Text),
            "json" => Ok(Format::Json),
            other => Err(anyhow!("unknown format `{}`", other)),
        }
    }
}

/// Render a document in the requested format.
pub fn render_document(document: &Document, format: Format) -> Result<Vec<u8>> {
    let mut surface = format.surface();
    document.render(surface.as_mut())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_splits_text_cells_into_lines() {
        let cell = Cell::text("Lecture (Room 1)\nLab");
        assert_eq!(cell.lines.len(), 2);
        assert_eq!(cell.plain_text(), "Lecture (Room 1)\nLab");
        assert!(Cell::text("").lines.is_empty());
    }

    #[test]
    fn it_counts_pages() {
        let mut doc = Document::default();
        assert_eq!(doc.page_count(), 1);
        doc.push(Block::PageBreak);
        doc.push(Block::Heading {
            level: 1,
            text: String::from("Next"),
        });
        assert_eq!(doc.page_count(), 2);
    }

    #[test]
    fn it_parses_formats() {
        assert_eq!("HTML".parse::<Format>().unwrap(), Format::Html);
        assert_eq!("txt".parse::<Format>().unwrap(), Format::Text);
        assert!("pdf".parse::<Format>().is_err());
    }
}
