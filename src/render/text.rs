//! Plain text output for terminals. Colours are dropped and page breaks
//! become form feeds.

use anyhow::Result;
use itertools::Itertools;

use super::{Cell, Span, Surface, Table};

const PAGE_BREAK: &str = "\u{000C}\n";

fn cell_text(cell: &Cell) -> String {
    cell.plain_text().lines().join(" / ")
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

pub struct TextSurface {
    out: String,
}

impl TextSurface {
    pub fn new() -> Self {
        Self { out: String::new() }
    }
}

impl Default for TextSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for TextSurface {
    fn title(&mut self, text: &str) {
        self.out.push_str(text);
        self.out.push('\n');
        self.out.push_str(&"=".repeat(text.chars().count()));
        self.out.push_str("\n\n");
    }

    fn heading(&mut self, level: u8, text: &str) {
        self.out.push_str(&"#".repeat(level.max(1) as usize));
        self.out.push(' ');
        self.out.push_str(text);
        self.out.push_str("\n\n");
    }

    fn paragraph(&mut self, spans: &[Span]) {
        self.out
            .push_str(&spans.iter().map(|s| s.text.as_str()).collect::<String>());
        self.out.push_str("\n\n");
    }

    fn spacer(&mut self, _height: u32) {}

    fn table(&mut self, table: &Table) {
        let columns = table
            .rows
            .iter()
            .map(|row| row.iter().map(|c| c.colspan.max(1)).sum::<usize>())
            .max()
            .unwrap_or(0);
        let mut widths = vec![0usize; columns];
        for row in &table.rows {
            let mut col = 0;
            for cell in row {
                if cell.colspan <= 1 && col < columns {
                    widths[col] = widths[col].max(cell_text(cell).chars().count());
                }
                col += cell.colspan.max(1);
            }
        }

        for (idx, row) in table.rows.iter().enumerate() {
            let mut col = 0;
            let cells = row
                .iter()
                .map(|cell| {
                    let span = cell.colspan.max(1);
                    let end = (col + span).min(columns);
                    let width = widths[col.min(end)..end].iter().sum::<usize>() + 3 * (span - 1);
                    col += span;
                    pad(&cell_text(cell), width)
                })
                .join(" | ");
            self.out.push_str(&format!("| {} |\n", cells));

            if idx + 1 == table.header_rows {
                let rule = widths.iter().map(|w| "-".repeat(*w)).join("-|-");
                self.out.push_str(&format!("|-{}-|\n", rule));
            }
        }
        self.out.push('\n');
    }

    fn page_break(&mut self) {
        self.out.push_str(PAGE_BREAK);
    }

    fn finish(&mut self) -> Result<Vec<u8>> {
        Ok(std::mem::take(&mut self.out).into_bytes())
    }
}
