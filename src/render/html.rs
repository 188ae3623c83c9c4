//! Print-ready HTML. Page breaks map to CSS `break-after` and table header
//! rows go in `<thead>` so browsers repeat them across printed pages.
//! Everything user supplied goes through Handlebars' HTML escaping.

use anyhow::{Context, Result};
use handlebars::Handlebars;
use serde::Serialize;
use serde_json::json;

use super::{Cell, Span, Surface, Table, VerticalAlign};

const DOCUMENT_TEMPLATE: &str = "document";

const DOCUMENT_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{{title}}</title>
<style>
@page { size: letter; margin: 24pt; }
body { font-family: Helvetica, Arial, sans-serif; font-size: 10pt; color: #111; margin: 24pt; }
h1.title { font-size: 20pt; text-align: center; }
table.grid { border-collapse: collapse; width: 100%; table-layout: fixed; }
table.grid th, table.grid td { padding: 3pt; word-wrap: break-word; }
thead { display: table-header-group; }
tr { break-inside: avoid; }
.page-break { break-after: page; page-break-after: always; }
</style>
</head>
<body>
{{#each blocks}}
{{#if title}}<h1 class="title">{{title}}</h1>{{/if}}
{{#if heading}}<h{{heading.level}}>{{heading.text}}</h{{heading.level}}>{{/if}}
{{#if paragraph}}<p>{{#each paragraph}}<span style="{{style}}">{{text}}</span>{{/each}}</p>{{/if}}
{{#if spacer}}<div style="height: {{spacer}}pt"></div>{{/if}}
{{#if table}}
<table class="grid" style="{{table.style}}">
{{#if table.widths}}<colgroup>{{#each table.widths}}<col style="width: {{this}}pt">{{/each}}</colgroup>{{/if}}
<thead>
{{#each table.header}}<tr>{{#each this}}<th colspan="{{colspan}}" style="{{style}}">{{#each lines}}{{#unless @first}}<br>{{/unless}}{{#each this}}<span style="{{style}}">{{text}}</span>{{/each}}{{/each}}</th>{{/each}}</tr>
{{/each}}
</thead>
<tbody>
{{#each table.body}}<tr style="{{style}}">{{#each cells}}<td colspan="{{colspan}}" style="{{style}}">{{#each lines}}{{#unless @first}}<br>{{/unless}}{{#each this}}<span style="{{style}}">{{text}}</span>{{/each}}{{/each}}</td>{{/each}}</tr>
{{/each}}
</tbody>
</table>
{{/if}}
{{#if page_break}}<div class="page-break"></div>{{/if}}
{{/each}}
</body>
</html>
"#;

#[derive(Serialize)]
struct SpanView {
    text: String,
    style: String,
}

#[derive(Serialize)]
struct CellView {
    colspan: usize,
    style: String,
    lines: Vec<Vec<SpanView>>,
}

#[derive(Serialize)]
struct RowView {
    style: String,
    cells: Vec<CellView>,
}

#[derive(Serialize)]
struct TableView {
    style: String,
    widths: Vec<u32>,
    header: Vec<Vec<CellView>>,
    body: Vec<RowView>,
}

#[derive(Serialize)]
struct HeadingView {
    level: u8,
    text: String,
}

#[derive(Default, Serialize)]
struct BlockView {
    title: Option<String>,
    heading: Option<HeadingView>,
    paragraph: Option<Vec<SpanView>>,
    spacer: Option<u32>,
    table: Option<TableView>,
    page_break: bool,
}

fn templates<'a>() -> Result<Handlebars<'a>> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    registry
        .register_template_string(DOCUMENT_TEMPLATE, DOCUMENT_HTML)
        .context("Failed to register document template")?;
    Ok(registry)
}

fn span_view(span: &Span) -> SpanView {
    let mut style = vec![];
    if let Some(color) = &span.color {
        style.push(format!("color: {}", color));
    }
    if span.bold {
        style.push(String::from("font-weight: bold"));
    }
    if let Some(size) = span.size {
        style.push(format!("font-size: {}pt", size));
    }
    SpanView {
        text: span.text.clone(),
        style: style.join("; "),
    }
}

fn table_view(table: &Table) -> TableView {
    let style = &table.style;
    let border = style
        .grid_color
        .as_ref()
        .map(|c| format!("border: 0.5pt solid {}", c));
    let valign = match style.valign {
        VerticalAlign::Top => "vertical-align: top",
        VerticalAlign::Bottom => "vertical-align: bottom",
    };

    let cell_view = |cell: &Cell, header: bool| {
        let mut parts = vec![valign.to_string()];
        if let Some(border) = &border {
            parts.push(border.clone());
        }
        let background = match (&cell.background, header) {
            (Some(background), _) => Some(background),
            (None, true) => style.header_background.as_ref(),
            (None, false) => None,
        };
        if let Some(background) = background {
            parts.push(format!("background: {}", background));
        }
        CellView {
            colspan: cell.colspan.max(1),
            style: parts.join("; "),
            lines: cell
                .lines
                .iter()
                .map(|line| line.iter().map(span_view).collect())
                .collect(),
        }
    };

    let row_style = style
        .row_height
        .map(|h| format!("height: {}pt", h))
        .unwrap_or_default();

    TableView {
        style: format!("font-size: {}pt", style.font_size),
        widths: style.col_widths.clone().unwrap_or_default(),
        header: table
            .header()
            .iter()
            .map(|row| row.iter().map(|c| cell_view(c, true)).collect())
            .collect(),
        body: table
            .body()
            .iter()
            .map(|row| RowView {
                style: row_style.clone(),
                cells: row.iter().map(|c| cell_view(c, false)).collect(),
            })
            .collect(),
    }
}

pub struct HtmlSurface {
    title: Option<String>,
    blocks: Vec<BlockView>,
}

impl HtmlSurface {
    pub fn new() -> Self {
        Self {
            title: None,
            blocks: vec![],
        }
    }
}

impl Default for HtmlSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for HtmlSurface {
    fn title(&mut self, text: &str) {
        if self.title.is_none() {
            self.title = Some(text.to_string());
        }
        self.blocks.push(BlockView {
            title: Some(text.to_string()),
            ..Default::default()
        });
    }

    fn heading(&mut self, level: u8, text: &str) {
        self.blocks.push(BlockView {
            heading: Some(HeadingView {
                level: level.clamp(1, 6),
                text: text.to_string(),
            }),
            ..Default::default()
        });
    }

    fn paragraph(&mut self, spans: &[Span]) {
        self.blocks.push(BlockView {
            paragraph: Some(spans.iter().map(span_view).collect()),
            ..Default::default()
        });
    }

    fn spacer(&mut self, height: u32) {
        self.blocks.push(BlockView {
            spacer: Some(height),
            ..Default::default()
        });
    }

    fn table(&mut self, table: &Table) {
        self.blocks.push(BlockView {
            table: Some(table_view(table)),
            ..Default::default()
        });
    }

    fn page_break(&mut self) {
        self.blocks.push(BlockView {
            page_break: true,
            ..Default::default()
        });
    }

    fn finish(&mut self) -> Result<Vec<u8>> {
        let data = json!({
            "title": self.title.clone().unwrap_or_default(),
            "blocks": std::mem::take(&mut self.blocks),
        });
        let html = templates()?
            .render(DOCUMENT_TEMPLATE, &data)
            .context("Failed to render HTML document")?;
        Ok(html.into_bytes())
    }
}
