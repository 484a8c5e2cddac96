//! Rendered statement table scraping and row classification.
//!
//! EDGAR renders each statement as an HTML table whose rows fall into three
//! shapes: header rows (`th` cells), section divider rows (a `strong`
//! element inside a regular row), and data rows (plain `td` cells, first
//! cell the account label). Classification precedence follows that order;
//! a row matching none of the three is reported, never silently dropped.

use crate::error::{ExtractError, Result};
use scraper::{ElementRef, Html, Selector};

/// One classified table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawRow {
    /// Header row: ordered heading cell texts
    Header(Vec<String>),
    /// Section divider: the section label
    Section(String),
    /// Data row: ordered cell texts, first cell the account label
    Data(Vec<String>),
}

/// The raw structure of one statement table, in document order.
///
/// `sections` records trailing delimiters: each entry is a section label
/// paired with the number of consecutive data rows that preceded it since
/// the previous section row (the span of the section now closing).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementBlock {
    /// Header rows, in document order
    pub headers: Vec<Vec<String>>,
    /// Section labels with the data-row span each one closes
    pub sections: Vec<(String, usize)>,
    /// Data rows (label followed by value cells)
    pub data: Vec<Vec<String>>,
}

impl StatementBlock {
    /// Assemble a block from classified rows in document order.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = RawRow>,
    {
        let mut block = Self::default();
        let mut rows_since_section = 0usize;

        for row in rows {
            match row {
                RawRow::Header(cells) => block.headers.push(cells),
                RawRow::Section(label) => {
                    block.sections.push((label, rows_since_section));
                    rows_since_section = 0;
                }
                RawRow::Data(cells) => {
                    block.data.push(cells);
                    rows_since_section += 1;
                }
            }
        }

        block
    }
}

/// Text content of an element, trimmed of whitespace and non-breaking
/// spaces (EDGAR pads numeric cells with `&nbsp;`).
fn cell_text(element: ElementRef<'_>) -> String {
    let text: String = element.text().collect();
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{a0}')
        .to_string()
}

/// The selectors row classification needs, compiled once per parse.
struct RowSelectors {
    th: Selector,
    td: Selector,
    strong: Selector,
}

impl RowSelectors {
    fn new() -> Self {
        Self {
            th: Selector::parse("th").expect("static selector"),
            td: Selector::parse("td").expect("static selector"),
            strong: Selector::parse("strong").expect("static selector"),
        }
    }
}

/// Classify a single `tr` element.
fn classify_row(row: ElementRef<'_>, index: usize, sel: &RowSelectors) -> Result<RawRow> {
    let headings: Vec<String> = row.select(&sel.th).map(cell_text).collect();
    if !headings.is_empty() {
        return Ok(RawRow::Header(headings));
    }

    let cells: Vec<String> = row.select(&sel.td).map(cell_text).collect();
    if row.select(&sel.strong).next().is_some() {
        let label = cells
            .first()
            .cloned()
            .ok_or(ExtractError::RowClassification { row: index })?;
        return Ok(RawRow::Section(label));
    }

    if cells.is_empty() {
        return Err(ExtractError::RowClassification { row: index });
    }
    Ok(RawRow::Data(cells))
}

/// Parse the first table of a rendered report page into a [`StatementBlock`].
pub fn parse_statement_table(html: &str) -> Result<StatementBlock> {
    let document = Html::parse_document(html);
    let table_sel = Selector::parse("table").expect("static selector");
    let tr_sel = Selector::parse("tr").expect("static selector");
    let selectors = RowSelectors::new();

    let table = document
        .select(&table_sel)
        .next()
        .ok_or(ExtractError::NoTable)?;

    let rows = table
        .select(&tr_sel)
        .enumerate()
        .map(|(i, row)| classify_row(row, i, &selectors))
        .collect::<Result<Vec<_>>>()?;

    Ok(StatementBlock::from_rows(rows))
}
