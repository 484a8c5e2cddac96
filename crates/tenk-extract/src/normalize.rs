//! Statement table normalization.
//!
//! Turns one [`StatementBlock`] into a [`NormalizedStatement`]: header
//! consumption, value cleansing, footnote extraction, numeric conversion,
//! pruning of marker-only columns, and section replay.

use crate::cleanse::cleanse_cells;
use crate::error::{ExtractError, Result};
use crate::footnote::{GridRow, extract_footnotes};
use crate::scrape::{StatementBlock, parse_statement_table};
use crate::table::NormalizedStatement;
use tracing::debug;

/// Normalize the first table of a rendered report page.
pub fn normalize_html(html: &str) -> Result<NormalizedStatement> {
    let block = parse_statement_table(html)?;
    normalize(&block)
}

/// Normalize a scanned statement block.
///
/// A block with zero data rows produces an empty statement; a block with
/// zero header rows is a hard error, since period labels cannot be
/// assigned.
pub fn normalize(block: &StatementBlock) -> Result<NormalizedStatement> {
    if block.headers.is_empty() {
        return Err(ExtractError::NoHeaderRow);
    }
    if block.data.is_empty() {
        return Ok(NormalizedStatement::empty());
    }

    // Cleanse value cells; rows narrower than the widest are padded with
    // missing values (rendered tables drop trailing empty cells)
    let width = block
        .data
        .iter()
        .map(|row| row.len().saturating_sub(1))
        .max()
        .unwrap_or(0);

    let mut rows: Vec<GridRow> = block
        .data
        .iter()
        .map(|cells| {
            let label = cells.first().cloned().unwrap_or_default();
            let mut values = cleanse_cells(&cells[1.min(cells.len())..]);
            values.resize(width, None);
            GridRow {
                label,
                cells: values,
            }
        })
        .collect();

    let footnotes = extract_footnotes(&mut rows)?;
    if !footnotes.is_empty() {
        debug!(count = footnotes.len(), "extracted footnotes");
    }

    // Numeric conversion; cleansing and marker removal have already mapped
    // every non-numeric rendering to missing, so anything left is corrupt
    let mut grid: Vec<Vec<Option<f64>>> = Vec::with_capacity(rows.len());
    for row in &rows {
        let mut converted = Vec::with_capacity(row.cells.len());
        for (c, cell) in row.cells.iter().enumerate() {
            let value = match cell {
                None => None,
                Some(text) => {
                    Some(
                        text.parse::<f64>()
                            .map_err(|_| ExtractError::ValueParse {
                                row: row.label.clone(),
                                column: c,
                                text: text.clone(),
                            })?,
                    )
                }
            };
            converted.push(value);
        }
        grid.push(converted);
    }

    // Drop columns that are entirely missing (they existed only to host
    // now-removed footnote markers)
    let surviving: Vec<usize> = (0..width)
        .filter(|&c| grid.iter().any(|row| row[c].is_some()))
        .collect();
    let values: Vec<Vec<Option<f64>>> = grid
        .iter()
        .map(|row| surviving.iter().map(|&c| row[c]).collect())
        .collect();

    let periods = consume_headers(&block.headers, surviving.len())?;
    let labels: Vec<String> = rows.iter().map(|r| r.label.clone()).collect();
    let sections = replay_sections(&block.sections, labels.len());

    NormalizedStatement::new(labels, periods, values, sections, footnotes)
}

/// Assign period labels from the collected header rows.
///
/// The first header row's element 0 is the statement title and is
/// discarded; the rest are the period labels. When their count does not
/// match the surviving columns (income and cash-flow pages put a duration
/// banner in the first row and the dates in the second), later header rows
/// are consulted for an exact-width match. No fit is a hard error: it
/// means a layout assumption was violated upstream.
fn consume_headers(headers: &[Vec<String>], columns: usize) -> Result<Vec<String>> {
    let first = &headers[0];
    let labels = &first[1.min(first.len())..];
    if labels.len() == columns {
        return Ok(labels.to_vec());
    }

    for header in &headers[1..] {
        if header.len() == columns {
            return Ok(header.clone());
        }
        if header.len() == columns + 1 {
            return Ok(header[1..].to_vec());
        }
    }

    Err(ExtractError::ColumnCountMismatch {
        labels: labels.len(),
        columns,
    })
}

/// Replay section spans against the final row order.
///
/// Each recorded span is the number of data rows that preceded a section
/// row: the content of the *previous* section, which that row closes.
/// Rows before the first section row are enclosed by nothing; rows after
/// the last section row belong to the last section.
fn replay_sections(sections: &[(String, usize)], row_count: usize) -> Vec<Option<String>> {
    let mut result = vec![None; row_count];
    let mut cursor = 0usize;
    let mut open: Option<&str> = None;

    for (label, span) in sections {
        let end = (cursor + span).min(row_count);
        for slot in result.iter_mut().take(end).skip(cursor) {
            *slot = open.map(str::to_string);
        }
        cursor = end;
        open = Some(label.as_str());
    }
    for slot in result.iter_mut().skip(cursor) {
        *slot = open.map(str::to_string);
    }

    result
}
