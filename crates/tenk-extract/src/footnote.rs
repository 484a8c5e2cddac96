//! Iterative, index-driven footnote extraction.
//!
//! Footnote markers are bracketed indices (`[1]`, `[2]`, ...) appearing in
//! cells, and the footnote bodies are rendered as three trailing grid rows
//! per footnote (blank row, label row, text row) appended after the real
//! statement data. Extraction probes indices 1, 2, 3, ... until the first
//! absent one, which fixes the footnote count N; the trailing 3×N payload
//! rows are then validated and removed.

use crate::error::{ExtractError, Result};
use crate::table::Footnote;

/// One cleansed grid row: account label plus value cells.
///
/// `None` cells are the explicit missing-value marker. In recorded marker
/// positions, column 0 is the label and column `j + 1` is value cell `j`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    /// Account label (first cell of the source row)
    pub label: String,
    /// Cleansed value cells
    pub cells: Vec<Option<String>>,
}

/// Marker occurrences of a single footnote index.
#[derive(Debug)]
struct MarkerHits {
    index: usize,
    positions: Vec<(usize, usize)>,
}

/// Remove every occurrence of `marker` from `text`, re-trimming the result.
fn strip_marker(text: &str, marker: &str) -> String {
    text.replace(marker, "").trim().to_string()
}

/// Find and blank out every occurrence of the marker for `index`.
///
/// A whole-cell marker becomes missing; an inline marker is stripped and
/// the surrounding text kept. Label cells keep their remaining text.
fn collect_marker(rows: &mut [GridRow], index: usize) -> MarkerHits {
    let marker = format!("[{}]", index);
    let mut positions = Vec::new();

    for (r, row) in rows.iter_mut().enumerate() {
        if row.label.contains(&marker) {
            positions.push((r, 0));
            row.label = strip_marker(&row.label, &marker);
        }
        for (c, cell) in row.cells.iter_mut().enumerate() {
            if let Some(text) = cell
                && text.contains(&marker)
            {
                positions.push((r, c + 1));
                let remainder = strip_marker(text, &marker);
                *cell = if remainder.is_empty() {
                    None
                } else {
                    Some(remainder)
                };
            }
        }
    }

    MarkerHits { index, positions }
}

/// First non-empty cell of a payload text row.
fn payload_text(row: &GridRow) -> Option<String> {
    if !row.label.is_empty() {
        return Some(row.label.clone());
    }
    row.cells
        .iter()
        .flatten()
        .find(|text| !text.is_empty())
        .cloned()
}

/// Extract footnotes from a cleansed grid, removing the trailing payload.
///
/// Returns the accumulated footnote records; `rows` is left holding only
/// real statement data. A grid without markers is returned unchanged with
/// an empty record list. Violations of the 3×N trailing-payload layout are
/// hard [`ExtractError::FootnoteLayout`] errors, never guessed around.
pub fn extract_footnotes(rows: &mut Vec<GridRow>) -> Result<Vec<Footnote>> {
    let mut hits: Vec<MarkerHits> = Vec::new();

    // Probe [1], [2], ... until the first absent index
    loop {
        let probe = collect_marker(rows, hits.len() + 1);
        if probe.positions.is_empty() {
            break;
        }
        hits.push(probe);
    }

    let count = hits.len();
    if count == 0 {
        return Ok(Vec::new());
    }

    let payload_len = 3 * count;
    if rows.len() < payload_len {
        return Err(ExtractError::FootnoteLayout {
            detail: format!(
                "{} footnotes need {} trailing payload rows, grid has only {} rows",
                count,
                payload_len,
                rows.len()
            ),
        });
    }
    let payload_start = rows.len() - payload_len;

    let mut footnotes = Vec::with_capacity(count);
    for hit in hits {
        let group_start = payload_start + 3 * (hit.index - 1);

        // The marker must occur inside its own payload group (the label row)
        if !hit
            .positions
            .iter()
            .any(|&(r, _)| r >= group_start && r < group_start + 3)
        {
            return Err(ExtractError::FootnoteLayout {
                detail: format!(
                    "footnote [{}] has no marker within its payload rows",
                    hit.index
                ),
            });
        }

        let text = payload_text(&rows[group_start + 2]).ok_or_else(|| {
            ExtractError::FootnoteLayout {
                detail: format!("footnote [{}] payload text row is empty", hit.index),
            }
        })?;

        let mut referents = Vec::new();
        for &(r, _) in &hit.positions {
            if r < payload_start && !referents.contains(&rows[r].label) {
                referents.push(rows[r].label.clone());
            }
        }

        footnotes.push(Footnote {
            index: hit.index,
            text,
            referents,
            positions: hit.positions,
        });
    }

    rows.truncate(payload_start);
    Ok(footnotes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(label: &str, cells: &[&str]) -> GridRow {
        GridRow {
            label: label.to_string(),
            cells: cells
                .iter()
                .map(|c| {
                    if c.is_empty() {
                        None
                    } else {
                        Some((*c).to_string())
                    }
                })
                .collect(),
        }
    }

    #[test]
    fn test_grid_without_markers_is_unchanged() {
        let mut rows = vec![row("Cash", &["100", "90"]), row("Debt", &["50", ""])];
        let before = rows.clone();
        let footnotes = extract_footnotes(&mut rows).unwrap();
        assert!(footnotes.is_empty());
        assert_eq!(rows, before);
    }

    #[test]
    fn test_single_footnote_extraction() {
        let mut rows = vec![
            row("Cash", &["100", "90"]),
            row("Restricted cash", &["[1]", "25"]),
            row("", &["", ""]),
            row("[1]", &["", ""]),
            row("Held as collateral for lease obligations.", &["", ""]),
        ];

        let footnotes = extract_footnotes(&mut rows).unwrap();
        assert_eq!(footnotes.len(), 1);

        let fx = &footnotes[0];
        assert_eq!(fx.index, 1);
        assert_eq!(fx.text, "Held as collateral for lease obligations.");
        assert_eq!(fx.referents, vec!["Restricted cash"]);
        assert!(fx.positions.contains(&(1, 1)));

        // Payload rows removed, marker cell now missing
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].cells[0], None);
        assert_eq!(rows[1].cells[1].as_deref(), Some("25"));
    }

    #[test]
    fn test_dense_indices_two_footnotes() {
        let mut rows = vec![
            row("Revenue [1]", &["100", "90"]),
            row("Deferred revenue", &["[2]", "30"]),
            row("", &["", ""]),
            row("[1]", &["", ""]),
            row("Net of returns.", &["", ""]),
            row("", &["", ""]),
            row("[2]", &["", ""]),
            row("Recognized over 12 months.", &["", ""]),
        ];

        let footnotes = extract_footnotes(&mut rows).unwrap();
        assert_eq!(footnotes.len(), 2);
        assert_eq!(footnotes[0].referents, vec!["Revenue"]);
        assert_eq!(footnotes[1].referents, vec!["Deferred revenue"]);
        assert_eq!(rows.len(), 2);
        // Inline marker stripped from the label
        assert_eq!(rows[0].label, "Revenue");
    }

    #[test]
    fn test_payload_shortfall_fails_loudly() {
        // Marker present but only one trailing row instead of three
        let mut rows = vec![row("Cash", &["[1]", "90"]), row("[1]", &["", ""])];
        assert!(matches!(
            extract_footnotes(&mut rows),
            Err(ExtractError::FootnoteLayout { .. })
        ));
    }

    #[test]
    fn test_marker_outside_payload_group_fails() {
        // Three trailing rows exist but the [1] label row is missing
        let mut rows = vec![
            row("Cash", &["[1]", "90"]),
            row("", &["", ""]),
            row("not a footnote label", &["", ""]),
            row("Some text.", &["", ""]),
        ];
        assert!(matches!(
            extract_footnotes(&mut rows),
            Err(ExtractError::FootnoteLayout { .. })
        ));
    }
}
