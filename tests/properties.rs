//! Property-based invariants of the renderer.
//!
//! Verifies:
//! 1. normalize is idempotent, including on tag and entity fragments
//! 2. every rendered table row has exactly max(headers, dividers) cells
//! 3. a divider row is accepted iff every cell is `:?-{3,}:?`
//! 4. exported CSV decodes back to the grid it was built from
//! 5. rendering never panics and always yields balanced containers

use mdhtml::interaction::{MountedView, to_csv};
use mdhtml::{alignment_row, markdown_to_html, normalize};
use proptest::prelude::*;

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_tag_soup() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        Just("<br>".to_string()),
        Just("<br/>".to_string()),
        Just("<p>".to_string()),
        Just("</p>".to_string()),
        Just("<div class=\"x\">".to_string()),
        Just("</div>".to_string()),
        Just("<span>".to_string()),
        Just("</font>".to_string()),
        Just("&lt;".to_string()),
        Just("&gt;".to_string()),
        Just("&nbsp;".to_string()),
        Just("&".to_string()),
        Just("<".to_string()),
        Just(">".to_string()),
        Just("/".to_string()),
        Just("br".to_string()),
        Just("span".to_string()),
        Just("nbsp;".to_string()),
        Just("\r\n".to_string()),
        Just("\r".to_string()),
        "[a-z ]{0,3}",
    ];
    prop::collection::vec(piece, 0..24).prop_map(|pieces| pieces.concat())
}

fn arb_cell() -> impl Strategy<Value = String> {
    "[a-z0-9]{1,4}"
}

fn arb_divider_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("---".to_string()),
        Just(":---".to_string()),
        Just("---:".to_string()),
        Just(":---:".to_string()),
        "[-: a]{0,6}",
    ]
}

/// Independent check of a single divider cell.
fn is_divider_cell(cell: &str) -> bool {
    let compact: String = cell.chars().filter(|c| !c.is_whitespace()).collect();
    let inner = compact.strip_prefix(':').unwrap_or(&compact);
    let inner = inner.strip_suffix(':').unwrap_or(inner);
    inner.len() >= 3 && inner.chars().all(|c| c == '-')
}

fn table_line(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}

proptest! {
    #[test]
    fn normalize_is_idempotent(text in arb_tag_soup()) {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_is_idempotent_on_any_text(text in any::<String>()) {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn rendered_rows_have_column_count_cells(
        headers in prop::collection::vec(arb_cell(), 1..5),
        dividers in 1usize..5,
        rows in prop::collection::vec(prop::collection::vec(arb_cell(), 1..7), 0..4),
    ) {
        let divider: Vec<String> = (0..dividers).map(|_| "---".to_string()).collect();
        let mut markdown = vec![table_line(&headers), table_line(&divider)];
        markdown.extend(rows.iter().map(|row| table_line(row)));

        let html = markdown_to_html(&markdown.join("\n"));
        let view = MountedView::mount(&html);
        let columns = headers.len().max(dividers);

        let trs = view.select_all("tr");
        prop_assert_eq!(trs.len(), rows.len() + 1);
        for tr in trs {
            let cells = tr.children().filter_map(scraper::ElementRef::wrap).count();
            prop_assert_eq!(cells, columns);
        }
    }

    #[test]
    fn divider_accepted_iff_every_cell_valid(cells in prop::collection::vec(arb_divider_cell(), 1..5)) {
        let line = table_line(&cells);
        let expected = cells.iter().all(|cell| is_divider_cell(cell));
        prop_assert_eq!(alignment_row(&line).is_some(), expected);
        if let Some(alignments) = alignment_row(&line) {
            prop_assert_eq!(alignments.len(), cells.len());
        }
    }

    #[test]
    fn csv_decodes_to_original_grid(
        width in 2usize..4,
        grid_seed in prop::collection::vec(prop::collection::vec("[a-z,\" \n]{0,6}", 4), 1..5),
    ) {
        let grid: Vec<Vec<String>> = grid_seed
            .into_iter()
            .map(|row| row.into_iter().take(width).collect())
            .collect();
        let encoded = to_csv(&grid);

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(encoded.as_bytes());
        let decoded: Vec<Vec<String>> = reader
            .records()
            .map(|record| record.map(|r| r.iter().map(str::to_string).collect::<Vec<_>>()))
            .collect::<Result<_, _>>()
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(decoded, grid);
    }

    #[test]
    fn rendering_never_panics(text in any::<String>()) {
        let html = markdown_to_html(&text);
        prop_assert_eq!(html.matches("<p>").count(), html.matches("</p>").count());
        prop_assert_eq!(html.matches("<table>").count(), html.matches("</table>").count());
    }
}
