//! Table structure rule.
//!
//! For each `<table>`: extracts the cell matrix from `thead`/`tbody`/
//! `tfoot`, resolves the table's accessible name, validates the
//! `headers`/`id` reference graph, checks spanned cells, scores a
//! layout-table heuristic, and assigns the verdict. A table explicitly
//! marked `role="presentation"` (or scoring as likely layout) is always a
//! warning, never a pass or fail, regardless of how complete its headers
//! and labels are.

use crate::context::DocumentContext;
use crate::dom::labels::{resolve_label, TABLE_SOURCES};
use crate::dom::style::is_visible;
use crate::dom::text_content;
use crate::verdict::Verdict;
use regex::Regex;
use scraper::{ElementRef, Selector};
use std::collections::HashMap;

/// One table cell, with its grid position inside its section.
#[derive(Debug, Clone)]
pub struct TableCell {
    /// `th` or `td`
    pub tag: String,
    /// Trimmed text content
    pub text: String,
    /// `scope` attribute, empty when absent
    pub scope: String,
    /// `id` attribute, empty when absent
    pub id: String,
    /// `headers` attribute, empty when absent
    pub headers: String,
    /// Parsed `colspan`, defaulting to 1
    pub colspan: u32,
    /// Parsed `rowspan`, defaulting to 1
    pub rowspan: u32,
    /// Row index within the section
    pub row: usize,
    /// Cell index within the row
    pub col: usize,
}

impl TableCell {
    fn spans(&self) -> bool {
        self.colspan > 1 || self.rowspan > 1
    }
}

/// Outcome of validating `headers` attribute references against cell ids.
#[derive(Debug, Clone, Default)]
pub struct HeadersIdAnalysis {
    /// Any cell uses a `headers` attribute
    pub has_connections: bool,
    /// One issue per bad reference
    pub issues: Vec<String>,
    /// Number of cells carrying `headers`
    pub cells_with_headers: usize,
    /// Number of cells carrying `id`
    pub cells_with_id: usize,
}

/// Outcome of checking cells with `colspan`/`rowspan` > 1.
#[derive(Debug, Clone, Default)]
pub struct SpanAnalysis {
    /// Any cell spans
    pub has_spanned_cells: bool,
    /// Number of spanning cells
    pub spanned_cells: usize,
    /// Recommendations for under-annotated spanning cells
    pub issues: Vec<String>,
}

/// Individual signals feeding the layout-table score.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutIndicators {
    /// No `th` cells at all
    pub no_th: bool,
    /// Contains form controls
    pub has_form_controls: bool,
    /// Two rows or fewer
    pub few_rows: bool,
    /// No numeric-looking cell text
    pub no_data_like: bool,
    /// Explicit `role="presentation"`
    pub presentation_role: bool,
}

/// Layout-table heuristic result.
#[derive(Debug, Clone, Default)]
pub struct LayoutAnalysis {
    /// Score reached the layout threshold
    pub likely_layout: bool,
    /// Signed score
    pub score: i32,
    /// The contributing signals
    pub indicators: LayoutIndicators,
}

/// Result record for one table.
#[derive(Debug)]
pub struct TableCheck<'a> {
    /// The table element
    pub element: ElementRef<'a>,
    /// Whether the table was hidden at evaluation time
    pub hidden: bool,
    /// `<caption>` text
    pub caption: String,
    /// Legacy `summary` attribute
    pub summary: String,
    /// `aria-label` attribute
    pub aria_label: String,
    /// `aria-labelledby` attribute
    pub aria_labelledby: String,
    /// Resolved accessible name, empty when unlabelled
    pub label: String,
    /// Whether any label source resolved
    pub has_label: bool,
    /// Section presence
    pub has_thead: bool,
    /// Section presence
    pub has_tbody: bool,
    /// Section presence
    pub has_tfoot: bool,
    /// Cell matrix per section
    pub thead_cells: Vec<Vec<TableCell>>,
    /// Cell matrix per section
    pub tbody_cells: Vec<Vec<TableCell>>,
    /// Cell matrix per section
    pub tfoot_cells: Vec<Vec<TableCell>>,
    /// Verdict
    pub valid: Verdict,
    /// Findings, in evaluation order
    pub issues: Vec<String>,
    /// headers/id reference-graph outcome
    pub headers_id: HeadersIdAnalysis,
    /// Spanned-cell outcome
    pub spans: SpanAnalysis,
    /// Layout heuristic outcome
    pub layout: LayoutAnalysis,
    /// `role` attribute
    pub role: Option<String>,
}

fn extract_cells(section: Option<ElementRef<'_>>) -> Vec<Vec<TableCell>> {
    let Some(section) = section else {
        return Vec::new();
    };
    let tr_sel = Selector::parse("tr").expect("valid selector");
    section
        .select(&tr_sel)
        .enumerate()
        .map(|(row, tr)| {
            tr.children()
                .filter_map(ElementRef::wrap)
                .enumerate()
                .map(|(col, cell)| {
                    let value = cell.value();
                    TableCell {
                        tag: value.name().to_string(),
                        text: text_content(cell),
                        scope: value.attr("scope").unwrap_or("").to_string(),
                        id: value.attr("id").unwrap_or("").to_string(),
                        headers: value.attr("headers").unwrap_or("").to_string(),
                        colspan: value.attr("colspan").and_then(|v| v.parse().ok()).unwrap_or(1),
                        rowspan: value.attr("rowspan").and_then(|v| v.parse().ok()).unwrap_or(1),
                        row,
                        col,
                    }
                })
                .collect()
        })
        .collect()
}

fn analyze_headers_ids(cells: &[&TableCell]) -> HeadersIdAnalysis {
    let with_headers: Vec<_> = cells.iter().filter(|c| !c.headers.is_empty()).collect();
    let id_map: HashMap<&str, &TableCell> = cells
        .iter()
        .filter(|c| !c.id.is_empty())
        .map(|c| (c.id.as_str(), *c))
        .collect();

    let mut issues = Vec::new();
    for cell in &with_headers {
        for header_id in cell.headers.split_whitespace() {
            match id_map.get(header_id) {
                None => issues.push(format!(
                    "headers=\"{}\" references missing id \"{}\"",
                    cell.headers, header_id
                )),
                Some(referenced) if referenced.tag != "th" => issues.push(format!(
                    "headers=\"{}\" references a <{}> that is not a header cell",
                    cell.headers, referenced.tag
                )),
                Some(_) => {}
            }
        }
    }

    HeadersIdAnalysis {
        has_connections: !with_headers.is_empty(),
        issues,
        cells_with_headers: with_headers.len(),
        cells_with_id: id_map.len(),
    }
}

fn analyze_spans(cells: &[&TableCell]) -> SpanAnalysis {
    let spanned: Vec<_> = cells.iter().filter(|c| c.spans()).collect();
    let mut issues = Vec::new();

    for cell in &spanned {
        if cell.tag == "th" && cell.scope.is_empty() && cell.id.is_empty() {
            let kind = if cell.colspan > 1 { "colspan" } else { "rowspan" };
            issues.push(format!("th using {} should have a scope or id", kind));
        }
        if cell.tag == "td" && cell.headers.is_empty() && spanned.len() > 2 {
            issues.push(
                "complex table: td spanning cells should reference headers".to_string(),
            );
        }
    }

    SpanAnalysis {
        has_spanned_cells: !spanned.is_empty(),
        spanned_cells: spanned.len(),
        issues,
    }
}

fn analyze_layout(
    table: ElementRef<'_>,
    cells: &[&TableCell],
    row_count: usize,
    caption: &str,
    summary: &str,
    role: Option<&str>,
) -> LayoutAnalysis {
    let numeric_re = Regex::new(r"^\d+(\.\d+)?$").expect("valid regex");
    let control_sel = Selector::parse("input, button, select, textarea").expect("valid selector");

    let has_th = cells.iter().any(|c| c.tag == "th");
    let has_numeric = cells.iter().any(|c| numeric_re.is_match(&c.text));
    let has_form_controls = table.select(&control_sel).next().is_some();
    let presentation_role = role == Some("presentation");

    let indicators = LayoutIndicators {
        no_th: !has_th,
        has_form_controls,
        few_rows: row_count <= 2,
        no_data_like: !has_numeric,
        presentation_role,
    };

    let mut score = 0i32;
    if !has_th {
        score += 2;
    }
    if has_form_controls {
        score += 2;
    }
    if row_count <= 2 {
        score += 1;
    }
    if !has_numeric && caption.is_empty() && summary.is_empty() {
        score += 1;
    }
    if presentation_role {
        score += 3;
    }
    if !caption.is_empty() {
        score -= 2;
    }
    if !summary.is_empty() {
        score -= 1;
    }
    if has_numeric {
        score -= 1;
    }

    LayoutAnalysis {
        likely_layout: score >= 3,
        score,
        indicators,
    }
}

/// Audit every `<table>` in the document.
pub fn check_tables<'a>(ctx: &'a DocumentContext) -> Vec<TableCheck<'a>> {
    let table_sel = Selector::parse("table").expect("valid selector");
    let caption_sel = Selector::parse("caption").expect("valid selector");
    let thead_sel = Selector::parse("thead").expect("valid selector");
    let tbody_sel = Selector::parse("tbody").expect("valid selector");
    let tfoot_sel = Selector::parse("tfoot").expect("valid selector");

    ctx.document()
        .select(&table_sel)
        .map(|table| {
            let value = table.value();
            let caption = table
                .select(&caption_sel)
                .next()
                .map(text_content)
                .unwrap_or_default();
            let summary = value.attr("summary").unwrap_or("").to_string();
            let aria_label = value.attr("aria-label").unwrap_or("").to_string();
            let aria_labelledby = value.attr("aria-labelledby").unwrap_or("").to_string();
            let role = value.attr("role").map(str::to_string);

            let thead = table.select(&thead_sel).next();
            let tbody = table.select(&tbody_sel).next();
            let tfoot = table.select(&tfoot_sel).next();

            let thead_cells = extract_cells(thead);
            let tbody_cells = extract_cells(tbody);
            let tfoot_cells = extract_cells(tfoot);
            let all_cells: Vec<&TableCell> = thead_cells
                .iter()
                .chain(tbody_cells.iter())
                .chain(tfoot_cells.iter())
                .flatten()
                .collect();
            let row_count =
                thead_cells.len() + tbody_cells.len() + tfoot_cells.len();

            let label = resolve_label(ctx, table, TABLE_SOURCES).unwrap_or_default();
            let has_label = !label.is_empty();

            let headers_id = analyze_headers_ids(&all_cells);
            let spans = analyze_spans(&all_cells);
            let layout = analyze_layout(
                table,
                &all_cells,
                row_count,
                &caption,
                &summary,
                role.as_deref(),
            );

            let has_th = all_cells.iter().any(|c| c.tag == "th");
            let has_scoped_th = all_cells
                .iter()
                .any(|c| c.tag == "th" && !c.scope.is_empty());

            let mut issues = headers_id.issues.clone();
            let valid;

            if role.as_deref() == Some("presentation") || layout.likely_layout {
                valid = Verdict::Warning;
                if has_label && !layout.indicators.presentation_role {
                    issues.push(
                        "looks like a layout table but has a label - add role=\"presentation\" if it is one"
                            .to_string(),
                    );
                } else if has_label && layout.indicators.presentation_role {
                    issues.push("layout table has an unnecessary label".to_string());
                }
                if layout.likely_layout && !layout.indicators.presentation_role {
                    issues.push(
                        "appears to be used for layout - use CSS grid or flexbox instead"
                            .to_string(),
                    );
                }
            } else if !has_th {
                valid = Verdict::Fail;
                issues.push("no header cells (th)".to_string());
            } else if has_label && (has_scoped_th || headers_id.has_connections) {
                valid = Verdict::Pass;
                if spans.has_spanned_cells
                    && !headers_id.has_connections
                    && spans.spanned_cells > 2
                {
                    issues.push(
                        "complex table structure - consider headers/id associations".to_string(),
                    );
                }
                issues.extend(spans.issues.iter().cloned());
            } else if has_label {
                valid = Verdict::Warning;
                issues.push("consider adding scope attributes to header cells".to_string());
                issues.extend(spans.issues.iter().cloned());
            } else {
                valid = Verdict::Warning;
                issues.push(
                    "add a table label (caption, aria-label, or aria-labelledby)".to_string(),
                );
                issues.extend(spans.issues.iter().cloned());
            }

            // summary is still seen in the wild but deprecated in HTML5
            if !summary.is_empty() {
                issues.push(
                    "the summary attribute is deprecated - use caption or aria-label instead"
                        .to_string(),
                );
            }

            TableCheck {
                element: table,
                hidden: !is_visible(table),
                caption,
                summary,
                aria_label,
                aria_labelledby,
                label,
                has_label,
                has_thead: thead.is_some(),
                has_tbody: tbody.is_some(),
                has_tfoot: tfoot.is_some(),
                thead_cells,
                tbody_cells,
                tfoot_cells,
                valid,
                issues,
                headers_id,
                spans,
                layout,
                role,
            }
        })
        .collect()
}
