pub mod report;

use std::collections::HashMap;

use serde::Serialize;

use crate::scoreboard::ScoreboardRow;
use crate::verdict;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".html") || lower.ends_with(".htm") {
        return Some(OutputFormat::Html);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

/// Problem detail page behind a header cell. Identifiers are inserted as raw
/// text; the OJ routes them verbatim.
pub fn problem_url(web_base: &str, problem: &str) -> String {
    format!("{}/problems/{}/", web_base.trim_end_matches('/'), problem)
}

/// Submission listing behind a status cell, filtered to one contestant and
/// one problem column.
pub fn submissions_url(web_base: &str, group: &str, name: &str, problem: &str) -> String {
    format!(
        "{}/groups/{}/submissions/?count=100000&name={}&problem_id={}",
        web_base.trim_end_matches('/'),
        group,
        name,
        problem
    )
}

#[derive(Clone, Debug, Serialize)]
pub struct HeaderRecord {
    pub problem_id: u64,
    pub title: String,
    pub link: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct CellRecord {
    pub code: String,
    pub label: &'static str,
    pub color: &'static str,
    pub link: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct RowRecord {
    pub name: String,
    pub solved: u32,
    pub attempts: u32,
    pub cells: Vec<CellRecord>,
}

#[derive(Clone, Debug, Serialize)]
pub struct BoardReport {
    pub group_id: u64,
    pub headers: Vec<HeaderRecord>,
    pub rows: Vec<RowRecord>,
}

/// Join scoreboard rows with header metadata and per-cell classification.
/// Cell (r, c) is styled from `rows[r].cells[c]` and navigates using
/// `rows[r].name` and the column c header title, keeping the row/column
/// alignment explicit.
pub fn build_report(
    rows: &[ScoreboardRow],
    problems: &[u64],
    problem_names: &HashMap<u64, String>,
    web_base: &str,
    group_id: u64,
) -> BoardReport {
    let headers: Vec<HeaderRecord> = problems
        .iter()
        .map(|&problem_id| {
            let title = problem_names
                .get(&problem_id)
                .cloned()
                .unwrap_or_else(|| problem_id.to_string());
            let link = problem_url(web_base, &title);
            HeaderRecord {
                problem_id,
                title,
                link,
            }
        })
        .collect();

    let group = group_id.to_string();
    let out_rows: Vec<RowRecord> = rows
        .iter()
        .map(|row| {
            let cells: Vec<CellRecord> = headers
                .iter()
                .zip(row.cells.iter())
                .map(|(header, code)| {
                    let style = verdict::classify(code);
                    CellRecord {
                        code: code.clone(),
                        label: style.label,
                        color: style.color,
                        link: submissions_url(web_base, &group, &row.name, &header.title),
                    }
                })
                .collect();
            RowRecord {
                name: row.name.clone(),
                solved: row.solved,
                attempts: row.attempts,
                cells,
            }
        })
        .collect();

    BoardReport {
        group_id,
        headers,
        rows: out_rows,
    }
}

pub fn render_text(report: &BoardReport) -> Vec<u8> {
    let name_width = report
        .rows
        .iter()
        .map(|r| r.name.len())
        .chain(std::iter::once("name".len()))
        .max()
        .unwrap_or(4);
    let col_widths: Vec<usize> = report
        .headers
        .iter()
        .enumerate()
        .map(|(col, h)| {
            report
                .rows
                .iter()
                .map(|r| r.cells[col].code.len())
                .chain(std::iter::once(h.title.len()))
                .max()
                .unwrap_or(1)
        })
        .collect();

    let mut out = String::new();
    out.push_str(&format!("{:<name_width$}", "name"));
    for (header, width) in report.headers.iter().zip(col_widths.iter().copied()) {
        out.push_str(&format!("  {:<width$}", header.title));
    }
    out.push_str("  solved\n");
    for row in report.rows.iter() {
        out.push_str(&format!("{:<name_width$}", row.name));
        for (cell, width) in row.cells.iter().zip(col_widths.iter().copied()) {
            out.push_str(&format!("  {:<width$}", cell.code));
        }
        out.push_str(&format!("  {}\n", row.solved));
    }
    out.into_bytes()
}

pub fn render_json(report: &BoardReport) -> Vec<u8> {
    serde_json::to_vec_pretty(report).unwrap_or_else(|_| b"{}\n".to_vec())
}

pub fn render_html(report: &BoardReport) -> Vec<u8> {
    report::render_html(report)
}
