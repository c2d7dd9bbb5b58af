//! Plain-text rendering of figures and tables for terminal front ends.

use crate::plots::{DataFrame, Figure, RankingTable};
use crate::text::title_case;

pub fn chart_caption(figure: &Figure) -> String {
    match figure {
        Figure::Line(chart) => {
            let series = chart.traces.len();
            format!(
                "[grafik] {} ({} titik, {} seri)",
                chart.title,
                figure.point_count(),
                series
            )
        }
        Figure::Map(chart) => format!(
            "[peta] {} ({} titik, skala {} {:.2}..{:.2})",
            chart.title,
            figure.point_count(),
            chart.colorbar_label,
            chart.value_range.0,
            chart.value_range.1
        ),
    }
}

/// Aligned text table; long frames are cut after `max_rows` rows.
pub fn render_table(frame: &DataFrame, max_rows: usize) -> String {
    let (header, rows) = table_cells(frame);
    let total = rows.len();
    let shown: Vec<Vec<String>> = rows.into_iter().take(max_rows).collect();

    let mut widths: Vec<usize> = header.iter().map(|cell| cell.chars().count()).collect();
    for row in &shown {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = vec![format_row(&header, &widths)];
    lines.push(
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    lines.extend(shown.iter().map(|row| format_row(row, &widths)));
    if total > max_rows {
        lines.push(format!("... {} baris lainnya", total - max_rows));
    }
    lines.join("\n")
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

fn table_cells(frame: &DataFrame) -> (Vec<String>, Vec<Vec<String>>) {
    match frame {
        DataFrame::Series(series) => (
            header(&["Waktu", "TML (m)"]),
            series
                .points
                .iter()
                .map(|p| vec![p.time.to_string(), format!("{:.3}", p.sla)])
                .collect(),
        ),
        DataFrame::Yearly(yearly) => (
            header(&["Tahun", "TML (m)"]),
            yearly
                .points
                .iter()
                .map(|p| vec![p.year.to_string(), format!("{:.3}", p.sla)])
                .collect(),
        ),
        DataFrame::Comparison(comparison) => (
            header(&["Waktu", comparison.level.title(), "TML (m)"]),
            comparison
                .rows
                .iter()
                .map(|r| {
                    vec![r.time.to_string(), title_case(&r.location), format!("{:.3}", r.sla)]
                })
                .collect(),
        ),
        DataFrame::Ranking(table) => (header(&table.columns()), ranking_rows(table)),
    }
}

fn header(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

fn ranking_rows(table: &RankingTable) -> Vec<Vec<String>> {
    table
        .rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.rank.to_string()];
            if row.desa.is_some() {
                for value in [&row.desa, &row.kecamatan, &row.kabupaten] {
                    cells.push(title_case(value.as_deref().unwrap_or_default()));
                }
            }
            cells.push(title_case(&row.provinsi));
            cells.push(format!("{:.3}", row.mean_sla));
            cells
        })
        .collect()
}
