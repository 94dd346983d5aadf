//! Plain-text rendering of the results table.

use super::format;
use crate::sort::{Column, SortState};
use crate::types::records::ScreeningRecord;

fn cell(record: &ScreeningRecord, column: Column) -> String {
    match column {
        Column::Symbol => record.symbol.clone(),
        Column::Price => format::price(record.current_price),
        Column::Score => format::score(record.score()),
        Column::PFcf => format::p_fcf(record.p_fcf()),
        Column::Peg => format::ratio(record.peg_ratio),
        Column::Roe => format::percent(record.return_on_equity),
        Column::DebtToEquity => format::ratio(record.debt_to_equity),
        Column::HistoricalVolatility => format::percent(record.historical_volatility),
        Column::IvShort => format::percent(record.iv_short),
        Column::IvRank => format::iv_rank(record.iv_rank()),
        Column::IvRatio => format::ratio(record.iv_term_structure_ratio),
        Column::Insider => format!(
            "{}{}",
            format::insider(record.insider_net_shares),
            format::insider_tone(record.insider_net_shares).marker()
        ),
        Column::Target => {
            format::target_range(record.target_low, record.target_mean, record.target_high)
        }
    }
}

/// Renders `rows` as an aligned table; the active sort column carries an
/// arrow.
pub fn render_table(rows: &[ScreeningRecord], sort: &SortState) -> String {
    let active = Column::for_field(&sort.key);

    let header: Vec<String> = Column::ALL
        .iter()
        .map(|&c| {
            if Some(c) == active {
                format!("{} {}", c.label(), sort.direction.arrow())
            } else {
                c.label().to_string()
            }
        })
        .collect();

    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|r| Column::ALL.iter().map(|&c| cell(r, c)).collect())
        .collect();

    let widths: Vec<usize> = (0..Column::ALL.len())
        .map(|i| {
            body.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(header[i].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    push_row(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);
    for row in &body {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}
