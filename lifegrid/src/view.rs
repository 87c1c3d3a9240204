//! Render model for the week grid
//!
//! `GridView` is what the front end draws: a header of column numbers and one
//! labelled row per year. `render_text` draws the same model in a terminal.

use serde::Serialize;

use crate::config::AnimationConfig;
use crate::grid::{CellState, WeekGridResult, WEEKS_PER_ROW};

pub const LIVED_GLYPH: char = '■';
pub const UNLIVED_GLYPH: char = '□';

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCell {
    pub index: u32,
    pub state: CellState,
    /// Entrance delay for the fade/scale animation.
    pub delay_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRow {
    pub year: i32,
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridView {
    pub header: Vec<u32>,
    pub rows: Vec<GridRow>,
    pub weeks_lived: i64,
    pub lived_cells: u32,
    pub total_weeks: u32,
    pub initial_opacity: f64,
    pub initial_scale: f64,
}

impl GridView {
    pub fn new(result: &WeekGridResult, animation: &AnimationConfig) -> Self {
        let rows = result
            .year_labels
            .iter()
            .enumerate()
            .map(|(row, &year)| {
                let row = row as u32;
                let start = row * WEEKS_PER_ROW;
                let cells = (start..start + result.cells_in_row(row))
                    .map(|index| GridCell {
                        index,
                        state: result.cell_state(index),
                        delay_ms: index.saturating_mul(animation.stagger_ms),
                    })
                    .collect();
                GridRow { year, cells }
            })
            .collect();

        Self {
            header: result.week_column_numbers.clone(),
            rows,
            weeks_lived: result.weeks_lived,
            lived_cells: result.lived_cells(),
            total_weeks: result.total_weeks,
            initial_opacity: animation.initial_opacity,
            initial_scale: animation.initial_scale,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).sum()
    }
}

/// Draw `view` as plain text: a digit ruler, then `YEAR ■■■□□□` rows.
pub fn render_text(view: &GridView) -> String {
    let label_width = view
        .rows
        .iter()
        .map(|r| r.year.to_string().len())
        .max()
        .unwrap_or(4);

    let mut out = String::new();
    out.push_str(&" ".repeat(label_width + 1));
    for column in &view.header {
        out.push(char::from_digit(column % 10, 10).unwrap_or('?'));
    }
    out.push('\n');

    for row in &view.rows {
        out.push_str(&format!("{:>width$} ", row.year, width = label_width));
        for cell in &row.cells {
            out.push(match cell.state {
                CellState::Lived => LIVED_GLYPH,
                CellState::Unlived => UNLIVED_GLYPH,
            });
        }
        out.push('\n');
    }
    out
}
