//! Week grid calculator
//!
//! Turns [`LifeParameters`] plus "today" into the numbers the grid is drawn
//! from. Pure: nothing here touches storage or the wall clock directly.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::weeks_between;
use crate::params::LifeParameters;

/// Cells per grid row.
pub const WEEKS_PER_ROW: u32 = 52;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    Lived,
    Unlived,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekGridResult {
    /// Whole weeks from birth to today. Negative for a future birth date and
    /// may exceed `total_weeks` once the expected lifespan has passed.
    pub weeks_lived: i64,
    pub total_weeks: u32,
    /// One calendar year per row, starting at the birth year.
    pub year_labels: Vec<i32>,
    /// Always `1..=52`.
    pub week_column_numbers: Vec<u32>,
}

/// Compute the grid for `params` as of `today`.
pub fn compute(params: &LifeParameters, today: NaiveDate) -> WeekGridResult {
    let weeks_lived = weeks_between(params.birth_date, today);
    let total = weeks_between(params.birth_date, params.end_of_life());
    let total_weeks = u32::try_from(total.max(0)).unwrap_or(u32::MAX);

    let birth_year = params.birth_year();
    let year_labels = (0..row_count(total_weeks))
        .map(|row| birth_year + row as i32)
        .collect();

    WeekGridResult {
        weeks_lived,
        total_weeks,
        year_labels,
        week_column_numbers: week_column_numbers(),
    }
}

/// `ceil(total_weeks / 52)`.
pub fn row_count(total_weeks: u32) -> u32 {
    total_weeks.div_ceil(WEEKS_PER_ROW)
}

pub fn week_column_numbers() -> Vec<u32> {
    (1..=WEEKS_PER_ROW).collect()
}

impl WeekGridResult {
    pub fn birth_year(&self) -> Option<i32> {
        self.year_labels.first().copied()
    }

    pub fn row_count(&self) -> u32 {
        self.year_labels.len() as u32
    }

    /// Number of cells drawn as lived, clamped to `[0, total_weeks]`.
    pub fn lived_cells(&self) -> u32 {
        self.weeks_lived.clamp(0, self.total_weeks as i64) as u32
    }

    pub fn cell_state(&self, index: u32) -> CellState {
        if (index as i64) < self.weeks_lived {
            CellState::Lived
        } else {
            CellState::Unlived
        }
    }

    /// Cells in `row`; the last row may be partial.
    pub fn cells_in_row(&self, row: u32) -> u32 {
        let start = row.saturating_mul(WEEKS_PER_ROW);
        self.total_weeks.saturating_sub(start).min(WEEKS_PER_ROW)
    }
}
