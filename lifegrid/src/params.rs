//! Life parameters and form validation

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::{add_years, format_date, parse_date};
use crate::error::ParamsError;

/// Initial value of the life expectancy field.
pub const DEFAULT_LIFE_EXPECTANCY: u32 = 80;

/// Validated inputs of the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeParameters {
    pub birth_date: NaiveDate,
    pub life_expectancy_years: u32,
}

impl LifeParameters {
    pub fn new(birth_date: NaiveDate, life_expectancy_years: u32) -> Result<Self, ParamsError> {
        if life_expectancy_years == 0 {
            return Err(ParamsError::NonPositiveLifeExpectancy(0));
        }
        if add_years(birth_date, life_expectancy_years).is_none() {
            return Err(ParamsError::OutOfRange {
                birth_date: format_date(birth_date),
                years: life_expectancy_years,
            });
        }
        Ok(Self {
            birth_date,
            life_expectancy_years,
        })
    }

    pub fn birth_year(&self) -> i32 {
        self.birth_date.year()
    }

    /// Birth date plus the expected lifespan in calendar years.
    pub fn end_of_life(&self) -> NaiveDate {
        // `new` rejects parameters whose end date does not exist.
        add_years(self.birth_date, self.life_expectancy_years).unwrap_or(NaiveDate::MAX)
    }
}

/// Raw text of the two form fields, exactly as typed or as restored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormInput {
    pub dob: String,
    pub life_expectancy: String,
}

impl Default for FormInput {
    fn default() -> Self {
        Self {
            dob: String::new(),
            life_expectancy: DEFAULT_LIFE_EXPECTANCY.to_string(),
        }
    }
}

impl FormInput {
    pub fn new(dob: impl Into<String>, life_expectancy: impl Into<String>) -> Self {
        Self {
            dob: dob.into(),
            life_expectancy: life_expectancy.into(),
        }
    }

    /// Validate both fields. The date is checked first.
    pub fn validate(&self) -> Result<LifeParameters, ParamsError> {
        let dob = self.dob.trim();
        if dob.is_empty() {
            return Err(ParamsError::MissingBirthDate);
        }
        let birth_date =
            parse_date(dob).ok_or_else(|| ParamsError::InvalidBirthDate(dob.to_string()))?;

        let years_text = self.life_expectancy.trim();
        if years_text.is_empty() {
            return Err(ParamsError::MissingLifeExpectancy);
        }
        let years: i64 = years_text
            .parse()
            .map_err(|_| ParamsError::InvalidLifeExpectancy(years_text.to_string()))?;
        if years <= 0 {
            return Err(ParamsError::NonPositiveLifeExpectancy(years));
        }
        let years = u32::try_from(years).map_err(|_| ParamsError::OutOfRange {
            birth_date: dob.to_string(),
            years: u32::MAX,
        })?;

        LifeParameters::new(birth_date, years)
    }
}

impl From<LifeParameters> for FormInput {
    fn from(params: LifeParameters) -> Self {
        Self {
            dob: format_date(params.birth_date),
            life_expectancy: params.life_expectancy_years.to_string(),
        }
    }
}
