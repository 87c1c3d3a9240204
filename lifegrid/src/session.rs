//! Session - form state plus the last generated grid

use serde::Serialize;
use tracing::{debug, info};

use crate::calendar::Clock;
use crate::error::SubmitError;
use crate::grid::{compute, WeekGridResult};
use crate::params::{FormInput, DEFAULT_LIFE_EXPECTANCY};
use crate::store::{load_form, save_parameters, KeyValueStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Only the form is shown.
    Input,
    /// The form plus a grid from the last valid submit.
    Result,
}

/// One user session: the form fields, the store they persist to, and the
/// result of the last successful submit.
pub struct Session<S, C> {
    store: S,
    clock: C,
    form: FormInput,
    result: Option<WeekGridResult>,
}

impl<S: KeyValueStore, C: Clock> Session<S, C> {
    /// Start a session, filling the form from `store` when it holds a valid
    /// pair of inputs.
    pub fn restore(store: S, clock: C) -> Self {
        Self::restore_with_default(store, clock, DEFAULT_LIFE_EXPECTANCY)
    }

    /// Like [`Session::restore`], with an explicit initial life expectancy
    /// for when nothing is stored.
    pub fn restore_with_default(store: S, clock: C, default_life_expectancy: u32) -> Self {
        let form = match load_form(&store) {
            Some(form) => {
                info!("Restored birth date {} / {} years", form.dob, form.life_expectancy);
                form
            }
            None => FormInput::new("", default_life_expectancy.to_string()),
        };

        Self {
            store,
            clock,
            form,
            result: None,
        }
    }

    pub fn form(&self) -> &FormInput {
        &self.form
    }

    pub fn result(&self) -> Option<&WeekGridResult> {
        self.result.as_ref()
    }

    pub fn phase(&self) -> Phase {
        if self.result.is_some() {
            Phase::Result
        } else {
            Phase::Input
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn set_birth_date(&mut self, dob: impl Into<String>) {
        self.form.dob = dob.into();
    }

    pub fn set_life_expectancy(&mut self, years: impl Into<String>) {
        self.form.life_expectancy = years.into();
    }

    /// Validate the form, persist it, and replace the displayed grid.
    ///
    /// On any error the previous grid is kept. Invalid input never reaches
    /// the store.
    pub fn submit(&mut self) -> Result<&WeekGridResult, SubmitError> {
        let params = match self.form.validate() {
            Ok(params) => params,
            Err(e) => {
                debug!("Submit ignored: {}", e);
                return Err(e.into());
            }
        };

        let result = compute(&params, self.clock.today());
        save_parameters(&mut self.store, &params)?;

        info!(
            "Generated grid: {} of {} weeks lived, {} rows",
            result.weeks_lived,
            result.total_weeks,
            result.row_count()
        );
        Ok(self.result.insert(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::FixedClock;
    use crate::error::{ParamsError, StoreError};
    use crate::store::{MemoryStore, DOB_KEY, LIFE_EXPECTANCY_KEY};
    use chrono::NaiveDate;

    /// Memory store that accepts `writes_left` writes, then reports a full disk.
    struct FullDiskStore {
        inner: MemoryStore,
        writes_left: usize,
    }

    impl KeyValueStore for FullDiskStore {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn set_all(&mut self, entries: &[(&str, &str)]) -> Result<(), StoreError> {
            if self.writes_left == 0 {
                return Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full").into());
            }
            self.writes_left -= 1;
            self.inner.set_all(entries)
        }
    }

    fn clock() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
    }

    #[test]
    fn test_fresh_session_starts_in_input() {
        let session = Session::restore(MemoryStore::new(), clock());
        assert_eq!(session.phase(), Phase::Input);
        assert_eq!(session.form(), &FormInput::default());
        assert!(session.result().is_none());
    }

    #[test]
    fn test_configured_default_life_expectancy() {
        let session = Session::restore_with_default(MemoryStore::new(), clock(), 72);
        assert_eq!(session.form(), &FormInput::new("", "72"));
    }

    #[test]
    fn test_restore_from_store() {
        let mut store = MemoryStore::new();
        store.set(DOB_KEY, "1990-01-01").unwrap();
        store.set(LIFE_EXPECTANCY_KEY, "85").unwrap();

        let session = Session::restore(store, clock());
        assert_eq!(session.form(), &FormInput::new("1990-01-01", "85"));
        // Restoring fills the form only; the grid waits for a submit.
        assert_eq!(session.phase(), Phase::Input);
    }

    #[test]
    fn test_submit_generates_and_persists() {
        let mut session = Session::restore(MemoryStore::new(), clock());
        session.set_birth_date("1990-01-01");
        session.set_life_expectancy("80");

        let result = session.submit().unwrap();
        assert_eq!(result.total_weeks, 4174);
        assert_eq!(session.phase(), Phase::Result);
        assert_eq!(session.store().get(DOB_KEY).as_deref(), Some("1990-01-01"));
        assert_eq!(session.store().get(LIFE_EXPECTANCY_KEY).as_deref(), Some("80"));
    }

    #[test]
    fn test_empty_date_keeps_previous_grid() {
        let mut session = Session::restore(MemoryStore::new(), clock());
        session.set_birth_date("1990-01-01");
        let before = session.submit().unwrap().clone();

        session.set_birth_date("");
        let err = session.submit().unwrap_err();
        assert!(matches!(err, SubmitError::Params(ParamsError::MissingBirthDate)));
        assert_eq!(session.result(), Some(&before));
        assert_eq!(session.phase(), Phase::Result);
        assert_eq!(session.store().get(DOB_KEY).as_deref(), Some("1990-01-01"));
    }

    #[test]
    fn test_invalid_submit_from_input_stays_in_input() {
        let mut session = Session::restore(MemoryStore::new(), clock());
        session.set_birth_date("1990-01-01");
        session.set_life_expectancy("-1");

        assert!(session.submit().is_err());
        assert_eq!(session.phase(), Phase::Input);
        assert_eq!(session.store().get(DOB_KEY), None);
    }

    #[test]
    fn test_resubmit_replaces_grid() {
        let mut session = Session::restore(MemoryStore::new(), clock());
        session.set_birth_date("1990-01-01");
        session.set_life_expectancy("80");
        session.submit().unwrap();

        session.set_life_expectancy("40");
        let result = session.submit().unwrap();
        assert_eq!(result.year_labels.last(), Some(&2030));
        assert_eq!(session.store().get(LIFE_EXPECTANCY_KEY).as_deref(), Some("40"));
    }

    #[test]
    fn test_failed_write_keeps_stored_pair_and_grid() {
        let store = FullDiskStore {
            inner: MemoryStore::new(),
            writes_left: 1,
        };
        let mut session = Session::restore(store, clock());
        session.set_birth_date("1990-01-01");
        session.set_life_expectancy("80");
        let before = session.submit().unwrap().clone();

        session.set_birth_date("1985-07-04");
        session.set_life_expectancy("95");
        let err = session.submit().unwrap_err();
        assert!(matches!(err, SubmitError::Store(StoreError::Io(_))));

        assert_eq!(session.store().get(DOB_KEY).as_deref(), Some("1990-01-01"));
        assert_eq!(session.store().get(LIFE_EXPECTANCY_KEY).as_deref(), Some("80"));
        assert_eq!(session.result(), Some(&before));
        assert_eq!(session.phase(), Phase::Result);
    }
}
