//! Life in Weeks
//!
//! Computes a "memento mori" grid from a birth date and an expected lifespan:
//! one cell per week, 52 cells per row, one row per year.

pub mod calendar;
pub mod config;
pub mod error;
pub mod grid;
pub mod params;
pub mod session;
pub mod store;
pub mod view;

pub use calendar::{Clock, FixedClock, SystemClock};
pub use config::AppConfig;
pub use error::{ConfigError, ParamsError, StoreError, SubmitError};
pub use grid::{compute, CellState, WeekGridResult, WEEKS_PER_ROW};
pub use params::{FormInput, LifeParameters};
pub use session::{Phase, Session};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
pub use view::{render_text, GridView};
