use serde::Serialize;
use std::sync::Mutex;

use lifegrid::{AppConfig, JsonFileStore, Phase, Session, SystemClock};

pub type AppSession = Session<JsonFileStore, SystemClock>;

/// Global application state managed by Tauri
pub struct AppState {
    pub session: Mutex<AppSession>,
    pub config: AppConfig,
}

// -- Serializable types returned by commands --

#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    pub dob: String,
    pub life_expectancy: String,
    pub phase: Phase,
}

impl FormState {
    pub fn of(session: &AppSession) -> Self {
        let form = session.form();
        FormState {
            dob: form.dob.clone(),
            life_expectancy: form.life_expectancy.clone(),
            phase: session.phase(),
        }
    }
}
