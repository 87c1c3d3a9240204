use tauri::State;

use lifegrid::AppConfig;

use crate::state::AppState;

#[tauri::command]
pub fn get_config(state: State<AppState>) -> AppConfig {
    state.config.clone()
}
