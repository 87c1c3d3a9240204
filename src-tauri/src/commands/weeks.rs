use tauri::State;

use lifegrid::GridView;

use crate::state::{AppState, FormState};

/// Form values restored at startup (or last submitted).
#[tauri::command]
pub fn get_form(state: State<AppState>) -> Result<FormState, String> {
    let session = state.session.lock().map_err(|e| e.to_string())?;
    Ok(FormState::of(&session))
}

/// Submit the form. An `Err` means no new grid; whatever the window already
/// shows stays as it is.
#[tauri::command]
pub fn generate_weeks(
    state: State<AppState>,
    dob: String,
    life_expectancy: String,
) -> Result<GridView, String> {
    let mut session = state.session.lock().map_err(|e| e.to_string())?;
    session.set_birth_date(dob);
    session.set_life_expectancy(life_expectancy);

    let result = session.submit().map_err(|e| e.to_string())?;
    Ok(GridView::new(result, &state.config.animation))
}

/// The grid from the last successful submit, if any.
#[tauri::command]
pub fn get_grid(state: State<AppState>) -> Result<Option<GridView>, String> {
    let session = state.session.lock().map_err(|e| e.to_string())?;
    Ok(session
        .result()
        .map(|result| GridView::new(result, &state.config.animation)))
}
