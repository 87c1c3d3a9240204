// Prevents additional console window on Windows in release
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod commands;
mod state;

use state::AppState;
use std::sync::Mutex;
use tauri::Manager;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use lifegrid::{AppConfig, JsonFileStore, Session, SystemClock};

fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    tauri::Builder::default()
        .setup(|app| {
            let data_dir = app.path().app_data_dir()?;
            let config = AppConfig::load(&data_dir.join("config.json"))?;
            let store = JsonFileStore::open(data_dir.join(&config.store_file))?;
            info!("Using store {}", store.path().display());

            let session = Session::restore_with_default(
                store,
                SystemClock,
                config.default_life_expectancy,
            );
            app.manage(AppState {
                session: Mutex::new(session),
                config,
            });
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Config
            commands::config::get_config,
            // Weeks
            commands::weeks::get_form,
            commands::weeks::generate_weeks,
            commands::weeks::get_grid,
        ])
        .run(tauri::generate_context!())?;

    Ok(())
}
