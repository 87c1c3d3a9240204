//! Life in Weeks - terminal renderer
//!
//! Prints the week grid for a birth date and life expectancy. Values not
//! given on the command line are restored from the store file.

use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use lifegrid::{render_text, AppConfig, GridView, JsonFileStore, Session, SubmitError, SystemClock};

#[derive(Debug, Parser)]
#[command(name = "lifegrid", about = "Your life in weeks")]
struct Cli {
    /// Birth date, YYYY-MM-DD
    #[arg(long)]
    dob: Option<String>,

    /// Expected lifespan in years
    #[arg(long)]
    years: Option<String>,

    /// Key-value store file holding the last inputs
    #[arg(long, default_value = "life-in-weeks.json")]
    store: PathBuf,

    /// Optional JSON config overrides
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    let store = JsonFileStore::open(&cli.store)?;
    let mut session =
        Session::restore_with_default(store, SystemClock, config.default_life_expectancy);

    if let Some(dob) = cli.dob {
        session.set_birth_date(dob);
    }
    if let Some(years) = cli.years {
        session.set_life_expectancy(years);
    }

    match session.submit() {
        Ok(result) => {
            let view = GridView::new(result, &config.animation);
            print!("{}", render_text(&view));
            info!(
                "{} of {} weeks lived ({} cells shaded)",
                view.weeks_lived, view.total_weeks, view.lived_cells
            );
        }
        Err(SubmitError::Params(e)) => {
            // Same as an ignored submit in the UI: no grid, nothing stored.
            warn!("No grid generated: {}", e);
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
