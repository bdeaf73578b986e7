mod bootstrap;
mod report;

use anyhow::{Context, Result};
use contacta_core::area_labels::AreaLabels;
use contacta_core::settings::Settings;
use contacta_runtime::dashboard::{DashboardSession, SessionConfig};
use contacta_ui::app::{App, Page};

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    let base_dir = bootstrap::ensure_directories()?;
    // The TUI owns the terminal, so its logs go to a file unless told otherwise.
    let default_log = (settings.view != "report").then(|| base_dir.join("logs").join("contacta.log"));
    bootstrap::setup_logging(
        &settings.log_level,
        settings.log_file.as_deref(),
        default_log.as_deref(),
    )?;

    tracing::info!("Contacta v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "View: {}, Theme: {}, Contracts: {}, Interviews: {}",
        settings.view,
        settings.theme,
        settings.contracts.display(),
        settings.interviews.display()
    );

    let labels = match &settings.area_labels {
        Some(path) => AreaLabels::load_from(path)
            .with_context(|| format!("loading area labels from {}", path.display()))?,
        None => AreaLabels::default(),
    };

    let mut session = DashboardSession::new(SessionConfig {
        contracts_path: settings.contracts.clone(),
        interviews_path: settings.interviews.clone(),
        delimiter: settings.delimiter_byte()?,
        labels,
        year: settings.year,
        month: settings.month,
    });

    match settings.view.as_str() {
        "report" => {
            let today = chrono::Local::now().date_naive();
            let text = report::build_report(&mut session, today)?;
            print!("{text}");
        }
        view => {
            let app = App::new(session, &settings.theme, Page::from_view(view));
            app.run()?;
        }
    }

    Ok(())
}
