use std::io::{BufRead, Write};

use vs_folder::actions::exec::CommandLauncher;
use vs_folder::launcher::FolderExtension;
use vs_folder::logging;
use vs_folder::settings::{Settings, SettingsStore};

const SETTINGS_ENV: &str = "VS_FOLDER_SETTINGS";

fn main() -> anyhow::Result<()> {
    let settings_path = std::env::var(SETTINGS_ENV).unwrap_or_else(|_| "settings.json".into());
    let (settings, created) = match Settings::load_or_create(&settings_path) {
        Ok(s) => (s, None),
        Err(e) => (Settings::load(&settings_path)?, Some(e)),
    };
    logging::init(settings.debug_logging);
    if let Some(e) = created {
        tracing::warn!(settings = %settings_path, error = %e, "could not write default settings");
    }
    tracing::info!(settings = %settings_path, editor = %settings.editor, "starting");

    let mut extension = FolderExtension::new(
        SettingsStore::new(&settings),
        CommandLauncher::new(settings.editor.clone()),
    );

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let reply = extension.handle_line(&line)?;
        writeln!(stdout, "{reply}")?;
        stdout.flush()?;
    }
    tracing::info!("host closed input; exiting");
    Ok(())
}
