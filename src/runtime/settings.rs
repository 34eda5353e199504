use crate::config::{self, Settings};

pub fn load_settings() -> Settings {
    let source = config::resolve_config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "environment".to_string());

    match Settings::load() {
        Ok(s) => {
            let (settings, resets) = repair(s);
            for (key, reason) in resets {
                eprintln!("setlist: {source}: {reason}; using the default for {key}");
            }
            settings
        }
        Err(e) => {
            // Config is optional; failures should not prevent the app from starting.
            eprintln!("setlist: failed to load {source}, using defaults: {e}");
            Settings::default()
        }
    }
}

/// Reset each invalid value to its default and keep the rest of the file.
fn repair(mut settings: Settings) -> (Settings, Vec<(&'static str, String)>) {
    let mut resets = Vec::new();
    while let Err(invalid) = settings.validate() {
        resets.push((invalid.key(), invalid.to_string()));
        invalid.reset(&mut settings);
    }
    (settings, resets)
}
