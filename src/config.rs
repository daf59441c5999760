use std::{fs, path::Path};
use tilecraft_world::SimSettings;
use tracing::warn;

pub const DEFAULT_SETTINGS_PATH: &str = "config/sim.toml";

/// Load simulation settings from `path`, falling back to defaults on errors.
///
/// Missing sections and fields keep their default values, as do periods,
/// tile size, and tick rate that are not positive.
pub fn load_settings(path: &Path) -> SimSettings {
    let mut settings = read_settings(path);
    let reset = settings.sanitize();
    if !reset.is_empty() {
        warn!(
            "Invalid values in {} ({}). Using defaults for them",
            path.display(),
            reset.join(", ")
        );
    }
    settings
}

fn read_settings(path: &Path) -> SimSettings {
    match fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<SimSettings>(&contents) {
            Ok(settings) => settings,
            Err(err) => {
                warn!("Failed to parse {}: {err}. Using defaults", path.display());
                SimSettings::default()
            }
        },
        Err(err) => {
            if path != Path::new(DEFAULT_SETTINGS_PATH)
                || err.kind() != std::io::ErrorKind::NotFound
            {
                warn!("Failed to read {}: {err}. Using defaults", path.display());
            } else {
                warn!(
                    "Simulation config not found at {}. Using defaults",
                    path.display()
                );
            }
            SimSettings::default()
        }
    }
}
