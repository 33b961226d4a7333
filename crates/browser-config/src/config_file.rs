use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = ".browser-state.toml";

/// Where a config file is looked for, most specific first
fn candidate_paths() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(CONFIG_FILE_NAME));
    }
    candidates
}

/// Content of `.browser-state.toml` from the working directory or, failing
/// that, the home directory
pub fn load_config_file() -> Option<String> {
    read_first_existing(&candidate_paths())
}

fn read_first_existing(candidates: &[PathBuf]) -> Option<String> {
    let found = candidates.iter().find_map(|path| read(path));
    if found.is_none() {
        log::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
    }
    found
}

fn read(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            log::info!("Using config file {}", path.display());
            Some(content)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            log::warn!("Skipping config file {}: {}", path.display(), e);
            None
        }
    }
}
