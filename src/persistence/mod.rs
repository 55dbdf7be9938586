use std::{
    fs,
    path::PathBuf,
};

const APP_NAME: &str = "mdcloud";

/// Per-user cache root, e.g. `~/.local/share/mdcloud`. Falls back to the working directory
/// when the platform has no data dir.
pub fn get_app_data_dir() -> PathBuf {
    match dirs::data_local_dir() {
        Some(data_dir) => {
            let app_dir = data_dir.join(APP_NAME);
            if let Err(e) = fs::create_dir_all(&app_dir) {
                tracing::warn!("Could not create {}: {}", app_dir.display(), e);
            }
            app_dir
        }
        None => PathBuf::from("."),
    }
}
