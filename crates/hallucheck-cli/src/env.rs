//! `.env` loading

use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Load `.env` from the working directory or the nearest parent that has one.
///
/// Variables already set in the process environment keep their values. A
/// missing file is normal; an unreadable one is logged and ignored.
pub fn load_dotenv() -> Option<PathBuf> {
    report(dotenvy::dotenv())
}

/// Load a specific env file with the same rules as [`load_dotenv`].
pub fn load_dotenv_file(path: &Path) -> Option<PathBuf> {
    report(dotenvy::from_path(path).map(|()| path.to_path_buf()))
}

fn report(result: Result<PathBuf, dotenvy::Error>) -> Option<PathBuf> {
    match result {
        Ok(path) => {
            info!(path = %path.display(), "Loaded environment file");
            Some(path)
        }
        Err(e) if e.not_found() => None,
        Err(e) => {
            warn!(error = %e, "Ignoring unreadable environment file");
            None
        }
    }
}
