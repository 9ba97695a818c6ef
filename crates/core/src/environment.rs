use std::path::Path;

use dotenvy::{dotenv, from_path};

/// Loads environment variables from a `.env` file in `project_path`.
///
/// Falls back to a `.env` in the current working directory (or just the
/// process environment) when the project file is missing or unreadable.
pub fn load_env_from_project_path(project_path: &Path) {
    if from_path(project_path.join(".env")).is_err() {
        dotenv().ok();
    }
}
