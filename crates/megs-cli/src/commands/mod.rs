pub mod check;
pub mod maneuvers;
pub mod roll;
pub mod tables;

use std::path::Path;

use megs_mechanics::ResolutionTables;

/// Load tables from `path`, or the bundled copy when no path is given.
fn load_tables(path: Option<&Path>) -> Result<ResolutionTables, String> {
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading tables");
            ResolutionTables::from_path(path).map_err(|e| format!("{}: {e}", path.display()))
        }
        None => ResolutionTables::bundled().map_err(|e| e.to_string()),
    }
}
