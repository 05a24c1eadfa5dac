//! Shared folder listing

use crate::DocumentError;
use datascout_domain::DocumentHandle;
use std::fs;
use std::path::Path;

/// List regular files in `location` whose extension is one of `extensions`
/// (case-insensitive), sorted by file name
pub(crate) fn list_with_extensions(
    location: &Path,
    extensions: &[&str],
) -> Result<Vec<DocumentHandle>, DocumentError> {
    let unavailable = |source| DocumentError::SourceUnavailable {
        path: location.to_path_buf(),
        source,
    };

    let mut handles = Vec::new();
    for entry in fs::read_dir(location).map_err(unavailable)? {
        let path = entry.map_err(unavailable)?.path();
        if !path.is_file() {
            continue;
        }

        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| extensions.iter().any(|want| ext.eq_ignore_ascii_case(want)))
            .unwrap_or(false);

        if matches {
            handles.push(DocumentHandle::from_path(path));
        }
    }

    handles.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(handles)
}
