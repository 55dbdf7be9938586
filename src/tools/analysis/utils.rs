use std::path::{
    Path,
    PathBuf,
};

use walkdir::WalkDir;

use crate::core::CloudError;

pub const MARKDOWN_EXTENSION: &str = "md";

/// All `*.md` files under `dir`, recursively, sorted by path. Symlinked directories are not
/// entered, so a link cycle cannot count the same post twice.
pub fn find_markdown_files(dir: &Path) -> Result<Vec<PathBuf>, CloudError> {
    if !dir.is_dir() {
        return Err(CloudError::TargetNotFound(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = entry.map_err(std::io::Error::from)?;
        let path = entry.path();
        if !entry.file_type().is_dir()
            && path.is_file()
            && path.extension().and_then(|e| e.to_str()) == Some(MARKDOWN_EXTENSION)
        {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}
