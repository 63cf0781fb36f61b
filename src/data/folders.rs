use std::ffi::OsString;
use std::io;
use std::path::Path;

/// Names of the direct child directories of `dir`, in enumeration order.
pub fn list_subfolders(dir: &Path) -> io::Result<Vec<OsString>> {
    let mut folders = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        // `Path::is_dir` follows symlinks, so a link to a folder counts.
        if entry.path().is_dir() {
            folders.push(entry.file_name());
        }
    }
    Ok(folders)
}
