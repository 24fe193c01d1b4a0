//! Directory scanner: the immediate entries of one directory.

use crate::{ConvertError, Result};
use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One item of the directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    name: OsString,
    path: PathBuf,
    is_dir: bool,
}

impl FileEntry {
    pub fn new(directory: &Path, name: impl Into<OsString>, is_dir: bool) -> Self {
        let name = name.into();
        let path = directory.join(&name);
        Self { name, path, is_dir }
    }

    pub fn name(&self) -> &OsStr {
        &self.name
    }

    pub fn display_name(&self) -> Cow<'_, str> {
        self.name.to_string_lossy()
    }

    /// `<directory>/<name>`
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Byte offset of the last `.` in the name.
    fn dot_index(&self) -> Option<usize> {
        self.name.as_encoded_bytes().iter().rposition(|&b| b == b'.')
    }

    /// Suffix of the name starting at its last `.`, dot included
    /// (`"photo.tar.jpg"` → `".jpg"`, `".jpg"` → `".jpg"`, `"README"` → `""`).
    /// Works on the raw name, so non-UTF-8 names keep their extension.
    pub fn extension(&self) -> &OsStr {
        match self.dot_index() {
            // SAFETY: the split point sits immediately before an ASCII `.`.
            Some(i) => unsafe {
                OsStr::from_encoded_bytes_unchecked(&self.name.as_encoded_bytes()[i..])
            },
            None => OsStr::new(""),
        }
    }

    /// The name with [`FileEntry::extension`] removed.
    pub fn stem(&self) -> &OsStr {
        match self.dot_index() {
            // SAFETY: the split point sits immediately before an ASCII `.`.
            Some(i) => unsafe {
                OsStr::from_encoded_bytes_unchecked(&self.name.as_encoded_bytes()[..i])
            },
            None => &self.name,
        }
    }
}

/// List the immediate entries of `directory`, sorted by file name.
///
/// Files and subdirectories alike, no recursion. A missing, unreadable or
/// non-directory path is an error for the whole run.
pub fn scan_directory(directory: &Path) -> Result<Vec<FileEntry>> {
    let read_error = |source: io::Error| ConvertError::DirectoryRead {
        path: directory.to_path_buf(),
        source,
    };

    let metadata = std::fs::metadata(directory).map_err(read_error)?;
    if !metadata.is_dir() {
        return Err(read_error(io::Error::new(
            io::ErrorKind::Other,
            "not a directory",
        )));
    }

    let mut entries = Vec::new();
    for entry in WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| read_error(e.into()))?;
        entries.push(FileEntry::new(
            directory,
            entry.file_name(),
            entry.file_type().is_dir(),
        ));
    }

    tracing::debug!(
        directory = %directory.display(),
        entries = entries.len(),
        "Directory scanned"
    );

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn entry(name: &str) -> FileEntry {
        FileEntry::new(Path::new("photos"), name, false)
    }

    #[test]
    fn test_extension_and_stem() {
        let cases = [
            ("photo.jpg", ".jpg", "photo"),
            ("photo.jpeg", ".jpeg", "photo"),
            ("archive.tar.jpg", ".jpg", "archive.tar"),
            ("PHOTO.JPG", ".JPG", "PHOTO"),
            ("README", "", "README"),
            (".jpg", ".jpg", ""),
            ("trailing.", ".", "trailing"),
        ];
        for (name, ext, stem) in cases {
            let e = entry(name);
            assert_eq!(e.extension(), ext, "extension of {}", name);
            assert_eq!(e.stem(), stem, "stem of {}", name);
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_name_keeps_extension_and_stem() {
        use std::os::unix::ffi::OsStrExt;

        let e = FileEntry::new(Path::new("photos"), OsStr::from_bytes(b"caf\xe9.jpg"), false);
        assert_eq!(e.extension(), ".jpg");
        assert_eq!(e.stem().as_bytes(), b"caf\xe9");
    }

    #[test]
    fn test_path_joins_directory_and_name() {
        assert_eq!(entry("a.jpg").path(), Path::new("photos/a.jpg"));
    }

    #[test]
    fn test_scan_lists_files_and_dirs_sorted_without_recursion() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.jpg"), b"x").unwrap();
        fs::write(dir.path().join("a.png"), b"x").unwrap();
        fs::create_dir(dir.path().join("c_sub")).unwrap();
        fs::write(dir.path().join("c_sub").join("nested.jpg"), b"x").unwrap();

        let entries = scan_directory(dir.path()).unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.display_name().into_owned()).collect();

        assert_eq!(names, vec!["a.png", "b.jpg", "c_sub"]);
        assert!(entries[2].is_dir());
        assert!(!entries[1].is_dir());
        assert_eq!(entries[1].path(), dir.path().join("b.jpg"));
    }

    #[test]
    fn test_scan_empty_directory() {
        let dir = TempDir::new().unwrap();
        assert!(scan_directory(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_scan_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        let err = scan_directory(&missing).unwrap_err();
        assert!(matches!(err, ConvertError::DirectoryRead { .. }));
        assert!(!err.is_conversion_failure());
    }

    #[test]
    fn test_scan_regular_file_fails() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("photo.jpg");
        fs::write(&file, b"x").unwrap();

        let err = scan_directory(&file).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }
}
