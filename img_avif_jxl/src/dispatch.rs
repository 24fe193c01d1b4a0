//! Extension dispatcher.

use crate::scanner::FileEntry;

/// Extensions routed to the encoders. Matching is exact: `.JPG` is skipped.
pub const JPEG_EXTENSIONS: &[&str] = &[".jpg", ".jpeg"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// AVIF then JXL
    Convert,
    Skip,
}

/// Routing looks at the name only, so a directory called `x.jpg` is routed
/// to the encoders like a file.
pub fn route(entry: &FileEntry) -> Route {
    let extension = entry.extension();
    if JPEG_EXTENSIONS.iter().any(|ext| extension == *ext) {
        Route::Convert
    } else {
        Route::Skip
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn route_name(name: &str) -> Route {
        route(&FileEntry::new(Path::new("d"), name, false))
    }

    #[test]
    fn test_jpeg_extensions_convert() {
        assert_eq!(route_name("photo.jpg"), Route::Convert);
        assert_eq!(route_name("photo.jpeg"), Route::Convert);
        assert_eq!(route_name("holiday.2023.jpg"), Route::Convert);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert_eq!(route_name("photo.JPG"), Route::Skip);
        assert_eq!(route_name("photo.Jpeg"), Route::Skip);
    }

    #[test]
    fn test_other_entries_skip() {
        for name in ["image.png", "notes.txt", "README", "photo.jpg.bak", "photo.avif", "photo.jxl"] {
            assert_eq!(route_name(name), Route::Skip, "{}", name);
        }
    }

    #[test]
    fn test_directory_without_extension_skips() {
        let dir = FileEntry::new(Path::new("d"), "albums", true);
        assert_eq!(route(&dir), Route::Skip);
    }

    #[test]
    fn test_routing_ignores_entry_type() {
        let dir = FileEntry::new(Path::new("d"), "weird.jpg", true);
        assert_eq!(route(&dir), Route::Convert);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_name_routes_on_raw_extension() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let jpeg = OsStr::from_bytes(b"caf\xe9.jpg");
        assert_eq!(route(&FileEntry::new(Path::new("d"), jpeg, false)), Route::Convert);
        let other = OsStr::from_bytes(b"caf\xe9.png");
        assert_eq!(route(&FileEntry::new(Path::new("d"), other, false)), Route::Skip);
    }
}
