use std::borrow::Cow;
use std::ffi::OsString;
use std::path::Path;

/// Make a path safe to pass as a positional encoder argument.
///
/// Relative paths beginning with `-` get a `./` prefix; everything else is
/// passed through untouched (bytes preserved, no lossy conversion).
pub fn safe_path_arg(path: &Path) -> Cow<'_, Path> {
    if path.as_os_str().as_encoded_bytes().first() == Some(&b'-') {
        Cow::Owned(Path::new(".").join(path))
    } else {
        Cow::Borrowed(path)
    }
}

/// [`safe_path_arg`] as an owned argument, ready for `Command::args`.
pub fn path_arg(path: &Path) -> OsString {
    safe_path_arg(path).into_owned().into_os_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_path_arg() {
        assert_eq!(safe_path_arg(Path::new("normal.jpg")), Path::new("normal.jpg"));
        assert_eq!(safe_path_arg(Path::new("/abs/path.jpg")), Path::new("/abs/path.jpg"));
        assert_eq!(safe_path_arg(Path::new("-dash.jpg")), Path::new("./-dash.jpg"));
        assert_eq!(
            safe_path_arg(Path::new("-dir/file.jpg")),
            Path::new("./-dir/file.jpg")
        );
    }

    #[test]
    fn test_borrowed_when_unchanged() {
        assert!(matches!(safe_path_arg(Path::new("a/b.jpg")), Cow::Borrowed(_)));
    }

    #[test]
    fn test_path_arg_owned() {
        assert_eq!(path_arg(Path::new("-x.avif")), OsString::from("./-x.avif"));
        assert_eq!(path_arg(Path::new("photos/x.avif")), OsString::from("photos/x.avif"));
    }
}
