//! Capability-based filesystem helpers for catalog artefacts.
#![forbid(unsafe_code)]

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

/// Open a file for reading with ambient authority.
///
/// # Errors
/// Propagates the I/O error raised by `cap-std`.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Create every missing directory above `path`.
///
/// # Errors
/// Propagates the I/O error raised while opening the anchor directory or
/// creating the missing ones.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() || parent == Utf8Path::new("/") {
        return Ok(());
    }
    let (base, relative) = split_anchor(parent);
    if relative.as_str().is_empty() {
        return Ok(());
    }
    fs_utf8::Dir::open_ambient_dir(base, ambient_authority())?.create_dir_all(relative)
}

/// Report whether `path` names an existing regular file.
///
/// A missing file or parent directory reports `false` rather than an error.
///
/// # Errors
/// Propagates I/O errors other than `NotFound`.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_str().is_empty() => dir,
        _ => Utf8Path::new("."),
    };
    let Some(name) = path.file_name() else {
        return Ok(false);
    };
    let dir = match fs_utf8::Dir::open_ambient_dir(parent, ambient_authority()) {
        Ok(dir) => dir,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(err) => return Err(err),
    };
    match dir.metadata(name) {
        Ok(meta) => Ok(meta.is_file()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

/// Split a directory into the ambient root it hangs from and the relative
/// remainder cap-std can create beneath that root.
fn split_anchor(dir: &Utf8Path) -> (Utf8PathBuf, Utf8PathBuf) {
    let mut components = dir.components();
    match components.next() {
        Some(first @ (camino::Utf8Component::Prefix(_) | camino::Utf8Component::RootDir)) => {
            let mut base = Utf8PathBuf::from(first.as_str());
            if matches!(first, camino::Utf8Component::Prefix(_))
                && let Some(root @ camino::Utf8Component::RootDir) = components.clone().next()
            {
                base.push(root.as_str());
                components.next();
            }
            (base, components.as_path().to_path_buf())
        }
        _ => (Utf8PathBuf::from("."), dir.to_path_buf()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    fn utf8_dir(temp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8 temp dir")
    }

    #[rstest]
    #[case("/var/lib/catalog", "/", "var/lib/catalog")]
    #[case("artefacts/nested", ".", "artefacts/nested")]
    fn splits_absolute_and_relative_dirs(
        #[case] dir: &str,
        #[case] base: &str,
        #[case] relative: &str,
    ) {
        let (split_base, split_relative) = split_anchor(Utf8Path::new(dir));
        assert_eq!(split_base, Utf8PathBuf::from(base));
        assert_eq!(split_relative, Utf8PathBuf::from(relative));
    }

    #[rstest]
    fn creates_missing_parents() {
        let temp = TempDir::new().expect("tempdir");
        let target = utf8_dir(&temp).join("a/b/catalog.db");
        ensure_parent_dir(&target).expect("create parents");
        assert!(target.parent().is_some_and(Utf8Path::is_dir));
    }

    #[rstest]
    fn reports_missing_files() {
        let temp = TempDir::new().expect("tempdir");
        let root = utf8_dir(&temp);
        assert!(!file_is_file(&root.join("absent.db")).expect("inspect file"));
        assert!(!file_is_file(&root.join("missing/absent.db")).expect("inspect file"));
        std::fs::write(root.join("present.db"), b"").expect("write file");
        assert!(file_is_file(&root.join("present.db")).expect("inspect file"));
    }
}
