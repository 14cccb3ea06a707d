//! Where scene, library and image bytes come from.

use std::{
    collections::HashMap,
    fs::File,
    io::{self, Cursor, Read},
    path::{Path, PathBuf},
};

/// Read-only filesystem used by the loaders.
///
/// The returned reader owns the underlying handle; dropping it releases the
/// handle, so every early return in a parser closes the file.
pub trait SourceFs {
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + '_>>;
}

/// The real filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiskFs;

impl SourceFs for DiskFs {
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(File::open(path)?))
    }
}

/// In-memory files keyed by path, handy for tests and embedded assets.
#[derive(Clone, Debug, Default)]
pub struct MemoryFs {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), contents.into());
    }

    /// Builder form of [`MemoryFs::insert`].
    pub fn with(mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(path, contents);
        self
    }

    pub fn remove(&mut self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.files.remove(path.as_ref())
    }
}

impl SourceFs for MemoryFs {
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + '_>> {
        self.files
            .get(path)
            .map(|bytes| Box::new(Cursor::new(bytes.as_slice())) as Box<dyn Read + '_>)
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no such file: {}", path.display()),
                )
            })
    }
}

/// Resolve `name` against the directory that contains `source`.
pub(crate) fn sibling(source: &Path, name: &str) -> PathBuf {
    match source.parent() {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_fs_reads_back_contents() {
        let fs = MemoryFs::new().with("a/b.txt", "hello");
        let mut s = String::new();
        fs.open(Path::new("a/b.txt"))
            .unwrap()
            .read_to_string(&mut s)
            .unwrap();
        assert_eq!(s, "hello");
    }

    #[test]
    fn memory_fs_remove_forgets_file() {
        let mut fs = MemoryFs::new().with("x", "1");
        assert_eq!(fs.remove("x"), Some(b"1".to_vec()));
        assert!(fs.open(Path::new("x")).is_err());
        assert_eq!(fs.remove("x"), None);
    }

    #[test]
    fn memory_fs_missing_is_not_found() {
        let fs = MemoryFs::new();
        let err = fs.open(Path::new("nope")).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn sibling_uses_parent_directory() {
        assert_eq!(
            sibling(Path::new("models/cube.obj"), "cube.mtl"),
            PathBuf::from("models/cube.mtl")
        );
        assert_eq!(sibling(Path::new("cube.obj"), "cube.mtl"), PathBuf::from("cube.mtl"));
    }
}
