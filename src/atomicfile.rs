//! A simple thing to atomically write to a file.

use tempfile::NamedTempFile;

use std::io::{Error, ErrorKind, Result, Write};
use std::path::{Path, PathBuf};

/// A file that is written next to its destination and only moved into
/// place by [`AtomicFile::commit`].  Dropping it without committing
/// leaves any existing file with the same name untouched.
pub struct AtomicFile {
    path: PathBuf,
    file: NamedTempFile,
}

impl AtomicFile {
    /// Create a file.
    pub fn create<P: AsRef<Path>>(p: P) -> Result<AtomicFile> {
        let path = p.as_ref();
        let dir = match path.parent() {
            None => {
                return Err(Error::new(
                    ErrorKind::Other,
                    format!("Cannot create a file named {:?}", path),
                ));
            }
            Some(d) if d.as_os_str().is_empty() => Path::new("."),
            Some(d) => d,
        };
        Ok(AtomicFile {
            path: PathBuf::from(path),
            file: NamedTempFile::new_in(dir)?,
        })
    }

    /// Flush to disk and move the file into place, replacing whatever
    /// was there.
    pub fn commit(mut self) -> Result<()> {
        self.file.flush()?;
        self.file.as_file().sync_data()?;
        self.file.persist(&self.path)?;
        Ok(())
    }
}

impl Write for AtomicFile {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        self.file.write(buf)
    }
    fn flush(&mut self) -> Result<()> {
        self.file.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn commit_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.yaml");
        fs::write(&path, "old").unwrap();

        let mut f = AtomicFile::create(&path).unwrap();
        f.write_all(b"new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "old");
        f.commit().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn drop_without_commit_keeps_old() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.yaml");
        fs::write(&path, "old").unwrap();
        {
            let mut f = AtomicFile::create(&path).unwrap();
            f.write_all(b"half written").unwrap();
        }
        assert_eq!(fs::read_to_string(&path).unwrap(), "old");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
