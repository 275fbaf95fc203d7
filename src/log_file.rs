use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Append-only log file that rolls over to `name.1 .. name.N` once it would
/// grow past `max_bytes`.
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    backups: usize,
    file: File,
    size: u64,
}

impl RotatingFile {
    pub fn open(path: impl Into<PathBuf>, max_bytes: u64, backups: usize) -> Result<Self> {
        let path = path.into();
        let file = open_append(&path).with_context(|| format!("Failed to open log file {:?}", path))?;
        let size = file.metadata().map(|m| m.len()).unwrap_or(0);
        Ok(Self {
            path,
            max_bytes,
            backups,
            file,
            size,
        })
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        if self.backups == 0 {
            self.file = File::create(&self.path)?;
            self.size = 0;
            return Ok(());
        }

        let oldest = self.backup_path(self.backups);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..self.backups).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }
        fs::rename(&self.path, self.backup_path(1))?;
        self.file = open_append(&self.path)?;
        self.size = 0;
        Ok(())
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.size > 0 && self.size + buf.len() as u64 > self.max_bytes {
            self.rotate()?;
        }
        let written = self.file.write(buf)?;
        self.size += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rolls_over_past_limit() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("parser.log");
        let mut log = RotatingFile::open(&path, 10, 2)?;

        log.write_all(b"first-line\n")?;
        log.write_all(b"second-line\n")?;
        log.write_all(b"third-line\n")?;
        log.flush()?;

        assert_eq!(fs::read_to_string(&path)?, "third-line\n");
        assert_eq!(fs::read_to_string(dir.path().join("parser.log.1"))?, "second-line\n");
        assert_eq!(fs::read_to_string(dir.path().join("parser.log.2"))?, "first-line\n");
        Ok(())
    }

    #[test]
    fn drops_backups_beyond_limit() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("parser.log");
        let mut log = RotatingFile::open(&path, 4, 1)?;

        for line in ["aaaa", "bbbb", "cccc"] {
            log.write_all(line.as_bytes())?;
        }
        log.flush()?;

        assert_eq!(fs::read_to_string(&path)?, "cccc");
        assert_eq!(fs::read_to_string(dir.path().join("parser.log.1"))?, "bbbb");
        assert!(!dir.path().join("parser.log.2").exists());
        Ok(())
    }

    #[test]
    fn appends_to_existing_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("parser.log");
        fs::write(&path, "old\n")?;

        let mut log = RotatingFile::open(&path, 1_000, 1)?;
        log.write_all(b"new\n")?;
        log.flush()?;

        assert_eq!(fs::read_to_string(&path)?, "old\nnew\n");
        Ok(())
    }
}
