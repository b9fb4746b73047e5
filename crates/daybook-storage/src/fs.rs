use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

fn parent_dir_or_dot(path: &Path) -> &Path {
    // `Path::parent` returns `Some("")` for bare relative file names like `store.json`.
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

/// Atomically replace `dest` with `bytes`.
///
/// Missing parent directories are created, the bytes go to a temp file in the
/// destination directory, are flushed and synced, and the temp file is then renamed
/// over `dest`. A failure at any step leaves the previous file contents in place.
pub fn atomic_write_bytes(dest: impl AsRef<Path>, bytes: &[u8]) -> io::Result<()> {
    let dest = dest.as_ref();
    let dir = parent_dir_or_dot(dest);
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.as_file_mut().write_all(bytes)?;
    tmp.as_file_mut().flush()?;
    tmp.as_file().sync_all()?;

    match tmp.persist(dest) {
        Ok(_) => {}
        Err(err) if err.error.kind() == io::ErrorKind::AlreadyExists => {
            // Filesystems where rename refuses to clobber.
            let _ = fs::remove_file(dest);
            err.file.persist(dest).map_err(|e| e.error)?;
        }
        Err(err) => return Err(err.error),
    }

    // Directory sync is best-effort; the file is already in place.
    let _ = File::open(dir).and_then(|d| d.sync_all());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_parent_directories_and_replaces_contents() {
        let tmp = tempfile::tempdir().expect("temp dir");
        let dest = tmp.path().join("nested").join("store.json");

        atomic_write_bytes(&dest, b"{}").expect("first write");
        assert_eq!(fs::read(&dest).expect("read"), b"{}");

        atomic_write_bytes(&dest, b"{\"a\":\"1\"}").expect("second write");
        assert_eq!(fs::read(&dest).expect("read"), b"{\"a\":\"1\"}");

        let leftovers: Vec<_> = fs::read_dir(dest.parent().expect("parent"))
            .expect("read dir")
            .collect();
        assert_eq!(leftovers.len(), 1, "temp files should not be left behind");
    }
}
