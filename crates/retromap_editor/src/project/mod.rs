//! Loading and saving project files

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use retromap_core::{decode, encode, DecodeError, EncodeError, Proj};
use thiserror::Error;
use tracing::{debug, info};

/// Errors from reading or writing a project file
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to read project: {0}")]
    Decode(#[from] DecodeError),
    #[error("failed to write project: {0}")]
    Encode(#[from] EncodeError),
}

/// Read and decode a project file. Any readable format version is accepted.
pub fn load_project(path: &Path) -> Result<Proj, ProjectError> {
    let buf = fs::read(path)?;
    let proj = decode(&buf)?;
    info!(
        "Loaded {} ({} maps, {} tiles)",
        path.display(),
        proj.maps.len(),
        proj.charset.ntiles
    );
    Ok(proj)
}

/// Encode `proj` at the current format version and write it to `path`.
///
/// The data goes to a temp file next to `path` which is then renamed over
/// it, so an existing file is never left half written.
pub fn save_project(proj: &Proj, path: &Path) -> Result<(), ProjectError> {
    let buf = encode(proj)?;
    let tmp = temp_path(path);
    debug!("Writing {} bytes to {}", buf.len(), tmp.display());
    if let Err(e) = fs::write(&tmp, &buf).and_then(|_| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    info!("Saved {}", path.display());
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use retromap_core::{Cell, Ent, TilePoint, Tilemap};
    use tempfile::tempdir;

    fn sample_proj() -> Proj {
        let mut proj = Proj::default_project();
        *proj.maps[0].cell_mut(TilePoint::new(3, 4)) = Cell::new(7, 1, 2);
        proj.maps[0].ents.push(Ent::new().with("kind", "door").with("x", "3"));
        proj.maps.push(Tilemap::new(4, 2));
        proj
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("level.map");
        let proj = sample_proj();

        save_project(&proj, &path).unwrap();
        let loaded = load_project(&path).unwrap();
        assert_eq!(loaded, proj);
    }

    #[test]
    fn test_save_replaces_existing_and_leaves_no_temp() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("level.map");
        fs::write(&path, b"old junk").unwrap();

        save_project(&sample_proj(), &path).unwrap();
        assert_eq!(load_project(&path).unwrap(), sample_proj());

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![OsString::from("level.map")]);
    }

    #[test]
    fn test_save_into_missing_dir_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope").join("level.map");
        let err = save_project(&sample_proj(), &path).unwrap_err();
        assert!(matches!(err, ProjectError::Io(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_project(&dir.path().join("missing.map")).unwrap_err();
        assert!(matches!(err, ProjectError::Io(_)));
    }

    #[test]
    fn test_load_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.map");
        fs::write(&path, b"PNG\x89 not a map").unwrap();
        let err = load_project(&path).unwrap_err();
        assert!(matches!(err, ProjectError::Decode(DecodeError::BadMagic)));
    }

    #[test]
    fn test_load_truncated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("short.map");
        let buf = encode(&sample_proj()).unwrap();
        fs::write(&path, &buf[..buf.len() / 2]).unwrap();
        let err = load_project(&path).unwrap_err();
        assert!(matches!(err, ProjectError::Decode(DecodeError::Truncated(_))));
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let p = Path::new("/some/dir/world.map");
        assert_eq!(temp_path(p), PathBuf::from("/some/dir/.world.map.tmp"));
    }
}
