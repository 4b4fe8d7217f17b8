//! Blob sources: a serialized-object container or a directory of raw dumps.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use memchr::memmem;
use tracing::{debug, info};

use crate::blob::BlobReader;
use crate::blob::layout::{WORD, header};
use crate::error::Result;
use crate::level::is_level_name;

use super::{MAX_NAME_LEN, MIN_NAME_LEN, peek_name};

/// Upper bound on the size of one level object inside a container
pub const MAX_BLOB_SIZE: usize = 0x4000;

const LEVEL_MARKER: &[u8] = b"Level ";

/// Where level blobs come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlobSource {
    /// One container file holding many serialized objects
    Container(PathBuf),
    /// A directory with one raw object dump per file
    Directory(PathBuf),
}

impl BlobSource {
    /// Pick the source kind from what the path points at
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if path.is_dir() {
            Self::Directory(path.to_path_buf())
        } else {
            Self::Container(path.to_path_buf())
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Container(p) | Self::Directory(p) => p,
        }
    }

    /// Read every candidate blob
    pub fn load(&self) -> Result<Vec<Vec<u8>>> {
        match self {
            Self::Container(path) => {
                let data = fs::read(path)?;
                let blobs: Vec<Vec<u8>> =
                    scan_container(&data).into_iter().map(<[u8]>::to_vec).collect();
                info!(
                    "Found {} level blob(s) in {} ({} bytes)",
                    blobs.len(),
                    path.display(),
                    data.len()
                );
                Ok(blobs)
            }
            Self::Directory(path) => read_blob_dir(path),
        }
    }
}

/// Split a container into level blobs.
///
/// Each blob starts `0x1C` bytes before a length-prefixed level name and
/// ends at the next blob start or after [`MAX_BLOB_SIZE`] bytes.
pub fn scan_container(data: &[u8]) -> Vec<&[u8]> {
    let starts: Vec<usize> = blob_starts(data).into_iter().collect();

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let next = starts.get(i + 1).copied().unwrap_or(data.len());
            let end = next.min(start + MAX_BLOB_SIZE).min(data.len());
            &data[start..end]
        })
        .collect()
}

fn blob_starts(data: &[u8]) -> BTreeSet<usize> {
    let reader = BlobReader::new(data);
    let first_name = header::NAME + WORD;

    memmem::find_iter(data, LEVEL_MARKER)
        .filter_map(|marker| {
            // The marker can sit anywhere inside the name
            let lowest = marker.saturating_sub(MAX_NAME_LEN as usize).max(first_name);
            (lowest..=marker).find(|&name_start| {
                let length = reader.read_i32(name_start - WORD);
                if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&length) {
                    return false;
                }
                let end = name_start + length as usize;
                end > marker
                    && data
                        .get(name_start..end)
                        .and_then(|b| std::str::from_utf8(b).ok())
                        .is_some_and(is_level_name)
            })
        })
        .map(|name_start| name_start - WORD - header::NAME)
        .collect()
}

/// Read every regular file of a directory as one blob, in file name order.
///
/// Files without a plausible name field are skipped.
pub fn read_blob_dir<P: AsRef<Path>>(dir: P) -> Result<Vec<Vec<u8>>> {
    let dir = dir.as_ref();
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file())
        .collect();
    paths.sort();

    let mut blobs = Vec::with_capacity(paths.len());
    for path in paths {
        let data = fs::read(&path)?;
        if peek_name(&data).is_none() {
            debug!("Skipping {}: no name field", path.display());
            continue;
        }
        blobs.push(data);
    }

    info!("Read {} blob(s) from {}", blobs.len(), dir.display());
    Ok(blobs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::parse_levels;
    use crate::blob::mock::MockBlobBuilder;

    fn junk(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 7 % 251) as u8).collect()
    }

    #[test]
    fn test_scan_container_splits_at_next_start() {
        let first = MockBlobBuilder::new("Level 1", 5, 6).guid("guid-1").build();
        let second = MockBlobBuilder::new("Derin Level 2", 4, 4).guid("guid-2").build();

        let mut container = junk(0x40);
        container.extend_from_slice(&first);
        container.extend_from_slice(&second);

        let blobs = scan_container(&container);
        assert_eq!(blobs.len(), 2);
        assert_eq!(blobs[0].len(), first.len());
        assert_eq!(blobs[0], first.as_slice());
        assert_eq!(blobs[1], second.as_slice());

        let levels = parse_levels(blobs);
        assert_eq!(levels.len(), 2);
        assert_eq!(levels[1].name, "Derin Level 2");
        assert_eq!(levels[1].width(), 4);
    }

    #[test]
    fn test_scan_container_caps_blob_size() {
        let mut container = MockBlobBuilder::new("Level 5", 5, 6).build();
        container.extend(std::iter::repeat_n(0u8, 0x5000));

        let blobs = scan_container(&container);
        assert_eq!(blobs.len(), 1);
        assert_eq!(blobs[0].len(), MAX_BLOB_SIZE);
    }

    #[test]
    fn test_scan_container_ignores_unprefixed_marker() {
        let mut container = junk(0x80);
        container.extend_from_slice(b"xxxxLevel 3 without a length");
        assert!(scan_container(&container).is_empty());
    }

    #[test]
    fn test_read_blob_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.bin"), MockBlobBuilder::new("Level 2", 5, 6).build()).unwrap();
        fs::write(dir.path().join("a.bin"), MockBlobBuilder::new("Level 1", 5, 6).build()).unwrap();
        fs::write(dir.path().join("junk.bin"), [1u8, 2, 3]).unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let blobs = read_blob_dir(dir.path()).unwrap();
        assert_eq!(blobs.len(), 2);
        assert_eq!(peek_name(&blobs[0]).as_deref(), Some("Level 1"));

        let source = BlobSource::from_path(dir.path());
        assert!(matches!(source, BlobSource::Directory(_)));
        assert_eq!(source.load().unwrap().len(), 2);
    }

    #[test]
    fn test_container_source_missing_file() {
        let source = BlobSource::Container(PathBuf::from("/nonexistent/level.assets"));
        let err = source.load().unwrap_err();
        assert!(err.is_not_found());
    }
}
