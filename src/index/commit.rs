//! Persisting and locating commits.
//!
//! A commit is a `snapshot_<generation>.idx` file plus `index.gen`, a tiny
//! pointer file naming the current generation. Both are written under a
//! temporary name and renamed into place, so a crash leaves either the old
//! or the new commit visible, never a partial one.

use log::{debug, warn};

use crate::error::{LucernaError, Result};
use crate::index::snapshot::Snapshot;
use crate::storage::{Storage, StructReader, StructWriter};

/// Name of the pointer file holding the current generation.
pub const GENERATION_FILE: &str = "index.gen";

const GENERATION_MAGIC: u32 = u32::from_le_bytes(*b"LUCG");
const GENERATION_VERSION: u32 = 1;

const SNAPSHOT_PREFIX: &str = "snapshot_";
const SNAPSHOT_SUFFIX: &str = ".idx";

/// File name of the snapshot for `generation`.
pub fn snapshot_file_name(generation: u64) -> String {
    format!("{SNAPSHOT_PREFIX}{generation:010}{SNAPSHOT_SUFFIX}")
}

fn parse_snapshot_file_name(name: &str) -> Option<u64> {
    name.strip_prefix(SNAPSHOT_PREFIX)?
        .strip_suffix(SNAPSHOT_SUFFIX)?
        .parse()
        .ok()
}

/// Write `snapshot` as the new current commit.
///
/// Older snapshot files are removed once the pointer is in place; failing
/// to remove one is logged, not returned.
pub fn write_commit(storage: &dyn Storage, snapshot: &Snapshot, sync: bool) -> Result<()> {
    let generation = snapshot.generation();
    let snapshot_name = snapshot_file_name(generation);

    let (temp_name, output) = storage.create_temp_output("snapshot")?;
    snapshot.encode(StructWriter::new(output))?;
    storage.rename_file(&temp_name, &snapshot_name)?;

    let (temp_name, output) = storage.create_temp_output("generation")?;
    let mut writer = StructWriter::new(output);
    writer.write_u32(GENERATION_MAGIC)?;
    writer.write_u32(GENERATION_VERSION)?;
    writer.write_u64(generation)?;
    writer.close()?;
    storage.rename_file(&temp_name, GENERATION_FILE)?;

    if sync {
        storage.sync()?;
    }
    debug!("wrote commit generation {generation} ({snapshot_name})");

    for name in storage.list_files()? {
        let stale = parse_snapshot_file_name(&name).is_some_and(|g| g != generation);
        if stale {
            if let Err(e) = storage.delete_file(&name) {
                warn!("failed to delete old snapshot {name}: {e}");
            }
        }
    }
    Ok(())
}

/// The generation named by `index.gen`, or `None` for a storage that holds
/// no commit.
pub fn read_generation(storage: &dyn Storage) -> Result<Option<u64>> {
    if !storage.file_exists(GENERATION_FILE) {
        return Ok(None);
    }

    let mut reader = StructReader::new(storage.open_input(GENERATION_FILE)?)?;
    let magic = reader.read_u32()?;
    if magic != GENERATION_MAGIC {
        return Err(LucernaError::storage(format!(
            "Invalid generation file magic: {magic:#010x}"
        )));
    }
    let version = reader.read_u32()?;
    if version != GENERATION_VERSION {
        return Err(LucernaError::storage(format!(
            "Unsupported generation file version: {version}"
        )));
    }
    let generation = reader.read_u64()?;
    reader.verify_checksum()?;
    Ok(Some(generation))
}

/// Load the current commit, or `None` if the storage holds no index.
pub fn read_latest(storage: &dyn Storage) -> Result<Option<Snapshot>> {
    let Some(generation) = read_generation(storage)? else {
        return Ok(None);
    };

    let name = snapshot_file_name(generation);
    let input = storage.open_input(&name)?;
    let snapshot = Snapshot::decode(StructReader::new(input)?)?;
    if snapshot.generation() != generation {
        return Err(LucernaError::storage(format!(
            "{name} holds generation {}, expected {generation}",
            snapshot.generation()
        )));
    }

    debug!(
        "loaded commit generation {generation}: {} docs, {} slots",
        snapshot.num_docs(),
        snapshot.max_doc()
    );
    Ok(Some(snapshot))
}

/// Remove every commit and leftover temporary file.
pub fn clear(storage: &dyn Storage) -> Result<()> {
    for name in storage.list_files()? {
        let ours = name == GENERATION_FILE
            || parse_snapshot_file_name(&name).is_some()
            || name.ends_with(".tmp");
        if ours {
            storage.delete_file(&name)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn snapshot(generation: u64) -> Snapshot {
        Snapshot {
            generation,
            ..Snapshot::empty()
        }
    }

    #[test]
    fn test_file_names() {
        assert_eq!(snapshot_file_name(7), "snapshot_0000000007.idx");
        assert_eq!(parse_snapshot_file_name("snapshot_0000000007.idx"), Some(7));
        assert_eq!(parse_snapshot_file_name("snapshot_x.idx"), None);
        assert_eq!(parse_snapshot_file_name("index.gen"), None);
    }

    #[test]
    fn test_no_commit() {
        let storage = MemoryStorage::new_default();
        assert_eq!(read_generation(&storage).unwrap(), None);
        assert!(read_latest(&storage).unwrap().is_none());
    }

    #[test]
    fn test_commit_replaces_previous_generation() {
        let storage = MemoryStorage::new_default();
        write_commit(&storage, &snapshot(0), false).unwrap();
        write_commit(&storage, &snapshot(1), true).unwrap();

        assert_eq!(read_generation(&storage).unwrap(), Some(1));
        assert_eq!(read_latest(&storage).unwrap().unwrap().generation(), 1);
        assert_eq!(
            storage.list_files().unwrap(),
            vec!["index.gen", "snapshot_0000000001.idx"]
        );
    }

    #[test]
    fn test_corrupt_pointer_is_an_error() {
        let storage = MemoryStorage::new_default();
        write_commit(&storage, &snapshot(2), false).unwrap();

        let mut raw = storage.get_raw(GENERATION_FILE).unwrap();
        raw[9] ^= 0xff;
        storage.put_raw(GENERATION_FILE, raw);

        assert!(matches!(read_latest(&storage), Err(LucernaError::Storage(_))));
    }

    #[test]
    fn test_missing_snapshot_file_is_an_error() {
        let storage = MemoryStorage::new_default();
        write_commit(&storage, &snapshot(4), false).unwrap();
        storage.delete_file(&snapshot_file_name(4)).unwrap();

        assert!(read_latest(&storage).is_err());
    }

    #[test]
    fn test_clear() {
        let storage = MemoryStorage::new_default();
        write_commit(&storage, &snapshot(0), false).unwrap();
        storage.put_raw("notes.txt", b"keep".to_vec());

        clear(&storage).unwrap();
        assert_eq!(storage.list_files().unwrap(), vec!["notes.txt"]);
    }
}
