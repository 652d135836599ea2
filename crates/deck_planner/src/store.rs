//! 前回の入力値の保存
//!
//! The solver never touches this module. The CLI reads the last-used inputs
//! before solving and writes them back afterwards through an [`InputStore`]
//! it owns.

use crate::error::{PlannerError, Result};
use deck_layout::{
    LayoutInput, RawInput,
    constants::{
        FIELD_BOARD_WIDTH, FIELD_EDGE_JOINTS, FIELD_INSTALL_WIDTH, FIELD_JOINT_WIDTH,
        FIELD_MIN_BOARD_WIDTH,
    },
};
use log::warn;
use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

const STORE_FILE_NAME: &str = "last_input.json";

/// String key-value store for remembered form values.
///
/// `set` only stages a value; `save` persists everything staged so far.
pub trait InputStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn save(&mut self) -> Result<()>;
}

#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
    saves: usize,
}

#[cfg(test)]
impl InputStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }

    fn save(&mut self) -> Result<()> {
        self.saves += 1;
        Ok(())
    }
}

/// Flat JSON object persisted at `<dir>/last_input.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens the store. A missing file gives an empty store, and so does a
    /// corrupt one (with a warning), since the values are only a convenience.
    pub fn open(dir: &Path) -> Self {
        let path = dir.join(STORE_FILE_NAME);
        let values = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!("Ignoring unreadable input store {}: {e}", path.display());
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!("Failed to read input store {}: {e}", path.display());
                BTreeMap::new()
            }
        };
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InputStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }

    fn save(&mut self) -> Result<()> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            std::fs::create_dir_all(dir).map_err(|e| PlannerError::CreateDir {
                path: dir.to_path_buf(),
                source: e,
            })?;
        }

        let file = File::create(&self.path).map_err(|e| PlannerError::CreateFile {
            path: self.path.clone(),
            source: e,
        })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.values)?;
        writer.flush().map_err(|e| PlannerError::WriteFile {
            path: self.path.clone(),
            source: e,
        })
    }
}

/// Reads whatever fields were remembered; absent ones stay `None`.
///
/// Values that no longer parse (hand-edited file) are dropped with a warning
/// so that the next source in line fills them.
pub fn load_last_input(store: &dyn InputStore) -> RawInput {
    RawInput {
        install_width: remembered_number(store, FIELD_INSTALL_WIDTH),
        board_width: remembered_number(store, FIELD_BOARD_WIDTH),
        joint_width: remembered_number(store, FIELD_JOINT_WIDTH),
        min_board_width: remembered_number(store, FIELD_MIN_BOARD_WIDTH),
        edge_joints: store
            .get(FIELD_EDGE_JOINTS)
            .and_then(|v| v.trim().parse::<bool>().ok()),
    }
}

fn remembered_number(store: &dyn InputStore, key: &str) -> Option<String> {
    let value = store.get(key)?;
    match value.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => Some(value),
        _ => {
            warn!("Ignoring remembered {key}: {value:?} is not a number");
            None
        }
    }
}

/// Stages every field, then persists them in a single write.
pub fn save_last_input(store: &mut dyn InputStore, input: &LayoutInput) -> Result<()> {
    let raw = input.to_raw();
    let fields = [
        (FIELD_INSTALL_WIDTH, raw.install_width),
        (FIELD_BOARD_WIDTH, raw.board_width),
        (FIELD_JOINT_WIDTH, raw.joint_width),
        (FIELD_MIN_BOARD_WIDTH, raw.min_board_width),
    ];
    for (key, value) in fields {
        if let Some(value) = value {
            store.set(key, value);
        }
    }
    store.set(FIELD_EDGE_JOINTS, input.edge_joints().to_string());
    store.save()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::default();
        let input = LayoutInput::new(2400.0, 105.0, 3.5, 60.0, false).unwrap();
        save_last_input(&mut store, &input).unwrap();

        let raw = load_last_input(&store);
        assert_eq!(raw.install_width.as_deref(), Some("2400"));
        assert_eq!(raw.joint_width.as_deref(), Some("3.5"));
        assert_eq!(raw.edge_joints, Some(false));
        assert_eq!(raw.parse().unwrap(), input);
    }

    #[test]
    fn test_empty_store_loads_nothing() {
        let store = MemoryStore::default();
        assert_eq!(load_last_input(&store), RawInput::default());
    }

    #[test]
    fn test_invalid_bool_is_ignored() {
        let mut store = MemoryStore::default();
        store.set(FIELD_EDGE_JOINTS, "maybe".to_string());
        assert_eq!(load_last_input(&store).edge_joints, None);
    }

    #[test]
    fn test_json_store_persists_across_opens() {
        let temp_dir = TempDir::new().unwrap();
        let state_dir = temp_dir.path().join("state");
        let input = LayoutInput::new(3640.0, 120.0, 5.0, 70.0, true).unwrap();

        {
            let mut store = JsonFileStore::open(&state_dir);
            save_last_input(&mut store, &input).unwrap();
            assert!(store.path().exists());
        }

        let reopened = JsonFileStore::open(&state_dir);
        assert_eq!(load_last_input(&reopened).parse().unwrap(), input);
    }

    #[test]
    fn test_json_store_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::open(temp_dir.path());
        assert_eq!(store.get(FIELD_INSTALL_WIDTH), None);
    }

    #[test]
    fn test_json_store_corrupt_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(STORE_FILE_NAME), "{not json").unwrap();

        let mut store = JsonFileStore::open(temp_dir.path());
        assert_eq!(store.get(FIELD_INSTALL_WIDTH), None);

        // 書き込みで壊れたファイルを置き換える
        store.set(FIELD_INSTALL_WIDTH, "1000".to_string());
        store.save().unwrap();
        let reopened = JsonFileStore::open(temp_dir.path());
        assert_eq!(reopened.get(FIELD_INSTALL_WIDTH).as_deref(), Some("1000"));
    }

    #[test]
    fn test_json_file_content() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::open(temp_dir.path());
        store.set(FIELD_BOARD_WIDTH, "150".to_string());
        store.save().unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        let parsed: BTreeMap<String, String> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.get("board_width").map(String::as_str), Some("150"));
    }

    #[test]
    fn test_save_writes_once() {
        let mut store = MemoryStore::default();
        save_last_input(&mut store, &LayoutInput::default()).unwrap();
        assert_eq!(store.saves, 1);
        assert_eq!(store.get(FIELD_EDGE_JOINTS).as_deref(), Some("true"));
    }

    #[test]
    fn test_set_without_save_does_not_touch_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::open(temp_dir.path());
        store.set(FIELD_INSTALL_WIDTH, "1200".to_string());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_unparsable_remembered_numbers_are_dropped() {
        let mut store = MemoryStore::default();
        store.set(FIELD_INSTALL_WIDTH, "abc".to_string());
        store.set(FIELD_BOARD_WIDTH, "NaN".to_string());
        store.set(FIELD_JOINT_WIDTH, " 5 ".to_string());

        let raw = load_last_input(&store);
        assert_eq!(raw.install_width, None);
        assert_eq!(raw.board_width, None);
        assert_eq!(raw.joint_width.as_deref(), Some(" 5 "));

        // 壊れた値は初期値で補われる
        let input = raw
            .merge_defaults(LayoutInput::default().to_raw())
            .parse()
            .unwrap();
        assert_eq!(input.install_width(), 3000.0);
        assert_eq!(input.board_width(), 150.0);
    }
}
