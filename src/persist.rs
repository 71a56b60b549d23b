// SPDX: CC0-1.0

//! The single flat settings record carried across sessions.

use crate::{
    sample::{FunctionKind, ShapeParams},
    Interval, Number,
};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{
    cell::{Cell, RefCell},
    env, fs, io,
    path::{Path, PathBuf},
};

const SETTINGS_DIR: &str = env!("CARGO_PKG_NAME");
const SETTINGS_FILE: &str = "settings.json";

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PersistedConfig {
    #[serde(rename = "type")]
    pub kind: FunctionKind,
    pub parameters: ShapeParams,
    pub xmin: Number,
    pub xmax: Number,
    pub ymin: Number,
    pub ymax: Number,
}

impl PersistedConfig {
    pub fn new(kind: FunctionKind, parameters: ShapeParams, x: Interval, y: Interval) -> Self {
        Self {
            kind,
            parameters,
            xmin: x.min,
            xmax: x.max,
            ymin: y.min,
            ymax: y.max,
        }
    }

    pub const fn x(&self) -> Interval {
        Interval::new(self.xmin, self.xmax)
    }

    pub const fn y(&self) -> Interval {
        Interval::new(self.ymin, self.ymax)
    }
}

/// Where the last configuration lives between sessions.
pub trait ConfigStore {
    /// The saved record, or `None` if there is none or it cannot be used.
    fn load(&self) -> Option<PersistedConfig>;

    /// Replace the saved record.
    fn save(&self, config: &PersistedConfig) -> anyhow::Result<()>;
}

impl<T: ConfigStore + ?Sized> ConfigStore for Box<T> {
    fn load(&self) -> Option<PersistedConfig> {
        (**self).load()
    }

    fn save(&self, config: &PersistedConfig) -> anyhow::Result<()> {
        (**self).save(config)
    }
}

/// Pretty-printed JSON file, overwritten wholesale on every save.
#[derive(Clone, Debug)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `$XDG_CONFIG_HOME/<crate>/settings.json`, else under `$HOME/.config`,
    /// else the working directory.
    pub fn default_path() -> PathBuf {
        let config_home = env::var_os("XDG_CONFIG_HOME")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .or_else(|| {
                env::var_os("HOME")
                    .filter(|dir| !dir.is_empty())
                    .map(|home| PathBuf::from(home).join(".config"))
            });
        match config_home {
            Some(dir) => dir.join(SETTINGS_DIR).join(SETTINGS_FILE),
            None => PathBuf::from(SETTINGS_FILE),
        }
    }
}

impl ConfigStore for JsonStore {
    fn load(&self) -> Option<PersistedConfig> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("no settings at {}", self.path.display());
                return None;
            }
            Err(err) => {
                log::warn!("failed to read settings {}: {err}", self.path.display());
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(config) => Some(config),
            Err(err) => {
                log::warn!("ignoring malformed settings {}: {err}", self.path.display());
                None
            }
        }
    }

    fn save(&self, config: &PersistedConfig) -> anyhow::Result<()> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).context("failed to create settings directory")?;
        }
        let text = serde_json::to_string_pretty(config).context("failed to encode settings")?;
        fs::write(&self.path, text)
            .with_context(|| format!("failed to write settings to {}", self.path.display()))?;
        Ok(())
    }
}

/// Keeps the record in memory only; used when persistence is turned off.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: RefCell<Option<PersistedConfig>>,
    saves: Cell<usize>,
}

impl MemoryStore {
    pub fn with(config: PersistedConfig) -> Self {
        Self {
            slot: RefCell::new(Some(config)),
            saves: Cell::new(0),
        }
    }

    pub fn get(&self) -> Option<PersistedConfig> {
        *self.slot.borrow()
    }

    /// How many times `save` has been called.
    pub fn saves(&self) -> usize {
        self.saves.get()
    }
}

impl ConfigStore for MemoryStore {
    fn load(&self) -> Option<PersistedConfig> {
        self.get()
    }

    fn save(&self, config: &PersistedConfig) -> anyhow::Result<()> {
        *self.slot.borrow_mut() = Some(*config);
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> PersistedConfig {
        PersistedConfig::new(
            FunctionKind::NormalizedSinc,
            ShapeParams {
                amplitude: -0.1,
                frequency: 3.3333333333333335,
                phase: core::f64::consts::PI / 3.0,
                offset: 42.0,
            },
            Interval::new(-7.25, 0.1),
            Interval::new(-999.9, 1e-3),
        )
    }

    #[test]
    fn json_round_trip_is_exact() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("nested").join("settings.json"));
        let config = sample_config();
        store.save(&config).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.x(), config.x());
        assert_eq!(
            loaded.parameters.phase.to_bits(),
            config.parameters.phase.to_bits()
        );
    }

    #[test]
    fn record_layout() {
        let value = serde_json::to_value(sample_config()).unwrap();
        assert_eq!(value["type"], "Sinc");
        assert_eq!(value["parameters"]["amplitude"], -0.1);
        assert_eq!(value["parameters"]["offset"], 42.0);
        assert_eq!(value["xmin"], -7.25);
        assert_eq!(value["ymax"], 1e-3);
    }

    #[test]
    fn legacy_settings_file_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{
  "type": "Cos",
  "parameters": {
    "Amplitude": 2,
    "Frequency": 3,
    "Phase": 0.5,
    "Offset": -1
  },
  "xmin": -5,
  "xmax": 5,
  "ymin": -4,
  "ymax": 4
}"#,
        )
        .unwrap();

        let config = JsonStore::new(&path).load().unwrap();
        assert_eq!(
            config,
            PersistedConfig::new(
                FunctionKind::Cosine,
                ShapeParams {
                    amplitude: 2.0,
                    frequency: 3.0,
                    phase: 0.5,
                    offset: -1.0,
                },
                Interval::new(-5.0, 5.0),
                Interval::new(-4.0, 4.0),
            )
        );

        fs::write(
            &path,
            r#"{"type": "Sin", "parameters": {"Amplitude": 1, "Frequency": 1, "Phase": 0, "Offset": 0}, "xmin": -1, "xmax": 1, "ymin": -1, "ymax": 1}"#,
        )
        .unwrap();
        assert_eq!(JsonStore::new(&path).load().unwrap().kind, FunctionKind::Sine);
    }

    #[test]
    fn missing_or_broken_files_load_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let store = JsonStore::new(&path);
        assert_eq!(store.load(), None);

        for text in [
            "",
            "not json",
            r#"{"type": "Tan", "parameters": {"amplitude": 1, "frequency": 1, "phase": 0, "offset": 0}, "xmin": -1, "xmax": 1, "ymin": -1, "ymax": 1}"#,
            r#"{"type": "Sine", "parameters": {"amplitude": 1, "frequency": 1, "phase": 0}, "xmin": -1, "xmax": 1, "ymin": -1, "ymax": 1}"#,
            r#"{"type": "Sine", "parameters": {"amplitude": 1, "frequency": 1, "phase": 0, "offset": 0}, "xmin": "-1", "xmax": 1, "ymin": -1, "ymax": 1}"#,
        ] {
            fs::write(&path, text).unwrap();
            assert_eq!(store.load(), None, "{text}");
        }
    }

    #[test]
    fn save_into_unwritable_location_reports() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        let store = JsonStore::new(blocker.join("settings.json"));
        assert!(store.save(&sample_config()).is_err());
    }

    #[test]
    fn memory_store_counts_saves() {
        let store = MemoryStore::default();
        assert_eq!(store.load(), None);
        store.save(&sample_config()).unwrap();
        store.save(&sample_config()).unwrap();
        assert_eq!(store.saves(), 2);
        assert_eq!(store.load(), Some(sample_config()));
    }
}
