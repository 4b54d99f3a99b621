use anyhow::{Context, Result};
use barakah_core::{GoalError, GoalStorage};
use std::fs;
use std::path::{Path, PathBuf};

/// `$BARAKAH_HOME`, or `~/.barakah`.
pub fn barakah_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("BARAKAH_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".barakah"))
}

pub fn ensure_barakah_home() -> Result<PathBuf> {
    let dir = barakah_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Optional string overrides for a language, e.g. `strings.fr.toml`.
pub fn strings_path(language: &str) -> Result<PathBuf> {
    Ok(ensure_barakah_home()?.join(strings_file_name(language)))
}

fn strings_file_name(language: &str) -> String {
    format!("strings.{}.toml", language.trim())
}

/// Key-value storage with one JSON file per key.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn tmp_path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!(".{key}.json.tmp"))
    }
}

impl GoalStorage for FileStorage {
    fn get(&self, key: &str) -> barakah_core::Result<Option<String>> {
        let p = self.path_for(key);
        if !p.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&p)?))
    }

    /// Write via a temp file and rename so a crash never leaves half a record.
    fn set(&mut self, key: &str, value: &str) -> barakah_core::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let tmp = self.tmp_path_for(key);
        fs::write(&tmp, value)?;
        fs::rename(&tmp, self.path_for(key)).map_err(GoalError::from)
    }

    fn remove(&mut self, key: &str) -> barakah_core::Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

pub fn read_optional(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    Ok(Some(s))
}
