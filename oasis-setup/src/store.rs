//! Ordered INI store backing every config file the wizard touches.
//!
//! The dialect matches what the API server's Go loader reads: `[section]`
//! headers followed by `key = value` entries, a blank line after each section.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::StoreError;

/// Field name to value, in insertion order.
pub type Section = IndexMap<String, String>;

/// In-memory view of one INI file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigStore {
    sections: IndexMap<String, Section>,
}

impl ConfigStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `path`, treating a missing file as an empty store.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                let store = Self::parse_from(&contents, path)?;
                debug!(
                    path = %path.display(),
                    sections = store.sections.len(),
                    "loaded config file"
                );
                Ok(store)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "config file absent; starting empty");
                Ok(Self::default())
            }
            Err(source) => Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Parse INI text that did not come from a file.
    pub fn parse(contents: &str) -> Result<Self, StoreError> {
        Self::parse_from(contents, Path::new("<memory>"))
    }

    fn parse_from(contents: &str, path: &Path) -> Result<Self, StoreError> {
        let mut store = Self::default();
        let mut current: Option<String> = None;

        for (idx, raw) in contents.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';')
            {
                continue;
            }

            if let Some(rest) = line.strip_prefix('[') {
                let Some(name) = rest.strip_suffix(']') else {
                    return Err(parse_error(path, idx, "unterminated section header"));
                };
                let name = name.trim().to_string();
                store.add_section(&name);
                current = Some(name);
                continue;
            }

            let Some(section) = current.as_deref() else {
                return Err(parse_error(path, idx, "entry outside of a section"));
            };
            let Some(split) = line.find(['=', ':']) else {
                return Err(parse_error(path, idx, "expected `key = value`"));
            };
            let key = line[..split].trim().to_ascii_lowercase();
            if key.is_empty() {
                return Err(parse_error(path, idx, "empty key"));
            }
            let value = line[split + 1..].trim();
            store.set(section, &key, value);
        }

        Ok(store)
    }

    /// Render the store back to INI text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (name, section) in &self.sections {
            out.push('[');
            out.push_str(name);
            out.push_str("]\n");
            for (key, value) in section {
                if value.is_empty() {
                    out.push_str(&format!("{key} =\n"));
                } else {
                    out.push_str(&format!("{key} = {value}\n"));
                }
            }
            out.push('\n');
        }
        out
    }

    /// Overwrite `path` with the rendered store.
    ///
    /// Goes through a sibling temp file so a crash mid-write never leaves a
    /// truncated config behind; an existing file keeps its permissions.
    pub fn write(&self, path: &Path) -> Result<(), StoreError> {
        let write_err = |source: io::Error| StoreError::Write {
            path: path.to_path_buf(),
            source,
        };

        let dir = parent_dir(path);
        fs::create_dir_all(&dir).map_err(write_err)?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(write_err)?;
        tmp.write_all(self.render().as_bytes()).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;

        if let Ok(meta) = fs::metadata(path) {
            fs::set_permissions(tmp.path(), meta.permissions())
                .map_err(write_err)?;
        }

        tmp.persist(path).map_err(|err| write_err(err.error))?;
        debug!(
            path = %path.display(),
            sections = self.sections.len(),
            "wrote config file"
        );
        Ok(())
    }

    /// Whether the store holds no sections at all.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Section names in file order.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Sections with their entries, in file order.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(name, s)| (name.as_str(), s))
    }

    /// Entries of `name`, if the section exists.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// Whether a section called `name` exists.
    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Add an empty section; a no-op if it already exists.
    pub fn add_section(&mut self, name: &str) {
        self.sections.entry(name.to_string()).or_default();
    }

    /// Remove `name`, keeping the order of the remaining sections.
    pub fn remove_section(&mut self, name: &str) -> Option<Section> {
        self.sections.shift_remove(name)
    }

    /// Drop `name` (and its entries) and re-add it empty at the end.
    pub fn reset_section(&mut self, name: &str) {
        self.remove_section(name);
        self.add_section(name);
    }

    /// Set `key` in `section`, creating the section when needed.
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    /// Value of `key` in `section`.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|s| s.get(key))
            .map(String::as_str)
    }

    /// Drop every section.
    pub fn clear(&mut self) {
        self.sections.clear();
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn parse_error(path: &Path, idx: usize, message: &str) -> StoreError {
    StoreError::Parse {
        path: path.to_path_buf(),
        line: idx + 1,
        message: message.to_string(),
    }
}
