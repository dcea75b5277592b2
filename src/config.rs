use std::path::{Path, PathBuf};

use crate::error::Error;

/// Name of the optional config file looked up in the working directory.
pub const CONFIG_FILE: &str = ".adoc-xref.toml";

/// Extension of corpus documents when the config does not say otherwise.
const DEFAULT_EXTENSION: &str = "adoc";

/// Project configuration loaded from `.adoc-xref.toml`.
/// Include/exclude patterns are path prefixes applied relative to the corpus root.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path prefixes that are never scanned.
    exclude: Vec<String>,
    /// Document file extension without the leading dot.
    pub extension: String,
    /// Path prefixes to scan; empty means everything.
    include: Vec<String>,
    /// Corpus root, if the config file names one.
    pub root: Option<PathBuf>,
}

/// Raw TOML structure for `.adoc-xref.toml`.
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct XrefTomlConfig {
    /// `exclude = [...]` path prefixes.
    #[serde(default)]
    exclude: Vec<String>,
    /// `extension = "adoc"`, with or without the leading dot.
    extension: Option<String>,
    /// `include = [...]` path prefixes.
    #[serde(default)]
    include: Vec<String>,
    /// `root = "..."` corpus directory.
    root: Option<PathBuf>,
}

impl Default for Config {
    /// Scan every `.adoc` file, no configured root.
    fn default() -> Self {
        return Self {
            exclude: Vec::new(),
            extension: DEFAULT_EXTENSION.to_string(),
            include: Vec::new(),
            root: None,
        };
    }
}

impl Config {
    /// Load config from `.adoc-xref.toml` in the given directory.
    /// Returns the default if the file doesn't exist, and an error if it
    /// exists but is malformed.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::TomlDe` if the TOML is malformed.
    pub fn load(dir: &Path) -> Result<Self, Error> {
        let path = dir.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(Error::Io(e)),
        };
        return Self::parse(&content);
    }

    /// Parse config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `Error::TomlDe` if the TOML is malformed or has unknown keys.
    pub fn parse(content: &str) -> Result<Self, Error> {
        let raw: XrefTomlConfig = toml::from_str(content)?;
        let extension = raw
            .extension
            .map(|e| e.trim_start_matches('.').to_string())
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
        return Ok(Self {
            exclude: raw.exclude,
            extension,
            include: raw.include,
            root: raw.root,
        });
    }

    /// Check whether a corpus file path should be scanned.
    ///
    /// A path is included if no include patterns are set (scan everything),
    /// or if the path starts with at least one include pattern.
    /// An included path is then excluded if it starts with any exclude pattern.
    pub fn should_scan(&self, relative_path: &str) -> bool {
        let included = self.include.is_empty()
            || self.include.iter().any(|p| relative_path.starts_with(p.as_str()));

        if !included {
            return false;
        }

        return !self.exclude.iter().any(|p| relative_path.starts_with(p.as_str()));
    }
}
