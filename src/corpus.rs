//! Read-only queries over a tree of AsciiDoc documents.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use walkdir::{DirEntry, WalkDir};

use crate::config::Config;
use crate::error::Error;
use crate::types::{Document, slash_path};

/// Returned by [`extract_title`] when a document has no level-0 heading.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// A document title line: one `=`, whitespace, then the title text.
#[allow(clippy::expect_used, reason = "pattern is a compile-time constant")]
static TITLE_LINE: LazyLock<Regex> =
    LazyLock::new(|| return Regex::new(r"^=\s+(.+)").expect("valid title pattern"));

/// A corpus rooted at a directory, filtered by the config's extension and
/// include/exclude prefixes.
///
/// Nothing is cached: every query walks the tree again. Directory entries
/// are visited in file-name order so repeated queries see the same sequence.
#[derive(Debug, Clone)]
pub struct Corpus {
    /// Extension and path filters.
    config: Config,
    /// Directory the walk starts from.
    root: PathBuf,
}

impl Corpus {
    /// Open a corpus at `root`.
    ///
    /// # Errors
    ///
    /// Returns `Error::RootNotFound` if `root` is not an existing directory.
    pub fn open(root: &Path, config: Config) -> Result<Self, Error> {
        if !root.is_dir() {
            return Err(Error::RootNotFound {
                path: root.to_path_buf(),
            });
        }
        return Ok(Self {
            config,
            root: root.to_path_buf(),
        });
    }

    /// Every readable document in the corpus, in traversal order.
    /// Unreadable files and directories are logged at debug level and skipped.
    pub fn documents(&self) -> impl Iterator<Item = Document> + '_ {
        return WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(e) => Some(e),
                Err(e) => {
                    let skipped = Error::UnreadableDocument {
                        path: e.path().map_or_else(|| self.root.clone(), Path::to_path_buf),
                        reason: e.to_string(),
                    };
                    tracing::debug!(%skipped, "skipping");
                    None
                },
            })
            .filter(|e| self.is_candidate(e))
            .filter_map(|e| match self.load(e.path()) {
                Ok(doc) => Some(doc),
                Err(skipped) => {
                    tracing::debug!(%skipped, "skipping");
                    None
                },
            });
    }

    /// First document declaring `[id="<anchor>"]`, in traversal order.
    pub fn find_file_declaring_anchor(&self, anchor: &str) -> Option<Document> {
        let found = self.documents().find(|doc| doc.declares_anchor(anchor));
        tracing::debug!(anchor, found = found.is_some(), "anchor scan finished");
        return found;
    }

    /// Every document declaring `[id="<anchor>"]`, in traversal order.
    /// More than one entry means the corpus declares the id twice.
    pub fn find_all_files_declaring_anchor(&self, anchor: &str) -> Vec<Document> {
        return self.documents().filter(|doc| doc.declares_anchor(anchor)).collect();
    }

    /// A regular file with the configured extension that passes the path filters.
    fn is_candidate(&self, entry: &DirEntry) -> bool {
        if !entry.file_type().is_file() {
            return false;
        }
        let has_extension = entry
            .path()
            .extension()
            .is_some_and(|ext| ext == self.config.extension.as_str());
        if !has_extension {
            return false;
        }
        let relative = entry.path().strip_prefix(&self.root).unwrap_or(entry.path());
        return self.config.should_scan(&slash_path(relative));
    }

    /// Read one document.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnreadableDocument` if the file cannot be read as UTF-8.
    fn load(&self, path: &Path) -> Result<Document, Error> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::UnreadableDocument {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let relative_path = path.strip_prefix(&self.root).unwrap_or(path).to_path_buf();
        return Ok(Document {
            content,
            path: path.to_path_buf(),
            relative_path,
        });
    }
}

/// Title of a document: the text of its first `= ` line, or [`UNKNOWN_TITLE`].
pub fn extract_title(document: &Document) -> String {
    return extract_title_from_text(&document.content);
}

/// Title of raw AsciiDoc text; see [`extract_title`].
pub fn extract_title_from_text(content: &str) -> String {
    return content
        .lines()
        .find_map(|line| TITLE_LINE.captures(line))
        .and_then(|caps| caps.get(1))
        .map_or_else(|| UNKNOWN_TITLE.to_string(), |m| m.as_str().to_string());
}

/// Read a file from disk and extract its title.
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be read.
pub fn read_title(path: &Path) -> Result<String, Error> {
    let content = std::fs::read_to_string(path)?;
    return Ok(extract_title_from_text(&content));
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests")]
mod tests {
    use super::*;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn corpus(root: &Path) -> Corpus {
        return Corpus::open(root, Config::default()).unwrap();
    }

    #[test]
    fn finds_declaring_file() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "modules/foo.adoc", ":_mod-docs-content-type: PROCEDURE\n[id=\"my-anchor\"]\n= Foo\n");
        write(dir.path(), "modules/bar.adoc", "[id=\"other\"]\n= Bar\n");

        let doc = corpus(dir.path()).find_file_declaring_anchor("my-anchor").unwrap();
        assert_eq!(doc.relative_path, PathBuf::from("modules/foo.adoc"));
    }

    #[test]
    fn search_is_repeatable() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "b/dup.adoc", "[id=\"dup\"]\n");
        write(dir.path(), "a/dup.adoc", "[id=\"dup\"]\n");
        let corpus = corpus(dir.path());

        let first = corpus.find_file_declaring_anchor("dup").unwrap();
        let second = corpus.find_file_declaring_anchor("dup").unwrap();
        assert_eq!(first.relative_path, second.relative_path);
        assert_eq!(first.relative_path, PathBuf::from("a/dup.adoc"));

        let all = corpus.find_all_files_declaring_anchor("dup");
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn empty_corpus_finds_nothing() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "README.md", "[id=\"my-anchor\"]\n");
        let corpus = corpus(dir.path());
        assert!(corpus.find_file_declaring_anchor("my-anchor").is_none());
        assert!(corpus.find_all_files_declaring_anchor("my-anchor").is_empty());
    }

    #[test]
    fn non_utf8_documents_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.adoc"), [0xff, 0xfe, 0x00, 0x5b]).unwrap();
        write(dir.path(), "b.adoc", "[id=\"x\"]\n");
        let doc = corpus(dir.path()).find_file_declaring_anchor("x").unwrap();
        assert_eq!(doc.relative_path, PathBuf::from("b.adoc"));
    }

    #[cfg(unix)]
    #[test]
    fn walk_errors_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("a")).unwrap();
        std::os::unix::fs::symlink("..", dir.path().join("a/loop")).unwrap();
        std::os::unix::fs::symlink("missing.adoc", dir.path().join("a/dangling.adoc")).unwrap();
        write(dir.path(), "b/x.adoc", "[id=\"x\"]\n");

        let all = corpus(dir.path()).find_all_files_declaring_anchor("x");
        let found: Vec<PathBuf> = all.into_iter().map(|doc| doc.relative_path).collect();
        assert_eq!(found, vec![PathBuf::from("b/x.adoc")]);
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_directories_are_skipped() {
        use std::os::unix::fs::PermissionsExt as _;

        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a/locked/x.adoc", "[id=\"x\"]\n");
        write(dir.path(), "b/x.adoc", "[id=\"x\"]\n");
        let locked = dir.path().join("a/locked");
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();
        // Privileged users can still list the directory.
        let enforced = std::fs::read_dir(&locked).is_err();

        let all = corpus(dir.path()).find_all_files_declaring_anchor("x");
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();

        let found: Vec<PathBuf> = all.into_iter().map(|doc| doc.relative_path).collect();
        assert!(found.contains(&PathBuf::from("b/x.adoc")));
        if enforced {
            assert_eq!(found, vec![PathBuf::from("b/x.adoc")]);
        }
    }

    #[test]
    fn config_filters_limit_the_scan() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "_unused_topics/old.adoc", "[id=\"x\"]\n");
        write(dir.path(), "modules/new.adoc", "[id=\"x\"]\n");
        let config = Config::parse("exclude = [\"_unused_topics/\"]").unwrap();
        let corpus = Corpus::open(dir.path(), config).unwrap();
        let all = corpus.find_all_files_declaring_anchor("x");
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].relative_path, PathBuf::from("modules/new.adoc"));
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            Corpus::open(&missing, Config::default()),
            Err(Error::RootNotFound { .. })
        ));
    }

    #[test]
    fn title_is_first_level_zero_heading() {
        let text = "[id=\"configuring\"]\n== Not this\n= Configuring the Cluster\n= Later\n";
        assert_eq!(extract_title_from_text(text), "Configuring the Cluster");
        assert_eq!(extract_title_from_text("= Configuring the Cluster"), "Configuring the Cluster");
    }

    #[test]
    fn missing_title_yields_sentinel() {
        assert_eq!(extract_title_from_text("== Section\ntext\n"), UNKNOWN_TITLE);
        assert_eq!(extract_title_from_text(""), UNKNOWN_TITLE);
    }
}
