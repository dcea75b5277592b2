//! Crate-level error types for adoc-xref diagnostics.
use std::path::PathBuf;

use serde::Serialize;

/// Why an anchor search came back empty, as far as the link shape can tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissHint {
    /// The identifier looks like a real anchor id; the corpus simply lacks it
    /// or declares it in a file the search did not reach.
    CorpusGap,
    /// The identifier is a bare page slug, usually generated from a title,
    /// and likely never existed as an `[id="..."]` declaration.
    TitleDerivedSlug,
}

/// All errors in adoc-xref carry enough context to produce a useful diagnostic
/// on their own. Each variant names the link, anchor, or path involved.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The corpus scan finished without finding the anchor declaration.
    #[error("anchor not found: `{anchor}`")]
    AnchorNotFound {
        /// Identifier that was searched for.
        anchor: String,
        /// Guidance on whether this is a corpus gap or an unresolvable slug.
        hint: MissHint,
    },

    /// No link was supplied on the command line or the prompt.
    #[error("no link given")]
    EmptyInput,

    /// The link matches none of the known link shapes.
    #[error("invalid link shape: {link}")]
    InvalidLinkShape {
        /// The raw link exactly as received.
        link: String,
    },

    /// Underlying I/O error from the filesystem or terminal.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// JSON serialization failed.
    #[error("json: {0}")]
    Json(
        /// The wrapped JSON error.
        #[from]
        serde_json::Error,
    ),

    /// The configured corpus root is missing or not a directory.
    #[error("corpus root not found: {}", path.display())]
    RootNotFound {
        /// Path that was configured as the corpus root.
        path: PathBuf,
    },

    /// TOML deserialization of the config file failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),

    /// A corpus document or directory could not be read during a scan.
    /// Scans log and skip these; they never reach the caller.
    #[error("unreadable document: {}: {reason}", path.display())]
    UnreadableDocument {
        /// The file or directory that failed.
        path: PathBuf,
        /// Description of the read failure.
        reason: String,
    },
}

impl Error {
    /// Whether this error means "the link could not be resolved" as opposed
    /// to a configuration or environment failure.
    pub const fn is_unresolved_link(&self) -> bool {
        return matches!(self, Self::AnchorNotFound { .. } | Self::InvalidLinkShape { .. });
    }
}
