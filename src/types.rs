//! Core domain types for adoc-xref links, documents, and references.
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Structural shape of a published documentation link.
/// Produced only by the classifier; each variant carries the captured fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum LinkShape {
    /// `html/<folder>/<slug>#<fragment>` where the fragment is a plain anchor id.
    AssemblyAssembly {
        /// Top-level book folder.
        folder: String,
        /// Anchor id declared somewhere in the corpus.
        fragment: String,
        /// Page slug.
        slug: String,
    },
    /// `html/<folder>/<slug>` with no fragment; the slug is the anchor id.
    AssemblyModule {
        /// Top-level book folder.
        folder: String,
        /// Page slug, searched as an anchor id.
        slug: String,
    },
    /// `html/<folder>/<slug>#<prefix>_<context>`: a module anchor qualified
    /// by the id of the assembly that includes it.
    ModuleWithContext {
        /// Assembly context suffix, possibly containing further underscores.
        context: String,
        /// Top-level book folder.
        folder: String,
        /// Fragment text before the first underscore.
        prefix: String,
        /// Page slug, searched as an anchor id.
        slug: String,
    },
}

impl LinkShape {
    /// Human-readable shape name used in diagnostics.
    pub const fn label(&self) -> &'static str {
        return match self {
            Self::AssemblyAssembly { .. } => "assembly/assembly",
            Self::AssemblyModule { .. } => "assembly/module",
            Self::ModuleWithContext { .. } => "assembly/module_context",
        };
    }

    /// The identifier the corpus must declare for this link to resolve.
    pub fn search_anchor(&self) -> &str {
        return match self {
            Self::AssemblyAssembly { fragment, .. } => fragment,
            Self::AssemblyModule { slug, .. } | Self::ModuleWithContext { slug, .. } => slug,
        };
    }

    /// The anchor written into the emitted xref.
    /// For context links this is rebuilt from the original prefix and context,
    /// never from the file that was found.
    pub fn xref_anchor(&self) -> String {
        return match self {
            Self::AssemblyAssembly { fragment, .. } => fragment.clone(),
            Self::AssemblyModule { slug, .. } => slug.clone(),
            Self::ModuleWithContext { prefix, context, .. } => format!("{prefix}_{context}"),
        };
    }
}

/// A corpus file loaded from disk. Read-only.
#[derive(Debug, Clone)]
pub struct Document {
    /// Raw text content.
    pub content: String,
    /// Path on disk.
    pub path: PathBuf,
    /// Path relative to the corpus root.
    pub relative_path: PathBuf,
}

impl Document {
    /// Whether this document declares `[id="<anchor>"]` anywhere in its text.
    pub fn declares_anchor(&self, anchor: &str) -> bool {
        return self.content.contains(&anchor_marker(anchor));
    }
}

/// The literal declaration text for an anchor id.
pub fn anchor_marker(anchor: &str) -> String {
    return format!("[id=\"{anchor}\"]");
}

/// An internal cross reference ready to paste into a document.
///
/// Always rendered with a single `../` prefix whatever the depth of the
/// referring file; callers adjust the climb themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedReference {
    /// Anchor fragment after `#`.
    pub anchor: String,
    /// Link text inside the trailing brackets; empty by default.
    pub label: String,
    /// Target path relative to the corpus root, `/`-separated.
    pub path: String,
}

impl ResolvedReference {
    /// Build a reference with an empty label.
    pub fn new(relative_path: &Path, anchor: &str) -> Self {
        return Self {
            anchor: anchor.to_string(),
            label: String::new(),
            path: slash_path(relative_path),
        };
    }
}

impl fmt::Display for ResolvedReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "xref:../{}#{}[{}]", self.path, self.anchor, self.label);
    }
}

/// Outcome of resolving one link against the corpus.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    /// Other documents that also declare the searched anchor, in scan order.
    pub other_candidates: Vec<String>,
    /// The emitted cross reference.
    pub reference: ResolvedReference,
    /// The classified link.
    pub shape: LinkShape,
    /// Xref text, duplicated here so JSON consumers need not rebuild it.
    pub xref: String,
}

/// Render a relative path with `/` separators regardless of platform.
pub fn slash_path(path: &Path) -> String {
    return path
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
}
