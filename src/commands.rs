//! CLI commands for adoc-xref: resolve, classify, find, title.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::classifier;
use crate::config::Config;
use crate::corpus::{self, Corpus};
use crate::diagnostics;
use crate::error::{Error, MissHint};
use crate::resolver::Resolver;
use crate::types::{LinkShape, slash_path};

/// Shown when `resolve` is run without a link argument.
const LINK_PROMPT: &str = "Please enter the full link of the page from docs.redhat.com \
(e.g. https://docs.redhat.com/en/documentation/openshift_container_platform/4.18/html/edge_computing/cnf-talm-for-cluster-updates): ";

/// Classify a link and print its shape and captured fields.
///
/// # Errors
///
/// Returns `Error::InvalidLinkShape` if the link matches no shape,
/// or `Error::Json` if JSON output fails.
pub fn classify(link: &str, json: bool) -> Result<(), Error> {
    let shape = classifier::classify(link)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&shape)?);
        return Ok(());
    }

    println!("{}", shape.label());
    for (field, value) in shape_fields(&shape) {
        println!("{field:<9} {value}");
    }
    return Ok(());
}

/// Print the relative path of the first (or every) document declaring `anchor`.
///
/// # Errors
///
/// Returns config or root errors, or `Error::AnchorNotFound` when nothing matches.
pub fn find(anchor: &str, root: Option<&Path>, all: bool) -> Result<(), Error> {
    let corpus = open_corpus(root)?;
    let found = if all {
        corpus.find_all_files_declaring_anchor(anchor)
    } else {
        corpus.find_file_declaring_anchor(anchor).into_iter().collect()
    };

    if found.is_empty() {
        return Err(Error::AnchorNotFound {
            anchor: anchor.to_string(),
            hint: MissHint::CorpusGap,
        });
    }
    for doc in &found {
        println!("{}", slash_path(&doc.relative_path));
    }
    return Ok(());
}

/// Read a link from `input` after writing the prompt to `prompt`.
///
/// # Errors
///
/// Returns `Error::Io` if reading or writing fails,
/// or `Error::EmptyInput` if the line is blank.
pub fn prompt_for_link<R: BufRead, W: Write>(input: &mut R, prompt: &mut W) -> Result<String, Error> {
    prompt.write_all(LINK_PROMPT.as_bytes())?;
    prompt.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let link = line.trim();
    if link.is_empty() {
        return Err(Error::EmptyInput);
    }
    return Ok(link.to_string());
}

/// Resolve a link to an xref and print it. Prompts on stdin when `link` is `None`.
///
/// # Errors
///
/// Returns config, root, prompt, classification, or anchor-search errors.
pub fn resolve(link: Option<&str>, root: Option<&Path>, label: bool, json: bool) -> Result<(), Error> {
    let resolver = Resolver::new(open_corpus(root)?).with_title_label(label);

    let link = match link {
        Some(l) => l.to_string(),
        None => prompt_for_link(&mut std::io::stdin().lock(), &mut std::io::stderr())?,
    };

    let resolution = resolver.resolve(&link)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&resolution)?);
    } else {
        println!("{}", resolution.xref);
        diagnostics::print_resolution_notes(&resolution);
    }
    return Ok(());
}

/// Print the title of one document.
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be read.
pub fn title(file: &Path) -> Result<(), Error> {
    println!("{}", corpus::read_title(file)?);
    return Ok(());
}

/// Load `.adoc-xref.toml` from the working directory and open the corpus.
/// An explicit `root` wins over the configured one; `.` is the fallback.
///
/// # Errors
///
/// Returns config errors or `Error::RootNotFound`.
fn open_corpus(root: Option<&Path>) -> Result<Corpus, Error> {
    let config = Config::load(Path::new("."))?;
    let root = root
        .map(Path::to_path_buf)
        .or_else(|| config.root.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    tracing::debug!(root = %root.display(), extension = %config.extension, "opening corpus");
    return Corpus::open(&root, config);
}

/// Captured fields of a shape, in display order.
fn shape_fields(shape: &LinkShape) -> Vec<(&'static str, &str)> {
    return match shape {
        LinkShape::AssemblyAssembly { folder, slug, fragment } => {
            vec![("folder", folder.as_str()), ("slug", slug.as_str()), ("fragment", fragment.as_str())]
        },
        LinkShape::AssemblyModule { folder, slug } => {
            vec![("folder", folder.as_str()), ("slug", slug.as_str())]
        },
        LinkShape::ModuleWithContext { folder, slug, prefix, context } => vec![
            ("folder", folder.as_str()),
            ("slug", slug.as_str()),
            ("prefix", prefix.as_str()),
            ("context", context.as_str()),
        ],
    };
}
