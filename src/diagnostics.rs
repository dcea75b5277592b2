use crate::config::CONFIG_FILE;
use crate::error::{Error, MissHint};
use crate::types::Resolution;

/// ANSI escape that starts bold text.
const BOLD: &str = "\x1b[1m";
/// ANSI escape that resets text attributes.
const RESET: &str = "\x1b[0m";

/// Render an error as valid markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    print_markdown(&render_error(e));
}

/// Print the post-resolution reminders to stderr.
pub fn print_resolution_notes(resolution: &Resolution) {
    print_markdown(&render_resolution_notes(resolution));
}

/// Write markdown to stderr, bolding heading lines.
fn print_markdown(md: &str) {
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic.
///
/// Each variant produces a block with what happened and how to move on.
pub fn render_error(e: &Error) -> String {
    return match e {
        Error::InvalidLinkShape { link } => render_invalid_link_shape(link),
        Error::AnchorNotFound { anchor, hint } => render_anchor_not_found(anchor, *hint),
        Error::RootNotFound { path } => render_root_not_found(&path.display().to_string()),
        Error::EmptyInput => "\
# Error: No Link Given

Pass a link as an argument or paste one at the prompt:

    adoc-xref resolve https://docs.redhat.com/.../html/<book>/<page>#<anchor>
"
        .to_string(),
        Error::TomlDe(err) => format!("\
# Error: Invalid Config

`{CONFIG_FILE}` could not be parsed:

{err}
"),
        Error::Io(_) | Error::Json(_) | Error::UnreadableDocument { .. } => format!("\
# Error

{e}
"),
    };
}

/// Diagnostic for a link that matches no known shape.
fn render_invalid_link_shape(link: &str) -> String {
    return format!("\
# Error: Invalid Link Format

`{link}` does not match any known link shape.

## Recognized shapes

    .../html/<book>/<page>#<anchor>            assembly/assembly
    .../html/<book>/<page>                     assembly/module
    .../html/<book>/<page>#<module>_<context>  assembly/module_context

## Fix

Copy the link again from the published page. Links are matched exactly:
trailing slashes, query strings, and underscores in a bare page slug are
not accepted.
");
}

/// Diagnostic for an anchor missing from the corpus, worded by `hint`.
fn render_anchor_not_found(anchor: &str, hint: MissHint) -> String {
    let mut out = format!("\
# Error: Anchor Not Found

No document under the corpus root declares `[id=\"{anchor}\"]`.
");
    match hint {
        MissHint::CorpusGap => out.push_str("\
\n## Fix

Check that the corpus root points at an up-to-date checkout, and that the
anchor is not excluded by the include/exclude filters.
"),
        MissHint::TitleDerivedSlug => out.push_str("\
\n## Why

The page slug was probably generated from the page title and does not
correspond to any assembly ID, so it cannot be resolved by anchor search.

## Fix

Find the target assembly by its title and write the xref by hand.
"),
    }
    return out;
}

/// Diagnostic for a corpus root that is not a directory.
fn render_root_not_found(path: &str) -> String {
    return format!("\
# Error: Corpus Root Not Found

`{path}` is not a directory.

## Fix

Pass the documentation checkout explicitly:

    adoc-xref resolve --root /path/to/openshift-docs <link>

Or set it in `{CONFIG_FILE}`:

    root = \"/path/to/openshift-docs\"
");
}

/// Render the reminders that go with a freshly generated xref.
pub fn render_resolution_notes(resolution: &Resolution) -> String {
    let mut out = format!("\
# Xref generated ({})

Double-check the xref before publishing.

- The `../` climb is fixed; adjust it to the depth of the file you paste into.
", resolution.shape.label());
    if resolution.reference.label.is_empty() {
        out.push_str("- The link text inside `[]` is empty; fill in a human-readable label.\n");
    }
    if !resolution.other_candidates.is_empty() {
        out.push_str("\n## Also declared in\n\n");
        for other in &resolution.other_candidates {
            out.push_str("- `");
            out.push_str(other);
            out.push_str("`\n");
        }
    }
    return out;
}
