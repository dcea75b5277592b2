use crate::classifier;
use crate::corpus::{self, Corpus};
use crate::error::{Error, MissHint};
use crate::types::{LinkShape, Resolution, ResolvedReference, slash_path};

/// Turns published links into xrefs against one corpus.
pub struct Resolver {
    /// Corpus searched for anchor declarations.
    corpus: Corpus,
    /// Whether the xref label is filled with the target's title.
    title_label: bool,
}

impl Resolver {
    /// Resolver over `corpus` that emits empty xref labels.
    pub const fn new(corpus: Corpus) -> Self {
        return Self {
            corpus,
            title_label: false,
        };
    }

    /// Fill the xref label with the title of the document that was found.
    #[must_use]
    pub fn with_title_label(mut self, enabled: bool) -> Self {
        self.title_label = enabled;
        return self;
    }

    /// Classify `link` and resolve it to an xref.
    ///
    /// Assembly/assembly links search for the fragment. Module links, with or
    /// without context, search for the slug; context links then write the
    /// original `<prefix>_<context>` fragment into the xref.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidLinkShape` if the link matches no known shape,
    /// or `Error::AnchorNotFound` if no corpus document declares the anchor.
    pub fn resolve(&self, link: &str) -> Result<Resolution, Error> {
        let shape = classifier::classify(link)?;
        tracing::info!(shape = shape.label(), "valid link format");
        return self.resolve_shape(shape);
    }

    /// Resolve an already classified link.
    ///
    /// # Errors
    ///
    /// Returns `Error::AnchorNotFound` if no corpus document declares the anchor.
    pub fn resolve_shape(&self, shape: LinkShape) -> Result<Resolution, Error> {
        let anchor = shape.search_anchor();
        let mut matches = self.corpus.find_all_files_declaring_anchor(anchor).into_iter();

        let Some(found) = matches.next() else {
            tracing::info!(anchor, "could not find a document declaring the anchor");
            return Err(Error::AnchorNotFound {
                anchor: anchor.to_string(),
                hint: miss_hint(&shape),
            });
        };
        tracing::info!(file = %found.path.display(), "found document");

        let other_candidates: Vec<String> = matches.map(|doc| slash_path(&doc.relative_path)).collect();
        if !other_candidates.is_empty() {
            tracing::warn!(
                anchor,
                chosen = %slash_path(&found.relative_path),
                others = %other_candidates.join(", "),
                "anchor is declared in more than one document; using the first"
            );
        }

        let mut reference = ResolvedReference::new(&found.relative_path, &shape.xref_anchor());
        if self.title_label {
            reference.label = corpus::extract_title(&found);
        }
        let xref = reference.to_string();

        return Ok(Resolution {
            other_candidates,
            reference,
            shape,
            xref,
        });
    }
}

/// A bare page slug that is not declared anywhere is usually title-derived;
/// an explicit fragment that is missing points at a gap in the corpus.
const fn miss_hint(shape: &LinkShape) -> MissHint {
    return match shape {
        LinkShape::AssemblyModule { .. } => MissHint::TitleDerivedSlug,
        LinkShape::AssemblyAssembly { .. } | LinkShape::ModuleWithContext { .. } => MissHint::CorpusGap,
    };
}
