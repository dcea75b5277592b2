//! Link shape classification for published documentation URLs.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::Error;
use crate::types::LinkShape;

/// Which shape a pattern in [`PATTERNS`] produces.
#[derive(Clone, Copy)]
enum ShapeKind {
    /// Produces [`LinkShape::AssemblyAssembly`].
    AssemblyAssembly,
    /// Produces [`LinkShape::AssemblyModule`].
    AssemblyModule,
    /// Produces [`LinkShape::ModuleWithContext`].
    ModuleWithContext,
}

/// Ordered pattern table. The first matching pattern wins.
///
/// Shapes 1 and 3 both end in `#<fragment>`; they are told apart by whether
/// the fragment contains `_`. Shape 1 forbids `_` in the fragment and shape 3
/// requires one, splitting at the first occurrence. Shape 2 never carries a
/// fragment. Slugs, fragments and context prefixes never contain `#`, and
/// folders never contain `/`.
const PATTERNS: [(ShapeKind, &str); 3] = [
    (ShapeKind::AssemblyAssembly, r"^.+html/([^/]+)/([^/#]+)#([^_/#]+)$"),
    (ShapeKind::AssemblyModule, r"^.+html/([^/]+)/([^_/#]+)$"),
    (ShapeKind::ModuleWithContext, r"^.+html/([^/]+)/([^/#]+)#([^_/#]+)_(.+)$"),
];

/// Compiled form of [`PATTERNS`], built once.
#[allow(clippy::expect_used, reason = "patterns are compile-time constants")]
static COMPILED: LazyLock<Vec<(ShapeKind, Regex)>> = LazyLock::new(|| {
    return PATTERNS
        .iter()
        .map(|(kind, pattern)| (*kind, Regex::new(pattern).expect("valid link pattern")))
        .collect();
});

/// Classify a link into exactly one [`LinkShape`].
///
/// The link is matched verbatim: no case folding, no trailing slash removal.
///
/// # Errors
///
/// Returns `Error::InvalidLinkShape` if no pattern matches.
pub fn classify(link: &str) -> Result<LinkShape, Error> {
    for (kind, pattern) in COMPILED.iter() {
        if let Some(caps) = pattern.captures(link) {
            return Ok(build_shape(*kind, &caps));
        }
    }
    return Err(Error::InvalidLinkShape {
        link: link.to_string(),
    });
}

/// Turn the captures of a matched pattern into the corresponding shape.
fn build_shape(kind: ShapeKind, caps: &Captures<'_>) -> LinkShape {
    let group = |i: usize| caps.get(i).map(|m| m.as_str().to_string()).unwrap_or_default();
    return match kind {
        ShapeKind::AssemblyAssembly => LinkShape::AssemblyAssembly {
            folder: group(1),
            fragment: group(3),
            slug: group(2),
        },
        ShapeKind::AssemblyModule => LinkShape::AssemblyModule {
            folder: group(1),
            slug: group(2),
        },
        ShapeKind::ModuleWithContext => LinkShape::ModuleWithContext {
            context: group(4),
            folder: group(1),
            prefix: group(3),
            slug: group(2),
        },
    };
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests")]
mod tests {
    use super::*;

    const BASE: &str = "https://docs.redhat.com/en/documentation/openshift_container_platform/4.18/html";

    #[test]
    fn plain_fragment_is_assembly_assembly() {
        let link = format!("{BASE}/edge_computing/cnf-talm-for-cluster-updates#overview-talm");
        let shape = classify(&link).unwrap();
        assert_eq!(
            shape,
            LinkShape::AssemblyAssembly {
                folder: "edge_computing".to_string(),
                fragment: "overview-talm".to_string(),
                slug: "cnf-talm-for-cluster-updates".to_string(),
            }
        );
    }

    #[test]
    fn no_fragment_is_assembly_module() {
        let link = format!("{BASE}/edge_computing/cnf-talm-for-cluster-updates");
        let shape = classify(&link).unwrap();
        assert_eq!(
            shape,
            LinkShape::AssemblyModule {
                folder: "edge_computing".to_string(),
                slug: "cnf-talm-for-cluster-updates".to_string(),
            }
        );
    }

    #[test]
    fn underscored_fragment_splits_on_first_underscore() {
        let link = format!("{BASE}/updating_clusters/updating-cluster#proc_updating-cluster");
        let LinkShape::ModuleWithContext { prefix, context, slug, .. } = classify(&link).unwrap() else {
            panic!("expected context shape");
        };
        assert_eq!(prefix, "proc");
        assert_eq!(context, "updating-cluster");
        assert_eq!(slug, "updating-cluster");

        let link = format!("{BASE}/networking/ovn#nw-egress_ovn_kubernetes_networking");
        let LinkShape::ModuleWithContext { prefix, context, .. } = classify(&link).unwrap() else {
            panic!("expected context shape");
        };
        assert_eq!(prefix, "nw-egress");
        assert_eq!(context, "ovn_kubernetes_networking");
    }

    #[test]
    fn underscore_in_slug_without_fragment_is_invalid() {
        let link = format!("{BASE}/edge_computing/cnf_talm");
        assert!(matches!(classify(&link), Err(Error::InvalidLinkShape { .. })));
    }

    #[test]
    fn link_without_html_segment_is_invalid() {
        let result = classify("https://example.com/docs/edge_computing/cnf-talm#overview");
        assert!(matches!(result, Err(Error::InvalidLinkShape { link }) if link.contains("example.com")));
    }

    #[test]
    fn no_normalization_is_applied() {
        let trailing = format!("{BASE}/edge_computing/cnf-talm/");
        assert!(classify(&trailing).is_err());

        let empty_fragment = format!("{BASE}/edge_computing/cnf-talm#");
        assert!(classify(&empty_fragment).is_err());

        let slashed_fragment = format!("{BASE}/edge_computing/cnf-talm#a/b");
        assert!(classify(&slashed_fragment).is_err());

        let doubled_hash = format!("{BASE}/edge_computing/cnf-talm#a#b");
        assert!(matches!(classify(&doubled_hash), Err(Error::InvalidLinkShape { .. })));

        let doubled_hash_context = format!("{BASE}/edge_computing/cnf-talm#a#b_ctx");
        assert!(matches!(classify(&doubled_hash_context), Err(Error::InvalidLinkShape { .. })));
    }
}
