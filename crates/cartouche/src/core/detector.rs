//! Diagram detectors
//!
//! A detector is a pure predicate deciding whether one diagram implementation
//! should claim a candidate. The candidate is either a diagram type tag or the
//! raw diagram text; the registry passes the same kind to every detector
//! within one resolution attempt.
//!
//! Most implementations belong to a [`DiagramFamily`]: several variants share
//! the family's generic tags and differ by renderer. [`VariantDetector`]
//! implements the shared decision policy:
//!
//! 1. a variant's own composite tag always matches, whatever the configuration;
//! 2. a generic tag matches only the variant the configuration prefers;
//! 3. anything else never matches.

use std::fmt;

use tracing::trace;

use super::{tag, Config};

/// Core trait for diagram type detectors
///
/// Implementations must be total and side-effect free: they are called
/// speculatively for every registered diagram on every resolution attempt and
/// must never panic, whatever the input or configuration shape.
///
/// # Example
/// ```
/// use cartouche::core::{Config, Detector};
/// use cartouche::plugins::flowchart::elk_detector;
///
/// let detector = elk_detector();
/// assert!(detector.detect("flowchart-elk", None));
/// assert!(!detector.detect("flowchart", Some(&Config::default())));
/// ```
pub trait Detector: Send + Sync {
    /// Decide whether this implementation should claim the candidate
    ///
    /// A missing configuration means no renderer preference is set.
    fn detect(&self, candidate: &str, config: Option<&Config>) -> bool;

    /// Identifier of the diagram implementation this detector claims for
    fn diagram_type(&self) -> &'static str;

    /// Tags this detector recognizes
    fn patterns(&self) -> Vec<&'static str>;
}

/// A group of implementations sharing generic tags
pub struct DiagramFamily {
    /// Family name, used in logs
    pub name: &'static str,
    /// Generic tags, aliases included (e.g. `flowchart` and `graph`)
    pub generic_tags: &'static [&'static str],
    /// Variant used when no (known) renderer preference is configured
    pub baseline: &'static str,
    /// Every variant identifier the family knows
    pub variants: &'static [&'static str],
    /// Reads the family's preferred renderer from the configuration
    pub preference: fn(&Config) -> Option<&str>,
}

impl DiagramFamily {
    /// True if `candidate` names this family by one of its generic tags
    pub fn is_generic(&self, candidate: &str) -> bool {
        tag::leading_keyword(candidate)
            .is_some_and(|keyword| self.generic_tags.contains(&keyword))
    }

    /// The variant a generic tag resolves to under `config`
    ///
    /// Unknown or absent preferences resolve to the baseline.
    pub fn selected_variant(&self, config: Option<&Config>) -> &'static str {
        let preferred = config.and_then(|config| (self.preference)(config));
        match preferred {
            Some(preferred) => self
                .variants
                .iter()
                .copied()
                .find(|variant| *variant == preferred)
                .unwrap_or(self.baseline),
            None => self.baseline,
        }
    }
}

impl fmt::Debug for DiagramFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagramFamily")
            .field("name", &self.name)
            .field("generic_tags", &self.generic_tags)
            .field("baseline", &self.baseline)
            .field("variants", &self.variants)
            .finish()
    }
}

/// Detector for one variant of a [`DiagramFamily`]
#[derive(Debug)]
pub struct VariantDetector {
    family: &'static DiagramFamily,
    diagram_type: &'static str,
    variant: &'static str,
    composite_tags: &'static [&'static str],
}

impl VariantDetector {
    /// Create a detector for `variant`, claiming on behalf of `diagram_type`
    pub fn new(
        family: &'static DiagramFamily,
        diagram_type: &'static str,
        variant: &'static str,
        composite_tags: &'static [&'static str],
    ) -> Self {
        Self {
            family,
            diagram_type,
            variant,
            composite_tags,
        }
    }

    /// The family this detector belongs to
    pub fn family(&self) -> &'static DiagramFamily {
        self.family
    }

    /// The renderer variant this detector claims
    pub fn variant(&self) -> &'static str {
        self.variant
    }

    /// True if this detector claims the family's generic tags by default
    pub fn is_baseline(&self) -> bool {
        self.variant == self.family.baseline
    }
}

impl Detector for VariantDetector {
    fn detect(&self, candidate: &str, config: Option<&Config>) -> bool {
        if let Some(composite) = self
            .composite_tags
            .iter()
            .find(|composite| tag::has_tag_prefix(candidate, composite))
        {
            trace!(diagram = self.diagram_type, composite, "Matched composite tag");
            return true;
        }

        if !self.family.is_generic(candidate) {
            return false;
        }

        let selected = self.family.selected_variant(config);
        let matched = selected == self.variant;
        trace!(
            diagram = self.diagram_type,
            family = self.family.name,
            selected,
            matched,
            "Checked generic tag"
        );
        matched
    }

    fn diagram_type(&self) -> &'static str {
        self.diagram_type
    }

    fn patterns(&self) -> Vec<&'static str> {
        let mut patterns = self.composite_tags.to_vec();
        patterns.extend(self.family.generic_tags);
        patterns
    }
}
