//! Per-invocation options and widget filtering.

use crate::{Easing, ReskinError};

/// Options accepted by [`crate::Reskinner::reskin`] and
/// [`crate::Reskinner::animated_reskin`].
#[derive(Clone, Debug)]
pub struct ReskinOptions {
    /// Only widgets carrying one of these tags participate. Mutually
    /// exclusive with `exempt_tags`.
    pub target_tags: Option<Vec<String>>,
    /// Widgets carrying one of these tags are skipped. Mutually exclusive
    /// with `target_tags`.
    pub exempt_tags: Option<Vec<String>>,
    /// Recolor the window's own background.
    pub reskin_background: bool,
    /// Leave attributes alone when their current value does not match what
    /// the old theme would have set, preserving user customizations.
    pub honor_previous: bool,
    /// Also set the toolkit's current theme so future windows pick up the
    /// new one.
    pub set_future: bool,
    /// Progress-shaping curve for animated transitions.
    pub easing: Easing,
}

impl Default for ReskinOptions {
    fn default() -> Self {
        Self {
            target_tags: None,
            exempt_tags: None,
            reskin_background: true,
            honor_previous: true,
            set_future: true,
            easing: Easing::Linear,
        }
    }
}

impl ReskinOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the pass to widgets carrying one of these tags.
    pub fn with_targets<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.target_tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Exclude widgets carrying one of these tags from the pass.
    pub fn with_exempt<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exempt_tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_reskin_background(mut self, on: bool) -> Self {
        self.reskin_background = on;
        self
    }

    pub fn with_honor_previous(mut self, on: bool) -> Self {
        self.honor_previous = on;
        self
    }

    pub fn with_set_future(mut self, on: bool) -> Self {
        self.set_future = on;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

/// Validated widget filter derived from the two option forms.
pub(crate) enum WidgetFilter<'a> {
    All,
    Only(&'a [String]),
    AllBut(&'a [String]),
}

impl<'a> WidgetFilter<'a> {
    /// Validate the mutually exclusive filter options.
    pub(crate) fn from_options(opts: &'a ReskinOptions) -> Result<Self, ReskinError> {
        match (&opts.target_tags, &opts.exempt_tags) {
            (Some(_), Some(_)) => Err(ReskinError::ConflictingFilters),
            (Some(targets), None) => Ok(Self::Only(targets)),
            (None, Some(exempt)) => Ok(Self::AllBut(exempt)),
            (None, None) => Ok(Self::All),
        }
    }

    /// Whether a widget with the given tag participates. Untagged widgets
    /// participate except under the "only these" form.
    pub(crate) fn admits(&self, tag: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Only(tags) => tag.is_some_and(|t| tags.iter().any(|x| x == t)),
            Self::AllBut(tags) => !tag.is_some_and(|t| tags.iter().any(|x| x == t)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_filter_forms_conflict() {
        let opts = ReskinOptions::new()
            .with_targets(["a"])
            .with_exempt(["b"]);
        assert!(matches!(
            WidgetFilter::from_options(&opts),
            Err(ReskinError::ConflictingFilters)
        ));
    }

    #[test]
    fn only_form_rejects_untagged_widgets() {
        let opts = ReskinOptions::new().with_targets(["keep"]);
        let filter = WidgetFilter::from_options(&opts).unwrap();
        assert!(filter.admits(Some("keep")));
        assert!(!filter.admits(Some("other")));
        assert!(!filter.admits(None));
    }

    #[test]
    fn all_but_form_admits_untagged_widgets() {
        let opts = ReskinOptions::new().with_exempt(["skip"]);
        let filter = WidgetFilter::from_options(&opts).unwrap();
        assert!(!filter.admits(Some("skip")));
        assert!(filter.admits(Some("other")));
        assert!(filter.admits(None));
    }
}
