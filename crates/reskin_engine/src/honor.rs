//! Honor-previous verdicts for one transition session.

use rustc_hash::FxHashMap;

use reskin_toolkit::{Attr, WidgetId};

/// Cache of honor-previous decisions, keyed by widget and attribute.
///
/// A verdict is computed the first time a widget attribute is considered
/// (comparing its live value against the old theme's nominal value) and
/// reused for every later frame of the same transition, so an animation's
/// own intermediate writes never flip the decision mid-flight. The ledger
/// lives on the driver's stack and is discarded with the session.
#[derive(Debug, Default)]
pub(crate) struct HonorLedger {
    verdicts: FxHashMap<(WidgetId, Attr), bool>,
}

impl HonorLedger {
    pub(crate) fn get(&self, widget: WidgetId, attr: Attr) -> Option<bool> {
        self.verdicts.get(&(widget, attr)).copied()
    }

    pub(crate) fn record(&mut self, widget: WidgetId, attr: Attr, verdict: bool) {
        self.verdicts.insert((widget, attr), verdict);
    }
}
