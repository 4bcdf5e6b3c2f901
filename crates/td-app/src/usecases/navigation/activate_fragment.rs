//! Fragment activation: swap a region's markup and re-run its scripts.
//!
//! Markup inserted as `innerHTML` never executes its `<script>` elements, so
//! each one is recreated through the document port. Shared by sidebar
//! navigation and the wizard.

use std::rc::Rc;

use td_core::fragment::collect_scripts;
use td_core::ports::{DocumentPort, DomError, Region};
use tracing::{debug, info_span, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivationReport {
    pub executed: usize,
    pub failed: usize,
}

pub struct ActivateFragment {
    document: Rc<dyn DocumentPort>,
}

impl ActivateFragment {
    pub fn new(document: Rc<dyn DocumentPort>) -> Self {
        Self { document }
    }

    /// Replace `region` with `markup`, then activate its scripts in
    /// document order. A failing script is counted and skipped; a missing
    /// region fails the whole call before anything is touched.
    pub fn execute(&self, region: Region, markup: &str) -> Result<ActivationReport, DomError> {
        let _span = info_span!("usecase.activate_fragment.execute", region = ?region).entered();

        self.document.replace_region(region, markup)?;

        let mut report = ActivationReport::default();
        for (position, script) in collect_scripts(markup).iter().enumerate() {
            match self.document.run_script(script) {
                Ok(handle) => {
                    report.executed += 1;
                    if !script.is_external() {
                        self.document.remove_script(handle);
                    }
                }
                Err(err) => {
                    report.failed += 1;
                    warn!(position, src = ?script.src, error = %err, "script activation failed");
                }
            }
        }

        debug!(executed = report.executed, failed = report.failed, "fragment activated");
        Ok(report)
    }
}
