use thiserror::Error;

use crate::fragment::ScriptSpec;

/// A replaceable region of the live page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// The main content container swapped by sidebar navigation.
    Content,
    /// The registration wizard container.
    Wizard,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("region {0:?} is not present in the document")]
    RegionMissing(Region),
    #[error("script activation failed: {0}")]
    Script(String),
    #[error("dom operation failed: {0}")]
    Operation(String),
}

/// Identifies a script element appended by [`DocumentPort::run_script`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScriptHandle(pub u64);

pub trait DocumentPort {
    /// Replace the markup inside `region`.
    fn replace_region(&self, region: Region, html: &str) -> Result<(), DomError>;

    /// Create a fresh script element from `script` and append it to the
    /// document so the browser executes it.
    fn run_script(&self, script: &ScriptSpec) -> Result<ScriptHandle, DomError>;

    /// Detach a previously appended script element.
    fn remove_script(&self, handle: ScriptHandle);

    fn set_title(&self, title: &str);

    /// Insert markup as the first child of `region`.
    fn prepend_to_region(&self, region: Region, html: &str) -> Result<(), DomError>;

    fn has_body_class(&self, class: &str) -> bool;

    fn set_body_class(&self, class: &str, present: bool);
}
