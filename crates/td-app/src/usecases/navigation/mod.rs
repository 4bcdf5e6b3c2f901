mod activate_fragment;
mod controller;
mod fetch_fragment;

pub use activate_fragment::{ActivateFragment, ActivationReport};
pub use controller::{NavigationController, NavigationOutcome};
pub use fetch_fragment::{NavigationError, FetchFragment, FetchOutcome};
