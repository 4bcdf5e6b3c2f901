//! Content swap handler port
//!
//! Navigation calls this after new content was activated in place. Use
//! cases that live inside the swapped content (the registration wizard)
//! implement it to set themselves up again, so navigation never depends on
//! them directly.

use async_trait::async_trait;
use url::Url;

#[async_trait(?Send)]
pub trait ContentSwapHandler {
    /// Called after the content region was replaced, its scripts activated
    /// and history updated for `url`.
    async fn on_content_swapped(&self, url: &Url);
}
