use url::Url;

use crate::navigation::HistoryEntry;

pub trait BrowserPort {
    fn current_url(&self) -> Url;

    /// Full page load. The current page is gone afterwards.
    fn hard_navigate(&self, url: &str);

    fn push_history(&self, entry: &HistoryEntry);
}
