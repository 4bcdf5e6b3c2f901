//! Port interfaces for the application layer
//!
//! Ports define the contract between the use cases and the platform: the
//! live DOM, the network, browser history and storage. The browser build
//! implements them over `web-sys`; native adapters and test fakes
//! implement them for everything else.
//!
//! The engine is single-threaded, so ports are not `Send` and async ports
//! use `#[async_trait(?Send)]`. Share them as `Rc<dyn Port>`.

mod binder;
mod browser;
mod content_swap_handler;
mod document;
mod feedback;
pub mod http;
mod sidebar;
mod storage;
mod timer;
mod widgets;
mod wizard_view;

pub use binder::HandlerBinderPort;
pub use browser::BrowserPort;
pub use content_swap_handler::ContentSwapHandler;
pub use document::{DocumentPort, DomError, Region, ScriptHandle};
pub use feedback::FeedbackPort;
pub use http::{HttpError, HttpMethod, HttpPort, HttpRequest, HttpResponse, RequestBody};
pub use sidebar::SidebarPort;
pub use storage::{KeyValueStorePort, StorageError};
pub use timer::SleepPort;
pub use widgets::WidgetPort;
pub use wizard_view::WizardViewPort;
