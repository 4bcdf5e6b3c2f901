//! # Application dependencies
//!
//! Parameter grouping for [`Dashboard`](crate::Dashboard) construction.
//! Every port is required; there are no defaults and no hidden logic.

use std::rc::Rc;

use td_core::ports::*;
use td_core::DashboardConfig;

pub struct AppDeps {
    // Page surfaces
    pub document: Rc<dyn DocumentPort>,
    pub sidebar: Rc<dyn SidebarPort>,
    pub wizard_view: Rc<dyn WizardViewPort>,
    pub binder: Rc<dyn HandlerBinderPort>,
    pub feedback: Rc<dyn FeedbackPort>,
    pub widgets: Rc<dyn WidgetPort>,

    // Browser services
    pub browser: Rc<dyn BrowserPort>,
    pub http: Rc<dyn HttpPort>,
    pub storage: Rc<dyn KeyValueStorePort>,
    pub sleeper: Rc<dyn SleepPort>,

    pub config: DashboardConfig,
}
