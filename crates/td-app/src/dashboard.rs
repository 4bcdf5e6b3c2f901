//! The assembled dashboard: every use case wired to its ports.

use std::rc::Rc;

use td_core::ports::ContentSwapHandler;
use td_core::DashboardConfig;

use crate::deps::AppDeps;
use crate::usecases::wizard::{CheckDuplicateCustomer, StepNavigation};
use crate::usecases::{
    ActionPopup, ActivateFragment, CustomerSearch, DraftPersistence, FetchFragment,
    NavigationController, NotificationRefresher, ToggleTheme, WizardOrchestrator,
};

pub struct Dashboard {
    pub navigation: Rc<NavigationController>,
    pub wizard: Rc<WizardOrchestrator>,
    pub draft: Rc<DraftPersistence>,
    pub notifications: Rc<NotificationRefresher>,
    pub search: Rc<CustomerSearch>,
    pub popup: Rc<ActionPopup>,
    pub theme: Rc<ToggleTheme>,
    pub config: DashboardConfig,
}

impl Dashboard {
    /// This constructor signature is the dependency manifest.
    pub fn new(deps: AppDeps) -> Self {
        let config = deps.config;
        let activate = Rc::new(ActivateFragment::new(deps.document.clone()));

        let draft = Rc::new(DraftPersistence::new(
            deps.storage.clone(),
            deps.wizard_view.clone(),
            config.storage.clone(),
            &config.wizard,
        ));

        let wizard = WizardOrchestrator::new(
            &config.wizard,
            activate.clone(),
            draft.clone(),
            StepNavigation::new(
                deps.wizard_view.clone(),
                deps.browser.clone(),
                config.wizard.forward_gates.clone(),
            ),
            CheckDuplicateCustomer::new(
                deps.http.clone(),
                deps.browser.clone(),
                config.endpoints.duplicate_check.clone(),
            ),
            deps.http.clone(),
            deps.browser.clone(),
            deps.wizard_view.clone(),
            deps.binder.clone(),
            deps.feedback.clone(),
        );

        let wizard = Rc::new(wizard);

        let navigation = NavigationController::new(
            FetchFragment::new(deps.http.clone(), config.selectors.clone()),
            activate,
            deps.browser.clone(),
            deps.document.clone(),
            deps.sidebar.clone(),
            vec![wizard.clone() as Rc<dyn ContentSwapHandler>],
        );

        let notifications = NotificationRefresher::new(
            deps.http.clone(),
            deps.browser.clone(),
            deps.widgets.clone(),
            deps.sleeper.clone(),
            config.endpoints.notifications.clone(),
            config.timing.notification_poll(),
        );

        let search = CustomerSearch::new(
            deps.http.clone(),
            deps.browser.clone(),
            deps.widgets.clone(),
            deps.sleeper.clone(),
            config.endpoints.customer_search.clone(),
            config.timing.search_debounce(),
            config.timing.search_min_chars,
        );

        let popup = ActionPopup::new(
            deps.feedback.clone(),
            deps.sleeper.clone(),
            config.timing.popup_dismiss(),
        );

        let theme = ToggleTheme::new(
            deps.storage.clone(),
            deps.document.clone(),
            config.storage.theme_mode.clone(),
        );

        Self {
            navigation: Rc::new(navigation),
            wizard,
            draft,
            notifications: Rc::new(notifications),
            search: Rc::new(search),
            popup: Rc::new(popup),
            theme: Rc::new(theme),
            config,
        }
    }
}
