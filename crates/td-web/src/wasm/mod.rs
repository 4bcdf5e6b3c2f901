//! Browser entry point: adapters, listeners and boot sequence.

mod binder;
mod events;
mod http;
mod logging;
mod page;
mod storage;
mod timer;

use std::rc::Rc;

use td_app::{AppDeps, Dashboard};
use td_core::ports::{BrowserPort, WizardViewPort};
use tracing::{error, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::boot_config::{config_from_attribute, CONFIG_ATTRIBUTE};

use self::binder::PageBinder;
use self::events::EventContext;
use self::http::FetchHttpClient;
use self::page::WebPage;
use self::storage::LocalStorageStore;
use self::timer::GlooSleeper;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    logging::init();

    let Some(window) = web_sys::window() else {
        error!("no window, trackdash not started");
        return;
    };
    let Some(document) = window.document() else {
        error!("no document, trackdash not started");
        return;
    };

    let raw_config = document
        .body()
        .and_then(|body| body.get_attribute(CONFIG_ATTRIBUTE));
    let config = config_from_attribute(raw_config.as_deref());

    let Some(page) = WebPage::new(window.clone(), document.clone(), config.selectors.clone())
    else {
        error!("page location unreadable, trackdash not started");
        return;
    };
    let page = Rc::new(page);
    let binder = Rc::new(PageBinder::new(window.clone(), document.clone()));

    let dashboard = Rc::new(Dashboard::new(AppDeps {
        document: page.clone(),
        sidebar: page.clone(),
        wizard_view: page.clone(),
        binder: binder.clone(),
        feedback: page.clone(),
        widgets: page.clone(),
        browser: page.clone(),
        http: Rc::new(FetchHttpClient),
        storage: Rc::new(LocalStorageStore::new(&window)),
        sleeper: Rc::new(GlooSleeper),
        config,
    }));

    events::install(
        &window,
        EventContext {
            dashboard: dashboard.clone(),
            binder: binder.clone(),
            document: document.clone(),
        },
    );

    spawn_local(boot(dashboard, page, binder));
}

async fn boot(dashboard: Rc<Dashboard>, page: Rc<WebPage>, binder: Rc<PageBinder>) {
    let mode = dashboard.theme.apply_stored().await;
    events::sync_mode_toggles(page.document(), mode.is_dark());

    dashboard.navigation.mark_active(&page.current_url());

    if page.is_present() {
        binder.apply_customer_type();
        match dashboard.wizard.initialize().await {
            Ok(state) => info!(step = %state.current, "registration wizard ready"),
            Err(err) => warn!(error = %err, "registration wizard not initialized"),
        }
    }

    if let Some((class_name, text)) = page.last_alert() {
        let popup = dashboard.popup.clone();
        spawn_local(async move { popup.upgrade_alert(&class_name, &text).await });
    }

    info!("trackdash started");
    dashboard.notifications.run().await;
}
