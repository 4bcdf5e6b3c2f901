mod support;

use td_app::usecases::WizardError;
use td_core::ports::{HttpMethod, KeyValueStorePort, RequestBody};
use td_core::wizard::{StepLinkState, WizardPhase, NETWORK_ERROR_MESSAGE};
use td_core::{FieldKind, FormField, WizardStep};

use support::{FakePage, Harness};

const REGISTER: &str = "/customers/register/";
const DUPLICATE_CHECK: &str = "/api/customers/check-duplicate/";
const DRAFT_KEY: &str = "customerRegistrationData";
const STEP_KEY: &str = "customerRegCurrentStep";

fn step(n: u32) -> WizardStep {
    WizardStep::new(n).unwrap()
}

fn identity_fields(name: &str, phone: &str) -> Vec<FormField> {
    vec![
        FormField::text(0, "csrfmiddlewaretoken", "tok"),
        FormField::text(1, "step", "1"),
        FormField::text(2, "full_name", name),
        FormField::text(3, "phone", phone),
        FormField {
            index: 4,
            name: "customer_type".to_string(),
            kind: FieldKind::Select,
            value: "personal".to_string(),
            checked: false,
        },
    ]
}

fn intent_fields(checked: Option<&str>) -> Vec<FormField> {
    let mut fields = vec![FormField::text(0, "step", "2")];
    for (offset, value) in ["sale", "repair"].into_iter().enumerate() {
        fields.push(FormField::checkable(
            offset + 1,
            FieldKind::Radio,
            "intent",
            value,
            checked == Some(value),
        ));
    }
    fields
}

fn step_markup(n: u32) -> String {
    format!(
        r#"<form><input type="hidden" name="step" value="{n}"><p>step {n}</p><script>initStep({n})</script></form>"#
    )
}

fn step_json(n: u32) -> String {
    serde_json::json!({ "form_html": step_markup(n) }).to_string()
}

#[tokio::test]
async fn initialize_requires_the_wizard_container() {
    let harness = Harness::new(FakePage::at("/dashboard/"));
    let dashboard = harness.dashboard();

    let result = dashboard.wizard.initialize().await;

    assert!(matches!(result, Err(WizardError::NotPresent)));
}

#[tokio::test]
async fn initialize_syncs_links_gates_and_restores_the_draft() {
    let harness = Harness::new(FakePage::wizard_at(2, 3));
    harness.page.set_fields(intent_fields(None));
    harness
        .page
        .buttons
        .borrow_mut()
        .insert("nextStepBtn".to_string(), false);
    harness
        .store
        .set(DRAFT_KEY, r#"{"intent":"repair"}"#)
        .await
        .unwrap();
    let dashboard = harness.dashboard();

    let state = dashboard.wizard.initialize().await.unwrap();

    assert_eq!(state.current, step(2));
    let states = harness.page.link_states.borrow().clone();
    assert_eq!(states[&0], StepLinkState { disabled: false, active: false });
    assert_eq!(states[&1], StepLinkState { disabled: false, active: true });
    assert_eq!(states[&2], StepLinkState { disabled: true, active: false });

    // The restored radio opens the gate.
    assert!(harness.page.field("intent").is_some());
    let repair = harness
        .page
        .fields
        .borrow()
        .iter()
        .find(|f| f.value == "repair")
        .cloned()
        .unwrap();
    assert!(repair.checked);
    assert_eq!(harness.page.buttons.borrow()["nextStepBtn"], false);
}

#[tokio::test]
async fn gate_stays_closed_until_a_radio_is_checked() {
    let harness = Harness::new(FakePage::wizard_at(2, 3));
    harness.page.set_fields(intent_fields(None));
    harness
        .page
        .buttons
        .borrow_mut()
        .insert("nextStepBtn".to_string(), false);
    let dashboard = harness.dashboard();

    dashboard.wizard.initialize().await.unwrap();
    assert_eq!(harness.page.buttons.borrow()["nextStepBtn"], true);

    harness.page.set_fields(intent_fields(Some("sale")));
    dashboard.wizard.on_input().await;

    assert_eq!(harness.page.buttons.borrow()["nextStepBtn"], false);
    let saved = harness.store.get(DRAFT_KEY).await.unwrap().unwrap();
    assert_eq!(saved, r#"{"intent":"sale"}"#);
}

#[tokio::test]
async fn malformed_draft_is_discarded() {
    let harness = Harness::new(FakePage::wizard_at(1, 3));
    harness.page.set_fields(identity_fields("", ""));
    harness.store.set(DRAFT_KEY, "{not json").await.unwrap();
    let dashboard = harness.dashboard();

    dashboard.wizard.initialize().await.unwrap();

    assert_eq!(harness.store.get(DRAFT_KEY).await.unwrap(), None);
    assert_eq!(harness.page.field("full_name").unwrap().value, "");
}

#[tokio::test]
async fn links_to_later_steps_are_ignored() {
    let harness = Harness::new(FakePage::wizard_at(2, 3));
    let dashboard = harness.dashboard();

    let state = dashboard
        .wizard
        .on_step_link("/customers/register/?step=3")
        .await
        .unwrap();

    assert_eq!(state.current, step(2));
    assert_eq!(state.phase, WizardPhase::Idle);
    assert!(harness.http.requests.borrow().is_empty());
}

#[tokio::test]
async fn going_back_loads_the_step_and_rebinds_after_scripts() {
    let harness = Harness::new(FakePage::wizard_at(3, 3));
    harness.http.respond(HttpMethod::Get, REGISTER, 200, &step_json(1));
    let dashboard = harness.dashboard();

    let state = dashboard
        .wizard
        .on_step_link("/customers/register/?step=1")
        .await
        .unwrap();

    assert_eq!(state.current, step(1));
    assert_eq!(state.phase, WizardPhase::Idle);

    let request = &harness.http.requests_to(HttpMethod::Get, REGISTER)[0];
    assert_eq!(request.url.query(), Some("step=1&load_step=1"));
    assert_eq!(request.header_value("X-Requested-With"), Some("XMLHttpRequest"));

    let journal = harness.page.journal();
    assert_eq!(
        journal,
        vec![
            "replace:Wizard".to_string(),
            "script:initStep(1)".to_string(),
            "rebind".to_string(),
        ]
    );
    assert_eq!(harness.page.step_value.borrow().as_deref(), Some("1"));
    assert_eq!(harness.store.get(STEP_KEY).await.unwrap().as_deref(), Some("1"));
    assert_eq!(harness.page.link_states.borrow()[&2].disabled, true);
}

#[tokio::test]
async fn reloaded_step_fills_blank_fields_from_the_draft() {
    let harness = Harness::new(FakePage::wizard_at(2, 3));
    harness
        .store
        .set(DRAFT_KEY, r#"{"full_name":"Ada","phone":"0999"}"#)
        .await
        .unwrap();
    harness.http.respond(HttpMethod::Get, REGISTER, 200, &step_json(1));
    harness.page.set_fields(identity_fields("", "0700"));
    let dashboard = harness.dashboard();

    dashboard.wizard.load_step(step(1)).await.unwrap();

    assert_eq!(harness.page.field("full_name").unwrap().value, "Ada");
    assert_eq!(harness.page.field("phone").unwrap().value, "0700");
}

#[tokio::test]
async fn failed_step_load_leaves_the_form_alone() {
    let harness = Harness::new(FakePage::wizard_at(2, 3));
    harness.http.respond(HttpMethod::Get, REGISTER, 200, r#"{"success":true}"#);
    let dashboard = harness.dashboard();

    let state = dashboard.wizard.load_step(step(1)).await.unwrap();

    assert_eq!(state.current, step(2));
    assert_eq!(state.phase, WizardPhase::Idle);
    assert!(harness.page.journal().is_empty());
}

#[tokio::test]
async fn duplicate_customer_opens_the_modal_instead_of_posting() {
    let harness = Harness::new(FakePage::wizard_at(1, 3));
    harness.page.set_fields(identity_fields(" Ada Lovelace ", "0700 111"));
    harness.http.respond(
        HttpMethod::Get,
        DUPLICATE_CHECK,
        200,
        r#"{"exists":true,"customer":{"id":42,"full_name":"Ada Lovelace","phone":"0700111"}}"#,
    );
    let dashboard = harness.dashboard();

    let state = dashboard.wizard.submit().await.unwrap().unwrap();

    assert_eq!(state.phase, WizardPhase::Idle);
    assert!(harness.http.requests_to(HttpMethod::Post, REGISTER).is_empty());

    let lookup = &harness.http.requests_to(HttpMethod::Get, DUPLICATE_CHECK)[0];
    let pairs: Vec<(String, String)> = lookup.url.query_pairs().into_owned().collect();
    assert_eq!(pairs[0], ("full_name".to_string(), "Ada Lovelace".to_string()));
    assert_eq!(pairs[1], ("phone".to_string(), "0700 111".to_string()));
    assert_eq!(pairs[2], ("customer_type".to_string(), "personal".to_string()));
    assert_eq!(lookup.header_value("Accept"), Some("application/json"));

    let modals = harness.page.modals.borrow();
    assert_eq!(modals.len(), 1);
    assert_eq!(modals[0].field("existingCustomerName"), Some("Ada Lovelace"));
    assert_eq!(modals[0].view_href, "/customers/42/");
}

#[tokio::test]
async fn unreachable_duplicate_check_does_not_block_submission() {
    let harness = Harness::new(FakePage::wizard_at(1, 3));
    harness.page.set_fields(identity_fields("Ada", "0700"));
    harness.http.fail(HttpMethod::Get, DUPLICATE_CHECK);
    harness.http.respond(
        HttpMethod::Post,
        REGISTER,
        200,
        &serde_json::json!({ "success": true, "form_html": step_markup(2) }).to_string(),
    );
    let dashboard = harness.dashboard();

    let state = dashboard.wizard.submit().await.unwrap().unwrap();

    assert_eq!(state.current, step(2));
    assert_eq!(harness.http.requests_to(HttpMethod::Post, REGISTER).len(), 1);
    assert!(harness.page.modals.borrow().is_empty());
}

#[tokio::test]
async fn blank_identity_skips_the_duplicate_check() {
    let harness = Harness::new(FakePage::wizard_at(1, 3));
    harness.page.set_fields(identity_fields("Ada", "  "));
    harness.http.respond(HttpMethod::Post, REGISTER, 200, r#"{"success":true}"#);
    let dashboard = harness.dashboard();

    dashboard.wizard.submit().await.unwrap();

    assert!(harness.http.requests_to(HttpMethod::Get, DUPLICATE_CHECK).is_empty());
    assert_eq!(harness.http.requests_to(HttpMethod::Post, REGISTER).len(), 1);
}

#[tokio::test]
async fn submission_posts_successful_controls_as_multipart() {
    let harness = Harness::new(FakePage::wizard_at(2, 3));
    *harness.page.location.borrow_mut() = support::page_url("/customers/register/?step=2#top");
    harness.page.set_fields(intent_fields(Some("repair")));
    harness.http.respond(HttpMethod::Post, REGISTER, 200, r#"{"success":true}"#);
    let dashboard = harness.dashboard();

    dashboard.wizard.submit().await.unwrap();

    let post = &harness.http.requests_to(HttpMethod::Post, REGISTER)[0];
    assert_eq!(post.url.query(), None);
    assert_eq!(post.url.fragment(), None);
    assert_eq!(post.header_value("X-Requested-With"), Some("XMLHttpRequest"));
    assert_eq!(
        post.body,
        Some(RequestBody::Multipart(vec![
            ("step".to_string(), "2".to_string()),
            ("intent".to_string(), "repair".to_string()),
        ]))
    );
}

#[tokio::test]
async fn advance_without_step_field_moves_to_the_next_step() {
    let harness = Harness::new(FakePage::wizard_at(2, 3));
    harness.http.respond(
        HttpMethod::Post,
        REGISTER,
        200,
        r#"{"success":true,"form_html":"<form><p>service</p></form>"}"#,
    );
    let dashboard = harness.dashboard();

    let state = dashboard.wizard.submit().await.unwrap().unwrap();

    assert_eq!(state.current, step(3));
    assert_eq!(harness.store.get(STEP_KEY).await.unwrap().as_deref(), Some("3"));
    assert_eq!(harness.page.rebinds.get(), 1);
}

#[tokio::test]
async fn server_step_field_wins_over_increment() {
    let harness = Harness::new(FakePage::wizard_at(2, 4));
    harness.http.respond(
        HttpMethod::Post,
        REGISTER,
        200,
        &serde_json::json!({ "success": true, "form_html": step_markup(4) }).to_string(),
    );
    let dashboard = harness.dashboard();

    let state = dashboard.wizard.submit().await.unwrap().unwrap();

    assert_eq!(state.current, step(4));
    assert_eq!(harness.page.link_states.borrow()[&3].active, true);
}

#[tokio::test]
async fn validation_errors_mark_fields_and_scroll_to_the_first() {
    let harness = Harness::new(FakePage::wizard_at(2, 3));
    harness.page.set_fields(vec![
        FormField::text(0, "step", "2"),
        FormField::text(1, "email", "nope"),
        FormField::text(2, "phone", ""),
    ]);
    harness.http.respond(
        HttpMethod::Post,
        REGISTER,
        200,
        r#"{"success":false,"message":"Please fix the errors","message_type":"error",
            "errors":{"phone":["required"],"email":"invalid","ghost":["x"]}}"#,
    );
    let dashboard = harness.dashboard();

    let state = dashboard.wizard.submit().await.unwrap().unwrap();

    assert_eq!(state.current, step(2));
    assert_eq!(state.phase, WizardPhase::Idle);

    let journal = harness.page.journal();
    assert_eq!(journal[0], "notice:Please fix the errors");
    assert!(journal.contains(&"invalid:email".to_string()));
    assert!(journal.contains(&"invalid:phone".to_string()));
    assert_eq!(journal.last().unwrap(), "scroll:email");
    assert!(harness.page.notices.borrow()[0].contains("alert-error"));
}

#[tokio::test]
async fn step_notice_is_shown_after_the_new_markup() {
    let harness = Harness::new(FakePage::wizard_at(1, 3));
    harness.http.respond(
        HttpMethod::Post,
        REGISTER,
        200,
        &serde_json::json!({
            "success": true,
            "form_html": step_markup(2),
            "message": "Step saved",
            "message_type": "success",
        })
        .to_string(),
    );
    let dashboard = harness.dashboard();

    let state = dashboard.wizard.submit().await.unwrap().unwrap();

    assert_eq!(state.current, step(2));
    assert_eq!(
        harness.page.journal(),
        vec![
            "replace:Wizard".to_string(),
            "script:initStep(2)".to_string(),
            "rebind".to_string(),
            "notice:Step saved".to_string(),
        ]
    );
}

#[tokio::test]
async fn rerendered_step_keeps_its_notice() {
    let harness = Harness::new(FakePage::wizard_at(2, 3));
    harness.http.respond(
        HttpMethod::Post,
        REGISTER,
        200,
        &serde_json::json!({
            "success": false,
            "form_html": step_markup(2),
            "message": "Please fix the errors",
            "message_type": "error",
        })
        .to_string(),
    );
    let dashboard = harness.dashboard();

    dashboard.wizard.submit().await.unwrap();

    let journal = harness.page.journal();
    let replaced = journal.iter().position(|e| e == "replace:Wizard").unwrap();
    let noticed = journal
        .iter()
        .position(|e| e == "notice:Please fix the errors")
        .unwrap();
    assert!(replaced < noticed);
}

#[tokio::test]
async fn rejected_step_with_markup_is_rerendered() {
    let harness = Harness::new(FakePage::wizard_at(2, 3));
    harness.http.respond(
        HttpMethod::Post,
        REGISTER,
        200,
        &serde_json::json!({ "success": false, "form_html": step_markup(2) }).to_string(),
    );
    let dashboard = harness.dashboard();

    let state = dashboard.wizard.submit().await.unwrap().unwrap();

    assert_eq!(state.current, step(2));
    assert!(harness.page.wizard_html.borrow().contains("step 2"));
    assert_eq!(harness.page.rebinds.get(), 1);
}

#[tokio::test]
async fn terminal_redirect_clears_the_draft_and_leaves() {
    let harness = Harness::new(FakePage::wizard_at(3, 3));
    harness.store.set(DRAFT_KEY, r#"{"full_name":"Ada"}"#).await.unwrap();
    harness.http.respond(
        HttpMethod::Post,
        REGISTER,
        200,
        r#"{"success":true,"redirect_url":"/customers/42/","message":"Customer created","message_type":"success"}"#,
    );
    let dashboard = harness.dashboard();

    let state = dashboard.wizard.submit().await.unwrap().unwrap();

    assert_eq!(state.phase, WizardPhase::Departed);
    assert!(dashboard.wizard.has_departed().await);
    assert_eq!(harness.store.get(DRAFT_KEY).await.unwrap(), None);
    assert_eq!(
        harness.page.journal(),
        vec![
            "notice:Customer created".to_string(),
            "hard:/customers/42/".to_string(),
        ]
    );
}

#[tokio::test]
async fn redirect_without_success_keeps_the_draft() {
    let harness = Harness::new(FakePage::wizard_at(2, 3));
    harness.store.set(DRAFT_KEY, r#"{"full_name":"Ada"}"#).await.unwrap();
    harness.http.respond(
        HttpMethod::Post,
        REGISTER,
        200,
        r#"{"success":false,"redirect_url":"/login/"}"#,
    );
    let dashboard = harness.dashboard();

    dashboard.wizard.submit().await.unwrap();

    assert_eq!(*harness.page.hard_navigations.borrow(), vec!["/login/".to_string()]);
    assert!(harness.store.get(DRAFT_KEY).await.unwrap().is_some());
}

#[tokio::test]
async fn network_failure_shows_the_generic_error() {
    let harness = Harness::new(FakePage::wizard_at(2, 3));
    harness.http.respond(HttpMethod::Post, REGISTER, 502, "Bad Gateway");
    let dashboard = harness.dashboard();

    let state = dashboard.wizard.submit().await.unwrap().unwrap();

    assert_eq!(state.phase, WizardPhase::Idle);
    assert_eq!(state.current, step(2));
    assert_eq!(
        harness.page.journal(),
        vec![format!("notice:{NETWORK_ERROR_MESSAGE}")]
    );
}

#[tokio::test]
async fn non_json_answer_counts_as_network_failure() {
    let harness = Harness::new(FakePage::wizard_at(2, 3));
    harness.http.respond(HttpMethod::Post, REGISTER, 200, "<html>login</html>");
    let dashboard = harness.dashboard();

    dashboard.wizard.submit().await.unwrap();

    assert_eq!(harness.page.notices.borrow().len(), 1);
    assert!(harness.page.notices.borrow()[0].contains(NETWORK_ERROR_MESSAGE));
}

#[tokio::test]
async fn second_submit_while_in_flight_is_dropped() {
    let harness = Harness::new(FakePage::wizard_at(2, 3));
    harness.http.respond(HttpMethod::Post, REGISTER, 200, r#"{"success":true}"#);
    let dashboard = harness.dashboard();

    let (first, second) = tokio::join!(dashboard.wizard.submit(), dashboard.wizard.submit());

    assert!(first.unwrap().is_some());
    assert!(second.unwrap().is_none());
    assert_eq!(harness.http.requests_to(HttpMethod::Post, REGISTER).len(), 1);
}

#[tokio::test]
async fn missing_wizard_region_surfaces_as_dom_error() {
    let harness = Harness::new(FakePage::wizard_at(2, 3));
    harness.http.respond(HttpMethod::Get, REGISTER, 200, &step_json(1));
    let dashboard = harness.dashboard();
    harness.page.wizard_present.set(false);

    let result = dashboard.wizard.load_step(step(1)).await;

    assert!(matches!(result, Err(WizardError::Dom(_))));
    // Nothing was swapped, so the pointer stays where the page is.
    let state = dashboard.wizard.get_state().await;
    assert_eq!(state.phase, WizardPhase::Idle);
    assert_eq!(state.current, step(2));
    assert_eq!(harness.store.get(STEP_KEY).await.unwrap(), None);
}
