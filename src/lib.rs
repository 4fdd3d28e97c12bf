use wasm_bindgen::prelude::*;

pub mod actions;
pub mod api;
pub mod config;
pub mod messages;
pub mod models;
pub mod page;
pub mod toast;

use actions::{AccountActions, ActionError};
use api::ApiClient;
use config::ClientConfig;
use models::UserId;
use page::{DomPage, GlooClock};
use toast::{DomToaster, Notifier, Toast, ToastKind};

/// WASM entry point - called when the WASM module loads
#[wasm_bindgen(start)]
pub fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    let config = ClientConfig::from_env();
    _ = console_log::init_with_level(config.log_level);

    toast::install_styles();

    log::info!("Account actions ready (api: {:?})", config.api_url);
}

type BrowserActions = AccountActions<ApiClient, DomPage, GlooClock>;

fn browser_actions() -> Result<BrowserActions, JsValue> {
    let config = ClientConfig::from_env();
    let page = DomPage::new().ok_or_else(|| JsValue::from_str("no browser document"))?;
    Ok(AccountActions::new(
        ApiClient::new(&config),
        page,
        GlooClock,
        config,
    ))
}

fn report(action: &str, result: Result<(), ActionError>) {
    match result {
        Ok(()) => log::debug!("{} done", action),
        Err(ActionError::Validation(reason)) => log::debug!("{} not sent: {}", action, reason),
        Err(e) => log::warn!("{} failed: {}", action, e),
    }
}

/// Submit the login form
#[wasm_bindgen(js_name = loginUser)]
pub async fn login_user() -> Result<(), JsValue> {
    let actions = browser_actions()?;
    report("Login", actions.login().await);
    Ok(())
}

/// Submit the registration form
#[wasm_bindgen(js_name = registerUser)]
pub async fn register_user() -> Result<(), JsValue> {
    let actions = browser_actions()?;
    report("Registration", actions.register().await);
    Ok(())
}

#[wasm_bindgen(js_name = logoutUser)]
pub async fn logout_user() -> Result<(), JsValue> {
    let actions = browser_actions()?;
    report("Logout", actions.logout().await);
    Ok(())
}

/// Delete a user from the admin table; `user_id` may be a number or a string
#[wasm_bindgen(js_name = deleteUser)]
pub async fn delete_user(user_id: JsValue) -> Result<(), JsValue> {
    let id = UserId::from_text_or_number(user_id.as_string(), user_id.as_f64())
        .ok_or_else(|| JsValue::from_str("user id must be a string or number"))?;

    let actions = browser_actions()?;
    report("Delete user", actions.delete_user(&id).await);
    Ok(())
}

/// Show a toast; `kind` is "success" (default), "error" or "info"
#[wasm_bindgen(js_name = showToast)]
pub fn show_toast(message: &str, kind: Option<String>) {
    let kind = kind
        .as_deref()
        .and_then(ToastKind::from_name)
        .unwrap_or_default();
    DomToaster.notify(Toast::new(message, kind));
}
