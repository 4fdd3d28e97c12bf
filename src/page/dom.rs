//! Page adapter over the server-rendered account templates

use async_trait::async_trait;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlButtonElement, HtmlInputElement, Window};

use super::{Clock, Field, Page, StatusStyle, StatusTarget};
use crate::messages::{LOGIN_BUTTON_BUSY, LOGIN_BUTTON_IDLE};
use crate::models::UserId;

const LOGIN_BUTTON_ID: &str = "login-btn";
const SPINNER_ID: &str = "loading-spinner";
const LOGIN_LABEL_ID: &str = "login-text";

const STATUS_BASE_CLASSES: &str = "text-sm text-center mt-3";
const HIDDEN_CLASS: &str = "hidden";

pub fn status_class_name(style: StatusStyle) -> String {
    match style {
        StatusStyle::Neutral => STATUS_BASE_CLASSES.to_string(),
        StatusStyle::Success => format!("{} text-green-600", STATUS_BASE_CLASSES),
        StatusStyle::Error => format!("{} text-red-600", STATUS_BASE_CLASSES),
    }
}

/// `Page` backed by the live document
#[derive(Clone)]
pub struct DomPage {
    window: Window,
    document: Document,
}

impl DomPage {
    /// None outside a browser window
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }
}

impl Page for DomPage {
    fn read_field(&self, field: Field) -> Option<String> {
        self.document
            .get_element_by_id(field.element_id())
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value())
    }

    fn set_status(&self, target: StatusTarget, text: &str, style: StatusStyle) {
        match self.document.get_element_by_id(target.element_id()) {
            Some(el) => {
                el.set_text_content(Some(text));
                el.set_class_name(&status_class_name(style));
            }
            None => log::warn!("#{} missing, dropping status: {}", target.element_id(), text),
        }
    }

    fn set_busy(&self, busy: bool) {
        if let Some(button) = self
            .document
            .get_element_by_id(LOGIN_BUTTON_ID)
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
        {
            button.set_disabled(busy);
        }

        if let Some(spinner) = self.document.get_element_by_id(SPINNER_ID) {
            let _ = spinner.class_list().toggle_with_force(HIDDEN_CLASS, !busy);
        }

        if let Some(label) = self.document.get_element_by_id(LOGIN_LABEL_ID) {
            let text = if busy { LOGIN_BUTTON_BUSY } else { LOGIN_BUTTON_IDLE };
            label.set_text_content(Some(text));
        }
    }

    fn remove_user_row(&self, id: &UserId) -> bool {
        match self.document.get_element_by_id(&id.row_element_id()) {
            Some(row) => {
                row.remove();
                true
            }
            None => false,
        }
    }

    fn alert(&self, message: &str) {
        let _ = self.window.alert_with_message(message);
    }

    fn navigate(&self, route: &str) {
        if let Err(e) = self.window.location().set_href(route) {
            log::error!("Navigation to {} failed: {:?}", route, e);
        }
    }
}

/// `Clock` backed by browser timers
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooClock;

#[async_trait(?Send)]
impl Clock for GlooClock {
    async fn sleep(&self, millis: u32) {
        gloo_timers::future::TimeoutFuture::new(millis).await;
    }
}
