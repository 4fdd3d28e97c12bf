//! Toast notifications stacked in `#toast-container`

use gloo_timers::callback::Timeout;
use leptos::html;

const CONTAINER_ID: &str = "toast-container";
const STYLE_ELEMENT_ID: &str = "toast-styles";

/// How long a toast stays fully visible
pub const VISIBLE_MS: u32 = 3000;
/// Fade-out time before the element is removed
pub const FADE_MS: u32 = 500;

const BASE_CLASSES: &str = "rounded-lg shadow-lg px-4 py-3";
const ENTER_CLASS: &str = "animate-slide-in-right";
const LEAVE_CLASSES: [&str; 2] = ["opacity-0", "translate-x-5"];

const SLIDE_IN_CSS: &str = r#"
@keyframes slide-in-right {
  0% { transform: translateX(100%); opacity: 0; }
  100% { transform: translateX(0); opacity: 1; }
}
.animate-slide-in-right {
  animation: slide-in-right 0.4s ease-out forwards;
}
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastKind {
    #[default]
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "success" => Some(ToastKind::Success),
            "error" => Some(ToastKind::Error),
            "info" => Some(ToastKind::Info),
            _ => None,
        }
    }

    pub fn color_classes(&self) -> &'static str {
        match self {
            ToastKind::Success => "bg-green-600 text-white",
            ToastKind::Error => "bg-red-600 text-white",
            ToastKind::Info => "bg-blue-600 text-white",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

impl Toast {
    pub fn new(message: impl Into<String>, kind: ToastKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    pub fn class_name(&self) -> String {
        format!("{} {} {}", BASE_CLASSES, self.kind.color_classes(), ENTER_CLASS)
    }
}

/// Somewhere toasts can be shown
pub trait Notifier {
    fn notify(&self, toast: Toast);
}

/// Appends toasts to the page container and expires them with timers
#[derive(Debug, Clone, Copy, Default)]
pub struct DomToaster;

impl Notifier for DomToaster {
    fn notify(&self, toast: Toast) {
        let Some(container) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONTAINER_ID))
        else {
            log::debug!("No #{} on this page, dropping toast", CONTAINER_ID);
            return;
        };

        let element = html::div()
            .classes(toast.class_name())
            .child(toast.message.clone());
        let node: web_sys::Element = (*element).clone().into();

        if let Err(e) = container.append_child(&node) {
            log::warn!("Could not show toast: {:?}", e);
            return;
        }

        Timeout::new(VISIBLE_MS, move || {
            let classes = node.class_list();
            for class in LEAVE_CLASSES {
                let _ = classes.add_1(class);
            }
            Timeout::new(FADE_MS, move || node.remove()).forget();
        })
        .forget();
    }
}

/// Add the slide-in keyframes to `<head>` once
pub fn install_styles() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if document.get_element_by_id(STYLE_ELEMENT_ID).is_some() {
        return;
    }
    let (Some(head), Ok(style)) = (document.head(), document.create_element("style")) else {
        return;
    };

    style.set_id(STYLE_ELEMENT_ID);
    style.set_text_content(Some(SLIDE_IN_CSS));
    if let Err(e) = head.append_child(&style) {
        log::warn!("Could not install toast styles: {:?}", e);
    }
}
