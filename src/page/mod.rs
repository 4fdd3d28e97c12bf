//! Presentation capabilities the account actions need from the page

pub mod dom;

use async_trait::async_trait;

use crate::models::UserId;

pub use dom::{DomPage, GlooClock};

/// Form inputs read by the actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Username,
    Password,
    Email,
    Password1,
    Password2,
}

impl Field {
    pub fn element_id(&self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::Password => "password",
            Field::Email => "email",
            Field::Password1 => "password1",
            Field::Password2 => "password2",
        }
    }
}

/// Inline message areas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusTarget {
    Login,
    Register,
}

impl StatusTarget {
    pub fn element_id(&self) -> &'static str {
        match self {
            StatusTarget::Login => "login-msg",
            StatusTarget::Register => "register-msg",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusStyle {
    Neutral,
    Success,
    Error,
}

/// What the account actions may do to the page
pub trait Page {
    /// Current value of an input, None when the element is missing
    fn read_field(&self, field: Field) -> Option<String>;

    fn set_status(&self, target: StatusTarget, text: &str, style: StatusStyle);

    /// Toggle the login submit control between busy and idle
    fn set_busy(&self, busy: bool);

    /// Returns false when no row exists for the user
    fn remove_user_row(&self, id: &UserId) -> bool;

    /// Blocking modal message
    fn alert(&self, message: &str);

    fn navigate(&self, route: &str);
}

#[async_trait(?Send)]
pub trait Clock {
    async fn sleep(&self, millis: u32);
}
