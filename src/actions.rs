//! Login, registration, logout and user deletion handlers
//!
//! Every handler reports failures on the page itself and then returns them,
//! so the JS entry points only have to log.

use thiserror::Error;

use crate::api::{AccountsApi, ApiError};
use crate::config::ClientConfig;
use crate::messages::{
    LoginFailure, DELETE_USER_FAILED, LOGIN_FIELDS_REQUIRED, LOGIN_SUCCEEDED, NETWORK_ERROR,
    REGISTER_FAILED,
};
use crate::models::{Credentials, RegistrationPayload, UserId};
use crate::page::{Clock, Field, Page, StatusStyle, StatusTarget};

/// Time the login success message stays up before leaving the page
pub const LOGIN_REDIRECT_DELAY_MS: u32 = 800;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// Input rejected before any request was made
    #[error("Validation failed: {0}")]
    Validation(String),
    /// Server answered with `success: false`
    #[error("Rejected by server: {0}")]
    Rejected(String),
    #[error(transparent)]
    Transport(#[from] ApiError),
}

pub type Result<T> = std::result::Result<T, ActionError>;

/// The account page handlers, bound to one API, page and clock
pub struct AccountActions<A, P, C> {
    api: A,
    page: P,
    clock: C,
    config: ClientConfig,
}

impl<A, P, C> AccountActions<A, P, C>
where
    A: AccountsApi,
    P: Page,
    C: Clock,
{
    pub fn new(api: A, page: P, clock: C, config: ClientConfig) -> Self {
        Self {
            api,
            page,
            clock,
            config,
        }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    /// Submit the login form
    pub async fn login(&self) -> Result<()> {
        let credentials = Credentials::from_input(
            &self.read(Field::Username),
            &self.read(Field::Password),
        );

        self.page
            .set_status(StatusTarget::Login, "", StatusStyle::Neutral);

        if !credentials.is_complete() {
            self.page.set_status(
                StatusTarget::Login,
                LOGIN_FIELDS_REQUIRED,
                StatusStyle::Error,
            );
            return Err(ActionError::Validation(LOGIN_FIELDS_REQUIRED.to_string()));
        }

        self.page.set_busy(true);
        let result = self.api.login(&credentials).await;
        self.page.set_busy(false);

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                self.page
                    .set_status(StatusTarget::Login, NETWORK_ERROR, StatusStyle::Error);
                return Err(e.into());
            }
        };

        if !response.success {
            let failure = LoginFailure::classify(response.message.as_deref());
            self.page.set_status(
                StatusTarget::Login,
                failure.user_message(),
                StatusStyle::Error,
            );
            return Err(ActionError::Rejected(
                response.message.unwrap_or_default(),
            ));
        }

        log::info!(
            "Logged in as {} (role: {})",
            credentials.username,
            response.role.as_deref().unwrap_or("unknown")
        );
        self.page
            .set_status(StatusTarget::Login, LOGIN_SUCCEEDED, StatusStyle::Success);
        self.clock.sleep(LOGIN_REDIRECT_DELAY_MS).await;
        self.page.navigate(&self.config.landing_route);

        Ok(())
    }

    /// Submit the registration form
    pub async fn register(&self) -> Result<()> {
        let payload = RegistrationPayload {
            username: self.read(Field::Username),
            email: self.read(Field::Email),
            password1: self.read(Field::Password1),
            password2: self.read(Field::Password2),
        };

        let response = match self.api.register(&payload).await {
            Ok(response) => response,
            Err(e) => {
                self.page
                    .set_status(StatusTarget::Register, NETWORK_ERROR, StatusStyle::Error);
                return Err(e.into());
            }
        };

        if response.success {
            log::info!("Registered {}", payload.username);
            self.page.navigate(&self.config.login_route);
            return Ok(());
        }

        let message = response
            .joined_errors()
            .unwrap_or_else(|| REGISTER_FAILED.to_string());
        self.page
            .set_status(StatusTarget::Register, &message, StatusStyle::Error);

        Err(ActionError::Rejected(message))
    }

    /// End the session and go back to the login page
    pub async fn logout(&self) -> Result<()> {
        self.api.logout().await?;
        self.page.navigate(&self.config.login_route);
        Ok(())
    }

    /// Delete a user from the admin table
    pub async fn delete_user(&self, id: &UserId) -> Result<()> {
        let error = match self.api.delete_user(id).await {
            Ok(response) if response.success => {
                if !self.page.remove_user_row(id) {
                    log::warn!("Deleted user {} has no row on this page", id);
                }
                return Ok(());
            }
            Ok(_) => ActionError::Rejected(format!("delete of user {} refused", id)),
            Err(e) => ActionError::Transport(e),
        };

        self.page.alert(DELETE_USER_FAILED);
        Err(error)
    }

    fn read(&self, field: Field) -> String {
        self.page.read_field(field).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::decode_reply;
    use crate::models::{DeleteUserResponse, LoginResponse, RegisterResponse};
    use async_trait::async_trait;
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakeApi {
        login: Option<std::result::Result<LoginResponse, ApiError>>,
        register: Option<std::result::Result<RegisterResponse, ApiError>>,
        logout: Option<std::result::Result<(), ApiError>>,
        delete: Option<std::result::Result<DeleteUserResponse, ApiError>>,
        calls: RefCell<Vec<String>>,
        last_credentials: RefCell<Option<Credentials>>,
        last_registration: RefCell<Option<RegistrationPayload>>,
    }

    impl FakeApi {
        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    fn answer<T: Clone>(
        slot: &Option<std::result::Result<T, ApiError>>,
    ) -> std::result::Result<T, ApiError> {
        slot.clone()
            .unwrap_or_else(|| Err(ApiError::Network("no answer configured".to_string())))
    }

    #[async_trait(?Send)]
    impl AccountsApi for FakeApi {
        async fn login(
            &self,
            credentials: &Credentials,
        ) -> std::result::Result<LoginResponse, ApiError> {
            self.calls.borrow_mut().push("login".to_string());
            *self.last_credentials.borrow_mut() = Some(credentials.clone());
            answer(&self.login)
        }

        async fn register(
            &self,
            payload: &RegistrationPayload,
        ) -> std::result::Result<RegisterResponse, ApiError> {
            self.calls.borrow_mut().push("register".to_string());
            *self.last_registration.borrow_mut() = Some(payload.clone());
            answer(&self.register)
        }

        async fn logout(&self) -> std::result::Result<(), ApiError> {
            self.calls.borrow_mut().push("logout".to_string());
            answer(&self.logout)
        }

        async fn delete_user(
            &self,
            id: &UserId,
        ) -> std::result::Result<DeleteUserResponse, ApiError> {
            self.calls.borrow_mut().push(format!("delete {}", id));
            answer(&self.delete)
        }
    }

    #[derive(Default)]
    struct FakePage {
        fields: HashMap<Field, String>,
        rows: RefCell<Vec<String>>,
        statuses: RefCell<Vec<(StatusTarget, String, StatusStyle)>>,
        busy: RefCell<Vec<bool>>,
        alerts: RefCell<Vec<String>>,
        navigations: RefCell<Vec<String>>,
    }

    impl FakePage {
        fn with_fields(fields: &[(Field, &str)]) -> Self {
            Self {
                fields: fields
                    .iter()
                    .map(|(field, value)| (*field, value.to_string()))
                    .collect(),
                ..Default::default()
            }
        }

        fn last_status(&self) -> Option<(StatusTarget, String, StatusStyle)> {
            self.statuses.borrow().last().cloned()
        }

        fn is_busy(&self) -> bool {
            self.busy.borrow().last().copied().unwrap_or(false)
        }
    }

    impl Page for FakePage {
        fn read_field(&self, field: Field) -> Option<String> {
            self.fields.get(&field).cloned()
        }

        fn set_status(&self, target: StatusTarget, text: &str, style: StatusStyle) {
            self.statuses
                .borrow_mut()
                .push((target, text.to_string(), style));
        }

        fn set_busy(&self, busy: bool) {
            self.busy.borrow_mut().push(busy);
        }

        fn remove_user_row(&self, id: &UserId) -> bool {
            let row_id = id.row_element_id();
            let mut rows = self.rows.borrow_mut();
            let before = rows.len();
            rows.retain(|row| *row != row_id);
            rows.len() != before
        }

        fn alert(&self, message: &str) {
            self.alerts.borrow_mut().push(message.to_string());
        }

        fn navigate(&self, route: &str) {
            self.navigations.borrow_mut().push(route.to_string());
        }
    }

    #[derive(Default)]
    struct FakeClock {
        slept: Cell<u32>,
    }

    #[async_trait(?Send)]
    impl Clock for FakeClock {
        async fn sleep(&self, millis: u32) {
            self.slept.set(self.slept.get() + millis);
        }
    }

    fn actions(api: FakeApi, page: FakePage) -> AccountActions<FakeApi, FakePage, FakeClock> {
        AccountActions::new(api, page, FakeClock::default(), ClientConfig::default())
    }

    fn login_page(username: &str, password: &str) -> FakePage {
        FakePage::with_fields(&[(Field::Username, username), (Field::Password, password)])
    }

    fn rejected_login(message: &str) -> FakeApi {
        FakeApi {
            login: Some(Ok(LoginResponse {
                success: false,
                message: Some(message.to_string()),
                role: None,
            })),
            ..Default::default()
        }
    }

    #[test]
    fn test_login_empty_username_sends_nothing() {
        let actions = actions(FakeApi::default(), login_page("   ", "secret"));

        let result = block_on(actions.login());

        assert!(matches!(result, Err(ActionError::Validation(_))));
        assert!(actions.api.calls().is_empty());
        assert!(actions.page.busy.borrow().is_empty());
        assert_eq!(
            actions.page.last_status(),
            Some((
                StatusTarget::Login,
                LOGIN_FIELDS_REQUIRED.to_string(),
                StatusStyle::Error
            ))
        );
    }

    #[test]
    fn test_login_missing_password_field_sends_nothing() {
        let page = FakePage::with_fields(&[(Field::Username, "alice")]);
        let actions = actions(FakeApi::default(), page);

        assert!(block_on(actions.login()).is_err());
        assert!(actions.api.calls().is_empty());
    }

    #[test]
    fn test_login_success_redirects_after_delay() {
        let api = FakeApi {
            login: Some(Ok(LoginResponse {
                success: true,
                message: None,
                role: Some("user".to_string()),
            })),
            ..Default::default()
        };
        let actions = actions(api, login_page(" alice ", " secret "));

        block_on(actions.login()).unwrap();

        let sent = actions.api.last_credentials.borrow().clone().unwrap();
        assert_eq!(sent.username, "alice");
        assert_eq!(sent.password, "secret");
        assert_eq!(*actions.page.busy.borrow(), vec![true, false]);
        assert_eq!(
            actions.page.last_status(),
            Some((
                StatusTarget::Login,
                LOGIN_SUCCEEDED.to_string(),
                StatusStyle::Success
            ))
        );
        assert_eq!(actions.clock.slept.get(), LOGIN_REDIRECT_DELAY_MS);
        assert_eq!(*actions.page.navigations.borrow(), vec!["/".to_string()]);
    }

    #[test]
    fn test_login_wrong_password_uses_canned_message() {
        let actions = actions(rejected_login("Invalid password"), login_page("alice", "nope"));

        let result = block_on(actions.login());

        assert_eq!(
            result,
            Err(ActionError::Rejected("Invalid password".to_string()))
        );
        let (_, text, style) = actions.page.last_status().unwrap();
        assert_eq!(text, "Password salah. Silakan coba lagi.");
        assert_eq!(style, StatusStyle::Error);
        assert!(actions.page.navigations.borrow().is_empty());
        assert!(!actions.page.is_busy());
    }

    #[test]
    fn test_login_unknown_user_uses_canned_message() {
        let actions = actions(rejected_login("User not found"), login_page("ghost", "pw"));

        assert!(block_on(actions.login()).is_err());

        let (_, text, _) = actions.page.last_status().unwrap();
        assert_eq!(text, "Username tidak ditemukan.");
    }

    #[test]
    fn test_login_other_server_message_shown_verbatim() {
        let actions = actions(rejected_login("Server error"), login_page("alice", "pw"));

        assert!(block_on(actions.login()).is_err());

        let (_, text, _) = actions.page.last_status().unwrap();
        assert_eq!(text, "Server error");
    }

    #[test]
    fn test_login_transport_failure_restores_button() {
        let api = FakeApi {
            login: Some(Err(ApiError::Network("connection refused".to_string()))),
            ..Default::default()
        };
        let actions = actions(api, login_page("alice", "pw"));

        let result = block_on(actions.login());

        assert!(matches!(result, Err(ActionError::Transport(_))));
        assert_eq!(*actions.page.busy.borrow(), vec![true, false]);
        let (_, text, style) = actions.page.last_status().unwrap();
        assert_eq!(text, NETWORK_ERROR);
        assert_eq!(style, StatusStyle::Error);
    }

    #[test]
    fn test_login_unparsable_response_is_a_transport_failure() {
        let api = FakeApi {
            login: Some(Err(ApiError::Deserialization("expected value".to_string()))),
            ..Default::default()
        };
        let actions = actions(api, login_page("alice", "pw"));

        assert!(matches!(
            block_on(actions.login()),
            Err(ActionError::Transport(ApiError::Deserialization(_)))
        ));
        assert!(!actions.page.is_busy());
    }

    #[test]
    fn test_login_rejection_with_client_error_status_uses_heuristics() {
        let api = FakeApi {
            login: Some(decode_reply(
                400,
                r#"{"success": false, "message": "Invalid password"}"#,
            )),
            ..Default::default()
        };
        let actions = actions(api, login_page("alice", "nope"));

        assert!(matches!(
            block_on(actions.login()),
            Err(ActionError::Rejected(_))
        ));
        let (_, text, _) = actions.page.last_status().unwrap();
        assert_eq!(text, "Password salah. Silakan coba lagi.");
    }

    fn register_page() -> FakePage {
        FakePage::with_fields(&[
            (Field::Username, " bob"),
            (Field::Email, "bob@example.com"),
            (Field::Password1, "pw1"),
            (Field::Password2, "pw2"),
        ])
    }

    #[test]
    fn test_register_success_goes_to_login() {
        let api = FakeApi {
            register: Some(Ok(RegisterResponse {
                success: true,
                errors: None,
            })),
            ..Default::default()
        };
        let actions = actions(api, register_page());

        block_on(actions.register()).unwrap();

        let sent = actions.api.last_registration.borrow().clone().unwrap();
        assert_eq!(sent.username, " bob");
        assert_eq!(sent.password1, "pw1");
        assert_eq!(sent.password2, "pw2");
        assert_eq!(*actions.page.navigations.borrow(), vec!["/login/".to_string()]);
    }

    #[test]
    fn test_register_errors_joined_in_order() {
        let response: RegisterResponse = serde_json::from_str(
            r#"{"success": false, "errors": {"username": ["taken"], "email": ["invalid"]}}"#,
        )
        .unwrap();
        let api = FakeApi {
            register: Some(Ok(response)),
            ..Default::default()
        };
        let actions = actions(api, register_page());

        let result = block_on(actions.register());

        assert_eq!(result, Err(ActionError::Rejected("taken, invalid".to_string())));
        assert_eq!(
            actions.page.last_status(),
            Some((
                StatusTarget::Register,
                "taken, invalid".to_string(),
                StatusStyle::Error
            ))
        );
        assert!(actions.page.navigations.borrow().is_empty());
    }

    #[test]
    fn test_register_errors_with_client_error_status() {
        let api = FakeApi {
            register: Some(decode_reply(
                400,
                r#"{"success": false, "errors": {"username": ["taken"], "email": ["invalid"]}}"#,
            )),
            ..Default::default()
        };
        let actions = actions(api, register_page());

        assert_eq!(
            block_on(actions.register()),
            Err(ActionError::Rejected("taken, invalid".to_string()))
        );
        let (_, text, _) = actions.page.last_status().unwrap();
        assert_eq!(text, "taken, invalid");
    }

    #[test]
    fn test_register_failure_without_errors_uses_generic_text() {
        let api = FakeApi {
            register: Some(Ok(RegisterResponse::default())),
            ..Default::default()
        };
        let actions = actions(api, register_page());

        assert!(block_on(actions.register()).is_err());

        let (_, text, _) = actions.page.last_status().unwrap();
        assert_eq!(text, REGISTER_FAILED);
    }

    #[test]
    fn test_register_transport_failure() {
        let actions = actions(FakeApi::default(), register_page());

        assert!(matches!(
            block_on(actions.register()),
            Err(ActionError::Transport(_))
        ));
        let (target, text, _) = actions.page.last_status().unwrap();
        assert_eq!(target, StatusTarget::Register);
        assert_eq!(text, NETWORK_ERROR);
    }

    #[test]
    fn test_logout_navigates_to_login() {
        let api = FakeApi {
            logout: Some(Ok(())),
            ..Default::default()
        };
        let actions = actions(api, FakePage::default());

        block_on(actions.logout()).unwrap();

        assert_eq!(actions.api.calls(), vec!["logout".to_string()]);
        assert_eq!(*actions.page.navigations.borrow(), vec!["/login/".to_string()]);
    }

    #[test]
    fn test_logout_network_failure_stays_on_page() {
        let actions = actions(FakeApi::default(), FakePage::default());

        assert!(block_on(actions.logout()).is_err());
        assert!(actions.page.navigations.borrow().is_empty());
    }

    fn admin_page() -> FakePage {
        let page = FakePage::default();
        page.rows
            .borrow_mut()
            .extend(["user-1".to_string(), "user-2".to_string()]);
        page
    }

    #[test]
    fn test_delete_user_success_removes_row() {
        let api = FakeApi {
            delete: Some(Ok(DeleteUserResponse { success: true })),
            ..Default::default()
        };
        let actions = actions(api, admin_page());

        block_on(actions.delete_user(&UserId::from(2))).unwrap();

        assert_eq!(actions.api.calls(), vec!["delete 2".to_string()]);
        assert_eq!(*actions.page.rows.borrow(), vec!["user-1".to_string()]);
        assert!(actions.page.alerts.borrow().is_empty());
    }

    #[test]
    fn test_delete_user_refused_keeps_row_and_alerts() {
        let api = FakeApi {
            delete: Some(Ok(DeleteUserResponse { success: false })),
            ..Default::default()
        };
        let actions = actions(api, admin_page());

        let result = block_on(actions.delete_user(&UserId::from(2)));

        assert!(matches!(result, Err(ActionError::Rejected(_))));
        assert_eq!(actions.page.rows.borrow().len(), 2);
        assert_eq!(
            *actions.page.alerts.borrow(),
            vec![DELETE_USER_FAILED.to_string()]
        );
    }

    #[test]
    fn test_delete_user_http_error_alerts() {
        let api = FakeApi {
            delete: Some(Err(ApiError::Http {
                status: 404,
                message: "Not Found".to_string(),
            })),
            ..Default::default()
        };
        let actions = actions(api, admin_page());

        assert!(matches!(
            block_on(actions.delete_user(&UserId::from(9))),
            Err(ActionError::Transport(_))
        ));
        assert_eq!(actions.page.rows.borrow().len(), 2);
        assert_eq!(actions.page.alerts.borrow().len(), 1);
    }
}
