use async_trait::async_trait;

use super::client::{ApiClient, ApiError};
use crate::models::{
    Credentials, DeleteUserResponse, LoginResponse, RegisterResponse, RegistrationPayload, UserId,
};

pub const LOGIN_PATH: &str = "/ajax/login/";
pub const REGISTER_PATH: &str = "/ajax/register/";
pub const LOGOUT_PATH: &str = "/ajax/logout/";

pub fn delete_user_path(id: &UserId) -> String {
    format!("/ajax/delete-user/{}/", id)
}

/// The account endpoints the page actions talk to
#[async_trait(?Send)]
pub trait AccountsApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError>;

    async fn register(&self, payload: &RegistrationPayload)
        -> Result<RegisterResponse, ApiError>;

    /// Resolves once the server answered, whatever the status
    async fn logout(&self) -> Result<(), ApiError>;

    async fn delete_user(&self, id: &UserId) -> Result<DeleteUserResponse, ApiError>;
}

#[async_trait(?Send)]
impl AccountsApi for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        self.post(LOGIN_PATH, credentials).await
    }

    async fn register(
        &self,
        payload: &RegistrationPayload,
    ) -> Result<RegisterResponse, ApiError> {
        self.post(REGISTER_PATH, payload).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.get_discarding(LOGOUT_PATH).await
    }

    async fn delete_user(&self, id: &UserId) -> Result<DeleteUserResponse, ApiError> {
        self.get(&delete_user_path(id)).await
    }
}
