pub mod accounts;
pub mod client;

pub use accounts::AccountsApi;
pub use client::{ApiClient, ApiError};
