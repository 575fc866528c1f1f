//! Access to the remote users resource.
//!
//! Every operation resolves to an [`ApiResponse`]: either `data` or a
//! human-readable `error`, never a panic or an `Err` past this boundary.
//! [`HttpUsersApi`] is the network implementation; tests and the rest of the
//! app only depend on the [`UsersApi`] trait.

pub mod client;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::model::{User, UserData};

pub use client::HttpUsersApi;

/// Uniform result of a users-resource call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    pub error: Option<String>,
    /// HTTP status, when the server answered at all.
    pub status: Option<u16>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            status: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn failed(err: &ApiError) -> Self {
        Self {
            data: None,
            error: Some(err.to_string()),
            status: err.status(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Convert into a plain `Result`, with the error message as the `Err` value.
    pub fn into_result(self) -> std::result::Result<Option<T>, String> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.data),
        }
    }
}

impl<T> From<std::result::Result<T, ApiError>> for ApiResponse<T> {
    fn from(res: std::result::Result<T, ApiError>) -> Self {
        match res {
            Ok(data) => Self::ok(data),
            Err(e) => Self::failed(&e),
        }
    }
}

/// The five verbs of the users resource.
#[async_trait]
pub trait UsersApi: Send + Sync {
    async fn list(&self) -> ApiResponse<Vec<User>>;
    async fn get_by_id(&self, id: &str) -> ApiResponse<User>;
    async fn create(&self, payload: &UserData) -> ApiResponse<User>;
    async fn update(&self, id: &str, payload: &UserData) -> ApiResponse<User>;
    async fn delete(&self, id: &str) -> ApiResponse<()>;
}
