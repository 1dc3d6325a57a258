use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::instrument;

use super::state::UserForm;
use crate::models::{Envelope, User};

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-success status.
    #[error("{}", message.as_deref().unwrap_or("request failed"))]
    Api {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("response carried no data")]
    EmptyResponse,

    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    /// The `error` string from the server's envelope, when it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Server message when present, otherwise what went wrong on the wire.
    pub fn detail(&self) -> String {
        match self {
            ClientError::Api {
                message: Some(message),
                ..
            } => message.clone(),
            ClientError::Api {
                status,
                message: None,
            } => format!("request failed with status {}", status.as_u16()),
            other => other.to_string(),
        }
    }
}

/// Operations the client needs from the users API.
#[async_trait]
pub trait UsersApi: Send + Sync {
    async fn list(&self) -> Result<Vec<User>, ClientError>;
    async fn create(&self, form: &UserForm) -> Result<User, ClientError>;
    async fn update(&self, id: i32, form: &UserForm) -> Result<User, ClientError>;
    async fn delete(&self, id: i32) -> Result<User, ClientError>;
}

#[derive(Clone, Debug)]
pub struct HttpUsersApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpUsersApi {
    /// `base_url` points at the API root, e.g. `http://127.0.0.1:8000/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn users_url(&self) -> String {
        format!("{}/users", self.base_url)
    }

    fn user_url(&self, id: i32) -> String {
        format!("{}/users/{}", self.base_url, id)
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        let envelope = response.json::<Envelope<T>>().await?;
        return envelope.data.ok_or(ClientError::EmptyResponse);
    }
    let message = response
        .json::<Envelope<serde_json::Value>>()
        .await
        .ok()
        .and_then(|envelope| envelope.error);
    tracing::warn!(status = status.as_u16(), ?message, "API call failed");
    Err(ClientError::Api { status, message })
}

#[async_trait]
impl UsersApi for HttpUsersApi {
    #[instrument(name = "Client: list users", skip(self))]
    async fn list(&self) -> Result<Vec<User>, ClientError> {
        let response = self.client.get(self.users_url()).send().await?;
        decode(response).await
    }

    #[instrument(name = "Client: create user", skip(self, form))]
    async fn create(&self, form: &UserForm) -> Result<User, ClientError> {
        let response = self
            .client
            .post(self.users_url())
            .json(form)
            .send()
            .await?;
        decode(response).await
    }

    #[instrument(name = "Client: update user", skip(self, form))]
    async fn update(&self, id: i32, form: &UserForm) -> Result<User, ClientError> {
        let response = self
            .client
            .put(self.user_url(id))
            .json(form)
            .send()
            .await?;
        decode(response).await
    }

    #[instrument(name = "Client: delete user", skip(self))]
    async fn delete(&self, id: i32) -> Result<User, ClientError> {
        let response = self.client.delete(self.user_url(id)).send().await?;
        decode(response).await
    }
}
