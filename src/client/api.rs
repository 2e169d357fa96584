use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use uuid::Uuid;

use super::ClientError;
use crate::auth::{AuthRequest, AuthResponse};
use crate::models::{Task, TaskInput};

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Thin typed wrapper over the backend's HTTP API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(base_url).map_err(|_| ClientError::InvalidUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            token: None,
        })
    }

    /// Attaches `token` as a bearer credential to every following request.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub async fn signup(&self, request: &AuthRequest) -> Result<AuthResponse, ClientError> {
        let url = self.url(&["signup"])?;
        self.send(self.http.post(url).json(request)).await
    }

    pub async fn login(&self, request: &AuthRequest) -> Result<AuthResponse, ClientError> {
        let url = self.url(&["login"])?;
        self.send(self.http.post(url).json(request)).await
    }

    pub async fn fetch_todos(&self, user_email: &str) -> Result<Vec<Task>, ClientError> {
        let url = self.url(&["todos", user_email])?;
        self.send(self.http.get(url)).await
    }

    pub async fn create_todo(&self, todo: &TaskInput) -> Result<Task, ClientError> {
        let url = self.url(&["todos"])?;
        self.send(self.http.post(url).json(todo)).await
    }

    pub async fn update_todo(&self, id: Uuid, todo: &TaskInput) -> Result<Task, ClientError> {
        let url = self.url(&["todos", &id.to_string()])?;
        self.send(self.http.put(url).json(todo)).await
    }

    pub async fn delete_todo(&self, id: Uuid) -> Result<(), ClientError> {
        let url = self.url(&["todos", &id.to_string()])?;
        let response = self.authorize(self.http.delete(url)).send().await?;
        check(response).await.map(|_| ())
    }

    // Segments are percent-encoded, so an email can be used as one.
    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = self.authorize(request).send().await?;
        Ok(check(response).await?.json::<T>().await?)
    }
}

async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or(text);

    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}
