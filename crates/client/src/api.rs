//! HTTP client for the Marvedge API.
//!
//! The session lives in a `token` cookie, so the underlying
//! [`reqwest::Client`] is built with a cookie store: after [`ApiClient::login`]
//! every later request is authenticated.

use marvedge_core::types::DbId;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ClientError;
use crate::models::{
    AuthResponse, CreateTourRequest, CurrentUser, DeleteTourResponse, ErrorBody, Tour,
    UpdateTourRequest,
};

/// Client for one Marvedge server.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

impl ApiClient {
    /// Create a client for the server at `base_url`, e.g. `http://host:3000`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Reuse an existing [`reqwest::Client`]. It must have a cookie store for
    /// sessions to persist.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ---- auth ----

    /// `POST /api/auth/signup`
    pub async fn signup(&self, email: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let response = self
            .client
            .post(self.url("/api/auth/signup"))
            .json(&Credentials { email, password })
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `POST /api/auth/login`; stores the session cookie on success.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let response = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&Credentials { email, password })
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `POST /api/auth/logout`; the server expires the session cookie.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let response = self.client.post(self.url("/api/auth/logout")).send().await?;
        Self::check_status(response).await
    }

    /// `GET /api/auth/get-user`
    pub async fn current_user(&self) -> Result<CurrentUser, ClientError> {
        let response = self.client.get(self.url("/api/auth/get-user")).send().await?;
        Self::parse_response(response).await
    }

    // ---- tours ----

    /// `POST /api/tours/create-tour`
    pub async fn create_tour(&self, input: &CreateTourRequest) -> Result<Tour, ClientError> {
        let response = self
            .client
            .post(self.url("/api/tours/create-tour"))
            .json(input)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `GET /api/tours/get-tours`
    pub async fn list_tours(&self) -> Result<Vec<Tour>, ClientError> {
        let response = self.client.get(self.url("/api/tours/get-tours")).send().await?;
        Self::parse_response(response).await
    }

    /// `GET /api/tours/get-tours/{user_id}`
    pub async fn list_user_tours(&self, user_id: DbId) -> Result<Vec<Tour>, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/api/tours/get-tours/{user_id}")))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `GET /api/tours/get-tours/{user_id}/{tour_id}`
    pub async fn get_tour(&self, user_id: DbId, tour_id: DbId) -> Result<Tour, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/api/tours/get-tours/{user_id}/{tour_id}")))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `PUT /api/tours/update-tour/{id}`
    pub async fn update_tour(
        &self,
        tour_id: DbId,
        input: &UpdateTourRequest,
    ) -> Result<Tour, ClientError> {
        let response = self
            .client
            .put(self.url(&format!("/api/tours/update-tour/{tour_id}")))
            .json(input)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `DELETE /api/tours/delete-tour/{id}`
    pub async fn delete_tour(&self, tour_id: DbId) -> Result<DeleteTourResponse, ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/api/tours/delete-tour/{tour_id}")))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Turn a non-2xx response into [`ClientError::Api`], preferring the
    /// `error` field of the JSON envelope over the raw body.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|e| e.error)
            .unwrap_or(body);

        tracing::debug!(status = status.as_u16(), %message, "API request failed");
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn check_status(response: reqwest::Response) -> Result<(), ClientError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}
