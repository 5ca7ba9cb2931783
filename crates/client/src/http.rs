use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use slotbook_core::{
    errors::{ClientError, ClientResult, ConflictSignal},
    models::{
        booking::{BookSlotRequest, BookingConfirmation, CreateSlotsRequest, CreateSlotsResponse},
        session::{Credentials, Session, SignInResponse, UserId},
        slot::{Slot, SlotListResponse},
    },
};
use tracing::{debug, warn};

use crate::{api::SlotApi, config::ClientConfig};

const LIST_FALLBACK: &str = "Failed to fetch available slots. Please try again later.";
const CREATE_FALLBACK: &str = "Failed to create slots. Please try again.";
const BOOK_FALLBACK: &str =
    "Failed to book slot. The slot might have just been taken or an error occurred.";
const AUTH_FALLBACK: &str = "An error occurred. Please try again.";

/// `SlotApi` over JSON/HTTP.
#[derive(Debug, Clone)]
pub struct HttpSlotApi {
    base_url: String,
    http: Client,
    conflict_signal: ConflictSignal,
    token: Option<String>,
}

impl HttpSlotApi {
    pub fn new(base_url: impl Into<String>, conflict_signal: ConflictSignal) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
            conflict_signal,
            token: None,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.api_base_url.clone(), config.conflict_signal)
    }

    /// Attach the session token as a bearer credential on every request.
    pub fn with_session(mut self, session: &Session) -> Self {
        self.token = Some(session.token.clone());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn user_url(&self, user_id: &UserId, endpoint: &str) -> String {
        format!(
            "{}/users/{}/{}/",
            self.base_url,
            urlencoding::encode(user_id.as_str()),
            endpoint
        )
    }

    /// `POST /signin`
    pub async fn sign_in(&self, credentials: Credentials) -> ClientResult<Session> {
        self.authenticate("signin", credentials).await
    }

    /// `POST /signup`
    pub async fn sign_up(&self, credentials: Credentials) -> ClientResult<Session> {
        self.authenticate("signup", credentials).await
    }

    async fn authenticate(&self, endpoint: &str, credentials: Credentials) -> ClientResult<Session> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let response: SignInResponse = self
            .send_json(self.http.post(&url).json(&credentials), AUTH_FALLBACK)
            .await?;

        response
            .into_session()
            .ok_or_else(|| ClientError::Session("server returned an empty user id".into()))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        fallback: &str,
    ) -> ClientResult<T> {
        let body = self.send(request, fallback).await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Send the request and return the body of a 2xx response.
    async fn send(&self, request: RequestBuilder, fallback: &str) -> ClientResult<String> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(|e| {
            warn!("Request failed before a response arrived: {}", e);
            ClientError::Network(e.to_string())
        })?;

        let status = response.status();
        let url = response.url().path().to_string();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        debug!(%status, path = %url, "response received");

        if !status.is_success() {
            let error =
                ClientError::from_response(status.as_u16(), &body, fallback, self.conflict_signal);
            warn!(%status, path = %url, "request rejected: {}", error);
            return Err(error);
        }

        Ok(body)
    }
}

#[async_trait]
impl SlotApi for HttpSlotApi {
    async fn list_slots(&self, user_id: UserId) -> ClientResult<Vec<Slot>> {
        let url = self.user_url(&user_id, "available-slots");
        let response: SlotListResponse = self.send_json(self.http.get(&url), LIST_FALLBACK).await?;
        for reason in &response.rejected {
            warn!(%user_id, "skipping unreadable slot: {}", reason);
        }
        Ok(response.slots)
    }

    async fn create_slots(
        &self,
        user_id: UserId,
        request: CreateSlotsRequest,
    ) -> ClientResult<CreateSlotsResponse> {
        let url = self.user_url(&user_id, "create-slots");
        self.send_json(self.http.post(&url).json(&request), CREATE_FALLBACK)
            .await
    }

    async fn book_slot(
        &self,
        user_id: UserId,
        request: BookSlotRequest,
    ) -> ClientResult<BookingConfirmation> {
        let url = self.user_url(&user_id, "book-slot");
        let body = self
            .send(self.http.post(&url).json(&request), BOOK_FALLBACK)
            .await?;

        // Any 2xx means the slot is ours; the body is informational.
        Ok(serde_json::from_str(&body).unwrap_or_else(|e| {
            debug!("booking accepted without a readable body: {}", e);
            BookingConfirmation::default()
        }))
    }
}
