use anyhow::Context;
use async_trait::async_trait;

use crate::{
    request::{CreateRoomRequest, RandomRoomQuery},
    response::{
        CreateRoomOutcome, CreateRoomResponse, ErrorResponse, RandomRoomOutcome,
        RandomRoomResponse,
    },
};

/// Address of the backend when nothing else is configured
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

/// The two room requests the client can make against the backend.
///
/// `Err` is reserved for transport failures (connection refused, unreadable body, ...).
/// A rejection by the backend is a regular outcome.
#[async_trait]
pub trait RoomsApi: Send + Sync {
    /// `GET /rooms/random`
    async fn random_room(&self, query: &RandomRoomQuery) -> anyhow::Result<RandomRoomOutcome>;

    /// `POST /rooms`
    async fn create_room(&self, request: &CreateRoomRequest) -> anyhow::Result<CreateRoomOutcome>;
}

/// [RoomsClient] talks to the backend over HTTP
#[derive(Debug, Clone)]
pub struct RoomsClient {
    http: reqwest::Client,
    base_url: String,
}

impl RoomsClient {
    /// # Arguments
    ///
    /// - `base_url` - Scheme, host and port of the backend, e.g. `http://127.0.0.1:8000`
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: String::from(base_url.trim_end_matches('/')),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl RoomsApi for RoomsClient {
    async fn random_room(&self, query: &RandomRoomQuery) -> anyhow::Result<RandomRoomOutcome> {
        tracing::debug!(
            transport_type = %query.transport_type,
            user_type = %query.user_type,
            "requesting random room"
        );

        let response: RandomRoomResponse = self
            .http
            .get(self.url("/rooms/random"))
            .query(query)
            .send()
            .await
            .context("could not reach the server")?
            .json()
            .await
            .context("failed to deserialize random room response")?;

        Ok(response.into_outcome(query.transport_type.capacity()))
    }

    async fn create_room(&self, request: &CreateRoomRequest) -> anyhow::Result<CreateRoomOutcome> {
        tracing::debug!(room = %request.room_name, "requesting room creation");

        let response = self
            .http
            .post(self.url("/rooms"))
            .json(request)
            .send()
            .await
            .context("could not reach the server")?;

        let status = response.status();
        if status.is_success() {
            let created: CreateRoomResponse = response
                .json()
                .await
                .context("failed to deserialize create room response")?;

            return Ok(CreateRoomOutcome::Created {
                capacity: created.capacity,
            });
        }

        let body = response
            .bytes()
            .await
            .context("could not read rejection body")?;
        let rejection: ErrorResponse = serde_json::from_slice(&body)
            .with_context(|| format!("failed to deserialize rejection from the server ({})", status))?;
        // a json rejection without a detail still has to be shown to the user
        let detail = rejection.detail.unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(String::from)
                .unwrap_or_else(|| status.to_string())
        });

        Ok(CreateRoomOutcome::Rejected { detail })
    }
}
