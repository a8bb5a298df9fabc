//! PostgREST implementation of [`StationStore`] for the hosted backend.
//!
//! Server-pushed realtime events need the hosted client's websocket channel,
//! which this crate does not implement. Subscribers of a `RemoteStore` are
//! notified of the mutations made through it.

use crate::config::BackendConfig;
use crate::query::ListQuery;
use crate::subscription::{ChangeKind, ChangeSender, StationChange, Subscribers, SubscriptionHandle};
use crate::{StationStore, StoreError};
use fp_core::station::STATIONS_TABLE;
use fp_core::{NewStation, Station, StationPatch};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use std::rc::Rc;

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Client for the hosted `feeding_points` table.
#[derive(Clone)]
pub struct RemoteStore {
    client: Client,
    config: BackendConfig,
    subscribers: Rc<Subscribers>,
}

impl RemoteStore {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            client: Client::new(),
            config,
            subscribers: Rc::new(Subscribers::default()),
        }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.config.anon_key)
            .header("Authorization", format!("Bearer {}", self.config.anon_key))
    }

    fn table_url(&self) -> String {
        self.config.table_url(STATIONS_TABLE)
    }

    /// Turn a non-success response into `StoreError::Status` with the backend's message.
    async fn check(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or(body);
        log::warn!("backend returned {}: {}", status, message);
        Err(StoreError::Status {
            code: status.as_u16(),
            message,
        })
    }

    async fn rows(response: Response) -> Result<Vec<Station>, StoreError> {
        let body = Self::check(response).await?.text().await?;
        serde_json::from_str(&body).map_err(|e| StoreError::Decode(e.to_string()))
    }

    fn notify(&self, kind: ChangeKind, id: &str) {
        self.subscribers.notify(StationChange {
            table: STATIONS_TABLE.to_string(),
            kind,
            id: id.to_string(),
        });
    }
}

impl StationStore for RemoteStore {
    async fn list(&self, query: &ListQuery) -> Result<Vec<Station>, StoreError> {
        let request = self.client.get(self.table_url()).query(&query.to_params());
        let stations = Self::rows(self.authorize(request).send().await?).await?;
        log::info!("fetched {} stations", stations.len());
        Ok(stations)
    }

    async fn insert(&self, station: &NewStation) -> Result<Station, StoreError> {
        let request = self
            .client
            .post(self.table_url())
            .header("Prefer", "return=representation")
            .json(station);
        let inserted = Self::rows(self.authorize(request).send().await?)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Decode("insert returned no row".to_string()))?;
        self.notify(ChangeKind::Insert, &inserted.id);
        Ok(inserted)
    }

    async fn update(&self, id: &str, patch: &StationPatch) -> Result<(), StoreError> {
        let request = self
            .client
            .patch(self.table_url())
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation")
            .json(patch);
        let updated = Self::rows(self.authorize(request).send().await?).await?;
        if updated.is_empty() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        self.notify(ChangeKind::Update, id);
        Ok(())
    }

    fn subscribe(&self, table: &str, sender: ChangeSender) -> SubscriptionHandle {
        self.subscribers.add(table, sender)
    }

    fn unsubscribe(&self, handle: SubscriptionHandle) {
        self.subscribers.remove(handle);
    }
}
