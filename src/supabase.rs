//! Client for the managed backend: PostgREST tables and the storage bucket
//! holding uploaded maps.

use crate::config::SupabaseConfig;
use crate::models::EventRecord;
use axum::body::Bytes;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{header::CONTENT_TYPE, Client, RequestBuilder};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::time::Duration;
use tracing::debug;

pub const MAPS_FOLDER: &str = "maps";
pub const LIST_LIMIT: usize = 100;

pub type Row = Map<String, Value>;

/// An entry returned by the storage list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageObject {
    pub name: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

impl StorageObject {
    /// Folder placeholders come back without metadata.
    pub fn is_file(&self) -> bool {
        self.metadata.is_some() && !self.name.starts_with('.')
    }

    pub fn size(&self) -> u64 {
        self.metadata
            .as_ref()
            .and_then(|meta| meta.get("size"))
            .and_then(|size| match size {
                Value::Number(n) => n.as_u64(),
                Value::String(s) => s.parse().ok(),
                _ => None,
            })
            .unwrap_or(0)
    }
}

#[derive(Clone)]
pub struct SupabaseClient {
    http: Client,
    base_url: String,
    key: String,
    bucket: String,
}

impl SupabaseClient {
    pub fn new(config: &SupabaseConfig, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: config.url.clone(),
            key: config.key.clone(),
            bucket: config.bucket.clone(),
        })
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header("apikey", &self.key).bearer_auth(&self.key)
    }

    fn table(&self, name: &str) -> RequestBuilder {
        self.authed(self.http.get(format!("{}/rest/v1/{name}", self.base_url)))
    }

    fn object_url(&self, path: &str) -> String {
        format!("{}/storage/v1/object/{}/{path}", self.base_url, self.bucket)
    }

    /// Analytics events created at or after `cutoff`, oldest first. Rows that
    /// don't look like events are dropped.
    pub async fn fetch_events_since(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<EventRecord>, reqwest::Error> {
        let filter = format!("gte.{}", cutoff.to_rfc3339_opts(SecondsFormat::Millis, true));
        let rows: Vec<Value> = self
            .table("server_analytics")
            .query(&[
                ("select", "*"),
                ("created_at", filter.as_str()),
                ("order", "created_at.asc"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(parse_event_rows(rows))
    }

    pub async fn fetch_active_auto_delete_channels(&self) -> Result<Vec<Row>, reqwest::Error> {
        self.table("auto_delete_channels")
            .query(&[
                ("select", "*"),
                ("status", "eq.active"),
                ("order", "delete_at.asc"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    /// Newest first, at most [`LIST_LIMIT`] entries.
    pub async fn list_maps(&self) -> Result<Vec<StorageObject>, reqwest::Error> {
        let url = format!("{}/storage/v1/object/list/{}", self.base_url, self.bucket);
        let body = json!({
            "prefix": MAPS_FOLDER,
            "limit": LIST_LIMIT,
            "offset": 0,
            "sortBy": { "column": "created_at", "order": "desc" },
        });
        self.authed(self.http.post(url))
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    pub async fn upload_map(&self, path: &str, bytes: Bytes) -> Result<(), reqwest::Error> {
        self.authed(self.http.post(self.object_url(path)))
            .header(CONTENT_TYPE, "application/octet-stream")
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    pub async fn download_map(&self, path: &str) -> Result<Bytes, reqwest::Error> {
        self.authed(self.http.get(self.object_url(path)))
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await
    }

    pub async fn remove_map(&self, path: &str) -> Result<(), reqwest::Error> {
        let url = format!("{}/storage/v1/object/{}", self.base_url, self.bucket);
        self.authed(self.http.delete(url))
            .json(&json!({ "prefixes": [path] }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

pub fn parse_event_rows(rows: Vec<Value>) -> Vec<EventRecord> {
    rows.into_iter()
        .filter_map(|row| match serde_json::from_value::<EventRecord>(row) {
            Ok(event) => Some(event),
            Err(err) => {
                debug!("skipping malformed analytics row: {err}");
                None
            }
        })
        .collect()
}
