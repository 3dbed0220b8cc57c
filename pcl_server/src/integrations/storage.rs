use std::sync::Arc;

use log::*;
use pcl_engine::traits::{IntegrationError, ObjectStore};
use reqwest::{header::CONTENT_TYPE, Client};
use serde_json::Value;

use crate::{
    config::StorageConfig,
    integrations::{not_configured, send_json},
};

/// Client for a Supabase-compatible object storage API.
#[derive(Clone)]
pub struct StorageClient {
    config: StorageConfig,
    client: Arc<Client>,
}

impl StorageClient {
    pub fn new(config: StorageConfig) -> Self {
        Self { config, client: Arc::new(Client::new()) }
    }

    fn base_url(&self) -> &str {
        self.config.url.trim_end_matches('/')
    }

    pub fn object_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/{bucket}/{path}", self.base_url())
    }

    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/public/{bucket}/{path}", self.base_url())
    }
}

impl ObjectStore for StorageClient {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<String, IntegrationError> {
        if self.config.url.is_empty() || !self.config.service_key.is_set() {
            return Err(not_configured("Object storage is not configured"));
        }
        debug!("🗄️ Uploading {} bytes to {bucket}/{path}", data.len());
        let req = self
            .client
            .post(self.object_url(bucket, path))
            .bearer_auth(self.config.service_key.reveal())
            .header("apikey", self.config.service_key.reveal().as_str())
            .header(CONTENT_TYPE, content_type)
            .body(data);
        let _ = send_json::<Value>(req).await?;
        Ok(self.public_url(bucket, path))
    }
}
