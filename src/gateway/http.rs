// src/gateway/http.rs
//! reqwest-backed gateway talking JSON to the data service

use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::{debug, error};

use super::error::{extract_detail, GatewayError};
use super::{Deletable, Gateway, Patchable, Resource, Scope};

#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}", self.base_url, collection)
    }

    fn record_url(&self, collection: &str, id: i64) -> String {
        format!("{}/{}/{}", self.base_url, collection, id)
    }
}

/// Turns a non-2xx response into [`GatewayError::Status`], keeping the service's detail text.
async fn ensure_success(response: Response, action: &str) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = extract_detail(&body);
    error!(
        status = status.as_u16(),
        action = %action,
        detail = ?detail,
        "Data service rejected request"
    );
    Err(GatewayError::Status {
        status: status.as_u16(),
        detail,
    })
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn list<R: Resource>(&self, scope: Scope) -> Result<Vec<R>, GatewayError> {
        let url = self.collection_url(R::COLLECTION);
        debug!(url = %url, scope = ?scope, "Listing records");

        let mut request = self.client.get(&url);
        if let Some((key, id)) = scope.query() {
            request = request.query(&[(key, id)]);
        }

        let response = ensure_success(request.send().await?, "list").await?;
        let records: Vec<R> = response.json().await?;

        debug!(
            collection = R::COLLECTION,
            count = records.len(),
            "Records fetched"
        );
        Ok(records)
    }

    async fn create<R: Resource>(&self, record: &R::Create) -> Result<R, GatewayError> {
        let url = self.collection_url(R::COLLECTION);
        debug!(url = %url, "Creating record");

        let response = self.client.post(&url).json(record).send().await?;
        let response = ensure_success(response, "create").await?;
        let created: R = response.json().await?;

        debug!(
            collection = R::COLLECTION,
            id = created.id(),
            "Record created"
        );
        Ok(created)
    }

    async fn patch<R: Patchable>(&self, id: i64, fields: &R::Patch) -> Result<R, GatewayError> {
        let url = self.record_url(R::COLLECTION, id);
        debug!(url = %url, "Patching record");

        let response = self.client.patch(&url).json(fields).send().await?;
        let response = ensure_success(response, "patch").await?;
        Ok(response.json().await?)
    }

    async fn delete<R: Deletable>(&self, id: i64) -> Result<(), GatewayError> {
        let url = self.record_url(R::COLLECTION, id);
        debug!(url = %url, "Deleting record");

        let response = self.client.delete(&url).send().await?;
        ensure_success(response, "delete").await?;
        Ok(())
    }
}
