// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::types::{
    BagRequest, BagResponse, CuboidRequest, CuboidResponse, ErrorResponse, HealthStatus,
};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

impl ClientError {
    /// HTTP status of an API error, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Client for the cuboid service HTTP API.
#[derive(Debug, Clone)]
pub struct CuboidClient {
    base_url: String,
    client: Client,
}

impl CuboidClient {
    /// Create a client for a service listening at `base_url`, e.g. `http://127.0.0.1:8080`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let response = self.client.get(self.url("/health")).send().await?;
        decode(response).await
    }

    /// List every cuboid across all bags.
    pub async fn list_cuboids(&self) -> Result<Vec<CuboidResponse>, ClientError> {
        let response = self.client.get(self.url("/cuboids")).send().await?;
        decode(response).await
    }

    pub async fn get_cuboid(&self, id: i64) -> Result<CuboidResponse, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/cuboids/{}", id)))
            .send()
            .await?;
        decode(response).await
    }

    /// Place a new cuboid in a bag.
    ///
    /// Fails with status 422 when the bag's available volume is smaller than
    /// the cuboid's volume.
    pub async fn create_cuboid(&self, request: &CuboidRequest) -> Result<CuboidResponse, ClientError> {
        debug!("Creating cuboid in bag {:?}", request.bag_id);
        let response = self
            .client
            .post(self.url("/cuboids"))
            .json(request)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn update_cuboid(
        &self,
        id: i64,
        request: &CuboidRequest,
    ) -> Result<CuboidResponse, ClientError> {
        let response = self
            .client
            .put(self.url(&format!("/cuboids/{}", id)))
            .json(request)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn delete_cuboid(&self, id: i64) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/cuboids/{}", id)))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    pub async fn list_bags(&self) -> Result<Vec<BagResponse>, ClientError> {
        let response = self.client.get(self.url("/bags")).send().await?;
        decode(response).await
    }

    pub async fn get_bag(&self, id: i64) -> Result<BagResponse, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/bags/{}", id)))
            .send()
            .await?;
        decode(response).await
    }

    pub async fn create_bag(&self, request: &BagRequest) -> Result<BagResponse, ClientError> {
        let response = self
            .client
            .post(self.url("/bags"))
            .json(request)
            .send()
            .await?;
        decode(response).await
    }

    /// Delete a bag together with every cuboid it holds.
    pub async fn delete_bag(&self, id: i64) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/bags/{}", id)))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}

async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorResponse>(&text) {
        Ok(body) => body.message,
        Err(_) if text.is_empty() => status.to_string(),
        Err(_) => text,
    };

    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    Ok(check(response).await?.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let client = CuboidClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.url("/bags"), "http://localhost:8080/bags");
    }

    #[test]
    fn test_api_error_status() {
        let err = ClientError::Api { status: 404, message: "Object Bag not found!".into() };
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "API error (404): Object Bag not found!");
    }
}
