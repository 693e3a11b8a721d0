use crate::error::{FetchError, Result};
use crate::page::PageTree;
use crate::ReferenceFiles;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Client for the page API: serves page trees and the reference HTML export
/// of a page hierarchy.
pub struct ApiClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

#[derive(Deserialize)]
struct ExportResponse {
    files: BTreeMap<String, String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, 30)
    }

    pub fn with_timeout(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent("htmlparity/0.1 (https://github.com/trapdoorsec/htmlparity)")
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.div_ceil(2)))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        let mut base_url = Url::parse(base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        // Url::join drops the last segment unless the base ends with a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            client,
            base_url,
            token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn fetch_page(&self, id: &str) -> Result<PageTree> {
        let url = self.endpoint(&format!("pages/{}", id))?;
        debug!("Fetching page {} from {}", id, url);

        self.get_json(url, id).await
    }

    pub async fn fetch_reference_bundle(&self, root_id: &str) -> Result<ReferenceFiles> {
        let mut url = self.endpoint(&format!("exports/{}", root_id))?;
        url.query_pairs_mut().append_pair("format", "html");
        info!("Downloading reference export for {}", root_id);

        let export: ExportResponse = self.get_json(url, root_id).await?;
        if export.files.is_empty() {
            return Err(FetchError::EmptyBundle(root_id.to_string()));
        }

        let files: ReferenceFiles = export
            .files
            .into_iter()
            .map(|(name, html)| (name, html.into_bytes()))
            .collect();
        info!("Reference export for {} has {} files", root_id, files.len());
        Ok(files)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| FetchError::InvalidUrl(format!("{}{}: {}", self.base_url, path, e)))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, id: &str) -> Result<T> {
        let mut request = self.client.get(url.clone());
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(id.to_string()));
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
