// Provider seams used by the walker

use crate::bundle::ReferenceBundle;
use crate::id::PageId;
use htmlparity_fetch::{ApiClient, FetchError, LocalSource, PageTree};
use std::future::Future;

pub trait PageSource {
    fn fetch_page(&self, id: &PageId) -> impl Future<Output = Result<PageTree, FetchError>>;
}

pub trait ReferenceSource {
    fn fetch_reference_bundle(
        &self,
        root: &PageId,
    ) -> impl Future<Output = Result<ReferenceBundle, FetchError>>;
}

impl PageSource for ApiClient {
    async fn fetch_page(&self, id: &PageId) -> Result<PageTree, FetchError> {
        ApiClient::fetch_page(self, id.as_str()).await
    }
}

impl ReferenceSource for ApiClient {
    async fn fetch_reference_bundle(&self, root: &PageId) -> Result<ReferenceBundle, FetchError> {
        ApiClient::fetch_reference_bundle(self, root.as_str())
            .await
            .map(ReferenceBundle::new)
    }
}

impl PageSource for LocalSource {
    async fn fetch_page(&self, id: &PageId) -> Result<PageTree, FetchError> {
        LocalSource::fetch_page(self, id.as_str()).await
    }
}

impl ReferenceSource for LocalSource {
    async fn fetch_reference_bundle(&self, root: &PageId) -> Result<ReferenceBundle, FetchError> {
        LocalSource::fetch_reference_bundle(self, root.as_str())
            .await
            .map(ReferenceBundle::new)
    }
}
