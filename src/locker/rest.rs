use super::auth::LockerAuth;
use super::types::PageEnvelope;
use crate::catalog::ModuleCatalog;
use crate::config::{Config, Credentials};
use crate::engine::{MentorAccumulator, MentorReport, ProgressAccumulator, ProgressSummary};
use crate::error::{LockerError, Result};
use anyhow::Context;
use async_trait::async_trait;
use futures_util::future;
use futures_util::stream::{self, Stream, TryStreamExt};
use reqwest::Client;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Status and full body of one GET.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Blocking-per-request GET. Errors are network-level failures only;
/// HTTP status codes come back inside `HttpResponse`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str, headers: &[(String, String)]) -> anyhow::Result<HttpResponse>;
}

pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .pool_max_idle_per_host(4)
            .timeout(timeout)
            .build()
            .map_err(|e| LockerError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str, headers: &[(String, String)]) -> anyhow::Result<HttpResponse> {
        let mut req = self.client.get(url);
        for (k, v) in headers {
            req = req.header(k, v);
        }
        let resp = req.send().await.context("GET statements failed")?;
        let status = resp.status().as_u16();
        let body = resp.text().await.context("failed to read statements body")?;
        Ok(HttpResponse { status, body })
    }
}

/// Pagination state: the next URL to fetch, or nothing left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cursor {
    Fetching(String),
    Done,
}

/// Client for a Learning Locker style statement store.
pub struct LockerClient {
    config: Config,
    auth: LockerAuth,
    transport: Arc<dyn Transport>,
}

impl LockerClient {
    pub fn new(config: Config, credentials: &Credentials, transport: Arc<dyn Transport>) -> Self {
        let auth = LockerAuth::new(credentials, &config.api_version);
        Self {
            config,
            auth,
            transport,
        }
    }

    /// Config from `path`, credentials from the environment, reqwest transport.
    pub fn from_file(path: &Path) -> Result<Self> {
        let config = Config::load(path)?;
        let credentials = Credentials::from_env()?;
        let transport = ReqwestTransport::new(Duration::from_millis(config.request_timeout_ms))?;
        Ok(Self::new(config, &credentials, Arc::new(transport)))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn progress_url(&self, username: &str) -> String {
        self.config.progress_url(username)
    }

    pub fn mentor_url(&self) -> String {
        self.config.mentor_url()
    }

    /// Fetch and decode one page. A non-OK status yields an empty page,
    /// which also ends pagination.
    async fn fetch_page(&self, url: &str) -> Result<PageEnvelope> {
        let resp = self
            .transport
            .get(url, &self.auth.headers())
            .await
            .map_err(|e| LockerError::Transport {
                url: url.to_string(),
                source: e.into(),
            })?;

        if !resp.is_ok() {
            tracing::warn!(
                url,
                status = resp.status,
                "statement store returned non-OK status, treating page as empty"
            );
            return Ok(PageEnvelope::default());
        }

        let page: PageEnvelope =
            serde_json::from_str(&resp.body).map_err(|source| LockerError::Decode {
                url: url.to_string(),
                source,
            })?;
        tracing::debug!(
            url,
            statements = page.statements.len(),
            more = %page.more,
            "fetched statement page"
        );
        Ok(page)
    }

    async fn advance(&self, cursor: Cursor) -> Result<Option<(PageEnvelope, Cursor)>> {
        let url = match cursor {
            Cursor::Fetching(url) => url,
            Cursor::Done => return Ok(None),
        };
        let page = self.fetch_page(&url).await?;
        let next = match page.cursor() {
            Some(more) => Cursor::Fetching(self.config.continuation_url(more)),
            None => Cursor::Done,
        };
        Ok(Some((page, next)))
    }

    /// Lazy, strictly sequential page sequence starting at `start`. Each
    /// page's `more` link is only known once it has been decoded, so the
    /// next fetch never begins before the previous one finishes.
    pub fn pages(&self, start: String) -> impl Stream<Item = Result<PageEnvelope>> + '_ {
        stream::try_unfold(Cursor::Fetching(start), move |cursor| self.advance(cursor))
    }

    /// Every module's progress for `username`, with untouched catalog
    /// modules filled in at zero.
    pub async fn progress(
        &self,
        username: &str,
        catalog: &ModuleCatalog,
    ) -> Result<Vec<ProgressSummary>> {
        let acc = self
            .pages(self.progress_url(username))
            .try_fold(ProgressAccumulator::default(), |acc, page| {
                future::ready(acc.absorb(&page.statements))
            })
            .await?;
        tracing::info!(username, facts = acc.fact_count(), "collected learner progress");
        Ok(acc.finish(catalog))
    }

    /// Progress for every learner that appears as an actor in the store.
    pub async fn mentor(&self, catalog: &ModuleCatalog) -> Result<MentorReport> {
        let acc = self
            .pages(self.mentor_url())
            .try_fold(MentorAccumulator::default(), |acc, page| {
                future::ready(acc.absorb(&page.statements))
            })
            .await?;
        tracing::info!(learners = acc.user_count(), "collected mentor progress");
        Ok(acc.finish(catalog))
    }
}
