use crate::configuration::Settings;
use crate::models::{ApiTarget, Comic};
use log::debug;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use std::future::Future;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest_middleware::Error),
    #[error("bad response: {0}")]
    Response(#[from] reqwest::Error),
    #[error("timed out")]
    Timeout,
}

/// Somewhere comics can be looked up by number.
pub trait ComicSource: Send + Sync + 'static {
    fn fetch(&self, target: ApiTarget) -> impl Future<Output = Result<Comic, FetchError>> + Send;
}

/// Comic API reached over HTTP as `GET <base>?comic=<id|latest>`.
#[derive(Clone)]
pub struct HttpComicSource {
    base_url: Url,
    client: ClientWithMiddleware,
}

impl HttpComicSource {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(settings.request_timeout())
            .build()?;

        // Transient failures get retried with increasing intervals
        let retry_policy =
            ExponentialBackoff::builder().build_with_max_retries(settings.max_retries);
        let client = ClientBuilder::new(inner)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            base_url: settings.api_url.clone(),
            client,
        })
    }

    pub fn comic_url(&self, target: ApiTarget) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut().append_pair("comic", &target.to_string());
        url
    }
}

impl ComicSource for HttpComicSource {
    fn fetch(&self, target: ApiTarget) -> impl Future<Output = Result<Comic, FetchError>> + Send {
        let url = self.comic_url(target);
        let client = self.client.clone();
        async move {
            debug!("GET {}", url);
            let comic = client
                .get(url)
                .send()
                .await?
                .error_for_status()?
                .json::<Comic>()
                .await?;
            Ok(comic)
        }
    }
}
