//! Fire-and-forget geography loading
//!
//! The payload is fetched once, off the render path. The result travels
//! over a channel and is picked up by the map on its next frame. There is
//! no retry and no timeout: a failed load leaves the map on its placeholder.

use crate::{data::geography::Geography, MapError, Result};
use async_trait::async_trait;
use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Shared async HTTP client for geography downloads
pub(crate) static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .user_agent(concat!("hubmap/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
});

/// Where the world geography comes from
#[async_trait]
pub trait GeographySource: Send + Sync {
    async fn fetch(&self) -> Result<Geography>;

    /// Human-readable origin, for logs
    fn describe(&self) -> String;
}

/// Downloads a TopoJSON/GeoJSON payload with a plain GET
#[derive(Debug, Clone)]
pub struct HttpGeographySource {
    url: String,
}

impl HttpGeographySource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl GeographySource for HttpGeographySource {
    async fn fetch(&self) -> Result<Geography> {
        log::debug!("Requesting geography from {}", self.url);

        let response = HTTP_CLIENT.get(&self.url).send().await?.error_for_status()?;
        let payload: serde_json::Value = response.json().await?;
        Geography::from_value(payload)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Payload already in memory (bundled asset, tests)
#[derive(Debug, Clone)]
pub struct StaticGeographySource {
    payload: String,
}

impl StaticGeographySource {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }
}

#[async_trait]
impl GeographySource for StaticGeographySource {
    async fn fetch(&self) -> Result<Geography> {
        Geography::from_json_str(&self.payload)
    }

    fn describe(&self) -> String {
        format!("inline payload ({} bytes)", self.payload.len())
    }
}

/// Fetches from `source`, logging the outcome
pub async fn fetch_geography(source: &dyn GeographySource) -> Result<Geography> {
    let origin = source.describe();
    match source.fetch().await {
        Ok(geography) => {
            log::info!(
                "Loaded {} country features from {}",
                geography.len(),
                origin
            );
            if let Some(extent) = geography.extent() {
                log::debug!(
                    "Geography extent: ({:.2}, {:.2}) .. ({:.2}, {:.2})",
                    extent.min().x,
                    extent.min().y,
                    extent.max().x,
                    extent.max().y
                );
            }
            Ok(geography)
        }
        Err(e) => {
            log::error!("Map load error from {}: {}", origin, e);
            Err(e)
        }
    }
}

/// Receiving end of a single geography load
#[derive(Debug)]
pub struct GeographyLoader {
    result_rx: Receiver<Result<Geography>>,
    finished: bool,
}

impl GeographyLoader {
    /// A loader fed by whoever holds the returned sender
    pub fn channel() -> (Sender<Result<Geography>>, Self) {
        let (result_tx, result_rx) = unbounded();
        (
            result_tx,
            Self {
                result_rx,
                finished: false,
            },
        )
    }

    /// Starts the fetch on the current tokio runtime
    ///
    /// Without a runtime the loader resolves immediately to an error.
    #[cfg(feature = "tokio-runtime")]
    pub fn spawn(source: Arc<dyn GeographySource>) -> Self {
        let (result_tx, loader) = Self::channel();

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    let result = fetch_geography(source.as_ref()).await;
                    // The map may have been dropped meanwhile
                    let _ = result_tx.send(result);
                });
            }
            Err(e) => {
                log::error!("Cannot start geography load: {}", e);
                let _ = result_tx.send(Err(MapError::Loader(format!(
                    "no tokio runtime available: {}",
                    e
                ))));
            }
        }

        loader
    }

    /// Takes the result if it has arrived. Yields at most one result.
    pub fn try_take(&mut self) -> Option<Result<Geography>> {
        if self.finished {
            return None;
        }

        match self.result_rx.try_recv() {
            Ok(result) => {
                self.finished = true;
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.finished = true;
                Some(Err(MapError::Loader(
                    "geography load ended without a result".to_string(),
                )))
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
