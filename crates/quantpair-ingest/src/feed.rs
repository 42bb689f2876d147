//! Feed connectors.

use crate::error::ConnectionError;
use async_trait::async_trait;
use futures::StreamExt;
use futures::stream::BoxStream;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::debug;

/// Raw text messages from one live connection.
///
/// The stream ends, or yields an error, when the connection is lost.
pub type FeedStream = BoxStream<'static, Result<String, ConnectionError>>;

/// Opens a live trade feed for a single symbol.
#[async_trait]
pub trait FeedConnector: Send + Sync + 'static {
    /// Connects to the trade feed for `symbol`.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    async fn connect(&self, symbol: &str) -> Result<FeedStream, ConnectionError>;
}

/// Binance public trade stream over WebSocket.
#[derive(Debug, Clone)]
pub struct BinanceTradeFeed {
    base_url: String,
}

impl Default for BinanceTradeFeed {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_URL)
    }
}

impl BinanceTradeFeed {
    /// Public spot endpoint.
    pub const DEFAULT_BASE_URL: &'static str = "wss://stream.binance.com:9443/ws";

    /// Creates a feed rooted at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Returns the stream URL for `symbol`.
    #[must_use]
    pub fn stream_url(&self, symbol: &str) -> String {
        format!("{}/{}@trade", self.base_url, symbol.to_ascii_lowercase())
    }
}

#[async_trait]
impl FeedConnector for BinanceTradeFeed {
    async fn connect(&self, symbol: &str) -> Result<FeedStream, ConnectionError> {
        let url = self.stream_url(symbol);
        let (socket, _response) =
            connect_async(url.as_str())
                .await
                .map_err(|e| ConnectionError::Connect {
                    url: url.clone(),
                    reason: e.to_string(),
                })?;
        debug!(%url, "WebSocket connected");

        let stream = socket.filter_map(|message| async move {
            match message {
                Ok(Message::Text(text)) => Some(Ok(text.as_str().to_owned())),
                Ok(Message::Binary(bytes)) => Some(Ok(String::from_utf8_lossy(&bytes).into_owned())),
                Ok(Message::Close(frame)) => Some(Err(ConnectionError::Closed(
                    frame.map_or_else(|| "no reason".to_string(), |f| f.reason.to_string()),
                ))),
                Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_)) => None,
                Err(e) => Some(Err(ConnectionError::Protocol(e.to_string()))),
            }
        });
        Ok(stream.boxed())
    }
}
