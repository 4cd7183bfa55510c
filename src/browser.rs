//! Shared headless-browser session management for probes and screenshots

use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use tokio::task::JoinHandle;

#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error("Failed to configure browser: {0}")]
    Config(String),

    #[error("Browser error: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),
}

/// A launched headless Chromium instance plus its CDP event pump
pub struct BrowserSession {
    pub browser: Browser,
    handler: JoinHandle<()>,
}

impl BrowserSession {
    pub async fn launch() -> Result<Self, BrowserError> {
        let config = BrowserConfig::builder()
            .no_sandbox()
            .build()
            .map_err(BrowserError::Config)?;

        let (browser, mut handler) = Browser::launch(config).await?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        Ok(Self { browser, handler })
    }

    /// Close the browser and stop the event pump. Best-effort.
    pub async fn shutdown(mut self) {
        if let Err(e) = self.browser.close().await {
            tracing::debug!(error = %e, "Browser close failed");
        }
        let _ = self.browser.wait().await;
        self.handler.abort();
    }
}
