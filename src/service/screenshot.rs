//! Responsive screenshot capture across fixed viewport profiles
//!
//! One browser session is reused for all viewports. A per-viewport failure
//! yields an error-tagged entry and capture continues; a session-level failure
//! yields all entries error-tagged. Never raises.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;

use crate::browser::BrowserSession;
use crate::model::Screenshot;

/// A fixed width x height pairing used for responsive capture
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub device: &'static str,
    pub width: u32,
    pub height: u32,
    pub mobile: bool,
}

/// Capture order is fixed regardless of completion order
pub const VIEWPORTS: [Viewport; 4] = [
    Viewport { device: "Mobile", width: 375, height: 667, mobile: true },
    Viewport { device: "Tablet", width: 768, height: 1024, mobile: true },
    Viewport { device: "Laptop", width: 1366, height: 768, mobile: false },
    Viewport { device: "Desktop", width: 1920, height: 1080, mobile: false },
];

pub struct ScreenshotCapturer {
    navigation_timeout: Duration,
}

impl ScreenshotCapturer {
    pub fn new(navigation_timeout: Duration) -> Self {
        Self { navigation_timeout }
    }

    /// One entry per viewport profile, in declaration order
    pub async fn capture(&self, url: &str) -> Vec<Screenshot> {
        match self.capture_session(url).await {
            Ok(screenshots) => screenshots,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Browser session failed, tagging all viewports");
                session_failure_screenshots(&e)
            }
        }
    }

    async fn capture_session(&self, url: &str) -> Result<Vec<Screenshot>, String> {
        let session = BrowserSession::launch().await.map_err(|e| e.to_string())?;

        let result = self.capture_viewports(&session, url).await;
        session.shutdown().await;
        result
    }

    async fn capture_viewports(
        &self,
        session: &BrowserSession,
        url: &str,
    ) -> Result<Vec<Screenshot>, String> {
        let page = session
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| e.to_string())?;

        Ok(capture_each(url, |viewport| self.capture_viewport(&page, url, viewport)).await)
    }

    async fn capture_viewport(
        &self,
        page: &Page,
        url: &str,
        viewport: Viewport,
    ) -> Result<String, String> {
        let metrics = SetDeviceMetricsOverrideParams::builder()
            .width(viewport.width as i64)
            .height(viewport.height as i64)
            .device_scale_factor(1.0)
            .mobile(viewport.mobile)
            .build()
            .map_err(|e| e.to_string())?;
        page.execute(metrics).await.map_err(|e| e.to_string())?;

        tokio::time::timeout(self.navigation_timeout, async {
            page.goto(url).await.map_err(|e| e.to_string())?;
            page.wait_for_navigation().await.map_err(|e| e.to_string())?;
            Ok::<(), String>(())
        })
        .await
        .map_err(|_| format!("navigation timed out after {:?}", self.navigation_timeout))??;

        let bytes = page
            .screenshot(
                ScreenshotParams::builder()
                    .format(CaptureScreenshotFormat::Png)
                    .full_page(false)
                    .build(),
            )
            .await
            .map_err(|e| e.to_string())?;

        Ok(format!("data:image/png;base64,{}", BASE64.encode(bytes)))
    }
}

/// Drive one capture attempt per viewport in declaration order. A failed
/// attempt yields an error-tagged entry and the remaining viewports still run.
async fn capture_each<F, Fut>(url: &str, mut capture: F) -> Vec<Screenshot>
where
    F: FnMut(Viewport) -> Fut,
    Fut: std::future::Future<Output = Result<String, String>>,
{
    let mut screenshots = Vec::with_capacity(VIEWPORTS.len());
    for viewport in VIEWPORTS {
        match capture(viewport).await {
            Ok(image) => {
                tracing::debug!(url = %url, device = viewport.device, "Viewport captured");
                screenshots.push(Screenshot {
                    device: viewport.device.to_string(),
                    width: viewport.width,
                    height: viewport.height,
                    image,
                    error: None,
                });
            }
            Err(e) => {
                tracing::warn!(url = %url, device = viewport.device, error = %e, "Viewport capture failed");
                screenshots.push(failed_screenshot(&viewport, e));
            }
        }
    }
    screenshots
}

fn failed_screenshot(viewport: &Viewport, error: String) -> Screenshot {
    Screenshot {
        device: viewport.device.to_string(),
        width: viewport.width,
        height: viewport.height,
        image: String::new(),
        error: Some(error),
    }
}

/// All four viewports error-tagged, used when the browser session itself fails
pub fn session_failure_screenshots(reason: &str) -> Vec<Screenshot> {
    VIEWPORTS
        .iter()
        .map(|viewport| failed_screenshot(viewport, format!("Browser session failed: {}", reason)))
        .collect()
}
