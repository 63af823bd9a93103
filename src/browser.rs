//! WebDriver-backed page reader
//!
//! Scrapes the rendered move list out of a live chess page through a
//! WebDriver session. Every failure is transient from the loop's point of
//! view: the DOM may be mid-render, the page may be navigating, or the
//! driver may hiccup, and the next poll simply tries again.

use async_trait::async_trait;
use thirtyfour::prelude::*;
use tracing::info;

use crate::bot::capabilities::MoveListSource;
use crate::bot::error::CaptureError;

/// CSS selector for the rendered move nodes in the page's move list.
const MOVE_LIST_SELECTOR: &str = "wc-simple-move-list span.node-highlight-content";

/// A WebDriver session attached to the game page.
pub struct BrowserMoveList {
    driver: WebDriver,
}

impl BrowserMoveList {
    /// Open a session against a WebDriver endpoint (e.g. a local
    /// chromedriver) and navigate to the game page.
    pub async fn connect(webdriver_url: &str, game_url: &str) -> Result<Self, CaptureError> {
        let caps = DesiredCapabilities::chrome();
        let driver = WebDriver::new(webdriver_url, caps)
            .await
            .map_err(|e| CaptureError::Transient(format!("webdriver session failed: {}", e)))?;
        driver
            .goto(game_url)
            .await
            .map_err(|e| CaptureError::Transient(format!("navigation failed: {}", e)))?;
        info!("[BROWSER] Connected to {}, watching {}", webdriver_url, game_url);
        Ok(Self { driver })
    }

    /// Close the browser session.
    pub async fn close(self) {
        let _ = self.driver.quit().await;
    }
}

#[async_trait]
impl MoveListSource for BrowserMoveList {
    async fn read_moves(&mut self) -> Result<Vec<String>, CaptureError> {
        let nodes = self
            .driver
            .find_all(By::Css(MOVE_LIST_SELECTOR))
            .await
            .map_err(|e| CaptureError::Transient(e.to_string()))?;

        let mut moves = Vec::with_capacity(nodes.len());
        for node in nodes {
            let text = node
                .text()
                .await
                .map_err(|e| CaptureError::Transient(e.to_string()))?;
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                moves.push(trimmed.to_string());
            }
        }
        Ok(moves)
    }
}
