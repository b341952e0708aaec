use std::ffi::OsStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption;
use headless_chrome::{Browser, LaunchOptions, Tab};
use tokio::time::sleep;
use tracing::info;

/// Fixed user agent; intentionally static so runs are comparable.
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// The page exposes no readiness signal, so we give client-side rendering a
/// fixed window after navigation.
pub const SETTLE_DELAY: Duration = Duration::from_secs(3);

/// How long the window stays open after the report, so a human can look at
/// the final page state.
pub const OBSERVE_DELAY: Duration = Duration::from_secs(5);

/// One rendered page held open in a browser.
///
/// `close` must be called exactly once per session; `run_scoped` enforces
/// that for both the success and the failure path.
pub trait PageSession {
    /// The rendered page source, as the browser currently sees it.
    fn source(&self) -> Result<String>;
    /// Full-page PNG screenshot.
    fn screenshot(&self) -> Result<Vec<u8>>;
    fn close(&mut self) -> Result<()>;
}

/// Runs `body` against the session and closes the session on every exit
/// path. A failure inside `body` is returned to the caller only after the
/// close has happened.
pub fn run_scoped<S: PageSession, T>(
    session: &mut S,
    body: impl FnOnce(&mut S) -> Result<T>,
) -> Result<T> {
    let outcome = body(session);
    let closed = session.close();
    match (outcome, closed) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(e)) => Err(e),
        // The body error wins; a close error on top of it is secondary.
        (Err(e), _) => Err(e),
    }
}

pub struct ChromeSession {
    // Taken on close; the Chrome process also dies when this drops.
    browser: Option<Browser>,
    tab: Arc<Tab>,
}

impl ChromeSession {
    /// Launches Chrome with the fixed probe configuration, navigates to
    /// `url` and waits out the settle delay before handing the session back.
    pub async fn open(url: &str) -> Result<Self> {
        let ua_arg = format!("--user-agent={}", USER_AGENT);
        let args = vec![
            OsStr::new("--disable-gpu"),
            OsStr::new("--no-sandbox"),
            OsStr::new("--window-size=1920,1080"),
            OsStr::new(&ua_arg),
        ];

        // Headful on purpose: this is a look-at-the-page tool.
        let browser = Browser::new(LaunchOptions {
            headless: false,
            window_size: Some((1920, 1080)),
            args,
            ..Default::default()
        })?;

        let tab = browser.new_tab()?;
        info!("Navigating to: {}", url);
        tab.navigate_to(url)?;
        tab.wait_until_navigated()?;
        sleep(SETTLE_DELAY).await;

        Ok(Self {
            browser: Some(browser),
            tab,
        })
    }
}

impl PageSession for ChromeSession {
    fn source(&self) -> Result<String> {
        self.tab.get_content()
    }

    fn screenshot(&self) -> Result<Vec<u8>> {
        self.tab
            .capture_screenshot(CaptureScreenshotFormatOption::Png, None, None, true)
    }

    fn close(&mut self) -> Result<()> {
        if let Some(browser) = self.browser.take() {
            println!("\nClosing browser in 5 seconds...");
            std::thread::sleep(OBSERVE_DELAY);
            drop(browser);
            info!("Browser closed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    struct MockSession {
        closes: usize,
        fail_source: bool,
    }

    impl PageSession for MockSession {
        fn source(&self) -> Result<String> {
            if self.fail_source {
                Err(anyhow!("tab went away"))
            } else {
                Ok("<html><body></body></html>".to_string())
            }
        }

        fn screenshot(&self) -> Result<Vec<u8>> {
            Ok(Vec::new())
        }

        fn close(&mut self) -> Result<()> {
            self.closes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_run_scoped_closes_once_on_success() {
        let mut session = MockSession {
            closes: 0,
            fail_source: false,
        };
        let result = run_scoped(&mut session, |s| s.source());
        assert!(result.is_ok());
        assert_eq!(session.closes, 1);
    }

    #[test]
    fn test_run_scoped_closes_once_when_body_fails() {
        let mut session = MockSession {
            closes: 0,
            fail_source: false,
        };
        // Fault injected after the source fetch, where parsing would run.
        let result: Result<()> = run_scoped(&mut session, |s| {
            let _html = s.source()?;
            Err(anyhow!("parse step failed"))
        });
        assert!(result.is_err());
        assert_eq!(session.closes, 1);
    }

    #[test]
    fn test_run_scoped_closes_once_when_source_fails() {
        let mut session = MockSession {
            closes: 0,
            fail_source: true,
        };
        let result = run_scoped(&mut session, |s| s.source());
        assert!(result.is_err());
        assert_eq!(session.closes, 1);
    }
}
