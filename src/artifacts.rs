use std::fs;

use anyhow::{Context, Result};
use scraper::Html;

use crate::html;
use crate::session::PageSession;

/// Fixed artifact filenames, silently overwritten on every run.
pub const SOURCE_FILE: &str = "coorikuya_source.html";
pub const SCREENSHOT_FILE: &str = "coorikuya_screenshot.png";

/// Writes the prettified snapshot. Deterministic for a fixed tree, so
/// re-running over the same document rewrites identical bytes.
pub fn write_snapshot(document: &Html) -> Result<()> {
    fs::write(SOURCE_FILE, html::prettify(document))
        .with_context(|| format!("writing {}", SOURCE_FILE))
}

/// Asks the live session for a full-page screenshot and writes it out.
pub fn write_screenshot<S: PageSession>(session: &S) -> Result<()> {
    let png = session.screenshot()?;
    fs::write(SCREENSHOT_FILE, png).with_context(|| format!("writing {}", SCREENSHOT_FILE))
}
