mod artifacts;
mod extract;
mod html;
mod probes;
mod report;
mod session;

use anyhow::Result;
use clap::Parser;
use scraper::Html;
use tracing::error;

use crate::session::{ChromeSession, PageSession};

/// Drive a browser to a page and probe its DOM for likely content elements.
#[derive(Parser, Debug)]
#[command(name = "page-probe")]
struct Args {
    /// Page to survey
    url: String,
}

#[tokio::main]
async fn main() {
    // One logging context per run: `timestamp LEVEL message`.
    tracing_subscriber::fmt().with_target(false).init();

    let args = Args::parse();
    if let Err(e) = run(&args.url).await {
        // Single catch-all boundary: log the full chain, exit normally.
        // Session teardown has already happened by the time we get here.
        error!("survey failed: {:?}", e);
    }
}

async fn run(url: &str) -> Result<()> {
    let mut session = ChromeSession::open(url).await?;
    session::run_scoped(&mut session, |s| survey(url, s))
}

/// The whole report: seven extraction passes, two structure reports, two
/// artifact writes, all over one snapshot of the rendered page.
fn survey<S: PageSession>(url: &str, session: &mut S) -> Result<()> {
    let source = session.source()?;
    let document = Html::parse_document(&source);

    report::print_banner(url);

    // Sections 1-5: heuristic selector probes, one category per section.
    for set in probes::PROBE_SETS.iter() {
        let hits = extract::run_probe_set(&document, set);
        report::print_probe_section(set, &hits);
    }

    // Sections 6-7: whole-page image and link enumerations.
    report::print_image_section(&extract::images(&document));
    report::print_link_section(&extract::links(&document));

    // Sections 8-9: structural overview.
    report::print_outline(&report::body_outline(&document));
    report::print_class_frequency(&report::top_classes(&document, report::TOP_CLASSES));

    // Section 10: artifacts.
    println!("\n10. Saving artifacts:");
    artifacts::write_snapshot(&document)?;
    println!("  ✓ Saved '{}'", artifacts::SOURCE_FILE);
    artifacts::write_screenshot(session)?;
    println!("  ✓ Saved '{}'", artifacts::SCREENSHOT_FILE);

    report::print_footer();
    Ok(())
}
