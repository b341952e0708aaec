use scraper::{ElementRef, Html};

use crate::probes::{self, Category, ProbeSet};

pub const TITLE_PREVIEW: usize = 50;
pub const CONTENT_PREVIEW: usize = 80;
const ALT_PREVIEW: usize = 30;
const SRC_PREVIEW: usize = 60;
const LINK_TEXT_PREVIEW: usize = 30;
const HREF_PREVIEW: usize = 50;
const IMAGE_SAMPLES: usize = 3;
const LINK_SAMPLES: usize = 5;

/// One probe that matched: how many elements, and what the first one
/// looks like.
#[derive(Debug)]
pub struct ProbeHit {
    pub selector: &'static str,
    pub count: usize,
    pub sample: Sample,
}

#[derive(Debug)]
pub enum Sample {
    /// Tag/class shape of a container-style match.
    Structure {
        tag: String,
        classes: String,
        child_count: usize,
    },
    Text(String),
    /// Excerpt text, rendered with a trailing ellipsis.
    Excerpt(String),
    Dated {
        text: String,
        datetime: Option<String>,
    },
}

/// Runs every probe of a set against the document, in declared order.
/// A probe with zero matches produces nothing at all.
pub fn run_probe_set(document: &Html, set: &ProbeSet) -> Vec<ProbeHit> {
    set.probes
        .iter()
        .filter_map(|probe| {
            let mut matches = document.select(&probe.selector);
            let first = matches.next()?;
            let count = 1 + matches.count();
            Some(ProbeHit {
                selector: probe.source,
                count,
                sample: sample(set.category, first),
            })
        })
        .collect()
}

fn sample(category: Category, first: ElementRef) -> Sample {
    match category {
        Category::Article => Sample::Structure {
            tag: first.value().name().to_string(),
            classes: class_list(first),
            child_count: first
                .children()
                .filter(|child| child.value().is_element())
                .count(),
        },
        Category::Title => Sample::Text(truncate_chars(&collapsed_text(first), TITLE_PREVIEW)),
        Category::Date => Sample::Dated {
            text: collapsed_text(first),
            datetime: first.value().attr("datetime").map(str::to_string),
        },
        Category::Content => {
            Sample::Excerpt(truncate_chars(&collapsed_text(first), CONTENT_PREVIEW))
        }
        Category::CategoryTag => Sample::Text(collapsed_text(first)),
    }
}

#[derive(Debug)]
pub struct ImageSample {
    pub alt: String,
    pub src: String,
}

#[derive(Debug)]
pub struct ImageReport {
    pub total: usize,
    pub samples: Vec<ImageSample>,
}

/// Counts every `img` on the page and keeps the first few as samples.
pub fn images(document: &Html) -> ImageReport {
    let mut total = 0;
    let mut samples = Vec::new();
    for el in document.select(&probes::IMAGES) {
        total += 1;
        if samples.len() < IMAGE_SAMPLES {
            samples.push(ImageSample {
                alt: truncate_chars(el.value().attr("alt").unwrap_or(""), ALT_PREVIEW),
                src: truncate_chars(el.value().attr("src").unwrap_or(""), SRC_PREVIEW),
            });
        }
    }
    ImageReport { total, samples }
}

#[derive(Debug)]
pub struct LinkSample {
    pub text: String,
    pub href: String,
}

#[derive(Debug)]
pub struct LinkReport {
    pub total: usize,
    pub samples: Vec<LinkSample>,
}

/// Counts every `a[href]` on the page and keeps the first few as samples.
pub fn links(document: &Html) -> LinkReport {
    let mut total = 0;
    let mut samples = Vec::new();
    for el in document.select(&probes::LINKS) {
        total += 1;
        if samples.len() < LINK_SAMPLES {
            samples.push(LinkSample {
                text: truncate_chars(&collapsed_text(el), LINK_TEXT_PREVIEW),
                href: truncate_chars(el.value().attr("href").unwrap_or(""), HREF_PREVIEW),
            });
        }
    }
    LinkReport { total, samples }
}

/// Descendant text with every segment trimmed, concatenated.
pub fn collapsed_text(el: ElementRef) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Class names from the raw attribute, in source order, duplicates kept.
/// (`Element::classes()` is backed by a sorted, deduplicated set.)
pub fn class_names(el: ElementRef<'_>) -> impl Iterator<Item = &str> {
    el.value().attr("class").unwrap_or("").split_whitespace()
}

pub fn class_list(el: ElementRef) -> String {
    class_names(el).collect::<Vec<_>>().join(" ")
}

/// Char-boundary-safe prefix; the page may carry multibyte text.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
