use std::collections::HashMap;

use scraper::{ElementRef, Html};

use crate::extract::{self, ImageReport, LinkReport, ProbeHit, Sample};
use crate::probes::{self, ProbeSet};

pub const TOP_CLASSES: usize = 10;

/// One direct child of `<body>`.
#[derive(Debug, PartialEq, Eq)]
pub struct OutlineEntry {
    pub tag: String,
    pub id: Option<String>,
    pub classes: String,
}

/// Enumerates the direct element children of `<body>`, in document order.
/// Deeper descendants are deliberately not walked.
pub fn body_outline(document: &Html) -> Vec<OutlineEntry> {
    let body = match document.select(&probes::BODY).next() {
        Some(body) => body,
        None => return Vec::new(),
    };
    body.children()
        .filter_map(ElementRef::wrap)
        .map(|child| OutlineEntry {
            tag: child.value().name().to_string(),
            id: child.value().id().map(str::to_string),
            classes: extract::class_list(child),
        })
        .collect()
}

/// Counts every class name on every element, sorted by count descending.
/// The sort is stable, so ties keep first-encounter order.
pub fn class_frequency(document: &Html) -> Vec<(String, usize)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for el in document.select(&probes::CLASSED) {
        // Raw attribute order, duplicates included, so counts and the
        // stable tie-break follow the document rather than a sorted set.
        for class in extract::class_names(el) {
            match index.get(class) {
                Some(&slot) => counts[slot].1 += 1,
                None => {
                    index.insert(class.to_string(), counts.len());
                    counts.push((class.to_string(), 1));
                }
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

pub fn top_classes(document: &Html, limit: usize) -> Vec<(String, usize)> {
    let mut counts = class_frequency(document);
    counts.truncate(limit);
    counts
}

// ---------------------------------------------------------------------------
// Console rendering: numbered sections 1-10, matching the tool's report
// layout. The *_lines helpers exist so the shapes are assertable.
// ---------------------------------------------------------------------------

pub fn print_banner(url: &str) {
    println!("\n{}", "=".repeat(80));
    println!("[Element survey: {}]", url);
    println!("{}", "=".repeat(80));
}

pub fn print_footer() {
    println!("\n{}", "=".repeat(80));
    println!("[Analysis complete!]");
    println!("{}", "=".repeat(80));
}

pub fn probe_lines(hit: &ProbeHit) -> Vec<String> {
    match &hit.sample {
        Sample::Structure {
            tag,
            classes,
            child_count,
        } => vec![
            format!("  ✓ Selector '{}': {} matches", hit.selector, hit.count),
            format!("    Structure: <{} class='{}'>", tag, classes),
            format!("    Direct children: {}", child_count),
        ],
        Sample::Text(text) => vec![
            format!("  ✓ '{}': {} matches", hit.selector, hit.count),
            format!("    Sample: {}", text),
        ],
        Sample::Excerpt(text) => vec![
            format!("  ✓ '{}': {} matches", hit.selector, hit.count),
            format!("    Sample: {}...", text),
        ],
        Sample::Dated { text, datetime } => {
            let mut lines = vec![
                format!("  ✓ '{}': {} matches", hit.selector, hit.count),
                format!("    Sample: {}", text),
            ];
            if let Some(dt) = datetime {
                lines.push(format!("    datetime attribute: {}", dt));
            }
            lines
        }
    }
}

pub fn print_probe_section(set: &ProbeSet, hits: &[ProbeHit]) {
    println!("\n{}", set.heading);
    for hit in hits {
        for line in probe_lines(hit) {
            println!("{}", line);
        }
    }
}

pub fn image_lines(report: &ImageReport) -> Vec<String> {
    let mut lines = vec![format!("  Total images: {}", report.total)];
    for (i, img) in report.samples.iter().enumerate() {
        lines.push(format!("  {}. alt='{}' src='{}'", i + 1, img.alt, img.src));
    }
    lines
}

pub fn print_image_section(report: &ImageReport) {
    println!("\n6. Image candidates:");
    for line in image_lines(report) {
        println!("{}", line);
    }
}

pub fn link_lines(report: &LinkReport) -> Vec<String> {
    let mut lines = vec![format!("  Total links: {}", report.total)];
    for (i, link) in report.samples.iter().enumerate() {
        lines.push(format!("  {}. {} -> {}", i + 1, link.text, link.href));
    }
    lines
}

pub fn print_link_section(report: &LinkReport) {
    println!("\n7. Link candidates:");
    for line in link_lines(report) {
        println!("{}", line);
    }
}

pub fn outline_lines(entries: &[OutlineEntry]) -> Vec<String> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let mut line = format!("  {}. <{}>", i + 1, entry.tag);
            if let Some(id) = &entry.id {
                line.push_str(&format!(" id='{}'", id));
            }
            if !entry.classes.is_empty() {
                line.push_str(&format!(" class='{}'", entry.classes));
            }
            line
        })
        .collect()
}

pub fn print_outline(entries: &[OutlineEntry]) {
    println!("\n8. Body outline (direct children of <body>):");
    for line in outline_lines(entries) {
        println!("{}", line);
    }
}

pub fn print_class_frequency(top: &[(String, usize)]) {
    println!("\n9. Top {} class names:", TOP_CLASSES);
    for (i, (name, count)) in top.iter().enumerate() {
        println!("  {:2}. '{}' - {} uses", i + 1, name, count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract;
    use crate::probes::{Category, PROBE_SETS};

    #[test]
    fn test_body_outline_is_direct_children_only() {
        let html = r#"<html><body>
            <header id="top" class="site-header dark"><nav class="menu"></nav></header>
            <main><article class="post"></article></main>
            <footer></footer>
        </body></html>"#;
        let document = Html::parse_document(html);
        let outline = body_outline(&document);

        assert_eq!(
            outline,
            vec![
                OutlineEntry {
                    tag: "header".to_string(),
                    id: Some("top".to_string()),
                    classes: "site-header dark".to_string(),
                },
                OutlineEntry {
                    tag: "main".to_string(),
                    id: None,
                    classes: String::new(),
                },
                OutlineEntry {
                    tag: "footer".to_string(),
                    id: None,
                    classes: String::new(),
                },
            ]
        );
    }

    #[test]
    fn test_class_frequency_sorted_descending_with_stable_ties() {
        let html = r#"<html><body>
            <div class="a b"></div>
            <div class="a"></div>
            <div class="a c"></div>
            <div class="b"></div>
        </body></html>"#;
        let document = Html::parse_document(html);
        let counts = class_frequency(&document);
        assert_eq!(
            counts,
            vec![
                ("a".to_string(), 3),
                ("b".to_string(), 2),
                ("c".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_class_frequency_counts_duplicates_in_attribute_order() {
        let html = r#"<html><body>
            <div class="zeta alpha"></div>
            <p class="promo promo"></p>
        </body></html>"#;
        let document = Html::parse_document(html);
        let counts = class_frequency(&document);
        // "promo" is counted per occurrence, and the tie between "zeta" and
        // "alpha" keeps attribute order, not alphabetical order.
        assert_eq!(
            counts,
            vec![
                ("promo".to_string(), 2),
                ("zeta".to_string(), 1),
                ("alpha".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_top_classes_truncates_to_limit() {
        let divs: String = (0..15)
            .map(|i| format!("<div class=\"c{}\"></div>", i))
            .collect();
        let html = format!("<html><body>{}</body></html>", divs);
        let document = Html::parse_document(&html);

        let top = top_classes(&document, TOP_CLASSES);
        assert_eq!(top.len(), TOP_CLASSES);
        // Fewer distinct classes than the limit: report them all.
        let few = Html::parse_document("<html><body><div class=\"x y\"></div></body></html>");
        assert_eq!(top_classes(&few, TOP_CLASSES).len(), 2);
    }

    #[test]
    fn test_top_classes_is_non_increasing() {
        let html = r#"<html><body>
            <p class="x"></p><p class="x"></p><p class="y z"></p><p class="z"></p>
        </body></html>"#;
        let document = Html::parse_document(html);
        let top = top_classes(&document, TOP_CLASSES);
        for pair in top.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
    }

    #[test]
    fn test_text_probe_emits_summary_plus_sample() {
        let document =
            Html::parse_document("<html><body><h2>Hello</h2></body></html>");
        let title_set = PROBE_SETS
            .iter()
            .find(|s| s.category == Category::Title)
            .unwrap();
        let hits = extract::run_probe_set(&document, title_set);
        for hit in &hits {
            let lines = probe_lines(hit);
            assert_eq!(lines.len(), 2);
            assert!(lines[0].contains("matches"));
            assert!(lines[1].starts_with("    Sample:"));
        }
    }
}
