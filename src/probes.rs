use once_cell::sync::Lazy;
use scraper::Selector;

/// Shape of the sample reported for a category's first match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Container-style: report tag/class structure and child count.
    Article,
    /// Trimmed text, 50-char preview.
    Title,
    /// Trimmed text plus the `datetime` attribute when present.
    Date,
    /// Trimmed text, 80-char preview.
    Content,
    /// Trimmed text, untruncated.
    CategoryTag,
}

pub struct Probe {
    pub source: &'static str,
    pub selector: Selector,
}

impl Probe {
    fn new(source: &'static str) -> Self {
        Self {
            source,
            selector: Selector::parse(source).unwrap(),
        }
    }
}

pub struct ProbeSet {
    pub category: Category,
    pub heading: &'static str,
    pub probes: Vec<Probe>,
}

fn set(category: Category, heading: &'static str, selectors: &[&'static str]) -> ProbeSet {
    ProbeSet {
        category,
        heading,
        probes: selectors.iter().copied().map(Probe::new).collect(),
    }
}

/// The probe tables are configuration, not logic: each category is an
/// ordered list of heuristic selectors, tried independently in declared
/// order. Probes never short-circuit each other -- the point is to show a
/// human everything that might match, so they can pick selectors for a real
/// scraper afterwards.
pub static PROBE_SETS: Lazy<Vec<ProbeSet>> = Lazy::new(|| {
    vec![
        set(
            Category::Article,
            "1. Article container candidates:",
            &[
                "article",
                ".post",
                ".entry",
                ".blog-post",
                ".article-item",
                r#"[class*="post"]"#,
                ".card",
                ".item",
            ],
        ),
        set(
            Category::Title,
            "2. Title candidates:",
            &[
                "h1",
                "h2",
                "h2.entry-title",
                "h2.post-title",
                ".title",
                "article h2",
                "h2 a",
                ".entry-title",
            ],
        ),
        set(
            Category::Date,
            "3. Date candidates:",
            &[
                "time",
                ".date",
                ".published",
                ".entry-date",
                "[datetime]",
                ".post-date",
            ],
        ),
        set(
            Category::Content,
            "4. Body text / excerpt candidates:",
            &[
                ".entry-content",
                ".post-content",
                ".excerpt",
                ".summary",
                "article p",
                ".description",
            ],
        ),
        set(
            Category::CategoryTag,
            "5. Category / tag candidates:",
            &[
                ".category",
                ".tag",
                ".categories",
                ".tags",
                r#"a[rel="category"]"#,
                r#"a[rel="tag"]"#,
                ".cat-links",
            ],
        ),
    ]
});

pub static IMAGES: Lazy<Selector> = Lazy::new(|| Selector::parse("img").unwrap());
pub static LINKS: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());
pub static BODY: Lazy<Selector> = Lazy::new(|| Selector::parse("body").unwrap());
pub static CLASSED: Lazy<Selector> = Lazy::new(|| Selector::parse("[class]").unwrap());
