use crate::models::{H1Rating, H1Stats, H2Stats, ImageAltStats};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

// Cached selectors to avoid repeated parsing and eliminate unwrap() calls
static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("title selector should be valid"));
static META_DESC_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("meta[name='description']").expect("meta description selector should be valid")
});
static H1_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1").expect("h1 selector should be valid"));
static H2_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h2").expect("h2 selector should be valid"));
static IMG_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("img").expect("img selector should be valid"));
static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a").expect("anchor selector should be valid"));
static BODY_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("body").expect("body selector should be valid"));

/// Structural signals extracted from one page's markup. Absent elements
/// degrade to empty strings and zero counts; malformed HTML never fails.
#[derive(Debug, Clone)]
pub struct PageSignals {
    pub title: String,
    pub meta_description: String,
    pub h1: H1Stats,
    pub h2: H2Stats,
    pub image_alts: ImageAltStats,
    pub internal_links: usize,
    pub external_links: usize,
    pub body_text: String,
}

/// Parses `html` and extracts every signal the report needs. `url` is the
/// originally requested URL, used only to classify links.
pub fn extract_signals(html: &str, url: &str) -> PageSignals {
    let document = Html::parse_document(html);

    let title = extract_title(&document);
    let meta_description = extract_meta_description(&document);

    let h1_texts = extract_heading_texts(&document, &H1_SELECTOR);
    let h2_texts = extract_heading_texts(&document, &H2_SELECTOR);

    let image_alts = extract_image_alts(&document);
    let (internal_links, external_links) = classify_links(&document, url);

    PageSignals {
        title,
        meta_description,
        h1: H1Stats {
            count: h1_texts.len(),
            rating: H1Rating::from_count(h1_texts.len()),
            texts: h1_texts,
        },
        h2: H2Stats {
            count: h2_texts.len(),
            texts: h2_texts,
        },
        image_alts,
        internal_links,
        external_links,
        body_text: extract_body_text(&document),
    }
}

fn extract_title(document: &Html) -> String {
    document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

fn extract_meta_description(document: &Html) -> String {
    document
        .select(&META_DESC_SELECTOR)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|s| s.to_string())
        .unwrap_or_default()
}

fn extract_heading_texts(document: &Html, selector: &Selector) -> Vec<String> {
    document
        .select(selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .collect()
}

fn extract_image_alts(document: &Html) -> ImageAltStats {
    let mut total = 0;
    let mut missing_list = Vec::new();

    for element in document.select(&IMG_SELECTOR) {
        total += 1;
        // An absent alt attribute is a defect; alt="" is not.
        if element.value().attr("alt").is_none() {
            missing_list.push(element.value().attr("src").unwrap_or("").to_string());
        }
    }

    ImageAltStats {
        total,
        missing: missing_list.len(),
        missing_list,
    }
}

/// A link is internal iff its href starts with `/` or contains the full
/// requested URL as a substring; any other link with an href is external.
/// Anchors without an href count toward neither.
fn classify_links(document: &Html, url: &str) -> (usize, usize) {
    let mut internal = 0;
    let mut external = 0;

    for element in document.select(&ANCHOR_SELECTOR) {
        match element.value().attr("href") {
            Some(href) if href.starts_with('/') || href.contains(url) => internal += 1,
            Some(_) => external += 1,
            None => {}
        }
    }

    (internal, external)
}

fn extract_body_text(document: &Html) -> String {
    document
        .select(&BODY_SELECTOR)
        .next()
        .map(|el| el.text().collect::<String>())
        .unwrap_or_default()
}
