use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Rating of a page's `<h1>` usage, derived purely from the tag count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum H1Rating {
    Good,
    Multiple,
    Missing,
}

impl H1Rating {
    pub fn from_count(count: usize) -> Self {
        match count {
            1 => H1Rating::Good,
            0 => H1Rating::Missing,
            _ => H1Rating::Multiple,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct H1Stats {
    pub count: usize,
    pub texts: Vec<String>,
    pub rating: H1Rating,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct H2Stats {
    pub count: usize,
    pub texts: Vec<String>,
}

/// An image counts as missing alt only when the attribute is absent; an empty
/// `alt=""` is a deliberate author choice and is not flagged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAltStats {
    pub total: usize,
    pub missing: usize,
    pub missing_list: Vec<String>,
}

/// The full audit report for one page. Immutable once assembled; every
/// boolean and length field is derived, never caller-supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub title: String,
    pub title_length: usize,
    pub title_has_keyword: bool,
    pub meta_description: String,
    pub meta_description_length: usize,
    pub meta_description_has_keyword: bool,
    pub h1: H1Stats,
    pub h2: H2Stats,
    pub image_alts: ImageAltStats,
    pub keyword: String,
    pub keyword_in_title: bool,
    pub keyword_in_description: bool,
    pub keyword_density: f64,
    pub internal_links: usize,
    pub external_links: usize,
    pub links_ratio: f64,
    #[serde(rename = "pageSizeKB")]
    pub page_size_kb: f64,
    #[serde(rename = "responseTimeMS")]
    pub response_time_ms: u64,
    pub compressed_images: bool,
    #[serde(rename = "minifiedCSS")]
    pub minified_css: bool,
    #[serde(rename = "minifiedJS")]
    pub minified_js: bool,
    pub secure_connection: bool,
    pub cache_headers: bool,
    /// Directory-listing exposure is not checked; always false.
    pub directory_listing: bool,
    pub seo_score: f64,
    pub performance_score: f64,
    /// Always the fixed 60/40 blend of the two component scores.
    pub overall_score: f64,
}

/// Persisted envelope around a report. Append-only; owned exclusively by the
/// caller captured at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub id: String,
    pub owner_id: String,
    pub url: String,
    pub time_stamp: DateTime<Utc>,
    pub result: AnalysisReport,
}

/// One row of an owner's history listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummary {
    pub id: String,
    pub url: String,
    pub time_stamp: DateTime<Utc>,
    pub seo_score: f64,
    pub performance_score: f64,
    pub overall_score: f64,
}

/// Single-record response shape: envelope fields merged with the flattened
/// report, matching the persisted layout consumers already parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDetail {
    pub id: String,
    pub url: String,
    pub time_stamp: DateTime<Utc>,
    #[serde(flatten)]
    pub result: AnalysisReport,
}

impl From<AnalysisRecord> for RecordDetail {
    fn from(record: AnalysisRecord) -> Self {
        RecordDetail {
            id: record.id,
            url: record.url,
            time_stamp: record.time_stamp,
            result: record.result,
        }
    }
}
