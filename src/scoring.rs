//! Fixed weighted rubrics turning report signals into scores. Both rubric
//! functions are pure: the same report always yields the same score, and
//! neither reads the score fields of its input.

use crate::models::{AnalysisReport, H1Rating};

/// SEO rubric. Contribution maxima sum to 100; the final clamp is a safety
/// bound, not part of the rubric.
pub fn seo_score(report: &AnalysisReport) -> f64 {
    let mut score: f64 = 0.0;

    // Title (max 25)
    score += if (30..=60).contains(&report.title_length) {
        20.0
    } else {
        10.0
    };
    score += if report.title_has_keyword { 5.0 } else { 0.0 };

    // Meta description (max 20)
    score += if (120..=160).contains(&report.meta_description_length) {
        15.0
    } else {
        7.0
    };
    score += if report.meta_description_has_keyword {
        5.0
    } else {
        0.0
    };

    // Headings (max 20)
    score += match report.h1.rating {
        H1Rating::Good => 15.0,
        H1Rating::Multiple => 5.0,
        H1Rating::Missing => 0.0,
    };
    score += if report.h2.count >= 2 { 5.0 } else { 0.0 };

    // Images (max 10)
    score += if report.image_alts.missing == 0 {
        10.0
    } else {
        5.0
    };

    // Keyword density (max 10)
    score += if (1.0..=3.0).contains(&report.keyword_density) {
        10.0
    } else {
        5.0
    };

    // Links (max 10)
    score += if report.links_ratio >= 2.0 { 10.0 } else { 5.0 };

    score.min(100.0)
}

/// Performance rubric, clamped to 100.
pub fn performance_score(report: &AnalysisReport) -> f64 {
    let mut score: f64 = 0.0;

    // Page size (max 15)
    score += if report.page_size_kb <= 500.0 {
        15.0
    } else if report.page_size_kb <= 1000.0 {
        10.0
    } else {
        5.0
    };

    // Response time (max 15)
    score += if report.response_time_ms <= 1000 {
        15.0
    } else if report.response_time_ms <= 3000 {
        10.0
    } else {
        5.0
    };

    // Optimization flags (max 40)
    score += if report.compressed_images { 10.0 } else { 0.0 };
    score += if report.minified_css { 10.0 } else { 0.0 };
    score += if report.minified_js { 10.0 } else { 0.0 };
    score += if report.cache_headers { 10.0 } else { 0.0 };

    // Security (max 30)
    score += if report.secure_connection { 30.0 } else { 0.0 };

    score.min(100.0)
}

/// The overall score is always this fixed blend, computed after both
/// component scores and never stored independently.
pub fn overall_score(seo: f64, performance: f64) -> f64 {
    seo * 0.6 + performance * 0.4
}
