use sitegrade::models::{AnalysisReport, H1Rating, H1Stats, H2Stats, ImageAltStats};

/// A fully populated report with known-good signals, for store and API tests
/// that need a report but do not care how it was produced.
#[allow(dead_code)]
pub fn sample_report(keyword: &str) -> AnalysisReport {
    let mut report = AnalysisReport {
        title: "Rust tutorials for curious systems engineers!".to_string(),
        title_length: 45,
        title_has_keyword: true,
        meta_description: "A practical guide.".to_string(),
        meta_description_length: 18,
        meta_description_has_keyword: false,
        h1: H1Stats {
            count: 1,
            texts: vec!["Getting started".to_string()],
            rating: H1Rating::Good,
        },
        h2: H2Stats {
            count: 2,
            texts: vec!["Install".to_string(), "Tooling".to_string()],
        },
        image_alts: ImageAltStats {
            total: 2,
            missing: 0,
            missing_list: vec![],
        },
        keyword: keyword.to_string(),
        keyword_in_title: true,
        keyword_in_description: false,
        keyword_density: 2.0,
        internal_links: 6,
        external_links: 2,
        links_ratio: 3.0,
        page_size_kb: 12.5,
        response_time_ms: 120,
        compressed_images: true,
        minified_css: true,
        minified_js: true,
        secure_connection: true,
        cache_headers: true,
        directory_listing: false,
        seo_score: 0.0,
        performance_score: 0.0,
        overall_score: 0.0,
    };

    report.seo_score = sitegrade::scoring::seo_score(&report);
    report.performance_score = sitegrade::scoring::performance_score(&report);
    report.overall_score =
        sitegrade::scoring::overall_score(report.seo_score, report.performance_score);

    report
}
