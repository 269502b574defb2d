use crate::error::{Error, Result};
use crate::extractor;
use crate::fetcher::PageFetcher;
use crate::keyword;
use crate::models::AnalysisReport;
use crate::pagespeed::PageSpeedClient;
use crate::scoring;
use url::Url;

/// The analysis pipeline: fetch, extract, audit, score, assemble. Owns its
/// collaborators; the request boundary constructs one analyzer at startup and
/// shares it across requests, so no stage touches global state.
pub struct Analyzer {
    fetcher: PageFetcher,
    pagespeed: PageSpeedClient,
}

impl Analyzer {
    pub fn new(fetcher: PageFetcher, pagespeed: PageSpeedClient) -> Self {
        Self { fetcher, pagespeed }
    }

    /// Runs the full pipeline for one page and keyword. The fetch and the
    /// performance audit only need the URL, so they run concurrently; markup
    /// extraction waits on the fetched HTML. All-or-nothing: the first stage
    /// failure fails the request and nothing is persisted.
    pub async fn analyze(&self, url: &str, keyword: &str) -> Result<AnalysisReport> {
        validate_input(url, keyword)?;

        tracing::info!(url = %url, keyword = %keyword, "starting analysis");

        let (fetched, audit) =
            futures::join!(self.fetcher.fetch(url), self.pagespeed.audit(url));
        let fetched = fetched?;
        let audit = audit?;

        let signals = extractor::extract_signals(&fetched.body, url);

        let title_has_keyword = keyword::contains_keyword(&signals.title, keyword);
        let description_has_keyword = keyword::contains_keyword(&signals.meta_description, keyword);
        let keyword_density = keyword::density(&signals.body_text, keyword);

        let links_ratio = if signals.external_links > 0 {
            signals.internal_links as f64 / signals.external_links as f64
        } else {
            0.0
        };

        let mut report = AnalysisReport {
            title_length: signals.title.chars().count(),
            title_has_keyword,
            meta_description_length: signals.meta_description.chars().count(),
            meta_description_has_keyword: description_has_keyword,
            title: signals.title,
            meta_description: signals.meta_description,
            h1: signals.h1,
            h2: signals.h2,
            image_alts: signals.image_alts,
            keyword: keyword.to_string(),
            keyword_in_title: title_has_keyword,
            keyword_in_description: description_has_keyword,
            keyword_density,
            internal_links: signals.internal_links,
            external_links: signals.external_links,
            links_ratio,
            page_size_kb: fetched.body.len() as f64 / 1024.0,
            response_time_ms: fetched.response_time_ms,
            compressed_images: audit.compressed_images,
            minified_css: audit.minified_css,
            minified_js: audit.minified_js,
            secure_connection: url.starts_with("https://"),
            cache_headers: audit.cache_headers,
            directory_listing: false,
            seo_score: 0.0,
            performance_score: 0.0,
            overall_score: 0.0,
        };

        report.seo_score = scoring::seo_score(&report);
        report.performance_score = scoring::performance_score(&report);
        report.overall_score = scoring::overall_score(report.seo_score, report.performance_score);

        tracing::info!(
            url = %url,
            seo_score = report.seo_score,
            performance_score = report.performance_score,
            overall_score = report.overall_score,
            "analysis complete"
        );

        Ok(report)
    }
}

/// Rejects bad input before any external call is made.
fn validate_input(url: &str, keyword: &str) -> Result<()> {
    if url.trim().is_empty() {
        return Err(Error::Validation("url is required".to_string()));
    }
    if keyword.trim().is_empty() {
        return Err(Error::Validation("keyword is required".to_string()));
    }

    let parsed =
        Url::parse(url).map_err(|_| Error::Validation(format!("invalid url: {url}")))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(Error::Validation(format!(
            "unsupported url scheme '{scheme}': only http and https are supported"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_empty_fields() {
        assert!(matches!(
            validate_input("", "rust"),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            validate_input("https://example.com", "  "),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        assert!(matches!(
            validate_input("not a url", "rust"),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            validate_input("ftp://example.com", "rust"),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_validate_accepts_http_and_https() {
        assert!(validate_input("http://example.com", "rust").is_ok());
        assert!(validate_input("https://example.com/page?q=1", "rust").is_ok());
    }
}
