//! PageSpeed Insights v5 integration. The service is asked for a desktop
//! strategy report and its named Lighthouse audits are mapped into the
//! report's boolean optimization flags.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/pagespeedonline/v5/runPagespeed";

const STRATEGY: &str = "desktop";

const COMPRESSED_IMAGES_AUDIT: &str = "uses-optimized-images";
const MINIFIED_CSS_AUDIT: &str = "unminified-css";
const MINIFIED_JS_AUDIT: &str = "unminified-javascript";
const CACHE_HEADERS_AUDIT: &str = "uses-long-cache-ttl";

/// Audit key to default-when-absent mapping. A flag is true iff the named
/// audit reports a normalized score of exactly 1; an audit missing from the
/// response (service degraded, key renamed upstream) falls back to the
/// default listed here, so analysis keeps working with downgraded flags
/// instead of failing.
pub const AUDIT_FLAG_DEFAULTS: [(&str, bool); 4] = [
    (COMPRESSED_IMAGES_AUDIT, false),
    (MINIFIED_CSS_AUDIT, false),
    (MINIFIED_JS_AUDIT, false),
    (CACHE_HEADERS_AUDIT, false),
];

/// Boolean optimization flags distilled from the audit response.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuditFlags {
    pub compressed_images: bool,
    pub minified_css: bool,
    pub minified_js: bool,
    pub cache_headers: bool,
}

#[derive(Debug, Deserialize)]
struct PageSpeedResponse {
    #[serde(rename = "lighthouseResult")]
    lighthouse_result: Option<LighthouseResult>,
}

#[derive(Debug, Deserialize)]
struct LighthouseResult {
    #[serde(default)]
    audits: HashMap<String, Audit>,
}

#[derive(Debug, Deserialize)]
struct Audit {
    score: Option<f64>,
}

/// Client for the external performance audit service. The endpoint base is
/// configurable so tests can point it at a local fixture server.
pub struct PageSpeedClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl PageSpeedClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        timeout_secs: u64,
    ) -> anyhow::Result<Self> {
        let client = reqwest::ClientBuilder::new()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key,
        })
    }

    /// Runs the desktop audit for `url`. Fails only when the call itself
    /// fails; missing audit entries degrade to false flags.
    pub async fn audit(&self, url: &str) -> Result<AuditFlags> {
        let mut request = self
            .client
            .get(&self.endpoint)
            .query(&[("url", url), ("strategy", STRATEGY)]);

        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key.as_str())]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::ExternalService(format!("pagespeed request failed: {e}")))?
            .error_for_status()
            .map_err(|e| Error::ExternalService(format!("pagespeed request failed: {e}")))?;

        let payload: PageSpeedResponse = response
            .json()
            .await
            .map_err(|e| Error::ExternalService(format!("pagespeed response unreadable: {e}")))?;

        let audits = payload
            .lighthouse_result
            .map(|result| result.audits)
            .unwrap_or_default();

        let flags = AuditFlags {
            compressed_images: audit_passed(&audits, COMPRESSED_IMAGES_AUDIT),
            minified_css: audit_passed(&audits, MINIFIED_CSS_AUDIT),
            minified_js: audit_passed(&audits, MINIFIED_JS_AUDIT),
            cache_headers: audit_passed(&audits, CACHE_HEADERS_AUDIT),
        };

        tracing::debug!(url = %url, ?flags, "performance audit mapped");

        Ok(flags)
    }
}

fn audit_passed(audits: &HashMap<String, Audit>, key: &str) -> bool {
    audits
        .get(key)
        .and_then(|audit| audit.score)
        .is_some_and(|score| score == 1.0)
}
