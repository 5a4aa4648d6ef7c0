//! crates.io version update checker

use std::time::Duration;

use crate::core::constants::{
    CRATES_API_URL, UPDATE_CHECK_RETRIES, UPDATE_CHECK_RETRY_DELAY_MS, UPDATE_CHECK_TIMEOUT_SECS,
};

const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Check crates.io for newer version.
/// Returns Some(version) if update available, None otherwise.
/// All errors logged at debug level - never fails.
pub async fn check_for_update() -> Option<String> {
    // Parse current version first - if this fails, it's a bug
    let current = match semver::Version::parse(CURRENT_VERSION) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(
                version = CURRENT_VERSION,
                error = %e,
                "Failed to parse current version (bug)"
            );
            return None;
        }
    };

    // Fetch with retry
    let registry_version = fetch_registry_version_with_retry().await?;

    // Parse registry version
    let latest = match semver::Version::parse(&registry_version) {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!(
                version = %registry_version,
                error = %e,
                "Failed to parse registry version"
            );
            return None;
        }
    };

    // Skip prereleases (e.g., 0.2.0-beta)
    if !latest.pre.is_empty() {
        tracing::debug!(version = %registry_version, "Skipping prerelease");
        return None;
    }

    // Compare
    if latest > current {
        tracing::debug!(current = %current, latest = %latest, "Update available");
        Some(registry_version)
    } else {
        tracing::debug!(current = %current, latest = %latest, "No update available");
        None
    }
}

async fn fetch_registry_version_with_retry() -> Option<String> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(UPDATE_CHECK_TIMEOUT_SECS))
        .user_agent(format!("TextDesk/{}", CURRENT_VERSION))
        .build()
        .ok()?;

    for attempt in 1..=UPDATE_CHECK_RETRIES {
        match fetch_registry_version(&client).await {
            Ok(version) => return Some(version),
            Err(e) => {
                tracing::debug!(attempt, error = %e, "Update check attempt failed");
                if attempt < UPDATE_CHECK_RETRIES {
                    tokio::time::sleep(Duration::from_millis(UPDATE_CHECK_RETRY_DELAY_MS)).await;
                }
            }
        }
    }
    None
}

async fn fetch_registry_version(client: &reqwest::Client) -> Result<String, String> {
    let resp = client
        .get(CRATES_API_URL)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !resp.status().is_success() {
        return Err(format!("HTTP {}", resp.status()));
    }

    #[derive(serde::Deserialize)]
    struct CrateResponse {
        #[serde(rename = "crate")]
        krate: CrateInfo,
    }

    #[derive(serde::Deserialize)]
    struct CrateInfo {
        max_stable_version: Option<String>,
    }

    let body: CrateResponse = resp
        .json()
        .await
        .map_err(|e| format!("Parse failed: {}", e))?;

    body.krate
        .max_stable_version
        .ok_or_else(|| "No stable version published".to_string())
}

/// Get the current version string
pub fn current_version() -> &'static str {
    CURRENT_VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(serde::Deserialize)]
    struct TestCrateResponse {
        #[serde(rename = "crate")]
        krate: TestCrateInfo,
    }

    #[derive(serde::Deserialize)]
    struct TestCrateInfo {
        max_stable_version: Option<String>,
    }

    #[test]
    fn test_version_comparison_newer() {
        let current = semver::Version::parse("0.1.0").unwrap();
        let latest = semver::Version::parse("0.1.1").unwrap();
        assert!(latest > current);
    }

    #[test]
    fn test_version_comparison_same() {
        let current = semver::Version::parse("0.1.0").unwrap();
        let latest = semver::Version::parse("0.1.0").unwrap();
        assert!(latest <= current);
    }

    #[test]
    fn test_version_comparison_older() {
        let current = semver::Version::parse("0.1.1").unwrap();
        let latest = semver::Version::parse("0.1.0").unwrap();
        assert!(latest <= current);
    }

    #[test]
    fn test_version_comparison_major() {
        let current = semver::Version::parse("0.1.0").unwrap();
        let latest = semver::Version::parse("1.0.0").unwrap();
        assert!(latest > current);
    }

    #[test]
    fn test_prerelease_detected() {
        let latest = semver::Version::parse("0.2.0-beta").unwrap();
        assert!(!latest.pre.is_empty());
    }

    #[test]
    fn test_stable_no_prerelease() {
        let latest = semver::Version::parse("0.2.0").unwrap();
        assert!(latest.pre.is_empty());
    }

    #[test]
    fn test_current_version_parses() {
        // Ensures Cargo.toml version is valid semver
        assert!(semver::Version::parse(CURRENT_VERSION).is_ok());
    }

    #[test]
    fn test_registry_response_parsing() {
        let json = r#"{"crate": {"max_stable_version": "0.1.1"}}"#;
        let body: TestCrateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.krate.max_stable_version.as_deref(), Some("0.1.1"));
    }

    #[test]
    fn test_registry_response_extra_fields() {
        let json = r#"{"crate": {"id": "textdesk", "max_stable_version": "0.1.1", "downloads": 12}, "versions": []}"#;
        let body: TestCrateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.krate.max_stable_version.as_deref(), Some("0.1.1"));
    }

    #[test]
    fn test_registry_response_no_stable_version() {
        let json = r#"{"crate": {"max_stable_version": null}}"#;
        let body: TestCrateResponse = serde_json::from_str(json).unwrap();
        assert!(body.krate.max_stable_version.is_none());
    }
}
