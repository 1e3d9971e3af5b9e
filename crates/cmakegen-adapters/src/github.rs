//! GitHub REST API dependency resolver.
//!
//! Two calls per repository:
//! - `GET /repos/{owner}/{repo}/commits?per_page=1&page=1` for the latest commit
//! - `GET /repos/{owner}/{repo}/contents/vcpkg.json?ref={sha}` for the manifest
//!
//! The contents endpoint returns the file base64 encoded and wrapped at 60
//! columns, so whitespace is stripped before decoding.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use cmakegen_core::{
    application::{ApplicationError, ports::DependencyResolver},
    domain::{PackageManifest, RepoRef, Revision},
    error::{GenError, GenResult},
};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use tracing::{debug, info, instrument};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("cmakegen/", env!("CARGO_PKG_VERSION"));
const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";
const OBJECT_MEDIA_TYPE: &str = "application/vnd.github.object";
const MANIFEST_FILE: &str = "vcpkg.json";

/// Connection settings for [`GithubResolver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubSettings {
    /// API base URL, without trailing slash.
    pub api_url: String,
    /// Sent as a bearer token when set.
    pub token: Option<String>,
}

impl Default for GithubSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            token: None,
        }
    }
}

/// Resolves repositories against the GitHub REST API. No retries.
pub struct GithubResolver {
    client: Client,
    api_url: String,
}

impl GithubResolver {
    pub fn new(settings: GithubSettings) -> GenResult<Self> {
        let mut headers = HeaderMap::new();
        if let Some(token) = settings.token.filter(|t| !t.trim().is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
                .map_err(|e| GenError::Internal {
                    message: format!("GitHub token is not a valid header value: {e}"),
                })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(|e| GenError::Internal {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            api_url: settings.api_url.trim_end_matches('/').to_string(),
        })
    }

    fn repo_url(&self, repo: &RepoRef) -> String {
        format!("{}/repos/{}/{}", self.api_url, repo.owner(), repo.repo())
    }

    fn get(&self, repo: &RepoRef, url: &str, accept: &str) -> GenResult<String> {
        debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .header(ACCEPT, accept)
            .send()
            .map_err(|e| remote_error(repo, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(remote_error(repo, format!("HTTP {status} from {url}")));
        }
        response
            .text()
            .map_err(|e| remote_error(repo, format!("failed to read response: {e}")))
    }
}

impl DependencyResolver for GithubResolver {
    #[instrument(skip(self), fields(repo = %repo))]
    fn latest_commit(&self, repo: &RepoRef) -> GenResult<Revision> {
        let url = format!("{}/commits?per_page=1&page=1", self.repo_url(repo));
        let body = self.get(repo, &url, JSON_MEDIA_TYPE)?;
        let revision = parse_commits(&body).map_err(|reason| remote_error(repo, reason))?;
        info!(revision = %revision, "Latest commit");
        Ok(revision)
    }

    #[instrument(skip(self), fields(repo = %repo, revision = %revision))]
    fn fetch_manifest(&self, repo: &RepoRef, revision: &Revision) -> GenResult<PackageManifest> {
        let url = format!(
            "{}/contents/{}?ref={}",
            self.repo_url(repo),
            MANIFEST_FILE,
            revision
        );
        let body = self.get(repo, &url, OBJECT_MEDIA_TYPE)?;
        decode_file_content(&body)
    }
}

// ── Wire schema ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct CommitEntry {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct FileContent {
    content: String,
    #[serde(default)]
    encoding: Option<String>,
}

/// First commit SHA of a `commits` listing.
pub fn parse_commits(body: &str) -> Result<Revision, String> {
    let commits: Vec<CommitEntry> =
        serde_json::from_str(body).map_err(|e| format!("malformed commit list: {e}"))?;
    let first = commits
        .into_iter()
        .next()
        .ok_or("repository has no commits")?;
    Revision::new(first.sha).map_err(|e| e.to_string())
}

/// Decode the manifest carried in a `contents` response.
pub fn decode_file_content(body: &str) -> GenResult<PackageManifest> {
    let file: FileContent = serde_json::from_str(body)
        .map_err(|e| decode_error(format!("malformed contents response: {e}")))?;

    if let Some(encoding) = file.encoding.as_deref() {
        if encoding != "base64" {
            return Err(decode_error(format!("unsupported encoding '{encoding}'")));
        }
    }

    let compact: String = file
        .content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| decode_error(format!("invalid base64: {e}")))?;

    PackageManifest::from_json_slice(&bytes).map_err(|e| decode_error(e.to_string()))
}

fn remote_error(repo: &RepoRef, reason: String) -> GenError {
    ApplicationError::RemoteResolution {
        repo: repo.to_string(),
        reason,
    }
    .into()
}

fn decode_error(reason: String) -> GenError {
    ApplicationError::Decode {
        field: "content".into(),
        reason,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmakegen_core::error::ErrorCategory;

    /// Base64 wrapped at 60 columns with `\n`, as GitHub sends it.
    fn wrapped(json: &str) -> String {
        let encoded = STANDARD.encode(json);
        encoded
            .as_bytes()
            .chunks(60)
            .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn parses_first_commit_sha() {
        let body = r#"[{"sha": "abc123", "commit": {"message": "init"}}]"#;
        assert_eq!(parse_commits(body).unwrap().as_str(), "abc123");
    }

    #[test]
    fn empty_commit_list_is_an_error() {
        assert!(parse_commits("[]").unwrap_err().contains("no commits"));
        assert!(parse_commits("{\"message\": \"Not Found\"}").is_err());
    }

    #[test]
    fn decodes_wrapped_manifest() {
        let manifest = r#"{
            "name": "cppsdl3",
            "version-string": "0.1.0",
            "description": "A rather long description so the encoded text wraps over several lines",
            "dependencies": ["sdl3", {"name": "imgui", "features": ["sdl3-binding"]}, "spdlog"]
        }"#;
        let body = serde_json::json!({
            "name": "vcpkg.json",
            "encoding": "base64",
            "content": wrapped(manifest),
        })
        .to_string();

        let decoded = decode_file_content(&body).unwrap();
        assert_eq!(decoded.name, "cppsdl3");
        assert_eq!(decoded.dependencies, ["sdl3", "imgui", "spdlog"]);
    }

    #[test]
    fn invalid_base64_is_a_decode_error() {
        let body = r#"{"name": "vcpkg.json", "content": "!!!not base64!!!"}"#;
        let err = decode_file_content(body).unwrap_err();

        assert_eq!(err.category(), ErrorCategory::Decode);
        assert!(err.to_string().contains("'content'"));
        assert!(err.to_string().contains("invalid base64"));
    }

    #[test]
    fn malformed_manifest_is_a_decode_error() {
        let body = serde_json::json!({"content": wrapped("{\"dependencies\": 7}")}).to_string();
        let err = decode_file_content(&body).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Decode);
    }

    #[test]
    fn missing_content_field_is_a_decode_error() {
        let err = decode_file_content(r#"{"name": "vcpkg.json"}"#).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Decode);
    }

    #[test]
    fn trailing_slash_is_trimmed_from_api_url() {
        let resolver = GithubResolver::new(GithubSettings {
            api_url: "http://localhost:1/".into(),
            token: Some("secret".into()),
        })
        .unwrap();
        let repo = RepoRef::new("acme", "lib").unwrap();
        assert_eq!(resolver.repo_url(&repo), "http://localhost:1/repos/acme/lib");
    }
}
