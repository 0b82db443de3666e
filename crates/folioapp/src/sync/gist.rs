use super::{BackupTransport, RemoteStore};
use crate::error::{FolioError, Result};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::ACCEPT;
use reqwest::Method;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const GIST_DESCRIPTION: &str = "Folio page backup";
const GITHUB_JSON: &str = "application/vnd.github+json";
const TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
struct GistFile<'a> {
    content: &'a str,
}

#[derive(Serialize)]
struct GistPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    public: Option<bool>,
    files: HashMap<&'a str, GistFile<'a>>,
}

/// GitHub gist API client. Authenticates with a bearer token.
pub struct GistTransport {
    client: Client,
    api_url: String,
}

impl GistTransport {
    pub fn new(api_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .timeout(TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    fn request(&self, method: Method, url: &str, token: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .bearer_auth(token)
            .header(ACCEPT, GITHUB_JSON)
    }

    fn gist_url(&self, store_id: &str) -> String {
        format!("{}/gists/{}", self.api_url, store_id)
    }
}

fn expect_success(response: Response, action: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(FolioError::Transport(format!("{} returned {}", action, status)))
    }
}

impl BackupTransport for GistTransport {
    fn create(&self, token: &str, filename: &str, content: &str) -> Result<String> {
        let payload = GistPayload {
            description: Some(GIST_DESCRIPTION),
            public: Some(false),
            files: HashMap::from([(filename, GistFile { content })]),
        };
        let url = format!("{}/gists", self.api_url);
        let response = self.request(Method::POST, &url, token).json(&payload).send()?;
        let created: RemoteStore = expect_success(response, "creating backup gist")?.json()?;
        Ok(created.id)
    }

    fn update(&self, token: &str, store_id: &str, filename: &str, content: &str) -> Result<()> {
        let payload = GistPayload {
            description: None,
            public: None,
            files: HashMap::from([(filename, GistFile { content })]),
        };
        let response = self
            .request(Method::PATCH, &self.gist_url(store_id), token)
            .json(&payload)
            .send()?;
        expect_success(response, "updating backup gist")?;
        Ok(())
    }

    fn fetch(&self, token: &str, store_id: &str) -> Result<RemoteStore> {
        let response = self
            .request(Method::GET, &self.gist_url(store_id), token)
            .send()?;
        Ok(expect_success(response, "fetching backup gist")?.json()?)
    }

    fn fetch_raw(&self, token: &str, url: &str) -> Result<String> {
        let response = self.request(Method::GET, url, token).send()?;
        Ok(expect_success(response, "fetching raw backup file")?.text()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_payload_only_carries_files() {
        let payload = GistPayload {
            description: None,
            public: None,
            files: HashMap::from([("f.json", GistFile { content: "[]" })]),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json, serde_json::json!({"files": {"f.json": {"content": "[]"}}}));
    }

    #[test]
    fn gist_response_shape_decodes() {
        let raw = r#"{"id": "abc123", "files": {"folio-pages.json": {
            "filename": "folio-pages.json", "content": "[]", "truncated": false,
            "raw_url": "https://gist.githubusercontent.com/raw/x"}}}"#;
        let store: RemoteStore = serde_json::from_str(raw).unwrap();
        assert_eq!(store.id, "abc123");
        let file = &store.files["folio-pages.json"];
        assert_eq!(file.content.as_deref(), Some("[]"));
        assert!(file.raw_url.is_some());
    }

    #[test]
    fn trims_trailing_slash_from_api_url() {
        let transport = GistTransport::new("https://example.test/").unwrap();
        assert_eq!(transport.gist_url("42"), "https://example.test/gists/42");
    }
}
