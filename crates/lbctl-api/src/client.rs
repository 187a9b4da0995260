// Hand-crafted async HTTP client for the load balancer API (v2).
//
// Base path: <api_url>/v2/
// Auth: `Authorization: <api key>` header

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::query::ListParams;
use crate::transport::TransportConfig;
use crate::types::{CollectionResponse, CreatedId, DataResponse};

// ── Error response shape ────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    errors: Vec<ErrorDetail>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(serde::Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

impl ErrorResponse {
    fn into_message(self) -> Option<String> {
        let details: Vec<String> = self
            .errors
            .into_iter()
            .filter_map(|e| match (e.title, e.detail) {
                (Some(title), Some(detail)) => Some(format!("{title}: {detail}")),
                (title, detail) => detail.or(title),
            })
            .collect();
        if details.is_empty() {
            self.message
        } else {
            Some(details.join("; "))
        }
    }
}

// ── Client ──────────────────────────────────────────────────────────

/// Async client for the load balancer API.
///
/// Uses API-key authentication and communicates via JSON REST endpoints
/// under `/v2/`. Resource operations are exposed through the service
/// traits in [`crate::service`].
#[derive(Debug, Clone)]
pub struct LoadBalancerClient {
    http: reqwest::Client,
    base_url: Url,
}

impl LoadBalancerClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from an API key and transport config.
    ///
    /// Injects `Authorization` as a default header on every request.
    pub fn from_api_key(
        base_url: &str,
        api_key: &secrecy::SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut key_value =
            HeaderValue::from_str(api_key.expose_secret()).map_err(|e| Error::Authentication {
                message: format!("invalid API key header value: {e}"),
            })?;
        key_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, key_value);

        let http = transport.build_client_with_headers(headers)?;
        let base_url = Self::normalize_base_url(base_url)?;

        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Ensure the base URL ends with a slash so relative joins keep the
    /// full path (`https://host/loadbalancers/` + `v2/clusters`).
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"v2/clusters"`) onto the base URL.
    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        self.handle_response(resp).await
    }

    async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        self.handle_response(resp).await
    }

    async fn post_empty(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).send().await?;
        self.handle_empty(resp).await
    }

    async fn patch<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("PATCH {url}");

        let resp = self.http.patch(url).json(body).send().await?;
        self.handle_empty(resp).await
    }

    async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        self.handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Error::InvalidApiKey;
        }

        let raw = resp.text().await.unwrap_or_default();

        let message = serde_json::from_str::<ErrorResponse>(&raw)
            .ok()
            .and_then(ErrorResponse::into_message)
            .unwrap_or_else(|| {
                if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                }
            });

        Error::Api {
            status: status.as_u16(),
            message,
        }
    }

    // ── Resource helpers ─────────────────────────────────────────────

    /// Fetch a collection. A fixed `params.page` fetches that page only;
    /// otherwise pages are walked until `total_pages` is reached.
    pub(crate) async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &ListParams,
    ) -> Result<Vec<T>, Error> {
        if let Some(page) = params.page {
            let resp: CollectionResponse<T> =
                self.get_with_params(path, &params.query_pairs(page)).await?;
            return Ok(resp.data);
        }

        let mut all = Vec::new();
        let mut page = 1;
        loop {
            let resp: CollectionResponse<T> =
                self.get_with_params(path, &params.query_pairs(page)).await?;
            let received = resp.data.len();
            all.extend(resp.data);

            let pagination = resp.meta.pagination;
            if received == 0 || pagination.current_page >= pagination.total_pages {
                break;
            }
            page = pagination.current_page + 1;
        }

        Ok(all)
    }

    pub(crate) async fn show<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let resp: DataResponse<T> = self.get(path).await?;
        Ok(resp.data)
    }

    pub(crate) async fn create<I, B>(&self, path: &str, body: &B) -> Result<I, Error>
    where
        I: DeserializeOwned,
        B: Serialize + Sync,
    {
        let resp: DataResponse<CreatedId<I>> = self.post(path, body).await?;
        Ok(resp.data.id)
    }

    pub(crate) async fn update<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<(), Error> {
        self.patch(path, body).await
    }

    pub(crate) async fn remove(&self, path: &str) -> Result<(), Error> {
        self.delete(path).await
    }

    pub(crate) async fn action(&self, path: &str) -> Result<(), Error> {
        self.post_empty(path).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let client =
            LoadBalancerClient::from_reqwest("https://api.example.com/loadbalancers", reqwest::Client::new())
                .unwrap();
        assert_eq!(
            client.url("v2/clusters").unwrap().as_str(),
            "https://api.example.com/loadbalancers/v2/clusters"
        );
    }

    #[test]
    fn error_details_are_joined() {
        let raw = r#"{"errors":[{"title":"Validation Error","detail":"name is required"},{"detail":"port is invalid"}]}"#;
        let parsed: ErrorResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            parsed.into_message().as_deref(),
            Some("Validation Error: name is required; port is invalid")
        );
    }
}
