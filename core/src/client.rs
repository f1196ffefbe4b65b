use crate::{
    err::{Error, PartsError, Result},
    odbc_uri::{ConnectionOptions, Credentials},
};
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;

/// Transport-level failure of a single API request. Callers wrap these into
/// the connect-time or query-time diagnostic shape.
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("status {status} for {url}")]
    Status { status: u16, url: String },
    #[error("{0}")]
    Transport(String),
    #[error("decoding {url}: {detail}")]
    Decode { url: String, detail: String },
}

impl From<HttpError> for PartsError {
    fn from(e: HttpError) -> Self {
        PartsError::Http(e.to_string())
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

/// Authenticated blocking client for the inventory API. Every request is a
/// `GET` against `base_url` with an `Authorization: Token <token>` header
/// and the per-request timeout from the connection string.
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::blocking::Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    /// Builds the client and acquires the API token: a pre-issued `apitoken`
    /// is used verbatim, otherwise `GET /api/user/token` with HTTP Basic
    /// credentials. A non-2xx token response surfaces its status code.
    pub fn connect(options: &ConnectionOptions) -> Result<ApiClient> {
        let http = reqwest::blocking::Client::builder()
            .timeout(options.http_timeout)
            .build()
            .map_err(|e| Error::CategoryList(e.to_string()))?;
        let base_url = options.server.trim_end_matches('/').to_string();
        let token = match &options.credentials {
            Credentials::Token(token) => token.clone(),
            Credentials::Login { username, password } => {
                let url = format!("{base_url}/api/user/token");
                let response = http
                    .get(&url)
                    .basic_auth(username, Some(password))
                    .send()
                    .map_err(|e| Error::CategoryList(e.to_string()))?;
                if !response.status().is_success() {
                    return Err(Error::TokenStatus(response.status().as_u16()));
                }
                let token: TokenResponse = response
                    .json()
                    .map_err(|e| Error::CategoryList(e.to_string()))?;
                token.token
            }
        };
        Ok(ApiClient {
            http,
            base_url,
            token,
        })
    }

    /// `GET {base_url}{path}?{query}` decoded as JSON.
    pub fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> std::result::Result<T, HttpError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .header("Authorization", format!("Token {}", self.token))
            .query(query)
            .send()
            .map_err(|e| HttpError::Transport(e.to_string()))?;
        if !response.status().is_success() {
            return Err(HttpError::Status {
                status: response.status().as_u16(),
                url,
            });
        }
        response.json().map_err(|e| HttpError::Decode {
            url,
            detail: e.to_string(),
        })
    }
}

#[cfg(test)]
mod unit {
    use super::*;
    use crate::odbc_uri::Kom2Uri;

    fn options(uri: &str) -> ConnectionOptions {
        Kom2Uri::parse(uri).into_options().unwrap()
    }

    #[test]
    fn token_is_used_verbatim() {
        let client =
            ApiClient::connect(&options("server=http://localhost:1/;apitoken=asdf")).unwrap();
        assert_eq!("asdf", client.token);
        assert_eq!("http://localhost:1", client.base_url);
    }

    #[test]
    fn token_acquisition() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/api/user/token")
            .match_header("authorization", mockito::Matcher::Regex("Basic .*".into()))
            .with_body(r#"{"token": "0123456789012345678901234567890123456789"}"#)
            .create();

        let client = ApiClient::connect(&options(&format!(
            "server={};username=asdf;password=asdf",
            server.url()
        )))
        .unwrap();
        assert_eq!("0123456789012345678901234567890123456789", client.token);
        mock.assert();
    }

    #[test]
    fn token_acquisition_unauthorized() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/api/user/token")
            .with_status(401)
            .create();

        let err = ApiClient::connect(&options(&format!(
            "server={};username=asdf;password=wrong",
            server.url()
        )))
        .unwrap_err();
        assert_eq!("08001", err.get_sql_state());
        assert!(format!("{err}").contains("401"));
    }

    #[test]
    fn get_json_sends_token_header() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/api/part/category/")
            .match_header("authorization", "Token asdf")
            .with_body("[]")
            .create();

        let client =
            ApiClient::connect(&options(&format!("server={};apitoken=asdf", server.url())))
                .unwrap();
        let categories: Vec<serde_json::Value> =
            client.get_json("/api/part/category/", &[]).unwrap();
        assert!(categories.is_empty());
        mock.assert();
    }

    #[test]
    fn get_json_decode_failure_names_url() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/api/part/category/")
            .with_body("not json")
            .create();

        let client =
            ApiClient::connect(&options(&format!("server={};apitoken=asdf", server.url())))
                .unwrap();
        let err = client
            .get_json::<Vec<serde_json::Value>>("/api/part/category/", &[])
            .unwrap_err();
        assert!(format!("{err}").contains("/api/part/category/"));
    }
}
