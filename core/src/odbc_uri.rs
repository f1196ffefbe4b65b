use crate::err::{Error, Result};
use std::{collections::HashMap, time::Duration};

pub const APITOKEN: &str = "apitoken";
pub const DRIVER: &str = "driver";
pub const HTTPTIMEOUT: &str = "httptimeout";
pub const LOGFILE: &str = "logfile";
pub const PASSWORD: &str = "password";
pub const SERVER: &str = "server";
pub const USERNAME: &str = "username";

const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// A parsed ODBC connection string: `key1=value1;key2=value2;...`.
///
/// Keywords are matched case-insensitively, values are taken verbatim, and
/// when a keyword is repeated the first occurrence wins. Unrecognized
/// keywords (`Driver` among them, which the driver manager consumes) are
/// kept but ignored.
#[derive(Debug, PartialEq, Eq)]
pub struct Kom2Uri(HashMap<String, String>);

impl Kom2Uri {
    pub fn parse(odbc_uri: &str) -> Kom2Uri {
        let mut attributes = HashMap::new();
        for segment in odbc_uri.split(';') {
            if segment.is_empty() {
                continue;
            }
            let (keyword, value) = match segment.split_once('=') {
                Some((keyword, value)) => (keyword, value),
                // a segment without '=' carries no attribute
                None => continue,
            };
            attributes
                .entry(keyword.to_lowercase())
                .or_insert_with(|| value.to_string());
        }
        Kom2Uri(attributes)
    }

    pub fn get(&self, keyword: &str) -> Option<&str> {
        self.0.get(&keyword.to_lowercase()).map(String::as_str)
    }

    /// The log file path, if any. Looked up before any validation so that
    /// validation failures can still reach the log.
    pub fn logfile(&self) -> Option<&str> {
        self.get(LOGFILE)
    }

    /// Validates the attributes into connection options. The order of the
    /// checks is observable through diagnostics: server presence first, then
    /// credentials, then the timeout value.
    pub fn into_options(self) -> Result<ConnectionOptions> {
        let server = self.get(SERVER).ok_or(Error::MissingServer)?.to_string();
        let credentials = match (self.get(APITOKEN), self.get(USERNAME), self.get(PASSWORD)) {
            (Some(token), _, _) => Credentials::Token(token.to_string()),
            (None, Some(username), Some(password)) => Credentials::Login {
                username: username.to_string(),
                password: password.to_string(),
            },
            _ => return Err(Error::MissingCredentials),
        };
        let http_timeout = match self.get(HTTPTIMEOUT) {
            Some(value) => {
                humantime::parse_duration(value).map_err(|e| Error::InvalidOption {
                    key: HTTPTIMEOUT,
                    detail: e.to_string(),
                })?
            }
            None => DEFAULT_HTTP_TIMEOUT,
        };
        Ok(ConnectionOptions {
            server,
            credentials,
            http_timeout,
            logfile: self.logfile().map(String::from),
        })
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct ConnectionOptions {
    pub server: String,
    pub credentials: Credentials,
    pub http_timeout: Duration,
    pub logfile: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Credentials {
    Token(String),
    Login { username: String, password: String },
}

#[cfg(test)]
mod unit {
    use super::*;

    #[test]
    fn keywords_are_case_insensitive() {
        let uri = Kom2Uri::parse("Driver=kom2;SERVER=http://x;APIToken=t");
        assert_eq!(Some("http://x"), uri.get("server"));
        assert_eq!(Some("t"), uri.get("apitoken"));
        assert_eq!(Some("kom2"), uri.get("Driver"));
    }

    #[test]
    fn first_occurrence_wins() {
        let uri = Kom2Uri::parse("server=first;server=second");
        assert_eq!(Some("first"), uri.get(SERVER));
    }

    #[test]
    fn values_are_verbatim() {
        let uri = Kom2Uri::parse("password=s3cr=et is fine");
        assert_eq!(Some("s3cr=et is fine"), uri.get(PASSWORD));
    }

    #[test]
    fn empty_segments_are_skipped() {
        let uri = Kom2Uri::parse(";;server=x;;");
        assert_eq!(Some("x"), uri.get(SERVER));
    }

    #[test]
    fn missing_server() {
        let err = Kom2Uri::parse("Driver=kom2").into_options().unwrap_err();
        assert!(matches!(err, Error::MissingServer));
        assert_eq!("No Server specified", format!("{err}"));
        assert_eq!("08001", err.get_sql_state());
    }

    #[test]
    fn missing_credentials() {
        let err = Kom2Uri::parse("Driver=kom2;server=asdf")
            .into_options()
            .unwrap_err();
        assert!(matches!(err, Error::MissingCredentials));
        assert_eq!(
            "No APIToken or Username+Password specified",
            format!("{err}")
        );
    }

    #[test]
    fn username_without_password_is_not_enough() {
        let err = Kom2Uri::parse("server=asdf;username=u")
            .into_options()
            .unwrap_err();
        assert!(matches!(err, Error::MissingCredentials));
    }

    #[test]
    fn token_credentials() {
        let options = Kom2Uri::parse("server=http://x;apitoken=asdf")
            .into_options()
            .unwrap();
        assert_eq!(Credentials::Token("asdf".to_string()), options.credentials);
        assert_eq!(DEFAULT_HTTP_TIMEOUT, options.http_timeout);
    }

    #[test]
    fn login_credentials() {
        let options = Kom2Uri::parse("server=http://x;username=u;password=p")
            .into_options()
            .unwrap();
        assert_eq!(
            Credentials::Login {
                username: "u".to_string(),
                password: "p".to_string()
            },
            options.credentials
        );
    }

    #[test]
    fn http_timeout_values() {
        for (value, expected) in [
            ("1ms", Duration::from_millis(1)),
            ("500ms", Duration::from_millis(500)),
            ("5s", Duration::from_secs(5)),
        ] {
            let options =
                Kom2Uri::parse(&format!("server=http://x;apitoken=t;httptimeout={value}"))
                    .into_options()
                    .unwrap();
            assert_eq!(expected, options.http_timeout, "for {value}");
        }
    }

    #[test]
    fn invalid_http_timeout() {
        let err = Kom2Uri::parse("server=http://x;apitoken=t;httptimeout=soon")
            .into_options()
            .unwrap_err();
        assert_eq!("08001", err.get_sql_state());
    }

    #[test]
    fn logfile_is_available_before_validation() {
        let uri = Kom2Uri::parse("Driver=kom2;logfile=/tmp/kom2.log");
        assert_eq!(Some("/tmp/kom2.log"), uri.logfile());
        assert!(uri.into_options().is_err());
    }
}
