use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::time::Duration;
use url::Url;

use crate::error::{EdamError, Result};

const THRIFT_MIME: &str = "application/x-thrift";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Moves one serialized Thrift message to an endpoint and returns the reply.
pub trait Transport {
    fn post(&self, url: &Url, body: Vec<u8>) -> Result<Vec<u8>>;
}

/// Thrift over HTTPS, as served by the EDAM endpoints.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("evernote-logger/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn post(&self, url: &Url, body: Vec<u8>) -> Result<Vec<u8>> {
        let resp = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, THRIFT_MIME)
            .header(ACCEPT, THRIFT_MIME)
            .body(body)
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(EdamError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(resp.bytes()?.to_vec())
    }
}
