//! Send XML documents to a remote API

mod error;

pub use error::*;

use crate::utils::pem::add_cert;
use anyhow::Context;
use reqwest::{Body, Method, header};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Media type of request documents.
pub const TEXT_XML: &str = "text/xml";

/// Sending requests to an HTTP endpoint, returning the response payload.
#[derive(Clone, Debug)]
pub struct HttpSender {
    client: reqwest::Client,
}

/// Options for the [`HttpSender`].
#[non_exhaustive]
#[derive(Clone, Debug, Default)]
pub struct Options {
    pub connect_timeout: Option<Duration>,
    pub timeout: Option<Duration>,
    pub additional_root_certificates: Vec<PathBuf>,
    /// Accept invalid certificates and hostnames (DANGER!)
    pub tls_insecure: bool,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect_timeout(mut self, connect_timeout: impl Into<Option<Duration>>) -> Self {
        self.connect_timeout = connect_timeout.into();
        self
    }

    pub fn timeout(mut self, timeout: impl Into<Option<Duration>>) -> Self {
        self.timeout = timeout.into();
        self
    }

    pub fn tls_insecure(mut self, tls_insecure: bool) -> Self {
        self.tls_insecure = tls_insecure;
        self
    }

    pub fn additional_root_certificates<I>(mut self, additional_root_certificates: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        self.additional_root_certificates = Vec::from_iter(additional_root_certificates);
        self
    }

    pub fn add_additional_root_certificate(
        mut self,
        additional_root_certificate: impl Into<PathBuf>,
    ) -> Self {
        self.additional_root_certificates
            .push(additional_root_certificate.into());
        self
    }
}

const USER_AGENT: &str = concat!("nexpose-client/", env!("CARGO_PKG_VERSION"));

impl HttpSender {
    pub fn new(options: Options) -> Result<Self, anyhow::Error> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(USER_AGENT),
        );

        let mut client = reqwest::ClientBuilder::new().default_headers(headers);

        if let Some(connect_timeout) = options.connect_timeout {
            client = client.connect_timeout(connect_timeout);
        }

        if let Some(timeout) = options.timeout {
            client = client.timeout(timeout);
        }

        if options.tls_insecure {
            log::warn!("Using insecure TLS, certificates and hostnames will not be verified");
            client = client
                .danger_accept_invalid_hostnames(true)
                .danger_accept_invalid_certs(true);
        }

        for cert in options.additional_root_certificates {
            client = add_cert(client, &cert)
                .with_context(|| format!("Adding root certificate: {}", cert.display()))?;
        }

        Ok(Self {
            client: client.build()?,
        })
    }

    /// Post an XML document, returning the response body as text.
    ///
    /// Any status other than a success is reported as an error, the body is not evaluated in
    /// that case.
    pub async fn post_xml(&self, url: &Url, document: impl Into<Body>) -> Result<String, Error> {
        let response = self
            .client
            .request(Method::POST, url.clone())
            .header(header::CONTENT_TYPE, TEXT_XML)
            .body(document)
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            log::debug!("Posted document -> {status}");
            Ok(response.text().await?)
        } else if status.is_client_error() {
            log::warn!("Request rejected -> {status}");
            Err(Error::Client(status))
        } else if status.is_server_error() {
            log::warn!("Server failed to process request -> {status}");
            Err(Error::Server(status))
        } else {
            Err(Error::UnexpectedStatus(status))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use reqwest::StatusCode;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_string, header, method, path},
    };

    fn endpoint(server: &MockServer) -> Url {
        Url::parse(&format!("{}/api/1.1/xml", server.uri())).unwrap()
    }

    #[tokio::test]
    async fn post_sends_xml_content_type() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/1.1/xml"))
            .and(header("content-type", TEXT_XML))
            .and(body_string("<Ping/>"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<Pong/>"))
            .expect(1)
            .mount(&server)
            .await;

        let sender = HttpSender::new(Options::new()).unwrap();
        let body = sender
            .post_xml(&endpoint(&server), "<Ping/>")
            .await
            .unwrap();

        assert_eq!(body, "<Pong/>");
    }

    #[tokio::test]
    async fn status_is_classified() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let sender = HttpSender::new(Options::new().tls_insecure(true)).unwrap();
        let result = sender.post_xml(&endpoint(&server), "<Ping/>").await;

        assert!(matches!(
            result,
            Err(Error::Server(StatusCode::SERVICE_UNAVAILABLE))
        ));
    }

    #[tokio::test]
    async fn client_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let sender = HttpSender::new(Options::new()).unwrap();
        let result = sender.post_xml(&endpoint(&server), "<Ping/>").await;

        assert!(matches!(result, Err(Error::Client(StatusCode::NOT_FOUND))));
    }

    #[test]
    fn missing_certificate_fails() {
        let result = HttpSender::new(
            Options::new().add_additional_root_certificate("/this/does/not/exist.pem"),
        );

        assert!(result.is_err());
    }
}
