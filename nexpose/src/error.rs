use crate::xml::ParseError;
use nexpose_common::sender;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Connecting, TLS, or a non-success HTTP status.
    #[error(transparent)]
    Transport(#[from] sender::Error),
    #[error("failed to write request: {0}")]
    Request(#[from] quick_xml::Error),
    /// The response is not an XML document, carrying the trimmed body.
    #[error("failed to parse response ({source}): {body}")]
    Parse { source: ParseError, body: String },
    /// The server reported a failure, carrying its message or the raw response.
    #[error("request failed: {0}")]
    Api(String),
    #[error("response is missing element: {0}")]
    MissingElement(&'static str),
    #[error("response is missing attribute '{attribute}' on element '{element}'")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },
    #[error("not logged in")]
    NotLoggedIn,
    #[error("no hosts to scan")]
    NoHosts,
}
