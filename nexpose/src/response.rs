//! Evaluating response documents

use crate::{Error, xml::Element};

/// Root element name of a generic failure response.
pub const FAILURE: &str = "Failure";

/// Check if the document signals a failure.
///
/// That is either a `Failure` root element, or a `success="0"` attribute on the root element.
pub fn is_failure(root: &Element) -> bool {
    root.name == FAILURE || root.attribute("success") == Some("0")
}

/// The first non-empty message of a failure document.
///
/// Messages may be nested as `Exception/Message` or `Failure/message`, so any element named
/// "message" is accepted, regardless of case.
pub fn failure_message(root: &Element) -> Option<&str> {
    root.descendants()
        .filter(|element| element.name.eq_ignore_ascii_case("message"))
        .map(|element| element.text.trim())
        .find(|message| !message.is_empty())
}

/// Parse a response body, turning failure documents into [`Error::Api`].
pub fn evaluate(body: &str) -> Result<Element, Error> {
    let root = Element::parse(body).map_err(|source| Error::Parse {
        source,
        body: body.trim().to_string(),
    })?;

    if is_failure(&root) {
        let message = match failure_message(&root) {
            Some(message) => message.to_string(),
            None => body.trim().to_string(),
        };
        log::debug!("Request failed: {message}");
        return Err(Error::Api(message));
    }

    Ok(root)
}
