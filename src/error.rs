//! Error types

/// Failure while binding one property to the result value.
///
/// Unknown properties, surplus elements of a fixed-capacity list and repeated
/// writes to an already bound leaf are not errors and never show up here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    /// The target slot cannot be reached or written.
    #[error("{field} cannot be written ({reason})")]
    InvalidLocation { field: String, reason: &'static str },

    /// The text could not be converted to the leaf's declared type.
    #[error("{field} field is invalid. (type = {declared_type}, value = {raw_value})")]
    Conversion {
        field: String,
        raw_value: String,
        declared_type: &'static str,
    },

    /// The leaf type has no text conversion.
    #[error("{declared_type} is unsupported type (field = {field})")]
    UnsupportedType {
        field: String,
        declared_type: &'static str,
    },
}

impl BindError {
    pub(crate) fn invalid_location(field: &str, reason: &'static str) -> Self {
        Self::InvalidLocation {
            field: field.to_string(),
            reason,
        }
    }
}

/// A location that cannot be handed out for writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationError {
    pub reason: &'static str,
}

impl LocationError {
    pub const fn new(reason: &'static str) -> Self {
        Self { reason }
    }

    /// Attach the property being bound.
    pub fn at(self, field: &str) -> BindError {
        BindError::invalid_location(field, self.reason)
    }
}

/// Errors returned by the fetch and parse entry points.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to get the content: {0}")]
    Fetch(#[from] ureq::Error),

    #[error("Bad status code ({0})")]
    BadStatusCode(u16),

    #[error("Invalid Content-Type: {0}")]
    InvalidContentType(String),

    #[error("Unsupported page ({0})")]
    UnsupportedPage(String),

    #[error(transparent)]
    Bind(#[from] BindError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_message() {
        let err = BindError::Conversion {
            field: "og:image:width".to_string(),
            raw_value: "invalid".to_string(),
            declared_type: "i64",
        };
        assert_eq!(
            err.to_string(),
            "og:image:width field is invalid. (type = i64, value = invalid)"
        );
    }

    #[test]
    fn test_location_error_names_field() {
        let err = LocationError::new("shared reference").at("og:title");
        assert_eq!(err.to_string(), "og:title cannot be written (shared reference)");
    }

    #[test]
    fn test_bind_error_is_transparent() {
        let err: Error = BindError::UnsupportedType {
            field: "og:flag".to_string(),
            declared_type: "bool",
        }
        .into();
        assert_eq!(err.to_string(), "bool is unsupported type (field = og:flag)");
    }
}
