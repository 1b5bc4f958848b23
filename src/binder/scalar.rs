use crate::error::BindError;
use crate::value::{Bind, Location, Rejected};

/// Writes a single leaf, once.
///
/// The first successful write wins: later pairs for the same leaf, whether
/// repeated keys or alternate tag names, are accepted and ignored.
#[derive(Debug, Default)]
pub(crate) struct ScalarBinder {
    written: bool,
}

impl ScalarBinder {
    pub(crate) fn set(
        &mut self,
        target: &mut dyn Bind,
        key: &str,
        value: &str,
    ) -> Result<(), BindError> {
        if self.written {
            return Ok(());
        }

        match target.location().map_err(|err| err.at(key))? {
            Location::Scalar(leaf) => {
                let declared_type = leaf.type_name();
                leaf.assign(value).map_err(|rejected| match rejected {
                    Rejected::Invalid => BindError::Conversion {
                        field: key.to_string(),
                        raw_value: value.to_string(),
                        declared_type,
                    },
                    Rejected::Unsupported => BindError::UnsupportedType {
                        field: key.to_string(),
                        declared_type,
                    },
                })?;
            }
            Location::Record(_) => {
                tracing::trace!(key, "record exposes no bindable fields");
            }
            Location::Aggregate(_) => {
                return Err(BindError::invalid_location(key, "list reached as a single value"));
            }
        }

        self.written = true;
        Ok(())
    }
}
