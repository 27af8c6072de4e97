use std::fmt::Display;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The input is not valid JSON, or does not have the shape of the target type.
    #[error(transparent)]
    Json(#[from] serde_json::error::Error),

    #[error("Error while processing the geozero source: {0}")]
    Geozero(#[from] geozero::error::GeozeroError),

    /// A feature `id` that is neither a string nor a number.
    #[error("invalid type {0:?} for id, expected string or numeric")]
    InvalidIdKind(&'static str),

    #[error("unknown geometry type: {0:?}")]
    UnknownGeometryType(String),

    #[error("invalid type {found:?}, expected {expected:?}")]
    TypeMismatch {
        found: String,
        expected: &'static str,
    },

    #[error("geometry collection members cannot be of type \"GeometryCollection\"")]
    NestedGeometryCollection,

    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl serde::de::Error for Error {
    fn custom<T>(msg: T) -> Self
    where
        T: Display,
    {
        Error::Message(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T>(msg: T) -> Self
    where
        T: Display,
    {
        Error::Message(msg.to_string())
    }
}

/// Checks the `type` member of a decoded object against the tag the decoder expects.
pub(crate) fn check_type(found: &str, expected: &'static str) -> Result<()> {
    if found == expected {
        return Ok(());
    }
    log::debug!("rejecting object of type {found:?}, expected {expected:?}");
    Err(Error::TypeMismatch {
        found: found.to_string(),
        expected,
    })
}
