// HTTP status codes recognized by the API waiter
//
// A closed set: anything outside it is rejected at conversion time instead of
// silently never matching.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// HTTP status code an API wait can expect
///
/// Serialized as the bare numeric code.
///
/// # Example
///
/// ```ignore
/// use api_wait::StatusCode;
///
/// let status = StatusCode::try_from(201)?;
/// assert_eq!(status, StatusCode::Created);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 201 Created
    Created,
    /// 204 No Content
    NoContent,
    /// 400 Bad Request
    BadRequest,
    /// 401 Unauthorized
    Unauthorized,
    /// 403 Forbidden
    Forbidden,
    /// 404 Not Found
    NotFound,
    /// 500 Internal Server Error
    InternalServerError,
}

impl StatusCode {
    /// All recognized status codes, in ascending numeric order.
    pub const ALL: [StatusCode; 8] = [
        StatusCode::Ok,
        StatusCode::Created,
        StatusCode::NoContent,
        StatusCode::BadRequest,
        StatusCode::Unauthorized,
        StatusCode::Forbidden,
        StatusCode::NotFound,
        StatusCode::InternalServerError,
    ];

    /// Numeric HTTP status code
    pub const fn as_u16(self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Created => 201,
            StatusCode::NoContent => 204,
            StatusCode::BadRequest => 400,
            StatusCode::Unauthorized => 401,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
            StatusCode::InternalServerError => 500,
        }
    }

    /// Canonical reason phrase
    pub const fn reason(self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Created => "Created",
            StatusCode::NoContent => "No Content",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Unauthorized => "Unauthorized",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }

    /// Whether the code is in the 2xx range
    pub const fn is_success(self) -> bool {
        matches!(
            self,
            StatusCode::Ok | StatusCode::Created | StatusCode::NoContent
        )
    }
}

impl TryFrom<u16> for StatusCode {
    type Error = Error;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        StatusCode::ALL
            .into_iter()
            .find(|status| status.as_u16() == code)
            .ok_or_else(|| Error::InvalidArgument(format!("Unsupported status code: {}", code)))
    }
}

impl From<StatusCode> for u16 {
    fn from(status: StatusCode) -> u16 {
        status.as_u16()
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason())
    }
}
