//! HTTP status codes as a typed enum.
//!
//! Use [`Status`] anywhere a status code is accepted: `Response::status()`,
//! `Response::builder().status()`, as a bare handler return value, or paired
//! with a body as `(Status::Created, Json(post))`.
//!
//! Only the codes the lessons actually emit are listed. Places that must echo
//! an arbitrary code (a custom exception carrying its own status) take
//! `impl Into<u16>`, so a raw `u16` works there too.

/// The status codes this crate emits.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Status {
    Ok,                   // 200
    Created,              // 201
    NoContent,            // 204
    BadRequest,           // 400
    NotFound,             // 404
    MethodNotAllowed,     // 405
    UnprocessableContent, // 422
    InternalServerError,  // 500
}

impl Status {
    pub fn code(self) -> u16 {
        match self {
            Self::Ok                   => 200,
            Self::Created              => 201,
            Self::NoContent            => 204,
            Self::BadRequest           => 400,
            Self::NotFound             => 404,
            Self::MethodNotAllowed     => 405,
            Self::UnprocessableContent => 422,
            Self::InternalServerError  => 500,
        }
    }

    /// The canonical reason phrase, used as the default `detail` text.
    pub fn reason(self) -> &'static str {
        match self {
            Self::Ok                   => "OK",
            Self::Created              => "Created",
            Self::NoContent            => "No Content",
            Self::BadRequest           => "Bad Request",
            Self::NotFound             => "Not Found",
            Self::MethodNotAllowed     => "Method Not Allowed",
            Self::UnprocessableContent => "Unprocessable Content",
            Self::InternalServerError  => "Internal Server Error",
        }
    }
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        s.code()
    }
}
