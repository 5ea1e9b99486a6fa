use actix_web::{http::StatusCode, HttpResponse};
use masterclass_mailer_api_structs::{ErrorResponse, UnauthorizedResponse};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum MailerError {
    #[error("{0}")]
    InternalError(String),
    #[error("{0}")]
    BadClientData(String),
    #[error("Unauthorized")]
    Unauthorized,
}

impl actix_web::error::ResponseError for MailerError {
    fn status_code(&self) -> StatusCode {
        match *self {
            Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadClientData(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut res = HttpResponse::build(self.status_code());
        match self {
            Self::Unauthorized => res.json(UnauthorizedResponse {
                error: self.to_string(),
            }),
            _ => res.json(ErrorResponse::new(self.to_string())),
        }
    }
}
