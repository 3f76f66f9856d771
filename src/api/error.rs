use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};

use crate::domain::customer::{CustomerError, ErrorKind};

/// Body returned for every failed request
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub status: u16,
    pub message: String,
}

impl ErrorBody {
    fn new(code: &str, status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            status: status.as_u16(),
            message: message.into(),
        }
    }
}

impl ResponseError for CustomerError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        if self.kind() == ErrorKind::Store {
            tracing::error!(error = %self, "Store operation failed");
        }

        let status = self.status_code();
        HttpResponse::build(status).json(ErrorBody::new(self.code(), status, self.to_string()))
    }
}

/// Answer malformed JSON bodies in the same shape as domain errors
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let body = ErrorBody::new("INVALID_PAYLOAD", StatusCode::BAD_REQUEST, err.to_string());
    InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}
