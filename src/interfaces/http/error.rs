use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use crate::domain::error::AppError;

pub fn status_for(err: &AppError) -> StatusCode {
    match err {
        AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
        AppError::ParseError(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AppError::NotFound(_) => StatusCode::NOT_FOUND,
        AppError::Internal(_) | AppError::ConfigError(_) | AppError::IoError(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

// JSON body for the /api routes; page routes render their own error page.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        status_for(self)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string(),
        }))
    }
}
