//! src/error.rs

use crate::accounts::AccountError;
use crate::authentication::CredentialsError;
use crate::charts::ChartError;
use crate::dataset::DatasetError;
use crate::domain::ValidationError;
use crate::session_state::SessionError;
use crate::utils::FlashView;
use actix_web::http::{header::ContentType, StatusCode};
use actix_web::{HttpResponse, ResponseError};
use askama_actix::Template;

pub type DeskResult<T> = Result<T, Error>;

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

#[derive(thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    #[error(transparent)]
    AccountError(#[from] AccountError),
    #[error(transparent)]
    CredentialsError(#[from] CredentialsError),
    #[error(transparent)]
    SessionError(#[from] SessionError),
    #[error(transparent)]
    DatasetError(#[from] DatasetError),
    #[error(transparent)]
    ChartError(#[from] ChartError),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate<'a> {
    flash_messages: Vec<FlashView>,
    message: &'a str,
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::ValidationError(_) => StatusCode::BAD_REQUEST,
            Error::AccountError(AccountError::UserNotFound(_)) => StatusCode::NOT_FOUND,
            Error::AccountError(AccountError::Unexpected(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::AccountError(_) => StatusCode::BAD_REQUEST,
            Error::CredentialsError(CredentialsError::UnexpectedError(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Error::CredentialsError(_) => StatusCode::UNAUTHORIZED,
            Error::SessionError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::DatasetError(DatasetError::Unexpected(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::DatasetError(_) => StatusCode::BAD_REQUEST,
            Error::ChartError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // the cause chain goes to the logs via TracingLogger, the user only gets a generic page
    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = if status.is_server_error() {
            "An error occurred. Please try again.".to_string()
        } else {
            self.to_string()
        };
        let page = ErrorTemplate {
            flash_messages: Vec::new(),
            message: &message,
        };
        match page.render() {
            Ok(body) => HttpResponse::build(status)
                .content_type(ContentType::html())
                .body(body),
            Err(e) => {
                tracing::error!(error.cause_chain = ?e, "Failed to render the error page.");
                HttpResponse::new(status)
            }
        }
    }
}
