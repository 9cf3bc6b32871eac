use axum::{
    extract::rejection::{ExtensionRejection, FormRejection},
    http::{header::InvalidHeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Internal Server Error";

/// Any possible server errors
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("not found")]
    NotFound,

    #[error(transparent)]
    FormRejection(#[from] FormRejection),

    #[error(transparent)]
    ExtensionRejection(#[from] ExtensionRejection),

    #[error(transparent)]
    DbError(#[from] sea_orm::DbErr),

    #[error(transparent)]
    TemplateError(#[from] tera::Error),

    #[error(transparent)]
    HeaderError(#[from] InvalidHeaderValue),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            ServerError::NotFound => (StatusCode::NOT_FOUND, "Not Found").into_response(),
            ServerError::FormRejection(rejection) => rejection.into_response(),
            ServerError::DbError(e) => {
                tracing::error!("Database error occurred: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_SERVER_ERROR_MESSAGE,
                )
                    .into_response()
            }
            e => {
                tracing::error!("Server error occurred: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_SERVER_ERROR_MESSAGE,
                )
                    .into_response()
            }
        }
    }
}
