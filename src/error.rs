use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(&'static str),

    #[error("malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("{context}: {source}")]
    Storage {
        context: &'static str,
        #[source]
        source: sea_orm::DbErr,
    },
}

impl AppError {
    pub fn storage(context: &'static str, source: sea_orm::DbErr) -> Self {
        Self::Storage { context, source }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::storage("Internal Server Error", err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::MalformedBody(err) => {
                tracing::debug!(error = %err, "rejected request body");
                (StatusCode::BAD_REQUEST, "Malformed request body").into_response()
            },
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
            AppError::Storage { context, source } => {
                tracing::error!(error = %source, "{context}");
                (StatusCode::INTERNAL_SERVER_ERROR, context).into_response()
            },
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
