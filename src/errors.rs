use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid ATTENDANCE_API_URL {value:?}: {reason}")]
    ApiUrl { value: String, reason: String },

    #[error("invalid ATTENDANCE_API_TIMEOUT_SECS {0:?}: expected a positive integer")]
    Timeout(String),
}

/// Failures talking to the remote attendance API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unreadable response from {endpoint}: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum ViewError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("another operation is in progress")]
    Busy,

    #[error("attendance list is not loaded")]
    NotLoaded,

    #[error("no employees to save attendance for")]
    NoEmployees,

    #[error("month is required (YYYY-MM)")]
    MissingMonth,

    #[error("employee {name:?} has no status control; reload before saving")]
    StaleRoster { name: String },

    #[error("unknown status control {0:?}")]
    UnknownControl(String),

    #[error("{0}")]
    Rejected(String),
}

impl ViewError {
    pub fn status(&self) -> StatusCode {
        match self {
            ViewError::Api(_) => StatusCode::BAD_GATEWAY,
            ViewError::Busy | ViewError::NotLoaded | ViewError::StaleRoster { .. } => {
                StatusCode::CONFLICT
            }
            ViewError::NoEmployees | ViewError::UnknownControl(_) => StatusCode::NOT_FOUND,
            ViewError::MissingMonth | ViewError::Rejected(_) => StatusCode::BAD_REQUEST,
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl From<ViewError> for AppError {
    fn from(err: ViewError) -> Self {
        Self {
            status: err.status(),
            message: err.to_string(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
