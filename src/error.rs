use thiserror::Error;

/// Errors produced by the spreadsheet-to-figure pipeline.
///
/// Every failure surfaces directly to the caller; nothing is retried or
/// recovered. A request either yields both figures or one of these.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid file type: expected an .xlsx upload, got {0:?}")]
    InvalidFileType(String),
    #[error("Failed to load spreadsheet: {0}")]
    Load(String),
    #[error("Edge references node id {0:?} which is absent from the nodes sheet")]
    MissingNode(String),
    #[error("Node label {0:?} is shared by more than one node id")]
    DuplicateLabel(String),
    #[error("Unsupported layout dimension {0}, expected 2 or 3")]
    UnsupportedDimension(usize),
    #[error("Failed to serialize figure: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<calamine::XlsxError> for Error {
    fn from(e: calamine::XlsxError) -> Self {
        Error::Load(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(feature = "web")]
impl axum::response::IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;
        use axum::response::IntoResponse;

        let status = match &self {
            Error::InvalidFileType(_)
            | Error::Load(_)
            | Error::MissingNode(_)
            | Error::DuplicateLabel(_)
            | Error::UnsupportedDimension(_) => StatusCode::BAD_REQUEST,
            Error::Serialize(_) | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}
