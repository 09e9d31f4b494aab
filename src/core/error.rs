use thiserror::Error;

#[derive(Error, Debug)]
pub enum WazaError {
    #[error("content validation failed for \"{slug}\" ({} issue(s))", .issues.len())]
    Validation {
        slug: String,
        issues: Vec<crate::content::validate::Issue>,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, WazaError>;
