use thiserror::Error;

/// Domain error taxonomy. The HTTP layer maps each variant to a status
/// code; nothing else about transport leaks in here.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Testimonial already approved")]
    AlreadyApproved,

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Testimonial submissions are currently closed")]
    WindowClosed,

    #[error("Too many comments, please slow down")]
    RateLimited,

    #[error("Internal storage error")]
    Internal(#[from] anyhow::Error),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
