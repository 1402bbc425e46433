use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompassError {
    #[error("unknown assessment: {0}")]
    UnknownQuiz(String),

    #[error("assessment '{quiz}' has no question with id {id}")]
    UnknownQuestion { quiz: String, id: u32 },

    #[error("rating out of range: {0} (expected 0-10)")]
    RatingOutOfRange(i64),

    #[error("invalid rating argument: '{0}' (expected ID=VALUE)")]
    InvalidRatingArg(String),

    #[error("quiz definition error: {0}")]
    Definition(String),

    #[error("quiz file not found: {0}")]
    QuizFileNotFound(String),

    #[error("state directory could not be determined; pass --state-dir or set HOME")]
    NoStateDir,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CompassError>;
