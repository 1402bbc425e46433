//! Built-in assessment definitions, embedded as TOML documents.

use crate::config::{parse_quiz_str, LoadedQuiz};
use crate::error::{CompassError, Result};

pub const SOURCES: &[(&str, &str)] = &[
    (
        "aliya-readiness",
        include_str!("aliya_readiness.toml"),
    ),
    (
        "real-estate-readiness",
        include_str!("real_estate_readiness.toml"),
    ),
    ("buy-readiness", include_str!("buy_readiness.toml")),
    ("community-finder", include_str!("community_finder.toml")),
];

pub fn builtins() -> Result<Vec<LoadedQuiz>> {
    SOURCES
        .iter()
        .map(|(_, raw)| parse_quiz_str(raw))
        .collect()
}

pub fn builtin(id: &str) -> Result<LoadedQuiz> {
    let (_, raw) = SOURCES
        .iter()
        .find(|(source_id, _)| *source_id == id)
        .ok_or_else(|| CompassError::UnknownQuiz(id.to_string()))?;
    parse_quiz_str(raw)
}
