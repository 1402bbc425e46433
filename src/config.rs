use crate::error::{CompassError, Result};
use crate::quizzes;
use crate::types::quiz::QuizDef;
use sha2::{Digest, Sha256};
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// A validated quiz definition plus the checksum of its source document.
/// The checksum ties persisted answers to the definition they were
/// recorded against.
#[derive(Debug, Clone)]
pub struct LoadedQuiz {
    pub def: QuizDef,
    pub checksum: String,
}

pub fn parse_quiz_str(raw: &str) -> Result<LoadedQuiz> {
    let def: QuizDef = toml::from_str(raw)?;
    def.validate()?;
    Ok(LoadedQuiz {
        def,
        checksum: checksum_hex(raw),
    })
}

pub fn load_quiz_file(path: &Path) -> Result<LoadedQuiz> {
    if !path.exists() {
        return Err(CompassError::QuizFileNotFound(path.display().to_string()));
    }
    let raw = std::fs::read_to_string(path)?;
    parse_quiz_str(&raw)
}

/// Recursively collect quiz definitions from a directory of TOML files.
pub fn discover(dir: &Path) -> Result<Vec<LoadedQuiz>> {
    let mut found = Vec::new();
    for entry in WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
    {
        if entry.path().extension().and_then(|ext| ext.to_str()) != Some("toml") {
            continue;
        }
        debug!(path = %entry.path().display(), "loading quiz definition");
        found.push(load_quiz_file(entry.path())?);
    }
    Ok(found)
}

/// Built-in assessments, with external definitions layered on top: a
/// discovered definition replaces a built-in with the same id.
pub fn load_all(quiz_dir: Option<&Path>) -> Result<Vec<LoadedQuiz>> {
    let mut quizzes = quizzes::builtins()?;
    if let Some(dir) = quiz_dir {
        for external in discover(dir)? {
            match quizzes
                .iter_mut()
                .find(|quiz| quiz.def.id == external.def.id)
            {
                Some(slot) => *slot = external,
                None => quizzes.push(external),
            }
        }
    }
    Ok(quizzes)
}

pub fn find<'a>(quizzes: &'a [LoadedQuiz], id: &str) -> Result<&'a LoadedQuiz> {
    quizzes
        .iter()
        .find(|quiz| quiz.def.id == id)
        .ok_or_else(|| CompassError::UnknownQuiz(id.to_string()))
}

pub fn checksum_hex(raw: &str) -> String {
    let digest = Sha256::digest(raw.as_bytes());
    format!("{digest:x}")
}
