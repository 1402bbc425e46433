use crate::config::LoadedQuiz;
use crate::engine::Answers;
use crate::error::{CompassError, Result};
use crate::store::StateStore;
use crate::types::quiz::RATING_MAX;
use crate::types::state::SavedResponse;

/// One user's run through an assessment. Exactly two states: answering
/// (ratings mutable) and results (until an explicit reset). Every
/// mutation is written through to the store for persisting quizzes.
pub struct QuizSession<'a> {
    quiz: &'a LoadedQuiz,
    store: &'a StateStore,
    answers: Answers,
    results_shown: bool,
}

impl<'a> QuizSession<'a> {
    /// Start from template defaults, overlaying any saved answers.
    pub fn load(quiz: &'a LoadedQuiz, store: &'a StateStore) -> Self {
        let mut answers: Answers = quiz
            .def
            .questions
            .iter()
            .map(|question| (question.id, question.default))
            .collect();
        let mut results_shown = false;

        if quiz.def.persist {
            if let Some(state) = store.load(&quiz.def.id, &quiz.checksum) {
                for response in state.responses {
                    if quiz.def.question(response.id).is_some() && response.value <= RATING_MAX {
                        answers.insert(response.id, response.value);
                    }
                }
                results_shown = state.results_shown;
            }
        }

        Self {
            quiz,
            store,
            answers,
            results_shown,
        }
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn results_shown(&self) -> bool {
        self.results_shown
    }

    pub fn value(&self, question_id: u32) -> u8 {
        crate::engine::scoring::rating(&self.quiz.def, &self.answers, question_id)
    }

    pub fn rate(&mut self, question_id: u32, value: u8) -> Result<()> {
        if self.quiz.def.question(question_id).is_none() {
            return Err(CompassError::UnknownQuestion {
                quiz: self.quiz.def.id.clone(),
                id: question_id,
            });
        }
        if value > RATING_MAX {
            return Err(CompassError::RatingOutOfRange(i64::from(value)));
        }
        self.answers.insert(question_id, value);
        self.persist()
    }

    /// Transition to the results state.
    pub fn finish(&mut self) -> Result<()> {
        self.results_shown = true;
        self.persist()
    }

    /// Back to answering: template defaults, persisted state cleared.
    pub fn reset(&mut self) -> Result<()> {
        self.answers = self
            .quiz
            .def
            .questions
            .iter()
            .map(|question| (question.id, question.default))
            .collect();
        self.results_shown = false;
        if self.quiz.def.persist {
            self.store.clear(&self.quiz.def.id)?;
        }
        Ok(())
    }

    fn persist(&self) -> Result<()> {
        if !self.quiz.def.persist {
            return Ok(());
        }
        let responses: Vec<SavedResponse> = self
            .answers
            .iter()
            .map(|(&id, &value)| SavedResponse { id, value })
            .collect();
        self.store.save(
            &self.quiz.def.id,
            &self.quiz.checksum,
            responses,
            self.results_shown,
        )
    }
}
