use crate::types::quiz::{QuizDef, ScoringMode, RATING_MAX};
use crate::types::report::{CategoryScore, Tier};
use std::collections::BTreeMap;

/// Current ratings keyed by question id. Missing entries fall back to the
/// question's template default.
pub type Answers = BTreeMap<u32, u8>;

/// Category status cut points, fixed across all assessments.
const CATEGORY_READY: u8 = 70;
const CATEGORY_PARTIAL: u8 = 40;

pub fn rating(def: &QuizDef, answers: &Answers, question_id: u32) -> u8 {
    answers.get(&question_id).copied().unwrap_or_else(|| {
        def.question(question_id)
            .map(|question| question.default)
            .unwrap_or(0)
    })
}

/// Round-half-up percentage; a zero max (rejected at validation) reads as 0
/// rather than dividing by zero.
pub fn percentage(score: u32, max_score: u32) -> u8 {
    if max_score == 0 {
        return 0;
    }
    (100.0 * f64::from(score) / f64::from(max_score)).round() as u8
}

pub fn category_tier(percentage: u8) -> Tier {
    if percentage >= CATEGORY_READY {
        Tier::Ready
    } else if percentage >= CATEGORY_PARTIAL {
        Tier::Partial
    } else {
        Tier::AtRisk
    }
}

pub fn category_scores(def: &QuizDef, answers: &Answers) -> Vec<CategoryScore> {
    def.categories
        .iter()
        .map(|category| {
            let score: u32 = def
                .questions_in(&category.name)
                .map(|question| u32::from(rating(def, answers, question.id)))
                .sum();
            let max_score = def.max_score_for(&category.name);
            let pct = percentage(score, max_score);
            CategoryScore {
                name: category.name.clone(),
                score,
                max_score,
                percentage: pct,
                tier: category_tier(pct),
                weight: category.weight,
                recommendation: category.recommendation.clone(),
                summary: category.summary.clone(),
                next_step: category.next_step.clone(),
            }
        })
        .collect()
}

pub fn overall(def: &QuizDef, categories: &[CategoryScore], answers: &Answers) -> u8 {
    match def.scoring {
        ScoringMode::Unweighted => {
            let total: u32 = def
                .questions
                .iter()
                .map(|question| u32::from(rating(def, answers, question.id)))
                .sum();
            let max = u32::from(RATING_MAX) * def.questions.len() as u32;
            percentage(total, max)
        }
        ScoringMode::Weighted => {
            let weighted: f64 = categories
                .iter()
                .map(|category| {
                    f64::from(category.percentage) * category.weight.unwrap_or(0.0)
                })
                .sum();
            weighted.round() as u8
        }
    }
}

pub fn overall_tier(def: &QuizDef, overall: u8) -> (Tier, String) {
    if overall >= def.thresholds.ready {
        (Tier::Ready, def.status_labels.ready.clone())
    } else if overall >= def.thresholds.partial {
        (Tier::Partial, def.status_labels.partial.clone())
    } else {
        (Tier::AtRisk, def.status_labels.at_risk.clone())
    }
}
