pub mod matching;
pub mod narrative;
pub mod priorities;
pub mod scoring;

use crate::types::quiz::QuizDef;
use crate::types::report::AssessmentReport;
use chrono::Utc;

pub use scoring::Answers;

/// Compute the full readiness report for one assessment. Pure apart from
/// the generation timestamp.
pub fn assess(def: &QuizDef, answers: &Answers) -> AssessmentReport {
    let categories = scoring::category_scores(def, answers);
    let overall = scoring::overall(def, &categories, answers);
    let (tier, status_label) = scoring::overall_tier(def, overall);

    let gaps = narrative::ranked_gaps(def, &categories);
    let next_steps = def
        .narrative
        .as_ref()
        .map(|table| narrative::next_steps(table, tier));

    let priorities = def
        .priorities
        .as_ref()
        .map(|rules| priorities::extract_priorities(def, rules, answers))
        .unwrap_or_default();

    let (matches, fit_gauge) = match &def.catalogue {
        Some(catalogue) => {
            let mut scored = matching::fit_scores(def, catalogue, answers, &categories);
            let gauge = matching::fit_gauge(def, catalogue, &scored);
            if let Some(limit) = catalogue.top {
                scored.truncate(limit);
            }
            (scored, gauge)
        }
        None => (Vec::new(), None),
    };

    AssessmentReport {
        quiz: def.id.clone(),
        title: def.title.clone(),
        generated_at: Utc::now().to_rfc3339(),
        overall,
        tier,
        status_label,
        categories,
        gaps,
        next_steps,
        priorities,
        matches,
        fit_gauge,
        disclaimer: def.disclaimer.clone(),
    }
}
