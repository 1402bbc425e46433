use crate::types::quiz::{NarrativeTable, QuizDef};
use crate::types::report::{CategoryScore, NextStepsOut, Tier};

/// Categories ranked weakest-first. The sort is stable, so equal
/// percentages keep their definition order.
pub fn ranked_gaps(def: &QuizDef, categories: &[CategoryScore]) -> Vec<CategoryScore> {
    let mut ranked = categories.to_vec();
    ranked.sort_by_key(|category| category.percentage);
    if let Some(limit) = def.top_gaps {
        ranked.truncate(limit);
    }
    ranked
}

/// Threshold-bucket lookup of canned next-step copy.
pub fn next_steps(table: &NarrativeTable, tier: Tier) -> NextStepsOut {
    let bucket = match tier {
        Tier::Ready => &table.ready,
        Tier::Partial => &table.partial,
        Tier::AtRisk => &table.at_risk,
    };
    NextStepsOut {
        title: bucket.title.clone(),
        steps: bucket.steps.clone(),
        blurb: bucket.blurb.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scoring::category_tier;
    use crate::quizzes;

    fn score(name: &str, percentage: u8) -> CategoryScore {
        CategoryScore {
            name: name.to_string(),
            score: 0,
            max_score: 100,
            percentage,
            tier: category_tier(percentage),
            weight: None,
            recommendation: None,
            summary: None,
            next_step: None,
        }
    }

    #[test]
    fn gaps_sort_ascending_by_percentage() {
        let def = quizzes::builtin("real-estate-readiness")
            .expect("builtin should load")
            .def;
        let categories = vec![score("Align", 80), score("Live", 40), score("Invest", 60)];
        let ranked = ranked_gaps(&def, &categories);
        let names: Vec<&str> = ranked.iter().map(|category| category.name.as_str()).collect();
        assert_eq!(names, vec!["Live", "Invest", "Align"]);
    }

    #[test]
    fn gaps_keep_definition_order_on_ties() {
        let def = quizzes::builtin("real-estate-readiness")
            .expect("builtin should load")
            .def;
        let categories = vec![score("First", 50), score("Second", 50), score("Third", 20)];
        let ranked = ranked_gaps(&def, &categories);
        let names: Vec<&str> = ranked.iter().map(|category| category.name.as_str()).collect();
        assert_eq!(names, vec!["Third", "First", "Second"]);
    }

    #[test]
    fn gaps_truncate_to_top_n() {
        let def = quizzes::builtin("aliya-readiness")
            .expect("builtin should load")
            .def;
        assert_eq!(def.top_gaps, Some(3));
        let categories = vec![
            score("A", 90),
            score("B", 10),
            score("C", 70),
            score("D", 30),
            score("E", 55),
        ];
        let ranked = ranked_gaps(&def, &categories);
        let names: Vec<&str> = ranked.iter().map(|category| category.name.as_str()).collect();
        assert_eq!(names, vec!["B", "D", "E"]);
    }

    #[test]
    fn next_steps_follow_overall_tier() {
        let def = quizzes::builtin("aliya-readiness")
            .expect("builtin should load")
            .def;
        let table = def.narrative.expect("aliya quiz has narrative buckets");
        let ready = next_steps(&table, Tier::Ready);
        assert!(ready.title.expect("title").contains("right track"));
        let at_risk = next_steps(&table, Tier::AtRisk);
        assert_eq!(at_risk.steps.len(), 3);
    }
}
