use crate::engine::scoring::{rating, Answers};
use crate::types::quiz::{Catalogue, CatalogueEntry, FactorRule, QuizDef};
use crate::types::report::{
    Affordability, CategoryScore, CommunityFit, FactorPoints, FitGauge, Tier,
};
use std::cmp::Reverse;

/// Fit-label cut points, matching the Strong/Value-Stretch/Mismatch bands.
const FIT_STRONG: i32 = 80;
const FIT_MISMATCH: i32 = 50;

/// Affordability bands as percent of assumed income.
const AFFORD_TIGHT: u8 = 40;
const AFFORD_MODERATE: u8 = 30;

/// Score every catalogue entry against the current answers, strongest fit
/// first. Ties keep catalogue order.
pub fn fit_scores(
    def: &QuizDef,
    catalogue: &Catalogue,
    answers: &Answers,
    categories: &[CategoryScore],
) -> Vec<CommunityFit> {
    let mut scored: Vec<CommunityFit> = catalogue
        .entries
        .iter()
        .map(|entry| score_entry(def, catalogue, entry, answers, categories))
        .collect();
    scored.sort_by_key(|fit| Reverse(fit.fit_score));
    scored
}

/// Mean fit across all entries, bucketed with the quiz's overall thresholds.
pub fn fit_gauge(def: &QuizDef, catalogue: &Catalogue, scored: &[CommunityFit]) -> Option<FitGauge> {
    let summary = catalogue.fit_summary.as_ref()?;
    if scored.is_empty() {
        return None;
    }
    let sum: u32 = scored.iter().map(|fit| u32::from(fit.fit_score)).sum();
    let mean = (f64::from(sum) / scored.len() as f64).round() as u8;
    let (tier, status) = crate::engine::scoring::overall_tier(def, mean);
    let headline = match tier {
        Tier::Ready => summary.strong.clone(),
        Tier::Partial => summary.moderate.clone(),
        Tier::AtRisk => summary.early.clone(),
    };
    Some(FitGauge {
        overall_fit: mean,
        tier,
        status,
        headline,
    })
}

fn score_entry(
    def: &QuizDef,
    catalogue: &Catalogue,
    entry: &CatalogueEntry,
    answers: &Answers,
    categories: &[CategoryScore],
) -> CommunityFit {
    let mut score = entry.base_score;
    let mut attribution = Vec::new();

    for rule in &catalogue.rules {
        if let Some(points) = rule_delta(def, rule, entry, answers, categories) {
            score += points;
            attribution.push(FactorPoints {
                label: rule.label.clone(),
                points,
            });
        }
    }

    if let Some(cap) = entry.cap {
        score = score.min(cap);
    }
    let score = score.clamp(0, 100);
    attribution.sort_by_key(|factor| Reverse(factor.points.abs()));

    let (fit_icon, fit_label) = fit_band(score, entry.quadrant.as_deref());

    CommunityFit {
        name: entry.name.clone(),
        fit_score: score as u8,
        fit_icon: fit_icon.to_string(),
        fit_label: fit_label.to_string(),
        quadrant: entry.quadrant.clone(),
        attribution,
        description: entry.description.clone(),
        why: entry.why.clone(),
        trade_offs: entry.trade_offs.clone(),
        unlock: entry.unlock.clone(),
        next_step: entry.next_step.clone(),
        avg_price: entry.avg_price.clone(),
        rent_range: entry.rent_range.clone(),
        buy_range: entry.buy_range.clone(),
        cost_of_living: entry.cost_of_living.clone(),
        pros: entry.pros.clone(),
        cons: entry.cons.clone(),
        affordability: affordability(catalogue, entry),
    }
}

fn rule_delta(
    def: &QuizDef,
    rule: &FactorRule,
    entry: &CatalogueEntry,
    answers: &Answers,
    categories: &[CategoryScore],
) -> Option<i32> {
    // validate() guarantees the factor key exists on every entry.
    let factor = entry.factors.get(&rule.factor).copied().unwrap_or(0.0);
    match (&rule.question, &rule.category) {
        (Some(question_id), None) => {
            let threshold = rule.threshold.unwrap_or(0);
            if rating(def, answers, *question_id) >= threshold {
                Some(factor.round() as i32)
            } else {
                None
            }
        }
        (None, Some(category)) => {
            let pct = categories
                .iter()
                .find(|score| &score.name == category)
                .map(|score| score.percentage)
                .unwrap_or(0);
            Some((f64::from(pct) * factor).floor() as i32)
        }
        _ => Some(factor.round() as i32),
    }
}

fn fit_band(score: i32, quadrant: Option<&str>) -> (&'static str, &'static str) {
    if score < FIT_MISMATCH {
        ("\u{1F534}", "Mismatch")
    } else if score < FIT_STRONG {
        if quadrant == Some("stretch") {
            ("\u{1F7E1}", "Stretch Fit")
        } else {
            ("\u{1F7E1}", "Value Fit")
        }
    } else {
        ("\u{1F7E2}", "Strong Fit")
    }
}

fn affordability(catalogue: &Catalogue, entry: &CatalogueEntry) -> Option<Affordability> {
    let monthly = entry.monthly?;
    let income = catalogue.assumed_income?;
    let total = monthly.total();
    let income_percent =
        (100.0 * f64::from(total) / f64::from(income)).round() as u8;
    let icon = if income_percent > AFFORD_TIGHT {
        "\u{1F534}"
    } else if income_percent > AFFORD_MODERATE {
        "\u{1F7E1}"
    } else {
        "\u{1F7E2}"
    };
    Some(Affordability {
        monthly_total: total,
        income_percent,
        icon: icon.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scoring::category_scores;
    use crate::quizzes;
    use crate::types::quiz::QuizDef;

    fn answers_at(def: &QuizDef, value: u8) -> Answers {
        def.questions
            .iter()
            .map(|question| (question.id, value))
            .collect()
    }

    #[test]
    fn community_finder_defaults_skip_gated_factors() {
        let def = quizzes::builtin("community-finder").expect("builtin").def;
        let catalogue = def.catalogue.clone().expect("catalogue");
        let answers = answers_at(&def, 5);
        let categories = category_scores(&def, &answers);

        let scored = fit_scores(&def, &catalogue, &answers, &categories);
        // With Anglo and schools importance below 7, only affordability and
        // commute apply: Rehovot 70+15+7 leads.
        assert_eq!(scored[0].name, "Rehovot");
        assert_eq!(scored[0].fit_score, 92);
        assert_eq!(scored[0].fit_label, "Strong Fit");
        assert_eq!(scored[0].attribution.len(), 2);

        let beit_shemesh = scored
            .iter()
            .find(|fit| fit.name.starts_with("Beit Shemesh"))
            .expect("Beit Shemesh entry");
        assert_eq!(beit_shemesh.fit_score, 78);
        assert_eq!(beit_shemesh.fit_label, "Value Fit");
    }

    #[test]
    fn community_finder_signals_unlock_factors() {
        let def = quizzes::builtin("community-finder").expect("builtin").def;
        let catalogue = def.catalogue.clone().expect("catalogue");
        let mut answers = answers_at(&def, 5);
        answers.insert(1, 9); // English-speaking community matters
        answers.insert(8, 9); // schools matter
        let categories = category_scores(&def, &answers);

        let scored = fit_scores(&def, &catalogue, &answers, &categories);
        let names: Vec<&str> = scored.iter().map(|fit| fit.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Beit Shemesh (RBS A/G)",
                "Rehovot",
                "Netanya",
                "Modi'in",
                "Haifa (Carmel)"
            ]
        );
        assert_eq!(scored[0].fit_score, 99);
        // Attribution is ordered by absolute contribution.
        assert_eq!(scored[0].attribution[0].label, "Anglo Community");
        assert_eq!(scored[0].attribution[0].points, 12);
    }

    #[test]
    fn stretch_quadrant_gets_stretch_label() {
        let def = quizzes::builtin("community-finder").expect("builtin").def;
        let catalogue = def.catalogue.clone().expect("catalogue");
        let answers = answers_at(&def, 5);
        let categories = category_scores(&def, &answers);

        let scored = fit_scores(&def, &catalogue, &answers, &categories);
        let modiin = scored
            .iter()
            .find(|fit| fit.name == "Modi'in")
            .expect("Modi'in entry");
        assert_eq!(modiin.fit_score, 66);
        assert_eq!(modiin.fit_label, "Stretch Fit");
    }

    #[test]
    fn affordability_percent_and_bands() {
        let def = quizzes::builtin("community-finder").expect("builtin").def;
        let catalogue = def.catalogue.clone().expect("catalogue");
        let answers = answers_at(&def, 5);
        let categories = category_scores(&def, &answers);

        let scored = fit_scores(&def, &catalogue, &answers, &categories);
        let beit_shemesh = scored
            .iter()
            .find(|fit| fit.name.starts_with("Beit Shemesh"))
            .expect("Beit Shemesh entry");
        let affordability = beit_shemesh
            .affordability
            .as_ref()
            .expect("monthly costs configured");
        // 10500+520+250+700+900 = 12870 of 35000 = 36.8% -> 37%.
        assert_eq!(affordability.monthly_total, 12_870);
        assert_eq!(affordability.income_percent, 37);
        assert_eq!(affordability.icon, "\u{1F7E1}");
    }

    #[test]
    fn gauge_averages_all_entries() {
        let def = quizzes::builtin("community-finder").expect("builtin").def;
        let catalogue = def.catalogue.clone().expect("catalogue");
        let answers = answers_at(&def, 5);
        let categories = category_scores(&def, &answers);
        let scored = fit_scores(&def, &catalogue, &answers, &categories);

        let gauge = fit_gauge(&def, &catalogue, &scored).expect("fit summary configured");
        // (92 + 78 + 69 + 66 + 60) / 5 = 73.
        assert_eq!(gauge.overall_fit, 73);
        assert_eq!(gauge.tier, Tier::Partial);
    }

    #[test]
    fn scaled_rules_track_category_percentage_with_caps() {
        let def = quizzes::builtin("real-estate-readiness").expect("builtin").def;
        let catalogue = def.catalogue.clone().expect("catalogue");

        // Lifestyle at 100% drives every entry to its cap.
        let answers = answers_at(&def, 10);
        let categories = category_scores(&def, &answers);
        let scored = fit_scores(&def, &catalogue, &answers, &categories);
        let scores: Vec<u8> = scored.iter().map(|fit| fit.fit_score).collect();
        assert_eq!(scores, vec![95, 92, 88, 85, 82]);

        // Defaults: lifestyle 50% -> Beit Shemesh 70 + floor(50 * 0.25) = 82.
        let answers = answers_at(&def, 5);
        let categories = category_scores(&def, &answers);
        let scored = fit_scores(&def, &catalogue, &answers, &categories);
        assert_eq!(scored[0].name, "Beit Shemesh");
        assert_eq!(scored[0].fit_score, 82);
    }

    #[test]
    fn scores_clamp_to_valid_range() {
        let def = quizzes::builtin("community-finder").expect("builtin").def;
        let mut catalogue = def.catalogue.clone().expect("catalogue");
        catalogue.entries[0].base_score = 130;
        catalogue.entries[1].base_score = -40;
        let answers = answers_at(&def, 5);
        let categories = category_scores(&def, &answers);

        let scored = fit_scores(&def, &catalogue, &answers, &categories);
        assert!(scored.iter().all(|fit| fit.fit_score <= 100));
        assert_eq!(scored.last().expect("entries").fit_score, 0);
    }
}
