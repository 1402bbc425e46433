use crate::error::{CompassError, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};

/// Slider ratings are integers in [0, RATING_MAX].
pub const RATING_MAX: u8 = 10;

/// Tolerance for category weights summing to 1.0.
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

fn default_rating() -> u8 {
    5
}

fn default_persist() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    /// overall = round(100 * sum of raw values / (10 * question count))
    Unweighted,
    /// overall = round(sum of category percentage * category weight)
    Weighted,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizDef {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub intro: Option<String>,
    pub scoring: ScoringMode,
    /// Whether answers survive between invocations. The original aliya
    /// questionnaire never saved state; the other variants do.
    #[serde(default = "default_persist")]
    pub persist: bool,
    pub thresholds: OverallThresholds,
    pub status_labels: StatusLabels,
    /// Limit the ranked-gaps section to the N weakest categories.
    #[serde(default)]
    pub top_gaps: Option<usize>,
    #[serde(default)]
    pub disclaimer: Option<String>,
    pub categories: Vec<CategoryDef>,
    pub questions: Vec<QuestionDef>,
    #[serde(default)]
    pub narrative: Option<NarrativeTable>,
    #[serde(default)]
    pub priorities: Option<PriorityRules>,
    #[serde(default)]
    pub catalogue: Option<Catalogue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryDef {
    pub name: String,
    /// Required when scoring = "weighted"; weights must sum to 1.0.
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub recommendation: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub next_step: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionDef {
    pub id: u32,
    pub category: String,
    pub text: String,
    #[serde(default = "default_rating")]
    pub default: u8,
}

/// Overall-score tier cut points. Category tiers are fixed at 70/40
/// across all assessments; these apply to the overall figure only.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct OverallThresholds {
    pub ready: u8,
    pub partial: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusLabels {
    pub ready: String,
    pub partial: String,
    pub at_risk: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NarrativeTable {
    pub ready: NextSteps,
    pub partial: NextSteps,
    pub at_risk: NextSteps,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NextSteps {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub blurb: Option<String>,
}

/// Thresholds for surfacing individual answers as stated priorities.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PriorityRules {
    pub min_value: u8,
    pub high: u8,
    pub hard: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Catalogue {
    /// Assumed monthly income (ILS) for affordability percentages.
    #[serde(default)]
    pub assumed_income: Option<u32>,
    /// Limit the rendered matches to the N best entries.
    #[serde(default)]
    pub top: Option<usize>,
    #[serde(default)]
    pub fit_summary: Option<FitSummary>,
    pub rules: Vec<FactorRule>,
    pub entries: Vec<CatalogueEntry>,
}

/// Headlines for the mean-fit gauge, one per tier.
#[derive(Debug, Clone, Deserialize)]
pub struct FitSummary {
    pub strong: String,
    pub moderate: String,
    pub early: String,
}

/// One declarative scoring rule applied to every catalogue entry.
///
/// Exactly one shape per rule:
/// - `question` + `threshold`: apply the entry's factor delta when the
///   answer to that question is >= threshold;
/// - `category`: scaled rule, delta = floor(category percentage * entry
///   coefficient), honoring the entry's `cap`;
/// - neither: the delta is applied unconditionally.
#[derive(Debug, Clone, Deserialize)]
pub struct FactorRule {
    pub factor: String,
    pub label: String,
    #[serde(default)]
    pub question: Option<u32>,
    #[serde(default)]
    pub threshold: Option<u8>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogueEntry {
    pub name: String,
    pub base_score: i32,
    #[serde(default)]
    pub cap: Option<i32>,
    #[serde(default)]
    pub quadrant: Option<String>,
    /// Per-entry deltas (signal/unconditional rules) or coefficients
    /// (scaled rules), keyed by rule factor name.
    pub factors: BTreeMap<String, f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub why: Option<String>,
    #[serde(default)]
    pub trade_offs: Option<String>,
    #[serde(default)]
    pub unlock: Option<String>,
    #[serde(default)]
    pub next_step: Option<String>,
    #[serde(default)]
    pub avg_price: Option<String>,
    #[serde(default)]
    pub rent_range: Option<String>,
    #[serde(default)]
    pub buy_range: Option<String>,
    #[serde(default)]
    pub cost_of_living: Option<String>,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
    #[serde(default)]
    pub monthly: Option<MonthlyCosts>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MonthlyCosts {
    pub rent: u32,
    pub arnona: u32,
    pub vaad: u32,
    pub utilities: u32,
    pub transport: u32,
}

impl MonthlyCosts {
    pub fn total(&self) -> u32 {
        self.rent + self.arnona + self.vaad + self.utilities + self.transport
    }
}

impl QuizDef {
    pub fn question(&self, id: u32) -> Option<&QuestionDef> {
        self.questions.iter().find(|question| question.id == id)
    }

    pub fn questions_in<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a QuestionDef> + 'a {
        self.questions
            .iter()
            .filter(move |question| question.category == category)
    }

    pub fn max_score_for(&self, category: &str) -> u32 {
        u32::from(RATING_MAX) * self.questions_in(category).count() as u32
    }

    pub fn validate(&self) -> Result<()> {
        if self.questions.is_empty() {
            return Err(definition_error(&self.id, "no questions declared"));
        }

        let mut category_names = HashSet::new();
        for category in &self.categories {
            if !category_names.insert(category.name.as_str()) {
                return Err(definition_error(
                    &self.id,
                    &format!("duplicate category: {}", category.name),
                ));
            }
            if self.questions_in(&category.name).next().is_none() {
                return Err(definition_error(
                    &self.id,
                    &format!("category '{}' has no questions", category.name),
                ));
            }
        }

        let mut question_ids = HashSet::new();
        for question in &self.questions {
            if !question_ids.insert(question.id) {
                return Err(definition_error(
                    &self.id,
                    &format!("duplicate question id: {}", question.id),
                ));
            }
            if !category_names.contains(question.category.as_str()) {
                return Err(definition_error(
                    &self.id,
                    &format!(
                        "question {} references undeclared category '{}'",
                        question.id, question.category
                    ),
                ));
            }
            if question.default > RATING_MAX {
                return Err(definition_error(
                    &self.id,
                    &format!(
                        "question {} default {} exceeds {}",
                        question.id, question.default, RATING_MAX
                    ),
                ));
            }
        }

        if self.scoring == ScoringMode::Weighted {
            let mut sum = 0.0f64;
            for category in &self.categories {
                match category.weight {
                    Some(weight) if weight > 0.0 && weight <= 1.0 => sum += weight,
                    Some(weight) => {
                        return Err(definition_error(
                            &self.id,
                            &format!(
                                "category '{}' weight {} outside (0, 1]",
                                category.name, weight
                            ),
                        ))
                    }
                    None => {
                        return Err(definition_error(
                            &self.id,
                            &format!(
                                "category '{}' is missing a weight (scoring = weighted)",
                                category.name
                            ),
                        ))
                    }
                }
            }
            if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
                return Err(definition_error(
                    &self.id,
                    &format!("category weights must sum to 1.0 (found {sum:.6})"),
                ));
            }
        }

        if self.thresholds.partial >= self.thresholds.ready || self.thresholds.ready > 100 {
            return Err(definition_error(
                &self.id,
                &format!(
                    "thresholds must satisfy partial < ready <= 100 (found {}/{})",
                    self.thresholds.partial, self.thresholds.ready
                ),
            ));
        }

        if let Some(rules) = &self.priorities {
            if !(rules.min_value <= rules.high
                && rules.high <= rules.hard
                && rules.hard <= RATING_MAX)
            {
                return Err(definition_error(
                    &self.id,
                    &format!(
                        "priority thresholds must satisfy min <= high <= hard <= {} (found {}/{}/{})",
                        RATING_MAX, rules.min_value, rules.high, rules.hard
                    ),
                ));
            }
        }

        if let Some(catalogue) = &self.catalogue {
            self.validate_catalogue(catalogue, &category_names)?;
        }

        Ok(())
    }

    fn validate_catalogue(
        &self,
        catalogue: &Catalogue,
        category_names: &HashSet<&str>,
    ) -> Result<()> {
        if catalogue.entries.is_empty() {
            return Err(definition_error(&self.id, "catalogue has no entries"));
        }

        for rule in &catalogue.rules {
            match (&rule.question, &rule.category) {
                (Some(_), Some(_)) => {
                    return Err(definition_error(
                        &self.id,
                        &format!(
                            "catalogue rule '{}' sets both question and category",
                            rule.factor
                        ),
                    ))
                }
                (Some(question_id), None) => {
                    if self.question(*question_id).is_none() {
                        return Err(definition_error(
                            &self.id,
                            &format!(
                                "catalogue rule '{}' references unknown question {}",
                                rule.factor, question_id
                            ),
                        ));
                    }
                    if rule.threshold.is_none() {
                        return Err(definition_error(
                            &self.id,
                            &format!(
                                "catalogue rule '{}' requires a threshold with a signal question",
                                rule.factor
                            ),
                        ));
                    }
                }
                (None, Some(category)) => {
                    if !category_names.contains(category.as_str()) {
                        return Err(definition_error(
                            &self.id,
                            &format!(
                                "catalogue rule '{}' references undeclared category '{}'",
                                rule.factor, category
                            ),
                        ));
                    }
                }
                (None, None) => {}
            }

            for entry in &catalogue.entries {
                if !entry.factors.contains_key(&rule.factor) {
                    return Err(definition_error(
                        &self.id,
                        &format!(
                            "catalogue entry '{}' is missing factor '{}'",
                            entry.name, rule.factor
                        ),
                    ));
                }
            }
        }

        Ok(())
    }
}

fn definition_error(quiz: &str, message: &str) -> CompassError {
    CompassError::Definition(format!("{quiz}: {message}"))
}
