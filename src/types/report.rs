use serde::Serialize;

/// Three-tier status shared by category scores and overall results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Ready,
    Partial,
    AtRisk,
}

impl Tier {
    pub fn icon(self) -> &'static str {
        match self {
            Tier::Ready => "\u{1F7E2}",
            Tier::Partial => "\u{1F7E1}",
            Tier::AtRisk => "\u{1F534}",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Tier::Ready => "Ready",
            Tier::Partial => "Partial",
            Tier::AtRisk => "At Risk",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryScore {
    pub name: String,
    pub score: u32,
    pub max_score: u32,
    pub percentage: u8,
    pub tier: Tier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_step: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityStrength {
    Hard,
    High,
    Medium,
}

/// A single answer surfaced as a stated priority (community finder).
#[derive(Debug, Clone, Serialize)]
pub struct PriorityItem {
    pub text: String,
    pub value: u8,
    pub strength: PriorityStrength,
}

#[derive(Debug, Clone, Serialize)]
pub struct FactorPoints {
    pub label: String,
    pub points: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Affordability {
    pub monthly_total: u32,
    pub income_percent: u8,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommunityFit {
    pub name: String,
    pub fit_score: u8,
    pub fit_icon: String,
    pub fit_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quadrant: Option<String>,
    pub attribution: Vec<FactorPoints>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub why: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade_offs: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlock: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_step: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rent_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buy_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_of_living: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pros: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cons: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affordability: Option<Affordability>,
}

/// Mean-fit gauge across all catalogue entries.
#[derive(Debug, Clone, Serialize)]
pub struct FitGauge {
    pub overall_fit: u8,
    pub tier: Tier,
    pub status: String,
    pub headline: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NextStepsOut {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blurb: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentReport {
    pub quiz: String,
    pub title: String,
    pub generated_at: String,
    pub overall: u8,
    pub tier: Tier,
    pub status_label: String,
    pub categories: Vec<CategoryScore>,
    /// Categories ranked weakest-first, optionally truncated.
    pub gaps: Vec<CategoryScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_steps: Option<NextStepsOut>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub priorities: Vec<PriorityItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub matches: Vec<CommunityFit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit_gauge: Option<FitGauge>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disclaimer: Option<String>,
}
