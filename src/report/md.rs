use crate::types::report::{AssessmentReport, CommunityFit};
use std::fmt::Write;

/// Priority chips shown in the report, as in the original results page.
const MAX_PRIORITY_CHIPS: usize = 8;

pub fn to_markdown(report: &AssessmentReport) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "# {}\n", report.title);
    let _ = writeln!(output, "Generated: {}\n", report.generated_at);

    let _ = writeln!(output, "## Overall\n");
    let _ = writeln!(output, "**{}%** — {}\n", report.overall, report.status_label);
    if let Some(next_steps) = &report.next_steps {
        if let Some(blurb) = &next_steps.blurb {
            let _ = writeln!(output, "{blurb}\n");
        }
    }

    push_categories(&mut output, report);
    push_pillars(&mut output, report);
    push_gaps(&mut output, report);
    push_priorities(&mut output, report);
    push_matches(&mut output, report);
    push_fit_gauge(&mut output, report);
    push_next_steps(&mut output, report);

    if let Some(disclaimer) = &report.disclaimer {
        let _ = writeln!(output, "---\n\n*{disclaimer}*");
    }

    output
}

fn push_categories(output: &mut String, report: &AssessmentReport) {
    let _ = writeln!(output, "## Category Breakdown\n");
    let weighted = report
        .categories
        .iter()
        .any(|category| category.weight.is_some());
    if weighted {
        let _ = writeln!(output, "| Category | Score | Percent | Status | Weight |");
        let _ = writeln!(output, "|---|---|---|---|---|");
    } else {
        let _ = writeln!(output, "| Category | Score | Percent | Status |");
        let _ = writeln!(output, "|---|---|---|---|");
    }
    for category in &report.categories {
        let status = format!("{} {}", category.tier.icon(), category.tier.name());
        if weighted {
            let weight = category
                .weight
                .map(|weight| format!("{:.0}%", weight * 100.0))
                .unwrap_or_else(|| "-".to_string());
            let _ = writeln!(
                output,
                "| {} | {}/{} | {}% | {} | {} |",
                category.name, category.score, category.max_score, category.percentage, status,
                weight
            );
        } else {
            let _ = writeln!(
                output,
                "| {} | {}/{} | {}% | {} |",
                category.name, category.score, category.max_score, category.percentage, status
            );
        }
    }
    let _ = writeln!(output);
}

/// Per-pillar summaries and next steps (buy-readiness style).
fn push_pillars(output: &mut String, report: &AssessmentReport) {
    if !report
        .categories
        .iter()
        .any(|category| category.summary.is_some() || category.next_step.is_some())
    {
        return;
    }
    let _ = writeln!(output, "## Readiness Pillars\n");
    for category in &report.categories {
        let _ = writeln!(
            output,
            "### {} — {} {}%\n",
            category.name,
            category.tier.icon(),
            category.percentage
        );
        if let Some(summary) = &category.summary {
            let _ = writeln!(output, "{summary}\n");
        }
        if let Some(next_step) = &category.next_step {
            let _ = writeln!(output, "→ Next Step: {next_step}\n");
        }
    }
}

fn push_gaps(output: &mut String, report: &AssessmentReport) {
    if !report.gaps.iter().any(|gap| gap.recommendation.is_some()) {
        return;
    }
    let _ = writeln!(output, "## Priority Areas\n");
    for (index, gap) in report.gaps.iter().enumerate() {
        let _ = writeln!(
            output,
            "{}. **{}** — {}% {}",
            index + 1,
            gap.name,
            gap.percentage,
            gap.tier.icon()
        );
        if let Some(recommendation) = &gap.recommendation {
            let _ = writeln!(output, "   → {recommendation}");
        }
    }
    let _ = writeln!(output);
}

fn push_priorities(output: &mut String, report: &AssessmentReport) {
    if report.priorities.is_empty() {
        return;
    }
    let _ = writeln!(output, "## Your Stated Priorities\n");
    for priority in report.priorities.iter().take(MAX_PRIORITY_CHIPS) {
        let tag = match priority.strength {
            crate::types::report::PriorityStrength::Hard => "hard",
            crate::types::report::PriorityStrength::High => "high",
            crate::types::report::PriorityStrength::Medium => "medium",
        };
        let _ = writeln!(
            output,
            "- [{tag}] {} ({}/10)",
            priority.text, priority.value
        );
    }
    let _ = writeln!(output);
}

fn push_matches(output: &mut String, report: &AssessmentReport) {
    if report.matches.is_empty() {
        return;
    }
    let _ = writeln!(output, "## Community Matches\n");
    for (index, fit) in report.matches.iter().enumerate() {
        let _ = writeln!(
            output,
            "### {}. {} — {}% {} {}\n",
            index + 1,
            fit.name,
            fit.fit_score,
            fit.fit_icon,
            fit.fit_label
        );
        push_match_details(output, fit);
    }
}

fn push_match_details(output: &mut String, fit: &CommunityFit) {
    if let Some(description) = &fit.description {
        let _ = writeln!(output, "{description}\n");
    }
    if let Some(why) = &fit.why {
        let _ = writeln!(output, "Why it matches: {why}\n");
    }
    if let Some(trade_offs) = &fit.trade_offs {
        let _ = writeln!(output, "Trade-offs: {trade_offs}\n");
    }

    let mut figures = Vec::new();
    if let Some(avg_price) = &fit.avg_price {
        figures.push(format!("Avg. purchase price {avg_price}"));
    }
    if let Some(rent_range) = &fit.rent_range {
        figures.push(format!("Rent {rent_range}"));
    }
    if let Some(buy_range) = &fit.buy_range {
        figures.push(format!("Buy {buy_range}"));
    }
    if let Some(cost_of_living) = &fit.cost_of_living {
        figures.push(format!("Cost of living {cost_of_living}"));
    }
    if !figures.is_empty() {
        let _ = writeln!(output, "{}\n", figures.join(" | "));
    }

    if let Some(affordability) = &fit.affordability {
        let _ = writeln!(
            output,
            "Monthly carry ₪{} ({}% of income) {}\n",
            affordability.monthly_total, affordability.income_percent, affordability.icon
        );
    }

    if !fit.attribution.is_empty() {
        let contributions: Vec<String> = fit
            .attribution
            .iter()
            .map(|factor| format!("{} {:+}", factor.label, factor.points))
            .collect();
        let _ = writeln!(output, "Score drivers: {}\n", contributions.join(", "));
    }

    if !fit.pros.is_empty() {
        let _ = writeln!(output, "Pros:");
        for pro in &fit.pros {
            let _ = writeln!(output, "- {pro}");
        }
        let _ = writeln!(output);
    }
    if !fit.cons.is_empty() {
        let _ = writeln!(output, "Considerations:");
        for con in &fit.cons {
            let _ = writeln!(output, "- {con}");
        }
        let _ = writeln!(output);
    }
    if let Some(unlock) = &fit.unlock {
        let _ = writeln!(output, "Unlock: {unlock}\n");
    }
    if let Some(next_step) = &fit.next_step {
        let _ = writeln!(output, "Next step: {next_step}\n");
    }
}

fn push_fit_gauge(output: &mut String, report: &AssessmentReport) {
    let Some(gauge) = &report.fit_gauge else {
        return;
    };
    let _ = writeln!(output, "## Overall Community Fit\n");
    let _ = writeln!(output, "**{}** — {}\n", gauge.overall_fit, gauge.status);
    let _ = writeln!(output, "{}\n", gauge.headline);
}

fn push_next_steps(output: &mut String, report: &AssessmentReport) {
    let Some(next_steps) = &report.next_steps else {
        return;
    };
    if next_steps.title.is_none() && next_steps.steps.is_empty() {
        return;
    }
    match &next_steps.title {
        Some(title) => {
            let _ = writeln!(output, "## {title}\n");
        }
        None => {
            let _ = writeln!(output, "## Next Steps\n");
        }
    }
    for step in &next_steps.steps {
        let _ = writeln!(output, "- {step}");
    }
    if !next_steps.steps.is_empty() {
        let _ = writeln!(output);
    }
}
