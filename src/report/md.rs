use crate::engine::catalogue::Unit;
use crate::types::report::{ProfileReport, RankingReport, ReportMeta};

pub fn format_value(unit: Unit, value: f64) -> String {
    match unit {
        Unit::Count => format!("{value:.0}"),
        Unit::Percentage => format!("{value:.1}%"),
        Unit::Average => format!("{value:.1}"),
    }
}

fn push_meta(output: &mut String, meta: &ReportMeta) {
    output.push_str(&format!(
        "Filters: {}\n\nMatches considered: {}\n\n",
        meta.filters, meta.matches_considered
    ));
}

pub fn ranking_to_markdown(report: &RankingReport) -> String {
    let mut output = String::new();
    output.push_str(&format!("# {}\n\n", report.label));
    push_meta(&mut output, &report.meta);
    if report.min_matches > 0 {
        output.push_str(&format!("Minimum matches: {}\n\n", report.min_matches));
    }

    if report.entries.is_empty() {
        output.push_str("- none\n");
        return output;
    }

    output.push_str(&format!(
        "| Rank | Player | Country | Matches | {} |\n",
        report.label
    ));
    output.push_str("|---:|---|---|---:|---:|\n");
    for (rank, entry) in report.entries.iter().enumerate() {
        output.push_str(&format!(
            "| {} | {} | {} | {}/{} | {} |\n",
            rank + 1,
            entry.name,
            entry.country_code,
            entry.matches_used,
            entry.matches_appeared,
            format_value(report.unit, entry.output)
        ));
    }
    output
}

pub fn profile_to_markdown(report: &ProfileReport) -> String {
    let profile = &report.profile;
    let mut output = String::new();
    output.push_str(&format!(
        "# {} ({})\n\n",
        profile.name,
        if profile.country_code.is_empty() {
            "-"
        } else {
            profile.country_code.as_str()
        }
    ));
    push_meta(&mut output, &report.meta);
    output.push_str(&format!("Matches played: {}\n\n", profile.matches_appeared));

    for section in &profile.sections {
        output.push_str(&format!("## {}\n\n", section.category.title()));
        for stat in &section.stats {
            output.push_str(&format!(
                "- {}: {} ({} matches)\n",
                stat.label,
                format_value(stat.unit, stat.value),
                stat.matches_used
            ));
        }
        output.push('\n');
    }

    let rates = &profile.rates;
    output.push_str("## Rates\n\n");
    output.push_str(&format!(
        "- points per game: {:.2}\n- points per set: {:.2}\n- points per match: {:.2}\n- games per set: {:.2}\n- games per match: {:.2}\n- sets per match: {:.2}\n",
        rates.points_per_game,
        rates.points_per_set,
        rates.points_per_match,
        rates.games_per_set,
        rates.games_per_match,
        rates.sets_per_match
    ));
    output
}
