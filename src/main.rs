mod cli;
mod config;
mod engine;
mod error;
mod logging;
mod provider;
mod report;
mod types;

use crate::engine::catalogue::{StatKind, CATALOGUE};
use crate::engine::StatisticRequest;
use crate::error::StatsError;
use crate::provider::json_dir::JsonDirProvider;
use crate::provider::{MatchProvider, MatchQuery};
use crate::report::OutputFormat;
use crate::types::config::{StatsConfig, MAX_TOP};
use crate::types::matches::{MatchFilters, ServeField};
use crate::types::report::{ProfileReport, RankingReport, ReportMeta};
use clap::Parser;
use tracing::{info, warn};

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const EMPTY_RESULT: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn output_format(requested: Option<cli::ReportFormat>, loaded: &StatsConfig) -> OutputFormat {
    match requested {
        Some(cli::ReportFormat::Json) => OutputFormat::Json,
        Some(cli::ReportFormat::Md) => OutputFormat::Md,
        None => loaded.format(),
    }
}

fn resolve_filters(args: &cli::FilterArgs, loaded: &StatsConfig) -> Result<MatchFilters, StatsError> {
    let surface = args.surface.clone().or_else(|| loaded.surface());
    let season = args.season.clone().or_else(|| loaded.season());
    let level = args.level.clone().or_else(|| loaded.level());
    MatchFilters::parse(surface.as_deref(), season.as_deref(), level.as_deref())
}

fn report_meta(
    provider: &JsonDirProvider,
    matches_considered: usize,
    filters: &MatchFilters,
) -> Result<ReportMeta, StatsError> {
    Ok(ReportMeta {
        version: env!("CARGO_PKG_VERSION").to_string(),
        generated_at: chrono::Utc::now().to_rfc3339(),
        dataset_digest: provider.digest()?,
        matches_considered,
        filters: filters.describe(),
    })
}

fn rank(cmd: cli::RankCommand) -> Result<i32, StatsError> {
    let provider = JsonDirProvider::open(&cmd.path)?;
    let loaded = config::load_config(&cmd.path)?.unwrap_or_default();

    let stat_key = cmd.stat.unwrap_or_else(|| loaded.stat());
    let stat = StatKind::parse(&stat_key);
    if stat == StatKind::Unrecognized {
        warn!(statistic = %stat_key, "unrecognized statistic, every player scores zero");
    }
    let filters = resolve_filters(&cmd.filters, &loaded)?;
    let min_matches = cmd.min_matches.unwrap_or_else(|| loaded.min_matches());
    let top = cmd.top.unwrap_or_else(|| loaded.top()).clamp(1, MAX_TOP);

    let request = StatisticRequest { stat, filters };
    let (mut entries, considered) = engine::run(&provider, &request)?;
    entries.retain(|entry| entry.matches_used >= min_matches);
    entries.truncate(top as usize);
    info!(
        statistic = %stat_key,
        matches = considered,
        entries = entries.len(),
        "ranking complete"
    );

    let statistic = if stat == StatKind::Unrecognized {
        stat_key
    } else {
        stat.key().to_string()
    };
    let ranking = RankingReport {
        meta: report_meta(&provider, considered, &request.filters)?,
        statistic,
        label: stat.label().to_string(),
        unit: stat.unit(),
        min_matches,
        entries,
    };
    let rendered = report::render_ranking(&ranking, output_format(cmd.format, &loaded))?;
    println!("{rendered}");

    if ranking.entries.is_empty() {
        warn!("no players matched the request");
        Ok(exit_code::EMPTY_RESULT)
    } else {
        Ok(exit_code::SUCCESS)
    }
}

fn profile(cmd: cli::ProfileCommand) -> Result<i32, StatsError> {
    let provider = JsonDirProvider::open(&cmd.path)?;
    let loaded = config::load_config(&cmd.path)?.unwrap_or_default();
    let filters = resolve_filters(&cmd.filters, &loaded)?;

    let query = MatchQuery {
        filters: filters.clone(),
        fields: ServeField::ALL.to_vec(),
        player: Some(cmd.player.clone()),
    };
    let matches = provider.fetch(&query)?;
    let profile = engine::profile::build_profile(&matches, &cmd.player)?;
    info!(player = %cmd.player, matches = matches.len(), "profile complete");

    let report = ProfileReport {
        meta: report_meta(&provider, matches.len(), &filters)?,
        profile,
    };
    let rendered = report::render_profile(&report, output_format(cmd.format, &loaded))?;
    println!("{rendered}");
    Ok(exit_code::SUCCESS)
}

fn list_stats() -> i32 {
    for def in CATALOGUE {
        println!(
            "{:<24} {:<32} {:<10} {}",
            def.key,
            def.label,
            def.category.title(),
            def.formula.unit().name()
        );
    }
    exit_code::SUCCESS
}

fn parse_score(cmd: cli::ParseScoreCommand) -> i32 {
    let sets = engine::score::tokenize(&cmd.score);
    if sets.is_empty() {
        println!("no sets");
        return exit_code::EMPTY_RESULT;
    }
    for (index, set) in sets.iter().enumerate() {
        if set.super_tiebreak {
            println!(
                "set {}: [{}-{}] (super tie-break)",
                index + 1,
                set.winner_games,
                set.loser_games
            );
            continue;
        }
        let marker = if set.tiebreak { " (tie-break)" } else { "" };
        println!(
            "set {}: {}-{}{}",
            index + 1,
            set.winner_games,
            set.loser_games,
            marker
        );
    }
    let games = sets
        .iter()
        .fold(0u32, |total, set| total.saturating_add(set.games()));
    let tiebreaks = sets.iter().filter(|set| set.tiebreak).count();
    println!("sets: {}, games: {}, tie-breaks: {}", sets.len(), games, tiebreaks);
    exit_code::SUCCESS
}

fn run() -> Result<i32, StatsError> {
    let cli = cli::Cli::parse();
    logging::init(cli.verbose, cli.quiet);
    match cli.command {
        cli::Commands::Rank(cmd) => rank(cmd),
        cli::Commands::Profile(cmd) => profile(cmd),
        cli::Commands::Stats => Ok(list_stats()),
        cli::Commands::ParseScore(cmd) => Ok(parse_score(cmd)),
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
