use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "matchstats",
    version,
    about = "Rank tennis players by aggregate match statistics"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank every player in a data directory by one statistic
    Rank(RankCommand),
    /// Show every statistic for a single player
    Profile(ProfileCommand),
    /// List the statistic catalogue
    Stats,
    /// Print the sets parsed from a score string
    ParseScore(ParseScoreCommand),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}

/// Match slice selection. `all` disables a filter.
#[derive(Args, Clone, Debug, Default)]
pub struct FilterArgs {
    #[arg(long)]
    pub surface: Option<String>,
    #[arg(long)]
    pub season: Option<String>,
    #[arg(long)]
    pub level: Option<String>,
}

#[derive(Args)]
pub struct RankCommand {
    pub path: PathBuf,
    /// Statistic key, see `matchstats stats`
    #[arg(short, long)]
    pub stat: Option<String>,
    #[command(flatten)]
    pub filters: FilterArgs,
    /// Drop players with fewer contributing matches
    #[arg(long)]
    pub min_matches: Option<u32>,
    /// Number of entries to print (1..=500)
    #[arg(long)]
    pub top: Option<u32>,
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
}

#[derive(Args)]
pub struct ProfileCommand {
    pub path: PathBuf,
    #[arg(long)]
    pub player: String,
    #[command(flatten)]
    pub filters: FilterArgs,
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
}

#[derive(Args)]
pub struct ParseScoreCommand {
    pub score: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_arguments_parse() {
        let cli = Cli::parse_from([
            "matchstats",
            "rank",
            "data",
            "--stat",
            "bpsaved",
            "--surface",
            "Clay",
            "--top",
            "10",
            "--format",
            "json",
        ]);
        match cli.command {
            Commands::Rank(cmd) => {
                assert_eq!(cmd.stat.as_deref(), Some("bpsaved"));
                assert_eq!(cmd.filters.surface.as_deref(), Some("Clay"));
                assert_eq!(cmd.top, Some(10));
                assert!(matches!(cmd.format, Some(ReportFormat::Json)));
                assert!(cmd.min_matches.is_none());
            }
            _ => panic!("expected rank command"),
        }
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let parsed = Cli::try_parse_from(["matchstats", "-q", "-v", "stats"]);
        assert!(parsed.is_err());
    }
}
