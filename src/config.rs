use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "horizon_dashboards")]
#[command(about = "Builds the cohesion projects dashboards from the analytics API")]
#[command(version)]
pub struct Args {
    /// Base URL of the analytics API
    #[arg(long, env = "DASHBOARD_API_URL", default_value = "http://127.0.0.1:8000")]
    pub base_url: String,

    /// Directory receiving the generated pages
    #[arg(long, env = "DASHBOARD_TARGET_DIR", default_value = "site")]
    pub target_dir: PathBuf,

    /// HTTP request timeout
    #[arg(long, env = "DASHBOARD_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Read the `{"data": ...}` response of one dashboard from this file
    /// instead of the API
    #[arg(long)]
    pub input: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// "Visione d'insieme" dashboard
    Overview {
        /// Region code, e.g. 012
        #[arg(long)]
        region: Option<String>,
        #[arg(long)]
        macroarea: Option<String>,
    },

    /// "Analisi finanziaria" dashboard
    Analysis {
        #[arg(long)]
        macro_area: Option<String>,
        /// Funding source code, e.g. UE
        #[arg(long)]
        funding_source: Option<String>,
    },

    /// Both dashboards for every filter selection, plus the index page
    All,
}

impl Args {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Rejects combinations clap cannot express: a payload file holds the
    /// data of a single dashboard.
    pub fn validate(&self) -> Result<(), clap::Error> {
        if self.input.is_some() && self.command == Command::All {
            return Err(Args::command().error(
                ErrorKind::ArgumentConflict,
                "--input holds one dashboard payload and cannot be used with `all`",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{Args, Command};
    use clap::error::ErrorKind;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["horizon_dashboards", "all"]).unwrap();
        assert_eq!(args.command, Command::All);
        assert_eq!(args.target_dir, PathBuf::from("site"));
        assert_eq!(args.timeout().as_secs(), 30);
        assert!(args.input.is_none());
    }

    #[test]
    fn test_analysis_filters() {
        let args = Args::try_parse_from([
            "horizon_dashboards",
            "--base-url",
            "http://api.example",
            "analysis",
            "--macro-area",
            "MEZZOGIORNO",
        ])
        .unwrap();
        assert_eq!(args.base_url, "http://api.example");
        assert_eq!(
            args.command,
            Command::Analysis {
                macro_area: Some("MEZZOGIORNO".to_string()),
                funding_source: None
            }
        );
    }

    #[test]
    fn test_overview_filters() {
        let args = Args::try_parse_from([
            "horizon_dashboards",
            "--input",
            "overview.json",
            "overview",
            "--region",
            "012",
        ])
        .unwrap();
        assert_eq!(args.input, Some(PathBuf::from("overview.json")));
        assert_eq!(
            args.command,
            Command::Overview {
                region: Some("012".to_string()),
                macroarea: None
            }
        );
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_input_conflicts_with_all() {
        let argv = ["horizon_dashboards", "--input", "overview.json", "all"];
        let args = Args::try_parse_from(argv).unwrap();
        let err = args.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);

        let args = Args::try_parse_from(["horizon_dashboards", "all"]).unwrap();
        assert!(args.validate().is_ok());
    }
}
