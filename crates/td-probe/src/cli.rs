use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "trackdash-probe",
    version,
    about = "Exercise the dashboard endpoints of a running server"
)]
pub struct Cli {
    /// Server origin, e.g. http://localhost:8000
    #[arg(long, short = 'b', env = "TRACKDASH_BASE_URL", default_value = "http://localhost:8000")]
    pub base_url: String,

    /// TOML configuration overriding endpoints and selectors.
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Also write logs to `trackdash-probe.log` in this directory.
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 15)]
    pub timeout: u64,

    #[arg(long, short = 'v')]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch a page the way sidebar navigation does and report its fragment.
    Fetch {
        /// Page path, resolved against the base URL.
        path: String,
        /// Print the extracted markup too.
        #[arg(long)]
        html: bool,
    },
    /// Load a registration wizard step over AJAX.
    Step {
        /// Wizard page path.
        #[arg(default_value = "/customers/register/")]
        path: String,
        #[arg(long, short = 's', default_value_t = 1)]
        step: u32,
    },
    /// Ask the duplicate-customer endpoint about an identity.
    Duplicate(DuplicateArgs),
    /// Run a header customer search.
    Search { term: String },
    /// Poll the notification summary once.
    Notifications,
}

#[derive(Debug, Args)]
pub struct DuplicateArgs {
    #[arg(long)]
    pub full_name: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long, default_value = "")]
    pub customer_type: String,
    #[arg(long, default_value = "")]
    pub organization_name: String,
    #[arg(long, default_value = "")]
    pub tax_number: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_duplicate_with_defaults() {
        let cli = Cli::try_parse_from([
            "trackdash-probe",
            "--base-url",
            "http://pos.local",
            "duplicate",
            "--full-name",
            "Ada",
            "--phone",
            "0712",
        ])
        .unwrap();

        assert_eq!(cli.base_url, "http://pos.local");
        match cli.command {
            Command::Duplicate(args) => {
                assert_eq!(args.full_name, "Ada");
                assert!(args.customer_type.is_empty());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn step_defaults_to_the_registration_page() {
        let cli = Cli::try_parse_from(["trackdash-probe", "step", "-s", "3"]).unwrap();
        match cli.command {
            Command::Step { path, step } => {
                assert_eq!(path, "/customers/register/");
                assert_eq!(step, 3);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn search_needs_a_term() {
        assert!(Cli::try_parse_from(["trackdash-probe", "search"]).is_err());
    }
}
