//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Storecheck: UI and API checks for the demo storefront
#[derive(Parser, Debug)]
#[command(name = "storecheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file (defaults to $STORECHECK_CONFIG or config/config.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log level implied by `-q` / `-v`
    #[must_use]
    pub const fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the resolved configuration
    Config(ConfigArgs),

    /// Fetch the product catalog from the API
    Catalog(CatalogArgs),

    /// Sign in through the API and print the response
    Signin(SigninArgs),

    /// Buy a product through the browser UI
    Purchase(PurchaseArgs),
}

/// Output format for `config`
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML, as in the config file
    #[default]
    Yaml,
    /// JSON
    Json,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "yaml")]
    pub format: ConfigFormat,

    /// Also show the WebDriver endpoint the session would use
    #[arg(long)]
    pub plan: bool,
}

/// Arguments for the catalog command
#[derive(Parser, Debug)]
pub struct CatalogArgs {
    /// Override the configured API base URL
    #[arg(long)]
    pub api_base_url: Option<String>,

    /// Fail unless every product has a title, price and description
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the signin command
#[derive(Parser, Debug)]
pub struct SigninArgs {
    /// Override the configured API base URL
    #[arg(long)]
    pub api_base_url: Option<String>,

    /// Account name
    #[arg(short, long)]
    pub username: String,

    /// Account password
    #[arg(short, long)]
    pub password: String,
}

/// Arguments for the purchase command
#[derive(Parser, Debug)]
pub struct PurchaseArgs {
    /// Product title as shown on the shelf
    #[arg(long, default_value = "iPhone 12")]
    pub product: String,

    /// Account name
    #[arg(short, long, default_value = "demouser")]
    pub username: String,

    /// Account password
    #[arg(short, long, default_value = "testingisfun99")]
    pub password: String,

    /// Directory for the failure screenshot
    #[arg(long, default_value = "reports/screenshots")]
    pub screenshots: PathBuf,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_log_level_from_flags() {
        let cli = Cli::parse_from(["storecheck", "config"]);
        assert_eq!(cli.log_level(), "info");
        let cli = Cli::parse_from(["storecheck", "-vv", "config"]);
        assert_eq!(cli.log_level(), "trace");
        let cli = Cli::parse_from(["storecheck", "-q", "-v", "config"]);
        assert_eq!(cli.log_level(), "error");
    }

    #[test]
    fn test_signin_requires_credentials() {
        assert!(Cli::try_parse_from(["storecheck", "signin", "-u", "demouser"]).is_err());
        let cli =
            Cli::try_parse_from(["storecheck", "signin", "-u", "demouser", "-p", "pw"]).unwrap();
        match cli.command {
            Commands::Signin(args) => {
                assert_eq!(args.username, "demouser");
                assert_eq!(args.password, "pw");
                assert!(args.api_base_url.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_purchase_defaults() {
        let cli = Cli::parse_from(["storecheck", "purchase", "--config", "x.yaml"]);
        assert_eq!(cli.config, Some(PathBuf::from("x.yaml")));
        match cli.command {
            Commands::Purchase(args) => {
                assert_eq!(args.product, "iPhone 12");
                assert_eq!(args.username, "demouser");
                assert_eq!(args.screenshots, PathBuf::from("reports/screenshots"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
