use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use portfolio_site::config::ConfigError;
use portfolio_site::lifecycle::{load_site, StartupError};
use portfolio_site::security::CspPolicy;
use portfolio_site::seo::{render_robots, render_sitemap, sitemap_entries};

#[derive(Parser)]
#[command(name = "site-cli")]
#[command(about = "Offline tooling for the portfolio site", long_about = None)]
struct Cli {
    /// Path to the TOML config file. Defaults apply when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate config and content, report problems
    Check,
    /// Print the sitemap XML
    Sitemap,
    /// Print robots.txt
    Robots,
    /// Print the Content-Security-Policy template
    Csp,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let site = match load_site(cli.config.as_deref()) {
        Ok(site) => site,
        Err(StartupError::Config(ConfigError::Validation(errors))) => {
            for error in errors {
                eprintln!("invalid config: {}", error);
            }
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Check => {
            println!(
                "ok: {} projects, {} services, {} FAQ entries",
                site.catalog.projects().len(),
                site.catalog.services().len(),
                site.catalog.site().faq.len()
            );
        }
        Commands::Sitemap => {
            let today = chrono::Utc::now().date_naive();
            let entries = sitemap_entries(&site.config.site, &site.catalog, today);
            print!("{}", render_sitemap(&entries));
        }
        Commands::Robots => {
            print!("{}", render_robots(&site.config.site));
        }
        Commands::Csp => {
            let policy = CspPolicy::new(site.config.security.connect_src.clone());
            println!("{}", policy.template());
        }
    }

    ExitCode::SUCCESS
}
