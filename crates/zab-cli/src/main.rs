use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use zab_core::{pipeline, SiteProfile};

#[derive(Parser, Debug)]
#[command(name = "zab-scrape")]
#[command(about = "Scrape volunteering opportunities into CSV and JSON", version)]
struct Cli {
    /// Site to crawl
    #[arg(short, long, value_enum, default_value = "buergernetz")]
    site: Site,

    /// Listing page URL (required for --site projects)
    #[arg(short, long)]
    url: Option<String>,

    /// Directory for CSV, JSON and saved HTML pages
    #[arg(short = 'O', long, default_value = ".")]
    output_dir: PathBuf,

    /// Log level: error, warn, info, debug, trace
    #[arg(long, default_value = "info", value_enum)]
    log_level: LogLevel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum Site {
    /// ZAB Bürgernetz volunteer database
    Buergernetz,
    /// Municipal project listing grouped by category
    Projects,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn filter(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info,selectors=warn,html5ever=warn",
            LogLevel::Debug => "debug,selectors=warn,html5ever=warn",
            LogLevel::Trace => "trace,selectors=warn,html5ever=warn",
        }
    }
}

fn build_profile(cli: &Cli) -> Result<SiteProfile> {
    let profile = match (cli.site, &cli.url) {
        (Site::Buergernetz, None) => SiteProfile::buergernetz(),
        (Site::Buergernetz, Some(url)) => SiteProfile {
            listing_url: url.clone(),
            ..SiteProfile::buergernetz()
        },
        (Site::Projects, Some(url)) => SiteProfile::projects(url.as_str()),
        (Site::Projects, None) => bail!("--site projects needs the listing page via --url"),
    };

    Ok(profile.with_output_dir(&cli.output_dir))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.log_level.filter()));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let profile = build_profile(&cli)?;

    // Run-level failures are reported, not turned into an exit code
    match pipeline::run(&profile).await {
        Ok(summary) => {
            tracing::info!(
                records = summary.records,
                fallbacks = summary.fallbacks,
                pages_saved = summary.pages_saved,
                "Scraping completed successfully"
            );
            tracing::info!(csv = %summary.csv_path.display(), json = %summary.json_path.display(), "Data saved");
            if let Some(dir) = &summary.html_dir {
                tracing::info!(dir = %dir.display(), "HTML content saved");
            }
        }
        Err(e) => tracing::error!(error = %e, "An error occurred"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::time::Duration;

    #[test]
    fn test_defaults_to_buergernetz() {
        let cli = Cli::try_parse_from(["zab-scrape"]).unwrap();
        let profile = build_profile(&cli).unwrap();
        assert_eq!(profile, SiteProfile::buergernetz());
    }

    #[test]
    fn test_projects_requires_url() {
        let cli = Cli::try_parse_from(["zab-scrape", "--site", "projects"]).unwrap();
        let err = build_profile(&cli).unwrap_err();
        assert!(err.to_string().contains("--url"));
    }

    #[test]
    fn test_projects_with_url_and_output_dir() {
        let cli = Cli::try_parse_from([
            "zab-scrape",
            "--site",
            "projects",
            "--url",
            "https://example.org/projekte.html",
            "-O",
            "/tmp/ausgabe",
        ])
        .unwrap();
        let profile = build_profile(&cli).unwrap();
        assert_eq!(profile.listing_url, "https://example.org/projekte.html");
        assert_eq!(profile.delay, Duration::from_millis(500));
        assert_eq!(profile.output.dir, Path::new("/tmp/ausgabe"));
    }

    #[test]
    fn test_buergernetz_url_override_keeps_settings() {
        let cli = Cli::try_parse_from(["zab-scrape", "--url", "http://localhost:8080/liste.html"]).unwrap();
        let profile = build_profile(&cli).unwrap();
        assert_eq!(profile.listing_url, "http://localhost:8080/liste.html");
        assert_eq!(profile.output.csv_file, "volunteer_opportunities.csv");
    }

    #[test]
    fn test_unknown_site_rejected() {
        assert!(Cli::try_parse_from(["zab-scrape", "--site", "other"]).is_err());
    }

    #[test]
    fn test_log_level_filter() {
        assert_eq!(LogLevel::Error.filter(), "error");
        assert!(LogLevel::Debug.filter().starts_with("debug"));
    }
}
