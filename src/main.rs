use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crawlurl::logging;
use crawlurl::{is_subdomain, ParserConfig, Url, UrlParser};

/// Normalize, decompose and resolve URLs the way the crawl frontier sees them.
#[derive(Debug, Parser)]
#[command(name = "crawlurl", version, about)]
struct Cli {
    /// TOML file with a [normalize] section
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every component of each URL
    Parse {
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Resolve references against an absolute base URL
    Resolve {
        base: String,
        #[arg(required = true)]
        references: Vec<String>,
    },
    /// Check whether HOST belongs to the site of URL (ignoring www.)
    Subdomain { host: String, url: String },
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("crawlurl error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => ParserConfig::load(path)?,
        None => ParserConfig::default(),
    };
    let parser = UrlParser::from_config(&config);

    match cli.command {
        Command::Parse { urls } => {
            for raw in &urls {
                let url = parser
                    .parse(raw)
                    .with_context(|| format!("parsing {}", raw))?;
                print_url(raw, &url);
            }
        }
        Command::Resolve { base, references } => {
            let base_url = parser
                .parse(&base)
                .with_context(|| format!("parsing base {}", base))?;
            for raw in &references {
                let resolved = parser
                    .resolve_str(&base_url, raw)
                    .with_context(|| format!("resolving {} against {}", raw, base))?;
                println!("{} => {}", raw, resolved);
            }
        }
        Command::Subdomain { host, url } => {
            let target = parser
                .parse(&url)
                .with_context(|| format!("parsing {}", url))?;
            println!("{}", is_subdomain(&host, &target));
        }
    }
    Ok(())
}

fn print_url(raw: &str, url: &Url) {
    println!("{}", raw);
    println!("  url:        {}", url);
    println!("  absolute:   {}", url.is_abs());
    println!("  scheme:     {}", url.scheme());
    println!("  host:       {}", url.host());
    println!("  path:       {}", url.path());
    println!("  dir:        {}", url.dir());
    println!("  base:       {}", url.base());
    println!("  base_query: {}", url.base_query());
    println!("  raw_query:  {}", url.raw_query());
    if let Some(fragment) = url.fragment() {
        println!("  fragment:   {}", fragment);
    }
    println!("  fingerprint: {:016x}", url.fingerprint());
}
