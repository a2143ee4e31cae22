//! Route Configuration Linter CLI
//!
//! Normalizes and validates route definitions against the routes already
//! configured on the proxy, and shows how each route will be displayed.
//!
//! Usage:
//!   route-lint <route_file> [--routes <config_or_routes_file>] [OPTIONS]

use anyhow::Context;
use clap::{Parser, ValueEnum};
use route_config::loader::{load_collection, load_routes};
use route_config::{
    get_origin, lint_route, LintedRoute, Resolver, ResolverConfig, RouteCollection,
    RouteOverview, ValidateOptions, DEFAULT_FAVICON_ENDPOINT, DEFAULT_FOLDER_ICON,
};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

// ANSI color codes
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Route Configuration Linter
#[derive(Parser, Debug)]
#[command(name = "route-lint")]
#[command(
    author,
    version,
    about = "Normalize and validate reverse-proxy route definitions"
)]
struct Args {
    /// File with one route or an array of routes (.json, .yaml, .yml)
    #[arg(required = true)]
    route_file: PathBuf,

    /// Existing routes: a routes array or a full proxy configuration file
    #[arg(short, long, env = "ROUTE_LINT_ROUTES")]
    routes: Option<PathBuf>,

    /// Name to skip in the uniqueness check (the route's name before editing)
    #[arg(short = 'x', long)]
    exclude_name: Option<String>,

    /// Stop at the first issue of each route
    #[arg(short, long)]
    abort_early: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// Favicon lookup endpoint used for route icons
    #[arg(long, env = "ROUTE_LINT_FAVICON_ENDPOINT", default_value = DEFAULT_FAVICON_ENDPOINT)]
    favicon_endpoint: String,

    /// Icon asset used for static routes
    #[arg(long, env = "ROUTE_LINT_FOLDER_ICON", default_value = DEFAULT_FOLDER_ICON)]
    folder_icon: String,

    /// Primary hostname; prints every hostname the proxy must serve
    #[arg(long)]
    primary_host: Option<String>,
}

#[derive(Serialize)]
struct RouteResult {
    #[serde(flatten)]
    linted: LintedRoute,
    origin: String,
    overview: RouteOverview,
}

#[derive(Serialize)]
struct Output {
    routes: Vec<RouteResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hostnames: Option<Vec<String>>,
    errors: usize,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(output) => {
            match args.output {
                OutputFormat::Json => print_results_json(&output),
                OutputFormat::Text => print_results(&output),
            }
            if output.errors > 0 {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("{RED}{BOLD}error:{RESET} {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(args: &Args) -> anyhow::Result<Output> {
    let raw_routes = load_routes(&args.route_file)
        .with_context(|| format!("loading routes from {}", args.route_file.display()))?;

    let existing = match &args.routes {
        Some(path) => load_collection(path)
            .with_context(|| format!("loading existing routes from {}", path.display()))?,
        None => RouteCollection::default(),
    };

    let options = ValidateOptions {
        exclude_name: args.exclude_name.clone(),
        abort_early: args.abort_early,
    };
    let resolver = Resolver::new(ResolverConfig {
        favicon_endpoint: args.favicon_endpoint.clone(),
        folder_icon: args.folder_icon.clone(),
    });

    tracing::debug!(
        routes = raw_routes.len(),
        existing = existing.len(),
        "linting routes"
    );

    let routes: Vec<RouteResult> = raw_routes
        .iter()
        .map(|raw| {
            let linted = lint_route(raw, &existing, &options);
            RouteResult {
                origin: get_origin(&linted.route),
                overview: resolver.describe(&linted.route),
                linted,
            }
        })
        .collect();

    let errors = routes.iter().map(|r| r.linted.report.issues.len()).sum();

    let hostnames = args.primary_host.as_deref().map(|primary| {
        let accepted: RouteCollection = existing
            .routes()
            .iter()
            .cloned()
            .chain(
                routes
                    .iter()
                    .filter(|r| r.linted.report.is_valid())
                    .map(|r| r.linted.route.clone()),
            )
            .collect();
        accepted.hostnames(primary)
    });

    Ok(Output {
        routes,
        hostnames,
        errors,
    })
}

fn print_results_json(output: &Output) {
    match serde_json::to_string_pretty(output) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("{RED}Error serializing results: {e}{RESET}"),
    }
}

fn print_results(output: &Output) {
    println!("{BOLD}{CYAN}Route Linter{RESET}");
    println!("{DIM}━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━{RESET}");

    for result in &output.routes {
        let route = &result.linted.route;
        let report = &result.linted.report;
        let name = if route.name.is_empty() {
            "<unnamed>"
        } else {
            route.name.as_str()
        };

        let status = if report.is_valid() {
            format!("{GREEN}PASS{RESET}")
        } else {
            format!("{RED}FAIL{RESET}")
        };
        println!("{status} {BOLD}{CYAN}{name}{RESET} {DIM}({}){RESET}", report.summary());

        let overview = &result.overview;
        if let Some(mode) = &overview.mode {
            println!("  {DIM}Mode:{RESET}    {mode}");
        }
        println!("  {DIM}Target:{RESET}  {}", overview.target);
        println!("  {DIM}URL:{RESET}     {}", overview.url);
        println!("  {DIM}Icon:{RESET}    {}", overview.icon);
        if overview.smart_shield {
            println!("  {DIM}Shield:{RESET}  enabled");
        }

        for issue in &report.issues {
            println!(
                "  {RED}|{RESET} {DIM}[{RESET}{CYAN}{}{RESET}{DIM}]{RESET} {BOLD}{RED}error{RESET}: {} {DIM}({RED}{}{DIM}){RESET}",
                issue.field.label(),
                issue.message,
                issue.code
            );
            if let Some(suggestion) = &issue.suggestion {
                println!("  {RED}|{RESET}   {GREEN}-> {suggestion}{RESET}");
            }
        }
        println!();
    }

    if let Some(hostnames) = &output.hostnames {
        println!("{BOLD}{CYAN}Hostnames{RESET}");
        for host in hostnames {
            println!("  {host}");
        }
        println!();
    }

    println!("{DIM}━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━{RESET}");
    println!(
        "  {DIM}Routes checked:{RESET} {BOLD}{}{RESET}",
        output.routes.len()
    );
    if output.errors > 0 {
        println!("  {RED}Errors:{RESET}         {BOLD}{RED}{}{RESET}", output.errors);
        println!("\n{RED}{BOLD}Linting failed with errors{RESET}");
    } else {
        println!("  {GREEN}Errors:{RESET}         {BOLD}{GREEN}0{RESET}");
        println!("\n{GREEN}{BOLD}All checks passed!{RESET}");
    }
}
