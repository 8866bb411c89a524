use crate::{
    error::RouterError,
    logging::{init_logging, LogConfig},
    request::{QueryArgs, Request},
    route::RouteDefinition,
    router::Router,
    runtime_config::RouterConfig,
};
use anyhow::Context;
use clap::{Parser, Subcommand};
use http::Method;
use std::path::PathBuf;
use tracing::warn;

/// Command-line interface for the bidirectional router
///
/// Builds the demo routing table (one bucket of literal links per
/// subdomain plus a catch-all `/{word:\w}.html` route) and runs a single
/// match or link generation against it.
#[derive(Parser, Debug)]
#[command(name = "bidirouter")]
#[command(about = "Bidirectional route matching and URL generation", long_about = None)]
pub struct Cli {
    /// Router configuration file (YAML); environment variables are used when omitted
    #[arg(short, long, env = "BIDIROUTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Number of subdomain buckets in the demo table
    #[arg(long, default_value_t = 100)]
    pub subdomains: usize,

    /// Number of literal links registered per subdomain
    #[arg(long, default_value_t = 100)]
    pub links: usize,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Match a request and print the resolved handler and arguments
    Match {
        /// Request host
        #[arg(long, default_value = "localhost")]
        domain: String,

        /// Request path
        #[arg(long)]
        url: String,

        #[arg(long, default_value = "GET")]
        method: String,

        #[arg(long, default_value = "http")]
        scheme: String,

        /// Pre-resolved handler identifier; skips pattern matching
        #[arg(long)]
        handler: Option<String>,
    },
    /// Build a URL for a handler identifier
    Make {
        /// Handler identifier, `[lang:]controller:action`
        identifier: String,

        /// Link argument as `name=value` (repeatable)
        #[arg(short, long = "arg", value_parser = parse_key_val)]
        args: Vec<(String, String)>,

        /// Generate the query-string form
        #[arg(long, default_value_t = false)]
        normal: bool,

        /// Generate an absolute URL
        #[arg(long, default_value_t = false)]
        absolute: bool,

        /// Base URL used for absolute links
        #[arg(long, default_value = "http://localhost/")]
        base_url: String,
    },
    /// Print the routing table in match priority order
    Routes,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("invalid argument '{s}', expected name=value"))
}

/// Build the demo routing table.
///
/// # Errors
///
/// Propagates pattern compilation failures.
pub fn demo_router(
    config: RouterConfig,
    subdomains: usize,
    links: usize,
) -> Result<Router, RouterError> {
    let mut router = Router::with_config(config);
    for i in 0..subdomains {
        for j in 0..links {
            router.register(RouteDefinition::new(
                Some(&format!("subdomain{i}")),
                &format!("/link{j}/"),
                &format!("pl:app:front:MainController:action{j}"),
            )?);
        }
    }
    router.register(RouteDefinition::new(
        None,
        r"/{word:\w}.html",
        "pl:app:front:MainController:test",
    )?);
    Ok(router)
}

/// Parse arguments, initialise logging and run the selected command
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&LogConfig::from_env())?;
    run(&cli)
}

/// Run a parsed command
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => RouterConfig::from_yaml_file(path)?,
        None => RouterConfig::from_env(),
    };
    let mut router = demo_router(config, cli.subdomains, cli.links)?;

    match &cli.command {
        Commands::Match {
            domain,
            url,
            method,
            scheme,
            handler,
        } => {
            let method = Method::from_bytes(method.as_bytes())
                .with_context(|| format!("invalid HTTP method '{method}'"))?;
            let mut request = Request::new(domain.as_str(), url.as_str())
                .with_method(method)
                .with_scheme(scheme.as_str());
            request.handler_id = handler.clone();

            router.match_request(&mut request)?;
            print_request(&request);
        }
        Commands::Make {
            identifier,
            args,
            normal,
            absolute,
            base_url,
        } => {
            // Seed the link context the way a dispatched request would
            let mut request = Request::new("localhost", "/")
                .with_base_url(base_url.as_str())
                .with_handler_id(identifier.as_str());
            if let Err(err) = router.match_request(&mut request) {
                warn!(error = %err, "Link context not seeded");
            }

            let args: QueryArgs = args.iter().cloned().collect();
            println!("{}", router.make(Some(identifier.as_str()), &args, *normal, *absolute));
        }
        Commands::Routes => router.dump_routes(),
    }
    Ok(())
}

fn print_request(request: &Request) {
    println!("handler:    {}", request.handler_id.as_deref().unwrap_or("-"));
    println!("lang:       {}", request.resolved_lang.as_deref().unwrap_or("-"));
    println!("controller: {}", request.resolved_controller.as_deref().unwrap_or("-"));
    println!("action:     {}", request.resolved_action.as_deref().unwrap_or("-"));
    println!("cacheable:  {}", request.cacheable);
    println!("self:       {}", request.self_url.as_deref().unwrap_or("-"));
    for (name, value) in &request.query_args {
        println!("arg:        {name}={value}");
    }
}
