//! Command-line host for `flavor_api`: selects an environment from flags,
//! the process environment or a `.env` file, wires logging from the
//! selected flavor, and prints either the resolved settings or a URL.
//! It never sends a request.

use std::{env, process};

use flavor_api::{EndpointBuilder, Environment, EnvironmentRegistry, EnvironmentSettings};
use log::{debug, LevelFilter};
use serde::Serialize;

const API_KEY_VAR: &str = "APP_API_KEY";

#[derive(Debug, Default, PartialEq)]
struct CliOptions {
    environment: Option<Environment>,
    env_file: Option<String>,
    api_key: Option<String>,
    resource_id: Option<i64>,
    query: Vec<(String, String)>,
    segments: Vec<String>,
    json: bool,
    verbose: bool,
}

#[derive(Debug, PartialEq)]
enum Command {
    Help,
    Version,
    Run(CliOptions),
}

#[derive(Serialize)]
struct SettingsReport<'a> {
    environment: Environment,
    #[serde(flatten)]
    settings: &'a EnvironmentSettings,
}

/// Parse everything after the program name.
fn parse_args(args: &[String]) -> Result<Command, String> {
    if args.iter().any(|a| a == "--help") {
        return Ok(Command::Help);
    }
    if args.iter().any(|a| a == "--version") {
        return Ok(Command::Version);
    }

    let mut opts = CliOptions::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--env" | "-e" => {
                let raw = next_value(args, &mut i, "--env requires an environment name.")?;
                let env = raw.parse::<Environment>().map_err(|e| e.to_string())?;
                opts.environment = Some(env);
            }
            "--env-file" | "-f" => {
                opts.env_file =
                    Some(next_value(args, &mut i, "--env-file requires a file name.")?.to_string());
            }
            "--api-key" | "-k" => {
                opts.api_key =
                    Some(next_value(args, &mut i, "--api-key requires a key.")?.to_string());
            }
            "--id" | "-i" => {
                let raw = next_value(args, &mut i, "--id requires a resource id.")?;
                let id = raw
                    .parse::<i64>()
                    .map_err(|_| format!("--id expects an integer, got '{raw}'."))?;
                opts.resource_id = Some(id);
            }
            "--query" | "-q" => {
                let raw = next_value(args, &mut i, "--query requires key=value.")?;
                let (k, v) = raw
                    .split_once('=')
                    .ok_or_else(|| format!("--query expects key=value, got '{raw}'."))?;
                opts.query.push((k.to_string(), v.to_string()));
            }
            "--json" => opts.json = true,
            "--verbose" | "-v" => opts.verbose = true,
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return Err(format!("Unknown option '{flag}'. See --help."));
            }
            segment => opts.segments.push(segment.to_string()),
        }
        i += 1;
    }
    Ok(Command::Run(opts))
}

fn next_value<'a>(args: &'a [String], i: &mut usize, missing: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i).map(String::as_str).ok_or_else(|| missing.to_string())
}

fn log_level(logging_enabled: bool, verbose: bool) -> LevelFilter {
    if verbose || logging_enabled {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

fn render_url(builder: &EndpointBuilder, opts: &CliOptions) -> flavor_api::Result<String> {
    let mut url = match opts.resource_id {
        Some(id) => builder.build_resource_path(&opts.segments, id)?,
        None => builder.build_path(&opts.segments)?,
    };
    if !opts.query.is_empty() {
        url = builder.with_query_params(&url, opts.query.iter().map(|(k, v)| (k, v)))?;
    }
    if builder.has_api_key() {
        url = builder.with_api_key(&url)?;
    }
    Ok(url)
}

fn render_settings(env: Environment, settings: &EnvironmentSettings, json: bool) -> String {
    if json {
        let report = SettingsReport {
            environment: env,
            settings,
        };
        return serde_json::to_string_pretty(&report).unwrap_or_default();
    }
    format!(
        "environment:     {env}\n\
         display name:    {}\n\
         base url:        {}\n\
         logging enabled: {}\n\
         debug mode:      {}",
        settings.display_name, settings.base_url, settings.logging_enabled, settings.debug_mode
    )
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("[ERROR] {message}");
    process::exit(1);
}

fn main() {
    let args = env::args().skip(1).collect::<Vec<String>>();

    let opts = match parse_args(&args) {
        Ok(Command::Help) => {
            print_help();
            process::exit(0);
        }
        Ok(Command::Version) => {
            println!("flavor {}", env!("CARGO_PKG_VERSION"));
            process::exit(0);
        }
        Ok(Command::Run(opts)) => opts,
        Err(e) => fail(e),
    };

    // An explicit env file must load; the default `.env` is optional.
    match &opts.env_file {
        Some(path) => {
            if let Err(e) = dotenvy::from_filename(path) {
                fail(format!("Failed to load .env file '{path}': {e}"));
            }
        }
        None => {
            dotenvy::dotenv().ok();
        }
    }

    let registry = match opts.environment {
        Some(env) => EnvironmentRegistry::with_environment(env),
        None => EnvironmentRegistry::from_env().unwrap_or_else(|e| fail(e)),
    };
    let active = registry.active().unwrap_or_else(|_| {
        fail("No environment selected. Pass --env or set APP_ENV (dev, staging, prod).")
    });

    let level = log_level(active.is_logging_enabled(), opts.verbose);
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.as_str()))
        .init();
    debug!(
        "running against {} ({})",
        active.display_name(),
        active.base_url()
    );

    let mut builder = EndpointBuilder::for_active(active);
    if let Some(key) = opts.api_key.clone().or_else(|| env::var(API_KEY_VAR).ok()) {
        builder = builder.with_key(key);
    }

    if opts.segments.is_empty() && opts.resource_id.is_none() && opts.query.is_empty() {
        println!(
            "{}",
            render_settings(active.environment(), active.settings(), opts.json)
        );
        return;
    }

    match render_url(&builder, &opts) {
        Ok(url) => println!("{url}"),
        Err(e) => fail(e),
    }
}

fn print_help() {
    println!(
        r#"Usage: flavor [OPTION]... [SEGMENT]...
Resolve the configuration of an environment flavor, or build an endpoint URL
against its base URL.

With no SEGMENT, --id or --query the selected environment's settings are printed.

Options:
  -e, --env [NAME]             Environment to select: dev, staging or prod.
                               Falls back to APP_ENV.
  -f, --env-file [FILE]        Load environment variables from a .env file.
  -k, --api-key [KEY]          Append api_key=KEY to the URL (falls back to APP_API_KEY).
  -i, --id [N]                 Append a resource id as the last path segment.
  -q, --query [KEY=VALUE]      Merge a query parameter (repeatable).
      --json                   Print settings as JSON.
  -v, --verbose                Force debug logging.
      --help                   Display this help and exit.
      --version                Output version information and exit.

Examples:
  flavor -e prod --json
  flavor -e dev movie popular -q page=2
  flavor -e staging -k MyKey movie -i 550
  flavor -f .env.staging search movie -q "query=sci-fi & fantasy"
"#
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use flavor_api::FlavorError;
    use pretty_assertions::assert_eq;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn run_opts(raw: &[&str]) -> CliOptions {
        match parse_args(&args(raw)).unwrap() {
            Command::Run(opts) => opts,
            other => panic!("expected Run, got {other:?}"),
        }
    }

    #[test]
    fn help_and_version_win() {
        assert_eq!(parse_args(&args(&["-e", "dev", "--help"])), Ok(Command::Help));
        assert_eq!(parse_args(&args(&["--version"])), Ok(Command::Version));
    }

    #[test]
    fn parses_full_invocation() {
        let opts = run_opts(&[
            "-e", "staging", "-k", "abc", "movie", "-i", "550", "-q", "language=en-US", "--json",
        ]);
        assert_eq!(
            opts,
            CliOptions {
                environment: Some(Environment::Staging),
                env_file: None,
                api_key: Some("abc".into()),
                resource_id: Some(550),
                query: vec![("language".into(), "en-US".into())],
                segments: vec!["movie".into()],
                json: true,
                verbose: false,
            }
        );
    }

    #[test]
    fn query_value_may_contain_equals() {
        let opts = run_opts(&["-q", "q=a=b"]);
        assert_eq!(opts.query, vec![("q".to_string(), "a=b".to_string())]);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_args(&args(&["--env"])).is_err());
        assert!(parse_args(&args(&["--env", "qa"])).is_err());
        assert!(parse_args(&args(&["--id", "abc"])).is_err());
        assert!(parse_args(&args(&["--query", "novalue"])).is_err());
        assert!(parse_args(&args(&["--bogus"])).is_err());
    }

    #[test]
    fn logging_follows_flavor() {
        assert_eq!(log_level(true, false), LevelFilter::Debug);
        assert_eq!(log_level(false, false), LevelFilter::Warn);
        assert_eq!(log_level(false, true), LevelFilter::Debug);
    }

    #[test]
    fn renders_url_with_query_and_key() {
        let builder = EndpointBuilder::for_active(
            EnvironmentRegistry::with_environment(Environment::Production)
                .active()
                .unwrap(),
        )
        .with_key("abc");
        let opts = run_opts(&["movie", "-i", "550", "-q", "language=en-US"]);
        assert_eq!(
            render_url(&builder, &opts).unwrap(),
            "https://api.example.com/api/movie/550?language=en-US&api_key=abc"
        );
    }

    #[test]
    fn negative_id_surfaces_library_error() {
        let builder = EndpointBuilder::for_active(
            EnvironmentRegistry::with_environment(Environment::Production)
                .active()
                .unwrap(),
        );
        let opts = run_opts(&["movie", "-i", "-1"]);
        assert!(matches!(
            render_url(&builder, &opts),
            Err(FlavorError::InvalidArgument(_))
        ));
    }

    #[test]
    fn settings_json_is_flat() {
        let env = Environment::Development;
        let json = render_settings(env, env.settings(), true);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["environment"], "development");
        assert_eq!(value["base_url"], "https://dev.api.example.com/api/");
        assert_eq!(value["debug_mode"], true);
    }
}
