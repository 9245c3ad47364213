use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use owo_colors::OwoColorize;
use qute_reader_core::env::{VAR_CONFIG_DIR, VAR_DATA_DIR, VAR_FIFO, VAR_HTML, VAR_MODE, VAR_URL, VAR_USER_AGENT};
use qute_reader_core::{
    Environment, ExtractConfig, FifoHost, Host, HostCommand, Options, Source, StdoutHost, acquire,
    extract_article, run_and_report,
};
use tracing_subscriber::EnvFilter;
use url::Url;

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Open the readable part of a page in a new qutebrowser tab
///
/// Meant to be run as a qutebrowser userscript, e.g.
/// `:spawn --userscript qute-reader` or `:hint links userscript qute-reader`.
/// Every QUTE_* variable can also be passed as a flag.
#[derive(Parser, Debug)]
#[command(name = "qute-reader")]
#[command(version)]
#[command(about = "Open the readable part of a page in a new qutebrowser tab")]
struct Args {
    /// URL to fetch, local HTML file, or "-" for stdin (overrides QUTE_MODE)
    #[arg(value_name = "INPUT")]
    input: Option<String>,

    /// Page URL
    #[arg(long, env = "QUTE_URL", value_name = "URL")]
    url: Option<String>,

    /// Invocation mode (hints, command)
    #[arg(long, env = "QUTE_MODE", value_name = "MODE")]
    mode: Option<String>,

    /// Dumped page HTML (command mode)
    #[arg(long, env = "QUTE_HTML", value_name = "FILE")]
    html: Option<PathBuf>,

    /// qutebrowser data directory
    #[arg(long, env = "QUTE_DATA_DIR", value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// qutebrowser config directory
    #[arg(long, env = "QUTE_CONFIG_DIR", value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Command FIFO (default: print commands to stdout)
    #[arg(long, env = "QUTE_FIFO", value_name = "FIFO")]
    fifo: Option<PathBuf>,

    /// User-Agent for HTTP requests
    #[arg(long, env = "QUTE_USER_AGENT", value_name = "UA")]
    user_agent: Option<String>,

    /// Output file (default: <data-dir>/userscripts/readability.html)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Write the document without opening it
    #[arg(long)]
    no_open: bool,

    /// Print the extracted article as JSON instead of rendering it
    #[arg(long)]
    json: bool,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Minimum character threshold for content candidates
    #[arg(long, default_value = "500", value_name = "NUM")]
    char_threshold: usize,

    /// Maximum number of elements to parse (0 = unlimited)
    #[arg(long, default_value = "0", value_name = "NUM")]
    max_elements: usize,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

impl Args {
    /// Source named by the positional input, if any.
    fn input_source(&self) -> anyhow::Result<Option<Source>> {
        let Some(input) = self.input.as_deref() else {
            return Ok(None);
        };

        let source = if input == "-" {
            Source::Stdin
        } else if input.starts_with("http://") || input.starts_with("https://") {
            Source::Url(Url::parse(input).with_context(|| format!("Invalid URL: {}", input))?)
        } else {
            let path = Path::new(input);
            let path = path
                .canonicalize()
                .with_context(|| format!("Failed to read file: {}", path.display()))?;
            Source::File(path)
        };

        Ok(Some(source))
    }

    /// Resolves the environment, letting an explicit input stand in for the
    /// variables qutebrowser would have set.
    fn environment(&self, source: Option<&Source>) -> qute_reader_core::Result<Environment> {
        let implied_url = source.map(|source| match source {
            Source::Url(url) => url.to_string(),
            Source::File(path) => {
                Url::from_file_path(path).map_or_else(|_| "about:blank".to_string(), |url| url.to_string())
            }
            Source::Stdin => "about:blank".to_string(),
        });

        let lookup = |name: &str| -> Option<String> {
            match name {
                VAR_MODE if source.is_some() => Some("hints".to_string()),
                VAR_MODE => self.mode.clone(),
                VAR_URL => self.url.clone().or_else(|| implied_url.clone()),
                VAR_HTML => self.html.as_ref().map(|p| p.display().to_string()),
                VAR_DATA_DIR => self.data_dir.as_ref().map(|p| p.display().to_string()),
                VAR_CONFIG_DIR => self.config_dir.as_ref().map(|p| p.display().to_string()),
                VAR_FIFO => self.fifo.as_ref().map(|p| p.display().to_string()),
                VAR_USER_AGENT => self.user_agent.clone(),
                _ => None,
            }
        };

        Environment::from_lookup(lookup)
    }

    fn options(&self, env: &Environment, source: Option<Source>) -> Options {
        let mut options = Options::for_environment(env);
        options.fetch.timeout = self.timeout;
        options.extract = ExtractConfig {
            char_threshold: self.char_threshold,
            max_elements: self.max_elements,
            ..Default::default()
        };
        options.source = source;
        options.output = self.output.clone();
        options.open = !self.no_open;
        options
    }

    fn host(&self) -> Box<dyn Host> {
        match &self.fifo {
            Some(fifo) => Box::new(FifoHost::new(fifo)),
            None => Box::new(StdoutHost),
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "qute_reader_core=debug,qute_reader=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Extract only and print the article as JSON.
async fn print_json(env: &Environment, options: &Options) -> anyhow::Result<()> {
    let source = options.source.clone().unwrap_or_else(|| env.source());
    let html = acquire(&source, &options.fetch).await.context("Failed to read page")?;
    let article = extract_article(&html, env.base_url(), &options.extract).context("Failed to extract content")?;

    println!("{}", serde_json::to_string_pretty(&article)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(shell) = args.completions {
        clap_complete::generate(shell, &mut Args::command(), "qute-reader", &mut io::stdout());
        return Ok(());
    }

    init_logging(args.verbose);
    let started = Instant::now();

    if args.verbose {
        echo::print_banner();
        echo::print_info("Debug logging enabled");
        eprintln!();
        echo::print_step(1, 2, "Resolving environment");
    }

    let host = args.host();
    let source = args.input_source()?;

    let env = match args.environment(source.as_ref()) {
        Ok(env) => env,
        Err(e) => {
            if !args.json
                && let Err(report_err) = host.send(&HostCommand::MessageError(e.to_string()))
            {
                tracing::warn!(error = %report_err, "could not report failure to browser");
            }
            echo::print_error(&e.to_string());
            return Err(e).context("Failed to resolve userscript environment");
        }
    };

    let options = args.options(&env, source);

    if args.verbose {
        echo::print_detail("Mode", &env.mode.to_string());
        echo::print_detail("URL", env.url.as_str());
        echo::print_detail(
            "Output",
            &options.output.clone().unwrap_or_else(|| env.output_path()).display().to_string(),
        );
        if env.fifo.is_none() && !args.json {
            echo::print_warning("QUTE_FIFO not set, printing browser commands to stdout");
        }
        eprintln!();
    }

    if args.json {
        return print_json(&env, &options).await;
    }

    if args.verbose {
        echo::print_step(2, 2, &format!("Rendering reader view of {}", env.url.as_str().underline()));
    }

    let path = run_and_report(&env, &options, host.as_ref())
        .await
        .inspect_err(|e| echo::print_error(&e.to_string()))
        .context("Failed to render reader view")?;

    if args.verbose {
        if let Ok(meta) = std::fs::metadata(&path) {
            echo::print_detail("Size", &echo::format_size(meta.len()));
        }
        echo::print_timing("Total", started.elapsed());
        echo::print_success(&format!("Reader view written to {}", path.display().bright_white()));
    }

    Ok(())
}
