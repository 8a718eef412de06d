use std::time::Duration;

use clap::{error::ErrorKind, CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::loader::{self, CountrySource, Loader};
use crate::output::{self, OutputFormat, RenderOptions};
use crate::pipeline::{FilterSelector, Query, SortKey};
use crate::view::{Intent, ViewState};

fn print_banner() {
    println!();
    println!("   countryview v{}", env!("CARGO_PKG_VERSION"));
    println!("   ------------------");
    println!("   browse the countries dataset");
    println!();
}

#[derive(Clone, Debug)]
struct RunConfig {
    source: CountrySource,
    timeout: u64,
    proxy: Option<String>,
    query: Query,
    page: Option<usize>,
    interactive: bool,
    output: Option<String>,
    output_format: OutputFormat,
    render: RenderOptions,
    no_color: bool,
    verbose: u8,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = if args.color {
        false
    } else {
        args.no_color || cfg.no_color.unwrap_or(false)
    };

    let source = match args.input_file.or(cfg.input_file) {
        Some(path) if !path.trim().is_empty() => {
            CountrySource::FilePath(config::expand_tilde_string(path.trim()))
        }
        _ => CountrySource::Endpoint(
            args.endpoint
                .or(cfg.endpoint)
                .unwrap_or_else(|| loader::DEFAULT_ENDPOINT.to_string()),
        ),
    };
    if let CountrySource::Endpoint(url) = &source {
        reqwest::Url::parse(url).map_err(|e| format!("invalid endpoint '{url}': {e}"))?;
    }

    let timeout = args.timeout.or(cfg.timeout).unwrap_or(10);
    if timeout == 0 {
        return Err("invalid timeout, expected positive number of seconds".to_string());
    }
    let proxy = args
        .proxy
        .or(cfg.proxy)
        .filter(|p| !p.trim().is_empty());

    let filter_raw = args.filter.or(cfg.filter).unwrap_or_else(|| "all".to_string());
    let filter = filter_raw
        .parse::<FilterSelector>()
        .map_err(|e| format!("invalid filter: {e}"))?;
    let sort_raw = args.sort.or(cfg.sort).unwrap_or_else(|| "name_asc".to_string());
    let sort = sort_raw
        .parse::<SortKey>()
        .map_err(|e| format!("invalid sort: {e}"))?;
    let query = Query {
        search: args.search.or(cfg.search).unwrap_or_default(),
        filter,
        sort,
    };

    let output = args
        .output
        .or(cfg.output)
        .map(|p| config::expand_tilde_string(p.trim()))
        .filter(|p| !p.is_empty());
    let output_format = match args.output_format.or(cfg.output_format) {
        Some(raw) => OutputFormat::parse(&raw)
            .ok_or_else(|| format!("invalid output format '{raw}', expected text or json"))?,
        None => output
            .as_deref()
            .and_then(output::infer_format_from_path)
            .unwrap_or(OutputFormat::Text),
    };
    if args.interactive && output.is_some() {
        return Err("output file cannot be combined with interactive mode".to_string());
    }

    let render = RenderOptions {
        show_population: !args
            .hide_population
            .or(cfg.hide_population)
            .unwrap_or(false),
        show_flags: !args.hide_flags.or(cfg.hide_flags).unwrap_or(false),
    };

    Ok(RunConfig {
        source,
        timeout,
        proxy,
        query,
        page: args.page,
        interactive: args.interactive,
        output,
        output_format,
        render,
        no_color,
        verbose: args.verbose,
    })
}

fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("countryview={}", log_level(verbose))));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .with_line_number(verbose >= 3)
        .try_init();
    debug!("countryview started with verbosity level: {}", verbose);
}

async fn load_state(run: &RunConfig) -> ViewState {
    let state = ViewState::loading(run.query.clone());

    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message("Loading...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let loader = Loader::new(loader::Options {
        source: run.source.clone(),
        timeout_seconds: run.timeout,
        proxy: run.proxy.clone(),
    });
    let result = loader.load().await;
    pb.finish_and_clear();

    match result {
        Ok(countries) => state.apply(Intent::Loaded(countries)),
        Err(e) => {
            error!(error = %e, "failed to load countries");
            state.apply(Intent::LoadFailed(format!("Error fetching countries: {e}")))
        }
    }
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    if run.no_color || run.output.is_some() {
        colored::control::set_override(false);
    }
    if run.output.is_none() && run.output_format == OutputFormat::Text {
        print_banner();
    }
    debug!(
        interactive = run.interactive,
        source = ?run.source,
        "starting session"
    );

    let mut state = load_state(&run).await;
    if let Some(page) = run.page {
        state = state.apply(Intent::PageChanged(page));
    }

    if run.interactive {
        return crate::interactive::run(state, run.output_format, run.render).await;
    }

    let rendered = output::render(&state.snapshot(), run.output_format, run.render);
    match run.output.as_deref() {
        Some(path) => {
            let mut outfile = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)
                .await
                .map_err(|e| format!("failed to open output file: {e}"))?;
            outfile
                .write_all(&rendered)
                .await
                .map_err(|_| "failed to write output file".to_string())?;
            println!(":: Written   : {path}");
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout
                .write_all(&rendered)
                .await
                .map_err(|e| format!("failed to write to stdout: {e}"))?;
            stdout
                .flush()
                .await
                .map_err(|e| format!("failed to write to stdout: {e}"))?;
        }
    }

    match state.snapshot().error {
        Some(message) => Err(message.to_string()),
        None => Ok(()),
    }
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp => {
                let mut cmd = CliArgs::command();
                print!("{}", cmd.render_long_help());
                return Ok(());
            }
            ErrorKind::DisplayVersion => {
                let cmd = CliArgs::command();
                print!("{}", cmd.render_version());
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    let explicit_config = args.config.clone().map(|p| config::expand_tilde(&p));
    let config_path = explicit_config.clone().or_else(config::default_config_path);

    if args.init_config {
        let path = config_path.ok_or_else(|| "could not determine config path".to_string())?;
        config::ensure_default_config_file(&path)?;
        println!(":: Config    : {}", path.display());
        return Ok(());
    }

    let cfg = match config_path.as_ref() {
        Some(path) => config::load_config(path, explicit_config.is_none())?,
        None => ConfigFile::default(),
    };

    let run = build_run_config(args, cfg)?;
    init_logging(run.verbose);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))
}
