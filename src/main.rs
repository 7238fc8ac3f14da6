use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use formhtml::{
    ControlIds, FormCache, FormLocator, FormRenderer, FormSource, HttpFetcher, RenderConfig,
};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn cli() -> Command {
    Command::new("formhtml")
        .about("Convert a questionnaire export into an HTML form")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("source")
                .help("URL or file path of the questionnaire JSON (optionally zstd-compressed)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("indent")
                .long("indent")
                .help("Indentation of the outermost element, in spaces")
                .value_parser(value_parser!(usize))
                .default_value("0"),
        )
        .arg(
            Arg::new("indent-step")
                .long("indent-step")
                .help("Spaces added per nesting level")
                .value_parser(value_parser!(usize))
                .default_value("2"),
        )
        .arg(
            Arg::new("placeholder")
                .long("placeholder")
                .help("Label of the unselectable first option of drop-downs")
                .default_value(RenderConfig::DEFAULT_PLACEHOLDER_LABEL),
        )
        .arg(
            Arg::new("positional-ids")
                .long("positional-ids")
                .help("Derive control ids and names from question and choice positions")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Write the HTML to this file instead of stdout")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("no-cache")
                .long("no-cache")
                .help("Always fetch remote questionnaires, ignoring the local cache")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("cache-ttl")
                .long("cache-ttl")
                .value_name("SECONDS")
                .help("Refetch cached remote questionnaires older than this")
                .value_parser(value_parser!(u64))
                .default_value("300"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log debug output to stderr")
                .action(ArgAction::SetTrue),
        )
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn render_config(matches: &ArgMatches) -> RenderConfig {
    let control_ids = if matches.get_flag("positional-ids") {
        ControlIds::Positional
    } else {
        ControlIds::Placeholder
    };

    let mut config = RenderConfig::new().with_control_ids(control_ids);
    if let Some(step) = matches.get_one::<usize>("indent-step") {
        config = config.with_indent_increment(*step);
    }
    if let Some(label) = matches.get_one::<String>("placeholder") {
        config = config.with_placeholder_label(label.as_str());
    }
    config
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    let source = matches
        .get_one::<String>("source")
        .map(String::as_str)
        .unwrap_or_default();
    let locator = FormLocator::parse(source)?;
    let indent = matches.get_one::<usize>("indent").copied().unwrap_or(0);
    let config = render_config(&matches);

    let cache = if matches.get_flag("no-cache") {
        None
    } else {
        let ttl = matches
            .get_one::<u64>("cache-ttl")
            .map(|secs| Duration::from_secs(*secs))
            .unwrap_or(FormCache::DEFAULT_TTL);
        FormCache::default_location(ttl)
    };
    debug!(locator = %locator, cache = ?cache.as_ref().map(|c| c.dir()), "loading questionnaire");

    let form = FormSource::new(HttpFetcher::new(), cache).load(&locator)?;
    let html = FormRenderer::new(config).render(&form, indent);

    match matches.get_one::<PathBuf>("output") {
        Some(path) => fs::write(path, format!("{}\n", html))
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{}", html),
    }

    Ok(())
}
