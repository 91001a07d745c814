use std::env;
use std::io::{self, BufWriter};
use std::process::ExitCode;
use std::sync::LazyLock;

use log::LevelFilter;
use relstat::cli::Cli;
use relstat::cli::flags::HelpOrVersion;
use relstat::git::Git;
use relstat::github::GitHubApi;
use relstat::report::TEMPLATE;
use relstat::{RelstatError, commands};

fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            LevelFilter::Trace
        } else {
            LevelFilter::Warn
        })
        // RUST_LOG takes precedence over --verbose
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn main_impl() -> Result<String, RelstatError> {
    // a broken template is a bug, crash before doing anything else
    LazyLock::force(&TEMPLATE);

    let args = Cli::parse().map_err(RelstatError::CliParseError)?;

    init_logger(args.verbose);

    match args.help_or_version {
        HelpOrVersion::Help => return Ok(commands::help(args.color)),
        HelpOrVersion::Version => return Ok(format!("{}\n", env!("CARGO_PKG_VERSION"))),
        HelpOrVersion::None => {},
    }

    let current_dir = env::current_dir().map_err(RelstatError::CurrentDir)?;
    let client = GitHubApi::new()?;

    commands::releases(
        &current_dir,
        Git,
        &client,
        args.color,
        &mut BufWriter::new(io::stdout().lock()),
    )?;

    Ok(String::new())
}

fn main() -> ExitCode {
    match main_impl() {
        Ok(ok) => {
            print!("{ok}");
            ExitCode::SUCCESS
        },
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        },
    }
}
