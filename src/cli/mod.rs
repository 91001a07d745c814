//! Logic for parsing command line arguments
use core::{error, fmt};
use std::env;

use documented::Documented;
use flags::{CliFlag, Flag, HelpOrVersion, LocalFlag};

use crate::report::ColorMode;

pub mod flags;

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum CliParseError {
    UnknownFlag(String),
    UnknownArgument(String),
    DuplicateFlag(Flag),
    MutuallyExclusiveFlags,
    /// `--color` was the last argument
    MissingValue(LocalFlag),
    InvalidColorMode(String),
}

impl fmt::Display for CliParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliParseError::DuplicateFlag(flag) => write!(f, "Cannot use {flag} more than once"),
            CliParseError::MutuallyExclusiveFlags => write!(
                f,
                "Flags {} and {} are mutually exclusive, so they cannot be used together.",
                HelpOrVersion::Help,
                HelpOrVersion::Version
            ),
            CliParseError::UnknownArgument(arg) => write!(f, "Unknown argument: {arg}"),
            CliParseError::UnknownFlag(flag) => write!(f, "Unknown flag: {flag}"),
            CliParseError::MissingValue(flag) => write!(f, "{flag} must be followed by a value"),
            CliParseError::InvalidColorMode(mode) => write!(
                f,
                "Invalid value for {}: {mode}. Expected one of: {}",
                LocalFlag::Color,
                ColorMode::ALL.map(|mode| mode.to_string()).join(", ")
            ),
        }
    }
}

impl error::Error for CliParseError {}

/// Show the GitHub releases of the current git project and how often
/// their assets were downloaded
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Documented)]
pub struct Cli {
    /// Whether the report is colored
    pub color: ColorMode,
    /// Log everything that happens
    pub verbose: bool,
    pub help_or_version: HelpOrVersion,
}

impl Cli {
    pub const COLOR_FLAG: CliFlag<'static> = CliFlag {
        short: "-c",
        long: "--color",
        description: "Whether to use color: always, auto or never (default: auto)",
    };

    pub const HELP_FLAG: CliFlag<'static> = CliFlag {
        short: "-h",
        long: "--help",
        description: "Print this message",
    };

    pub const VERBOSE_FLAG: CliFlag<'static> = CliFlag {
        short: "-V",
        long: "--verbose",
        description: "Increased logging information",
    };

    pub const VERSION_FLAG: CliFlag<'static> = CliFlag {
        short: "-v",
        long: "--version",
        description: "Get relstat version",
    };

    /// Parse the command line arguments passed to relstat
    pub fn parse() -> Result<Self, CliParseError> {
        Self::__parse(env::args())
    }

    /// To allow this function to be used in tests
    pub fn __parse<Args: Iterator<Item = String>>(mut args: Args) -> Result<Self, CliParseError> {
        // skip the name used to invoke relstat, we don't care about that
        let _ = args.next();

        let mut cli = Cli::default();
        let mut color = None;

        while let Some(arg) = args.next() {
            if let Ok(flag) = arg.parse::<HelpOrVersion>() {
                cli.help_or_version.validate(flag)?;
            } else if Cli::VERBOSE_FLAG.is(&arg) {
                if cli.verbose {
                    return Err(CliParseError::DuplicateFlag(Flag::LocalFlag(
                        LocalFlag::Verbose,
                    )));
                }
                cli.verbose = true;
            } else if Cli::COLOR_FLAG.is(&arg) || Cli::COLOR_FLAG.extract_value_flag(&arg).is_some()
            {
                if color.is_some() {
                    return Err(CliParseError::DuplicateFlag(Flag::LocalFlag(
                        LocalFlag::Color,
                    )));
                }

                let value = match Cli::COLOR_FLAG.extract_value_flag(&arg) {
                    Some(value) => value.to_owned(),
                    None => args
                        .next()
                        .ok_or(CliParseError::MissingValue(LocalFlag::Color))?,
                };

                color = Some(
                    value
                        .parse::<ColorMode>()
                        .map_err(CliParseError::InvalidColorMode)?,
                );
            } else if flags::is_flag(&arg) {
                return Err(CliParseError::UnknownFlag(arg));
            } else {
                return Err(CliParseError::UnknownArgument(arg));
            }
        }

        cli.color = color.unwrap_or_default();

        Ok(cli)
    }

    /// Description of relstat, shown in help
    pub fn description() -> &'static str {
        Self::DOCS
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    /// Calls `relstat` with the given command line arguments
    #[track_caller]
    pub fn relstat(args: &[&str]) -> Result<Cli, CliParseError> {
        Cli::__parse(
            // when we actually invoke the CLI command, the name used to invoke the process is also
            // passed
            std::iter::once("relstat".to_owned()).chain(args.iter().map(ToString::to_string)),
        )
    }

    #[test]
    fn no_arguments() {
        assert_eq!(relstat(&[]), Ok(Cli::default()));
        assert_eq!(relstat(&[]).unwrap().color, ColorMode::Auto);
    }

    #[test]
    fn global_flags() {
        for (args, expected) in [
            (["--help"], HelpOrVersion::Help),
            (["-h"], HelpOrVersion::Help),
            (["--version"], HelpOrVersion::Version),
            (["-v"], HelpOrVersion::Version),
        ] {
            assert_eq!(
                relstat(&args),
                Ok(Cli {
                    help_or_version: expected,
                    ..Cli::default()
                })
            );
        }
    }

    #[test]
    fn color() {
        let cases = [
            (vec!["--color", "always"], ColorMode::Always),
            (vec!["--color=never"], ColorMode::Never),
            (vec!["-c", "auto"], ColorMode::Auto),
            (vec!["-c=always"], ColorMode::Always),
        ];

        for (args, expected) in cases {
            assert_eq!(
                relstat(&args),
                Ok(Cli {
                    color: expected,
                    ..Cli::default()
                }),
                "args: {args:?}"
            );
        }
    }

    #[test]
    fn verbose_and_color() {
        assert_eq!(
            relstat(&["-V", "--color=never", "--help"]),
            Ok(Cli {
                color: ColorMode::Never,
                verbose: true,
                help_or_version: HelpOrVersion::Help,
            })
        );
    }

    #[test]
    fn invalid_color() {
        assert_eq!(
            relstat(&["--color=rainbow"]),
            Err(CliParseError::InvalidColorMode("rainbow".to_owned()))
        );
        assert_eq!(
            relstat(&["--color"]),
            Err(CliParseError::MissingValue(LocalFlag::Color))
        );
        assert_eq!(
            CliParseError::InvalidColorMode("rainbow".to_owned()).to_string(),
            "Invalid value for --color: rainbow. Expected one of: always, auto, never"
        );
    }

    #[test]
    fn duplicate_flags() {
        assert_eq!(
            relstat(&["--color=never", "--color", "always"]),
            Err(CliParseError::DuplicateFlag(Flag::LocalFlag(
                LocalFlag::Color
            )))
        );
        assert_eq!(
            relstat(&["-V", "--verbose"]),
            Err(CliParseError::DuplicateFlag(Flag::LocalFlag(
                LocalFlag::Verbose
            )))
        );
        assert_eq!(
            relstat(&["-h", "--help"]),
            Err(CliParseError::DuplicateFlag(Flag::GlobalFlag(
                HelpOrVersion::Help
            )))
        );
    }

    #[test]
    fn mutually_exclusive_global_flags() {
        assert_eq!(
            relstat(&["--help", "--version"]),
            Err(CliParseError::MutuallyExclusiveFlags)
        );
        assert_eq!(
            relstat(&["-h", "-v"]),
            Err(CliParseError::MutuallyExclusiveFlags)
        );
    }

    #[test]
    fn unknown_arguments() {
        assert_eq!(
            relstat(&["--unknown-flag"]),
            Err(CliParseError::UnknownFlag("--unknown-flag".to_owned()))
        );
        assert_eq!(
            relstat(&["-u"]),
            Err(CliParseError::UnknownFlag("-u".to_owned()))
        );
        assert_eq!(
            relstat(&["releases"]),
            Err(CliParseError::UnknownArgument("releases".to_owned()))
        );
    }
}
