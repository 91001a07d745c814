use std::str::FromStr;

use colored::Colorize as _;

use super::{Cli, CliParseError, fmt};

pub struct CliFlag<'a> {
    pub short: &'a str,
    pub long: &'a str,
    pub description: &'a str,
}

impl CliFlag<'_> {
    pub fn is(&self, s: &str) -> bool {
        self.short == s || self.long == s
    }

    /// Extract the value part of a flag argument such as `--color=never`
    pub fn extract_value_flag<'a>(&self, arg: &'a str) -> Option<&'a str> {
        arg.strip_prefix(self.long)
            .or_else(|| arg.strip_prefix(self.short))
            .and_then(|rest| rest.strip_prefix('='))
    }
}

impl fmt::Display for CliFlag<'_> {
    /// Formats a flag into a colored format with a description, printable to
    /// the terminal
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}\n    {}",
            self.short.bright_magenta(),
            ", ".bright_black(),
            self.long.bright_magenta(),
            crate::commands::help::format_description(self.description)
        )
    }
}

/// Check if an argument is a flag
pub fn is_flag(arg: &str) -> bool {
    arg.starts_with('-')
}

/// Flags which change how relstat runs
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum LocalFlag {
    Verbose,
    Color,
}

impl fmt::Display for LocalFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocalFlag::Verbose => write!(f, "{}", Cli::VERBOSE_FLAG.long),
            LocalFlag::Color => write!(f, "{}", Cli::COLOR_FLAG.long),
        }
    }
}

#[derive(Default, Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum HelpOrVersion {
    Help,
    Version,
    #[default]
    None,
}

impl HelpOrVersion {
    /// Validate a global flag and make sure that it doesn't conflict with
    /// existing global flags
    pub fn validate(&mut self, new_flag: HelpOrVersion) -> Result<(), CliParseError> {
        match (&self, new_flag) {
            // No existing flag, take the new one
            (HelpOrVersion::None, flag) => {
                *self = flag;
                Ok(())
            },

            // Same flag already set
            (HelpOrVersion::Help, HelpOrVersion::Help) => Err(CliParseError::DuplicateFlag(
                Flag::GlobalFlag(HelpOrVersion::Help),
            )),
            (HelpOrVersion::Version, HelpOrVersion::Version) => Err(CliParseError::DuplicateFlag(
                Flag::GlobalFlag(HelpOrVersion::Version),
            )),

            // Conflicting flags
            (HelpOrVersion::Help, HelpOrVersion::Version)
            | (HelpOrVersion::Version, HelpOrVersion::Help) => {
                Err(CliParseError::MutuallyExclusiveFlags)
            },

            // `None` is never parsed from an argument
            (HelpOrVersion::Help | HelpOrVersion::Version, HelpOrVersion::None) => Ok(()),
        }
    }
}

impl FromStr for HelpOrVersion {
    type Err = ();

    fn from_str(arg: &str) -> Result<Self, Self::Err> {
        if Cli::HELP_FLAG.is(arg) {
            Ok(HelpOrVersion::Help)
        } else if Cli::VERSION_FLAG.is(arg) {
            Ok(HelpOrVersion::Version)
        } else {
            Err(())
        }
    }
}

impl fmt::Display for HelpOrVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HelpOrVersion::Help => write!(f, "{}", Cli::HELP_FLAG.long),
            HelpOrVersion::Version => write!(f, "{}", Cli::VERSION_FLAG.long),
            HelpOrVersion::None => write!(f, "<no flag>"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Flag {
    LocalFlag(LocalFlag),
    GlobalFlag(HelpOrVersion),
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Flag::LocalFlag(local_flag) => write!(f, "{local_flag}"),
            Flag::GlobalFlag(global_flag) => write!(f, "{global_flag}"),
        }
    }
}
