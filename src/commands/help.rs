use colored::Colorize as _;
use colored::control;

use crate::APP_NAME;
use crate::cli::Cli;
use crate::report::ColorMode;

pub fn format_description(description: &str) -> String {
    format!("{} {description}", "»".bright_black())
}

/// Help page, colored according to `color`
pub fn help(color: ColorMode) -> String {
    match color {
        ColorMode::Always => control::set_override(true),
        ColorMode::Never => control::set_override(false),
        ColorMode::Auto => {},
    }

    let app_name = APP_NAME.bright_blue();
    let flags_label = "[<flags>]".bright_magenta();
    let version = env!("CARGO_PKG_VERSION");
    let description = format_description(Cli::description());

    let example_1 = format!(
        "{}
    {}",
        "--color=never".bright_magenta(),
        format_description("Plain output, e.g. to pipe it into another program")
    );

    let example_2 = format!(
        "{}
    {}",
        "--verbose".bright_magenta(),
        format_description("Show which git commands and requests are made")
    );

    format!(
        "
  {app_name} {version}

  Usage:

    {app_name} {flags_label}
    {description}

  Examples:

    {app_name} {example_1}

    {app_name} {example_2}

  Flags:

    {}

    {}

    {}

    {}

",
        Cli::COLOR_FLAG,
        Cli::VERBOSE_FLAG,
        Cli::HELP_FLAG,
        Cli::VERSION_FLAG,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_flag() {
        let help = help(ColorMode::Never);

        for flag in [
            Cli::COLOR_FLAG,
            Cli::VERBOSE_FLAG,
            Cli::HELP_FLAG,
            Cli::VERSION_FLAG,
        ] {
            assert!(help.contains(flag.long), "help does not mention {}", flag.long);
            assert!(
                help.contains(flag.description),
                "help does not describe {}",
                flag.long
            );
        }
    }

    #[test]
    fn color_mode_is_respected() {
        assert!(
            !help(ColorMode::Never).contains('\u{1b}'),
            "--color=never must not color help"
        );
        assert!(
            help(ColorMode::Always).contains('\u{1b}'),
            "--color=always must color help"
        );
        control::unset_override();
    }
}
