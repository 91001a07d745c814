//! Rendering of the releases of a repository
//!
//! The layout lives in [`OUTPUT_TEMPLATE`]. It contains placeholders like
//! `{tag}` and color directives like `@y`, which are turned into terminal
//! escape codes when color is enabled and dropped otherwise.

use core::fmt;
use std::io::{self, Write};
use std::str::FromStr;
use std::sync::LazyLock;

use colored::Color;
use colored::control::ShouldColorize;

use crate::RelstatError;
use crate::github::{Asset, Release};
use crate::types::RepoCoordinate;

/// Whether the report should contain colors
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ColorMode {
    /// Always color
    Always,
    /// Color if the terminal supports it
    #[default]
    Auto,
    /// Never color
    Never,
}

impl ColorMode {
    /// All modes, in the order they are listed in help
    pub const ALL: [ColorMode; 3] = [ColorMode::Always, ColorMode::Auto, ColorMode::Never];

    /// Resolve `auto` by looking at stdout and `NO_COLOR`, `CLICOLOR`, `CLICOLOR_FORCE`
    pub fn enabled(self) -> bool {
        match self {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => ShouldColorize::from_env().should_colorize(),
        }
    }
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "always" => Ok(ColorMode::Always),
            "auto" => Ok(ColorMode::Auto),
            "never" => Ok(ColorMode::Never),
            _ => Err(s.to_owned()),
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorMode::Always => write!(f, "always"),
            ColorMode::Auto => write!(f, "auto"),
            ColorMode::Never => write!(f, "never"),
        }
    }
}

/// Inline styling of the template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Color(Color),
    Bold,
    /// Back to the default style, ends every colored span
    Reset,
}

impl Directive {
    /// Escape sequence which applies this directive
    fn ansi(self) -> String {
        match self {
            Directive::Color(color) => format!("\u{1b}[{}m", color.to_fg_str()),
            Directive::Bold => "\u{1b}[1m".to_owned(),
            Directive::Reset => "\u{1b}[0m".to_owned(),
        }
    }
}

/// Starts a directive. `@@` is a literal `@`
pub const DIRECTIVE_MARKER: char = '@';

/// What may follow [`DIRECTIVE_MARKER`]
pub const DIRECTIVES: &[(char, Directive)] = &[
    ('r', Directive::Color(Color::Red)),
    ('g', Directive::Color(Color::Green)),
    ('y', Directive::Color(Color::Yellow)),
    ('b', Directive::Color(Color::Blue)),
    ('m', Directive::Color(Color::Magenta)),
    ('c', Directive::Color(Color::Cyan)),
    ('!', Directive::Bold),
    ('|', Directive::Reset),
];

/// Data that a placeholder can stand for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Owner,
    Repo,
    Tag,
    ReleaseName,
    AssetName,
    DownloadCount,
}

/// Placeholders of the header line
const HEADER_FIELDS: &[(&str, Field)] = &[("owner", Field::Owner), ("repo", Field::Repo)];
/// Placeholders of the line printed for each release
const RELEASE_FIELDS: &[(&str, Field)] = &[("tag", Field::Tag), ("name", Field::ReleaseName)];
/// Placeholders of the line printed for each asset
const ASSET_FIELDS: &[(&str, Field)] = &[
    ("name", Field::AssetName),
    ("downloads", Field::DownloadCount),
];

/// Something whose data can fill in placeholders
trait Fields {
    fn field(&self, field: Field) -> Option<String>;
}

impl Fields for RepoCoordinate {
    fn field(&self, field: Field) -> Option<String> {
        match field {
            Field::Owner => Some(self.owner.to_string()),
            Field::Repo => Some(self.name.to_string()),
            Field::Tag | Field::ReleaseName | Field::AssetName | Field::DownloadCount => None,
        }
    }
}

impl Fields for Release {
    fn field(&self, field: Field) -> Option<String> {
        match field {
            Field::Tag => Some(self.tag.clone()),
            Field::ReleaseName => Some(self.display_name.clone()),
            Field::Owner | Field::Repo | Field::AssetName | Field::DownloadCount => None,
        }
    }
}

impl Fields for Asset {
    fn field(&self, field: Field) -> Option<String> {
        match field {
            Field::AssetName => Some(self.name.clone()),
            Field::DownloadCount => Some(self.download_count.to_string()),
            Field::Owner | Field::Repo | Field::Tag | Field::ReleaseName => None,
        }
    }
}

/// Unparsed template, one line per kind of item
#[derive(Debug, Clone, Copy)]
pub struct TemplateSource<'a> {
    /// Printed once, placeholders: `{owner}`, `{repo}`
    pub header: &'a str,
    /// Printed for each release, placeholders: `{tag}`, `{name}`
    pub release: &'a str,
    /// Printed for each asset of a release, placeholders: `{name}`, `{downloads}`
    pub asset: &'a str,
}

/// Layout of the report
pub const OUTPUT_TEMPLATE: TemplateSource<'static> = TemplateSource {
    header: "GitHub @y{owner}/{repo}@|",
    release: "@!{tag}:@| ({name})",
    asset: "\t@r{name}@|: {downloads}",
};

/// Problems with a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    UnknownDirective(char),
    /// The line ends right after [`DIRECTIVE_MARKER`]
    DanglingMarker,
    UnknownPlaceholder(String),
    UnterminatedPlaceholder,
    UnexpectedClosingBrace,
    /// A colored span is still open at the end of the line
    UnclosedSpan,
    /// Reset without a colored span before it
    UnmatchedReset,
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::UnknownDirective(ch) => {
                write!(f, "unknown directive {DIRECTIVE_MARKER}{ch}")
            },
            TemplateError::DanglingMarker => {
                write!(f, "{DIRECTIVE_MARKER} at the end of a line")
            },
            TemplateError::UnknownPlaceholder(name) => write!(f, "unknown placeholder {{{name}}}"),
            TemplateError::UnterminatedPlaceholder => write!(f, "placeholder is missing a }}"),
            TemplateError::UnexpectedClosingBrace => write!(f, "}} without a {{"),
            TemplateError::UnclosedSpan => write!(
                f,
                "colored span is not closed with {DIRECTIVE_MARKER}|"
            ),
            TemplateError::UnmatchedReset => {
                write!(f, "{DIRECTIVE_MARKER}| without a colored span")
            },
        }
    }
}

impl std::error::Error for TemplateError {}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Placeholder(Field),
    Style(Directive),
}

/// A parsed line of the template
#[derive(Debug, Clone, PartialEq, Eq)]
struct Line(Vec<Segment>);

impl Line {
    fn parse(source: &str, fields: &[(&str, Field)]) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut text = String::new();
        let mut span_open = false;
        let mut chars = source.chars();

        while let Some(ch) = chars.next() {
            match ch {
                DIRECTIVE_MARKER => {
                    let next = chars.next().ok_or(TemplateError::DanglingMarker)?;
                    if next == DIRECTIVE_MARKER {
                        text.push(DIRECTIVE_MARKER);
                        continue;
                    }

                    let directive = DIRECTIVES
                        .iter()
                        .find_map(|(name, directive)| (*name == next).then_some(*directive))
                        .ok_or(TemplateError::UnknownDirective(next))?;

                    match directive {
                        Directive::Reset if !span_open => {
                            return Err(TemplateError::UnmatchedReset);
                        },
                        Directive::Reset => span_open = false,
                        Directive::Color(_) | Directive::Bold => span_open = true,
                    }

                    if !text.is_empty() {
                        segments.push(Segment::Text(std::mem::take(&mut text)));
                    }
                    segments.push(Segment::Style(directive));
                },
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(ch) => name.push(ch),
                            None => return Err(TemplateError::UnterminatedPlaceholder),
                        }
                    }

                    let field = fields
                        .iter()
                        .find_map(|(field_name, field)| (*field_name == name).then_some(*field))
                        .ok_or(TemplateError::UnknownPlaceholder(name))?;

                    if !text.is_empty() {
                        segments.push(Segment::Text(std::mem::take(&mut text)));
                    }
                    segments.push(Segment::Placeholder(field));
                },
                '}' => return Err(TemplateError::UnexpectedClosingBrace),
                ch => text.push(ch),
            }
        }

        if span_open {
            return Err(TemplateError::UnclosedSpan);
        }

        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }

        Ok(Self(segments))
    }

    /// Write the line, terminated by a newline
    fn write(&self, item: &impl Fields, color: bool, out: &mut impl Write) -> io::Result<()> {
        for segment in &self.0 {
            match segment {
                Segment::Text(text) => out.write_all(text.as_bytes())?,
                Segment::Placeholder(field) => {
                    if let Some(value) = item.field(*field) {
                        out.write_all(value.as_bytes())?;
                    }
                },
                Segment::Style(directive) => {
                    if color {
                        out.write_all(directive.ansi().as_bytes())?;
                    }
                },
            }
        }
        out.write_all(b"\n")
    }
}

/// Parsed and validated template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    header: Line,
    release: Line,
    asset: Line,
}

impl Template {
    pub fn parse(source: &TemplateSource<'_>) -> Result<Self, TemplateError> {
        Ok(Self {
            header: Line::parse(source.header, HEADER_FIELDS)?,
            release: Line::parse(source.release, RELEASE_FIELDS)?,
            asset: Line::parse(source.asset, ASSET_FIELDS)?,
        })
    }

    /// Write `report` to `out`, with escape codes if `color` is true
    pub fn write(&self, report: &Report, color: bool, out: &mut impl Write) -> io::Result<()> {
        self.header.write(&report.coordinate, color, out)?;
        for release in &report.releases {
            self.release.write(release, color, out)?;
            for asset in &release.assets {
                self.asset.write(asset, color, out)?;
            }
        }
        out.flush()
    }
}

/// [`OUTPUT_TEMPLATE`], parsed. Forced when the program starts, so a broken
/// template never gets as far as fetching anything
pub static TEMPLATE: LazyLock<Template> = LazyLock::new(|| {
    Template::parse(&OUTPUT_TEMPLATE)
        .unwrap_or_else(|err| panic!("output template is malformed: {err}"))
});

/// Everything that gets rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// The repository
    pub coordinate: RepoCoordinate,
    /// Its releases, in the order GitHub returned them
    pub releases: Vec<Release>,
}

/// Render `report` into `out`
pub fn render(report: &Report, color: ColorMode, out: &mut impl Write) -> Result<(), RelstatError> {
    TEMPLATE
        .write(report, color.enabled(), out)
        .map_err(RelstatError::Output)
}
