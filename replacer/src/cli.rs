use clap::Parser;
use log::{LevelFilter, info};
use std::{io::Write, path::PathBuf, str::FromStr};

use replacer_core::{
    FileStore, SearchMode, Substitution, config::Config, logging::DEFAULT_LOG_LEVEL,
};

pub const BIN_NAME: &str = "replacer";

const AFTER_HELP: &str = r#"Examples:
  replacer the-book-of-sand.txt the any sand-the-any.txt
  replacer the-library-of-babel.txt f g library-f-g.txt

PATTERN is a regular expression: `.` matches any character, so escape metacharacters
(`\.`, `\*`, `\(`) or pass --fixed-strings to match them literally.

The single-dash forms `-help` and `-list` are also accepted in any position. PATTERN and
REPLACEMENT may start with `-`; put other options before SOURCE or after TARGET."#;

#[derive(Parser, Debug)]
#[command(about = "Find and replace text in a directory of files.")]
#[command(version, after_help = AFTER_HELP)]
pub struct Args {
    /// The file you want to read from
    #[arg(index = 1)]
    pub source: Option<String>,

    /// The text to replace, interpreted as a regular expression
    #[arg(index = 2, allow_hyphen_values = true)]
    pub pattern: Option<String>,

    /// The text to replace it with
    #[arg(index = 3, allow_hyphen_values = true)]
    pub replacement: Option<String>,

    /// The file you want to write to
    #[arg(index = 4)]
    pub target: Option<String>,

    /// Print a numbered list of the files in the directory, then exit
    #[arg(short, long)]
    pub list: bool,

    /// Directory holding the files (default: `files.directory` from the config file, or ./files)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Match the pattern as a plain string, rather than a regex
    #[arg(short, long, action = clap::ArgAction::SetTrue)]
    pub fixed_strings: bool,

    /// Use advanced regex features (including negative look-ahead), at the cost of performance
    #[arg(short, long, action = clap::ArgAction::SetTrue)]
    pub advanced_regex: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        long,
        value_parser = parse_log_level,
        default_value = DEFAULT_LOG_LEVEL
    )]
    pub log_level: LevelFilter,

    /// Override the config directory (default: ~/.config/replacer on Linux, %AppData%\replacer on Windows)
    #[arg(long)]
    pub config_dir: Option<PathBuf>,
}

fn parse_log_level(s: &str) -> Result<LevelFilter, String> {
    LevelFilter::from_str(s).map_err(|_| format!("Invalid log level: {s}"))
}

/// Rewrite the single-dash `-help` and `-list` flags into the forms clap understands, moving
/// them ahead of the positionals. A long flag directly after PATTERN or REPLACEMENT would
/// otherwise be taken as their value, since those accept text starting with `-`.
pub fn normalize_legacy_flags<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let program = args.next();
    let (flags, rest): (Vec<_>, Vec<_>) = args
        .map(|arg| match arg.as_str() {
            "-help" | "--help" => "--help".to_owned(),
            "-list" | "--list" => "--list".to_owned(),
            _ => arg,
        })
        .partition(|arg| arg == "--help" || arg == "--list");

    program.into_iter().chain(flags).chain(rest).collect()
}

#[derive(Debug, PartialEq, Eq)]
pub struct ReplaceArgs<'a> {
    pub source: &'a str,
    pub pattern: &'a str,
    pub replacement: &'a str,
    pub target: &'a str,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Command<'a> {
    List,
    Replace(ReplaceArgs<'a>),
    MissingArgument(&'static str),
}

impl Args {
    pub fn command(&self) -> Command<'_> {
        if self.list {
            return Command::List;
        }

        let Some(source) = self.source.as_deref() else {
            return Command::MissingArgument("a filename is required");
        };
        let (Some(pattern), Some(replacement)) =
            (self.pattern.as_deref(), self.replacement.as_deref())
        else {
            return Command::MissingArgument("an old string and a new string are required");
        };
        let Some(target) = self.target.as_deref() else {
            return Command::MissingArgument("a new filename is required");
        };

        Command::Replace(ReplaceArgs {
            source,
            pattern,
            replacement,
            target,
        })
    }

    pub fn search_mode(&self) -> SearchMode {
        SearchMode::from_flags(self.fixed_strings, self.advanced_regex)
    }

    pub fn base_dir(&self, config: &Config) -> PathBuf {
        self.dir
            .clone()
            .unwrap_or_else(|| config.files.directory.clone())
    }
}

pub async fn run<W: Write>(args: &Args, config: &Config, out: &mut W) -> anyhow::Result<()> {
    let store = FileStore::new(args.base_dir(config));

    match args.command() {
        Command::List => {
            let names = store.list().await?;
            for (index, name) in names.iter().enumerate() {
                writeln!(out, "{} {name}", index + 1)?;
            }
        }
        Command::MissingArgument(message) => {
            info!("Missing argument: {message}");
            writeln!(out, "{message}\nSee \"{BIN_NAME} -help\"")?;
        }
        Command::Replace(replace_args) => {
            let substitution = Substitution::new(
                replace_args.pattern,
                replace_args.replacement,
                args.search_mode(),
            )?;

            let mut write_result = Ok(());
            let summary = store
                .replace_into_with(
                    replace_args.source,
                    &substitution,
                    replace_args.target,
                    |step| {
                        if write_result.is_ok() {
                            write_result = writeln!(out, "{step}");
                        }
                    },
                )
                .await?;
            write_result?;

            info!(
                "Replaced {} matches from {} into {}",
                summary.num_replacements, summary.source, summary.target
            );
            writeln!(
                out,
                "Success: {num} replacement{suffix} written to {target}",
                num = summary.num_replacements,
                suffix = if summary.num_replacements == 1 { "" } else { "s" },
                target = summary.target,
            )?;
        }
    }

    Ok(())
}
