//! Command line surface.
//!
//! Parsing is a small hand-written matcher over the argument list; [`run`]
//! executes a parsed [`Command`] against a [`FeedingTracker`] and prints the
//! result to stdout.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::backup::ExportOutcome;
use crate::config::Config;
use crate::constants::{
    ERROR_MISSING_ARGUMENT, ERROR_UNKNOWN_COMMAND, LABEL_NO_FEEDINGS, LABEL_NO_HISTORY, LABEL_UNKNOWN,
    SUCCESS_EXPORTED, SUCCESS_FEEDING_RECORDED, SUCCESS_IMPORTED,
};
use crate::feeding::{Feeding, NewFeeding};
use crate::tracker::FeedingTracker;
use crate::utils::datetime;

pub const USAGE: &str = "\
Usage: feedlog <command> [options]

Commands:
  add [--left] [--right] [--probiotics] [--vigantol] [--espumisan]
                        Record a feeding now
  today                 List today's feedings
  day <YYYY-MM-DD>      List feedings of a given day
  last                  Show the last feeding and when the next one is due
  history               Show interval statistics of previous days
  delete <ID>           Delete a feeding
  export [DIR]          Write a backup file
  import <FILE>         Read a backup file
  config init [PATH]    Write a default configuration file
  help                  Show this help";

/// A parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(NewFeeding),
    Today,
    Day(NaiveDate),
    Last,
    History,
    Delete(i32),
    Export(Option<PathBuf>),
    Import(PathBuf),
    ConfigInit(Option<PathBuf>),
    Help,
}

impl Command {
    /// Parse the arguments following the program name
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|a| a.as_ref().to_string()).collect();
        let mut rest = args.iter().map(String::as_str);

        match rest.next() {
            None | Some("help" | "-h" | "--help") => Ok(Self::Help),
            Some("add") => parse_add(rest),
            Some("today") => Ok(Self::Today),
            Some("day") => {
                let value = required(rest.next(), "day <YYYY-MM-DD>")?;
                let date = datetime::parse_date(value).with_context(|| format!("Invalid date '{}'", value))?;
                Ok(Self::Day(date))
            }
            Some("last") => Ok(Self::Last),
            Some("history") => Ok(Self::History),
            Some("delete") => {
                let value = required(rest.next(), "delete <ID>")?;
                let id: i32 = value.parse().with_context(|| format!("Invalid feeding id '{}'", value))?;
                Ok(Self::Delete(id))
            }
            Some("export") => Ok(Self::Export(rest.next().map(PathBuf::from))),
            Some("import") => Ok(Self::Import(PathBuf::from(required(rest.next(), "import <FILE>")?))),
            Some("config") => match rest.next() {
                Some("init") => Ok(Self::ConfigInit(rest.next().map(PathBuf::from))),
                other => anyhow::bail!("{}: config {}", ERROR_UNKNOWN_COMMAND, other.unwrap_or("")),
            },
            Some(other) => anyhow::bail!("{}: {}", ERROR_UNKNOWN_COMMAND, other),
        }
    }
}

fn parse_add<'a>(flags: impl Iterator<Item = &'a str>) -> Result<Command> {
    let mut feeding = NewFeeding::default();
    for flag in flags {
        match flag {
            "--left" | "-l" => feeding.left = true,
            "--right" | "-r" => feeding.right = true,
            "--probiotics" => feeding.probiotics = true,
            "--vigantol" => feeding.vigantol = true,
            "--espumisan" => feeding.espumisan = true,
            other => anyhow::bail!("Unknown option for add: {}", other),
        }
    }
    Ok(Command::Add(feeding))
}

fn required<'a>(value: Option<&'a str>, usage: &str) -> Result<&'a str> {
    value.ok_or_else(|| anyhow::anyhow!("{}: {}", ERROR_MISSING_ARGUMENT, usage))
}

/// Execute a command
pub async fn run(command: Command, tracker: &FeedingTracker, config: &Config) -> Result<()> {
    let date_format = config.display.date_format.as_str();
    let time_format = config.display.time_format.as_str();

    match command {
        Command::Help => println!("{}", USAGE),
        Command::Add(new_feeding) => {
            let feeding = tracker.record(new_feeding).await?;
            println!("{}: {}", SUCCESS_FEEDING_RECORDED, feeding_line(&feeding, date_format, time_format));
        }
        Command::Today => print_feedings(&tracker.today().await?, date_format, time_format),
        Command::Day(date) => print_feedings(&tracker.on_date(date).await?, date_format, time_format),
        Command::Last => {
            let last = tracker.last_feeding().await?;
            if last.is_empty() {
                println!("{}", LABEL_NO_FEEDINGS);
                return Ok(());
            }
            println!(
                "Last feeding: {} {} ({})",
                last.date_label(date_format),
                last.time_label(time_format),
                last.breast()
            );
            let suffix = if last.is_next_feeding_tomorrow() { " tomorrow" } else { "" };
            println!("Next feeding: {}{}", last.next_feeding_label(time_format), suffix);
            let additions = last.feeding().additions.names();
            if !additions.is_empty() {
                println!("Given: {}", additions.join(", "));
            }
        }
        Command::History => {
            let history = tracker.history().await?;
            if history.is_empty() {
                println!("{}", LABEL_NO_HISTORY);
            }
            for day in history {
                println!(
                    "{}  feedings: {:>2}  average: {:>5}  longest: {:>5}",
                    datetime::format_date_with(day.date, date_format),
                    day.feeding_count,
                    datetime::format_duration(day.average_interval),
                    datetime::format_duration(day.max_interval)
                );
            }
        }
        Command::Delete(id) => {
            if tracker.delete(id).await? {
                println!("Deleted feeding {}", id);
            } else {
                println!("No feeding with id {}", id);
            }
        }
        Command::Export(dir) => {
            let dir = match dir {
                Some(dir) => dir,
                None => config.backup.resolve_directory()?,
            };
            match tracker.backup_manager().export(&dir).await? {
                ExportOutcome::Written { path, count } => {
                    println!("{} {} ({} feedings)", SUCCESS_EXPORTED, path.display(), count)
                }
                ExportOutcome::AlreadyExists { path } => {
                    println!("Backup {} already exists, nothing written", path.display())
                }
            }
        }
        Command::Import(path) => {
            let count = tracker.backup_manager().import(&path).await?;
            println!("{} {} ({} feedings)", SUCCESS_IMPORTED, path.display(), count);
        }
        Command::ConfigInit(path) => init_config(path)?,
    }

    Ok(())
}

/// Write a default configuration file, to the XDG location unless `path` is given
pub fn init_config(path: Option<PathBuf>) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => Config::get_default_config_path()?,
    };
    Config::generate_default_config(&path)
}

fn print_feedings(feedings: &[Feeding], date_format: &str, time_format: &str) {
    if feedings.is_empty() {
        println!("{}", LABEL_NO_FEEDINGS);
    }
    for feeding in feedings {
        println!("{}", feeding_line(feeding, date_format, time_format));
    }
}

fn feeding_line(feeding: &Feeding, date_format: &str, time_format: &str) -> String {
    let id = feeding
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| LABEL_UNKNOWN.to_string());
    let additions = feeding.additions.names();
    let mut line = format!(
        "#{:<4} {} {}  {:<5}",
        id,
        datetime::format_date_with(feeding.date, date_format),
        datetime::format_time_with(feeding.time, time_format),
        feeding.breast
    );
    if !additions.is_empty() {
        line.push_str("  + ");
        line.push_str(&additions.join(", "));
    }
    line
}
