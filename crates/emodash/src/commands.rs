//! Line commands.

use chrono::NaiveDate;
use emodash_api::{EmailId, Priority, TaskId};
use emodash_core::{ComposeField, Event, Tab, TaskFilter};

/// Help text printed by `help`.
pub const USAGE: &str = "\
mail:    tab <inbox|sent|draft|starred>  open <id>  star <id>  rm <id>  reply
compose: compose  to <addr>  subject <text>  body <text>  min  close  save  send
tasks:   filter <all|quick|high|medium|low>  add [!low|!medium|!high] [+quick] <text>
         done <id>  edit <id> <text>  prio <id>  quick <id> <on|off>  del <id>  up <id>  down <id>
mood:    detect  journal [YYYY-MM-DD]  log <emotion> [| note]  summary [YYYY-MM-DD]
         help  quit";

/// A parsed input line.
#[derive(Debug)]
pub enum Command {
    /// Forward to the dashboard.
    Dashboard(Event),
    /// Print usage.
    Help,
    /// Stop.
    Quit,
}

/// Why a line could not be parsed.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    /// Empty line.
    #[error("empty command")]
    Empty,
    /// Unrecognized verb.
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    /// Required argument absent.
    #[error("`{0}` needs {1}")]
    Missing(&'static str, &'static str),
    /// Argument present but invalid.
    #[error("invalid {0}: `{1}`")]
    Invalid(&'static str, String),
}

/// Parses one input line.
///
/// # Errors
///
/// Returns a `ParseError` describing the first problem found.
pub fn parse(line: &str) -> Result<Command, ParseError> {
    let line = line.trim();
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

    let event = match verb.to_lowercase().as_str() {
        "" => return Err(ParseError::Empty),
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" => return Ok(Command::Quit),

        "tab" => Event::SelectTab(
            Tab::parse(required(rest, "tab", "a tab name")?)
                .ok_or_else(|| ParseError::Invalid("tab", rest.to_string()))?,
        ),
        "open" => Event::OpenEmail(email_id(rest, "open")?),
        "star" => Event::ToggleStar(email_id(rest, "star")?),
        "rm" => Event::DeleteEmail(email_id(rest, "rm")?),
        "reply" => Event::ReplyToCurrent,

        "compose" => Event::ComposeNew,
        "to" => Event::ComposeEdit(ComposeField::To, rest.to_string()),
        "subject" => Event::ComposeEdit(ComposeField::Subject, rest.to_string()),
        "body" => Event::ComposeEdit(ComposeField::Body, rest.replace("\\n", "\n")),
        "min" => Event::ComposeMinimize,
        "close" => Event::ComposeClose,
        "save" => Event::SaveDraft,
        "send" => Event::Send,

        "filter" => Event::SetTaskFilter(
            TaskFilter::parse(required(rest, "filter", "a filter name")?)
                .ok_or_else(|| ParseError::Invalid("filter", rest.to_string()))?,
        ),
        "add" => parse_add(rest)?,
        "done" => Event::ToggleTaskDone(task_id(rest, "done")?),
        "edit" => {
            let (id, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            Event::EditTaskText(task_id(id, "edit")?, text.trim().to_string())
        }
        "prio" => Event::CyclePriority(task_id(rest, "prio")?),
        "quick" => {
            let (id, flag) = rest
                .split_once(char::is_whitespace)
                .ok_or(ParseError::Missing("quick", "an id and on|off"))?;
            let quick = match flag.trim() {
                "on" => true,
                "off" => false,
                other => return Err(ParseError::Invalid("quick flag", other.to_string())),
            };
            Event::SetTaskQuick(task_id(id, "quick")?, quick)
        }
        "del" => Event::DeleteTask(task_id(rest, "del")?),
        "up" => Event::MoveTask(task_id(rest, "up")?, -1),
        "down" => Event::MoveTask(task_id(rest, "down")?, 1),

        "detect" => Event::ToggleDetection,
        "journal" => Event::OpenJournal(date(rest)?),
        "log" => {
            let (emotion, note) = rest.split_once('|').unwrap_or((rest, ""));
            Event::LogMood {
                emotion: emotion.trim().to_string(),
                note: note.trim().to_string(),
                date: None,
            }
        }
        "summary" => Event::OpenSummary(date(rest)?),

        other => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(Command::Dashboard(event))
}

fn parse_add(rest: &str) -> Result<Event, ParseError> {
    let mut priority = Priority::default();
    let mut quick = false;
    let mut words = rest.split_whitespace().peekable();
    while let Some(word) = words.peek() {
        if let Some(name) = word.strip_prefix('!') {
            priority =
                Priority::parse(name).ok_or_else(|| ParseError::Invalid("priority", name.to_string()))?;
        } else if *word == "+quick" {
            quick = true;
        } else {
            break;
        }
        words.next();
    }
    Ok(Event::AddTask {
        text: words.collect::<Vec<_>>().join(" "),
        priority,
        quick,
    })
}

fn required<'a>(rest: &'a str, verb: &'static str, what: &'static str) -> Result<&'a str, ParseError> {
    if rest.is_empty() {
        Err(ParseError::Missing(verb, what))
    } else {
        Ok(rest)
    }
}

fn number(rest: &str, verb: &'static str) -> Result<i64, ParseError> {
    let rest = required(rest.trim(), verb, "an id")?;
    rest.trim_start_matches('#')
        .parse()
        .map_err(|_| ParseError::Invalid("id", rest.to_string()))
}

fn email_id(rest: &str, verb: &'static str) -> Result<EmailId, ParseError> {
    number(rest, verb).map(EmailId)
}

fn task_id(rest: &str, verb: &'static str) -> Result<TaskId, ParseError> {
    number(rest, verb).map(TaskId)
}

fn date(rest: &str) -> Result<Option<NaiveDate>, ParseError> {
    if rest.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(rest, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ParseError::Invalid("date", rest.to_string()))
}
