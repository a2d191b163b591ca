//! Interactive session on the automation table.
//!
//! Reads one command per line, drives the [`AutomationPanel`] and prints the
//! outcome plus any notices pushed meanwhile.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::broadcast::error::TryRecvError;

use autopanel_app::ports::{AutomationGateway, EditForm};
use autopanel_app::services::automation_panel::{ActionOutcome, AutomationPanel};
use autopanel_domain::automation::AutomationChanges;
use autopanel_domain::id::AutomationId;

use crate::render;

const PROMPT: &str = "autopanel> ";

const HELP: &str = "\
commands:
  list                      show the automation table
  edit <id>                 open the edit form on an automation
  show                      show the open edit form
  set name <value>          change the draft name
  set description <value>   change the draft description
  set status <value>        change the draft status
  save                      submit the draft
  cancel                    close the edit form without saving
  delete <id>               delete an automation
  help                      show this message
  quit                      leave the session";

/// Editable field targeted by `set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Description,
    Status,
}

impl Field {
    fn apply(self, draft: &mut AutomationChanges, value: String) {
        match self {
            Self::Name => draft.name = value,
            Self::Description => draft.description = value,
            Self::Status => draft.status = value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Show,
    Edit(String),
    Set(Field, String),
    Save,
    Cancel,
    Delete(String),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unterminated quote")]
    UnterminatedQuote,
    #[error("unknown command {0:?}, type `help` for the list")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

/// Split a line into words, honouring single and double quotes.
///
/// A backslash escapes the next character outside single quotes.
pub fn tokenize(line: &str) -> Result<Vec<String>, ParseError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some('\''), c) => current.push(c),
            (_, '\\') => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
                in_word = true;
            }
            (Some(_), c) => current.push(c),
            (None, '\'' | '"') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err(ParseError::UnterminatedQuote);
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<ShellCommand>, ParseError> {
    let words = tokenize(line)?;
    let Some((head, rest)) = words.split_first() else {
        return Ok(None);
    };
    let command = match (head.as_str(), rest) {
        ("list" | "ls", []) => ShellCommand::List,
        ("show", []) => ShellCommand::Show,
        ("edit", [id]) => ShellCommand::Edit(id.clone()),
        ("edit", _) => return Err(ParseError::Usage("edit <id>")),
        ("set", [field, value @ ..]) if !value.is_empty() => {
            let field = match field.as_str() {
                "name" => Field::Name,
                "description" => Field::Description,
                "status" => Field::Status,
                _ => return Err(ParseError::Usage("set name|description|status <value>")),
            };
            ShellCommand::Set(field, value.join(" "))
        }
        ("set", _) => return Err(ParseError::Usage("set name|description|status <value>")),
        ("save", []) => ShellCommand::Save,
        ("cancel", []) => ShellCommand::Cancel,
        ("delete" | "rm", [id]) => ShellCommand::Delete(id.clone()),
        ("delete" | "rm", _) => return Err(ParseError::Usage("delete <id>")),
        ("help" | "?", _) => ShellCommand::Help,
        ("quit" | "exit", []) => ShellCommand::Quit,
        (other, _) => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

enum Flow {
    Continue,
    Quit,
}

/// Run the session until `quit` or end of input.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails. Backend
/// failures are reported inline and never end the session.
pub async fn run<G, F, R, W>(
    panel: &AutomationPanel<G, F>,
    input: R,
    out: &mut W,
) -> std::io::Result<()>
where
    G: AutomationGateway,
    F: EditForm,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut notices = panel.subscribe_notices();
    let mut lines = input.lines();
    writeln!(out, "{}", render::table(&panel.rows()))?;

    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;
        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };

        let flow = match parse(&line) {
            Ok(Some(command)) => execute(panel, command, out).await?,
            Ok(None) => Flow::Continue,
            Err(err) => {
                writeln!(out, "{err}")?;
                Flow::Continue
            }
        };

        loop {
            match notices.try_recv() {
                Ok(notice) => writeln!(out, "{}", render::notice(&notice))?,
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "notices dropped");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }

        if matches!(flow, Flow::Quit) {
            break;
        }
    }
    Ok(())
}

async fn execute<G, F, W>(
    panel: &AutomationPanel<G, F>,
    command: ShellCommand,
    out: &mut W,
) -> std::io::Result<Flow>
where
    G: AutomationGateway,
    F: EditForm,
    W: Write,
{
    match command {
        ShellCommand::List => writeln!(out, "{}", render::table(&panel.rows()))?,
        ShellCommand::Show => writeln!(out, "{}", render::session(&panel.session()))?,
        ShellCommand::Edit(raw) => match AutomationId::new(raw) {
            Ok(id) => {
                if panel.edit(&id).is_some() {
                    writeln!(out, "{}", render::session(&panel.session()))?;
                } else {
                    writeln!(out, "automation {id} is not listed")?;
                }
            }
            Err(err) => writeln!(out, "{err}")?,
        },
        ShellCommand::Set(field, value) => {
            if !panel.revise_draft(|draft| field.apply(draft, value)) {
                writeln!(out, "no automation is being edited, use `edit <id>` first")?;
            }
        }
        ShellCommand::Save => match panel.save_edit().await {
            ActionOutcome::Applied => {
                writeln!(out, "saved")?;
                writeln!(out, "{}", render::table(&panel.rows()))?;
            }
            ActionOutcome::Ignored => writeln!(out, "nothing to save")?,
            ActionOutcome::Busy => {}
            ActionOutcome::Failed(err) => writeln!(out, "save failed, draft kept: {err}")?,
        },
        ShellCommand::Cancel => {
            if panel.dismiss_edit() {
                writeln!(out, "edit cancelled")?;
            } else {
                writeln!(out, "nothing to cancel")?;
            }
        }
        ShellCommand::Delete(raw) => match AutomationId::new(raw) {
            Ok(id) => match panel.delete(&id).await {
                ActionOutcome::Applied => writeln!(out, "deleted {id}")?,
                ActionOutcome::Failed(err) => writeln!(out, "delete failed: {err}")?,
                ActionOutcome::Busy | ActionOutcome::Ignored => {}
            },
            Err(err) => writeln!(out, "{err}")?,
        },
        ShellCommand::Help => writeln!(out, "{HELP}")?,
        ShellCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}
