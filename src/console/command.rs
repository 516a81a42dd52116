use thiserror::Error;

use crate::types::AgentKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    View(usize),
    SetKey(String),
    SaveKey,
    Model(String),
    Add,
    Edit(usize),
    Delete(usize),
    Name(String),
    Kind(AgentKind),
    Description(String),
    Save,
    Cancel,
    Prompt(String),
    Run,
    Dismiss,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command: {0} (try `help`)")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("`{command}` expects a number, got `{value}`")]
    NotANumber { command: &'static str, value: String },
    #[error("Unknown agent type: {0} (use `tool` or `code`)")]
    UnknownKind(String),
}

pub const HELP: &str = "\
Commands:
  view <0|1|2>        switch panel (configuration, agents, execute)
  key <value>         edit the API key field
  save-key            persist the API key
  model <n|id>        select a model from the catalog
  add                 open the dialog for a new agent
  edit <n>            open the dialog for agent n
  delete <n>          remove agent n
  name <text>         set the draft's name
  type <tool|code>    set the draft's type
  desc <text>         set the draft's description
  save | cancel       commit or discard the dialog
  prompt <text>       set the prompt
  run                 execute the agents
  dismiss             hide the notification
  show                redraw
  help | quit";

pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "" | "show" => Command::Show,
        "view" | "tab" => Command::View(number("view", rest)?),
        "config" | "configuration" => Command::View(0),
        "agents" => Command::View(1),
        "execute" => Command::View(2),
        "key" => Command::SetKey(rest.to_string()),
        "save-key" => Command::SaveKey,
        "model" => Command::Model(required("model", rest)?.to_string()),
        "add" => Command::Add,
        "edit" => Command::Edit(number("edit", rest)?),
        "delete" | "rm" => Command::Delete(number("delete", rest)?),
        "name" => Command::Name(rest.to_string()),
        "type" => {
            let value = required("type", rest)?;
            Command::Kind(
                AgentKind::parse(value).ok_or_else(|| CommandError::UnknownKind(value.to_string()))?,
            )
        }
        "desc" | "description" => Command::Description(rest.to_string()),
        "save" => Command::Save,
        "cancel" => Command::Cancel,
        "prompt" => Command::Prompt(rest.to_string()),
        "run" => Command::Run,
        "dismiss" => Command::Dismiss,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(command)
}

fn required<'a>(command: &'static str, rest: &'a str) -> Result<&'a str, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument(command))
    } else {
        Ok(rest)
    }
}

fn number(command: &'static str, rest: &str) -> Result<usize, CommandError> {
    let value = required(command, rest)?;
    value.parse().map_err(|_| CommandError::NotANumber {
        command,
        value: value.to_string(),
    })
}
