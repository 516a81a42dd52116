pub mod command;
pub mod render;

pub use command::{parse, Command, CommandError, HELP};
pub use render::render;

use crate::app::App;
use crate::error::RunError;
use crate::types::RunRequest;

/// What the event loop should do after a command was applied.
#[derive(Debug)]
pub enum Step {
    Redraw,
    Say(String),
    /// A run entered `Running`; the request must be sent and its reply fed
    /// back through [`App::finish_run`].
    Dispatch(RunRequest),
    Quit,
}

const DIALOG_OPEN: &str = "Finish the agent dialog first with `save` or `cancel`";

pub fn apply(app: &mut App, command: Command) -> Step {
    match command {
        Command::View(index) => {
            if app.select_view(index) {
                Step::Redraw
            } else {
                Step::Say(format!("No view {}; choose 0, 1 or 2", index))
            }
        }
        Command::SetKey(value) => {
            app.set_api_key(value);
            Step::Redraw
        }
        Command::SaveKey => {
            app.save_api_key();
            Step::Redraw
        }
        Command::Model(choice) => {
            let selected = match choice.parse::<usize>() {
                Ok(index) => app.select_model_index(index),
                Err(_) => app.select_model(&choice),
            };
            if selected {
                Step::Redraw
            } else {
                Step::Say(format!("Model {} is not in the catalog", choice))
            }
        }
        Command::Add | Command::Edit(_) | Command::Delete(_) if app.dialog().is_open() => {
            Step::Say(DIALOG_OPEN.to_string())
        }
        Command::Add => {
            app.open_add_dialog();
            Step::Redraw
        }
        Command::Edit(index) => {
            if app.open_edit_dialog(index) {
                Step::Redraw
            } else {
                Step::Say(format!("No agent at {}", index))
            }
        }
        Command::Delete(index) => match app.delete_agent(index) {
            Some(_) => Step::Redraw,
            None => Step::Say(format!("No agent at {}", index)),
        },
        Command::Name(name) => edit_draft(app.dialog_mut().set_name(name)),
        Command::Kind(kind) => edit_draft(app.dialog_mut().set_kind(kind)),
        Command::Description(text) => edit_draft(app.dialog_mut().set_description(text)),
        Command::Save => {
            if !app.dialog().is_open() {
                return Step::Say("No agent dialog is open".to_string());
            }
            app.save_dialog();
            Step::Redraw
        }
        Command::Cancel => {
            app.cancel_dialog();
            Step::Redraw
        }
        Command::Prompt(text) => {
            app.set_prompt(text);
            Step::Redraw
        }
        Command::Run => match app.begin_run() {
            Ok(request) => Step::Dispatch(request),
            Err(RunError::AlreadyRunning) => Step::Say("A run is already in progress".to_string()),
            // Precondition failures show up inline in the status panel.
            Err(_) => Step::Redraw,
        },
        Command::Dismiss => {
            app.notifications_mut().dismiss();
            Step::Redraw
        }
        Command::Show => Step::Redraw,
        Command::Help => Step::Say(HELP.to_string()),
        Command::Quit => Step::Quit,
    }
}

fn edit_draft(applied: bool) -> Step {
    if applied {
        Step::Redraw
    } else {
        Step::Say("Open a dialog first with `add` or `edit <n>`".to_string())
    }
}
