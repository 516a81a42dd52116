use std::fmt::Write;

use crate::app::App;
use crate::types::RunState;
use crate::view::View;

/// Renders the current panel plus the notification line as plain text.
pub fn render(app: &App) -> String {
    let mut out = String::new();

    let tabs: Vec<String> = View::ALL
        .iter()
        .map(|view| {
            if *view == app.view() {
                format!("[{}]", view.title())
            } else {
                format!(" {} ", view.title())
            }
        })
        .collect();
    let _ = writeln!(out, "{}", tabs.join(" "));

    if let Some(title) = app.dialog().title() {
        render_dialog(app, title, &mut out);
    } else {
        match app.view() {
            View::Configuration => render_configuration(app, &mut out),
            View::Agents => render_agents(app, &mut out),
            View::Execute => render_execute(app, &mut out),
        }
    }

    if let Some(notice) = app.notifications().current() {
        let _ = writeln!(out, "\n({}) {}", notice.severity.as_str(), notice.message);
    }

    out
}

fn render_configuration(app: &App, out: &mut String) {
    let key = if app.api_key().is_empty() {
        "<not set>".to_string()
    } else {
        "*".repeat(app.api_key().chars().count().min(12))
    };
    let _ = writeln!(out, "API key: {}", key);
    let _ = writeln!(out, "Model:   {}", app.models().selected_id());

    if let Some(error) = app.models_error() {
        let _ = writeln!(out, "! {}", error);
    }
    for (i, model) in app.models().catalog().iter().enumerate() {
        let marker = if model.id == app.models().selected_id() { '*' } else { ' ' };
        let _ = writeln!(out, "{} {}. {} ({})", marker, i, model.name, model.caption());
    }
}

fn render_agents(app: &App, out: &mut String) {
    if let Some(error) = app.defaults_error() {
        let _ = writeln!(out, "! {}", error);
    }
    if app.registry().is_empty() {
        let _ = writeln!(out, "No agents. Use `add` to create one.");
    }
    for (i, agent) in app.registry().agents().iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} [{}] {}",
            i,
            agent.name,
            agent.kind.as_str(),
            agent.description
        );
    }
}

fn render_dialog(app: &App, title: &str, out: &mut String) {
    let _ = writeln!(out, "== {} ==", title);
    if let Some(draft) = app.dialog().draft() {
        let _ = writeln!(out, "Name:        {}", draft.spec.name);
        let _ = writeln!(out, "Type:        {}", draft.spec.kind.label());
        let _ = writeln!(out, "Description: {}", draft.spec.description);
    }
    let _ = writeln!(out, "`save` or `cancel`");
}

fn render_execute(app: &App, out: &mut String) {
    let controller = app.controller();
    let _ = writeln!(out, "Prompt: {}", app.prompt());

    let control = if app.can_execute() {
        "Execute"
    } else {
        "Running..."
    };
    let _ = writeln!(out, "[{}] state: {}", control, controller.state().as_str());

    if let Some(error) = controller.error() {
        let _ = writeln!(out, "\nError: {}", error);
    }
    if !controller.transcript().is_empty() {
        let _ = write!(out, "\n{}", controller.transcript().as_str());
    }
    if controller.state() == RunState::Completed {
        if let Some(logs) = controller.execution_logs() {
            let _ = writeln!(out, "\n-- Agent Execution Logs --\n{}", logs);
        }
        if let Some(result) = controller.result() {
            let _ = writeln!(out, "\n-- Final Result --\n{}", result);
        }
    }
}
