use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use agentdeck::console::{self, Step};
use agentdeck::engine::{EngineClient, HttpEngineClient};
use agentdeck::run::dispatch;
use agentdeck::storage::{CredentialStore, FileCredentialStore};
use agentdeck::{App, Config};

#[derive(Parser)]
#[command(name = "agentdeck")]
#[command(about = "Compose AI agents and run them on a remote execution engine", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive console (default)
    Console,
    /// Print the engine's model catalog
    Models,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = Config::from_env();

    match cli.command.unwrap_or(Commands::Console) {
        Commands::Console => run_console(config).await?,
        Commands::Models => list_models(config).await?,
    }

    Ok(())
}

async fn list_models(config: Config) -> Result<()> {
    let engine = HttpEngineClient::new(&config.api_base)?;
    for model in engine.fetch_models().await? {
        println!("{}  {} ({})", model.id, model.name, model.caption());
    }
    Ok(())
}

async fn run_console(config: Config) -> Result<()> {
    let engine: Arc<dyn EngineClient> = Arc::new(HttpEngineClient::new(&config.api_base)?);
    let credentials: Arc<dyn CredentialStore> =
        Arc::new(FileCredentialStore::new(&config.credential_path));
    let mut app = App::new(engine, credentials).with_run_timeout(config.run_timeout);

    println!("Connecting to {}", config.api_base);
    let mut startup_rx = app.spawn_startup();
    print!("{}", console::render(&app));

    let (reply_tx, mut reply_rx) = mpsc::unbounded_channel();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(Duration::from_millis(250));

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let step = match console::parse(&line) {
                    Ok(command) => console::apply(&mut app, command),
                    Err(e) => Step::Say(e.to_string()),
                };

                match step {
                    Step::Redraw => print!("{}", console::render(&app)),
                    Step::Say(message) => println!("{}", message),
                    Step::Dispatch(request) => {
                        let engine = app.engine();
                        let timeout = app.run_timeout();
                        let reply_tx = reply_tx.clone();
                        tokio::spawn(async move {
                            let reply = dispatch(engine.as_ref(), request, timeout).await;
                            // The receiver only goes away when the console exits.
                            let _ = reply_tx.send(reply);
                        });
                        print!("{}", console::render(&app));
                    }
                    Step::Quit => break,
                }
            }
            Some(reply) = startup_rx.recv() => {
                app.apply_startup(reply);
                print!("{}", console::render(&app));
            }
            Some(reply) = reply_rx.recv() => {
                if let Err(e) = app.finish_run(reply) {
                    log::warn!("Dropping engine reply: {}", e);
                }
                print!("{}", console::render(&app));
            }
            _ = ticker.tick() => {
                if app.notifications_mut().expire() {
                    print!("{}", console::render(&app));
                }
            }
        }
    }

    Ok(())
}
