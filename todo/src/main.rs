//! Terminal front end for the todo list.
//!
//! Reads one command per line from stdin and prints the list after every
//! change. Confirmation prompts are answered on stdin unless
//! `TODO_ASSUME_YES` is set.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use todo::cli::{self, Command, CommandError};
use todo::{Config, TodoAction, TodoEnvironment, TodoReducer, TodoState, TodoStore};
use todo_core::environment::{
    AlwaysConfirm, Confirm, MonotonicClock, Prompt, SystemClock, UuidGenerator,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Asks confirmation questions on the terminal
struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &Prompt) -> bool {
        print!(
            "{}\n{} [{}: y / {}: n] ",
            prompt.title, prompt.message, prompt.confirm_label, prompt.cancel_label
        );
        if let Err(error) = io::stdout().flush() {
            tracing::warn!(%error, "Failed to flush prompt");
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => {
                let answer = answer.trim().to_ascii_lowercase();
                answer == "y" || answer == "yes" || answer == prompt.confirm_label.to_lowercase()
            },
            Err(error) => {
                tracing::warn!(%error, "Failed to read answer, treating prompt as cancelled");
                false
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let confirm: Arc<dyn Confirm> = if config.assume_yes {
        Arc::new(AlwaysConfirm)
    } else {
        Arc::new(TerminalConfirm)
    };
    let env = TodoEnvironment::new(
        Arc::new(MonotonicClock::new(SystemClock)),
        Arc::new(UuidGenerator),
        confirm,
    );
    let mut store = TodoStore::with_config(
        TodoState::new(),
        TodoReducer::new(),
        env,
        config.store_config(),
    );

    tracing::info!(
        log_level = %config.log_level,
        assume_yes = config.assume_yes,
        max_feedback_actions = store.config().max_feedback_actions,
        "Todo list started"
    );
    println!("=== My Todo List ===  (type `help` for commands)\n");
    println!("{}", store.state(cli::render_list));

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            break;
        }

        let command = match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => command,
            Err(CommandError::Empty) => continue,
            Err(error) => {
                println!("{error}");
                continue;
            },
        };

        match command {
            Command::Help => println!("{}", cli::HELP),
            Command::List => println!("{}", store.state(cli::render_list)),
            Command::Stats => println!("{}", store.state(|s| cli::render_stats(&s.stats()))),
            Command::Json => {
                let json = store.state(|s| serde_json::to_string_pretty(&s.visible()))?;
                println!("{json}");
            },
            command => run(&mut store, &command)?,
        }
    }

    tracing::info!("Todo list closed");
    Ok(())
}

/// Send the actions of a list-changing command and show the outcome
fn run(store: &mut TodoStore, command: &Command) -> anyhow::Result<()> {
    let actions = match store.state(|s| command.actions(&s.visible())) {
        Ok(actions) => actions,
        Err(error) => {
            println!("{error}");
            return Ok(());
        },
    };

    for action in actions {
        store.send(action)?;
    }

    if let Some(notice) = store.state(|s| s.notice) {
        println!("{notice}");
        store.send(TodoAction::DismissNotice)?;
    }

    println!("{}", store.state(|s| cli::render_stats(&s.stats())));
    println!("{}", store.state(cli::render_list));
    Ok(())
}
