//! `jotter` command-line driver.
//!
//! # Responsibility
//! - Run one note store session per invocation: open, load, act, exit.
//! - Map store errors to a non-zero exit status.

mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use jotter_core::{
    default_log_level, init_logging, KvNoteRepository, NoteStore, NoteStoreError,
    SqliteKeyValueStore,
};
use log::error;
use std::process::ExitCode;

type Store = NoteStore<KvNoteRepository<SqliteKeyValueStore>>;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    if let Commands::Ping = cli.command {
        println!("jotter_core ping={}", jotter_core::ping());
        println!("jotter_core version={}", jotter_core::core_version());
        return ExitCode::SUCCESS;
    }

    let kv = match SqliteKeyValueStore::open(&cli.db) {
        Ok(kv) => kv,
        Err(err) => {
            eprintln!("error: cannot open `{}`: {err}", cli.db.display());
            return ExitCode::FAILURE;
        }
    };
    let mut store = NoteStore::new(KvNoteRepository::new(kv));
    let report = store.load();
    if report.storage_unreadable && is_write(&cli.command) {
        eprintln!(
            "error: could not read `{}`; refusing to write so stored notes are not overwritten",
            cli.db.display()
        );
        return ExitCode::FAILURE;
    }
    if report.degraded {
        eprintln!("warning: stored notes were unreadable or inconsistent; some notes may be missing");
    }

    match run(&mut store, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_command module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn is_write(command: &Commands) -> bool {
    matches!(command, Commands::Save { .. } | Commands::Delete { .. })
}

fn run(store: &mut Store, command: Commands) -> Result<(), NoteStoreError> {
    match command {
        Commands::List { search } => {
            for summary in store.summaries(search.as_deref().unwrap_or("")) {
                println!(
                    "{}\t{}\t{}",
                    summary.id, summary.timestamp, summary.display_title
                );
            }
        }
        Commands::Show { id } => {
            let note = store.select(&id)?;
            println!("id: {}", note.id);
            println!("title: {}", note.title);
            println!("timestamp: {}", note.timestamp);
            println!();
            println!("{}", note.content);
        }
        Commands::Save { id, title, content } => {
            let (title, content) = match id {
                Some(id) => {
                    let current = store.select(&id)?;
                    (
                        title.unwrap_or_else(|| current.title.clone()),
                        content.unwrap_or_else(|| current.content.clone()),
                    )
                }
                None => {
                    store.reset();
                    (title.unwrap_or_default(), content.unwrap_or_default())
                }
            };
            let saved = store.save(&title, &content)?;
            println!("{}", saved.id);
        }
        Commands::Delete { id } => {
            let removed = store.delete(&id)?;
            println!("deleted {}", removed.id);
        }
        Commands::Ping => {}
    }
    Ok(())
}
