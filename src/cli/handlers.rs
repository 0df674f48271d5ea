use std::collections::HashSet;
use std::path::PathBuf;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::journal;
use crate::io::lock::StoreLock;
use crate::ops::list_ops;
use crate::store::{SaveStatus, TodoStore};

// ---------------------------------------------------------------------------
// Store location
// ---------------------------------------------------------------------------

/// Resolve the store directory: -C flag, then $TICK_DIR, then ~/.tick.
pub fn resolve_store_dir(flag: Option<&str>) -> PathBuf {
    if let Some(dir) = flag {
        return PathBuf::from(dir);
    }
    if let Ok(dir) = std::env::var("TICK_DIR") {
        return PathBuf::from(dir);
    }
    let home = std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."));
    home.join(".tick")
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let dir = resolve_store_dir(cli.store_dir.as_deref());

    match cli.command {
        None => {
            eprintln!("no subcommand (try `tk --help`, or run `tk` in a terminal for the TUI)");
            Ok(())
        }
        Some(cmd) => match cmd {
            Commands::List(args) => cmd_list(&dir, args, json),
            Commands::Add(args) => cmd_add(&dir, args, json),
            Commands::Done(args) => cmd_done(&dir, args),
            Commands::Edit(args) => cmd_edit(&dir, args),
            Commands::Rm(args) => cmd_rm(&dir, args),
            Commands::Config(args) => cmd_config(&dir, args),
            Commands::Journal(args) => cmd_journal(&dir, args),
        },
    }
}

/// Warn (stderr) when the last write didn't land; the journal has the data.
fn warn_on_save_failure(store: &TodoStore) {
    if let SaveStatus::Failed { key, message } = store.save_status() {
        eprintln!(
            "warning: could not save {}: {} (snapshot kept in {})",
            key,
            message,
            journal::journal_path(store.dir()).display()
        );
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(
    dir: &std::path::Path,
    args: ListArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = TodoStore::open(dir)?;

    if json {
        let (items, completed) = if args.completed {
            (items_to_json(&store.list.completed), None)
        } else if args.all {
            (
                items_to_json(&store.list.items),
                Some(items_to_json(&store.list.completed)),
            )
        } else {
            (items_to_json(&store.list.items), None)
        };
        print_json(&ListJson { items, completed });
        return Ok(());
    }

    if args.completed {
        println!("Completed:");
        print_items(&store.list.completed);
        return Ok(());
    }
    println!("Tasks:");
    print_items(&store.list.items);
    if args.all {
        println!("Completed:");
        print_items(&store.list.completed);
    }
    Ok(())
}

fn cmd_journal(
    dir: &std::path::Path,
    args: JournalArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    if args.clear {
        journal::clear_journal(dir)?;
        println!("journal cleared");
        return Ok(());
    }
    match journal::read_journal(dir) {
        Some(content) => {
            println!("{} entries in {}", journal::entry_count(dir), journal::journal_path(dir).display());
            println!("{}", content);
        }
        None => println!("journal is empty"),
    }
    Ok(())
}

fn cmd_config(
    dir: &std::path::Path,
    args: ConfigArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = config_io::read_config(dir)?;
    let Some(option) = args.option else {
        println!(
            "track_completed_separately = {}",
            config.store.track_completed_separately
        );
        println!("multi_select = {}", config.store.multi_select);
        return Ok(());
    };

    let current = match option.as_str() {
        "track_completed_separately" => config.store.track_completed_separately,
        "multi_select" => config.store.multi_select,
        other => return Err(format!("unknown option: {}", other).into()),
    };

    let Some(value) = args.value else {
        println!("{} = {}", option, current);
        return Ok(());
    };

    let value: bool = value
        .parse()
        .map_err(|_| format!("expected true or false, got: {}", value))?;
    let _lock = StoreLock::acquire_default(dir)?;
    let mut doc = config_io::read_config_doc(dir)?;
    config_io::set_store_option(&mut doc, &option, value);
    config_io::write_config_doc(dir, &doc)?;
    println!("{} = {}", option, value);
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(
    dir: &std::path::Path,
    args: AddArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let _lock = StoreLock::acquire_default(dir)?;
    let mut store = TodoStore::open(dir)?;
    let Some(id) = store.add(&args.text) else {
        return Err("nothing to add: text is blank".into());
    };
    warn_on_save_failure(&store);
    if json {
        let number = store.list.position_of(id).map(|p| p + 1).unwrap_or(0);
        let item = store.list.find(id).cloned();
        if let Some(item) = item {
            print_json(&ItemJson {
                number,
                id: item.id,
                text: item.text,
                done: item.done,
                added: item.added,
            });
        }
    } else {
        println!("added {} ({} items)", args.text, store.list.len());
    }
    Ok(())
}

fn cmd_done(dir: &std::path::Path, args: DoneArgs) -> Result<(), Box<dyn std::error::Error>> {
    let index = number_to_index(args.number)?;
    let _lock = StoreLock::acquire_default(dir)?;
    let mut store = TodoStore::open(dir)?;
    let text = store
        .list
        .get(index)
        .map(|i| i.text.clone())
        .unwrap_or_default();
    let outcome = store.toggle_done(index).map_err(|e| e.to_string())?;
    warn_on_save_failure(&store);
    match outcome {
        crate::store::ToggleOutcome::MovedToCompleted => {
            println!("done: {} (moved to completed)", text)
        }
        crate::store::ToggleOutcome::Toggled(true) => println!("done: {}", text),
        crate::store::ToggleOutcome::Toggled(false) => println!("not done: {}", text),
    }
    Ok(())
}

fn cmd_edit(dir: &std::path::Path, args: EditArgs) -> Result<(), Box<dyn std::error::Error>> {
    let index = number_to_index(args.number)?;
    if args.text.trim().is_empty() {
        return Err("replacement text is blank".into());
    }
    let _lock = StoreLock::acquire_default(dir)?;
    let mut store = TodoStore::open(dir)?;
    store.edit_text(index, &args.text).map_err(|e| e.to_string())?;
    warn_on_save_failure(&store);
    println!("edited {}: {}", args.number, args.text);
    Ok(())
}

fn cmd_rm(dir: &std::path::Path, args: RmArgs) -> Result<(), Box<dyn std::error::Error>> {
    let _lock = StoreLock::acquire_default(dir)?;
    let mut store = TodoStore::open(dir)?;

    if args.completed {
        // highest index first so earlier removals can't shift later ones
        let mut indices: Vec<usize> = args
            .numbers
            .iter()
            .map(|n| number_to_index(*n))
            .collect::<Result<_, _>>()?;
        indices.sort_unstable();
        indices.dedup();
        for &index in indices.iter().rev() {
            store
                .remove_from_completed(index)
                .map_err(|e| e.to_string())?;
        }
        warn_on_save_failure(&store);
        println!("removed {} completed item(s)", indices.len());
        return Ok(());
    }

    let indices: HashSet<usize> = args
        .numbers
        .iter()
        .map(|n| number_to_index(*n))
        .collect::<Result<_, _>>()?;
    let before = store.list.len();
    let out_of_range = indices.iter().find(|&&i| i >= before);
    if let Some(&i) = out_of_range {
        return Err(list_ops::OpError::IndexOutOfRange {
            index: i,
            len: before,
        }
        .to_string()
        .into());
    }
    let removed = store.remove_at_indices(&indices);
    warn_on_save_failure(&store);
    println!("removed {} item(s)", removed);
    Ok(())
}

fn number_to_index(number: usize) -> Result<usize, String> {
    if number == 0 {
        return Err("list numbers start at 1".to_string());
    }
    Ok(number - 1)
}
