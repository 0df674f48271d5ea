use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tk", about = concat!("[x] tick v", env!("CARGO_PKG_VERSION"), " - your to-do list in two json files"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different store directory
    #[arg(short = 'C', long = "store-dir", global = true)]
    pub store_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List items (active by default)
    List(ListArgs),
    /// Add an item
    Add(AddArgs),
    /// Toggle an item done by its list number
    Done(DoneArgs),
    /// Replace an item's text
    Edit(EditArgs),
    /// Remove items by list number
    Rm(RmArgs),
    /// Show or set store options
    Config(ConfigArgs),
    /// View or clear the diagnostic journal
    Journal(JournalArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// List the completed items instead
    #[arg(long)]
    pub completed: bool,
    /// List both active and completed items
    #[arg(long)]
    pub all: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// Item text
    pub text: String,
}

#[derive(Args)]
pub struct DoneArgs {
    /// List number (1-based, as shown by `tk list`)
    pub number: usize,
}

#[derive(Args)]
pub struct EditArgs {
    /// List number (1-based, as shown by `tk list`)
    pub number: usize,
    /// New text
    pub text: String,
}

#[derive(Args)]
pub struct RmArgs {
    /// List numbers (1-based, as shown by `tk list`)
    #[arg(required = true)]
    pub numbers: Vec<usize>,
    /// Remove from the completed list instead
    #[arg(long)]
    pub completed: bool,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Option name (track_completed_separately, multi_select)
    pub option: Option<String>,
    /// New value (true/false); omit to show the current value
    pub value: Option<String>,
}

#[derive(Args)]
pub struct JournalArgs {
    /// Delete the journal instead of showing it
    #[arg(long)]
    pub clear: bool,
}
