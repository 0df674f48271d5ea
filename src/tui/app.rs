use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::lock::StoreLock;
use crate::io::state::{UiState, read_ui_state, write_ui_state};
use crate::store::TodoStore;
use crate::util::unicode;

use super::input;
use super::render;
use super::theme::Theme;

/// Which list is currently displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Active,
    Completed,
}

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing a new item into the add field
    Insert,
    /// Inline-editing an existing item (scratch lives in the store's
    /// edit controller)
    Edit,
    /// Marking items for a bulk action
    Select,
}

/// Main application state
pub struct App {
    pub store: TodoStore,
    pub view: View,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    /// Cursor index into the active list
    pub cursor: usize,
    /// Cursor index into the completed list
    pub completed_cursor: usize,
    /// First visible row of the current list
    pub scroll_offset: usize,
    /// Add-field buffer (Insert mode)
    pub input: String,
    /// Byte offset of the add-field cursor
    pub input_cursor: usize,
    /// One-shot feedback line for the status row
    pub status_message: Option<String>,
}

impl App {
    pub fn new(store: TodoStore) -> Self {
        let theme = Theme::from_config(&store.config().ui);
        App {
            store,
            view: View::Active,
            mode: Mode::Navigate,
            should_quit: false,
            theme,
            cursor: 0,
            completed_cursor: 0,
            scroll_offset: 0,
            input: String::new(),
            input_cursor: 0,
            status_message: None,
        }
    }

    /// Length of the list the current view shows.
    pub fn visible_len(&self) -> usize {
        match self.view {
            View::Active => self.store.list.len(),
            View::Completed => self.store.list.completed.len(),
        }
    }

    /// Cursor for the current view.
    pub fn view_cursor(&self) -> usize {
        match self.view {
            View::Active => self.cursor,
            View::Completed => self.completed_cursor,
        }
    }

    pub fn set_view_cursor(&mut self, value: usize) {
        match self.view {
            View::Active => self.cursor = value,
            View::Completed => self.completed_cursor = value,
        }
    }

    /// Keep cursors inside the (possibly shrunk) lists.
    pub fn clamp_cursors(&mut self) {
        let active_len = self.store.list.len();
        if self.cursor >= active_len {
            self.cursor = active_len.saturating_sub(1);
        }
        let completed_len = self.store.list.completed.len();
        if self.completed_cursor >= completed_len {
            self.completed_cursor = completed_len.saturating_sub(1);
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    // -----------------------------------------------------------------
    // Add-field editing
    // -----------------------------------------------------------------

    pub fn input_insert(&mut self, c: char) {
        self.input.insert(self.input_cursor, c);
        self.input_cursor += c.len_utf8();
    }

    pub fn input_backspace(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.input, self.input_cursor) {
            self.input.replace_range(prev..self.input_cursor, "");
            self.input_cursor = prev;
        }
    }

    pub fn input_left(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.input, self.input_cursor) {
            self.input_cursor = prev;
        }
    }

    pub fn input_right(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.input, self.input_cursor) {
            self.input_cursor = next;
        }
    }

    pub fn input_clear(&mut self) {
        self.input.clear();
        self.input_cursor = 0;
    }
}

// ---------------------------------------------------------------------------
// UI state persistence
// ---------------------------------------------------------------------------

/// Restore view/cursor state from .state.json. Selection and edit state are
/// transient and start empty.
fn restore_ui_state(app: &mut App) {
    let Some(state) = read_ui_state(app.store.dir()) else {
        return;
    };
    if state.view == "completed" && app.store.config().store.track_completed_separately {
        app.view = View::Completed;
    }
    app.cursor = state.cursor;
    app.completed_cursor = state.completed_cursor;
    app.scroll_offset = state.scroll_offset;
    app.clamp_cursors();
}

/// Save view/cursor state to .state.json
fn save_ui_state(app: &App) {
    let view = match app.view {
        View::Active => "active",
        View::Completed => "completed",
    };
    let state = UiState {
        view: view.to_string(),
        cursor: app.cursor,
        completed_cursor: app.completed_cursor,
        scroll_offset: app.scroll_offset,
    };
    let _ = write_ui_state(app.store.dir(), &state);
}

// ---------------------------------------------------------------------------
// Run loop
// ---------------------------------------------------------------------------

/// Run the TUI against the store at `dir`. Holds the writer lock for the
/// whole session so a concurrent `tk` invocation can't interleave writes.
pub fn run(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let _lock = StoreLock::acquire_default(dir)?;
    let store = TodoStore::open(dir)?;
    let mut app = App::new(store);
    restore_ui_state(&mut app);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Save UI state before exit
    save_ui_state(&app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut save_counter = 0u32;
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
            // Debounced state save: every ~5 key presses
            save_counter += 1;
            if save_counter >= 5 {
                save_ui_state(app);
                save_counter = 0;
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
