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

use crate::io::bridge::{DirBridge, StorageBridge};
use crate::io::lock::SessionLock;
use crate::io::watcher::{FileEvent, StoreWatcher};
use crate::model::config::Config;
use crate::model::task::TaskId;
use crate::store::TaskStore;

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Moving around the list
    Navigate,
    /// Typing a new task into the input line
    Insert,
    /// Editing the text of an existing task in place
    Edit,
}

/// How a status notice is styled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A message pinned to the status row until the next key press
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn error(text: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }
}

/// Main application state
pub struct App<B: StorageBridge> {
    pub store: TaskStore<B>,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub show_key_hints: bool,
    /// Cursor index into the visible (filtered + sorted) list
    pub cursor: usize,
    /// First row of the list viewport
    pub scroll_offset: usize,
    /// New-task input buffer and its byte cursor (Insert mode)
    pub input: String,
    pub input_cursor: usize,
    /// Byte cursor into the edit draft (Edit mode)
    pub edit_cursor: usize,
    pub notice: Option<Notice>,
}

impl<B: StorageBridge> App<B> {
    pub fn new(store: TaskStore<B>, config: &Config) -> Self {
        App {
            store,
            mode: Mode::Navigate,
            should_quit: false,
            theme: Theme::from_config(&config.ui),
            show_key_hints: config.ui.show_key_hints,
            cursor: 0,
            scroll_offset: 0,
            input: String::new(),
            input_cursor: 0,
            edit_cursor: 0,
            notice: None,
        }
    }

    /// Id of the task under the cursor, if any.
    pub fn cursor_task(&self) -> Option<TaskId> {
        self.store.visible().get(self.cursor).map(|t| t.id)
    }

    /// Keep the cursor inside the visible list after a mutation or a
    /// filter/sort change.
    pub fn clamp_cursor(&mut self) {
        let len = self.store.visible().len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }
}

/// Run the TUI against the given data directory.
pub fn run(data_dir: &Path, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let _lock = SessionLock::acquire_default(data_dir)?;

    let mut store = TaskStore::load(DirBridge::new(data_dir));
    store.subscribe(|tasks| log::debug!("task list changed: {} tasks", tasks.len()));
    let watcher = StoreWatcher::start(data_dir)?;

    let mut app = App::new(store, config);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Restore the terminal even when we panic mid-draw
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, &watcher);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<DirBridge>,
    watcher: &StoreWatcher,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        // External writers (or our own) touched the tasks file; re-reading
        // our own write is a no-op.
        if watcher
            .poll()
            .iter()
            .any(|e| matches!(e, FileEvent::TasksChanged))
        {
            app.store.reload();
            app.clamp_cursor();
        }

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
