pub mod app_dirs;
pub mod config;
pub mod logging;
pub mod metrics;
pub mod run;
pub mod runtime;
pub mod sorter;
pub mod store;
pub mod ui;
pub mod validator;

use crate::{
    config::{Config, ConfigStore, FileConfigStore},
    run::Run,
    runtime::{AppEvent, CrosstermEventSource, Runner},
    sorter::{sort_by_pace, SortCriterion},
    store::{FileRunStore, RunStore},
    validator::validate,
};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};
use tracing::warn;

const TICK_RATE_MS: u64 = 250;

/// terminal running log with pace analytics and local history
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal running log: record distance and elapsed time per session, review pace and speed, and keep the whole history in a local file."
)]
pub struct Cli {
    /// ordering applied to the list on startup
    #[clap(short, long, value_enum)]
    sort: Option<SortCriterion>,

    /// run log file to use instead of the platform state directory
    #[clap(long)]
    data_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Tracker,
    AddRun,
    ConfirmDelete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Distance,
    Time,
}

/// Buffered contents of the add-run form
#[derive(Debug, Default)]
pub struct AddRunForm {
    pub distance: String,
    pub time: String,
    pub focus: FormField,
    pub error: Option<String>,
}

impl AddRunForm {
    fn active_field_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Distance => &mut self.distance,
            FormField::Time => &mut self.time,
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FormField::Distance => FormField::Time,
            FormField::Time => FormField::Distance,
        };
    }
}

pub struct App {
    pub runs: Vec<Run>,
    pub state: AppState,
    pub selected: usize,
    pub form: AddRunForm,
    pub sort: Option<SortCriterion>,
    pub alert: Option<String>,
    pub config: Config,
    store: Box<dyn RunStore>,
    config_store: Box<dyn ConfigStore>,
}

impl App {
    pub fn new(
        store: Box<dyn RunStore>,
        config_store: Box<dyn ConfigStore>,
        initial_sort: Option<SortCriterion>,
    ) -> Self {
        let config = config_store.load();
        let runs = match store.load_all() {
            Ok(runs) => runs,
            Err(e) => {
                // load failures stay on the diagnostic channel; the list
                // starts empty and the first successful save rewrites it
                warn!("failed to load the run log: {e}");
                Vec::new()
            }
        };

        let mut app = Self {
            runs,
            state: AppState::Tracker,
            selected: 0,
            form: AddRunForm::default(),
            sort: None,
            alert: None,
            config,
            store,
            config_store,
        };
        if let Some(criterion) = initial_sort.or(app.config.default_sort) {
            app.apply_sort(criterion);
        }
        app
    }

    pub fn selected_run(&self) -> Option<&Run> {
        self.runs.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.runs.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    /// Re-orders the visible list and remembers the chosen ordering as the
    /// startup default.
    pub fn apply_sort(&mut self, criterion: SortCriterion) {
        self.runs = sort_by_pace(&self.runs, criterion);
        self.selected = 0;
        self.sort = Some(criterion);

        if self.config.default_sort != Some(criterion) {
            self.config.default_sort = Some(criterion);
            if let Err(e) = self.config_store.save(&self.config) {
                warn!("failed to save config: {e}");
            }
        }
    }

    pub fn open_form(&mut self) {
        self.form = AddRunForm::default();
        self.state = AppState::AddRun;
    }

    /// Validates the form and appends the new run. Both validation problems
    /// and failed writes surface inline and keep the form open, so no input
    /// is lost.
    pub fn submit_form(&mut self) {
        match validate(&self.form.distance, &self.form.time) {
            Ok(run) => match self.store.append(run.clone()) {
                Ok(()) => {
                    self.runs.push(run);
                    if let Some(criterion) = self.sort {
                        self.runs = sort_by_pace(&self.runs, criterion);
                    }
                    self.alert = None;
                    self.state = AppState::Tracker;
                }
                Err(e) => {
                    self.form.error = Some(format!("Could not save the run: {e}"));
                }
            },
            Err(e) => {
                self.form.error = Some(e.to_string());
            }
        }
    }

    pub fn request_delete(&mut self) {
        if self.selected_run().is_none() {
            return;
        }
        if self.config.confirm_delete {
            self.state = AppState::ConfirmDelete;
        } else {
            self.delete_selected();
        }
    }

    /// Removes the selected run from the store and the visible list. A
    /// failed write leaves the list as it was and raises an alert.
    pub fn delete_selected(&mut self) {
        self.state = AppState::Tracker;
        let Some(run) = self.selected_run().cloned() else {
            return;
        };

        match self.store.remove(&run.id) {
            Ok(()) => {
                self.runs.retain(|r| r.id != run.id);
                if self.selected >= self.runs.len() {
                    self.selected = self.runs.len().saturating_sub(1);
                }
                self.alert = None;
            }
            Err(e) => {
                self.alert = Some(format!("Could not delete the run: {e}"));
            }
        }
    }

    /// Handles one key event; returns true when the app should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        match self.state {
            AppState::Tracker => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return true,
                KeyCode::Char('a') => self.open_form(),
                KeyCode::Char('d') | KeyCode::Delete => self.request_delete(),
                KeyCode::Char('b') => self.apply_sort(SortCriterion::Best),
                KeyCode::Char('w') => self.apply_sort(SortCriterion::Worst),
                KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
                KeyCode::Down | KeyCode::Char('j') => self.select_next(),
                _ => {}
            },
            AppState::AddRun => match key.code {
                KeyCode::Esc => self.state = AppState::Tracker,
                KeyCode::Tab | KeyCode::BackTab => self.form.toggle_focus(),
                KeyCode::Enter => match self.form.focus {
                    FormField::Distance => self.form.focus = FormField::Time,
                    FormField::Time => self.submit_form(),
                },
                KeyCode::Backspace => {
                    self.form.active_field_mut().pop();
                }
                KeyCode::Char(c) => {
                    let decimal_ok = c == '.' && self.form.focus == FormField::Distance;
                    if c.is_ascii_digit() || decimal_ok {
                        self.form.active_field_mut().push(c);
                    }
                }
                _ => {}
            },
            AppState::ConfirmDelete => match key.code {
                KeyCode::Char('y') | KeyCode::Enter => self.delete_selected(),
                KeyCode::Char('n') | KeyCode::Esc => self.state = AppState::Tracker,
                _ => {}
            },
        }

        false
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    logging::init();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store: Box<dyn RunStore> = match &cli.data_file {
        Some(path) => Box::new(FileRunStore::with_path(path)),
        None => Box::new(FileRunStore::new()),
    };
    let config_store: Box<dyn ConfigStore> = Box::new(FileConfigStore::new());

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(store, config_store, cli.sort);
    start_tui(&mut terminal, &mut app)?;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    Ok(())
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        Duration::from_millis(TICK_RATE_MS),
    );

    loop {
        terminal.draw(|f| ui(app, f))?;

        match runner.step() {
            AppEvent::Tick | AppEvent::Resize => {}
            AppEvent::Key(key) => {
                if app.handle_key(key) {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
