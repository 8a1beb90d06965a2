use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ramseyer_config::Config;
use ramseyer_engine::{
    AnnotationKind, AnnotationStore, JsonFileStore, RenderArena, RenderUnit, ReviewSession,
    SegmentKind, Selection, SelectionMapper, io,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use std::{env, fs::File, io::stdout, path::PathBuf, process};

struct App {
    session: ReviewSession,
    persistence: JsonFileStore,
    section_keys: Vec<String>,
    section_list_state: ListState,
    units: Vec<RenderUnit>,
    arena: RenderArena,
    /// Caret position in the flat rendered text of the current section.
    caret: usize,
    /// Where the current selection started, if one is being extended.
    selection_anchor: Option<usize>,
    /// Set when saved annotations exist but could not be read; saving would
    /// overwrite them, so it is refused.
    load_error: Option<String>,
    status: String,
}

impl App {
    fn new(config: &Config) -> Result<Self> {
        let sections = io::load_sections(&config.content_path)?;
        let persistence = JsonFileStore::new(config.resolved_annotations_path());
        let (store, load_error) =
            match AnnotationStore::load_with(&persistence, config.clear_on_load) {
                Ok(store) => (store, None),
                Err(e) => {
                    log::warn!(
                        "Could not load annotations from {}: {e}",
                        persistence.path().display()
                    );
                    (AnnotationStore::default(), Some(e.to_string()))
                }
            };
        let session = ReviewSession::new(sections, store)
            .with_mapper(SelectionMapper::with_max_depth(config.max_ancestor_depth));
        let section_keys: Vec<String> = session.section_keys().map(str::to_string).collect();

        let mut app = Self {
            session,
            persistence,
            section_keys,
            section_list_state: ListState::default(),
            units: Vec::new(),
            arena: RenderArena::new(),
            caret: 0,
            selection_anchor: None,
            status: load_error
                .as_ref()
                .map(|e| format!("Saved annotations unreadable, saving disabled: {e}"))
                .unwrap_or_default(),
            load_error,
        };

        if !app.section_keys.is_empty() {
            app.section_list_state.select(Some(0));
        }
        app.refresh();
        Ok(app)
    }

    /// Re-renders the current section after any change to atoms or annotations.
    fn refresh(&mut self) {
        self.units = self.session.render();
        self.arena = RenderArena::from_units(&self.units);
        let len = self.arena.text_len();
        self.caret = self.caret.min(len);
        self.selection_anchor = self.selection_anchor.map(|a| a.min(len));
    }

    fn next_section(&mut self) {
        if self.section_keys.is_empty() {
            return;
        }
        let i = match self.section_list_state.selected() {
            Some(i) => (i + 1) % self.section_keys.len(),
            None => 0,
        };
        self.select_section(i);
    }

    fn previous_section(&mut self) {
        if self.section_keys.is_empty() {
            return;
        }
        let i = match self.section_list_state.selected() {
            Some(0) | None => self.section_keys.len() - 1,
            Some(i) => i - 1,
        };
        self.select_section(i);
    }

    fn select_section(&mut self, index: usize) {
        self.section_list_state.select(Some(index));
        if let Some(key) = self.section_keys.get(index) {
            self.session.select_section(key);
        }
        self.caret = 0;
        self.selection_anchor = None;
        self.refresh();
    }

    fn move_caret(&mut self, forward: bool, extend: bool) {
        if extend {
            self.selection_anchor.get_or_insert(self.caret);
        } else {
            self.selection_anchor = None;
        }
        self.caret = if forward {
            (self.caret + 1).min(self.arena.text_len())
        } else {
            self.caret.saturating_sub(1)
        };
    }

    fn selection(&self) -> Option<Selection<ramseyer_engine::render::NodeId>> {
        let anchor = self.selection_anchor?;
        Some(Selection {
            anchor: self.arena.point_at(anchor)?,
            focus: self.arena.point_at(self.caret)?,
        })
    }

    fn selected_positions(&self) -> Option<(usize, usize)> {
        let anchor = self.selection_anchor?;
        Some((anchor.min(self.caret), anchor.max(self.caret)))
    }

    fn annotate(&mut self, kind: AnnotationKind) {
        let selection = self.selection();
        self.status = match self.session.annotate(&self.arena, selection.as_ref(), kind) {
            Some(annotation) => format!("{kind:?}: \"{}\"", annotation.text_snapshot),
            None => "Nothing selected (Shift+←/→ to select)".to_string(),
        };
        self.selection_anchor = None;
        self.refresh();
    }

    fn undo(&mut self) {
        self.status = if self.session.store_mut().undo() {
            "Undone".to_string()
        } else {
            "Nothing to undo".to_string()
        };
        self.refresh();
    }

    fn redo(&mut self) {
        self.status = if self.session.store_mut().redo() {
            "Redone".to_string()
        } else {
            "Nothing to redo".to_string()
        };
        self.refresh();
    }

    fn clear_all(&mut self) {
        self.session.store_mut().clear_all();
        self.status = "Cleared all annotations (z to undo)".to_string();
        self.refresh();
    }

    fn discard(&mut self) {
        self.session.store_mut().discard();
        self.status = "Discarded unsaved changes".to_string();
        self.refresh();
    }

    fn save(&mut self) {
        if let Some(e) = &self.load_error {
            self.status = format!(
                "Not saving over unreadable {}: {e}",
                self.persistence.path().display()
            );
            return;
        }
        self.status = match self.session.store_mut().save_with(&self.persistence) {
            Ok(()) => format!("Saved to {}", self.persistence.path().display()),
            Err(e) => format!("Save failed, changes kept: {e}"),
        };
    }

    /// Builds styled lines for the current section, splitting on newlines and
    /// overlaying the selection and caret.
    fn render_lines(&self) -> Vec<Line<'static>> {
        let selected = self.selected_positions();
        let mut lines: Vec<Line<'static>> = Vec::new();
        let mut spans: Vec<Span<'static>> = Vec::new();
        let mut run = String::new();
        let mut run_style = Style::default();
        let mut pos = 0;

        for unit in &self.units {
            let base = unit_style(unit);
            for ch in unit.text.chars() {
                let mut style = base;
                if let Some((start, end)) = selected
                    && start <= pos
                    && pos < end
                {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                if pos == self.caret {
                    style = style.bg(Color::Yellow).fg(Color::Black);
                }

                if style != run_style && !run.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut run), run_style));
                }
                run_style = style;
                if ch == '\n' {
                    if pos == self.caret {
                        run.push(' ');
                    }
                    if !run.is_empty() {
                        spans.push(Span::styled(std::mem::take(&mut run), run_style));
                    }
                    lines.push(Line::from(std::mem::take(&mut spans)));
                } else {
                    run.push(ch);
                }
                pos += 1;
            }
        }

        if !run.is_empty() {
            spans.push(Span::styled(run, run_style));
        }
        if self.caret == pos {
            spans.push(Span::styled(" ", Style::default().bg(Color::Yellow)));
        }
        lines.push(Line::from(spans));
        lines
    }
}

fn unit_style(unit: &RenderUnit) -> Style {
    let style = if unit.is_ref {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    match unit.kind {
        SegmentKind::None => style,
        SegmentKind::Strikethrough => style.fg(Color::Red).add_modifier(Modifier::CROSSED_OUT),
        SegmentKind::Underline => style.fg(Color::Green).add_modifier(Modifier::UNDERLINED),
    }
}

fn init_logging(config: &Config) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    // The terminal belongs to the UI, so only log when there is a file to log to
    if let Some(log_file) = &config.log_file {
        let file = File::create(log_file)
            .with_context(|| format!("Failed to open log file {}", log_file.display()))?;
        builder
            .filter_level(log::LevelFilter::Info)
            .target(env_logger::Target::Pipe(Box::new(file)));
    } else {
        builder.filter_level(log::LevelFilter::Off);
    }
    builder.init();
    Ok(())
}

fn main() -> Result<()> {
    // Determine content path from CLI args or config file
    let args: Vec<String> = env::args().collect();
    let config_path = Config::config_path();

    let stored = match Config::load() {
        Ok(stored) => stored,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            eprintln!("Usage: {} <sections.json>", args[0]);
            process::exit(1);
        }
    };

    let config = match (args.len(), stored) {
        (2, Some(stored)) => Config {
            content_path: PathBuf::from(&args[1]),
            annotations_path: None,
            ..stored
        },
        (2, None) => {
            // Remember the content file so later runs need no argument
            let config = Config::new(PathBuf::from(&args[1]));
            if let Err(e) = config.save_to_path(&config_path) {
                eprintln!(
                    "Warning: Could not save config to {}: {e}",
                    config_path.display()
                );
            }
            config
        }
        (1, Some(stored)) => stored,
        (1, None) => {
            eprintln!("Error: No content file provided and no config file found");
            eprintln!("Usage: {} <sections.json>", args[0]);
            eprintln!("Or create a config file at {}", config_path.display());
            process::exit(1);
        }
        _ => {
            eprintln!("Usage: {} [sections.json]", args[0]);
            process::exit(1);
        }
    };

    init_logging(&config)?;
    log::info!("ramseyer starting with {}", config.content_path.display());

    let mut app = match App::new(&config) {
        Ok(app) => app,
        Err(e) => {
            eprintln!(
                "Error: Could not open '{}': {e}",
                config.content_path.display()
            );
            process::exit(1);
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let extend = key.modifiers.contains(KeyModifiers::SHIFT);
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_section(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_section(),
                KeyCode::Right => app.move_caret(true, extend),
                KeyCode::Left => app.move_caret(false, extend),
                KeyCode::Char('s') => app.annotate(AnnotationKind::Strikethrough),
                KeyCode::Char('u') => app.annotate(AnnotationKind::Underline),
                KeyCode::Char('z') => app.undo(),
                KeyCode::Char('y') => app.redo(),
                KeyCode::Char('c') => app.clear_all(),
                KeyCode::Char('d') => app.discard(),
                KeyCode::Char('w') => app.save(),
                KeyCode::Esc => app.selection_anchor = None,
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(f.area());

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(25), Constraint::Percentage(75)].as_ref())
        .split(rows[0]);

    // Section list panel
    let section_items: Vec<ListItem> = app
        .section_keys
        .iter()
        .map(|key| {
            let count = app.session.store().for_section(key).len();
            let label = if count > 0 {
                format!("§ {key} ({count})")
            } else {
                format!("§ {key}")
            };
            ListItem::new(vec![Line::from(vec![Span::raw(label)])])
        })
        .collect();

    let sections_list = List::new(section_items)
        .block(Block::default().borders(Borders::ALL).title("Sections"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(sections_list, chunks[0], &mut app.section_list_state);

    // Section text panel
    let title = app
        .session
        .current_section()
        .map(|key| format!("Section {key}"))
        .unwrap_or_else(|| "No sections".to_string());
    let content = Paragraph::new(app.render_lines())
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });

    f.render_widget(content, chunks[1]);

    // Status and help
    let store = app.session.store();
    let state = if store.has_unsaved_changes() {
        "unsaved"
    } else {
        "saved"
    };
    let status_line = Line::from(vec![
        Span::styled(format!("[{state}] "), Style::default().fg(Color::Magenta)),
        Span::raw(app.status.clone()),
    ]);
    let help_text = Line::from(vec![
        Span::raw("q: Quit | ↑/↓: Section | Shift+←/→: Select | "),
        Span::raw("s: Strike | u: Underline | z/y: Undo/Redo | "),
        Span::raw("c: Clear | d: Discard | w: Save"),
    ]);

    let help = Paragraph::new(vec![status_line, help_text]).block(Block::default());

    f.render_widget(help, rows[1]);
}
