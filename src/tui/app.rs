//! Terminal loop for the console
//!
//! Owns the terminal, draws every tick, and turns [`Action`]s into
//! [`Console`] calls. Work that leaves the terminal (the external editor,
//! the browser, the clipboard) happens here too.

use super::events::{Action, handle_key, handle_mouse};
use super::highlight::{SourceHighlighter, syntax_extension};
use super::state::{FocusPane, InputPurpose, Mode, UiState};
use super::theme::Theme;
use super::widgets::{
    AlertDialog, ConfirmDialog, EditorPane, HelpBar, HelpOverlay, StatusBar, TextInputModal,
    VersionList,
};
use super::{Result, UiError};
use crate::api::VersionId;
use crate::config::OntoConfig;
use crate::console::Console;
use crate::draft::{Draft, UploadFile};
use crate::notify::{Notifier, StatusBarNotifier};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
};
use std::io::{self, Stdout, Write};
use std::path::PathBuf;
use std::process::Command;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

type Term = Terminal<CrosstermBackend<Stdout>>;

const TICK: Duration = Duration::from_millis(100);

/// Run the console until the user quits
///
/// # Errors
///
/// Returns `UiError::Terminal` if the terminal cannot be set up, drawn to
/// or read from. Editor, clipboard and browser failures are reported in
/// the status bar instead.
pub fn run(console: Console, status: &Arc<StatusBarNotifier>, config: &OntoConfig) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let mut app = App {
        console,
        state: UiState::new(),
        theme: Theme::from_env(),
        highlighter: SourceHighlighter::new(),
        status: Arc::clone(status),
        editor: config.editor(),
        shown_id: None,
    };
    info!("console started");
    let result = app.run_loop(&mut terminal);
    cleanup_terminal()?;
    terminal.show_cursor()?;
    result
}

fn setup_terminal() -> Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(Into::into)
}

fn cleanup_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

struct App {
    console: Console,
    state: UiState,
    theme: Theme,
    highlighter: SourceHighlighter,
    status: Arc<StatusBarNotifier>,
    editor: String,
    // Draft shown at the last draw; a change resets the body scroll
    shown_id: Option<Option<VersionId>>,
}

impl App {
    fn run_loop(&mut self, terminal: &mut Term) -> Result<()> {
        self.console.start();

        loop {
            self.console.pump();
            let len = self.console.list().visible_items().len();
            self.state.clamp(len);

            let shown = Some(self.console.drafts().draft().id());
            if self.shown_id != shown {
                self.shown_id = shown;
                self.state.body_scroll = 0;
            }

            terminal.draw(|frame| self.render(frame))?;

            if !event::poll(TICK)? {
                continue;
            }
            let mode = self.state.mode_for(&self.console);
            let action = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    handle_key(&mut self.state, mode, key, len)
                }
                Event::Mouse(mouse) => handle_mouse(&mut self.state, mode, mouse, len),
                _ => Action::Ignored,
            };
            if action == Action::Quit {
                info!("console closed");
                return Ok(());
            }
            self.perform(action, terminal)?;
        }
    }

    fn perform(&mut self, action: Action, terminal: &mut Term) -> Result<()> {
        match action {
            Action::Continue | Action::Ignored | Action::Quit => {}
            Action::CursorMoved => self.console.scrolled_to(self.state.cursor),
            Action::Open => {
                let id = self
                    .console
                    .list()
                    .visible_items()
                    .get(self.state.cursor)
                    .and_then(|v| v.id);
                if let Some(id) = id {
                    self.console.select_id(id);
                    self.state.focus = FocusPane::Editor;
                }
            }
            Action::Prompt(purpose) => self.open_prompt(purpose),
            Action::Submit(purpose, text) => self.submit(purpose, &text),
            Action::New => {
                self.console.new_version();
                self.state.focus = FocusPane::Editor;
            }
            Action::Edit => self.console.edit(),
            Action::Save => self.console.save(),
            Action::Cancel => self.console.cancel(),
            Action::Delete => self.console.request_delete_current(),
            Action::ConfirmDelete => self.console.confirm_delete(),
            Action::CancelDelete => self.console.cancel_delete(),
            Action::DismissAlert => self.console.dismiss_alert(),
            Action::Validate => self.console.validate(),
            Action::ExternalEditor => {
                if let Err(e) = self.edit_externally(terminal) {
                    self.console.notifier().error(&e.to_string());
                }
            }
            Action::SetViewMode(mode) => self.console.set_view_mode(mode),
            Action::SetVisualMode(mode) => self.console.set_visual_mode(mode),
            Action::ToggleFullscreen => self.console.toggle_fullscreen(),
            Action::Refresh => {
                self.state.jump_to_start();
                self.console.refresh();
            }
            Action::Download => self.console.download(),
            Action::OpenGraph => {
                if let Err(e) = open_graph(self.console.drafts().draft()) {
                    self.console.notifier().error(&e.to_string());
                }
            }
            Action::CopySource => match copy_to_clipboard(&self.console.drafts().draft().ontology_data) {
                Ok(()) => self.console.notifier().success("Source copied to clipboard"),
                Err(e) => self.console.notifier().error(&e.to_string()),
            },
        }
        Ok(())
    }

    fn open_prompt(&mut self, purpose: InputPurpose) {
        if purpose != InputPurpose::Search {
            // Changing a field starts editing the open version
            self.console.edit();
            if !self.console.drafts().draft().is_editing() {
                return;
            }
        }
        let draft = self.console.drafts().draft();
        let initial = match purpose {
            InputPurpose::Search => self.console.list().search().to_string(),
            InputPurpose::Name => draft.name.clone(),
            InputPurpose::Description => draft.description.clone(),
            InputPurpose::Upload => String::new(),
        };
        self.state.open_input(purpose, &initial);
    }

    fn submit(&mut self, purpose: InputPurpose, text: &str) {
        match purpose {
            InputPurpose::Search => {
                self.state.jump_to_start();
                self.console.search(text);
            }
            InputPurpose::Name => self.console.set_name(text),
            InputPurpose::Description => self.console.set_description(text),
            InputPurpose::Upload => {
                let path = expand_home(text.trim());
                match UploadFile::read(&path) {
                    Ok(file) => self.console.upload(file),
                    Err(e) => self
                        .console
                        .notifier()
                        .error(&format!("Cannot read {}: {e}", path.display())),
                }
            }
        }
    }

    /// Hand the source text to `$EDITOR` and take back what it saves
    fn edit_externally(&mut self, terminal: &mut Term) -> Result<()> {
        self.console.edit();
        let draft = self.console.drafts().draft();
        if !draft.is_editing() {
            return Ok(());
        }

        let mut file = tempfile::Builder::new()
            .prefix("ontoctl-")
            .suffix(&format!(".{}", source_suffix(&draft.ontology_data)))
            .tempfile()?;
        file.write_all(draft.ontology_data.as_bytes())?;
        file.flush()?;

        let mut words = self.editor.split_whitespace();
        let program = words
            .next()
            .ok_or_else(|| UiError::Editor("no editor configured".into()))?;
        debug!(editor = %self.editor, path = %file.path().display(), "launching editor");

        cleanup_terminal()?;
        let status = Command::new(program).args(words).arg(file.path()).status();
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        enable_raw_mode()?;
        terminal.clear()?;

        let status = status.map_err(|e| UiError::Editor(format!("{program}: {e}")))?;
        if !status.success() {
            return Err(UiError::Editor(format!("{program} exited with {status}")));
        }
        let text = std::fs::read_to_string(file.path())?;
        if text != self.console.drafts().draft().ontology_data {
            self.console.set_text(&text);
        }
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),    // List and editor
                Constraint::Length(3), // Status bar
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        self.render_content(frame, rows[0]);

        let message = self.status.latest_message();
        let indicator = self.indicator();
        let status_bar = StatusBar::new(
            message.as_ref().map(|(level, text)| (*level, text.as_str())),
            &self.theme,
        )
        .with_indicator(&indicator);
        frame.render_widget(status_bar, rows[1]);
        frame.render_widget(HelpBar::new(&self.state.hints, &self.theme), rows[2]);

        self.render_overlays(frame);
    }

    fn render_content(&mut self, frame: &mut Frame, area: Rect) {
        let editor_area = if self.console.is_fullscreen() {
            area
        } else {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
                .split(area);
            // Borders take two rows
            self.state.visible_height = usize::from(columns[0].height.saturating_sub(2));
            let list = VersionList::new(self.console.list(), &self.state, &self.theme)
                .open(self.console.drafts().draft().id())
                .focused(self.state.focus == FocusPane::List);
            frame.render_widget(list, columns[0]);
            columns[1]
        };

        let drafts = self.console.drafts();
        let source = self.highlighter.lines(&drafts.draft().ontology_data);
        let pane = EditorPane::new(drafts.draft(), source, &self.theme)
            .scroll(self.state.body_scroll)
            .focused(self.state.focus == FocusPane::Editor || self.console.is_fullscreen())
            .activity(activity(&self.console));
        frame.render_widget(pane, editor_area);
    }

    fn render_overlays(&self, frame: &mut Frame) {
        let area = frame.area();
        match self.state.mode_for(&self.console) {
            Mode::Normal => {}
            Mode::Help => frame.render_widget(HelpOverlay::new(&self.theme), area),
            Mode::Input => {
                if let Some(input) = self.state.input() {
                    frame.render_widget(TextInputModal::new(input, &self.theme), area);
                }
            }
            Mode::Confirm => {
                if let Some(pending) = self.console.pending_delete() {
                    frame.render_widget(ConfirmDialog::new(pending, &self.theme), area);
                }
            }
            Mode::Alert => {
                if let Some(message) = self.console.alert() {
                    frame.render_widget(AlertDialog::new(message, &self.theme), area);
                }
            }
        }
    }

    fn indicator(&self) -> String {
        let list = self.console.list();
        let shown = list.visible_items().len();
        let count = if list.search().is_empty() {
            format!("{shown} versions")
        } else {
            format!("{shown} matching '{}'", list.search())
        };
        if self.console.is_busy() {
            format!("{count} · working…")
        } else {
            count
        }
    }
}

fn activity(console: &Console) -> Option<&'static str> {
    let drafts = console.drafts();
    if drafts.is_saving() {
        Some("saving…")
    } else if drafts.is_validating() {
        Some("validating…")
    } else if drafts.is_loading() {
        Some("loading…")
    } else {
        None
    }
}

/// File suffix for the editor so it picks the right syntax
fn source_suffix(text: &str) -> &'static str {
    match syntax_extension(text) {
        "json" => "jsonld",
        _ => "owl",
    }
}

fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

/// Write the graph markup to a temp page and open it
fn open_graph(draft: &Draft) -> Result<()> {
    let Some(visualization) = draft.visualization() else {
        return Err(UiError::Browser("validate the draft first".into()));
    };
    let name = draft
        .id()
        .map_or_else(|| "draft".to_string(), |id| id.to_string());
    let path = std::env::temp_dir().join(format!("ontoctl-graph-{name}.html"));
    std::fs::write(&path, &visualization.graph)?;
    open::that(&path).map_err(|e| UiError::Browser(e.to_string()))
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new().map_err(|e| UiError::Clipboard(e.to_string()))?;
    clipboard
        .set_text(text)
        .map_err(|e| UiError::Clipboard(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_suffix() {
        assert_eq!(source_suffix("{\"@context\": {}}"), "jsonld");
        assert_eq!(source_suffix("<rdf:RDF/>"), "owl");
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/tmp/a.owl"), PathBuf::from("/tmp/a.owl"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/a.owl"), home.join("a.owl"));
        }
    }

    #[test]
    fn test_open_graph_needs_visualization() {
        let drafts = crate::draft::DraftController::new();
        assert!(matches!(
            open_graph(drafts.draft()),
            Err(UiError::Browser(_))
        ));
    }
}
