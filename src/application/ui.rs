use std::io;
use std::path;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::List;
use ratatui::widgets::ListItem;
use ratatui::widgets::ListState;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;
use tokio::fs;
use tokio::sync::mpsc;
use tui_textarea::Input;
use tui_textarea::Key;
use tui_textarea::TextArea;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::DiagramUpload;
use crate::domain::models::Event;
use crate::domain::models::GenerationOutcome;
use crate::domain::models::GenerationRequest;
use crate::domain::models::TargetLanguage;
use crate::domain::services::events::EventsService;
use crate::domain::services::validation;
use crate::domain::services::AuthState;
use crate::domain::services::GenerationSession;
use crate::domain::services::ProjectBrowser;
use crate::domain::services::SessionState;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Screen {
    Generator,
    Projects,
}

fn media_type_for(file_path: &path::Path) -> &'static str {
    let ext = file_path
        .extension()
        .map(|e| return e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => return "image/jpeg",
        "png" => return "image/png",
        _ => return "",
    }
}

struct UiState {
    screen: Screen,
    session: GenerationSession,
    browser: ProjectBrowser,
    language: TargetLanguage,
    path_input: TextArea<'static>,
    fix_input: TextArea<'static>,
    fix_open: bool,
    upload_error: Option<String>,
    narrator_label: String,
    status: Option<String>,
    code_scroll: u16,
}

impl UiState {
    fn new() -> UiState {
        let language = TargetLanguage::parse(&Config::get(ConfigKey::Language))
            .unwrap_or(TargetLanguage::Python);

        let mut path_input = TextArea::default();
        path_input.set_cursor_line_style(Style::default());

        let mut fix_input = TextArea::default();
        fix_input.set_cursor_line_style(Style::default());

        return UiState {
            screen: Screen::Generator,
            session: GenerationSession::default(),
            browser: ProjectBrowser::default(),
            language,
            path_input,
            fix_input,
            fix_open: false,
            upload_error: None,
            narrator_label: "".to_string(),
            status: None,
            code_scroll: 0,
        };
    }

    fn enter_projects(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        self.screen = Screen::Projects;
        self.browser.begin_load();
        tx.send(Action::ProjectsList())?;

        return Ok(());
    }

    /// Runs the full intake path for the typed file path(s): selection count,
    /// file read, then the validation gate. Nothing is sent unless every
    /// check passes.
    async fn submit_generation(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        self.upload_error = None;
        self.status = None;

        let entries = self
            .path_input
            .lines()
            .iter()
            .map(|line| return line.trim().to_string())
            .filter(|line| return !line.is_empty())
            .collect::<Vec<String>>();

        if let Err(err) = validation::validate_selection(entries.len()) {
            self.upload_error = Some(err.to_string());
            return Ok(());
        }

        let file_path = path::PathBuf::from(&entries[0]);
        let bytes = match fs::read(&file_path).await {
            Ok(bytes) => bytes,
            Err(err) => {
                self.upload_error = Some(format!("Could not read {}: {err}", file_path.display()));
                return Ok(());
            }
        };

        let filename = file_path
            .file_name()
            .map(|name| return name.to_string_lossy().to_string())
            .unwrap_or_else(|| return "diagram".to_string());
        let upload = DiagramUpload::new(bytes, media_type_for(&file_path), &filename);

        if let Err(err) = validation::validate(&upload) {
            self.upload_error = Some(err.to_string());
            return Ok(());
        }

        let request = GenerationRequest::new(upload, self.language);
        if let Some(revision) = self.session.submit(request.clone()) {
            self.narrator_label = "".to_string();
            tx.send(Action::GenerationRequest(revision, request))?;
        }

        return Ok(());
    }

    fn send_refinement(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        let instructions = self.fix_input.lines().join("\n");

        match self.session.begin_refine(&instructions) {
            Ok(Some(payload)) => {
                self.narrator_label = "".to_string();
                tx.send(Action::RefinementRequest(self.session.revision(), payload))?;
            }
            // Ok(None) is a disallowed start (already refining); Err left its
            // message on the session for the render pass.
            Ok(None) => {}
            Err(_) => {}
        }

        return Ok(());
    }

    fn open_fix_instructions(&mut self) {
        self.fix_open = true;
        self.fix_input = TextArea::default();
        self.fix_input.set_cursor_line_style(Style::default());
        // A rejection keeps the typed instructions around for another try.
        if !self.session.instructions().is_empty() {
            self.fix_input.insert_str(self.session.instructions());
        }
    }

    fn close_fix_instructions(&mut self) {
        self.fix_open = false;
        self.fix_input = TextArea::default();
        self.fix_input.set_cursor_line_style(Style::default());
    }

    fn start_new_upload(&mut self) {
        self.session.reset();
        self.close_fix_instructions();
        self.path_input = TextArea::default();
        self.path_input.set_cursor_line_style(Style::default());
        self.upload_error = None;
        self.status = None;
        self.code_scroll = 0;
    }

    fn handle_result_key(
        &mut self,
        input: Input,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<()> {
        if self.fix_open {
            match input {
                Input {
                    key: Key::Char('s'),
                    ctrl: true,
                    ..
                } => {
                    self.send_refinement(tx)?;
                }
                Input { key: Key::Esc, .. } => {
                    self.close_fix_instructions();
                }
                input => {
                    self.fix_input.input(input);
                }
            }

            return Ok(());
        }

        match input {
            Input {
                key: Key::Char('f'),
                ..
            } => {
                self.open_fix_instructions();
            }
            Input {
                key: Key::Char('c'),
                ..
            } => {
                if let Some(code) = self.session.code() {
                    tx.send(Action::CopyCode(code.to_string()))?;
                }
            }
            Input {
                key: Key::Char('s'),
                ..
            } => {
                if let (Some(code), Some(filename)) =
                    (self.session.code(), self.session.output_filename())
                {
                    tx.send(Action::ExportCode(filename.to_string(), code.to_string()))?;
                }
            }
            Input {
                key: Key::Char('n'),
                ..
            } => {
                self.start_new_upload();
            }
            Input { key: Key::Down, .. } => {
                self.code_scroll = self.code_scroll.saturating_add(1);
            }
            Input { key: Key::Up, .. } => {
                self.code_scroll = self.code_scroll.saturating_sub(1);
            }
            Input { key: Key::Tab, .. } => {
                self.enter_projects(tx)?;
            }
            _ => {}
        }

        return Ok(());
    }

    fn handle_upload_key(&mut self, input: Input, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        match input {
            Input { key: Key::Tab, .. } => {
                self.enter_projects(tx)?;
            }
            Input { key: Key::Left, .. } => {
                self.language = self.language.previous();
            }
            Input { key: Key::Right, .. } => {
                self.language = self.language.next();
            }
            input => {
                self.path_input.input(input);
            }
        }

        return Ok(());
    }

    fn handle_projects_key(
        &mut self,
        input: Input,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<()> {
        // A pending delete is confirmed with `y` and canceled by anything
        // else.
        if self.browser.pending_armed().is_some() {
            if let Input {
                key: Key::Char('y'),
                ..
            } = input
            {
                if let Some(generation_id) = self.browser.confirm_delete() {
                    tx.send(Action::ProjectDelete(generation_id))?;
                }
            } else {
                self.browser.disarm_delete();
            }

            return Ok(());
        }

        match input {
            Input { key: Key::Tab, .. } => {
                self.screen = Screen::Generator;
            }
            Input { key: Key::Esc, .. } => {
                if self.browser.detail_project().is_some() {
                    self.browser.close_detail();
                } else {
                    self.screen = Screen::Generator;
                }
            }
            Input { key: Key::Down, .. } => {
                if self.browser.detail_project().is_some() {
                    self.code_scroll = self.code_scroll.saturating_add(1);
                } else {
                    self.browser.select_next();
                }
            }
            Input { key: Key::Up, .. } => {
                if self.browser.detail_project().is_some() {
                    self.code_scroll = self.code_scroll.saturating_sub(1);
                } else {
                    self.browser.select_previous();
                }
            }
            Input {
                key: Key::Char('r'),
                ..
            } => {
                self.browser.begin_load();
                tx.send(Action::ProjectsList())?;
            }
            Input {
                key: Key::Char('x'),
                ..
            } => {
                self.browser.arm_delete();
            }
            Input {
                key: Key::Char('s'),
                ..
            } => {
                let target = self
                    .browser
                    .detail_project()
                    .or_else(|| return self.browser.selected_project());
                if let Some(project) = target {
                    tx.send(Action::ProjectDownloadCode(
                        project.generation_id.to_string(),
                        project.output_filename.to_string(),
                    ))?;
                }
            }
            Input {
                key: Key::Char('p'),
                ..
            } => {
                let target = self
                    .browser
                    .detail_project()
                    .or_else(|| return self.browser.selected_project());
                if let Some(project) = target {
                    tx.send(Action::ProjectDownloadDiagram(
                        project.generation_id.to_string(),
                        project.pdf_filename.to_string(),
                    ))?;
                }
            }
            _ => {}
        }

        return Ok(());
    }

    /// Returns true when Enter should kick off a new generation.
    fn handle_enter(&mut self) -> Result<bool> {
        if self.session.is_waiting() {
            return Ok(false);
        }

        match self.screen {
            Screen::Generator => {
                if self.session.state() == SessionState::Accepted {
                    if self.fix_open {
                        self.fix_input.input(Input {
                            key: Key::Enter,
                            ctrl: false,
                            alt: false,
                        });
                    }
                    return Ok(false);
                }

                return Ok(true);
            }
            Screen::Projects => {
                if self.browser.pending_armed().is_none() {
                    self.browser.open_detail();
                    self.code_scroll = 0;
                }
                return Ok(false);
            }
        }
    }

    fn handle_engine_event(&mut self, event: Event, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        match event {
            Event::GenerationCompleted(revision, outcome) => {
                let accepted = matches!(outcome, GenerationOutcome::Accepted { .. });
                if self.session.apply_outcome(revision, outcome) && accepted {
                    self.status = Some("Code generated successfully!".to_string());
                    self.code_scroll = 0;
                    // The generated file lands in the download directory
                    // right away, same as the first-generation flow on the
                    // web client.
                    if let (Some(code), Some(filename)) =
                        (self.session.code(), self.session.output_filename())
                    {
                        tx.send(Action::ExportCode(filename.to_string(), code.to_string()))?;
                    }
                }
            }
            Event::GenerationErrored(revision, message) => {
                self.session.apply_failure(revision, &message);
            }
            Event::RefinementCompleted(revision, outcome) => {
                let accepted = matches!(outcome, GenerationOutcome::Accepted { .. });
                if self.session.apply_refine_outcome(revision, outcome) && accepted {
                    self.close_fix_instructions();
                    self.status = Some("Fix instructions applied.".to_string());
                    self.code_scroll = 0;
                }
            }
            Event::RefinementErrored(revision, message) => {
                self.session.apply_refine_failure(revision, &message);
            }
            Event::ProgressStage(label) => {
                self.narrator_label = label;
            }
            Event::ProjectsLoaded(projects) => {
                self.browser.apply_list(projects);
            }
            Event::ProjectsErrored(message) => {
                self.browser.apply_list_error(&message);
            }
            Event::ProjectDeleted(generation_id) => {
                self.browser.apply_deleted(&generation_id);
            }
            Event::ProjectActionErrored(message) => {
                self.browser.apply_action_error(&message);
            }
            Event::StatusMessage(message) => {
                if self.screen == Screen::Projects {
                    self.browser.set_notice(&message);
                } else {
                    self.status = Some(message);
                }
            }
            _ => {}
        }

        return Ok(());
    }
}

fn title_style() -> Style {
    return Style::default().add_modifier(Modifier::BOLD);
}

fn error_style() -> Style {
    return Style::default().fg(Color::Red);
}

fn notice_style() -> Style {
    return Style::default().fg(Color::Green);
}

fn render_loading<B: Backend>(frame: &mut Frame<B>, rect: Rect, title: &str, label: &str) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(title.to_string(), title_style())),
        Line::from(""),
    ];
    if !label.is_empty() {
        lines.push(Line::from(label.to_string()));
        lines.push(Line::from(""));
    }
    lines.push(Line::from("This may take up to 3 minutes."));
    lines.push(Line::from("Please do not close this window."));

    frame.render_widget(
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .padding(Padding::new(1, 1, 0, 0)),
            )
            .alignment(Alignment::Center),
        rect,
    );
}

fn render_hints<B: Backend>(frame: &mut Frame<B>, rect: Rect, hints: &str) {
    frame.render_widget(
        Paragraph::new(hints.to_string()).style(Style::default().fg(Color::DarkGray)),
        rect,
    );
}

fn render_upload<B: Backend>(frame: &mut Frame<B>, rect: Rect, state: &mut UiState) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(rect);

    let mut welcome = "Upload an OPM diagram to generate code.".to_string();
    if let Some(identity) = AuthState::current() {
        welcome = format!(
            "Welcome, {}! Upload an OPM diagram to generate code.",
            identity.display_name()
        );
    }
    frame.render_widget(Paragraph::new(welcome), layout[0]);

    state.path_input.set_block(
        Block::default()
            .borders(Borders::ALL)
            .title("Diagram image path (JPG, JPEG or PNG, up to 5 MB)"),
    );
    frame.render_widget(state.path_input.widget(), layout[1]);

    let language_line = Line::from(vec![
        Span::raw("Target language: "),
        Span::styled(state.language.label(), title_style()),
        Span::raw("  (change with Left/Right)"),
    ]);
    frame.render_widget(Paragraph::new(vec![language_line]), layout[2]);

    let mut messages: Vec<Line> = vec![];
    if let Some(err) = &state.upload_error {
        messages.push(Line::from(Span::styled(err.to_string(), error_style())));
    }
    if state.session.state() == SessionState::Rejected {
        if let Some(explanation) = state.session.explanation() {
            messages.push(Line::from(Span::styled(
                "The AI rejected the diagram:",
                Style::default().fg(Color::Yellow),
            )));
            messages.push(Line::from(explanation.to_string()));
        }
    }
    if state.session.state() == SessionState::Failed {
        if let Some(failure) = state.session.failure() {
            messages.push(Line::from(Span::styled(failure.to_string(), error_style())));
        }
    }
    if let Some(status) = &state.status {
        messages.push(Line::from(Span::styled(status.to_string(), notice_style())));
    }
    frame.render_widget(Paragraph::new(messages).wrap(Wrap { trim: false }), layout[3]);

    render_hints(
        frame,
        layout[4],
        "Enter: generate  Left/Right: language  Tab: projects  Ctrl+C: quit",
    );
}

fn render_result<B: Backend>(frame: &mut Frame<B>, rect: Rect, state: &mut UiState) {
    let mut constraints = vec![Constraint::Length(6), Constraint::Min(5)];
    if state.fix_open {
        constraints.push(Constraint::Length(8));
    }
    constraints.push(Constraint::Length(1));

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(rect);

    let explanation = state.session.explanation().unwrap_or_default().to_string();
    frame.render_widget(
        Paragraph::new(explanation)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("AI Analysis")),
        layout[0],
    );

    let language = state
        .session
        .language()
        .map(|language| return language.to_string().to_uppercase())
        .unwrap_or_default();
    let code_title = format!(
        "Generated Code [{language}] - {}",
        state.session.output_filename().unwrap_or_default()
    );
    frame.render_widget(
        Paragraph::new(state.session.code().unwrap_or_default().to_string())
            .scroll((state.code_scroll, 0))
            .block(Block::default().borders(Borders::ALL).title(code_title)),
        layout[1],
    );

    if state.fix_open {
        let fix_rect = layout[2];
        let fix_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Min(5), Constraint::Length(3)])
            .split(fix_rect);

        state.fix_input.set_block(
            Block::default()
                .borders(Borders::ALL)
                .title("Fix instructions (Ctrl+S: send, Esc: cancel)"),
        );
        frame.render_widget(state.fix_input.widget(), fix_layout[0]);

        let mut feedback: Vec<Line> = vec![];
        if let Some(refine_error) = state.session.refine_error() {
            feedback.push(Line::from(Span::styled(
                "Fix instructions could not be applied:",
                error_style(),
            )));
            feedback.push(Line::from(refine_error.to_string()));
        }
        frame.render_widget(
            Paragraph::new(feedback).wrap(Wrap { trim: false }),
            fix_layout[1],
        );
    } else if let Some(refine_error) = state.session.refine_error() {
        // Keep the rejection visible even after the textarea is closed.
        frame.render_widget(
            Paragraph::new(vec![Line::from(Span::styled(
                format!("Fix instructions could not be applied: {refine_error}"),
                error_style(),
            ))]),
            layout[layout.len() - 1],
        );
    }

    let hints = if state.fix_open {
        "Ctrl+S: send fix instructions  Esc: cancel  Ctrl+C: quit"
    } else {
        "f: fix instructions  c: copy  s: save  n: new diagram  Up/Down: scroll  Tab: projects"
    };
    if state.session.refine_error().is_none() || state.fix_open {
        let mut footer: Vec<Line> = vec![];
        if let Some(status) = &state.status {
            footer.push(Line::from(Span::styled(status.to_string(), notice_style())));
        } else {
            footer.push(Line::from(Span::styled(
                hints.to_string(),
                Style::default().fg(Color::DarkGray),
            )));
        }
        frame.render_widget(Paragraph::new(footer), layout[layout.len() - 1]);
    }
}

fn render_projects<B: Backend>(frame: &mut Frame<B>, rect: Rect, state: &mut UiState) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Min(3),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .split(rect);

    if let Some(project) = state.browser.detail_project() {
        let detail_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(6), Constraint::Min(3)])
            .split(layout[0]);

        frame.render_widget(
            Paragraph::new(project.ai_explanation.to_string())
                .wrap(Wrap { trim: false })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!("AI Explanation - {}", project.pdf_filename)),
                ),
            detail_layout[0],
        );
        frame.render_widget(
            Paragraph::new(project.ai_generated_code.to_string())
                .scroll((state.code_scroll, 0))
                .block(Block::default().borders(Borders::ALL).title(format!(
                    "Generated Code [{}] - {}",
                    project.target_language.to_string().to_uppercase(),
                    project.output_filename
                ))),
            detail_layout[1],
        );
    } else if state.browser.is_loading() {
        frame.render_widget(
            Paragraph::new("Loading your projects...").alignment(Alignment::Center),
            layout[0],
        );
    } else if let Some(err) = state.browser.list_error() {
        frame.render_widget(
            Paragraph::new(err.to_string())
                .style(error_style())
                .alignment(Alignment::Center),
            layout[0],
        );
    } else if state.browser.is_empty() {
        frame.render_widget(
            Paragraph::new("No projects yet. Start by generating code from an OPM diagram!")
                .alignment(Alignment::Center),
            layout[0],
        );
    } else {
        let items = state
            .browser
            .projects()
            .iter()
            .map(|project| {
                return ListItem::new(format!(
                    "{}  [{}]  {}  -> {}",
                    project.pdf_filename,
                    project.target_language.to_string().to_uppercase(),
                    project.created_at_display(),
                    project.output_filename,
                ));
            })
            .collect::<Vec<ListItem>>();

        let mut list_state = ListState::default();
        list_state.select(Some(state.browser.selected_index()));

        frame.render_stateful_widget(
            List::new(items)
                .block(Block::default().borders(Borders::ALL).title("My OPM Projects"))
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED)),
            layout[0],
            &mut list_state,
        );
    }

    let mut messages: Vec<Line> = vec![];
    if let Some(project) = state.browser.pending_armed() {
        messages.push(Line::from(Span::styled(
            format!(
                "Delete {}? y: confirm, any other key: cancel",
                project.pdf_filename
            ),
            Style::default().fg(Color::Yellow),
        )));
    }
    if let Some(err) = state.browser.action_error() {
        messages.push(Line::from(Span::styled(err.to_string(), error_style())));
    }
    if let Some(notice) = state.browser.notice() {
        messages.push(Line::from(Span::styled(notice.to_string(), notice_style())));
    }
    frame.render_widget(Paragraph::new(messages), layout[1]);

    let hints = if state.browser.detail_project().is_some() {
        "Esc: back  s: save code  p: save diagram  x: delete  Up/Down: scroll"
    } else {
        "Up/Down: select  Enter: view  s: save code  p: save diagram  x: delete  r: reload  Tab: generator"
    };
    render_hints(frame, layout[2], hints);
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    state: &mut UiState,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut events = EventsService::new(rx);

    loop {
        terminal.draw(|frame| {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![Constraint::Min(1)])
                .split(frame.size());

            match state.screen {
                Screen::Generator => {
                    if state.session.is_waiting() {
                        let title = if state.session.is_refining() {
                            "Applying Your Fix Instructions"
                        } else {
                            "Generating Your Code"
                        };
                        render_loading(frame, layout[0], title, &state.narrator_label);
                    } else if state.session.state() == SessionState::Accepted {
                        render_result(frame, layout[0], state);
                    } else {
                        render_upload(frame, layout[0], state);
                    }
                }
                Screen::Projects => {
                    render_projects(frame, layout[0], state);
                }
            }
        })?;

        match events.next().await? {
            Event::KeyboardCTRLC() => {
                break;
            }
            Event::KeyboardEnter() => {
                if state.handle_enter()? {
                    state.submit_generation(&tx).await?;
                }
            }
            Event::KeyboardPaste(text) => {
                if state.session.is_waiting() {
                    continue;
                }
                if state.screen == Screen::Generator {
                    if state.fix_open {
                        state.fix_input.insert_str(&text);
                    } else if state.session.state() != SessionState::Accepted {
                        state.path_input.insert_str(&text);
                    }
                }
            }
            Event::KeyboardCharInput(input) => {
                // Input is disabled while a request is outstanding; the only
                // action the engine accepts then is quitting.
                if state.session.is_waiting() {
                    continue;
                }

                match state.screen {
                    Screen::Generator => {
                        if state.session.state() == SessionState::Accepted {
                            state.handle_result_key(input, &tx)?;
                        } else {
                            state.handle_upload_key(input, &tx)?;
                        }
                    }
                    Screen::Projects => {
                        state.handle_projects_key(input, &tx)?;
                    }
                }
            }
            Event::UIScrollDown() => {
                state.code_scroll = state.code_scroll.saturating_add(1);
            }
            Event::UIScrollUp() => {
                state.code_scroll = state.code_scroll.saturating_sub(1);
            }
            Event::UITick() => {}
            event => {
                state.handle_engine_event(event, &tx)?;
            }
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    disable_raw_mode().unwrap();
    crossterm::execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture).unwrap();
    crossterm::execute!(io::stdout(), cursor::Show).unwrap();
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    let mut state = UiState::new();
    start_loop(&mut terminal, &mut state, tx, rx).await?;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    return Ok(());
}
