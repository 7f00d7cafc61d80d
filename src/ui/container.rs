//! Container list, logs, inspect, confirm and create states.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::Frame;

use super::command::{Command, ContainerMsg};
use super::container_create::CreateForm;
use super::styles;
use super::widgets::{
    render_confirm, render_error, render_loading, FormOutcome, ListEntry, ScrollView, SelectList,
    Spinner,
};
use super::{Screen, ViewAction, PANE_CHROME};
use crate::cli::format::{format_rfc3339_ago, format_unix_time_ago};
use crate::docker::{short_id, ContainerAction, ContainerDetails, ContainerSummary};

impl ListEntry for ContainerSummary {
    fn title(&self) -> String {
        self.name()
    }

    fn description(&self) -> Vec<Span<'static>> {
        let separator = || Span::styled(" • ", styles::subtle());
        vec![
            Span::styled(self.short_id().to_string(), styles::subtle()),
            separator(),
            Span::raw(self.image.clone()),
            separator(),
            Span::styled(format_unix_time_ago(self.created), styles::subtle()),
            separator(),
            Span::styled(
                self.status.clone(),
                Style::new().fg(styles::state_color(&self.state)),
            ),
        ]
    }
}

/// A lifecycle action waiting for confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAction {
    pub action: ContainerAction,
    pub id: String,
    pub name: String,
}

impl PendingAction {
    pub fn prompt(&self) -> String {
        format!(
            "Are you sure you want to {} container {}?",
            self.action.verb(),
            self.name
        )
    }
}

#[derive(Debug)]
pub enum ContainerMode {
    List,
    Logs,
    Inspect,
    Confirm(PendingAction),
    Create(Box<CreateForm>),
}

pub struct ContainerView {
    mode: ContainerMode,
    list: SelectList<ContainerSummary>,
    logs: ScrollView,
    /// (id, name) of the container whose logs are shown
    logs_target: Option<(String, String)>,
    inspect: ScrollView,
    inspect_title: String,
    show_all: bool,
    log_tail: u32,
    loading: bool,
    /// Logs or inspect fetch in flight
    pane_loading: bool,
    error: Option<String>,
    notice: Option<String>,
    spinner: Spinner,
}

impl ContainerView {
    pub fn new(show_all: bool, log_tail: u32) -> Self {
        Self {
            mode: ContainerMode::List,
            list: SelectList::new(),
            logs: ScrollView::default(),
            logs_target: None,
            inspect: ScrollView::default(),
            inspect_title: String::new(),
            show_all,
            log_tail,
            loading: false,
            pane_loading: false,
            error: None,
            notice: None,
            spinner: Spinner::default(),
        }
    }

    pub fn mode(&self) -> &ContainerMode {
        &self.mode
    }

    pub fn containers(&self) -> &[ContainerSummary] {
        self.list.items()
    }

    pub fn list(&self) -> &SelectList<ContainerSummary> {
        &self.list
    }

    pub fn logs(&self) -> &ScrollView {
        &self.logs
    }

    pub fn inspect(&self) -> &ScrollView {
        &self.inspect
    }

    pub fn show_all(&self) -> bool {
        self.show_all
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading || self.pane_loading
    }

    fn refresh(&mut self) -> Vec<Command> {
        self.loading = true;
        vec![Command::ListContainers { all: self.show_all }]
    }

    fn fetch_logs(&mut self) -> Vec<Command> {
        match &self.logs_target {
            Some((id, _)) => {
                self.pane_loading = true;
                vec![Command::ContainerLogs {
                    id: id.clone(),
                    tail: self.log_tail,
                }]
            }
            None => Vec::new(),
        }
    }

    fn confirm(&mut self, action: ContainerAction) {
        if let Some(container) = self.list.selected() {
            self.mode = ContainerMode::Confirm(PendingAction {
                action,
                id: container.id.clone(),
                name: container.name(),
            });
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> ViewAction {
        if self.list.is_filtering() {
            self.list.handle_key(key);
            return ViewAction::None;
        }

        match key.code {
            KeyCode::Char('r') => return ViewAction::Run(self.refresh()),
            KeyCode::Char('l') => {
                if let Some(container) = self.list.selected() {
                    self.logs_target = Some((container.id.clone(), container.name()));
                    self.logs.clear();
                    self.mode = ContainerMode::Logs;
                    return ViewAction::Run(self.fetch_logs());
                }
            }
            KeyCode::Char('i') => {
                if let Some(container) = self.list.selected() {
                    let id = container.id.clone();
                    self.inspect_title = container.name();
                    self.inspect.clear();
                    self.mode = ContainerMode::Inspect;
                    self.pane_loading = true;
                    return ViewAction::Run(vec![Command::InspectContainer(id)]);
                }
            }
            KeyCode::Char('s') => self.confirm(ContainerAction::Stop),
            KeyCode::Char('a') => self.confirm(ContainerAction::Start),
            KeyCode::Char('t') => self.confirm(ContainerAction::Restart),
            KeyCode::Char('x') => self.confirm(ContainerAction::Remove),
            KeyCode::Char('c') => {
                self.mode = ContainerMode::Create(Box::default());
                return ViewAction::Run(vec![Command::LoadCreateOptions]);
            }
            KeyCode::Char('v') => {
                self.show_all = !self.show_all;
                return ViewAction::Run(self.refresh());
            }
            KeyCode::Esc if !self.list.filter().is_empty() => self.list.clear_filter(),
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('m') => return ViewAction::Back,
            _ => {
                self.list.handle_key(key);
            }
        }
        ViewAction::None
    }

    fn status_line(&self) -> &'static str {
        if self.show_all {
            "Containers (all)"
        } else {
            "Containers (running)"
        }
    }
}

impl Screen for ContainerView {
    type Msg = ContainerMsg;

    fn init(&mut self) -> Vec<Command> {
        self.mode = ContainerMode::List;
        self.error = None;
        self.refresh()
    }

    fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
        self.notice = None;

        if self.error.is_some() {
            return match key.code {
                KeyCode::Char('r') => {
                    self.error = None;
                    self.mode = ContainerMode::List;
                    ViewAction::Run(self.refresh())
                }
                KeyCode::Esc | KeyCode::Backspace => {
                    self.error = None;
                    if matches!(self.mode, ContainerMode::Logs | ContainerMode::Inspect) {
                        self.mode = ContainerMode::List;
                    }
                    ViewAction::None
                }
                _ => ViewAction::None,
            };
        }

        match &mut self.mode {
            ContainerMode::List => self.handle_list_key(key),
            ContainerMode::Confirm(pending) => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    let pending = pending.clone();
                    self.mode = ContainerMode::List;
                    self.loading = true;
                    tracing::info!("{} container {}", pending.action.verb(), pending.name);
                    ViewAction::Run(vec![Command::ContainerAction {
                        action: pending.action,
                        id: pending.id,
                        name: pending.name,
                    }])
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.mode = ContainerMode::List;
                    ViewAction::None
                }
                _ => ViewAction::None,
            },
            ContainerMode::Create(form) => match form.handle_key(key) {
                FormOutcome::Cancel => {
                    self.mode = ContainerMode::List;
                    ViewAction::None
                }
                FormOutcome::Submit(spec) => ViewAction::Run(vec![Command::CreateContainer(spec)]),
                FormOutcome::Pending => ViewAction::None,
            },
            ContainerMode::Logs => match key.code {
                KeyCode::Esc | KeyCode::Backspace => {
                    self.mode = ContainerMode::List;
                    self.pane_loading = false;
                    ViewAction::None
                }
                KeyCode::Char('r') => ViewAction::Run(self.fetch_logs()),
                _ => {
                    self.logs.handle_key(key);
                    ViewAction::None
                }
            },
            ContainerMode::Inspect => match key.code {
                KeyCode::Esc | KeyCode::Backspace => {
                    self.mode = ContainerMode::List;
                    self.pane_loading = false;
                    ViewAction::None
                }
                _ => {
                    self.inspect.handle_key(key);
                    ViewAction::None
                }
            },
        }
    }

    fn update(&mut self, msg: ContainerMsg) -> Vec<Command> {
        match msg {
            ContainerMsg::Listed { all, result } => {
                if all != self.show_all {
                    tracing::debug!("Dropping container list fetched with all={}", all);
                    return Vec::new();
                }
                self.loading = false;
                match result {
                    Ok(containers) => self.list.set_items(containers),
                    Err(e) => self.error = Some(e.to_string()),
                }
            }
            ContainerMsg::Inspected(result) => {
                if !matches!(self.mode, ContainerMode::Inspect) {
                    return Vec::new();
                }
                self.pane_loading = false;
                match result {
                    Ok(details) => {
                        self.inspect.set_lines(container_detail_lines(&details));
                        self.inspect.scroll_to_top();
                    }
                    Err(e) => self.error = Some(e.to_string()),
                }
            }
            ContainerMsg::Logs { id, result } => {
                let current = self.logs_target.as_ref().map(|(target, _)| target.as_str());
                if !matches!(self.mode, ContainerMode::Logs) || current != Some(id.as_str()) {
                    tracing::debug!("Dropping stale logs for {}", short_id(&id));
                    return Vec::new();
                }
                self.pane_loading = false;
                match result {
                    Ok(text) => {
                        self.logs.set_text(&text);
                        self.logs.scroll_to_bottom();
                    }
                    Err(e) => self.error = Some(e.to_string()),
                }
            }
            ContainerMsg::ActionDone {
                action,
                name,
                result,
            } => {
                self.loading = false;
                match result {
                    Ok(()) => {
                        self.notice = Some(format!("Container {} {}", name, action.past_tense()));
                        return self.refresh();
                    }
                    Err(e) => self.error = Some(e.to_string()),
                }
            }
            ContainerMsg::CreateOptions(result) => {
                if let ContainerMode::Create(form) = &mut self.mode {
                    match result {
                        Ok(options) => form.set_options(options),
                        Err(e) => form.set_error(e.to_string()),
                    }
                }
            }
            ContainerMsg::Created(result) => match result {
                Ok(id) => {
                    tracing::info!("Created container {}", short_id(&id));
                    self.mode = ContainerMode::List;
                    self.notice = Some(format!(
                        "Container created successfully with ID: {}",
                        short_id(&id)
                    ));
                    return self.refresh();
                }
                Err(e) => match &mut self.mode {
                    ContainerMode::Create(form) => form.set_error(e.to_string()),
                    _ => self.error = Some(e.to_string()),
                },
            },
        }
        Vec::new()
    }

    fn tick(&mut self) {
        self.spinner.tick();
    }

    fn resize(&mut self, _width: u16, height: u16) {
        let rows = height.saturating_sub(PANE_CHROME) as usize;
        self.logs.set_viewport(rows);
        self.inspect.set_viewport(rows);
    }

    fn captures_input(&self) -> bool {
        matches!(
            self.mode,
            ContainerMode::Confirm(_) | ContainerMode::Create(_)
        ) || self.list.is_filtering()
    }

    fn help(&self) -> &'static str {
        if self.error.is_some() {
            return "r: retry • esc: dismiss";
        }
        match self.mode {
            ContainerMode::List if self.list.is_filtering() => "enter: apply filter • esc: clear",
            ContainerMode::List => {
                "r: refresh • l: logs • i: inspect • s: stop • a: start • t: restart • x: remove • c: create • v: all/running • /: filter • esc: back"
            }
            ContainerMode::Logs => "↑/↓ pgup/pgdn home/end: scroll • r: reload • esc: back",
            ContainerMode::Inspect => "↑/↓ pgup/pgdn home/end: scroll • esc: back",
            ContainerMode::Confirm(_) => "y: confirm • n/esc: cancel",
            ContainerMode::Create(_) => {
                "tab/↓: next • shift-tab/↑: previous • ←/→: choose • enter: next/submit • ctrl-s: submit • esc: cancel"
            }
        }
    }

    fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if let Some(error) = &self.error {
            render_error(
                frame,
                area,
                "Containers",
                error,
                "Press r to retry or esc to dismiss",
            );
            return;
        }

        match &self.mode {
            ContainerMode::List | ContainerMode::Confirm(_) => {
                let title = self.status_line();
                if self.loading && self.list.items().is_empty() {
                    render_loading(frame, area, &self.spinner, "Loading containers...");
                } else {
                    self.list.render(frame, area, title);
                }
                if let ContainerMode::Confirm(pending) = &self.mode {
                    render_confirm(frame, area, &pending.prompt());
                }
            }
            ContainerMode::Logs => {
                let name = self
                    .logs_target
                    .as_ref()
                    .map(|(_, name)| name.clone())
                    .unwrap_or_default();
                if self.pane_loading {
                    render_loading(
                        frame,
                        area,
                        &self.spinner,
                        &format!("Fetching logs for {}...", name),
                    );
                } else {
                    self.logs.render(frame, area, &format!("Logs: {}", name));
                }
            }
            ContainerMode::Inspect => {
                if self.pane_loading {
                    render_loading(frame, area, &self.spinner, "Inspecting container...");
                } else {
                    self.inspect
                        .render(frame, area, &format!("Container: {}", self.inspect_title));
                }
            }
            ContainerMode::Create(form) => form.render(frame, area, &self.spinner),
        }
    }
}

fn push_section(lines: &mut Vec<String>, title: &str, items: &[String], empty: &str) {
    lines.push(String::new());
    lines.push(format!("{}:", title));
    if items.is_empty() {
        lines.push(format!("  {}", empty));
    } else {
        lines.extend(items.iter().map(|item| format!("  {}", item)));
    }
}

/// Detail pane content for an inspected container
pub fn container_detail_lines(details: &ContainerDetails) -> Vec<String> {
    let mut lines = vec![
        format!("Name:          {}", details.name),
        format!("ID:            {}", details.id),
        format!("Image:         {}", details.image),
        format!(
            "Created:       {} ({})",
            details.created,
            format_rfc3339_ago(&details.created)
        ),
        format!("Status:        {}", details.status),
    ];

    if let Some(started_at) = &details.started_at {
        lines.push(format!("Started:       {}", started_at));
    }
    if let Some(code) = details.exit_code {
        lines.push(format!("Exit code:     {}", code));
    }
    lines.push(format!("Restart count: {}", details.restart_count));
    lines.push(format!("Command:       {}", details.command.join(" ")));

    push_section(&mut lines, "Ports", &details.ports, "No ports exposed");
    push_section(&mut lines, "Networks", &details.networks, "Not connected");
    push_section(&mut lines, "Mounts", &details.mounts, "No mounts");
    push_section(&mut lines, "Environment", &details.env, "No variables");
    lines
}
