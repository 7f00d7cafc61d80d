//! Volume list with inspect, create and remove.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::text::Span;
use ratatui::Frame;

use super::command::{Command, VolumeMsg};
use super::styles;
use super::widgets::{
    render_confirm, render_error, render_loading, FormOutcome, ListEntry, NameDriverForm,
    ScrollView, SelectList, Spinner,
};
use super::{Screen, ViewAction, PANE_CHROME};
use crate::cli::format::{format_rfc3339_ago, format_size};
use crate::docker::manager::DEFAULT_VOLUME_DRIVER;
use crate::docker::{VolumeDetails, VolumeSummary};

impl ListEntry for VolumeSummary {
    fn title(&self) -> String {
        self.name.clone()
    }

    fn description(&self) -> Vec<Span<'static>> {
        let created = self
            .created_at
            .as_deref()
            .map(format_rfc3339_ago)
            .unwrap_or_else(|| "unknown".to_string());
        vec![Span::styled(
            format!(
                "Driver: {} • Scope: {} • Created: {}",
                self.driver, self.scope, created
            ),
            styles::subtle(),
        )]
    }
}

#[derive(Debug, Clone)]
pub enum VolumeMode {
    List,
    Inspect,
    Create(NameDriverForm),
    Confirm { name: String },
}

pub struct VolumeView {
    mode: VolumeMode,
    list: SelectList<VolumeSummary>,
    inspect: ScrollView,
    inspect_title: String,
    loading: bool,
    pane_loading: bool,
    error: Option<String>,
    notice: Option<String>,
    spinner: Spinner,
}

impl Default for VolumeView {
    fn default() -> Self {
        Self::new()
    }
}

impl VolumeView {
    pub fn new() -> Self {
        Self {
            mode: VolumeMode::List,
            list: SelectList::new(),
            inspect: ScrollView::default(),
            inspect_title: String::new(),
            loading: false,
            pane_loading: false,
            error: None,
            notice: None,
            spinner: Spinner::default(),
        }
    }

    pub fn mode(&self) -> &VolumeMode {
        &self.mode
    }

    pub fn volumes(&self) -> &[VolumeSummary] {
        self.list.items()
    }

    pub fn inspect(&self) -> &ScrollView {
        &self.inspect
    }

    /// Inspect fetch in flight
    pub fn is_inspecting(&self) -> bool {
        self.pane_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn refresh(&mut self) -> Vec<Command> {
        self.loading = true;
        vec![Command::ListVolumes]
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> ViewAction {
        if self.list.is_filtering() {
            self.list.handle_key(key);
            return ViewAction::None;
        }

        match key.code {
            KeyCode::Char('r') => return ViewAction::Run(self.refresh()),
            KeyCode::Char('i') | KeyCode::Enter => {
                if let Some(volume) = self.list.selected() {
                    let name = volume.name.clone();
                    self.inspect_title = name.clone();
                    self.inspect.clear();
                    self.mode = VolumeMode::Inspect;
                    self.pane_loading = true;
                    return ViewAction::Run(vec![Command::InspectVolume(name)]);
                }
            }
            KeyCode::Char('c') => {
                self.mode = VolumeMode::Create(NameDriverForm::new(
                    "Create Volume",
                    "Volume Name",
                    DEFAULT_VOLUME_DRIVER,
                ));
            }
            KeyCode::Char('x') | KeyCode::Char('d') => {
                if let Some(volume) = self.list.selected() {
                    self.mode = VolumeMode::Confirm {
                        name: volume.name.clone(),
                    };
                }
            }
            KeyCode::Esc if !self.list.filter().is_empty() => self.list.clear_filter(),
            KeyCode::Esc | KeyCode::Backspace => return ViewAction::Back,
            _ => {
                self.list.handle_key(key);
            }
        }
        ViewAction::None
    }
}

impl Screen for VolumeView {
    type Msg = VolumeMsg;

    fn init(&mut self) -> Vec<Command> {
        self.mode = VolumeMode::List;
        self.error = None;
        self.refresh()
    }

    fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
        self.notice = None;

        if self.error.is_some() {
            return match key.code {
                KeyCode::Char('r') => {
                    self.error = None;
                    self.mode = VolumeMode::List;
                    ViewAction::Run(self.refresh())
                }
                KeyCode::Esc | KeyCode::Backspace => {
                    self.error = None;
                    self.mode = VolumeMode::List;
                    ViewAction::None
                }
                _ => ViewAction::None,
            };
        }

        match &mut self.mode {
            VolumeMode::List => self.handle_list_key(key),
            VolumeMode::Inspect => match key.code {
                KeyCode::Esc | KeyCode::Backspace => {
                    self.mode = VolumeMode::List;
                    self.pane_loading = false;
                    ViewAction::None
                }
                _ => {
                    self.inspect.handle_key(key);
                    ViewAction::None
                }
            },
            VolumeMode::Create(form) => match form.handle_key(key) {
                FormOutcome::Cancel => {
                    self.mode = VolumeMode::List;
                    ViewAction::None
                }
                FormOutcome::Submit((name, driver)) => {
                    self.mode = VolumeMode::List;
                    self.loading = true;
                    ViewAction::Run(vec![Command::CreateVolume { name, driver }])
                }
                FormOutcome::Pending => ViewAction::None,
            },
            VolumeMode::Confirm { name } => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    let command = Command::RemoveVolume(name.clone());
                    self.mode = VolumeMode::List;
                    self.loading = true;
                    ViewAction::Run(vec![command])
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.mode = VolumeMode::List;
                    ViewAction::None
                }
                _ => ViewAction::None,
            },
        }
    }

    fn update(&mut self, msg: VolumeMsg) -> Vec<Command> {
        match msg {
            VolumeMsg::Listed(result) => {
                self.loading = false;
                match result {
                    Ok(volumes) => self.list.set_items(volumes),
                    Err(e) => self.error = Some(e.to_string()),
                }
            }
            VolumeMsg::Inspected(result) => {
                if !matches!(self.mode, VolumeMode::Inspect) {
                    return Vec::new();
                }
                self.pane_loading = false;
                match result {
                    Ok(details) => {
                        self.inspect.set_lines(volume_detail_lines(&details));
                        self.inspect.scroll_to_top();
                    }
                    Err(e) => self.error = Some(e.to_string()),
                }
            }
            VolumeMsg::Created(result) => {
                self.loading = false;
                match result {
                    Ok(name) => {
                        self.notice = Some(format!("Volume {} created", name));
                        return self.refresh();
                    }
                    Err(e) => self.error = Some(e.to_string()),
                }
            }
            VolumeMsg::Removed { name, result } => {
                self.loading = false;
                match result {
                    Ok(()) => {
                        self.notice = Some(format!("Volume {} removed", name));
                        return self.refresh();
                    }
                    Err(e) => self.error = Some(e.to_string()),
                }
            }
        }
        Vec::new()
    }

    fn tick(&mut self) {
        self.spinner.tick();
    }

    fn resize(&mut self, _width: u16, height: u16) {
        self.inspect
            .set_viewport(height.saturating_sub(PANE_CHROME) as usize);
    }

    fn captures_input(&self) -> bool {
        matches!(self.mode, VolumeMode::Create(_) | VolumeMode::Confirm { .. })
            || self.list.is_filtering()
    }

    fn help(&self) -> &'static str {
        if self.error.is_some() {
            return "r: retry • esc: dismiss";
        }
        match self.mode {
            VolumeMode::List if self.list.is_filtering() => "enter: apply filter • esc: clear",
            VolumeMode::List => {
                "r: refresh • i: inspect • c: create • x/d: remove • /: filter • esc: back"
            }
            VolumeMode::Inspect => "↑/↓ pgup/pgdn home/end: scroll • esc: back",
            VolumeMode::Create(_) => "tab: next field • enter: create • esc: cancel",
            VolumeMode::Confirm { .. } => "y: confirm • n/esc: cancel",
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
                "Volume Management",
                error,
                "Press r to retry or esc to dismiss",
            );
            return;
        }

        match &self.mode {
            VolumeMode::List | VolumeMode::Confirm { .. } => {
                if self.loading && self.list.items().is_empty() {
                    render_loading(frame, area, &self.spinner, "Loading volumes...");
                } else {
                    self.list.render(frame, area, "Volumes");
                }
                if let VolumeMode::Confirm { name } = &self.mode {
                    render_confirm(
                        frame,
                        area,
                        &format!("Are you sure you want to remove volume {}?", name),
                    );
                }
            }
            VolumeMode::Inspect => {
                if self.pane_loading {
                    render_loading(frame, area, &self.spinner, "Inspecting volume...");
                } else {
                    self.inspect.render(
                        frame,
                        area,
                        &format!("Volume Details: {}", self.inspect_title),
                    );
                }
            }
            VolumeMode::Create(form) => form.render(frame, area),
        }
    }
}

fn push_map(lines: &mut Vec<String>, title: &str, map: &std::collections::BTreeMap<String, String>) {
    lines.push(String::new());
    lines.push(format!("{}:", title));
    if map.is_empty() {
        lines.push("  none".to_string());
    }
    lines.extend(map.iter().map(|(k, v)| format!("  {}={}", k, v)));
}

/// Detail pane content for an inspected volume
pub fn volume_detail_lines(details: &VolumeDetails) -> Vec<String> {
    let mut lines = vec![
        format!("Name: {}", details.name),
        format!("Driver: {}", details.driver),
        format!("Mountpoint: {}", details.mountpoint),
        format!("Scope: {}", details.scope),
        format!(
            "Created: {}",
            details.created_at.as_deref().unwrap_or("unknown")
        ),
    ];

    if let Some(size) = details.size {
        lines.push(format!("Size: {}", format_size(size.max(0) as u64)));
    }
    if let Some(count) = details.ref_count {
        lines.push(format!("Used by: {} container(s)", count));
    }

    push_map(&mut lines, "Labels", &details.labels);
    push_map(&mut lines, "Options", &details.options);
    lines
}
