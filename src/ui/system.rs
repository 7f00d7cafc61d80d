//! Engine overview, disk usage, version and info, plus system prune.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Row, Table, Tabs};
use ratatui::Frame;

use super::command::{Command, SystemMsg};
use super::styles;
use super::widgets::{render_confirm, render_error, render_loading, Spinner};
use super::{Screen, ViewAction};
use crate::cli::format::{format_size, format_unix_time_ago, truncate};
use crate::docker::{DiskUsage, PruneReport, SystemOverview};

const IMAGE_COLUMN_WIDTH: usize = 39;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemTab {
    Overview,
    DiskUsage,
    Version,
    Info,
}

impl SystemTab {
    pub const ALL: [SystemTab; 4] = [
        SystemTab::Overview,
        SystemTab::DiskUsage,
        SystemTab::Version,
        SystemTab::Info,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Overview => "System Overview",
            Self::DiskUsage => "Disk Usage",
            Self::Version => "Version Details",
            Self::Info => "Info Details",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

pub struct SystemView {
    tab: SystemTab,
    overview: Option<SystemOverview>,
    usage: Option<DiskUsage>,
    /// Fetches still in flight
    pending: usize,
    confirm_prune: bool,
    pruning: bool,
    error: Option<String>,
    notice: Option<String>,
    spinner: Spinner,
}

impl Default for SystemView {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemView {
    pub fn new() -> Self {
        Self {
            tab: SystemTab::Overview,
            overview: None,
            usage: None,
            pending: 0,
            confirm_prune: false,
            pruning: false,
            error: None,
            notice: None,
            spinner: Spinner::default(),
        }
    }

    pub fn tab(&self) -> SystemTab {
        self.tab
    }

    pub fn overview(&self) -> Option<&SystemOverview> {
        self.overview.as_ref()
    }

    pub fn usage(&self) -> Option<&DiskUsage> {
        self.usage.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending > 0 || self.pruning
    }

    pub fn is_confirming(&self) -> bool {
        self.confirm_prune
    }

    fn refresh(&mut self) -> Vec<Command> {
        self.pending = 2;
        vec![Command::SystemOverview, Command::DiskUsage]
    }

    fn fetch_done(&mut self) {
        self.pending = self.pending.saturating_sub(1);
    }

    fn render_overview(&self, frame: &mut Frame, area: Rect) {
        let [left, right] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(area);
        let engine = self.overview.as_ref().map(overview_lines).unwrap_or_default();
        let usage = self.usage.as_ref().map(usage_summary_lines).unwrap_or_default();
        render_box(frame, left, "Engine", engine);
        render_box(frame, right, "Disk", usage);
    }

    fn render_disk_usage(&self, frame: &mut Frame, area: Rect) {
        let rows: Vec<Row> = self
            .usage
            .as_ref()
            .map(image_usage_rows)
            .unwrap_or_default()
            .into_iter()
            .map(Row::new)
            .collect();

        let header = Row::new(["IMAGE", "SIZE", "CREATED"]).style(styles::label());
        let table = Table::new(
            rows,
            [
                Constraint::Length(IMAGE_COLUMN_WIDTH as u16 + 1),
                Constraint::Length(20),
                Constraint::Min(20),
            ],
        )
        .header(header)
        .block(pane_block("Images by size"));
        frame.render_widget(table, area);
    }
}

impl Screen for SystemView {
    type Msg = SystemMsg;

    fn init(&mut self) -> Vec<Command> {
        self.error = None;
        self.confirm_prune = false;
        self.refresh()
    }

    fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
        self.notice = None;

        if self.confirm_prune {
            return match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    self.confirm_prune = false;
                    self.pruning = true;
                    ViewAction::Run(vec![Command::PruneSystem])
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.confirm_prune = false;
                    ViewAction::None
                }
                _ => ViewAction::None,
            };
        }

        if self.error.is_some() {
            return match key.code {
                KeyCode::Char('r') => {
                    self.error = None;
                    ViewAction::Run(self.refresh())
                }
                KeyCode::Esc | KeyCode::Backspace => {
                    self.error = None;
                    ViewAction::None
                }
                _ => ViewAction::None,
            };
        }

        match key.code {
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => self.tab = self.tab.next(),
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                self.tab = self.tab.previous()
            }
            KeyCode::Char('r') => return ViewAction::Run(self.refresh()),
            KeyCode::Char('p') if !self.pruning => self.confirm_prune = true,
            KeyCode::Esc | KeyCode::Backspace => return ViewAction::Back,
            _ => {}
        }
        ViewAction::None
    }

    fn update(&mut self, msg: SystemMsg) -> Vec<Command> {
        match msg {
            SystemMsg::Overview(result) => {
                self.fetch_done();
                match result {
                    Ok(overview) => self.overview = Some(overview),
                    Err(e) => self.error = Some(e.to_string()),
                }
            }
            SystemMsg::DiskUsage(result) => {
                self.fetch_done();
                match result {
                    Ok(usage) => self.usage = Some(usage),
                    Err(e) => self.error = Some(e.to_string()),
                }
            }
            SystemMsg::Pruned(result) => {
                self.pruning = false;
                match result {
                    Ok(report) => {
                        tracing::info!("System prune reclaimed {} bytes", report.space_reclaimed);
                        self.notice = Some(prune_notice(&report));
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

    fn resize(&mut self, _width: u16, _height: u16) {}

    fn captures_input(&self) -> bool {
        self.confirm_prune
    }

    fn help(&self) -> &'static str {
        if self.confirm_prune {
            "y: confirm • n/esc: cancel"
        } else if self.error.is_some() {
            "r: retry • esc: dismiss"
        } else {
            "tab/←/→: switch view • r: refresh • p: prune system • esc: back"
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
                "System Management",
                &format!("Error loading system info: {}", error),
                "Press r to retry or esc to dismiss",
            );
            return;
        }

        let [tabs_area, body] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);

        let titles = SystemTab::ALL
            .iter()
            .enumerate()
            .map(|(i, tab)| format!("{}. {}", i + 1, tab.label()));
        let tabs = Tabs::new(titles)
            .select(self.tab.index())
            .style(styles::subtle())
            .highlight_style(styles::selected())
            .divider(" • ");
        frame.render_widget(tabs, tabs_area);

        if self.pruning {
            render_loading(frame, body, &self.spinner, "Pruning system...");
        } else if self.overview.is_none() && self.usage.is_none() && self.pending > 0 {
            render_loading(frame, body, &self.spinner, "Loading system information...");
        } else {
            match self.tab {
                SystemTab::Overview => self.render_overview(frame, body),
                SystemTab::DiskUsage => self.render_disk_usage(frame, body),
                SystemTab::Version => {
                    let lines = self.overview.as_ref().map(version_lines).unwrap_or_default();
                    render_box(frame, body, "Version", lines);
                }
                SystemTab::Info => {
                    let lines = self.overview.as_ref().map(info_lines).unwrap_or_default();
                    render_box(frame, body, "Info", lines);
                }
            }
        }

        if self.confirm_prune {
            render_confirm(
                frame,
                area,
                "Remove all stopped containers, unused networks, dangling images and unused volumes?",
            );
        }
    }
}

fn pane_block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(styles::border())
        .title(Span::styled(format!(" {} ", title), styles::title()))
}

/// `Label: value` lines with the label highlighted
fn render_box(frame: &mut Frame, area: Rect, title: &str, lines: Vec<String>) {
    let text: Vec<Line> = lines
        .into_iter()
        .map(|line| match line.split_once(": ") {
            Some((label, value)) => Line::from(vec![
                Span::styled(format!("{}: ", label), styles::label()),
                Span::raw(value.to_string()),
            ]),
            None => Line::raw(line),
        })
        .collect();
    frame.render_widget(Paragraph::new(text).block(pane_block(title)), area);
}

pub fn overview_lines(overview: &SystemOverview) -> Vec<String> {
    let (version, info) = (&overview.version, &overview.info);
    vec![
        format!("Docker Version: {}", version.version),
        format!("API Version: {}", version.api_version),
        format!("OS/Arch: {}/{}", info.operating_system, info.architecture),
        format!("Kernel: {}", info.kernel_version),
        format!("CPU Cores: {}", info.ncpu),
        format!("Total Memory: {}", format_size(info.mem_total)),
        format!("Storage Driver: {}", info.driver),
    ]
}

pub fn usage_summary_lines(usage: &DiskUsage) -> Vec<String> {
    let images_size: u64 = usage.images.iter().map(|i| i.size).sum();
    vec![
        format!("Images: {}", usage.images.len()),
        format!("Containers: {}", usage.containers),
        format!("Volumes: {}", usage.volumes),
        format!("Total Size: {}", format_size(usage.layers_size)),
        format!("Images Size: {}", format_size(images_size)),
    ]
}

/// One `[image, size, created]` row per image, largest first
pub fn image_usage_rows(usage: &DiskUsage) -> Vec<[String; 3]> {
    let mut images: Vec<_> = usage.images.iter().collect();
    images.sort_by(|a, b| b.size.cmp(&a.size));
    images
        .into_iter()
        .map(|image| {
            [
                truncate(&image.name, IMAGE_COLUMN_WIDTH),
                format_size(image.size),
                format_unix_time_ago(image.created),
            ]
        })
        .collect()
}

pub fn version_lines(overview: &SystemOverview) -> Vec<String> {
    let version = &overview.version;
    vec![
        format!("Version: {}", version.version),
        format!("API Version: {}", version.api_version),
        format!("Min API Version: {}", version.min_api_version),
        format!("Git Commit: {}", version.git_commit),
        format!("Go Version: {}", version.go_version),
        format!("OS/Arch: {}/{}", version.os, version.arch),
        format!("Kernel Version: {}", version.kernel_version),
        format!("Build Time: {}", version.build_time),
    ]
}

pub fn info_lines(overview: &SystemOverview) -> Vec<String> {
    let info = &overview.info;
    vec![
        format!("ID: {}", info.id),
        format!("Name: {}", info.name),
        format!("Containers: {}", info.containers),
        format!("Running: {}", info.containers_running),
        format!("Paused: {}", info.containers_paused),
        format!("Stopped: {}", info.containers_stopped),
        format!("Images: {}", info.images),
        format!("Driver: {}", info.driver),
        format!("Kernel Version: {}", info.kernel_version),
        format!("Operating System: {}", info.operating_system),
        format!("Architecture: {}", info.architecture),
        format!("CPU Cores: {}", info.ncpu),
        format!("Memory: {}", format_size(info.mem_total)),
        format!("Cgroup Driver: {}", info.cgroup_driver),
        format!("Cgroup Version: {}", info.cgroup_version),
    ]
}

pub fn prune_notice(report: &PruneReport) -> String {
    format!(
        "Pruned {} containers, {} images, {} networks, {} volumes • reclaimed {}",
        report.containers_deleted,
        report.images_deleted,
        report.networks_deleted,
        report.volumes_deleted,
        format_size(report.space_reclaimed)
    )
}
