//! Top-level router: the summary screen plus the five resource views.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Tabs};
use ratatui::Frame;
use tracing::debug;

use super::command::{Command, Message};
use super::container::ContainerView;
use super::image::ImageView;
use super::network::NetworkView;
use super::styles;
use super::system::SystemView;
use super::volume::VolumeView;
use super::widgets::{render_error, render_loading, Spinner};
use super::{Screen, ViewAction};
use crate::config::Settings;
use crate::docker::EngineSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Main,
    Containers,
    Images,
    Networks,
    Volumes,
    System,
}

impl View {
    pub const ALL: [View; 6] = [
        View::Main,
        View::Containers,
        View::Images,
        View::Networks,
        View::Volumes,
        View::System,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Main => "Main",
            Self::Containers => "Container Management",
            Self::Images => "Image Management",
            Self::Networks => "Network Management",
            Self::Volumes => "Volume Management",
            Self::System => "System Management",
        }
    }

    fn tab_label(&self) -> &'static str {
        match self {
            Self::Main => "0 Main",
            Self::Containers => "1 Containers",
            Self::Images => "2 Images",
            Self::Networks => "3 Networks",
            Self::Volumes => "4 Volumes",
            Self::System => "5 System",
        }
    }

    fn from_digit(c: char) -> Option<Self> {
        match c {
            '0' => Some(Self::Main),
            '1' => Some(Self::Containers),
            '2' => Some(Self::Images),
            '3' => Some(Self::Networks),
            '4' => Some(Self::Volumes),
            '5' => Some(Self::System),
            _ => None,
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|v| v == self).unwrap_or(0)
    }
}

/// Run `$body` against the active resource view bound as `$screen`
macro_rules! with_active {
    ($app:expr, $screen:ident => $body:expr, else $main:expr) => {
        match $app.view {
            View::Main => $main,
            View::Containers => {
                let $screen = &mut $app.containers;
                $body
            }
            View::Images => {
                let $screen = &mut $app.images;
                $body
            }
            View::Networks => {
                let $screen = &mut $app.networks;
                $body
            }
            View::Volumes => {
                let $screen = &mut $app.volumes;
                $body
            }
            View::System => {
                let $screen = &mut $app.system;
                $body
            }
        }
    };
}

#[derive(Debug, Default)]
enum SummaryState {
    #[default]
    Loading,
    Ready(EngineSummary),
    Failed(String),
}

pub struct App {
    view: View,
    summary: SummaryState,
    containers: ContainerView,
    images: ImageView,
    networks: NetworkView,
    volumes: VolumeView,
    system: SystemView,
    spinner: Spinner,
    width: u16,
    height: u16,
    should_quit: bool,
}

impl App {
    pub fn new(settings: &Settings) -> Self {
        Self {
            view: View::Main,
            summary: SummaryState::Loading,
            containers: ContainerView::new(settings.show_all_containers, settings.log_tail),
            images: ImageView::new(),
            networks: NetworkView::new(),
            volumes: VolumeView::new(),
            system: SystemView::new(),
            spinner: Spinner::default(),
            width: 0,
            height: 0,
            should_quit: false,
        }
    }

    pub fn init(&mut self) -> Vec<Command> {
        self.summary = SummaryState::Loading;
        vec![Command::FetchSummary]
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Current containers "show all" toggle, persisted on exit
    pub fn show_all_containers(&self) -> bool {
        self.containers.show_all()
    }

    pub fn summary(&self) -> Option<&EngineSummary> {
        match &self.summary {
            SummaryState::Ready(summary) => Some(summary),
            _ => None,
        }
    }

    pub fn summary_error(&self) -> Option<&str> {
        match &self.summary {
            SummaryState::Failed(error) => Some(error),
            _ => None,
        }
    }

    pub fn containers(&self) -> &ContainerView {
        &self.containers
    }

    pub fn images(&self) -> &ImageView {
        &self.images
    }

    pub fn networks(&self) -> &NetworkView {
        &self.networks
    }

    pub fn volumes(&self) -> &VolumeView {
        &self.volumes
    }

    pub fn system(&self) -> &SystemView {
        &self.system
    }

    pub fn handle_event(&mut self, event: Event) -> Vec<Command> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Resize(width, height) => {
                self.resize(width, height);
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Command> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return Vec::new();
        }

        let capturing = with_active!(self, screen => screen.captures_input(), else false);
        if !capturing {
            match key.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    return Vec::new();
                }
                KeyCode::Char(c) => {
                    if let Some(target) = View::from_digit(c) {
                        return self.switch_to(target);
                    }
                }
                _ => {}
            }
        }

        let action = with_active!(self, screen => screen.handle_key(key), else {
            return self.handle_main_key(key);
        });

        match action {
            ViewAction::None => Vec::new(),
            ViewAction::Back => self.switch_to(View::Main),
            ViewAction::Run(commands) => commands,
        }
    }

    fn handle_main_key(&mut self, key: KeyEvent) -> Vec<Command> {
        match key.code {
            KeyCode::Char('r') => self.init(),
            _ => Vec::new(),
        }
    }

    fn switch_to(&mut self, target: View) -> Vec<Command> {
        if target == self.view && target == View::Main {
            return Vec::new();
        }
        debug!("Switching to {:?}", target);
        self.view = target;
        with_active!(self, screen => screen.init(), else self.init())
    }

    /// Route an engine result to the model that owns the resource
    pub fn update(&mut self, message: Message) -> Vec<Command> {
        match message {
            Message::Summary(result) => {
                self.summary = match result {
                    Ok(summary) => SummaryState::Ready(summary),
                    Err(e) => {
                        tracing::warn!("Failed to fetch engine summary: {}", e);
                        SummaryState::Failed(e.to_string())
                    }
                };
                Vec::new()
            }
            Message::Container(msg) => self.containers.update(msg),
            Message::Image(msg) => self.images.update(msg),
            Message::Network(msg) => self.networks.update(msg),
            Message::Volume(msg) => self.volumes.update(msg),
            Message::System(msg) => self.system.update(msg),
        }
    }

    pub fn tick(&mut self) {
        self.spinner.tick();
        self.containers.tick();
        self.images.tick();
        self.networks.tick();
        self.volumes.tick();
        self.system.tick();
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.containers.resize(width, height);
        self.images.resize(width, height);
        self.networks.resize(width, height);
        self.volumes.resize(width, height);
        self.system.resize(width, height);
    }

    fn help(&mut self) -> &'static str {
        with_active!(self, screen => screen.help(), else {
            "1-5: open view • r: refresh • q: quit"
        })
    }

    fn notice(&mut self) -> Option<String> {
        with_active!(self, screen => screen.notice().map(str::to_string), else None)
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let [header, body, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let tabs = Tabs::new(View::ALL.iter().map(View::tab_label))
            .select(self.view.index())
            .style(styles::subtle())
            .highlight_style(styles::selected())
            .divider(" ");
        frame.render_widget(tabs, header);

        with_active!(self, screen => screen.render(frame, body), else self.render_main(frame, body));

        let footer_line = match self.notice() {
            Some(notice) => Line::styled(notice, styles::success()),
            None => Line::styled(self.help(), styles::subtle()),
        };
        frame.render_widget(Paragraph::new(footer_line), footer);
    }

    fn render_main(&self, frame: &mut Frame, area: Rect) {
        let summary = match &self.summary {
            SummaryState::Loading => {
                render_loading(frame, area, &self.spinner, "Loading Docker information...");
                return;
            }
            SummaryState::Failed(error) => {
                render_error(
                    frame,
                    area,
                    "Error connecting to Docker",
                    error,
                    "Make sure Docker is running and try again. Press r to retry or q to quit.",
                );
                return;
            }
            SummaryState::Ready(summary) => summary,
        };

        let [info_area, menu_area] =
            Layout::vertical([Constraint::Length(6), Constraint::Min(0)]).areas(area);

        let field = |label: &str, value: String| {
            Line::from(vec![
                Span::styled(format!("{}: ", label), styles::label()),
                Span::raw(value),
            ])
        };
        let info = vec![
            field("Docker Version", summary.server_version.clone()),
            field("API Version", summary.api_version.clone()),
            field("Containers", summary.containers.to_string()),
            field("Images", summary.images.to_string()),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(styles::border())
            .title(Span::styled(" DockNav - Main Menu ", styles::title()));
        frame.render_widget(Paragraph::new(info).block(block), info_area);

        let menu: Vec<Line> = View::ALL[1..]
            .iter()
            .enumerate()
            .map(|(i, view)| {
                Line::from(vec![
                    Span::styled(format!("{}. ", i + 1), styles::label()),
                    Span::raw(view.title()),
                ])
            })
            .collect();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(styles::border());
        frame.render_widget(Paragraph::new(menu).block(block), menu_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DockNavError;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    fn app() -> App {
        let mut app = App::new(&Settings::default());
        app.init();
        app
    }

    #[test]
    fn test_number_keys_open_views() {
        let mut app = app();
        assert_eq!(
            app.handle_key(key(KeyCode::Char('1'))),
            vec![Command::ListContainers { all: true }]
        );
        assert_eq!(app.view(), View::Containers);

        assert_eq!(
            app.handle_key(key(KeyCode::Char('3'))),
            vec![Command::ListNetworks]
        );
        assert_eq!(
            app.handle_key(key(KeyCode::Char('5'))),
            vec![Command::SystemOverview, Command::DiskUsage]
        );
        assert_eq!(app.handle_key(key(KeyCode::Char('0'))), vec![Command::FetchSummary]);
        assert_eq!(app.view(), View::Main);
    }

    #[test]
    fn test_back_refreshes_summary() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('2')));
        assert_eq!(app.handle_key(key(KeyCode::Esc)), vec![Command::FetchSummary]);
        assert_eq!(app.view(), View::Main);
    }

    #[test]
    fn test_global_keys_ignored_while_capturing() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('4')));
        app.handle_key(key(KeyCode::Char('c')));
        assert!(app.volumes().captures_input());

        app.handle_key(key(KeyCode::Char('q')));
        app.handle_key(key(KeyCode::Char('1')));
        assert!(!app.should_quit());
        assert_eq!(app.view(), View::Volumes);

        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());
    }

    #[test]
    fn test_summary_error_and_retry() {
        let mut app = app();
        app.update(Message::Summary(Err(DockNavError::Docker(
            "Failed to get engine version: connection refused".to_string(),
        ))));
        assert!(app.summary_error().is_some());
        assert_eq!(app.handle_key(key(KeyCode::Char('r'))), vec![Command::FetchSummary]);
        assert!(app.summary_error().is_none());
    }

    #[test]
    fn test_results_routed_by_resource() {
        use super::super::command::NetworkMsg;

        let mut app = app();
        app.update(Message::Network(NetworkMsg::Listed(Ok(vec![
            crate::docker::NetworkSummary {
                id: "abc".to_string(),
                name: "bridge".to_string(),
                driver: "bridge".to_string(),
                scope: "local".to_string(),
            },
        ]))));
        assert_eq!(app.view(), View::Main);
        assert_eq!(app.networks().networks().len(), 1);
    }

    #[test]
    fn test_release_events_ignored() {
        let mut app = app();
        let mut release = key(KeyCode::Char('q'));
        release.kind = KeyEventKind::Release;
        assert!(app.handle_event(Event::Key(release)).is_empty());
        assert!(!app.should_quit());
    }
}
