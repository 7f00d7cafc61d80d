//! Image list with pull, inspect and remove.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::Frame;

use super::command::{Command, ImageMsg};
use super::styles;
use super::widgets::{
    render_confirm, render_error, render_loading, ListEntry, ScrollView, SelectList, Spinner,
    TextInput,
};
use super::{Screen, ViewAction, PANE_CHROME};
use crate::cli::format::{format_rfc3339_ago, format_size, format_unix_time_ago};
use crate::docker::{ImageDetails, ImageSummary};

impl ListEntry for ImageSummary {
    fn title(&self) -> String {
        self.display_name()
    }

    fn description(&self) -> Vec<Span<'static>> {
        vec![Span::styled(
            format!(
                "ID: {} • Created: {} • Size: {}",
                self.short_id(),
                format_unix_time_ago(self.created),
                format_size(self.size)
            ),
            styles::subtle(),
        )]
    }
}

#[derive(Debug, Clone)]
pub enum ImageMode {
    List,
    Pull(TextInput),
    Inspect,
    Confirm { id: String, name: String },
}

pub struct ImageView {
    mode: ImageMode,
    list: SelectList<ImageSummary>,
    inspect: ScrollView,
    inspect_title: String,
    loading: bool,
    pane_loading: bool,
    /// References with a pull in flight, in start order
    pulling: Vec<String>,
    error: Option<String>,
    notice: Option<String>,
    spinner: Spinner,
}

impl Default for ImageView {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageView {
    pub fn new() -> Self {
        Self {
            mode: ImageMode::List,
            list: SelectList::new(),
            inspect: ScrollView::default(),
            inspect_title: String::new(),
            loading: false,
            pane_loading: false,
            pulling: Vec::new(),
            error: None,
            notice: None,
            spinner: Spinner::default(),
        }
    }

    pub fn mode(&self) -> &ImageMode {
        &self.mode
    }

    pub fn images(&self) -> &[ImageSummary] {
        self.list.items()
    }

    pub fn inspect(&self) -> &ScrollView {
        &self.inspect
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Inspect fetch in flight
    pub fn is_inspecting(&self) -> bool {
        self.pane_loading
    }

    pub fn pulling(&self) -> &[String] {
        &self.pulling
    }

    fn refresh(&mut self) -> Vec<Command> {
        self.loading = true;
        vec![Command::ListImages]
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> ViewAction {
        if self.list.is_filtering() {
            self.list.handle_key(key);
            return ViewAction::None;
        }

        match key.code {
            KeyCode::Char('r') => return ViewAction::Run(self.refresh()),
            KeyCode::Char('p') => self.mode = ImageMode::Pull(TextInput::new("nginx:latest")),
            KeyCode::Char('i') => {
                if let Some(image) = self.list.selected() {
                    let id = image.id.clone();
                    self.inspect_title = image.display_name();
                    self.inspect.clear();
                    self.mode = ImageMode::Inspect;
                    self.pane_loading = true;
                    return ViewAction::Run(vec![Command::InspectImage(id)]);
                }
            }
            KeyCode::Char('x') | KeyCode::Char('d') => {
                if let Some(image) = self.list.selected() {
                    self.mode = ImageMode::Confirm {
                        id: image.id.clone(),
                        name: image.display_name(),
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

impl Screen for ImageView {
    type Msg = ImageMsg;

    fn init(&mut self) -> Vec<Command> {
        self.mode = ImageMode::List;
        self.error = None;
        self.refresh()
    }

    fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
        self.notice = None;

        if self.error.is_some() {
            return match key.code {
                KeyCode::Char('r') => {
                    self.error = None;
                    self.mode = ImageMode::List;
                    ViewAction::Run(self.refresh())
                }
                KeyCode::Esc | KeyCode::Backspace => {
                    self.error = None;
                    self.mode = ImageMode::List;
                    ViewAction::None
                }
                _ => ViewAction::None,
            };
        }

        match &mut self.mode {
            ImageMode::List => self.handle_list_key(key),
            ImageMode::Pull(input) => match key.code {
                KeyCode::Esc => {
                    self.mode = ImageMode::List;
                    ViewAction::None
                }
                KeyCode::Enter => {
                    let reference = input.value().trim().to_string();
                    self.mode = ImageMode::List;
                    if reference.is_empty() {
                        return ViewAction::None;
                    }
                    tracing::info!("Pulling image {}", reference);
                    self.pulling.push(reference.clone());
                    ViewAction::Run(vec![Command::PullImage(reference)])
                }
                _ => {
                    input.handle_key(key);
                    ViewAction::None
                }
            },
            ImageMode::Inspect => match key.code {
                KeyCode::Esc | KeyCode::Backspace => {
                    self.mode = ImageMode::List;
                    self.pane_loading = false;
                    ViewAction::None
                }
                _ => {
                    self.inspect.handle_key(key);
                    ViewAction::None
                }
            },
            ImageMode::Confirm { id, name } => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    let command = Command::RemoveImage {
                        id: id.clone(),
                        name: name.clone(),
                    };
                    self.mode = ImageMode::List;
                    self.loading = true;
                    ViewAction::Run(vec![command])
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.mode = ImageMode::List;
                    ViewAction::None
                }
                _ => ViewAction::None,
            },
        }
    }

    fn update(&mut self, msg: ImageMsg) -> Vec<Command> {
        match msg {
            ImageMsg::Listed(result) => {
                self.loading = false;
                match result {
                    Ok(images) => self.list.set_items(images),
                    Err(e) => self.error = Some(e.to_string()),
                }
            }
            ImageMsg::Inspected(result) => {
                if !matches!(self.mode, ImageMode::Inspect) {
                    return Vec::new();
                }
                self.pane_loading = false;
                match result {
                    Ok(details) => {
                        self.inspect.set_lines(image_detail_lines(&details));
                        self.inspect.scroll_to_top();
                    }
                    Err(e) => self.error = Some(e.to_string()),
                }
            }
            ImageMsg::Pulled { reference, result } => {
                if let Some(pos) = self.pulling.iter().position(|r| *r == reference) {
                    self.pulling.remove(pos);
                }
                match result {
                    Ok(()) => {
                        self.notice = Some(format!("Pulled {}", reference));
                        return self.refresh();
                    }
                    Err(e) => self.error = Some(e.to_string()),
                }
            }
            ImageMsg::Removed { name, result } => {
                self.loading = false;
                match result {
                    Ok(()) => {
                        self.notice = Some(format!("Removed image {}", name));
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
        matches!(self.mode, ImageMode::Pull(_) | ImageMode::Confirm { .. })
            || self.list.is_filtering()
    }

    fn help(&self) -> &'static str {
        if self.error.is_some() {
            return "r: retry • esc: dismiss";
        }
        match self.mode {
            ImageMode::List if self.list.is_filtering() => "enter: apply filter • esc: clear",
            ImageMode::List => {
                "r: refresh • p: pull • i: inspect • x: remove • /: filter • esc: back"
            }
            ImageMode::Pull(_) => "enter: pull • esc: cancel",
            ImageMode::Inspect => "↑/↓ pgup/pgdn home/end: scroll • esc: back",
            ImageMode::Confirm { .. } => "y: confirm • n/esc: cancel",
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
                "Image Management",
                error,
                "Press r to retry or esc to dismiss",
            );
            return;
        }

        let area = if self.pulling.is_empty() {
            area
        } else {
            let [status, rest] =
                Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);
            let line = Line::from(vec![
                Span::styled(self.spinner.symbol(), styles::label()),
                Span::raw(format!(" Pulling {}...", self.pulling.join(", "))),
            ]);
            frame.render_widget(Paragraph::new(line), status);
            rest
        };

        match &self.mode {
            ImageMode::List | ImageMode::Confirm { .. } => {
                if self.loading && self.list.items().is_empty() {
                    render_loading(frame, area, &self.spinner, "Loading images...");
                } else {
                    self.list.render(frame, area, "Images");
                }
                if let ImageMode::Confirm { name, .. } = &self.mode {
                    render_confirm(
                        frame,
                        area,
                        &format!("Are you sure you want to remove image {}?", name),
                    );
                }
            }
            ImageMode::Pull(input) => {
                let lines = vec![
                    Line::default(),
                    Line::from("Enter image to pull:"),
                    Line::from({
                        let mut spans = vec![Span::raw("  ")];
                        spans.extend(input.line(true).spans);
                        spans
                    }),
                    Line::default(),
                    Line::styled("Press Enter to pull or Esc to cancel", styles::subtle()),
                ];
                let block = Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(styles::focused_border())
                    .title(Span::styled(" Pull Image ", styles::title()));
                frame.render_widget(Paragraph::new(lines).block(block), area);
            }
            ImageMode::Inspect => {
                if self.pane_loading {
                    render_loading(frame, area, &self.spinner, "Inspecting image...");
                } else {
                    self.inspect
                        .render(frame, area, &format!("Image: {}", self.inspect_title));
                }
            }
        }
    }
}

/// Detail pane content for an inspected image
pub fn image_detail_lines(details: &ImageDetails) -> Vec<String> {
    let join_or = |items: &[String], empty: &str| {
        if items.is_empty() {
            empty.to_string()
        } else {
            items.join(" ")
        }
    };

    let mut lines = vec![
        format!("ID:           {}", details.id),
        format!(
            "Created:      {} ({})",
            details.created,
            format_rfc3339_ago(&details.created)
        ),
        format!("Size:         {}", format_size(details.size)),
        format!("Platform:     {}/{}", details.os, details.architecture),
    ];
    if !details.author.is_empty() {
        lines.push(format!("Author:       {}", details.author));
    }
    lines.push(format!(
        "Entrypoint:   {}",
        join_or(&details.entrypoint, "-")
    ));
    lines.push(format!("Command:      {}", join_or(&details.command, "-")));
    if !details.working_dir.is_empty() {
        lines.push(format!("Working dir:  {}", details.working_dir));
    }
    lines.push(format!(
        "Exposed:      {}",
        join_or(&details.exposed_ports, "none")
    ));

    lines.push(String::new());
    lines.push("Tags:".to_string());
    if details.repo_tags.is_empty() {
        lines.push("  <none>".to_string());
    } else {
        lines.extend(details.repo_tags.iter().map(|tag| format!("  {}", tag)));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DockNavError;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    fn image(id: &str, tag: &str) -> ImageSummary {
        ImageSummary {
            id: id.to_string(),
            repo_tags: vec![tag.to_string()],
            created: 0,
            size: 1024 * 1024,
            containers: 0,
        }
    }

    fn loaded_view() -> ImageView {
        let mut view = ImageView::new();
        view.init();
        view.update(ImageMsg::Listed(Ok(vec![
            image("sha256:111111111111aaaa", "nginx:latest"),
            image("sha256:222222222222bbbb", "redis:7"),
        ])));
        view
    }

    #[test]
    fn test_description() {
        let text: String = image("sha256:111111111111aaaa", "nginx:latest")
            .description()
            .iter()
            .map(|s| s.content.to_string())
            .collect();
        assert!(text.starts_with("ID: 111111111111 • Created: "));
        assert!(text.ends_with("Size: 1.0 MiB"));
    }

    #[test]
    fn test_pull_flow() {
        let mut view = loaded_view();
        view.handle_key(key(KeyCode::Char('p')));
        assert!(view.captures_input());

        for c in "alpine:3.19".chars() {
            view.handle_key(key(KeyCode::Char(c)));
        }
        match view.handle_key(key(KeyCode::Enter)) {
            ViewAction::Run(commands) => {
                assert_eq!(commands, vec![Command::PullImage("alpine:3.19".to_string())])
            }
            other => panic!("Expected run, got {:?}", other),
        }
        assert_eq!(view.pulling(), ["alpine:3.19".to_string()]);

        let commands = view.update(ImageMsg::Pulled {
            reference: "alpine:3.19".to_string(),
            result: Ok(()),
        });
        assert_eq!(commands, vec![Command::ListImages]);
        assert!(view.pulling().is_empty());
    }

    fn start_pull(view: &mut ImageView, reference: &str) {
        view.handle_key(key(KeyCode::Char('p')));
        for c in reference.chars() {
            view.handle_key(key(KeyCode::Char(c)));
        }
        view.handle_key(key(KeyCode::Enter));
    }

    #[test]
    fn test_concurrent_pulls_tracked_separately() {
        let mut view = loaded_view();
        start_pull(&mut view, "alpine:3.19");
        start_pull(&mut view, "redis:7");
        assert_eq!(view.pulling().len(), 2);

        view.update(ImageMsg::Pulled {
            reference: "alpine:3.19".to_string(),
            result: Ok(()),
        });
        assert_eq!(view.pulling(), ["redis:7".to_string()]);

        view.update(ImageMsg::Pulled {
            reference: "redis:7".to_string(),
            result: Ok(()),
        });
        assert!(view.pulling().is_empty());
    }

    #[test]
    fn test_list_result_keeps_inspect_spinner() {
        let mut view = loaded_view();
        view.handle_key(key(KeyCode::Char('r')));
        view.handle_key(key(KeyCode::Char('i')));
        view.update(ImageMsg::Listed(Ok(Vec::new())));
        assert!(view.is_inspecting());

        view.update(ImageMsg::Inspected(Ok(ImageDetails::default())));
        assert!(!view.is_inspecting());
    }

    #[test]
    fn test_empty_pull_cancels() {
        let mut view = loaded_view();
        view.handle_key(key(KeyCode::Char('p')));
        assert!(matches!(view.handle_key(key(KeyCode::Enter)), ViewAction::None));
        assert!(matches!(view.mode(), ImageMode::List));
    }

    #[test]
    fn test_remove_with_confirmation() {
        let mut view = loaded_view();
        view.handle_key(key(KeyCode::Down));
        view.handle_key(key(KeyCode::Char('x')));
        match view.handle_key(key(KeyCode::Char('y'))) {
            ViewAction::Run(commands) => assert_eq!(
                commands,
                vec![Command::RemoveImage {
                    id: "sha256:222222222222bbbb".to_string(),
                    name: "redis:7".to_string(),
                }]
            ),
            other => panic!("Expected run, got {:?}", other),
        }

        let commands = view.update(ImageMsg::Removed {
            name: "redis:7".to_string(),
            result: Err(DockNavError::Docker("image is in use".to_string())),
        });
        assert!(commands.is_empty());
        assert_eq!(view.error(), Some("Docker error: image is in use"));
    }

    #[test]
    fn test_inspect_result_after_leaving_is_ignored() {
        let mut view = loaded_view();
        view.handle_key(key(KeyCode::Char('i')));
        view.handle_key(key(KeyCode::Esc));
        view.update(ImageMsg::Inspected(Ok(ImageDetails::default())));
        assert!(matches!(view.mode(), ImageMode::List));
        assert!(view.inspect().lines().is_empty());
    }

    #[test]
    fn test_detail_lines() {
        let details = ImageDetails {
            id: "sha256:abc".to_string(),
            repo_tags: vec!["nginx:latest".to_string()],
            size: 2048,
            os: "linux".to_string(),
            architecture: "amd64".to_string(),
            command: vec!["nginx".to_string(), "-g".to_string()],
            ..ImageDetails::default()
        };
        let lines = image_detail_lines(&details);
        assert!(lines.contains(&"Platform:     linux/amd64".to_string()));
        assert!(lines.contains(&"Size:         2.0 KiB".to_string()));
        assert!(lines.contains(&"Command:      nginx -g".to_string()));
        assert!(lines.contains(&"Exposed:      none".to_string()));
        assert!(lines.contains(&"  nginx:latest".to_string()));
    }
}
