//! Form for creating a container from a local image.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::Frame;

use super::command::CreateOptions;
use super::styles;
use super::widgets::{FormOutcome, Spinner, TextInput};
use crate::docker::{ContainerForm, ContainerSpec, RestartPolicy, DEFAULT_NETWORK};

const IMAGE: usize = 0;
const NAME: usize = 1;
const PORTS: usize = 2;
const VOLUMES: usize = 3;
const ENV: usize = 4;
const COMMAND: usize = 5;
const NETWORK: usize = 6;
const RESTART: usize = 7;

#[derive(Debug, Clone)]
struct Choice {
    /// (value, label) pairs
    options: Vec<(String, String)>,
    index: usize,
}

impl Choice {
    fn new(options: Vec<(String, String)>, index: usize) -> Self {
        Self { options, index }
    }

    fn value(&self) -> &str {
        self.options
            .get(self.index)
            .map(|(value, _)| value.as_str())
            .unwrap_or_default()
    }

    fn cycle(&mut self, forward: bool) {
        let len = self.options.len();
        if len == 0 {
            return;
        }
        self.index = if forward {
            (self.index + 1) % len
        } else {
            (self.index + len - 1) % len
        };
    }
}

#[derive(Debug, Clone)]
enum FieldKind {
    Text(TextInput),
    Choice(Choice),
}

#[derive(Debug, Clone)]
struct Field {
    label: &'static str,
    kind: FieldKind,
}

impl Field {
    fn text(label: &'static str, placeholder: &str) -> Self {
        Self {
            label,
            kind: FieldKind::Text(TextInput::new(placeholder)),
        }
    }

    fn choice(label: &'static str, choice: Choice) -> Self {
        Self {
            label,
            kind: FieldKind::Choice(choice),
        }
    }

    fn value(&self) -> String {
        match &self.kind {
            FieldKind::Text(input) => input.value().to_string(),
            FieldKind::Choice(choice) => choice.value().to_string(),
        }
    }
}

fn same_value(values: Vec<String>) -> Vec<(String, String)> {
    values.into_iter().map(|v| (v.clone(), v)).collect()
}

/// Container create form state
#[derive(Debug, Clone)]
pub struct CreateForm {
    fields: Vec<Field>,
    focus: usize,
    loading: bool,
    submitting: bool,
    error: Option<String>,
}

impl Default for CreateForm {
    fn default() -> Self {
        Self::new()
    }
}

impl CreateForm {
    /// New form waiting for its image and network choices
    pub fn new() -> Self {
        let restart = RestartPolicy::ALL
            .iter()
            .map(|p| (p.as_str().to_string(), p.label().to_string()))
            .collect();

        Self {
            fields: vec![
                Field::choice("Image", Choice::new(Vec::new(), 0)),
                Field::text("Container Name", "my-container"),
                Field::text("Ports", "host:container, e.g., 8080:80"),
                Field::text("Volumes", "host:container, e.g., ./data:/data"),
                Field::text("Environment Variables", "KEY=VALUE, KEY2=VALUE2"),
                Field::text("Command", "Command to run, e.g., nginx -g 'daemon off;'"),
                Field::choice(
                    "Network",
                    Choice::new(same_value(vec![DEFAULT_NETWORK.to_string()]), 0),
                ),
                Field::choice("Restart Policy", Choice::new(restart, 0)),
            ],
            focus: IMAGE,
            loading: true,
            submitting: false,
            error: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Fill the image and network choices
    pub fn set_options(&mut self, options: CreateOptions) {
        self.loading = false;

        let mut networks = options.networks;
        if networks.is_empty() {
            networks.push(DEFAULT_NETWORK.to_string());
        }
        let network_index = networks
            .iter()
            .position(|n| n == DEFAULT_NETWORK)
            .unwrap_or(0);

        self.fields[IMAGE].kind = FieldKind::Choice(Choice::new(same_value(options.images), 0));
        self.fields[NETWORK].kind =
            FieldKind::Choice(Choice::new(same_value(networks), network_index));
    }

    /// Show a failure and allow editing again
    pub fn set_error(&mut self, message: String) {
        self.loading = false;
        self.submitting = false;
        self.error = Some(message);
    }

    /// Raw values as typed
    pub fn values(&self) -> ContainerForm {
        ContainerForm {
            image: self.fields[IMAGE].value(),
            name: self.fields[NAME].value(),
            ports: self.fields[PORTS].value(),
            volumes: self.fields[VOLUMES].value(),
            env: self.fields[ENV].value(),
            command: self.fields[COMMAND].value(),
            network: self.fields[NETWORK].value(),
            restart: self.fields[RESTART].value(),
        }
    }

    fn submit(&mut self) -> FormOutcome<ContainerSpec> {
        match ContainerSpec::try_from(&self.values()) {
            Ok(spec) => {
                self.error = None;
                self.submitting = true;
                FormOutcome::Submit(spec)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                FormOutcome::Pending
            }
        }
    }

    fn next_field(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    fn previous_field(&mut self) {
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormOutcome<ContainerSpec> {
        if key.code == KeyCode::Esc {
            return FormOutcome::Cancel;
        }
        if self.submitting {
            return FormOutcome::Pending;
        }

        match key.code {
            KeyCode::Char('s') if key.modifiers == KeyModifiers::CONTROL => return self.submit(),
            KeyCode::Tab | KeyCode::Down => self.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.previous_field(),
            KeyCode::Enter if self.focus == self.fields.len() - 1 => return self.submit(),
            KeyCode::Enter => self.next_field(),
            _ => match &mut self.fields[self.focus].kind {
                FieldKind::Choice(choice) => match key.code {
                    KeyCode::Left | KeyCode::Char('h') => choice.cycle(false),
                    KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => choice.cycle(true),
                    _ => {}
                },
                FieldKind::Text(input) => {
                    if input.handle_key(key) {
                        self.error = None;
                    }
                }
            },
        }
        FormOutcome::Pending
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, spinner: &Spinner) {
        let mut lines = Vec::new();

        if self.loading {
            lines.push(Line::from(vec![
                Span::styled(spinner.symbol(), styles::label()),
                Span::raw(" Loading images and networks..."),
            ]));
            lines.push(Line::default());
        }

        for (idx, field) in self.fields.iter().enumerate() {
            let focused = idx == self.focus;
            let marker = if focused { "> " } else { "  " };
            let label_style = if focused {
                styles::label()
            } else {
                styles::subtle()
            };
            lines.push(Line::from(Span::styled(
                format!("{}{}", marker, field.label),
                label_style,
            )));

            let mut spans = vec![Span::raw("    ")];
            match &field.kind {
                FieldKind::Text(input) => spans.extend(input.line(focused).spans),
                FieldKind::Choice(choice) => match choice.options.get(choice.index) {
                    Some((_, label)) => {
                        let style = if focused {
                            styles::selected()
                        } else {
                            ratatui::style::Style::new()
                        };
                        spans.push(Span::styled(format!("‹ {} ›", label), style));
                        spans.push(Span::styled(
                            format!("  {}/{}", choice.index + 1, choice.options.len()),
                            styles::subtle(),
                        ));
                    }
                    None if idx == IMAGE && !self.loading => spans.push(Span::styled(
                        "No local images, pull one from the Images view",
                        styles::warning(),
                    )),
                    None => spans.push(Span::styled("-", styles::subtle())),
                },
            }
            lines.push(Line::from(spans));
        }

        lines.push(Line::default());
        if self.submitting {
            lines.push(Line::from(vec![
                Span::styled(spinner.symbol(), styles::label()),
                Span::raw(" Creating container..."),
            ]));
        } else if let Some(error) = &self.error {
            lines.push(Line::styled(format!("Error: {}", error), styles::error()));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(styles::focused_border())
            .title(Span::styled(" Create Container ", styles::title()));

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
