//! Reusable widgets and their state: spinner, text input, scrollable pane,
//! fuzzy-filtered selection list, the name/driver form and popup helpers.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use nucleo::{Config, Matcher, Utf32Str};
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{
    Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap,
};
use ratatui::Frame;

use super::styles;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[derive(Debug, Clone, Default)]
pub struct Spinner {
    frame: usize,
}

impl Spinner {
    pub fn tick(&mut self) {
        self.frame = (self.frame + 1) % SPINNER_FRAMES.len();
    }

    pub fn symbol(&self) -> &'static str {
        SPINNER_FRAMES[self.frame]
    }
}

/// Single-line text input with a character cursor
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    value: String,
    /// Cursor position in characters
    cursor: usize,
    placeholder: String,
}

impl TextInput {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            ..Self::default()
        }
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.set_value(value);
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let idx = self.byte_index();
        self.value.insert(idx, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let idx = self.byte_index();
        self.value.remove(idx);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let idx = self.byte_index();
            self.value.remove(idx);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    /// Apply an editing key, returning whether it was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            if key.code == KeyCode::Char('u') && key.modifiers == KeyModifiers::CONTROL {
                self.clear();
                return true;
            }
            return false;
        }

        match key.code {
            KeyCode::Char(c) => self.insert_char(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.value.chars().count(),
            _ => return false,
        }
        true
    }

    /// Render as a line; the cursor is drawn as a reversed cell when focused
    pub fn line(&self, focused: bool) -> Line<'static> {
        if self.value.is_empty() && !focused {
            return Line::from(Span::styled(self.placeholder.clone(), styles::subtle()));
        }
        if !focused {
            return Line::from(self.value.clone());
        }
        if self.value.is_empty() {
            return Line::from(vec![
                Span::styled(" ", Style::new().add_modifier(Modifier::REVERSED)),
                Span::styled(self.placeholder.clone(), styles::subtle()),
            ]);
        }

        let idx = self.byte_index();
        let (before, rest) = self.value.split_at(idx);
        let mut chars = rest.chars();
        let under = chars.next().map(String::from).unwrap_or_else(|| " ".to_string());
        Line::from(vec![
            Span::raw(before.to_string()),
            Span::styled(under, Style::new().add_modifier(Modifier::REVERSED)),
            Span::raw(chars.as_str().to_string()),
        ])
    }
}

/// Scrollable read-only text pane
#[derive(Debug, Clone, Default)]
pub struct ScrollView {
    lines: Vec<String>,
    offset: usize,
    height: usize,
}

impl ScrollView {
    pub fn set_lines(&mut self, lines: Vec<String>) {
        self.lines = lines;
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn set_text(&mut self, text: &str) {
        self.set_lines(text.lines().map(str::to_string).collect());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.offset = 0;
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Set the number of visible rows ahead of the next render
    pub fn set_viewport(&mut self, height: usize) {
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    fn max_offset(&self) -> usize {
        self.lines.len().saturating_sub(self.height.max(1))
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    pub fn is_at_bottom(&self) -> bool {
        self.offset >= self.max_offset()
    }

    pub fn scroll_up(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.offset = (self.offset + n).min(self.max_offset());
    }

    fn page(&self) -> usize {
        self.height.max(1)
    }

    /// Apply a scrolling key, returning whether it was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_down(1),
            KeyCode::PageUp => self.scroll_up(self.page()),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_down(self.page()),
            KeyCode::Home | KeyCode::Char('g') => self.scroll_to_top(),
            KeyCode::End | KeyCode::Char('G') => self.scroll_to_bottom(),
            _ => return false,
        }
        true
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, title: &str) {
        self.height = area.height.saturating_sub(2) as usize;
        self.offset = self.offset.min(self.max_offset());

        let end = (self.offset + self.height).min(self.lines.len());
        let visible: Vec<Line> = self.lines[self.offset..end]
            .iter()
            .map(|l| Line::from(l.as_str()))
            .collect();

        let position = if self.lines.is_empty() {
            " empty ".to_string()
        } else {
            format!(" {}-{}/{} ", self.offset + 1, end, self.lines.len())
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(styles::border())
            .title(Span::styled(format!(" {} ", title), styles::title()))
            .title_bottom(Line::from(Span::styled(position, styles::subtle())).right_aligned());

        frame.render_widget(Paragraph::new(visible).block(block), area);
    }
}

/// A row that can be shown in a `SelectList`
pub trait ListEntry {
    fn title(&self) -> String;

    fn description(&self) -> Vec<Span<'static>>;
}

/// Selectable list with an incremental fuzzy filter on titles
pub struct SelectList<T> {
    items: Vec<T>,
    /// Indices into `items` that pass the filter, best match first
    visible: Vec<usize>,
    state: ListState,
    filter: TextInput,
    filtering: bool,
    page: usize,
    matcher: Matcher,
}

impl<T: ListEntry> Default for SelectList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            visible: Vec::new(),
            state: ListState::default(),
            filter: TextInput::new("type to filter"),
            filtering: false,
            page: 5,
            matcher: Matcher::new(Config::DEFAULT),
        }
    }
}

impl<T: ListEntry> SelectList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the items, keeping the selection position where possible
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.apply_filter();
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of rows passing the filter
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    pub fn selected(&self) -> Option<&T> {
        self.state
            .selected()
            .and_then(|pos| self.visible.get(pos))
            .and_then(|&idx| self.items.get(idx))
    }

    /// Selected row position among the visible rows
    pub fn selected_position(&self) -> Option<usize> {
        self.state.selected()
    }

    pub fn filter(&self) -> &str {
        self.filter.value()
    }

    pub fn is_filtering(&self) -> bool {
        self.filtering
    }

    pub fn set_filter(&mut self, needle: &str) {
        self.filter.set_value(needle);
        self.apply_filter();
    }

    pub fn clear_filter(&mut self) {
        self.filter.clear();
        self.filtering = false;
        self.apply_filter();
    }

    fn apply_filter(&mut self) {
        // The matcher folds the haystack only, so the needle goes in lowercase
        let needle = self.filter.value().trim().to_lowercase();
        if needle.is_empty() {
            self.visible = (0..self.items.len()).collect();
        } else {
            let mut needle_buf = Vec::new();
            let needle = Utf32Str::new(&needle, &mut needle_buf);
            let mut scored: Vec<(usize, u16)> = Vec::new();
            for (idx, item) in self.items.iter().enumerate() {
                let title = item.title();
                let mut title_buf = Vec::new();
                let haystack = Utf32Str::new(&title, &mut title_buf);
                if let Some(score) = self.matcher.fuzzy_match(haystack, needle) {
                    scored.push((idx, score));
                }
            }
            // Stable, so equal scores keep list order
            scored.sort_by(|a, b| b.1.cmp(&a.1));
            self.visible = scored.into_iter().map(|(idx, _)| idx).collect();
        }

        if self.visible.is_empty() {
            self.state.select(None);
        } else {
            let pos = self.state.selected().unwrap_or(0).min(self.visible.len() - 1);
            self.state.select(Some(pos));
        }
    }

    fn select_position(&mut self, pos: usize) {
        if !self.visible.is_empty() {
            self.state.select(Some(pos.min(self.visible.len() - 1)));
        }
    }

    pub fn select_next(&mut self) {
        let next = self.state.selected().map_or(0, |p| p + 1);
        self.select_position(next);
    }

    pub fn select_previous(&mut self) {
        let prev = self.state.selected().map_or(0, |p| p.saturating_sub(1));
        self.select_position(prev);
    }

    pub fn select_first(&mut self) {
        self.select_position(0);
    }

    pub fn select_last(&mut self) {
        self.select_position(usize::MAX);
    }

    /// Apply navigation and filter keys, returning whether one was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.filtering {
            match key.code {
                KeyCode::Enter => self.filtering = false,
                KeyCode::Esc => self.clear_filter(),
                KeyCode::Up => self.select_previous(),
                KeyCode::Down => self.select_next(),
                _ => {
                    if self.filter.handle_key(key) {
                        self.apply_filter();
                    }
                }
            }
            return true;
        }

        match key.code {
            KeyCode::Char('/') => self.filtering = true,
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::PageUp => {
                let pos = self.state.selected().unwrap_or(0).saturating_sub(self.page);
                self.select_position(pos);
            }
            KeyCode::PageDown => {
                let pos = self.state.selected().unwrap_or(0) + self.page;
                self.select_position(pos);
            }
            KeyCode::Home | KeyCode::Char('g') => self.select_first(),
            KeyCode::End | KeyCode::Char('G') => self.select_last(),
            _ => return false,
        }
        true
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, title: &str) {
        self.page = (area.height.saturating_sub(2) / 2).max(1) as usize;

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(styles::border())
            .title(Span::styled(
                format!(" {} ({}) ", title, self.visible.len()),
                styles::title(),
            ));

        if self.filtering || !self.filter.is_empty() {
            let mut spans = vec![Span::styled(" / ", styles::label())];
            spans.extend(self.filter.line(self.filtering).spans);
            spans.push(Span::raw(" "));
            block = block.title_bottom(Line::from(spans));
        }

        if self.visible.is_empty() {
            let message = if self.items.is_empty() {
                "Nothing here yet"
            } else {
                "No matches"
            };
            let empty = Paragraph::new(Line::styled(message, styles::subtle()))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let rows: Vec<ListItem> = self
            .visible
            .iter()
            .filter_map(|&idx| self.items.get(idx))
            .map(|item| {
                ListItem::new(Text::from(vec![
                    Line::styled(item.title(), Style::new().add_modifier(Modifier::BOLD)),
                    Line::from(item.description()),
                ]))
            })
            .collect();

        let list = List::new(rows)
            .block(block)
            .highlight_style(styles::selected())
            .highlight_symbol("▌ ");

        frame.render_stateful_widget(list, area, &mut self.state);
    }
}

/// Outcome of feeding a key to a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome<T> {
    Pending,
    Cancel,
    Submit(T),
}

/// Two-field form used to create networks and volumes
#[derive(Debug, Clone)]
pub struct NameDriverForm {
    title: &'static str,
    name: TextInput,
    driver: TextInput,
    focus: usize,
    error: Option<String>,
}

impl NameDriverForm {
    pub fn new(title: &'static str, name_placeholder: &str, default_driver: &str) -> Self {
        Self {
            title,
            name: TextInput::new(name_placeholder),
            driver: TextInput::new(default_driver).with_value(default_driver),
            focus: 0,
            error: None,
        }
    }

    pub fn name(&self) -> &str {
        self.name.value()
    }

    pub fn driver(&self) -> &str {
        self.driver.value()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn submit(&mut self) -> FormOutcome<(String, String)> {
        let name = self.name.value().trim();
        if name.is_empty() {
            self.error = Some("Name is required".to_string());
            self.focus = 0;
            return FormOutcome::Pending;
        }
        FormOutcome::Submit((name.to_string(), self.driver.value().trim().to_string()))
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormOutcome<(String, String)> {
        match key.code {
            KeyCode::Esc => return FormOutcome::Cancel,
            KeyCode::Tab | KeyCode::Down | KeyCode::BackTab | KeyCode::Up => {
                self.focus = 1 - self.focus;
            }
            KeyCode::Enter if self.focus == 0 => self.focus = 1,
            KeyCode::Enter => return self.submit(),
            KeyCode::Char('s') if key.modifiers == KeyModifiers::CONTROL => return self.submit(),
            _ => {
                let input = if self.focus == 0 {
                    &mut self.name
                } else {
                    &mut self.driver
                };
                if input.handle_key(key) {
                    self.error = None;
                }
            }
        }
        FormOutcome::Pending
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let mut lines = Vec::new();
        for (idx, (label, input)) in [("Name", &self.name), ("Driver", &self.driver)]
            .into_iter()
            .enumerate()
        {
            let focused = idx == self.focus;
            let marker = if focused { "> " } else { "  " };
            let label_style = if focused {
                styles::label()
            } else {
                styles::subtle()
            };
            lines.push(Line::from(Span::styled(
                format!("{}{}", marker, label),
                label_style,
            )));
            let mut spans = vec![Span::raw("    ")];
            spans.extend(input.line(focused).spans);
            lines.push(Line::from(spans));
            lines.push(Line::default());
        }

        if let Some(error) = &self.error {
            lines.push(Line::styled(error.clone(), styles::error()));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(styles::focused_border())
            .title(Span::styled(format!(" {} ", self.title), styles::title()));

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

/// Rectangle of `width` percent and `height` rows centered in `area`
pub fn centered_rect(width_percent: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Percentage(width_percent)])
        .flex(Flex::Center)
        .areas(row);
    rect
}

/// Yes/no popup over the current view
pub fn render_confirm(frame: &mut Frame, area: Rect, message: &str) {
    let popup = centered_rect(60, 7, area);
    frame.render_widget(Clear, popup);

    let text = vec![
        Line::default(),
        Line::styled(message.to_string(), styles::warning()),
        Line::default(),
        Line::from(vec![
            Span::styled("y", styles::label()),
            Span::raw(" confirm   "),
            Span::styled("n/esc", styles::label()),
            Span::raw(" cancel"),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(styles::warning())
        .title(Span::styled(" Confirm ", styles::title()));

    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        popup,
    );
}

/// Error box with a hint line
pub fn render_error(frame: &mut Frame, area: Rect, title: &str, message: &str, hint: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(styles::error())
        .title(Span::styled(format!(" {} ", title), styles::title()));

    let text = vec![
        Line::default(),
        Line::styled(format!("Error: {}", message), styles::error()),
        Line::default(),
        Line::styled(hint.to_string(), styles::subtle()),
    ];

    frame.render_widget(
        Paragraph::new(text).wrap(Wrap { trim: false }).block(block),
        area,
    );
}

/// Spinner with a message
pub fn render_loading(frame: &mut Frame, area: Rect, spinner: &Spinner, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(styles::border());
    let line = Line::from(vec![
        Span::styled(spinner.symbol(), styles::label()),
        Span::raw(" "),
        Span::raw(message.to_string()),
    ]);
    frame.render_widget(Paragraph::new(line).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[derive(Debug, Clone)]
    struct Row(&'static str);

    impl ListEntry for Row {
        fn title(&self) -> String {
            self.0.to_string()
        }

        fn description(&self) -> Vec<Span<'static>> {
            vec![Span::raw(format!("row {}", self.0))]
        }
    }

    fn rows() -> Vec<Row> {
        vec![Row("alpha"), Row("beta"), Row("gamma"), Row("delta")]
    }

    #[test]
    fn test_spinner_wraps() {
        let mut spinner = Spinner::default();
        let first = spinner.symbol();
        for _ in 0..SPINNER_FRAMES.len() {
            spinner.tick();
        }
        assert_eq!(spinner.symbol(), first);
    }

    #[test]
    fn test_text_input_editing() {
        let mut input = TextInput::new("name");
        for c in "nginx".chars() {
            input.handle_key(key(KeyCode::Char(c)));
        }
        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Backspace));
        assert_eq!(input.value(), "ngnx");

        input.handle_key(key(KeyCode::Home));
        input.handle_key(key(KeyCode::Delete));
        assert_eq!(input.value(), "gnx");

        input.handle_key(key(KeyCode::End));
        input.handle_key(key(KeyCode::Char('é')));
        assert_eq!(input.value(), "gnxé");

        input.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert!(input.is_empty());
    }

    #[test]
    fn test_text_input_ignores_control_chords() {
        let mut input = TextInput::default();
        assert!(!input.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(input.is_empty());
    }

    #[test]
    fn test_select_list_navigation_clamps() {
        let mut list = SelectList::new();
        list.set_items(rows());
        assert_eq!(list.selected().map(|r| r.0), Some("alpha"));

        list.select_previous();
        assert_eq!(list.selected_position(), Some(0));

        list.select_last();
        assert_eq!(list.selected().map(|r| r.0), Some("delta"));
        list.select_next();
        assert_eq!(list.selected().map(|r| r.0), Some("delta"));

        list.set_items(vec![Row("only")]);
        assert_eq!(list.selected().map(|r| r.0), Some("only"));

        list.set_items(vec![]);
        assert!(list.selected().is_none());
    }

    #[test]
    fn test_select_list_filter() {
        let mut list = SelectList::new();
        list.set_items(rows());

        assert!(list.handle_key(key(KeyCode::Char('/'))));
        assert!(list.is_filtering());
        list.handle_key(key(KeyCode::Char('T')));
        list.handle_key(key(KeyCode::Char('a')));
        assert_eq!(list.filter(), "Ta");
        assert_eq!(list.len(), 2);
        assert_eq!(list.selected().map(|r| r.0), Some("beta"));

        list.handle_key(key(KeyCode::Enter));
        assert!(!list.is_filtering());
        assert_eq!(list.len(), 2);

        list.handle_key(key(KeyCode::Char('/')));
        list.handle_key(key(KeyCode::Esc));
        assert_eq!(list.len(), 4);
        assert_eq!(list.filter(), "");
    }

    #[test]
    fn test_select_list_filter_is_fuzzy_on_titles() {
        let mut list = SelectList::new();
        list.set_items(vec![Row("redis"), Row("nginx"), Row("nginx-proxy")]);

        list.set_filter("ngx");
        assert_eq!(list.len(), 2);
        assert_eq!(list.selected().map(|r| r.0), Some("nginx"));

        // Descriptions read "row <title>", which must not match
        list.set_filter("row");
        assert!(list.is_empty());
        assert!(list.selected().is_none());
    }

    #[test]
    fn test_select_list_orders_by_score() {
        let mut list = SelectList::new();
        list.set_items(vec![Row("wheelbase"), Row("web")]);

        list.set_filter("web");
        assert_eq!(list.len(), 2);
        assert_eq!(list.selected().map(|r| r.0), Some("web"));
    }

    #[test]
    fn test_select_list_unhandled_key() {
        let mut list: SelectList<Row> = SelectList::new();
        assert!(!list.handle_key(key(KeyCode::Char('x'))));
    }

    #[test]
    fn test_scroll_view_bounds() {
        let mut view = ScrollView::default();
        view.set_lines((0..50).map(|i| format!("line {}", i)).collect());

        let backend = TestBackend::new(40, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| view.render(f, f.area(), "Logs"))
            .unwrap();

        view.scroll_to_bottom();
        assert_eq!(view.offset(), 40);
        assert!(view.is_at_bottom());

        view.handle_key(key(KeyCode::PageUp));
        assert_eq!(view.offset(), 30);
        view.handle_key(key(KeyCode::Home));
        assert_eq!(view.offset(), 0);
        view.handle_key(key(KeyCode::Up));
        assert_eq!(view.offset(), 0);
        view.handle_key(key(KeyCode::End));
        assert!(view.is_at_bottom());
    }

    #[test]
    fn test_scroll_view_bottom_before_first_render() {
        let mut view = ScrollView::default();
        view.set_lines((0..30).map(|i| i.to_string()).collect());
        view.scroll_to_bottom();

        let backend = TestBackend::new(20, 7);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| view.render(f, f.area(), "Logs"))
            .unwrap();

        assert!(view.is_at_bottom());
        assert_eq!(view.offset(), 25);
    }

    #[test]
    fn test_name_driver_form() {
        let mut form = NameDriverForm::new("Create Network", "my-network", "bridge");
        assert_eq!(form.driver(), "bridge");

        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormOutcome::Pending);
        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormOutcome::Pending);
        assert_eq!(form.error(), Some("Name is required"));

        for c in "backend".chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
        assert!(form.error().is_none());
        form.handle_key(key(KeyCode::Tab));
        assert_eq!(
            form.handle_key(key(KeyCode::Enter)),
            FormOutcome::Submit(("backend".to_string(), "bridge".to_string()))
        );
        assert_eq!(form.handle_key(key(KeyCode::Esc)), FormOutcome::Cancel);
    }

    #[test]
    fn test_centered_rect_is_inside() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(60, 7, area);
        assert_eq!(rect.width, 60);
        assert_eq!(rect.height, 7);
        assert_eq!(rect.intersection(area), rect);
    }
}
