//! Network list with inspect, create and remove.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::text::Span;
use ratatui::Frame;

use super::command::{Command, NetworkMsg};
use super::styles;
use super::widgets::{
    render_confirm, render_error, render_loading, FormOutcome, ListEntry, NameDriverForm,
    ScrollView, SelectList, Spinner,
};
use super::{Screen, ViewAction, PANE_CHROME};
use crate::docker::manager::DEFAULT_NETWORK_DRIVER;
use crate::docker::{short_id, NetworkDetails, NetworkSummary};

impl ListEntry for NetworkSummary {
    fn title(&self) -> String {
        self.name.clone()
    }

    fn description(&self) -> Vec<Span<'static>> {
        vec![Span::styled(
            format!(
                "ID: {} • Driver: {} • Scope: {}",
                self.short_id(),
                self.driver,
                self.scope
            ),
            styles::subtle(),
        )]
    }
}

#[derive(Debug, Clone)]
pub enum NetworkMode {
    List,
    Inspect,
    Create(NameDriverForm),
    Confirm { id: String, name: String },
}

pub struct NetworkView {
    mode: NetworkMode,
    list: SelectList<NetworkSummary>,
    inspect: ScrollView,
    inspect_title: String,
    loading: bool,
    pane_loading: bool,
    error: Option<String>,
    notice: Option<String>,
    spinner: Spinner,
}

impl Default for NetworkView {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkView {
    pub fn new() -> Self {
        Self {
            mode: NetworkMode::List,
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

    pub fn mode(&self) -> &NetworkMode {
        &self.mode
    }

    pub fn networks(&self) -> &[NetworkSummary] {
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
        vec![Command::ListNetworks]
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> ViewAction {
        if self.list.is_filtering() {
            self.list.handle_key(key);
            return ViewAction::None;
        }

        match key.code {
            KeyCode::Char('r') => return ViewAction::Run(self.refresh()),
            KeyCode::Char('i') | KeyCode::Enter => {
                if let Some(network) = self.list.selected() {
                    let id = network.id.clone();
                    self.inspect_title = network.name.clone();
                    self.inspect.clear();
                    self.mode = NetworkMode::Inspect;
                    self.pane_loading = true;
                    return ViewAction::Run(vec![Command::InspectNetwork(id)]);
                }
            }
            KeyCode::Char('c') => {
                self.mode = NetworkMode::Create(NameDriverForm::new(
                    "Create Network",
                    "Network Name",
                    DEFAULT_NETWORK_DRIVER,
                ));
            }
            KeyCode::Char('x') | KeyCode::Char('d') => {
                if let Some(network) = self.list.selected() {
                    self.mode = NetworkMode::Confirm {
                        id: network.id.clone(),
                        name: network.name.clone(),
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

impl Screen for NetworkView {
    type Msg = NetworkMsg;

    fn init(&mut self) -> Vec<Command> {
        self.mode = NetworkMode::List;
        self.error = None;
        self.refresh()
    }

    fn handle_key(&mut self, key: KeyEvent) -> ViewAction {
        self.notice = None;

        if self.error.is_some() {
            return match key.code {
                KeyCode::Char('r') => {
                    self.error = None;
                    self.mode = NetworkMode::List;
                    ViewAction::Run(self.refresh())
                }
                KeyCode::Esc | KeyCode::Backspace => {
                    self.error = None;
                    self.mode = NetworkMode::List;
                    ViewAction::None
                }
                _ => ViewAction::None,
            };
        }

        match &mut self.mode {
            NetworkMode::List => self.handle_list_key(key),
            NetworkMode::Inspect => match key.code {
                KeyCode::Esc | KeyCode::Backspace => {
                    self.mode = NetworkMode::List;
                    self.pane_loading = false;
                    ViewAction::None
                }
                _ => {
                    self.inspect.handle_key(key);
                    ViewAction::None
                }
            },
            NetworkMode::Create(form) => match form.handle_key(key) {
                FormOutcome::Cancel => {
                    self.mode = NetworkMode::List;
                    ViewAction::None
                }
                FormOutcome::Submit((name, driver)) => {
                    self.mode = NetworkMode::List;
                    self.loading = true;
                    ViewAction::Run(vec![Command::CreateNetwork { name, driver }])
                }
                FormOutcome::Pending => ViewAction::None,
            },
            NetworkMode::Confirm { id, name } => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    let command = Command::RemoveNetwork {
                        id: id.clone(),
                        name: name.clone(),
                    };
                    self.mode = NetworkMode::List;
                    self.loading = true;
                    ViewAction::Run(vec![command])
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.mode = NetworkMode::List;
                    ViewAction::None
                }
                _ => ViewAction::None,
            },
        }
    }

    fn update(&mut self, msg: NetworkMsg) -> Vec<Command> {
        match msg {
            NetworkMsg::Listed(result) => {
                self.loading = false;
                match result {
                    Ok(networks) => self.list.set_items(networks),
                    Err(e) => self.error = Some(e.to_string()),
                }
            }
            NetworkMsg::Inspected(result) => {
                if !matches!(self.mode, NetworkMode::Inspect) {
                    return Vec::new();
                }
                self.pane_loading = false;
                match result {
                    Ok(details) => {
                        self.inspect.set_lines(network_detail_lines(&details));
                        self.inspect.scroll_to_top();
                    }
                    Err(e) => self.error = Some(e.to_string()),
                }
            }
            NetworkMsg::Created(result) => {
                self.loading = false;
                match result {
                    Ok(name) => {
                        self.notice = Some(format!("Network {} created", name));
                        return self.refresh();
                    }
                    Err(e) => self.error = Some(e.to_string()),
                }
            }
            NetworkMsg::Removed { name, result } => {
                self.loading = false;
                match result {
                    Ok(()) => {
                        self.notice = Some(format!("Network {} removed", name));
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
        matches!(
            self.mode,
            NetworkMode::Create(_) | NetworkMode::Confirm { .. }
        ) || self.list.is_filtering()
    }

    fn help(&self) -> &'static str {
        if self.error.is_some() {
            return "r: retry • esc: dismiss";
        }
        match self.mode {
            NetworkMode::List if self.list.is_filtering() => "enter: apply filter • esc: clear",
            NetworkMode::List => {
                "r: refresh • i: inspect • c: create • x: remove • /: filter • esc: back"
            }
            NetworkMode::Inspect => "↑/↓ pgup/pgdn home/end: scroll • esc: back",
            NetworkMode::Create(_) => "tab: next field • enter: create • esc: cancel",
            NetworkMode::Confirm { .. } => "y: confirm • n/esc: cancel",
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
                "Network Management",
                error,
                "Press r to retry or esc to dismiss",
            );
            return;
        }

        match &self.mode {
            NetworkMode::List | NetworkMode::Confirm { .. } => {
                if self.loading && self.list.items().is_empty() {
                    render_loading(frame, area, &self.spinner, "Loading networks...");
                } else {
                    self.list.render(frame, area, "Networks");
                }
                if let NetworkMode::Confirm { name, .. } = &self.mode {
                    render_confirm(
                        frame,
                        area,
                        &format!("Are you sure you want to remove network {}?", name),
                    );
                }
            }
            NetworkMode::Inspect => {
                if self.pane_loading {
                    render_loading(frame, area, &self.spinner, "Inspecting network...");
                } else {
                    self.inspect.render(
                        frame,
                        area,
                        &format!("Network Details: {}", self.inspect_title),
                    );
                }
            }
            NetworkMode::Create(form) => form.render(frame, area),
        }
    }
}

/// Detail pane content for an inspected network
pub fn network_detail_lines(details: &NetworkDetails) -> Vec<String> {
    let mut lines = vec![
        format!("Name: {}", details.name),
        format!("ID: {}", details.id),
        format!("Created: {}", details.created),
        format!("Driver: {}", details.driver),
        format!("Scope: {}", details.scope),
        format!("Internal: {}", details.internal),
        format!("Enable IPv6: {}", details.enable_ipv6),
        format!("Attachable: {}", details.attachable),
        format!("Ingress: {}", details.ingress),
        String::new(),
        "IPAM:".to_string(),
        format!("  Driver: {}", details.ipam_driver),
    ];

    for (i, config) in details.ipam_configs.iter().enumerate() {
        lines.push(format!("  Config {}:", i + 1));
        if let Some(subnet) = config.subnet.as_deref().filter(|s| !s.is_empty()) {
            lines.push(format!("    Subnet: {}", subnet));
        }
        if let Some(gateway) = config.gateway.as_deref().filter(|s| !s.is_empty()) {
            lines.push(format!("    Gateway: {}", gateway));
        }
        if let Some(range) = config.ip_range.as_deref().filter(|s| !s.is_empty()) {
            lines.push(format!("    IP Range: {}", range));
        }
    }

    lines.push(String::new());
    lines.push("Containers:".to_string());
    if details.containers.is_empty() {
        lines.push("  No containers connected".to_string());
    }
    for endpoint in &details.containers {
        lines.push(format!("  Container: {}", endpoint.name));
        lines.push(format!("    ID: {}", short_id(&endpoint.container_id)));
        lines.push(format!("    IPv4 Address: {}", endpoint.ipv4_address));
        if let Some(ipv6) = &endpoint.ipv6_address {
            lines.push(format!("    IPv6 Address: {}", ipv6));
        }
        lines.push(format!("    MAC Address: {}", endpoint.mac_address));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docker::{IpamEntry, NetworkEndpoint};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    fn network(id: &str, name: &str) -> NetworkSummary {
        NetworkSummary {
            id: id.to_string(),
            name: name.to_string(),
            driver: "bridge".to_string(),
            scope: "local".to_string(),
        }
    }

    fn loaded_view() -> NetworkView {
        let mut view = NetworkView::new();
        view.init();
        view.update(NetworkMsg::Listed(Ok(vec![
            network("aaaaaaaaaaaaffff", "bridge"),
            network("bbbbbbbbbbbbffff", "backend"),
        ])));
        view
    }

    #[test]
    fn test_create_requires_name_then_submits() {
        let mut view = loaded_view();
        view.handle_key(key(KeyCode::Char('c')));
        assert!(view.captures_input());

        view.handle_key(key(KeyCode::Tab));
        assert!(matches!(view.handle_key(key(KeyCode::Enter)), ViewAction::None));
        assert!(matches!(view.mode(), NetworkMode::Create(_)));

        for c in "frontend".chars() {
            view.handle_key(key(KeyCode::Char(c)));
        }
        view.handle_key(key(KeyCode::Tab));
        match view.handle_key(key(KeyCode::Enter)) {
            ViewAction::Run(commands) => assert_eq!(
                commands,
                vec![Command::CreateNetwork {
                    name: "frontend".to_string(),
                    driver: "bridge".to_string(),
                }]
            ),
            other => panic!("Expected run, got {:?}", other),
        }

        let commands = view.update(NetworkMsg::Created(Ok("frontend".to_string())));
        assert_eq!(commands, vec![Command::ListNetworks]);
        assert_eq!(view.notice(), Some("Network frontend created"));
    }

    #[test]
    fn test_remove_confirmation() {
        let mut view = loaded_view();
        view.handle_key(key(KeyCode::Down));
        view.handle_key(key(KeyCode::Char('x')));
        match view.mode() {
            NetworkMode::Confirm { name, .. } => assert_eq!(name, "backend"),
            other => panic!("Expected confirm, got {:?}", other),
        }
        match view.handle_key(key(KeyCode::Char('y'))) {
            ViewAction::Run(commands) => assert_eq!(
                commands,
                vec![Command::RemoveNetwork {
                    id: "bbbbbbbbbbbbffff".to_string(),
                    name: "backend".to_string(),
                }]
            ),
            other => panic!("Expected run, got {:?}", other),
        }
    }

    #[test]
    fn test_inspect_fills_pane() {
        let mut view = loaded_view();
        match view.handle_key(key(KeyCode::Char('i'))) {
            ViewAction::Run(commands) => assert_eq!(
                commands,
                vec![Command::InspectNetwork("aaaaaaaaaaaaffff".to_string())]
            ),
            other => panic!("Expected run, got {:?}", other),
        }
        view.update(NetworkMsg::Inspected(Ok(NetworkDetails {
            name: "bridge".to_string(),
            ..NetworkDetails::default()
        })));
        assert!(view.inspect().lines().contains(&"Name: bridge".to_string()));
    }

    #[test]
    fn test_list_result_keeps_inspect_spinner() {
        let mut view = loaded_view();
        view.handle_key(key(KeyCode::Char('r')));
        view.handle_key(key(KeyCode::Char('i')));
        view.update(NetworkMsg::Listed(Ok(vec![network("aaaaaaaaaaaaffff", "bridge")])));
        assert!(view.is_inspecting());

        view.update(NetworkMsg::Inspected(Ok(NetworkDetails::default())));
        assert!(!view.is_inspecting());
    }

    #[test]
    fn test_detail_lines_without_containers() {
        let details = NetworkDetails {
            name: "backend".to_string(),
            driver: "bridge".to_string(),
            ipam_driver: "default".to_string(),
            ipam_configs: vec![IpamEntry {
                subnet: Some("172.18.0.0/16".to_string()),
                gateway: Some("172.18.0.1".to_string()),
                ip_range: None,
            }],
            ..NetworkDetails::default()
        };
        let lines = network_detail_lines(&details);
        assert!(lines.contains(&"Internal: false".to_string()));
        assert!(lines.contains(&"  Config 1:".to_string()));
        assert!(lines.contains(&"    Subnet: 172.18.0.0/16".to_string()));
        assert!(!lines.iter().any(|l| l.contains("IP Range")));
        assert!(lines.contains(&"  No containers connected".to_string()));
    }

    #[test]
    fn test_detail_lines_with_container() {
        let details = NetworkDetails {
            containers: vec![NetworkEndpoint {
                container_id: "0123456789abcdef".to_string(),
                name: "web".to_string(),
                ipv4_address: "172.18.0.2/16".to_string(),
                ipv6_address: None,
                mac_address: "02:42:ac:12:00:02".to_string(),
            }],
            ..NetworkDetails::default()
        };
        let lines = network_detail_lines(&details);
        assert!(lines.contains(&"  Container: web".to_string()));
        assert!(lines.contains(&"    ID: 0123456789ab".to_string()));
        assert!(!lines.iter().any(|l| l.contains("IPv6 Address")));
    }
}
