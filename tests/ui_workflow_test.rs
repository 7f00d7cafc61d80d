use std::sync::Mutex;

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use docknav::{
    config::Settings,
    docker::{
        ContainerDetails, ContainerSpec, ContainerSummary, DiskUsage, DockerOperations,
        EngineSummary, ImageDetails, ImageSummary, NetworkDetails, NetworkSummary, PruneReport,
        SystemOverview, VolumeDetails, VolumeSummary,
    },
    ui::{
        command::{execute, Command},
        container::ContainerMode,
        App, Screen, View,
    },
    DockNavError, Result,
};
use ratatui::{backend::TestBackend, Terminal};

// Mock engine recording every mutating call
#[derive(Default)]
struct MockDocker {
    calls: Mutex<Vec<String>>,
    offline: bool,
}

impl MockDocker {
    fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

fn container(id: &str, name: &str, state: &str) -> ContainerSummary {
    ContainerSummary {
        id: id.to_string(),
        names: vec![format!("/{}", name)],
        image: "nginx:latest".to_string(),
        command: "nginx -g 'daemon off;'".to_string(),
        created: 1_700_000_000,
        state: state.to_string(),
        status: "Up 2 hours".to_string(),
        ports: Vec::new(),
    }
}

#[async_trait]
impl DockerOperations for MockDocker {
    async fn engine_summary(&self) -> Result<EngineSummary> {
        if self.offline {
            return Err(DockNavError::Docker(
                "Failed to get engine version: connection refused".to_string(),
            ));
        }
        Ok(EngineSummary {
            server_version: "24.0.7".to_string(),
            api_version: "1.43".to_string(),
            containers: 2,
            images: 1,
        })
    }

    async fn list_containers(&self, all: bool) -> Result<Vec<ContainerSummary>> {
        let mut containers = vec![container("0123456789abcdef", "web", "running")];
        if all {
            containers.push(container("fedcba9876543210", "worker", "exited"));
        }
        Ok(containers)
    }

    async fn inspect_container(&self, container_id: &str) -> Result<ContainerDetails> {
        Ok(ContainerDetails {
            id: container_id.to_string(),
            name: "web".to_string(),
            ..ContainerDetails::default()
        })
    }

    async fn container_logs(&self, _container_id: &str, tail: u32) -> Result<String> {
        Ok((1..=tail.min(50))
            .map(|i| format!("line {}", i))
            .collect::<Vec<_>>()
            .join("\n"))
    }

    async fn start_container(&self, container_id: &str) -> Result<()> {
        self.record(format!("start:{}", container_id));
        Ok(())
    }

    async fn stop_container(&self, container_id: &str) -> Result<()> {
        self.record(format!("stop:{}", container_id));
        Ok(())
    }

    async fn restart_container(&self, container_id: &str) -> Result<()> {
        self.record(format!("restart:{}", container_id));
        Ok(())
    }

    async fn remove_container(&self, container_id: &str) -> Result<()> {
        self.record(format!("remove:{}", container_id));
        Ok(())
    }

    async fn create_container(&self, spec: &ContainerSpec) -> Result<String> {
        self.record(format!(
            "create:{}:{}",
            spec.image,
            spec.name.clone().unwrap_or_default()
        ));
        Ok("1111222233334444".to_string())
    }

    async fn list_images(&self) -> Result<Vec<ImageSummary>> {
        Ok(vec![ImageSummary {
            id: "sha256:aaaabbbbccccdddd".to_string(),
            repo_tags: vec!["nginx:latest".to_string()],
            created: 1_700_000_000,
            size: 187_000_000,
            containers: 1,
        }])
    }

    async fn inspect_image(&self, image_id: &str) -> Result<ImageDetails> {
        Ok(ImageDetails {
            id: image_id.to_string(),
            ..ImageDetails::default()
        })
    }

    async fn pull_image(&self, reference: &str) -> Result<()> {
        self.record(format!("pull:{}", reference));
        Ok(())
    }

    async fn remove_image(&self, image_id: &str) -> Result<()> {
        self.record(format!("rmi:{}", image_id));
        Ok(())
    }

    async fn list_networks(&self) -> Result<Vec<NetworkSummary>> {
        Ok(vec![NetworkSummary {
            id: "9999888877776666".to_string(),
            name: "bridge".to_string(),
            driver: "bridge".to_string(),
            scope: "local".to_string(),
        }])
    }

    async fn inspect_network(&self, network_id: &str) -> Result<NetworkDetails> {
        Ok(NetworkDetails {
            id: network_id.to_string(),
            name: "bridge".to_string(),
            ..NetworkDetails::default()
        })
    }

    async fn create_network(&self, name: &str, driver: &str) -> Result<String> {
        self.record(format!("network:{}:{}", name, driver));
        Ok(name.to_string())
    }

    async fn remove_network(&self, network_id: &str) -> Result<()> {
        self.record(format!("rm-network:{}", network_id));
        Ok(())
    }

    async fn list_volumes(&self) -> Result<Vec<VolumeSummary>> {
        Ok(Vec::new())
    }

    async fn inspect_volume(&self, name: &str) -> Result<VolumeDetails> {
        Ok(VolumeDetails {
            name: name.to_string(),
            ..VolumeDetails::default()
        })
    }

    async fn create_volume(&self, name: &str, driver: &str) -> Result<String> {
        self.record(format!("volume:{}:{}", name, driver));
        Ok(name.to_string())
    }

    async fn remove_volume(&self, name: &str) -> Result<()> {
        self.record(format!("rm-volume:{}", name));
        Ok(())
    }

    async fn system_overview(&self) -> Result<SystemOverview> {
        Ok(SystemOverview::default())
    }

    async fn disk_usage(&self) -> Result<DiskUsage> {
        Ok(DiskUsage::default())
    }

    async fn prune_system(&self) -> Result<PruneReport> {
        self.record("prune".to_string());
        Ok(PruneReport {
            containers_deleted: 1,
            space_reclaimed: 1024 * 1024,
            ..PruneReport::default()
        })
    }
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::from(code)
}

/// Execute commands and every follow-up they trigger
async fn drive(app: &mut App, docker: &MockDocker, mut commands: Vec<Command>) {
    while !commands.is_empty() {
        let mut next = Vec::new();
        for command in commands {
            let message = execute(docker, command).await;
            next.extend(app.update(message));
        }
        commands = next;
    }
}

async fn press(app: &mut App, docker: &MockDocker, code: KeyCode) {
    let commands = app.handle_key(key(code));
    drive(app, docker, commands).await;
}

async fn started_app(docker: &MockDocker) -> App {
    let mut app = App::new(&Settings::default());
    app.resize(100, 30);
    let commands = app.init();
    drive(&mut app, docker, commands).await;
    app
}

fn render(app: &mut App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    terminal.draw(|frame| app.render(frame)).unwrap();
    let buffer = terminal.backend().buffer();
    buffer
        .content
        .chunks(buffer.area.width as usize)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[tokio::test]
async fn test_summary_screen() {
    let docker = MockDocker::default();
    let mut app = started_app(&docker).await;

    let summary = app.summary().unwrap();
    assert_eq!(summary.server_version, "24.0.7");

    let screen = render(&mut app);
    assert!(screen.contains("Docker Version: 24.0.7"));
    assert!(screen.contains("1. Container Management"));
    assert!(screen.contains("5. System Management"));
}

#[tokio::test]
async fn test_offline_engine_shows_hint() {
    let docker = MockDocker::offline();
    let mut app = started_app(&docker).await;

    assert!(app.summary_error().unwrap().contains("connection refused"));
    let screen = render(&mut app);
    assert!(screen.contains("Make sure Docker is running"));
}

#[tokio::test]
async fn test_stop_container_workflow() {
    let docker = MockDocker::default();
    let mut app = started_app(&docker).await;

    press(&mut app, &docker, KeyCode::Char('1')).await;
    assert_eq!(app.view(), View::Containers);
    assert_eq!(app.containers().containers().len(), 2);

    press(&mut app, &docker, KeyCode::Char('s')).await;
    assert!(matches!(app.containers().mode(), ContainerMode::Confirm(_)));
    assert!(render(&mut app).contains("Are you sure you want to stop container web?"));

    press(&mut app, &docker, KeyCode::Char('y')).await;
    assert_eq!(docker.calls(), vec!["stop:0123456789abcdef".to_string()]);
    assert!(render(&mut app).contains("Container web stopped"));
}

#[tokio::test]
async fn test_cancelled_remove_does_nothing() {
    let docker = MockDocker::default();
    let mut app = started_app(&docker).await;

    press(&mut app, &docker, KeyCode::Char('1')).await;
    press(&mut app, &docker, KeyCode::Down).await;
    press(&mut app, &docker, KeyCode::Char('x')).await;
    press(&mut app, &docker, KeyCode::Char('n')).await;

    assert!(matches!(app.containers().mode(), ContainerMode::List));
    assert!(docker.calls().is_empty());
}

#[tokio::test]
async fn test_logs_open_at_newest_line() {
    let docker = MockDocker::default();
    let mut app = started_app(&docker).await;

    press(&mut app, &docker, KeyCode::Char('1')).await;
    press(&mut app, &docker, KeyCode::Char('l')).await;

    assert!(matches!(app.containers().mode(), ContainerMode::Logs));
    assert_eq!(app.containers().logs().lines().len(), 50);
    assert!(app.containers().logs().is_at_bottom());
    assert!(render(&mut app).contains("line 50"));
}

#[tokio::test]
async fn test_toggle_running_only() {
    let docker = MockDocker::default();
    let mut app = started_app(&docker).await;

    press(&mut app, &docker, KeyCode::Char('1')).await;
    press(&mut app, &docker, KeyCode::Char('v')).await;

    assert!(!app.show_all_containers());
    assert_eq!(app.containers().containers().len(), 1);
}

#[tokio::test]
async fn test_create_container_workflow() {
    let docker = MockDocker::default();
    let mut app = started_app(&docker).await;

    press(&mut app, &docker, KeyCode::Char('1')).await;
    press(&mut app, &docker, KeyCode::Char('c')).await;
    assert!(matches!(app.containers().mode(), ContainerMode::Create(_)));

    press(&mut app, &docker, KeyCode::Tab).await;
    for c in "web2".chars() {
        press(&mut app, &docker, KeyCode::Char(c)).await;
    }
    let commands = app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
    drive(&mut app, &docker, commands).await;

    assert_eq!(docker.calls(), vec!["create:nginx:latest:web2".to_string()]);
    assert!(matches!(app.containers().mode(), ContainerMode::List));
    assert!(render(&mut app).contains("Container created successfully with ID: 111122223333"));
}

#[tokio::test]
async fn test_create_network_workflow() {
    let docker = MockDocker::default();
    let mut app = started_app(&docker).await;

    press(&mut app, &docker, KeyCode::Char('3')).await;
    press(&mut app, &docker, KeyCode::Char('c')).await;
    for c in "backend".chars() {
        press(&mut app, &docker, KeyCode::Char(c)).await;
    }
    press(&mut app, &docker, KeyCode::Enter).await;
    press(&mut app, &docker, KeyCode::Enter).await;

    assert_eq!(docker.calls(), vec!["network:backend:bridge".to_string()]);
    assert_eq!(app.networks().notice(), Some("Network backend created"));
}

#[tokio::test]
async fn test_prune_workflow() {
    let docker = MockDocker::default();
    let mut app = started_app(&docker).await;

    press(&mut app, &docker, KeyCode::Char('5')).await;
    press(&mut app, &docker, KeyCode::Char('p')).await;
    assert!(docker.calls().is_empty());

    press(&mut app, &docker, KeyCode::Char('y')).await;
    assert_eq!(docker.calls(), vec!["prune".to_string()]);
    assert!(render(&mut app).contains("reclaimed 1.0 MiB"));
}

#[tokio::test]
async fn test_escape_returns_to_main() {
    let docker = MockDocker::default();
    let mut app = started_app(&docker).await;

    press(&mut app, &docker, KeyCode::Char('2')).await;
    assert_eq!(app.images().images().len(), 1);

    press(&mut app, &docker, KeyCode::Esc).await;
    assert_eq!(app.view(), View::Main);
    assert!(app.summary().is_some());

    press(&mut app, &docker, KeyCode::Char('q')).await;
    assert!(app.should_quit());
}
