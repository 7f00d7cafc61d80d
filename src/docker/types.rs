use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::DockNavError;
use crate::Result;

/// Engine version and resource counts shown on the summary screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineSummary {
    pub server_version: String,
    pub api_version: String,
    pub containers: usize,
    pub images: usize,
}

/// A published or exposed container port
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortMapping {
    pub ip: Option<String>,
    pub private_port: u16,
    pub public_port: Option<u16>,
    pub protocol: String,
}

impl std::fmt::Display for PortMapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.public_port {
            Some(public) => write!(
                f,
                "{}:{}->{}/{}",
                self.ip.as_deref().unwrap_or("0.0.0.0"),
                public,
                self.private_port,
                self.protocol
            ),
            None => write!(f, "{}/{}", self.private_port, self.protocol),
        }
    }
}

/// Represents a container as returned by the list call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSummary {
    pub id: String,
    pub names: Vec<String>,
    pub image: String,
    pub command: String,
    /// Unix timestamp
    pub created: i64,
    pub state: String,
    pub status: String,
    pub ports: Vec<PortMapping>,
}

impl ContainerSummary {
    /// Primary name without the leading slash, or the short id
    pub fn name(&self) -> String {
        self.names
            .first()
            .map(|n| n.trim_start_matches('/').to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| self.short_id().to_string())
    }

    pub fn short_id(&self) -> &str {
        short_id(&self.id)
    }
}

/// Detailed view of a single container
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerDetails {
    pub id: String,
    pub name: String,
    pub image: String,
    pub created: String,
    pub status: String,
    pub started_at: Option<String>,
    pub exit_code: Option<i64>,
    pub restart_count: i64,
    pub command: Vec<String>,
    pub env: Vec<String>,
    pub mounts: Vec<String>,
    pub ports: Vec<String>,
    pub networks: Vec<String>,
}

/// Represents a local image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSummary {
    pub id: String,
    pub repo_tags: Vec<String>,
    /// Unix timestamp
    pub created: i64,
    pub size: u64,
    pub containers: i64,
}

impl ImageSummary {
    /// First usable repository tag, or `<none>:<none>` for dangling images
    pub fn display_name(&self) -> String {
        self.repo_tags
            .first()
            .filter(|tag| tag.as_str() != NONE_TAG)
            .cloned()
            .unwrap_or_else(|| NONE_TAG.to_string())
    }

    pub fn short_id(&self) -> &str {
        short_id(self.id.trim_start_matches("sha256:"))
    }
}

/// Detailed view of a single image
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageDetails {
    pub id: String,
    pub repo_tags: Vec<String>,
    pub created: String,
    pub size: u64,
    pub architecture: String,
    pub os: String,
    pub author: String,
    pub entrypoint: Vec<String>,
    pub command: Vec<String>,
    pub exposed_ports: Vec<String>,
    pub working_dir: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSummary {
    pub id: String,
    pub name: String,
    pub driver: String,
    pub scope: String,
}

impl NetworkSummary {
    pub fn short_id(&self) -> &str {
        short_id(&self.id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IpamEntry {
    pub subnet: Option<String>,
    pub gateway: Option<String>,
    pub ip_range: Option<String>,
}

/// A container attached to a network
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkEndpoint {
    pub container_id: String,
    pub name: String,
    pub ipv4_address: String,
    pub ipv6_address: Option<String>,
    pub mac_address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkDetails {
    pub id: String,
    pub name: String,
    pub created: String,
    pub driver: String,
    pub scope: String,
    pub internal: bool,
    pub enable_ipv6: bool,
    pub attachable: bool,
    pub ingress: bool,
    pub ipam_driver: String,
    pub ipam_configs: Vec<IpamEntry>,
    pub containers: Vec<NetworkEndpoint>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeSummary {
    pub name: String,
    pub driver: String,
    pub mountpoint: String,
    pub created_at: Option<String>,
    pub scope: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VolumeDetails {
    pub name: String,
    pub driver: String,
    pub mountpoint: String,
    pub created_at: Option<String>,
    pub scope: String,
    pub labels: BTreeMap<String, String>,
    pub options: BTreeMap<String, String>,
    /// Size in bytes, when the driver reports usage
    pub size: Option<i64>,
    pub ref_count: Option<i64>,
}

/// Version details reported by the engine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionDetails {
    pub version: String,
    pub api_version: String,
    pub min_api_version: String,
    pub git_commit: String,
    pub go_version: String,
    pub os: String,
    pub arch: String,
    pub kernel_version: String,
    pub build_time: String,
}

/// Host and daemon facts reported by the engine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineInfo {
    pub id: String,
    pub name: String,
    pub containers: i64,
    pub containers_running: i64,
    pub containers_paused: i64,
    pub containers_stopped: i64,
    pub images: i64,
    pub driver: String,
    pub kernel_version: String,
    pub operating_system: String,
    pub architecture: String,
    pub ncpu: i64,
    pub mem_total: u64,
    pub cgroup_driver: String,
    pub cgroup_version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemOverview {
    pub version: VersionDetails,
    pub info: EngineInfo,
}

/// Per-image disk usage row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUsage {
    pub name: String,
    pub size: u64,
    /// Unix timestamp
    pub created: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiskUsage {
    pub layers_size: u64,
    pub images: Vec<ImageUsage>,
    pub containers: usize,
    pub volumes: usize,
}

/// Outcome of a full system prune
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneReport {
    pub containers_deleted: usize,
    pub images_deleted: usize,
    pub networks_deleted: usize,
    pub volumes_deleted: usize,
    pub space_reclaimed: u64,
}

/// Lifecycle actions that can be applied to a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerAction {
    Start,
    Stop,
    Restart,
    Remove,
}

impl ContainerAction {
    /// Verb used in prompts and notices
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Restart => "restart",
            Self::Remove => "remove",
        }
    }

    /// Past tense used in notices
    pub fn past_tense(&self) -> &'static str {
        match self {
            Self::Start => "started",
            Self::Stop => "stopped",
            Self::Restart => "restarted",
            Self::Remove => "removed",
        }
    }
}

/// Container restart policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RestartPolicy {
    #[default]
    No,
    Always,
    OnFailure,
    UnlessStopped,
}

impl RestartPolicy {
    pub const ALL: [RestartPolicy; 4] = [
        RestartPolicy::No,
        RestartPolicy::Always,
        RestartPolicy::OnFailure,
        RestartPolicy::UnlessStopped,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::No => "no",
            Self::Always => "always",
            Self::OnFailure => "on-failure",
            Self::UnlessStopped => "unless-stopped",
        }
    }

    /// Human label shown in the create form
    pub fn label(&self) -> &'static str {
        match self {
            Self::No => "No restart",
            Self::Always => "Always restart",
            Self::OnFailure => "Restart on failure",
            Self::UnlessStopped => "Restart unless stopped",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|policy| policy.as_str() == value.trim())
            .ok_or_else(|| DockNavError::UserInput(format!("unknown restart policy: {}", value)))
    }
}

/// A `host:container[/proto]` port binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortBinding {
    pub host_port: u16,
    pub container_port: u16,
    pub protocol: String,
}

impl PortBinding {
    pub fn parse(binding: &str) -> Result<Self> {
        let binding = binding.trim();
        let invalid = || {
            DockNavError::UserInput(format!(
                "invalid port format: {}, expected host:container",
                binding
            ))
        };

        let parts: Vec<&str> = binding.split(':').collect();
        if parts.len() != 2 {
            return Err(invalid());
        }

        let (container_port, protocol) = match parts[1].split_once('/') {
            Some((port, proto)) if !proto.is_empty() => (port, proto.to_lowercase()),
            Some(_) => return Err(invalid()),
            None => (parts[1], "tcp".to_string()),
        };

        let host_port = parts[0].trim().parse::<u16>().map_err(|_| invalid())?;
        let container_port = container_port.trim().parse::<u16>().map_err(|_| invalid())?;

        Ok(Self {
            host_port,
            container_port,
            protocol,
        })
    }

    /// Engine port key, e.g. `80/tcp`
    pub fn port_key(&self) -> String {
        format!("{}/{}", self.container_port, self.protocol)
    }
}

/// Raw values collected by the container create form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerForm {
    pub image: String,
    pub name: String,
    pub ports: String,
    pub volumes: String,
    pub env: String,
    pub command: String,
    pub network: String,
    pub restart: String,
}

/// Validated description of a container to create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSpec {
    pub image: String,
    pub name: Option<String>,
    pub ports: Vec<PortBinding>,
    pub binds: Vec<String>,
    pub env: Vec<String>,
    pub cmd: Vec<String>,
    pub network: String,
    pub restart_policy: RestartPolicy,
}

impl TryFrom<&ContainerForm> for ContainerSpec {
    type Error = DockNavError;

    fn try_from(form: &ContainerForm) -> Result<Self> {
        let image = form.image.trim();
        if image.is_empty() {
            return Err(DockNavError::UserInput("an image is required".to_string()));
        }

        let ports = split_list(&form.ports)
            .iter()
            .map(|binding| PortBinding::parse(binding))
            .collect::<Result<Vec<_>>>()?;

        let name = Some(form.name.trim().to_string()).filter(|n| !n.is_empty());
        let network = match form.network.trim() {
            "" => DEFAULT_NETWORK.to_string(),
            other => other.to_string(),
        };
        let restart_policy = match form.restart.trim() {
            "" => RestartPolicy::No,
            other => RestartPolicy::parse(other)?,
        };

        Ok(Self {
            image: image.to_string(),
            name,
            ports,
            binds: split_list(&form.volumes),
            env: split_list(&form.env),
            cmd: form.command.split_whitespace().map(str::to_string).collect(),
            network,
            restart_policy,
        })
    }
}

/// Network used when the form leaves it blank
pub const DEFAULT_NETWORK: &str = "bridge";

/// Tag shown for dangling images
pub const NONE_TAG: &str = "<none>:<none>";

/// First 12 characters of an engine id
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(12) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

/// Split an image reference into repository and tag.
///
/// The tag separator is the last `:` after the last `/`, so registry ports
/// (`localhost:5000/app`) are kept in the repository. Digest references
/// (`nginx@sha256:...`) are returned whole with an empty tag.
pub fn split_image_reference(reference: &str) -> (String, String) {
    let reference = reference.trim();
    if reference.contains('@') {
        return (reference.to_string(), String::new());
    }
    let name_start = reference.rfind('/').map(|i| i + 1).unwrap_or(0);
    match reference[name_start..].rfind(':') {
        Some(pos) => {
            let split = name_start + pos;
            (
                reference[..split].to_string(),
                reference[split + 1..].to_string(),
            )
        }
        None => (reference.to_string(), "latest".to_string()),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container(names: Vec<&str>, id: &str) -> ContainerSummary {
        ContainerSummary {
            id: id.to_string(),
            names: names.into_iter().map(str::to_string).collect(),
            image: "nginx:latest".to_string(),
            command: String::new(),
            created: 0,
            state: "running".to_string(),
            status: "Up 2 minutes".to_string(),
            ports: vec![],
        }
    }

    #[test]
    fn test_container_name_strips_slash() {
        let c = container(vec!["/web"], "0123456789abcdef");
        assert_eq!(c.name(), "web");
        assert_eq!(c.short_id(), "0123456789ab");
    }

    #[test]
    fn test_container_without_names_uses_short_id() {
        let c = container(vec![], "0123456789abcdef");
        assert_eq!(c.name(), "0123456789ab");
    }

    #[test]
    fn test_image_display_name_and_short_id() {
        let mut image = ImageSummary {
            id: "sha256:abcdef0123456789ffff".to_string(),
            repo_tags: vec!["nginx:latest".to_string()],
            created: 0,
            size: 0,
            containers: 0,
        };
        assert_eq!(image.display_name(), "nginx:latest");
        assert_eq!(image.short_id(), "abcdef012345");

        image.repo_tags = vec![NONE_TAG.to_string()];
        assert_eq!(image.display_name(), NONE_TAG);

        image.repo_tags.clear();
        assert_eq!(image.display_name(), NONE_TAG);
    }

    #[test]
    fn test_short_id_of_short_value() {
        assert_eq!(short_id("abc"), "abc");
    }

    #[test]
    fn test_split_image_reference() {
        assert_eq!(
            split_image_reference("nginx:1.25"),
            ("nginx".to_string(), "1.25".to_string())
        );
        assert_eq!(
            split_image_reference("nginx"),
            ("nginx".to_string(), "latest".to_string())
        );
        assert_eq!(
            split_image_reference("localhost:5000/team/app"),
            ("localhost:5000/team/app".to_string(), "latest".to_string())
        );
        assert_eq!(
            split_image_reference("localhost:5000/app:v2"),
            ("localhost:5000/app".to_string(), "v2".to_string())
        );
    }

    #[test]
    fn test_split_digest_reference() {
        assert_eq!(
            split_image_reference("nginx@sha256:0123456789abcdef"),
            ("nginx@sha256:0123456789abcdef".to_string(), String::new())
        );
        assert_eq!(
            split_image_reference("localhost:5000/app:v2@sha256:abcdef"),
            ("localhost:5000/app:v2@sha256:abcdef".to_string(), String::new())
        );
    }

    #[test]
    fn test_port_binding_defaults_to_tcp() {
        let binding = PortBinding::parse(" 8080:80 ").unwrap();
        assert_eq!(binding.host_port, 8080);
        assert_eq!(binding.container_port, 80);
        assert_eq!(binding.port_key(), "80/tcp");
    }

    #[test]
    fn test_port_binding_with_protocol() {
        let binding = PortBinding::parse("5353:53/UDP").unwrap();
        assert_eq!(binding.port_key(), "53/udp");
    }

    #[test]
    fn test_port_binding_rejects_bad_input() {
        for bad in ["8080", "1:2:3", "abc:80", "80:xyz", "80:53/"] {
            let err = PortBinding::parse(bad).unwrap_err();
            assert!(err.to_string().contains(bad), "{}", err);
        }
    }

    #[test]
    fn test_spec_from_form() {
        let form = ContainerForm {
            image: "nginx:latest".to_string(),
            name: " web ".to_string(),
            ports: "8080:80, 8443:443".to_string(),
            volumes: "./data:/data, ".to_string(),
            env: "A=1, B=2".to_string(),
            command: "nginx -g daemon off;".to_string(),
            network: String::new(),
            restart: "unless-stopped".to_string(),
        };

        let spec = ContainerSpec::try_from(&form).unwrap();
        assert_eq!(spec.name.as_deref(), Some("web"));
        assert_eq!(spec.ports.len(), 2);
        assert_eq!(spec.binds, vec!["./data:/data".to_string()]);
        assert_eq!(spec.env, vec!["A=1".to_string(), "B=2".to_string()]);
        assert_eq!(spec.cmd, vec!["nginx", "-g", "daemon", "off;"]);
        assert_eq!(spec.network, DEFAULT_NETWORK);
        assert_eq!(spec.restart_policy, RestartPolicy::UnlessStopped);
    }

    #[test]
    fn test_spec_requires_image() {
        let form = ContainerForm::default();
        assert!(ContainerSpec::try_from(&form).is_err());
    }

    #[test]
    fn test_spec_propagates_port_error() {
        let form = ContainerForm {
            image: "redis".to_string(),
            ports: "6379".to_string(),
            ..ContainerForm::default()
        };
        let err = ContainerSpec::try_from(&form).unwrap_err();
        assert!(err.to_string().contains("invalid port format: 6379"));
    }

    #[test]
    fn test_restart_policy_parse() {
        assert_eq!(RestartPolicy::parse("always").unwrap(), RestartPolicy::Always);
        assert!(RestartPolicy::parse("sometimes").is_err());
    }

    #[test]
    fn test_port_mapping_display() {
        let published = PortMapping {
            ip: None,
            private_port: 80,
            public_port: Some(8080),
            protocol: "tcp".to_string(),
        };
        assert_eq!(published.to_string(), "0.0.0.0:8080->80/tcp");

        let exposed = PortMapping {
            public_port: None,
            ..published
        };
        assert_eq!(exposed.to_string(), "80/tcp");
    }
}
