use async_trait::async_trait;
use bollard::container::{
    Config, CreateContainerOptions, InspectContainerOptions, ListContainersOptions, LogsOptions,
    NetworkingConfig, PruneContainersOptions, RemoveContainerOptions, RestartContainerOptions,
    StartContainerOptions, StopContainerOptions,
};
use bollard::image::{CreateImageOptions, ListImagesOptions, PruneImagesOptions};
use bollard::models::{
    EndpointSettings, HostConfig, RestartPolicy as EngineRestartPolicy, RestartPolicyNameEnum,
};
use bollard::network::{
    CreateNetworkOptions, InspectNetworkOptions, ListNetworksOptions, PruneNetworksOptions,
};
use bollard::volume::{
    CreateVolumeOptions, ListVolumesOptions, PruneVolumesOptions, RemoveVolumeOptions,
};
use bollard::Docker;
use futures_util::stream::StreamExt;
use std::collections::HashMap;

use crate::error::DockNavError;
use crate::Result;

use super::types::*;

/// Seconds the client waits on a single engine request
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Driver used for networks created without one
pub const DEFAULT_NETWORK_DRIVER: &str = "bridge";

/// Driver used for volumes created without one
pub const DEFAULT_VOLUME_DRIVER: &str = "local";

/// Docker operations trait
#[async_trait]
pub trait DockerOperations: Send + Sync {
    /// Version strings and resource counts for the summary screen
    async fn engine_summary(&self) -> Result<EngineSummary>;

    /// List containers, including stopped ones when `all` is set
    async fn list_containers(&self, all: bool) -> Result<Vec<ContainerSummary>>;

    async fn inspect_container(&self, container_id: &str) -> Result<ContainerDetails>;

    /// Get the last `tail` log lines of a container
    async fn container_logs(&self, container_id: &str, tail: u32) -> Result<String>;

    /// Start a stopped container
    async fn start_container(&self, container_id: &str) -> Result<()>;

    /// Stop a running container
    async fn stop_container(&self, container_id: &str) -> Result<()>;

    async fn restart_container(&self, container_id: &str) -> Result<()>;

    /// Remove a container
    async fn remove_container(&self, container_id: &str) -> Result<()>;

    /// Create (but do not start) a container, returning its id
    async fn create_container(&self, spec: &ContainerSpec) -> Result<String>;

    /// List local images
    async fn list_images(&self) -> Result<Vec<ImageSummary>>;

    async fn inspect_image(&self, image_id: &str) -> Result<ImageDetails>;

    /// Pull an image by reference, waiting for the pull to finish
    async fn pull_image(&self, reference: &str) -> Result<()>;

    async fn remove_image(&self, image_id: &str) -> Result<()>;

    async fn list_networks(&self) -> Result<Vec<NetworkSummary>>;

    async fn inspect_network(&self, network_id: &str) -> Result<NetworkDetails>;

    /// Create a network, returning its name
    async fn create_network(&self, name: &str, driver: &str) -> Result<String>;

    async fn remove_network(&self, network_id: &str) -> Result<()>;

    async fn list_volumes(&self) -> Result<Vec<VolumeSummary>>;

    async fn inspect_volume(&self, name: &str) -> Result<VolumeDetails>;

    /// Create a volume, returning its name
    async fn create_volume(&self, name: &str, driver: &str) -> Result<String>;

    async fn remove_volume(&self, name: &str) -> Result<()>;

    /// Engine info and version
    async fn system_overview(&self) -> Result<SystemOverview>;

    async fn disk_usage(&self) -> Result<DiskUsage>;

    /// Prune stopped containers, dangling images, unused networks and volumes
    async fn prune_system(&self) -> Result<PruneReport>;
}

/// How to reach the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineHost {
    LocalDefaults,
    Unix(String),
    Http(String),
}

impl EngineHost {
    pub fn parse(host: Option<&str>) -> Result<Self> {
        let Some(host) = host.map(str::trim).filter(|h| !h.is_empty()) else {
            return Ok(Self::LocalDefaults);
        };

        if host.starts_with("unix://") {
            Ok(Self::Unix(host.to_string()))
        } else if host.starts_with("tcp://") || host.starts_with("http://") {
            Ok(Self::Http(host.to_string()))
        } else {
            Err(DockNavError::Config(format!(
                "Unsupported Docker host: {} (expected unix://, tcp:// or http://)",
                host
            )))
        }
    }
}

/// Docker operations manager
pub struct DockerManager {
    docker: Docker,
    stop_timeout: i64,
}

impl DockerManager {
    /// Connect to the engine at `host`, or the local defaults when unset
    pub fn connect(host: Option<&str>, stop_timeout: i64) -> Result<Self> {
        let docker = match EngineHost::parse(host)? {
            EngineHost::LocalDefaults => Docker::connect_with_local_defaults(),
            #[cfg(unix)]
            EngineHost::Unix(path) => {
                Docker::connect_with_unix(&path, REQUEST_TIMEOUT_SECS, bollard::API_DEFAULT_VERSION)
            }
            #[cfg(not(unix))]
            EngineHost::Unix(path) => {
                return Err(DockNavError::Config(format!(
                    "Unix sockets are not supported on this platform: {}",
                    path
                )))
            }
            EngineHost::Http(addr) => {
                Docker::connect_with_http(&addr, REQUEST_TIMEOUT_SECS, bollard::API_DEFAULT_VERSION)
            }
        }
        .map_err(|e| DockNavError::Docker(format!("Failed to connect to Docker: {}", e)))?;

        tracing::info!("Connected to Docker engine");
        Ok(Self {
            docker,
            stop_timeout,
        })
    }
}

fn engine_error(action: &str) -> impl FnOnce(bollard::errors::Error) -> DockNavError + '_ {
    move |e| DockNavError::Docker(format!("Failed to {}: {}", action, e))
}

fn restart_policy_name(policy: RestartPolicy) -> RestartPolicyNameEnum {
    match policy {
        RestartPolicy::No => RestartPolicyNameEnum::NO,
        RestartPolicy::Always => RestartPolicyNameEnum::ALWAYS,
        RestartPolicy::OnFailure => RestartPolicyNameEnum::ON_FAILURE,
        RestartPolicy::UnlessStopped => RestartPolicyNameEnum::UNLESS_STOPPED,
    }
}

/// Build the engine create request for a container spec
fn container_config(spec: &ContainerSpec) -> Config<String> {
    let mut exposed_ports = HashMap::new();
    let mut port_bindings = HashMap::new();
    for binding in &spec.ports {
        exposed_ports.insert(binding.port_key(), HashMap::new());
        port_bindings.insert(
            binding.port_key(),
            Some(vec![bollard::models::PortBinding {
                host_ip: Some(String::from("0.0.0.0")),
                host_port: Some(binding.host_port.to_string()),
            }]),
        );
    }

    let host_config = HostConfig {
        port_bindings: Some(port_bindings),
        binds: Some(spec.binds.clone()).filter(|b| !b.is_empty()),
        restart_policy: Some(EngineRestartPolicy {
            name: Some(restart_policy_name(spec.restart_policy)),
            maximum_retry_count: None,
        }),
        ..Default::default()
    };

    let mut endpoints_config = HashMap::new();
    endpoints_config.insert(spec.network.clone(), EndpointSettings::default());

    Config {
        image: Some(spec.image.clone()),
        env: Some(spec.env.clone()).filter(|e| !e.is_empty()),
        cmd: Some(spec.cmd.clone()).filter(|c| !c.is_empty()),
        exposed_ports: Some(exposed_ports),
        host_config: Some(host_config),
        networking_config: Some(NetworkingConfig { endpoints_config }),
        ..Default::default()
    }
}

/// Docker timestamps are in format "2024-02-08T21:56:23.123456789Z"
fn format_log_line(line: &str) -> String {
    if let Some(timestamp_end) = line.find(' ') {
        if let Ok(timestamp) = chrono::DateTime::parse_from_rfc3339(&line[..timestamp_end]) {
            return format!(
                "[{}] {}",
                timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
                &line[timestamp_end + 1..]
            );
        }
    }
    line.to_string()
}

fn to_sorted(map: HashMap<String, String>) -> std::collections::BTreeMap<String, String> {
    map.into_iter().collect()
}

fn non_negative(value: i64) -> u64 {
    value.max(0) as u64
}

#[async_trait]
impl DockerOperations for DockerManager {
    async fn engine_summary(&self) -> Result<EngineSummary> {
        let version = self
            .docker
            .version()
            .await
            .map_err(engine_error("get Docker version"))?;
        let containers = self.list_containers(true).await?;
        let images = self.list_images().await?;

        Ok(EngineSummary {
            server_version: version.version.unwrap_or_default(),
            api_version: version.api_version.unwrap_or_default(),
            containers: containers.len(),
            images: images.len(),
        })
    }

    async fn list_containers(&self, all: bool) -> Result<Vec<ContainerSummary>> {
        let options = Some(ListContainersOptions::<String> {
            all,
            ..Default::default()
        });

        let containers = self
            .docker
            .list_containers(options)
            .await
            .map_err(engine_error("list containers"))?;

        Ok(containers
            .into_iter()
            .map(|c| ContainerSummary {
                id: c.id.unwrap_or_default(),
                names: c.names.unwrap_or_default(),
                image: c.image.unwrap_or_default(),
                command: c.command.unwrap_or_default(),
                created: c.created.unwrap_or_default(),
                state: c.state.unwrap_or_default(),
                status: c.status.unwrap_or_default(),
                ports: c
                    .ports
                    .unwrap_or_default()
                    .into_iter()
                    .map(|p| PortMapping {
                        ip: p.ip,
                        private_port: p.private_port,
                        public_port: p.public_port,
                        protocol: p
                            .typ
                            .map(|t| t.to_string())
                            .filter(|t| !t.is_empty())
                            .unwrap_or_else(|| "tcp".to_string()),
                    })
                    .collect(),
            })
            .collect())
    }

    async fn inspect_container(&self, container_id: &str) -> Result<ContainerDetails> {
        let container = self
            .docker
            .inspect_container(container_id, None::<InspectContainerOptions>)
            .await
            .map_err(engine_error("inspect container"))?;

        let state = container.state.unwrap_or_default();
        let config = container.config.unwrap_or_default();
        let network_settings = container.network_settings.unwrap_or_default();

        let mut ports: Vec<String> = network_settings
            .ports
            .unwrap_or_default()
            .into_iter()
            .map(|(key, bindings)| {
                let published: Vec<String> = bindings
                    .unwrap_or_default()
                    .into_iter()
                    .filter_map(|b| {
                        b.host_port.map(|port| {
                            format!("{}:{}", b.host_ip.unwrap_or_default(), port)
                        })
                    })
                    .collect();
                if published.is_empty() {
                    key
                } else {
                    format!("{} -> {}", published.join(", "), key)
                }
            })
            .collect();
        ports.sort();

        let mut networks: Vec<String> = network_settings
            .networks
            .unwrap_or_default()
            .into_iter()
            .map(|(name, endpoint)| match endpoint.ip_address.filter(|ip| !ip.is_empty()) {
                Some(ip) => format!("{} ({})", name, ip),
                None => name,
            })
            .collect();
        networks.sort();

        let mounts = container
            .mounts
            .unwrap_or_default()
            .into_iter()
            .map(|m| {
                format!(
                    "{} -> {}",
                    m.source.or(m.name).unwrap_or_default(),
                    m.destination.unwrap_or_default()
                )
            })
            .collect();

        let mut command = config.entrypoint.unwrap_or_default();
        command.extend(config.cmd.unwrap_or_default());

        Ok(ContainerDetails {
            id: container.id.unwrap_or_else(|| container_id.to_string()),
            name: container
                .name
                .unwrap_or_default()
                .trim_start_matches('/')
                .to_string(),
            image: config.image.unwrap_or_default(),
            created: container.created.unwrap_or_default(),
            status: state.status.map(|s| s.to_string()).unwrap_or_default(),
            started_at: state.started_at,
            exit_code: state.exit_code,
            restart_count: container.restart_count.unwrap_or_default(),
            command,
            env: config.env.unwrap_or_default(),
            mounts,
            ports,
            networks,
        })
    }

    async fn container_logs(&self, container_id: &str, tail: u32) -> Result<String> {
        let options = Some(LogsOptions::<String> {
            stdout: true,
            stderr: true,
            tail: tail.to_string(),
            timestamps: true,
            ..Default::default()
        });

        let mut logs = self.docker.logs(container_id, options);
        let mut log_lines = Vec::new();

        while let Some(log) = logs.next().await {
            let log = log.map_err(engine_error("get container logs"))?;
            for line in log.to_string().lines() {
                log_lines.push(format_log_line(line));
            }
        }

        Ok(log_lines.join("\n"))
    }

    async fn start_container(&self, container_id: &str) -> Result<()> {
        self.docker
            .start_container(container_id, None::<StartContainerOptions<String>>)
            .await
            .map_err(engine_error("start container"))?;
        Ok(())
    }

    async fn stop_container(&self, container_id: &str) -> Result<()> {
        let options = Some(StopContainerOptions {
            t: self.stop_timeout,
        });

        self.docker
            .stop_container(container_id, options)
            .await
            .map_err(engine_error("stop container"))?;
        Ok(())
    }

    async fn restart_container(&self, container_id: &str) -> Result<()> {
        let options = Some(RestartContainerOptions {
            t: self.stop_timeout as isize,
        });

        self.docker
            .restart_container(container_id, options)
            .await
            .map_err(engine_error("restart container"))?;
        Ok(())
    }

    async fn remove_container(&self, container_id: &str) -> Result<()> {
        let options = Some(RemoveContainerOptions {
            force: false,
            ..Default::default()
        });

        self.docker
            .remove_container(container_id, options)
            .await
            .map_err(engine_error("remove container"))?;
        Ok(())
    }

    async fn create_container(&self, spec: &ContainerSpec) -> Result<String> {
        let options = spec.name.as_ref().map(|name| CreateContainerOptions {
            name: name.clone(),
            platform: None,
        });

        let response = self
            .docker
            .create_container(options, container_config(spec))
            .await
            .map_err(engine_error("create container"))?;

        for warning in &response.warnings {
            tracing::warn!("Create container warning: {}", warning);
        }

        Ok(response.id)
    }

    async fn list_images(&self) -> Result<Vec<ImageSummary>> {
        let images = self
            .docker
            .list_images(None::<ListImagesOptions<String>>)
            .await
            .map_err(engine_error("list images"))?;

        Ok(images
            .into_iter()
            .map(|image| ImageSummary {
                id: image.id,
                repo_tags: image.repo_tags,
                created: image.created,
                size: non_negative(image.size),
                containers: image.containers,
            })
            .collect())
    }

    async fn inspect_image(&self, image_id: &str) -> Result<ImageDetails> {
        let image = self
            .docker
            .inspect_image(image_id)
            .await
            .map_err(engine_error("inspect image"))?;

        let config = image.config.unwrap_or_default();
        let mut exposed_ports: Vec<String> = config
            .exposed_ports
            .unwrap_or_default()
            .into_keys()
            .collect();
        exposed_ports.sort();

        Ok(ImageDetails {
            id: image.id.unwrap_or_else(|| image_id.to_string()),
            repo_tags: image.repo_tags.unwrap_or_default(),
            created: image.created.unwrap_or_default(),
            size: non_negative(image.size.unwrap_or_default()),
            architecture: image.architecture.unwrap_or_default(),
            os: image.os.unwrap_or_default(),
            author: image.author.unwrap_or_default(),
            entrypoint: config.entrypoint.unwrap_or_default(),
            command: config.cmd.unwrap_or_default(),
            exposed_ports,
            working_dir: config.working_dir.unwrap_or_default(),
        })
    }

    async fn pull_image(&self, reference: &str) -> Result<()> {
        let (repository, tag) = split_image_reference(reference);
        let options = Some(CreateImageOptions {
            from_image: repository.as_str(),
            tag: tag.as_str(),
            ..Default::default()
        });

        let mut pull_stream = self.docker.create_image(options, None, None);

        while let Some(info) = pull_stream.next().await {
            let output = info.map_err(engine_error("pull image"))?;
            if let Some(status) = output.status {
                match output.progress {
                    Some(progress) => tracing::debug!("{}: {}", status, progress),
                    None => tracing::debug!("{}", status),
                }
            }
        }

        tracing::info!("Pulled image {}", reference.trim());
        Ok(())
    }

    async fn remove_image(&self, image_id: &str) -> Result<()> {
        self.docker
            .remove_image(image_id, None, None)
            .await
            .map_err(engine_error("remove image"))?;
        Ok(())
    }

    async fn list_networks(&self) -> Result<Vec<NetworkSummary>> {
        let networks = self
            .docker
            .list_networks(None::<ListNetworksOptions<String>>)
            .await
            .map_err(engine_error("list networks"))?;

        Ok(networks
            .into_iter()
            .map(|n| NetworkSummary {
                id: n.id.unwrap_or_default(),
                name: n.name.unwrap_or_default(),
                driver: n.driver.unwrap_or_default(),
                scope: n.scope.unwrap_or_default(),
            })
            .collect())
    }

    async fn inspect_network(&self, network_id: &str) -> Result<NetworkDetails> {
        let network = self
            .docker
            .inspect_network(network_id, None::<InspectNetworkOptions<String>>)
            .await
            .map_err(engine_error("inspect network"))?;

        let ipam = network.ipam.unwrap_or_default();
        let mut containers: Vec<NetworkEndpoint> = network
            .containers
            .unwrap_or_default()
            .into_iter()
            .map(|(container_id, c)| NetworkEndpoint {
                container_id,
                name: c.name.unwrap_or_default(),
                ipv4_address: c.ipv4_address.unwrap_or_default(),
                ipv6_address: c.ipv6_address.filter(|ip| !ip.is_empty()),
                mac_address: c.mac_address.unwrap_or_default(),
            })
            .collect();
        containers.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(NetworkDetails {
            id: network.id.unwrap_or_else(|| network_id.to_string()),
            name: network.name.unwrap_or_default(),
            created: network.created.unwrap_or_default(),
            driver: network.driver.unwrap_or_default(),
            scope: network.scope.unwrap_or_default(),
            internal: network.internal.unwrap_or_default(),
            enable_ipv6: network.enable_ipv6.unwrap_or_default(),
            attachable: network.attachable.unwrap_or_default(),
            ingress: network.ingress.unwrap_or_default(),
            ipam_driver: ipam.driver.unwrap_or_default(),
            ipam_configs: ipam
                .config
                .unwrap_or_default()
                .into_iter()
                .map(|c| IpamEntry {
                    subnet: c.subnet,
                    gateway: c.gateway,
                    ip_range: c.ip_range,
                })
                .collect(),
            containers,
        })
    }

    async fn create_network(&self, name: &str, driver: &str) -> Result<String> {
        let driver = match driver.trim() {
            "" => DEFAULT_NETWORK_DRIVER,
            other => other,
        };

        self.docker
            .create_network(CreateNetworkOptions {
                name,
                driver,
                ..Default::default()
            })
            .await
            .map_err(engine_error("create network"))?;

        tracing::info!("Created network {} ({})", name, driver);
        Ok(name.to_string())
    }

    async fn remove_network(&self, network_id: &str) -> Result<()> {
        self.docker
            .remove_network(network_id)
            .await
            .map_err(engine_error("remove network"))?;
        Ok(())
    }

    async fn list_volumes(&self) -> Result<Vec<VolumeSummary>> {
        let response = self
            .docker
            .list_volumes(None::<ListVolumesOptions<String>>)
            .await
            .map_err(engine_error("list volumes"))?;

        let mut volumes: Vec<VolumeSummary> = response
            .volumes
            .unwrap_or_default()
            .into_iter()
            .map(|v| VolumeSummary {
                name: v.name,
                driver: v.driver,
                mountpoint: v.mountpoint,
                created_at: v.created_at,
                scope: v.scope.map(|s| s.to_string()).unwrap_or_default(),
            })
            .collect();
        volumes.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(volumes)
    }

    async fn inspect_volume(&self, name: &str) -> Result<VolumeDetails> {
        let volume = self
            .docker
            .inspect_volume(name)
            .await
            .map_err(engine_error("inspect volume"))?;

        let usage = volume.usage_data;
        Ok(VolumeDetails {
            name: volume.name,
            driver: volume.driver,
            mountpoint: volume.mountpoint,
            created_at: volume.created_at,
            scope: volume.scope.map(|s| s.to_string()).unwrap_or_default(),
            labels: to_sorted(volume.labels),
            options: to_sorted(volume.options),
            size: usage.as_ref().map(|u| u.size).filter(|s| *s >= 0),
            ref_count: usage.as_ref().map(|u| u.ref_count).filter(|c| *c >= 0),
        })
    }

    async fn create_volume(&self, name: &str, driver: &str) -> Result<String> {
        let driver = match driver.trim() {
            "" => DEFAULT_VOLUME_DRIVER,
            other => other,
        };

        let volume = self
            .docker
            .create_volume(CreateVolumeOptions {
                name,
                driver,
                ..Default::default()
            })
            .await
            .map_err(engine_error("create volume"))?;

        tracing::info!("Created volume {} ({})", volume.name, driver);
        Ok(volume.name)
    }

    async fn remove_volume(&self, name: &str) -> Result<()> {
        self.docker
            .remove_volume(name, None::<RemoveVolumeOptions>)
            .await
            .map_err(engine_error("remove volume"))?;
        Ok(())
    }

    async fn system_overview(&self) -> Result<SystemOverview> {
        let info = self
            .docker
            .info()
            .await
            .map_err(engine_error("get system info"))?;
        let version = self
            .docker
            .version()
            .await
            .map_err(engine_error("get Docker version"))?;

        Ok(SystemOverview {
            version: VersionDetails {
                version: version.version.unwrap_or_default(),
                api_version: version.api_version.unwrap_or_default(),
                min_api_version: version.min_api_version.unwrap_or_default(),
                git_commit: version.git_commit.unwrap_or_default(),
                go_version: version.go_version.unwrap_or_default(),
                os: version.os.unwrap_or_default(),
                arch: version.arch.unwrap_or_default(),
                kernel_version: version.kernel_version.unwrap_or_default(),
                build_time: version.build_time.unwrap_or_default(),
            },
            info: EngineInfo {
                id: info.id.unwrap_or_default(),
                name: info.name.unwrap_or_default(),
                containers: info.containers.unwrap_or_default(),
                containers_running: info.containers_running.unwrap_or_default(),
                containers_paused: info.containers_paused.unwrap_or_default(),
                containers_stopped: info.containers_stopped.unwrap_or_default(),
                images: info.images.unwrap_or_default(),
                driver: info.driver.unwrap_or_default(),
                kernel_version: info.kernel_version.unwrap_or_default(),
                operating_system: info.operating_system.unwrap_or_default(),
                architecture: info.architecture.unwrap_or_default(),
                ncpu: info.ncpu.unwrap_or_default(),
                mem_total: non_negative(info.mem_total.unwrap_or_default()),
                cgroup_driver: info
                    .cgroup_driver
                    .map(|d| d.to_string())
                    .unwrap_or_default(),
                cgroup_version: info
                    .cgroup_version
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
            },
        })
    }

    async fn disk_usage(&self) -> Result<DiskUsage> {
        let usage = self
            .docker
            .df()
            .await
            .map_err(engine_error("get disk usage"))?;

        let images = usage
            .images
            .unwrap_or_default()
            .into_iter()
            .map(|image| ImageUsage {
                name: image
                    .repo_tags
                    .first()
                    .cloned()
                    .unwrap_or_else(|| NONE_TAG.to_string()),
                size: non_negative(image.size),
                created: image.created,
            })
            .collect();

        Ok(DiskUsage {
            layers_size: non_negative(usage.layers_size.unwrap_or_default()),
            images,
            containers: usage.containers.map(|c| c.len()).unwrap_or_default(),
            volumes: usage.volumes.map(|v| v.len()).unwrap_or_default(),
        })
    }

    async fn prune_system(&self) -> Result<PruneReport> {
        let mut report = PruneReport::default();

        let containers = self
            .docker
            .prune_containers(None::<PruneContainersOptions<String>>)
            .await
            .map_err(engine_error("prune containers"))?;
        report.containers_deleted = containers.containers_deleted.map_or(0, |d| d.len());
        report.space_reclaimed += non_negative(containers.space_reclaimed.unwrap_or_default());

        let images = self
            .docker
            .prune_images(None::<PruneImagesOptions<String>>)
            .await
            .map_err(engine_error("prune images"))?;
        report.images_deleted = images.images_deleted.map_or(0, |d| d.len());
        report.space_reclaimed += non_negative(images.space_reclaimed.unwrap_or_default());

        let networks = self
            .docker
            .prune_networks(None::<PruneNetworksOptions<String>>)
            .await
            .map_err(engine_error("prune networks"))?;
        report.networks_deleted = networks.networks_deleted.map_or(0, |d| d.len());

        let volumes = self
            .docker
            .prune_volumes(None::<PruneVolumesOptions<String>>)
            .await
            .map_err(engine_error("prune volumes"))?;
        report.volumes_deleted = volumes.volumes_deleted.map_or(0, |d| d.len());
        report.space_reclaimed += non_negative(volumes.space_reclaimed.unwrap_or_default());

        tracing::info!("System prune finished: {:?}", report);
        Ok(report)
    }
}
