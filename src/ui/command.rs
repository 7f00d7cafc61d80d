//! Engine requests issued by the views and the results routed back to them.
//!
//! Views never talk to the engine directly. They return `Command`s; the
//! `Dispatcher` runs each one on a tokio task and sends the matching
//! `Message` back over a channel, tagged with the resource it belongs to.

use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

use crate::docker::{
    ContainerAction, ContainerDetails, ContainerSpec, ContainerSummary, DiskUsage,
    DockerOperations, EngineSummary, ImageDetails, ImageSummary, NetworkDetails, NetworkSummary,
    PruneReport, SystemOverview, VolumeDetails, VolumeSummary, NONE_TAG,
};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FetchSummary,

    ListContainers { all: bool },
    InspectContainer(String),
    ContainerLogs { id: String, tail: u32 },
    ContainerAction {
        action: ContainerAction,
        id: String,
        name: String,
    },
    LoadCreateOptions,
    CreateContainer(ContainerSpec),

    ListImages,
    InspectImage(String),
    PullImage(String),
    RemoveImage { id: String, name: String },

    ListNetworks,
    InspectNetwork(String),
    CreateNetwork { name: String, driver: String },
    RemoveNetwork { id: String, name: String },

    ListVolumes,
    InspectVolume(String),
    CreateVolume { name: String, driver: String },
    RemoveVolume(String),

    SystemOverview,
    DiskUsage,
    PruneSystem,
}

/// Choices offered by the container create form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateOptions {
    pub images: Vec<String>,
    pub networks: Vec<String>,
}

#[derive(Debug)]
pub enum ContainerMsg {
    /// `all` is the filter the list was fetched with
    Listed {
        all: bool,
        result: Result<Vec<ContainerSummary>>,
    },
    Inspected(Result<ContainerDetails>),
    Logs { id: String, result: Result<String> },
    ActionDone {
        action: ContainerAction,
        name: String,
        result: Result<()>,
    },
    CreateOptions(Result<CreateOptions>),
    Created(Result<String>),
}

#[derive(Debug)]
pub enum ImageMsg {
    Listed(Result<Vec<ImageSummary>>),
    Inspected(Result<ImageDetails>),
    Pulled { reference: String, result: Result<()> },
    Removed { name: String, result: Result<()> },
}

#[derive(Debug)]
pub enum NetworkMsg {
    Listed(Result<Vec<NetworkSummary>>),
    Inspected(Result<NetworkDetails>),
    Created(Result<String>),
    Removed { name: String, result: Result<()> },
}

#[derive(Debug)]
pub enum VolumeMsg {
    Listed(Result<Vec<VolumeSummary>>),
    Inspected(Result<VolumeDetails>),
    Created(Result<String>),
    Removed { name: String, result: Result<()> },
}

#[derive(Debug)]
pub enum SystemMsg {
    Overview(Result<SystemOverview>),
    DiskUsage(Result<DiskUsage>),
    Pruned(Result<PruneReport>),
}

/// Result of a command, addressed to the model that owns the resource
#[derive(Debug)]
pub enum Message {
    Summary(Result<EngineSummary>),
    Container(ContainerMsg),
    Image(ImageMsg),
    Network(NetworkMsg),
    Volume(VolumeMsg),
    System(SystemMsg),
}

async fn create_options(docker: &dyn DockerOperations) -> Result<CreateOptions> {
    let (images, networks) = tokio::try_join!(docker.list_images(), docker.list_networks())?;

    let mut images: Vec<String> = images
        .into_iter()
        .flat_map(|image| image.repo_tags)
        .filter(|tag| tag != NONE_TAG)
        .collect();
    images.sort();
    images.dedup();

    let mut networks: Vec<String> = networks.into_iter().map(|n| n.name).collect();
    networks.sort();

    Ok(CreateOptions { images, networks })
}

/// Run a command against the engine
pub async fn execute(docker: &dyn DockerOperations, command: Command) -> Message {
    tracing::debug!("Executing {:?}", command);

    match command {
        Command::FetchSummary => Message::Summary(docker.engine_summary().await),

        Command::ListContainers { all } => {
            let result = docker.list_containers(all).await;
            Message::Container(ContainerMsg::Listed { all, result })
        }
        Command::InspectContainer(id) => {
            Message::Container(ContainerMsg::Inspected(docker.inspect_container(&id).await))
        }
        Command::ContainerLogs { id, tail } => {
            let result = docker.container_logs(&id, tail).await;
            Message::Container(ContainerMsg::Logs { id, result })
        }
        Command::ContainerAction { action, id, name } => {
            let result = match action {
                ContainerAction::Start => docker.start_container(&id).await,
                ContainerAction::Stop => docker.stop_container(&id).await,
                ContainerAction::Restart => docker.restart_container(&id).await,
                ContainerAction::Remove => docker.remove_container(&id).await,
            };
            Message::Container(ContainerMsg::ActionDone {
                action,
                name,
                result,
            })
        }
        Command::LoadCreateOptions => {
            Message::Container(ContainerMsg::CreateOptions(create_options(docker).await))
        }
        Command::CreateContainer(spec) => {
            Message::Container(ContainerMsg::Created(docker.create_container(&spec).await))
        }

        Command::ListImages => Message::Image(ImageMsg::Listed(docker.list_images().await)),
        Command::InspectImage(id) => {
            Message::Image(ImageMsg::Inspected(docker.inspect_image(&id).await))
        }
        Command::PullImage(reference) => {
            let result = docker.pull_image(&reference).await;
            Message::Image(ImageMsg::Pulled { reference, result })
        }
        Command::RemoveImage { id, name } => {
            let result = docker.remove_image(&id).await;
            Message::Image(ImageMsg::Removed { name, result })
        }

        Command::ListNetworks => {
            Message::Network(NetworkMsg::Listed(docker.list_networks().await))
        }
        Command::InspectNetwork(id) => {
            Message::Network(NetworkMsg::Inspected(docker.inspect_network(&id).await))
        }
        Command::CreateNetwork { name, driver } => {
            Message::Network(NetworkMsg::Created(docker.create_network(&name, &driver).await))
        }
        Command::RemoveNetwork { id, name } => {
            let result = docker.remove_network(&id).await;
            Message::Network(NetworkMsg::Removed { name, result })
        }

        Command::ListVolumes => Message::Volume(VolumeMsg::Listed(docker.list_volumes().await)),
        Command::InspectVolume(name) => {
            Message::Volume(VolumeMsg::Inspected(docker.inspect_volume(&name).await))
        }
        Command::CreateVolume { name, driver } => {
            Message::Volume(VolumeMsg::Created(docker.create_volume(&name, &driver).await))
        }
        Command::RemoveVolume(name) => {
            let result = docker.remove_volume(&name).await;
            Message::Volume(VolumeMsg::Removed { name, result })
        }

        Command::SystemOverview => {
            Message::System(SystemMsg::Overview(docker.system_overview().await))
        }
        Command::DiskUsage => Message::System(SystemMsg::DiskUsage(docker.disk_usage().await)),
        Command::PruneSystem => Message::System(SystemMsg::Pruned(docker.prune_system().await)),
    }
}

/// Runs commands on background tasks and forwards their results
#[derive(Clone)]
pub struct Dispatcher {
    docker: Arc<dyn DockerOperations>,
    tx: UnboundedSender<Message>,
}

impl Dispatcher {
    pub fn new(docker: Arc<dyn DockerOperations>, tx: UnboundedSender<Message>) -> Self {
        Self { docker, tx }
    }

    pub fn dispatch(&self, commands: Vec<Command>) {
        for command in commands {
            let docker = Arc::clone(&self.docker);
            let tx = self.tx.clone();
            tokio::spawn(async move {
                let message = execute(docker.as_ref(), command).await;
                if tx.send(message).is_err() {
                    tracing::debug!("UI closed before a result arrived");
                }
            });
        }
    }
}
