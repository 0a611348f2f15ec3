use std::time::Duration;

use async_trait::async_trait;
use bollard::container::{ListContainersOptions, RemoveContainerOptions, StopContainerOptions};
use bollard::image::{ListImagesOptions, RemoveImageOptions};
use bollard::models::{ContainerSummary, ImageSummary, Network, Volume};
use bollard::network::ListNetworksOptions;
use bollard::volume::{ListVolumesOptions, RemoveVolumeOptions};
use bollard::Docker;
use tracing::debug;

use crate::error::Result;
use crate::model::{ContainerInfo, ImageInfo, NetworkInfo, PortMapping, VolumeInfo};

/// Container runtime operations the dashboard depends on.
///
/// Every call is a single request; dropping the returned future cancels it.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    /// All containers, including stopped ones.
    async fn list_containers(&self) -> Result<Vec<ContainerInfo>>;
    async fn list_images(&self) -> Result<Vec<ImageInfo>>;
    async fn list_networks(&self) -> Result<Vec<NetworkInfo>>;
    async fn list_volumes(&self) -> Result<Vec<VolumeInfo>>;

    /// Forced removal, running or not.
    async fn remove_container(&self, id: &str) -> Result<()>;
    /// Forced removal, even if tagged in several repositories.
    async fn remove_image(&self, id: &str) -> Result<()>;
    async fn remove_network(&self, id: &str) -> Result<()>;
    /// Forced removal.
    async fn remove_volume(&self, name: &str) -> Result<()>;

    /// Stop, giving the process `grace` to exit before it is killed.
    async fn stop_container(&self, id: &str, grace: Duration) -> Result<()>;
}

/// Wrapper around bollard's Docker client.
pub struct DockerClient {
    client: Docker,
}

impl DockerClient {
    /// Connect using the local defaults (DOCKER_HOST or the platform socket).
    pub fn connect() -> Result<Self> {
        let client = Docker::connect_with_local_defaults()?;
        Ok(Self { client })
    }

    /// Ping the daemon to verify it is reachable.
    pub async fn ping(&self) -> Result<()> {
        self.client.ping().await?;
        Ok(())
    }
}

#[async_trait]
impl ResourceClient for DockerClient {
    async fn list_containers(&self) -> Result<Vec<ContainerInfo>> {
        let options: ListContainersOptions<String> = ListContainersOptions {
            all: true,
            ..Default::default()
        };
        let summaries = self.client.list_containers(Some(options)).await?;
        debug!(count = summaries.len(), "listed containers");
        Ok(summaries.into_iter().map(container_from_summary).collect())
    }

    async fn list_images(&self) -> Result<Vec<ImageInfo>> {
        let summaries = self
            .client
            .list_images(Some(ListImagesOptions::<String>::default()))
            .await?;
        Ok(summaries.into_iter().map(image_from_summary).collect())
    }

    async fn list_networks(&self) -> Result<Vec<NetworkInfo>> {
        let networks = self
            .client
            .list_networks(None::<ListNetworksOptions<String>>)
            .await?;
        Ok(networks.into_iter().map(network_from_model).collect())
    }

    async fn list_volumes(&self) -> Result<Vec<VolumeInfo>> {
        let response = self
            .client
            .list_volumes(None::<ListVolumesOptions<String>>)
            .await?;
        Ok(response
            .volumes
            .unwrap_or_default()
            .into_iter()
            .map(volume_from_model)
            .collect())
    }

    async fn remove_container(&self, id: &str) -> Result<()> {
        let options = RemoveContainerOptions {
            force: true,
            ..Default::default()
        };
        self.client.remove_container(id, Some(options)).await?;
        Ok(())
    }

    async fn remove_image(&self, id: &str) -> Result<()> {
        let options = RemoveImageOptions {
            force: true,
            ..Default::default()
        };
        self.client.remove_image(id, Some(options), None).await?;
        Ok(())
    }

    async fn remove_network(&self, id: &str) -> Result<()> {
        self.client.remove_network(id).await?;
        Ok(())
    }

    async fn remove_volume(&self, name: &str) -> Result<()> {
        let options = RemoveVolumeOptions { force: true };
        self.client.remove_volume(name, Some(options)).await?;
        Ok(())
    }

    async fn stop_container(&self, id: &str, grace: Duration) -> Result<()> {
        let options = StopContainerOptions {
            t: stop_timeout(grace),
        };
        self.client.stop_container(id, Some(options)).await?;
        Ok(())
    }
}

/// Stop timeout in whole seconds. Saturates instead of wrapping, since a
/// negative value asks the daemon to wait forever.
fn stop_timeout(grace: Duration) -> i64 {
    i64::try_from(grace.as_secs()).unwrap_or(i64::MAX)
}

// --- Conversions from the Engine API models ---

fn container_from_summary(s: ContainerSummary) -> ContainerInfo {
    let ports = s
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
        .collect();

    ContainerInfo {
        id: s.id.unwrap_or_default(),
        names: s.names.unwrap_or_default(),
        image: s.image.unwrap_or_default(),
        command: s.command.unwrap_or_default(),
        created: s.created.unwrap_or(0),
        state: s.state.unwrap_or_default(),
        status: s.status.unwrap_or_default(),
        ports,
        labels: s.labels.unwrap_or_default(),
    }
}

fn image_from_summary(s: ImageSummary) -> ImageInfo {
    ImageInfo {
        id: s.id,
        repo_tags: s.repo_tags,
        created: s.created,
        size: s.size,
    }
}

fn network_from_model(n: Network) -> NetworkInfo {
    NetworkInfo {
        id: n.id.unwrap_or_default(),
        name: n.name.unwrap_or_default(),
        driver: n.driver.unwrap_or_default(),
        scope: n.scope.unwrap_or_default(),
        created: n.created,
    }
}

fn volume_from_model(v: Volume) -> VolumeInfo {
    VolumeInfo {
        name: v.name,
        driver: v.driver,
        mountpoint: v.mountpoint,
        created_at: v.created_at,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use bollard::models::{Port, PortTypeEnum};

    use super::*;

    #[test]
    fn stop_timeout_saturates() {
        assert_eq!(stop_timeout(Duration::from_secs(30)), 30);
        assert_eq!(stop_timeout(Duration::from_secs(u64::MAX)), i64::MAX);
    }

    #[test]
    fn summary_maps_optional_fields() {
        let summary = ContainerSummary {
            id: Some("abc123456789ffff".into()),
            names: Some(vec!["/web".into()]),
            state: Some("running".into()),
            labels: Some(HashMap::from([("k".to_string(), "v".to_string())])),
            ports: Some(vec![Port {
                ip: Some("0.0.0.0".into()),
                private_port: 80,
                public_port: Some(8080),
                typ: Some(PortTypeEnum::TCP),
            }]),
            ..Default::default()
        };
        let info = container_from_summary(summary);
        assert_eq!(info.short_id(), "abc123456789");
        assert_eq!(info.primary_name(), "web");
        assert!(info.is_running());
        assert_eq!(info.label("k"), Some("v"));
        assert_eq!(info.ports[0].protocol, "tcp");
        assert_eq!(info.ports[0].public_port, Some(8080));
        assert_eq!(info.created, 0);
    }

    #[test]
    fn empty_summary_has_defaults() {
        let info = container_from_summary(ContainerSummary::default());
        assert!(info.id.is_empty());
        assert!(info.names.is_empty());
        assert!(info.ports.is_empty());
    }
}
