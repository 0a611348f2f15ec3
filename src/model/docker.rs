use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Label set by `docker compose` on every container of a project.
pub const COMPOSE_PROJECT_LABEL: &str = "com.docker.compose.project";
/// Label naming the compose service a container belongs to.
pub const COMPOSE_SERVICE_LABEL: &str = "com.docker.compose.service";
/// Prefix shared by all compose-managed labels.
pub const COMPOSE_LABEL_PREFIX: &str = "com.docker.compose.";
/// Label set on swarm stack members.
pub const STACK_NAMESPACE_LABEL: &str = "com.docker.stack.namespace";

/// A single published or exposed container port.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortMapping {
    pub ip: Option<String>,
    pub private_port: u16,
    pub public_port: Option<u16>,
    pub protocol: String,     // "tcp", "udp", "sctp"
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerInfo {
    pub id: String,           // full ID
    pub names: Vec<String>,   // raw names, usually with a leading '/'
    pub image: String,
    pub command: String,
    pub created: i64,         // unix seconds
    pub state: String,        // "running", "exited", ...
    pub status: String,       // human status, e.g. "Up 2 hours"
    pub ports: Vec<PortMapping>,
    pub labels: HashMap<String, String>,
}

impl ContainerInfo {
    /// First 12 characters of the ID.
    pub fn short_id(&self) -> &str {
        short_id(&self.id)
    }

    /// First name with the leading '/' removed, or the short ID if unnamed.
    pub fn primary_name(&self) -> &str {
        self.names
            .first()
            .map(|n| n.trim_start_matches('/'))
            .unwrap_or_else(|| self.short_id())
    }

    pub fn is_running(&self) -> bool {
        self.state == "running"
    }

    /// Status text says the container is not running ("Exited ...", "Created").
    pub fn is_stopped(&self) -> bool {
        let status = self.status.to_lowercase();
        status.contains("exited") || status.contains("created")
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub id: String,           // "sha256:..."
    pub repo_tags: Vec<String>,
    pub created: i64,
    pub size: i64,
}

impl ImageInfo {
    /// ID without the digest algorithm prefix, cut to 12 characters.
    pub fn short_id(&self) -> &str {
        short_id(self.id.strip_prefix("sha256:").unwrap_or(&self.id))
    }

    /// First repo tag, or `<none>:<none>` for dangling images.
    pub fn primary_tag(&self) -> &str {
        self.repo_tags
            .first()
            .map(String::as_str)
            .unwrap_or("<none>:<none>")
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInfo {
    pub id: String,
    pub name: String,
    pub driver: String,
    pub scope: String,
    pub created: Option<String>, // RFC 3339 as reported by the daemon
}

impl NetworkInfo {
    pub fn short_id(&self) -> &str {
        short_id(&self.id)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeInfo {
    pub name: String,
    pub driver: String,
    pub mountpoint: String,
    pub created_at: Option<String>,
}

/// The four resource lists as fetched in one refresh cycle.
///
/// Replaced wholesale on every successful refresh, never merged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSnapshot {
    pub containers: Vec<ContainerInfo>,
    pub images: Vec<ImageInfo>,
    pub networks: Vec<NetworkInfo>,
    pub volumes: Vec<VolumeInfo>,
}

/// First 12 characters of an identifier. Safe for shorter or multi-byte input.
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(12) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}
