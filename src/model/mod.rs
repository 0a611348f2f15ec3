// Re-export all model types from submodules.

pub use app::ViewMode;
pub use docker::{
    short_id, ContainerInfo, ImageInfo, NetworkInfo, PortMapping, ResourceSnapshot, VolumeInfo,
    COMPOSE_LABEL_PREFIX, COMPOSE_PROJECT_LABEL, COMPOSE_SERVICE_LABEL, STACK_NAMESPACE_LABEL,
};

mod app;
mod docker;
