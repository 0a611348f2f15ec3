use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::compose::{StackClient, StackTarget};
use crate::docker::ResourceClient;
use crate::error::Result;
use crate::model::ResourceSnapshot;

use super::state::PendingAction;
use super::AppEvent;

/// Sends a `Tick` every period; the first one fires immediately.
///
/// A tick that would land while the loop is still busy is delayed rather
/// than bunched up, so at most one tick is ever outstanding.
pub struct RefreshScheduler {
    task: JoinHandle<()>,
}

impl RefreshScheduler {
    pub fn start(runtime: &Handle, period: Duration, events: UnboundedSender<AppEvent>) -> Self {
        let task = runtime.spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if events.send(AppEvent::Tick).is_err() {
                    break;
                }
            }
        });
        Self { task }
    }

    pub fn stop(&self) {
        self.task.abort();
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Runs refreshes and confirmed actions as background tasks and posts
/// their results back as events.
#[derive(Clone)]
pub struct Dispatcher {
    resources: Arc<dyn ResourceClient>,
    stacks: Arc<dyn StackClient>,
    events: UnboundedSender<AppEvent>,
    grace_period: Duration,
    runtime: Handle,
    next_seq: Arc<AtomicU64>,
}

impl Dispatcher {
    pub fn new(
        resources: Arc<dyn ResourceClient>,
        stacks: Arc<dyn StackClient>,
        events: UnboundedSender<AppEvent>,
        grace_period: Duration,
        runtime: Handle,
    ) -> Self {
        Self {
            resources,
            stacks,
            events,
            grace_period,
            runtime,
            next_seq: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Fetch a fresh snapshot in the background.
    pub fn refresh(&self) -> JoinHandle<()> {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let resources = Arc::clone(&self.resources);
        let events = self.events.clone();
        self.runtime.spawn(async move {
            debug!(seq, "refresh started");
            let result = fetch_snapshot(resources.as_ref())
                .await
                .map_err(|e| e.to_string());
            // The receiver is gone only when the app is shutting down.
            let _ = events.send(AppEvent::Refreshed { seq, result });
        })
    }

    /// Execute a confirmed action in the background.
    pub fn execute(&self, action: PendingAction) -> JoinHandle<()> {
        let resources = Arc::clone(&self.resources);
        let stacks = Arc::clone(&self.stacks);
        let events = self.events.clone();
        let grace = self.grace_period;
        self.runtime.spawn(async move {
            info!(action = action.verb(), "executing");
            let result = run_action(resources.as_ref(), stacks.as_ref(), &action, grace)
                .await
                .map_err(|e| e.to_string());
            let _ = events.send(AppEvent::ActionDone(result));
        })
    }
}

/// All four listings, or nothing: any failure fails the whole snapshot.
pub async fn fetch_snapshot(client: &dyn ResourceClient) -> Result<ResourceSnapshot> {
    let containers = client.list_containers().await?;
    let images = client.list_images().await?;
    let networks = client.list_networks().await?;
    let volumes = client.list_volumes().await?;
    Ok(ResourceSnapshot {
        containers,
        images,
        networks,
        volumes,
    })
}

/// Perform one action and return its status line.
pub async fn run_action(
    resources: &dyn ResourceClient,
    stacks: &dyn StackClient,
    action: &PendingAction,
    grace: Duration,
) -> Result<String> {
    match action {
        PendingAction::RemoveContainer { id } => resources.remove_container(id).await?,
        PendingAction::RemoveImage { id } => resources.remove_image(id).await?,
        PendingAction::RemoveNetwork { id, .. } => resources.remove_network(id).await?,
        PendingAction::RemoveVolume { name } => resources.remove_volume(name).await?,
        PendingAction::StopContainer { id } => resources.stop_container(id, grace).await?,
        PendingAction::StopGroup { project, services } => {
            let target = StackTarget::new(project.as_str()).with_services(services.clone());
            stacks.stop(&target, grace).await?
        }
        PendingAction::StartGroup { project, services } => {
            let target = StackTarget::new(project.as_str()).with_services(services.clone());
            stacks.start(&target).await?
        }
        PendingAction::DeleteGroup { project } => stacks.down(&StackTarget::new(project.as_str())).await?,
    }
    Ok(action.success_message())
}
