//! Periodic aggregate statistics broadcaster.
//!
//! Polls the repository on a fixed interval and publishes a
//! [`NotificationEvent::StatsSnapshot`]. The broadcaster is an owned component
//! with an explicit [`StatsBroadcaster::start`] / [`StatsBroadcaster::stop`]
//! lifecycle; the server starts it after wiring and stops it during graceful
//! shutdown.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{error, info, warn};

use crate::domain::entities::StatsSnapshot;
use crate::domain::events::{NotificationEvent, Notifier};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// Default broadcast period.
pub const DEFAULT_STATS_INTERVAL: Duration = Duration::from_secs(30);

/// Computes current totals from storage and the notifier's observer count.
///
/// # Errors
///
/// Propagates repository errors.
pub async fn collect_snapshot(
    repository: &dyn UrlRepository,
    notifier: &dyn Notifier,
) -> Result<StatsSnapshot, AppError> {
    let (total_urls, total_clicks) = tokio::try_join!(repository.count(), repository.sum_clicks())?;

    Ok(StatsSnapshot {
        total_urls,
        total_clicks,
        connected_observers: notifier.observer_count(),
    })
}

/// Handle to the running broadcast task.
pub struct StatsBroadcaster {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl StatsBroadcaster {
    /// Spawns the broadcast loop. The first snapshot is sent one `period`
    /// after start.
    ///
    /// A failed snapshot is logged and that tick skipped; the loop keeps
    /// running.
    pub fn start(
        repository: Arc<dyn UrlRepository>,
        notifier: Arc<dyn Notifier>,
        period: Duration,
    ) -> Self {
        let (shutdown, mut shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match collect_snapshot(repository.as_ref(), notifier.as_ref()).await {
                            Ok(snapshot) => {
                                info!(
                                    total_urls = snapshot.total_urls,
                                    total_clicks = snapshot.total_clicks,
                                    observers = snapshot.connected_observers,
                                    "Broadcasting stats snapshot"
                                );
                                notifier.publish(NotificationEvent::StatsSnapshot(snapshot));
                            }
                            Err(e) => error!("Failed to collect stats snapshot: {}", e),
                        }
                    }
                    _ = shutdown_rx.changed() => break,
                }
            }

            info!("Stats broadcaster stopped");
        });

        info!("Stats broadcaster started (every {:?})", period);

        Self { shutdown, handle }
    }

    /// Signals the loop to exit and waits for it to finish.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);

        if let Err(e) = self.handle.await {
            warn!("Stats broadcaster task ended abnormally: {}", e);
        }
    }
}
