//! Single-task event loop.

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

use emodash_api::RemoteStore;

use crate::dashboard::{Dashboard, Event};
use crate::presenter::Presenter;

/// Runs the dashboard until the command channel closes.
///
/// Both poll timers fire immediately, then at their configured periods.
/// Store requests run as separate tasks, but their results come back
/// through this loop, so state is only touched here, one event at a time.
/// Requests still in flight when the channel closes are aborted.
pub async fn run<S, P>(
    mut dashboard: Dashboard<S, P>,
    mut commands: mpsc::Receiver<Event>,
) -> Dashboard<S, P>
where
    S: RemoteStore,
    P: Presenter,
{
    let mut mood_timer = interval(dashboard.config().mood_poll_interval());
    mood_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut suggestion_timer = interval(dashboard.config().suggestion_poll_interval());
    suggestion_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut in_flight = JoinSet::new();
    for pending in dashboard.update(Event::Start) {
        in_flight.spawn(pending);
    }

    loop {
        let event = tokio::select! {
            _ = mood_timer.tick() => Event::MoodTick,
            _ = suggestion_timer.tick() => Event::SuggestionTick,
            Some(joined) = in_flight.join_next() => match joined {
                Ok(event) => event,
                Err(err) => {
                    warn!(error = %err, "store request task failed");
                    continue;
                }
            },
            command = commands.recv() => match command {
                Some(event) => event,
                None => break,
            },
        };
        for pending in dashboard.update(event) {
            in_flight.spawn(pending);
        }
    }

    if !in_flight.is_empty() {
        debug!(count = in_flight.len(), "aborting in-flight requests");
    }
    in_flight.shutdown().await;
    info!("dashboard stopped");
    dashboard
}
