// Periodic session effects, modeled as cancelable scheduled tasks with
// explicit handles. Cancellation is synchronous and idempotent; the FSM
// additionally ignores events that arrive in a non-running state, so a
// racing in-flight event can never mutate a canceled session.

use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// Elapsed-time tick period
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Simulated repetition period
pub const REP_PERIOD: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectEvent {
    Tick,
    Rep,
}

/// Handle to one repeating effect task
#[derive(Debug)]
pub struct TickHandle {
    handle: JoinHandle<()>,
}

impl TickHandle {
    fn spawn(period: Duration, event: EffectEvent, tx: UnboundedSender<EffectEvent>) -> Self {
        let handle = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut interval = tokio::time::interval_at(start, period);
            loop {
                interval.tick().await;
                if tx.send(event).is_err() {
                    break;
                }
            }
        });
        Self { handle }
    }

    /// Abort the task. Safe to call more than once.
    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// The pair of periodic effects owned by a running session
#[derive(Debug, Default)]
pub struct EffectHandles {
    tick: Option<TickHandle>,
    rep: Option<TickHandle>,
}

impl EffectHandles {
    pub fn is_active(&self) -> bool {
        self.tick.is_some() || self.rep.is_some()
    }

    /// Cancel both effects. Idempotent.
    pub fn cancel_all(&mut self) {
        if let Some(tick) = self.tick.take() {
            tick.cancel();
        }
        self.cancel_rep();
    }

    /// Cancel just the repetition effect (it stops itself at the target)
    pub fn cancel_rep(&mut self) {
        if let Some(rep) = self.rep.take() {
            rep.cancel();
        }
    }
}

/// Channel the effect tasks publish into. The owning loop holds the
/// receiving half and applies events to the flow one at a time.
#[derive(Debug)]
pub struct EffectChannel {
    tx: UnboundedSender<EffectEvent>,
    rx: UnboundedReceiver<EffectEvent>,
}

impl EffectChannel {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    /// Spawn the 1-second tick and 3-second rep effects
    pub fn spawn_effects(&self) -> EffectHandles {
        EffectHandles {
            tick: Some(TickHandle::spawn(
                TICK_PERIOD,
                EffectEvent::Tick,
                self.tx.clone(),
            )),
            rep: Some(TickHandle::spawn(
                REP_PERIOD,
                EffectEvent::Rep,
                self.tx.clone(),
            )),
        }
    }

    /// Next queued event, without waiting
    pub fn try_next(&mut self) -> Option<EffectEvent> {
        self.rx.try_recv().ok()
    }

    /// Wait for the next event
    pub async fn next(&mut self) -> Option<EffectEvent> {
        self.rx.recv().await
    }

    /// Discard everything currently queued. Called after canceling
    /// handles so no stale tick survives a transition away from Running.
    pub fn drain(&mut self) -> usize {
        let mut drained = 0;
        while self.rx.try_recv().is_ok() {
            drained += 1;
        }
        drained
    }
}

impl Default for EffectChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_effects_fire_in_order() {
        tokio::time::pause();

        let mut channel = EffectChannel::new();
        let mut handles = channel.spawn_effects();

        tokio::time::advance(Duration::from_secs(3)).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        let mut ticks = 0;
        let mut reps = 0;
        while let Some(event) = channel.try_next() {
            match event {
                EffectEvent::Tick => ticks += 1,
                EffectEvent::Rep => reps += 1,
            }
        }
        assert_eq!(ticks, 3);
        assert_eq!(reps, 1);

        handles.cancel_all();
    }

    #[tokio::test]
    async fn test_cancel_stops_events() {
        tokio::time::pause();

        let mut channel = EffectChannel::new();
        let mut handles = channel.spawn_effects();

        tokio::time::advance(Duration::from_secs(2)).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        handles.cancel_all();
        channel.drain();

        tokio::time::advance(Duration::from_secs(10)).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        assert!(channel.try_next().is_none());
        assert!(!handles.is_active());

        // Idempotent
        handles.cancel_all();
    }
}
