//! Cancellable timers for the active activity.
//!
//! Timer tasks never touch game state. They only send a [`Fired`] event back
//! to the owner, tagged with the epoch they were scheduled in. Cancelling
//! aborts the tasks and bumps the epoch, so an event that was already queued
//! is recognised as stale and dropped.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use train_core::model::ActivityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Hide the stimulus and open input.
    Reveal,
    /// Play element `n` of a paced stimulus.
    Cue(usize),
    /// The traffic light's time is up.
    SignalCleared,
    NextRound,
    /// One second of a time-boxed activity has passed.
    Tick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub activity: ActivityId,
    pub epoch: u64,
    pub event: TimerEvent,
}

pub struct TimerSet {
    tx: mpsc::UnboundedSender<Fired>,
    rx: mpsc::UnboundedReceiver<Fired>,
    epoch: u64,
    tasks: Vec<JoinHandle<()>>,
}

impl TimerSet {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx,
            epoch: 0,
            tasks: Vec::new(),
        }
    }

    /// Fire `event` once after `delay`.
    ///
    /// Must be called from inside a tokio runtime.
    pub fn once(&mut self, activity: ActivityId, delay: Duration, event: TimerEvent) {
        let fired = self.tag(activity, event);
        let tx = self.tx.clone();
        self.tasks.push(tokio::spawn(async move {
            time::sleep(delay).await;
            // The receiver lives as long as the set; a send error means it is gone.
            let _ = tx.send(fired);
        }));
    }

    /// Fire `event` every `period`, starting one period from now.
    pub fn every(&mut self, activity: ActivityId, period: Duration, event: TimerEvent) {
        let fired = self.tag(activity, event);
        let tx = self.tx.clone();
        self.tasks.push(tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                if tx.send(fired).is_err() {
                    break;
                }
            }
        }));
    }

    /// Abort every scheduled task and invalidate events already queued.
    pub fn cancel_all(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
        self.epoch += 1;
    }

    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    #[must_use]
    pub fn is_current(&self, fired: &Fired) -> bool {
        fired.epoch == self.epoch
    }

    /// Tasks that have not finished yet.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tasks.iter().filter(|task| !task.is_finished()).count()
    }

    /// Wait for the next event from the current epoch.
    ///
    /// Waits forever when nothing is scheduled.
    pub async fn next(&mut self) -> Option<Fired> {
        loop {
            let fired = self.rx.recv().await?;
            if self.is_current(&fired) {
                self.tasks.retain(|task| !task.is_finished());
                return Some(fired);
            }
        }
    }

    fn tag(&self, activity: ActivityId, event: TimerEvent) -> Fired {
        Fired {
            activity,
            epoch: self.epoch,
            event,
        }
    }
}

impl Default for TimerSet {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TimerSet {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACTIVITY: ActivityId = ActivityId::DigitMemory;

    #[tokio::test(start_paused = true)]
    async fn once_fires_after_its_delay() {
        let mut timers = TimerSet::new();
        let started = Instant::now();
        timers.once(ACTIVITY, Duration::from_secs(3), TimerEvent::Reveal);

        let fired = timers.next().await.unwrap();
        assert_eq!(fired.event, TimerEvent::Reveal);
        assert_eq!(fired.activity, ACTIVITY);
        assert!(started.elapsed() >= Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn events_arrive_in_schedule_order() {
        let mut timers = TimerSet::new();
        timers.once(ACTIVITY, Duration::from_millis(1800), TimerEvent::Cue(1));
        timers.once(ACTIVITY, Duration::from_millis(1000), TimerEvent::Cue(0));
        timers.once(ACTIVITY, Duration::from_millis(2600), TimerEvent::Reveal);

        let mut order = Vec::new();
        for _ in 0..3 {
            order.push(timers.next().await.unwrap().event);
        }
        assert_eq!(
            order,
            vec![TimerEvent::Cue(0), TimerEvent::Cue(1), TimerEvent::Reveal]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn every_repeats_until_cancelled() {
        let mut timers = TimerSet::new();
        timers.every(ACTIVITY, Duration::from_secs(1), TimerEvent::Tick);
        for _ in 0..3 {
            assert_eq!(timers.next().await.unwrap().event, TimerEvent::Tick);
        }

        timers.cancel_all();
        let waited = time::timeout(Duration::from_secs(10), timers.next()).await;
        assert!(waited.is_err(), "cancelled ticker must stay silent");
    }

    #[tokio::test(start_paused = true)]
    async fn queued_events_from_an_old_epoch_are_dropped() {
        let mut timers = TimerSet::new();
        timers.once(ACTIVITY, Duration::from_millis(10), TimerEvent::NextRound);
        time::sleep(Duration::from_millis(50)).await;

        // The event is already in the channel when we cancel.
        let stale_epoch = timers.epoch();
        timers.cancel_all();
        assert_ne!(timers.epoch(), stale_epoch);

        timers.once(ACTIVITY, Duration::from_secs(1), TimerEvent::Reveal);
        let fired = timers.next().await.unwrap();
        assert_eq!(fired.event, TimerEvent::Reveal);
    }
}
