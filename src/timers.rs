//! Cancellable timer bookkeeping.
//!
//! Timers never run on their own: the owner passes the current [`Instant`]
//! to [`TimerBook::due`] and gets back whatever has fired. Dropping the book
//! drops every pending timer with it.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

/// Shortest interval a repeating timer runs at. Shorter requests are raised to it.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Handle to a scheduled timer. Ids are never reused within a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
#[display("timer#{_0}")]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Timer<K> {
    kind: K,
    deadline: Instant,
    repeat: Option<Repeat>,
}

#[derive(Debug, Clone, Copy)]
struct Repeat {
    interval: Duration,
    expires: Instant,
}

/// Table of pending timers tagged with a kind `K`.
#[derive(Debug, Clone)]
pub struct TimerBook<K> {
    timers: BTreeMap<TimerId, Timer<K>>,
    next_id: u64,
}

impl<K: Copy + std::fmt::Debug> TimerBook<K> {
    /// Creates an empty book.
    pub fn new() -> Self {
        Self {
            timers: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Fires once, `delay` after `now`.
    #[instrument(skip(self, now))]
    pub fn schedule_once(&mut self, kind: K, now: Instant, delay: Duration) -> TimerId {
        self.insert(Timer {
            kind,
            deadline: now + delay,
            repeat: None,
        })
    }

    /// Fires every `interval` after `now` until `lifetime` has elapsed.
    ///
    /// Intervals below [`MIN_INTERVAL`] are raised to it.
    #[instrument(skip(self, now))]
    pub fn schedule_repeating(
        &mut self,
        kind: K,
        now: Instant,
        interval: Duration,
        lifetime: Duration,
    ) -> TimerId {
        let interval = if interval < MIN_INTERVAL {
            warn!(?interval, min = ?MIN_INTERVAL, "Repeat interval too short, clamping");
            MIN_INTERVAL
        } else {
            interval
        };
        self.insert(Timer {
            kind,
            deadline: now + interval,
            repeat: Some(Repeat {
                interval,
                expires: now + lifetime,
            }),
        })
    }

    /// Cancels a timer. Returns false if it had already fired or been cancelled.
    #[instrument(skip(self))]
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let removed = self.timers.remove(&id).is_some();
        if removed {
            debug!(%id, "Timer cancelled");
        }
        removed
    }

    /// Cancels every pending timer.
    pub fn cancel_all(&mut self) {
        if !self.timers.is_empty() {
            debug!(count = self.timers.len(), "Cancelling all timers");
        }
        self.timers.clear();
    }

    /// Whether `id` is still waiting to fire.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// True when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Earliest deadline among pending timers.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.values().map(|t| t.deadline).min()
    }

    /// Collects every timer whose deadline is at or before `now`, earliest first.
    ///
    /// One-shot timers are removed. Repeating timers are re-armed one interval
    /// later; once their lifetime has run out they are dropped without firing.
    #[instrument(skip(self, now), fields(pending = self.timers.len()))]
    pub fn due(&mut self, now: Instant) -> Vec<(TimerId, K)> {
        let mut ready: Vec<(Instant, TimerId)> = self
            .timers
            .iter()
            .filter(|(_, t)| t.deadline <= now)
            .map(|(id, t)| (t.deadline, *id))
            .collect();
        ready.sort();

        let mut fired = Vec::with_capacity(ready.len());
        for (_, id) in ready {
            let Some(timer) = self.timers.get_mut(&id) else {
                continue;
            };
            match timer.repeat {
                None => {
                    fired.push((id, timer.kind));
                    self.timers.remove(&id);
                }
                Some(repeat) if now >= repeat.expires => {
                    debug!(%id, "Repeating timer expired");
                    self.timers.remove(&id);
                }
                Some(repeat) => {
                    fired.push((id, timer.kind));
                    // Missed ticks are skipped, not fired in a burst.
                    match next_tick(timer.deadline, repeat.interval, now) {
                        Some(next) => timer.deadline = next,
                        None => {
                            debug!(%id, "Repeating timer ran past the clock range");
                            self.timers.remove(&id);
                        }
                    }
                }
            }
        }
        fired
    }

    fn insert(&mut self, timer: Timer<K>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        debug!(%id, kind = ?timer.kind, "Timer scheduled");
        self.timers.insert(id, timer);
        id
    }
}

/// First tick after `now` on the grid `deadline + n * interval`.
///
/// `interval` must be non-zero.
fn next_tick(deadline: Instant, interval: Duration, now: Instant) -> Option<Instant> {
    let missed = now.duration_since(deadline).as_nanos() / interval.as_nanos() + 1;
    let step = interval.checked_mul(u32::try_from(missed).ok()?)?;
    deadline.checked_add(step)
}

impl<K: Copy + std::fmt::Debug> Default for TimerBook<K> {
    fn default() -> Self {
        Self::new()
    }
}
