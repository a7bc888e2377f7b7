//! Timer subsystem: fixed-capacity table, millisecond ticks, generational
//! handles.
//!
//! Timers live in a fixed array of slots. [`TimerTable::tick`] is driven by
//! the host with a monotonic `now_ms`; the table never reads a clock itself,
//! which keeps timer behavior fully deterministic under test. A fired
//! repeating timer is rescheduled relative to `now`, so a host that stalls
//! gets one catch-up fire, not a burst.

use crate::dirty::DirtyTracker;
use crate::error::{Error, Result};
use crate::tree::Tree;

/// Callback invoked when a timer fires.
///
/// Callbacks receive a [`TickCtx`] with mutable access to the tree and the
/// dirty tracker, plus a queue for cancelling timers (including the firing
/// one) without aliasing the table.
pub type TimerCallback = Box<dyn FnMut(&mut TickCtx<'_>)>;

/// Handle to a timer: slot index plus generation, so a handle kept after
/// cancellation is detectably stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId {
    index: u32,
    generation: u32,
}

/// Context handed to timer callbacks while the table is mid-scan.
///
/// The table itself is not reachable from here; cancellation requests are
/// queued and applied by the scan between fires, so a callback can cancel
/// any timer, itself included, without re-entering the table.
pub struct TickCtx<'a> {
    pub tree: &'a mut Tree,
    pub dirty: &'a mut DirtyTracker,
    cancels: Vec<TimerId>,
}

impl<'a> TickCtx<'a> {
    /// Build a tick context over the engine's mutable state.
    pub fn new(tree: &'a mut Tree, dirty: &'a mut DirtyTracker) -> Self {
        Self {
            tree,
            dirty,
            cancels: Vec::new(),
        }
    }

    /// Queue a timer for cancellation. Takes effect before the next fire in
    /// the current scan, and before the scan returns.
    pub fn cancel(&mut self, id: TimerId) {
        self.cancels.push(id);
    }
}

// ---------------------------------------------------------------------------
// Slots
// ---------------------------------------------------------------------------

struct TimerSlot {
    generation: u32,
    active: bool,
    period: u64,
    repeat: bool,
    /// Absolute fire deadline; `None` until the first tick observes the
    /// timer and anchors it at `now + period`.
    next_fire: Option<u64>,
    callback: Option<TimerCallback>,
}

impl TimerSlot {
    fn empty() -> Self {
        Self {
            generation: 0,
            active: false,
            period: 0,
            repeat: false,
            next_fire: None,
            callback: None,
        }
    }
}

impl std::fmt::Debug for TimerSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerSlot")
            .field("generation", &self.generation)
            .field("active", &self.active)
            .field("period", &self.period)
            .field("repeat", &self.repeat)
            .field("next_fire", &self.next_fire)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// TimerTable
// ---------------------------------------------------------------------------

/// Fixed-capacity timer table.
#[derive(Debug)]
pub struct TimerTable {
    slots: Vec<TimerSlot>,
}

impl TimerTable {
    /// Create a table holding at most `capacity` concurrent timers.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| TimerSlot::empty()).collect(),
        }
    }

    /// Register a timer firing every `period_ms` milliseconds.
    ///
    /// One-shot timers (`repeat == false`) fire once and free their slot.
    /// The first deadline is anchored lazily: `now + period` at the first
    /// [`tick`](Self::tick) that observes the timer. Fails with
    /// [`Error::ZeroPeriod`] for a zero period and
    /// [`Error::TimerTableFull`] when every slot is occupied.
    pub fn create(&mut self, period_ms: u64, repeat: bool, callback: TimerCallback) -> Result<TimerId> {
        if period_ms == 0 {
            return Err(Error::ZeroPeriod);
        }
        let index = match self.slots.iter().position(|s| !s.active) {
            Some(i) => i,
            None => {
                tracing::warn!(capacity = self.slots.len(), "timer table full");
                return Err(Error::TimerTableFull);
            }
        };

        let slot = &mut self.slots[index];
        slot.generation = slot.generation.wrapping_add(1);
        slot.active = true;
        slot.period = period_ms;
        slot.repeat = repeat;
        slot.next_fire = None;
        slot.callback = Some(callback);

        let id = TimerId {
            index: index as u32,
            generation: slot.generation,
        };
        tracing::trace!(?id, period_ms, repeat, "timer created");
        Ok(id)
    }

    /// Cancel a timer. A stale or already-cancelled id is a no-op.
    pub fn cancel(&mut self, id: TimerId) {
        if let Some(slot) = self.slots.get_mut(id.index as usize) {
            if slot.active && slot.generation == id.generation {
                slot.active = false;
                slot.callback = None;
                tracing::trace!(?id, "timer cancelled");
            }
        }
    }

    /// Whether the id addresses a live timer.
    pub fn contains(&self, id: TimerId) -> bool {
        self.slots
            .get(id.index as usize)
            .is_some_and(|s| s.active && s.generation == id.generation)
    }

    /// Number of live timers.
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.active).count()
    }

    /// The table capacity.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Whether every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(|s| s.active)
    }

    /// Advance the table to `now_ms`, firing every due timer once.
    ///
    /// Slots are scanned in index order. A timer whose deadline was never
    /// anchored gets `now + period` and does not fire this tick. A due
    /// one-shot timer fires and frees its slot; a due repeating timer fires
    /// and is rescheduled to `now + period`. Cancellations queued in `ctx`
    /// by earlier callbacks are honored before each subsequent fire.
    /// Returns the number of timers fired.
    pub fn tick(&mut self, now_ms: u64, ctx: &mut TickCtx<'_>) -> usize {
        let mut fired = 0;

        for index in 0..self.slots.len() {
            self.apply_cancels(ctx);

            let slot = &mut self.slots[index];
            if !slot.active {
                continue;
            }
            let deadline = match slot.next_fire {
                Some(d) => d,
                None => {
                    slot.next_fire = Some(now_ms + slot.period);
                    continue;
                }
            };
            if now_ms < deadline {
                continue;
            }

            // Take the callback out so the slot isn't aliased while it runs.
            let id = TimerId {
                index: index as u32,
                generation: slot.generation,
            };
            let mut callback = match slot.callback.take() {
                Some(cb) => cb,
                None => continue,
            };
            if slot.repeat {
                slot.next_fire = Some(now_ms + slot.period);
            } else {
                slot.active = false;
                slot.next_fire = None;
            }

            tracing::trace!(?id, now_ms, "timer fired");
            callback(ctx);
            fired += 1;

            self.apply_cancels(ctx);
            let slot = &mut self.slots[index];
            // Restore the callback unless the timer ended this tick (one-shot
            // expiry, self-cancel, or slot reuse by a create from the callback).
            if slot.active && slot.generation == id.generation && slot.callback.is_none() {
                slot.callback = Some(callback);
            }
        }

        self.apply_cancels(ctx);
        fired
    }

    fn apply_cancels(&mut self, ctx: &mut TickCtx<'_>) {
        for id in ctx.cancels.drain(..) {
            if let Some(slot) = self.slots.get_mut(id.index as usize) {
                if slot.active && slot.generation == id.generation {
                    slot.active = false;
                    slot.callback = None;
                    tracing::trace!(?id, "timer cancelled from callback");
                }
            }
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
