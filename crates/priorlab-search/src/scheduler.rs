// ─────────────────────────────────────────────────────────────────────
// PriorLab — Cooperative Animation Loop
// ─────────────────────────────────────────────────────────────────────
//! Drives a [`Steppable`] target at a fixed cadence from whatever timer
//! the host has (frame callback, event loop, or a sleeping thread).
//!
//! Guarantees:
//! - at most one transition in flight (`try_lock` on the target),
//! - `stop` is immediate: every ticket issued before it turns stale,
//! - `step` and `reset_with` stop any run before touching the target.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use priorlab_types::{LabResult, SchedulerConfig};

/// Anything the loop can advance one transition at a time.
pub trait Steppable {
    /// One transition; `false` once there is nothing left to do.
    fn advance(&mut self) -> bool;
}

/// Proof of a particular `run()`; invalidated by stop, reset, step,
/// or the target finishing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickTicket {
    epoch: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Ticket predates a stop/reset; the caller should drop it.
    Stale,
    /// Interval has not elapsed since the last step.
    Waiting,
    /// Another transition is in flight.
    Busy,
    /// One transition ran and the target wants more.
    Stepped,
    /// The target terminated; the loop has stopped itself.
    Finished,
}

/// Shared run/stop control, cloneable across owners and threads.
#[derive(Debug, Clone, Default)]
pub struct LoopHandle {
    running: Arc<AtomicBool>,
    epoch: Arc<AtomicU64>,
}

impl LoopHandle {
    /// Stop any run. Returns whether one was active.
    pub fn stop(&self) -> bool {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        let was_running = self.running.swap(false, Ordering::SeqCst);
        if was_running {
            log::info!("animation loop: stopped");
        }
        was_running
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn is_current(&self, ticket: TickTicket) -> bool {
        self.running.load(Ordering::SeqCst) && self.epoch.load(Ordering::SeqCst) == ticket.epoch
    }
}

pub struct AnimationLoop<S> {
    target: Mutex<S>,
    control: LoopHandle,
    interval: Duration,
    last_step: Mutex<Option<Instant>>,
}

impl<S: Steppable> AnimationLoop<S> {
    pub fn new(target: S, interval: Duration) -> Self {
        Self {
            target: Mutex::new(target),
            control: LoopHandle::default(),
            interval,
            last_step: Mutex::new(None),
        }
    }

    /// # Errors
    /// [`priorlab_types::LabError::Config`] for a zero interval.
    pub fn from_config(target: S, config: &SchedulerConfig) -> LabResult<Self> {
        config.validate()?;
        Ok(Self::new(target, Duration::from_millis(config.tick_interval_ms)))
    }

    pub fn handle(&self) -> LoopHandle {
        self.control.clone()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.control.is_running()
    }

    /// Enter run mode. `None` when a run is already active.
    ///
    /// The first tick of a fresh run steps without waiting.
    pub fn run(&self) -> Option<TickTicket> {
        if self.control.running.swap(true, Ordering::SeqCst) {
            return None;
        }
        *self.last_step.lock() = None;
        let epoch = self.control.epoch.load(Ordering::SeqCst);
        log::debug!("animation loop: run (epoch {epoch}, every {:?})", self.interval);
        Some(TickTicket { epoch })
    }

    /// Timer callback for run mode.
    pub fn tick(&self, ticket: TickTicket, now: Instant) -> TickOutcome {
        if !self.control.is_current(ticket) {
            log::trace!("animation loop: stale ticket (epoch {})", ticket.epoch);
            return TickOutcome::Stale;
        }

        let Some(mut target) = self.target.try_lock() else {
            log::trace!("animation loop: busy");
            return TickOutcome::Busy;
        };

        // A stop may have landed while we were acquiring the target
        if !self.control.is_current(ticket) {
            return TickOutcome::Stale;
        }

        {
            let mut last = self.last_step.lock();
            if let Some(prev) = *last {
                if now.saturating_duration_since(prev) < self.interval {
                    return TickOutcome::Waiting;
                }
            }
            *last = Some(now);
        }

        if target.advance() {
            log::trace!("animation loop: stepped");
            TickOutcome::Stepped
        } else {
            drop(target);
            self.finish(ticket);
            TickOutcome::Finished
        }
    }

    fn finish(&self, ticket: TickTicket) {
        let retired = self
            .control
            .epoch
            .compare_exchange(
                ticket.epoch,
                ticket.epoch + 1,
                Ordering::SeqCst,
                Ordering::SeqCst,
            )
            .is_ok();
        if retired {
            self.control.running.store(false, Ordering::SeqCst);
            log::info!("animation loop: run finished");
        }
    }

    /// Stop any run.
    pub fn stop(&self) -> bool {
        self.control.stop()
    }

    /// Stop any run, then perform exactly one transition.
    pub fn step(&self) -> bool {
        self.control.stop();
        let more = self.target.lock().advance();
        log::trace!("animation loop: single step (more={more})");
        more
    }

    /// Stop any run, then reinitialize the target through `f`.
    pub fn reset_with<F>(&self, f: F)
    where
        F: FnOnce(&mut S),
    {
        self.control.stop();
        f(&mut *self.target.lock());
        *self.last_step.lock() = None;
    }

    /// Read the target; blocks while a transition is in flight.
    pub fn with_target<T, F>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        f(&*self.target.lock())
    }

    pub fn into_inner(self) -> S {
        self.target.into_inner()
    }

    /// Run to completion on the calling thread, sleeping between ticks.
    ///
    /// Returns the number of transitions taken. Ends early when another
    /// owner stops the loop through a [`LoopHandle`]; returns 0 if a run
    /// was already active.
    pub fn run_paced(&self) -> usize {
        let Some(ticket) = self.run() else {
            return 0;
        };
        let mut steps = 0;
        loop {
            let nap = match self.tick(ticket, Instant::now()) {
                TickOutcome::Stale => break,
                TickOutcome::Finished => {
                    steps += 1;
                    break;
                }
                TickOutcome::Stepped => {
                    steps += 1;
                    self.interval
                }
                TickOutcome::Waiting | TickOutcome::Busy => self.interval / 4,
            };
            thread::sleep(nap);
        }
        log::debug!("animation loop: paced run ended after {steps} steps");
        steps
    }
}
