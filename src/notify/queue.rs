//! Notification Queue State Machine
//!
//! At most one toast is visible at a time. Entries advance through
//! `Queued -> Visible -> Hiding` and are purged shortly after hiding so an
//! exit transition can play out. A manual dismissal opens a cooldown
//! window during which no further promotion happens.
//!
//! The queue holds no timers of its own: every operation takes the current
//! instant, and a driver (or a test) supplies time. This keeps the
//! transition rules synchronous and directly testable.

use super::models::Notification;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long a toast stays visible
pub const DISPLAY_DURATION: Duration = Duration::from_secs(6);
/// Promotion pause after a manual dismissal
pub const DISMISS_COOLDOWN: Duration = Duration::from_secs(10 * 60);
/// How long a hidden toast lingers in the backing queue before purge
pub const LINGER_DURATION: Duration = Duration::from_secs(4);

/// Timing configuration for the queue
#[derive(Debug, Clone, Copy)]
pub struct QueueConfig {
    pub display: Duration,
    pub cooldown: Duration,
    pub linger: Duration,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            display: DISPLAY_DURATION,
            cooldown: DISMISS_COOLDOWN,
            linger: LINGER_DURATION,
        }
    }
}

/// Lifecycle phase of a queued notification. Transitions are one-way, so
/// a manually dismissed toast can never be hidden a second time by the
/// auto-dismiss path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Queued,
    Visible { since: Instant },
    Hiding { since: Instant },
}

#[derive(Debug)]
struct Slot {
    note: Notification,
    phase: Phase,
    shown: bool,
}

/// FIFO toast queue with timed promotion and post-dismiss cooldown.
#[derive(Debug)]
pub struct NotificationQueue {
    slots: VecDeque<Slot>,
    cooldown_until: Option<Instant>,
    config: QueueConfig,
}

impl NotificationQueue {
    pub fn new(config: QueueConfig) -> Self {
        Self {
            slots: VecDeque::new(),
            cooldown_until: None,
            config,
        }
    }

    /// Appends a notification to the backing queue. Never fails.
    pub fn enqueue(&mut self, note: Notification) {
        self.slots.push_back(Slot {
            note,
            phase: Phase::Queued,
            shown: false,
        });
    }

    /// Advances the queue to `now`: auto-hides an expired toast, purges
    /// lingering hidden entries, and promotes the oldest unshown entry
    /// when nothing is visible and no cooldown window is open.
    pub fn tick(&mut self, now: Instant) {
        for slot in &mut self.slots {
            if let Phase::Visible { since } = slot.phase {
                if now >= since + self.config.display {
                    slot.phase = Phase::Hiding { since: now };
                }
            }
        }

        let linger = self.config.linger;
        self.slots.retain(|slot| match slot.phase {
            Phase::Hiding { since } => now < since + linger,
            _ => true,
        });

        self.promote(now);
    }

    /// Manually dismisses the visible toast `id`.
    ///
    /// Hides it immediately and extends the cooldown window to the later
    /// of its current deadline and `now + cooldown`. Dismissing an id that
    /// is not currently visible is a no-op returning false.
    pub fn dismiss(&mut self, id: &str, now: Instant) -> bool {
        let Some(slot) = self
            .slots
            .iter_mut()
            .find(|slot| slot.note.id == id && matches!(slot.phase, Phase::Visible { .. }))
        else {
            return false;
        };

        slot.phase = Phase::Hiding { since: now };
        let deadline = now + self.config.cooldown;
        self.cooldown_until = Some(match self.cooldown_until {
            Some(current) if current > deadline => current,
            _ => deadline,
        });
        true
    }

    /// The currently visible notification, if any
    pub fn visible(&self) -> Option<&Notification> {
        self.slots
            .iter()
            .find(|slot| matches!(slot.phase, Phase::Visible { .. }))
            .map(|slot| &slot.note)
    }

    /// Number of entries still waiting to be shown
    pub fn pending(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.shown).count()
    }

    /// Whether a manual-dismiss cooldown window is open at `now`
    pub fn in_cooldown(&self, now: Instant) -> bool {
        self.cooldown_until.is_some_and(|until| now < until)
    }

    fn promote(&mut self, now: Instant) {
        if self.visible().is_some() || self.in_cooldown(now) {
            return;
        }
        // The shown flag guarantees a slot is promoted at most once.
        if let Some(slot) = self
            .slots
            .iter_mut()
            .find(|slot| !slot.shown && slot.phase == Phase::Queued)
        {
            slot.shown = true;
            slot.phase = Phase::Visible { since: now };
        }
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(QueueConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue() -> NotificationQueue {
        NotificationQueue::default()
    }

    fn note(message: &str) -> Notification {
        Notification::info(message)
    }

    #[test]
    fn promotion_shows_one_at_a_time() {
        let t0 = Instant::now();
        let mut q = queue();
        for i in 0..5 {
            q.enqueue(note(&format!("n{i}")));
        }

        q.tick(t0);
        let first = q.visible().expect("first toast visible").id.clone();

        // Rapid ticks while the first toast is on screen never surface a
        // second one.
        for secs in 1..6 {
            q.tick(t0 + Duration::from_secs(secs));
            assert_eq!(q.visible().map(|n| n.id.clone()), Some(first.clone()));
        }
    }

    #[test]
    fn all_entries_show_sequentially_never_concurrently() {
        let t0 = Instant::now();
        let mut q = queue();
        for i in 0..5 {
            q.enqueue(note(&format!("n{i}")));
        }

        let mut seen = Vec::new();
        // Step one second at a time for two minutes; record each distinct
        // visible toast.
        for secs in 0..120 {
            q.tick(t0 + Duration::from_secs(secs));
            if let Some(visible) = q.visible() {
                if seen.last() != Some(&visible.message) {
                    seen.push(visible.message.clone());
                }
            }
        }

        assert_eq!(seen, vec!["n0", "n1", "n2", "n3", "n4"]);
    }

    #[test]
    fn auto_dismiss_hides_after_display_duration() {
        let t0 = Instant::now();
        let mut q = queue();
        q.enqueue(note("toast"));

        q.tick(t0);
        assert!(q.visible().is_some());

        q.tick(t0 + DISPLAY_DURATION - Duration::from_millis(1));
        assert!(q.visible().is_some());

        q.tick(t0 + DISPLAY_DURATION);
        assert!(q.visible().is_none());
    }

    #[test]
    fn hidden_entry_lingers_then_purges() {
        let t0 = Instant::now();
        let mut q = queue();
        q.enqueue(note("toast"));

        q.tick(t0);
        let hide_at = t0 + DISPLAY_DURATION;
        q.tick(hide_at);

        // Still in the backing queue while the exit transition plays.
        assert_eq!(q.pending(), 0);
        assert!(q.slots.len() == 1);

        q.tick(hide_at + LINGER_DURATION);
        assert!(q.slots.is_empty());
    }

    #[test]
    fn a_slot_is_never_promoted_twice() {
        let t0 = Instant::now();
        let mut q = queue();
        q.enqueue(note("only"));

        q.tick(t0);
        let shown_id = q.visible().map(|n| n.id.clone());
        q.tick(t0 + DISPLAY_DURATION);
        assert!(q.visible().is_none());

        // While the slot lingers, promotion must not pick it up again.
        q.tick(t0 + DISPLAY_DURATION + Duration::from_secs(1));
        assert!(q.visible().is_none());
        assert!(shown_id.is_some());
    }

    #[test]
    fn manual_dismiss_opens_cooldown_then_promotion_resumes() {
        let t0 = Instant::now();
        let mut q = queue();
        q.enqueue(note("first"));
        q.enqueue(note("second"));

        q.tick(t0);
        let first = q.visible().expect("visible").id.clone();
        assert!(q.dismiss(&first, t0 + Duration::from_secs(1)));
        assert!(q.visible().is_none());

        // Queue is non-empty, but the cooldown suppresses promotion...
        let within = t0 + Duration::from_secs(1) + DISMISS_COOLDOWN - Duration::from_secs(1);
        q.tick(t0 + Duration::from_secs(30));
        assert!(q.visible().is_none());
        q.tick(within);
        assert!(q.visible().is_none());

        // ...and exactly that one window: after expiry the next entry shows.
        q.tick(t0 + Duration::from_secs(1) + DISMISS_COOLDOWN);
        assert_eq!(q.visible().map(|n| n.message.clone()), Some("second".into()));
    }

    #[test]
    fn repeated_dismissals_extend_to_the_later_deadline() {
        let t0 = Instant::now();
        let mut q = queue();
        q.enqueue(note("a"));
        q.enqueue(note("b"));
        q.enqueue(note("c"));

        q.tick(t0);
        let a = q.visible().expect("a visible").id.clone();
        assert!(q.dismiss(&a, t0));

        q.tick(t0 + DISMISS_COOLDOWN);
        let b = q.visible().expect("b visible").id.clone();
        let second_dismiss = t0 + DISMISS_COOLDOWN + Duration::from_secs(2);
        assert!(q.dismiss(&b, second_dismiss));

        // The window now runs from the second dismissal.
        q.tick(second_dismiss + DISMISS_COOLDOWN - Duration::from_secs(1));
        assert!(q.visible().is_none());
        q.tick(second_dismiss + DISMISS_COOLDOWN);
        assert_eq!(q.visible().map(|n| n.message.clone()), Some("c".into()));
    }

    #[test]
    fn dismissing_a_hidden_or_unknown_id_is_a_no_op() {
        let t0 = Instant::now();
        let mut q = queue();
        q.enqueue(note("toast"));

        q.tick(t0);
        let id = q.visible().expect("visible").id.clone();
        q.tick(t0 + DISPLAY_DURATION); // auto-hidden now

        assert!(!q.dismiss(&id, t0 + DISPLAY_DURATION + Duration::from_secs(1)));
        assert!(!q.dismiss("unknown", t0 + DISPLAY_DURATION + Duration::from_secs(1)));
        assert!(!q.in_cooldown(t0 + DISPLAY_DURATION + Duration::from_secs(1)));
    }

    #[test]
    fn auto_hide_never_restarts_cooldown() {
        let t0 = Instant::now();
        let mut q = queue();
        q.enqueue(note("a"));
        q.enqueue(note("b"));

        q.tick(t0);
        q.tick(t0 + DISPLAY_DURATION); // a auto-hides, b promotes immediately
        assert_eq!(q.visible().map(|n| n.message.clone()), Some("b".into()));
    }
}
