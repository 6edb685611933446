//! Scroll-driven visibility notifications
//!
//! The terminal analog of intersection observation: effects register interest
//! in a section and are notified when its visible fraction crosses their
//! threshold as the user scrolls. One shared tracker serves every
//! subscription; internally subscriptions are bucketed by
//! (threshold, lead rows) so each distinct observation geometry is computed
//! once per pass no matter how many subscribers share it.

use std::collections::BTreeMap;

use crate::page::{PageLayout, SectionId};
use crate::viewport::Viewport;

/// Default visible fraction that counts as "entered"
pub const DEFAULT_THRESHOLD: f64 = 0.10;
/// Threshold for the skill/stat entrance effects
pub const EFFECT_THRESHOLD: f64 = 0.50;

/// Whether a subscription survives its first qualifying crossing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireMode {
    /// Removed after the first enter; a later crossing does nothing
    Once,
    /// Fires on every enter, and on every leave when `notify_leave` is set
    Repeating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

/// Observation geometry shared by a bucket of subscriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct BucketKey {
    /// Threshold in tenths of a percent, so the key stays orderable
    threshold_millis: u16,
    /// Extra rows granted below the viewport edge (pre-trigger margin)
    lead_rows: u16,
}

#[derive(Debug)]
struct Subscription {
    id: SubscriptionId,
    section: SectionId,
    mode: FireMode,
    notify_leave: bool,
    /// Last observed state, to detect crossings rather than levels
    entered: bool,
}

/// A visibility crossing delivered to the app loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityEvent {
    pub id: SubscriptionId,
    pub section: SectionId,
    /// True for enter, false for leave
    pub entered: bool,
}

#[derive(Debug, Default)]
pub struct VisibilityTracker {
    buckets: BTreeMap<BucketKey, Vec<Subscription>>,
    next_id: u64,
}

impl VisibilityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register interest in a section. `lead_rows` extends the viewport
    /// downward so an effect can begin slightly before its section scrolls
    /// fully into view.
    pub fn subscribe(
        &mut self,
        section: SectionId,
        mode: FireMode,
        threshold: f64,
        lead_rows: u16,
    ) -> SubscriptionId {
        self.subscribe_inner(section, mode, false, threshold, lead_rows)
    }

    /// Like `subscribe`, but repeating subscriptions also hear leave events
    pub fn subscribe_with_leave(
        &mut self,
        section: SectionId,
        threshold: f64,
        lead_rows: u16,
    ) -> SubscriptionId {
        self.subscribe_inner(section, FireMode::Repeating, true, threshold, lead_rows)
    }

    fn subscribe_inner(
        &mut self,
        section: SectionId,
        mode: FireMode,
        notify_leave: bool,
        threshold: f64,
        lead_rows: u16,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;

        let key = BucketKey {
            threshold_millis: (threshold.clamp(0.0, 1.0) * 1000.0).round() as u16,
            lead_rows,
        };
        self.buckets.entry(key).or_default().push(Subscription {
            id,
            section,
            mode,
            notify_leave,
            entered: false,
        });
        id
    }

    /// Drop a subscription before it fires (or a repeating one at any time)
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        for subs in self.buckets.values_mut() {
            subs.retain(|s| s.id != id);
        }
    }

    /// Number of live subscriptions (one-shots disappear after firing)
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Evaluate every subscription against the current scroll position and
    /// collect the crossings. Call after any scroll or layout change.
    pub fn evaluate(&mut self, layout: &PageLayout, viewport: &Viewport) -> Vec<VisibilityEvent> {
        let mut events = Vec::new();

        for (key, subs) in &mut self.buckets {
            let threshold = f64::from(key.threshold_millis) / 1000.0;
            let view_top = viewport.top;
            let view_bottom = viewport.bottom() + key.lead_rows as usize;

            subs.retain_mut(|sub| {
                let Some(span) = layout.span(sub.section) else {
                    // Section absent from the page: degrade to never firing
                    return true;
                };

                let overlap_start = span.start.max(view_top);
                let overlap_end = span.end().min(view_bottom);
                let overlap = overlap_end.saturating_sub(overlap_start);
                let fraction = overlap as f64 / span.height.max(1) as f64;

                let inside = fraction >= threshold;
                let was_inside = sub.entered;
                sub.entered = inside;

                if inside && !was_inside {
                    events.push(VisibilityEvent {
                        id: sub.id,
                        section: sub.section,
                        entered: true,
                    });
                    // One-shots are removed right here, so a second crossing
                    // cannot reach them
                    return sub.mode == FireMode::Repeating;
                }

                if !inside && was_inside && sub.notify_leave {
                    events.push(VisibilityEvent {
                        id: sub.id,
                        section: sub.section,
                        entered: false,
                    });
                }
                true
            });
        }

        events
    }
}
