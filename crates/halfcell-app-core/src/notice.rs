// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! User-visible notices with TTL + dedupe.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Notice severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Informational note.
    Info,
    /// Something was skipped or adjusted.
    Warn,
    /// An operation failed and changed nothing.
    Error,
}

/// Identifier for a notice entry.
pub type NoticeId = u64;

/// Notice data stored in the queue.
#[derive(Debug, Clone)]
pub struct Notice {
    /// Stable identifier.
    pub id: NoticeId,
    /// Severity.
    pub kind: NoticeKind,
    /// Short message.
    pub title: String,
    /// Optional detail.
    pub body: Option<String>,
    /// Time-to-live.
    pub ttl: Duration,
    /// Creation (or last refresh) time.
    pub created: Instant,
}

impl Notice {
    fn alive_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created) < self.ttl
    }
}

/// Display-ready view of a notice.
#[derive(Debug, Clone, PartialEq)]
pub struct NoticeView {
    /// Stable identifier.
    pub id: NoticeId,
    /// Severity.
    pub kind: NoticeKind,
    /// Short message.
    pub title: String,
    /// Optional detail.
    pub body: Option<String>,
    /// 1.0 -> just created, 0.0 -> expired.
    pub progress: f32,
}

/// Bounded notice queue. Oldest entries fall off when full.
#[derive(Debug)]
pub struct Notices {
    queue: VecDeque<Notice>,
    max: usize,
    dedupe_window: Duration,
    next_id: NoticeId,
}

impl Default for Notices {
    fn default() -> Self {
        Self::new(8)
    }
}

impl Notices {
    /// Create a queue holding at most `max` notices.
    pub fn new(max: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            max: max.max(1),
            dedupe_window: Duration::from_millis(500),
            next_id: 1,
        }
    }

    /// Override how long an identical notice is folded into the existing one.
    pub fn with_dedupe_window(mut self, window: Duration) -> Self {
        self.dedupe_window = window;
        self
    }

    /// Push a notice. An identical one (kind, title, body) pushed within the
    /// dedupe window is refreshed instead and keeps its id.
    pub fn push<S>(
        &mut self,
        kind: NoticeKind,
        title: S,
        body: Option<String>,
        ttl: Duration,
        now: Instant,
    ) -> NoticeId
    where
        S: Into<String>,
    {
        let title = title.into();

        if let Some(existing) = self.queue.iter_mut().find(|n| {
            n.kind == kind
                && n.title == title
                && n.body == body
                && now.saturating_duration_since(n.created) <= self.dedupe_window
        }) {
            existing.created = now;
            existing.ttl = ttl;
            return existing.id;
        }

        let id = self.next_id;
        self.next_id += 1;
        if self.queue.len() == self.max {
            self.queue.pop_front();
        }
        self.queue.push_back(Notice {
            id,
            kind,
            title,
            body,
            ttl,
            created: now,
        });
        id
    }

    /// Drop expired notices.
    pub fn retain_visible(&mut self, now: Instant) {
        self.queue.retain(|n| n.alive_at(now));
    }

    /// Live notices, oldest first, with remaining-life ratios.
    pub fn visible(&self, now: Instant) -> Vec<NoticeView> {
        self.queue
            .iter()
            .filter(|n| n.alive_at(now))
            .map(|n| NoticeView {
                id: n.id,
                kind: n.kind,
                title: n.title.clone(),
                body: n.body.clone(),
                progress: 1.0
                    - (now.saturating_duration_since(n.created).as_secs_f32()
                        / n.ttl.as_secs_f32()),
            })
            .collect()
    }

    /// Most recently pushed notice still queued.
    pub fn latest(&self) -> Option<&Notice> {
        self.queue.back()
    }

    /// Number of queued notices (expired ones included until pruned).
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns `true` when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(3);

    #[test]
    fn identical_notices_within_window_fold_together() {
        let t0 = Instant::now();
        let mut notices = Notices::new(4);
        let a = notices.push(NoticeKind::Error, "paste failed", None, TTL, t0);
        let b = notices.push(
            NoticeKind::Error,
            "paste failed",
            None,
            TTL,
            t0 + Duration::from_millis(200),
        );
        assert_eq!(a, b);
        assert_eq!(notices.len(), 1);

        let c = notices.push(
            NoticeKind::Error,
            "paste failed",
            None,
            TTL,
            t0 + Duration::from_secs(2),
        );
        assert_ne!(a, c);
        assert_eq!(notices.len(), 2);
    }

    #[test]
    fn expired_notices_disappear() {
        let t0 = Instant::now();
        let mut notices = Notices::default();
        notices.push(NoticeKind::Info, "copied", None, TTL, t0);
        assert_eq!(notices.visible(t0 + Duration::from_secs(1)).len(), 1);
        assert!(notices.visible(t0 + TTL).is_empty());
        notices.retain_visible(t0 + TTL);
        assert!(notices.is_empty());
    }

    #[test]
    fn zero_ttl_notice_is_never_shown() {
        let t0 = Instant::now();
        let mut notices = Notices::default();
        notices.push(NoticeKind::Info, "blink", None, Duration::ZERO, t0);
        notices.push(NoticeKind::Info, "short", None, Duration::from_nanos(1), t0);
        let views = notices.visible(t0);
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].title, "short");
        assert!((views[0].progress - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn full_queue_drops_the_oldest() {
        let t0 = Instant::now();
        let mut notices = Notices::new(2);
        notices.push(NoticeKind::Info, "one", None, TTL, t0);
        notices.push(NoticeKind::Info, "two", None, TTL, t0);
        notices.push(NoticeKind::Warn, "three", Some("detail".into()), TTL, t0);
        let titles: Vec<String> = notices.visible(t0).into_iter().map(|n| n.title).collect();
        assert_eq!(titles, ["two", "three"]);
        assert_eq!(notices.latest().map(|n| n.kind), Some(NoticeKind::Warn));
    }
}
