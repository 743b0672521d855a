//! Event types and sinks for observing layout runs.
//!
//! This module defines [`LayoutEvent`] and a set of sinks and adapters to emit,
//! collect, or forward events while a [`crate::placement::Placer`] commits objects
//! or a [`crate::town::TownGenerator`] walks its zones.
use crate::geometry::Footprint;
use crate::host::ObjectHandle;
use crate::placement::{DropReason, DropStats};
use crate::town::{LayoutSpec, Zone};

/// Describes events emitted during layout generation.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum LayoutEvent {
    /// Emitted when a town run starts.
    RunStarted {
        /// Validated layout spec of the run.
        spec: LayoutSpec,
    },

    /// Emitted when a town run finishes all zones.
    RunFinished {
        /// Objects committed over the whole run.
        placed: usize,
        /// Drops over the whole run.
        drops: DropStats,
    },

    /// Emitted when a zone starts.
    ZoneStarted {
        /// The zone.
        zone: Zone,
    },

    /// Emitted when a zone finishes.
    ZoneFinished {
        /// The zone.
        zone: Zone,
        /// Objects committed by this zone.
        placed: usize,
        /// Drops recorded by this zone.
        drops: DropStats,
    },

    /// Emitted when an object is committed.
    PlacementMade {
        /// Zone active when the object was placed.
        zone: Option<Zone>,
        /// Label applied to the object.
        label: String,
        /// Handle returned by the host.
        handle: ObjectHandle,
        /// Committed footprint.
        footprint: Footprint,
        /// 1-based attempt that succeeded.
        attempt: usize,
    },

    /// Emitted when a placement request produced no object.
    PlacementDropped {
        /// Zone active when the request was made.
        zone: Option<Zone>,
        /// Label the object would have had.
        label: String,
        /// Why the request was dropped.
        reason: DropReason,
    },

    /// Non-fatal warning generated during layout.
    Warning {
        /// Context string (e.g. zone, asset name).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// Discriminant of [`LayoutEvent`] used for sink filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutEventKind {
    RunStarted,
    RunFinished,
    ZoneStarted,
    ZoneFinished,
    PlacementMade,
    PlacementDropped,
    Warning,
}

impl LayoutEvent {
    pub fn kind(&self) -> LayoutEventKind {
        match self {
            LayoutEvent::RunStarted { .. } => LayoutEventKind::RunStarted,
            LayoutEvent::RunFinished { .. } => LayoutEventKind::RunFinished,
            LayoutEvent::ZoneStarted { .. } => LayoutEventKind::ZoneStarted,
            LayoutEvent::ZoneFinished { .. } => LayoutEventKind::ZoneFinished,
            LayoutEvent::PlacementMade { .. } => LayoutEventKind::PlacementMade,
            LayoutEvent::PlacementDropped { .. } => LayoutEventKind::PlacementDropped,
            LayoutEvent::Warning { .. } => LayoutEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`LayoutEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: LayoutEvent);

    /// Whether the sink is interested in events of `kind`. Emitters skip building
    /// events nobody wants.
    #[inline]
    fn wants(&self, _kind: LayoutEventKind) -> bool {
        true
    }

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = LayoutEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: LayoutEvent) {}

    #[inline]
    fn wants(&self, _kind: LayoutEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(LayoutEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(LayoutEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(LayoutEvent),
{
    #[inline]
    fn send(&mut self, event: LayoutEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects events in a `Vec`, optionally filtered by kind.
#[derive(Default)]
pub struct VecSink {
    events: Vec<LayoutEvent>,
    only: Option<Vec<LayoutEventKind>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            only: None,
        }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            events: Vec::with_capacity(cap),
            only: None,
        }
    }

    /// Collect only events of the listed kinds (builder-style).
    pub fn only(mut self, kinds: &[LayoutEventKind]) -> Self {
        self.only = Some(kinds.to_vec());
        self
    }

    pub fn into_inner(self) -> Vec<LayoutEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[LayoutEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: LayoutEvent) {
        if self.wants(event.kind()) {
            self.events.push(event);
        }
    }

    fn wants(&self, kind: LayoutEventKind) -> bool {
        self.only.as_ref().is_none_or(|kinds| kinds.contains(&kind))
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: LayoutEvent) {
        if self.sinks.is_empty() {
            return;
        }
        let last_idx = self.sinks.len() - 1;
        for i in 0..last_idx {
            self.sinks[i].send(event.clone());
        }
        self.sinks[last_idx].send(event);
    }

    fn wants(&self, kind: LayoutEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warning(context: &str) -> LayoutEvent {
        LayoutEvent::Warning {
            context: context.into(),
            message: "m".into(),
        }
    }

    #[test]
    fn vec_sink_collects_events() {
        let mut sink = VecSink::with_capacity(2);
        assert!(sink.is_empty());
        sink.send(warning("a"));
        sink.send(warning("b"));
        assert_eq!(sink.len(), 2);
        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn vec_sink_filters_by_kind() {
        let mut sink = VecSink::new().only(&[LayoutEventKind::ZoneStarted]);
        assert!(!sink.wants(LayoutEventKind::Warning));
        sink.send(warning("a"));
        sink.send(LayoutEvent::ZoneStarted { zone: Zone::Walls });
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.as_slice()[0].kind(), LayoutEventKind::ZoneStarted);
    }

    #[test]
    fn unit_sink_wants_nothing() {
        assert!(!EventSink::wants(&(), LayoutEventKind::PlacementMade));
    }

    #[test]
    fn multi_sink_fans_out_events() {
        let mut multi = MultiSink::with_sinks(vec![VecSink::new(), VecSink::new()]);
        multi.send(warning("ctx"));
        assert_eq!(multi.len(), 2);
        assert_eq!(multi.sinks[0].len(), 1);
        assert_eq!(multi.sinks[1].len(), 1);
        assert!(matches!(
            multi.sinks[0].as_slice()[0],
            LayoutEvent::Warning { .. }
        ));
    }

    #[test]
    fn fn_sink_invokes_callback() {
        let mut count = 0;
        let mut sink = FnSink::new(|_event| {
            count += 1;
        });
        sink.send(warning("ctx"));
        assert_eq!(count, 1);
    }
}
