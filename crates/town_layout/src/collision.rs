//! Append-only index of committed footprints for one generation run.
use crate::geometry::Footprint;
use crate::host::ObjectHandle;
use crate::town::Zone;

/// Default tolerance used by overlap queries, in world units.
pub const DEFAULT_TOLERANCE: f32 = 10.0;

/// A committed placement.
#[derive(Debug, Clone)]
pub struct PlacedRecord {
    /// Footprint at the committed position.
    pub footprint: Footprint,
    /// Handle returned by the host world.
    pub handle: ObjectHandle,
    /// Label applied to the object.
    pub label: String,
    /// Zone that produced the placement, if any.
    pub zone: Option<Zone>,
}

/// Ordered collection of [`PlacedRecord`]s.
///
/// There is no removal: the index only grows while a run is in progress, and every
/// record stays visible to every later query.
#[derive(Debug, Default)]
pub struct CollisionIndex {
    records: Vec<PlacedRecord>,
}

impl CollisionIndex {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            records: Vec::with_capacity(cap),
        }
    }

    /// Returns true if `candidate`, grown by `tolerance`, overlaps any stored footprint.
    pub fn test(&self, candidate: &Footprint, tolerance: f32) -> bool {
        self.records
            .iter()
            .any(|r| candidate.overlaps(&r.footprint, tolerance))
    }

    /// Appends a committed record.
    pub fn insert(&mut self, record: PlacedRecord) {
        self.records.push(record);
    }

    /// Record committed for `handle`, if any.
    pub fn find(&self, handle: ObjectHandle) -> Option<&PlacedRecord> {
        self.records.iter().rev().find(|r| r.handle == handle)
    }

    pub fn records(&self) -> &[PlacedRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<PlacedRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
