//! Collision-aware placement: single requests, segment lines and radial scatter.
pub mod events;
pub mod placer;
pub mod request;
pub mod scatter;
pub mod segments;

pub use events::{EventSink, FnSink, LayoutEvent, LayoutEventKind, MultiSink, VecSink};
pub use placer::{DropReason, DropStats, Placer};
pub use request::{PlacementRequest, RetryPolicy, DEFAULT_JITTER_STEP, DEFAULT_MAX_ATTEMPTS};
pub use scatter::{scatter, Exclusion, ScatterOutcome, ScatterSpec, Undergrowth};
pub use segments::{
    rectangle_sides, tiered_gate_indices, GatePolicy, SegmentOutcome, SegmentPlan, SegmentRouter,
    MAX_LINE_SEGMENTS, SEGMENT_OVERLAP,
};
