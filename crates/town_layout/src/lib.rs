#![forbid(unsafe_code)]
//! town_layout: procedural settlement layout with collision-aware placement.
//!
//! Modules:
//! - geometry: rotated footprints and overlap tests
//! - collision: append-only index of committed footprints
//! - placement: jittered-retry placer, segment router with gates, radial scatter, events
//! - sampling: annulus candidate generation and uniform draw helpers
//! - town: zone-by-zone composition of a complete town
//! - grid: flat tiling of one mesh
//! - host: asset resolver and world boundary, with in-memory implementations
//!
//! For a runnable walkthrough, see the `town_layout_examples` crate.
pub mod collision;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod host;
pub mod placement;
pub mod sampling;
pub mod town;

/// Convenient re-exports for common types. Import with `use town_layout::prelude::*;`.
pub mod prelude {
    pub use crate::collision::{CollisionIndex, PlacedRecord, DEFAULT_TOLERANCE};
    pub use crate::error::{Error, Result};
    pub use crate::geometry::{footprint_size, heading_degrees, Footprint};
    pub use crate::grid::{build_grid, GridReport, GridSpec};
    pub use crate::host::{
        AssetResolver, MemoryWorld, MeshHandle, ObjectHandle, SpawnedObject, StaticAssets, World,
    };
    pub use crate::placement::events::{
        EventSink, FnSink, LayoutEvent, LayoutEventKind, MultiSink, VecSink,
    };
    pub use crate::placement::placer::{DropReason, DropStats, Placer};
    pub use crate::placement::request::{PlacementRequest, RetryPolicy};
    pub use crate::placement::scatter::{
        scatter, Exclusion, ScatterOutcome, ScatterSpec, Undergrowth,
    };
    pub use crate::placement::segments::{
        rectangle_sides, GatePolicy, SegmentOutcome, SegmentPlan, SegmentRouter,
    };
    pub use crate::sampling::{AnnulusSampling, PointSampling};
    pub use crate::town::catalog::{NatureGroup, Placeable};
    pub use crate::town::{
        build_town, BuildResult, BuildStatus, LayoutSpec, TownConfig, TownGenerator, TownReport,
        Zone, ZoneReport,
    };
}
