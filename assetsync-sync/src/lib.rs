//! # assetsync-sync
//!
//! Remove-then-publish orchestration for component assets.
//!
//! Call [`Pipeline::publish`] to resync one component, or
//! [`Pipeline::refresh_all`] to resync every active module and theme and wipe
//! the compiled asset cache.

pub mod coordinator;
pub mod enumerate;
pub mod error;
pub mod invalidate;
pub mod pipeline;
pub mod report;
pub mod service;

pub use coordinator::{Coordinator, CoordinatorOptions};
pub use error::SyncError;
pub use invalidate::{
    invalidate_compiled, invalidate_compiled_with, CacheFailure, FileRemover, FsRemover,
    InvalidationReport,
};
pub use pipeline::{Pipeline, PipelineReport, SyncScope};
pub use service::{AssetService, FsAssetService, PhaseResult};
