//! Cusp Pose - per-tooth pose tables
//!
//! Reads the line-oriented pose table that places each tooth's local
//! coordinate frame in world space:
//!
//! ```text
//! # toothId  px py pz  qx qy qz qw
//! 11  12.5 -3.0 41.2  0 0 0.3826834 0.9238795
//! ```
//!
//! Orientation columns are scalar-last (`qx qy qz qw`) and describe the
//! frame as seen from world space ("frame-in-world"). They are normalized
//! but never inverted.

mod parser;
mod record;
mod source;

pub use parser::{parse_pose_table, PoseTable, SkipReason, SkippedLine};
pub use record::PoseRecord;
pub use source::{fetch_pose_table, PoseSource};
