//! Virtualized section list and the scroll machinery driving it.

pub mod coordinator;
pub mod list;
pub mod metrics;
pub mod timer;

pub use coordinator::{ScrollCoordinator, ScrollOutcome};
pub use list::{FrameKind, LineRole, ListLine, SectionListHandle, VirtualSectionList, VisibleWindow};
pub use metrics::ScrollMetrics;
pub use timer::PendingScrollTimer;
