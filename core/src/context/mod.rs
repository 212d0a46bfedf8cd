mod detector;
mod external;

pub use detector::{
    ContextDetector, ExternalStatusDetector, MapAllowList, TeamThreshold, build_detector,
};
pub use external::{ExternalStatus, ExternalStatusSource, SharedStatus, UnavailableStatus};
