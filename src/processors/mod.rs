pub mod calendar_encoder;
pub mod grouper;
pub mod station_assigner;
pub mod temporal_joiner;
pub mod temporal_sorter;

pub use calendar_encoder::{CalendarFeatureEncoder, CalendarFeatures};
pub use grouper::{GroupColumns, Grouper, Groups};
pub use station_assigner::StationAssigner;
pub use temporal_joiner::{JoinDiagnostic, JoinOutcome, TemporalJoiner};
pub use temporal_sorter::TemporalSorter;
