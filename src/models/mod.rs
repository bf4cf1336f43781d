pub mod profile_payload;
pub mod report;
pub mod user_record;

pub use profile_payload::ProfilePayload;
pub use report::{
    ProfileOutcome, RecordReport, RecordState, SeedReport, SeedSummary, StepResult, UserSource,
};
pub use user_record::{Location, UserRecord};
