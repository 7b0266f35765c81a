//! Domain types exchanged with the export API

pub mod export;
pub mod job;
pub mod response;

pub use export::{ActivityType, ExportParams, ExportType, OutputFormat};
pub use job::{JobId, JobState};
pub use response::ApiResponse;
