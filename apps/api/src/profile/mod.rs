// Profile management: details, resume upload and parsing, and data export.
// Every write goes through store::ProfileMutation.

pub mod export;
pub mod handlers;
pub mod prompts;
pub mod resume;
pub mod store;
