pub mod job_submitter;
pub mod report_writer;

pub use job_submitter::JobSubmitter;
pub use report_writer::ReportWriter;
