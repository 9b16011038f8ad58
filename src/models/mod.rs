pub mod job;
pub mod loaders;

pub use job::{AcceptedJob, BatchResult, JobDescription};
pub use loaders::{load_batch_file, parse_batch};
