pub mod file_handle;
pub mod job;
pub mod loaders;
pub mod responses;

pub use file_handle::FileHandle;
pub use job::{BatchJob, CompareJob, JobFile};
pub use loaders::{load_all_job_files, load_job_file};
pub use responses::{CompareResponse, UploadResponse};
