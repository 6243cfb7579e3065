mod archive;
mod record;
mod store;

pub use archive::ResultsArchive;
pub use record::{MetricsSnapshot, RunCategory, RunRecord};
pub use store::{load_document, results_file_name, write_run_records, StoreError};
