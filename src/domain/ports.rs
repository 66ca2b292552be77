use crate::core::field::OverflowPolicy;
use crate::domain::model::{BatchResult, IdentityRecord};
use crate::utils::error::Result;
use chrono::NaiveDate;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn output_path(&self) -> &str;
    fn count(&self) -> usize;
    fn seed(&self) -> Option<u64>;
    /// Reference "today" for sampled dates; `None` means the local date.
    fn as_of(&self) -> Option<NaiveDate>;
    fn overflow_policy(&self) -> OverflowPolicy;
    fn output_formats(&self) -> &[String];
    /// Issuing country codes to sample from; empty means all known formats.
    fn countries(&self) -> &[String];

    fn json_filename(&self) -> &str {
        "groundtruth.json"
    }

    fn csv_filename(&self) -> &str {
        "groundtruth.csv"
    }
}

pub trait Pipeline {
    fn sample(&self) -> Result<Vec<IdentityRecord>>;
    fn encode(&self, records: Vec<IdentityRecord>) -> Result<BatchResult>;
    fn load(&self, result: BatchResult) -> Result<String>;
}
