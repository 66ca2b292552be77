pub mod charset;
pub mod checksum;
pub mod engine;
pub mod field;
pub mod pipeline;
pub mod sampler;
pub mod td3;
pub mod verify;

pub use crate::domain::model::{BatchResult, IdentityRecord, MrzLines};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
