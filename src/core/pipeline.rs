use crate::core::sampler::IdentitySampler;
use crate::core::td3::Td3Encoder;
use crate::core::verify::verify_line2;
use crate::core::{BatchResult, ConfigProvider, IdentityRecord, Pipeline, Storage};
use crate::domain::model::{document_id, GroundTruth, GroundTruthEntry};
use crate::utils::error::{Result, SynthError};
use chrono::NaiveDate;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashSet;

/// 重新抽樣護照號碼的上限，避免號碼空間太小時無限迴圈
const MAX_DUPLICATE_RETRIES: usize = 1_000;

#[derive(Serialize)]
struct GroundTruthRow<'a> {
    document_id: &'a str,
    passport_number: &'a str,
    surname: &'a str,
    given_names: &'a str,
    nationality_code: &'a str,
    nationality_long: &'a str,
    sex: String,
    date_of_birth: NaiveDate,
    date_of_issue: NaiveDate,
    date_of_expiry: NaiveDate,
    mrz_line1: &'a str,
    mrz_line2: &'a str,
}

pub struct PassportPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    sampler: RefCell<IdentitySampler>,
    encoder: Td3Encoder,
}

impl<S: Storage, C: ConfigProvider> PassportPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let as_of = config
            .as_of()
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        let sampler = IdentitySampler::new(config.seed(), as_of, config.countries())?;
        let encoder = Td3Encoder::new(config.overflow_policy());

        Ok(Self {
            storage,
            config,
            sampler: RefCell::new(sampler),
            encoder,
        })
    }

    fn wants_format(&self, format: &str) -> bool {
        self.config.output_formats().iter().any(|f| f == format)
    }

    fn csv_output(ground_truth: &GroundTruth) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for (id, entry) in ground_truth {
            writer.serialize(GroundTruthRow {
                document_id: id,
                passport_number: &entry.passport_number,
                surname: &entry.surname,
                given_names: &entry.given_names,
                nationality_code: &entry.nationality_code,
                nationality_long: &entry.nationality_long,
                sex: entry.sex.to_string(),
                date_of_birth: entry.date_of_birth,
                date_of_issue: entry.date_of_issue,
                date_of_expiry: entry.date_of_expiry,
                mrz_line1: &entry.mrz_line1,
                mrz_line2: &entry.mrz_line2,
            })?;
        }
        writer
            .into_inner()
            .map_err(|e| SynthError::IoError(e.into_error()))
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for PassportPipeline<S, C> {
    fn sample(&self) -> Result<Vec<IdentityRecord>> {
        let count = self.config.count();
        let mut sampler = self.sampler.borrow_mut();
        let mut seen = HashSet::with_capacity(count);
        let mut records = Vec::with_capacity(count);

        while records.len() < count {
            let mut retries = 0;
            let record = loop {
                let record = sampler.sample()?;
                if seen.insert(record.passport_number.clone()) {
                    break record;
                }
                retries += 1;
                if retries > MAX_DUPLICATE_RETRIES {
                    return Err(SynthError::ConfigError {
                        message: format!(
                            "could not draw {} distinct passport numbers; reduce generator.count",
                            count
                        ),
                    });
                }
                tracing::debug!("Duplicate passport number {}, resampling", record.passport_number);
            };
            records.push(record);
        }

        Ok(records)
    }

    fn encode(&self, records: Vec<IdentityRecord>) -> Result<BatchResult> {
        let mut ground_truth = GroundTruth::new();

        for (i, record) in records.iter().enumerate() {
            let mrz = self.encoder.encode(record)?;
            // 自行產生的 MRZ 也要重新驗證檢查碼
            verify_line2(&mrz.line2)?.into_result()?;

            let id = document_id(&record.passport_number);
            if ground_truth.contains_key(&id) {
                return Err(SynthError::invalid_field(
                    "passport_number",
                    format!("duplicate document id {}", id),
                ));
            }
            tracing::debug!("({}/{}) Encoded {}", i + 1, records.len(), id);
            ground_truth.insert(id, GroundTruthEntry::new(record, mrz));
        }

        Ok(BatchResult { ground_truth })
    }

    fn load(&self, result: BatchResult) -> Result<String> {
        let json_name = self.config.json_filename();
        let json = serde_json::to_string_pretty(&result.ground_truth)?;
        self.storage.write_file(json_name, json.as_bytes())?;
        tracing::debug!("Wrote {} ({} bytes)", json_name, json.len());

        if self.wants_format("csv") {
            let csv_name = self.config.csv_filename();
            let data = Self::csv_output(&result.ground_truth)?;
            self.storage.write_file(csv_name, &data)?;
            tracing::debug!("Wrote {} ({} bytes)", csv_name, data.len());
        }

        Ok(format!("{}/{}", self.config.output_path(), json_name))
    }
}
