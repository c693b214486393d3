use thiserror::Error;

pub type TimelineResult<T> = Result<T, TimelineError>;

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("invalid parameter `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("invalid layout config: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("duplicate person id `{0}`")]
    DuplicateId(String),

    #[error("person `{id}` references unknown person `{reference}`")]
    UnknownReference { id: String, reference: String },

    #[error("lineage chain starting at `{0}` loops back on itself")]
    LineageCycle(String),
}
