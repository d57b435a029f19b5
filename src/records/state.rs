use crate::model::Record;
use crate::store::Slice;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordsState {
    pub records: Vec<Record>,
    /// Last fetch/store failure, cleared by the next successful `SetRecords`.
    pub sync_error: Option<String>,
}

impl Slice for RecordsState {}
