//! In-place timestamp rewriting for decoded records.
//!
//! Collections are walked from the last record to the first. Each record is
//! independent, so the order only matters for reproducing fixtures: when
//! record `k` fails, records after `k` have already been rewritten and
//! records before it have not. There is no rollback.

use crate::error::PayrollError;
use crate::schema::Schema;
use crate::timestamp::to_interchange;

/// Rewrite every timestamp field of every record, stopping at the first
/// failure.
pub fn normalize_records<R: Schema>(records: &mut [R]) -> Result<(), PayrollError> {
    for (index, record) in records.iter_mut().enumerate().rev() {
        normalize_record(record).map_err(|e| e.at_index(index))?;
    }
    Ok(())
}

/// Rewrite a single record's timestamp fields, then its nested collections.
pub fn normalize_record<R: Schema>(record: &mut R) -> Result<(), PayrollError> {
    for field in R::TIMESTAMPS {
        normalize_slot(field.name, field.date_only, (field.slot)(record))?;
    }
    record.normalize_nested()
}

pub(crate) fn normalize_slot(
    name: &str,
    date_only: bool,
    slot: &mut Option<String>,
) -> Result<(), PayrollError> {
    if let Some(raw) = slot.as_deref() {
        let converted =
            to_interchange(raw, date_only).map_err(|e| PayrollError::timestamp(name, e))?;
        *slot = Some(converted);
    }
    Ok(())
}
