//! Cross-format converters (component F, SPEC_FULL §4.4): pure functions
//! between entity types, plus the failure-isolating batch runner of §5.

pub mod mt_camt;
pub mod mt_datev;
pub mod mt_mt;
pub mod pain_gen;

use crate::errors::{ConvertError, ErrorCollection, ErrorContext};
use tracing::{instrument, warn};

/// Runs `convert` over every item, isolating per-item failures: a faulty
/// element is skipped and its error recorded at its original index, but
/// siblings still get processed (SPEC_FULL §5).
#[instrument(skip(items, convert))]
pub fn convert_multiple<T, U, F>(items: &[T], convert: F) -> (Vec<U>, ErrorCollection)
where
    F: Fn(&T) -> Result<U, ConvertError>,
{
    let mut successes = Vec::new();
    let mut errors = ErrorCollection::new();
    for (index, item) in items.iter().enumerate() {
        match convert(item) {
            Ok(value) => successes.push(value),
            Err(err) => {
                warn!(index, %err, "skipping item that failed conversion");
                errors.push_error(ErrorContext::new(err).with_index(index));
            }
        }
    }
    (successes, errors)
}
