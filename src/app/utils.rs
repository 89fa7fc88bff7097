use rust_decimal::Decimal;

use crate::error::CalcError;

pub fn parse_decimal(field: &str, field_name: &str) -> Result<Decimal, CalcError> {
    field
        .trim()
        .parse::<Decimal>()
        .map_err(|err| {
            CalcError::invalid(format!("Failed to parse {} '{}': {}", field_name, field, err))
        })
}

/// Converts a flattened sheet column of doubles. Row numbers in errors are
/// 1-based like the sheet's.
pub fn decimals_from_f64(values: &[f64]) -> Result<Vec<Decimal>, CalcError> {
    values
        .iter()
        .enumerate()
        .map(|(idx, value)| {
            if !value.is_finite() {
                return Err(CalcError::invalid(format!(
                    "Non-finite value {} at row {}",
                    value,
                    idx + 1
                )));
            }
            let decimal = Decimal::try_from(*value).map_err(|err| {
                CalcError::invalid(format!("Value {} at row {}: {}", value, idx + 1, err))
            })?;
            if decimal.is_zero() && *value != 0.0 {
                return Err(CalcError::invalid(format!(
                    "Value {} at row {} is too small to represent",
                    value,
                    idx + 1
                )));
            }
            Ok(decimal)
        })
        .collect()
}

pub fn ensure_same_len(quantities: &[Decimal], cash_flows: &[Decimal]) -> Result<(), CalcError> {
    if quantities.len() != cash_flows.len() {
        return Err(CalcError::invalid(format!(
            "Expected as many cash flows as quantities, found {} quantities and {} cash flows",
            quantities.len(),
            cash_flows.len()
        )));
    }
    Ok(())
}
