use crate::data::model::{YearRange, YearSeries};
use crate::error::{OctsError, Result};

/// Normalise a sparse `(year, value)` sequence against [`YearRange::DEFAULT`].
pub fn normalize(years: &[i32], values: &[f64]) -> Result<YearSeries> {
    normalize_in(YearRange::DEFAULT, years, values)
}

/// Spread `values` over the dense slots of `range`, one per year, leaving
/// years without an observation absent.
///
/// `years` must be strictly increasing, lie within `range`, and have the
/// same length as `values`. The merge walks the range once with a cursor
/// into the input that only ever moves forward.
pub fn normalize_in(range: YearRange, years: &[i32], values: &[f64]) -> Result<YearSeries> {
    validate(range, years, values)?;

    let mut slots = Vec::with_capacity(range.len());
    let mut cursor = 0;
    for year in range.years() {
        if years.get(cursor) == Some(&year) {
            slots.push(Some(values[cursor]));
            cursor += 1;
        } else {
            slots.push(None);
        }
    }

    Ok(YearSeries::from_parts(range, slots))
}

fn validate(range: YearRange, years: &[i32], values: &[f64]) -> Result<()> {
    if years.len() != values.len() {
        return Err(OctsError::MalformedInput(format!(
            "{} years but {} values",
            years.len(),
            values.len()
        )));
    }
    if let Some(w) = years.windows(2).find(|w| w[0] >= w[1]) {
        return Err(OctsError::MalformedInput(format!(
            "years not strictly increasing: {} followed by {}",
            w[0], w[1]
        )));
    }
    if let Some(year) = years.iter().find(|y| !range.contains(**y)) {
        return Err(OctsError::MalformedInput(format!(
            "year {year} outside {}..={}",
            range.start, range.end
        )));
    }
    Ok(())
}
