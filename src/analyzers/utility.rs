use crate::reading::{Pollutant, Reading};

/// Arithmetic mean of `values`, computed in a single pass.
/// Returns 0.0 when there are no values.
pub fn mean<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 { 0.0 } else { sum / count as f64 }
}

/// Population standard deviation around a pre-computed `mean`.
/// Returns 0.0 when there are no values.
pub fn stddev<I>(values: I, mean: f64) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (squares, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(acc, count), v| {
            (acc + (v - mean).powi(2), count + 1)
        });

    if count == 0 {
        0.0
    } else {
        (squares / count as f64).sqrt()
    }
}

/// Iterates one pollutant's concentrations across `readings`.
pub fn values_of<'a, R>(readings: R, pollutant: Pollutant) -> impl Iterator<Item = f64> + 'a
where
    R: IntoIterator<Item = &'a Reading>,
    R::IntoIter: 'a,
{
    readings.into_iter().map(move |r| r.value(pollutant))
}
