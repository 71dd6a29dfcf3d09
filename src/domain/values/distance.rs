/// Squared Euclidean distance between two equal-length vectors.
///
/// This is the metric a flat L2 index reports: monotonic in true L2
/// distance, so rankings are identical, and thresholds are expressed in
/// squared units. Accumulates in f64 to keep long vectors stable.
pub fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = (*x as f64) - (*y as f64);
            d * d
        })
        .sum::<f64>() as f32
}
