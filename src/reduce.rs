use crate::{foundation::config::MagnitudePolicy, vectors::record::MotionVectorRecord};

/// A record that survived reduction, with its displacement length.
#[derive(Clone, Debug, PartialEq)]
pub struct ReducedVector {
    /// The untouched input record.
    pub record: MotionVectorRecord,
    /// `hypot(motion_x, motion_y)`, used for ordering. Drawing recomputes it from `record`.
    pub magnitude: f64,
}

/// Reduce one frame's vectors with the default break points.
///
/// See [`reduce_with_policy`].
pub fn reduce<'a, I>(frame_data: I, max_vectors: usize) -> Vec<ReducedVector>
where
    I: IntoIterator<Item = &'a MotionVectorRecord>,
{
    reduce_with_policy(frame_data, max_vectors, &MagnitudePolicy::default())
}

/// Bound a frame's vector set for drawing.
///
/// Vectors not longer than `policy.significance_px` are discarded whatever the count.
/// If more than `max_vectors` remain, the longest `max_vectors` are kept, ties going to
/// the earlier row; that truncated result is ordered longest first. An untruncated
/// result keeps input order, so reducing a reduced set again changes nothing.
pub fn reduce_with_policy<'a, I>(
    frame_data: I,
    max_vectors: usize,
    policy: &MagnitudePolicy,
) -> Vec<ReducedVector>
where
    I: IntoIterator<Item = &'a MotionVectorRecord>,
{
    let mut significant: Vec<(&MotionVectorRecord, f64)> = frame_data
        .into_iter()
        .filter_map(|r| {
            let m = r.magnitude();
            policy.is_significant(m).then_some((r, m))
        })
        .collect();

    if significant.len() > max_vectors {
        // Stable sort: equal magnitudes keep row order.
        significant.sort_by(|a, b| b.1.total_cmp(&a.1));
        significant.truncate(max_vectors);
    }

    significant
        .into_iter()
        .map(|(r, magnitude)| ReducedVector {
            record: r.clone(),
            magnitude,
        })
        .collect()
}

#[cfg(test)]
#[path = "../tests/unit/reduce.rs"]
mod tests;
