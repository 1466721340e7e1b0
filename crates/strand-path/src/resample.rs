//! Uniform arc-length resampling of polylines.

use strand_core::Point2;

/// Slack applied before rounding the segment count up, so a length that
/// is an exact multiple of the spacing does not gain a sliver segment.
const SEGMENT_EPSILON: f64 = 1e-9;

/// Default cap on the number of nodes a resampled path may produce.
pub const DEFAULT_MAX_NODES: usize = 65_536;

/// Total length of a polyline.
pub fn polyline_length(points: &[Point2]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Number of segments [`resample`] splits a polyline of length `total`
/// into, or `None` if the result would hold more than `max_nodes` nodes.
///
/// Non-finite lengths and spacings always yield `None`.
pub fn segment_count(total: f64, spacing: f64, max_nodes: usize) -> Option<usize> {
    let segments = ((total / spacing) - SEGMENT_EPSILON).ceil().max(1.0);
    // n segments produce n + 1 nodes.
    if segments.is_finite() && segments < max_nodes as f64 {
        Some(segments as usize)
    } else {
        None
    }
}

/// Resample `points` at uniform arc-length steps no longer than `spacing`.
///
/// The step is `L / n` with `n = max(1, ceil(L / spacing))`, so samples
/// are evenly spread over the whole length. The first and last input
/// points are copied exactly. A zero-length input yields
/// `[first, last]`; an empty input yields an empty vector.
///
/// Returns `None` without allocating when the result would exceed
/// `max_nodes`, or when the length overflows. `spacing` must be finite
/// and positive.
pub fn resample(points: &[Point2], spacing: f64, max_nodes: usize) -> Option<Vec<Point2>> {
    let (first, last) = match (points.first(), points.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return Some(Vec::new()),
    };
    let total = polyline_length(points);
    if total <= 0.0 {
        return Some(vec![first, last]);
    }

    let segments = segment_count(total, spacing, max_nodes)?;
    let step = total / segments as f64;

    let mut out = Vec::with_capacity(segments + 1);
    out.push(first);

    let mut seg = 0;
    let mut seg_start = 0.0;
    for k in 1..segments {
        let target = k as f64 * step;
        // Advance to the segment containing `target`.
        while seg + 2 < points.len() && seg_start + points[seg].distance(points[seg + 1]) < target {
            seg_start += points[seg].distance(points[seg + 1]);
            seg += 1;
        }
        let a = points[seg];
        let b = points[seg + 1];
        let len = a.distance(b);
        let t = if len > 0.0 {
            ((target - seg_start) / len).clamp(0.0, 1.0)
        } else {
            0.0
        };
        out.push(a.lerp(b, t));
    }

    out.push(last);
    Some(out)
}
