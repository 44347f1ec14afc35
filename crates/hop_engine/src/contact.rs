//! Ground contact detection on the normal force channel.

use contracts::ContactConfig;

/// Find the sample index where sustained loading begins.
///
/// Walks the series from the second sample. At each strictly-rising
/// position the next `lookahead` deltas are summed; when the cumulative
/// rise exceeds `rise_threshold` that position is the contact index.
/// First qualifying position wins, not the steepest.
///
/// Returns `None` when no qualifying run exists or the lookahead would
/// run past the end of the series. The aligner's fallback for `None`
/// is aligning from force index 0.
pub fn find_contact_index(normal: &[f64], config: &ContactConfig) -> Option<usize> {
    for i in 1..normal.len() {
        let rising = normal[i] > normal[i - 1];
        if !rising {
            continue;
        }
        if i + config.lookahead >= normal.len() {
            return None;
        }

        let mut rise = 0.0;
        for j in i..i + config.lookahead {
            rise += normal[j + 1] - normal[j];
        }
        if rise > config.rise_threshold {
            return Some(i);
        }
    }

    None
}
