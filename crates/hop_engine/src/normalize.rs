//! Per-event z-score normalization.

use crate::align::AlignedWindow;

/// Normalize each channel to zero mean and unit variance, computed
/// over this window's rows only. Cross-event statistics never leak in.
///
/// An empty window is returned unchanged. A channel whose sample
/// standard deviation is zero or non-finite is centered but not
/// divided. Already-normalized windows pass through unchanged.
pub fn normalize(window: &mut AlignedWindow) {
    let n = window.rows.len();
    if n == 0 {
        return;
    }

    for channel in 0..6 {
        let mean = window
            .rows
            .iter()
            .map(|row| row.channels()[channel])
            .sum::<f64>()
            / n as f64;

        // Sample standard deviation (n - 1 denominator)
        let std = if n > 1 {
            let sum_sq = window
                .rows
                .iter()
                .map(|row| {
                    let d = row.channels()[channel] - mean;
                    d * d
                })
                .sum::<f64>();
            (sum_sq / (n - 1) as f64).sqrt()
        } else {
            0.0
        };

        let divide = std.is_finite() && std > 0.0;
        for row in &mut window.rows {
            let value = channel_mut(row, channel);
            *value -= mean;
            if divide {
                *value /= std;
            }
        }
    }
}

fn channel_mut(row: &mut contracts::AlignedRow, channel: usize) -> &mut f64 {
    match channel {
        0 => &mut row.elbow_flex_ext,
        1 => &mut row.humeral_pro_ret,
        2 => &mut row.humeral_dep_ele,
        3 => &mut row.fore_aft,
        4 => &mut row.lateral,
        _ => &mut row.normal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::AlignedRow;

    fn window(values: &[f64]) -> AlignedWindow {
        AlignedWindow {
            rows: values
                .iter()
                .map(|&v| AlignedRow {
                    elbow_flex_ext: v,
                    humeral_pro_ret: v * 2.0,
                    humeral_dep_ele: v - 3.0,
                    fore_aft: 0.5,
                    lateral: -v,
                    normal: v * v,
                })
                .collect(),
            kinematic_window_frames: values.len(),
            dropped_rows: 0,
        }
    }

    fn column(window: &AlignedWindow, channel: usize) -> Vec<f64> {
        window.rows.iter().map(|r| r.channels()[channel]).collect()
    }

    fn mean(values: &[f64]) -> f64 {
        values.iter().sum::<f64>() / values.len() as f64
    }

    fn sample_std(values: &[f64]) -> f64 {
        let m = mean(values);
        let sum_sq: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
        (sum_sq / (values.len() - 1) as f64).sqrt()
    }

    #[test]
    fn test_zero_mean_unit_std() {
        let mut w = window(&[1.0, 2.0, 3.0, 4.0, 5.0, 9.0]);
        normalize(&mut w);

        for channel in [0, 1, 2, 4, 5] {
            let col = column(&w, channel);
            assert!(mean(&col).abs() < 1e-12, "channel {channel}");
            assert!((sample_std(&col) - 1.0).abs() < 1e-12, "channel {channel}");
        }
    }

    #[test]
    fn test_constant_channel_centered_not_divided() {
        let mut w = window(&[1.0, 2.0, 3.0]);
        normalize(&mut w);

        // fore_aft is constant 0.5; centering makes it 0, no division
        let col = column(&w, 3);
        assert!(col.iter().all(|v| v.abs() < 1e-12));
    }

    #[test]
    fn test_empty_window_unchanged() {
        let mut w = window(&[]);
        normalize(&mut w);
        assert!(w.is_empty());
    }

    #[test]
    fn test_single_row_centered() {
        let mut w = window(&[7.0]);
        normalize(&mut w);
        assert!(w.rows[0].elbow_flex_ext.abs() < 1e-12);
    }

    #[test]
    fn test_idempotent() {
        let mut w = window(&[1.0, 2.0, 3.0, 4.0, 8.0]);
        normalize(&mut w);
        let first: Vec<[f64; 6]> = w.rows.iter().map(|r| r.channels()).collect();

        normalize(&mut w);
        let second: Vec<[f64; 6]> = w.rows.iter().map(|r| r.channels()).collect();

        for (a, b) in first.iter().zip(second.iter()) {
            for (x, y) in a.iter().zip(b.iter()) {
                assert!((x - y).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_no_cross_event_leakage() {
        // Same values normalize identically regardless of what other
        // windows exist; statistics are window-local by construction.
        let mut a = window(&[1.0, 2.0, 3.0]);
        let mut b = window(&[1.0, 2.0, 3.0]);
        normalize(&mut a);
        normalize(&mut b);
        assert_eq!(column(&a, 0), column(&b, 0));
    }
}
