/// The segment of a calibration table that produced a normalized value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Segment {
    /// The raw value was at or below the first breakpoint and was
    /// clamped to the first normalized value.
    BelowRange,
    /// The raw value was interpolated between breakpoints `index` and
    /// `index + 1`.
    Within(usize),
    /// The raw value was above the last breakpoint and was clamped to
    /// the last normalized value.
    AboveRange,
}

/// Linear mapping of `x` from `x0..=x1` onto `y0..=y1`.
///
/// The intermediate product is widened so it cannot overflow, and the
/// division truncates toward zero. For a descending `y` this rounds the
/// result up toward `y0`, the same as mirroring an ascending segment.
///
/// `x` outside `x0..=x1` is extrapolated. Returns `None` if `x1 <= x0`,
/// or if the extrapolated value does not fit in an `i32`.
///
/// # Examples
///
/// ```
/// use adc_normalizer::interpolate;
///
/// assert_eq!(interpolate(30, 88, 98, 64, 47), Some(89));
/// assert_eq!(interpolate(5, 5, 0, 10, 5), None);
/// ```
pub fn interpolate(x0: i32, x1: i32, y0: i32, y1: i32, x: i32) -> Option<i32> {
    if x1 <= x0 {
        return None;
    }

    i32::try_from(linear(x0, x1, y0, y1, x)).ok()
}

fn linear(x0: i32, x1: i32, y0: i32, y1: i32, x: i32) -> i128 {
    let offset = i128::from(x) - i128::from(x0);
    let rise = i128::from(y1) - i128::from(y0);
    let run = i128::from(x1) - i128::from(x0);

    i128::from(y0) + offset * rise / run
}

/// Returns the index of the first breakpoint that is `>= value`, minus
/// one.
///
/// `-1` means `value` is at or below the first breakpoint, and
/// `breakpoints.len()` means it is above every breakpoint. A value equal
/// to `breakpoints[i]` resolves to segment `i - 1`.
///
/// # Examples
///
/// ```
/// use adc_normalizer::locate_segment;
///
/// let breakpoints = [5, 30, 88, 499];
///
/// assert_eq!(locate_segment(4, &breakpoints), -1);
/// assert_eq!(locate_segment(30, &breakpoints), 0);
/// assert_eq!(locate_segment(47, &breakpoints), 1);
/// assert_eq!(locate_segment(999, &breakpoints), 4);
/// ```
pub fn locate_segment(value: i32, breakpoints: &[i32]) -> isize {
    breakpoints
        .iter()
        .position(|breakpoint| value <= *breakpoint)
        .map_or(breakpoints.len() as isize, |index| index as isize - 1)
}

/// Normalizes `value` using the segment of `breakpoints` it falls in,
/// clamping to the first or last entry of `normalized` outside the
/// table.
///
/// `breakpoints` must be ascending and `normalized` must be at least as
/// long. [`CalibrationTable`](crate::CalibrationTable) checks both.
///
/// # Panics
///
/// Panics if `breakpoints` is empty or `normalized` is shorter than
/// `breakpoints`.
///
/// # Examples
///
/// ```
/// use adc_normalizer::{compensate, Segment};
///
/// let breakpoints = [5, 30, 88, 499];
/// let normalized = [150, 98, 64, 32];
///
/// assert_eq!(compensate(47, &breakpoints, &normalized), (89, Segment::Within(1)));
/// assert_eq!(compensate(4, &breakpoints, &normalized), (150, Segment::BelowRange));
/// assert_eq!(compensate(999, &breakpoints, &normalized), (32, Segment::AboveRange));
/// ```
pub fn compensate(value: i32, breakpoints: &[i32], normalized: &[i32]) -> (i32, Segment) {
    let last = breakpoints.len() - 1;
    let position = locate_segment(value, breakpoints);

    if position < 0 {
        return (normalized[0], Segment::BelowRange);
    }

    let index = position as usize;
    if index >= last {
        return (normalized[last], Segment::AboveRange);
    }

    // breakpoints[index] < value <= breakpoints[index + 1], so the result
    // lies between the two normalized values and fits in an i32.
    let value = linear(
        breakpoints[index],
        breakpoints[index + 1],
        normalized[index],
        normalized[index + 1],
        value,
    ) as i32;

    (value, Segment::Within(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BREAKPOINTS: [i32; 4] = [5, 30, 88, 499];
    const NORMALIZED: [i32; 4] = [150, 98, 64, 32];

    #[test]
    fn interpolate() {
        assert_eq!(super::interpolate(0, 10, 0, 100, 0), Some(0));
        assert_eq!(super::interpolate(0, 10, 0, 100, 5), Some(50));
        assert_eq!(super::interpolate(0, 10, 0, 100, 10), Some(100));
        assert_eq!(super::interpolate(-20, -10, -300, -100, -15), Some(-200));
        assert_eq!(super::interpolate(-20, -10, -300, -100, -13), Some(-160));
    }

    #[test]
    fn interpolate_flipped_y() {
        assert_eq!(super::interpolate(0, 10, 100, 0, 0), Some(100));
        assert_eq!(super::interpolate(0, 10, 100, 0, 8), Some(20));
        assert_eq!(super::interpolate(0, 10, 100, 0, 10), Some(0));
        assert_eq!(super::interpolate(-50, 50, 20, -20, 25), Some(-10));
        // 7 * -40 / 100 = -2.8
        assert_eq!(super::interpolate(-50, 50, 20, -20, -43), Some(18));
    }

    #[test]
    fn interpolate_truncates_toward_zero() {
        // 17 * -34 / 58 = -9.97
        assert_eq!(super::interpolate(30, 88, 98, 64, 47), Some(89));
        // 17 * 34 / 58 = 9.97
        assert_eq!(super::interpolate(30, 88, 64, 98, 47), Some(73));
        assert_eq!(super::interpolate(0, 3, 0, -10, 1), Some(-3));
    }

    #[test]
    fn interpolate_extrapolates_outside_segment() {
        assert_eq!(super::interpolate(0, 10, 0, 100, 20), Some(200));
        assert_eq!(super::interpolate(0, 10, 0, 100, -5), Some(-50));
        assert_eq!(super::interpolate(0, 10, 100, 0, 15), Some(-50));
    }

    #[test]
    fn interpolate_rejects_unrepresentable_results() {
        assert_eq!(super::interpolate(0, 1, 0, i32::MAX, 2), None);
        assert_eq!(super::interpolate(0, 1, 0, i32::MIN, 2), None);
    }

    #[test]
    fn interpolate_rejects_empty_or_reversed_segments() {
        assert_eq!(super::interpolate(5, 5, 0, 10, 5), None);
        assert_eq!(super::interpolate(10, 0, 0, 100, 5), None);
    }

    #[test]
    fn interpolate_does_not_overflow() {
        assert_eq!(
            super::interpolate(i32::MIN, i32::MAX, i32::MIN, i32::MAX, i32::MAX),
            Some(i32::MAX)
        );
        assert_eq!(
            super::interpolate(i32::MIN, i32::MAX, i32::MAX, i32::MIN, i32::MIN),
            Some(i32::MAX)
        );
    }

    #[test]
    fn compensate_extreme_segment() {
        let breakpoints = [i32::MIN, i32::MAX];
        let normalized = [i32::MAX, i32::MIN];

        assert_eq!(
            compensate(i32::MAX, &breakpoints, &normalized),
            (i32::MIN, Segment::Within(0))
        );
        // 2^31 * -(2^32 - 1) / (2^32 - 1) = -2^31
        assert_eq!(
            compensate(0, &breakpoints, &normalized),
            (-1, Segment::Within(0))
        );
    }

    #[test]
    fn locate_below() {
        assert_eq!(locate_segment(i32::MIN, &BREAKPOINTS), -1);
        assert_eq!(locate_segment(4, &BREAKPOINTS), -1);
        assert_eq!(locate_segment(5, &BREAKPOINTS), -1);
    }

    #[test]
    fn locate_exact_breakpoint_resolves_to_segment_below() {
        assert_eq!(locate_segment(30, &BREAKPOINTS), 0);
        assert_eq!(locate_segment(88, &BREAKPOINTS), 1);
        assert_eq!(locate_segment(499, &BREAKPOINTS), 2);
    }

    #[test]
    fn locate_within() {
        assert_eq!(locate_segment(6, &BREAKPOINTS), 0);
        assert_eq!(locate_segment(31, &BREAKPOINTS), 1);
        assert_eq!(locate_segment(89, &BREAKPOINTS), 2);
    }

    #[test]
    fn locate_above() {
        assert_eq!(locate_segment(500, &BREAKPOINTS), 4);
        assert_eq!(locate_segment(i32::MAX, &BREAKPOINTS), 4);
    }

    #[test]
    fn compensate_table_edges() {
        assert_eq!(
            compensate(5, &BREAKPOINTS, &NORMALIZED),
            (150, Segment::BelowRange)
        );
        assert_eq!(
            compensate(499, &BREAKPOINTS, &NORMALIZED),
            (32, Segment::Within(2))
        );
    }

    #[test]
    fn compensate_interpolates() {
        assert_eq!(
            compensate(47, &BREAKPOINTS, &NORMALIZED),
            (89, Segment::Within(1))
        );
        assert_eq!(
            compensate(30, &BREAKPOINTS, &NORMALIZED),
            (98, Segment::Within(0))
        );
        // 22 * -52 / 25 = -45.76
        assert_eq!(
            compensate(27, &BREAKPOINTS, &NORMALIZED),
            (105, Segment::Within(0))
        );
    }

    #[test]
    fn compensate_clamps() {
        assert_eq!(
            compensate(4, &BREAKPOINTS, &NORMALIZED),
            (150, Segment::BelowRange)
        );
        assert_eq!(
            compensate(-1000, &BREAKPOINTS, &NORMALIZED),
            (150, Segment::BelowRange)
        );
        assert_eq!(
            compensate(999, &BREAKPOINTS, &NORMALIZED),
            (32, Segment::AboveRange)
        );
    }

    #[test]
    fn compensate_two_point_table() {
        let breakpoints = [0, 1000];
        let normalized = [0, 100];

        assert_eq!(compensate(0, &breakpoints, &normalized), (0, Segment::BelowRange));
        assert_eq!(compensate(505, &breakpoints, &normalized), (50, Segment::Within(0)));
        assert_eq!(compensate(1000, &breakpoints, &normalized), (100, Segment::Within(0)));
        assert_eq!(compensate(1001, &breakpoints, &normalized), (100, Segment::AboveRange));
    }
}
