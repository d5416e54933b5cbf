//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Clamp a value into the range `[min, max]`.
pub fn clamp<T>(value: &T, min: &T, max: &T) -> T
where
    T: Float,
{
    let mut ret = *value;

    if ret > *max {
        ret = *max
    }
    if ret < *min {
        ret = *min
    }

    ret
}

/// Move `value` towards `target` by at most `max_step`.
pub fn approach<T>(value: T, target: T, max_step: T) -> T
where
    T: Float,
{
    if target > value {
        (value + max_step).min(target)
    } else {
        (value - max_step).max(target)
    }
}

/// Calculates the least nonnegative remainder of `lhs (mod rhs)`.
///
/// This function is taken from the std library as num is missing it.
pub fn rem_euclid<T>(lhs: T, rhs: T) -> T
where
    T: Float,
{
    let r = lhs % rhs;
    if r < T::zero() {
        r + rhs.abs()
    } else {
        r
    }
}

/// Wrap an angle into the range `(-pi, pi]`.
pub fn wrap_pi<T>(angle: T) -> T
where
    T: Float,
{
    let pi_t = T::from(std::f64::consts::PI).unwrap_or_else(T::zero);
    let tau_t = pi_t + pi_t;

    let wrapped = pi_t - rem_euclid(pi_t - angle, tau_t);

    // rem_euclid may round up to exactly tau, which maps onto -pi
    if wrapped <= -pi_t {
        wrapped + tau_t
    } else {
        wrapped
    }
}

/// Get the signed shortest angular distance from `from` to `to`, in `(-pi, pi]`.
pub fn shortest_ang_dist<T>(from: T, to: T) -> T
where
    T: Float,
{
    wrap_pi(to - from)
}

/// Evenly spaced samples over the closed range `[min, max]`.
///
/// A single sample is placed in the middle of the range, no samples are returned if `num` is 0.
pub fn linspace(min: f64, max: f64, num: usize) -> impl Iterator<Item = f64> {
    let step = if num > 1 {
        (max - min) / (num - 1) as f64
    } else {
        0.0
    };
    let start = if num == 1 { 0.5 * (min + max) } else { min };

    (0..num).map(move |i| {
        // Land exactly on the upper bound
        if num > 1 && i == num - 1 {
            max
        } else {
            start + step * i as f64
        }
    })
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    const PI: f64 = std::f64::consts::PI;

    #[test]
    fn test_wrap_pi() {
        assert!((wrap_pi(0.5f64) - 0.5).abs() < 1e-12);
        assert!((wrap_pi(PI) - PI).abs() < 1e-12);
        assert!((wrap_pi(-PI) - PI).abs() < 1e-12);
        assert!((wrap_pi(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-12);
        assert!((wrap_pi(-5.0 * PI / 2.0) + PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_shortest_ang_dist() {
        assert!((shortest_ang_dist(1f64, 2f64) - 1.0).abs() < 1e-12);
        assert!((shortest_ang_dist(2f64, 1f64) + 1.0).abs() < 1e-12);
        assert!((shortest_ang_dist(PI - 0.1, -PI + 0.1) - 0.2).abs() < 1e-12);
        assert!((shortest_ang_dist(-PI + 0.1, PI - 0.1) + 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_approach() {
        assert_eq!(approach(0.0, 1.0, 0.25), 0.25);
        assert_eq!(approach(0.9, 1.0, 0.25), 1.0);
        assert_eq!(approach(0.0, -1.0, 0.25), -0.25);
        assert_eq!(approach(-0.9, -1.0, 0.25), -1.0);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(&2.0, &-1.0, &1.0), 1.0);
        assert_eq!(clamp(&-2.0, &-1.0, &1.0), -1.0);
        assert_eq!(clamp(&0.5, &-1.0, &1.0), 0.5);
    }

    #[test]
    fn test_linspace() {
        let s: Vec<f64> = linspace(-0.3, 0.3, 3).collect();
        assert_eq!(s.len(), 3);
        assert!((s[0] + 0.3).abs() < 1e-12);
        assert!(s[1].abs() < 1e-12);
        assert_eq!(s[2], 0.3);

        let s: Vec<f64> = linspace(0.1, 0.5, 1).collect();
        assert_eq!(s.len(), 1);
        assert!((s[0] - 0.3).abs() < 1e-12);

        assert_eq!(linspace(0.0, 1.0, 0).count(), 0);
    }
}
