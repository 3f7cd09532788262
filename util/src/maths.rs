//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Clamp a value into the range `[min, max]`.
pub fn clamp<T>(value: T, min: T, max: T) -> T 
where
    T: Float
{
    let mut ret = value;

    if ret > max {
        ret = max
    }
    if ret < min {
        ret = min
    }

    ret
}

/// Linear interpolation between `start` and `end`.
///
/// `t` is expected to lie in `[0, 1]`, but is not clamped.
pub fn lerp<T>(start: T, end: T, t: T) -> T
where
    T: Float
{
    start + (end - start) * t
}

/// Cubic ease-in-out curve mapping `[0, 1]` onto `[0, 1]`.
///
/// Accelerates as `4t^3` over the first half and decelerates as 
/// `1 - (-2t + 2)^3 / 2` over the second half. The two halves meet at 
/// `(0.5, 0.5)` with equal slope.
pub fn ease_in_out<T>(t: T) -> T
where
    T: Float
{
    let half = T::from(0.5).unwrap_or_else(T::zero);
    let two = T::one() + T::one();
    let four = two + two;

    if t < half {
        four * t * t * t
    }
    else {
        T::one() - (-two * t + two).powi(3) / two
    }
}
