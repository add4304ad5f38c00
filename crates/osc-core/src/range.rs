//! Validated sampling intervals.

use crate::error::{CoreError, CoreResult};
use crate::numeric::Real;

/// Half-open sampling interval `[start, stop)` walked with a fixed step.
///
/// Invariants are enforced at construction and the range is immutable
/// afterwards, so every consumer can assume a bounded, terminating walk.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeRange {
    start: Real,
    stop: Real,
    step: Real,
}

impl TimeRange {
    /// Validate and build a range.
    ///
    /// Rules: all bounds finite and non-negative, `start <= stop`, and unless
    /// the range is empty (`stop == start`) the step must be positive and no
    /// larger than `stop - start`.
    pub fn new(start: Real, stop: Real, step: Real) -> CoreResult<Self> {
        for (v, what) in [(start, "start"), (stop, "stop"), (step, "step")] {
            if !v.is_finite() {
                return Err(CoreError::NonFinite { what, value: v });
            }
        }
        if start < 0.0 {
            return Err(CoreError::InvalidRange {
                what: "start time can't be negative",
            });
        }
        if stop < 0.0 {
            return Err(CoreError::InvalidRange {
                what: "stop time can't be negative",
            });
        }
        if step < 0.0 {
            return Err(CoreError::InvalidRange {
                what: "step can't be negative",
            });
        }
        if start > stop {
            return Err(CoreError::InvalidRange {
                what: "start time can't be bigger than stop time",
            });
        }
        if stop > start {
            if step == 0.0 {
                return Err(CoreError::InvalidRange {
                    what: "step can't be zero over a non-empty range",
                });
            }
            if step > stop - start {
                return Err(CoreError::InvalidRange {
                    what: "step can't be bigger than (stop - start)",
                });
            }
        }
        Ok(Self { start, stop, step })
    }

    #[inline]
    pub fn start(&self) -> Real {
        self.start
    }

    #[inline]
    pub fn stop(&self) -> Real {
        self.stop
    }

    #[inline]
    pub fn step(&self) -> Real {
        self.step
    }

    /// Nominal sample count, `floor((stop - start) / step)`.
    ///
    /// Used for buffer reservation; the sampling loop accumulates time and
    /// may produce one sample more or fewer than this.
    pub fn num_steps(&self) -> usize {
        if self.stop == self.start {
            return 0;
        }
        ((self.stop - self.start) / self.step).floor() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_range() {
        let r = TimeRange::new(0.0, 10.0, 0.01).unwrap();
        assert_eq!(r.start(), 0.0);
        assert_eq!(r.stop(), 10.0);
        assert_eq!(r.step(), 0.01);
        assert_eq!(r.num_steps(), 1000);
    }

    #[test]
    fn rejects_reversed_bounds() {
        let err = TimeRange::new(5.0, 2.0, 0.1).unwrap_err();
        assert!(matches!(err, CoreError::InvalidRange { .. }));
    }

    #[test]
    fn rejects_negative_bounds() {
        assert!(TimeRange::new(-1.0, 2.0, 0.1).is_err());
        assert!(TimeRange::new(0.0, -2.0, 0.1).is_err());
        assert!(TimeRange::new(0.0, 2.0, -0.1).is_err());
    }

    #[test]
    fn rejects_step_larger_than_span() {
        assert!(TimeRange::new(0.0, 1.0, 2.0).is_err());
    }

    #[test]
    fn empty_range_allows_any_step() {
        let r = TimeRange::new(3.0, 3.0, 10.0).unwrap();
        assert_eq!(r.num_steps(), 0);
    }

    #[test]
    fn rejects_zero_step_over_nonempty_range() {
        assert!(TimeRange::new(0.0, 1.0, 0.0).is_err());
    }

    #[test]
    fn rejects_non_finite_bounds() {
        assert!(TimeRange::new(Real::NAN, 1.0, 0.1).is_err());
        assert!(TimeRange::new(0.0, Real::INFINITY, 0.1).is_err());
    }
}
