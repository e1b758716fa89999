//! Exact fractions.
//!
//! Exif stores non-integer physical quantities (exposure time, aperture,
//! GPS coordinates) as numerator/denominator pairs. A zero numerator is
//! the value zero whatever the denominator says.

use std::fmt;
use std::hash::{Hash, Hasher};

/// An immutable numerator/denominator pair.
///
/// `==` compares numeric value (`1/2 == 2/4`); use
/// [`equals_exact`](Rational::equals_exact) to compare representations.
#[derive(Debug, Clone, Copy)]
pub struct Rational {
    numerator: i64,
    denominator: i64,
}

impl Rational {
    #[inline]
    pub const fn new(numerator: i64, denominator: i64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    #[inline]
    pub const fn numerator(&self) -> i64 {
        self.numerator
    }

    #[inline]
    pub const fn denominator(&self) -> i64 {
        self.denominator
    }

    /// Value as `f64`. Zero numerator gives 0.0; zero denominator gives an infinity.
    pub fn to_f64(&self) -> f64 {
        if self.numerator == 0 {
            return 0.0;
        }
        self.numerator as f64 / self.denominator as f64
    }

    pub fn to_f32(&self) -> f32 {
        if self.numerator == 0 {
            return 0.0;
        }
        (self.numerator as f64 / self.denominator as f64) as f32
    }

    /// Truncating conversions; out-of-range values saturate.
    pub fn to_i64(&self) -> i64 {
        self.to_f64() as i64
    }

    pub fn to_i32(&self) -> i32 {
        self.to_f64() as i32
    }

    pub fn to_u8(&self) -> u8 {
        self.to_i64() as u8
    }

    /// Swap numerator and denominator.
    #[inline]
    pub const fn reciprocal(&self) -> Self {
        Self::new(self.denominator, self.numerator)
    }

    /// Whether the value is a whole number (`0/0` counts as zero).
    pub fn is_integer(&self) -> bool {
        match self.numerator.checked_rem(self.denominator) {
            Some(rem) => rem == 0,
            // Either `x/0` or `i64::MIN / -1`
            None => self.denominator == -1 || self.numerator == 0,
        }
    }

    /// True for a zero numerator or a zero denominator.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.numerator == 0 || self.denominator == 0
    }

    pub fn is_positive(&self) -> bool {
        !self.is_zero() && self.numerator.signum() == self.denominator.signum()
    }

    /// Same numerator and same denominator.
    #[inline]
    pub fn equals_exact(&self, other: &Rational) -> bool {
        self.numerator == other.numerator && self.denominator == other.denominator
    }

    /// Reduce to lowest terms with a non-negative denominator.
    ///
    /// `0/x` becomes `0/1`; `x/0` becomes `±1/0`. When the reduced form
    /// has a part outside `i64` (only possible with `i64::MIN`), the value
    /// is returned unchanged.
    pub fn simplified(&self) -> Self {
        let (n, d) = self.reduced();
        match (i64::try_from(n), i64::try_from(d)) {
            (Ok(n), Ok(d)) => Self::new(n, d),
            _ => *self,
        }
    }

    /// Lowest terms in i128 so that negating `i64::MIN` cannot overflow.
    fn reduced(&self) -> (i128, i128) {
        let mut n = i128::from(self.numerator);
        let mut d = i128::from(self.denominator);
        if n == 0 {
            return (0, 1);
        }
        if d < 0 {
            n = -n;
            d = -d;
        }
        let divisor = gcd(n.unsigned_abs(), d.unsigned_abs()) as i128;
        (n / divisor, d / divisor)
    }

    /// Shortest faithful rendering: an integer, `1/x`, a short decimal
    /// (when `allow_decimal`), or the reduced fraction.
    pub fn to_simple_string(&self, allow_decimal: bool) -> String {
        if self.denominator == 0 && self.numerator != 0 {
            return self.to_string();
        }
        if self.is_integer() {
            return self.reduced().0.to_string();
        }
        if self.numerator != 1 && self.denominator.checked_rem(self.numerator) == Some(0) {
            let reduced = Rational::new(1, self.denominator / self.numerator);
            return reduced.to_simple_string(allow_decimal);
        }
        let simplified = self.simplified();
        if allow_decimal {
            let decimal = simplified.to_f64().to_string();
            if decimal.len() < 5 {
                return decimal;
            }
        }
        simplified.to_string()
    }
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

impl PartialEq for Rational {
    fn eq(&self, other: &Self) -> bool {
        self.reduced() == other.reduced()
    }
}

impl Eq for Rational {}

impl Hash for Rational {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.reduced().hash(state);
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

// =============================================================================
// Tests
// =============================================================================
