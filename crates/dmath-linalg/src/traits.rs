use std::ops;

/// Types that support the trigonometric functions.
pub trait Trig: Sized {
    /// Computes the sine of the angle `self` (in radians).
    fn sin(self) -> Self;
    /// Computes the cosine of the angle `self` (in radians).
    fn cos(self) -> Self;
    /// Computes the tangent of the angle `self` (in radians).
    fn tan(self) -> Self;
    fn asin(self) -> Self;
    fn acos(self) -> Self;
    fn atan(self) -> Self;
    fn atan2(self, other: Self) -> Self;

    /// Computes the sine and cosine of `self` at once, returning `(sin, cos)`.
    fn sin_cos(self) -> (Self, Self);

    /// Converts an angle from degrees to radians.
    fn to_radians(self) -> Self;
    /// Converts an angle from radians to degrees.
    fn to_degrees(self) -> Self;
}

/// Types that support computing their square root.
pub trait Sqrt {
    fn sqrt(self) -> Self;
}

/// Types that support computing their absolute value.
pub trait Abs {
    fn abs(self) -> Self;
}

/// Types that can be rounded towards negative infinity.
pub trait Floor: Sized + ops::Sub<Output = Self> + Copy {
    fn floor(self) -> Self;

    /// Returns the fractional part of `self`, defined as `self - self.floor()`.
    ///
    /// Unlike [`f64::fract`], the result is always in range `[0, 1)` for finite inputs, also for
    /// negative numbers (so `-0.25` yields `0.75`).
    fn fract(self) -> Self {
        self - self.floor()
    }
}

/// Types that can be rounded to an integral value in the other directions.
pub trait Round: Floor {
    fn ceil(self) -> Self;

    /// Rounds half-way cases away from zero, like [`f64::round`].
    fn round(self) -> Self;

    /// Floored modulus, `self - m * floor(self / m)`.
    ///
    /// The result takes the sign of `m`, unlike the `%` operator.
    fn modulo(self, m: Self) -> Self
    where
        Self: ops::Mul<Output = Self> + ops::Div<Output = Self>,
    {
        self - m * (self / m).floor()
    }
}

/// Types that can be raised to a power of the same type.
pub trait Powf {
    fn powf(self, n: Self) -> Self;
}

/// Types that support a `min` and `max` operation.
///
/// [`f32`] and [`f64`] implement this trait in terms of the [`f32::min`] and [`f32::max`] functions
/// ([`f64::min`] and [`f64::max`] respectively). Built-in integer types implement it in terms of
/// [`Ord::min`] and [`Ord::max`].
pub trait MinMax: Sized {
    fn min(self, other: Self) -> Self;
    fn max(self, other: Self) -> Self;
    fn clamp(self, min: Self, max: Self) -> Self {
        self.max(min).min(max)
    }
}

/// Types that have a "zero" value (an additive identity).
pub trait Zero {
    /// The *0* value of this type.
    const ZERO: Self;
}

/// Types that have a "one" value (a multiplicative identity).
pub trait One {
    /// The *1* value of this type.
    const ONE: Self;
}

/// A trait for numeric types that support basic arithmetic operations.
pub trait Number:
    Zero
    + One
    + ops::Neg<Output = Self>
    + ops::Add<Output = Self>
    + ops::Sub<Output = Self>
    + ops::Mul<Output = Self>
    + ops::Div<Output = Self>
    + PartialEq
    + PartialOrd
    + Copy
{
}
impl<T> Number for T where
    T: Zero
        + One
        + ops::Neg<Output = Self>
        + ops::Add<Output = Self>
        + ops::Sub<Output = Self>
        + ops::Mul<Output = Self>
        + ops::Div<Output = Self>
        + PartialEq
        + PartialOrd
        + Copy
{
}

/// Floating-point types, which support every scalar operation used by the geometry code.
pub trait Real: Number + Trig + Sqrt + Powf + Abs + Round + MinMax {}
impl<T> Real for T where T: Number + Trig + Sqrt + Powf + Abs + Round + MinMax {}

macro_rules! int_impls {
    ($($types:ty),+) => {
        $(
            impl Zero for $types {
                const ZERO: Self = 0;
            }

            impl One for $types {
                const ONE: Self = 1;
            }

            impl MinMax for $types {
                fn min(self, other: Self) -> Self {
                    Ord::min(self, other)
                }

                fn max(self, other: Self) -> Self {
                    Ord::max(self, other)
                }
            }
        )+
    };
}
int_impls!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

macro_rules! signed_int_abs {
    ($($types:ty),+) => {
        $(
            impl Abs for $types {
                fn abs(self) -> Self {
                    <$types>::abs(self)
                }
            }
        )+
    };
}
signed_int_abs!(i8, i16, i32, i64, i128, isize);

macro_rules! float_impls {
    ($($types:ty),+) => {
        $(
            impl Zero for $types {
                const ZERO: Self = 0.0;
            }

            impl One for $types {
                const ONE: Self = 1.0;
            }

            impl MinMax for $types {
                fn min(self, other: Self) -> Self {
                    <$types>::min(self, other)
                }

                fn max(self, other: Self) -> Self {
                    <$types>::max(self, other)
                }
            }

            impl Trig for $types {
                fn sin(self) -> Self {
                    <$types>::sin(self)
                }

                fn cos(self) -> Self {
                    <$types>::cos(self)
                }

                fn tan(self) -> Self {
                    <$types>::tan(self)
                }

                fn asin(self) -> Self {
                    <$types>::asin(self)
                }

                fn acos(self) -> Self {
                    <$types>::acos(self)
                }

                fn atan(self) -> Self {
                    <$types>::atan(self)
                }

                fn atan2(self, other: Self) -> Self {
                    <$types>::atan2(self, other)
                }

                fn sin_cos(self) -> (Self, Self) {
                    <$types>::sin_cos(self)
                }

                fn to_radians(self) -> Self {
                    <$types>::to_radians(self)
                }

                fn to_degrees(self) -> Self {
                    <$types>::to_degrees(self)
                }
            }

            impl Sqrt for $types {
                fn sqrt(self) -> Self {
                    <$types>::sqrt(self)
                }
            }

            impl Abs for $types {
                fn abs(self) -> Self {
                    <$types>::abs(self)
                }
            }

            impl Floor for $types {
                fn floor(self) -> Self {
                    <$types>::floor(self)
                }
            }

            impl Round for $types {
                fn ceil(self) -> Self {
                    <$types>::ceil(self)
                }

                fn round(self) -> Self {
                    <$types>::round(self)
                }
            }

            impl Powf for $types {
                fn powf(self, n: Self) -> Self {
                    <$types>::powf(self, n)
                }
            }
        )+
    };
}
float_impls!(f32, f64);
