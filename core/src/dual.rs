//! Forward-mode automatic differentiation with dual numbers.
//!
//! A [`Dual`] carries a value and its derivative with respect to one or more
//! parameters. Arithmetic and the elementary functions propagate derivatives
//! exactly, which is how parametric surfaces get analytic normals.

use nalgebra as na;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Derivative storage: a scalar or a gradient vector.
pub trait Derivative:
    Copy
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<f64, Output = Self>
    + Div<f64, Output = Self>
    + Neg<Output = Self>
{
    fn zero() -> Self;
}

impl Derivative for f64 {
    fn zero() -> Self {
        0.0
    }
}

macro_rules! vector_derivative {
    ($($t:ty),*) => {$(
        impl Derivative for $t {
            fn zero() -> Self {
                <$t>::zeros()
            }
        }
    )*};
}

vector_derivative!(na::Vector2<f64>, na::Vector3<f64>);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dual<D> {
    pub value: f64,
    pub deriv: D,
}

/// Dual number differentiated with respect to two surface parameters.
pub type Dual2 = Dual<na::Vector2<f64>>;

impl<D: Derivative> Dual<D> {
    pub fn new(value: f64, deriv: D) -> Self {
        Self { value, deriv }
    }

    pub fn constant(value: f64) -> Self {
        Self { value, deriv: D::zero() }
    }

    /// Outer function value and slope at `self.value`, composed by the chain rule.
    fn chain(self, value: f64, slope: f64) -> Self {
        Self { value, deriv: self.deriv * slope }
    }

    pub fn exp(self) -> Self {
        let e = self.value.exp();
        self.chain(e, e)
    }

    pub fn ln(self) -> Self {
        self.chain(self.value.ln(), 1.0 / self.value)
    }

    pub fn sin(self) -> Self {
        self.chain(self.value.sin(), self.value.cos())
    }

    pub fn cos(self) -> Self {
        self.chain(self.value.cos(), -self.value.sin())
    }

    pub fn tan(self) -> Self {
        self.sin() / self.cos()
    }

    pub fn sinh(self) -> Self {
        self.chain(self.value.sinh(), self.value.cosh())
    }

    pub fn cosh(self) -> Self {
        self.chain(self.value.cosh(), self.value.sinh())
    }

    pub fn tanh(self) -> Self {
        self.sinh() / self.cosh()
    }

    pub fn powf(self, n: f64) -> Self {
        self.chain(self.value.powf(n), n * self.value.powf(n - 1.0))
    }
}

impl Dual2 {
    /// Independent variable number `axis` (0 or 1) at `value`.
    pub fn variable(value: f64, axis: usize) -> Self {
        let mut deriv = na::Vector2::zeros();
        deriv[axis.min(1)] = 1.0;
        Self { value, deriv }
    }
}

impl<D: Derivative> From<f64> for Dual<D> {
    fn from(value: f64) -> Self {
        Self::constant(value)
    }
}

impl<D: Derivative> Add for Dual<D> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.value + rhs.value, self.deriv + rhs.deriv)
    }
}

impl<D: Derivative> Sub for Dual<D> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.value - rhs.value, self.deriv - rhs.deriv)
    }
}

impl<D: Derivative> Mul for Dual<D> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.value * rhs.value,
            self.deriv * rhs.value + rhs.deriv * self.value,
        )
    }
}

impl<D: Derivative> Div for Dual<D> {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        let denom = rhs.value * rhs.value;
        Self::new(
            self.value / rhs.value,
            (self.deriv * rhs.value - rhs.deriv * self.value) / denom,
        )
    }
}

impl<D: Derivative> Neg for Dual<D> {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.value, -self.deriv)
    }
}

impl<D: Derivative> Add<f64> for Dual<D> {
    type Output = Self;
    fn add(self, rhs: f64) -> Self {
        Self::new(self.value + rhs, self.deriv)
    }
}

impl<D: Derivative> Mul<f64> for Dual<D> {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.value * rhs, self.deriv * rhs)
    }
}
