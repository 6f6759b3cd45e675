// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Flow Numerics
//!
//! By-value saturating arithmetic for unsigned integers and the
//! `FlowNumeric` alias used for value-rates and accumulated values.
//!
//! Values in the search only ever grow (rates are non-negative, remaining
//! time is non-negative), so overflow is clamped at the type maximum rather
//! than wrapping. A clamped value still orders correctly against every
//! smaller candidate, which is all the maximum reduction needs.

use core::ops::{Add, Mul};
use num_traits::{FromPrimitive, PrimInt, Unsigned};

macro_rules! saturating_impl_binary_val {
    ($trait_name:ident, $method:ident, $t:ty, $src_method:ident) => {
        impl $trait_name for $t {
            #[inline(always)]
            fn $method(self, v: Self) -> Self {
                <$t>::$src_method(self, v)
            }
        }
    };
}

/// Saturating addition by value.
///
/// ```rust
/// # use spillway_core::num::SaturatingAddVal;
/// let a: u8 = 250;
/// assert_eq!(a.saturating_add_val(10), 255);
/// ```
pub trait SaturatingAddVal: Sized + Add<Self, Output = Self> {
    fn saturating_add_val(self, v: Self) -> Self;
}

/// Saturating multiplication by value.
///
/// ```rust
/// # use spillway_core::num::SaturatingMulVal;
/// let a: u16 = 300;
/// assert_eq!(a.saturating_mul_val(300), u16::MAX);
/// ```
pub trait SaturatingMulVal: Sized + Mul<Self, Output = Self> {
    fn saturating_mul_val(self, v: Self) -> Self;
}

macro_rules! impl_saturating_for {
    ($($t:ty),*) => {
        $(
            saturating_impl_binary_val!(SaturatingAddVal, saturating_add_val, $t, saturating_add);
            saturating_impl_binary_val!(SaturatingMulVal, saturating_mul_val, $t, saturating_mul);
        )*
    };
}

impl_saturating_for!(u8, u16, u32, u64, u128, usize);

/// Numeric bounds for value-rates and accumulated values.
///
/// Every unsigned primitive integer satisfies this alias through the blanket
/// implementation below. `Send + Sync` lets states cross rayon workers.
pub trait FlowNumeric:
    PrimInt
    + Unsigned
    + FromPrimitive
    + SaturatingAddVal
    + SaturatingMulVal
    + std::fmt::Debug
    + std::fmt::Display
    + std::hash::Hash
    + Send
    + Sync
    + 'static
{
    /// Converts a tick count into the value domain, clamping at `Self::MAX`.
    ///
    /// ```rust
    /// # use spillway_core::num::FlowNumeric;
    /// assert_eq!(<u64 as FlowNumeric>::from_ticks(26), 26);
    /// assert_eq!(<u8 as FlowNumeric>::from_ticks(1_000), u8::MAX);
    /// ```
    #[inline]
    fn from_ticks(ticks: u32) -> Self {
        Self::from_u32(ticks).unwrap_or_else(Self::max_value)
    }

    /// Value contributed by a node of `rate` that stays active for `ticks`.
    #[inline]
    fn contribution(rate: Self, ticks: u32) -> Self {
        rate.saturating_mul_val(Self::from_ticks(ticks))
    }
}

impl<T> FlowNumeric for T where
    T: PrimInt
        + Unsigned
        + FromPrimitive
        + SaturatingAddVal
        + SaturatingMulVal
        + std::fmt::Debug
        + std::fmt::Display
        + std::hash::Hash
        + Send
        + Sync
        + 'static
{
}
