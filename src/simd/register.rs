//! Operator impls shared by the register types.
//!
//! Operators run through [`Dispatcher::global`](crate::simd::Dispatcher::global).
//! Code that needs a specific dispatcher calls the kernel traits directly.

macro_rules! register_operators {
    ($register:ident, $scalar:ty) => {
        register_operators!(@binary $register, $scalar, Add, add, AddAssign, add_assign, Arithmetic, add);
        register_operators!(@binary $register, $scalar, Sub, sub, SubAssign, sub_assign, Arithmetic, subtract);
        register_operators!(@binary $register, $scalar, Mul, mul, MulAssign, mul_assign, Arithmetic, multiply);
        register_operators!(@binary $register, $scalar, Div, div, DivAssign, div_assign, Arithmetic, divide);

        register_operators!(@bitwise $register, BitAnd, bitand, BitAndAssign, bitand_assign, and);
        register_operators!(@bitwise $register, BitOr, bitor, BitOrAssign, bitor_assign, or);
        register_operators!(@bitwise $register, BitXor, bitxor, BitXorAssign, bitxor_assign, xor);

        impl std::ops::Neg for $register {
            type Output = Self;

            /// Flips the sign bit of every lane.
            #[inline]
            fn neg(self) -> Self {
                $crate::ops::Arithmetic::negate($crate::simd::Dispatcher::global(), self)
            }
        }

        impl std::ops::Not for $register {
            type Output = Self;

            /// Flips every bit of every lane.
            #[inline]
            fn not(self) -> Self {
                $crate::ops::Bitwise::not($crate::simd::Dispatcher::global(), self)
            }
        }
    };

    (@binary $register:ident, $scalar:ty, $op:ident, $method:ident,
     $assign_op:ident, $assign_method:ident, $kernel_trait:ident, $kernel:ident) => {
        impl std::ops::$op for $register {
            type Output = Self;

            #[inline]
            fn $method(self, rhs: Self) -> Self {
                $crate::ops::$kernel_trait::$kernel($crate::simd::Dispatcher::global(), self, rhs)
            }
        }

        impl std::ops::$op<$scalar> for $register {
            type Output = Self;

            /// Applies the scalar to every lane.
            #[inline]
            fn $method(self, rhs: $scalar) -> Self {
                $crate::ops::$kernel_trait::$kernel(
                    $crate::simd::Dispatcher::global(),
                    self,
                    $register::splat(rhs),
                )
            }
        }

        impl std::ops::$assign_op for $register {
            #[inline]
            fn $assign_method(&mut self, rhs: Self) {
                *self = std::ops::$op::$method(*self, rhs);
            }
        }

        impl std::ops::$assign_op<$scalar> for $register {
            #[inline]
            fn $assign_method(&mut self, rhs: $scalar) {
                *self = std::ops::$op::$method(*self, rhs);
            }
        }
    };

    (@bitwise $register:ident, $op:ident, $method:ident,
     $assign_op:ident, $assign_method:ident, $kernel:ident) => {
        impl std::ops::$op for $register {
            type Output = Self;

            /// Operates on the raw bit pattern of each lane.
            #[inline]
            fn $method(self, rhs: Self) -> Self {
                $crate::ops::Bitwise::$kernel($crate::simd::Dispatcher::global(), self, rhs)
            }
        }

        impl std::ops::$assign_op for $register {
            #[inline]
            fn $assign_method(&mut self, rhs: Self) {
                *self = std::ops::$op::$method(*self, rhs);
            }
        }
    };
}

pub(crate) use register_operators;
