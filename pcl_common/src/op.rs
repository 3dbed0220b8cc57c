//! Boilerplate for lifting `std::ops` traits onto single-field newtypes.
//!
//! ```rust,ignore
//! op!(binary Paise, Add, add);
//! op!(inplace Paise, AddAssign, add_assign);
//! op!(unary Paise, Neg, neg);
//! ```
#[macro_export]
macro_rules! op {
    (binary $type_name:ident, $impl_name:ident, $method_name:ident) => {
        impl std::ops::$impl_name for $type_name {
            type Output = Self;

            fn $method_name(self, rhs: Self) -> Self::Output {
                Self(std::ops::$impl_name::$method_name(self.0, rhs.0))
            }
        }
    };
    (inplace $type_name:ident, $impl_name:ident, $method_name:ident) => {
        impl std::ops::$impl_name for $type_name {
            fn $method_name(&mut self, rhs: Self) {
                std::ops::$impl_name::$method_name(&mut self.0, rhs.0)
            }
        }
    };
    (unary $type_name:ident, $impl_name:ident, $method_name:ident) => {
        impl std::ops::$impl_name for $type_name {
            type Output = Self;

            fn $method_name(self) -> Self::Output {
                Self(std::ops::$impl_name::$method_name(self.0))
            }
        }
    };
}
