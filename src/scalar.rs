use core::fmt::{self, Display};

/**
A default value for an argument or option.

Command-line defaults are plain scalars. `Null` is the default of an optional
argument or valued option that has no explicit default.
*/
#[derive(Debug, Clone, Default)]
pub enum Scalar {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Scalar {
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(*self, Scalar::Null)
    }

    /// Get the string, if this is a string
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match *self {
            Scalar::Str(ref s) => Some(s.as_str()),
            _ => None,
        }
    }
}

/// Floats compare by their bits, so a `NaN` default equals itself.
impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Null, Scalar::Null) => true,
            (Scalar::Bool(lhs), Scalar::Bool(rhs)) => lhs == rhs,
            (Scalar::Int(lhs), Scalar::Int(rhs)) => lhs == rhs,
            (Scalar::Float(lhs), Scalar::Float(rhs)) => lhs.to_bits() == rhs.to_bits(),
            (Scalar::Str(lhs), Scalar::Str(rhs)) => lhs == rhs,
            _ => false,
        }
    }
}

/// Scalars display as literals: strings are quoted, `Null` is `null`.
impl Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Scalar::Null => f.write_str("null"),
            Scalar::Bool(value) => write!(f, "{value}"),
            Scalar::Int(value) => write!(f, "{value}"),
            Scalar::Float(value) => write!(f, "{value:?}"),
            Scalar::Str(ref value) => write!(f, "{value:?}"),
        }
    }
}

macro_rules! from_int {
    ($($ty:ty)*) => {$(
        impl From<$ty> for Scalar {
            #[inline]
            fn from(value: $ty) -> Self {
                Scalar::Int(value.into())
            }
        }
    )*};
}

from_int! { i8 i16 i32 i64 u8 u16 u32 }

/// Integers too wide for `i64` become floats.
macro_rules! from_wide_int {
    ($($ty:ty)*) => {$(
        impl From<$ty> for Scalar {
            #[inline]
            fn from(value: $ty) -> Self {
                match i64::try_from(value) {
                    Ok(value) => Scalar::Int(value),
                    Err(_) => Scalar::Float(value as f64),
                }
            }
        }
    )*};
}

from_wide_int! { isize usize u64 }

impl From<f32> for Scalar {
    #[inline]
    fn from(value: f32) -> Self {
        Scalar::Float(value.into())
    }
}

impl From<f64> for Scalar {
    #[inline]
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<bool> for Scalar {
    #[inline]
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<&str> for Scalar {
    #[inline]
    fn from(value: &str) -> Self {
        Scalar::Str(value.to_owned())
    }
}

impl From<String> for Scalar {
    #[inline]
    fn from(value: String) -> Self {
        Scalar::Str(value)
    }
}

impl From<char> for Scalar {
    #[inline]
    fn from(value: char) -> Self {
        Scalar::Str(value.to_string())
    }
}

impl From<()> for Scalar {
    #[inline]
    fn from((): ()) -> Self {
        Scalar::Null
    }
}
