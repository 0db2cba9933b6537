/// Implements `from_char`/`to_char` for a fieldless enum from a list of
/// `'c'=Variant` pairs.
macro_rules! impl_char_conv {
    ($impl_t:ty, $($val:literal=$member:ident),+ $(,)?) => {
        impl $impl_t {
            pub const fn from_char(input: char) -> Option<Self> {
                match input {
                    $($val => Some(Self::$member),)+
                    _ => None
                }
            }
            pub const fn to_char(&self) -> char {
                match self {
                    $(Self::$member => $val,)+
                }
            }
        }
    };
}

pub(crate) use impl_char_conv;
