#[macro_export]
/// Helper macro to compose `From` implementations.
macro_rules! compose_from {
    ($to:tt, $mid:tt, $from:ty) => {
        impl From<$from> for $to {
            fn from(f: $from) -> Self { Self::from($mid::from(f)) }
        }
    };
}

#[macro_export]
/// Helper macro to make implementing `From` easier.
macro_rules! from_fn {
    ($to:ty, $from:ty, $fn:expr) => {
        impl From<$from> for $to {
            fn from(f: $from) -> $to { $fn(f) }
        }
    };
}

#[macro_export]
/// Helper macro to make implementing `From` easier.
macro_rules! from_as {
    ($to:tt, $from:ty, $as:ty) => {
        impl From<$from> for $to {
            fn from(f: $from) -> $to { $to::from(f as $as) }
        }
    };
}

#[macro_export]
/// Implements `From` for the primitive integers that widen losslessly into `i64`.
macro_rules! from_prims {
    ($to:tt) => {
        from_as!($to, i32, i64);
        from_as!($to, i16, i64);
        from_as!($to, i8, i64);

        from_as!($to, u32, i64);
        from_as!($to, u16, i64);
        from_as!($to, u8, i64);
    };
}

#[macro_export]
/// Implements `TryFrom` for the payload of a single-field variant, handing the value
/// back on mismatch.
macro_rules! try_from_ctor {
    ($from:ty, $to:ty, $ctor:path) => {
        impl std::convert::TryFrom<$from> for $to {
            type Error = $from;

            fn try_from(f: $from) -> Result<$to, $from> {
                match f {
                    $ctor(t) => Ok(t),
                    other => Err(other),
                }
            }
        }
    };
}
