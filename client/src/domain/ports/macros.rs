//! Helper macro for declaring port error enums.

/// Declare a `thiserror` enum whose variants all carry named fields, plus a
/// snake_case constructor per variant accepting `impl Into<_>` arguments.
macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),+ $(,)? } => $message:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, ::thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field: $ty),+ },
            )+
        }

        impl $name {
            $(
                ::paste::paste! {
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),+) -> Self {
                        Self::$variant { $($field: $field.into()),+ }
                    }
                }
            )+
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    define_port_error! {
        pub enum SamplePortError {
            Offline { message: String } => "offline: {message}",
            Refused { status: u16, reason: String } => "refused ({status}): {reason}",
        }
    }

    #[test]
    fn constructors_convert_field_values() {
        let err = SamplePortError::offline("no route");
        assert_eq!(err.to_string(), "offline: no route");
    }

    #[test]
    fn constructors_keep_argument_order() {
        let err = SamplePortError::refused(409_u16, "duplicate");
        assert_eq!(
            err,
            SamplePortError::Refused {
                status: 409,
                reason: "duplicate".to_owned()
            }
        );
        assert_eq!(err.to_string(), "refused (409): duplicate");
    }
}
