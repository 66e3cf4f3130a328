//! Macros to reduce boilerplate for the small closed vocabularies
//! (platforms, roles, sentiments, statuses) shared by pages and the CLI.

/// Generate `Display`, `FromStr` and an `as_str` accessor for a fieldless enum.
///
/// Parsing is case-insensitive. The error constructor receives the raw input.
///
/// ```rust,ignore
/// enum_display_fromstr!(
///     Platform,
///     ScopeError::invalid_platform,
///     {
///         Ios => "ios",
///         Android => "android",
///     }
/// );
/// ```
#[macro_export]
macro_rules! enum_display_fromstr {
    (
        $enum_name:ident,
        $error_ctor:path,
        { $($variant:ident => $str:expr),+ $(,)? }
    ) => {
        impl $enum_name {
            /// All accepted string forms, in declaration order.
            pub const ALL_STRINGS: &'static [&'static str] = &[$($str),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($enum_name::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = $crate::error::ScopeError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok($enum_name::$variant),)+
                    _ => Err($error_ctor(s.to_string())),
                }
            }
        }
    };
}
