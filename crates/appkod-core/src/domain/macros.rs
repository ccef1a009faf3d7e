//! Declarative helper for closed string vocabularies.

/// Declare a closed vocabulary: a `Copy` enum whose variants map one-to-one
/// onto the exact (case-sensitive) strings a Blueprint document may contain.
///
/// Generates `ALL`, `NAMES`, `as_str`, `Display`, and an exact-match `FromStr`
/// that reports the legal set on failure. Serde uses the same strings, so the
/// typed model and the schema registry can never disagree on spelling.
macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($label:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        $vis enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant, )+
        }

        impl $name {
            /// Every member, in declaration order.
            pub const ALL: &'static [Self] = &[ $( Self::$variant ),+ ];

            /// Every member's document spelling, in declaration order.
            pub const NAMES: &'static [&'static str] = &[ $( $text ),+ ];

            pub const fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $text, )+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::domain::DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $text => Ok(Self::$variant), )+
                    other => Err($crate::domain::DomainError::UnknownVocabulary {
                        vocabulary: $label,
                        value: other.to_string(),
                        expected: Self::NAMES.join(", "),
                    }),
                }
            }
        }
    };
}
