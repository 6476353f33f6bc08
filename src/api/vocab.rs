//! Open vocabularies
//! PayPal's enumerations evolve independently of this client, so each one is a closed
//! enum plus an `Other` escape hatch that passes unrecognized tokens through unchanged.

/// Defines an open vocabulary enum with string (de)serialization
macro_rules! open_vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal) {
            $($(#[$vmeta:meta])* $variant:ident => $token:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
            /// Token not known to this client
            Other(String),
        }

        impl $name {
            /// Human readable vocabulary name used in advisories
            pub const VOCABULARY: &'static str = $label;

            /// Every token this client recognizes
            pub const KNOWN: &'static [&'static str] = &[$($token),+];

            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $token,)+
                    $name::Other(token) => token.as_str(),
                }
            }

            pub fn is_known(&self) -> bool {
                Self::KNOWN.contains(&self.as_str())
            }
        }

        impl From<&str> for $name {
            fn from(token: &str) -> Self {
                match token {
                    $($token => $name::$variant,)+
                    other => $name::Other(other.to_string()),
                }
            }
        }

        impl From<String> for $name {
            fn from(token: String) -> Self {
                $name::from(token.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(token: &str) -> std::result::Result<Self, Self::Err> {
                Ok($name::from(token))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let token = <String as serde::Deserialize>::deserialize(deserializer)?;
                Ok($name::from(token))
            }
        }
    };
}

pub(crate) use open_vocabulary;

open_vocabulary! {
    /// Where the buyer's shipping address comes from
    ShippingPreference("shipping preference") {
        /// Provided, or selectable from the buyer's PayPal addresses
        GetFromFile => "GET_FROM_FILE",
        /// Merchant provided address the buyer cannot change
        SetProvidedAddress => "SET_PROVIDED_ADDRESS",
        NoShipping => "NO_SHIPPING",
    }
}
