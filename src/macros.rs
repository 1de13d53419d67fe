//! Declarative builders for enums, raw-backed models and discriminated unions.

/// Declares a closed string enumeration with an `Other` escape hatch.
///
/// Unknown wire values deserialize into `Other` and serialize back unchanged;
/// `validate()` on the owning model rejects them.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )*
            /// A value this version of the crate does not know about.
            Other(String),
        }

        impl $name {
            /// Known wire values.
            pub const VALUES: &'static [&'static str] = &[$($wire),*];

            pub fn as_str(&self) -> &str {
                match self {
                    $( $name::$variant => $wire, )*
                    $name::Other(other) => other.as_str(),
                }
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, $name::Other(_))
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                match value {
                    $( $wire => $name::$variant, )*
                    other => $name::Other(other.to_string()),
                }
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                $name::from(value.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl $crate::raw::FieldValue for $name {
            fn to_json(&self) -> serde_json::Value {
                serde_json::Value::String(self.as_str().to_string())
            }

            fn from_json(value: &serde_json::Value, path: &str) -> $crate::errors::Result<Self> {
                <String as $crate::raw::FieldValue>::from_json(value, path).map($name::from)
            }

            fn validate_json(value: &serde_json::Value, path: &str) -> $crate::errors::Result<()> {
                match <Self as $crate::raw::FieldValue>::from_json(value, path)? {
                    $name::Other(other) => Err($crate::errors::Error::InvalidEnumValue {
                        field: path.to_string(),
                        value: other,
                    }),
                    _ => Ok(()),
                }
            }
        }
    };
}

/// Declares a model backed by [`RawData`](crate::raw::RawData).
///
/// Each field carries a presence keyword:
///
/// - `required`: getter returns `Result<T>`, setter takes the value.
/// - `nullable`: getter returns `Result<Option<T>>`, `set_x(None)` stores JSON null.
/// - `optional`: getter returns `Result<Option<T>>`, `set_x(None)` removes the key.
///
/// Every non-required field also gets `unset_x()`, and every field a
/// consuming `with_x(value)` builder. A `tag field = "value"` clause declares
/// a discriminator that `new()` and `from_raw_data` fill in, that no setter
/// can change, and that is always written with its fixed value on output.
///
/// Equality compares declared fields through their typed form, so `0` and
/// `0.0` or two spellings of the same instant are equal. Undeclared keys and
/// the discriminator are ignored, at every nesting level.
macro_rules! model {
    (
        $(#[$meta:meta])*
        pub struct $name:ident tag $tag_field:ident = $tag:literal {
            $($body:tt)*
        }
    ) => {
        model!(@define [$(#[$meta])*] $name [$tag_field = $tag] { $($body)* });

        impl $name {
            /// Fixed discriminator value of this model.
            pub const TAG: &'static str = $tag;

            pub fn $tag_field(&self) -> &'static str {
                $tag
            }
        }

        impl $crate::raw::Tagged for $name {
            const TAG_FIELD: &'static str = stringify!($tag_field);
            const TAG: &'static str = $tag;
        }
    };

    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $($body:tt)*
        }
    ) => {
        model!(@define [$(#[$meta])*] $name [] { $($body)* });
    };

    (@define [$(#[$meta:meta])*] $name:ident [$($tag_field:ident = $tag:literal)?] {
        $( $(#[$fmeta:meta])* $presence:ident $field:ident : $ty:ty ),* $(,)?
    }) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            raw: $crate::raw::RawData,
        }

        impl $name {
            pub fn new() -> Self {
                #[allow(unused_mut)]
                let mut raw = $crate::raw::RawData::new();
                $( raw.insert_raw(stringify!($tag_field), serde_json::Value::from($tag)); )?
                Self { raw }
            }

            $( model!(@accessors [$(#[$fmeta])*] $presence $field : $ty); )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl $crate::raw::Model for $name {
            const FIELDS: &'static [$crate::raw::FieldSpec] = &[
                $( $crate::raw::FieldSpec {
                    name: stringify!($tag_field),
                    presence: $crate::raw::Presence::Required,
                }, )?
                $( $crate::raw::FieldSpec {
                    name: stringify!($field),
                    presence: model!(@presence $presence),
                }, )*
            ];

            fn raw_data(&self) -> &$crate::raw::RawData {
                &self.raw
            }

            fn raw_data_mut(&mut self) -> &mut $crate::raw::RawData {
                &mut self.raw
            }

            fn from_raw_data(raw: $crate::raw::RawData) -> Self {
                #[allow(unused_mut)]
                let mut raw = raw;
                $( raw.ensure_tag(stringify!($tag_field), $tag); )?
                Self { raw }
            }

            $(
                fn wire_data(&self) -> ::std::borrow::Cow<'_, $crate::raw::RawData> {
                    self.raw.with_tag(stringify!($tag_field), $tag)
                }
            )?

            fn validate_at(&self, path: &str) -> $crate::errors::Result<()> {
                $( self.raw.validate_field::<$ty>(
                    stringify!($field),
                    model!(@presence $presence),
                    path,
                )?; )*
                Ok(())
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                true $( && self.raw.field_eq::<$ty>(&other.raw, stringify!($field)) )*
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> ::std::result::Result<S::Ok, S::Error> {
                serde::Serialize::serialize(&*$crate::raw::Model::wire_data(self), serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(
                deserializer: D,
            ) -> ::std::result::Result<Self, D::Error> {
                <$crate::raw::RawData as serde::Deserialize>::deserialize(deserializer)
                    .map(<Self as $crate::raw::Model>::from_raw_data)
            }
        }

        impl $crate::raw::FieldValue for $name {
            fn to_json(&self) -> serde_json::Value {
                serde_json::Value::from($crate::raw::Model::wire_data(self).into_owned())
            }

            fn from_json(value: &serde_json::Value, path: &str) -> $crate::errors::Result<Self> {
                match value {
                    serde_json::Value::Object(map) => Ok(<Self as $crate::raw::Model>::from_raw_data(
                        $crate::raw::RawData::from(map.clone()),
                    )),
                    other => Err($crate::errors::Error::InvalidField {
                        field: path.to_string(),
                        message: format!("expected an object, got {other}"),
                    }),
                }
            }

            fn validate_json(value: &serde_json::Value, path: &str) -> $crate::errors::Result<()> {
                let model = <Self as $crate::raw::FieldValue>::from_json(value, path)?;
                <Self as $crate::raw::Model>::validate_at(&model, path)
            }

            fn eq_json(a: &serde_json::Value, b: &serde_json::Value) -> bool {
                $crate::raw::typed_eq::<Self>(a, b)
            }
        }
    };

    (@presence required) => { $crate::raw::Presence::Required };
    (@presence nullable) => { $crate::raw::Presence::Nullable };
    (@presence optional) => { $crate::raw::Presence::Optional };

    (@accessors [$(#[$fmeta:meta])*] required $field:ident : $ty:ty) => {
        paste::paste! {
            $(#[$fmeta])*
            pub fn $field(&self) -> $crate::errors::Result<$ty> {
                self.raw.required(stringify!($field))
            }

            pub fn [<set_ $field>](&mut self, value: impl Into<$ty>) {
                self.raw.set(stringify!($field), &value.into());
            }

            pub fn [<with_ $field>](mut self, value: impl Into<$ty>) -> Self {
                self.[<set_ $field>](value);
                self
            }
        }
    };

    (@accessors [$(#[$fmeta:meta])*] nullable $field:ident : $ty:ty) => {
        paste::paste! {
            $(#[$fmeta])*
            pub fn $field(&self) -> $crate::errors::Result<Option<$ty>> {
                self.raw.get(stringify!($field))
            }

            /// `None` records an explicit JSON null.
            pub fn [<set_ $field>](&mut self, value: Option<$ty>) {
                match value {
                    Some(value) => self.raw.set(stringify!($field), &value),
                    None => self.raw.set_null(stringify!($field)),
                }
            }

            pub fn [<with_ $field>](mut self, value: impl Into<$ty>) -> Self {
                self.raw.set(stringify!($field), &value.into());
                self
            }

            pub fn [<unset_ $field>](&mut self) {
                self.raw.unset(stringify!($field));
            }
        }
    };

    (@accessors [$(#[$fmeta:meta])*] optional $field:ident : $ty:ty) => {
        paste::paste! {
            $(#[$fmeta])*
            pub fn $field(&self) -> $crate::errors::Result<Option<$ty>> {
                self.raw.get(stringify!($field))
            }

            /// `None` leaves the field unset; this field is never sent as null.
            pub fn [<set_ $field>](&mut self, value: Option<$ty>) {
                match value {
                    Some(value) => self.raw.set(stringify!($field), &value),
                    None => self.raw.unset(stringify!($field)),
                }
            }

            pub fn [<with_ $field>](mut self, value: impl Into<$ty>) -> Self {
                self.raw.set(stringify!($field), &value.into());
                self
            }

            pub fn [<unset_ $field>](&mut self) {
                self.raw.unset(stringify!($field));
            }
        }
    };
}

/// Declares a closed union of [`Tagged`](crate::raw::Tagged) models that is
/// resolved by reading its discriminator field.
///
/// Deserializing a missing or unrecognized discriminator fails with
/// [`Error::UnknownVariant`](crate::errors::Error::UnknownVariant).
macro_rules! discriminated_union {
    (
        $(#[$meta:meta])*
        pub enum $name:ident tag $tag_field:ident {
            $( $(#[$vmeta:meta])* $variant:ident($ty:ty) ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant($ty), )*
        }

        impl $name {
            /// Wire name of the discriminator field.
            pub const TAG_FIELD: &'static str = stringify!($tag_field);

            /// Discriminator values of every known variant.
            pub const TAGS: &'static [&'static str] = &[$( <$ty as $crate::raw::Tagged>::TAG ),*];

            /// Fixed discriminator value of the held variant.
            pub fn $tag_field(&self) -> &'static str {
                match self {
                    $( $name::$variant(_) => <$ty as $crate::raw::Tagged>::TAG, )*
                }
            }

            pub fn raw_data(&self) -> &$crate::raw::RawData {
                match self {
                    $( $name::$variant(inner) => $crate::raw::Model::raw_data(inner), )*
                }
            }

            pub fn raw_data_mut(&mut self) -> &mut $crate::raw::RawData {
                match self {
                    $( $name::$variant(inner) => $crate::raw::Model::raw_data_mut(inner), )*
                }
            }

            /// The held variant's map as it goes on the wire, fixed tag included.
            pub fn wire_data(&self) -> ::std::borrow::Cow<'_, $crate::raw::RawData> {
                match self {
                    $( $name::$variant(inner) => $crate::raw::Model::wire_data(inner), )*
                }
            }

            /// Picks the variant named by the discriminator in `raw`.
            pub fn from_raw_data(raw: $crate::raw::RawData) -> $crate::errors::Result<Self> {
                Self::resolve(raw, "")
            }

            fn resolve(raw: $crate::raw::RawData, path: &str) -> $crate::errors::Result<Self> {
                let field = $crate::raw::field_path(path, stringify!($tag_field));
                let tag = match raw.get_raw(stringify!($tag_field)) {
                    Some(serde_json::Value::String(tag)) => tag.clone(),
                    Some(serde_json::Value::Null) | None => {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(field = %field, "discriminator missing");
                        return Err($crate::errors::Error::UnknownVariant { field, value: None });
                    }
                    Some(other) => {
                        return Err($crate::errors::Error::UnknownVariant {
                            field,
                            value: Some(other.to_string()),
                        });
                    }
                };
                #[cfg(feature = "tracing")]
                tracing::trace!(union = stringify!($name), field = %field, tag = %tag, "resolving variant");
                $(
                    if tag == <$ty as $crate::raw::Tagged>::TAG {
                        return Ok($name::$variant(<$ty as $crate::raw::Model>::from_raw_data(raw)));
                    }
                )*
                #[cfg(feature = "tracing")]
                tracing::warn!(field = %field, tag = %tag, "unknown discriminator");
                Err($crate::errors::Error::UnknownVariant { field, value: Some(tag) })
            }

            pub fn validate_at(&self, path: &str) -> $crate::errors::Result<()> {
                match self {
                    $( $name::$variant(inner) => $crate::raw::Model::validate_at(inner, path), )*
                }
            }

            pub fn validate(&self) -> $crate::errors::Result<()> {
                self.validate_at("")
            }

            pub fn to_json_string(&self) -> $crate::errors::Result<String> {
                serde_json::to_string(&*self.wire_data()).map_err($crate::errors::Error::from)
            }

            pub fn from_json_str(json: &str) -> $crate::errors::Result<Self> {
                let raw: $crate::raw::RawData = serde_json::from_str(json)?;
                Self::from_raw_data(raw)
            }
        }

        $(
            impl From<$ty> for $name {
                fn from(inner: $ty) -> Self {
                    $name::$variant(inner)
                }
            }
        )*

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> ::std::result::Result<S::Ok, S::Error> {
                serde::Serialize::serialize(&*self.wire_data(), serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(
                deserializer: D,
            ) -> ::std::result::Result<Self, D::Error> {
                let raw = <$crate::raw::RawData as serde::Deserialize>::deserialize(deserializer)?;
                Self::from_raw_data(raw).map_err(serde::de::Error::custom)
            }
        }

        impl $crate::raw::FieldValue for $name {
            fn to_json(&self) -> serde_json::Value {
                serde_json::Value::from(self.wire_data().into_owned())
            }

            fn from_json(value: &serde_json::Value, path: &str) -> $crate::errors::Result<Self> {
                match value {
                    serde_json::Value::Object(map) => {
                        Self::resolve($crate::raw::RawData::from(map.clone()), path)
                    }
                    other => Err($crate::errors::Error::InvalidField {
                        field: path.to_string(),
                        message: format!("expected an object, got {other}"),
                    }),
                }
            }

            fn validate_json(value: &serde_json::Value, path: &str) -> $crate::errors::Result<()> {
                <Self as $crate::raw::FieldValue>::from_json(value, path)?.validate_at(path)
            }

            fn eq_json(a: &serde_json::Value, b: &serde_json::Value) -> bool {
                $crate::raw::typed_eq::<Self>(a, b)
            }
        }
    };
}
