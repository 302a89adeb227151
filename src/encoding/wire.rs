// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Statically typed message contract.
//!
//! [`WireField`] gives every field type its encode and decode rule, and
//! [`Message`] adds the top-level version gate. Message types are declared
//! with the [`message!`](crate::message) macro, which generates a plain
//! struct plus both impls from one field list:
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use bitpacker::{message, Message};
//!
//! message! {
//!     #[version = "1.0.0"]
//!     pub struct Vec3 {
//!         pub x: i32,
//!         pub y: i32,
//!         pub z: i32,
//!     }
//! }
//!
//! let v = Vec3 { x: 10, y: -20, z: 30 };
//! let bytes = v.encode();
//! assert_eq!(&bytes[6..], &[0x14, 0x27, 0x3C]);
//! assert_eq!(Vec3::decode(&bytes)?, v);
//! # Ok(())
//! # }
//! ```

use crate::core::{CodecConfig, Result};
use crate::schema::{FieldDef, FieldType, MessageDef, Schema};

use super::{ByteBuffer, ByteCursor};

/// A type that can appear as a message field.
pub trait WireField: Sized {
    /// The schema type this Rust type encodes as.
    fn field_type() -> FieldType;

    /// Append this value's encoding.
    fn encode_field(&self, buf: &mut ByteBuffer);

    /// Read one value.
    fn decode_field(cursor: &mut ByteCursor<'_>) -> Result<Self>;

    /// Push the definitions of every message reachable from this type.
    ///
    /// Scalars reach none.
    fn collect_defs(_defs: &mut Vec<MessageDef>) {}
}

macro_rules! impl_scalar_field {
    ($ty:ty, $variant:ident, $put:ident, $get:ident) => {
        impl WireField for $ty {
            fn field_type() -> FieldType {
                FieldType::$variant
            }

            #[inline]
            fn encode_field(&self, buf: &mut ByteBuffer) {
                buf.$put(*self);
            }

            #[inline]
            fn decode_field(cursor: &mut ByteCursor<'_>) -> Result<Self> {
                cursor.$get()
            }
        }
    };
}

impl_scalar_field!(i32, Int32, put_int32, get_int32);
impl_scalar_field!(i64, Int64, put_int64, get_int64);
impl_scalar_field!(f32, Float32, put_float, get_float);
impl_scalar_field!(f64, Float64, put_double, get_double);
impl_scalar_field!(bool, Bool, put_bool, get_bool);

impl WireField for String {
    fn field_type() -> FieldType {
        FieldType::String
    }

    fn encode_field(&self, buf: &mut ByteBuffer) {
        buf.put_string(self);
    }

    fn decode_field(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        cursor.get_string()
    }
}

impl<T: WireField> WireField for Vec<T> {
    fn field_type() -> FieldType {
        T::field_type().repeated()
    }

    fn encode_field(&self, buf: &mut ByteBuffer) {
        buf.put_length(self.len());
        for item in self {
            item.encode_field(buf);
        }
    }

    fn decode_field(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let count = cursor.get_count()?;
        let mut items = Vec::with_capacity(cursor.reserve_hint(count));
        for _ in 0..count {
            items.push(T::decode_field(cursor)?);
        }
        Ok(items)
    }

    fn collect_defs(defs: &mut Vec<MessageDef>) {
        T::collect_defs(defs);
    }
}

/// A top-level message type.
///
/// `encode_into`/`decode_from` are the nested forms: fields only, in
/// declared order, no framing. `encode`/`decode` are the top-level forms
/// that write and check the version tag.
pub trait Message: WireField {
    /// Message type name.
    const NAME: &'static str;

    /// Version tag written by [`Message::encode`] and checked by [`Message::decode`].
    const VERSION: &'static str;

    /// Field definitions in wire order.
    fn fields() -> Vec<FieldDef>;

    /// Write every field, in declared order, with no version tag.
    fn encode_into(&self, buf: &mut ByteBuffer);

    /// Read every field, in declared order, without checking a version.
    fn decode_from(cursor: &mut ByteCursor<'_>) -> Result<Self>;

    /// This type's definition.
    fn message_def() -> MessageDef {
        MessageDef {
            name: Self::NAME.to_string(),
            version_tag: Self::VERSION.to_string(),
            fields: Self::fields(),
        }
    }

    /// A schema holding this message as root plus every message it reaches.
    fn schema() -> Result<Schema> {
        let mut defs = Vec::new();
        Self::collect_defs(&mut defs);
        Schema::from_defs(Self::VERSION, defs)
    }

    /// Encode as a versioned top-level payload.
    fn encode(&self) -> Vec<u8> {
        self.encode_with(&CodecConfig::default())
    }

    /// Encode as a versioned top-level payload using `config` for buffer sizing.
    fn encode_with(&self, config: &CodecConfig) -> Vec<u8> {
        let mut buf = ByteBuffer::with_capacity(config.initial_capacity);
        buf.put_string(Self::VERSION);
        self.encode_into(&mut buf);
        let bytes = buf.finish();
        tracing::debug!(message = Self::NAME, bytes = bytes.len(), "encoded message");
        bytes
    }

    /// Decode a versioned top-level payload.
    fn decode(bytes: &[u8]) -> Result<Self> {
        Self::decode_with(bytes, &CodecConfig::default())
    }

    /// Decode a versioned top-level payload using the limits in `config`.
    ///
    /// Bytes after the message body are ignored.
    fn decode_with(bytes: &[u8], config: &CodecConfig) -> Result<Self> {
        let mut cursor = ByteCursor::with_config(bytes, config);
        cursor.expect_version(Self::VERSION)?;
        let message = Self::decode_from(&mut cursor)?;
        tracing::debug!(
            message = Self::NAME,
            bytes = cursor.position(),
            "decoded message"
        );
        Ok(message)
    }
}

/// Declare a message struct with its wire contract.
///
/// The struct gets `Debug`, `Default`, `Clone` and `PartialEq`; field types
/// must implement [`WireField`]. Field order is wire order.
///
/// ```
/// use bitpacker::{message, Message};
///
/// message! {
///     #[version = "1.0.0"]
///     /// An inventory entry.
///     pub struct Item {
///         pub id: i32,
///         pub name: String,
///         pub weight: f32,
///     }
/// }
///
/// message! {
///     #[version = "1.0.0"]
///     pub struct Bag {
///         pub items: Vec<Item>,
///     }
/// }
///
/// let schema = Bag::schema().unwrap();
/// assert_eq!(schema.len(), 2);
/// ```
#[macro_export]
macro_rules! message {
    (
        #[version = $version:literal]
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Default, Clone, PartialEq)]
        $vis struct $name {
            $(
                $(#[$fmeta])*
                $fvis $field: $ty,
            )*
        }

        impl $crate::WireField for $name {
            fn field_type() -> $crate::FieldType {
                $crate::FieldType::Message(::std::string::String::from(stringify!($name)))
            }

            fn encode_field(&self, buf: &mut $crate::ByteBuffer) {
                <Self as $crate::Message>::encode_into(self, buf);
            }

            fn decode_field(cursor: &mut $crate::ByteCursor<'_>) -> $crate::Result<Self> {
                <Self as $crate::Message>::decode_from(cursor)
            }

            fn collect_defs(defs: &mut ::std::vec::Vec<$crate::MessageDef>) {
                if defs.iter().any(|d| d.name == stringify!($name)) {
                    return;
                }
                defs.push(<Self as $crate::Message>::message_def());
                $( <$ty as $crate::WireField>::collect_defs(defs); )*
            }
        }

        impl $crate::Message for $name {
            const NAME: &'static str = stringify!($name);
            const VERSION: &'static str = $version;

            fn fields() -> ::std::vec::Vec<$crate::FieldDef> {
                ::std::vec![
                    $( $crate::FieldDef::new(
                        stringify!($field),
                        <$ty as $crate::WireField>::field_type(),
                    ), )*
                ]
            }

            #[allow(unused_variables)]
            fn encode_into(&self, buf: &mut $crate::ByteBuffer) {
                $( $crate::WireField::encode_field(&self.$field, buf); )*
            }

            #[allow(unused_variables)]
            fn decode_from(cursor: &mut $crate::ByteCursor<'_>) -> $crate::Result<Self> {
                ::std::result::Result::Ok(Self {
                    $( $field: <$ty as $crate::WireField>::decode_field(cursor)?, )*
                })
            }
        }
    };
}
