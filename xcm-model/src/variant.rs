// The Licensed Work is (c) 2022 Sygma
// SPDX-License-Identifier: LGPL-3.0-only

//! Token framing shared by every wire type.
//!
//! A tagged variant is written as a two item sequence `[tag, payload]`, where a variant
//! without arguments carries an explicit `null`. Decoding reads the tag, checks it against
//! the closed table of the type for the requested version and only then dispatches the
//! payload, so an unknown tag is reported with its literal value.

use core::{fmt, marker::PhantomData};
use std::collections::BTreeMap;

use serde::{
	de::{self, DeserializeOwned, DeserializeSeed, IgnoredAny, MapAccess, SeqAccess, Visitor},
	ser::{self, SerializeMap, SerializeSeq, SerializeTuple},
	Deserialize, Deserializer, Serialize, Serializer,
};
use serde_json::{Map, Value};

use crate::{Error, Version};

/// A value whose token shape depends on the protocol version it is written for.
pub trait VersionedCodec: Sized {
	fn encode_versioned<S: Serializer>(
		&self,
		version: Version,
		serializer: S,
	) -> Result<S::Ok, S::Error>;

	fn decode_versioned<'de, D: Deserializer<'de>>(
		version: Version,
		deserializer: D,
	) -> Result<Self, D::Error>;
}

/// Serializes the borrowed value in the shape of the given version.
pub struct Encoded<'a, T>(pub &'a T, pub Version);

impl<T: VersionedCodec> Serialize for Encoded<'_, T> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		self.0.encode_versioned(self.1, serializer)
	}
}

/// Deserializes a value in the shape of the given version.
pub struct Seed<T> {
	version: Version,
	marker: PhantomData<T>,
}

impl<T> Seed<T> {
	pub fn new(version: Version) -> Self {
		Self { version, marker: PhantomData }
	}
}

impl<'de, T: VersionedCodec> DeserializeSeed<'de> for Seed<T> {
	type Value = T;

	fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<T, D::Error> {
		T::decode_versioned(self.version, deserializer)
	}
}

impl<T: VersionedCodec> VersionedCodec for Vec<T> {
	fn encode_versioned<S: Serializer>(
		&self,
		version: Version,
		serializer: S,
	) -> Result<S::Ok, S::Error> {
		let mut seq = serializer.serialize_seq(Some(self.len()))?;
		for item in self {
			seq.serialize_element(&Encoded(item, version))?;
		}
		seq.end()
	}

	fn decode_versioned<'de, D: Deserializer<'de>>(
		version: Version,
		deserializer: D,
	) -> Result<Self, D::Error> {
		struct ListVisitor<T>(Version, PhantomData<T>);

		impl<'de, T: VersionedCodec> Visitor<'de> for ListVisitor<T> {
			type Value = Vec<T>;

			fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
				f.write_str("a list")
			}

			fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Vec<T>, A::Error> {
				let mut items: Vec<T> = Vec::with_capacity(seq.size_hint().unwrap_or(0));
				while let Some(item) = seq.next_element_seed(Seed::new(self.0))? {
					items.push(item);
				}
				Ok(items)
			}
		}

		deserializer.deserialize_seq(ListVisitor(version, PhantomData))
	}
}

/// Encode `value` as a JSON token tree for `version`.
pub fn to_value<T: VersionedCodec>(value: &T, version: Version) -> Result<Value, Error> {
	Ok(serde_json::to_value(Encoded(value, version))?)
}

/// Decode a JSON token tree written for `version`.
pub fn from_value<T: VersionedCodec>(value: &Value, version: Version) -> Result<T, Error> {
	Ok(Seed::new(version).deserialize(value)?)
}

pub fn serialize_tagged<S, T>(serializer: S, tag: &str, payload: &T) -> Result<S::Ok, S::Error>
where
	S: Serializer,
	T: Serialize + ?Sized,
{
	let mut tuple = serializer.serialize_tuple(2)?;
	tuple.serialize_element(tag)?;
	tuple.serialize_element(payload)?;
	tuple.end()
}

pub fn serialize_unit_tagged<S: Serializer>(serializer: S, tag: &str) -> Result<S::Ok, S::Error> {
	serialize_tagged(serializer, tag, &())
}

pub(crate) fn unsupported<E: ser::Error>(what: &'static str, version: Version) -> E {
	E::custom(Error::UnsupportedInVersion { what, version })
}

/// Closed tag table of a tagged union.
pub trait VariantTable: Sized {
	const EXPECTING: &'static str;

	/// Tags accepted when decoding `version`.
	fn tags(version: Version) -> &'static [&'static str];

	/// Decode the payload of `tag`, which is already known to be in `tags(version)`.
	fn decode_variant<'de, A: SeqAccess<'de>>(
		version: Version,
		tag: &str,
		payload: Payload<'_, A>,
	) -> Result<Self, A::Error>;

	fn unknown<E: de::Error>(version: Version, tag: &str) -> E {
		E::unknown_variant(tag, Self::tags(version))
	}
}

pub fn deserialize_tagged<'de, D, T>(version: Version, deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: VariantTable,
{
	deserializer.deserialize_tuple(2, TaggedVisitor { version, marker: PhantomData::<T> })
}

struct TaggedVisitor<T> {
	version: Version,
	marker: PhantomData<T>,
}

impl<'de, T: VariantTable> Visitor<'de> for TaggedVisitor<T> {
	type Value = T;

	fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{} as a [tag, payload] pair", T::EXPECTING)
	}

	fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<T, A::Error> {
		let tag: String = seq
			.next_element()?
			.ok_or_else(|| <A::Error as de::Error>::invalid_length(0, &self))?;
		if !T::tags(self.version).contains(&tag.as_str()) {
			return Err(T::unknown(self.version, &tag))
		}

		let value = T::decode_variant(self.version, &tag, Payload { seq: &mut seq })?;
		if seq.next_element::<IgnoredAny>()?.is_some() {
			return Err(de::Error::invalid_length(3, &self))
		}
		Ok(value)
	}
}

/// The payload token following a tag.
pub struct Payload<'a, A> {
	seq: &'a mut A,
}

impl<A> Payload<'_, A> {
	fn missing<E: de::Error>() -> E {
		E::invalid_length(1, &"a [tag, payload] pair")
	}

	pub fn value<'de, T: Deserialize<'de>>(self) -> Result<T, A::Error>
	where
		A: SeqAccess<'de>,
	{
		self.seq.next_element()?.ok_or_else(Self::missing)
	}

	pub fn unit<'de>(self) -> Result<(), A::Error>
	where
		A: SeqAccess<'de>,
	{
		self.value()
	}

	pub fn versioned<'de, T: VersionedCodec>(self, version: Version) -> Result<T, A::Error>
	where
		A: SeqAccess<'de>,
	{
		self.seq.next_element_seed(Seed::new(version))?.ok_or_else(Self::missing)
	}

	pub fn seed<'de, S: DeserializeSeed<'de>>(self, seed: S) -> Result<S::Value, A::Error>
	where
		A: SeqAccess<'de>,
	{
		self.seq.next_element_seed(seed)?.ok_or_else(Self::missing)
	}

	pub fn fields<'de>(self) -> Result<Fields<A::Error>, A::Error>
	where
		A: SeqAccess<'de>,
	{
		self.value::<Map<String, Value>>().map(Fields::new)
	}
}

/// Keyed struct payload, consumed field by field.
pub struct Fields<E> {
	map: Map<String, Value>,
	marker: PhantomData<E>,
}

impl<E: de::Error> Fields<E> {
	fn new(map: Map<String, Value>) -> Self {
		Self { map, marker: PhantomData }
	}

	pub fn decode<'de, D: Deserializer<'de, Error = E>>(deserializer: D) -> Result<Self, E> {
		Map::deserialize(deserializer).map(Self::new)
	}

	fn take_raw(&mut self, name: &'static str) -> Result<Value, E> {
		self.map.remove(name).ok_or_else(|| E::missing_field(name))
	}

	pub fn take<T: DeserializeOwned>(&mut self, name: &'static str) -> Result<T, E> {
		let raw = self.take_raw(name)?;
		T::deserialize(raw).map_err(|e| E::custom(format_args!("field `{name}`: {e}")))
	}

	pub fn take_versioned<T: VersionedCodec>(
		&mut self,
		name: &'static str,
		version: Version,
	) -> Result<T, E> {
		let raw = self.take_raw(name)?;
		Seed::new(version)
			.deserialize(raw)
			.map_err(|e| E::custom(format_args!("field `{name}`: {e}")))
	}

	pub fn take_bytes(&mut self, name: &'static str) -> Result<Vec<u8>, E> {
		self.take::<HexBytes>(name).map(|bytes| bytes.0)
	}

	pub fn take_array<const N: usize>(&mut self, name: &'static str) -> Result<[u8; N], E> {
		self.take::<HexBytes>(name)?.into_array()
	}

	pub fn take_quantity(&mut self, name: &'static str) -> Result<u128, E> {
		self.take::<Quantity>(name).map(|quantity| quantity.0)
	}

	pub fn take_u64(&mut self, name: &'static str) -> Result<u64, E> {
		self.take::<Quantity>(name)?.into_u64()
	}

	/// Fails on any key that was not consumed.
	pub fn finish(self, expected: &'static [&'static str]) -> Result<(), E> {
		match self.map.keys().next() {
			Some(key) => Err(E::unknown_field(key, expected)),
			None => Ok(()),
		}
	}
}

/// Fixed-arity collection written either as an index keyed map (`{"0": .., "1": ..}`) or as
/// an ordered list.
pub(crate) struct IndexKeyed<'a, T>(pub &'a [T], pub Version);

impl<T: VersionedCodec> Serialize for IndexKeyed<'_, T> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(Some(self.0.len()))?;
		for (index, item) in self.0.iter().enumerate() {
			map.serialize_entry(&index.to_string(), &Encoded(item, self.1))?;
		}
		map.end()
	}
}

pub(crate) struct Listed<'a, T>(pub &'a [T], pub Version);

impl<T: VersionedCodec> Serialize for Listed<'_, T> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
		for item in self.0 {
			seq.serialize_element(&Encoded(item, self.1))?;
		}
		seq.end()
	}
}

/// Reads exactly `len` items from either collection shape.
pub(crate) struct ItemsSeed<T> {
	pub version: Version,
	pub len: usize,
	pub marker: PhantomData<T>,
}

impl<T> ItemsSeed<T> {
	pub fn new(version: Version, len: usize) -> Self {
		Self { version, len, marker: PhantomData }
	}
}

impl<'de, T: VersionedCodec> DeserializeSeed<'de> for ItemsSeed<T> {
	type Value = Vec<T>;

	fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Vec<T>, D::Error> {
		deserializer.deserialize_any(self)
	}
}

impl<'de, T: VersionedCodec> Visitor<'de> for ItemsSeed<T> {
	type Value = Vec<T>;

	fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{} items as a list or an index keyed map", self.len)
	}

	fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Vec<T>, A::Error> {
		let mut items: Vec<T> = Vec::with_capacity(self.len);
		while let Some(item) = seq.next_element_seed(Seed::new(self.version))? {
			items.push(item);
		}
		if items.len() != self.len {
			return Err(de::Error::invalid_length(items.len(), &self))
		}
		Ok(items)
	}

	fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Vec<T>, A::Error> {
		let mut keyed = BTreeMap::new();
		while let Some(key) = map.next_key::<String>()? {
			let index: usize = key.parse().map_err(|_| {
				de::Error::invalid_value(de::Unexpected::Str(&key), &"a decimal position")
			})?;
			let item: T = map.next_value_seed(Seed::new(self.version))?;
			if keyed.insert(index, item).is_some() {
				return Err(de::Error::custom(format_args!("duplicate position {index}")))
			}
		}

		// positions must be exactly 0..len
		if keyed.len() != self.len || keyed.keys().enumerate().any(|(i, key)| i != *key) {
			return Err(de::Error::invalid_length(keyed.len(), &self))
		}
		Ok(keyed.into_values().collect())
	}
}

/// `u64`/`u128` quantity, written as a decimal string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantity(pub u128);

impl Serialize for Quantity {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(&self.0)
	}
}

impl<'de> Deserialize<'de> for Quantity {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		struct QuantityVisitor;

		impl<'de> Visitor<'de> for QuantityVisitor {
			type Value = Quantity;

			fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
				f.write_str("an unsigned integer or its decimal string")
			}

			fn visit_u64<E: de::Error>(self, v: u64) -> Result<Quantity, E> {
				Ok(Quantity(v.into()))
			}

			fn visit_u128<E: de::Error>(self, v: u128) -> Result<Quantity, E> {
				Ok(Quantity(v))
			}

			fn visit_str<E: de::Error>(self, v: &str) -> Result<Quantity, E> {
				v.parse()
					.map(Quantity)
					.map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
			}
		}

		deserializer.deserialize_any(QuantityVisitor)
	}
}

impl Quantity {
	pub fn into_u64<E: de::Error>(self) -> Result<u64, E> {
		u64::try_from(self.0).map_err(|_| E::custom(format_args!("{} overflows u64", self.0)))
	}
}

/// Borrowed bytes written as `0x` prefixed hex.
pub struct HexRef<'a>(pub &'a [u8]);

impl Serialize for HexRef<'_> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&format!("0x{}", hex::encode(self.0)))
	}
}

/// Owned bytes read from hex, with or without the `0x` prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexBytes(pub Vec<u8>);

impl<'de> Deserialize<'de> for HexBytes {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let raw = String::deserialize(deserializer)?;
		let digits = raw.strip_prefix("0x").unwrap_or(&raw);
		hex::decode(digits).map(HexBytes).map_err(de::Error::custom)
	}
}

impl HexBytes {
	pub fn into_array<const N: usize, E: de::Error>(self) -> Result<[u8; N], E> {
		let len = self.0.len();
		self.0
			.try_into()
			.map_err(|_| E::custom(format_args!("expected {N} bytes, got {len}")))
	}
}
