// The Licensed Work is (c) 2022 Sygma
// SPDX-License-Identifier: LGPL-3.0-only

//! Payloads of the messaging pallet events a transfer watches for. Event fields arrive as a
//! positional list inside the outer event container, never as a keyed object.

use core::{fmt, marker::PhantomData};

use serde::{
	de::{self, SeqAccess, Visitor},
	ser::SerializeTuple,
	Deserializer, Serializer,
};
use serde_json::Value;

use crate::{
	asset::Multiasset,
	location::Multilocation,
	variant::{from_value, Encoded, HexBytes, HexRef, Seed, VersionedCodec},
	Error, Version,
};

/// Fees charged to `paying` for delivering a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeesPaidEvent {
	pub paying: Multilocation,
	pub fees: Vec<Multiasset>,
}

/// A message sent from `origin` to `destination`.
#[derive(Debug, Clone, PartialEq)]
pub struct SentEvent {
	pub origin: Multilocation,
	pub destination: Multilocation,
	/// Left undecoded, callers only correlate on `message_id`.
	pub message: Value,
	pub message_id: [u8; 32],
}

impl FeesPaidEvent {
	pub const FIELDS: usize = 2;

	pub fn from_params(params: &Value, version: Version) -> Result<Self, Error> {
		from_value(params, version)
	}
}

impl SentEvent {
	pub const FIELDS: usize = 4;

	pub fn from_params(params: &Value, version: Version) -> Result<Self, Error> {
		from_value(params, version)
	}
}

/// Reads a fixed number of positional fields and nothing more.
struct Positional<'de, A> {
	seq: A,
	read: usize,
	expected: &'static str,
	marker: PhantomData<&'de ()>,
}

impl<'de, A: SeqAccess<'de>> Positional<'de, A> {
	fn new(seq: A, expected: &'static str) -> Self {
		Self { seq, read: 0, expected, marker: PhantomData }
	}

	fn versioned<T: VersionedCodec>(&mut self, version: Version) -> Result<T, A::Error> {
		let item = self
			.seq
			.next_element_seed(Seed::new(version))?
			.ok_or_else(|| <A::Error as de::Error>::invalid_length(self.read, &self.expected))?;
		self.read += 1;
		Ok(item)
	}

	fn value<T: de::Deserialize<'de>>(&mut self) -> Result<T, A::Error> {
		let item = self
			.seq
			.next_element()?
			.ok_or_else(|| <A::Error as de::Error>::invalid_length(self.read, &self.expected))?;
		self.read += 1;
		Ok(item)
	}

	fn finish(mut self) -> Result<(), A::Error> {
		if self.seq.next_element::<de::IgnoredAny>()?.is_some() {
			return Err(de::Error::invalid_length(self.read + 1, &self.expected))
		}
		Ok(())
	}
}

struct EventVisitor<T>(Version, PhantomData<T>);

impl<'de> Visitor<'de> for EventVisitor<FeesPaidEvent> {
	type Value = FeesPaidEvent;

	fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str("fees paid event fields [paying, fees]")
	}

	fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<FeesPaidEvent, A::Error> {
		let mut fields = Positional::new(seq, "2 fields");
		let paying = fields.versioned(self.0)?;
		let fees = fields.versioned(self.0)?;
		fields.finish()?;
		Ok(FeesPaidEvent { paying, fees })
	}
}

impl<'de> Visitor<'de> for EventVisitor<SentEvent> {
	type Value = SentEvent;

	fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str("sent event fields [origin, destination, message, message_id]")
	}

	fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<SentEvent, A::Error> {
		let mut fields = Positional::new(seq, "4 fields");
		let origin = fields.versioned(self.0)?;
		let destination = fields.versioned(self.0)?;
		let message = fields.value()?;
		let message_id = fields.value::<HexBytes>()?.into_array::<32, A::Error>()?;
		fields.finish()?;
		Ok(SentEvent { origin, destination, message, message_id })
	}
}

impl VersionedCodec for FeesPaidEvent {
	fn encode_versioned<S: Serializer>(
		&self,
		version: Version,
		serializer: S,
	) -> Result<S::Ok, S::Error> {
		let mut tuple = serializer.serialize_tuple(Self::FIELDS)?;
		tuple.serialize_element(&Encoded(&self.paying, version))?;
		tuple.serialize_element(&Encoded(&self.fees, version))?;
		tuple.end()
	}

	fn decode_versioned<'de, D: Deserializer<'de>>(
		version: Version,
		deserializer: D,
	) -> Result<Self, D::Error> {
		deserializer.deserialize_tuple(Self::FIELDS, EventVisitor(version, PhantomData::<Self>))
	}
}

impl VersionedCodec for SentEvent {
	fn encode_versioned<S: Serializer>(
		&self,
		version: Version,
		serializer: S,
	) -> Result<S::Ok, S::Error> {
		let mut tuple = serializer.serialize_tuple(Self::FIELDS)?;
		tuple.serialize_element(&Encoded(&self.origin, version))?;
		tuple.serialize_element(&Encoded(&self.destination, version))?;
		tuple.serialize_element(&self.message)?;
		tuple.serialize_element(&HexRef(&self.message_id))?;
		tuple.end()
	}

	fn decode_versioned<'de, D: Deserializer<'de>>(
		version: Version,
		deserializer: D,
	) -> Result<Self, D::Error> {
		deserializer.deserialize_tuple(Self::FIELDS, EventVisitor(version, PhantomData::<Self>))
	}
}

#[cfg(test)]
mod test {
	use serde_json::json;

	use super::*;
	use crate::{
		mock::{usdt_location, ALICE, ASSET_HUB},
		variant::to_value,
		Junction, NetworkId,
	};

	fn alice() -> Multilocation {
		Multilocation::new(0, Junction::AccountId32 { network: NetworkId::Any, id: ALICE })
	}

	#[test]
	fn fees_paid_decodes_positionally() {
		let event = FeesPaidEvent {
			paying: alice(),
			fees: vec![Multiasset::fungible(Multilocation::parent(), 1_000)],
		};
		for version in [Version::V3, Version::V4] {
			let params = to_value(&event, version).unwrap();
			assert!(params.is_array());
			assert_eq!(FeesPaidEvent::from_params(&params, version).unwrap(), event);
		}
	}

	#[test]
	fn sent_keeps_message_opaque() {
		let params = json!([
			{"parents": 0, "interior": ["X1", ["AccountId32", {"network": null, "id": format!("0x{}", hex::encode(ALICE))}]]},
			{"parents": 1, "interior": ["X1", ["Parachain", ASSET_HUB]]},
			[["ClearOrigin", null]],
			format!("0x{}", "ab".repeat(32)),
		]);
		let event = SentEvent::from_params(&params, Version::V3).unwrap();

		assert_eq!(event.origin, alice());
		assert_eq!(event.destination, Multilocation::new(1, Junction::Parachain(ASSET_HUB)));
		assert_eq!(event.message, json!([["ClearOrigin", null]]));
		assert_eq!(event.message_id, [0xab; 32]);
		assert_eq!(to_value(&event, Version::V3).unwrap(), params);
	}

	#[test]
	fn keyed_objects_and_wrong_arity_are_rejected() {
		let paying = to_value(&alice(), Version::V3).unwrap();
		let fees = to_value(&vec![Multiasset::fungible(usdt_location(), 1)], Version::V3).unwrap();

		let keyed = json!({"paying": paying.clone(), "fees": fees.clone()});
		assert!(FeesPaidEvent::from_params(&keyed, Version::V3).is_err());

		let short = json!([paying.clone()]);
		assert!(FeesPaidEvent::from_params(&short, Version::V3).is_err());

		let long = json!([paying, fees, null]);
		assert!(FeesPaidEvent::from_params(&long, Version::V3).is_err());
	}
}
