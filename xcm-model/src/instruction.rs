// The Licensed Work is (c) 2022 Sygma
// SPDX-License-Identifier: LGPL-3.0-only

use serde::{de::SeqAccess, ser::SerializeStruct, Deserializer, Serialize, Serializer};

use crate::{
	asset::{Multiasset, MultiassetFilter},
	location::Multilocation,
	variant::{
		deserialize_tagged, serialize_tagged, serialize_unit_tagged, unsupported, Encoded, Fields,
		Listed, Payload, Quantity, VariantTable, VersionedCodec,
	},
	versioned::versioned_envelope,
	Version,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Weight {
	pub ref_time: u64,
	pub proof_size: u64,
}

impl Weight {
	pub fn new(ref_time: u64, proof_size: u64) -> Self {
		Self { ref_time, proof_size }
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeightLimit {
	Unlimited,
	Limited(Weight),
}

const WEIGHT_LIMIT_TAGS: &[&str] = &["Unlimited", "Limited"];

struct WeightFields(Weight);

impl Serialize for WeightFields {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut state = serializer.serialize_struct("Weight", 2)?;
		state.serialize_field("ref_time", &Quantity(self.0.ref_time.into()))?;
		state.serialize_field("proof_size", &Quantity(self.0.proof_size.into()))?;
		state.end()
	}
}

impl VersionedCodec for WeightLimit {
	fn encode_versioned<S: Serializer>(
		&self,
		version: Version,
		serializer: S,
	) -> Result<S::Ok, S::Error> {
		match self {
			WeightLimit::Unlimited => serialize_unit_tagged(serializer, "Unlimited"),
			WeightLimit::Limited(weight) => match version {
				// v2 weight is a single dimension
				Version::V0 | Version::V1 | Version::V2 =>
					serialize_tagged(serializer, "Limited", &Quantity(weight.ref_time.into())),
				Version::V3 | Version::V4 | Version::V5 =>
					serialize_tagged(serializer, "Limited", &WeightFields(*weight)),
			},
		}
	}

	fn decode_versioned<'de, D: Deserializer<'de>>(
		version: Version,
		deserializer: D,
	) -> Result<Self, D::Error> {
		deserialize_tagged(version, deserializer)
	}
}

impl VariantTable for WeightLimit {
	const EXPECTING: &'static str = "a weight limit";

	fn tags(_: Version) -> &'static [&'static str] {
		WEIGHT_LIMIT_TAGS
	}

	fn decode_variant<'de, A: SeqAccess<'de>>(
		version: Version,
		tag: &str,
		payload: Payload<'_, A>,
	) -> Result<Self, A::Error> {
		match (tag, version) {
			("Unlimited", _) => payload.unit().map(|_| WeightLimit::Unlimited),
			("Limited", Version::V0 | Version::V1 | Version::V2) => {
				let ref_time = payload.value::<Quantity>()?.into_u64::<A::Error>()?;
				Ok(WeightLimit::Limited(Weight::new(ref_time, 0)))
			},
			("Limited", Version::V3 | Version::V4 | Version::V5) => {
				let mut fields = payload.fields()?;
				let ref_time = fields.take_u64("ref_time")?;
				let proof_size = fields.take_u64("proof_size")?;
				fields.finish(&["ref_time", "proof_size"])?;
				Ok(WeightLimit::Limited(Weight::new(ref_time, proof_size)))
			},
			(other, _) => Err(Self::unknown(version, other)),
		}
	}
}

/// The subset of the executor instruction set used by asset transfer programs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
	WithdrawAsset(Vec<Multiasset>),
	ReserveAssetDeposited(Vec<Multiasset>),
	ReceiveTeleportedAsset(Vec<Multiasset>),
	ClearOrigin,
	BuyExecution { fees: Multiasset, weight_limit: WeightLimit },
	DepositAsset { assets: MultiassetFilter, beneficiary: Multilocation },
	DepositReserveAsset { assets: MultiassetFilter, dest: Multilocation, xcm: Vec<Instruction> },
	InitiateReserveWithdraw { assets: MultiassetFilter, reserve: Multilocation, xcm: Vec<Instruction> },
	InitiateTeleport { assets: MultiassetFilter, dest: Multilocation, xcm: Vec<Instruction> },
}

const INSTRUCTION_TAGS: &[&str] = &[
	"WithdrawAsset",
	"ReserveAssetDeposited",
	"ReceiveTeleportedAsset",
	"ClearOrigin",
	"BuyExecution",
	"DepositAsset",
	"DepositReserveAsset",
	"InitiateReserveWithdraw",
	"InitiateTeleport",
];

struct BuyExecution<'a> {
	version: Version,
	fees: &'a Multiasset,
	weight_limit: &'a WeightLimit,
}

impl Serialize for BuyExecution<'_> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut state = serializer.serialize_struct("BuyExecution", 2)?;
		state.serialize_field("fees", &Encoded(self.fees, self.version))?;
		state.serialize_field("weight_limit", &Encoded(self.weight_limit, self.version))?;
		state.end()
	}
}

/// Payload of the instructions that move a filtered set of assets somewhere.
struct Transfer<'a> {
	version: Version,
	assets: &'a MultiassetFilter,
	/// v2 deposits also bound the number of assets.
	max_assets: bool,
	target_field: &'static str,
	target: &'a Multilocation,
	xcm: Option<&'a [Instruction]>,
}

impl<'a> Transfer<'a> {
	fn new(
		version: Version,
		assets: &'a MultiassetFilter,
		max_assets: bool,
		(target_field, target): (&'static str, &'a Multilocation),
		xcm: Option<&'a Vec<Instruction>>,
	) -> Self {
		Self { version, assets, max_assets, target_field, target, xcm: xcm.map(Vec::as_slice) }
	}
}

impl Serialize for Transfer<'_> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let max_assets = self.max_assets && self.version == Version::V2;
		let len = 2 + usize::from(max_assets) + usize::from(self.xcm.is_some());

		let mut state = serializer.serialize_struct("Transfer", len)?;
		state.serialize_field("assets", &Encoded(self.assets, self.version))?;
		if max_assets {
			state.serialize_field("max_assets", &self.assets.count())?;
		}
		state.serialize_field(self.target_field, &Encoded(self.target, self.version))?;
		if let Some(xcm) = self.xcm {
			state.serialize_field("xcm", &Listed(xcm, self.version))?;
		}
		state.end()
	}
}

impl VersionedCodec for Instruction {
	fn encode_versioned<S: Serializer>(
		&self,
		version: Version,
		serializer: S,
	) -> Result<S::Ok, S::Error> {
		if version < Version::V2 {
			return Err(unsupported("instruction", version))
		}
		match self {
			Instruction::WithdrawAsset(assets) =>
				serialize_tagged(serializer, "WithdrawAsset", &Listed(assets, version)),
			Instruction::ReserveAssetDeposited(assets) =>
				serialize_tagged(serializer, "ReserveAssetDeposited", &Listed(assets, version)),
			Instruction::ReceiveTeleportedAsset(assets) =>
				serialize_tagged(serializer, "ReceiveTeleportedAsset", &Listed(assets, version)),
			Instruction::ClearOrigin => serialize_unit_tagged(serializer, "ClearOrigin"),
			Instruction::BuyExecution { fees, weight_limit } => serialize_tagged(
				serializer,
				"BuyExecution",
				&BuyExecution { version, fees, weight_limit },
			),
			Instruction::DepositAsset { assets, beneficiary } => serialize_tagged(
				serializer,
				"DepositAsset",
				&Transfer::new(version, assets, true, ("beneficiary", beneficiary), None),
			),
			Instruction::DepositReserveAsset { assets, dest, xcm } => serialize_tagged(
				serializer,
				"DepositReserveAsset",
				&Transfer::new(version, assets, true, ("dest", dest), Some(xcm)),
			),
			Instruction::InitiateReserveWithdraw { assets, reserve, xcm } => serialize_tagged(
				serializer,
				"InitiateReserveWithdraw",
				&Transfer::new(version, assets, false, ("reserve", reserve), Some(xcm)),
			),
			Instruction::InitiateTeleport { assets, dest, xcm } => serialize_tagged(
				serializer,
				"InitiateTeleport",
				&Transfer::new(version, assets, false, ("dest", dest), Some(xcm)),
			),
		}
	}

	fn decode_versioned<'de, D: Deserializer<'de>>(
		version: Version,
		deserializer: D,
	) -> Result<Self, D::Error> {
		deserialize_tagged(version, deserializer)
	}
}

/// Reads `assets`, the v2 `max_assets` bound when present in the shape, and `target`.
fn take_transfer<E: serde::de::Error>(
	fields: &mut Fields<E>,
	version: Version,
	max_assets: bool,
	target: &'static str,
) -> Result<(MultiassetFilter, Multilocation), E> {
	let assets = fields.take_versioned("assets", version)?;
	if max_assets && version == Version::V2 {
		let _: u32 = fields.take("max_assets")?;
	}
	let location = fields.take_versioned(target, version)?;
	Ok((assets, location))
}

impl VariantTable for Instruction {
	const EXPECTING: &'static str = "an instruction";

	fn tags(version: Version) -> &'static [&'static str] {
		match version {
			Version::V0 | Version::V1 => &[],
			Version::V2 | Version::V3 | Version::V4 | Version::V5 => INSTRUCTION_TAGS,
		}
	}

	fn decode_variant<'de, A: SeqAccess<'de>>(
		version: Version,
		tag: &str,
		payload: Payload<'_, A>,
	) -> Result<Self, A::Error> {
		match tag {
			"WithdrawAsset" => payload.versioned(version).map(Instruction::WithdrawAsset),
			"ReserveAssetDeposited" => payload.versioned(version).map(Instruction::ReserveAssetDeposited),
			"ReceiveTeleportedAsset" =>
				payload.versioned(version).map(Instruction::ReceiveTeleportedAsset),
			"ClearOrigin" => payload.unit().map(|_| Instruction::ClearOrigin),
			"BuyExecution" => {
				let mut fields = payload.fields()?;
				let fees = fields.take_versioned("fees", version)?;
				let weight_limit = fields.take_versioned("weight_limit", version)?;
				fields.finish(&["fees", "weight_limit"])?;
				Ok(Instruction::BuyExecution { fees, weight_limit })
			},
			"DepositAsset" => {
				let mut fields = payload.fields()?;
				let (assets, beneficiary) = take_transfer(&mut fields, version, true, "beneficiary")?;
				fields.finish(&["assets", "max_assets", "beneficiary"])?;
				Ok(Instruction::DepositAsset { assets, beneficiary })
			},
			"DepositReserveAsset" => {
				let mut fields = payload.fields()?;
				let (assets, dest) = take_transfer(&mut fields, version, true, "dest")?;
				let xcm = fields.take_versioned("xcm", version)?;
				fields.finish(&["assets", "max_assets", "dest", "xcm"])?;
				Ok(Instruction::DepositReserveAsset { assets, dest, xcm })
			},
			"InitiateReserveWithdraw" => {
				let mut fields = payload.fields()?;
				let (assets, reserve) = take_transfer(&mut fields, version, false, "reserve")?;
				let xcm = fields.take_versioned("xcm", version)?;
				fields.finish(&["assets", "reserve", "xcm"])?;
				Ok(Instruction::InitiateReserveWithdraw { assets, reserve, xcm })
			},
			"InitiateTeleport" => {
				let mut fields = payload.fields()?;
				let (assets, dest) = take_transfer(&mut fields, version, false, "dest")?;
				let xcm = fields.take_versioned("xcm", version)?;
				fields.finish(&["assets", "dest", "xcm"])?;
				Ok(Instruction::InitiateTeleport { assets, dest, xcm })
			},
			other => Err(Self::unknown(version, other)),
		}
	}
}

versioned_envelope! {
	/// An executable program for the protocol generation of its case.
	pub enum VersionedMessage(Vec<Instruction>) { V2, V3, V4, V5 }
}

#[cfg(test)]
mod test {
	use serde_json::json;

	use super::*;
	use crate::{
		asset::{WildMultiasset, WildFungibility},
		mock::{usdt_location, ALICE, ASSET_HUB},
		variant::{from_value, to_value},
		Junction, NetworkId,
	};

	fn beneficiary() -> Multilocation {
		Multilocation::new(0, Junction::AccountId32 { network: NetworkId::Any, id: ALICE })
	}

	fn program() -> Vec<Instruction> {
		let asset = Multiasset::fungible(usdt_location(), 100);
		vec![
			Instruction::WithdrawAsset(vec![asset.clone()]),
			Instruction::ClearOrigin,
			Instruction::BuyExecution {
				fees: Multiasset::fungible(usdt_location(), 50),
				weight_limit: WeightLimit::Limited(Weight::new(1_000_000_000, 65_536)),
			},
			Instruction::DepositReserveAsset {
				assets: MultiassetFilter::Definite(vec![asset]),
				dest: Multilocation::new(1, Junction::Parachain(ASSET_HUB)),
				xcm: vec![
					Instruction::BuyExecution {
						fees: Multiasset::fungible(usdt_location(), 50),
						weight_limit: WeightLimit::Unlimited,
					},
					Instruction::DepositAsset {
						assets: MultiassetFilter::Wild(WildMultiasset::All),
						beneficiary: beneficiary(),
					},
				],
			},
		]
	}

	#[test]
	fn programs_round_trip() {
		for version in [Version::V2, Version::V3, Version::V4, Version::V5] {
			let mut program = program();
			if version == Version::V2 {
				// v2 carries only the time dimension
				program[2] = Instruction::BuyExecution {
					fees: Multiasset::fungible(usdt_location(), 50),
					weight_limit: WeightLimit::Limited(Weight::new(1_000_000_000, 0)),
				};
			}
			let value = to_value(&program, version).unwrap();
			assert_eq!(from_value::<Vec<Instruction>>(&value, version).unwrap(), program, "{version}");
		}
	}

	#[test]
	fn v2_deposits_carry_max_assets() {
		let deposit = Instruction::DepositAsset {
			assets: MultiassetFilter::Wild(WildMultiasset::AllOf {
				id: usdt_location().to_asset_id(),
				fun: WildFungibility::Fungible,
			}),
			beneficiary: beneficiary(),
		};
		let v2 = to_value(&deposit, Version::V2).unwrap();
		assert_eq!(v2[1]["max_assets"], json!(1));

		let v3 = to_value(&deposit, Version::V3).unwrap();
		assert!(v3[1].get("max_assets").is_none());
	}

	#[test]
	fn weight_limit_shape_follows_version() {
		let limit = WeightLimit::Limited(Weight::new(5, 7));
		assert_eq!(to_value(&limit, Version::V2).unwrap(), json!(["Limited", "5"]));
		assert_eq!(
			to_value(&limit, Version::V3).unwrap(),
			json!(["Limited", {"ref_time": "5", "proof_size": "7"}])
		);
		assert_eq!(to_value(&WeightLimit::Unlimited, Version::V4).unwrap(), json!(["Unlimited", null]));
	}

	#[test]
	fn instructions_need_v2() {
		assert!(to_value(&Instruction::ClearOrigin, Version::V1).is_err());
		assert!(from_value::<Instruction>(&json!(["ClearOrigin", null]), Version::V1).is_err());
	}

	#[test]
	fn message_envelope() {
		let message = VersionedMessage::new(program(), Version::V3).unwrap();
		let value = serde_json::to_value(&message).unwrap();
		assert_eq!(value[0], json!("V3"));
		assert_eq!(value[1][0][0], json!("WithdrawAsset"));
		assert_eq!(serde_json::from_value::<VersionedMessage>(value).unwrap(), message);

		assert!(VersionedMessage::new(program(), Version::V1).is_err());
	}
}
