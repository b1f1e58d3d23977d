// The Licensed Work is (c) 2022 Sygma
// SPDX-License-Identifier: LGPL-3.0-only

//! Runtime metadata driven decisions: which protocol version a chain speaks and which module
//! carries its cross-chain messaging, plus a [`RuntimeCoder`](xtransfer_traits::RuntimeCoder)
//! backed by runtime metadata.

pub mod coder;
pub mod factory;
pub mod resolver;
mod scale;

#[cfg(test)]
mod mock;

pub use coder::MetadataCoder;
pub use factory::InMemoryCoderFactory;
pub use resolver::{lowest_supported_version, module_name, MetadataResolver};

use xtransfer_traits::{ChainId, CoderError};

pub const LOG_TARGET: &str = "xtransfer::metadata";

/// Messaging pallet names, most common first.
pub const XCM_PALLET_CANDIDATES: &[&str] = &["XcmPallet", "PolkadotXcm"];

pub const VERSIONED_XCM_TYPES: &[&str] = &["xcm.VersionedXcm"];
pub const VERSIONED_LOCATION_TYPES: &[&str] = &["xcm.VersionedLocation", "xcm.VersionedMultiLocation"];
pub const VERSIONED_ASSETS_TYPES: &[&str] = &["xcm.VersionedAssets", "xcm.VersionedMultiAssets"];

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("none of the modules {candidates:?} exists in the runtime metadata")]
	NoMatchingModule { candidates: Vec<String> },
	#[error("no runtime metadata available for chain {0}")]
	MetadataUnavailable(ChainId),
	#[error(transparent)]
	Coder(#[from] CoderError),
}

#[cfg(test)]
mod test {
	use codec::Encode;
	use hex_literal::hex;
	use scale_info::TypeInfo;
	use serde_json::Value;
	use xcm::v3::{
		AssetId as XcmAssetId, Fungibility as XcmFungibility, Instruction as XcmInstruction,
		Junction as XcmJunction, Junctions as XcmJunctions, MultiAsset, MultiAssetFilter,
		MultiLocation, Weight as XcmWeight, WeightLimit as XcmWeightLimit, WildMultiAsset, Xcm,
	};
	use xtransfer_xcm::{
		AbsoluteLocation, Instruction, Junction, Multiasset, MultiassetFilter, Multilocation,
		NetworkId, Version, VersionedMultiassets, VersionedMultilocation, VersionedMessage, Weight,
		WeightLimit, WildMultiasset,
	};

	use super::*;
	use crate::mock::registry_with;

	const ALICE: [u8; 32] = hex!("d43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d");
	const ASSET_HUB: u32 = 1000;
	const AMOUNT: u128 = 1_000_000_000_000;

	fn encode_as<T: TypeInfo + 'static>(value: Value) -> Vec<u8> {
		let (registry, id) = registry_with::<T>();
		MetadataCoder::new(registry, vec![]).encode_type_id(id, &value).unwrap()
	}

	fn usdt() -> Multilocation {
		Multilocation::new(
			1,
			[Junction::Parachain(ASSET_HUB), Junction::PalletInstance(50), Junction::GeneralIndex(1984)],
		)
	}

	fn xcm_usdt() -> MultiLocation {
		MultiLocation {
			parents: 1,
			interior: XcmJunctions::X3(
				XcmJunction::Parachain(ASSET_HUB),
				XcmJunction::PalletInstance(50),
				XcmJunction::GeneralIndex(1984),
			),
		}
	}

	fn beneficiary() -> Multilocation {
		Multilocation::new(0, Junction::AccountId32 { network: NetworkId::Any, id: ALICE })
	}

	fn xcm_beneficiary() -> MultiLocation {
		MultiLocation {
			parents: 0,
			interior: XcmJunctions::X1(XcmJunction::AccountId32 { network: None, id: ALICE }),
		}
	}

	#[test]
	fn v3_location_matches_runtime_encoding() {
		let location = AbsoluteLocation::new(Some(ASSET_HUB))
			.appending_account_id(&ALICE, false)
			.unwrap()
			.from_point_of_view(&AbsoluteLocation::root());
		let token = serde_json::to_value(VersionedMultilocation::new(location, Version::V3).unwrap())
			.unwrap();

		let expected = xcm::VersionedMultiLocation::V3(MultiLocation {
			parents: 0,
			interior: XcmJunctions::X2(
				XcmJunction::Parachain(ASSET_HUB),
				XcmJunction::AccountId32 { network: None, id: ALICE },
			),
		});
		assert_eq!(encode_as::<xcm::VersionedMultiLocation>(token), expected.encode());
	}

	#[test]
	fn v3_assets_match_runtime_encoding() {
		let assets = vec![Multiasset::fungible(usdt(), AMOUNT)];
		let token = serde_json::to_value(VersionedMultiassets::new(assets, Version::V3).unwrap()).unwrap();

		let expected = xcm::VersionedMultiAssets::V3(
			vec![MultiAsset {
				id: XcmAssetId::Concrete(xcm_usdt()),
				fun: XcmFungibility::Fungible(AMOUNT),
			}]
			.into(),
		);
		assert_eq!(encode_as::<xcm::VersionedMultiAssets>(token), expected.encode());
	}

	#[test]
	fn v3_program_matches_runtime_encoding() {
		let fees = Multiasset::fungible(usdt(), AMOUNT / 2);
		let program = vec![
			Instruction::WithdrawAsset(vec![Multiasset::fungible(usdt(), AMOUNT)]),
			Instruction::BuyExecution {
				fees,
				weight_limit: WeightLimit::Limited(Weight::new(5_000_000_000, 65_536)),
			},
			Instruction::DepositAsset {
				assets: MultiassetFilter::Wild(WildMultiasset::AllCounted(1)),
				beneficiary: beneficiary(),
			},
		];
		let token = serde_json::to_value(VersionedMessage::new(program, Version::V3).unwrap()).unwrap();

		let fee = MultiAsset { id: XcmAssetId::Concrete(xcm_usdt()), fun: XcmFungibility::Fungible(AMOUNT / 2) };
		let expected = xcm::VersionedXcm::<()>::V3(Xcm(vec![
			XcmInstruction::WithdrawAsset(
				vec![MultiAsset {
					id: XcmAssetId::Concrete(xcm_usdt()),
					fun: XcmFungibility::Fungible(AMOUNT),
				}]
				.into(),
			),
			XcmInstruction::BuyExecution {
				fees: fee,
				weight_limit: XcmWeightLimit::Limited(XcmWeight::from_parts(5_000_000_000, 65_536)),
			},
			XcmInstruction::DepositAsset {
				assets: MultiAssetFilter::Wild(WildMultiAsset::AllCounted(1)),
				beneficiary: xcm_beneficiary(),
			},
		]));
		assert_eq!(encode_as::<xcm::VersionedXcm<()>>(token), expected.encode());
	}
}
