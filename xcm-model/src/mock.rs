// The Licensed Work is (c) 2022 Sygma
// SPDX-License-Identifier: LGPL-3.0-only

#![cfg(test)]

use hex_literal::hex;
use xtransfer_traits::ParaId;

use crate::{Junction, Multilocation, NetworkId, Version};

pub const ALICE: [u8; 32] = [1u8; 32];
pub const BALTATHAR: [u8; 20] = hex!("3cd0a705a2dc65e5b1e1205896baa2be8a07c6e0");

pub const ASSET_HUB: ParaId = 1000;
pub const MOONBEAM: ParaId = 2004;
pub const HYDRATION: ParaId = 2034;

pub const USDT_ASSET_PALLET: u8 = 50;
pub const USDT_ASSET_INDEX: u128 = 1984;

pub fn init_logger() {
	let _ = env_logger::builder().is_test(true).try_init();
}

/// USDT as seen from inside Asset Hub.
pub fn usdt_location() -> Multilocation {
	Multilocation::new(
		0,
		[Junction::PalletInstance(USDT_ASSET_PALLET), Junction::GeneralIndex(USDT_ASSET_INDEX)],
	)
}

/// One junction of every kind that `version` can represent.
pub fn sample_junctions(version: Version) -> Vec<Junction> {
	let network = match version {
		Version::V0 | Version::V1 | Version::V2 => NetworkId::Named(b"moonbeam".to_vec()),
		Version::V3 | Version::V4 | Version::V5 => NetworkId::Ethereum { chain_id: 1284 },
	};
	vec![
		Junction::Parachain(MOONBEAM),
		Junction::AccountKey20 { network: network.clone(), key: BALTATHAR },
		Junction::AccountId32 { network: NetworkId::Polkadot, id: ALICE },
		Junction::AccountIndex64 { network, index: u64::MAX },
		Junction::PalletInstance(10),
		Junction::GeneralIndex(u128::MAX),
		Junction::GeneralKey(b"native".to_vec()),
		Junction::OnlyChild,
	]
}
