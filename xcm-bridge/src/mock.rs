// The Licensed Work is (c) 2022 Sygma
// SPDX-License-Identifier: LGPL-3.0-only

#![cfg(test)]

use std::sync::Mutex;

use hex_literal::hex;
use serde_json::Value;
use xtransfer_traits::{CoderError, ParaId, RuntimeCoder, TypeNode};
use xtransfer_xcm::{AbsoluteLocation, Junction};

use crate::XcmTransfer;

pub const ALICE: [u8; 32] = hex!("d43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d");
pub const BALTATHAR: [u8; 20] = hex!("3cd0a705a2dc65e5b1e1205896baa2be8a07c6e0");

pub const ASSET_HUB: ParaId = 1000;
pub const MOONBEAM: ParaId = 2004;
pub const HYDRATION: ParaId = 2034;

pub const AMOUNT: u128 = 10_000_000_000;

pub fn init_logger() {
	let _ = env_logger::builder().is_test(true).try_init();
}

pub fn para(para_id: ParaId) -> AbsoluteLocation {
	AbsoluteLocation::new(Some(para_id))
}

/// USDT as registered on Asset Hub.
pub fn usdt() -> AbsoluteLocation {
	AbsoluteLocation::from_junctions([
		Junction::Parachain(ASSET_HUB),
		Junction::PalletInstance(50),
		Junction::GeneralIndex(1984),
	])
	.unwrap()
}

/// Moonbeam native token.
pub fn glmr() -> AbsoluteLocation {
	AbsoluteLocation::from_junctions([Junction::Parachain(MOONBEAM), Junction::PalletInstance(10)])
		.unwrap()
}

pub fn transfer(
	origin: AbsoluteLocation,
	destination: AbsoluteLocation,
	reserve: AbsoluteLocation,
	asset: AbsoluteLocation,
) -> XcmTransfer {
	XcmTransfer {
		origin,
		destination,
		reserve,
		asset,
		amount: AMOUNT,
		recipient: ALICE.to_vec(),
		recipient_is_ethereum: false,
		teleportable: false,
	}
}

/// Records what it was asked to encode and answers with the JSON text.
#[derive(Default)]
pub struct RecordingCoder {
	pub modules: Vec<String>,
	pub encoded: Mutex<Vec<(String, Value)>>,
	/// Module, call name and arguments of every encoded call.
	pub calls: Mutex<Vec<(String, String, Value)>>,
}

impl RecordingCoder {
	pub fn with_module(module_name: &str) -> Self {
		Self { modules: vec![module_name.to_string()], ..Default::default() }
	}
}

impl RuntimeCoder for RecordingCoder {
	fn type_node(&self, _: &str) -> Option<TypeNode> {
		None
	}

	fn has_module(&self, module_name: &str) -> bool {
		self.modules.iter().any(|module| module == module_name)
	}

	fn encode(&self, type_name: &str, value: &Value) -> Result<Vec<u8>, CoderError> {
		self.encoded
			.lock()
			.map_err(|e| CoderError::Encoding { path: type_name.into(), reason: e.to_string() })?
			.push((type_name.to_string(), value.clone()));
		serde_json::to_vec(value)
			.map_err(|e| CoderError::Encoding { path: type_name.into(), reason: e.to_string() })
	}

	fn encode_call(
		&self,
		module_name: &str,
		call_name: &str,
		args: &Value,
	) -> Result<Vec<u8>, CoderError> {
		let path = format!("{module_name}.{call_name}");
		self.calls
			.lock()
			.map_err(|e| CoderError::Encoding { path: path.clone(), reason: e.to_string() })?
			.push((module_name.to_string(), call_name.to_string(), args.clone()));
		serde_json::to_vec(args).map_err(|e| CoderError::Encoding { path, reason: e.to_string() })
	}
}

/// Rejects every value.
pub struct RejectingCoder;

impl RuntimeCoder for RejectingCoder {
	fn type_node(&self, _: &str) -> Option<TypeNode> {
		None
	}

	fn has_module(&self, _: &str) -> bool {
		false
	}

	fn encode(&self, type_name: &str, _: &Value) -> Result<Vec<u8>, CoderError> {
		Err(CoderError::TypeNotFound(type_name.to_string()))
	}

	fn encode_call(
		&self,
		module_name: &str,
		call_name: &str,
		_: &Value,
	) -> Result<Vec<u8>, CoderError> {
		Err(CoderError::TypeNotFound(format!("{module_name}.{call_name}")))
	}
}
