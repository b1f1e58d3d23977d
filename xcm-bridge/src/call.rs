// The Licensed Work is (c) 2022 Sygma
// SPDX-License-Identifier: LGPL-3.0-only

//! Transfers dispatched as calls of the messaging module, which builds the program on chain.

use serde_json::{json, Value};
use xtransfer_metadata::MetadataResolver;
use xtransfer_traits::{ChainId, CoderFactory, RuntimeCoder};
use xtransfer_xcm::{
	to_value, Fungibility, Multiasset, Multilocation, TransferType, Version, VersionedMultiassets,
	VersionedMultilocation, Weight, WeightLimit,
};

use crate::{Error, XcmHandler, XcmTransfer, LOG_TARGET};

pub const LIMITED_RESERVE_TRANSFER_ASSETS: &str = "limited_reserve_transfer_assets";
pub const LIMITED_TELEPORT_ASSETS: &str = "limited_teleport_assets";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PalletTransferKind {
	ReserveTransfer,
	Teleport,
}

impl PalletTransferKind {
	pub fn of<L>(transfer_type: &TransferType<L>) -> Self {
		match transfer_type {
			TransferType::Teleport => PalletTransferKind::Teleport,
			_ => PalletTransferKind::ReserveTransfer,
		}
	}

	pub fn call_name(self) -> &'static str {
		match self {
			PalletTransferKind::ReserveTransfer => LIMITED_RESERVE_TRANSFER_ASSETS,
			PalletTransferKind::Teleport => LIMITED_TELEPORT_ASSETS,
		}
	}
}

/// Arguments of a limited reserve transfer or teleport call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PalletTransferCall {
	pub kind: PalletTransferKind,
	pub dest: VersionedMultilocation,
	pub beneficiary: VersionedMultilocation,
	pub assets: VersionedMultiassets,
	/// Index into `assets` of the asset paying fees.
	pub fee_asset_item: u32,
	pub weight_limit: WeightLimit,
}

impl PalletTransferCall {
	/// Splits the recipient, as addressed from the origin, into the destination chain and the
	/// account under it.
	pub fn new(transfer: &XcmTransfer, max_weight: Weight, version: Version) -> Result<Self, Error> {
		let recipient = transfer
			.destination
			.appending_account_id(&transfer.recipient, transfer.recipient_is_ethereum)?
			.from_point_of_view(&transfer.origin);
		let (interior, beneficiary) = recipient.interior.last_component();
		let beneficiary = beneficiary.ok_or_else(|| Error::MissingBeneficiary(recipient.clone()))?;

		let asset = Multiasset::new(
			transfer.asset.from_point_of_view(&transfer.origin).to_asset_id(),
			Fungibility::Fungible(transfer.amount),
		);

		Ok(Self {
			kind: PalletTransferKind::of(&transfer.transfer_type()),
			dest: VersionedMultilocation::versioned(
				Multilocation::new(recipient.parents, interior),
				version,
			),
			beneficiary: VersionedMultilocation::versioned(Multilocation::new(0, beneficiary), version),
			assets: VersionedMultiassets::new(vec![asset], version)?,
			fee_asset_item: 0,
			weight_limit: WeightLimit::Limited(max_weight),
		})
	}

	pub fn version(&self) -> Version {
		self.dest.version()
	}

	/// Call arguments keyed by name.
	pub fn args(&self) -> Result<Value, Error> {
		let location = |location: &VersionedMultilocation| {
			serde_json::to_value(location).map_err(xtransfer_xcm::Error::from)
		};
		let dest = location(&self.dest)?;
		let beneficiary = location(&self.beneficiary)?;
		let assets = serde_json::to_value(&self.assets).map_err(xtransfer_xcm::Error::from)?;
		let weight_limit = to_value(&self.weight_limit, self.version())?;
		Ok(json!({
			"dest": dest,
			"beneficiary": beneficiary,
			"assets": assets,
			"fee_asset_item": self.fee_asset_item,
			"weight_limit": weight_limit,
		}))
	}

	/// Encodes the call of `module_name` with the origin chain's runtime types.
	pub fn encode(&self, module_name: &str, coder: &dyn RuntimeCoder) -> Result<Vec<u8>, Error> {
		let call_name = self.kind.call_name();
		let encoded = coder.encode_call(module_name, call_name, &self.args()?).map_err(|e| {
			log::warn!(target: LOG_TARGET, "failed to encode {module_name}.{call_name}: {e}");
			e
		})?;
		Ok(encoded)
	}

	/// Encodes the call for `chain`, resolving its messaging module from runtime metadata.
	pub async fn encode_for_chain<F: CoderFactory>(
		&self,
		resolver: &MetadataResolver<F>,
		chain: &ChainId,
	) -> Result<Vec<u8>, Error> {
		let module_name = resolver.resolve_xcm_pallet(chain).await?;
		let coder = resolver
			.factory()
			.fetch_coder(chain)
			.await?
			.ok_or_else(|| xtransfer_metadata::Error::MetadataUnavailable(chain.clone()))?;
		log::debug!(
			target: LOG_TARGET,
			"encoding {}.{} for chain {chain}",
			module_name,
			self.kind.call_name()
		);
		self.encode(&module_name, coder.as_ref())
	}
}
