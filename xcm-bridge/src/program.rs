// The Licensed Work is (c) 2022 Sygma
// SPDX-License-Identifier: LGPL-3.0-only

//! Execute programs for each route an asset can take.
//!
//! Every program withdraws the asset on origin and pays for execution there, hands the asset
//! over to the next hop, and finally deposits it to the beneficiary on the destination. Each
//! hop pays with half of the transferred amount as seen from that hop.

use xtransfer_xcm::{
	AbsoluteLocation, Fungibility, Instruction, Multiasset, MultiassetFilter, Multilocation,
	TransferType, Weight, WeightLimit, WildMultiasset,
};

use crate::{Error, XcmTransfer};

/// Weight limit for the origin hop. The origin program is weighed as a whole, so any non-zero
/// limit is accepted.
pub const ORIGIN_WEIGHT_LIMIT: Weight = Weight { ref_time: 1, proof_size: 1 };

pub fn half(asset: &Multiasset) -> Multiasset {
	match &asset.fun {
		Fungibility::Fungible(amount) =>
			Multiasset::new(asset.id.clone(), Fungibility::Fungible(amount / 2)),
		Fungibility::NonFungible(_) => asset.clone(),
	}
}

fn single_counted() -> MultiassetFilter {
	MultiassetFilter::Wild(WildMultiasset::AllCounted(1))
}

fn asset_seen_from(transfer: &XcmTransfer, observer: &AbsoluteLocation) -> Multiasset {
	Multiasset::new(
		transfer.asset.from_point_of_view(observer).to_asset_id(),
		Fungibility::Fungible(transfer.amount),
	)
}

fn beneficiary(transfer: &XcmTransfer) -> Result<Multilocation, Error> {
	Ok(transfer
		.destination
		.appending_account_id(&transfer.recipient, transfer.recipient_is_ethereum)?
		.from_point_of_view(&transfer.destination))
}

fn withdraw_on_origin(transfer: &XcmTransfer) -> Vec<Instruction> {
	let asset = asset_seen_from(transfer, &transfer.origin);
	let fees = half(&asset);
	vec![
		Instruction::WithdrawAsset(vec![asset]),
		Instruction::BuyExecution { fees, weight_limit: WeightLimit::Limited(ORIGIN_WEIGHT_LIMIT) },
	]
}

fn buy_execution_at(transfer: &XcmTransfer, hop: &AbsoluteLocation) -> Instruction {
	Instruction::BuyExecution {
		fees: half(&asset_seen_from(transfer, hop)),
		weight_limit: WeightLimit::Unlimited,
	}
}

fn deposit_on_destination(transfer: &XcmTransfer) -> Result<Vec<Instruction>, Error> {
	Ok(vec![
		buy_execution_at(transfer, &transfer.destination),
		Instruction::DepositAsset { assets: single_counted(), beneficiary: beneficiary(transfer)? },
	])
}

/// The origin holds the reserve and deposits the asset into the destination's sovereign account.
pub fn local_reserve_program(transfer: &XcmTransfer) -> Result<Vec<Instruction>, Error> {
	let mut program = withdraw_on_origin(transfer);
	program.push(Instruction::DepositReserveAsset {
		assets: single_counted(),
		dest: transfer.destination.from_point_of_view(&transfer.origin),
		xcm: deposit_on_destination(transfer)?,
	});
	Ok(program)
}

/// The destination holds the reserve and releases the asset from the origin's sovereign account.
pub fn destination_reserve_program(transfer: &XcmTransfer) -> Result<Vec<Instruction>, Error> {
	let mut program = withdraw_on_origin(transfer);
	program.push(Instruction::InitiateReserveWithdraw {
		assets: single_counted(),
		reserve: transfer.destination.from_point_of_view(&transfer.origin),
		xcm: deposit_on_destination(transfer)?,
	});
	Ok(program)
}

/// A third chain holds the reserve. `reserve` addresses it from the origin.
pub fn remote_reserve_program(
	transfer: &XcmTransfer,
	reserve: Multilocation,
) -> Result<Vec<Instruction>, Error> {
	let mut program = withdraw_on_origin(transfer);
	program.push(Instruction::InitiateReserveWithdraw {
		assets: single_counted(),
		reserve,
		xcm: vec![
			buy_execution_at(transfer, &transfer.reserve),
			Instruction::DepositReserveAsset {
				assets: single_counted(),
				dest: transfer.destination.from_point_of_view(&transfer.reserve),
				xcm: deposit_on_destination(transfer)?,
			},
		],
	});
	Ok(program)
}

pub fn teleport_program(transfer: &XcmTransfer) -> Result<Vec<Instruction>, Error> {
	let mut program = withdraw_on_origin(transfer);
	program.push(Instruction::InitiateTeleport {
		assets: single_counted(),
		dest: transfer.destination.from_point_of_view(&transfer.origin),
		xcm: deposit_on_destination(transfer)?,
	});
	Ok(program)
}

pub fn transfer_program(
	transfer: &XcmTransfer,
	transfer_type: TransferType<Multilocation>,
) -> Result<Vec<Instruction>, Error> {
	match transfer_type {
		TransferType::Teleport => teleport_program(transfer),
		TransferType::LocalReserve => local_reserve_program(transfer),
		TransferType::DestinationReserve => destination_reserve_program(transfer),
		TransferType::RemoteReserve(reserve) => remote_reserve_program(transfer, reserve),
	}
}
