//! Position lifecycle handlers: NFT transfers and subscriptions.

use alloy::primitives::{Address, U256};

use crate::entities::{Position, Transaction, TransferRecord};
use crate::handlers::{Outcome, SkipReason};
use crate::source::EventContext;
use crate::store::Store;
use crate::utils::{event_id, hex_encode, u256_to_bigint};

/// Track position ownership from position-manager transfers.
///
/// A mint (transfer from the zero address) creates the position; every
/// transfer updates the owner and records a row.
pub fn handle_transfer(
    store: &mut Store,
    ctx: &EventContext,
    token_id: U256,
    from: Address,
    to: Address,
) -> Outcome {
    let token_id = u256_to_bigint(token_id);
    let key = token_id.to_string();

    let position = store.positions.get_or_create(&key, |id| {
        Position::new(
            id.to_string(),
            token_id.clone(),
            hex_encode(ctx.tx_from.as_slice()),
            ctx.block_timestamp,
        )
    });
    position.owner = hex_encode(to.as_slice());

    store.transactions.get_or_create(&ctx.tx_hash, |id| {
        Transaction::new(id.to_string(), ctx.block_number, ctx.block_timestamp)
    });

    let record = TransferRecord {
        id: event_id(&ctx.tx_hash, ctx.log_index),
        transaction: ctx.tx_hash.clone(),
        timestamp: ctx.block_timestamp,
        token_id,
        from: hex_encode(from.as_slice()),
        to: hex_encode(to.as_slice()),
        origin: hex_encode(ctx.tx_from.as_slice()),
        position: key,
        log_index: ctx.log_index,
    };
    store.transfer_records.insert(record.id.clone(), record);

    Outcome::Applied
}

/// Set or clear the subscriber on an existing position.
pub fn handle_subscription(
    store: &mut Store,
    token_id: U256,
    subscriber: Option<Address>,
) -> Outcome {
    let key = u256_to_bigint(token_id).to_string();
    let Some(position) = store.positions.get_mut(&key) else {
        return Outcome::Skipped(SkipReason::PositionNotFound(key));
    };
    position.subscriber = subscriber.map(|s| hex_encode(s.as_slice()));
    Outcome::Applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testutil::{addr, mock_context, SENDER};
    use crate::utils::ZERO_ADDRESS;

    const OWNER: &str = "0x40d94121bdd5132e97c96c00919a6e0c7ecfcd52";

    #[test]
    fn mint_transfer_creates_position_with_origin() {
        let mut store = Store::new();
        let outcome = handle_transfer(
            &mut store,
            &mock_context(),
            U256::from(73u64),
            Address::ZERO,
            addr(OWNER),
        );
        assert_eq!(outcome, Outcome::Applied);

        let position = store.positions.get("73").unwrap();
        assert_eq!(position.owner, OWNER);
        assert_eq!(position.origin, SENDER);
        assert!(!position.is_liquidated);

        let record = store
            .transfer_records
            .get(&event_id(&mock_context().tx_hash, 1))
            .unwrap();
        assert_eq!(record.from, ZERO_ADDRESS);
        assert_eq!(record.to, OWNER);
        assert_eq!(record.position, "73");
    }

    #[test]
    fn later_transfer_only_changes_owner() {
        let mut store = Store::new();
        handle_transfer(
            &mut store,
            &mock_context(),
            U256::from(73u64),
            Address::ZERO,
            addr(OWNER),
        );
        let created_at = store.positions.get("73").unwrap().created_at_timestamp;

        let mut ctx = mock_context();
        ctx.log_index = 2;
        ctx.block_timestamp += 600;
        handle_transfer(&mut store, &ctx, U256::from(73u64), addr(OWNER), addr(SENDER));

        let position = store.positions.get("73").unwrap();
        assert_eq!(position.owner, SENDER);
        assert_eq!(position.created_at_timestamp, created_at);
    }

    #[test]
    fn subscription_round_trip() {
        let mut store = Store::new();
        handle_transfer(
            &mut store,
            &mock_context(),
            U256::from(7u64),
            Address::ZERO,
            addr(OWNER),
        );

        let subscriber = addr("0x2222222222222222222222222222222222222222");
        assert_eq!(
            handle_subscription(&mut store, U256::from(7u64), Some(subscriber)),
            Outcome::Applied
        );
        assert_eq!(
            store.positions.get("7").unwrap().subscriber.as_deref(),
            Some("0x2222222222222222222222222222222222222222")
        );

        handle_subscription(&mut store, U256::from(7u64), None);
        assert!(store.positions.get("7").unwrap().subscriber.is_none());
    }

    #[test]
    fn subscription_without_position_is_skipped() {
        let mut store = Store::new();
        let outcome = handle_subscription(&mut store, U256::from(9u64), None);
        assert!(matches!(
            outcome,
            Outcome::Skipped(SkipReason::PositionNotFound(_))
        ));
    }
}
