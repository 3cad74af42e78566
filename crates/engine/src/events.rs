use bancor_domain::pool::PoolKey;
use bancor_ledger::Address;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Outcome of a trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeReceipt {
    pub key: PoolKey,
    pub sender: Address,
    pub is_buy: bool,
    /// Stock moved.
    #[serde(with = "bancor_ledger::amount_serde")]
    pub amount: u128,
    /// Money paid (buy) or received (sell).
    #[serde(with = "bancor_ledger::amount_serde")]
    pub money: u128,
    #[serde(with = "bancor_ledger::amount_serde")]
    pub stock_in_pool: u128,
    #[serde(with = "bancor_ledger::amount_serde")]
    pub money_in_pool: u128,
    /// Unit price after the trade.
    pub spot_price: Decimal,
}

/// Event emitted by a successful instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BancorEvent {
    PoolCreated {
        key: PoolKey,
        owner: Address,
        stock: String,
        money: String,
        #[serde(with = "bancor_ledger::amount_serde")]
        max_supply: u128,
        #[serde(with = "bancor_ledger::amount_serde")]
        fee: u128,
    },
    Traded(TradeReceipt),
    PoolCancelled {
        key: PoolKey,
        owner: Address,
        #[serde(with = "bancor_ledger::amount_serde")]
        stock_returned: u128,
        #[serde(with = "bancor_ledger::amount_serde")]
        money_returned: u128,
    },
}

impl BancorEvent {
    #[must_use]
    pub fn key(&self) -> &PoolKey {
        match self {
            Self::PoolCreated { key, .. } | Self::PoolCancelled { key, .. } => key,
            Self::Traded(receipt) => &receipt.key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_events_round_trip_through_json() {
        let traded = BancorEvent::Traded(TradeReceipt {
            key: PoolKey::new("abc", "cet"),
            sender: Address::from("bob"),
            is_buy: true,
            amount: u128::from(u64::MAX) + 7,
            money: u128::MAX,
            stock_in_pool: 10,
            money_in_pool: 5,
            spot_price: dec!(1.25),
        });
        let cancelled = BancorEvent::PoolCancelled {
            key: PoolKey::new("abc", "cet"),
            owner: Address::from("alice"),
            stock_returned: u128::MAX,
            money_returned: 0,
        };

        for event in [traded, cancelled] {
            let json = serde_json::to_string(&event).unwrap();
            let back: BancorEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(back, event);
        }
    }
}
