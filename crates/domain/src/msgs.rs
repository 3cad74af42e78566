//! Instructions accepted by the module.

use crate::denom::is_valid_symbol;
use crate::error::BancorError;
use crate::math::BondingCurve;
use crate::params::BancorParams;
use crate::pool::PoolKey;
use bancor_ledger::Address;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Creates a pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgBancorInit {
    pub owner: Address,
    pub stock: String,
    pub money: String,
    pub init_price: Decimal,
    #[serde(with = "bancor_ledger::amount_serde")]
    pub max_supply: u128,
    pub max_price: Decimal,
    pub enable_cancel_time: i64,
}

/// Buys or sells stock against a pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgBancorTrade {
    pub sender: Address,
    pub stock: String,
    pub money: String,
    #[serde(with = "bancor_ledger::amount_serde")]
    pub amount: u128,
    pub is_buy: bool,
    /// Max money paid on buy, min money received on sell.
    #[serde(with = "bancor_ledger::amount_serde")]
    pub money_limit: u128,
}

/// Retires a pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgBancorCancel {
    pub owner: Address,
    pub stock: String,
    pub money: String,
}

/// Any module instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Instruction {
    Init(MsgBancorInit),
    Trade(MsgBancorTrade),
    Cancel(MsgBancorCancel),
}

/// Module accounts only move coins on behalf of their module.
fn validate_account(address: &Address, role: &str) -> Result<(), BancorError> {
    if address.is_empty() {
        return Err(BancorError::InvalidAddress(format!("missing {role} address")));
    }
    if address.is_module() {
        return Err(BancorError::InvalidAddress(format!(
            "module account {address} cannot act as {role}"
        )));
    }
    Ok(())
}

fn validate_pair(stock: &str, money: &str, params: &BancorParams) -> Result<(), BancorError> {
    if !is_valid_symbol(stock) || !is_valid_symbol(money) {
        return Err(BancorError::InvalidSymbol);
    }
    if stock == money || stock == params.native_denom {
        return Err(BancorError::InvalidSymbol);
    }
    Ok(())
}

impl MsgBancorInit {
    /// Stateless checks.
    pub fn validate_basic(&self, params: &BancorParams) -> Result<(), BancorError> {
        validate_account(&self.owner, "owner")?;
        validate_pair(&self.stock, &self.money, params)?;
        BondingCurve::new(self.init_price, self.max_price, self.max_supply)?;
        Ok(())
    }

    #[must_use]
    pub fn pool_key(&self) -> PoolKey {
        PoolKey::new(&self.stock, &self.money)
    }
}

impl MsgBancorTrade {
    /// Stateless checks.
    pub fn validate_basic(&self, params: &BancorParams) -> Result<(), BancorError> {
        validate_account(&self.sender, "sender")?;
        validate_pair(&self.stock, &self.money, params)?;
        if self.amount == 0 {
            return Err(BancorError::NonPositiveAmount);
        }
        if self.amount > params.max_trade_amount {
            return Err(BancorError::TradeAmountTooLarge);
        }
        Ok(())
    }

    #[must_use]
    pub fn pool_key(&self) -> PoolKey {
        PoolKey::new(&self.stock, &self.money)
    }

    /// Signed curve movement.
    pub fn delta(&self) -> Result<i128, BancorError> {
        let amount = i128::try_from(self.amount).map_err(|_| BancorError::TradeAmountTooLarge)?;
        Ok(if self.is_buy { amount } else { -amount })
    }
}

impl MsgBancorCancel {
    /// Stateless checks.
    pub fn validate_basic(&self, params: &BancorParams) -> Result<(), BancorError> {
        validate_account(&self.owner, "owner")?;
        validate_pair(&self.stock, &self.money, params)
    }

    #[must_use]
    pub fn pool_key(&self) -> PoolKey {
        PoolKey::new(&self.stock, &self.money)
    }
}

impl Instruction {
    /// Stateless checks for whichever variant this is.
    pub fn validate_basic(&self, params: &BancorParams) -> Result<(), BancorError> {
        match self {
            Self::Init(msg) => msg.validate_basic(params),
            Self::Trade(msg) => msg.validate_basic(params),
            Self::Cancel(msg) => msg.validate_basic(params),
        }
    }

    /// Short name used in logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Init(_) => "bancor_init",
            Self::Trade(_) => "bancor_trade",
            Self::Cancel(_) => "bancor_cancel",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn init_msg() -> MsgBancorInit {
        MsgBancorInit {
            owner: Address::from("owner"),
            stock: "abc".to_string(),
            money: "cet".to_string(),
            init_price: dec!(0),
            max_supply: 100,
            max_price: dec!(10),
            enable_cancel_time: 100,
        }
    }

    fn trade_msg() -> MsgBancorTrade {
        MsgBancorTrade {
            sender: Address::from("user"),
            stock: "abc".to_string(),
            money: "cet".to_string(),
            amount: 10,
            is_buy: true,
            money_limit: 10,
        }
    }

    #[test]
    fn test_init_validate_basic() {
        let params = BancorParams::default();
        assert_eq!(init_msg().validate_basic(&params), Ok(()));

        let mut msg = init_msg();
        msg.owner = Address::from("");
        assert_eq!(
            msg.validate_basic(&params),
            Err(BancorError::InvalidAddress("missing owner address".to_string()))
        );

        let mut msg = init_msg();
        msg.owner = Address::module("bancorlite");
        assert!(matches!(
            msg.validate_basic(&params),
            Err(BancorError::InvalidAddress(_))
        ));

        let mut msg = init_msg();
        msg.stock = "cet".to_string();
        msg.money = "abc".to_string();
        assert_eq!(msg.validate_basic(&params), Err(BancorError::InvalidSymbol));

        let mut msg = init_msg();
        msg.money = "abc".to_string();
        assert_eq!(msg.validate_basic(&params), Err(BancorError::InvalidSymbol));

        let mut msg = init_msg();
        msg.max_supply = 0;
        assert_eq!(msg.validate_basic(&params), Err(BancorError::NonPositiveSupply));

        let mut msg = init_msg();
        msg.max_price = dec!(0);
        assert_eq!(msg.validate_basic(&params), Err(BancorError::NonPositivePrice));
    }

    #[test]
    fn test_trade_validate_basic() {
        let params = BancorParams::default();
        assert_eq!(trade_msg().validate_basic(&params), Ok(()));

        let mut msg = trade_msg();
        msg.sender = Address::from("");
        assert_eq!(
            msg.validate_basic(&params),
            Err(BancorError::InvalidAddress("missing sender address".to_string()))
        );

        let mut msg = trade_msg();
        msg.stock = "cet".to_string();
        msg.money = "abc".to_string();
        assert_eq!(msg.validate_basic(&params), Err(BancorError::InvalidSymbol));

        let mut msg = trade_msg();
        msg.sender = Address::module("fee_collector");
        assert!(matches!(
            msg.validate_basic(&params),
            Err(BancorError::InvalidAddress(_))
        ));

        let mut msg = trade_msg();
        msg.amount = 0;
        assert_eq!(msg.validate_basic(&params), Err(BancorError::NonPositiveAmount));

        let mut msg = trade_msg();
        msg.amount = params.max_trade_amount + 1;
        assert_eq!(msg.validate_basic(&params), Err(BancorError::TradeAmountTooLarge));
    }

    #[test]
    fn test_trade_delta_sign() {
        let mut msg = trade_msg();
        assert_eq!(msg.delta().unwrap(), 10);
        msg.is_buy = false;
        assert_eq!(msg.delta().unwrap(), -10);
    }

    #[test]
    fn test_instruction_json_tagging() {
        let instruction = Instruction::Cancel(MsgBancorCancel {
            owner: Address::from("owner"),
            stock: "abc".to_string(),
            money: "cet".to_string(),
        });
        let json = serde_json::to_string(&instruction).unwrap();
        assert!(json.contains("\"type\":\"cancel\""));
        let back: Instruction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, instruction);
        assert_eq!(back.kind(), "bancor_cancel");
    }

    #[test]
    fn test_init_and_trade_json_carry_large_amounts() {
        let mut init = init_msg();
        init.max_supply = u128::MAX;
        let mut trade = trade_msg();
        trade.amount = u128::from(u64::MAX) + 1;
        trade.money_limit = u128::MAX;

        for instruction in [Instruction::Init(init), Instruction::Trade(trade)] {
            let json = serde_json::to_string(&instruction).unwrap();
            let back: Instruction = serde_json::from_str(&json).unwrap();
            assert_eq!(back, instruction);
        }
    }

    #[test]
    fn test_trade_json_accepts_plain_numbers() {
        let json = r#"{"type":"trade","sender":"bob","stock":"abc","money":"cet",
            "amount":1000,"is_buy":true,"money_limit":"1300"}"#;
        let parsed: Instruction = serde_json::from_str(json).unwrap();
        let Instruction::Trade(msg) = parsed else {
            panic!("expected a trade");
        };
        assert_eq!((msg.amount, msg.money_limit), (1000, 1300));
    }
}
