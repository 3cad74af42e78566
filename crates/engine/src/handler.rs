//! Instruction dispatch.

use crate::events::BancorEvent;
use crate::keeper::Keeper;
use bancor_domain::error::BancorError;
use bancor_domain::msgs::Instruction;
use bancor_ledger::{AccountLedger, AssetRegistry, BlockClock, BlockHeader, Context, KvStore, run_atomic};
use tracing::{debug, warn};

impl<B: AccountLedger, R: AssetRegistry> Keeper<B, R> {
    /// Validates and routes one instruction.
    ///
    /// # Errors
    /// Returns the error of the routed operation. Nothing it wrote survives.
    pub fn handle(&self, ctx: &mut Context<'_>, instruction: &Instruction) -> Result<BancorEvent, BancorError> {
        let result = self.params(ctx).and_then(|params| {
            instruction.validate_basic(&params)?;
            ctx.atomic(|ctx| match instruction {
                Instruction::Init(msg) => self.init(ctx, msg),
                Instruction::Trade(msg) => self.trade(ctx, msg),
                Instruction::Cancel(msg) => self.cancel(ctx, msg),
            })
        });

        match &result {
            Ok(event) => debug!(
                kind = instruction.kind(),
                key = %event.key(),
                height = ctx.block_height(),
                "Bancor instruction applied"
            ),
            Err(err) => warn!(
                kind = instruction.kind(),
                code = err.code(),
                height = ctx.block_height(),
                error = %err,
                "Bancor instruction rejected"
            ),
        }
        result
    }

    /// Applies one instruction as its own ledger transaction.
    ///
    /// # Errors
    /// Returns the rejection, in which case `store` is untouched.
    pub fn deliver<S>(
        &self,
        store: &mut S,
        header: BlockHeader,
        instruction: &Instruction,
    ) -> Result<BancorEvent, BancorError>
    where
        S: KvStore + ?Sized,
    {
        run_atomic(store, header, |ctx| self.handle(ctx, instruction))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keeper::escrow_address;
    use bancor_domain::msgs::{MsgBancorCancel, MsgBancorInit, MsgBancorTrade};
    use bancor_ledger::{Address, Bank, MemStore, TokenInfo, TokenRegistry};
    use rust_decimal_macros::dec;

    fn genesis_store() -> MemStore {
        let mut store = MemStore::new();
        let mut ctx = Context::new(&mut store, BlockHeader::default());
        let tokens = TokenRegistry::new();
        let bank = Bank::new();
        tokens
            .issue(&mut ctx, &bank, TokenInfo::new("cet", Address::from("alice"), 1_000, false))
            .unwrap();
        tokens
            .issue(&mut ctx, &bank, TokenInfo::new("abc", Address::from("alice"), 100, false))
            .unwrap();
        store
    }

    fn init() -> Instruction {
        Instruction::Init(MsgBancorInit {
            owner: Address::from("alice"),
            stock: "abc".to_string(),
            money: "cet".to_string(),
            init_price: dec!(0),
            max_supply: 100,
            max_price: dec!(10),
            enable_cancel_time: 50,
        })
    }

    #[test]
    fn test_deliver_routes_each_instruction() {
        let mut store = genesis_store();
        let keeper = Keeper::default();

        let created = keeper.deliver(&mut store, BlockHeader::new(1, 10), &init()).unwrap();
        assert!(matches!(created, BancorEvent::PoolCreated { max_supply: 100, .. }));

        let buy = Instruction::Trade(MsgBancorTrade {
            sender: Address::from("alice"),
            stock: "abc".to_string(),
            money: "cet".to_string(),
            amount: 10,
            is_buy: true,
            money_limit: 5,
        });
        let traded = keeper.deliver(&mut store, BlockHeader::new(2, 20), &buy).unwrap();
        match traded {
            BancorEvent::Traded(receipt) => {
                assert_eq!(receipt.money, 5);
                assert_eq!(receipt.stock_in_pool, 10);
            }
            other => panic!("unexpected event {other:?}"),
        }

        let cancel = Instruction::Cancel(MsgBancorCancel {
            owner: Address::from("alice"),
            stock: "abc".to_string(),
            money: "cet".to_string(),
        });
        let cancelled = keeper.deliver(&mut store, BlockHeader::new(3, 60), &cancel).unwrap();
        assert_eq!(
            cancelled,
            BancorEvent::PoolCancelled {
                key: bancor_domain::pool::PoolKey::new("abc", "cet"),
                owner: Address::from("alice"),
                stock_returned: 90,
                money_returned: 5,
            }
        );

        let ctx = Context::new(&mut store, BlockHeader::default());
        assert_eq!(keeper.bank().balance(&ctx, &escrow_address(), "abc").unwrap(), 0);
        assert_eq!(keeper.bank().balance(&ctx, &Address::from("alice"), "abc").unwrap(), 100);
        assert_eq!(keeper.bank().balance(&ctx, &Address::from("alice"), "cet").unwrap(), 1_000);
    }

    #[test]
    fn test_rejected_instruction_leaves_store_untouched() {
        let mut store = genesis_store();
        let keeper = Keeper::default();
        let before = store.clone();

        let mut msg = match init() {
            Instruction::Init(msg) => msg,
            _ => unreachable!(),
        };
        msg.max_supply = 1_000;
        let err = keeper
            .deliver(&mut store, BlockHeader::new(1, 10), &Instruction::Init(msg))
            .unwrap_err();
        assert!(matches!(err, BancorError::InsufficientFunds(_)));
        assert_eq!(store, before);
    }
}
