//! JSON scenarios replayed against an in-memory ledger.

use anyhow::{Context as _, Result};
use bancor_engine::prelude::*;
use bancor_ledger::{
    AccountLedger, Address, Bank, BlockHeader, Context, MemStore, TokenInfo, TokenRegistry,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::info;

/// Initial ledger state plus the blocks to apply.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub genesis: GenesisState,
    /// Tokens issued before the first block, supply credited to the owner.
    #[serde(default)]
    pub tokens: Vec<TokenInfo>,
    #[serde(default)]
    pub transfers: Vec<Transfer>,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transfer {
    pub from: Address,
    pub to: Address,
    pub denom: String,
    pub amount: u128,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub height: u64,
    /// Unix seconds.
    pub time: i64,
    pub instructions: Vec<Instruction>,
}

/// Result of one delivered instruction.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub height: u64,
    pub kind: &'static str,
    pub result: Result<BancorEvent, BancorError>,
}

/// Everything a replay produced.
#[derive(Debug)]
pub struct Report {
    pub outcomes: Vec<Outcome>,
    pub pools: Vec<BondingCurvePool>,
    /// Accounts named by the scenario plus the module accounts.
    pub accounts: Vec<Address>,
    pub store: MemStore,
}

impl Report {
    #[must_use]
    pub fn rejected(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_err()).count()
    }

    /// Non-zero final balances of `address`, ordered by denomination.
    pub fn balances(&mut self, address: &Address) -> Result<Vec<(String, u128)>> {
        let ctx = Context::new(&mut self.store, BlockHeader::default());
        Ok(Bank::new().balances(&ctx, address)?)
    }
}

impl Scenario {
    /// Reads a scenario file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing scenario {}", path.display()))
    }

    /// Every account the scenario touches, with escrow and fee collector.
    #[must_use]
    pub fn accounts(&self) -> Vec<Address> {
        let mut accounts = BTreeSet::new();
        accounts.extend(self.tokens.iter().map(|t| t.owner.clone()));
        accounts.extend(self.genesis.pools.iter().map(|p| p.owner.clone()));
        for transfer in &self.transfers {
            accounts.insert(transfer.from.clone());
            accounts.insert(transfer.to.clone());
        }
        for instruction in self.blocks.iter().flat_map(|b| &b.instructions) {
            accounts.insert(match instruction {
                Instruction::Init(msg) => msg.owner.clone(),
                Instruction::Trade(msg) => msg.sender.clone(),
                Instruction::Cancel(msg) => msg.owner.clone(),
            });
        }
        accounts.insert(escrow_address());
        accounts.insert(fee_collector_address());
        accounts.into_iter().collect()
    }

    /// Builds the genesis ledger and delivers every block in order.
    ///
    /// Setup failures abort the replay. Rejected instructions do not; they
    /// are recorded in the report.
    pub fn replay(&self, keeper: &Keeper) -> Result<Report> {
        let mut store = MemStore::new();
        {
            let mut ctx = Context::new(&mut store, BlockHeader::default());
            let tokens = TokenRegistry::new();
            for token in &self.tokens {
                tokens
                    .issue(&mut ctx, keeper.bank(), token.clone())
                    .with_context(|| format!("issuing {}", token.symbol))?;
            }
            for transfer in &self.transfers {
                keeper
                    .bank()
                    .transfer(&mut ctx, &transfer.from, &transfer.to, &transfer.denom, transfer.amount)
                    .with_context(|| format!("funding {} with {}", transfer.to, transfer.denom))?;
            }
            keeper
                .init_genesis(&mut ctx, &self.genesis)
                .context("loading module genesis")?;
        }

        let mut outcomes = Vec::new();
        for block in &self.blocks {
            let header = BlockHeader::new(block.height, block.time);
            for instruction in &block.instructions {
                let result = keeper.deliver(&mut store, header, instruction);
                outcomes.push(Outcome {
                    height: block.height,
                    kind: instruction.kind(),
                    result,
                });
            }
        }

        let pools = {
            let ctx = Context::new(&mut store, BlockHeader::default());
            keeper.pools(&ctx)?
        };
        info!(
            blocks = self.blocks.len(),
            delivered = outcomes.len(),
            pools = pools.len(),
            "Scenario replayed"
        );
        Ok(Report {
            outcomes,
            pools,
            accounts: self.accounts(),
            store,
        })
    }
}
