//! In-memory reference implementations of the asset interfaces.
//!
//! `TokenBank` and `TokenCollection` stand in for the external ERC20/ERC721
//! contracts in the demo binary, the integration tests, and the benchmarks.
//! All arithmetic is checked; transfer failures use the same `TokenError`
//! taxonomy a real asset adapter would surface.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::error::TokenError;
use crate::gateway::{FungibleToken, NonFungibleToken};
use crate::types::Address;

// ============================================================================
// TokenBank - fungible settlement asset
// ============================================================================

/// In-memory fungible token with ERC20-style allowances.
///
/// ## Example
///
/// ```
/// use nix_engine::gateway::{FungibleToken, TokenBank};
/// use nix_engine::types::Address;
///
/// let holder = Address::repeat(1);
/// let mut bank = TokenBank::new();
/// bank.mint(holder, 100);
///
/// assert_eq!(bank.balance_of(holder), 100);
/// ```
#[derive(Debug, Default)]
pub struct TokenBank {
    balances: HashMap<Address, u64>,
    allowances: HashMap<(Address, Address), u64>,
}

impl TokenBank {
    /// Create an empty bank.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` to `to`.
    pub fn mint(&mut self, to: Address, amount: u64) {
        let balance = self.balances.entry(to).or_insert(0);
        *balance = balance.saturating_add(amount);
    }

    /// Grant `spender` the right to pull up to `amount` from `owner`.
    /// Overwrites any prior allowance.
    pub fn approve(&mut self, owner: Address, spender: Address, amount: u64) {
        self.allowances.insert((owner, spender), amount);
    }
}

impl FungibleToken for TokenBank {
    fn balance_of(&self, owner: Address) -> u64 {
        self.balances.get(&owner).copied().unwrap_or(0)
    }

    fn allowance(&self, owner: Address, spender: Address) -> u64 {
        self.allowances.get(&(owner, spender)).copied().unwrap_or(0)
    }

    fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: u64,
    ) -> Result<(), TokenError> {
        let allowance = self.allowance(from, spender);
        if allowance < amount {
            return Err(TokenError::InsufficientAllowance {
                owner: from,
                spender,
                allowance,
                required: amount,
            });
        }

        let available = self.balance_of(from);
        let debited = available
            .checked_sub(amount)
            .ok_or(TokenError::InsufficientBalance {
                holder: from,
                available,
                required: amount,
            })?;

        self.allowances.insert((from, spender), allowance - amount);
        self.balances.insert(from, debited);
        let credit = self.balances.entry(to).or_insert(0);
        *credit = credit.saturating_add(amount);
        Ok(())
    }
}

// ============================================================================
// TokenCollection - non-fungible asset
// ============================================================================

/// In-memory NFT collection with auto-incrementing mint and per-owner
/// operator approvals.
#[derive(Debug)]
pub struct TokenCollection {
    address: Address,
    owners: BTreeMap<u64, Address>,
    operators: HashSet<(Address, Address)>,
    next_id: u64,
}

impl TokenCollection {
    /// Create an empty collection identified by `address`.
    pub fn new(address: Address) -> Self {
        Self {
            address,
            owners: BTreeMap::new(),
            operators: HashSet::new(),
            next_id: 0,
        }
    }

    /// Mint the next token id to `to` and return it. Ids start at 0.
    pub fn mint(&mut self, to: Address) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.owners.insert(id, to);
        id
    }

    /// Grant or revoke `operator`'s bulk transfer approval from `owner`.
    pub fn set_approval_for_all(&mut self, owner: Address, operator: Address, approved: bool) {
        if approved {
            self.operators.insert((owner, operator));
        } else {
            self.operators.remove(&(owner, operator));
        }
    }

    /// All token ids currently owned by `owner`, ascending.
    pub fn tokens_of(&self, owner: Address) -> Vec<u64> {
        self.owners
            .iter()
            .filter(|(_, holder)| **holder == owner)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Number of tokens ever minted.
    pub fn total_supply(&self) -> u64 {
        self.next_id
    }
}

impl NonFungibleToken for TokenCollection {
    fn contract_address(&self) -> Address {
        self.address
    }

    fn owner_of(&self, token_id: u64) -> Result<Address, TokenError> {
        self.owners
            .get(&token_id)
            .copied()
            .ok_or(TokenError::NonexistentToken(token_id))
    }

    fn is_approved_for_all(&self, owner: Address, operator: Address) -> bool {
        self.operators.contains(&(owner, operator))
    }

    fn transfer_from(
        &mut self,
        operator: Address,
        from: Address,
        to: Address,
        token_id: u64,
    ) -> Result<(), TokenError> {
        let actual = self.owner_of(token_id)?;
        if actual != from {
            return Err(TokenError::NotOwner {
                token_id,
                expected: from,
                actual,
            });
        }
        if operator != from && !self.is_approved_for_all(from, operator) {
            return Err(TokenError::NotApproved {
                owner: from,
                operator,
            });
        }

        self.owners.insert(token_id, to);
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
