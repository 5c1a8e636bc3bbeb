//! Asset capability traits and the gateway pass-through.
//!
//! The engine never custodies assets. Makers and takers grant transfer
//! rights to the engine's operator address up front (approve-then-pull);
//! at fill time the gateway verifies those grants as preconditions and then
//! pulls both legs of the swap. The traits expose exactly the capabilities
//! the engine consumes; nothing else about the asset contracts is modeled.

use crate::error::TokenError;
use crate::types::Address;

// ============================================================================
// Capability traits
// ============================================================================

/// Fungible settlement asset (WETH-like).
pub trait FungibleToken {
    /// Current balance of `owner`, in smallest units.
    fn balance_of(&self, owner: Address) -> u64;

    /// Remaining amount `spender` may pull from `owner`.
    fn allowance(&self, owner: Address, spender: Address) -> u64;

    /// Pull `amount` from `from` to `to` on behalf of `spender`,
    /// consuming allowance.
    fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: u64,
    ) -> Result<(), TokenError>;
}

/// Non-fungible collection with owner-authorized bulk transfer approval.
pub trait NonFungibleToken {
    /// Address identity of the collection contract.
    fn contract_address(&self) -> Address;

    /// Current owner of a token id.
    fn owner_of(&self, token_id: u64) -> Result<Address, TokenError>;

    /// Whether `operator` holds bulk transfer approval from `owner`.
    fn is_approved_for_all(&self, owner: Address, operator: Address) -> bool;

    /// Move one token from `from` to `to` on behalf of `operator`.
    fn transfer_from(
        &mut self,
        operator: Address,
        from: Address,
        to: Address,
        token_id: u64,
    ) -> Result<(), TokenError>;
}

// ============================================================================
// TokenGateway
// ============================================================================

/// Capability wrapper around one settlement asset and one collection.
///
/// Pure pass-through: every transfer failure propagates unchanged. The
/// `ensure_*` helpers let the engine verify every precondition before the
/// first transfer, so a well-behaved asset implementation cannot fail
/// mid-settlement.
pub struct TokenGateway<'a> {
    /// The identity the engine transfers under. Holders grant this address
    /// their approvals.
    operator: Address,
    settlement: &'a mut dyn FungibleToken,
    collection: &'a mut dyn NonFungibleToken,
}

impl<'a> TokenGateway<'a> {
    /// Wire a gateway for one settlement asset and one collection.
    pub fn new(
        operator: Address,
        settlement: &'a mut dyn FungibleToken,
        collection: &'a mut dyn NonFungibleToken,
    ) -> Self {
        Self {
            operator,
            settlement,
            collection,
        }
    }

    /// The engine's operator address.
    #[inline]
    pub fn operator(&self) -> Address {
        self.operator
    }

    /// Address of the wired collection.
    #[inline]
    pub fn collection_address(&self) -> Address {
        self.collection.contract_address()
    }

    // ========================================================================
    // Preconditions
    // ========================================================================

    /// Verify `owner` holds `amount` and has granted the operator at least
    /// that much allowance.
    pub fn ensure_spendable(&self, owner: Address, amount: u64) -> Result<(), TokenError> {
        let available = self.settlement.balance_of(owner);
        if available < amount {
            return Err(TokenError::InsufficientBalance {
                holder: owner,
                available,
                required: amount,
            });
        }

        let allowance = self.settlement.allowance(owner, self.operator);
        if allowance < amount {
            return Err(TokenError::InsufficientAllowance {
                owner,
                spender: self.operator,
                allowance,
                required: amount,
            });
        }

        Ok(())
    }

    /// Verify `owner` has granted the operator bulk transfer approval on
    /// the collection.
    pub fn ensure_approved(&self, owner: Address) -> Result<(), TokenError> {
        if self.collection.is_approved_for_all(owner, self.operator) {
            Ok(())
        } else {
            Err(TokenError::NotApproved {
                owner,
                operator: self.operator,
            })
        }
    }

    /// Verify `expected` currently owns `token_id`.
    pub fn ensure_owner(&self, expected: Address, token_id: u64) -> Result<(), TokenError> {
        let actual = self.collection.owner_of(token_id)?;
        if actual == expected {
            Ok(())
        } else {
            Err(TokenError::NotOwner {
                token_id,
                expected,
                actual,
            })
        }
    }

    // ========================================================================
    // Transfers
    // ========================================================================

    /// Pull settlement asset from `from` to `to` under the operator's
    /// allowance.
    pub fn transfer_fungible(
        &mut self,
        from: Address,
        to: Address,
        amount: u64,
    ) -> Result<(), TokenError> {
        self.settlement.transfer_from(self.operator, from, to, amount)
    }

    /// Move one token from `from` to `to` under the operator's approval.
    pub fn transfer_non_fungible(
        &mut self,
        from: Address,
        to: Address,
        token_id: u64,
    ) -> Result<(), TokenError> {
        self.collection.transfer_from(self.operator, from, to, token_id)
    }
}
