use async_trait::async_trait;
use ethers::types::{Address, U256};

use crate::{types::TransactionOutcome, RegistryError};

/// The calls the dashboard makes against the artwork registry contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArtworkRegistry: Send + Sync {
    /// `registerArtwork(owner, uri)`, paid for by `owner`. Waits for the receipt.
    async fn register_artwork(
        &self,
        owner: Address,
        artwork_uri: String,
    ) -> Result<TransactionOutcome, RegistryError>;

    async fn balance_of(&self, owner: Address) -> Result<U256, RegistryError>;

    async fn token_of_owner_by_index(
        &self,
        owner: Address,
        index: U256,
    ) -> Result<U256, RegistryError>;

    async fn token_uri(&self, token_id: U256) -> Result<String, RegistryError>;

    async fn total_supply(&self) -> Result<U256, RegistryError>;

    async fn owner_of(&self, token_id: U256) -> Result<Address, RegistryError>;
}
