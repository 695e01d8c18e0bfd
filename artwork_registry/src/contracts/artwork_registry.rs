use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use ethers::{
    abi::{Abi, Detokenize, Tokenize},
    contract::{Contract, ContractCall},
    providers::Middleware,
    types::{Address, TransactionReceipt, TxHash, U256, U64},
};
use tracing::{debug, info};

use crate::{
    config::RegistryConfig, registry::ArtworkRegistry, types::TransactionOutcome, RegistryError,
};

const REGISTER_ARTWORK: &str = "registerArtwork";
const BALANCE_OF: &str = "balanceOf";
const TOKEN_OF_OWNER_BY_INDEX: &str = "tokenOfOwnerByIndex";
const TOKEN_URI: &str = "tokenURI";
const TOTAL_SUPPLY: &str = "totalSupply";
const OWNER_OF: &str = "ownerOf";

/// The artwork registry at its deployed address, bound to a node client.
pub struct ArtworkRegistryContract<M> {
    contract: Contract<M>,
    gas_limit: U256,
    confirmation_timeout: Duration,
}

impl<M: Middleware> ArtworkRegistryContract<M> {
    pub fn new(address: Address, abi: Abi, client: Arc<M>, config: &RegistryConfig) -> Self {
        Self {
            contract: Contract::new(address, abi, client),
            gas_limit: U256::from(config.gas_limit),
            confirmation_timeout: config.confirmation_timeout,
        }
    }

    pub fn address(&self) -> Address {
        self.contract.address()
    }

    async fn read<T: Tokenize, D: Detokenize>(
        &self,
        method: &'static str,
        args: T,
    ) -> Result<D, RegistryError> {
        debug!(method, "calling contract");
        self.contract
            .method::<T, D>(method, args)
            .map_err(|e| call_error(method, e))?
            .call()
            .await
            .map_err(|e| call_error(method, e))
    }

    /// `registerArtwork(owner, uri)` as a legacy transaction sent from `owner` with
    /// the configured gas budget. Only the gas price is left for the node to fill.
    fn register_call(
        &self,
        owner: Address,
        artwork_uri: String,
    ) -> Result<ContractCall<M, U256>, RegistryError> {
        Ok(self
            .contract
            .method::<_, U256>(REGISTER_ARTWORK, (owner, artwork_uri))
            .map_err(|e| call_error(REGISTER_ARTWORK, e))?
            .legacy()
            .from(owner)
            .gas(self.gas_limit))
    }
}

/// Receipt status `1` is success. A revert (status `0`) or a dropped
/// transaction (no receipt) is a failure.
fn outcome_of(tx_hash: TxHash, receipt: Option<TransactionReceipt>) -> TransactionOutcome {
    if receipt.and_then(|r| r.status) == Some(U64::from(1)) {
        TransactionOutcome::Confirmed { tx_hash }
    } else {
        TransactionOutcome::Failed { tx_hash }
    }
}

fn call_error(method: &'static str, e: impl ToString) -> RegistryError {
    RegistryError::Call {
        method,
        reason: e.to_string(),
    }
}

#[async_trait]
impl<M> ArtworkRegistry for ArtworkRegistryContract<M>
where
    M: Middleware + 'static,
{
    async fn register_artwork(
        &self,
        owner: Address,
        artwork_uri: String,
    ) -> Result<TransactionOutcome, RegistryError> {
        let call = self.register_call(owner, artwork_uri)?;

        let pending = call
            .send()
            .await
            .map_err(|e| call_error(REGISTER_ARTWORK, e))?;
        let tx_hash = pending.tx_hash();
        info!(?tx_hash, ?owner, "registerArtwork submitted, waiting for receipt");

        let receipt = tokio::time::timeout(self.confirmation_timeout, pending)
            .await
            .map_err(|_| RegistryError::ConfirmationTimeout {
                tx_hash,
                timeout: self.confirmation_timeout,
            })?
            .map_err(|e| RegistryError::Provider(e.to_string()))?;

        Ok(outcome_of(tx_hash, receipt))
    }

    async fn balance_of(&self, owner: Address) -> Result<U256, RegistryError> {
        self.read(BALANCE_OF, owner).await
    }

    async fn token_of_owner_by_index(
        &self,
        owner: Address,
        index: U256,
    ) -> Result<U256, RegistryError> {
        self.read(TOKEN_OF_OWNER_BY_INDEX, (owner, index)).await
    }

    async fn token_uri(&self, token_id: U256) -> Result<String, RegistryError> {
        self.read(TOKEN_URI, token_id).await
    }

    async fn total_supply(&self) -> Result<U256, RegistryError> {
        self.read(TOTAL_SUPPLY, ()).await
    }

    async fn owner_of(&self, token_id: U256) -> Result<Address, RegistryError> {
        self.read(OWNER_OF, token_id).await
    }
}
