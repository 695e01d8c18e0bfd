//! The three dashboard flows, written against [`ArtworkRegistry`] so they can run
//! on a real contract or a mock.

use ethers::types::{Address, U256};
use tracing::{error, info};

use crate::{
    registry::ArtworkRegistry,
    types::{OwnedToken, RegistrationReport, TokenDetails, TransactionOutcome},
    RegistryError,
};

/// Register an artwork for `owner`. Node errors, timeouts and reverted receipts all
/// come back as [`RegistrationReport::Failed`]; the detail only goes to the log.
pub async fn register(
    registry: &dyn ArtworkRegistry,
    owner: Address,
    artwork_uri: &str,
) -> RegistrationReport {
    match registry
        .register_artwork(owner, artwork_uri.to_owned())
        .await
    {
        Ok(TransactionOutcome::Confirmed { tx_hash }) => {
            info!(?tx_hash, "Artwork registered");
            RegistrationReport::Registered { tx_hash }
        }
        Ok(TransactionOutcome::Failed { tx_hash }) => {
            error!(?tx_hash, "Transaction Failed!");
            RegistrationReport::Failed
        }
        Err(e) => {
            error!(error = %e, "Transaction Failed!");
            RegistrationReport::Failed
        }
    }
}

/// Every token `owner` holds, with its metadata uri. Costs `1 + 2 * balance` calls.
pub async fn tokens_of_owner(
    registry: &dyn ArtworkRegistry,
    owner: Address,
) -> Result<Vec<OwnedToken>, RegistryError> {
    let count = registry.balance_of(owner).await?;

    let mut tokens = Vec::new();
    let mut index = U256::zero();
    while index < count {
        let token_id = registry.token_of_owner_by_index(owner, index).await?;
        let token_uri = registry.token_uri(token_id).await?;
        tokens.push(OwnedToken {
            token_id,
            token_uri,
        });
        index += U256::one();
    }
    Ok(tokens)
}

/// Largest supply the inspector dropdown will list.
pub const MAX_INSPECTOR_TOKENS: u64 = 10_000;

/// Token ids `[0, totalSupply)`, for the inspector dropdown. A supply above
/// [`MAX_INSPECTOR_TOKENS`] is an error rather than a huge allocation.
pub async fn token_ids(registry: &dyn ArtworkRegistry) -> Result<Vec<U256>, RegistryError> {
    let supply = registry.total_supply().await?;
    if supply > U256::from(MAX_INSPECTOR_TOKENS) {
        return Err(RegistryError::SupplyOverflow(supply));
    }
    Ok((0..supply.as_u64()).map(U256::from).collect())
}

pub async fn token_details(
    registry: &dyn ArtworkRegistry,
    token_id: U256,
) -> Result<TokenDetails, RegistryError> {
    let owner = registry.owner_of(token_id).await?;
    let token_uri = registry.token_uri(token_id).await?;
    Ok(TokenDetails {
        token_id,
        owner,
        token_uri,
    })
}
