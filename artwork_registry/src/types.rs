use ethers::types::{Address, TxHash, U256};

/// Result of a confirmed write. Both variants carry the hash the node assigned.
#[derive(Clone, Debug, PartialEq)]
pub enum TransactionOutcome {
    Confirmed { tx_hash: TxHash },
    Failed { tx_hash: TxHash },
}

/// What the user gets told about a registration. Every non-success collapses to `Failed`.
#[derive(Clone, Debug, PartialEq)]
pub enum RegistrationReport {
    Registered { tx_hash: TxHash },
    Failed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OwnedToken {
    pub token_id: U256,
    pub token_uri: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TokenDetails {
    pub token_id: U256,
    pub owner: Address,
    pub token_uri: String,
}
