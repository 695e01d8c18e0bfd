pub mod artwork_registry;

use std::{fs, io, path::Path, sync::Arc};

use ethers::{abi::Abi, providers::Middleware};
use once_cell::sync::OnceCell;
use serde::Deserialize;
use tracing::info;

use crate::{config::RegistryConfig, utils::parse_address, RegistryError};

use self::artwork_registry::ArtworkRegistryContract;

/// Either a bare abi array, or a compiler artifact (hardhat/truffle) carrying one.
#[derive(Deserialize)]
#[serde(untagged)]
enum InterfaceDocument {
    Abi(Abi),
    Artifact { abi: Abi },
}

pub fn load_contract_interface(path: &Path) -> Result<Abi, RegistryError> {
    let raw = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => RegistryError::InterfaceNotFound {
            path: path.to_path_buf(),
            source,
        },
        _ => RegistryError::InterfaceRead {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let document: InterfaceDocument =
        serde_json::from_str(&raw).map_err(|source| RegistryError::InterfaceParse {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(match document {
        InterfaceDocument::Abi(abi) | InterfaceDocument::Artifact { abi } => abi,
    })
}

/// Holds the one contract handle of the process. The first successful load wins,
/// later calls get the same `Arc` back without touching the filesystem.
pub struct ContractCache<M> {
    cell: OnceCell<Arc<ArtworkRegistryContract<M>>>,
}

impl<M: Middleware> Default for ContractCache<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Middleware> ContractCache<M> {
    /// `const` so the dashboard can keep its cache in a `static`.
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    pub fn get_or_load(
        &self,
        config: &RegistryConfig,
        client: Arc<M>,
    ) -> Result<Arc<ArtworkRegistryContract<M>>, RegistryError> {
        self.cell
            .get_or_try_init(|| -> Result<_, RegistryError> {
                let abi = load_contract_interface(&config.abi_path)?;
                let address = config
                    .contract_address
                    .as_deref()
                    .ok_or(RegistryError::MissingContractAddress)
                    .and_then(parse_address)?;

                info!(
                    abi_path = %config.abi_path.display(),
                    contract = ?address,
                    "loaded artwork registry contract"
                );

                Ok(Arc::new(ArtworkRegistryContract::new(
                    address, abi, client, config,
                )))
            })
            .cloned()
    }

    pub fn get(&self) -> Option<Arc<ArtworkRegistryContract<M>>> {
        self.cell.get().cloned()
    }
}
