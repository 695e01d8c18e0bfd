use ethers::{types::Address, utils::to_checksum};

use crate::RegistryError;

/// Parse a '0x..' hex address. Surrounding whitespace is ignored, casing is not checked.
pub fn parse_address(address: &str) -> Result<Address, RegistryError> {
    address
        .trim()
        .parse()
        .map_err(|_| RegistryError::InvalidAddress(address.to_owned()))
}

/// EIP-55 checksummed form, the way wallets and explorers print addresses.
// note that debug fmt of an address is lowercase hex, and .to_string() truncates it
pub fn display_address(address: &Address) -> String {
    to_checksum(address, None)
}
