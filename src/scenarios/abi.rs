//! Minimal ABI word encoding for the calls the scenarios simulate.

/// `transfer(address,uint256)`
pub const TRANSFER_SELECTOR: &str = "0xa9059cbb";

/// `getAmountsOut(uint256,address[])`
pub const GET_AMOUNTS_OUT_SELECTOR: &str = "0x5c11d795";

/// Left-pad an address to one 32-byte word, lowercase, without `0x`.
pub fn encode_address(address: &str) -> String {
    let body = address.strip_prefix("0x").unwrap_or(address);
    format!("{:0>64}", body.to_lowercase())
}

pub fn encode_uint256(value: u128) -> String {
    format!("{:064x}", value)
}

pub fn build_transfer_data(to: &str, amount: u128) -> String {
    format!("{}{}{}", TRANSFER_SELECTOR, encode_address(to), encode_uint256(amount))
}

/// Selector and `amountIn` word only; the dynamic `path` array is not encoded.
pub fn build_get_amounts_out_data(amount_in: u128) -> String {
    format!("{}{}", GET_AMOUNTS_OUT_SELECTOR, encode_uint256(amount_in))
}
