//! Chain access for the publish flow.
//!
//! [`WalletProvider`] is the seam the publish flow talks to: account access,
//! balance and network lookup, transaction sending and receipt lookup, following
//! the Ethereum JSON-RPC provider methods. [`JsonRpcWallet`] implements it over
//! HTTP against a node or signer that manages the operator's account.
//! [`ContractCall`] encodes the registry contract calls.

pub mod abi;
pub mod error;
pub mod jsonrpc;
pub mod network;
pub mod provider;
pub mod quantity;

pub use abi::{function_selector, parse_address, ContractCall};
pub use error::ChainError;
pub use jsonrpc::JsonRpcWallet;
pub use network::network_name;
pub use provider::{TxReceipt, TxRequest, WalletProvider};
