/// Human-readable name for a chain id.
pub fn network_name(chain_id: u64) -> String {
    match chain_id {
        1 => "Ethereum Mainnet".to_string(),
        10 => "OP Mainnet".to_string(),
        56 => "BNB Smart Chain".to_string(),
        137 => "Polygon".to_string(),
        1337 => "Localhost".to_string(),
        8453 => "Base".to_string(),
        17000 => "Holesky".to_string(),
        31337 => "Hardhat".to_string(),
        42161 => "Arbitrum One".to_string(),
        80002 => "Polygon Amoy".to_string(),
        11155111 => "Sepolia".to_string(),
        other => format!("Unknown network ({})", other),
    }
}
