use crate::rpc::RpcClient;
use anyhow::Result;
use tracing::info;

/// Verify the node serves the chain the config expects, so a wrong RPC URL
/// can never index another chain's data.
pub async fn check_chain_id(rpc: &RpcClient, expected_chain_id: u64) -> Result<()> {
    let actual = rpc.chain_id().await?;
    anyhow::ensure!(
        actual == expected_chain_id,
        "Chain id mismatch: node reports {}, config expects {}",
        actual,
        expected_chain_id
    );
    info!("✅ Verified chain ID: {} for Swapsight indexer", actual);
    Ok(())
}
