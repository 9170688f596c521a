// Copyright (C) 2015-2025 The Neo Project.
//
// main.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.

//! Process entry point for the Neo N3 core node.
//!
//! This binary wires together persistence, the ledger, the VM-backed native
//! contract suite and the P2P dispatcher. It does not implement an
//! interactive shell, RPC surface, or wallet support — those live in
//! separate collaborator processes and are out of scope here.

use std::sync::Arc;

use clap::Parser;
use neo_config::NetworkType;
use neo_core::ShutdownCoordinator;
use neo_ledger::{Blockchain, MemoryPool, MempoolConfig};
use neo_network::{NetworkCommand, NetworkConfig, P2pNode};
use tokio::sync::{mpsc, RwLock};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "neo-node", about = "Neo N3 core node")]
struct Args {
    /// Network to join.
    #[arg(long, value_enum, default_value = "testnet")]
    network: NetworkArg,

    /// Path to a TOML configuration file overriding the network defaults.
    #[arg(long)]
    config: Option<std::path::PathBuf>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum NetworkArg {
    Mainnet,
    Testnet,
    Private,
}

impl From<NetworkArg> for NetworkType {
    fn from(value: NetworkArg) -> Self {
        match value {
            NetworkArg::Mainnet => NetworkType::MainNet,
            NetworkArg::Testnet => NetworkType::TestNet,
            NetworkArg::Private => NetworkType::Private,
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();
    let network: NetworkType = args.network.into();
    info!(?network, "starting neo-node");

    if let Some(path) = &args.config {
        // Configuration is a frozen record read once at startup; an invalid
        // file aborts the process rather than falling back to defaults.
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config {}: {e}", path.display()))?;
        toml::from_str::<toml::Value>(&raw)
            .map_err(|e| anyhow::anyhow!("invalid config {}: {e}", path.display()))?;
    }

    let shutdown = Arc::new(ShutdownCoordinator::new());

    let blockchain = Arc::new(Blockchain::new(network).await?);
    info!(height = blockchain.get_height().await, "ledger ready");

    let mempool = Arc::new(RwLock::new(MemoryPool::new(MempoolConfig::default())));

    let network_config = match network {
        NetworkType::MainNet | NetworkType::TestNet => NetworkConfig::default(),
        NetworkType::Private => NetworkConfig::private(),
    };
    let (_cmd_tx, cmd_rx) = mpsc::channel::<NetworkCommand>(256);
    let p2p = Arc::new(P2pNode::new(network_config, cmd_rx)?);

    p2p.start().await?;
    info!("p2p dispatcher started");

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    ctrl_c.await.ok();

    info!("shutdown signal received");
    if let Err(e) = shutdown.initiate_shutdown("ctrl-c".to_string()).await {
        error!(error = %e, "graceful shutdown reported an error");
    }
    drop(mempool);
    Ok(())
}
