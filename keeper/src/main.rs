//! Harbor Rebalance Keeper
//!
//! Off-chain service that watches one router and its oracle and submits the
//! permissionless rebalance when the price has crossed the depeg threshold.

mod config;
mod monitor;
mod tx_builder;

use anyhow::{Context, Result};
use config::Config;
use monitor::{decide, observe, Decision};
use solana_client::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};
use std::time::Duration;
use tokio::time;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Harbor Rebalance Keeper");

    // Load configuration
    let config = Config::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({:#}), using default devnet config", e);
        let path = Config::path();
        if !std::path::Path::new(&path).exists() {
            if let Err(e) = Config::write_default(&path) {
                log::warn!("Could not write default config: {:#}", e);
            }
        }
        Config::default_devnet()
    });

    log::info!("Connected to RPC: {}", config.rpc_url);
    log::info!("Watching router {} (program {})", config.router_state, config.router_program);
    if config.dry_run {
        log::info!("Dry run: rebalances are logged, not submitted");
    }

    let client = RpcClient::new_with_commitment(config.rpc_url.clone(), CommitmentConfig::confirmed());

    // Load keeper wallet
    let keeper = load_keypair(&config.keypair_path)?;
    log::info!("Keeper wallet: {}", keeper.pubkey());

    let mut interval = time::interval(Duration::from_secs(config.poll_interval_secs));

    loop {
        interval.tick().await;

        if let Err(e) = poll_once(&client, &config, &keeper) {
            log::error!("Error polling router: {:#}", e);
        }
    }
}

/// Fetch router and oracle, and rebalance if the price calls for it
fn poll_once(client: &RpcClient, config: &Config, keeper: &Keypair) -> Result<()> {
    let router_data = client
        .get_account_data(&config.router_state)
        .context("Failed to fetch router account")?;
    let oracle_key = harbor_router::RouterAccount::from_bytes(&router_data)
        .map(|router| Pubkey::new_from_array(router.oracle))
        .context("Router account is not initialized")?;
    let oracle_data = client
        .get_account_data(&oracle_key)
        .context("Failed to fetch oracle account")?;

    let observation = observe(&router_data, &oracle_key.to_bytes(), &oracle_data)?;
    log::debug!(
        "mode={} price={} total_deposits={}",
        observation.mode,
        observation.price,
        observation.router.total_deposits
    );

    match decide(observation.mode, observation.price) {
        Decision::Hold => {
            log::debug!("No rebalance needed");
        }
        Decision::Frozen => {
            log::warn!("Router is in emergency mode; rebalance cannot leave it");
        }
        Decision::Rebalance { from, to } => {
            log::info!("Price {} moves router from {} to {}", observation.price, from, to);
            if config.dry_run {
                return Ok(());
            }
            let signature = submit_rebalance(client, config, keeper, &observation.router)?;
            log::info!("Rebalance confirmed: {}", signature);
        }
    }

    Ok(())
}

fn submit_rebalance(
    client: &RpcClient,
    config: &Config,
    keeper: &Keypair,
    router: &harbor_router::RouterAccount,
) -> Result<Signature> {
    let blockhash = client
        .get_latest_blockhash()
        .context("Failed to fetch recent blockhash")?;
    let transaction = tx_builder::build_rebalance_transaction(
        &config.router_program,
        &config.router_state,
        router,
        keeper,
        blockhash,
    )?;
    client
        .send_and_confirm_transaction(&transaction)
        .context("Rebalance transaction failed")
}

/// Load keeper keypair from file
fn load_keypair(path: &str) -> Result<Keypair> {
    let expanded_path = shellexpand::tilde(path);
    let bytes = std::fs::read(expanded_path.as_ref())
        .context(format!("Failed to read keypair from {}", path))?;

    let keypair = if bytes.first() == Some(&b'[') {
        // JSON format
        let json_data: Vec<u8> = serde_json::from_slice(&bytes)
            .context("Failed to parse keypair JSON")?;
        Keypair::try_from(&json_data[..])
            .context("Failed to create keypair from bytes")?
    } else {
        // Binary format
        Keypair::try_from(&bytes[..])
            .context("Failed to create keypair from bytes")?
    };

    Ok(keypair)
}
