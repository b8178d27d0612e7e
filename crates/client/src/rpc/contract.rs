//! Mint contract binding over JSON-RPC.
//!
//! The mint is sent with `eth_sendTransaction` from the bound signer,
//! confirmation polls `eth_getTransactionReceipt`, and mint events for the
//! signer are delivered by a background task polling `eth_getLogs`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::abi::{self, parse_hex_quantity};
use crate::error::{Result, WalletError};
use crate::models::{Account, TxHash, TxReceipt};
use crate::provider::{ContractSpec, MintContract, MintEventSink, Subscription};

use super::transport::RpcTransport;
use super::wire::{LogWire, ReceiptWire};

/// Contract binding that signs with one account.
pub struct RpcMintContract {
    transport: Arc<RpcTransport>,
    address: Account,
    signer: Account,
    call_data: String,
    event_topic: String,
    poll_interval: Duration,
}

impl RpcMintContract {
    pub(crate) fn new(
        transport: Arc<RpcTransport>,
        spec: &ContractSpec,
        signer: Account,
        poll_interval: Duration,
    ) -> Result<Self> {
        Ok(Self {
            transport,
            address: Account::parse(&spec.address)?,
            signer,
            call_data: abi::encode_call(&spec.mint_function),
            event_topic: abi::event_topic(&spec.mint_event),
            poll_interval,
        })
    }

    pub fn call_data(&self) -> &str {
        &self.call_data
    }

    pub fn event_topic(&self) -> &str {
        &self.event_topic
    }
}

fn parse_block(quantity: Option<&str>) -> Result<Option<u64>> {
    quantity
        .map(|q| {
            parse_hex_quantity(q).and_then(|n| {
                u64::try_from(n)
                    .map_err(|_| WalletError::InvalidResponse(format!("block {q} out of range")))
            })
        })
        .transpose()
}

#[async_trait]
impl MintContract for RpcMintContract {
    async fn mint(&self) -> Result<TxHash> {
        let tx = json!([{
            "from": self.signer.as_str(),
            "to": self.address.as_str(),
            "data": self.call_data,
        }]);
        let hash: String = self
            .transport
            .request("eth_sendTransaction", tx)
            .await
            .map_err(|e| match e {
                WalletError::Declined(message) => WalletError::Rejected(message),
                other => other,
            })?;
        TxHash::parse(&hash)
    }

    async fn wait_confirmed(&self, tx: &TxHash) -> Result<TxReceipt> {
        loop {
            let polled: Result<Option<ReceiptWire>> = self
                .transport
                .request("eth_getTransactionReceipt", json!([tx.as_str()]))
                .await;

            match polled {
                Ok(Some(receipt)) => {
                    if receipt.status.as_deref() == Some("0x0") {
                        return Err(WalletError::Rejected("transaction reverted".to_string()));
                    }
                    return Ok(TxReceipt {
                        hash: TxHash::parse(&receipt.transaction_hash)?,
                        block_number: parse_block(receipt.block_number.as_deref())?,
                    });
                }
                Ok(None) => debug!(tx = %tx, "Transaction pending"),
                // Transient read failures count as pending; the caller bounds the wait.
                Err(e) if e.is_retryable() => {
                    warn!(tx = %tx, error = %e, "Receipt poll failed, still waiting");
                }
                Err(e) => return Err(e),
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn subscribe_minted(&self, sink: MintEventSink) -> Result<Subscription> {
        let head: String = self
            .transport
            .request("eth_blockNumber", json!([]))
            .await?;
        let from_block = parse_block(Some(&head))?.unwrap_or_default();

        let poller = LogPoller {
            transport: self.transport.clone(),
            address: self.address.as_str().to_string(),
            signer: self.signer.clone(),
            topic: self.event_topic.clone(),
            next_block: from_block,
            interval: self.poll_interval,
            sink,
        };
        Ok(Subscription::from_task(tokio::spawn(poller.run())))
    }
}

/// Background task forwarding the signer's decoded mint logs to a sink.
struct LogPoller {
    transport: Arc<RpcTransport>,
    address: String,
    signer: Account,
    topic: String,
    next_block: u64,
    interval: Duration,
    sink: MintEventSink,
}

impl LogPoller {
    async fn run(mut self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        while !self.sink.is_closed() {
            ticker.tick().await;
            if let Err(e) = self.poll_once().await {
                warn!(error = %e, "Mint event poll failed");
            }
        }
        debug!("Mint event sink closed, stopping log poller");
    }

    async fn poll_once(&mut self) -> Result<()> {
        let filter = json!([{
            "address": self.address,
            "topics": [self.topic],
            "fromBlock": format!("{:#x}", self.next_block),
            "toBlock": "latest",
        }]);
        let logs: Vec<LogWire> = self.transport.request("eth_getLogs", filter).await?;

        for log in logs {
            if let Some(block) = parse_block(log.block_number.as_deref())? {
                self.next_block = self.next_block.max(block + 1);
            }
            match abi::decode_mint_event(&log.topics, &log.data) {
                Ok(event) if event.from != self.signer => {
                    debug!(from = %event.from.short(), "Skipping mint log for another account");
                }
                Ok(event) => {
                    if self.sink.send(event).is_err() {
                        return Ok(());
                    }
                }
                Err(e) => warn!(error = %e, "Skipping undecodable mint log"),
            }
        }
        Ok(())
    }
}
