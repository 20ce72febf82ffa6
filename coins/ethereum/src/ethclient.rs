use std::time::Duration;

use alloy::network::{EthereumWallet, ReceiptResponse, TransactionBuilder};
use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;
use tokenkit_error::{ErrorContext, TokenkitError, TxDiagnostics};

use crate::chain::{ChainClient, Confirmation};
use crate::units::format_units;
use crate::{Error, EthereumAmount};

/// Receipt polling interval used by [`EthClient::wait_for_confirmation`]
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Gas overrides applied to every transaction the client submits.
///
/// Unset fields are left to the node's estimation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GasSettings {
    /// Fixed gas limit
    pub gas_limit: Option<u64>,
    /// Fixed legacy gas price in wei
    pub gas_price: Option<u128>,
}

impl GasSettings {
    /// Applies the overrides to `tx`.
    pub fn apply(&self, mut tx: TransactionRequest) -> TransactionRequest {
        if let Some(limit) = self.gas_limit {
            tx = tx.with_gas_limit(limit);
        }
        if let Some(price) = self.gas_price {
            tx = tx.with_gas_price(price);
        }
        tx
    }

    /// Diagnostic fields describing a transaction sent with these settings.
    pub fn diagnostics(
        &self,
        tx_hash: Option<B256>,
        from: Option<Address>,
        to: Option<Address>,
    ) -> TxDiagnostics {
        TxDiagnostics {
            tx_hash: tx_hash.map(|h| h.to_string()),
            from: from.map(|a| a.to_checksum(None)),
            to: to.map(|a| a.to_checksum(None)),
            gas_limit: self.gas_limit,
            gas_price_gwei: self.gas_price.map(|p| format_units(U256::from(p), 9)),
        }
    }
}

/// A connection to one Ethereum JSON-RPC endpoint, optionally able to sign.
#[derive(Clone)]
pub struct EthClient {
    provider: DynProvider,
    signer_address: Option<Address>,
    gas: GasSettings,
    poll_interval: Duration,
}

impl std::fmt::Debug for EthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EthClient")
            .field("signer_address", &self.signer_address)
            .field("gas", &self.gas)
            .field("poll_interval", &self.poll_interval)
            .finish_non_exhaustive()
    }
}

impl EthClient {
    /// Read-only connection to `rpc_url`.
    pub fn connect(rpc_url: &str) -> Result<Self, Error> {
        let provider = ProviderBuilder::new()
            .connect_http(rpc_url.parse().map_err(|e| Error::InvalidUrl(format!("{rpc_url}: {e}")))?)
            .erased();
        Ok(Self::from_provider(provider, None))
    }

    /// Connection to `rpc_url` that signs transactions with `signer`.
    pub fn connect_with_signer(rpc_url: &str, signer: PrivateKeySigner) -> Result<Self, Error> {
        let signer_address = signer.address();
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(rpc_url.parse().map_err(|e| Error::InvalidUrl(format!("{rpc_url}: {e}")))?)
            .erased();
        Ok(Self::from_provider(provider, Some(signer_address)))
    }

    fn from_provider(provider: DynProvider, signer_address: Option<Address>) -> Self {
        Self {
            provider,
            signer_address,
            gas: GasSettings::default(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Sets the gas overrides for submitted transactions.
    pub fn with_gas(mut self, gas: GasSettings) -> Self {
        self.gas = gas;
        self
    }

    /// Sets the receipt polling interval.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// The underlying provider
    pub fn provider(&self) -> &DynProvider {
        &self.provider
    }

    /// Gas overrides in effect
    pub fn gas(&self) -> GasSettings {
        self.gas
    }

    /// Address of the signing account, if any
    pub fn signer_address(&self) -> Option<Address> {
        self.signer_address
    }

    /// Executes a read-only `eth_call`.
    pub async fn call(&self, tx: TransactionRequest) -> Result<Bytes, Error> {
        self.provider.call(tx).await.map_err(|e| Error::rpc("eth_call", e))
    }

    /// Signs and broadcasts `tx` with the gas overrides applied, returning its hash
    /// without waiting for inclusion.
    pub async fn submit(&self, tx: TransactionRequest) -> Result<B256, TokenkitError> {
        let from = self.signer_address.ok_or_else(|| {
            TokenkitError::Config("no signing account configured for this network".to_string())
        })?;
        let to = tx.to.and_then(|kind| kind.to().copied());
        let tx = self.gas.apply(tx.with_from(from));

        match self.provider.send_transaction(tx).await {
            Ok(pending) => {
                let tx_hash = *pending.tx_hash();
                tracing::debug!(%tx_hash, "transaction submitted");
                Ok(tx_hash)
            }
            Err(e) => Err(TokenkitError::TransactionFailed {
                reason: e.to_string(),
                diagnostics: Some(self.gas.diagnostics(None, Some(from), to)),
            }),
        }
    }
}

#[async_trait]
impl ChainClient for EthClient {
    async fn chain_id(&self) -> tokenkit_error::Result<u64> {
        self.provider.get_chain_id().await.rpc_context("eth_chainId")
    }

    async fn block_number(&self) -> tokenkit_error::Result<u64> {
        self.provider.get_block_number().await.rpc_context("eth_blockNumber")
    }

    async fn native_balance(&self, address: Address) -> tokenkit_error::Result<EthereumAmount> {
        let wei = self.provider.get_balance(address).await.rpc_context("eth_getBalance")?;
        Ok(EthereumAmount::from_wei(wei))
    }

    async fn wait_for_confirmation(&self, tx_hash: B256) -> tokenkit_error::Result<Confirmation> {
        loop {
            let receipt = self
                .provider
                .get_transaction_receipt(tx_hash)
                .await
                .rpc_context("eth_getTransactionReceipt")?;

            match receipt {
                Some(receipt) if !receipt.status() => return Err(Error::Reverted(tx_hash).into()),
                Some(receipt) => {
                    return Ok(Confirmation {
                        tx_hash,
                        block_number: receipt.block_number().unwrap_or_default(),
                        gas_used: receipt.gas_used(),
                        contract_address: receipt.contract_address(),
                    })
                }
                None => {
                    tracing::trace!(%tx_hash, "receipt not available yet");
                    tokio::time::sleep(self.poll_interval).await;
                }
            }
        }
    }
}
