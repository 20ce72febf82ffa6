//! An in-memory chain with one signing account.
//!
//! [`MockChain`] implements [`ChainClient`], [`TokenResolver`] and [`TokenFactory`]; the
//! [`MockToken`] handles it hands out implement [`Erc20Adapter`]. Submitted
//! transactions take effect when they are confirmed, the way they would on a
//! real node. Every call is recorded so tests can assert on what was (or was
//! not) sent over the wire.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use alloy::primitives::{Address, B256, U256};
use async_trait::async_trait;
use tokenkit_erc20::{
    ConstructorArgs, Erc20Adapter, PendingDeployment, TokenFactory, TokenMetadata,
    TokenResolver,
};
use tokenkit_error::{Result, TokenkitError, TxDiagnostics};
use tokenkit_ethereum::{ChainClient, Confirmation, EthereumAmount, DEV_ACCOUNT_ADDRESS};

/// Chain id the mock reports unless configured otherwise
pub const MOCK_CHAIN_ID: u64 = 31337;

/// Gas the mock reports for a confirmed token transfer
pub const TRANSFER_GAS: u64 = 51_000;

/// Gas the mock reports for a confirmed deployment
pub const DEPLOYMENT_GAS: u64 = 1_200_000;

/// One recorded interaction with the mock chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// `eth_chainId`
    ChainId,
    /// `eth_blockNumber`
    BlockNumber,
    /// `eth_getBalance`
    NativeBalance(Address),
    /// Receipt wait for a transaction
    WaitForConfirmation(B256),
    /// Read-only token call
    TokenRead {
        /// Token contract
        token: Address,
        /// ERC-20 function name
        method: &'static str,
    },
    /// Token transfer submission
    Transfer {
        /// Token contract
        token: Address,
        /// Recipient
        to: Address,
        /// Raw amount
        amount: U256,
    },
    /// Contract creation submission
    SubmitDeployment(ConstructorArgs),
}

impl Call {
    /// Whether this call broadcasts a transaction
    pub fn is_submission(&self) -> bool {
        matches!(self, Call::Transfer { .. } | Call::SubmitDeployment(_))
    }
}

#[derive(Debug, Clone)]
struct TokenState {
    metadata: TokenMetadata,
    total_supply: U256,
    balances: HashMap<Address, U256>,
}

#[derive(Debug, Clone)]
enum PendingTx {
    Deployment {
        address: Address,
        args: ConstructorArgs,
    },
    Transfer {
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    },
}

#[derive(Debug)]
struct MockState {
    chain_id: u64,
    block_number: u64,
    sender: Address,
    nonce: u64,
    native: HashMap<Address, U256>,
    tokens: HashMap<Address, TokenState>,
    pending: HashMap<B256, PendingTx>,
    calls: Vec<Call>,
    failing_confirmations: u32,
    hang_confirmations: bool,
    fail_rpc: Option<String>,
    misreported_metadata: Option<TokenMetadata>,
}

/// In-memory chain shared by every handle cloned from it.
#[derive(Debug, Clone)]
pub struct MockChain {
    state: Arc<Mutex<MockState>>,
}

impl Default for MockChain {
    fn default() -> Self {
        Self::new()
    }
}

impl MockChain {
    /// Empty chain with id [`MOCK_CHAIN_ID`], signing as the first development account.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                chain_id: MOCK_CHAIN_ID,
                block_number: 0,
                sender: DEV_ACCOUNT_ADDRESS,
                nonce: 0,
                native: HashMap::new(),
                tokens: HashMap::new(),
                pending: HashMap::new(),
                calls: Vec::new(),
                failing_confirmations: 0,
                hang_confirmations: false,
                fail_rpc: None,
                misreported_metadata: None,
            })),
        }
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // ============ Setup ============

    /// Reports `chain_id` from `eth_chainId`.
    pub fn with_chain_id(self, chain_id: u64) -> Self {
        self.state().chain_id = chain_id;
        self
    }

    /// Sets the current block number.
    pub fn with_block_number(self, block_number: u64) -> Self {
        self.state().block_number = block_number;
        self
    }

    /// Signs transactions as `sender`.
    pub fn with_sender(self, sender: Address) -> Self {
        self.state().sender = sender;
        self
    }

    /// Sets the native balance of `address`.
    pub fn with_native_balance(self, address: Address, balance: EthereumAmount) -> Self {
        self.state().native.insert(address, balance.wei);
        self
    }

    /// Places a token contract at `address` with the given holders.
    pub fn with_token(self, address: Address, metadata: TokenMetadata, holders: &[(Address, U256)]) -> Self {
        {
            let mut state = self.state();
            let balances: HashMap<Address, U256> = holders.iter().copied().collect();
            let total_supply = balances.values().fold(U256::ZERO, |acc, b| acc + *b);
            state.tokens.insert(
                address,
                TokenState {
                    metadata,
                    total_supply,
                    balances,
                },
            );
        }
        self
    }

    /// The next `count` confirmation waits fail as if no receipt were found.
    pub fn fail_confirmations(self, count: u32) -> Self {
        self.state().failing_confirmations = count;
        self
    }

    /// Confirmation waits never resolve.
    pub fn hang_confirmations(self) -> Self {
        self.state().hang_confirmations = true;
        self
    }

    /// Every RPC call fails with `reason`.
    pub fn fail_rpc(self, reason: impl Into<String>) -> Self {
        self.state().fail_rpc = Some(reason.into());
        self
    }

    /// Contracts deployed from now on report `metadata` instead of their
    /// constructor arguments.
    pub fn misreport_deployed_metadata(self, metadata: TokenMetadata) -> Self {
        self.state().misreported_metadata = Some(metadata);
        self
    }

    // ============ Inspection ============

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    /// Number of transactions broadcast so far
    pub fn submissions(&self) -> usize {
        self.state().calls.iter().filter(|c| c.is_submission()).count()
    }

    /// Number of confirmation waits so far
    pub fn confirmation_waits(&self) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|c| matches!(c, Call::WaitForConfirmation(_)))
            .count()
    }

    /// Token balance of `owner`, without recording a call
    pub fn token_balance(&self, token: Address, owner: Address) -> U256 {
        self.state()
            .tokens
            .get(&token)
            .and_then(|t| t.balances.get(&owner).copied())
            .unwrap_or_default()
    }

    /// Total supply of `token`, without recording a call
    pub fn token_supply(&self, token: Address) -> U256 {
        self.state().tokens.get(&token).map(|t| t.total_supply).unwrap_or_default()
    }

    /// The signing account
    pub fn sender(&self) -> Address {
        self.state().sender
    }

    /// Handle to the token at `address`
    pub fn token(&self, address: Address) -> MockToken {
        MockToken {
            address,
            chain: self.clone(),
        }
    }

    // ============ Internals ============

    fn record(&self, call: Call) -> Result<()> {
        let mut state = self.state();
        state.calls.push(call.clone());
        match &state.fail_rpc {
            Some(reason) => Err(TokenkitError::rpc(rpc_method(&call), reason)),
            None => Ok(()),
        }
    }

    fn next_tx_hash(state: &mut MockState) -> B256 {
        state.nonce += 1;
        B256::left_padding_from(&state.nonce.to_be_bytes())
    }

    fn apply(state: &mut MockState, tx_hash: B256, tx: PendingTx) -> Result<Confirmation> {
        state.block_number += 1;
        let block_number = state.block_number;
        match tx {
            PendingTx::Deployment { address, args } => {
                let scale = U256::from(10u64).pow(U256::from(args.decimals));
                let total_supply = args.initial_supply * scale;
                let metadata = state.misreported_metadata.clone().unwrap_or(TokenMetadata {
                    name: args.name,
                    symbol: args.symbol,
                    decimals: args.decimals,
                });
                state.tokens.insert(
                    address,
                    TokenState {
                        metadata,
                        total_supply,
                        balances: HashMap::from([(args.initial_holder, total_supply)]),
                    },
                );
                Ok(Confirmation {
                    tx_hash,
                    block_number,
                    gas_used: DEPLOYMENT_GAS,
                    contract_address: Some(address),
                })
            }
            PendingTx::Transfer {
                token,
                from,
                to,
                amount,
            } => {
                let reverted = || TokenkitError::TransactionFailed {
                    reason: "execution reverted".to_string(),
                    diagnostics: Some(TxDiagnostics {
                        tx_hash: Some(tx_hash.to_string()),
                        ..TxDiagnostics::default()
                    }),
                };
                let token = state.tokens.get_mut(&token).ok_or_else(reverted)?;
                let from_balance = token.balances.get(&from).copied().unwrap_or_default();
                if from_balance < amount {
                    return Err(reverted());
                }
                token.balances.insert(from, from_balance - amount);
                *token.balances.entry(to).or_default() += amount;
                Ok(Confirmation {
                    tx_hash,
                    block_number,
                    gas_used: TRANSFER_GAS,
                    contract_address: None,
                })
            }
        }
    }

    fn read_token<T>(&self, token: Address, method: &'static str, read: impl FnOnce(&TokenState) -> T) -> Result<T> {
        self.record(Call::TokenRead { token, method })?;
        let state = self.state();
        let contract = state.tokens.get(&token).ok_or_else(|| {
            TokenkitError::Contract(format!("{method}() on {token}: could not decode result data (0x)"))
        })?;
        Ok(read(contract))
    }
}

fn rpc_method(call: &Call) -> &'static str {
    match call {
        Call::ChainId => "eth_chainId",
        Call::BlockNumber => "eth_blockNumber",
        Call::NativeBalance(_) => "eth_getBalance",
        Call::WaitForConfirmation(_) => "eth_getTransactionReceipt",
        Call::TokenRead { .. } => "eth_call",
        Call::Transfer { .. } | Call::SubmitDeployment(_) => "eth_sendTransaction",
    }
}

#[async_trait]
impl ChainClient for MockChain {
    async fn chain_id(&self) -> Result<u64> {
        self.record(Call::ChainId)?;
        Ok(self.state().chain_id)
    }

    async fn block_number(&self) -> Result<u64> {
        self.record(Call::BlockNumber)?;
        Ok(self.state().block_number)
    }

    async fn native_balance(&self, address: Address) -> Result<EthereumAmount> {
        self.record(Call::NativeBalance(address))?;
        let wei = self.state().native.get(&address).copied().unwrap_or_default();
        Ok(EthereumAmount::from_wei(wei))
    }

    async fn wait_for_confirmation(&self, tx_hash: B256) -> Result<Confirmation> {
        self.record(Call::WaitForConfirmation(tx_hash))?;

        let hang = {
            let mut state = self.state();
            if state.failing_confirmations > 0 {
                state.failing_confirmations -= 1;
                return Err(TokenkitError::rpc(
                    "eth_getTransactionReceipt",
                    format!("receipt for {tx_hash} not available"),
                ));
            }
            state.hang_confirmations
        };
        if hang {
            std::future::pending::<()>().await;
        }

        let mut state = self.state();
        let tx = state.pending.remove(&tx_hash).ok_or_else(|| {
            TokenkitError::rpc("eth_getTransactionReceipt", format!("unknown transaction {tx_hash}"))
        })?;
        Self::apply(&mut state, tx_hash, tx)
    }
}

impl TokenResolver for MockChain {
    type Token = MockToken;

    fn attach(&self, address: Address) -> MockToken {
        self.token(address)
    }
}

#[async_trait]
impl TokenFactory for MockChain {
    async fn submit_deployment(&self, args: &ConstructorArgs) -> Result<PendingDeployment> {
        self.record(Call::SubmitDeployment(args.clone()))?;
        let mut state = self.state();
        let address = state.sender.create(state.nonce);
        let tx_hash = Self::next_tx_hash(&mut state);
        state.pending.insert(
            tx_hash,
            PendingTx::Deployment {
                address,
                args: args.clone(),
            },
        );
        tracing::debug!(%tx_hash, %address, "mock deployment submitted");
        Ok(PendingDeployment {
            tx_hash,
            diagnostics: TxDiagnostics {
                tx_hash: Some(tx_hash.to_string()),
                from: Some(state.sender.to_checksum(None)),
                ..TxDiagnostics::default()
            },
        })
    }
}

/// Token handle on a [`MockChain`].
#[derive(Debug, Clone)]
pub struct MockToken {
    address: Address,
    chain: MockChain,
}

#[async_trait]
impl Erc20Adapter for MockToken {
    fn contract_address(&self) -> Address {
        self.address
    }

    async fn name(&self) -> Result<String> {
        self.chain.read_token(self.address, "name", |t| t.metadata.name.clone())
    }

    async fn symbol(&self) -> Result<String> {
        self.chain.read_token(self.address, "symbol", |t| t.metadata.symbol.clone())
    }

    async fn decimals(&self) -> Result<u8> {
        self.chain.read_token(self.address, "decimals", |t| t.metadata.decimals)
    }

    async fn total_supply(&self) -> Result<U256> {
        self.chain.read_token(self.address, "totalSupply", |t| t.total_supply)
    }

    async fn balance_of(&self, owner: Address) -> Result<U256> {
        self.chain.read_token(self.address, "balanceOf", |t| {
            t.balances.get(&owner).copied().unwrap_or_default()
        })
    }

    async fn transfer(&self, to: Address, amount: U256) -> Result<B256> {
        self.chain.record(Call::Transfer {
            token: self.address,
            to,
            amount,
        })?;
        let mut state = self.chain.state();
        let from = state.sender;
        let tx_hash = MockChain::next_tx_hash(&mut state);
        state.pending.insert(
            tx_hash,
            PendingTx::Transfer {
                token: self.address,
                from,
                to,
                amount,
            },
        );
        Ok(tx_hash)
    }
}
