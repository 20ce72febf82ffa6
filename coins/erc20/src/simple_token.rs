//! SimpleToken contract adapter

use crate::adapter::{Erc20Adapter, Erc20Error};
use crate::artifact::ContractArtifact;
use crate::factory::{ConstructorArgs, PendingDeployment, TokenFactory, TokenResolver};
use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::rpc::types::TransactionRequest;
use alloy::sol;
use alloy::sol_types::{SolCall, SolConstructor};
use async_trait::async_trait;
use tokenkit_ethereum::EthClient;

sol! {
    /// Fixed-supply ERC-20 token whose constructor mints the whole supply to one holder.
    contract SimpleToken {
        constructor(string name_, string symbol_, uint8 decimals_, uint256 initialSupply, address initialHolder);

        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function totalSupply() external view returns (uint256);
        function balanceOf(address account) external view returns (uint256);
        function transfer(address to, uint256 amount) external returns (bool);
    }
}

/// Creation code for `args`: the artifact bytecode followed by the ABI-encoded
/// constructor arguments.
pub fn deployment_code(bytecode: &Bytes, args: &ConstructorArgs) -> Bytes {
    let constructor = SimpleToken::constructorCall {
        name_: args.name.clone(),
        symbol_: args.symbol.clone(),
        decimals_: args.decimals,
        initialSupply: args.initial_supply,
        initialHolder: args.initial_holder,
    };
    let mut code = bytecode.to_vec();
    code.extend_from_slice(&constructor.abi_encode());
    code.into()
}

/// Adapter for a deployed SimpleToken contract
#[derive(Debug, Clone)]
pub struct SimpleTokenAdapter {
    /// The contract address
    address: Address,
    client: EthClient,
}

impl SimpleTokenAdapter {
    /// Create an adapter for the token at `address`
    pub fn new(address: Address, client: EthClient) -> Self {
        Self { address, client }
    }

    async fn call_contract<C: SolCall>(&self, call: C) -> Result<C::Return, Erc20Error> {
        let tx = TransactionRequest::default()
            .with_to(self.address)
            .with_input(call.abi_encode());

        let result = self
            .client
            .call(tx)
            .await
            .map_err(|e| Erc20Error::ContractError(format!("{} on {}: {e}", C::SIGNATURE, self.address)))?;

        C::abi_decode_returns(&result).map_err(|e| Erc20Error::DecodeError(format!("{}: {e}", C::SIGNATURE)))
    }
}

#[async_trait]
impl Erc20Adapter for SimpleTokenAdapter {
    fn contract_address(&self) -> Address {
        self.address
    }

    async fn name(&self) -> tokenkit_error::Result<String> {
        Ok(self.call_contract(SimpleToken::nameCall {}).await?)
    }

    async fn symbol(&self) -> tokenkit_error::Result<String> {
        Ok(self.call_contract(SimpleToken::symbolCall {}).await?)
    }

    async fn decimals(&self) -> tokenkit_error::Result<u8> {
        Ok(self.call_contract(SimpleToken::decimalsCall {}).await?)
    }

    async fn total_supply(&self) -> tokenkit_error::Result<U256> {
        Ok(self.call_contract(SimpleToken::totalSupplyCall {}).await?)
    }

    async fn balance_of(&self, owner: Address) -> tokenkit_error::Result<U256> {
        Ok(self.call_contract(SimpleToken::balanceOfCall { account: owner }).await?)
    }

    async fn transfer(&self, to: Address, amount: U256) -> tokenkit_error::Result<B256> {
        let tx = TransactionRequest::default()
            .with_to(self.address)
            .with_input(SimpleToken::transferCall { to, amount }.abi_encode());
        self.client.submit(tx).await
    }
}

/// Deploys SimpleToken contracts from a compiled artifact.
#[derive(Debug, Clone)]
pub struct SimpleTokenFactory {
    client: EthClient,
    bytecode: Bytes,
}

impl SimpleTokenFactory {
    /// Factory sending creation transactions through `client`, which must carry a signer.
    pub fn new(client: EthClient, artifact: ContractArtifact) -> Self {
        Self {
            client,
            bytecode: artifact.bytecode,
        }
    }
}

impl TokenResolver for EthClient {
    type Token = SimpleTokenAdapter;

    fn attach(&self, address: Address) -> SimpleTokenAdapter {
        SimpleTokenAdapter::new(address, self.clone())
    }
}

impl TokenResolver for SimpleTokenFactory {
    type Token = SimpleTokenAdapter;

    fn attach(&self, address: Address) -> SimpleTokenAdapter {
        self.client.attach(address)
    }
}

#[async_trait]
impl TokenFactory for SimpleTokenFactory {
    async fn submit_deployment(&self, args: &ConstructorArgs) -> tokenkit_error::Result<PendingDeployment> {
        let tx = TransactionRequest::default().with_deploy_code(deployment_code(&self.bytecode, args));
        let tx_hash = self.client.submit(tx).await?;
        tracing::info!(%tx_hash, "creation transaction sent");

        Ok(PendingDeployment {
            tx_hash,
            diagnostics: self
                .client
                .gas()
                .diagnostics(Some(tx_hash), self.client.signer_address(), None),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    const HOLDER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

    fn args() -> ConstructorArgs {
        ConstructorArgs {
            name: "My Simple Token".into(),
            symbol: "MST".into(),
            decimals: 18,
            initial_supply: U256::from(1_000_000u64),
            initial_holder: HOLDER,
        }
    }

    // ============================================================================
    // Call Encoding Tests
    // ============================================================================

    #[test]
    fn test_name_call_encoding() {
        let encoded = SimpleToken::nameCall {}.abi_encode();
        // name() function selector is 0x06fdde03
        assert_eq!(&encoded[0..4], &[0x06, 0xfd, 0xde, 0x03]);
    }

    #[test]
    fn test_decimals_call_encoding() {
        let encoded = SimpleToken::decimalsCall {}.abi_encode();
        // decimals() function selector is 0x313ce567
        assert_eq!(&encoded[0..4], &[0x31, 0x3c, 0xe5, 0x67]);
    }

    #[test]
    fn test_balance_of_call_encoding() {
        let encoded = SimpleToken::balanceOfCall { account: HOLDER }.abi_encode();

        // balanceOf(address) function selector is 0x70a08231
        assert_eq!(&encoded[0..4], &[0x70, 0xa0, 0x82, 0x31]);
        assert_eq!(encoded.len(), 36);
    }

    #[test]
    fn test_transfer_call_encoding() {
        let call = SimpleToken::transferCall { to: HOLDER, amount: U256::from(1000u64) };
        let encoded = call.abi_encode();

        // transfer(address,uint256) function selector is 0xa9059cbb
        assert_eq!(&encoded[0..4], &[0xa9, 0x05, 0x9c, 0xbb]);
        // 4 selector + 32 recipient + 32 amount
        assert_eq!(encoded.len(), 68);
        assert_eq!(&encoded[16..36], HOLDER.as_slice());
    }

    // ============================================================================
    // Deployment Code Tests
    // ============================================================================

    #[test]
    fn test_deployment_code_appends_constructor_args() {
        let bytecode = Bytes::from_static(&[0x60, 0x80, 0x60, 0x40]);
        let code = deployment_code(&bytecode, &args());

        assert_eq!(&code[..4], bytecode.as_ref());
        let encoded = &code[4..];
        // five head words; first string offset points past them
        assert_eq!(U256::from_be_slice(&encoded[0..32]), U256::from(160u64));
        assert_eq!(U256::from_be_slice(&encoded[64..96]), U256::from(18u64));
        assert_eq!(U256::from_be_slice(&encoded[96..128]), U256::from(1_000_000u64));
        assert_eq!(&encoded[140..160], HOLDER.as_slice());
    }

    #[test]
    fn test_deployment_code_changes_with_args() {
        let bytecode = Bytes::from_static(&[0x60, 0x80]);
        let mut other = args();
        other.symbol = "TKN".into();
        assert_ne!(deployment_code(&bytecode, &args()), deployment_code(&bytecode, &other));
    }

    // ============================================================================
    // Adapter Tests
    // ============================================================================

    #[tokio::test]
    async fn test_attach_keeps_address() {
        let client = EthClient::connect("http://127.0.0.1:8545").unwrap();
        let artifact = ContractArtifact {
            contract_name: Some("SimpleToken".into()),
            bytecode: Bytes::from_static(&[0x60, 0x80]),
        };
        assert_eq!(client.attach(HOLDER).contract_address(), HOLDER);
        let factory = SimpleTokenFactory::new(client, artifact);
        assert_eq!(factory.attach(HOLDER).contract_address(), HOLDER);
    }

    #[test]
    fn test_adapter_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SimpleTokenAdapter>();
        assert_send_sync::<SimpleTokenFactory>();
    }

    #[tokio::test]
    async fn test_unreachable_rpc_error() {
        let client = EthClient::connect("http://127.0.0.1:59999").unwrap();
        let adapter = SimpleTokenAdapter::new(HOLDER, client);
        let err = adapter.decimals().await.unwrap_err();
        assert!(err.to_string().contains("decimals()"));
    }
}
