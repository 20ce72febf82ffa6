//! Token transfers against the in-memory chain.

use proptest::prelude::*;
use tokenkit_cli::config::ToolEnv;
use tokenkit_cli::transfer::{self, TransferRequest, DEFAULT_AMOUNT};
use tokenkit_erc20::TokenMetadata;
use tokenkit_error::{ErrorKind, TokenkitError};
use tokenkit_ethereum::alloy::primitives::{Address, U256};
use tokenkit_ethereum::{parse_address, DEV_ACCOUNT_ADDRESS};
use tokenkit_testing::{balance_and_amount, Call, EdgeCaseAddresses, EdgeCaseAmounts, MockChain};

fn addr(text: &str) -> Address {
    parse_address("TEST", text).unwrap()
}

fn token() -> Address {
    addr(EdgeCaseAddresses::FIRST_CONTRACT)
}

fn recipient() -> Address {
    addr(EdgeCaseAddresses::SECOND_DEV_ACCOUNT)
}

fn whole(tokens: u64, decimals: u8) -> U256 {
    U256::from(tokens) * U256::from(10u64).pow(U256::from(decimals))
}

fn chain_with_balance(decimals: u8, sender_balance: U256) -> MockChain {
    MockChain::new().with_token(
        token(),
        TokenMetadata {
            name: "My Simple Token".into(),
            symbol: "MST".into(),
            decimals,
        },
        &[(DEV_ACCOUNT_ADDRESS, sender_balance)],
    )
}

fn env(recipient: Option<&str>, token: Option<&str>, amount: Option<&str>) -> ToolEnv {
    ToolEnv {
        recipient_address: recipient.map(str::to_string),
        token_address: token.map(str::to_string),
        amount: amount.map(str::to_string),
        ..ToolEnv::default()
    }
}

fn full_env(amount: Option<&str>) -> ToolEnv {
    env(
        Some(EdgeCaseAddresses::SECOND_DEV_ACCOUNT),
        Some(EdgeCaseAddresses::FIRST_CONTRACT),
        amount,
    )
}

#[tokio::test]
async fn test_default_amount_transfer() {
    let chain = chain_with_balance(18, whole(1_000_000, 18));

    let report = transfer::run(&chain, &chain, &full_env(None), Some(DEV_ACCOUNT_ADDRESS)).await.unwrap();

    assert_eq!(report.amount.raw, whole(1000, 18));
    assert_eq!(report.sender_before.to_string(), "1000000.0");
    assert_eq!(report.sender_after.to_string(), "999000.0");
    assert_eq!(report.recipient_before.to_string(), "0.0");
    assert_eq!(report.recipient_after.to_string(), "1000.0");
    assert_eq!(chain.token_balance(token(), recipient()), whole(1000, 18));
    assert_eq!(chain.submissions(), 1);
    assert_eq!(chain.confirmation_waits(), 1);

    let printed = report.to_string();
    assert!(printed.contains("Transfer complete!"));
    assert!(printed.contains("Recipient balance after transfer: 1000.0 MST"));
}

#[tokio::test]
async fn test_fractional_amount_uses_token_decimals() {
    let chain = chain_with_balance(6, whole(10, 6));

    let report = transfer::run(&chain, &chain, &full_env(Some("2.5")), Some(DEV_ACCOUNT_ADDRESS))
        .await
        .unwrap();

    assert_eq!(report.amount.raw, U256::from(2_500_000u64));
    assert_eq!(report.sender_after.to_string(), "7.5");
    assert_eq!(chain.token_balance(token(), recipient()), U256::from(2_500_000u64));
}

#[tokio::test]
async fn test_insufficient_balance_submits_nothing() {
    let chain = chain_with_balance(18, whole(999, 18));

    let err = transfer::run(&chain, &chain, &full_env(None), Some(DEV_ACCOUNT_ADDRESS))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InsufficientFunds);
    assert_eq!(
        err.to_string(),
        "Insufficient balance. You have 999.0 MST but trying to send 1000 MST"
    );
    assert_eq!(chain.submissions(), 0);
}

#[tokio::test]
async fn test_excess_precision_is_rejected_before_submission() {
    let chain = chain_with_balance(2, whole(10, 2));

    let err = transfer::run(&chain, &chain, &full_env(Some("1.005")), Some(DEV_ACCOUNT_ADDRESS))
        .await
        .unwrap_err();

    assert!(matches!(err, TokenkitError::InvalidAmount { .. }));
    assert_eq!(chain.submissions(), 0);
}

#[tokio::test]
async fn test_missing_parameters_make_no_calls() {
    let chain = chain_with_balance(18, whole(1_000_000, 18));

    let err = transfer::run(
        &chain,
        &chain,
        &env(None, Some(EdgeCaseAddresses::FIRST_CONTRACT), None),
        Some(DEV_ACCOUNT_ADDRESS),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, TokenkitError::MissingParameter { ref name } if name == "RECIPIENT_ADDRESS"));

    let err = transfer::run(
        &chain,
        &chain,
        &env(Some(EdgeCaseAddresses::SECOND_DEV_ACCOUNT), None, None),
        Some(DEV_ACCOUNT_ADDRESS),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, TokenkitError::MissingParameter { ref name } if name == "TOKEN_ADDRESS"));

    assert!(chain.calls().is_empty());
}

#[tokio::test]
async fn test_invalid_inputs_make_no_calls() {
    let chain = chain_with_balance(18, whole(1_000_000, 18));

    for bad in EdgeCaseAddresses::invalid().into_iter().filter(|a| !a.is_empty()) {
        let bad_env = env(Some(bad), Some(EdgeCaseAddresses::FIRST_CONTRACT), None);
        let err = transfer::run(&chain, &chain, &bad_env, Some(DEV_ACCOUNT_ADDRESS))
            .await
            .unwrap_err();
        assert!(matches!(err, TokenkitError::InvalidAddress { .. }), "accepted {bad:?}");
    }

    for bad in EdgeCaseAmounts::invalid().into_iter().filter(|a| !a.is_empty()) {
        let err = TransferRequest::from_env(&full_env(Some(bad))).unwrap_err();
        assert!(matches!(err, TokenkitError::InvalidAmount { .. }), "accepted {bad:?}");
    }

    assert!(chain.calls().is_empty());
}

#[tokio::test]
async fn test_zero_amount_is_sent() {
    for zero in EdgeCaseAmounts::zero() {
        let chain = chain_with_balance(18, whole(10, 18));

        let report = transfer::run(&chain, &chain, &full_env(Some(zero)), Some(DEV_ACCOUNT_ADDRESS))
            .await
            .unwrap();

        assert!(report.amount.is_zero(), "{zero:?}");
        assert_eq!(report.sender_after.raw, whole(10, 18));
        assert_eq!(report.recipient_after.raw, U256::ZERO);
        assert_eq!(chain.submissions(), 1);
    }
}

#[tokio::test]
async fn test_unprefixed_addresses_are_accepted() {
    let chain = chain_with_balance(18, whole(1_000_000, 18));
    let unprefixed_token = EdgeCaseAddresses::FIRST_CONTRACT.trim_start_matches("0x");
    let unprefixed_env = env(Some(EdgeCaseAddresses::UNPREFIXED), Some(unprefixed_token), Some("1"));

    let report = transfer::run(&chain, &chain, &unprefixed_env, Some(DEV_ACCOUNT_ADDRESS))
        .await
        .unwrap();

    assert_eq!(report.recipient, recipient());
    assert_eq!(report.token, token());
    assert_eq!(chain.token_balance(token(), recipient()), whole(1, 18));
}

#[tokio::test]
async fn test_missing_sender() {
    let chain = chain_with_balance(18, whole(1_000_000, 18));

    let err = transfer::run(&chain, &chain, &full_env(None), None).await.unwrap_err();

    assert!(matches!(err, TokenkitError::Config(_)));
    assert!(chain.calls().is_empty());
}

#[tokio::test]
async fn test_waits_for_confirmation_once() {
    let chain = chain_with_balance(18, whole(1_000_000, 18)).fail_confirmations(1);
    let request = TransferRequest::from_env(&full_env(None)).unwrap();

    let err = transfer::transfer(&chain, &chain, &request, DEV_ACCOUNT_ADDRESS).await.unwrap_err();

    assert!(matches!(err, TokenkitError::Rpc { .. }));
    assert_eq!(chain.confirmation_waits(), 1);
    assert_eq!(chain.submissions(), 1);
}

#[tokio::test]
async fn test_transfer_call_sequence() {
    let chain = chain_with_balance(18, whole(1_000_000, 18));
    let request = TransferRequest::from_env(&full_env(None)).unwrap();
    assert_eq!(request.amount, DEFAULT_AMOUNT);

    transfer::transfer(&chain, &chain, &request, DEV_ACCOUNT_ADDRESS).await.unwrap();

    let submitted: Vec<Call> = chain.calls().into_iter().filter(Call::is_submission).collect();
    assert_eq!(
        submitted,
        vec![Call::Transfer {
            token: token(),
            to: recipient(),
            amount: whole(1000, 18),
        }]
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_transfer_moves_exact_amount((balance, amount) in balance_and_amount()) {
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        let chain = chain_with_balance(0, balance);
        let env = full_env(Some(&amount.to_string()));

        let result = runtime.block_on(transfer::run(&chain, &chain, &env, Some(DEV_ACCOUNT_ADDRESS)));

        if amount <= balance {
            let report = result.unwrap();
            prop_assert_eq!(report.sender_after.raw, balance - amount);
            prop_assert_eq!(report.recipient_after.raw, amount);
            prop_assert_eq!(chain.token_supply(token()), balance);
            prop_assert_eq!(chain.submissions(), 1);
        } else {
            prop_assert_eq!(result.unwrap_err().kind(), ErrorKind::InsufficientFunds);
            prop_assert_eq!(chain.submissions(), 0);
            prop_assert_eq!(chain.token_balance(token(), DEV_ACCOUNT_ADDRESS), balance);
        }
    }
}
