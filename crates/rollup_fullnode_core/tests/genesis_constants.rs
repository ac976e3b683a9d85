use rollup_fullnode_core::SYSTEM_ACCOUNT_BALANCE;

#[test]
fn system_account_balance_is_nonzero() {
    assert!(SYSTEM_ACCOUNT_BALANCE > alloy::primitives::U256::ZERO);
}
