use alloy::sol;

// The ABI surface the L2-side system contracts must expose. Their bytecode
// is operator-supplied (spec.md §9 — bytecodes are determinism constants,
// part of the deployment manifest, not something this crate invents), but
// any conforming implementation must expose these two entry points for the
// genesis bootstrap and the L1→L2 call algorithm (spec.md §4.1) to work.
sol! {
    #[derive(Debug)]
    #[sol(rpc)]
    interface IL1SenderProxyFactory {
        function deploy(address l1Caller) external returns (address proxy);
        function getProxy(address l1Caller) external view returns (address proxy);
    }

    #[derive(Debug)]
    #[sol(rpc)]
    interface IL1SenderProxy {
        function forward(address target, uint256 value, bytes calldata data)
            external
            payable
            returns (bytes memory);
    }
}
