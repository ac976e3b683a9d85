use alloy::sol;

// The ABI surface consumed from `NativeRollupCore` (spec.md §6). The
// contract itself, the proxy contracts, and the proof verifier are out of
// scope (spec.md §1) — this is only the interface shape we call into and
// the events we subscribe to.
sol! {
    #[derive(Debug)]
    struct OutgoingCallAbi {
        address from;
        address target;
        uint256 value;
        uint256 gas;
        bytes data;
        bytes32 postCallStateHash;
    }

    #[derive(Debug)]
    struct ResponseAbi {
        bytes32 preOutgoingCallsStateHash;
        OutgoingCallAbi[] outgoingCalls;
        bytes[] expectedResults;
        bytes returnValue;
        bytes32 finalStateHash;
    }

    #[derive(Debug)]
    #[sol(rpc)]
    interface INativeRollupCore {
        function l2BlockHash() external view returns (bytes32);
        function l2BlockNumber() external view returns (uint256);
        function getProxyAddress(address l2Address) external view returns (address);
        function isProxyDeployed(address l2Address) external view returns (bool);
        function deployProxy(address l2Address) external returns (address);

        function registerIncomingCall(
            address l2Address,
            bytes32 stateHash,
            bytes calldata callData,
            ResponseAbi calldata response,
            bytes calldata proof
        ) external;

        function getResponseKey(address l2Address, bytes32 stateHash, bytes calldata callData)
            external
            view
            returns (bytes32);
        function incomingCallRegistered(bytes32 key) external view returns (bool);
        function incomingCallResponses(bytes32 key) external view returns (ResponseAbi memory);

        function commitL2Block(
            bytes32 prevHash,
            bytes calldata rlpEncodedTx,
            bytes32 finalStateHash,
            bytes calldata proof
        ) external;

        function commitL2BlockWithOutgoingCalls(
            bytes32 prevHash,
            bytes calldata rlpEncodedTx,
            bytes32 preOutgoingCallsStateHash,
            OutgoingCallAbi[] calldata outgoingCalls,
            bytes[] calldata expectedResults,
            bytes32 finalStateHash,
            bytes calldata proof
        ) external;

        event L2BlockProcessed(
            bytes32 indexed prevHash,
            bytes32 indexed newHash,
            bytes rlpEncodedTx,
            OutgoingCallAbi[] outgoingCalls,
            bytes[] outgoingResults
        );

        event IncomingCallHandled(
            address indexed l2Address,
            address indexed l1Caller,
            bytes32 prevHash,
            bytes callData,
            uint256 value,
            OutgoingCallAbi[] outgoingCalls,
            bytes[] outgoingResults,
            bytes32 finalStateHash
        );
    }
}
