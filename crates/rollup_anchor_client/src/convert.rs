use crate::abi::{OutgoingCallAbi, ResponseAbi};
use rollup_types::{IncomingCallResponse, OutgoingCall, StateHash};

impl From<&OutgoingCall> for OutgoingCallAbi {
    fn from(call: &OutgoingCall) -> Self {
        Self {
            from: call.from,
            target: call.target,
            value: call.value,
            gas: alloy::primitives::U256::from(call.gas),
            data: call.data.clone(),
            postCallStateHash: call.post_call_state_hash.0,
        }
    }
}

impl From<&OutgoingCallAbi> for OutgoingCall {
    fn from(call: &OutgoingCallAbi) -> Self {
        Self {
            from: call.from,
            target: call.target,
            value: call.value,
            gas: call.gas.try_into().unwrap_or(u64::MAX),
            data: call.data.clone(),
            post_call_state_hash: StateHash(call.postCallStateHash),
        }
    }
}

pub fn response_to_abi(l2_address: rollup_types::L2Address, response: &IncomingCallResponse) -> ResponseAbi {
    let _ = l2_address;
    ResponseAbi {
        preOutgoingCallsStateHash: response.pre_outgoing_calls_state_hash.0,
        outgoingCalls: response.outgoing_calls.iter().map(OutgoingCallAbi::from).collect(),
        expectedResults: response.expected_results.clone(),
        returnValue: response.return_value.clone(),
        finalStateHash: response.final_state_hash.0,
    }
}

pub fn response_from_abi(
    l2_address: rollup_types::L2Address,
    pre_state_hash: StateHash,
    response: &ResponseAbi,
) -> IncomingCallResponse {
    IncomingCallResponse {
        l2_address,
        pre_state_hash,
        pre_outgoing_calls_state_hash: StateHash(response.preOutgoingCallsStateHash),
        outgoing_calls: response.outgoingCalls.iter().map(OutgoingCall::from).collect(),
        expected_results: response.expectedResults.clone(),
        return_value: response.returnValue.clone(),
        final_state_hash: StateHash(response.finalStateHash),
    }
}
