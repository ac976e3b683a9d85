use crate::error::AnchorClientError;
use alloy::primitives::{Address, Bytes, U256};
use rollup_types::{CallKind, CallTrace};
use serde::Deserialize;

/// Raw shape of a `debug_traceCall` `callTracer` frame, before it is folded
/// into [`CallTrace`].
#[derive(Debug, Deserialize)]
struct RawFrame {
    #[serde(rename = "type")]
    kind: String,
    from: Address,
    #[serde(default)]
    to: Address,
    #[serde(default)]
    input: Bytes,
    #[serde(default)]
    value: Option<U256>,
    #[serde(default)]
    gas: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    output: Option<Bytes>,
    #[serde(default)]
    calls: Vec<RawFrame>,
}

fn parse_kind(kind: &str) -> Result<CallKind, AnchorClientError> {
    match kind.to_ascii_uppercase().as_str() {
        "CALL" => Ok(CallKind::Call),
        "DELEGATECALL" => Ok(CallKind::DelegateCall),
        "STATICCALL" => Ok(CallKind::StaticCall),
        "CREATE" => Ok(CallKind::Create),
        "CREATE2" => Ok(CallKind::Create2),
        other => Err(AnchorClientError::Decode(format!("unknown call trace kind: {other}"))),
    }
}

fn parse_gas(gas: &Option<String>) -> u64 {
    gas.as_deref()
        .and_then(|g| u64::from_str_radix(g.trim_start_matches("0x"), 16).ok())
        .unwrap_or(0)
}

fn fold(raw: RawFrame) -> Result<CallTrace, AnchorClientError> {
    let kind = parse_kind(&raw.kind)?;
    let children = raw
        .calls
        .into_iter()
        .map(fold)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CallTrace {
        kind,
        from: raw.from,
        to: raw.to,
        input: raw.input,
        value: raw.value.unwrap_or_default(),
        gas: parse_gas(&raw.gas),
        error: raw.error,
        output: raw.output,
        children,
    })
}

/// Parses a `debug_traceCall` response (with `tracer: "callTracer"`) into a
/// [`CallTrace`] tree.
pub fn parse_call_tracer_json(value: &serde_json::Value) -> Result<CallTrace, AnchorClientError> {
    let raw: RawFrame =
        serde_json::from_value(value.clone()).map_err(|e| AnchorClientError::Decode(e.to_string()))?;
    fold(raw)
}
