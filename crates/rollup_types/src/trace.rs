use alloy::primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

/// The kind of call a trace frame represents, mirroring `debug_traceCall`'s
/// `callTracer` vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum CallKind {
    Call,
    DelegateCall,
    StaticCall,
    Create,
    Create2,
}

/// A recursive, possibly-failing tree of heterogeneous call records.
///
/// Represented as a tagged sum with a common `to/from/input/value/error?/
/// children` shape rather than as dynamically-typed nodes, per the "dynamic
/// dispatch on the call trace" design note: the Builder only ever needs to
/// walk this depth-first looking for calls into known proxies, it never
/// needs kind-specific behavior beyond that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallTrace {
    pub kind: CallKind,
    pub from: Address,
    pub to: Address,
    pub input: Bytes,
    pub value: U256,
    pub gas: u64,
    pub error: Option<String>,
    pub output: Option<Bytes>,
    pub children: Vec<CallTrace>,
}

impl CallTrace {
    /// Depth-first walk over this frame and all descendants, in execution
    /// order.
    pub fn walk_depth_first<'a>(&'a self, visit: &mut impl FnMut(&'a CallTrace)) {
        visit(self);
        for child in &self.children {
            child.walk_depth_first(visit);
        }
    }

    /// Whether this frame or any ancestor-to-descendant path beneath it
    /// reverted.
    pub fn reverted(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(to: Address) -> CallTrace {
        CallTrace {
            kind: CallKind::Call,
            from: Address::ZERO,
            to,
            input: Bytes::new(),
            value: U256::ZERO,
            gas: 0,
            error: None,
            output: None,
            children: vec![],
        }
    }

    #[test]
    fn depth_first_visits_parent_before_children() {
        let a = Address::with_last_byte(1);
        let b = Address::with_last_byte(2);
        let c = Address::with_last_byte(3);
        let mut root = leaf(a);
        root.children.push(leaf(b));
        root.children.push(leaf(c));

        let mut seen = Vec::new();
        root.walk_depth_first(&mut |frame| seen.push(frame.to));
        assert_eq!(seen, vec![a, b, c]);
    }
}
