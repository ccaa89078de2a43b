//! The verification functions available to every rule.
//!
//! The proof and verifiable-presentation checks compare against fixed
//! placeholder values until real cryptographic verification is wired in.

use super::FunctionError;
use super::function_def::{FunctionDef, function_def};
use crate::value::{RuleValue, ValueKind};
use std::collections::BTreeMap;

/// Proof type accepted by the test-proof branch of `is proof valid`.
pub const PLACEHOLDER_PROOF_TYPE: &str = "test";

/// Proof value accepted by the test-proof branch of `is proof valid`.
pub const PLACEHOLDER_PROOF_VALUE: &str = "validProofForTesting";

/// The `proof.a` pair accepted by the proof-scheme branch of `is proof valid`.
pub const PLACEHOLDER_PROOF_POINT: [&str; 2] = [
    "0x274b3599e54e0e5fb9d76ccaca94d428030910961c7c5085b00041ac231ba64a",
    "0x2dafc3fb00b51507b84d3cfbe4a318a9d6f44435b2625d26eb1f68af4696f646",
];

/// The `proof.proofValue` accepted by `is vp valid`.
pub const PLACEHOLDER_VP_PROOF_VALUE: &str =
    "zqpLMweBrSxMY2xHX5XTYV8nQAJeV6doDwLWxQeVbY4oey5q2pmEcqaqA3Q1gVHMrXFkXM3XKaxup3tmzN4DRFTLV";

/// Fields a report must carry to be considered valid.
pub const REPORT_FIELDS: [&str; 6] = ["id", "legalBasis", "inspectionDate", "inspectionBody", "inspectionResult", "pdf"];

/// Key ignored by `has allowed changes`.
const IDENTITY_KEY: &str = "id";

pub const BUILTIN_FUNCTIONS: &[FunctionDef] = &[
    function_def!(
        "has allowed changes",
        "True if every key of the object other than 'id' is listed in allowedKeys",
        ["context", "allowedKeys"],
        has_allowed_changes
    ),
    function_def!(
        "is proof valid",
        "True if the proof object carries an accepted proof",
        ["proof"],
        is_proof_valid
    ),
    function_def!(
        "is report valid",
        "True if the report object has all required inspection report fields",
        ["report"],
        is_report_valid
    ),
    function_def!(
        "is vp valid",
        "True if the verifiable presentation has no proof or an accepted proof value",
        ["vp"],
        is_vp_valid
    ),
];

fn mapping<'a>(name: &str, value: &'a RuleValue) -> Result<&'a BTreeMap<String, RuleValue>, FunctionError> {
    value
        .as_mapping()
        .ok_or_else(|| FunctionError::wrong_type(name, ValueKind::Mapping, value))
}

fn string<'a>(name: &str, value: &'a RuleValue) -> Result<&'a str, FunctionError> {
    value
        .as_str()
        .ok_or_else(|| FunctionError::wrong_type(name, ValueKind::String, value))
}

fn single(args: &[RuleValue]) -> Result<&RuleValue, FunctionError> {
    match args {
        [value] => Ok(value),
        _ => Err(FunctionError::Arity {
            expected: 1,
            actual: args.len(),
        }),
    }
}

fn has_allowed_changes(args: &[RuleValue]) -> Result<bool, FunctionError> {
    let [object, allowed] = args else {
        return Err(FunctionError::Arity {
            expected: 2,
            actual: args.len(),
        });
    };

    let object = mapping("context", object)?;
    let allowed = allowed
        .as_sequence()
        .ok_or_else(|| FunctionError::wrong_type("allowedKeys", ValueKind::Sequence, allowed))?;

    let mut allowed_keys = Vec::with_capacity(allowed.len());
    for (i, key) in allowed.iter().enumerate() {
        allowed_keys.push(string(&format!("allowedKeys[{i}]"), key)?);
    }

    Ok(object
        .keys()
        .all(|key| key == IDENTITY_KEY || allowed_keys.contains(&key.as_str())))
}

fn is_proof_valid(args: &[RuleValue]) -> Result<bool, FunctionError> {
    let proof = mapping("proof", single(args)?)?;

    if let (Some(kind), Some(value)) = (proof.get("type"), proof.get("value")) {
        return Ok(string("type", kind)? == PLACEHOLDER_PROOF_TYPE && string("value", value)? == PLACEHOLDER_PROOF_VALUE);
    }

    if proof.contains_key("scheme")
        && proof.contains_key("curve")
        && let Some(inner) = proof.get("proof")
    {
        let inner = mapping("proof.proof", inner)?;
        let point = inner.get("a").ok_or_else(|| FunctionError::missing("proof.proof.a"))?;
        let point = point
            .as_sequence()
            .ok_or_else(|| FunctionError::wrong_type("proof.proof.a", ValueKind::Sequence, point))?;

        if point.len() != PLACEHOLDER_PROOF_POINT.len() {
            return Ok(false);
        }

        for (i, (entry, expected)) in point.iter().zip(PLACEHOLDER_PROOF_POINT).enumerate() {
            if string(&format!("proof.proof.a[{i}]"), entry)? != expected {
                return Ok(false);
            }
        }

        return Ok(true);
    }

    Ok(false)
}

fn is_report_valid(args: &[RuleValue]) -> Result<bool, FunctionError> {
    let report = mapping("report", single(args)?)?;
    Ok(REPORT_FIELDS.iter().all(|field| report.contains_key(*field)))
}

fn is_vp_valid(args: &[RuleValue]) -> Result<bool, FunctionError> {
    let vp = mapping("vp", single(args)?)?;

    let Some(proof) = vp.get("proof") else {
        return Ok(true);
    };

    let proof = mapping("vp.proof", proof)?;
    let value = proof
        .get("proofValue")
        .ok_or_else(|| FunctionError::missing("vp.proof.proofValue"))?;

    Ok(string("vp.proof.proofValue", value)? == PLACEHOLDER_VP_PROOF_VALUE)
}
