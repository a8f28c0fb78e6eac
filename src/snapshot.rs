#![cfg(feature = "std")]

//! Save and resume a match with bincode.

use std::fs;
use std::path::Path;

use anyhow::Context;

use crate::core::MatchState;

pub fn encode(state: &MatchState) -> anyhow::Result<Vec<u8>> {
    bincode::serialize(state).context("encoding match snapshot")
}

pub fn decode(bytes: &[u8]) -> anyhow::Result<MatchState> {
    bincode::deserialize(bytes).context("decoding match snapshot")
}

pub fn save(state: &MatchState, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let path = path.as_ref();
    let bytes = encode(state)?;
    fs::write(path, bytes).with_context(|| format!("writing snapshot to {}", path.display()))
}

pub fn load(path: impl AsRef<Path>) -> anyhow::Result<MatchState> {
    let path = path.as_ref();
    let bytes = fs::read(path).with_context(|| format!("reading snapshot from {}", path.display()))?;
    decode(&bytes)
}
