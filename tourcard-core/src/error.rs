//! Error type shared by the engine crates
//!
//! Only caller bugs surface here. Bad domain data (unparseable strokes,
//! missing hole specs, empty fields) is absorbed by the scoring code.

use crate::model::{GroupId, PlayerId, RoundId};

/// Errors signalled to the caller of the engine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("unknown round: {0}")]
    UnknownRound(RoundId),

    #[error("unknown player: {0}")]
    UnknownPlayer(PlayerId),

    #[error("unknown group: {0}")]
    UnknownGroup(GroupId),

    #[error("incomplete round history: expected round {expected}, found round {found}")]
    MissingRoundHistory { expected: u32, found: u32 },

    #[error("invalid snapshot: {0}")]
    Snapshot(String),

    #[error("io error: {0}")]
    Io(String),
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Snapshot(err.to_string())
    }
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result alias used throughout the engine
pub type Result<T> = std::result::Result<T, EngineError>;
