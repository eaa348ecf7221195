//! Application use cases / pipeline logic

pub mod digest;
pub mod interaction;

pub use digest::{DigestConfig, DigestUseCase, build_digest};
pub use interaction::{
    InteractionConfig, InteractionError, InteractionLoop, LoopOutcome, LoopReport, LoopState,
};
