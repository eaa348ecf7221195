//! trendpost adapters crate
//!
//! This crate contains infrastructure adapters implementing the domain ports:
//! - `feed`: HTTP Atom feed source
//! - `llm`: Chat-completion client and offline stub
//! - `linkedin`: LinkedIn Posts API publisher

pub mod feed;
pub mod linkedin;
pub mod llm;
