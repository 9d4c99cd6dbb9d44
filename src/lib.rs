//! Client SDK for the motiondevelopment.top bot-listing API.
//!
//! Three independent wrappers around the listing service's REST API:
//! - [`AutoPoster`] — reports the bot's guild count on a fixed schedule and
//!   once when the connection signals ready
//! - [`VoteChecker`] — looks up whether a user has voted for the bot
//! - [`InfoFetcher`] — retrieves the bot's listing record
//!
//! Each component is constructed from a [`MotionConfig`] and performs its
//! own requests; there is no shared scheduler or state between them.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

mod api;
mod config;
mod error;
mod info;
mod poster;
mod types;
mod update;
mod votes;

pub use config::MotionConfig;
pub use error::{filter_api_errors, MotionError, MotionResult};
pub use info::InfoFetcher;
pub use poster::{AutoPoster, BotSession};
pub use types::{BotInfo, CoOwner, CoOwnerPayload};
pub use update::check_for_updates;
pub use votes::VoteChecker;
