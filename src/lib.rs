//! arena-bot - A Discord community bot for Pokearena.
//!
//! This crate provides a Discord bot implementation with features including:
//! - Chat time relay: informal clock times are replied to with localized
//!   Discord timestamps, driven by per-user timezone preferences
//! - Vanity "Ally" role automation based on members' custom statuses
//! - Clan welcome announcements
//! - A timezone command family plus small community commands

pub mod bot;
pub mod clan;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;
pub mod timeparse;
pub mod timezone;
pub mod vanity;
