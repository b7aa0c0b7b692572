// Copyright (c) 2025 Unfolded Circle ApS, Markus Zehnder <markus.z@unfoldedcircle.com>
// SPDX-License-Identifier: MPL-2.0

#![forbid(non_ascii_idents)]
#![deny(unsafe_code)]

pub mod client;
pub mod configuration;
pub mod dispatch;
pub mod errors;
pub mod server;
pub mod startup;

pub use startup::*;
