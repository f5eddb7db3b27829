//! Browser dashboard and terminal client for the AITU timetable generator.
//!
//! The page behavior (drop zones, live charts, navigation, the generate flow
//! and fitness interpretation) lives in platform-independent modules driven
//! through small view traits. The `web` module binds them to the DOM when
//! built for `wasm32`; native builds add the dev server, the terminal client
//! and the activity log.

pub mod charts;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod metrics;
pub mod trimester;
pub mod ui;

#[cfg(not(target_arch = "wasm32"))]
pub mod activity;
#[cfg(not(target_arch = "wasm32"))]
pub mod cli;
#[cfg(not(target_arch = "wasm32"))]
pub mod client;
#[cfg(not(target_arch = "wasm32"))]
pub mod server;

#[cfg(target_arch = "wasm32")]
pub mod web;
