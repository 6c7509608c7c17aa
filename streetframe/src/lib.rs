//! Streetframe - adjacent street-level panorama discovery
//!
//! Given a subject location and a reference point, this library walks a
//! street-level panorama link graph to find the panoramas lying to the left,
//! right or front of the subject, and plans the image requests that frame a
//! place from those panoramas.
//!
//! - [`coord`]: geographic points and heading arithmetic
//! - [`sector`]: four-quadrant sector classification around a reference axis
//! - [`walker`]: the adjacency walk itself
//! - [`provider`]: panorama and geocoding capabilities, with HTTP, retry and
//!   cache adapters
//! - [`imagery`]: Street View and Static Maps image URLs
//! - [`frames`]: frame-set planning for a place
//! - [`quota`]: usage quota checks
//! - [`config`] and [`logging`]: INI configuration and tracing setup

pub mod config;
pub mod coord;
pub mod frames;
pub mod imagery;
pub mod logging;
pub mod provider;
pub mod quota;
pub mod sector;
pub mod walker;
