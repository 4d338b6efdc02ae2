// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Property discovery for node schemas
//!
//! Two strategies are available:
//! - `MetadataDiscovery` - asks the store's metadata procedure for property
//!   names and types, without scanning data
//! - `SamplingDiscovery` - reads a bounded number of matching nodes and
//!   types each property from the first value seen
//!
//! The service runs the metadata path first and samples only when the
//! procedure is not installed.

pub mod metadata;
pub mod sampling;

pub use metadata::MetadataDiscovery;
pub use sampling::SamplingDiscovery;
