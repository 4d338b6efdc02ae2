// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Cypher type name to field type mapping
//!
//! Type names come from two places: the `propertyTypes` column of the
//! metadata procedure, and the runtime type name of sampled values. Both use
//! the same vocabulary (`Long`, `StringArray`, `InternalPoint2D`, ...).
//! Unknown names map to `String`.

use crate::options::SchemaStrategy;
use crate::types::FieldType;

/// Suffix marking a homogeneous list of the prefixed type
pub const ARRAY_SUFFIX: &str = "Array";

/// Map a Cypher type name to a field type. Never fails.
pub fn map_type(type_name: &str) -> FieldType {
    if let Some(element) = type_name.strip_suffix(ARRAY_SUFFIX) {
        if let Some(scalar) = map_scalar(element) {
            return FieldType::array_of(scalar);
        }
    }
    map_scalar(type_name).unwrap_or(FieldType::String)
}

/// Map a type name under the configured strategy
pub fn map_type_with(type_name: &str, strategy: SchemaStrategy) -> FieldType {
    match strategy {
        SchemaStrategy::Sample => map_type(type_name),
        SchemaStrategy::String => FieldType::String,
    }
}

fn map_scalar(type_name: &str) -> Option<FieldType> {
    let mapped = match type_name {
        "Boolean" => FieldType::Boolean,
        "String" => FieldType::String,
        "Long" => FieldType::Int64,
        "Double" => FieldType::Float64,
        "Point" | "InternalPoint2D" | "InternalPoint3D" => FieldType::Point,
        "LocalDateTime" | "DateTime" | "ZonedDateTime" => FieldType::Timestamp,
        "OffsetTime" | "Time" | "LocalTime" => FieldType::Time,
        "LocalDate" | "Date" => FieldType::Date,
        "Duration" | "InternalIsoDuration" => FieldType::Duration,
        _ => return None,
    };
    Some(mapped)
}
