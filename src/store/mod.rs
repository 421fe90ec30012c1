// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Marker storage: the in-memory list and its persistence.

pub mod marker_store;
pub mod persistence;
