// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model: markers, interaction modes and viewport state.

pub mod marker;
pub mod mode;
pub mod viewport;
