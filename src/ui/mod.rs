// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the Pin Map application.

pub mod label_prompt;
pub mod toolbar;
