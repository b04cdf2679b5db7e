// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Presentation Layer (`cuboid-service-core`)
//!
//! HTTP surface that translates JSON requests into application service
//! calls. Business rules live in `crate::application` and `crate::domain`.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`api`] | Axum router and handlers for `/cuboids`, `/bags` and `/health` |
//! | [`dto`] | Request and response bodies |
//! | [`error`] | Error responses and the validating JSON extractor |

pub mod api;
pub mod dto;
pub mod error;
