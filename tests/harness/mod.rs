// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Test harness for contact form abuse simulation.
//!
//! This module provides utilities for driving scripted spam and bot
//! submissions through the form guard and tallying how they end.

pub mod attacks;
pub mod generators;
pub mod metrics;
