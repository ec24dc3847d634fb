// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - mesh representation and primitive generators

mod mesh;
mod primitives;

pub use mesh::{Mesh, Triangle, Vertex};
pub use primitives::Primitive;
