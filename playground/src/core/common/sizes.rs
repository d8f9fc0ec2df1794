// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Tuning parameters for stack allocated collections. The rule of thumb is that
//! smaller static allocation sizes are better than larger; when a collection grows
//! past its inline capacity it is [`smallvec::SmallVec::spilled`] on the heap.

use smallvec::SmallVec;

pub const INLINE_VEC_SIZE: usize = 8;

/// Stack allocated vector storage for small collections (line offsets, fragment
/// accumulation). Spills to the heap past [`INLINE_VEC_SIZE`] elements.
pub type InlineVec<T> = SmallVec<[T; INLINE_VEC_SIZE]>;
