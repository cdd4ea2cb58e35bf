//! Fixed-capacity collections with inline storage.
//!
//! This crate provides a double-ended queue ([`Deque`]), a vector ([`Vec`])
//! and a type-erased callable slot ([`Function`]) which keep all of their
//! storage inline and never allocate. Each owned type is parameterized by
//! its capacity and can be borrowed as a capacity-independent view
//! ([`DequeView`], [`VecView`], [`FunctionView`]), so that collections of
//! different capacities can be assigned, compared and swapped.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

#[doc = include_str!("../README.md")]
#[cfg(doctest)]
struct _ReadmeDoctests;

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod deque;

pub(crate) mod error;

pub mod function;

pub mod storage;

pub mod vec;

pub use self::{
    deque::{Deque, DequeView},
    error::{StorageError, UpdateError},
    function::{Function, FunctionView},
    vec::{Vec, VecView},
};
