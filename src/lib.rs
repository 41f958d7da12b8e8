#![cfg_attr(not(test), no_std)]

//! Separate-chaining hash bucket.
//!
//! A [`Bucket`] is the keyed singly-linked chain a separate-chaining hash
//! table keeps at each slot: every entry whose key hashed to that slot lives
//! on the chain. Besides the usual insert/lookup/remove surface, the bucket
//! counts the key comparisons ("probes") its lookups perform, which the
//! owning table reads to judge how evenly its hash function spreads keys.
//!
//! The bucket is single-threaded by design. The owning table is responsible
//! for any cross-slot coordination and must serialize access to each bucket.

extern crate alloc;

pub mod bucket;

pub use bucket::Bucket;

#[cfg(test)]
mod proptests;
