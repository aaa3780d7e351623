//! Hash containers with a fixed, seed-stable hasher.
//!
//! Re-exports *hashbrown* and *foldhash*.

use core::hash::BuildHasher;

use foldhash::fast::{FixedState, FoldHasher};

pub use foldhash;
pub use hashbrown;

const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x6D61_7070_6572_0001);

/// Hash state producing results that only depend on the input.
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use vc_reflect::hash::FixedHashState;
///
/// assert_eq!(FixedHashState.hash_one(7_u32), FixedHashState.hash_one(7_u32));
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FoldHasher<'static>;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

/// A [`hashbrown::HashMap`] using [`FixedHashState`].
pub type HashMap<K, V> = hashbrown::HashMap<K, V, FixedHashState>;
