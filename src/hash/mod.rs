//! Type-aware routing hashes.
//!
//! [`ShardKey`] maps a key to the 32-bit value the
//! [`KeyRouter`](crate::ds::KeyRouter) reduces modulo the shard count. Common
//! key types get a direct computation over their bits or bytes; everything
//! else streams its [`Hash`] output through a pooled FNV-1a hasher.
//!
//! ## Dispatch
//!
//! ```text
//!   key.shard_hash()
//!       │
//!       ├── u8/u16/u32/i8/i16/i32/char/bool ── bit pattern as u32
//!       ├── u64/i64/usize/isize ────────────── lo32 ^ hi32
//!       ├── u128/i128 ──────────────────────── xor of the four 32-bit lanes
//!       ├── str/String (+ smart pointers) ──── h = h * 31 + byte
//!       └── anything else ──────────────────── Hash ─► pooled FNV-1a
//! ```
//!
//! No fast path formats or boxes the key. Dispatch is static, so a key type
//! pays only for the path it selects.
//!
//! ## Custom keys
//!
//! An empty impl opts a type into the generic path:
//!
//! ```
//! use shardkit::hash::ShardKey;
//!
//! #[derive(Hash, PartialEq, Eq, Clone)]
//! struct UserId {
//!     tenant: u16,
//!     id: u64,
//! }
//!
//! impl ShardKey for UserId {}
//!
//! let key = UserId { tenant: 7, id: 42 };
//! assert_eq!(key.shard_hash(), key.clone().shard_hash());
//! ```

pub mod fnv;
pub mod pool;

use std::borrow::Cow;
use std::hash::Hash;
use std::rc::Rc;
use std::sync::Arc;

pub use fnv::Fnv1aHasher;
pub use pool::{HasherPool, PooledHasher};

/// A key that can be routed to a shard.
///
/// The provided method hashes through [`hash_generic`]; primitive and string
/// impls override it with allocation-free fast paths.
///
/// # Borrowed lookups
///
/// `set` routes by `K::shard_hash`, while `get`, `peek`, `contains` and
/// `remove` route by the hash of the borrowed form `Q` they are called with.
/// If `K: Borrow<Q>`, then `k.shard_hash()` must equal `k.borrow().shard_hash()`
/// for every key, the same contract [`Borrow`](std::borrow::Borrow) places on
/// `Hash`. Otherwise lookups go to a different shard and miss.
///
/// A newtype that borrows as an inner type should forward to it rather than
/// take the generic path:
///
/// ```
/// use std::borrow::Borrow;
/// use shardkit::hash::ShardKey;
///
/// #[derive(Hash, PartialEq, Eq, Clone)]
/// struct OrderId(u64);
///
/// impl Borrow<u64> for OrderId {
///     fn borrow(&self) -> &u64 {
///         &self.0
///     }
/// }
///
/// impl ShardKey for OrderId {
///     fn shard_hash(&self) -> u32 {
///         self.0.shard_hash()
///     }
/// }
///
/// let id = OrderId(1 << 40 | 9);
/// let inner: &u64 = id.borrow();
/// assert_eq!(id.shard_hash(), inner.shard_hash());
/// ```
pub trait ShardKey: Hash {
    /// Returns the 32-bit routing hash. Must be a pure function of the key's
    /// value so equal keys always land on the same shard.
    #[inline]
    fn shard_hash(&self) -> u32 {
        hash_generic(self)
    }
}

/// Hashes any `Hash` value with a hasher checked out from the global pool.
pub fn hash_generic<T: Hash + ?Sized>(value: &T) -> u32 {
    let mut hasher = HasherPool::global().checkout();
    value.hash(&mut *hasher);
    hasher.finish32()
}

/// Rolling multiplicative string hash.
#[inline]
pub fn hash_str(s: &str) -> u32 {
    s.bytes()
        .fold(0u32, |h, b| h.wrapping_mul(31).wrapping_add(u32::from(b)))
}

#[inline]
fn fold_u64(v: u64) -> u32 {
    (v as u32) ^ ((v >> 32) as u32)
}

#[inline]
fn fold_u128(v: u128) -> u32 {
    fold_u64(v as u64) ^ fold_u64((v >> 64) as u64)
}

macro_rules! impl_shard_key_narrow {
    ($($t:ty),*) => {
        $(
            impl ShardKey for $t {
                #[inline]
                fn shard_hash(&self) -> u32 {
                    *self as u32
                }
            }
        )*
    };
}

macro_rules! impl_shard_key_wide {
    ($($t:ty),*) => {
        $(
            impl ShardKey for $t {
                #[inline]
                fn shard_hash(&self) -> u32 {
                    fold_u64(*self as u64)
                }
            }
        )*
    };
}

impl_shard_key_narrow!(u8, u16, u32, i8, i16, i32);
impl_shard_key_wide!(u64, i64, usize, isize);

impl ShardKey for u128 {
    #[inline]
    fn shard_hash(&self) -> u32 {
        fold_u128(*self)
    }
}

impl ShardKey for i128 {
    #[inline]
    fn shard_hash(&self) -> u32 {
        fold_u128(*self as u128)
    }
}

impl ShardKey for bool {
    #[inline]
    fn shard_hash(&self) -> u32 {
        u32::from(*self)
    }
}

impl ShardKey for char {
    #[inline]
    fn shard_hash(&self) -> u32 {
        u32::from(*self)
    }
}

impl ShardKey for str {
    #[inline]
    fn shard_hash(&self) -> u32 {
        hash_str(self)
    }
}

impl ShardKey for String {
    #[inline]
    fn shard_hash(&self) -> u32 {
        hash_str(self)
    }
}

impl<T: ShardKey + ?Sized> ShardKey for &T {
    #[inline]
    fn shard_hash(&self) -> u32 {
        (**self).shard_hash()
    }
}

impl<T: ShardKey + ?Sized> ShardKey for Box<T> {
    #[inline]
    fn shard_hash(&self) -> u32 {
        (**self).shard_hash()
    }
}

impl<T: ShardKey + ?Sized> ShardKey for Arc<T> {
    #[inline]
    fn shard_hash(&self) -> u32 {
        (**self).shard_hash()
    }
}

impl<T: ShardKey + ?Sized> ShardKey for Rc<T> {
    #[inline]
    fn shard_hash(&self) -> u32 {
        (**self).shard_hash()
    }
}

impl<B: ShardKey + ToOwned + ?Sized> ShardKey for Cow<'_, B> {
    #[inline]
    fn shard_hash(&self) -> u32 {
        (**self).shard_hash()
    }
}

// Generic path.
impl ShardKey for () {}
impl<T: Hash> ShardKey for [T] {}
impl<T: Hash, const N: usize> ShardKey for [T; N] {}
impl<T: Hash> ShardKey for Vec<T> {}
impl<T: Hash> ShardKey for Option<T> {}

macro_rules! impl_shard_key_tuple {
    ($($name:ident),+) => {
        impl<$($name: Hash),+> ShardKey for ($($name,)+) {}
    };
}

impl_shard_key_tuple!(A);
impl_shard_key_tuple!(A, B);
impl_shard_key_tuple!(A, B, C);
impl_shard_key_tuple!(A, B, C, D);
