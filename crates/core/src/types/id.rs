//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing a pet ID with a cart item ID. IDs are opaque strings
//! on the wire; fresh values come from [`IdGenerator`].

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use pawcart_core::define_id;
/// define_id!(OwnerId);
/// define_id!(ListingId);
///
/// let owner = OwnerId::new("1");
/// let listing = ListingId::new("1");
///
/// // These are different types, so this won't compile:
/// // let _: OwnerId = listing;
/// assert_eq!(owner.as_str(), listing.as_str());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(PetId);
define_id!(CartItemId);

/// Issues timestamp-based IDs that never repeat within one generator.
///
/// Values are the current Unix time in milliseconds. When the clock has not
/// moved past the last issued value (two calls in the same millisecond, or
/// the clock stepping backwards), the previous value plus one is issued.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    /// Create a generator that has not issued any IDs yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last: AtomicI64::new(0),
        }
    }

    /// Issue the next raw ID for the given instant.
    ///
    /// Split out from [`Self::next_raw`] so tests can pin the clock.
    pub fn next_raw_at(&self, now: DateTime<Utc>) -> i64 {
        let candidate = now.timestamp_millis();
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let next = if candidate > prev { candidate } else { prev + 1 };
            match self
                .last
                .compare_exchange_weak(prev, next, Ordering::AcqRel, Ordering::Relaxed)
            {
                Ok(_) => return next,
                Err(actual) => prev = actual,
            }
        }
    }

    /// Issue the next raw ID using the system clock.
    pub fn next_raw(&self) -> i64 {
        self.next_raw_at(Utc::now())
    }

    /// Issue a fresh pet ID.
    pub fn pet_id(&self) -> PetId {
        PetId::new(self.next_raw().to_string())
    }

    /// Issue a fresh cart item ID.
    pub fn cart_item_id(&self) -> CartItemId {
        CartItemId::new(self.next_raw().to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_and_serde() {
        let id = PetId::new("1700000000000");
        assert_eq!(id.to_string(), "1700000000000");

        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"1700000000000\"");

        let parsed: PetId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_generator_uses_clock_when_it_advances() {
        let ids = IdGenerator::new();
        let t0 = DateTime::from_timestamp_millis(1_000).unwrap();
        let t1 = DateTime::from_timestamp_millis(2_000).unwrap();

        assert_eq!(ids.next_raw_at(t0), 1_000);
        assert_eq!(ids.next_raw_at(t1), 2_000);
    }

    #[test]
    fn test_generator_same_millisecond_is_unique() {
        let ids = IdGenerator::new();
        let t = DateTime::from_timestamp_millis(5_000).unwrap();

        assert_eq!(ids.next_raw_at(t), 5_000);
        assert_eq!(ids.next_raw_at(t), 5_001);
        assert_eq!(ids.next_raw_at(t), 5_002);
    }

    #[test]
    fn test_generator_clock_going_backwards() {
        let ids = IdGenerator::new();
        let later = DateTime::from_timestamp_millis(9_000).unwrap();
        let earlier = DateTime::from_timestamp_millis(3_000).unwrap();

        assert_eq!(ids.next_raw_at(later), 9_000);
        assert_eq!(ids.next_raw_at(earlier), 9_001);
    }

    #[test]
    fn test_generator_strictly_increasing() {
        let ids = IdGenerator::new();
        let mut prev = ids.next_raw();
        for _ in 0..1_000 {
            let next = ids.next_raw();
            assert!(next > prev);
            prev = next;
        }
    }

    #[test]
    fn test_pet_and_cart_ids_never_collide() {
        let ids = IdGenerator::new();
        let pet = ids.pet_id();
        let item = ids.cart_item_id();
        assert_ne!(pet.as_str(), item.as_str());
    }
}
