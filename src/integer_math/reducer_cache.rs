// src/integer_math/reducer_cache.rs

use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use crate::error::MathResult;
use crate::integer_math::barrett::BarrettReducer;
use crate::integer_math::mod_pow::Reducer;
use crate::integer_math::montgomery::MontgomeryReducer;
use crate::integer_math::mul_mod::SafeMulMod;
use log::debug;

/// A constructed reduction context for one modulus, chosen by the modulus
/// magnitude and parity: Montgomery for odd sub-2^31 moduli, Barrett for the
/// remaining sub-2^31 moduli, doubling multiplication otherwise.
#[derive(Debug, Clone)]
pub enum FixedReducer {
    Barrett(BarrettReducer),
    Montgomery(MontgomeryReducer),
    Doubling(SafeMulMod),
}

impl FixedReducer {
    pub fn for_modulus(modulus: u64) -> MathResult<Self> {
        if modulus < 1 << 31 {
            if modulus & 1 == 1 {
                return Ok(FixedReducer::Montgomery(MontgomeryReducer::new(modulus)?));
            }
            return Ok(FixedReducer::Barrett(BarrettReducer::new(modulus)?));
        }
        Ok(FixedReducer::Doubling(SafeMulMod::new(modulus)?))
    }
}

impl Reducer for FixedReducer {
    fn modulus(&self) -> u64 {
        match self {
            FixedReducer::Barrett(r) => r.modulus(),
            FixedReducer::Montgomery(r) => r.modulus(),
            FixedReducer::Doubling(r) => r.modulus(),
        }
    }

    fn mul_mod(&self, a: u64, b: u64) -> u64 {
        match self {
            FixedReducer::Barrett(r) => r.mul_mod(a, b),
            FixedReducer::Montgomery(r) => r.mul_mod(a, b),
            FixedReducer::Doubling(r) => r.mul_mod(a, b),
        }
    }
}

/// Caller-owned cache of reduction contexts keyed by modulus, so repeated
/// fixed-modulus work does not pay reconstruction on every call.
///
/// Eviction is oldest-first once the capacity is reached; a reducer is
/// cheaply reconstructible from its modulus, so the policy is not critical.
/// The cache itself is single-threaded; wrap it in a mutex to share it.
#[derive(Debug)]
pub struct ReducerCache {
    capacity: usize,
    insertion_order: VecDeque<u64>,
    entries: HashMap<u64, Rc<FixedReducer>>,
}

impl ReducerCache {
    pub fn with_capacity(capacity: usize) -> Self {
        ReducerCache {
            capacity: capacity.max(1),
            insertion_order: VecDeque::new(),
            entries: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the cached reducer for `modulus`, constructing and caching it
    /// on a miss. Construction errors (zero or oversized modulus) propagate.
    pub fn get_or_insert(&mut self, modulus: u64) -> MathResult<Rc<FixedReducer>> {
        if let Some(reducer) = self.entries.get(&modulus) {
            return Ok(Rc::clone(reducer));
        }
        let reducer = Rc::new(FixedReducer::for_modulus(modulus)?);
        if self.entries.len() == self.capacity {
            if let Some(evicted) = self.insertion_order.pop_front() {
                self.entries.remove(&evicted);
                debug!("reducer cache full, evicted modulus {}", evicted);
            }
        }
        self.insertion_order.push_back(modulus);
        self.entries.insert(modulus, Rc::clone(&reducer));
        Ok(reducer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integer_math::mod_pow::pow_with;

    #[test]
    fn test_reducer_selection_by_parity_and_size() {
        assert!(matches!(
            FixedReducer::for_modulus(998_244_353).unwrap(),
            FixedReducer::Montgomery(_)
        ));
        assert!(matches!(
            FixedReducer::for_modulus(1_000_000_006).unwrap(),
            FixedReducer::Barrett(_)
        ));
        assert!(matches!(
            FixedReducer::for_modulus(1u64 << 40).unwrap(),
            FixedReducer::Doubling(_)
        ));
        assert!(FixedReducer::for_modulus(0).is_err());
    }

    #[test]
    fn test_cache_hit_returns_same_context() {
        let mut cache = ReducerCache::with_capacity(4);
        let first = cache.get_or_insert(97).unwrap();
        let second = cache.get_or_insert(97).unwrap();
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_evicts_oldest_entry() {
        let mut cache = ReducerCache::with_capacity(2);
        cache.get_or_insert(3).unwrap();
        cache.get_or_insert(5).unwrap();
        cache.get_or_insert(7).unwrap();
        assert_eq!(cache.len(), 2);
        // 3 was evicted; a fresh lookup reconstructs it
        let again = cache.get_or_insert(3).unwrap();
        assert_eq!(again.modulus(), 3);
    }

    #[test]
    fn test_cached_reducers_compute_correctly() {
        let mut cache = ReducerCache::with_capacity(8);
        for &m in &[97u64, 98, 998_244_353, (1 << 61) - 1] {
            let reducer = cache.get_or_insert(m).unwrap();
            assert_eq!(pow_with(2, 10, reducer.as_ref()), 1024 % m);
        }
    }
}
