use std::{
    collections::{HashMap, VecDeque},
    num::NonZeroUsize,
    rc::Rc,
};

use log::debug;

use crate::{GenerationParams, Result, SampleDataset, params::CacheKey};

/// Hit and miss counters of a `DatasetCache`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub evictions: usize,
}

/// Memoizes generated datasets by the exact parameters they came from.
///
/// Bounded caches evict the oldest inserted entry first.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<CacheKey, Rc<SampleDataset>>,
    order: VecDeque<CacheKey>,
    capacity: Option<NonZeroUsize>,
    stats: CacheStats,
}

impl DatasetCache {
    /// Creates a new `DatasetCache` that never evicts.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Creates a new `DatasetCache` holding at most `capacity` datasets.
    pub fn bounded(capacity: NonZeroUsize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn get(&self, params: &GenerationParams) -> Option<Rc<SampleDataset>> {
        self.entries.get(&params.key()).cloned()
    }

    /// Returns the dataset cached for `params`, running `generate` on a miss.
    ///
    /// # Arguments
    /// * `params` - The key of the dataset.
    /// * `generate` - Builds the dataset on a miss.
    ///
    /// # Returns
    /// The error of `generate`, in which case nothing is cached.
    pub fn get_or_try_insert_with<F>(
        &mut self,
        params: &GenerationParams,
        generate: F,
    ) -> Result<Rc<SampleDataset>>
    where
        F: FnOnce(&GenerationParams) -> Result<SampleDataset>,
    {
        let key = params.key();
        if let Some(dataset) = self.entries.get(&key) {
            self.stats.hits += 1;
            debug!("dataset cache hit for {params:?}");
            return Ok(Rc::clone(dataset));
        }

        self.stats.misses += 1;
        debug!("dataset cache miss for {params:?}");

        let dataset = Rc::new(generate(params)?);
        self.insert(key, Rc::clone(&dataset));
        Ok(dataset)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    fn insert(&mut self, key: CacheKey, dataset: Rc<SampleDataset>) {
        if let Some(capacity) = self.capacity {
            while self.entries.len() >= capacity.get() {
                let Some(oldest) = self.order.pop_front() else {
                    break;
                };

                self.entries.remove(&oldest);
                self.stats.evictions += 1;
            }
        }

        self.entries.insert(key, dataset);
        self.order.push_back(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DataGenerator, RegressionErr};

    fn params(n_points: usize) -> GenerationParams {
        GenerationParams::new(2.0, 1.0, 1.0, n_points).unwrap()
    }

    #[test]
    fn hit_returns_the_same_dataset() {
        let generator = DataGenerator::from_os_rng();
        let mut cache = DatasetCache::unbounded();

        let a = cache
            .get_or_try_insert_with(&params(10), |p| generator.generate(p))
            .unwrap();
        let b = cache
            .get_or_try_insert_with(&params(10), |p| generator.generate(p))
            .unwrap();

        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                evictions: 0
            }
        );
    }

    #[test]
    fn different_params_miss() {
        let generator = DataGenerator::seeded(1);
        let mut cache = DatasetCache::unbounded();

        for n in [10, 20, 30] {
            cache
                .get_or_try_insert_with(&params(n), |p| generator.generate(p))
                .unwrap();
        }

        assert_eq!(cache.len(), 3);
        assert_eq!(cache.stats().misses, 3);
        assert_eq!(cache.get(&params(20)).unwrap().len(), 20);
    }

    #[test]
    fn failures_are_not_cached() {
        let mut cache = DatasetCache::unbounded();

        let err = cache
            .get_or_try_insert_with(&params(10), |_| {
                Err(RegressionErr::invalid("n_points", "nope"))
            })
            .unwrap_err();

        assert!(err.is_invalid_parameter());
        assert!(cache.is_empty());
    }

    #[test]
    fn bounded_evicts_oldest_first() {
        let generator = DataGenerator::seeded(1);
        let mut cache = DatasetCache::bounded(NonZeroUsize::new(2).unwrap());

        for n in [10, 20, 30] {
            cache
                .get_or_try_insert_with(&params(n), |p| generator.generate(p))
                .unwrap();
        }

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().evictions, 1);
        assert!(cache.get(&params(10)).is_none());
        assert!(cache.get(&params(20)).is_some());
        assert!(cache.get(&params(30)).is_some());
    }

    #[test]
    fn clear_empties_the_cache() {
        let generator = DataGenerator::seeded(1);
        let mut cache = DatasetCache::unbounded();
        cache
            .get_or_try_insert_with(&params(10), |p| generator.generate(p))
            .unwrap();

        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get(&params(10)).is_none());
    }
}
