use crate::decomposition::Hull;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Host-side factory materializing one collidable output object per hull.
///
/// This is the boundary with the host's physics or scene layer; the output
/// objects are opaque to this crate and only flow back in for destruction.
pub trait OutputFactory {
    /// Opaque handle to one materialized output object.
    type Output;
    /// Host failure reported by [`materialize`](Self::materialize).
    type Error: fmt::Display;

    /// Produces and attaches one output object for `hull`.
    fn materialize(&mut self, hull: &Hull) -> Result<Self::Output, Self::Error>;

    /// Destroys a previously materialized object.
    fn destroy(&mut self, output: Self::Output);
}

/// Tracks the generated output set per source and guarantees that repeated
/// runs replace rather than accumulate.
///
/// The recorded sets are mutated exclusively through this type; there is no
/// process-wide state. For any key the recorded set is always either fully
/// the old output or fully the new output, never a mix.
pub struct OutputLifecycleManager<K, F: OutputFactory> {
    outputs: HashMap<K, Vec<F::Output>>,
}

impl<K: Eq + Hash, F: OutputFactory> OutputLifecycleManager<K, F> {
    /// Creates a manager with no recorded output.
    pub fn new() -> OutputLifecycleManager<K, F> {
        OutputLifecycleManager {
            outputs: HashMap::new(),
        }
    }

    /// Replaces the output set recorded under `key` with one object per
    /// hull in `hulls`.
    ///
    /// The previous set is destroyed in full before the first new object is
    /// created, so old and new output never coexist. If the factory fails
    /// mid-loop the partially built set is torn down again and the key is
    /// left empty; the host error is returned unchanged.
    pub fn replace(
        &mut self,
        factory: &mut F,
        key: K,
        hulls: &[Hull],
    ) -> Result<usize, F::Error> {
        let _ = self.clear(factory, &key);

        let mut fresh = Vec::with_capacity(hulls.len());
        for hull in hulls {
            match factory.materialize(hull) {
                Ok(output) => fresh.push(output),
                Err(err) => {
                    for output in fresh {
                        factory.destroy(output);
                    }
                    return Err(err);
                }
            }
        }

        let count = fresh.len();
        let _ = self.outputs.insert(key, fresh);
        Ok(count)
    }

    /// Destroys every output recorded under `key` and forgets the key.
    /// Returns the number of destroyed objects.
    pub fn clear(&mut self, factory: &mut F, key: &K) -> usize {
        match self.outputs.remove(key) {
            Some(outputs) => {
                let count = outputs.len();
                for output in outputs {
                    factory.destroy(output);
                }
                count
            }
            None => 0,
        }
    }

    /// Destroys every recorded output for every key. Returns the number of
    /// destroyed objects.
    pub fn clear_all(&mut self, factory: &mut F) -> usize {
        let mut destroyed = 0;
        for (_, outputs) in self.outputs.drain() {
            destroyed += outputs.len();
            for output in outputs {
                factory.destroy(output);
            }
        }
        destroyed
    }

    /// Number of output objects currently recorded under `key`.
    pub fn count(&self, key: &K) -> usize {
        self.outputs.get(key).map_or(0, Vec::len)
    }
}

impl<K: Eq + Hash, F: OutputFactory> Default for OutputLifecycleManager<K, F> {
    fn default() -> OutputLifecycleManager<K, F> {
        OutputLifecycleManager::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{OutputFactory, OutputLifecycleManager};
    use crate::decomposition::Hull;
    use crate::math::Point;
    use std::collections::HashSet;

    /// Hands out sequential ids and remembers which are still alive.
    struct RecordingFactory {
        next_id: u32,
        live: HashSet<u32>,
        fail_at: Option<u32>,
    }

    impl RecordingFactory {
        fn new() -> RecordingFactory {
            RecordingFactory {
                next_id: 0,
                live: HashSet::new(),
                fail_at: None,
            }
        }
    }

    impl OutputFactory for RecordingFactory {
        type Output = u32;
        type Error = String;

        fn materialize(&mut self, _hull: &Hull) -> Result<u32, String> {
            if self.fail_at == Some(self.next_id) {
                return Err(format!("host refused object {}", self.next_id));
            }
            let id = self.next_id;
            self.next_id += 1;
            let _ = self.live.insert(id);
            Ok(id)
        }

        fn destroy(&mut self, output: u32) {
            assert!(self.live.remove(&output), "double destroy of {}", output);
        }
    }

    fn hulls(n: usize) -> Vec<Hull> {
        let vertices = vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
        ];
        (0..n)
            .map(|_| Hull::new(vertices.clone(), vec![[0, 1, 2]]))
            .collect()
    }

    #[test]
    fn replace_twice_leaves_only_the_second_set() {
        let mut factory = RecordingFactory::new();
        let mut manager = OutputLifecycleManager::new();

        assert_eq!(manager.replace(&mut factory, "crate", &hulls(3)), Ok(3));
        assert_eq!(manager.count(&"crate"), 3);

        assert_eq!(manager.replace(&mut factory, "crate", &hulls(2)), Ok(2));
        assert_eq!(manager.count(&"crate"), 2);

        // Nothing from the first run survives; ids 0..3 are all destroyed.
        assert_eq!(factory.live, HashSet::from([3, 4]));
    }

    #[test]
    fn keys_are_independent() {
        let mut factory = RecordingFactory::new();
        let mut manager = OutputLifecycleManager::new();

        let _ = manager.replace(&mut factory, "a", &hulls(2)).unwrap();
        let _ = manager.replace(&mut factory, "b", &hulls(1)).unwrap();
        assert_eq!(manager.clear(&mut factory, &"a"), 2);
        assert_eq!(manager.count(&"a"), 0);
        assert_eq!(manager.count(&"b"), 1);
    }

    #[test]
    fn factory_failure_restores_the_empty_state() {
        let mut factory = RecordingFactory::new();
        let mut manager = OutputLifecycleManager::new();

        let _ = manager.replace(&mut factory, "crate", &hulls(2)).unwrap();

        // The fourth materialization (id 3) fails; the old set must already
        // be gone and the new partial set must be torn down again.
        factory.fail_at = Some(3);
        let err = manager
            .replace(&mut factory, "crate", &hulls(4))
            .unwrap_err();
        assert!(err.contains("host refused"));
        assert_eq!(manager.count(&"crate"), 0);
        assert!(factory.live.is_empty());
    }

    #[test]
    fn clear_all_empties_every_key() {
        let mut factory = RecordingFactory::new();
        let mut manager = OutputLifecycleManager::new();

        let _ = manager.replace(&mut factory, 1u64, &hulls(2)).unwrap();
        let _ = manager.replace(&mut factory, 2u64, &hulls(3)).unwrap();
        assert_eq!(manager.clear_all(&mut factory), 5);
        assert!(factory.live.is_empty());
        assert_eq!(manager.count(&1), 0);
    }
}
