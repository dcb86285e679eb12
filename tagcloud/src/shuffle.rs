use std::fmt;
use std::rc::Rc;

use rand::Rng;

use crate::config::CloudConfig;
use crate::seed::seeded_generator;
use crate::tag::Tag;

/// Caller-supplied source of unit draws in `[0, 1)`.
///
/// Using `Rc<dyn Fn>` keeps the config cloneable; stateful generators hold
/// their state in a `Cell` or `RefCell`.
#[derive(Clone)]
pub struct RandomNumberGenerator(Rc<dyn Fn() -> f64>);

impl RandomNumberGenerator {
    pub fn new(generator: impl Fn() -> f64 + 'static) -> Self {
        Self(Rc::new(generator))
    }

    pub fn next_unit(&self) -> f64 {
        (self.0)()
    }
}

impl fmt::Debug for RandomNumberGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RandomNumberGenerator(..)")
    }
}

/// Fisher-Yates shuffle of a copy of `items`, walking from the back.
pub fn shuffle_with<T: Clone>(items: &[T], mut next_unit: impl FnMut() -> f64) -> Vec<T> {
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        // A generator returning exactly 1.0 must still land on `i`.
        let j = ((next_unit() * (i + 1) as f64).floor() as usize).min(i);
        shuffled.swap(i, j);
    }
    shuffled
}

/// Display order for `tags` under `config`. The input is never modified.
///
/// A seed wins over a caller generator, which wins over the thread-local
/// source.
pub fn order(tags: &[Tag], config: &CloudConfig) -> Vec<Tag> {
    if !config.shuffle {
        return tags.to_vec();
    }

    if let Some(seed) = config.active_seed() {
        return shuffle_with(tags, seeded_generator(&seed.to_string()));
    }

    if let Some(generator) = &config.random_number_generator {
        return shuffle_with(tags, || generator.next_unit());
    }

    let mut rng = rand::rng();
    shuffle_with(tags, || rng.random::<f64>())
}
