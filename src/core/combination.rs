//! Combination generator
//!
//! Enumerates the Cartesian product of every parameter's variants. Earlier
//! declared parameters form the outer loops and the last declared parameter
//! varies fastest, exactly like nested `for` loops written in declaration
//! order.

use crate::config::sweep::{ParameterSet, ParameterSpec};
use crate::domain::errors::SweepError;
use crate::domain::result::Result;
use crate::domain::value::ParameterValue;
use std::fmt;
use std::iter::FusedIterator;
use std::sync::Arc;

/// One assignment of a single value to every swept parameter
///
/// Stores the chosen variant index per parameter and shares the originating
/// parameter set, so token and grouping lookups need no back-reference into
/// the configuration.
#[derive(Debug, Clone)]
pub struct Combination {
    index: usize,
    parameters: Arc<ParameterSet>,
    choice: Vec<usize>,
}

impl Combination {
    /// Position of this combination in generator order (0-based)
    pub fn index(&self) -> usize {
        self.index
    }

    /// The parameter set this combination was drawn from
    pub fn parameters(&self) -> &ParameterSet {
        &self.parameters
    }

    /// Value assigned to `name`, if it is a swept parameter
    pub fn value(&self, name: &str) -> Option<&ParameterValue> {
        let (position, spec) = self.parameters.get_full(name)?;
        spec.variants.get(self.choice[position])
    }

    /// Value of the parameter at declaration `position`
    pub fn value_at(&self, position: usize) -> Option<&ParameterValue> {
        let spec = self.parameters.get_index(position)?;
        spec.variants.get(*self.choice.get(position)?)
    }

    /// `(spec, value)` pairs in declaration order
    pub fn assignments(&self) -> impl Iterator<Item = (&ParameterSpec, &ParameterValue)> + '_ {
        self.parameters
            .iter()
            .zip(&self.choice)
            .map(|(spec, &variant)| (spec, &spec.variants[variant]))
    }

    /// True for the single combination of a sweep without parameters
    pub fn is_empty(&self) -> bool {
        self.choice.is_empty()
    }
}

impl fmt::Display for Combination {
    /// `Size=2, Color=red`, or `(no parameters)`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("(no parameters)");
        }
        let mut first = true;
        for (spec, value) in self.assignments() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", spec.name, value)?;
            first = false;
        }
        Ok(())
    }
}

/// Produces the combinations of a parameter set
///
/// The generator holds no iteration state; every call to [`iter`](Self::iter)
/// starts a fresh, identical sequence.
#[derive(Debug, Clone)]
pub struct CombinationGenerator {
    parameters: Arc<ParameterSet>,
    total: usize,
}

impl CombinationGenerator {
    /// Creates a generator
    ///
    /// # Errors
    ///
    /// Returns `SweepError::Configuration` if a parameter has no variants or
    /// the combination count overflows `usize`
    pub fn new(parameters: Arc<ParameterSet>) -> Result<Self> {
        if let Some(spec) = parameters.iter().find(|spec| spec.variants.is_empty()) {
            return Err(SweepError::Configuration(format!(
                "Parameter '{}' must have at least one variant",
                spec.name
            )));
        }
        let total = parameters.combination_count().ok_or_else(|| {
            SweepError::Configuration("Too many parameter combinations to enumerate".to_string())
        })?;
        Ok(Self { parameters, total })
    }

    /// Number of combinations; 1 when there are no parameters
    pub fn total(&self) -> usize {
        self.total
    }

    /// Shared parameter set
    pub fn parameters(&self) -> &Arc<ParameterSet> {
        &self.parameters
    }

    /// Combination at `index` in generator order
    pub fn nth_combination(&self, index: usize) -> Option<Combination> {
        if index >= self.total {
            return None;
        }
        let mut choice = vec![0; self.parameters.len()];
        let mut remainder = index;
        for (position, spec) in self.parameters.iter().enumerate().rev() {
            let radix = spec.variants.len();
            choice[position] = remainder % radix;
            remainder /= radix;
        }
        Some(Combination {
            index,
            parameters: Arc::clone(&self.parameters),
            choice,
        })
    }

    /// Iterates all combinations in generator order
    pub fn iter(&self) -> Combinations {
        Combinations {
            parameters: Arc::clone(&self.parameters),
            next: Some(vec![0; self.parameters.len()]),
            index: 0,
            total: self.total,
        }
    }
}

impl IntoIterator for &CombinationGenerator {
    type Item = Combination;
    type IntoIter = Combinations;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over combinations, rightmost parameter fastest
#[derive(Debug, Clone)]
pub struct Combinations {
    parameters: Arc<ParameterSet>,
    next: Option<Vec<usize>>,
    index: usize,
    total: usize,
}

impl Combinations {
    /// Advances `choice` like an odometer; `false` once it wraps around
    fn advance(parameters: &ParameterSet, choice: &mut [usize]) -> bool {
        for position in (0..choice.len()).rev() {
            let radix = parameters
                .get_index(position)
                .map_or(1, |spec| spec.variants.len());
            choice[position] += 1;
            if choice[position] < radix {
                return true;
            }
            choice[position] = 0;
        }
        false
    }
}

impl Iterator for Combinations {
    type Item = Combination;

    fn next(&mut self) -> Option<Self::Item> {
        let choice = self.next.take()?;

        let mut following = choice.clone();
        if Self::advance(&self.parameters, &mut following) {
            self.next = Some(following);
        }

        let combination = Combination {
            index: self.index,
            parameters: Arc::clone(&self.parameters),
            choice,
        };
        self.index += 1;
        Some(combination)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.next.is_some() {
            self.total - self.index
        } else {
            0
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Combinations {}

impl FusedIterator for Combinations {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::ParameterName;

    fn spec(name: &str, variants: Vec<ParameterValue>) -> ParameterSpec {
        ParameterSpec::new(ParameterName::new(name).unwrap(), variants)
    }

    fn ints(values: &[i64]) -> Vec<ParameterValue> {
        values.iter().copied().map(ParameterValue::Integer).collect()
    }

    fn generator(specs: Vec<ParameterSpec>) -> CombinationGenerator {
        let set = ParameterSet::from_specs(specs).unwrap();
        CombinationGenerator::new(Arc::new(set)).unwrap()
    }

    fn rendered(generator: &CombinationGenerator) -> Vec<String> {
        generator.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_zero_parameters_yield_one_empty_combination() {
        let generator = generator(Vec::new());
        assert_eq!(generator.total(), 1);

        let all: Vec<Combination> = generator.iter().collect();
        assert_eq!(all.len(), 1);
        assert!(all[0].is_empty());
        assert_eq!(all[0].to_string(), "(no parameters)");
    }

    #[test]
    fn test_count_is_product_of_variant_lengths() {
        let generator = generator(vec![
            spec("A", ints(&[1, 2, 3])),
            spec("B", ints(&[1, 2])),
            spec("C", ints(&[7, 8, 9, 10])),
        ]);
        assert_eq!(generator.total(), 24);
        assert_eq!(generator.iter().len(), 24);
        assert_eq!(generator.iter().count(), 24);
    }

    #[test]
    fn test_last_declared_parameter_varies_fastest() {
        let generator = generator(vec![
            spec("COLUMNS", ints(&[1, 2])),
            spec("ROWS", ints(&[1, 2, 3])),
        ]);

        assert_eq!(
            rendered(&generator),
            vec![
                "COLUMNS=1, ROWS=1",
                "COLUMNS=1, ROWS=2",
                "COLUMNS=1, ROWS=3",
                "COLUMNS=2, ROWS=1",
                "COLUMNS=2, ROWS=2",
                "COLUMNS=2, ROWS=3",
            ]
        );
    }

    #[test]
    fn test_variant_order_is_preserved() {
        let generator = generator(vec![spec("Size", ints(&[9, 3, 5]))]);
        assert_eq!(rendered(&generator), vec!["Size=9", "Size=3", "Size=5"]);
    }

    #[test]
    fn test_iteration_is_restartable() {
        let generator = generator(vec![
            spec("A", ints(&[1, 2])),
            spec("B", vec!["x".into(), "y".into()]),
        ]);
        assert_eq!(rendered(&generator), rendered(&generator));
    }

    #[test]
    fn test_nth_matches_iteration_order() {
        let generator = generator(vec![
            spec("A", ints(&[1, 2, 3])),
            spec("B", ints(&[4, 5])),
            spec("C", ints(&[6, 7])),
        ]);

        for (position, combination) in generator.iter().enumerate() {
            let nth = generator.nth_combination(position).unwrap();
            assert_eq!(nth.index(), position);
            assert_eq!(nth.to_string(), combination.to_string());
        }
        assert!(generator.nth_combination(generator.total()).is_none());
    }

    #[test]
    fn test_value_lookup() {
        let generator = generator(vec![
            spec("Size", ints(&[2, 3])),
            spec("Finish", vec!["matte".into()]),
        ]);
        let second = generator.nth_combination(1).unwrap();
        assert_eq!(second.value("Size"), Some(&ParameterValue::Integer(3)));
        assert_eq!(
            second.value("Finish"),
            Some(&ParameterValue::Text("matte".to_string()))
        );
        assert_eq!(second.value("Missing"), None);
    }

    #[test]
    fn test_iterator_is_fused() {
        let generator = generator(vec![spec("A", ints(&[1]))]);
        let mut iter = generator.iter();
        assert!(iter.next().is_some());
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
        assert_eq!(iter.len(), 0);
    }

    #[test]
    fn test_empty_variants_rejected() {
        let set = ParameterSet::from_specs(vec![spec("A", Vec::new())]).unwrap();
        assert!(CombinationGenerator::new(Arc::new(set)).is_err());
    }
}
