//! Partitioning of the index set into strata.

use std::collections::HashMap;
use std::hash::Hash;

use crate::error::SplitError;

/// A maximal set of indices sharing one stratification key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stratum<'a, K> {
    /// Position of this stratum in order of first appearance.
    pub ordinal: usize,

    /// One value per grouping column. Empty when no columns were given.
    pub key: Vec<&'a K>,

    /// Member indices, ascending.
    pub indices: Vec<usize>,
}

impl<K> Stratum<'_, K> {
    /// Number of items in the stratum.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns true if the stratum has no items.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Group `0..total_length` by the values of `columns` at each index.
///
/// Without columns the whole range forms a single stratum. Strata come back
/// in order of first appearance; callers must still not rely on that order
/// for anything that ends up in the output.
pub fn stratify<K: Hash + Eq>(
    total_length: usize,
    columns: &[Vec<K>],
) -> Result<Vec<Stratum<'_, K>>, SplitError> {
    for (column, values) in columns.iter().enumerate() {
        if values.len() != total_length {
            return Err(SplitError::ColumnLength {
                column,
                expected: total_length,
                actual: values.len(),
            });
        }
    }

    if columns.is_empty() {
        return Ok(vec![Stratum {
            ordinal: 0,
            key: Vec::new(),
            indices: (0..total_length).collect(),
        }]);
    }

    let mut lookup: HashMap<Vec<&K>, usize> = HashMap::new();
    let mut strata: Vec<Stratum<'_, K>> = Vec::new();

    for index in 0..total_length {
        let key: Vec<&K> = columns.iter().map(|values| &values[index]).collect();

        let slot = match lookup.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = strata.len();
                lookup.insert(key.clone(), slot);
                strata.push(Stratum {
                    ordinal: slot,
                    key,
                    indices: Vec::new(),
                });
                slot
            }
        };

        strata[slot].indices.push(index);
    }

    Ok(strata)
}
