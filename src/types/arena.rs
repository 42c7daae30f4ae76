// src/types/arena.rs

use crate::error::InputError;
use crate::types::{FeatureId, LineFeature};

/// Arena aller Linien eines Laufs, aufsteigend nach ID sortiert.
///
/// Die Iterationsreihenfolge ist Teil des Vertrags: Kettenbau, Kreuzungsprüfung und
/// Fehlerreihenfolge hängen davon ab. Sie wird hier festgelegt und nicht der
/// Reihenfolge irgendeines Containers überlassen.
#[derive(Debug, Clone)]
pub struct FeatureArena {
    records: Vec<LineFeature>,
}

impl FeatureArena {
    pub fn new(features: impl IntoIterator<Item = LineFeature>) -> Result<Self, InputError> {
        let mut records: Vec<LineFeature> = features.into_iter().collect();
        if records.is_empty() {
            return Err(InputError::EmptyLayer);
        }
        records.sort_by_key(|f| f.id());

        if let Some(pair) = records.windows(2).find(|pair| pair[0].id() == pair[1].id()) {
            return Err(InputError::DuplicateFeatureId { id: pair[0].id() });
        }

        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iteriert in aufsteigender ID-Reihenfolge.
    pub fn iter(&self) -> impl Iterator<Item = &LineFeature> {
        self.records.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = FeatureId> + '_ {
        self.records.iter().map(LineFeature::id)
    }

    pub fn get(&self, id: FeatureId) -> Option<&LineFeature> {
        self.records
            .binary_search_by_key(&id, LineFeature::id)
            .ok()
            .map(|idx| &self.records[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;

    fn line(id: i64, a: (f64, f64), b: (f64, f64)) -> LineFeature {
        LineFeature::new(id, vec![a.into(), b.into()]).unwrap()
    }

    #[test]
    fn test_iterates_in_ascending_id_order() {
        let arena = FeatureArena::new(vec![
            line(30, (0.0, 0.0), (1.0, 0.0)),
            line(4, (1.0, 0.0), (1.0, 1.0)),
            line(12, (1.0, 1.0), (0.0, 0.0)),
        ])
        .unwrap();

        let ids: Vec<i64> = arena.ids().map(|id| id.0).collect();
        assert_eq!(ids, vec![4, 12, 30]);
        assert_eq!(
            arena.get(FeatureId(12)).map(LineFeature::first),
            Some(Point::new(1.0, 1.0))
        );
        assert!(arena.get(FeatureId(5)).is_none());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let err = FeatureArena::new(vec![
            line(1, (0.0, 0.0), (1.0, 0.0)),
            line(1, (1.0, 0.0), (1.0, 1.0)),
        ])
        .unwrap_err();
        assert_eq!(err, InputError::DuplicateFeatureId { id: FeatureId(1) });
    }

    #[test]
    fn test_rejects_empty_input() {
        let err = FeatureArena::new(Vec::new()).unwrap_err();
        assert_eq!(err, InputError::EmptyLayer);
    }
}
