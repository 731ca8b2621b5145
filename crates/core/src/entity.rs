//! Entity trait: identity + continuity across state changes.
//!
//! Also hosts the id-keyed slice helpers that view state uses to mirror remote
//! mutations onto an ordered, in-memory collection of entities.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Find an entity by id.
pub fn find_by_id<'a, E: Entity>(entities: &'a [E], id: &E::Id) -> Option<&'a E> {
    entities.iter().find(|e| e.id() == id)
}

/// Replace the entity with a matching id in place, keeping its position.
///
/// Returns `false` when nothing matched (the collection is left untouched).
pub fn replace_by_id<E: Entity>(entities: &mut [E], updated: E) -> bool {
    match entities.iter_mut().find(|e| e.id() == updated.id()) {
        Some(slot) => {
            *slot = updated;
            true
        }
        None => false,
    }
}

/// Remove every entity with the given id, preserving the order of the rest.
///
/// Returns the number of removed entries.
pub fn remove_by_id<E: Entity>(entities: &mut Vec<E>, id: &E::Id) -> usize {
    let before = entities.len();
    entities.retain(|e| e.id() != id);
    before - entities.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Row {
        id: u32,
        label: &'static str,
    }

    impl Entity for Row {
        type Id = u32;

        fn id(&self) -> &u32 {
            &self.id
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: 1, label: "a" },
            Row { id: 2, label: "b" },
            Row { id: 3, label: "c" },
        ]
    }

    #[test]
    fn replace_keeps_position() {
        let mut rows = rows();
        assert!(replace_by_id(&mut rows, Row { id: 2, label: "B" }));
        assert_eq!(rows[1], Row { id: 2, label: "B" });
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn replace_unknown_is_noop() {
        let mut rows = rows();
        assert!(!replace_by_id(&mut rows, Row { id: 9, label: "x" }));
        assert_eq!(rows, self::rows());
    }

    #[test]
    fn remove_preserves_order() {
        let mut rows = rows();
        assert_eq!(remove_by_id(&mut rows, &2), 1);
        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(remove_by_id(&mut rows, &2), 0);
        assert!(find_by_id(&rows, &3).is_some());
    }
}
