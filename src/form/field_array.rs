use std::fmt::{Display, Formatter};

use super::controller::{FieldKey, FormController, FormError, FormResult, read_lock, write_lock};
use super::validation::{FieldLens, Resolver};

/// Identity of a row inside one [`FieldArray`]. Allocated from a per-array
/// counter and never reused, so it survives edits and reordering of
/// neighbouring rows.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct RowId(u64);

impl RowId {
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl Display for RowId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "row-{}", self.0)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Row<T> {
    pub id: RowId,
    pub value: T,
}

/// Growable list of rows with stable identities.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldArray<T> {
    rows: Vec<Row<T>>,
    next_id: u64,
}

impl<T> Default for FieldArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FieldArray<T> {
    pub const fn new() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 0,
        }
    }

    pub fn from_values(values: impl IntoIterator<Item = T>) -> Self {
        let mut array = Self::new();
        for value in values {
            array.append(value);
        }
        array
    }

    pub fn append(&mut self, value: T) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        self.rows.push(Row { id, value });
        id
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row<T>] {
        &self.rows
    }

    pub fn ids(&self) -> impl Iterator<Item = RowId> + '_ {
        self.rows.iter().map(|row| row.id)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.rows.iter().map(|row| &row.value)
    }

    pub fn position(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|row| row.id == id)
    }

    pub fn get(&self, id: RowId) -> Option<&T> {
        self.rows
            .iter()
            .find(|row| row.id == id)
            .map(|row| &row.value)
    }

    pub fn get_mut(&mut self, id: RowId) -> Option<&mut T> {
        self.rows
            .iter_mut()
            .find(|row| row.id == id)
            .map(|row| &mut row.value)
    }
}

impl<T, R> FormController<T, R>
where
    T: Clone + Send + Sync + 'static,
    R: Resolver<T>,
{
    pub fn append<A, V>(&self, array: A, value: V) -> FormResult<RowId>
    where
        A: FieldLens<T, Value = FieldArray<V>>,
        V: Clone + PartialEq + Send + Sync + 'static,
    {
        let key = array.key();
        let (id, len) = {
            let mut state = write_lock(&self.state, "appending field array row")?;
            let mut rows = array.get(&state.model).clone();
            let id = rows.append(value);
            let len = rows.len();
            array.set(&mut state.model, rows);
            let is_dirty = array.get(&state.model) != array.get(&state.initial_model);
            state.mark_dirty(key.clone(), is_dirty);
            (id, len)
        };
        tracing::trace!(field = %key, row = %id, len, "row appended");
        self.after_change(&key)?;
        Ok(id)
    }

    /// Path of one field of a row, derived from the row's current position.
    pub fn row_key<A, L, V>(&self, array: A, row: RowId, lens: L) -> FormResult<FieldKey>
    where
        A: FieldLens<T, Value = FieldArray<V>>,
        L: FieldLens<V>,
        V: Clone + PartialEq + Send + Sync + 'static,
    {
        let state = read_lock(&self.state, "resolving row key")?;
        let index = array
            .get(&state.model)
            .position(row)
            .ok_or(FormError::UnknownRow(row))?;
        Ok(array.key().index(index).join(&lens.key()))
    }

    pub fn set_row<A, L, V>(&self, array: A, row: RowId, lens: L, value: L::Value) -> FormResult<()>
    where
        A: FieldLens<T, Value = FieldArray<V>>,
        L: FieldLens<V>,
        V: Clone + PartialEq + Send + Sync + 'static,
    {
        let key = {
            let mut state = write_lock(&self.state, "writing field array row")?;
            let mut rows = array.get(&state.model).clone();
            let index = rows.position(row).ok_or(FormError::UnknownRow(row))?;
            if let Some(entry) = rows.get_mut(row) {
                lens.set(entry, value);
            }
            let is_dirty = match (
                rows.get(row),
                array.get(&state.initial_model).get(row),
            ) {
                (Some(current), Some(initial)) => lens.get(current) != lens.get(initial),
                _ => true,
            };
            array.set(&mut state.model, rows);
            let key = array.key().index(index).join(&lens.key());
            state.mark_dirty(key.clone(), is_dirty);
            key
        };
        tracing::trace!(field = %key, %row, "row field updated");
        self.after_change(&key)
    }

    pub fn touch_row<A, L, V>(&self, array: A, row: RowId, lens: L) -> FormResult<()>
    where
        A: FieldLens<T, Value = FieldArray<V>>,
        L: FieldLens<V>,
        V: Clone + PartialEq + Send + Sync + 'static,
    {
        let key = self.row_key(array, row, lens)?;
        self.touch_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_allocates_distinct_ids_in_order() {
        let mut array = FieldArray::new();
        let first = array.append("a");
        let second = array.append("b");
        assert_ne!(first, second);
        assert_eq!(array.position(first), Some(0));
        assert_eq!(array.position(second), Some(1));
        assert_eq!(array.values().copied().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn ids_survive_clone_and_edit() {
        let mut array = FieldArray::from_values(["x", "y"]);
        let ids = array.ids().collect::<Vec<_>>();
        let copy = array.clone();
        if let Some(value) = array.get_mut(ids[1]) {
            *value = "z";
        }
        assert_eq!(copy.ids().collect::<Vec<_>>(), ids);
        assert_eq!(array.get(ids[1]), Some(&"z"));
        assert_eq!(array.get(ids[0]), Some(&"x"));
    }

    #[test]
    fn unknown_id_is_not_found() {
        let mut other = FieldArray::new();
        other.append(1);
        other.append(2);
        let foreign = other.append(3);
        let array = FieldArray::from_values([10, 20]);
        assert_eq!(array.position(foreign), None);
        assert!(array.get(foreign).is_none());
    }
}
