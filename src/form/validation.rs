use std::collections::BTreeMap;

use super::controller::{FieldKey, FormController, FormResult, write_lock};

pub trait ValidationError: Clone + Send + Sync + 'static {
    fn message(&self) -> String;
}

pub trait FieldLens<T>: Copy + Send + Sync + 'static {
    type Value: Clone + PartialEq + Send + Sync + 'static;

    fn key(self) -> FieldKey;
    fn get<'a>(self, model: &'a T) -> &'a Self::Value;
    fn set(self, model: &mut T, value: Self::Value);
}

pub trait FormModel: Clone + Send + Sync + 'static {
    type Fields;

    fn fields() -> Self::Fields;
}

/// Issues grouped by the path they belong to, in path order.
pub type FieldErrors<E> = BTreeMap<FieldKey, Vec<E>>;

/// Turns a draft model into its validated output, or reports every failing
/// path. The controller calls this on submit and whenever a field is
/// revalidated.
pub trait Resolver<T>: Send + Sync + 'static {
    type Output;
    type Error: ValidationError;

    fn resolve(&self, model: &T) -> Result<Self::Output, FieldErrors<Self::Error>>;
}

impl<T, R> FormController<T, R>
where
    T: Clone + Send + Sync + 'static,
    R: Resolver<T>,
{
    pub fn set<L>(&self, lens: L, value: L::Value) -> FormResult<()>
    where
        L: FieldLens<T>,
    {
        let key = lens.key();
        {
            let mut state = write_lock(&self.state, "writing form model")?;
            lens.set(&mut state.model, value);
            let is_dirty = lens.get(&state.model) != lens.get(&state.initial_model);
            state.mark_dirty(key.clone(), is_dirty);
        }
        tracing::trace!(field = %key, "field updated");
        self.after_change(&key)
    }

    pub fn touch<L>(&self, lens: L) -> FormResult<()>
    where
        L: FieldLens<T>,
    {
        self.touch_key(lens.key())
    }

    pub fn touch_key(&self, key: FieldKey) -> FormResult<()> {
        {
            let mut state = write_lock(&self.state, "touching field")?;
            state.ensure_meta(key.clone()).touched = true;
        }
        self.after_touch(&key)
    }

    pub fn validate_field<L>(&self, lens: L) -> FormResult<bool>
    where
        L: FieldLens<T>,
    {
        self.validate_scope(&lens.key())
    }
}
