use std::borrow::Cow;
use std::cmp::Ordering as CmpOrdering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::field_array::RowId;
use super::validation::{FieldErrors, Resolver, ValidationError};

static FORM_ID_ALLOCATOR: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FormId(pub u64);

impl FormId {
    pub fn next() -> Self {
        Self(FORM_ID_ALLOCATOR.fetch_add(1, Ordering::SeqCst))
    }
}

/// Dot-separated path of a field, e.g. `techs.1.knowledge`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct FieldKey(Cow<'static, str>);

impl FieldKey {
    pub const fn new(value: &'static str) -> Self {
        Self(Cow::Borrowed(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn index(&self, index: usize) -> Self {
        Self(Cow::Owned(format!("{}.{index}", self.0)))
    }

    pub fn join(&self, child: &FieldKey) -> Self {
        Self(Cow::Owned(format!("{}.{}", self.0, child.0)))
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// True for the key itself and every path below it.
    pub fn contains(&self, other: &FieldKey) -> bool {
        other.0 == self.0
            || other
                .0
                .strip_prefix(self.0.as_ref())
                .is_some_and(|rest| rest.starts_with('.'))
    }
}

impl Ord for FieldKey {
    fn cmp(&self, other: &Self) -> CmpOrdering {
        let mut left = self.segments();
        let mut right = other.segments();
        loop {
            match (left.next(), right.next()) {
                (None, None) => return CmpOrdering::Equal,
                (None, Some(_)) => return CmpOrdering::Less,
                (Some(_), None) => return CmpOrdering::Greater,
                (Some(a), Some(b)) => {
                    let ordering = match (a.parse::<usize>(), b.parse::<usize>()) {
                        (Ok(a), Ok(b)) => a.cmp(&b),
                        _ => a.cmp(b),
                    };
                    if ordering != CmpOrdering::Equal {
                        return ordering;
                    }
                }
            }
        }
    }
}

impl PartialOrd for FieldKey {
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        Some(self.cmp(other))
    }
}

impl Display for FieldKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for FieldKey {
    fn from(value: &'static str) -> Self {
        Self::new(value)
    }
}

impl From<String> for FieldKey {
    fn from(value: String) -> Self {
        Self(Cow::Owned(value))
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubmitState {
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValidationMode {
    OnChange,
    OnBlur,
    OnSubmit,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RevalidateMode {
    OnChange,
    OnBlur,
    OnSubmit,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FormOptions {
    pub validate_mode: ValidationMode,
    pub revalidate_mode: RevalidateMode,
    pub validate_first_error_only: bool,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            validate_mode: ValidationMode::OnSubmit,
            revalidate_mode: RevalidateMode::OnChange,
            validate_first_error_only: false,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldMeta<E> {
    pub dirty: bool,
    pub touched: bool,
    pub errors: Vec<E>,
}

impl<E> Default for FieldMeta<E> {
    fn default() -> Self {
        Self {
            dirty: false,
            touched: false,
            errors: Vec::new(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct FormSnapshot<T, E> {
    pub model: T,
    pub submit_state: SubmitState,
    pub submit_count: u32,
    pub is_dirty: bool,
    pub is_valid: bool,
    pub field_meta: BTreeMap<FieldKey, FieldMeta<E>>,
}

impl<T, E> FormSnapshot<T, E>
where
    E: ValidationError,
{
    /// First message per failing path.
    pub fn error_map(&self) -> BTreeMap<FieldKey, String> {
        self.field_meta
            .iter()
            .filter_map(|(key, meta)| {
                meta.errors
                    .first()
                    .map(|error| (key.clone(), error.message()))
            })
            .collect()
    }

    /// Error shown for `key`: its first issue, once the field was touched
    /// or the form submitted.
    pub fn display_error(&self, key: &FieldKey) -> Option<String> {
        visible_error(self.field_meta.get(key), self.submit_count)
    }

    pub fn errors_for(&self, key: &FieldKey) -> &[E] {
        self.field_meta
            .get(key)
            .map(|meta| meta.errors.as_slice())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum FormError {
    StatePoisoned(&'static str),
    InvalidStateTransition { from: SubmitState, to: SubmitState },
    AlreadySubmitting,
    UnknownRow(RowId),
    SubmitFailed(String),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormError::StatePoisoned(context) => {
                write!(f, "form state lock poisoned while {context}")
            }
            FormError::InvalidStateTransition { from, to } => {
                write!(f, "invalid submit state transition: {from:?} -> {to:?}")
            }
            FormError::AlreadySubmitting => f.write_str("form submit is already in progress"),
            FormError::UnknownRow(row) => write!(f, "no row with id {row} in field array"),
            FormError::SubmitFailed(error) => write!(f, "submit handler failed: {error}"),
        }
    }
}

impl std::error::Error for FormError {}

pub type FormResult<T> = Result<T, FormError>;

pub(super) struct FormState<T, E> {
    pub(super) id: FormId,
    pub(super) initial_model: T,
    pub(super) model: T,
    pub(super) submit_state: SubmitState,
    pub(super) submit_count: u32,
    pub(super) dirty_fields: BTreeSet<FieldKey>,
    pub(super) field_meta: BTreeMap<FieldKey, FieldMeta<E>>,
}

impl<T, E> FormState<T, E> {
    pub(super) fn ensure_meta(&mut self, key: FieldKey) -> &mut FieldMeta<E> {
        self.field_meta.entry(key).or_default()
    }

    pub(super) fn mark_dirty(&mut self, key: FieldKey, is_dirty: bool) {
        if is_dirty {
            self.dirty_fields.insert(key.clone());
        } else {
            self.dirty_fields.remove(&key);
        }
        self.ensure_meta(key).dirty = is_dirty;
    }
}

/// Owns the draft model of one form and the per-field state derived from it.
///
/// Validation is delegated to a [`Resolver`]; the controller only decides
/// when to run it and where its errors land.
pub struct FormController<T, R>
where
    T: Clone + Send + Sync + 'static,
    R: Resolver<T>,
{
    pub(super) options: FormOptions,
    pub(super) resolver: Arc<R>,
    pub(super) state: Arc<RwLock<FormState<T, R::Error>>>,
}

impl<T, R> Clone for FormController<T, R>
where
    T: Clone + Send + Sync + 'static,
    R: Resolver<T>,
{
    fn clone(&self) -> Self {
        Self {
            options: self.options,
            resolver: self.resolver.clone(),
            state: self.state.clone(),
        }
    }
}

impl<T, R> FormController<T, R>
where
    T: Clone + Send + Sync + 'static,
    R: Resolver<T>,
{
    pub fn new(initial: T, resolver: R, options: FormOptions) -> Self {
        Self {
            options,
            resolver: Arc::new(resolver),
            state: Arc::new(RwLock::new(FormState {
                id: FormId::next(),
                initial_model: initial.clone(),
                model: initial,
                submit_state: SubmitState::Idle,
                submit_count: 0,
                dirty_fields: BTreeSet::new(),
                field_meta: BTreeMap::new(),
            })),
        }
    }

    pub fn form_id(&self) -> FormResult<FormId> {
        Ok(read_lock(&self.state, "reading form id")?.id)
    }

    pub fn options(&self) -> FormOptions {
        self.options
    }

    /// Validates the current model and, when it passes, hands the resolved
    /// output to `on_valid`. Returns whether the model was valid.
    pub fn submit(
        &self,
        on_valid: impl FnOnce(&R::Output) -> FormResult<()>,
    ) -> FormResult<bool> {
        let form_id = {
            let mut state = write_lock(&self.state, "preparing submit")?;
            if state.submit_state == SubmitState::Submitting {
                return Err(FormError::AlreadySubmitting);
            }
            transition_submit_state(&mut state, SubmitState::Validating)?;
            state.submit_count = state.submit_count.saturating_add(1);
            state.id
        };

        let output = match self.run_resolver()? {
            Ok(output) => output,
            Err(errors) => {
                tracing::debug!(
                    form_id = form_id.0,
                    failing_fields = errors.len(),
                    "submit rejected by validation"
                );
                let mut state = write_lock(&self.state, "handling submit validation failure")?;
                apply_all_errors(&mut state, errors, self.options.validate_first_error_only);
                transition_submit_state(&mut state, SubmitState::Failed)?;
                return Ok(false);
            }
        };

        {
            let mut state = write_lock(&self.state, "moving submit state to submitting")?;
            apply_all_errors(&mut state, FieldErrors::new(), false);
            transition_submit_state(&mut state, SubmitState::Submitting)?;
        }
        let submit_result = on_valid(&output);

        let mut state = write_lock(&self.state, "completing submit")?;
        match &submit_result {
            Ok(()) => {
                tracing::debug!(form_id = form_id.0, "submit succeeded");
                transition_submit_state(&mut state, SubmitState::Succeeded)?;
            }
            Err(error) => {
                tracing::debug!(form_id = form_id.0, %error, "submit handler failed");
                transition_submit_state(&mut state, SubmitState::Failed)?;
            }
        }
        submit_result.map(|()| true)
    }

    /// Runs the resolver and stores every error without submitting.
    pub fn validate_form(&self) -> FormResult<bool> {
        let errors = self.run_resolver()?.err().unwrap_or_default();
        let is_valid = errors.is_empty();
        let mut state = write_lock(&self.state, "applying form validation result")?;
        apply_all_errors(&mut state, errors, self.options.validate_first_error_only);
        Ok(is_valid)
    }

    pub fn reset_to_initial(&self) -> FormResult<()> {
        let mut state = write_lock(&self.state, "resetting form")?;
        state.model = state.initial_model.clone();
        state.submit_state = SubmitState::Idle;
        state.submit_count = 0;
        state.dirty_fields.clear();
        state.field_meta.clear();
        Ok(())
    }

    pub fn clear_errors(&self) -> FormResult<()> {
        let mut state = write_lock(&self.state, "clearing all field errors")?;
        for meta in state.field_meta.values_mut() {
            meta.errors.clear();
        }
        Ok(())
    }

    pub fn snapshot(&self) -> FormResult<FormSnapshot<T, R::Error>> {
        let state = read_lock(&self.state, "creating form snapshot")?;
        let is_valid = state.field_meta.values().all(|meta| meta.errors.is_empty());
        Ok(FormSnapshot {
            model: state.model.clone(),
            submit_state: state.submit_state,
            submit_count: state.submit_count,
            is_dirty: !state.dirty_fields.is_empty(),
            is_valid,
            field_meta: state.field_meta.clone(),
        })
    }

    pub fn field_meta(&self, key: &FieldKey) -> FormResult<Option<FieldMeta<R::Error>>> {
        Ok(read_lock(&self.state, "reading field meta")?
            .field_meta
            .get(key)
            .cloned())
    }

    /// First error of `key`, hidden until the field is touched or the form
    /// has been submitted once.
    pub fn display_error(&self, key: &FieldKey) -> FormResult<Option<String>> {
        let state = read_lock(&self.state, "reading display error message")?;
        Ok(visible_error(state.field_meta.get(key), state.submit_count))
    }

    pub(super) fn run_resolver(
        &self,
    ) -> FormResult<Result<R::Output, FieldErrors<R::Error>>> {
        let model = read_lock(&self.state, "reading model for validation")?
            .model
            .clone();
        Ok(self.resolver.resolve(&model))
    }

    /// Re-runs the resolver and refreshes the errors of `scope` and every path
    /// below it, leaving the rest of the form untouched.
    pub(super) fn validate_scope(&self, scope: &FieldKey) -> FormResult<bool> {
        let errors = self.run_resolver()?.err().unwrap_or_default();
        let mut state = write_lock(&self.state, "writing scoped validation result")?;
        let stale = state
            .field_meta
            .keys()
            .filter(|key| scope.contains(key))
            .cloned()
            .collect::<Vec<_>>();
        for key in stale {
            state.ensure_meta(key).errors.clear();
        }
        let mut scope_valid = true;
        for (key, mut issues) in errors {
            if !scope.contains(&key) {
                continue;
            }
            if self.options.validate_first_error_only {
                issues.truncate(1);
            }
            scope_valid &= issues.is_empty();
            state.ensure_meta(key).errors = issues;
        }
        Ok(scope_valid)
    }

    /// Validation hook shared by value updates.
    pub(super) fn after_change(&self, key: &FieldKey) -> FormResult<()> {
        let submitted = read_lock(&self.state, "reading submit count")?.submit_count > 0;
        let validate = self.options.validate_mode == ValidationMode::OnChange
            || (submitted && self.options.revalidate_mode == RevalidateMode::OnChange);
        if validate {
            let _ = self.validate_scope(key)?;
        }
        Ok(())
    }

    pub(super) fn after_touch(&self, key: &FieldKey) -> FormResult<()> {
        let submitted = read_lock(&self.state, "reading submit count")?.submit_count > 0;
        let validate = self.options.validate_mode == ValidationMode::OnBlur
            || (submitted && self.options.revalidate_mode == RevalidateMode::OnBlur);
        if validate {
            let _ = self.validate_scope(key)?;
        }
        Ok(())
    }
}

fn visible_error<E>(meta: Option<&FieldMeta<E>>, submit_count: u32) -> Option<String>
where
    E: ValidationError,
{
    let meta = meta?;
    if !meta.touched && submit_count == 0 {
        return None;
    }
    meta.errors.first().map(ValidationError::message)
}

fn apply_all_errors<T, E>(
    state: &mut FormState<T, E>,
    mut errors: FieldErrors<E>,
    first_only: bool,
) {
    let mut keys = state.field_meta.keys().cloned().collect::<BTreeSet<_>>();
    keys.extend(errors.keys().cloned());
    for key in keys {
        let mut issues = errors.remove(&key).unwrap_or_default();
        if first_only {
            issues.truncate(1);
        }
        state.ensure_meta(key).errors = issues;
    }
}

pub(super) fn transition_submit_state<T, E>(
    state: &mut FormState<T, E>,
    next: SubmitState,
) -> FormResult<()> {
    let current = state.submit_state;
    if current == next {
        return Ok(());
    }

    let allowed = matches!(
        (current, next),
        (SubmitState::Idle, SubmitState::Validating)
            | (SubmitState::Validating, SubmitState::Submitting)
            | (SubmitState::Validating, SubmitState::Failed)
            | (SubmitState::Submitting, SubmitState::Succeeded)
            | (SubmitState::Submitting, SubmitState::Failed)
            | (SubmitState::Succeeded, SubmitState::Validating)
            | (SubmitState::Failed, SubmitState::Validating)
            | (_, SubmitState::Idle)
    );
    if !allowed {
        return Err(FormError::InvalidStateTransition {
            from: current,
            to: next,
        });
    }
    state.submit_state = next;
    Ok(())
}

pub(super) fn read_lock<'a, T>(
    lock: &'a RwLock<T>,
    context: &'static str,
) -> FormResult<RwLockReadGuard<'a, T>> {
    lock.read().map_err(|_| FormError::StatePoisoned(context))
}

pub(super) fn write_lock<'a, T>(
    lock: &'a RwLock<T>,
    context: &'static str,
) -> FormResult<RwLockWriteGuard<'a, T>> {
    lock.write().map_err(|_| FormError::StatePoisoned(context))
}
