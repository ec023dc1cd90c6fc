//! Add/edit session for a single record.
//!
//! The session works on a draft: an empty record in add mode, or a clone of
//! the persisted record in edit mode. Nothing is handed back to the caller
//! until `commit` has validated the draft.

use crate::fields::{FieldError, FormField};
use crate::models::Record;
use crate::picker::{Picker, PickerError, SelectionSignal};
use crate::validate::{validate, ValidationError};

#[derive(Debug, Clone)]
pub enum EditMode<R> {
    Add,
    Edit(R),
}

/// What the owning list should do with a validated draft.
#[derive(Debug, Clone, PartialEq)]
pub enum Commit<R> {
    Create(R),
    Replace { original: R, updated: R },
}

#[derive(Debug, Clone)]
pub struct Editor<R: Record> {
    mode: EditMode<R>,
    draft: R,
    picker: Picker,
}

impl<R: Record> Editor<R> {
    /// Start a session. `images` are the candidates offered by the picker; in
    /// edit mode the record's current image starts out selected.
    pub fn new<I, S>(mode: EditMode<R>, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let draft = match &mode {
            EditMode::Add => R::default(),
            EditMode::Edit(original) => original.clone(),
        };
        let picker = Picker::new(images, draft.image());
        Self {
            mode,
            draft,
            picker,
        }
    }

    pub fn title(&self) -> String {
        let verb = match self.mode {
            EditMode::Add => "Add",
            EditMode::Edit(_) => "Edit",
        };
        format!("{verb} {}", R::KIND.noun())
    }

    pub fn draft(&self) -> &R {
        &self.draft
    }

    pub fn picker(&self) -> &Picker {
        &self.picker
    }

    pub fn set_field(&mut self, field: R::Field, text: &str) -> Result<(), FieldError> {
        self.draft.set_field(field, text)
    }

    /// Like [`Editor::set_field`], resolving the field from its key first.
    pub fn set_field_by_key(&mut self, key: &str, text: &str) -> Result<(), FieldError> {
        let field =
            R::Field::from_key(key).ok_or_else(|| FieldError::UnknownField(key.to_string()))?;
        self.set_field(field, text)
    }

    /// Toggle `id` in the picker and mirror the outcome into the draft.
    pub fn select_image(&mut self, id: &str) -> Result<SelectionSignal, PickerError> {
        let signal = self.picker.select(id)?;
        self.draft.set_image(signal.current().map(str::to_string));
        Ok(signal)
    }

    /// Validate the draft and describe how to persist it. The session stays
    /// usable after a validation failure.
    pub fn commit(&self) -> Result<Commit<R>, ValidationError> {
        validate(&self.draft)?;
        Ok(match &self.mode {
            EditMode::Add => Commit::Create(self.draft.clone()),
            EditMode::Edit(original) => Commit::Replace {
                original: original.clone(),
                updated: self.draft.clone(),
            },
        })
    }
}
