// Create/edit dialog state and its commit into a store

use crate::notify::Notifier;
use crate::record::{Record, RecordKind, RecordPatch};
use crate::store::Store;
use eyre::{Result, eyre};
use std::marker::PhantomData;
use tracing::info;

/// Working copy of a record's editable fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub name: String,
    pub username: String,
    pub email: String,
    pub completed: bool,
    pub category: String,
}

impl Draft {
    fn from_record<K: RecordKind>(record: &Record<K>) -> Self {
        Self {
            name: record.name.clone(),
            username: record.username.clone(),
            email: record.email.clone(),
            completed: record.completed,
            category: record.category.clone(),
        }
    }

    fn into_patch(self) -> RecordPatch {
        RecordPatch {
            name: Some(self.name),
            username: Some(self.username),
            email: Some(self.email),
            completed: Some(self.completed),
            category: Some(self.category),
        }
    }
}

/// Editable field of a draft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    Username,
    Email,
    Completed,
    Category,
}

impl DraftField {
    /// Parse a form field name. The kind's category label ("group",
    /// "level") is accepted alongside "category".
    pub fn parse<K: RecordKind>(name: &str) -> Result<Self> {
        match name {
            "name" => Ok(DraftField::Name),
            "username" => Ok(DraftField::Username),
            "email" => Ok(DraftField::Email),
            "completed" => Ok(DraftField::Completed),
            "category" => Ok(DraftField::Category),
            label if label == K::CATEGORY_LABEL => Ok(DraftField::Category),
            other => Err(eyre!("Unknown {} field: {}", K::DISPLAY_NAME.to_lowercase(), other)),
        }
    }
}

/// Raw input for a draft field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitAction {
    Created,
    Updated,
}

impl std::fmt::Display for SubmitAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitAction::Created => write!(f, "created"),
            SubmitAction::Updated => write!(f, "updated"),
        }
    }
}

/// What a submit did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submitted {
    pub id: u64,
    pub action: SubmitAction,
}

/// State of the create/edit dialog for one record kind
#[derive(Debug, Clone, Default)]
pub struct EditSession<K: RecordKind> {
    is_open: bool,
    target_id: Option<u64>,
    draft: Draft,
    kind: PhantomData<K>,
}

impl<K: RecordKind> EditSession<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Id being edited; `None` in create mode or when closed
    pub fn target_id(&self) -> Option<u64> {
        self.target_id
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Open for editing `record`, or for creating when `None`
    pub fn open(&mut self, record: Option<&Record<K>>) {
        self.target_id = record.map(|r| r.id);
        self.draft = record.map(Draft::from_record).unwrap_or_default();
        self.is_open = true;
    }

    /// Overwrite one draft field. Text is taken verbatim.
    pub fn update_draft_field(&mut self, field: DraftField, value: FieldValue) -> Result<()> {
        match (field, value) {
            (DraftField::Completed, FieldValue::Flag(flag)) => self.draft.completed = flag,
            (DraftField::Completed, FieldValue::Text(text)) => {
                return Err(eyre!("Field completed takes true/false, got text: {:?}", text));
            }
            (field, FieldValue::Flag(flag)) => {
                return Err(eyre!("Field {:?} takes text, got flag: {}", field, flag));
            }
            (DraftField::Name, FieldValue::Text(text)) => self.draft.name = text,
            (DraftField::Username, FieldValue::Text(text)) => self.draft.username = text,
            (DraftField::Email, FieldValue::Text(text)) => self.draft.email = text,
            (DraftField::Category, FieldValue::Text(text)) => self.draft.category = text,
        }
        Ok(())
    }

    /// Commit the draft: patch the target in edit mode, insert a new record
    /// in create mode. Closes the session. Returns `None` if it was not open.
    pub fn submit(&mut self, store: &mut Store<K>, notifier: &dyn Notifier) -> Option<Submitted> {
        if !self.is_open {
            return None;
        }

        let draft = std::mem::take(&mut self.draft);
        let submitted = match self.target_id {
            Some(id) => {
                store.patch(id, &draft.into_patch());
                Submitted {
                    id,
                    action: SubmitAction::Updated,
                }
            }
            None => {
                let id = store.next_id();
                let mut record = Record::new(id, "", "", "", false, "");
                record.apply(&draft.into_patch());
                store.insert(record);
                Submitted {
                    id,
                    action: SubmitAction::Created,
                }
            }
        };

        info!(
            collection = K::COLLECTION,
            id = submitted.id,
            action = %submitted.action,
            "Edit session submitted"
        );
        notifier.success(&format!("{} {} successfully", K::DISPLAY_NAME, submitted.action));

        self.close();
        Some(submitted)
    }

    /// Discard the draft without touching any store
    pub fn close(&mut self) {
        self.is_open = false;
        self.target_id = None;
        self.draft = Draft::default();
    }
}
