// Record kinds and the generic record type

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Debug;
use std::marker::PhantomData;

/// Describes one kind of record held in a roster (students, teachers, ...)
pub trait RecordKind: Debug + Clone + Copy + PartialEq + Default + Send + Sync + 'static {
    /// Collection name, plural and lowercase (e.g., "students")
    const COLLECTION: &'static str;

    /// Singular name used in notifications (e.g., "Student")
    const DISPLAY_NAME: &'static str;

    /// What the categorical attribute means for this kind ("group", "level")
    const CATEGORY_LABEL: &'static str;

    /// Fixed category values assigned round-robin while seeding
    const CATEGORY_VALUES: [&'static str; 3];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Student;

impl RecordKind for Student {
    const COLLECTION: &'static str = "students";
    const DISPLAY_NAME: &'static str = "Student";
    const CATEGORY_LABEL: &'static str = "group";
    const CATEGORY_VALUES: [&'static str; 3] = ["Group A", "Group B", "Group C"];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Teacher;

impl RecordKind for Teacher {
    const COLLECTION: &'static str = "teachers";
    const DISPLAY_NAME: &'static str = "Teacher";
    const CATEGORY_LABEL: &'static str = "level";
    const CATEGORY_VALUES: [&'static str; 3] = ["Senior", "Middle", "Junior"];
}

/// One student or teacher as held in a store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Record<K: RecordKind> {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub category: String,
    /// Any other fields supplied by the seed source, carried through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    #[serde(skip)]
    kind: PhantomData<K>,
}

impl<K: RecordKind> Record<K> {
    pub fn new(
        id: u64,
        name: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
        completed: bool,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            username: username.into(),
            email: email.into(),
            completed,
            category: category.into(),
            extra: Map::new(),
            kind: PhantomData,
        }
    }

    /// Overwrite the fields present in `patch`, leaving the rest alone
    pub fn apply(&mut self, patch: &RecordPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(username) = &patch.username {
            self.username = username.clone();
        }
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(category) = &patch.category {
            self.category = category.clone();
        }
    }
}

/// Partial update for a record; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordPatch {
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub completed: Option<bool>,
    pub category: Option<String>,
}
