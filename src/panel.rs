// Presentation-facing state for each record kind

use crate::config::Config;
use crate::filter::{self, Page, StatusFilter, ViewFilter};
use crate::notify::Notifier;
use crate::record::{RecordKind, Student, Teacher};
use crate::seed::{self, SeedSource};
use crate::session::{DraftField, EditSession, FieldValue, Submitted};
use crate::store::{IdStrategy, Store};
use eyre::Result;
use tracing::debug;

/// Everything a view over one record kind holds: the store, the current
/// query, filters and page, and the create/edit dialog
#[derive(Debug, Clone)]
pub struct Panel<K: RecordKind> {
    store: Store<K>,
    filter: ViewFilter,
    page: usize,
    page_size: usize,
    session: EditSession<K>,
}

impl<K: RecordKind> Default for Panel<K> {
    fn default() -> Self {
        Self::new(IdStrategy::default(), filter::PAGE_SIZE)
    }
}

impl<K: RecordKind> Panel<K> {
    pub fn new(id_strategy: IdStrategy, page_size: usize) -> Self {
        Self {
            store: Store::new(id_strategy),
            filter: ViewFilter::default(),
            page: 1,
            page_size: page_size.max(1),
            session: EditSession::new(),
        }
    }

    pub fn store(&self) -> &Store<K> {
        &self.store
    }

    pub fn filter(&self) -> &ViewFilter {
        &self.filter
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn session(&self) -> &EditSession<K> {
        &self.session
    }

    /// Replace the store from `source`; failures are reported to `notifier`
    pub fn seed(&mut self, source: &dyn SeedSource, notifier: &dyn Notifier) -> Result<usize> {
        seed::load(&mut self.store, source, notifier)
    }

    // Query and filter changes keep the current page.

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.filter.status = status;
    }

    pub fn set_category_filter(&mut self, category: impl Into<String>) {
        self.filter.category = category.into();
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Rows to render for the current query, filters and page
    pub fn current_page(&self) -> Page<'_, K> {
        filter::paginate(self.store.records(), &self.filter, self.page, self.page_size)
    }

    pub fn open_create(&mut self) {
        self.session.open(None);
    }

    /// Open the dialog on record `id`. Returns false if no such record.
    pub fn open_edit(&mut self, id: u64) -> bool {
        match self.store.get(id) {
            Some(record) => {
                self.session.open(Some(record));
                true
            }
            None => {
                debug!(collection = K::COLLECTION, id, "open_edit: no matching record");
                false
            }
        }
    }

    pub fn update_draft_field(&mut self, field: DraftField, value: FieldValue) -> Result<()> {
        self.session.update_draft_field(field, value)
    }

    pub fn submit(&mut self, notifier: &dyn Notifier) -> Option<Submitted> {
        self.session.submit(&mut self.store, notifier)
    }

    pub fn close(&mut self) {
        self.session.close();
    }

    /// Delete record `id`. Success is reported even when nothing matched.
    pub fn delete(&mut self, id: u64, notifier: &dyn Notifier) -> usize {
        let removed = self.store.remove(id);
        notifier.success(&format!("{} deleted successfully", K::DISPLAY_NAME));
        removed
    }
}

/// The student and teacher panels side by side. They share no state.
#[derive(Debug, Clone, Default)]
pub struct Admin {
    pub students: Panel<Student>,
    pub teachers: Panel<Teacher>,
}

impl Admin {
    pub fn new(config: &Config) -> Self {
        Self {
            students: Panel::new(config.id_strategy, config.page_size),
            teachers: Panel::new(config.id_strategy, config.page_size),
        }
    }

    /// Seed both panels from `source`. Each kind succeeds or fails on its own.
    pub fn seed_all(&mut self, source: &dyn SeedSource, notifier: &dyn Notifier) -> (Result<usize>, Result<usize>) {
        (
            self.students.seed(source, notifier),
            self.teachers.seed(source, notifier),
        )
    }
}
