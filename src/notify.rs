// Notification sinks for user-visible outcomes

use std::cell::RefCell;
use tracing::{error, info};

/// Receives success and failure messages (seed load, create, update, delete)
pub trait Notifier {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Sends notifications to the tracing log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        info!(notification = "success", "{}", message);
    }

    fn error(&self, message: &str) {
        error!(notification = "error", "{}", message);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Error(String),
}

/// Keeps every notification in memory, oldest first
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    seen: RefCell<Vec<Notification>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.seen.borrow().clone()
    }

    pub fn last(&self) -> Option<Notification> {
        self.seen.borrow().last().cloned()
    }
}

impl Notifier for MemoryNotifier {
    fn success(&self, message: &str) {
        self.seen.borrow_mut().push(Notification::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.seen.borrow_mut().push(Notification::Error(message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_notifier_records_in_order() {
        let sink = MemoryNotifier::new();
        sink.success("Students loaded successfully");
        sink.error("Failed to load teachers");

        assert_eq!(
            sink.notifications(),
            vec![
                Notification::Success("Students loaded successfully".to_string()),
                Notification::Error("Failed to load teachers".to_string()),
            ]
        );
        assert_eq!(sink.last(), Some(Notification::Error("Failed to load teachers".to_string())));
    }

    #[test]
    fn test_log_notifier_as_trait_object() {
        let sinks: Vec<Box<dyn Notifier>> = vec![Box::new(LogNotifier), Box::new(MemoryNotifier::new())];
        for sink in &sinks {
            sink.success("Teacher deleted successfully");
            sink.error("Failed to load teachers");
        }
    }
}
