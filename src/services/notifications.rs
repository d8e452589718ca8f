//! In-memory notification list: the demo's toast queue.
//!
//! Nothing is delivered anywhere; notifications live in process memory
//! until cleared, newest first.

use dashmap::DashMap;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::models::{Notification, NotificationKind};

#[derive(Debug, Default)]
pub struct NotificationService {
    store: DashMap<Uuid, Notification>,
}

impl NotificationService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &self,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Notification {
        let notification = Notification::new(kind, title, message);
        self.store.insert(notification.id, notification.clone());
        notification
    }

    /// All notifications, newest first.
    pub fn list(&self) -> Vec<Notification> {
        let mut all: Vec<Notification> = self.store.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all
    }

    pub fn unread_count(&self) -> usize {
        self.store.iter().filter(|e| !e.value().read).count()
    }

    pub fn mark_read(&self, id: Uuid) -> Result<(), ServiceError> {
        match self.store.get_mut(&id) {
            Some(mut entry) => {
                entry.value_mut().read = true;
                Ok(())
            }
            None => Err(ServiceError::NotFound(format!(
                "Notification {} not found",
                id
            ))),
        }
    }

    pub fn clear(&self) {
        self.store.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_list_and_mark_read() {
        let service = NotificationService::new();
        let first = service.push(NotificationKind::Info, "Update", "Order packed");
        service.push(NotificationKind::Success, "Delivered", "Order delivered");

        assert_eq!(service.list().len(), 2);
        assert_eq!(service.unread_count(), 2);

        service.mark_read(first.id).unwrap();
        assert_eq!(service.unread_count(), 1);
    }

    #[test]
    fn mark_read_unknown_id_is_not_found() {
        let service = NotificationService::new();
        let err = service.mark_read(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[test]
    fn clear_empties_the_list() {
        let service = NotificationService::new();
        service.push(NotificationKind::Warning, "Stock", "Low stock");
        service.clear();
        assert!(service.list().is_empty());
        assert_eq!(service.unread_count(), 0);
    }
}
