//! In-memory notification store.
//!
//! An append-only list of notification records. Records are never removed;
//! the only mutation is flipping the read flag.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{HrmsError, HrmsResult};
use crate::models::{Notification, NotificationDraft, NotificationKind};

/// Holds notification records in insertion order.
///
/// # Example
///
/// ```
/// use hrms_engine::models::{NotificationDraft, NotificationKind};
/// use hrms_engine::notifications::NotificationStore;
/// use chrono::Utc;
///
/// let mut store = NotificationStore::new();
/// let draft = NotificationDraft::new(NotificationKind::Info, "Hello", "Welcome aboard");
/// let id = store.append("emp_001", draft, Utc::now()).id;
///
/// assert_eq!(store.unread_count("emp_001"), 1);
/// store.mark_read(&id, "emp_001").unwrap();
/// assert_eq!(store.unread_count("emp_001"), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NotificationStore {
    items: Vec<Notification>,
}

impl NotificationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given records, in order.
    pub fn with_records(items: Vec<Notification>) -> Self {
        Self { items }
    }

    /// Appends a notification for one recipient and returns the stored record.
    pub fn append(
        &mut self,
        recipient_id: &str,
        draft: NotificationDraft,
        now: DateTime<Utc>,
    ) -> Notification {
        let notification = Notification {
            id: format!("ntf_{}", Uuid::new_v4().simple()),
            recipient_id: recipient_id.to_string(),
            kind: draft.kind,
            title: draft.title,
            message: draft.message,
            link: draft.link,
            read: false,
            created_at: now,
        };
        self.items.push(notification.clone());
        notification
    }

    /// Records addressed to the recipient, in insertion order.
    pub fn for_recipient(&self, recipient_id: &str, unread_only: bool) -> Vec<&Notification> {
        self.items
            .iter()
            .filter(|n| n.recipient_id == recipient_id && (!unread_only || !n.read))
            .collect()
    }

    /// Number of unread records for the recipient.
    pub fn unread_count(&self, recipient_id: &str) -> usize {
        self.items
            .iter()
            .filter(|n| n.recipient_id == recipient_id && !n.read)
            .count()
    }

    /// Marks one record read.
    ///
    /// Marking an already-read record succeeds without change. A record that
    /// belongs to someone else is reported as not found.
    pub fn mark_read(&mut self, id: &str, recipient_id: &str) -> HrmsResult<&Notification> {
        let notification = self
            .items
            .iter_mut()
            .find(|n| n.id == id && n.recipient_id == recipient_id)
            .ok_or_else(|| HrmsError::not_found("notification", id))?;
        notification.read = true;
        Ok(notification)
    }

    /// Marks every record of the recipient read; returns how many changed.
    pub fn mark_all_read(&mut self, recipient_id: &str) -> usize {
        let mut flipped = 0;
        for notification in self
            .items
            .iter_mut()
            .filter(|n| n.recipient_id == recipient_id && !n.read)
        {
            notification.read = true;
            flipped += 1;
        }
        flipped
    }

    /// Returns true if an unread record of this kind and link exists for the recipient.
    pub fn has_unread(&self, recipient_id: &str, kind: NotificationKind, link: Option<&str>) -> bool {
        self.items.iter().any(|n| {
            n.recipient_id == recipient_id && !n.read && n.kind == kind && n.link.as_deref() == link
        })
    }

    /// Total number of records.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> NotificationDraft {
        NotificationDraft::new(NotificationKind::Info, title, "body")
    }

    #[test]
    fn test_append_assigns_unread_record() {
        let mut store = NotificationStore::new();
        let stored = store.append("emp_001", draft("a"), Utc::now());

        assert!(stored.id.starts_with("ntf_"));
        assert!(!stored.read);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_for_recipient_preserves_insertion_order() {
        let mut store = NotificationStore::new();
        store.append("emp_001", draft("first"), Utc::now());
        store.append("emp_002", draft("other"), Utc::now());
        store.append("emp_001", draft("second"), Utc::now());

        let titles: Vec<&str> = store
            .for_recipient("emp_001", false)
            .iter()
            .map(|n| n.title.as_str())
            .collect();
        assert_eq!(titles, vec!["first", "second"]);
    }

    #[test]
    fn test_unread_only_filter() {
        let mut store = NotificationStore::new();
        let first = store.append("emp_001", draft("first"), Utc::now());
        store.append("emp_001", draft("second"), Utc::now());
        store.mark_read(&first.id, "emp_001").unwrap();

        let unread = store.for_recipient("emp_001", true);
        assert_eq!(unread.len(), 1);
        assert_eq!(unread[0].title, "second");
    }

    #[test]
    fn test_mark_read_is_idempotent() {
        let mut store = NotificationStore::new();
        let stored = store.append("emp_001", draft("a"), Utc::now());

        assert!(store.mark_read(&stored.id, "emp_001").unwrap().read);
        assert!(store.mark_read(&stored.id, "emp_001").unwrap().read);
        assert_eq!(store.unread_count("emp_001"), 0);
    }

    #[test]
    fn test_mark_read_of_other_recipient_is_not_found() {
        let mut store = NotificationStore::new();
        let stored = store.append("emp_001", draft("a"), Utc::now());

        let result = store.mark_read(&stored.id, "emp_002");
        assert!(matches!(result, Err(HrmsError::NotFound { .. })));
        assert_eq!(store.unread_count("emp_001"), 1);
    }

    #[test]
    fn test_mark_all_read_counts_flipped_records() {
        let mut store = NotificationStore::new();
        store.append("emp_001", draft("a"), Utc::now());
        store.append("emp_001", draft("b"), Utc::now());
        store.append("emp_002", draft("c"), Utc::now());

        assert_eq!(store.mark_all_read("emp_001"), 2);
        assert_eq!(store.mark_all_read("emp_001"), 0);
        assert_eq!(store.unread_count("emp_002"), 1);
    }

    #[test]
    fn test_has_unread_matches_kind_and_link() {
        let mut store = NotificationStore::new();
        let contract = NotificationDraft::new(NotificationKind::ContractExpiry, "t", "m")
            .with_link("/employees/emp_005");
        store.append("emp_003", contract, Utc::now());

        assert!(store.has_unread("emp_003", NotificationKind::ContractExpiry, Some("/employees/emp_005")));
        assert!(!store.has_unread("emp_003", NotificationKind::ContractExpiry, Some("/employees/emp_007")));
        assert!(!store.has_unread("emp_003", NotificationKind::Info, Some("/employees/emp_005")));
    }
}
