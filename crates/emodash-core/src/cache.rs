//! In-memory mirror of the remote task and email collections.
//!
//! The cache is only ever replaced wholesale from a gateway response. The
//! one local edit is task reordering, which the next reload discards.

use emodash_api::{Email, EmailId, Task, TaskId};

use crate::tasks;

/// Cached tasks and emails in store order.
#[derive(Debug, Clone, Default)]
pub struct EntityCache {
    tasks: Vec<Task>,
    emails: Vec<Email>,
}

impl EntityCache {
    /// Creates an empty cache.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tasks: Vec::new(),
            emails: Vec::new(),
        }
    }

    /// Cached tasks.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Cached emails.
    #[must_use]
    pub fn emails(&self) -> &[Email] {
        &self.emails
    }

    /// Finds a task by id.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Finds an email by id.
    #[must_use]
    pub fn email(&self, id: EmailId) -> Option<&Email> {
        self.emails.iter().find(|e| e.id == id)
    }

    /// Replaces the task list.
    pub(crate) fn replace_tasks(&mut self, tasks: Vec<Task>) {
        tracing::debug!(count = tasks.len(), "task cache replaced");
        self.tasks = tasks;
    }

    /// Replaces the email list.
    pub(crate) fn replace_emails(&mut self, emails: Vec<Email>) {
        tracing::debug!(count = emails.len(), "email cache replaced");
        self.emails = emails;
    }

    /// Moves a task within the cached list.
    pub(crate) fn move_task(&mut self, id: TaskId, delta: isize) -> bool {
        tasks::move_task(&mut self.tasks, id, delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emodash_api::{Folder, Priority};

    fn email(id: i64) -> Email {
        Email {
            id: EmailId(id),
            folder: Folder::Inbox,
            sender: "a@x.com".into(),
            to: None,
            subject: String::new(),
            content: String::new(),
            date: String::new(),
            starred: false,
            read: false,
        }
    }

    #[test]
    fn test_replace_discards_previous_contents() {
        let mut cache = EntityCache::new();
        cache.replace_emails(vec![email(1), email(2)]);
        assert!(cache.email(EmailId(1)).is_some());

        cache.replace_emails(vec![email(3)]);
        assert!(cache.email(EmailId(1)).is_none());
        assert_eq!(cache.emails().len(), 1);
    }

    #[test]
    fn test_move_task_is_local() {
        let mut cache = EntityCache::new();
        cache.replace_tasks(vec![
            Task {
                id: TaskId(1),
                text: "a".into(),
                done: false,
                priority: Priority::Low,
                quick: false,
            },
            Task {
                id: TaskId(2),
                text: "b".into(),
                done: false,
                priority: Priority::Low,
                quick: false,
            },
        ]);
        assert!(cache.move_task(TaskId(2), -1));
        assert_eq!(cache.tasks()[0].id, TaskId(2));
        assert_eq!(cache.task(TaskId(1)).map(|t| t.text.as_str()), Some("a"));
    }
}
