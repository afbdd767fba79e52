//! Test commander

use std::collections::HashSet;

use parking_lot::Mutex;
use permhub_sdk::SubjectRef;

use super::gate::Commander;

/// Commander with a fixed permission set that records replies
pub(crate) struct MockCommander {
    name: String,
    subject: Option<SubjectRef>,
    permissions: HashSet<String>,
    replies: Mutex<Vec<String>>,
}

impl MockCommander {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            subject: None,
            permissions: HashSet::new(),
            replies: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_subject(mut self, collection: &str, identifier: &str) -> Self {
        self.subject = Some(SubjectRef::new(collection, identifier));
        self
    }

    pub(crate) fn with_permission(mut self, permission: &str) -> Self {
        self.permissions.insert(permission.to_string());
        self
    }

    pub(crate) fn replies(&self) -> Vec<String> {
        self.replies.lock().clone()
    }
}

impl Commander for MockCommander {
    fn name(&self) -> &str {
        &self.name
    }

    fn subject(&self) -> Option<&SubjectRef> {
        self.subject.as_ref()
    }

    fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }

    fn reply(&self, message: &str) {
        self.replies.lock().push(message.to_string());
    }
}
