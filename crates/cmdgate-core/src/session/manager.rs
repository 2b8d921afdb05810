//! SessionManager - session-scoped approval grants with idle eviction.

use super::state::{Session, SessionId};
use crate::validation::Category;
use log::debug;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// Manages approval state for all active sessions.
///
/// The whole table sits behind one coarse lock: every operation is a
/// short in-memory set lookup or insert, so per-session locking would
/// buy nothing. Any lookup or approval lazily creates the session and
/// refreshes its idle clock; only [`sweep`](SessionManager::sweep) ever
/// removes one. State is purely in-memory and lost on restart.
pub struct SessionManager {
    sessions: Mutex<HashMap<SessionId, Session>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Record the caller's approval of a literal command string.
    /// Idempotent; creates the session if absent.
    pub fn approve_command(&self, session_id: &SessionId, command: &str) {
        let mut sessions = self.lock();
        let session = touch_session(&mut sessions, session_id);
        session.approved_commands.insert(command.to_string());
    }

    /// Record the caller's approval of a whole category.
    /// Idempotent; creates the session if absent.
    pub fn approve_category(&self, session_id: &SessionId, category: Category) {
        let mut sessions = self.lock();
        let session = touch_session(&mut sessions, session_id);
        session.approved_categories.insert(category);
    }

    /// Check whether a literal command has been approved for a session.
    ///
    /// Checking counts as activity: the session's idle clock is
    /// refreshed, and an unseen id materializes an empty session.
    pub fn is_command_approved(&self, session_id: &SessionId, command: &str) -> bool {
        let mut sessions = self.lock();
        touch_session(&mut sessions, session_id)
            .approved_commands
            .contains(command)
    }

    /// Check whether a category has been approved for a session.
    ///
    /// Same activity semantics as
    /// [`is_command_approved`](SessionManager::is_command_approved).
    pub fn is_category_approved(&self, session_id: &SessionId, category: Category) -> bool {
        let mut sessions = self.lock();
        touch_session(&mut sessions, session_id)
            .approved_categories
            .contains(&category)
    }

    /// Evict every session idle strictly longer than `max_age`.
    ///
    /// Intended to be driven by the caller on a fixed interval; the
    /// manager keeps no timer of its own. Eviction of each session is
    /// independent, so an interrupted sweep leaves the table coherent.
    pub fn sweep(&self, max_age: Duration) {
        let mut sessions = self.lock();
        let before = sessions.len();
        sessions.retain(|_, session| session.last_active.elapsed() <= max_age);
        let evicted = before - sessions.len();
        if evicted > 0 {
            debug!("swept {evicted} idle session(s), {} remaining", sessions.len());
        }
    }

    /// List all active session ids.
    pub fn list_sessions(&self) -> Vec<SessionId> {
        self.lock().keys().cloned().collect()
    }

    /// Number of active sessions.
    pub fn session_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, Session>> {
        // A poisoned lock only means another caller panicked mid-call;
        // the table itself is still coherent, so keep serving it.
        self.sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

fn touch_session<'a>(
    sessions: &'a mut HashMap<SessionId, Session>,
    session_id: &SessionId,
) -> &'a mut Session {
    let session = sessions
        .entry(session_id.clone())
        .or_insert_with(|| Session::new(session_id.clone()));
    session.touch();
    session
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn id(raw: &str) -> SessionId {
        SessionId::from(raw)
    }

    mod approvals {
        use super::*;

        #[test]
        fn approved_command_is_found() {
            let manager = SessionManager::new();
            manager.approve_command(&id("s1"), "mkdir /tmp/test");
            assert!(manager.is_command_approved(&id("s1"), "mkdir /tmp/test"));
        }

        #[test]
        fn unapproved_command_is_not_found() {
            let manager = SessionManager::new();
            manager.approve_command(&id("s1"), "mkdir /tmp/test");
            assert!(!manager.is_command_approved(&id("s1"), "rm /tmp/test"));
        }

        #[test]
        fn approved_category_is_found() {
            let manager = SessionManager::new();
            manager.approve_category(&id("s1"), Category::Write);
            assert!(manager.is_category_approved(&id("s1"), Category::Write));
            assert!(!manager.is_category_approved(&id("s1"), Category::System));
        }

        #[test]
        fn approvals_are_session_scoped() {
            let manager = SessionManager::new();
            manager.approve_category(&id("s1"), Category::Write);
            manager.approve_command(&id("s1"), "mkdir t");
            assert!(!manager.is_category_approved(&id("s2"), Category::Write));
            assert!(!manager.is_command_approved(&id("s2"), "mkdir t"));
        }

        #[test]
        fn approving_twice_is_idempotent() {
            let manager = SessionManager::new();
            manager.approve_command(&id("s1"), "mkdir t");
            manager.approve_command(&id("s1"), "mkdir t");
            manager.approve_category(&id("s1"), Category::Read);
            manager.approve_category(&id("s1"), Category::Read);
            assert!(manager.is_command_approved(&id("s1"), "mkdir t"));
            assert!(manager.is_category_approved(&id("s1"), Category::Read));
            assert_eq!(manager.session_count(), 1);
        }

        #[test]
        fn category_approval_does_not_imply_command_approval() {
            let manager = SessionManager::new();
            manager.approve_category(&id("s1"), Category::Write);
            assert!(!manager.is_command_approved(&id("s1"), "mkdir t"));
        }
    }

    mod lazy_creation {
        use super::*;

        #[test]
        fn manager_starts_empty() {
            let manager = SessionManager::new();
            assert_eq!(manager.session_count(), 0);
            assert!(manager.list_sessions().is_empty());
        }

        #[test]
        fn approval_creates_the_session() {
            let manager = SessionManager::new();
            manager.approve_command(&id("s1"), "ls");
            assert_eq!(manager.list_sessions(), vec![id("s1")]);
        }

        #[test]
        fn lookup_of_unseen_id_materializes_an_empty_session() {
            let manager = SessionManager::new();
            assert!(!manager.is_command_approved(&id("ghost"), "ls"));
            assert_eq!(manager.session_count(), 1);
            assert!(manager.list_sessions().contains(&id("ghost")));
        }

        #[test]
        fn distinct_ids_create_distinct_sessions() {
            let manager = SessionManager::new();
            manager.approve_command(&id("s1"), "ls");
            manager.approve_command(&id("s2"), "ls");
            assert_eq!(manager.session_count(), 2);
        }
    }

    mod sweep {
        use super::*;

        #[test]
        fn zero_max_age_evicts_everything() {
            let manager = SessionManager::new();
            manager.approve_command(&id("s1"), "ls");
            manager.approve_command(&id("s2"), "ls");
            thread::sleep(Duration::from_millis(5));
            manager.sweep(Duration::ZERO);
            assert_eq!(manager.session_count(), 0);
        }

        #[test]
        fn large_max_age_evicts_nothing() {
            let manager = SessionManager::new();
            manager.approve_command(&id("s1"), "ls");
            manager.approve_command(&id("s2"), "ls");
            manager.sweep(Duration::from_secs(3600));
            assert_eq!(manager.session_count(), 2);
        }

        #[test]
        fn only_idle_sessions_are_evicted() {
            let manager = SessionManager::new();
            manager.approve_command(&id("stale"), "ls");
            thread::sleep(Duration::from_millis(50));
            manager.approve_command(&id("fresh"), "ls");
            manager.sweep(Duration::from_millis(25));
            assert_eq!(manager.list_sessions(), vec![id("fresh")]);
        }

        #[test]
        fn lookup_refreshes_idle_clock_and_survives_sweep() {
            let manager = SessionManager::new();
            manager.approve_command(&id("s1"), "ls");
            thread::sleep(Duration::from_millis(50));
            // The check itself counts as activity.
            assert!(manager.is_command_approved(&id("s1"), "ls"));
            manager.sweep(Duration::from_millis(25));
            assert_eq!(manager.session_count(), 1);
        }

        #[test]
        fn reused_id_after_sweep_starts_fresh() {
            let manager = SessionManager::new();
            manager.approve_command(&id("s1"), "mkdir t");
            manager.approve_category(&id("s1"), Category::Write);
            thread::sleep(Duration::from_millis(5));
            manager.sweep(Duration::ZERO);

            assert!(!manager.is_command_approved(&id("s1"), "mkdir t"));
            assert!(!manager.is_category_approved(&id("s1"), Category::Write));
        }
    }

    mod concurrency {
        use super::*;

        #[test]
        fn concurrent_approvals_and_checks() {
            let manager = Arc::new(SessionManager::new());
            let mut handles = Vec::new();

            for worker in 0..4 {
                let manager = Arc::clone(&manager);
                handles.push(thread::spawn(move || {
                    let session = SessionId::from(format!("worker-{worker}"));
                    for step in 0..50 {
                        let command = format!("cmd-{step}");
                        manager.approve_command(&session, &command);
                        assert!(manager.is_command_approved(&session, &command));
                    }
                }));
            }

            for handle in handles {
                handle.join().unwrap();
            }

            assert_eq!(manager.session_count(), 4);
        }
    }
}
