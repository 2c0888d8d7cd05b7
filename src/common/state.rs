// Client context shared by every view and flow

use std::sync::Arc;

use super::config::ExercisePolicy;
use crate::auth::SessionStore;
use crate::gateway::Gateway;

/// Explicit dependency bundle handed to views and auth flows: the data gateway,
/// the session store and the behavior switches from configuration.
pub struct ClientContext<G, S> {
    pub gateway: Arc<G>,
    pub session: Arc<S>,
    pub exercise_policy: ExercisePolicy,
}

impl<G: Gateway, S: SessionStore> ClientContext<G, S> {
    pub fn new(gateway: G, session: S) -> Self {
        Self {
            gateway: Arc::new(gateway),
            session: Arc::new(session),
            exercise_policy: ExercisePolicy::default(),
        }
    }

    pub fn with_exercise_policy(mut self, policy: ExercisePolicy) -> Self {
        self.exercise_policy = policy;
        self
    }
}

impl<G, S> Clone for ClientContext<G, S> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            session: Arc::clone(&self.session),
            exercise_policy: self.exercise_policy,
        }
    }
}
