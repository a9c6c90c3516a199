//! Delegate registration on an expected mock call.
//!
//! A [`Call`] describes one expected invocation of a mocked method. Attaching
//! a delegate ("run this function instead of returning canned values")
//! validates the delegate's signature against the method's first; a rejected
//! delegate is never registered.
//!
//! ```text
//! declared:   func(x ...interface{}) bool      (the mocked method)
//! substitute: func(x []int) bool               (the delegate)
//! ```

use sigcheck_solver::{SignatureError, check_signatures};
use sigcheck_types::{TypeDatabase, TypeId, type_to_string};
use std::fmt;
use thiserror::Error;
use tracing::{debug, trace};

/// What to do when the call happens.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Invoke a substitute function of this type with the call's arguments.
    Delegate(TypeId),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DelegateError {
    #[error("{receiver}.{method}: {source}")]
    Signature {
        receiver: String,
        method: String,
        #[source]
        source: SignatureError,
    },
}

impl DelegateError {
    pub fn signature_error(&self) -> &SignatureError {
        match self {
            DelegateError::Signature { source, .. } => source,
        }
    }
}

/// An expected call to `receiver.method`, whose signature is `method_type`.
pub struct Call<'db> {
    db: &'db dyn TypeDatabase,
    receiver: String,
    method: String,
    method_type: TypeId,
    actions: Vec<Action>,
}

impl<'db> Call<'db> {
    pub fn new(
        db: &'db dyn TypeDatabase,
        receiver: impl Into<String>,
        method: impl Into<String>,
        method_type: TypeId,
    ) -> Self {
        Self {
            db,
            receiver: receiver.into(),
            method: method.into(),
            method_type,
            actions: Vec::new(),
        }
    }

    pub fn receiver(&self) -> &str {
        &self.receiver
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn method_type(&self) -> TypeId {
        self.method_type
    }

    /// Registered actions, in registration order.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Register `substitute` to run in place of the mocked method.
    ///
    /// Nothing is registered when the signatures are incompatible.
    pub fn run_with(&mut self, substitute: TypeId) -> Result<&mut Self, DelegateError> {
        if let Err(source) = check_signatures(self.db, self.method_type, substitute) {
            debug!(
                receiver = self.receiver.as_str(),
                method = self.method.as_str(),
                error = %source,
                "delegate rejected"
            );
            return Err(DelegateError::Signature {
                receiver: self.receiver.clone(),
                method: self.method.clone(),
                source,
            });
        }

        trace!(
            receiver = self.receiver.as_str(),
            method = self.method.as_str(),
            substitute = substitute.0,
            "delegate registered"
        );
        self.actions.push(Action::Delegate(substitute));
        Ok(self)
    }
}

impl fmt::Debug for Call<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Call")
            .field("receiver", &self.receiver)
            .field("method", &self.method)
            .field("method_type", &self.method_type)
            .field("actions", &self.actions)
            .finish()
    }
}

impl fmt::Display for Call<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}({})",
            self.receiver,
            self.method,
            type_to_string(self.db, self.method_type)
        )
    }
}
