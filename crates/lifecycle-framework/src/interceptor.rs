//! # Operation Interceptors
//!
//! Cross-cutting hooks that run around every store operation.
//!
//! An [`Interceptor`] gets a `pre_handle` call before the operation runs and a
//! `post_handle` call after it completes. `pre_handle` may refuse the operation by
//! returning `false`, in which case the store returns
//! [`LifecycleError::Rejected`] and nothing changes.
//!
//! The [`InterceptorChain`] behaves like a servlet filter chain:
//!
//! ```text
//! pre(a) -> pre(b) -> operation -> post(b) -> post(a)
//! ```
//!
//! If `b` rejects, `a` still gets its `post_handle` (with the rejection as outcome)
//! and `b` does not.
//!
//! Interceptors are wired explicitly through
//! [`LifecycleStore::with_interceptor`](crate::LifecycleStore::with_interceptor).

use crate::error::LifecycleError;
use crate::operation::Operation;
use crate::state::EntityId;
use std::sync::Arc;
use tracing::{info, warn};

/// What is about to run, or has just run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation {
    pub operation: Operation,
    /// The identity the operation targets, when it has one.
    pub id: Option<EntityId>,
}

impl Invocation {
    pub fn new(operation: Operation, id: Option<EntityId>) -> Self {
        Self { operation, id }
    }
}

/// A hook invoked around store operations.
pub trait Interceptor: Send + Sync {
    /// Name reported in [`LifecycleError::Rejected`].
    fn name(&self) -> &str;

    /// Called before the operation. Return `false` to block it.
    fn pre_handle(&self, _call: &Invocation) -> bool {
        true
    }

    /// Called after the operation, with its outcome.
    fn post_handle(&self, _call: &Invocation, _outcome: Result<(), &LifecycleError>) {}
}

/// Logs every operation before and after it runs.
#[derive(Debug, Default, Clone)]
pub struct LoggingInterceptor;

impl Interceptor for LoggingInterceptor {
    fn name(&self) -> &str {
        "logging"
    }

    fn pre_handle(&self, call: &Invocation) -> bool {
        info!(operation = %call.operation, id = ?call.id, "Before operation");
        true
    }

    fn post_handle(&self, call: &Invocation, outcome: Result<(), &LifecycleError>) {
        match outcome {
            Ok(()) => info!(operation = %call.operation, id = ?call.id, "After operation"),
            Err(e) => warn!(operation = %call.operation, id = ?call.id, error = %e, "After operation"),
        }
    }
}

/// Ordered list of interceptors.
#[derive(Clone, Default)]
pub struct InterceptorChain {
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl InterceptorChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, interceptor: Arc<dyn Interceptor>) {
        self.interceptors.push(interceptor);
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Runs `operation` inside the chain.
    pub fn run<R>(
        &self,
        call: Invocation,
        operation: impl FnOnce() -> Result<R, LifecycleError>,
    ) -> Result<R, LifecycleError> {
        let mut entered = 0;
        let mut result = None;
        for interceptor in &self.interceptors {
            if !interceptor.pre_handle(&call) {
                warn!(operation = %call.operation, interceptor = interceptor.name(), "Rejected");
                result = Some(Err(LifecycleError::Rejected {
                    operation: call.operation,
                    interceptor: interceptor.name().to_string(),
                }));
                break;
            }
            entered += 1;
        }

        let result = match result {
            Some(rejected) => rejected,
            None => operation(),
        };

        let outcome = result.as_ref().map(|_| ());
        for interceptor in self.interceptors[..entered].iter().rev() {
            interceptor.post_handle(&call, outcome);
        }
        result
    }
}

impl std::fmt::Debug for InterceptorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.interceptors.iter().map(|i| i.name()).collect();
        f.debug_struct("InterceptorChain").field("interceptors", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Recorder {
        name: &'static str,
        allow: bool,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl Interceptor for Recorder {
        fn name(&self) -> &str {
            self.name
        }

        fn pre_handle(&self, call: &Invocation) -> bool {
            self.log.lock().unwrap().push(format!("pre {} {}", self.name, call.operation));
            self.allow
        }

        fn post_handle(&self, call: &Invocation, outcome: Result<(), &LifecycleError>) {
            self.log
                .lock()
                .unwrap()
                .push(format!("post {} {} ok={}", self.name, call.operation, outcome.is_ok()));
        }
    }

    fn recorder(name: &'static str, allow: bool, log: &Arc<Mutex<Vec<String>>>) -> Arc<dyn Interceptor> {
        Arc::new(Recorder {
            name,
            allow,
            log: log.clone(),
        })
    }

    #[test]
    fn test_post_hooks_unwind_in_reverse() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut chain = InterceptorChain::new();
        chain.push(recorder("a", true, &log));
        chain.push(recorder("b", true, &log));

        let value = chain
            .run(Invocation::new(Operation::Flush, None), || {
                log.lock().unwrap().push("flush".into());
                Ok(3)
            })
            .unwrap();

        assert_eq!(value, 3);
        assert_eq!(
            *log.lock().unwrap(),
            vec!["pre a flush", "pre b flush", "flush", "post b flush ok=true", "post a flush ok=true"]
        );
    }

    #[test]
    fn test_rejection_skips_operation_and_later_hooks() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut chain = InterceptorChain::new();
        chain.push(recorder("a", true, &log));
        chain.push(recorder("guard", false, &log));
        chain.push(recorder("c", true, &log));

        let result: Result<(), _> = chain.run(Invocation::new(Operation::Remove, None), || {
            panic!("operation must not run")
        });

        match result {
            Err(LifecycleError::Rejected { operation, interceptor }) => {
                assert_eq!(operation, Operation::Remove);
                assert_eq!(interceptor, "guard");
            }
            other => panic!("expected rejection, got {:?}", other),
        }
        assert_eq!(
            *log.lock().unwrap(),
            vec!["pre a remove", "pre guard remove", "post a remove ok=false"]
        );
    }

    #[test]
    fn test_empty_chain_runs_operation() {
        let chain = InterceptorChain::new();
        assert!(chain.is_empty());
        let value = chain.run(Invocation::new(Operation::Find, None), || Ok("found"));
        assert_eq!(value.unwrap(), "found");
    }
}
