//! Evaluation flow: pairing a typed expression with its asynchronous result.
//!
//! The store inserts the input entry right away and hands back a
//! [`PendingEvaluation`]. Resolving it needs no access to the store, so
//! other output can land in the log while the evaluator is busy; the result
//! is inserted wherever the log points when it completes.

use crate::model::{EntryId, EvaluationError, EvaluationResult, FrameId, SessionId};
use async_trait::async_trait;
use tracing::debug;

/// Where an evaluation request comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationContext {
    /// Typed into the debug console.
    Repl,
}

/// An expression to evaluate against a session and, optionally, a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationRequest {
    /// Expression text exactly as typed.
    pub expression: String,
    /// Session to evaluate in; `None` fails without calling the evaluator.
    pub session: Option<SessionId>,
    /// Selected stack frame, if any.
    pub frame: Option<FrameId>,
    /// Request origin.
    pub context: EvaluationContext,
}

/// A successfully evaluated expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Display value.
    pub value: String,
    /// Type name, if the runtime reports one.
    pub type_name: Option<String>,
    /// Handle for lazily fetching children of a structured value.
    pub children_reference: Option<u64>,
}

/// The expression-evaluation subsystem.
#[async_trait]
pub trait Evaluator: Send + Sync {
    /// Evaluate `request.expression` in the requested session and frame.
    async fn evaluate(&self, request: &EvaluationRequest) -> Result<Evaluation, EvaluationError>;
}

/// An evaluation whose input is already in the log and whose result is not.
#[derive(Debug, Clone)]
#[must_use = "a pending evaluation does nothing until resolved and completed"]
pub struct PendingEvaluation {
    request: EvaluationRequest,
    result_id: EntryId,
}

impl PendingEvaluation {
    pub(crate) fn new(request: EvaluationRequest, result_id: EntryId) -> Self {
        Self { request, result_id }
    }

    /// The request that will be sent to the evaluator.
    pub fn request(&self) -> &EvaluationRequest {
        &self.request
    }

    /// Run the evaluator and build the result entry.
    ///
    /// Never fails: an evaluator error becomes an unavailable result whose
    /// value is the error message.
    pub async fn resolve<E>(self, evaluator: &E) -> EvaluationResult
    where
        E: Evaluator + ?Sized,
    {
        let outcome = match self.request.session {
            Some(_) => evaluator.evaluate(&self.request).await,
            None => Err(EvaluationError::NoSession),
        };

        match outcome {
            Ok(evaluation) => EvaluationResult::resolved(
                self.result_id,
                evaluation.value,
                evaluation.type_name,
                evaluation.children_reference,
            ),
            Err(err) => {
                debug!(
                    expression = %self.request.expression,
                    error = %err,
                    "Evaluation failed"
                );
                EvaluationResult::unavailable(self.result_id, err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{IdAllocator, IdKind};

    struct Echo;

    #[async_trait]
    impl Evaluator for Echo {
        async fn evaluate(
            &self,
            request: &EvaluationRequest,
        ) -> Result<Evaluation, EvaluationError> {
            match request.frame {
                Some(_) => Ok(Evaluation {
                    value: request.expression.to_uppercase(),
                    type_name: Some("string".to_string()),
                    children_reference: None,
                }),
                None => Err(EvaluationError::NoFrame),
            }
        }
    }

    fn pending(session: Option<&str>, frame: Option<u64>) -> PendingEvaluation {
        let mut ids = IdAllocator::new();
        PendingEvaluation::new(
            EvaluationRequest {
                expression: "abc".to_string(),
                session: session.map(|s| SessionId::new(s).expect("valid session id")),
                frame: frame.map(FrameId),
                context: EvaluationContext::Repl,
            },
            ids.allocate(IdKind::Result),
        )
    }

    #[tokio::test]
    async fn resolve_success_is_available() {
        let result = pending(Some("s1"), Some(1)).resolve(&Echo).await;

        assert!(result.is_available());
        assert_eq!(result.value(), "ABC");
        assert_eq!(result.type_name(), Some("string"));
        assert_eq!(result.id().as_str(), "result:0");
    }

    #[tokio::test]
    async fn evaluator_error_becomes_unavailable_result() {
        let result = pending(Some("s1"), None).resolve(&Echo).await;

        assert!(!result.is_available());
        assert_eq!(result.value(), "No stack frame selected");
    }

    #[tokio::test]
    async fn missing_session_fails_without_calling_evaluator() {
        let result = pending(None, Some(1)).resolve(&Echo).await;

        assert!(!result.is_available());
        assert_eq!(result.value(), "No active debug session");
    }

    #[tokio::test]
    async fn resolve_accepts_trait_objects() {
        let evaluator: Box<dyn Evaluator> = Box::new(Echo);
        let result = pending(Some("s1"), Some(2)).resolve(evaluator.as_ref()).await;
        assert!(result.is_available());
    }
}
