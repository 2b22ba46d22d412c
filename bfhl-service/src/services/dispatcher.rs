//! Executes validated operations and shapes their result as envelope data.

use serde_json::{Map, Number, Value};
use std::str::FromStr;

use super::answerer::OneWordAnswerer;
use super::math;
use super::metrics;
use crate::models::{as_integer, BfhlError, Operation, OperationKind};

#[derive(Clone)]
pub struct Dispatcher {
    answerer: OneWordAnswerer,
    max_fibonacci_terms: usize,
}

impl Dispatcher {
    pub fn new(answerer: OneWordAnswerer, max_fibonacci_terms: usize) -> Self {
        Self {
            answerer,
            max_fibonacci_terms,
        }
    }

    /// Validate a request body and run the operation it names.
    pub async fn handle(&self, body: Map<String, Value>) -> Result<Value, BfhlError> {
        let operation = Operation::from_body(body, self.max_fibonacci_terms).inspect_err(|e| {
            tracing::info!(error = %e, "Rejected request");
            metrics::record_operation("invalid", e.kind());
        })?;

        let kind = operation.kind();
        let result = self.execute(operation).await;

        match &result {
            Ok(_) => metrics::record_operation(kind.key(), "success"),
            Err(e @ BfhlError::Provider(cause)) => {
                tracing::error!(
                    operation = %kind,
                    provider = self.answerer.provider_name(),
                    error = %cause,
                    "Operation failed"
                );
                metrics::record_operation(kind.key(), e.kind());
            }
            Err(e) if e.status_code().is_server_error() => {
                tracing::error!(operation = %kind, error = %e, "Operation failed");
                metrics::record_operation(kind.key(), e.kind());
            }
            Err(e) => {
                tracing::info!(operation = %kind, error = %e, "Operation rejected");
                metrics::record_operation(kind.key(), e.kind());
            }
        }

        result
    }

    /// Run one operation. Numeric work goes to the blocking pool so a slow
    /// request cannot stall the async workers.
    pub async fn execute(&self, operation: Operation) -> Result<Value, BfhlError> {
        match operation {
            Operation::Fibonacci(n) => blocking(move || fibonacci_terms(n)).await,
            Operation::Prime(items) => blocking(move || Ok(Value::from(filter_primes(&items)))).await,
            Operation::Lcm(values) => {
                blocking(move || {
                    let lcm = math::lcm_all(&values).ok_or(BfhlError::Shape(OperationKind::Lcm))??;
                    Ok(Value::from(lcm))
                })
                .await
            }
            Operation::Hcf(values) => {
                blocking(move || {
                    let hcf = math::gcd_all(&values).ok_or(BfhlError::Shape(OperationKind::Hcf))??;
                    Ok(Value::from(hcf))
                })
                .await
            }
            Operation::Ai(question) => {
                let answer = self.answerer.answer(&question).await?;
                Ok(Value::String(answer))
            }
        }
    }
}

async fn blocking<F>(task: F) -> Result<Value, BfhlError>
where
    F: FnOnce() -> Result<Value, BfhlError> + Send + 'static,
{
    tokio::task::spawn_blocking(task).await?
}

/// The first `n` Fibonacci numbers as exact JSON integers.
fn fibonacci_terms(n: usize) -> Result<Value, BfhlError> {
    let terms = math::fibonacci_sequence(n)
        .iter()
        .map(|term| Number::from_str(&term.to_string()).map(Value::Number))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Value::Array(terms))
}

/// The prime integers of `items`, in their original order. Anything that is
/// not an integer is skipped.
pub fn filter_primes(items: &[Value]) -> Vec<i64> {
    items
        .iter()
        .filter_map(as_integer)
        .filter(|n| math::is_prime(*n))
        .collect()
}
