use crate::StoreError;

/// Reducer - pure function that produces new state from current state + action
///
/// Returning an error rejects the action; the store keeps the state it had
/// before the action was dispatched.
pub trait Reducer<S, A>: Send + Sync + 'static {
    fn reduce(&self, state: S, action: &A) -> Result<S, StoreError>;
}

impl<S, A, F> Reducer<S, A> for F
where
    F: Fn(S, &A) -> Result<S, StoreError> + Send + Sync + 'static,
{
    fn reduce(&self, state: S, action: &A) -> Result<S, StoreError> {
        self(state, action)
    }
}
