use tokio_util::sync::CancellationToken;

/// Scope that observation can be bound to
///
/// When a lifecycle ends every subscription bound to it is torn down and
/// receives no further state, even for actions that were already in flight.
#[derive(Debug, Clone, Default)]
pub struct Lifecycle {
    token: CancellationToken,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// End this lifecycle and every child created from it
    pub fn end(&self) {
        self.token.cancel();
    }

    pub fn is_ended(&self) -> bool {
        self.token.is_cancelled()
    }

    /// A lifecycle that ends together with this one, but can also end on its own
    pub fn child(&self) -> Lifecycle {
        Lifecycle {
            token: self.token.child_token(),
        }
    }

    /// Wait until this lifecycle has ended
    pub async fn ended(&self) {
        self.token.cancelled().await
    }

    pub(crate) fn child_token(&self) -> CancellationToken {
        self.token.child_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ending_parent_ends_children() {
        let parent = Lifecycle::new();
        let child = parent.child();

        parent.end();

        assert!(parent.is_ended());
        assert!(child.is_ended());
    }

    #[test]
    fn test_ending_child_keeps_parent() {
        let parent = Lifecycle::new();
        let child = parent.child();

        child.end();

        assert!(child.is_ended());
        assert!(!parent.is_ended());
    }
}
