//! Client services.

mod reconciler;

pub use reconciler::{
    FailurePolicy, ReconcileConfig, SuccessPolicy, SyncError, SyncOutcome, SyncReconciler,
};
