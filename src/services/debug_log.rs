/// Sink for the hook's step-by-step trace.
pub trait DebugLog: Send + Sync {
    fn record(&self, message: &str);
}
