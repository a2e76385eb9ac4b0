/// Where user-facing warnings go while the hook runs.
pub trait Reporter: Send + Sync {
    fn warn(&self, message: &str);
}
