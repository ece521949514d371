use std::collections::HashMap;
use std::sync::RwLock;

/// Read-only view of environment state.
///
/// Implementations must answer from current state on every call; callers
/// rely on changes being visible without reconstruction.
pub trait Environment: Send + Sync {
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory environment that can be changed after it has been handed out
#[derive(Debug, Default)]
pub struct StaticEnv {
    vars: RwLock<HashMap<String, String>>,
}

impl StaticEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        let mut vars = self.vars.write().unwrap_or_else(|e| e.into_inner());
        vars.insert(key.into(), value.into());
    }

    pub fn remove(&self, key: &str) {
        let mut vars = self.vars.write().unwrap_or_else(|e| e.into_inner());
        vars.remove(key);
    }
}

impl Environment for StaticEnv {
    fn var(&self, key: &str) -> Option<String> {
        let vars = self.vars.read().unwrap_or_else(|e| e.into_inner());
        vars.get(key).cloned()
    }
}

impl<T: Environment + ?Sized> Environment for std::sync::Arc<T> {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_static_env_reflects_later_changes() {
        let env = Arc::new(StaticEnv::new().with("APP_ENV", "production"));
        let shared: Arc<dyn Environment> = env.clone();

        assert_eq!(shared.var("APP_ENV").as_deref(), Some("production"));

        env.set("APP_ENV", "test");
        assert_eq!(shared.var("APP_ENV").as_deref(), Some("test"));

        env.remove("APP_ENV");
        assert_eq!(shared.var("APP_ENV"), None);
    }

    #[test]
    fn test_process_env_reads_std_env() {
        let path = std::env::var("PATH").ok();
        assert_eq!(ProcessEnv.var("PATH"), path);
        assert_eq!(ProcessEnv.var("ERROR_CAT_SURELY_UNSET_VARIABLE"), None);
    }
}
