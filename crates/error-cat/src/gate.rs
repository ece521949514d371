use error_cat_core::Environment;

use crate::config::GateSettings;

/// Decides whether errors may be forwarded to the crash-reporting service.
///
/// Holds only variable names; every answer is read from the environment at
/// call time.
#[derive(Debug, Clone)]
pub struct ReportingGate {
    env_var: String,
    key_var: String,
    test_designation: String,
}

impl ReportingGate {
    pub fn new(settings: &GateSettings) -> Self {
        Self {
            env_var: settings.env_var.clone(),
            key_var: settings.key_var.clone(),
            test_designation: settings.test_designation.clone(),
        }
    }

    /// Eligible iff not running under the test designation and a non-empty
    /// credential is present.
    pub fn can_report(&self, env: &dyn Environment) -> bool {
        !self.is_test(env) && self.credential(env).is_some()
    }

    pub fn credential(&self, env: &dyn Environment) -> Option<String> {
        env.var(&self.key_var).filter(|key| !key.is_empty())
    }

    pub fn designation(&self, env: &dyn Environment) -> Option<String> {
        env.var(&self.env_var)
    }

    fn is_test(&self, env: &dyn Environment) -> bool {
        self.designation(env).as_deref() == Some(self.test_designation.as_str())
    }
}

impl Default for ReportingGate {
    fn default() -> Self {
        Self::new(&GateSettings::default())
    }
}
