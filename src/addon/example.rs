use std::sync::Arc;

use crate::host::log::{HostLog, LogLevel};

/// The overridable call path demonstrated by the example addon. `call_func`
/// is the host-facing entry point; `func_to_call` is the leaf a derived
/// type replaces.
pub trait ExampleCall {
    fn host(&self) -> &dyn HostLog;
    fn message(&self) -> &str;

    fn func_to_call(&self, message: &str) {
        self.host().log(LogLevel::Notice, message);
    }

    fn call_func(&self) {
        self.func_to_call(self.message());
    }
}

/// Base example: logs its constructor message verbatim.
pub struct Example {
    host: Arc<dyn HostLog>,
    message: String,
}

impl Example {
    pub fn new(host: Arc<dyn HostLog>, message: impl Into<String>) -> Self {
        Self {
            host,
            message: message.into(),
        }
    }
}

impl ExampleCall for Example {
    fn host(&self) -> &dyn HostLog {
        self.host.as_ref()
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Derived example: the message chains through to the base, and
/// `func_to_call` is overridden to mark the emission.
pub struct ExtendedExample {
    base: Example,
}

impl ExtendedExample {
    pub fn new(host: Arc<dyn HostLog>, message: impl Into<String>) -> Self {
        Self {
            base: Example::new(host, message),
        }
    }
}

impl ExampleCall for ExtendedExample {
    fn host(&self) -> &dyn HostLog {
        self.base.host()
    }

    fn message(&self) -> &str {
        self.base.message()
    }

    fn func_to_call(&self, message: &str) {
        self.host()
            .log(LogLevel::Notice, &format!("overridden - {message}"));
    }
}
