/// ToolRequirement - an external executable an ecosystem needs
///
/// Availability is decided by running `check_command`; exit code zero means
/// the tool is present. Evaluated lazily, right before the ecosystem runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolRequirement {
    name: String,
    check_command: String,
    install_command: Option<String>,
}

impl ToolRequirement {
    pub fn new(name: impl Into<String>, check_command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            check_command: check_command.into(),
            install_command: None,
        }
    }

    pub fn with_install_command(mut self, install_command: impl Into<String>) -> Self {
        self.install_command = Some(install_command.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn check_command(&self) -> &str {
        &self.check_command
    }

    pub fn install_command(&self) -> Option<&str> {
        self.install_command.as_deref()
    }
}
