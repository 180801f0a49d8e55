// SPDX-License-Identifier: Apache-2.0

use storecap_client::ClientError;
use storecap_core::{ExitCode, MachineError};
use storecap_policies::FieldError;
use storecap_session::SessionError;

#[derive(Debug)]
pub(crate) struct CliError {
    pub(crate) exit_code: ExitCode,
    pub(crate) machine: MachineError,
}

impl CliError {
    pub(crate) fn usage(message: impl std::fmt::Display) -> Self {
        Self {
            exit_code: ExitCode::Usage,
            machine: MachineError::new("usage_error", &message.to_string()),
        }
    }

    pub(crate) fn validation(message: &str) -> Self {
        Self {
            exit_code: ExitCode::Validation,
            machine: MachineError::new("validation_error", message),
        }
    }

    pub(crate) fn internal(message: impl std::fmt::Display) -> Self {
        Self {
            exit_code: ExitCode::Internal,
            machine: MachineError::new("internal_error", &message.to_string()),
        }
    }

    /// One detail entry per failing field.
    pub(crate) fn with_field_errors<'a>(
        mut self,
        errors: impl IntoIterator<Item = &'a FieldError>,
    ) -> Self {
        for error in errors {
            self.machine = self.machine.with_detail(&error.field, &error.message);
        }
        self
    }
}

impl From<ClientError> for CliError {
    fn from(err: ClientError) -> Self {
        Self {
            exit_code: err.code.exit_code(),
            machine: err.to_machine_error(),
        }
    }
}

impl From<SessionError> for CliError {
    fn from(err: SessionError) -> Self {
        let mut machine = MachineError::new(err.code(), &err.to_string());
        if let SessionError::Invalid(errors) = &err {
            for (flag, flag_errors) in &errors.flag_errors {
                for error in flag_errors {
                    machine = machine.with_detail(&format!("{flag}.{}", error.field), &error.message);
                }
            }
            for (name, error) in &errors.text_errors {
                machine = machine.with_detail(name, &error.message);
            }
        }
        Self {
            exit_code: ExitCode::Validation,
            machine,
        }
    }
}
