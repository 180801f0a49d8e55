// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};

use storecap_core::{ExitCode, MachineError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ClientErrorCode {
    Network,
    Status,
    Decode,
    Validation,
    Busy,
    Config,
}

impl ClientErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Network => "network_error",
            Self::Status => "status_error",
            Self::Decode => "decode_error",
            Self::Validation => "validation_error",
            Self::Busy => "submission_in_flight",
            Self::Config => "config_error",
        }
    }

    #[must_use]
    pub const fn exit_code(self) -> ExitCode {
        match self {
            Self::Network | Self::Status | Self::Decode => ExitCode::DependencyFailure,
            Self::Validation | Self::Busy => ExitCode::Validation,
            Self::Config => ExitCode::Usage,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientError {
    pub code: ClientErrorCode,
    pub message: String,
}

impl ClientError {
    #[must_use]
    pub fn new(code: ClientErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn to_machine_error(&self) -> MachineError {
        MachineError::new(self.code.as_str(), &self.message)
    }
}

impl Display for ClientError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ClientError {}
