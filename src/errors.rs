// ABOUTME: Unified error handling for the Remy meal planning client
// ABOUTME: Defines error codes, the AppError type, and constructor helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Meal Intelligence

//! # Unified Error Handling
//!
//! Centralized error types for every module in the client. Errors carry a
//! machine-readable [`ErrorCode`] plus a human-readable message so the UI
//! layer can decide between inline validation hints, transient status
//! toasts, and actionable auth prompts without string matching.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Convenience alias used by all fallible operations in this crate
pub type AppResult<T> = Result<T, AppError>;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Authentication (1000-1999)
    /// Operation requires a signed-in session
    #[serde(rename = "AUTH_REQUIRED")]
    AuthRequired = 1000,
    /// Credentials were rejected by the auth service
    #[serde(rename = "AUTH_INVALID")]
    AuthInvalid = 1001,
    /// Session exists but has expired
    #[serde(rename = "AUTH_EXPIRED")]
    AuthExpired = 1002,

    // Validation (3000-3999)
    /// Malformed user input caught before any network call
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// A required field is missing
    #[serde(rename = "MISSING_REQUIRED_FIELD")]
    MissingRequiredField = 3001,
    /// A numeric value is outside its acceptable range
    #[serde(rename = "VALUE_OUT_OF_RANGE")]
    ValueOutOfRange = 3002,

    // Resources (4000-4999)
    /// The requested resource does not exist
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,

    // Connectivity & external services (5000-5999)
    /// No network, or the remote service is unreachable
    #[serde(rename = "CONNECTIVITY")]
    Connectivity = 5000,
    /// The recipe catalog or store returned an error
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5001,
    /// The store rejected a write
    #[serde(rename = "REMOTE_WRITE_FAILED")]
    RemoteWriteFailed = 5002,
    /// An operation exceeded its bounded wall-clock budget
    #[serde(rename = "TIMEOUT")]
    Timeout = 5003,
    /// The operation was superseded by a newer request and cancelled
    #[serde(rename = "CANCELLED")]
    Cancelled = 5004,

    // Internal (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Data serialization or deserialization failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9001,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::AuthRequired => "Sign in to perform this action",
            Self::AuthInvalid => "The provided credentials are invalid",
            Self::AuthExpired => "Your session has expired, please sign in again",
            Self::InvalidInput => "The provided input is invalid",
            Self::MissingRequiredField => "A required field is missing",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::Connectivity => "The service is unreachable right now",
            Self::ExternalServiceError => "An external service encountered an error",
            Self::RemoteWriteFailed => "Saving to the server failed",
            Self::Timeout => "The operation took too long and was abandoned",
            Self::Cancelled => "The operation was replaced by a newer request",
            Self::InternalError => "An internal error occurred",
            Self::SerializationError => "Data could not be read or written",
        }
    }

    /// Whether the failure class is resolved by the offline fallback path
    /// rather than surfaced as a blocking error
    #[must_use]
    pub const fn is_connectivity(self) -> bool {
        matches!(
            self,
            Self::Connectivity | Self::ExternalServiceError | Self::Timeout
        )
    }

    /// Whether the error calls for an actionable sign-in prompt
    #[must_use]
    pub const fn is_auth(self) -> bool {
        matches!(
            self,
            Self::AuthRequired | Self::AuthInvalid | Self::AuthExpired
        )
    }

    /// Whether the error was caught locally before any network call
    #[must_use]
    pub const fn is_validation(self) -> bool {
        matches!(
            self,
            Self::InvalidInput | Self::MissingRequiredField | Self::ValueOutOfRange
        )
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Authentication required error
    pub fn auth_required(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthRequired, message)
    }

    /// Invalid credentials error
    pub fn auth_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthInvalid, message)
    }

    /// Expired session error
    pub fn auth_expired(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthExpired, message)
    }

    /// Invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Out-of-range value error
    pub fn value_out_of_range(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValueOutOfRange, message)
    }

    /// Resource not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResourceNotFound, message)
    }

    /// Connectivity error (offline or unreachable service)
    pub fn connectivity(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Connectivity, message)
    }

    /// External service error
    pub fn external_service(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExternalServiceError, message)
    }

    /// Rejected remote write error
    pub fn remote_write(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::RemoteWriteFailed, message)
    }

    /// Bounded-timeout expiry error
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Timeout, message)
    }

    /// Superseded-request cancellation error
    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Cancelled, message)
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        let code = if err.is_timeout() {
            ErrorCode::Timeout
        } else if err.is_connect() {
            ErrorCode::Connectivity
        } else {
            ErrorCode::ExternalServiceError
        };
        Self::new(code, err.to_string()).with_source(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string()).with_source(err)
    }
}
