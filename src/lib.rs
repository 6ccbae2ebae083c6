//! # Gatehouse - Authentication Service Library
//!
//! This is a facade crate that re-exports all public APIs from the gatehouse components.
//! Use this crate to get access to all authentication functionality in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! gatehouse = { path = "../gatehouse" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Mobile`, `Password`, `User`, etc.
//! - **Port traits**: `UserStore`, `VerificationCodeStore`, `SmsClient`
//! - **Use cases**: `RegisterUseCase`, `LoginUseCase`, etc.
//! - **Adapters**: `PostgresUserStore`, `RedisVerificationCodeStore`, `TwilioSmsClient`, etc.
//! - **Service**: `AuthService` - The main entry point for the auth service

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use gatehouse_core::*;
}

// Re-export most commonly used core types at the root level
pub use gatehouse_core::{
    Email, Mobile, NewUser, Password, ProfileUpdate, User, UserId, UserName, VerificationCode,
};

// ============================================================================
// Port Traits
// ============================================================================

/// Port trait definitions
pub mod ports {
    pub use gatehouse_core::{
        SmsClient, UserStore, UserStoreError, VerificationCodeStore, VerificationCodeStoreError,
    };
}

// Re-export port traits at root level
pub use gatehouse_core::{
    SmsClient, UserStore, UserStoreError, VerificationCodeStore, VerificationCodeStoreError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use gatehouse_application::*;
}

// Re-export use cases at root level
pub use gatehouse_application::{
    ChangePasswordUseCase, LoginUseCase, RegisterUseCase, RequestPasswordChangeUseCase,
    UpdateProfileUseCase, VerifyTwoFaUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP route handlers, error boundary, rate limiting
    pub mod http {
        pub use gatehouse_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use gatehouse_adapters::persistence::*;
    }

    /// SMS client implementations
    pub mod sms {
        pub use gatehouse_adapters::sms::*;
    }

    /// Token and session-cookie utilities
    pub mod auth {
        pub use gatehouse_adapters::auth::*;
    }

    /// Configuration
    pub mod config {
        pub use gatehouse_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use gatehouse_adapters::{
    HashMapUserStore, HashMapVerificationCodeStore, JwtTokenService, MockSmsClient,
    PostgresUserStore, RedisVerificationCodeStore, RefreshCookieSettings, TwilioSmsClient,
};

// ============================================================================
// Auth Service (Main Entry Point)
// ============================================================================

/// Main auth service
pub use gatehouse_service::{AuthService, RateLimits};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
