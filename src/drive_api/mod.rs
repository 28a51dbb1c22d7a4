//! Drive API module split into logical submodules
//!
//! - auth: client secret loading, token store and the interactive code exchange
//! - client: the `DriveApi` capability trait and its implementations

pub mod auth;
pub mod client;

pub use auth::{
    obtain_credential, CredentialHandle, FileTokenStore, StoredToken, TokenStore, DRIVE_SCOPE,
};
pub use client::{DriveApi, DriveClient, DryRunDrive};
