//! # Domain Module
//!
//! Business rules for adding nodes to a chart of accounts.
//!
//! - **account_code**: code sanitization, digit budget and submission validation
//! - **node_dialog**: the add-root and add-child dialog flow
//! - **messages**: text shown inline by the dialogs
//! - **models**: account codes, chart references and validation errors
//!
//! Nothing here knows how the chart service is reached or how the dialogs
//! are drawn.

pub mod account_code;
pub mod messages;
pub mod models;
pub mod node_dialog;

pub use account_code::*;
pub use messages::*;
pub use node_dialog::*;
