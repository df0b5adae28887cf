//! # IO Module
//!
//! Presentation-side collaborators of the node dialogs and the console
//! front-end that hosts them.

pub mod console;

/// Moves the operator to another page of the console
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Shows transient acknowledgments such as toasts
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
}
