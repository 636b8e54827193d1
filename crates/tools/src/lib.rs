//! Small shared helpers for the taglex workspace.

pub mod utf8;
