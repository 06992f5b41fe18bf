//! UI components.

pub mod workflow_board;
