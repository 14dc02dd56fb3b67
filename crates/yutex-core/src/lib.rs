//! Yutex Core
//!
//! This crate provides the core types shared by every part of the yutex
//! lexer.
//!
//! # Overview
//!
//! The core crate contains:
//! - [`Token`], [`TokenKind`], [`Span`] - Classified spans of a line
//! - [`BlockContext`], [`BlockKind`] - Entries of the lexer's context stack
//! - [`StateStack`] - The complete end-of-line lexer state
//! - [`YutexError`] - Error types

pub mod enums;
pub mod error;
pub mod state;
pub mod types;

pub use enums::{BlockKind, TokenKind};
pub use error::{Result, YutexError};
pub use state::{BlockContext, StateStack, MARKUP_LANGUAGE};
pub use types::{Span, Token};
