// mal-embed - Embedding API for mal
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # mal-embed
//!
//! A high-level embedding API for the mal interpreter.
//!
//! Each [`Engine`] owns one root environment, so separate engines are
//! independent sessions that never see each other's definitions.
//!
//! ## Quick Start
//!
//! ```rust
//! use mal_embed::Engine;
//!
//! let engine = Engine::new().unwrap();
//! let result = engine.eval("(+ 1 2 3)").unwrap();
//! assert_eq!(result.to_string(), "6");
//! ```
//!
//! ## Registering Native Functions
//!
//! ```rust
//! use mal_embed::{Engine, MalVal, Result};
//!
//! let engine = Engine::new().unwrap();
//! engine.register_native("double", |args: &[MalVal]| -> Result<MalVal> {
//!     match args.first() {
//!         Some(MalVal::Int(n)) => Ok(MalVal::int(n * 2)),
//!         _ => Err(mal_embed::Error::type_error("int", "other")),
//!     }
//! });
//! let result = engine.eval("(double 21)").unwrap();
//! assert_eq!(result.to_string(), "42");
//! ```

mod convert;
mod engine;

pub use convert::{FromMalVal, IntoMalVal, from_mal, to_mal};
pub use engine::Engine;

// Re-export core types for convenience
pub use mal_core::{Error, Result};
pub use mal_parser::MalVal;
