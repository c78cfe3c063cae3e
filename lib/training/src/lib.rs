//! # DecoPlan Training
//!
//! Static LoRA fine-tuning tables for the vision-language model behind
//! DecoPlan, tuned for a single 24-26 GB Ada-generation GPU.
//!
//! Nothing here runs a training job. The tables are printed by the
//! `decoplan training-config` command and read by the external training
//! script.
//!
//! ```rust
//! use decoplan_training::{by_name, RECOMMENDED};
//!
//! let strategy = by_name("max-speed").unwrap();
//! assert_eq!(strategy, &RECOMMENDED);
//! assert_eq!(strategy.effective_batch_size(), 16);
//! ```

pub mod strategy;

pub use strategy::{
    all, by_name, AdditionalOptimizations, LoraStrategy, Quantization, ADDITIONAL_OPTIMIZATIONS,
    BALANCED, DEFAULT_BASE_MODEL, LONG_CONTEXT, MAX_SPEED, MEMORY_EFFICIENT, RECOMMENDED,
};
