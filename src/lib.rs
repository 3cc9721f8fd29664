//! `quest_audio`: the audio content pipeline for the Da Vinci Trees quest.
//!
//! This crate provides:
//! - The static dialogue table (which act each line belongs to, who speaks it)
//! - Deterministic asset naming for dialogue audio
//! - `audioUrl` injection into the quest's scene data
//! - Markup cleaning and locale parsing for dialogue text
//! - A pluggable speech synthesizer and the sequential synthesis batch
//!
//! Two binaries sit on top: `add-audio-urls` and `generate-audio`. Both are single-pass batch jobs
//! an operator runs by hand.

// Static data and naming.
pub mod asset;
pub mod dialogue;

// Scene data rewriting.
pub mod injector;

// Dialogue text.
pub mod locale;
pub mod markup;

// Speech synthesis.
pub mod batch;
pub mod synth;
pub mod voice;

#[cfg(feature = "elevenlabs")]
pub mod elevenlabs;

// Library-level configuration.
pub mod opts;

// Logging configuration and control.
#[cfg(feature = "logging")]
pub mod logging;

mod error;

pub use error::{Error, Result};
