//! # Jewelcase
//!
//! Puts album art inside a CD jewel case: the image is scaled and cropped to a
//! square, aged with a handful of subtle effects and composited onto a fixed
//! frame.
//!
//! # Architecture: One-Way Pipeline
//!
//! ```text
//! decode ─▶ guard ─▶ scale & crop ─▶ effects ─▶ composite ─▶ encode
//! ```
//!
//! Each stage borrows the previous buffer and returns a new one. Decoding and
//! encoding sit behind the [`imaging::ImageBackend`] trait, so the pixel work
//! in [`process`] never touches the filesystem and can be tested with
//! synthetic buffers and a seeded random generator.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`process`] | The pipeline controller: already-processed guard, stage order, file-level entry point |
//! | [`imaging`] | Pixel stages, pure geometry math, the embedded frame, JPEG/PNG backend |
//! | [`batch`] | Directory mode: walk, filter by extension, process in parallel, report per file |
//! | [`config`] | Optional TOML config file, layered under the command-line flags |
//! | [`output`] | CLI output formatting for per-file results and batch summaries |
//!
//! # Design Decisions
//!
//! ## Size-Based Already-Processed Guard
//!
//! Output images always have the frame's exact dimensions, and album art
//! almost never does. Treating frame-sized input as "already done" makes
//! repeated runs over a music library idempotent without keeping any state on
//! disk. `--force` turns the check off.
//!
//! ## Randomness Is Drawn, Then Applied
//!
//! Corner radii, rotation angle and placement jitter are drawn up front from a
//! caller-supplied [`rand::Rng`]. The effect functions themselves are pure,
//! which keeps tests deterministic and makes concurrent batch runs safe: each
//! rayon worker uses its own thread-local generator.
//!
//! ## Nothing Written On Failure
//!
//! Extensions are validated before decoding, and the result is encoded into
//! memory before the output file is opened. An in-place run that fails leaves
//! the original untouched.

pub mod batch;
pub mod config;
pub mod imaging;
pub mod output;
pub mod process;

#[cfg(test)]
pub(crate) mod test_helpers;
