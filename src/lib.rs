//! samplesort - sort a sample library into category folders
//!
//! This library classifies audio sample files by keywords in their file names
//! and copies them into a `Drums/...` / `Other/...` destination tree, resolving
//! name collisions between files coming from different source folders.

pub mod cli;
pub mod error;
pub mod output;
pub mod sample_category;
pub mod sample_organizer;

pub use error::{CliError, OrganizeError, OrganizeResult};
pub use sample_category::{Category, ClassificationRule, RuleSet, classify, is_audio_file};
pub use sample_organizer::{OrganizeReport, Placement, ProcessedNames, SampleOrganizer, organize};

pub use cli::{Args, run};
