//! Sample categorization by file name.
//!
//! This module maps a sample's file name to one of a fixed set of destination
//! categories (e.g. "Drums/Kick", "Other/Loop") using an ordered list of
//! keyword rules. The first rule whose keywords appear in the lowercased name
//! wins.
//!
//! # Examples
//!
//! ```
//! use samplesort::sample_category::{Category, RuleSet};
//!
//! let rules = RuleSet::default();
//! assert_eq!(rules.classify("808_snare_hit.wav"), Category::Drum808);
//! assert_eq!(rules.classify("Big_KICK_01.wav"), Category::Kick);
//! assert_eq!(rules.classify("ambient_loop.wav"), Category::Loop);
//! assert_eq!(rules.classify("texture_swoosh.wav"), Category::Other);
//! ```
use std::fmt;
use std::path::{Path, PathBuf};

/// File extensions (lowercase, without the dot) that count as audio samples.
pub const AUDIO_EXTENSIONS: &[&str] = &["wav", "mp3"];

/// A destination category: a group folder and a subgroup folder inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Drums/808
    Drum808,
    /// Drums/Snare
    Snare,
    /// Drums/Kick
    Kick,
    /// Drums/Clap
    Clap,
    /// Drums/Hat
    Hat,
    /// Drums/Other
    OtherDrum,
    /// Other/Loop
    Loop,
    /// Other/Other
    Other,
}

impl Category {
    /// Every category, in rule priority order with the fallback last.
    pub const ALL: [Category; 8] = [
        Category::Drum808,
        Category::Snare,
        Category::Kick,
        Category::Clap,
        Category::Hat,
        Category::OtherDrum,
        Category::Loop,
        Category::Other,
    ];

    /// Returns the top-level folder name for this category.
    ///
    /// # Examples
    ///
    /// ```
    /// use samplesort::sample_category::Category;
    ///
    /// assert_eq!(Category::Snare.group(), "Drums");
    /// assert_eq!(Category::Loop.group(), "Other");
    /// ```
    pub fn group(&self) -> &'static str {
        match self {
            Category::Drum808
            | Category::Snare
            | Category::Kick
            | Category::Clap
            | Category::Hat
            | Category::OtherDrum => "Drums",
            Category::Loop | Category::Other => "Other",
        }
    }

    /// Returns the folder name inside the group folder.
    pub fn subgroup(&self) -> &'static str {
        match self {
            Category::Drum808 => "808",
            Category::Snare => "Snare",
            Category::Kick => "Kick",
            Category::Clap => "Clap",
            Category::Hat => "Hat",
            Category::OtherDrum => "Other",
            Category::Loop => "Loop",
            Category::Other => "Other",
        }
    }

    /// Returns `group/subgroup` as a relative path.
    pub fn relative_dir(&self) -> PathBuf {
        Path::new(self.group()).join(self.subgroup())
    }

    /// Returns a display label such as `"Drums/808"`, independent of the
    /// platform path separator.
    pub fn label(&self) -> String {
        format!("{}/{}", self.group(), self.subgroup())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// One entry of the rule table: a category and the lowercase keywords that
/// select it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRule {
    /// Category assigned when any keyword matches.
    pub category: Category,
    /// Lowercase substrings searched for in the lowercased file name.
    pub keywords: Vec<String>,
}

impl ClassificationRule {
    /// Creates a rule; keywords are lowercased on the way in.
    pub fn new(category: Category, keywords: &[&str]) -> Self {
        Self {
            category,
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    /// Returns true if any keyword occurs in `lowercase_name`.
    ///
    /// The caller is responsible for lowercasing the name.
    pub fn matches(&self, lowercase_name: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| lowercase_name.contains(keyword.as_str()))
    }
}

/// Ordered keyword rules plus the category used when nothing matches.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<ClassificationRule>,
    fallback: Category,
}

impl RuleSet {
    /// Creates the standard sample rule table.
    ///
    /// Priority order: 808, snare, kick, clap, hat, generic drum, loop, and
    /// finally Other/Other.
    pub fn standard() -> Self {
        let mut rules = Self::empty(Category::Other);
        rules.push_rule(ClassificationRule::new(Category::Drum808, &["808"]));
        rules.push_rule(ClassificationRule::new(
            Category::Snare,
            &["snare", "_snr", "snr_"],
        ));
        rules.push_rule(ClassificationRule::new(
            Category::Kick,
            &["kick", "_kck", "kck_"],
        ));
        rules.push_rule(ClassificationRule::new(
            Category::Clap,
            &["clap", "_clp", "clp_"],
        ));
        rules.push_rule(ClassificationRule::new(Category::Hat, &["hat", "ht_", "_ht"]));
        rules.push_rule(ClassificationRule::new(
            Category::OtherDrum,
            &["drum", "_drm", "drm_"],
        ));
        rules.push_rule(ClassificationRule::new(Category::Loop, &["loop"]));
        rules
    }

    /// Creates a rule set with no rules; every name maps to `fallback`.
    pub fn empty(fallback: Category) -> Self {
        Self {
            rules: Vec::new(),
            fallback,
        }
    }

    /// Appends a rule. It is checked after all rules already present.
    pub fn push_rule(&mut self, rule: ClassificationRule) {
        self.rules.push(rule);
    }

    /// The rules in evaluation order.
    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }

    /// The category returned when no rule matches.
    pub fn fallback(&self) -> Category {
        self.fallback
    }

    /// Determines the category for a file name (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use samplesort::sample_category::{Category, RuleSet};
    ///
    /// let rules = RuleSet::standard();
    /// assert_eq!(rules.classify("KICK_01.WAV"), Category::Kick);
    /// assert_eq!(rules.classify("vox_chop.wav"), Category::Other);
    /// ```
    pub fn classify(&self, file_name: &str) -> Category {
        let lowercase_name = file_name.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowercase_name))
            .map(|rule| rule.category)
            .unwrap_or(self.fallback)
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

/// Classifies a file name with the standard rule table.
pub fn classify(file_name: &str) -> Category {
    RuleSet::standard().classify(file_name)
}

/// Returns true if the path has an audio extension from [`AUDIO_EXTENSIONS`].
///
/// Only the final extension counts and the comparison ignores case.
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| AUDIO_EXTENSIONS.contains(&ext.as_str()))
}
