/// Sample organization: walks a source tree and copies audio samples into
/// category directories under a destination root.
///
/// Name collisions are resolved with a run-scoped record of the file names
/// already placed, so a stale file from an earlier run is replaced while a
/// second same-named sample from this run gets an indexed name instead.
use crate::error::{OrganizeError, OrganizeResult};
use crate::output::OutputFormatter;
use crate::sample_category::{Category, RuleSet, is_audio_file};
use std::collections::{BTreeMap, HashSet};
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Number of `<stem>_<index>.<ext>` candidates tried before a colliding
/// sample is dropped (indices `0..=999_998`).
pub const DEFAULT_INDEX_LIMIT: u32 = 999_999;

/// Lowercased file names placed in the destination tree during one run.
///
/// Starts empty and only grows. It is never filled from what is already on
/// disk: a destination file whose name is absent here is treated as stale.
#[derive(Debug, Clone, Default)]
pub struct ProcessedNames {
    names: HashSet<String>,
}

impl ProcessedNames {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if a file with this name (case-insensitive) was placed.
    pub fn contains(&self, file_name: &str) -> bool {
        self.names.contains(&file_name.to_lowercase())
    }

    /// Records a placed file name.
    pub fn record(&mut self, file_name: &str) {
        self.names.insert(file_name.to_lowercase());
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// How a qualifying sample ended up in the destination tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Copied to its category path, which was free.
    Copied,
    /// A file not placed by this run occupied the category path; it was
    /// deleted and replaced.
    Replaced,
    /// The category path was taken by a file from this run; the sample was
    /// copied to this indexed path directly under the destination root.
    Indexed(PathBuf),
    /// Every indexed candidate was taken; the sample was not copied.
    Dropped,
}

/// A single file found during traversal, paired with where it should go.
#[derive(Debug, Clone)]
pub struct FileTask {
    /// Path of the source sample.
    pub source: PathBuf,
    /// Root of the destination tree.
    pub destination_root: PathBuf,
}

/// Counts and failures collected over one run.
#[derive(Debug, Clone, Default)]
pub struct OrganizeReport {
    /// Files copied to a free category path.
    pub copied: usize,
    /// Stale destination files replaced.
    pub replaced: usize,
    /// Files copied under an indexed name.
    pub indexed: usize,
    /// Files dropped because no indexed name was free.
    pub dropped: usize,
    /// Files skipped because they are not audio samples.
    pub skipped: usize,
    /// Placed files per category.
    pub per_category: BTreeMap<Category, usize>,
    /// Files and directories that could not be processed, with the reason.
    pub failures: Vec<(PathBuf, String)>,
}

impl OrganizeReport {
    /// Number of files placed in the given category.
    pub fn placed_in(&self, category: Category) -> usize {
        self.per_category.get(&category).copied().unwrap_or(0)
    }

    /// Total number of files written to the destination tree.
    pub fn total_placed(&self) -> usize {
        self.copied + self.replaced + self.indexed
    }

    /// Returns true if any file or directory failed.
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    fn record_placement(&mut self, category: Category, placement: &Placement) {
        match placement {
            Placement::Copied => self.copied += 1,
            Placement::Replaced => self.replaced += 1,
            Placement::Indexed(_) => self.indexed += 1,
            Placement::Dropped => {
                self.dropped += 1;
                return;
            }
        }
        *self.per_category.entry(category).or_insert(0) += 1;
    }
}

/// Copies audio samples from a source tree into category directories.
///
/// The organizer owns the state of one run: the rule table, the processed
/// name set and the report. Traversal is depth-first and single-threaded.
#[derive(Debug)]
pub struct SampleOrganizer {
    destination_root: PathBuf,
    verbose: bool,
    rules: RuleSet,
    processed: ProcessedNames,
    index_limit: u32,
    report: OrganizeReport,
    destination_canonical: Option<PathBuf>,
}

impl SampleOrganizer {
    /// Creates an organizer writing into `destination_root`.
    ///
    /// When `verbose` is true every copy is announced on stdout.
    pub fn new(destination_root: impl Into<PathBuf>, verbose: bool) -> Self {
        Self {
            destination_root: destination_root.into(),
            verbose,
            rules: RuleSet::standard(),
            processed: ProcessedNames::new(),
            index_limit: DEFAULT_INDEX_LIMIT,
            report: OrganizeReport::default(),
            destination_canonical: None,
        }
    }

    /// Replaces the classification rules.
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    /// Continues from a processed name set of an earlier traversal.
    pub fn with_processed_names(mut self, processed: ProcessedNames) -> Self {
        self.processed = processed;
        self
    }

    /// Sets how many indexed names are tried for a same-run collision.
    pub fn with_index_limit(mut self, limit: u32) -> Self {
        self.index_limit = limit;
        self
    }

    pub fn processed_names(&self) -> &ProcessedNames {
        &self.processed
    }

    pub fn report(&self) -> &OrganizeReport {
        &self.report
    }

    pub fn into_report(self) -> OrganizeReport {
        self.report
    }

    /// Walks `source_root` recursively and places every audio sample found.
    ///
    /// Failures are reported and recorded in the report; they never stop the
    /// walk. A directory that cannot be listed is abandoned, its siblings
    /// are still visited.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use samplesort::sample_organizer::SampleOrganizer;
    /// use std::path::Path;
    ///
    /// let mut organizer = SampleOrganizer::new("/music/Sorted", false);
    /// organizer.organize(Path::new("/music/Splice/Samples"));
    /// println!("{} samples placed", organizer.report().total_placed());
    /// ```
    pub fn organize(&mut self, source_root: &Path) {
        info!(
            source = %source_root.display(),
            destination = %self.destination_root.display(),
            "organizing samples"
        );
        if let Err(e) = fs::create_dir_all(&self.destination_root) {
            let error = OrganizeError::DirectoryCreationFailed {
                path: self.destination_root.clone(),
                source: e,
            };
            self.record_failure(&self.destination_root.clone(), error);
        }
        self.destination_canonical = fs::canonicalize(&self.destination_root).ok();

        if source_root.is_dir() {
            self.walk(source_root);
        } else {
            let error = OrganizeError::DirectoryListFailed {
                path: source_root.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
            };
            self.record_failure(source_root, error);
        }

        info!(
            placed = self.report.total_placed(),
            failed = self.report.failures.len(),
            "organization finished"
        );
    }

    fn walk(&mut self, source_root: &Path) {
        let destination = self.destination_canonical.clone();
        let mut entries = WalkDir::new(source_root)
            .follow_links(true)
            .into_iter()
            .filter_entry(move |entry| !is_destination(entry, destination.as_deref()));

        while let Some(entry) = entries.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    // Listing failures abandon the rest of that directory.
                    // Loops and dangling links only lose the entry itself.
                    let abandon_dir = e.depth() > 0
                        && e.loop_ancestor().is_none()
                        && e.path().is_none_or(|p| p.is_dir());
                    let path = e.path().unwrap_or(source_root).to_path_buf();
                    let error = OrganizeError::DirectoryListFailed {
                        path: path.clone(),
                        source: io::Error::from(e),
                    };
                    self.record_failure(&path, error);
                    if abandon_dir {
                        entries.skip_current_dir();
                    }
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                continue;
            }

            let task = FileTask {
                source: entry.into_path(),
                destination_root: self.destination_root.clone(),
            };
            if let Err(e) = self.organize_file(&task) {
                self.record_failure(&task.source, e);
            }
        }
    }

    /// Places a single file.
    ///
    /// Returns `Ok(None)` if the file is not an audio sample. Otherwise the
    /// file is classified and copied according to the collision policy:
    ///
    /// 1. The category directory is created if needed.
    /// 2. If the category path is free, the sample is copied there.
    /// 3. If it is taken by a file not placed during this run, that file is
    ///    deleted and replaced.
    /// 4. If it is taken by a file placed during this run, the sample is
    ///    copied to the first free `<stem>_<index>.<ext>` directly under the
    ///    destination root, or dropped when no index is free.
    ///
    /// The lowercased file name is recorded only after a successful copy.
    pub fn organize_file(&mut self, task: &FileTask) -> OrganizeResult<Option<Placement>> {
        let file_name = match task.source.file_name() {
            Some(name) if is_audio_file(&task.source) && task.source.is_file() => name,
            _ => {
                self.report.skipped += 1;
                return Ok(None);
            }
        };

        let name = file_name.to_string_lossy();
        let category = self.rules.classify(&name);
        let destination = task
            .destination_root
            .join(category.relative_dir())
            .join(file_name);

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(|e| OrganizeError::DirectoryCreationFailed {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        if self.verbose {
            OutputFormatter::request(&task.source, &destination);
        }

        let placement = if !path_exists(&destination)? {
            copy_sample(&task.source, &destination)?;
            Placement::Copied
        } else if !self.processed.contains(&name) {
            fs::remove_file(&destination).map_err(|e| OrganizeError::RemoveFailed {
                path: destination.clone(),
                source: e,
            })?;
            copy_sample(&task.source, &destination)?;
            Placement::Replaced
        } else {
            match self.find_free_index(&task.destination_root, file_name)? {
                Some(indexed) => {
                    copy_sample(&task.source, &indexed)?;
                    Placement::Indexed(indexed)
                }
                None => Placement::Dropped,
            }
        };

        match &placement {
            Placement::Dropped => {
                debug!(
                    source = %task.source.display(),
                    limit = self.index_limit,
                    "no free indexed name, sample dropped"
                );
            }
            placed => {
                let written = match placed {
                    Placement::Indexed(path) => path.as_path(),
                    _ => destination.as_path(),
                };
                debug!(
                    source = %task.source.display(),
                    destination = %written.display(),
                    category = %category,
                    "sample placed"
                );
                if self.verbose {
                    OutputFormatter::copied(&task.source, written);
                }
                self.processed.record(&name);
            }
        }

        self.report.record_placement(category, &placement);
        Ok(Some(placement))
    }

    fn find_free_index(
        &self,
        destination_root: &Path,
        file_name: &OsStr,
    ) -> OrganizeResult<Option<PathBuf>> {
        for index in 0..self.index_limit {
            let candidate = destination_root.join(indexed_file_name(Path::new(file_name), index));
            if !path_exists(&candidate)? {
                return Ok(Some(candidate));
            }
        }
        Ok(None)
    }

    fn record_failure(&mut self, path: &Path, error: OrganizeError) {
        warn!(path = %path.display(), error = %error, "skipping after error");
        OutputFormatter::error(&error.to_string());
        self.report
            .failures
            .push((path.to_path_buf(), error.to_string()));
    }
}

/// Organizes every audio sample under `source_root` into `destination_root`
/// and returns the run report.
///
/// # Examples
///
/// ```no_run
/// use samplesort::sample_organizer::organize;
/// use std::path::Path;
///
/// let report = organize(Path::new("Samples"), Path::new("Sorted"), true);
/// if report.has_failures() {
///     eprintln!("{} samples could not be copied", report.failures.len());
/// }
/// ```
pub fn organize(source_root: &Path, destination_root: &Path, verbose: bool) -> OrganizeReport {
    let mut organizer = SampleOrganizer::new(destination_root, verbose);
    organizer.organize(source_root);
    organizer.into_report()
}

/// Builds `<stem>_<index>.<ext>` from a file name.
///
/// # Examples
///
/// ```
/// use samplesort::sample_organizer::indexed_file_name;
/// use std::path::Path;
///
/// assert_eq!(indexed_file_name(Path::new("snare_1.wav"), 0), "snare_1_0.wav");
/// assert_eq!(indexed_file_name(Path::new("take.2.mp3"), 12), "take.2_12.mp3");
/// ```
pub fn indexed_file_name(file_name: &Path, index: u32) -> OsString {
    let mut name = file_name.file_stem().unwrap_or_default().to_os_string();
    name.push(format!("_{index}"));
    if let Some(ext) = file_name.extension() {
        name.push(".");
        name.push(ext);
    }
    name
}

/// Returns true if `entry` is the destination directory, which must not be
/// scanned as part of the source.
fn is_destination(entry: &DirEntry, destination: Option<&Path>) -> bool {
    match destination {
        Some(destination) if entry.file_type().is_dir() => {
            fs::canonicalize(entry.path()).is_ok_and(|d| d == destination)
        }
        _ => false,
    }
}

fn path_exists(path: &Path) -> OrganizeResult<bool> {
    path.try_exists().map_err(|e| OrganizeError::ExistsCheckFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

fn copy_sample(source: &Path, destination: &Path) -> OrganizeResult<()> {
    fs::copy(source, destination)
        .map(|_| ())
        .map_err(|e| OrganizeError::CopyFailed {
            source_path: source.to_path_buf(),
            destination: destination.to_path_buf(),
            source: e,
        })
}
