use std::{
    fs,
    path::{Path, PathBuf},
};

use colored::Colorize;
use glob::Pattern;
use walkdir::WalkDir;

use crate::{
    binding::{FileBindings, SourceFile},
    error::ScanError,
    extract::{DEFAULT_LOOKAHEAD, extract_bindings},
};

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Settings for one scan.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// File extensions to read, without the leading dot.
    pub extensions: Vec<String>,
    /// Glob patterns or literal paths (relative to the root) to skip.
    pub ignores: Vec<String>,
    /// Bytes searched after each call site for its end.
    pub lookahead: usize,
    pub verbose: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extensions: vec!["cc".to_string()],
            ignores: Vec::new(),
            lookahead: DEFAULT_LOOKAHEAD,
            verbose: false,
        }
    }
}

/// Start a scan of `root`.
///
/// The returned iterator walks the tree lazily in file-name order and
/// yields one item per selected file, including files without bindings.
/// It stops after the first error.
pub fn scan(root: &Path, options: &ScanOptions) -> Scan {
    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in &options.ignores {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => {
                    if options.verbose {
                        eprintln!(
                            "{} Invalid ignore pattern '{}': {}",
                            "warning:".bold().yellow(),
                            p,
                            e
                        );
                    }
                }
            }
        } else {
            literal_ignore_paths.push(root.join(p));
        }
    }

    Scan {
        walker: WalkDir::new(root).sort_by_file_name().into_iter(),
        literal_ignore_paths,
        glob_patterns,
        extensions: options.extensions.clone(),
        lookahead: options.lookahead,
        verbose: options.verbose,
        skipped_count: 0,
        finished: false,
    }
}

/// A single pass over a source tree. See [`scan`].
pub struct Scan {
    walker: walkdir::IntoIter,
    literal_ignore_paths: Vec<PathBuf>,
    glob_patterns: Vec<Pattern>,
    extensions: Vec<String>,
    lookahead: usize,
    verbose: bool,
    skipped_count: usize,
    finished: bool,
}

impl Scan {
    /// Number of directory entries that could not be accessed so far.
    pub fn skipped_count(&self) -> usize {
        self.skipped_count
    }

    fn is_ignored(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.literal_ignore_paths
            .iter()
            .any(|ignore_path| path.starts_with(ignore_path))
            || self.glob_patterns.iter().any(|p| p.matches(&path_str))
    }

    fn is_scannable_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|wanted| wanted == ext))
    }
}

impl Iterator for Scan {
    type Item = Result<FileBindings, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let entry = match self.walker.next()? {
                Ok(e) => e,
                Err(e) => {
                    self.skipped_count += 1;
                    if self.verbose {
                        eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                    }
                    continue;
                }
            };
            let path = entry.path();

            if self.is_ignored(path) || !path.is_file() || !self.is_scannable_file(path) {
                continue;
            }

            if self.verbose {
                eprintln!("{} {}", "checking:".cyan(), path.display());
            }

            let result = read_source(path).and_then(|file| {
                let bindings = extract_bindings(&file, self.lookahead)?;
                Ok(FileBindings {
                    path: file.path,
                    bindings,
                })
            });
            if result.is_err() {
                self.finished = true;
            }
            return Some(result);
        }
    }
}

/// Read a source file; invalid UTF-8 is replaced rather than rejected.
fn read_source(path: &Path) -> Result<SourceFile, ScanError> {
    let bytes = fs::read(path).map_err(|source| ScanError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes).into_owned();
    Ok(SourceFile::new(path, text))
}
