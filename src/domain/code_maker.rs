//! Block-structured text builder for generated source files.
//!
//! Files are opened and closed in stack order; blocks nest inside the
//! innermost open file and indentation depends only on nesting depth.
//! Misuse (closing a file that is not the innermost one, emitting with no
//! open file, unbalanced blocks) is a programming error and panics.

use std::path::{Path, PathBuf};

use crate::domain::AppError;
use crate::ports::ScaffoldStore;

const DEFAULT_INDENT: usize = 2;

/// A finished file: relative path plus its lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedFile {
    path: PathBuf,
    lines: Vec<String>,
}

impl EmittedFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// File contents, newline-terminated.
    pub fn contents(&self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }

    /// Persist the file under `directory`. Fails if the target already exists.
    pub fn save<S: ScaffoldStore + ?Sized>(
        &self,
        directory: &Path,
        store: &S,
    ) -> Result<PathBuf, AppError> {
        let target = directory.join(&self.path);
        if store.exists(&target) {
            return Err(AppError::Write { path: target, reason: "file already exists".into() });
        }
        store.create_file(&target, &self.contents())?;
        tracing::debug!(path = %target.display(), lines = self.lines.len(), "saved generated file");
        Ok(target)
    }
}

#[derive(Debug)]
struct OpenFile {
    path: PathBuf,
    lines: Vec<String>,
    depth: usize,
}

/// Stack-discipline text builder.
#[derive(Debug)]
pub struct CodeMaker {
    indent_width: usize,
    open: Vec<OpenFile>,
    closed: Vec<EmittedFile>,
}

impl Default for CodeMaker {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT)
    }
}

impl CodeMaker {
    pub fn new(indent_width: usize) -> Self {
        Self { indent_width, open: Vec::new(), closed: Vec::new() }
    }

    /// Start a new file; subsequent output goes to it until it is closed.
    pub fn open_file(&mut self, path: impl Into<PathBuf>) {
        self.open.push(OpenFile { path: path.into(), lines: Vec::new(), depth: 0 });
    }

    /// Finish the innermost open file.
    ///
    /// # Panics
    /// If `path` is not the innermost open file or it still has open blocks.
    pub fn close_file(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let file = match self.open.pop() {
            Some(file) if file.path == path => file,
            Some(file) => panic!(
                "cannot close {}: innermost open file is {}",
                path.display(),
                file.path.display()
            ),
            None => panic!("cannot close {}: no file is open", path.display()),
        };
        assert!(
            file.depth == 0,
            "cannot close {}: {} block(s) still open",
            file.path.display(),
            file.depth
        );
        self.closed.push(EmittedFile { path: file.path, lines: file.lines });
    }

    /// Append one line at the current indentation. An empty line carries no indentation.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let width = self.indent_width;
        let file = self.current();
        let text = text.as_ref();
        if text.is_empty() {
            file.lines.push(String::new());
        } else {
            file.lines.push(format!("{}{}", " ".repeat(file.depth * width), text));
        }
    }

    pub fn blank(&mut self) {
        self.line("");
    }

    /// Write `header {` and indent.
    pub fn open_block(&mut self, header: impl AsRef<str>) {
        let header = header.as_ref();
        if header.is_empty() {
            self.indent("{");
        } else {
            self.indent(format!("{header} {{"));
        }
    }

    /// Unindent and write `}`.
    pub fn close_block(&mut self) {
        self.unindent("}");
    }

    /// Unindent and write `trailer` verbatim.
    pub fn close_block_with(&mut self, trailer: impl AsRef<str>) {
        self.unindent(trailer);
    }

    /// Write `text`, then indent.
    pub fn indent(&mut self, text: impl AsRef<str>) {
        self.line(text);
        self.current().depth += 1;
    }

    /// Unindent, then write `text`.
    ///
    /// # Panics
    /// If no block is open in the current file.
    pub fn unindent(&mut self, text: impl AsRef<str>) {
        let file = self.current();
        assert!(file.depth > 0, "unbalanced block close in {}", file.path.display());
        file.depth -= 1;
        self.line(text);
    }

    /// Files closed so far, in closing order.
    pub fn files(&self) -> &[EmittedFile] {
        &self.closed
    }

    /// Take the closed files.
    ///
    /// # Panics
    /// If a file is still open.
    pub fn into_files(self) -> Vec<EmittedFile> {
        if let Some(file) = self.open.last() {
            panic!("{} was never closed", file.path.display());
        }
        self.closed
    }

    /// Persist every closed file under `directory`, in closing order.
    ///
    /// Each file is persisted once; a failure stops further writes but files
    /// already written stay on disk.
    pub fn save<S: ScaffoldStore + ?Sized>(
        &mut self,
        directory: &Path,
        store: &S,
    ) -> Result<Vec<PathBuf>, AppError> {
        let files = std::mem::take(&mut self.closed);
        let mut written = Vec::with_capacity(files.len());
        for file in &files {
            written.push(file.save(directory, store)?);
        }
        Ok(written)
    }

    fn current(&mut self) -> &mut OpenFile {
        match self.open.last_mut() {
            Some(file) => file,
            None => panic!("no file is open"),
        }
    }
}
