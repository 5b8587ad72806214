use std::{
    fmt,
    io::{self, BufReader, Read, Seek, SeekFrom},
};

use crate::{
    config::LoadOptions,
    error::{DecodeError, Diagnostic},
    trace::Trace,
};

/// Sequential reader over one RMF source.
///
/// Offsets are relative to where the reader stood when the loader was created.
/// Every read is bounds checked against the source length up front, so a short
/// source reports [`DecodeError::Truncated`] before anything is allocated for it.
pub struct Loader<R> {
    buffer: BufReader<R>,
    offset: u64,
    len: u64,
    version: f32,
    depth: usize,
    options: LoadOptions,
    trace: Option<Trace>,
    diagnostics: Vec<Diagnostic>,
}

impl<R: Read + Seek> Loader<R> {
    pub fn new(reader: R, options: LoadOptions) -> Result<Self, DecodeError> {
        let mut buffer = BufReader::new(reader);

        let io_err = |source| DecodeError::Io { offset: 0, source };
        let start = buffer.stream_position().map_err(io_err)?;
        let end = buffer.seek(SeekFrom::End(0)).map_err(io_err)?;
        buffer.seek(SeekFrom::Start(start)).map_err(io_err)?;

        Ok(Self {
            buffer,
            offset: 0,
            len: end.saturating_sub(start),
            version: 0.0,
            depth: 0,
            trace: options.trace.then(Trace::default),
            options,
            diagnostics: Vec::new(),
        })
    }

    /// Reads exactly `n` bytes.
    pub fn read(&mut self, n: usize) -> Result<Vec<u8>, DecodeError> {
        self.ensure(n as u64)?;
        let mut data = vec![0; n];
        self.read_unchecked(&mut data)?;
        Ok(data)
    }

    /// Fills `dest` completely.
    pub fn read_into(&mut self, dest: &mut [u8]) -> Result<(), DecodeError> {
        self.ensure(dest.len() as u64)?;
        self.read_unchecked(dest)
    }

    /// Moves the offset by `relative` bytes in either direction.
    pub fn seek(&mut self, relative: i64) -> Result<(), DecodeError> {
        let target = self.offset as i128 + relative as i128;
        if target < 0 || target > self.len as i128 {
            return Err(DecodeError::OutOfRange {
                offset: self.offset,
                relative,
                len: self.len,
            });
        }
        self.buffer
            .seek_relative(relative)
            .map_err(|source| self.io_error(source))?;
        self.offset = target as u64;
        Ok(())
    }

    /// Consumes `n` reserved bytes. Running out of source here is truncation, not a bad seek.
    pub fn skip(&mut self, n: usize) -> Result<(), DecodeError> {
        self.ensure(n as u64)?;
        self.seek(n as i64)
    }

    /// Fails with [`DecodeError::Truncated`] unless `n` more bytes are available.
    pub fn ensure(&self, n: u64) -> Result<(), DecodeError> {
        let available = self.remaining();
        if n > available {
            return Err(DecodeError::Truncated {
                offset: self.offset,
                needed: n,
                available,
            });
        }
        Ok(())
    }

    /// Capacity to reserve for `count` records of at least `record_size` bytes,
    /// bounded by what the source could possibly still hold.
    pub fn capacity_hint(&self, count: u32, record_size: usize) -> usize {
        let fits = self.remaining() / record_size.max(1) as u64;
        (count as u64).min(fits) as usize
    }

    fn read_unchecked(&mut self, dest: &mut [u8]) -> Result<(), DecodeError> {
        self.buffer
            .read_exact(dest)
            .map_err(|source| self.io_error(source))?;
        self.offset += dest.len() as u64;
        Ok(())
    }

    fn io_error(&self, source: io::Error) -> DecodeError {
        DecodeError::Io {
            offset: self.offset,
            source,
        }
    }
}

impl<R> Loader<R> {
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn remaining(&self) -> u64 {
        self.len - self.offset
    }

    /// Format version read from the document header, 0 before it has been read.
    pub fn version(&self) -> f32 {
        self.version
    }

    pub(crate) fn set_version(&mut self, version: f32) {
        self.version = version;
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Trace recorded so far, if tracing was enabled.
    pub fn trace(&self) -> Option<&Trace> {
        self.trace.as_ref()
    }

    pub fn take_trace(&mut self) -> Option<Trace> {
        self.trace.take()
    }

    pub(crate) fn diagnose(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub(crate) fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Descends one level into the object tree.
    pub(crate) fn enter(&mut self) -> Result<(), DecodeError> {
        if self.depth >= self.options.max_depth {
            return Err(DecodeError::DepthExceeded {
                offset: self.offset,
                max_depth: self.options.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn tracing(&self) -> bool {
        self.trace.is_some() || log::log_enabled!(log::Level::Trace)
    }

    fn indent(&self) -> usize {
        self.trace.as_ref().map_or(0, Trace::depth) * 2
    }

    pub(crate) fn log_begin(&mut self, tag: &str, fields: &[(&str, &dyn fmt::Display)]) {
        if !self.tracing() {
            return;
        }
        let fields = collect_fields(fields);
        log::trace!(
            "{:#08x} {:indent$}{tag} {}",
            self.offset,
            "",
            join_fields(&fields),
            indent = self.indent()
        );
        let offset = self.offset;
        if let Some(trace) = self.trace.as_mut() {
            trace.begin(offset, tag, fields);
        }
    }

    pub(crate) fn log_oneline(
        &mut self,
        tag: &str,
        content: Option<&dyn fmt::Display>,
        fields: &[(&str, &dyn fmt::Display)],
    ) {
        if !self.tracing() {
            return;
        }
        let fields = collect_fields(fields);
        let content = content.map(ToString::to_string);
        log::trace!(
            "{:#08x} {:indent$}{tag} {} {}",
            self.offset,
            "",
            join_fields(&fields),
            content.as_deref().unwrap_or_default(),
            indent = self.indent()
        );
        let offset = self.offset;
        if let Some(trace) = self.trace.as_mut() {
            trace.line(offset, tag, content, fields);
        }
    }

    pub(crate) fn log_end(&mut self) {
        let offset = self.offset;
        if let Some(trace) = self.trace.as_mut() {
            trace.end(offset);
        }
    }
}

fn collect_fields(fields: &[(&str, &dyn fmt::Display)]) -> Vec<(String, String)> {
    fields
        .iter()
        .map(|(key, value)| ((*key).to_owned(), value.to_string()))
        .collect()
}

fn join_fields(fields: &[(String, String)]) -> String {
    fields
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join(" ")
}
