use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TraceKind {
    /// Opens a scope, closed by the matching [`TraceKind::End`].
    Begin,
    /// A single self contained step.
    Line,
    End,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TraceEntry {
    pub offset: u64,
    pub depth: usize,
    pub kind: TraceKind,
    pub tag: String,
    pub content: Option<String>,
    pub fields: Vec<(String, String)>,
}

/// Nested record of the steps taken while decoding, stamped with byte offsets.
///
/// Rendered through [`fmt::Display`] as an indented tree:
///
/// ```text
/// <visgroups count="1">
///   <visgroup name="walls" id="3"/>
/// </visgroups>
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trace {
    entries: Vec<TraceEntry>,
    open: Vec<String>,
}

impl Trace {
    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn depth(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn begin(&mut self, offset: u64, tag: &str, fields: Vec<(String, String)>) {
        self.entries.push(TraceEntry {
            offset,
            depth: self.open.len(),
            kind: TraceKind::Begin,
            tag: tag.to_owned(),
            content: None,
            fields,
        });
        self.open.push(tag.to_owned());
    }

    pub(crate) fn line(
        &mut self,
        offset: u64,
        tag: &str,
        content: Option<String>,
        fields: Vec<(String, String)>,
    ) {
        self.entries.push(TraceEntry {
            offset,
            depth: self.open.len(),
            kind: TraceKind::Line,
            tag: tag.to_owned(),
            content,
            fields,
        });
    }

    pub(crate) fn end(&mut self, offset: u64) {
        // an unbalanced end is ignored rather than underflowing the indent
        let Some(tag) = self.open.pop() else {
            return;
        };
        self.entries.push(TraceEntry {
            offset,
            depth: self.open.len(),
            kind: TraceKind::End,
            tag,
            content: None,
            fields: Vec::new(),
        });
    }
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:indent$}", "", indent = self.depth * 2)?;
        if self.kind == TraceKind::End {
            return write!(f, "</{}>", self.tag);
        }
        write!(f, "<{}", self.tag)?;
        for (key, value) in &self.fields {
            write!(f, " {key}=\"{value}\"")?;
        }
        match (self.kind, &self.content) {
            (TraceKind::Line, Some(content)) => write!(f, ">{}</{}>", content, self.tag),
            (TraceKind::Line, None) => write!(f, "/>"),
            _ => write!(f, ">"),
        }
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}
