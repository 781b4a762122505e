use std::io::{self, Write};

use crate::binding::{Binding, FileBindings};

/// Format one binding as `<name>=<key>\t # <description>[, alternates <list>]`.
pub fn format_binding(binding: &Binding) -> String {
    match &binding.alternates {
        Some(alternates) => format!(
            "{}={}\t # {}, alternates {}",
            binding.name, binding.key, binding.description, alternates
        ),
        None => format!(
            "{}={}\t # {}",
            binding.name, binding.key, binding.description
        ),
    }
}

/// Write one file group: header, bindings, blank line.
///
/// Files without bindings produce no output.
pub fn render_file<W: Write>(file: &FileBindings, writer: &mut W) -> io::Result<()> {
    if file.is_empty() {
        return Ok(());
    }

    writeln!(writer, "## keys from: {}", file.path.display())?;
    for binding in &file.bindings {
        writeln!(writer, "{}", format_binding(binding))?;
    }
    writeln!(writer)
}

/// Write every file group as it arrives.
///
/// Stops at the first `Err`; groups written before it stay in `writer`.
pub fn render_text<W, I, E>(files: I, writer: &mut W) -> anyhow::Result<()>
where
    W: Write,
    I: IntoIterator<Item = Result<FileBindings, E>>,
    E: std::error::Error + Send + Sync + 'static,
{
    for file in files {
        render_file(&file?, writer)?;
    }
    Ok(())
}
