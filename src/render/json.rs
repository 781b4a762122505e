use std::io::Write;

use anyhow::{Context, Result};

use crate::binding::FileBindings;

/// Write files with bindings as a pretty-printed JSON array.
pub fn render_json<W: Write>(files: &[FileBindings], writer: &mut W) -> Result<()> {
    let non_empty: Vec<&FileBindings> = files.iter().filter(|f| !f.is_empty()).collect();
    serde_json::to_writer_pretty(&mut *writer, &non_empty)
        .context("Failed to serialize bindings.")?;
    writeln!(writer)?;
    Ok(())
}
