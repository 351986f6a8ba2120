//! Phase 3: Merge or halt
//!
//! The last phase either writes the merged configuration or, when no
//! fragment was selected, tells the pipeline to stop. Halting is a normal,
//! successful outcome: nothing relevant changed.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use super::Outcome;
use crate::error::Result;
use crate::merge::StructuredMerge;
use crate::pipeline::PipelineControl;

/// Write `content` to `output`, creating missing parent directories.
pub fn write_output(output: &Path, content: &str) -> Result<()> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(output, content)?;
    Ok(())
}

/// Execute Phase 3.
///
/// With no `sources` the pipeline is halted and the merger is never invoked.
/// Otherwise the sources are merged in order and the result written to
/// `output`.
pub fn execute(
    sources: Vec<PathBuf>,
    output: &Path,
    merger: &dyn StructuredMerge,
    pipeline: &dyn PipelineControl,
) -> Result<Outcome> {
    if sources.is_empty() {
        info!("No YAML files to merge, halting");
        pipeline.halt()?;
        return Ok(Outcome::Halted);
    }

    info!("Merging {} YAML file(s) into {}", sources.len(), output.display());
    let merged = merger.merge(&sources)?;
    write_output(output, &merged)?;

    Ok(Outcome::Merged {
        sources,
        output: output.to_path_buf(),
    })
}
