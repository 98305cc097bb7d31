//! BIDS-style naming convention.
//!
//! Paths are relative and always use `/`:
//!
//! ```text
//! sub-<sub>/
//!     [ses-<ses>/]
//!         <modality>/
//!             sub-<sub>[_ses-<ses>][_task-<task>]...[_part-<part>]_<suffix>
//! ```
//!
//! Only `sub`, `modality` and `suffix` are required.

use crate::{PathTemplate, TemplateOptions, TemplateResult};

/// Optional entities in filename order, starting after `sub`.
pub const OPTIONAL_ENTITIES: [&str; 9] = [
    "ses", "task", "acq", "ce", "rec", "run", "dir", "echo", "part",
];

/// Attributes that may accompany `modality: anat`.
const ANAT_ALLOWED: [&str; 9] = [
    "sub", "ses", "acq", "ce", "rec", "run", "echo", "part", "suffix",
];

/// Attributes that may accompany `modality: dwi`.
const DWI_ALLOWED: [&str; 8] = ["sub", "ses", "acq", "rec", "run", "dir", "part", "suffix"];

/// Builds the BIDS-style template.
pub fn bids() -> TemplateResult<PathTemplate> {
    let options = TemplateOptions::default()
        .relative()
        .with_file_separator("/");
    let mut template = PathTemplate::new(options)?;

    template.add_attribute("sub", true)?;
    template.add_attribute("modality", true)?;
    for entity in OPTIONAL_ENTITIES {
        template.add_attribute(entity, false)?;
    }
    template.add_attribute("suffix", true)?;

    // sub-<sub>/[ses-<ses>/]<modality>/
    template.add_component("sub", None, false, true)?;
    template.add_filesep()?;
    template.add_component("ses", None, false, false)?;
    template.add_filesep()?;
    template.add_component("modality", None, true, true)?;
    template.add_filesep()?;

    // filename
    template.add_component("sub", None, false, true)?;
    for entity in OPTIONAL_ENTITIES {
        template.add_component(entity, None, false, false)?;
    }
    template.add_component("suffix", None, true, true)?;

    template.add_inclusion_rule("modality", ["anat"], ANAT_ALLOWED)?;
    template.add_inclusion_rule("modality", ["dwi"], DWI_ALLOWED)?;

    template.terminate()?;
    Ok(template)
}
