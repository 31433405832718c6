use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{ConvertError, Result};
use crate::model::options::{Format, Options};
use crate::model::output::ConversionOutput;

/// Renders the artifact. For `Format::Js` this is a single
/// `var <name> = {...};` statement a page can pull in with a script tag.
pub fn render(output: &ConversionOutput, options: &Options) -> Result<String> {
	match options.format {
		Format::Js => {
			validate_variable(&options.variable)?;
			let body = serde_json::to_string(output)?;
			Ok(format!("var {} = {};\n", options.variable, body))
		}
		Format::Json => {
			let mut body = serde_json::to_string_pretty(output)?;
			body.push('\n');
			Ok(body)
		}
	}
}

/// Writes the artifact to `out_path`, replacing whatever is there. Content
/// goes to a temporary file next to the target first, so a failed run never
/// leaves a truncated artifact behind.
pub fn write_output(output: &ConversionOutput, out_path: &Path, options: &Options) -> Result<()> {
	let contents = render(output, options)?;

	let dir = match out_path.parent() {
		Some(parent) if !parent.as_os_str().is_empty() => parent,
		_ => Path::new("."),
	};
	fs::create_dir_all(dir).map_err(|e| ConvertError::io(dir, e))?;

	let mut file = NamedTempFile::new_in(dir).map_err(|e| ConvertError::io(dir, e))?;
	file.write_all(contents.as_bytes())
		.map_err(|e| ConvertError::io(file.path(), e))?;
	file.persist(out_path).map_err(|source| ConvertError::Persist {
		path: out_path.to_path_buf(),
		source,
	})?;

	Ok(())
}

/// Accepts plain JavaScript identifiers: `[A-Za-z_$][A-Za-z0-9_$]*`.
pub fn validate_variable(name: &str) -> Result<()> {
	let mut chars = name.chars();
	let valid = match chars.next() {
		Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
			chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
		}
		_ => false,
	};
	if valid {
		Ok(())
	} else {
		Err(ConvertError::InvalidVariable(name.to_string()))
	}
}
