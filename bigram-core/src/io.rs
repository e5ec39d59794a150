use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{BigramError, Result};

/// Splits a text into names on any whitespace.
///
/// Newlines, tabs and spaces all separate names; empty tokens are dropped.
pub fn parse_corpus(contents: &str) -> Vec<String> {
	contents.split_whitespace().map(str::to_owned).collect()
}

/// Reads a corpus file and returns its names.
///
/// Emptiness is not checked here: building a model from the result reports
/// an empty corpus as `BigramError::InvalidInput`.
pub fn read_corpus<P: AsRef<Path>>(filename: P) -> Result<Vec<String>> {
	let contents = fs::read_to_string(&filename)?;
	let names = parse_corpus(&contents);
	debug!("read {} names from {}", names.len(), filename.as_ref().display());
	Ok(names)
}

/// Extracts the base filename without extension.
///
/// Examples:
/// - `"./data/names.txt"` → `"names"`
/// - `"names.txt"` → `"names"`
pub fn get_filename<P: AsRef<Path>>(input_path: P) -> Result<String> {
	let stem = input_path
		.as_ref()
		.file_stem()
		.ok_or_else(|| BigramError::InvalidInput("Path has no filename".to_owned()))?;

	Ok(stem.to_string_lossy().to_string())
}

/// Lists all files with a given extension in a directory.
///
/// Returns file names only (no paths), sorted.
pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<String>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();

		if path.is_file()
			&& path.extension() == Some(std::ffi::OsStr::new(extension))
			&& let Some(name) = path.file_name()
		{
			files.push(name.to_string_lossy().to_string());
		}
	}

	files.sort();
	Ok(files)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn any_whitespace_separates_names() {
		assert_eq!(parse_corpus("Ava  Mia\nNoa\r\n\tLiam \n"), vec!["Ava", "Mia", "Noa", "Liam"]);
		assert!(parse_corpus(" \n\t ").is_empty());
	}

	#[test]
	fn filename_is_the_stem() {
		assert_eq!(get_filename("./data/names.txt").unwrap(), "names");
		assert_eq!(get_filename("names").unwrap(), "names");
		assert!(get_filename("").is_err());
	}

	#[test]
	fn missing_file_is_an_io_error() {
		let err = read_corpus("./this/file/does/not/exist.txt").unwrap_err();
		assert!(matches!(err, BigramError::Io(_)));
	}
}
