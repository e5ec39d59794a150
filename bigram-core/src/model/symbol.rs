use std::fmt;

/// One token of a wrapped training name.
///
/// `Start` and `End` never occur in natural input: a name `"ana"` is modeled
/// as `Start, 'a', 'n', 'a', End`. No separator character is inserted
/// between the sentinels and the name.
///
/// The derived ordering (`Start < Char(_) < End`, characters by code point)
/// is the iteration order of every table in the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
	Start,
	Char(char),
	End,
}

impl Symbol {
	/// Returns the character carried by this symbol, if any.
	pub fn as_char(&self) -> Option<char> {
		match self {
			Symbol::Char(c) => Some(*c),
			_ => None,
		}
	}
}

impl From<char> for Symbol {
	fn from(c: char) -> Self {
		Symbol::Char(c)
	}
}

impl fmt::Display for Symbol {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Symbol::Start => f.write_str("<START>"),
			Symbol::Char(c) => write!(f, "{c}"),
			Symbol::End => f.write_str("<END>"),
		}
	}
}
