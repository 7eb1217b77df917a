//! Relation triple rows.
//!
//! One row per line: `rel, arg1, ..., argN, freq`. An argument is `<NONE>`,
//! `<->`, or `lemma1&&lemma2-POS` where the part of speech follows the last
//! `-`.

use std::fmt;

use anyhow::{bail, Result};

pub const FIELD_SEPARATOR: &str = ", ";
pub const LEMMA_SEPARATOR: &str = "&&";
pub const NONE_ARG: &str = "<NONE>";
pub const ABSENT_ARG: &str = "<->";
pub const NOUN_POS: &str = "NN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    None,
    Absent,
    Word { lemmas: String, pos: String },
}

impl Argument {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw {
            NONE_ARG => Ok(Argument::None),
            ABSENT_ARG => Ok(Argument::Absent),
            _ => match raw.rsplit_once('-') {
                Some((lemmas, pos)) if !lemmas.is_empty() && !pos.is_empty() => {
                    Ok(Argument::Word {
                        lemmas: lemmas.to_string(),
                        pos: pos.to_string(),
                    })
                }
                _ => bail!("argument '{}' has no lemma-POS form", raw),
            },
        }
    }

    /// Lemmas of a noun argument, `None` for anything else.
    pub fn noun_lemmas(&self) -> Option<Vec<&str>> {
        match self {
            Argument::Word { lemmas, pos } if pos == NOUN_POS => {
                Some(lemmas.split(LEMMA_SEPARATOR).collect())
            }
            _ => None,
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::None => f.write_str(NONE_ARG),
            Argument::Absent => f.write_str(ABSENT_ARG),
            Argument::Word { lemmas, pos } => write!(f, "{}-{}", lemmas, pos),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triple {
    pub relation: String,
    pub args: Vec<Argument>,
    pub freq: String,
}

impl Triple {
    pub fn parse(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line
            .trim_end_matches(['\n', '\r'])
            .split(FIELD_SEPARATOR)
            .collect();
        let (relation, rest) = match fields.split_first() {
            Some((relation, rest)) if !relation.is_empty() => (relation, rest),
            _ => bail!("row has no relation"),
        };
        let Some((freq, args)) = rest.split_last() else {
            bail!("row has no frequency column");
        };
        let args = args
            .iter()
            .map(|raw| Argument::parse(raw))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            relation: relation.to_string(),
            args,
            freq: freq.to_string(),
        })
    }
}
