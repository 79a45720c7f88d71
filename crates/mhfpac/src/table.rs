//! Pointer table layout of the container.
//!
//! The ranges are reverse-engineered knowledge about one file format, kept as
//! static configuration. Ranges may overlap; `skills` lies inside `skillActive`.

use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::error::{Error, Result};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumString,
    EnumIter,
    IntoStaticStr,
    Display,
)]
pub enum TableName {
    #[strum(serialize = "skills")]
    Skills,
    #[strum(serialize = "skillActive")]
    SkillActive,
    #[strum(serialize = "zskills")]
    ZSkills,
    #[strum(serialize = "skillDesc")]
    SkillDesc,
}

impl TableName {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// The configured byte range for this table
    pub const fn table(self) -> PointerTable {
        match self {
            Self::Skills => PointerTable::new(self, 0x0A1C, 0x0A20),
            Self::SkillActive => PointerTable::new(self, 0x0A1C, 0x0BC0),
            Self::ZSkills => PointerTable::new(self, 0x0FB0, 0x0FBC),
            Self::SkillDesc => PointerTable::new(self, 0x00B8, 0x00C0),
        }
    }
}

/// A named half-open byte range `[start, end)` of 32-bit pointer slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerTable {
    pub name: TableName,
    pub start: usize,
    pub end: usize,
}

impl PointerTable {
    pub const fn new(name: TableName, start: usize, end: usize) -> Self {
        Self { name, start, end }
    }

    /// Slot offsets in increasing order, ignoring the buffer length
    pub fn slots(&self) -> impl Iterator<Item = usize> {
        (self.start..self.end).step_by(crate::bytes::WORD)
    }

    pub fn slot_count(&self) -> usize {
        self.slots().count()
    }
}

/// Configured tables, in scan order
pub const DEFAULT_TABLES: [PointerTable; 4] = [
    TableName::Skills.table(),
    TableName::SkillActive.table(),
    TableName::ZSkills.table(),
    TableName::SkillDesc.table(),
];

fn valid_names() -> String {
    TableName::iter()
        .map(|n| n.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a comma-separated table selection.
///
/// `None` or an empty selection means every configured table.
pub fn parse_table_selection(selection: Option<&str>) -> Result<Vec<PointerTable>> {
    let mut chosen = Vec::new();

    for raw in selection.unwrap_or_default().split(',') {
        let name = raw.trim();
        if name.is_empty() {
            continue;
        }
        let parsed: TableName = name.parse().map_err(|_| Error::UnknownTable {
            name: name.to_string(),
            valid: valid_names(),
        })?;
        chosen.push(parsed.table());
    }

    if chosen.is_empty() {
        return Ok(DEFAULT_TABLES.to_vec());
    }
    Ok(chosen)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let layout: Vec<(&str, usize, usize)> = DEFAULT_TABLES
            .iter()
            .map(|t| (t.name.as_str(), t.start, t.end))
            .collect();
        assert_eq!(
            layout,
            vec![
                ("skills", 0x0A1C, 0x0A20),
                ("skillActive", 0x0A1C, 0x0BC0),
                ("zskills", 0x0FB0, 0x0FBC),
                ("skillDesc", 0x00B8, 0x00C0),
            ]
        );
    }

    #[test]
    fn test_slot_counts() {
        assert_eq!(TableName::Skills.table().slot_count(), 1);
        assert_eq!(TableName::SkillActive.table().slot_count(), 105);
        assert_eq!(TableName::ZSkills.table().slot_count(), 3);
        assert_eq!(TableName::SkillDesc.table().slot_count(), 2);
    }

    #[test]
    fn test_table_name_round_trip() {
        for name in TableName::iter() {
            assert_eq!(name.as_str().parse::<TableName>().unwrap(), name);
            assert_eq!(name.to_string(), name.as_str());
        }
    }

    #[test]
    fn test_parse_selection_default() {
        assert_eq!(parse_table_selection(None).unwrap(), DEFAULT_TABLES.to_vec());
        assert_eq!(
            parse_table_selection(Some(" , ")).unwrap(),
            DEFAULT_TABLES.to_vec()
        );
    }

    #[test]
    fn test_parse_selection_subset_keeps_order() {
        let tables = parse_table_selection(Some("zskills, skills")).unwrap();
        let names: Vec<TableName> = tables.iter().map(|t| t.name).collect();
        assert_eq!(names, vec![TableName::ZSkills, TableName::Skills]);
    }

    #[test]
    fn test_parse_selection_unknown() {
        let err = parse_table_selection(Some("skills,items")).unwrap_err();
        match err {
            Error::UnknownTable { name, valid } => {
                assert_eq!(name, "items");
                assert_eq!(valid, "skills, skillActive, zskills, skillDesc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
