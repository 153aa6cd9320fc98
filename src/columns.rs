use strum_macros::{Display, EnumString};

use crate::error::FormatError;

pub const DEFAULT_GAP: usize = 4;

#[derive(Display, EnumString, Default, Debug, PartialEq, Eq, Clone, Copy)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Alignment {
    #[default]
    Left,
    Right,
}

/// Width and alignment of a single column. The width excludes the gap.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct ColumnDefinition {
    pub size: usize,
    pub alignment: Alignment,
}

impl ColumnDefinition {
    pub fn new<S: TryInto<usize>>(
        size: S,
        alignment: Alignment,
    ) -> Result<Self, FormatError> {
        let size = size
            .try_into()
            .map_err(|_| FormatError::InvalidArgument { what: "column size" })?;
        Ok(Self { size, alignment })
    }

    pub fn left(size: usize) -> Self {
        Self {
            size,
            alignment: Alignment::Left,
        }
    }

    pub fn right(size: usize) -> Self {
        Self {
            size,
            alignment: Alignment::Right,
        }
    }
}

/// Ordered column definitions plus the number of spaces between
/// adjacent columns.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ColumnSet {
    definitions: Vec<ColumnDefinition>,
    gap: usize,
}

impl ColumnSet {
    pub fn new<G: TryInto<usize>>(
        definitions: Vec<ColumnDefinition>,
        gap: G,
    ) -> Result<Self, FormatError> {
        let gap = gap
            .try_into()
            .map_err(|_| FormatError::InvalidArgument { what: "column gap" })?;
        Ok(Self { definitions, gap })
    }

    pub fn with_default_gap(definitions: Vec<ColumnDefinition>) -> Self {
        Self {
            definitions,
            gap: DEFAULT_GAP,
        }
    }

    pub fn definitions(&self) -> &[ColumnDefinition] {
        &self.definitions
    }

    pub fn gap(&self) -> usize {
        self.gap
    }

    pub fn total_width(&self) -> usize {
        let sizes: usize = self.definitions.iter().map(|d| d.size).sum();
        sizes + self.gap * self.definitions.len().saturating_sub(1)
    }
}
