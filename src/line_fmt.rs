use std::iter;

use crate::columns::{Alignment, ColumnSet};
use crate::error::FormatError;

/// Render one row of `values` aligned to `columns`.
///
/// Values wider than their column are written in full and push the rest
/// of the line to the right. The value count must equal the column count.
pub fn format_line<S: AsRef<str>>(
    values: &[S],
    columns: &ColumnSet,
) -> Result<String, FormatError> {
    let definitions = columns.definitions();
    if values.len() != definitions.len() {
        return Err(FormatError::ColumnMismatch {
            columns: definitions.len(),
            values: values.len(),
        });
    }

    let separator = " ".repeat(columns.gap());
    let mut line = String::with_capacity(columns.total_width());

    for (i, (value, column)) in values.iter().zip(definitions).enumerate() {
        if i > 0 {
            line.push_str(&separator);
        }

        let value = value.as_ref();
        let pad = column.size.saturating_sub(value.chars().count());
        match column.alignment {
            Alignment::Right => {
                line.extend(iter::repeat(' ').take(pad));
                line.push_str(value);
            }
            Alignment::Left => {
                line.push_str(value);
                line.extend(iter::repeat(' ').take(pad));
            }
        }
    }

    Ok(line)
}

pub fn dashed_line<L: TryInto<usize>>(length: L) -> Result<String, FormatError> {
    let length = length
        .try_into()
        .map_err(|_| FormatError::InvalidArgument { what: "line length" })?;
    Ok("-".repeat(length))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::ColumnDefinition;
    use proptest::prelude::*;

    fn single(column: ColumnDefinition) -> ColumnSet {
        ColumnSet::with_default_gap(vec![column])
    }

    #[test]
    fn right_aligned_pads_before() {
        let line = format_line(&["ab"], &single(ColumnDefinition::right(5)));
        assert_eq!(line, Ok("   ab".to_string()));
    }

    #[test]
    fn left_aligned_pads_after() {
        let column = ColumnDefinition::new(5, Alignment::default()).unwrap();
        let line = format_line(&["ab"], &single(column));
        assert_eq!(line, Ok("ab   ".to_string()));
    }

    #[test]
    fn gap_only_between_columns() {
        let columns = ColumnSet::new(
            vec![
                ColumnDefinition::left(3),
                ColumnDefinition::right(3),
                ColumnDefinition::left(2),
            ],
            2,
        )
        .unwrap();
        let line = format_line(&["a", "b", "c"], &columns).unwrap();
        assert_eq!(line, "a      b  c ");
    }

    #[test]
    fn overflow_is_not_truncated() {
        let columns = ColumnSet::with_default_gap(vec![
            ColumnDefinition::left(2),
            ColumnDefinition::right(2),
        ]);
        let line = format_line(&["abcd", "xyz"], &columns).unwrap();
        assert_eq!(line, "abcd    xyz");
    }

    #[test]
    fn value_count_must_match() {
        let columns = ColumnSet::with_default_gap(vec![ColumnDefinition::left(1); 5]);
        assert_eq!(
            format_line(&["a", "b", "c"], &columns),
            Err(FormatError::ColumnMismatch {
                columns: 5,
                values: 3
            })
        );

        let none: [&str; 0] = [];
        assert_eq!(format_line(&none, &ColumnSet::with_default_gap(vec![])), Ok(String::new()));
    }

    #[test]
    fn dashed_lines() {
        assert_eq!(dashed_line(0), Ok(String::new()));
        assert_eq!(dashed_line(3), Ok("---".to_string()));
        assert_eq!(
            dashed_line(-2),
            Err(FormatError::InvalidArgument { what: "line length" })
        );
    }

    fn arb_alignment() -> impl Strategy<Value = Alignment> {
        prop_oneof![Just(Alignment::Left), Just(Alignment::Right)]
    }

    prop_compose! {
        fn arb_row(max_columns: usize)
            (cells in prop::collection::vec(
                ("[a-zA-Z0-9 .]{0,12}", 0..16usize, arb_alignment()),
                0..max_columns),
             gap in 0..6usize)
            -> (Vec<String>, ColumnSet) {
            let (values, definitions): (Vec<String>, Vec<ColumnDefinition>) = cells
                .into_iter()
                .map(|(value, size, alignment)| {
                    (value, ColumnDefinition { size, alignment })
                })
                .unzip();
            (values, ColumnSet::new(definitions, gap).unwrap())
        }
    }

    proptest! {
        #[test]
        fn line_width_matches_columns((values, columns) in arb_row(8)) {
            let line = format_line(&values, &columns).unwrap();
            let overflows = values
                .iter()
                .zip(columns.definitions())
                .any(|(v, d)| v.len() > d.size);

            if overflows {
                prop_assert!(line.len() > columns.total_width());
            } else {
                prop_assert_eq!(line.len(), columns.total_width());
            }
        }

        #[test]
        fn dashed_line_length(n in 0..512usize) {
            let line = dashed_line(n).unwrap();
            prop_assert_eq!(line.len(), n);
            prop_assert!(line.chars().all(|c| c == '-'));
        }
    }
}
