//! Expression tree for custom logic over numbered rows

use std::collections::BTreeSet;
use std::fmt;

use super::InvalidConditions;

/// A boolean expression whose leaves are 1-based row numbers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogicExpr {
    Row(usize),
    Not(Box<LogicExpr>),
    All(Vec<LogicExpr>),
    Any(Vec<LogicExpr>),
    /// Parentheses written by the user, kept so rendering preserves them
    Group(Box<LogicExpr>),
}

impl LogicExpr {
    /// Every row number the expression mentions
    pub fn references(&self) -> BTreeSet<usize> {
        let mut references = BTreeSet::new();
        self.collect_references(&mut references);
        references
    }

    fn collect_references(&self, references: &mut BTreeSet<usize>) {
        match self {
            LogicExpr::Row(row) => {
                references.insert(*row);
            }
            LogicExpr::Not(inner) | LogicExpr::Group(inner) => {
                inner.collect_references(references)
            }
            LogicExpr::All(items) | LogicExpr::Any(items) => {
                for item in items {
                    item.collect_references(references);
                }
            }
        }
    }

    /// Requires every row in `1..=row_count` to be referenced and nothing else
    pub fn check_references(&self, row_count: usize) -> Result<(), InvalidConditions> {
        let references = self.references();

        if let Some(&reference) = references
            .iter()
            .find(|&&reference| reference == 0 || reference > row_count)
        {
            return Err(InvalidConditions::OutOfRange {
                reference,
                row_count,
            });
        }

        if let Some(missing) = (1..=row_count).find(|row| !references.contains(row)) {
            return Err(InvalidConditions::MissingReference(missing));
        }

        Ok(())
    }

    /// Renders the expression, replacing each row number with its fragment.
    ///
    /// `fragment` returns `None` for rows that cannot be compiled.
    pub fn render<F>(&self, fragment: &F) -> Result<String, InvalidConditions>
    where
        F: Fn(usize) -> Option<String>,
    {
        match self {
            LogicExpr::Row(row) => fragment(*row)
                .map(|text| text.trim_start().to_string())
                .ok_or(InvalidConditions::IncompleteRow(*row)),
            LogicExpr::Not(inner) => Ok(format!("NOT {}", inner.render(fragment)?)),
            LogicExpr::All(items) => render_joined(items, "AND", fragment),
            LogicExpr::Any(items) => render_joined(items, "OR", fragment),
            LogicExpr::Group(inner) => Ok(format!("({})", inner.render(fragment)?)),
        }
    }
}

fn render_joined<F>(items: &[LogicExpr], keyword: &str, fragment: &F) -> Result<String, InvalidConditions>
where
    F: Fn(usize) -> Option<String>,
{
    let rendered = items
        .iter()
        .map(|item| item.render(fragment))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rendered.join(&format!(" {} ", keyword)))
}

impl fmt::Display for LogicExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let numbered = self
            .render(&|row| Some(row.to_string()))
            .map_err(|_| fmt::Error)?;
        write!(f, "{}", numbered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(n: usize) -> LogicExpr {
        LogicExpr::Row(n)
    }

    // 1 AND (2 OR 3)
    fn sample() -> LogicExpr {
        LogicExpr::All(vec![
            row(1),
            LogicExpr::Group(Box::new(LogicExpr::Any(vec![row(2), row(3)]))),
        ])
    }

    #[test]
    fn test_references() {
        assert_eq!(sample().references(), BTreeSet::from([1, 2, 3]));
    }

    #[test]
    fn test_display_keeps_groups() {
        assert_eq!(sample().to_string(), "1 AND (2 OR 3)");
        let negated = LogicExpr::Not(Box::new(LogicExpr::Group(Box::new(sample()))));
        assert_eq!(negated.to_string(), "NOT (1 AND (2 OR 3))");
    }

    #[test]
    fn test_check_references_complete() {
        assert_eq!(sample().check_references(3), Ok(()));
    }

    #[test]
    fn test_check_references_missing() {
        assert_eq!(sample().check_references(4), Err(InvalidConditions::MissingReference(4)));
    }

    #[test]
    fn test_check_references_out_of_range() {
        assert_eq!(
            sample().check_references(2),
            Err(InvalidConditions::OutOfRange { reference: 3, row_count: 2 })
        );
        assert_eq!(
            row(0).check_references(1),
            Err(InvalidConditions::OutOfRange { reference: 0, row_count: 1 })
        );
    }

    #[test]
    fn test_ten_does_not_satisfy_one() {
        let expr = LogicExpr::Row(10);
        assert_eq!(
            expr.check_references(10),
            Err(InvalidConditions::MissingReference(1))
        );
    }

    #[test]
    fn test_render_substitutes_each_row_once() {
        let rendered = sample()
            .render(&|row| Some(format!(" F{}", row)))
            .unwrap();
        assert_eq!(rendered, "F1 AND (F2 OR F3)");
    }

    #[test]
    fn test_render_missing_fragment() {
        let result = sample().render(&|row| if row == 2 { None } else { Some("x".to_string()) });
        assert_eq!(result, Err(InvalidConditions::IncompleteRow(2)));
    }
}
