use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use chrono::{Local, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::columns::{ColumnDefinition, ColumnSet};
use crate::error::{FormatError, InvoiceError};
use crate::line_fmt::{dashed_line, format_line};

const INDEX_TITLE: &str = "Item Index";
const NAME_TITLE: &str = "Item Name";
const QUANTITY_TITLE: &str = "Quantity";
const UNIT_TITLE: &str = "Unit Price";
const TOTAL_TITLE: &str = "Item Total";
const INVOICE_TOTAL_TITLE: &str = "Invoice Total";

/// A monetary amount. Arithmetic is exact; display rounds half to even
/// at two decimal places.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Default)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl Add<Amount> for Amount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, x| acc + x)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
        write!(f, "{:.2}", rounded)
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct LineItem {
    name: String,
    quantity: u32,
    unit_price: Amount,
}

impl LineItem {
    pub fn new(
        name: impl Into<String>,
        quantity: u32,
        unit_price: Decimal,
    ) -> Result<Self, InvoiceError> {
        let name = name.into();
        if name.is_empty() {
            return Err(InvoiceError::InvalidItem {
                reason: "name is empty",
            });
        }
        if quantity == 0 {
            return Err(InvoiceError::InvalidItem {
                reason: "quantity must be positive",
            });
        }
        if unit_price <= Decimal::ZERO {
            return Err(InvoiceError::InvalidItem {
                reason: "unit price must be positive",
            });
        }
        if Decimal::from(quantity).checked_mul(unit_price).is_none() {
            return Err(InvoiceError::AmountOverflow { name });
        }

        Ok(Self {
            name,
            quantity,
            unit_price: Amount(unit_price),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> Amount {
        self.unit_price
    }

    pub fn line_total(&self) -> Amount {
        Amount(Decimal::from(self.quantity) * self.unit_price.0)
    }
}

impl fmt::Display for LineItem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} @ {}: {}",
            self.name,
            self.quantity,
            self.unit_price,
            self.line_total()
        )
    }
}

/// The invoice being built at the register: an ordered list of line items.
#[derive(Debug, PartialEq, Clone)]
pub struct Invoice {
    pub number: usize,
    pub date: NaiveDate,
    items: Vec<LineItem>,
}

impl Invoice {
    pub fn new(number: usize) -> Self {
        Self::dated(number, Local::now().date_naive())
    }

    pub fn dated(number: usize, date: NaiveDate) -> Self {
        Self {
            number,
            date,
            items: Vec::new(),
        }
    }

    pub fn add_item(&mut self, item: LineItem) {
        self.items.push(item);
    }

    /// Remove the item at the 0-based `index`, shifting later items down.
    pub fn remove_item(&mut self, index: usize) -> Result<LineItem, InvoiceError> {
        if index >= self.items.len() {
            return Err(InvoiceError::IndexOutOfRange {
                index,
                size: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn grand_total(&self) -> Amount {
        self.items.iter().map(LineItem::line_total).sum()
    }

    fn columns(&self) -> ColumnSet {
        let name_width = self
            .items
            .iter()
            .map(|i| i.name.chars().count())
            .chain([NAME_TITLE.len()])
            .max()
            .unwrap_or(NAME_TITLE.len());

        ColumnSet::with_default_gap(vec![
            ColumnDefinition::left(INDEX_TITLE.len().max(INVOICE_TOTAL_TITLE.len())),
            ColumnDefinition::left(name_width),
            ColumnDefinition::left(QUANTITY_TITLE.len()),
            ColumnDefinition::left(UNIT_TITLE.len()),
            ColumnDefinition::left(TOTAL_TITLE.len()),
        ])
    }

    /// Render the invoice as a ruled table, one line per item plus a
    /// header and a total footer. No trailing newline.
    pub fn render(&self) -> Result<String, FormatError> {
        let columns = self.columns();
        let rule = dashed_line(columns.total_width())?;

        let mut lines = vec![
            rule.clone(),
            format_line(
                &[INDEX_TITLE, NAME_TITLE, QUANTITY_TITLE, UNIT_TITLE, TOTAL_TITLE],
                &columns,
            )?,
            rule.clone(),
        ];

        for (i, item) in self.items.iter().enumerate() {
            lines.push(format_line(
                &[
                    format!("[{}]", i + 1),
                    item.name.clone(),
                    item.quantity.to_string(),
                    item.unit_price.to_string(),
                    item.line_total().to_string(),
                ],
                &columns,
            )?);
        }

        let total = self.grand_total().to_string();
        lines.push(rule.clone());
        lines.push(format_line(
            &[INVOICE_TOTAL_TITLE, "", "", "", total.as_str()],
            &columns,
        )?);
        lines.push(rule);

        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use const_format::formatcp;
    use rust_decimal_macros::dec;

    fn item(name: &str, quantity: u32, price: Decimal) -> LineItem {
        LineItem::new(name, quantity, price).unwrap()
    }

    fn invoice() -> Invoice {
        Invoice::dated(1, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
    }

    #[test]
    fn grand_total() {
        let mut invoice = invoice();
        assert_eq!(invoice.grand_total(), Amount::default());

        invoice.add_item(item("Coffee", 2, dec!(3.50)));
        invoice.add_item(item("Cake", 1, dec!(10.00)));
        assert_eq!(invoice.grand_total().value(), dec!(17.00));
        assert_eq!(invoice.grand_total().to_string(), "17.00");
    }

    #[test]
    fn remove_all_from_front() {
        let mut invoice = invoice();
        for n in 1..=5 {
            invoice.add_item(item(&format!("Item {}", n), n, dec!(1.25)));
        }
        assert_eq!(invoice.size(), 5);

        while !invoice.is_empty() {
            invoice.remove_item(0).unwrap();
        }
        assert_eq!(invoice.size(), 0);
        assert_eq!(invoice.grand_total().value(), Decimal::ZERO);
    }

    #[test]
    fn remove_preserves_order() {
        let mut invoice = invoice();
        invoice.add_item(item("a", 1, dec!(1)));
        invoice.add_item(item("b", 1, dec!(2)));
        invoice.add_item(item("c", 1, dec!(3)));

        let removed = invoice.remove_item(1).unwrap();
        assert_eq!(removed.name(), "b");
        let names: Vec<&str> = invoice.items().iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn remove_out_of_range() {
        let mut invoice = invoice();
        invoice.add_item(item("a", 1, dec!(1)));
        invoice.add_item(item("b", 2, dec!(2)));
        let before = invoice.clone();

        assert_eq!(
            invoice.remove_item(5),
            Err(InvoiceError::IndexOutOfRange { index: 5, size: 2 })
        );
        assert_eq!(invoice, before);
    }

    #[test]
    fn invalid_items() {
        assert!(matches!(
            LineItem::new("", 1, dec!(1)),
            Err(InvoiceError::InvalidItem { .. })
        ));
        assert!(matches!(
            LineItem::new("a", 0, dec!(1)),
            Err(InvoiceError::InvalidItem { .. })
        ));
        assert!(matches!(
            LineItem::new("a", 1, dec!(-0.01)),
            Err(InvoiceError::InvalidItem { .. })
        ));
        assert_eq!(
            LineItem::new("a", u32::MAX, Decimal::MAX),
            Err(InvoiceError::AmountOverflow {
                name: "a".to_string()
            })
        );
    }

    #[test]
    fn amounts_round_half_to_even() {
        assert_eq!(Amount::new(dec!(5)).to_string(), "5.00");
        assert_eq!(Amount::new(dec!(0.125)).to_string(), "0.12");
        assert_eq!(Amount::new(dec!(0.135)).to_string(), "0.14");
        assert_eq!(Amount::new(dec!(2.999)).to_string(), "3.00");
    }

    const GAP: &str = "    ";

    #[test]
    fn render_table() {
        let mut invoice = invoice();
        invoice.add_item(item("Widget", 2, dec!(5.00)));

        let expected = [
            "-".repeat(66),
            formatcp!(
                "Item Index   {}Item Name{}Quantity{}Unit Price{}Item Total",
                GAP, GAP, GAP, GAP
            )
            .to_string(),
            "-".repeat(66),
            formatcp!(
                "[1]          {}Widget   {}2       {}5.00      {}10.00     ",
                GAP, GAP, GAP, GAP
            )
            .to_string(),
            "-".repeat(66),
            formatcp!(
                "Invoice Total{}         {}        {}          {}10.00     ",
                GAP, GAP, GAP, GAP
            )
            .to_string(),
            "-".repeat(66),
        ]
        .join("\n");

        assert_eq!(invoice.render(), Ok(expected));
    }

    #[test]
    fn render_widens_name_column() {
        let mut invoice = invoice();
        invoice.add_item(item("Extra long widget name", 1, dec!(1)));

        let rendered = invoice.render().unwrap();
        let lines: Vec<&str> = rendered.lines().collect();
        // 13 + 22 + 8 + 10 + 10 + 4 gaps
        assert_eq!(lines[0].len(), 79);
        assert!(lines.iter().all(|l| l.len() == 79));
        assert!(lines[3].starts_with("[1]"));
    }

    #[test]
    fn render_empty_invoice() {
        let rendered = invoice().render().unwrap();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0].len(), 66);
        assert!(lines[4].starts_with("Invoice Total"));
        assert!(lines[4].ends_with("0.00      "));
    }
}
