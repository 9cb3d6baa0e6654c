use crate::error::ParseIssue;
use serde::Serialize;

/// Substitution counts for a single field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FieldAudit {
    /// The field was absent or blank.
    pub missing: usize,
    /// The field had text that could not be parsed.
    pub invalid: usize,
}

impl FieldAudit {
    /// Unwraps a parse outcome, substituting `default` and counting the reason on failure.
    pub fn settle<T>(&mut self, outcome: Result<T, ParseIssue>, default: T) -> T {
        match outcome {
            Ok(value) => value,
            Err(ParseIssue::Missing) => {
                self.missing += 1;
                default
            }
            Err(ParseIssue::Invalid { .. }) => {
                self.invalid += 1;
                default
            }
        }
    }

    pub fn total(&self) -> usize {
        self.missing + self.invalid
    }

    fn merge(&mut self, other: &FieldAudit) {
        self.missing += other.missing;
        self.invalid += other.invalid;
    }
}

/// How often normalisation had to fall back to a default.
///
/// The leniency policy never aborts on dirty data; this is where it leaves a trace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseAudit {
    pub quantity: FieldAudit,
    pub item_price: FieldAudit,
    pub item_tax: FieldAudit,
    pub shipping_price: FieldAudit,
    pub purchase_date: FieldAudit,
}

impl ParseAudit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(&mut self, other: &ParseAudit) {
        self.quantity.merge(&other.quantity);
        self.item_price.merge(&other.item_price);
        self.item_tax.merge(&other.item_tax);
        self.shipping_price.merge(&other.shipping_price);
        self.purchase_date.merge(&other.purchase_date);
    }

    /// Values that were present but unparsable, across all fields.
    pub fn total_invalid(&self) -> usize {
        self.fields().iter().map(|(_, f)| f.invalid).sum()
    }

    /// Every substitution, blank fields included.
    pub fn total_defaulted(&self) -> usize {
        self.fields().iter().map(|(_, f)| f.total()).sum()
    }

    /// Field name and counts, in export column order.
    pub fn fields(&self) -> [(&'static str, FieldAudit); 5] {
        [
            ("quantity", self.quantity),
            ("item-price", self.item_price),
            ("item-tax", self.item_tax),
            ("shipping-price", self.shipping_price),
            ("purchase-date", self.purchase_date),
        ]
    }
}
