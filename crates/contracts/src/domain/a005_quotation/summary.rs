use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::aggregate::{Quotation, QuotationStatus};
use crate::shared::list::summary::{canonical_order, count_by};
use crate::shared::list::{rate, Summarize, SummaryContext};

/// Сводка по коммерческим предложениям
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationSummary {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
    /// Сумма всех предложений с налогом
    pub total_value: f64,
    pub accepted_value: f64,
    /// accepted / (accepted + rejected)
    pub acceptance_rate: f64,
    /// Отправленные предложения с истекшим сроком действия
    pub expiring: usize,
}

impl Summarize for Quotation {
    type Snapshot = QuotationSummary;

    fn summarize(records: &[Self], context: &SummaryContext) -> QuotationSummary {
        let ordered = canonical_order(records);
        let status_count =
            |status: QuotationStatus| ordered.iter().filter(|q| q.status == status).count();
        let accepted = status_count(QuotationStatus::Accepted);
        let rejected = status_count(QuotationStatus::Rejected);

        QuotationSummary {
            total: records.len(),
            by_status: count_by(ordered.iter().copied(), |q: &Quotation| {
                q.status.code().to_string()
            }),
            total_value: ordered.iter().map(|q| q.total()).sum(),
            accepted_value: ordered
                .iter()
                .filter(|q| q.status == QuotationStatus::Accepted)
                .map(|q| q.total())
                .sum(),
            acceptance_rate: rate(accepted, accepted + rejected),
            expiring: ordered
                .iter()
                .filter(|q| q.status == QuotationStatus::Sent && q.valid_until < context.today)
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a005_quotation::QuotationLine;
    use crate::domain::common::ymd;

    fn quote(status: QuotationStatus, price: f64) -> Quotation {
        let mut q = Quotation::new("КП", "Клиент", ymd(2024, 1, 1), ymd(2024, 1, 31))
            .with_line(QuotationLine::new("Работы", 1.0, price));
        q.status = status;
        q
    }

    #[test]
    fn test_empty() {
        let summary = Quotation::summarize(&[], &SummaryContext::current());
        assert_eq!(summary, QuotationSummary::default());
    }

    #[test]
    fn test_acceptance() {
        let records = vec![
            quote(QuotationStatus::Accepted, 1000.0),
            quote(QuotationStatus::Rejected, 500.0),
            quote(QuotationStatus::Sent, 250.0),
            quote(QuotationStatus::Draft, 100.0),
        ];
        let summary = Quotation::summarize(&records, &SummaryContext::new(ymd(2024, 2, 1)));
        assert_eq!(summary.total, 4);
        assert_eq!(summary.acceptance_rate, 0.5);
        assert_eq!(summary.total_value, 1850.0);
        assert_eq!(summary.accepted_value, 1000.0);
        assert_eq!(summary.expiring, 1);
        assert_eq!(summary.by_status.get("draft"), Some(&1));
    }
}
