//! Document export
//!
//! Export is pure templating over read-only snapshots: it owns no state,
//! performs no mutation, and is tested independently of the state machine.

use std::io;

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{memos::Memo, projections, requests::FundRequest};

/// Errors that can occur while writing an export document.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The output sink rejected a write.
    #[error("IO error")]
    Io(#[source] io::Error),
}

/// Formats an amount in the register currency.
#[must_use]
pub fn format_amount(amount: Decimal, currency: &'static Currency) -> String {
    Money::from_decimal(amount, currency).to_string()
}

/// Writes the fund-request register with summary totals.
///
/// # Errors
///
/// Returns [`ExportError::Io`] when the sink rejects a write.
pub fn write_register(
    mut out: impl io::Write,
    requests: &[FundRequest],
    currency: &'static Currency,
) -> Result<(), ExportError> {
    let mut builder = Builder::default();

    builder.push_record(["Date", "Request", "Requested For", "Amount", "Purpose", "Status"]);

    for request in requests {
        builder.push_record([
            request.created_at.strftime("%Y-%m-%d").to_string(),
            request.id.to_string(),
            request.requested_for.clone(),
            format_amount(request.amount, currency),
            request.purpose.clone(),
            request.status().to_string(),
        ]);
    }

    write_table(&mut out, builder, 3)?;

    let stats = projections::statistics(requests);

    writeln!(out, " Requests: {}", stats.counts.total()).map_err(ExportError::Io)?;
    writeln!(out, " Total:    {}", format_amount(stats.total_amount, currency))
        .map_err(ExportError::Io)?;
    writeln!(
        out,
        " Released: {}",
        format_amount(stats.released_amount, currency)
    )
    .map_err(ExportError::Io)?;
    writeln!(
        out,
        " Pending:  {}",
        format_amount(stats.pending_amount(), currency)
    )
    .map_err(ExportError::Io)?;

    Ok(())
}

/// Writes the memo register.
///
/// # Errors
///
/// Returns [`ExportError::Io`] when the sink rejects a write.
pub fn write_memo_register(
    mut out: impl io::Write,
    memos: &[Memo],
    currency: &'static Currency,
) -> Result<(), ExportError> {
    let mut builder = Builder::default();

    builder.push_record(["Date", "Memo", "Request", "Requested For", "Amount", "Purpose", "Created By"]);

    for memo in memos {
        builder.push_record([
            memo.created_at.strftime("%Y-%m-%d").to_string(),
            memo.id.to_string(),
            memo.request_id.to_string(),
            memo.requested_for.clone(),
            format_amount(memo.amount, currency),
            memo.purpose.clone(),
            memo.created_by.clone(),
        ]);
    }

    write_table(&mut out, builder, 4)?;

    writeln!(out, " Memos: {}", memos.len()).map_err(ExportError::Io)?;

    Ok(())
}

/// Renders a single memo as a formal document for filing.
#[must_use]
pub fn render_memo_document(memo: &Memo, currency: &'static Currency) -> String {
    let date = memo.created_at.strftime("%Y-%m-%d");

    format!(
        "INTERNAL MEMO {id}\n\
         =================\n\
         Date:          {date}\n\
         Request:       {request}\n\
         Requested for: {requested_for}\n\
         Amount:        {amount}\n\
         Purpose:       {purpose}\n\
         \n\
         {text}\n\
         \n\
         Prepared by {created_by}\n",
        id = memo.id,
        request = memo.request_id,
        requested_for = memo.requested_for,
        amount = format_amount(memo.amount, currency),
        purpose = memo.purpose,
        text = memo.text,
        created_by = memo.created_by,
    )
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    amount_column: usize,
) -> Result<(), ExportError> {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(
        Columns::new(amount_column..amount_column + 1),
        Alignment::right(),
    );

    writeln!(out, "{table}").map_err(ExportError::Io)
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rusty_money::iso::NGN;
    use testresult::TestResult;

    use crate::{
        memos::MemoId,
        requests::{NewFundRequest, RequestId, Stage},
        users::UserId,
    };

    use super::*;

    fn sample_request(id: u64, amount: i64, purpose: &str) -> FundRequest {
        FundRequest {
            id: RequestId::new(id),
            created_by: UserId::new(),
            created_by_name: "Mark Accountant".to_string(),
            requested_for: "John Staff".to_string(),
            amount: Decimal::from(amount),
            purpose: purpose.to_string(),
            description: String::new(),
            attachment_url: None,
            created_at: Timestamp::now(),
            stage: Stage::Pending,
        }
    }

    fn sample_memo() -> Memo {
        Memo {
            id: MemoId::new(3),
            request_id: RequestId::new(7),
            text: "Release of funds to John Staff for Training program.".to_string(),
            amount: Decimal::from(10_000),
            purpose: "Training program".to_string(),
            requested_for: "John Staff".to_string(),
            created_by: "Mark Accountant".to_string(),
            created_by_id: UserId::new(),
            created_at: Timestamp::now(),
        }
    }

    #[test]
    fn register_renders_each_request_row() -> TestResult {
        let requests = vec![
            sample_request(1, 5000, "Equipment purchase"),
            sample_request(2, 2500, "Vehicle maintenance"),
        ];

        let mut out = Vec::new();
        write_register(&mut out, &requests, NGN)?;

        let output = String::from_utf8(out)?;
        assert!(output.contains("#1"), "register must list request #1");
        assert!(output.contains("#2"), "register must list request #2");
        assert!(output.contains("Equipment purchase"), "register must list purposes");
        assert!(output.contains("pending"), "register must list statuses");

        Ok(())
    }

    #[test]
    fn register_summary_reports_total_released_and_pending() -> TestResult {
        let mut released = sample_request(1, 4000, "Training");
        let now = Timestamp::now();
        released.approve("Jane CEO", None, now)?;
        released.release("Mark Accountant", now)?;

        let requests = vec![released, sample_request(2, 1000, "Travel")];

        let mut out = Vec::new();
        write_register(&mut out, &requests, NGN)?;

        let output = String::from_utf8(out)?;
        assert!(output.contains("Requests: 2"), "summary must count requests");
        assert!(
            output.contains(&format_amount(Decimal::from(5000), NGN)),
            "summary must show the total amount"
        );
        assert!(
            output.contains(&format_amount(Decimal::from(4000), NGN)),
            "summary must show the released amount"
        );
        assert!(
            output.contains(&format_amount(Decimal::from(1000), NGN)),
            "summary must show the pending amount"
        );

        Ok(())
    }

    #[test]
    fn register_handles_an_empty_ledger() -> TestResult {
        let mut out = Vec::new();
        write_register(&mut out, &[], NGN)?;

        let output = String::from_utf8(out)?;
        assert!(output.contains("Requests: 0"), "summary must count zero requests");

        Ok(())
    }

    #[test]
    fn memo_register_renders_rows_and_count() -> TestResult {
        let mut out = Vec::new();
        write_memo_register(&mut out, &[sample_memo()], NGN)?;

        let output = String::from_utf8(out)?;
        assert!(output.contains("M-3"), "register must list the memo id");
        assert!(output.contains("#7"), "register must reference the request");
        assert!(output.contains("Memos: 1"), "register must count memos");

        Ok(())
    }

    #[test]
    fn memo_document_carries_every_filing_field() {
        let memo = sample_memo();
        let document = render_memo_document(&memo, NGN);

        assert!(document.contains("INTERNAL MEMO M-3"), "header must name the memo");
        assert!(document.contains("#7"), "document must reference the request");
        assert!(document.contains("John Staff"), "document must name the staff member");
        assert!(document.contains("Training program"), "document must name the purpose");
        assert!(document.contains(&memo.text), "document must carry the body");
        assert!(
            document.contains("Prepared by Mark Accountant"),
            "document must carry the signature line"
        );
    }

    #[test]
    fn format_amount_uses_the_register_currency() {
        let formatted = format_amount(Decimal::from(5000), NGN);

        assert!(formatted.contains("5,000"), "amount must be thousand-separated");
    }

    #[test]
    fn validated_input_round_trips_into_register_amounts() -> TestResult {
        let input = NewFundRequest {
            amount: Decimal::from(750),
            purpose: "Stationery".to_string(),
            description: String::new(),
            requested_for: "John Staff".to_string(),
            attachment_url: None,
        };

        input.validate()?;

        let formatted = format_amount(input.amount, NGN);
        assert!(formatted.contains("750"), "formatted amount must carry the value");

        Ok(())
    }
}
