//! Command-line arguments.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use ventas_core::reports::ReportKind;
use ventas_core::sales::{MonetaryField, SaleForm};

/// Record daily sales and export tax-exclusive reports.
#[derive(Parser, Debug)]
#[command(name = "ventas", version, about, long_about = None)]
pub struct Cli {
    /// Action to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available actions.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Save one sale
    Record(RecordArgs),
    /// Generate a daily, weekly or monthly report
    Report {
        /// Report kind (diario, semanal, mensual or daily, weekly, monthly)
        #[arg(short, long)]
        kind: ReportKind,
        /// Any date inside the wanted period, defaults to today
        #[arg(short, long, value_name = "YYYY-MM-DD")]
        reference: Option<NaiveDate>,
    },
    /// Interactive session, repeats until `salir` or end of input
    Form,
}

/// Sale fields. Amounts accept grouped text such as `1,190.00`.
#[derive(Args, Debug)]
pub struct RecordArgs {
    /// Sale date, defaults to today
    #[arg(short, long, value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,
    /// Price charged with the store card
    #[arg(long)]
    pub ripley_price: Option<String>,
    /// Price charged with other payment methods
    #[arg(long)]
    pub other_price: Option<String>,
    /// Insurance
    #[arg(long)]
    pub insurance: Option<String>,
    /// Extended warranty
    #[arg(long)]
    pub warranty: Option<String>,
    /// Express card acquisition commission
    #[arg(long)]
    pub express_acquisition: Option<String>,
    /// Debit card acquisition commission
    #[arg(long)]
    pub debit_acquisition: Option<String>,
    /// Shipping
    #[arg(long)]
    pub shipping: Option<String>,
    /// Product category, e.g. "Electrónica" or "Línea Blanca"
    #[arg(short, long)]
    pub product_type: String,
}

impl RecordArgs {
    /// Turns the flags into form input, dating it `today` when no date was
    /// given.
    pub fn into_form(self, today: NaiveDate) -> SaleForm {
        let amounts = [
            (MonetaryField::RipleyPrice, self.ripley_price),
            (MonetaryField::OtherPrice, self.other_price),
            (MonetaryField::Insurance, self.insurance),
            (MonetaryField::Warranty, self.warranty),
            (MonetaryField::ExpressAcquisition, self.express_acquisition),
            (MonetaryField::DebitAcquisition, self.debit_acquisition),
            (MonetaryField::Shipping, self.shipping),
        ];

        amounts.into_iter().fold(
            SaleForm::new(self.date.unwrap_or(today), self.product_type),
            |form, (field, text)| match text {
                Some(text) => form.with_amount(field, text),
                None => form,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_record_collects_given_amounts() {
        let cli = Cli::try_parse_from([
            "ventas",
            "record",
            "--date",
            "2024-03-01",
            "--ripley-price",
            "1,190",
            "--shipping",
            "0",
            "--product-type",
            "Electrónica",
        ])
        .unwrap();

        let Command::Record(args) = cli.command else {
            panic!("expected record");
        };
        let form = args.into_form(today());
        assert_eq!(form.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(form.product_type, "Electrónica");
        assert_eq!(
            form.amounts,
            vec![
                (MonetaryField::RipleyPrice, "1,190".to_string()),
                (MonetaryField::Shipping, "0".to_string()),
            ]
        );
    }

    #[test]
    fn test_record_date_defaults_to_today() {
        let cli = Cli::try_parse_from(["ventas", "record", "-p", "Ropa"]).unwrap();
        let Command::Record(args) = cli.command else {
            panic!("expected record");
        };
        assert_eq!(args.into_form(today()).date, today());
    }

    #[test]
    fn test_report_parses_kind() {
        let cli = Cli::try_parse_from(["ventas", "report", "--kind", "semanal"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Report {
                kind: ReportKind::Weekly,
                reference: None
            }
        ));
    }

    #[test]
    fn test_report_rejects_unknown_kind() {
        assert!(Cli::try_parse_from(["ventas", "report", "--kind", "anual"]).is_err());
    }

    #[test]
    fn test_record_requires_product_type() {
        assert!(Cli::try_parse_from(["ventas", "record"]).is_err());
    }
}
