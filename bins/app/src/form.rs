//! Interactive session.
//!
//! Prompts for an action, then for the sale fields or the report kind. Each
//! action prints one outcome line; failures do not end the session. Typing
//! `salir` or closing the input ends it.

use std::io::{self, BufRead, Write};

use chrono::NaiveDate;
use ventas_core::export::ReportExporter;
use ventas_core::reports::ReportKind;
use ventas_core::sales::{MonetaryField, SaleForm};
use ventas_core::store::SalesStore;
use ventas_shared::AppError;
use ventas_shared::types::{format_grouped, parse_amount};

use crate::session::{Session, report_message, sale_message};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Runs the prompt loop until `salir` or end of input.
pub async fn run<S, E, R, W>(
    session: &Session<S, E>,
    mut input: R,
    mut output: W,
    today: NaiveDate,
) -> io::Result<()>
where
    S: SalesStore,
    E: ReportExporter,
    R: BufRead,
    W: Write,
{
    loop {
        let Some(choice) = prompt(&mut input, &mut output, "Acción [venta/reporte/salir]: ")?
        else {
            break;
        };

        match choice.to_lowercase().as_str() {
            "" => {}
            "salir" => break,
            "venta" | "v" => {
                let Some(form) = read_sale(&mut input, &mut output, today)? else {
                    break;
                };
                let result = match form {
                    Ok(form) => session.save_sale(form).await,
                    Err(e) => Err(e),
                };
                writeln!(output, "{}", sale_message(&result))?;
            }
            "reporte" | "r" => {
                let Some(request) = read_report(&mut input, &mut output, today)? else {
                    break;
                };
                let result = match request {
                    Ok((kind, reference)) => session.generate_report(kind, reference).await,
                    Err(e) => Err(e),
                };
                writeln!(output, "{}", report_message(&result))?;
            }
            other => writeln!(output, "Acción desconocida: {other}")?,
        }
    }

    output.flush()
}

/// Writes `label` and reads one trimmed line. `None` at end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> io::Result<Option<String>> {
    write!(output, "{label}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn parse_date(text: &str, today: NaiveDate) -> Result<NaiveDate, AppError> {
    if text.is_empty() {
        return Ok(today);
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|_| AppError::Validation(format!("fecha inválida '{text}' (use AAAA-MM-DD)")))
}

/// Reads the sale fields. Blank amounts are left out.
fn read_sale<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    today: NaiveDate,
) -> io::Result<Option<Result<SaleForm, AppError>>> {
    let Some(date) = prompt(input, output, &format!("Fecha [{today}]: "))? else {
        return Ok(None);
    };

    let mut amounts = Vec::new();
    for field in MonetaryField::ALL {
        let Some(text) = prompt(input, output, &format!("{}: ", field.label()))? else {
            return Ok(None);
        };
        // Echo the grouped value back, like the input mask does
        if let Ok(Some(amount)) = parse_amount(&text) {
            writeln!(output, "  {} = {}", field.label(), format_grouped(amount))?;
        }
        if !text.is_empty() {
            amounts.push((field, text));
        }
    }

    let Some(product_type) = prompt(input, output, "Tipo de producto: ")? else {
        return Ok(None);
    };

    Ok(Some(parse_date(&date, today).map(|date| SaleForm {
        date,
        amounts,
        product_type,
    })))
}

fn read_report<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    today: NaiveDate,
) -> io::Result<Option<Result<(ReportKind, NaiveDate), AppError>>> {
    let Some(kind) = prompt(input, output, "Tipo de reporte [diario/semanal/mensual]: ")? else {
        return Ok(None);
    };
    let Some(reference) = prompt(input, output, &format!("Fecha de referencia [{today}]: "))?
    else {
        return Ok(None);
    };

    let kind = match kind.parse::<ReportKind>() {
        Ok(kind) => kind,
        Err(e) => return Ok(Some(Err(AppError::Validation(e.to_string())))),
    };
    Ok(Some(parse_date(&reference, today).map(|date| (kind, date))))
}
