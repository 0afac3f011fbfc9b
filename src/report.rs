use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{presets, Attribute, Cell, CellAlignment, ContentArrangement, Table};

use crate::summary::Holding;

fn has_contracts(holdings: &[Holding]) -> bool {
    holdings.iter().any(|h| h.contract.is_some())
}

pub fn holdings_table(holdings: &[Holding]) -> Table {
    let with_contract = has_contracts(holdings);

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![Cell::new("Symbol").add_attribute(Attribute::Bold)];
    if with_contract {
        header.push(Cell::new("Contract").add_attribute(Attribute::Bold));
    }
    header.push(Cell::new("Amount").add_attribute(Attribute::Bold));
    table.set_header(header);

    for holding in holdings {
        let mut row = vec![Cell::new(&holding.symbol)];
        if with_contract {
            row.push(Cell::new(holding.contract.as_deref().unwrap_or_default()));
        }
        row.push(
            Cell::new(holding.amount.normalize().to_string()).set_alignment(CellAlignment::Right),
        );
        table.add_row(row);
    }
    table
}

pub fn print_table(holdings: &[Holding]) {
    println!("{}", holdings_table(holdings));
}

pub fn write_csv<W: std::io::Write>(writer: W, holdings: &[Holding]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    // the header comes from the first serialized record
    if holdings.is_empty() {
        wtr.write_record(["Symbol", "Amount"])?;
    }
    for holding in holdings {
        wtr.serialize(holding)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn save_csv(path: &Path, holdings: &[Holding]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_csv(file, holdings).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn holdings() -> Vec<Holding> {
        vec![
            Holding::new("DAI", dec!(2.000000000000000000)),
            Holding::new("USDC", dec!(6.5)),
        ]
    }

    #[test]
    fn test_write_csv() {
        let mut out = Vec::new();
        write_csv(&mut out, &holdings()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Symbol,Amount\nDAI,2\nUSDC,6.5\n"
        );
    }

    #[test]
    fn test_write_csv_with_contract() {
        let mut holding = Holding::new("USDC", dec!(1));
        holding.contract = Some("0xa0b8".to_string());

        let mut out = Vec::new();
        write_csv(&mut out, &[holding]).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Symbol,Contract,Amount\nUSDC,0xa0b8,1\n"
        );
    }

    #[test]
    fn test_write_csv_without_holdings() {
        let mut out = Vec::new();
        write_csv(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Symbol,Amount\n");
        assert_eq!(holdings_table(&[]).row_iter().count(), 0);
    }

    #[test]
    fn test_save_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");
        save_csv(&path, &holdings()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Symbol,Amount\n"));
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn test_table_rows() {
        let table = holdings_table(&holdings());
        assert_eq!(table.row_iter().count(), 2);
        let rendered = table.to_string();
        assert!(rendered.contains("USDC"));
        assert!(rendered.contains("6.5"));
    }
}
