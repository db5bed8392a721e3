// 💾 CSV boundary - write the transaction and irregularity tables
// Generation never depends on these succeeding

use crate::model::{AuditEntry, Transaction};
use anyhow::{Context, Result};
use std::io;
use std::path::Path;

pub const TRANSACTION_HEADERS: [&str; 7] = [
    "Transaction ID",
    "Date",
    "Type",
    "Amount",
    "Account",
    "Description",
    "Vendor",
];

pub const IRREGULARITY_HEADERS: [&str; 3] = ["Transaction ID", "Irregularity Type", "Description"];

/// Write the transaction table (header + one row per transaction)
pub fn write_transactions<W: io::Write>(writer: W, transactions: &[Transaction]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    if transactions.is_empty() {
        wtr.write_record(TRANSACTION_HEADERS)?;
    }
    for tx in transactions {
        wtr.serialize(tx).context("Failed to serialize transaction")?;
    }
    wtr.flush().context("Failed to flush transaction table")?;
    Ok(())
}

/// Write the irregularity table (header + one row per audit entry)
pub fn write_audit_trail<W: io::Write>(writer: W, audit_trail: &[AuditEntry]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    if audit_trail.is_empty() {
        wtr.write_record(IRREGULARITY_HEADERS)?;
    }
    for entry in audit_trail {
        wtr.serialize(entry).context("Failed to serialize audit entry")?;
    }
    wtr.flush().context("Failed to flush irregularity table")?;
    Ok(())
}

pub fn save_transactions(path: &Path, transactions: &[Transaction]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {:?}", path))?;
    write_transactions(file, transactions)
}

pub fn save_audit_trail(path: &Path, audit_trail: &[AuditEntry]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {:?}", path))?;
    write_audit_trail(file, audit_trail)
}

/// Read a transaction table back
pub fn read_transactions<R: io::Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut transactions = Vec::new();
    for result in rdr.deserialize() {
        let transaction: Transaction = result.context("Failed to deserialize transaction")?;
        transactions.push(transaction);
    }
    Ok(transactions)
}

pub fn load_transactions(path: &Path) -> Result<Vec<Transaction>> {
    let file = std::fs::File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
    read_transactions(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TransactionType;

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction {
                id: "1f0c".to_string(),
                date: "2024-01-15".to_string(),
                transaction_type: TransactionType::Payment,
                amount: 1000.5,
                account: "ACCT-1234".to_string(),
                description: "Rent, January".to_string(),
                vendor: "Landlord".to_string(),
            },
            Transaction {
                id: String::new(),
                date: "2024-01-16 00:12".to_string(),
                transaction_type: TransactionType::Deposit,
                amount: 5234.0,
                account: "WRONG-321".to_string(),
                description: "Withdrawal - Miscellaneous".to_string(),
                vendor: "Acme".to_string(),
            },
        ]
    }

    #[test]
    fn test_transaction_table_layout() {
        let mut buf = Vec::new();
        write_transactions(&mut buf, &sample()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], TRANSACTION_HEADERS.join(","));
        assert_eq!(
            lines[1],
            "1f0c,2024-01-15,Payment,1000.50,ACCT-1234,\"Rent, January\",Landlord"
        );
        assert_eq!(
            lines[2],
            ",2024-01-16 00:12,Deposit,5234.00,WRONG-321,Withdrawal - Miscellaneous,Acme"
        );
    }

    #[test]
    fn test_read_back() {
        let mut buf = Vec::new();
        write_transactions(&mut buf, &sample()).unwrap();
        let loaded = read_transactions(buf.as_slice()).unwrap();
        assert_eq!(loaded, sample());
    }

    #[test]
    fn test_audit_table_layout() {
        let trail = vec![AuditEntry::new("", "missing_id", "Transaction ID 1f0c removed")];
        let mut buf = Vec::new();
        write_audit_trail(&mut buf, &trail).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let expected = concat!(
            "Transaction ID,Irregularity Type,Description\n",
            ",missing_id,Transaction ID 1f0c removed\n",
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_empty_tables_keep_headers() {
        let mut buf = Vec::new();
        write_audit_trail(&mut buf, &[]).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Transaction ID,Irregularity Type,Description\n"
        );
    }
}
