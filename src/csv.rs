// src/csv.rs
use std::io::{self, Write};

use crate::data::Record;

pub const REVIEW_HEADERS: [&str; 5] = ["id", "date", "rating", "title", "review"];
pub const ENTITY_HEADERS: [&str; 3] = ["id", "about", "address"];

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write, S: AsRef<str>>(mut w: W, row: &[S], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        let cell = cell.as_ref();
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/* ---------------- Flattening records ---------------- */

/// Review records as `[id, date, rating, title, review]`; entity records skipped.
pub fn review_rows(records: &[Record]) -> Vec<[String; 5]> {
    records
        .iter()
        .filter_map(Record::as_review)
        .map(|r| [r.id.clone(), r.date.clone(), r.rating.clone(), r.title.clone(), r.review.clone()])
        .collect()
}

/// Entity records as `[id, about, address]`, absent fields empty.
pub fn entity_rows(records: &[Record]) -> Vec<[String; 3]> {
    records
        .iter()
        .filter_map(Record::as_entity)
        .map(|e| [
            e.id.clone(),
            e.about.clone().unwrap_or_default(),
            e.address.clone().unwrap_or_default(),
        ])
        .collect()
}

/// Full delimited text for `rows`, with an optional header line.
pub fn to_export_string<const N: usize>(
    headers: Option<&[&str; N]>,
    rows: &[[String; N]],
    sep: char,
) -> String {
    let mut buf: Vec<u8> = Vec::new();

    if let Some(h) = headers {
        let _ = write_row(&mut buf, h, sep);
    }
    for r in rows {
        let _ = write_row(&mut buf, r, sep);
    }

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{EntityRecord, ReviewRecord};

    #[test]
    fn quotes_only_when_needed() {
        let mut buf = Vec::new();
        write_row(&mut buf, &["plain", "has,comma", "has \"quote\""], ',').unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "plain,\"has,comma\",\"has \"\"quote\"\"\"\n");
    }

    #[test]
    fn tsv_leaves_commas_alone() {
        let mut buf = Vec::new();
        write_row(&mut buf, &["a,b", "c"], '\t').unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "a,b\tc\n");
    }

    #[test]
    fn rows_split_by_record_kind() {
        let records = vec![
            Record::Entity(EntityRecord { id: s!("a"), about: None, address: Some(s!("1 Main St")) }),
            Record::Review(ReviewRecord {
                id: s!("a"), date: s!("d"), rating: s!("4"), title: s!("t"), review: s!("b"),
            }),
        ];
        assert_eq!(entity_rows(&records), vec![[s!("a"), s!(), s!("1 Main St")]]);
        assert_eq!(review_rows(&records).len(), 1);

        let text = to_export_string(Some(&REVIEW_HEADERS), &review_rows(&records), ',');
        assert_eq!(text, "id,date,rating,title,review\na,d,4,t,b\n");
    }
}
