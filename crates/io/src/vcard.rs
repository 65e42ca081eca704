// vCard 3.0 import/export

use std::io::Read;
use std::path::Path;

use cardsync_resolve::model::{Address, ContactRecord, Photo, SourceHandle};

/// Parsed contacts plus the count of cards that could not be recovered.
/// A malformed card is skipped, never fatal — parsing always continues.
#[derive(Debug, Default)]
pub struct ParseOutcome {
    pub contacts: Vec<ContactRecord>,
    pub skipped: usize,
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Read file and convert to UTF-8 if needed (phone exports are frequently
/// Windows-1252 or Latin-1).
pub fn read_file_as_utf8(path: &Path) -> Result<String, String> {
    let mut file = std::fs::File::open(path).map_err(|e| e.to_string())?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|e| e.to_string())?;

    // Try UTF-8 first; on failure, recover the buffer from the error
    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

pub fn parse_vcard_file(path: &Path) -> Result<ParseOutcome, String> {
    let content = read_file_as_utf8(path)?;
    Ok(parse_vcards(&content))
}

struct CardBuilder {
    /// Original text, BEGIN through END, re-emitted verbatim on export.
    raw: String,
    /// Unfolded property lines.
    logical: Vec<String>,
}

impl CardBuilder {
    fn new() -> Self {
        Self { raw: String::from("BEGIN:VCARD\r\n"), logical: Vec::new() }
    }

    fn finish(mut self) -> Option<ContactRecord> {
        if self.logical.is_empty() {
            return None;
        }
        self.raw.push_str("END:VCARD\r\n");

        let mut record = ContactRecord::default();
        for line in &self.logical {
            parse_property(line, &mut record);
        }
        record.source = Some(SourceHandle { raw: self.raw });
        Some(record)
    }
}

/// Parse a vCard stream. Cards run BEGIN:VCARD to END:VCARD; folded lines
/// (RFC 6350 leading whitespace) are unfolded; lines outside any card are
/// ignored; a card that never terminates is counted as skipped.
pub fn parse_vcards(content: &str) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();
    let mut card: Option<CardBuilder> = None;

    for raw_line in content.lines() {
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);

        if line.starts_with(' ') || line.starts_with('\t') {
            // Folded continuation of the previous logical line.
            if let Some(c) = card.as_mut() {
                c.raw.push_str(line);
                c.raw.push_str("\r\n");
                if let Some(last) = c.logical.last_mut() {
                    last.push_str(&line[1..]);
                }
            }
            continue;
        }

        if line.eq_ignore_ascii_case("BEGIN:VCARD") {
            if card.is_some() {
                // Previous card never terminated.
                outcome.skipped += 1;
            }
            card = Some(CardBuilder::new());
            continue;
        }

        if line.eq_ignore_ascii_case("END:VCARD") {
            if let Some(c) = card.take() {
                match c.finish() {
                    Some(record) => outcome.contacts.push(record),
                    None => outcome.skipped += 1,
                }
            }
            continue;
        }

        if let Some(c) = card.as_mut() {
            c.raw.push_str(line);
            c.raw.push_str("\r\n");
            if !line.is_empty() {
                c.logical.push(line.to_string());
            }
        }
    }

    if card.is_some() {
        outcome.skipped += 1;
    }
    outcome
}

fn parse_property(line: &str, record: &mut ContactRecord) {
    let Some((name_part, value)) = line.split_once(':') else {
        return;
    };
    // Drop an `item1.`-style group prefix, then separate name from params.
    let name_part = name_part.rsplit('.').next().unwrap_or(name_part);
    let name = name_part
        .split(';')
        .next()
        .unwrap_or("")
        .to_ascii_uppercase();

    match name.as_str() {
        "FN" if record.display_name.is_empty() => {
            record.display_name = unescape_text(value);
        }
        "N" if record.given_name.is_empty() && record.family_name.is_empty() => {
            let parts = split_structured(value);
            record.family_name = parts.first().cloned().unwrap_or_default();
            record.given_name = parts.get(1).cloned().unwrap_or_default();
        }
        "TEL" => record.phones.push(value.trim().to_string()),
        "EMAIL" => record.emails.push(value.trim().to_string()),
        "ORG" if record.organization.is_empty() => {
            // ORG is structured; the first component is the organization name.
            record.organization = split_structured(value).into_iter().next().unwrap_or_default();
        }
        "NOTE" if record.note.is_empty() => record.note = unescape_text(value),
        "PHOTO" if record.photo.is_none() => {
            record.photo = Some(Photo { property: line.to_string() });
        }
        "ADR" => record.addresses.push(Address {
            property: line.to_string(),
            value: value.to_string(),
        }),
        _ => {}
    }
}

/// Split a structured value on unescaped `;`, unescaping each component.
fn split_structured(value: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some('n') | Some('N') => current.push('\n'),
                Some(other) => current.push(other),
                None => {}
            },
            ';' => parts.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    parts.push(current);
    parts
}

fn unescape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            ',' => out.push_str("\\,"),
            ';' => out.push_str("\\;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Append `line` folded at 75 octets, continuations indented with one space.
fn push_line(out: &mut String, line: &str) {
    let mut budget = 75usize;
    let mut used = 0usize;
    for ch in line.chars() {
        let width = ch.len_utf8();
        if used + width > budget {
            out.push_str("\r\n ");
            budget = 74;
            used = 0;
        }
        out.push(ch);
        used += width;
    }
    out.push_str("\r\n");
}

/// The FN fallback chain: a card must carry some display name.
fn full_name_for(record: &ContactRecord) -> String {
    if !record.display_name.is_empty() {
        return record.display_name.clone();
    }
    let synthesized = format!("{} {}", record.given_name, record.family_name);
    let synthesized = synthesized.trim();
    if !synthesized.is_empty() {
        return synthesized.to_string();
    }
    if let Some(phone) = record.phones.iter().find(|p| !p.is_empty()) {
        return phone.clone();
    }
    if let Some(email) = record.emails.iter().find(|e| !e.is_empty()) {
        return email.clone();
    }
    if !record.organization.is_empty() {
        return record.organization.clone();
    }
    "Unknown Contact".to_string()
}

/// Build a fresh vCard 3.0 card for a record (merged records have no
/// original form to re-emit).
pub fn synthesize_vcard(record: &ContactRecord) -> String {
    let mut out = String::new();
    push_line(&mut out, "BEGIN:VCARD");
    push_line(&mut out, "VERSION:3.0");
    push_line(&mut out, &format!("FN:{}", escape_text(&full_name_for(record))));
    push_line(
        &mut out,
        &format!(
            "N:{};{};;;",
            escape_text(&record.family_name),
            escape_text(&record.given_name)
        ),
    );
    for phone in record.phones.iter().filter(|p| !p.is_empty()) {
        push_line(&mut out, &format!("TEL;TYPE=CELL:{phone}"));
    }
    for email in record.emails.iter().filter(|e| !e.is_empty()) {
        push_line(&mut out, &format!("EMAIL;TYPE=INTERNET:{email}"));
    }
    if !record.organization.is_empty() {
        push_line(&mut out, &format!("ORG:{}", escape_text(&record.organization)));
    }
    if !record.note.is_empty() {
        push_line(&mut out, &format!("NOTE:{}", escape_text(&record.note)));
    }
    for address in &record.addresses {
        push_line(&mut out, &address.property);
    }
    if let Some(photo) = &record.photo {
        push_line(&mut out, &photo.property);
    }
    push_line(&mut out, "END:VCARD");
    out
}

/// Serialize contacts, re-emitting each record's original card when it has
/// one (filter / missing flows keep imports byte-faithful).
pub fn write_vcards(contacts: &[ContactRecord]) -> String {
    let mut out = String::new();
    for contact in contacts {
        match &contact.source {
            Some(handle) => {
                out.push_str(&handle.raw);
                if !handle.raw.ends_with('\n') {
                    out.push_str("\r\n");
                }
            }
            None => out.push_str(&synthesize_vcard(contact)),
        }
    }
    out
}

/// Serialize contacts as freshly built cards, ignoring retained originals
/// (the master-file flow re-synthesizes everything).
pub fn synthesize_vcards(contacts: &[ContactRecord]) -> String {
    contacts.iter().map(synthesize_vcard).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE: &str = "\
BEGIN:VCARD\r
VERSION:3.0\r
FN:Jon Smith\r
N:Smith;Jon;;;\r
TEL;TYPE=CELL:+1 (555) 123-4567\r
EMAIL;TYPE=INTERNET:jon@example.com\r
ORG:Acme Corp;Engineering\r
NOTE:met at conference\r
END:VCARD\r
";

    #[test]
    fn parse_basic_card() {
        let outcome = parse_vcards(SIMPLE);
        assert_eq!(outcome.skipped, 0);
        assert_eq!(outcome.contacts.len(), 1);

        let c = &outcome.contacts[0];
        assert_eq!(c.display_name, "Jon Smith");
        assert_eq!(c.family_name, "Smith");
        assert_eq!(c.given_name, "Jon");
        assert_eq!(c.phones, vec!["+1 (555) 123-4567"]);
        assert_eq!(c.emails, vec!["jon@example.com"]);
        assert_eq!(c.organization, "Acme Corp");
        assert_eq!(c.note, "met at conference");
        assert!(c.source.is_some());
    }

    #[test]
    fn parse_multiple_cards() {
        let content = format!("{SIMPLE}{SIMPLE}");
        let outcome = parse_vcards(&content);
        assert_eq!(outcome.contacts.len(), 2);
    }

    #[test]
    fn folded_lines_unfold() {
        let content = "\
BEGIN:VCARD\r
FN:Jonathan Quincy\r
 \u{20}Smith\r
END:VCARD\r
";
        // One leading space is the fold marker; the rest is content.
        let outcome = parse_vcards(content);
        assert_eq!(outcome.contacts[0].display_name, "Jonathan Quincy Smith");
    }

    #[test]
    fn escaped_values_unescape() {
        let content = "\
BEGIN:VCARD\r
FN:Smith\\, Jon\r
NOTE:line one\\nline two\\; with semicolon\r
END:VCARD\r
";
        let outcome = parse_vcards(content);
        let c = &outcome.contacts[0];
        assert_eq!(c.display_name, "Smith, Jon");
        assert_eq!(c.note, "line one\nline two; with semicolon");
    }

    #[test]
    fn group_prefix_and_case_tolerated() {
        let content = "\
begin:vcard\r
item1.TEL;type=pref:555-123-4567\r
item2.EMAIL:jon@example.com\r
end:vcard\r
";
        let outcome = parse_vcards(content);
        let c = &outcome.contacts[0];
        assert_eq!(c.phones, vec!["555-123-4567"]);
        assert_eq!(c.emails, vec!["jon@example.com"]);
    }

    #[test]
    fn unterminated_card_skipped_parsing_continues() {
        let content = "\
BEGIN:VCARD\r
FN:Broken Card\r
BEGIN:VCARD\r
FN:Good Card\r
END:VCARD\r
";
        let outcome = parse_vcards(content);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(outcome.contacts.len(), 1);
        assert_eq!(outcome.contacts[0].display_name, "Good Card");
    }

    #[test]
    fn empty_card_skipped() {
        let outcome = parse_vcards("BEGIN:VCARD\r\nEND:VCARD\r\n");
        assert_eq!(outcome.skipped, 1);
        assert!(outcome.contacts.is_empty());
    }

    #[test]
    fn addresses_and_photo_carried_opaquely() {
        let content = "\
BEGIN:VCARD\r
FN:Jon\r
ADR;TYPE=HOME:;;123 Main St;Springfield;IL;62704;USA\r
PHOTO;ENCODING=b;TYPE=JPEG:dGVzdGJ5dGVz\r
END:VCARD\r
";
        let outcome = parse_vcards(content);
        let c = &outcome.contacts[0];
        assert_eq!(c.addresses.len(), 1);
        assert_eq!(c.addresses[0].value, ";;123 Main St;Springfield;IL;62704;USA");
        assert!(c.addresses[0].property.starts_with("ADR;TYPE=HOME:"));
        assert!(c.photo.as_ref().unwrap().property.contains("dGVzdGJ5dGVz"));
    }

    #[test]
    fn source_round_trip_is_verbatim() {
        let outcome = parse_vcards(SIMPLE);
        let emitted = write_vcards(&outcome.contacts);
        assert_eq!(emitted, SIMPLE);
    }

    #[test]
    fn synthesize_includes_mapped_fields() {
        let record = ContactRecord {
            display_name: "Jon Smith".into(),
            given_name: "Jon".into(),
            family_name: "Smith".into(),
            phones: vec!["555-123-4567".into(), "".into()],
            emails: vec!["jon@example.com".into()],
            organization: "Acme, Inc".into(),
            note: "two\nlines".into(),
            ..Default::default()
        };
        let card = synthesize_vcard(&record);
        assert!(card.starts_with("BEGIN:VCARD\r\nVERSION:3.0\r\n"));
        assert!(card.contains("FN:Jon Smith\r\n"));
        assert!(card.contains("N:Smith;Jon;;;\r\n"));
        assert!(card.contains("TEL;TYPE=CELL:555-123-4567\r\n"));
        assert!(card.contains("EMAIL;TYPE=INTERNET:jon@example.com\r\n"));
        assert!(card.contains("ORG:Acme\\, Inc\r\n"));
        assert!(card.contains("NOTE:two\\nlines\r\n"));
        assert!(card.ends_with("END:VCARD\r\n"));
        // The empty phone is dropped.
        assert_eq!(card.matches("TEL").count(), 1);
    }

    #[test]
    fn synthesize_fn_fallback_chain() {
        let mut record = ContactRecord::default();
        assert!(synthesize_vcard(&record).contains("FN:Unknown Contact\r\n"));

        record.organization = "Acme".into();
        assert!(synthesize_vcard(&record).contains("FN:Acme\r\n"));

        record.emails = vec!["jon@example.com".into()];
        assert!(synthesize_vcard(&record).contains("FN:jon@example.com\r\n"));

        record.phones = vec!["555-123-4567".into()];
        assert!(synthesize_vcard(&record).contains("FN:555-123-4567\r\n"));

        record.given_name = "Jon".into();
        assert!(synthesize_vcard(&record).contains("FN:Jon\r\n"));

        record.display_name = "Jonathan Smith".into();
        assert!(synthesize_vcard(&record).contains("FN:Jonathan Smith\r\n"));
    }

    #[test]
    fn long_lines_fold_and_unfold() {
        let record = ContactRecord {
            display_name: "A".repeat(200),
            ..Default::default()
        };
        let card = synthesize_vcard(&record);
        for line in card.lines() {
            assert!(line.len() <= 75, "unfolded line of {} bytes", line.len());
        }
        let reparsed = parse_vcards(&card);
        assert_eq!(reparsed.contacts[0].display_name, record.display_name);
    }

    #[test]
    fn synthesized_round_trip() {
        let record = ContactRecord {
            display_name: "Smith, Jon".into(),
            note: "first\nsecond".into(),
            phones: vec!["555-123-4567".into()],
            ..Default::default()
        };
        let reparsed = parse_vcards(&synthesize_vcard(&record));
        let c = &reparsed.contacts[0];
        assert_eq!(c.display_name, "Smith, Jon");
        assert_eq!(c.note, "first\nsecond");
        assert_eq!(c.phones, vec!["555-123-4567"]);
    }
}
