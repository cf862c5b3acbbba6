use std::io::{self, Write};

use crate::pdf::objects::{ObjId, PdfObject};

/// Serialises indirect objects to a `Write` target, remembering the byte
/// offset of each so the cross-reference table can be emitted at the end.
pub struct PdfWriter<W: Write> {
    out: W,
    offset: usize,
    offsets: Vec<(u32, usize)>,
}

impl<W: Write> PdfWriter<W> {
    pub fn new(out: W) -> Self {
        PdfWriter {
            out,
            offset: 0,
            offsets: Vec::new(),
        }
    }

    fn emit(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.out.write_all(bytes)?;
        self.offset += bytes.len();
        Ok(())
    }

    /// `%PDF-1.7` plus the binary marker comment.
    pub fn write_header(&mut self) -> io::Result<()> {
        self.emit(b"%PDF-1.7\n%\xe2\xe3\xcf\xd3\n")
    }

    pub fn write_object(&mut self, id: ObjId, obj: &PdfObject) -> io::Result<()> {
        self.offsets.push((id.0, self.offset));
        let mut buf = format!("{} 0 obj\n", id.0).into_bytes();
        serialize(obj, &mut buf);
        buf.extend_from_slice(b"\nendobj\n");
        self.emit(&buf)
    }

    /// Cross-reference table, trailer and `%%EOF`. Object numbers never
    /// written get free entries.
    pub fn finish(mut self, root: ObjId, info: Option<ObjId>) -> io::Result<W> {
        let xref_start = self.offset;
        self.offsets.sort_by_key(|&(num, _)| num);
        let size = self.offsets.last().map(|&(num, _)| num + 1).unwrap_or(1);

        let mut table = format!("xref\n0 {}\n", size).into_bytes();
        table.extend_from_slice(b"0000000000 65535 f\r\n");
        let mut entries = self.offsets.iter().peekable();
        for num in 1..size {
            match entries.peek() {
                Some(&&(n, off)) if n == num => {
                    table.extend_from_slice(format!("{:010} 00000 n\r\n", off).as_bytes());
                    entries.next();
                }
                _ => table.extend_from_slice(b"0000000000 00000 f\r\n"),
            }
        }

        table.extend_from_slice(format!("trailer\n<< /Size {} /Root {} 0 R", size, root.0).as_bytes());
        if let Some(info) = info {
            table.extend_from_slice(format!(" /Info {} 0 R", info.0).as_bytes());
        }
        table.extend_from_slice(format!(" >>\nstartxref\n{}\n%%EOF\n", xref_start).as_bytes());
        self.emit(&table)?;
        self.out.flush()?;
        Ok(self.out)
    }
}

fn serialize(obj: &PdfObject, buf: &mut Vec<u8>) {
    match obj {
        PdfObject::Integer(n) => buf.extend_from_slice(n.to_string().as_bytes()),
        PdfObject::Real(f) => buf.extend_from_slice(format_number(*f).as_bytes()),
        PdfObject::Name(name) => {
            buf.push(b'/');
            buf.extend_from_slice(name.as_bytes());
        }
        PdfObject::Literal(bytes) => {
            buf.push(b'(');
            escape_literal(bytes, buf);
            buf.push(b')');
        }
        PdfObject::Array(items) => {
            buf.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    buf.push(b' ');
                }
                serialize(item, buf);
            }
            buf.push(b']');
        }
        PdfObject::Dictionary(entries) => {
            serialize_entries(entries, buf);
        }
        PdfObject::Stream { dict, data } => {
            let mut entries = dict.clone();
            entries.push(("Length".to_string(), PdfObject::Integer(data.len() as i64)));
            serialize_entries(&entries, buf);
            buf.extend_from_slice(b"\nstream\n");
            buf.extend_from_slice(data);
            buf.extend_from_slice(b"\nendstream");
        }
        PdfObject::Reference(id) => buf.extend_from_slice(format!("{} 0 R", id.0).as_bytes()),
    }
}

fn serialize_entries(entries: &[(String, PdfObject)], buf: &mut Vec<u8>) {
    buf.extend_from_slice(b"<<");
    for (key, value) in entries {
        buf.extend_from_slice(b" /");
        buf.extend_from_slice(key.as_bytes());
        buf.push(b' ');
        serialize(value, buf);
    }
    buf.extend_from_slice(b" >>");
}

/// Escape `\`, `(` and `)` inside a literal string.
pub fn escape_literal(bytes: &[u8], buf: &mut Vec<u8>) {
    for &b in bytes {
        if matches!(b, b'\\' | b'(' | b')') {
            buf.push(b'\\');
        }
        buf.push(b);
    }
}

/// Number formatting for objects and content streams: integers without a
/// fraction, otherwise at most four decimals with trailing zeros removed.
pub fn format_number(v: f64) -> String {
    if v == v.trunc() && v.abs() < 1e15 {
        return format!("{}", v as i64);
    }
    let s = format!("{:.4}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(obj: &PdfObject) -> String {
        let mut w = PdfWriter::new(Vec::new());
        w.write_object(ObjId(7), obj).unwrap();
        String::from_utf8_lossy(&w.finish(ObjId(7), None).unwrap()).into_owned()
    }

    #[test]
    fn dictionary_keeps_entry_order() {
        let out = written(&PdfObject::dict(vec![
            ("Type", PdfObject::name("Catalog")),
            ("Pages", PdfObject::Reference(ObjId(2))),
        ]));
        assert!(out.contains("7 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj"));
    }

    #[test]
    fn stream_gets_length() {
        let out = written(&PdfObject::stream(vec![], b"BT ET".to_vec()));
        assert!(out.contains("<< /Length 5 >>\nstream\nBT ET\nendstream"));
    }

    #[test]
    fn literal_is_escaped() {
        let out = written(&PdfObject::text("a(b)c\\d"));
        assert!(out.contains("(a\\(b\\)c\\\\d)"));
    }

    #[test]
    fn xref_fills_gaps_with_free_entries() {
        let out = written(&PdfObject::Integer(1));
        assert!(out.contains("xref\n0 8\n0000000000 65535 f\r\n"));
        assert_eq!(out.matches("0000000000 00000 f\r\n").count(), 6);
        assert!(out.contains("/Size 8 /Root 7 0 R >>"));
        assert!(out.ends_with("%%EOF\n"));
    }

    #[test]
    fn number_formatting() {
        assert_eq!(format_number(612.0), "612");
        assert_eq!(format_number(12.5), "12.5");
        assert_eq!(format_number(0.123456), "0.1235");
        assert_eq!(format_number(-0.00001), "0");
    }
}
