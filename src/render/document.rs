//! Paginated PDF output
//!
//! Lays the text rendering out on US-Letter pages in 9pt Courier and writes a
//! minimal PDF 1.4 file using the built-in Courier font, so no font data is
//! embedded. Characters outside Latin-1 print as `?`.

const PAGE_WIDTH: u32 = 612;
const PAGE_HEIGHT: u32 = 792;
const MARGIN: u32 = 36;
const FONT_SIZE: u32 = 9;
const LEADING: u32 = 11;

/// Characters per line (Courier advance is 0.6 em)
pub const COLUMNS: usize = 100;

/// Lines per page
pub const LINES_PER_PAGE: usize = 64;

/// Lay `text` out into pages and encode it as a PDF
pub fn render(text: &str) -> Vec<u8> {
    let lines = layout_lines(text);
    let pages: Vec<&[Vec<u8>]> = if lines.is_empty() {
        vec![&lines[..]]
    } else {
        lines.chunks(LINES_PER_PAGE).collect()
    };

    let mut pdf = PdfWriter::new();
    let page_count = pages.len();

    // Objects 1-3 are catalog, page tree and font; each page then takes two
    // consecutive ids (page, content stream).
    pdf.object(b"<< /Type /Catalog /Pages 2 0 R >>");
    let kids: Vec<String> = (0..page_count)
        .map(|i| format!("{} 0 R", page_object_id(i)))
        .collect();
    pdf.object(
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            page_count
        )
        .as_bytes(),
    );
    pdf.object(b"<< /Type /Font /Subtype /Type1 /BaseFont /Courier /Encoding /WinAnsiEncoding >>");

    for (i, page_lines) in pages.iter().enumerate() {
        pdf.object(
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
                 /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
                PAGE_WIDTH,
                PAGE_HEIGHT,
                page_object_id(i) + 1
            )
            .as_bytes(),
        );
        let content = page_content(page_lines);
        let mut stream = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
        stream.extend_from_slice(&content);
        stream.extend_from_slice(b"\nendstream");
        pdf.object(&stream);
    }

    pdf.finish()
}

fn page_object_id(page_index: usize) -> usize {
    4 + page_index * 2
}

/// Split text into printable lines of at most [`COLUMNS`] encoded bytes
fn layout_lines(text: &str) -> Vec<Vec<u8>> {
    let mut lines = Vec::new();
    for raw in text.lines() {
        let encoded = encode_line(raw);
        if encoded.is_empty() {
            lines.push(Vec::new());
            continue;
        }
        lines.extend(encoded.chunks(COLUMNS).map(<[u8]>::to_vec));
    }
    lines
}

/// Map a line to WinAnsi bytes
fn encode_line(line: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(line.len());
    for c in line.chars() {
        match c {
            '\t' => out.extend_from_slice(b"    "),
            ' '..='~' => out.push(c as u8),
            '\u{A0}'..='\u{FF}' => out.push(c as u32 as u8),
            c if c.is_control() => {}
            _ => out.push(b'?'),
        }
    }
    out
}

fn page_content(lines: &[Vec<u8>]) -> Vec<u8> {
    let top = PAGE_HEIGHT - MARGIN - FONT_SIZE;
    let mut ops = format!(
        "BT\n/F1 {} Tf\n{} TL\n{} {} Td\n",
        FONT_SIZE, LEADING, MARGIN, top
    );
    for line in lines {
        ops.push('(');
        escape_into(&mut ops, line);
        ops.push_str(") Tj T*\n");
    }
    ops.push_str("ET");
    ops.into_bytes()
}

/// Escape a string operand; bytes above 0x7E become octal escapes
fn escape_into(out: &mut String, bytes: &[u8]) {
    for &b in bytes {
        match b {
            b'(' | b')' | b'\\' => {
                out.push('\\');
                out.push(b as char);
            }
            0x20..=0x7E => out.push(b as char),
            _ => out.push_str(&format!("\\{:03o}", b)),
        }
    }
}

/// Sequential object writer that records offsets for the xref table
struct PdfWriter {
    buf: Vec<u8>,
    offsets: Vec<usize>,
}

impl PdfWriter {
    fn new() -> Self {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");
        Self {
            buf,
            offsets: Vec::new(),
        }
    }

    /// Append the next object; ids are assigned in call order starting at 1
    fn object(&mut self, body: &[u8]) {
        self.offsets.push(self.buf.len());
        let id = self.offsets.len();
        self.buf
            .extend_from_slice(format!("{} 0 obj\n", id).as_bytes());
        self.buf.extend_from_slice(body);
        self.buf.extend_from_slice(b"\nendobj\n");
    }

    fn finish(mut self) -> Vec<u8> {
        let xref_offset = self.buf.len();
        let size = self.offsets.len() + 1;
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", size);
        for offset in &self.offsets {
            xref.push_str(&format!("{:010} 00000 n \n", offset));
        }
        xref.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            size, xref_offset
        ));
        self.buf.extend_from_slice(xref.as_bytes());
        self.buf
    }
}
