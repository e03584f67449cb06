//! Shared test fixtures: tiny PDF writer and multipart request bodies

use axum::body::Body;
use axum::http::{header, Request};

use crate::config::Config;

pub const BOUNDARY: &str = "----pdfgenieboundary7MA4YWxkTrZu0gW";

/// Single-page PDF with one text line per entry
pub fn pdf_with_text(lines: &[&str]) -> Vec<u8> {
    pdf_with_pages(&[lines])
}

/// Build a valid PDF (Helvetica, US Letter) with the given lines on each page.
///
/// Lines must be ASCII. Up to ~60 lines fit on a page.
pub fn pdf_with_pages(pages: &[&[&str]]) -> Vec<u8> {
    let mut objects: Vec<String> = Vec::new();

    let kids: Vec<String> = (0..pages.len())
        .map(|i| format!("{} 0 R", 4 + i * 2))
        .collect();

    objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
    objects.push(format!(
        "<< /Type /Pages /Kids [{}] /Count {} >>",
        kids.join(" "),
        pages.len()
    ));
    objects.push("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string());

    for (i, lines) in pages.iter().enumerate() {
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
            5 + i * 2
        ));

        let mut stream = String::from("BT\n/F1 10 Tf\n12 TL\n36 756 Td\n");
        for line in lines.iter() {
            stream.push_str(&format!("({}) Tj T*\n", escape_pdf_string(line)));
        }
        stream.push_str("ET\n");

        objects.push(format!(
            "<< /Length {} >>\nstream\n{}endstream",
            stream.len(),
            stream
        ));
    }

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }

    let xref_start = out.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        xref.push_str(&format!("{:010} 00000 n \n", offset));
    }
    out.extend_from_slice(xref.as_bytes());
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_start
        )
        .as_bytes(),
    );

    out
}

/// Single-page PDF whose page tree declares a second page that does not exist
pub fn pdf_with_missing_page(lines: &[&str]) -> Vec<u8> {
    let pdf = pdf_with_text(lines);
    let needle = b"/Count 1 ";
    let at = pdf
        .windows(needle.len())
        .position(|w| w == needle)
        .expect("page tree count");

    // Same byte length, so the xref offsets stay valid
    let mut broken = pdf;
    broken[at + 7] = b'2';
    broken
}

fn escape_pdf_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('(', "\\(").replace(')', "\\)")
}

/// A `multipart/form-data` body holding one file part
pub fn multipart_body(field: &str, filename: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(data.len() + 256);
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
             Content-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// `POST /upload` request carrying `data` as the `file` field
pub fn upload_request(filename: &str, content_type: &str, data: &[u8]) -> Request<Body> {
    let body = multipart_body("file", filename, content_type, data);

    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .unwrap()
}

/// Defaults with a dummy key, as `from_env` would produce
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.gemini.api_key = "test-key".to_string();
    config
}

/// ~80 chars per line, `count` distinct lines
pub fn numbered_lines(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            format!(
                "Line {:04} of the employee handbook says lunch breaks are mandatory here.",
                i
            )
        })
        .collect()
}
