/// `multipart/form-data` body builder for the upload request.
///
/// Only what the generate endpoint needs: text fields and file parts with
/// an explicit content type.
#[derive(Debug, Clone)]
pub struct MultipartForm {
    boundary: String,
    body: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
        Self::with_boundary(format!("----timetable-dash-{nanos:x}"))
    }

    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            body: Vec::new(),
        }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.open_part(&format!(
            "Content-Disposition: form-data; name=\"{}\"",
            escape(name)
        ));
        self.body.extend_from_slice(value.as_bytes());
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.open_part(&format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {content_type}",
            escape(name),
            escape(file_name)
        ));
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// `Content-Type` header value for this body.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Close the form and return the encoded body.
    pub fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        self.body
    }

    fn open_part(&mut self, headers: &str) {
        self.body
            .extend_from_slice(format!("--{}\r\n{headers}\r\n\r\n", self.boundary).as_bytes());
    }
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}

fn escape(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace(['\r', '\n'], " ")
}

/// Content type for an upload, guessed from its extension.
pub fn guess_content_type(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "xls" => "application/vnd.ms-excel",
        "json" => "application/json",
        "csv" => "text/csv",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_file_and_text_parts() {
        let form = MultipartForm::with_boundary("XyZ")
            .file("file", "GA_input.xlsx", "application/octet-stream", b"abc")
            .text("trimester", "2");
        assert_eq!(form.content_type(), "multipart/form-data; boundary=XyZ");
        let body = String::from_utf8(form.finish()).unwrap();
        assert_eq!(
            body,
            "--XyZ\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"GA_input.xlsx\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n\
             abc\r\n\
             --XyZ\r\n\
             Content-Disposition: form-data; name=\"trimester\"\r\n\r\n\
             2\r\n\
             --XyZ--\r\n"
        );
    }

    #[test]
    fn quotes_in_file_names_are_escaped() {
        let form = MultipartForm::with_boundary("b").file("file", "a\"b.xlsx", "x/y", b"");
        let body = String::from_utf8(form.finish()).unwrap();
        assert!(body.contains("filename=\"a\\\"b.xlsx\""));
    }

    #[test]
    fn content_type_guess() {
        assert_eq!(
            guess_content_type("GA_input.XLSX"),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
        assert_eq!(guess_content_type("t.json"), "application/json");
        assert_eq!(guess_content_type("noext"), "application/octet-stream");
    }
}
