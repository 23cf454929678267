use std::collections::HashMap;

use axum::extract::Multipart;

use crate::entities::Upload;
use crate::error::Error;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A multipart form split into the uploaded files of one field and the
/// remaining text fields.
#[derive(Debug, Default)]
pub struct Form {
    pub files: Vec<Upload>,
    fields: HashMap<String, String>,
}

impl Form {
    pub async fn read(mut multipart: Multipart, file_field: &str) -> Result<Self, Error> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();

            if name != file_field {
                let value = field.text().await?;
                form.fields.insert(name, value);
                continue;
            }

            let filename = field.file_name().unwrap_or_default().to_string();
            let content_type = field
                .content_type()
                .map(|mime| mime.to_string())
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
            let bytes = field.bytes().await?;

            // browsers submit an empty part when no file was picked
            if filename.is_empty() && bytes.is_empty() {
                continue;
            }

            form.files.push(Upload {
                filename,
                content_type,
                bytes: bytes.to_vec(),
            });
        }

        Ok(form)
    }

    /// Missing fields read as empty and are rejected by the engine.
    pub fn text(&mut self, name: &str) -> String {
        self.fields.remove(name).unwrap_or_default()
    }

    pub fn optional(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name).filter(|value| !value.trim().is_empty())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::{FromRequest, RequestParts};
    use axum::http::{header::CONTENT_TYPE, Request};

    const BOUNDARY: &str = "frota-boundary";

    pub(crate) enum Part<'a> {
        Text(&'a str, &'a str),
        File(&'a str, &'a str, &'a str, &'a [u8]),
    }

    pub(crate) async fn multipart(parts: &[Part<'_>]) -> Multipart {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                            .as_bytes(),
                    );
                    body.extend_from_slice(value.as_bytes());
                }
                Part::File(name, filename, content_type, bytes) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                            name, filename, content_type
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(bytes);
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

        let request = Request::builder()
            .method("POST")
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap();

        Multipart::from_request(&mut RequestParts::new(request))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn splits_files_from_fields() {
        let multipart = multipart(&[
            Part::File("images", "frente.jpg", "image/jpeg", b"\xff\xd8\xff"),
            Part::Text("location", "Campinas, SP"),
            Part::File("images", "lateral.png", "image/png", b"\x89PNG"),
            Part::File("images", "", "application/octet-stream", b""),
        ])
        .await;

        let mut form = Form::read(multipart, "images").await.unwrap();

        assert_eq!(form.files.len(), 2);
        assert_eq!(form.files[0].filename, "frente.jpg");
        assert_eq!(form.files[1].content_type, "image/png");
        assert_eq!(form.files[1].bytes, b"\x89PNG");
        assert_eq!(form.text("location"), "Campinas, SP");
        assert_eq!(form.text("model"), "");
        assert_eq!(form.optional("vehicle_id"), None);
    }
}
