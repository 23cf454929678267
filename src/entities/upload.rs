use base64::Engine as _;

/// A file received from the client, kept in memory for the length of one
/// request.
#[derive(Clone, Debug)]
pub struct Upload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.bytes)
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

#[test]
fn encodes_standard_base64() {
    let upload = Upload {
        filename: "front.jpg".into(),
        content_type: "image/jpeg".into(),
        bytes: b"hello".to_vec(),
    };

    assert_eq!(upload.base64(), "aGVsbG8=");
    assert!(upload.is_image());
}
